use anyhow::{bail, Context, Result};
use basil_campaign::CampaignDraft;
use basil_csv::{
    BasilConfig, CampaignSummary, ColumnOrder, CsvImporter, ImportReport, TemplateGenerator,
};
use basil_params::registry;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("basil")
        .version(env!("CARGO_PKG_VERSION"))
        .about("BASIL campaign setup: parameter types, CSV templates and data import")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("types")
                .about("List registered parameter types")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Generate the CSV data template for a draft")
                .arg(draft_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .value_parser(value_parser!(usize))
                        .help("Number of example rows"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducible example rows"),
                )
                .arg(
                    Arg::new("info")
                        .long("info")
                        .action(ArgAction::SetTrue)
                        .help("Print template metadata as JSON instead of the template"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Validate a CSV data file against a draft")
                .arg(draft_arg())
                .arg(
                    Arg::new("csv")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("CSV data file"),
                )
                .arg(
                    Arg::new("delimiter")
                        .long("delimiter")
                        .value_parser(value_parser!(char))
                        .help("Field delimiter (detected when omitted)"),
                )
                .arg(
                    Arg::new("strict-order")
                        .long("strict-order")
                        .action(ArgAction::SetTrue)
                        .help("Reject columns that are out of order"),
                )
                .arg(
                    Arg::new("allow-extra-columns")
                        .long("allow-extra-columns")
                        .action(ArgAction::SetTrue)
                        .help("Ignore unexpected columns with a warning"),
                )
                .arg(
                    Arg::new("dataset-out")
                        .long("dataset-out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the valid rows as JSON"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Export a draft as a sectioned CSV summary")
                .arg(draft_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Report what keeps a draft from being ready")
                .arg(draft_arg()),
        )
}

fn draft_arg() -> Arg {
    Arg::new("draft")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Draft file (JSON, or YAML with a .yaml/.yml extension)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .help("Write to this file instead of stdout")
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<BasilConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => BasilConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(BasilConfig::default()),
    }
}

fn load_draft(path: &Path) -> Result<CampaignDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading draft {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let draft = if is_yaml {
        CampaignDraft::from_yaml(&text, registry::global())
    } else {
        CampaignDraft::from_json(&text, registry::global())
    }
    .with_context(|| format!("parsing draft {}", path.display()))?;
    tracing::debug!(draft = draft.name(), path = %path.display(), "Draft loaded");
    Ok(draft)
}

fn emit(output: Option<&PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Output written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn draft_path(args: &ArgMatches) -> Result<&PathBuf> {
    args.get_one::<PathBuf>("draft")
        .context("missing draft argument")
}

fn run_types(args: &ArgMatches) -> Result<bool> {
    let registry = registry::global();
    let mut entries = Vec::new();
    for tag in registry.type_tags() {
        let sample = registry.create_default(tag, "sample")?;
        entries.push((tag, sample.display_name(), sample.describe_constraints()));
    }

    if args.get_flag("json") {
        let json: Vec<_> = entries
            .iter()
            .map(|(tag, display, defaults)| {
                serde_json::json!({"type": tag, "display_name": display, "defaults": defaults})
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for (tag, display, defaults) in &entries {
            println!("{tag:<30} {display:<30} {defaults}");
        }
    }
    Ok(true)
}

fn run_template(args: &ArgMatches, config: BasilConfig) -> Result<bool> {
    let draft = load_draft(draft_path(args)?)?;
    let mut template = config.template;
    if let Some(rows) = args.get_one::<usize>("rows") {
        template = template.with_rows(*rows);
    }
    if let Some(seed) = args.get_one::<u64>("seed") {
        template = template.with_seed(*seed);
    }
    template.validate()?;

    let generator = TemplateGenerator::new(&draft).with_config(template);
    if args.get_flag("info") {
        println!("{}", serde_json::to_string_pretty(&generator.info())?);
        return Ok(true);
    }
    emit(args.get_one::<PathBuf>("output"), &generator.generate()?)?;
    Ok(true)
}

fn print_report(report: &ImportReport, json: bool) -> Result<()> {
    if json {
        let errors: Vec<String> = report.errors().iter().map(ToString::to_string).collect();
        let warnings: Vec<String> = report.warnings().iter().map(ToString::to_string).collect();
        let value = serde_json::json!({
            "valid": report.is_valid(),
            "summary": report.summary(),
            "rows": report.rows().len(),
            "valid_rows": report.valid_rows().count(),
            "error_counts": report.error_counts(),
            "errors": errors,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report.summary());
        for warning in report.warnings() {
            println!("warning: {warning}");
        }
        if !report.is_valid() {
            println!("{}", report.formatted_errors());
        }
    }
    Ok(())
}

fn run_import(args: &ArgMatches, config: BasilConfig) -> Result<bool> {
    let draft = load_draft(draft_path(args)?)?;
    let csv_path = args
        .get_one::<PathBuf>("csv")
        .context("missing csv argument")?;

    let mut import = config.import;
    if let Some(delimiter) = args.get_one::<char>("delimiter") {
        import = import.with_delimiter(*delimiter);
        import.delimiter_byte()?;
    }
    if args.get_flag("strict-order") {
        import = import.with_column_order(ColumnOrder::Strict);
    }
    if args.get_flag("allow-extra-columns") {
        import = import.with_extra_columns(true);
    }

    let report = CsvImporter::new(&draft)
        .with_config(import)
        .import_path(csv_path)
        .with_context(|| format!("importing {}", csv_path.display()))?;
    print_report(&report, args.get_flag("json"))?;

    if let Some(path) = args.get_one::<PathBuf>("dataset-out") {
        let dataset = serde_json::to_string_pretty(&report.dataset())?;
        std::fs::write(path, dataset).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = report.valid_rows().count(), "Dataset written");
    }

    Ok(report.is_valid())
}

fn run_summary(args: &ArgMatches) -> Result<bool> {
    let draft = load_draft(draft_path(args)?)?;
    let text = CampaignSummary::new(&draft).render()?;
    emit(args.get_one::<PathBuf>("output"), &text)?;
    Ok(true)
}

fn run_check(args: &ArgMatches) -> Result<bool> {
    let draft = load_draft(draft_path(args)?)?;
    let issues = draft.validate();
    if issues.is_empty() {
        println!(
            "Draft '{}' is ready: {} parameters, {} targets",
            draft.name(),
            draft.parameters().len(),
            draft.targets().len()
        );
        return Ok(true);
    }
    for issue in &issues {
        println!("{issue}");
    }
    Ok(false)
}

fn run(matches: &ArgMatches) -> Result<bool> {
    let config = load_config(matches)?;
    match matches.subcommand() {
        Some(("types", args)) => run_types(args),
        Some(("template", args)) => run_template(args, config),
        Some(("import", args)) => run_import(args, config),
        Some(("summary", args)) => run_summary(args),
        Some(("check", args)) => run_check(args),
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
