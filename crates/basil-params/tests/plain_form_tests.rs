use basil_params::{
    registry, Categorical, ContinuousNumerical, DiscreteNumericalIrregular,
    DiscreteNumericalRegular, ParamValue, Parameter, ParameterError, PlainParameter, ValueIssue,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn rebuild(param: &dyn Parameter) -> Box<dyn Parameter> {
    let json = param.to_plain_form().to_json().unwrap();
    let record = PlainParameter::from_json(&json).unwrap();
    registry::global().from_plain_form(&record).unwrap()
}

proptest! {
    #[test]
    fn prop_continuous_round_trip(
        min in -1e6..1e6f64,
        span in 0.0..1e6f64,
        value in -2e6..2e6f64,
    ) {
        let original = ContinuousNumerical::new("x", min, min + span).unwrap();
        let rebuilt = rebuild(&original);
        prop_assert_eq!(rebuilt.to_plain_form(), original.to_plain_form());
        let value = ParamValue::Number(value);
        prop_assert_eq!(rebuilt.validate(&value).is_ok(), original.validate(&value).is_ok());
    }

    #[test]
    fn prop_regular_grid_points_validate(
        min in -1000i32..1000,
        steps in 1u32..50,
        step_tenths in 1u32..100,
        k in 0u32..50,
    ) {
        let step = f64::from(step_tenths) / 10.0;
        let min = f64::from(min);
        let max = min + f64::from(steps) * step;
        let param = DiscreteNumericalRegular::new("g", min, max, step).unwrap();
        let k = k.min(steps);
        let value = ParamValue::Number(min + f64::from(k) * step);
        prop_assert!(param.validate(&value).is_ok(), "{} rejected", value);

        let halfway = ParamValue::Number(min + (f64::from(k.min(steps - 1)) + 0.5) * step);
        prop_assert!(param.validate(&halfway).is_err());
    }

    #[test]
    fn prop_categorical_round_trip(labels in proptest::collection::hash_set("[a-z]{1,8}", 1..8)) {
        let labels: Vec<String> = labels.into_iter().collect();
        let original = Categorical::new("c", &labels).unwrap();
        let rebuilt = rebuild(&original);
        prop_assert_eq!(rebuilt.to_plain_form(), original.to_plain_form());
        for label in &labels {
            prop_assert!(rebuilt.parse_cell(label).is_ok());
        }
    }

    #[test]
    fn prop_examples_validate(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for tag in registry::global().type_tags() {
            let param = registry::global().create_default(tag, "sample").unwrap();
            let value = param.example_value(&mut rng);
            prop_assert!(param.validate(&value).is_ok());
        }
    }
}

#[test]
fn continuous_bounds_survive_json_exactly() {
    let bound = -919_087.784_205_893_5;
    let original = ContinuousNumerical::new("x", bound, bound).unwrap();
    let rebuilt = rebuild(&original);
    assert_eq!(rebuilt.to_plain_form(), original.to_plain_form());
    assert!(rebuilt.validate(&ParamValue::Number(bound)).is_ok());
}

#[test]
fn step_equal_to_range_constructs() {
    for (min, max, step) in [(506.0, 508.2, 2.2), (0.0, 0.3, 0.1 + 0.2)] {
        let param = DiscreteNumericalRegular::new("g", min, max, step).unwrap();
        assert!(param.validate(&ParamValue::Number(min)).is_ok());
        assert!(param.validate(&ParamValue::Number(max)).is_ok());
        let rebuilt = rebuild(&param);
        assert!(rebuilt.validate(&ParamValue::Number(max)).is_ok());
    }
}

#[test]
fn wide_grid_examples_stay_on_grid() {
    let param = DiscreteNumericalRegular::new("x", 0.0, 1e20, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let value = param.example_value(&mut rng);
        assert!(param.validate(&value).is_ok(), "{value}");
    }
}

#[test]
fn regular_grid_scenario() {
    let param = DiscreteNumericalRegular::new("temperature", 0.0, 10.0, 2.5).unwrap();
    assert!(param.validate(&ParamValue::Number(5.0)).is_ok());
    assert!(matches!(
        param.validate(&ParamValue::Number(6.0)),
        Err(ValueIssue::NotInAllowedSet(_))
    ));
    assert!(matches!(
        param.validate(&ParamValue::Number(-1.0)),
        Err(ValueIssue::OutOfRange(_))
    ));
}

#[test]
fn categorical_scenario() {
    let param = Categorical::new("grade", ["A", "B", "C"]).unwrap();
    assert!(param.validate(&ParamValue::from("B")).is_ok());
    assert!(matches!(
        param.validate(&ParamValue::from("D")),
        Err(ValueIssue::NotInAllowedSet(_))
    ));
}

#[test]
fn invalid_constraints_fail_construction() {
    assert!(ContinuousNumerical::new("x", 2.0, 1.0).is_err());
    assert!(DiscreteNumericalIrregular::new("x", vec![]).is_err());
    assert!(DiscreteNumericalRegular::new("x", 0.0, 1.0, 0.0).is_err());
    assert!(DiscreteNumericalRegular::new("x", 0.0, 1.0, -0.5).is_err());
}

#[test]
fn unknown_tag_from_plain_form() {
    let record = PlainParameter::from_json(r#"{"name": "q", "type": "quantum"}"#).unwrap();
    assert_eq!(
        registry::global().from_plain_form(&record).unwrap_err(),
        ParameterError::UnknownType("quantum".into())
    );
}

#[test]
fn every_builtin_survives_json() {
    let records = vec![
        PlainParameter::new(
            "temperature",
            "continuous_numerical",
            json!({"min": 20.0, "max": 80.0}).as_object().unwrap().clone(),
        ),
        PlainParameter::new(
            "rpm",
            "discrete_numerical_regular",
            json!({"min": 100, "max": 500, "step": 50}).as_object().unwrap().clone(),
        ),
        PlainParameter::new(
            "loading",
            "discrete_numerical_irregular",
            json!({"values": [0.5, 1, 2.5]}).as_object().unwrap().clone(),
        ),
        PlainParameter::new(
            "catalyst",
            "categorical",
            json!({"values": ["Pd", "Pt", "Ni"]}).as_object().unwrap().clone(),
        ),
        PlainParameter::new(
            "operator",
            "fixed",
            json!({"value": "alice"}).as_object().unwrap().clone(),
        ),
        PlainParameter::new(
            "solvent",
            "substance",
            json!({"values": ["CCO", "CC(=O)O"]}).as_object().unwrap().clone(),
        ),
    ];

    let params = registry::global().from_plain_forms(&records).unwrap();
    assert_eq!(params.len(), 6);
    for (param, record) in params.iter().zip(&records) {
        let rebuilt = rebuild(param.as_ref());
        assert_eq!(rebuilt.name(), record.name);
        assert_eq!(rebuilt.type_tag(), record.type_tag);
        assert_eq!(rebuilt.describe_constraints(), param.describe_constraints());
    }
}

#[test]
fn malformed_constraint_is_reported() {
    let record = PlainParameter::from_json(
        r#"{"name": "t", "type": "continuous_numerical", "constraints": {"min": "low", "max": 1}}"#,
    )
    .unwrap();
    let err = registry::global().from_plain_form(&record).unwrap_err();
    assert!(matches!(err, ParameterError::MalformedConstraint { .. }));
}
