//! Parameter type registry
//!
//! Maps a type tag to a constructor taking `(name, constraints)`. The
//! built-in variants are registered by [`ParameterRegistry::with_defaults`];
//! [`global`] exposes a lazily built, read-only instance of that set.
//! Local registries can be extended with custom variants through
//! [`ParameterRegistry::register`] or [`ParameterRegistry::register_type`].

use crate::error::ParameterError;
use crate::parameter::{Parameter, ParameterType};
use crate::plain::{Constraints, PlainParameter};
use crate::types::{
    Categorical, ContinuousNumerical, DiscreteNumericalIrregular, DiscreteNumericalRegular, Fixed,
    Substance,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Constructor building a parameter from name and constraint record
pub type Constructor =
    Arc<dyn Fn(&str, &Constraints) -> Result<Box<dyn Parameter>, ParameterError> + Send + Sync>;

type DefaultConstructor = Arc<dyn Fn(&str) -> Result<Box<dyn Parameter>, ParameterError> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    build: Constructor,
    default: Option<DefaultConstructor>,
}

/// Registry of parameter constructors keyed by type tag
///
/// Tags keep registration order; re-registering a tag replaces its
/// constructor in place.
#[derive(Clone, Default)]
pub struct ParameterRegistry {
    registrations: IndexMap<String, Registration>,
}

impl std::fmt::Debug for ParameterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("type_tags", &self.type_tags())
            .finish()
    }
}

impl ParameterRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: IndexMap::new(),
        }
    }

    /// Create registry with the six built-in variants
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_type::<ContinuousNumerical>();
        registry.register_type::<DiscreteNumericalRegular>();
        registry.register_type::<DiscreteNumericalIrregular>();
        registry.register_type::<Categorical>();
        registry.register_type::<Fixed>();
        registry.register_type::<Substance>();
        registry
    }

    /// Register a constructor for a tag
    ///
    /// Parameters created this way have no default constraints, so
    /// [`Self::create_default`] fails for the tag.
    pub fn register<F>(&mut self, type_tag: &str, constructor: F)
    where
        F: Fn(&str, &Constraints) -> Result<Box<dyn Parameter>, ParameterError>
            + Send
            + Sync
            + 'static,
    {
        tracing::debug!(type_tag, "Registering parameter constructor");
        self.registrations.insert(
            type_tag.to_string(),
            Registration {
                build: Arc::new(constructor),
                default: None,
            },
        );
    }

    /// Register a variant implementing [`ParameterType`], including its defaults
    pub fn register_type<T: ParameterType>(&mut self) {
        tracing::debug!(type_tag = T::TYPE_TAG, "Registering parameter type");
        let build: Constructor = Arc::new(|name: &str, constraints: &Constraints| {
            T::from_constraints(name, constraints).map(|p| Box::new(p) as Box<dyn Parameter>)
        });
        let default: DefaultConstructor =
            Arc::new(|name: &str| T::with_defaults(name).map(|p| Box::new(p) as Box<dyn Parameter>));
        self.registrations.insert(
            T::TYPE_TAG.to_string(),
            Registration {
                build,
                default: Some(default),
            },
        );
    }

    /// Check if a tag is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, type_tag: &str) -> bool {
        self.registrations.contains_key(type_tag)
    }

    /// Registered tags in registration order
    #[must_use]
    pub fn type_tags(&self) -> Vec<&str> {
        self.registrations.keys().map(String::as_str).collect()
    }

    /// Number of registered tags
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Build a parameter from tag, name and constraints
    ///
    /// # Errors
    /// Returns [`ParameterError::UnknownType`] for unregistered tags, or the
    /// constructor's error
    pub fn create(
        &self,
        type_tag: &str,
        name: &str,
        constraints: &Constraints,
    ) -> Result<Box<dyn Parameter>, ParameterError> {
        let registration = self
            .registrations
            .get(type_tag)
            .ok_or_else(|| ParameterError::UnknownType(type_tag.to_string()))?;
        (registration.build)(name, constraints)
    }

    /// Build a parameter with the variant's default constraints
    ///
    /// # Errors
    /// Returns [`ParameterError::UnknownType`] for unregistered tags and
    /// [`ParameterError::NoDefaults`] for tags registered without defaults
    pub fn create_default(
        &self,
        type_tag: &str,
        name: &str,
    ) -> Result<Box<dyn Parameter>, ParameterError> {
        let registration = self
            .registrations
            .get(type_tag)
            .ok_or_else(|| ParameterError::UnknownType(type_tag.to_string()))?;
        let default = registration
            .default
            .as_ref()
            .ok_or_else(|| ParameterError::NoDefaults(type_tag.to_string()))?;
        default(name)
    }

    /// Rebuild a parameter from its plain form
    ///
    /// # Errors
    /// Same as [`Self::create`]
    pub fn from_plain_form(
        &self,
        record: &PlainParameter,
    ) -> Result<Box<dyn Parameter>, ParameterError> {
        self.create(&record.type_tag, &record.name, &record.constraints)
    }

    /// Rebuild a list of parameters, stopping at the first failure
    ///
    /// # Errors
    /// Returns the first record's error
    pub fn from_plain_forms<'a, I>(&self, records: I) -> Result<Vec<Box<dyn Parameter>>, ParameterError>
    where
        I: IntoIterator<Item = &'a PlainParameter>,
    {
        records
            .into_iter()
            .map(|record| self.from_plain_form(record))
            .collect()
    }
}

static GLOBAL: Lazy<ParameterRegistry> = Lazy::new(ParameterRegistry::with_defaults);

/// Process-wide registry holding the built-in variants
#[inline]
#[must_use]
pub fn global() -> &'static ParameterRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ParamValue;
    use serde_json::json;

    #[test]
    fn defaults_in_registration_order() {
        let registry = ParameterRegistry::with_defaults();
        assert_eq!(
            registry.type_tags(),
            vec![
                "continuous_numerical",
                "discrete_numerical_regular",
                "discrete_numerical_irregular",
                "categorical",
                "fixed",
                "substance",
            ]
        );
        assert_eq!(registry.len(), 6);
        assert!(ParameterRegistry::new().is_empty());
    }

    #[test]
    fn unknown_tag() {
        let err = global()
            .create("quantum", "q", &Constraints::new())
            .unwrap_err();
        assert_eq!(err, ParameterError::UnknownType("quantum".into()));
        assert!(matches!(
            global().create_default("quantum", "q"),
            Err(ParameterError::UnknownType(_))
        ));
    }

    #[test]
    fn create_from_constraints() {
        let constraints = json!({"values": ["A", "B", "C"]});
        let param = global()
            .create("categorical", "grade", constraints.as_object().unwrap())
            .unwrap();
        assert_eq!(param.type_tag(), "categorical");
        assert!(param.validate(&ParamValue::from("B")).is_ok());
        assert!(param.validate(&ParamValue::from("D")).is_err());
    }

    #[derive(Debug, Clone)]
    struct Percentage {
        name: String,
    }

    impl Parameter for Percentage {
        fn name(&self) -> &str {
            &self.name
        }
        fn type_tag(&self) -> &'static str {
            "percentage"
        }
        fn display_name(&self) -> &'static str {
            "Percentage"
        }
        fn validate(&self, value: &ParamValue) -> Result<(), crate::ValueIssue> {
            match value.as_f64() {
                Some(v) if (0.0..=100.0).contains(&v) => Ok(()),
                _ => Err(crate::ValueIssue::OutOfRange(format!("{value} is not a percentage"))),
            }
        }
        fn convert(&self, raw: &str) -> Result<ParamValue, crate::ValueIssue> {
            crate::parameter::convert_number(&self.name, raw)
        }
        fn example_value(&self, _rng: &mut dyn rand::RngCore) -> ParamValue {
            ParamValue::Number(50.0)
        }
        fn constraints(&self) -> Constraints {
            Constraints::new()
        }
        fn describe_constraints(&self) -> String {
            "0 to 100".into()
        }
        fn clone_box(&self) -> Box<dyn Parameter> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn custom_constructor() {
        let mut registry = ParameterRegistry::with_defaults();
        registry.register("percentage", |name, _constraints| {
            Ok(Box::new(Percentage {
                name: name.to_string(),
            }) as Box<dyn Parameter>)
        });

        assert!(registry.contains("percentage"));
        assert!(!global().contains("percentage"));

        let param = registry
            .create("percentage", "yield", &Constraints::new())
            .unwrap();
        assert!(param.parse_cell("42").is_ok());
        assert!(param.parse_cell("142").is_err());
        assert_eq!(
            registry.create_default("percentage", "yield").unwrap_err(),
            ParameterError::NoDefaults("percentage".into())
        );
    }

    #[test]
    fn reregistering_replaces() {
        let mut registry = ParameterRegistry::with_defaults();
        registry.register("fixed", |_, _| Err(ParameterError::invalid("x", "disabled")));
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.type_tags()[4], "fixed");
        assert!(registry.create("fixed", "f", &Constraints::new()).is_err());
    }

    #[test]
    fn plain_form_round_trip() {
        let original = global().create_default("discrete_numerical_regular", "temp").unwrap();
        let rebuilt = global().from_plain_form(&original.to_plain_form()).unwrap();
        assert_eq!(rebuilt.to_plain_form(), original.to_plain_form());
        assert_eq!(rebuilt.describe_constraints(), "start: 0, stop: 10, step: 1");
    }
}
