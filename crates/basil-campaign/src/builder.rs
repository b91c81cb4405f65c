//! Fluent construction of a [`CampaignDraft`]

use crate::draft::CampaignDraft;
use crate::error::DraftError;
use crate::target::Target;
use basil_params::Parameter;

/// Builder collecting draft fields before validation of the column namespace
#[derive(Debug, Clone, Default)]
pub struct DraftBuilder {
    name: String,
    description: String,
    targets: Vec<Target>,
    parameters: Vec<Box<dyn Parameter>>,
    acquisition_function: Option<String>,
    surrogate_model: Option<String>,
}

impl DraftBuilder {
    /// Create builder for a named draft
    #[inline]
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Set the campaign name
    #[inline]
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the description
    #[inline]
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Append a target
    #[inline]
    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Append a parameter
    #[inline]
    #[must_use]
    pub fn parameter(mut self, parameter: impl Parameter + 'static) -> Self {
        self.parameters.push(Box::new(parameter));
        self
    }

    /// Append an already boxed parameter
    #[inline]
    #[must_use]
    pub fn boxed_parameter(mut self, parameter: Box<dyn Parameter>) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Override the acquisition function
    #[inline]
    #[must_use]
    pub fn acquisition_function(mut self, acquisition_function: &str) -> Self {
        self.acquisition_function = Some(acquisition_function.to_string());
        self
    }

    /// Override the surrogate model
    #[inline]
    #[must_use]
    pub fn surrogate_model(mut self, surrogate_model: &str) -> Self {
        self.surrogate_model = Some(surrogate_model.to_string());
        self
    }

    /// Assemble the draft
    ///
    /// Parameters are added before targets, so a target named after a
    /// parameter is reported as a collision.
    ///
    /// # Errors
    /// Returns the first invariant violation
    pub fn build(self) -> Result<CampaignDraft, DraftError> {
        let mut draft = CampaignDraft::new(&self.name);
        draft.set_description(&self.description);
        if let Some(acquisition_function) = &self.acquisition_function {
            draft.set_acquisition_function(acquisition_function);
        }
        if let Some(surrogate_model) = &self.surrogate_model {
            draft.set_surrogate_model(surrogate_model);
        }
        for parameter in self.parameters {
            draft.add_parameter(parameter)?;
        }
        for target in self.targets {
            draft.add_target(target)?;
        }
        tracing::debug!(
            draft = draft.name(),
            parameters = draft.parameters().len(),
            targets = draft.targets().len(),
            "Draft built"
        );
        Ok(draft)
    }
}
