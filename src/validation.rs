//! Ordered validation rules for entering the chat view.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::ModelConfig;

/// A form field a rule can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Field {
    #[strum(to_string = "platform")]
    Platform,
    #[strum(to_string = "API key")]
    ApiKey,
    #[strum(to_string = "model")]
    Model,
}

/// One rule: the field it guards, the check, and the message shown when the
/// check fails.
pub struct Rule {
    pub field: Field,
    pub check: fn(&ModelConfig) -> bool,
    pub message: &'static str,
}

/// Rules for the "start" action, evaluated in order.
pub const START_RULES: &[Rule] = &[
    Rule {
        field: Field::Platform,
        check: has_platform,
        message: "Please select a model platform.",
    },
    Rule {
        field: Field::ApiKey,
        check: has_api_key,
        message: "Please enter an API key.",
    },
    Rule {
        field: Field::Model,
        check: has_model,
        message: "Please select a model.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

fn has_platform(config: &ModelConfig) -> bool {
    !config.platform.is_empty()
}

fn has_api_key(config: &ModelConfig) -> bool {
    !config.api_key.is_empty()
}

fn has_model(config: &ModelConfig) -> bool {
    !config.model.is_empty()
}

/// Return the first rule `config` fails, if any.
pub fn validate(config: &ModelConfig, rules: &[Rule]) -> Result<(), ValidationError> {
    match rules.iter().find(|rule| !(rule.check)(config)) {
        Some(rule) => Err(ValidationError {
            field: rule.field,
            message: rule.message,
        }),
        None => Ok(()),
    }
}
