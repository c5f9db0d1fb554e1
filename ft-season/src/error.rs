use thiserror::Error;

/// A season label did not have the `YYYY-YYYY` shape with consecutive years.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid season label {label:?}: expected \"YYYY-YYYY\" with consecutive years")]
pub struct SeasonParseError {
    pub label: String,
}

impl SeasonParseError {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}
