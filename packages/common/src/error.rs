use thiserror::Error;

/// Error when parsing a status string that is not one of the enumerated values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status '{invalid}'. Valid values: {}", expected.join(", "))]
pub struct ParseStatusError {
    pub invalid: String,
    pub expected: Vec<&'static str>,
}

impl ParseStatusError {
    pub(crate) fn new(invalid: &str, expected: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            invalid: invalid.to_string(),
            expected: expected.into_iter().collect(),
        }
    }
}

/// A status change that the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot move from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}
