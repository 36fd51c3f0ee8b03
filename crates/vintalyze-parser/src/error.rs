use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A field without which the record is meaningless could not be located.
    #[error(
        "could not find the {field} in the pasted text; copy the entire profile page \
         (select all, then copy) and paste it again"
    )]
    MissingRequiredField { field: &'static str },

    #[error("pasted text is {size} bytes, above the {limit}-byte limit")]
    InputTooLarge { size: usize, limit: usize },
}

impl ParseError {
    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::MissingRequiredField { .. } => "missing-required-field",
            ParseError::InputTooLarge { .. } => "input-too-large",
        }
    }
}
