use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The input is not valid data for this filter.
    CorruptStream { filter: String, msg: String },
    /// The filter failed to produce output.
    EncodeFailed { filter: String, msg: String },
    /// No filter with that name is registered.
    UnknownFilter(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::CorruptStream { filter, msg } => {
                write!(f, "corrupt {} stream: {}", filter, msg)
            }
            FilterError::EncodeFailed { filter, msg } => {
                write!(f, "{} encoding failed: {}", filter, msg)
            }
            FilterError::UnknownFilter(name) => write!(f, "unknown filter `{}`", name),
        }
    }
}

impl std::error::Error for FilterError {}
