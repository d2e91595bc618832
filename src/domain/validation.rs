use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidBaseUrl { input: String },
    UnsupportedScheme { scheme: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidBaseUrl { input } => write!(f, "invalid router base URL: {input}"),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "unsupported router URL scheme: {scheme}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
