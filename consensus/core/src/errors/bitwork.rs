use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitworkError {
    #[error("bitwork string is empty")]
    Empty,

    #[error("bitwork string '{0}' contains more than one '.'")]
    TooManySeparators(String),

    #[error("bitwork prefix '{0}' must match [a-z0-9]{{1,64}}")]
    InvalidPrefix(String),

    #[error("bitwork extension '{0}' must be a decimal integer in [0, 15]")]
    InvalidExtension(String),
}

pub type BitworkResult<T> = std::result::Result<T, BitworkError>;
