use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarkupError>;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
