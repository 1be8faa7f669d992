use crate::model::{Plate, RecordId};
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatebookError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Record already exists: {plate} {phone}")]
    HardDuplicate { plate: Plate, phone: String },

    #[error("Uniqueness constraint violated: {0}")]
    Conflict(String),

    #[error("Plate not found: {0}")]
    NotFound(Plate),

    #[error("Record not found: #{0}")]
    RecordNotFound(RecordId),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl PlatebookError {
    /// True for errors caused by user input rather than the store itself.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PlatebookError::Validation(_)
                | PlatebookError::HardDuplicate { .. }
                | PlatebookError::Conflict(_)
                | PlatebookError::NotFound(_)
                | PlatebookError::RecordNotFound(_)
                | PlatebookError::Api(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PlatebookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    #[test]
    fn input_errors_are_user_errors() {
        assert!(PlatebookError::from(ValidationError::EmptyField(Field::Part1)).is_user_error());
        assert!(PlatebookError::RecordNotFound(7).is_user_error());
        assert!(!PlatebookError::Config("bad".into()).is_user_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!PlatebookError::from(io).is_user_error());
    }
}
