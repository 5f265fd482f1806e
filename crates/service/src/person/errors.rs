use thiserror::Error;

/// Business errors for person workflows. The message is the user-facing text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonError {
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl PersonError {
    pub fn duplicate_email(email: &str) -> Self {
        Self::DuplicateEmail(format!("Person with email {email} already exists."))
    }

    pub fn id_not_found(id: i64) -> Self {
        Self::NotFound(format!("Person with id {id} not found."))
    }

    /// Update target missing; worded differently from a plain lookup miss.
    pub fn id_does_not_exist(id: i64) -> Self {
        Self::NotFound(format!("Person with id {id} does not exist."))
    }

    pub fn name_not_found(first_name: &str, last_name: &str) -> Self {
        Self::NotFound(format!("Person with name {first_name} {last_name} not found."))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PersonError::DuplicateEmail(_) => 2001,
            PersonError::NotFound(_) => 2002,
            PersonError::Repository(_) => 2100,
        }
    }
}
