use thiserror::Error;

/// Errors surfaced by the dashboard facade.
///
/// Both variants carry only a fixed, operation-specific message. The
/// underlying cause is logged where it happens and never carried outward.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FacadeError {
    #[error("{0}")]
    Store(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
}

impl FacadeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FacadeError::NotFound(_))
    }
}

pub type FacadeResult<T> = std::result::Result<T, FacadeError>;
