use super::guard::OperationKind;
use crate::models::MIN_PASSWORD_LEN;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Mismatch,
    TooShort,
    MissingFile,
    MissingCredentials,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    WrongCurrentPassword,
    InvalidCredentials,
    Inactive,
}

/// Everything a profile operation can fail with. Collaborator failures are
/// folded into one of these at the service boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    Validation(ValidationError),
    Auth(AuthError),
    Upload(String),
    Persistence(String),
    Cache(String),
    InProgress(OperationKind),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Mismatch => write!(f, "Passwords do not match"),
            ValidationError::TooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ),
            ValidationError::MissingFile => write!(f, "No photo was selected"),
            ValidationError::MissingCredentials => write!(f, "Email and password are required"),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::WrongCurrentPassword => write!(f, "Current password is incorrect"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Inactive => write!(f, "Staff account is inactive"),
        }
    }
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Validation(e) => write!(f, "{e}"),
            ProfileError::Auth(e) => write!(f, "{e}"),
            ProfileError::Upload(msg) => write!(f, "Photo upload failed: {msg}"),
            ProfileError::Persistence(msg) => write!(f, "Saving failed: {msg}"),
            ProfileError::Cache(msg) => write!(f, "Session cache error: {msg}"),
            ProfileError::InProgress(kind) => write!(f, "A {kind} is already in progress"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<ValidationError> for ProfileError {
    fn from(err: ValidationError) -> Self {
        ProfileError::Validation(err)
    }
}

impl From<AuthError> for ProfileError {
    fn from(err: AuthError) -> Self {
        ProfileError::Auth(err)
    }
}
