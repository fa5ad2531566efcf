use thiserror::Error;

/// Umbrella error for embedders that do not care which collaborator
/// failed.  The action API itself returns the specific sub-error.
#[derive(Error, Debug)]
pub enum RiposteError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Text extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Reply generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),
}

/// Login failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Signup failures.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Email address is already registered")]
    EmailTaken,

    #[error("Registration service unavailable: {0}")]
    Unavailable(String),
}

/// OCR failures.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Image could not be processed: {0}")]
    Unreadable(String),

    #[error("Extraction service unavailable: {0}")]
    Unavailable(String),
}

/// Reply-generation failures.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation service unavailable: {0}")]
    Unavailable(String),
}

/// Premium purchase failures.
#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Purchase was cancelled")]
    Cancelled,

    #[error("Payment declined: {0}")]
    Declined(String),
}
