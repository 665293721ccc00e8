use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreditError {
    #[error("Issuer not found: {0}")]
    NotFound(String),

    #[error("Attribution error: {0}")]
    Attribution(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),
}
