use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TransportResult<T> = std::result::Result<T, TransportError>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

/// Any failure raised while driving a token exchange.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport failed : {0}")]
    Transport(#[from] TransportError),
    #[error("provider rejected the exchange : {0}")]
    Rejection(#[from] RejectionError),
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
}

/// Failure raised by a transport implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be prepared, e.g. the endpoint URL is malformed
    /// or the underlying client could not be constructed.
    #[error("could not prepare request : {0}")]
    Construction(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The network exchange itself failed (timeout, reset, DNS).
    #[error("network exchange failed : {0}")]
    Io(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Non-success status answered by the provider.
///
/// Carries the exact status code and the raw body so callers can decide
/// whether to retry, re-authorize or abort.
#[derive(Error, Debug, Clone)]
#[error("provider returned {status} : {body}")]
pub struct RejectionError {
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug, Clone)]
pub enum TokenReaderError {
    #[error("response has malformed format: not found {0} in {1}")]
    KeyNotFound(&'static str, String),
}

#[derive(Error, Debug, Clone)]
pub enum SignError {
    #[error("signature computation failed : {0}")]
    Computation(String),
    #[error("signed value is not a valid authorization header : {0}")]
    InvalidHeader(String),
}
