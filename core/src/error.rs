use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("no valid bump found for program derived address")]
    DerivationExhausted,

    #[error("buffer truncated: need {needed} bytes, {remaining} remaining")]
    TruncatedBuffer { needed: usize, remaining: usize },

    #[error("name field is not valid utf-8")]
    InvalidUtf8,

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("payload field too large: {0} bytes")]
    PayloadOverflow(usize),

    #[error("failed to serialize instruction: {0}")]
    InstructionEncodeFailed(String),

    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("signing declined: {0}")]
    SigningDeclined(String),

    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    #[error("transport error: {0}")]
    TransportError(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::InvalidUtf8
    }
}

pub type Result<T> = std::result::Result<T, Error>;
