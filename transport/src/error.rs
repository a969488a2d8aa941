use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Unspecified rpc")]
    UnspecifiedRpc,

    #[error("Unspecified program id")]
    UnspecifiedProgramId,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid keyfile: {0}")]
    InvalidKeyfile(String),

    #[error("Failed to parse address: {0}")]
    ParseAddressError(String),
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

impl From<TransportError> for arcade_core::error::Error {
    fn from(value: TransportError) -> Self {
        Self::TransportError(value.to_string())
    }
}
