use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Invalid key bytes")]
    InvalidKeyBytes,

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}
