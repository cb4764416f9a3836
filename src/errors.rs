/// The [`sha3_hmac`](crate) package has a single error type, [`Sha3Error`],
/// shared by the sponge engine, the HMAC engine and the one-shot wrappers.
///
/// Errors are reported to the immediate caller and never retried:
/// all operations are deterministic, so a retry cannot succeed where the first call failed.
/// When an operation fails, no output bytes have been written.
///
/// A [`core::result::Result`] wrapper called [`Sha3Result`] (having error fixed to [`Sha3Error`]) is also provided.
use std::{error::Error, fmt::Display};

/// An error happened while hashing or authenticating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sha3Error {
    /// The requested mode is not one of SHA3-224, SHA3-256, SHA3-384, SHA3-512.
    /// Carries the rejected value.
    InvalidMode(String),
    /// A one-shot wrapper was handed an output buffer that cannot hold the result.
    InvalidArgument,
    /// `finalize` was handed an output buffer that cannot hold the digest.
    NullOutput,
    /// The instance has already been finalized.
    InvalidState,
}

/// The result type of every fallible operation in this crate.
pub type Sha3Result<T> = Result<T, Sha3Error>;

impl Display for Sha3Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMode(mode) => write!(f, "Invalid mode {:?}", mode),
            Self::InvalidArgument => write!(f, "Invalid argument: output buffer too short"),
            Self::NullOutput => write!(f, "Output buffer too short for the digest"),
            Self::InvalidState => write!(f, "Invalid state: instance already finalized"),
        }
    }
}

impl Error for Sha3Error {}

impl From<Sha3Error> for std::io::Error {
    fn from(value: Sha3Error) -> Self {
        std::io::Error::other(value)
    }
}
