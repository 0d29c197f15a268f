//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = MltError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum MltError {
    InvalidModel(InvalidModelError),
    MalformedToken(MalformedTokenError),
    DecodeError(bincode::error::DecodeError),
    EncodeError(bincode::error::EncodeError),
    IOError(std::io::Error),
}

impl MltError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn malformed_token<S>(position: usize, token: S) -> Self
    where
        S: Into<String>,
    {
        Self::MalformedToken(MalformedTokenError {
            position,
            token: token.into(),
        })
    }
}

impl fmt::Display for MltError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidModel(e) => e.fmt(f),
            Self::MalformedToken(e) => e.fmt(f),
            Self::DecodeError(e) => e.fmt(f),
            Self::EncodeError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for MltError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when a corpus token lacks the `/` separator between word and tag.
#[derive(Debug)]
pub struct MalformedTokenError {
    /// Zero-based position of the token in the corpus.
    pub(crate) position: usize,

    /// The offending token.
    pub(crate) token: String,
}

impl MalformedTokenError {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for MalformedTokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MalformedTokenError: token {} ({:?}) has no '/' separator",
            self.position, self.token
        )
    }
}

impl Error for MalformedTokenError {}

impl From<bincode::error::DecodeError> for MltError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for MltError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for MltError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
