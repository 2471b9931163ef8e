use std::{error, fmt, io};

/// Contains error options that can be encountered while performing the
/// encoding operations.
#[derive(Debug)]
pub enum EncoderError {
    /// The provided index is not present in the indexing table.
    InvalidIndex,

    /// The destination buffer rejected a write.
    Io(io::Error),
}

impl fmt::Display for EncoderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidIndex => write!(fmt, "Invalid indexing table index."),
            Self::Io(err) => write!(fmt, "{}", err),
        }
    }
}

impl error::Error for EncoderError {}

impl From<io::Error> for EncoderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
