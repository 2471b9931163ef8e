use std::{error, fmt};

/// Contains error options that can be encountered while decoding a
/// Huffman sequence.
#[derive(Debug, PartialEq)]
pub enum DecoderError {
    /// The sequence is not a product of the HPACK Huffman code: a code
    /// word runs past the end of the input, the EOS symbol appears, or
    /// the trailing padding is not a strict prefix of EOS.
    InvalidInput,
}

impl fmt::Display for DecoderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(fmt, "Invalid Huffman sequence."),
        }
    }
}

impl error::Error for DecoderError {}
