use std::{error, fmt};

/// Contains error options that can be encountered while performing the
/// decoding operations. Every variant is terminal for the current
/// header block; in HTTP/2 it maps to a COMPRESSION_ERROR on the
/// connection.
#[derive(Debug, PartialEq)]
pub enum DecoderError {
    /// The block ends in the middle of a representation: a truncated
    /// integer, or a string shorter than its declared length.
    UnexpectedEndOfStream,

    /// An integer does not fit the supported range.
    IntegerOverflow,

    /// An index addresses no entry of the indexing table.
    InvalidIndex,

    /// A string literal carries an invalid Huffman sequence.
    InvalidHuffman,

    /// A dynamic table size update appears after the first header
    /// field of the block, or more than twice at its start.
    InvalidTableSizeUpdate,

    /// A dynamic table size update exceeds the size limit advertised
    /// through the protocol settings.
    InvalidMaxDynamicSize,
}

impl fmt::Display for DecoderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfStream => write!(fmt, "Unexpected end of the header block."),
            Self::IntegerOverflow => write!(fmt, "Integer exceeds the supported range."),
            Self::InvalidIndex => write!(fmt, "Invalid indexing table index."),
            Self::InvalidHuffman => write!(fmt, "Invalid Huffman sequence."),
            Self::InvalidTableSizeUpdate => write!(fmt, "Misplaced dynamic table size update."),
            Self::InvalidMaxDynamicSize => {
                write!(fmt, "Dynamic table size update exceeds the settings limit.")
            }
        }
    }
}

impl error::Error for DecoderError {}

impl From<weft_huffman::DecoderError> for DecoderError {
    fn from(_: weft_huffman::DecoderError) -> Self {
        Self::InvalidHuffman
    }
}
