//! Provides an implementation of the [canonical Huffman] decoder.
//!
//! Decoding runs against the translation matrix produced by the
//! `flatten` module rather than against the code tree itself. The
//! decoder reads N bits of the sequence at a time and resolves them
//! with a single row lookup; completed code words fall out of the walk
//! as decoded bytes. N is chosen through [`DecoderSpeed`] and trades
//! matrix size for throughput.
//!
//! A Huffman-encoded string literal carries no explicit terminator. The
//! encoder fills the last octet with the leading bits of the EOS code
//! word, so after the final complete code word the decoder must find
//! nothing but 1-bits, and no more than seven of them. Anything else,
//! including an outright EOS code word, makes the sequence invalid.
//!
//! [canonical Huffman]: https://en.wikipedia.org/wiki/Canonical_Huffman_code

mod error;
mod reader;
mod speed;

pub use error::*;
use reader::*;
pub use speed::*;

/// Decodes the Huffman sequence `src` into `dst`. The `speed` parameter
/// tells the decoder how many bits to read and resolve at a time.
///
/// **Example:**
///
/// ```rust
/// use weft_huffman::{decode, DecoderSpeed};
///
/// let mut dst = Vec::new();
/// decode(&[135], &mut dst, DecoderSpeed::FourBits).unwrap();
/// assert_eq!(dst, b"A");
/// ```
pub fn decode(src: &[u8], dst: &mut Vec<u8>, speed: DecoderSpeed) -> Result<(), DecoderError> {
    let mut reader = DecodeReader::new(speed);

    for byte in src {
        reader.decode(*byte, dst)?;
    }
    reader.finalize()?;

    Ok(())
}
