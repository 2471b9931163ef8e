use lazy_static::lazy_static;

use super::{DecoderError, DecoderSpeed};
use crate::flatten::{flatten, Matrix};

lazy_static! {
    static ref MATRIX1: Matrix = flatten(1);
    static ref MATRIX2: Matrix = flatten(2);
    static ref MATRIX4: Matrix = flatten(4);
}

/// Walks the flattened code tree chunk by chunk, emitting a byte for
/// every completed code word. The matrix for each chunk width is built
/// once per process, on first use.
pub(crate) struct DecodeReader {
    matrix: &'static Matrix,
    state: usize,
}

impl DecodeReader {
    pub fn new(speed: DecoderSpeed) -> Self {
        let matrix: &'static Matrix = match speed {
            DecoderSpeed::OneBit => &MATRIX1,
            DecoderSpeed::TwoBits => &MATRIX2,
            DecoderSpeed::FourBits => &MATRIX4,
        };
        Self { matrix, state: 0 }
    }

    /// Consumes one octet of the Huffman sequence, appending any decoded
    /// bytes to `dst`.
    pub fn decode(&mut self, byte: u8, dst: &mut Vec<u8>) -> Result<(), DecoderError> {
        let chunk = self.matrix.chunk;
        let mask = (1usize << chunk) - 1;

        let mut offset = 8;
        while offset > 0 {
            offset -= chunk;
            let cell = &self.matrix.rows[self.state][(byte as usize >> offset) & mask];
            if cell.failed {
                return Err(DecoderError::InvalidInput);
            }
            if let Some(sym) = cell.sym {
                dst.push(sym);
            }
            self.state = cell.next as usize;
        }

        Ok(())
    }

    /// Verifies that the unconsumed tail is valid padding: a strict
    /// prefix of the EOS code word, at most 7 bits of 1s.
    pub fn finalize(&self) -> Result<(), DecoderError> {
        if self.matrix.accepts[self.state] {
            Ok(())
        } else {
            Err(DecoderError::InvalidInput)
        }
    }
}
