//! Provides an implementation of the [HPACK] encoder.
//!
//! The encoder turns a list of headers into the compact binary
//! representations defined by the [HPACK] specification. Two primitive
//! encodings carry everything: [integers] with an N-bit prefix, used
//! for indexes, sizes and lengths, and [string literals], optionally
//! compressed with the static Huffman code.
//!
//! On top of the primitives sit the header field representations. A
//! header that is present in the indexing table, name and value both,
//! shrinks to its [index] alone. A header whose name is known can
//! reference the name by index and spell out only the value; a header
//! that is entirely new spells out both strings. Each literal form
//! exists in three indexing flavours: [with incremental indexing],
//! which inserts the header into the dynamic table as a side effect,
//! [without indexing], and [never indexed] for values that must not be
//! re-encoded by intermediaries. Separate from the header forms, the
//! encoder can signal a [dynamic table size update] to its peer.
//!
//! Which representation to use for a given header is a matter of
//! policy, not conformance. The per-field [`Encoder::encode`] leaves
//! the choice to the caller through configuration flags, while
//! [`Encoder::encode_block`] applies the default policy (search the
//! table, index whenever possible, insert what was missing, compress
//! every literal) to a whole header list at once.
//!
//! [HPACK]: https://tools.ietf.org/html/rfc7541
//! [integers]: https://tools.ietf.org/html/rfc7541#section-5.1
//! [string literals]: https://tools.ietf.org/html/rfc7541#section-5.2
//! [index]: https://tools.ietf.org/html/rfc7541#section-6.1
//! [with incremental indexing]: https://tools.ietf.org/html/rfc7541#section-6.2.1
//! [without indexing]: https://tools.ietf.org/html/rfc7541#section-6.2.2
//! [never indexed]: https://tools.ietf.org/html/rfc7541#section-6.2.3
//! [dynamic table size update]: https://tools.ietf.org/html/rfc7541#section-6.3

mod error;
mod input;
mod primitives;

use std::io::Write;

pub use error::*;
pub use input::*;
use primitives::*;

use crate::table::Table;
use crate::HeaderField;

/// Provides the encoding engine for HTTP/2 headers.
#[derive(Debug)]
pub struct Encoder {
    /// A store for the static and the dynamic headers.
    pub(crate) table: Table,
}

impl Encoder {
    /// A flag indicating to encode the header name with the Huffman
    /// algorithm (`0x1`).
    pub const HUFFMAN_NAME: u8 = 0x1;

    /// A flag indicating to encode the header value with the Huffman
    /// algorithm (`0x2`).
    pub const HUFFMAN_VALUE: u8 = 0x2;

    /// A flag indicating to index the literal header field (`0x4`).
    pub const WITH_INDEXING: u8 = 0x4;

    /// A flag indicating to never index the literal header field
    /// (`0x8`).
    pub const NEVER_INDEXED: u8 = 0x8;

    /// A flag indicating to search the indexing table and choose the
    /// smallest representation available (`0x10`).
    pub const BEST_FORMAT: u8 = 0x10;

    /// Returns a new encoder instance with the provided maximum allowed
    /// size of the dynamic table.
    pub fn with_dynamic_size(max_dynamic_size: u32) -> Self {
        Self {
            table: Table::with_dynamic_size(max_dynamic_size),
        }
    }

    /// Returns the maximum allowed size of the dynamic table.
    pub fn max_dynamic_size(&self) -> u32 {
        self.table.max_dynamic_size()
    }

    /// Returns the current size of the dynamic table.
    pub fn dynamic_size(&self) -> u32 {
        self.table.dynamic_size()
    }

    /// Encodes one header field into its HPACK representation.
    ///
    /// The input names the header by index, by indexed name plus a
    /// literal value, or as two literals (see [`EncoderField`]).
    /// Literal inputs default to the without-indexing form with plain
    /// string literals; the byte `flags` steer the choice:
    ///
    /// * `0x1`: Huffman-encode the header name.
    /// * `0x2`: Huffman-encode the header value.
    /// * `0x4`: literal with incremental indexing ([6.2.1.]).
    /// * `0x8`: literal never indexed ([6.2.3.]).
    /// * `0x10`: search the table and pick the smallest representation.
    ///
    /// **Example:**
    ///
    /// ```rust
    /// use weft_hpack::Encoder;
    ///
    /// let mut encoder = Encoder::default();
    /// let mut dst = Vec::new();
    /// let name = b":method".to_vec();
    /// let value = b"PATCH".to_vec();
    /// let flags = 0x2 | 0x4 | 0x10;
    /// encoder.encode((name, value, flags), &mut dst).unwrap();
    /// ```
    ///
    /// [6.2.1.]: https://tools.ietf.org/html/rfc7541#section-6.2.1
    /// [6.2.3.]: https://tools.ietf.org/html/rfc7541#section-6.2.3
    pub fn encode<'a, F, W>(&mut self, field: F, dst: W) -> Result<(), EncoderError>
    where
        F: Into<EncoderField<'a>>,
        W: Write,
    {
        match field.into() {
            EncoderField::Indexed(index) => self.encode_indexed(index, dst),
            EncoderField::IndexedName(index, value, flags) => {
                self.encode_indexed_name(index, &value, flags, dst)
            }
            EncoderField::Literal(name, value, flags) => {
                self.encode_searched(&name, &value, flags, dst)
            }
        }
    }

    /// Encodes a whole header list in input order, applying the default
    /// policy to every field: search the indexing table, emit the
    /// indexed form on a full match and an indexed-name literal on a
    /// name match, insert whatever was not fully indexed, and compress
    /// all literals with Huffman.
    pub fn encode_block<W: Write>(
        &mut self,
        fields: &[HeaderField],
        mut dst: W,
    ) -> Result<(), EncoderError> {
        let flags =
            Self::BEST_FORMAT | Self::WITH_INDEXING | Self::HUFFMAN_NAME | Self::HUFFMAN_VALUE;
        for (name, value) in fields {
            self.encode((name.as_slice(), value.as_slice(), flags), &mut dst)?;
        }
        Ok(())
    }

    fn encode_searched<W: Write>(
        &mut self,
        name: &[u8],
        value: &[u8],
        flags: u8,
        dst: W,
    ) -> Result<(), EncoderError> {
        if flags & Self::BEST_FORMAT == Self::BEST_FORMAT {
            match self.table.find(name, value) {
                Some((index, true)) => self.encode_indexed(index, dst),
                Some((index, false)) => self.encode_indexed_name(index, value, flags, dst),
                None => self.encode_literal(name, value, flags, dst),
            }
        } else {
            self.encode_literal(name, value, flags, dst)
        }
    }

    /// Encodes a header that exists at `index` in the indexing table
    /// into the indexed header field representation ([6.1.], figure 5).
    ///
    /// ```txt
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 1 |        Index (7+)         |
    /// +---+---------------------------+
    /// ```
    ///
    /// [6.1.]: https://tools.ietf.org/html/rfc7541#section-6.1
    pub fn encode_indexed<W: Write>(&self, index: u32, dst: W) -> Result<(), EncoderError> {
        if self.table.get(index).is_none() {
            return Err(EncoderError::InvalidIndex);
        }

        encode_integer(index, 0x80, 7, dst)
    }

    /// Encodes a header whose name is represented with an `index` from
    /// the indexing table while the `value` is provided in bytes.
    ///
    /// The representation pattern depends on `flags`: incremental
    /// indexing ([6.2.1.], figure 6) under `0x4`, which also inserts
    /// the header into the dynamic table, never indexed ([6.2.3.],
    /// figure 10) under `0x8`, and without indexing ([6.2.2.],
    /// figure 8) otherwise. `0x2` Huffman-encodes the value.
    ///
    /// ```txt
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 0 | 1 |      Index (6+)       |   with incremental indexing
    /// +---+---+-----------------------+
    /// | 0 | 0 | 0 | 0 |  Index (4+)   |   without indexing
    /// +---+---+-----------------------+
    /// | 0 | 0 | 0 | 1 |  Index (4+)   |   never indexed
    /// +---+---+-----------------------+
    /// | H |     Value Length (7+)     |
    /// +---+---------------------------+
    /// | Value String (Length octets)  |
    /// +-------------------------------+
    /// ```
    ///
    /// [6.2.1.]: https://tools.ietf.org/html/rfc7541#section-6.2.1
    /// [6.2.2.]: https://tools.ietf.org/html/rfc7541#section-6.2.2
    /// [6.2.3.]: https://tools.ietf.org/html/rfc7541#section-6.2.3
    pub fn encode_indexed_name<W: Write>(
        &mut self,
        index: u32,
        value: &[u8],
        flags: u8,
        mut dst: W,
    ) -> Result<(), EncoderError> {
        let name = match self.table.get(index) {
            Some((name, _)) => name.to_vec(),
            None => return Err(EncoderError::InvalidIndex),
        };

        if flags & Self::WITH_INDEXING == Self::WITH_INDEXING {
            encode_integer(index, 0x40, 6, &mut dst)?;
            self.table.insert(name, value.to_vec());
        } else if flags & Self::NEVER_INDEXED == Self::NEVER_INDEXED {
            encode_integer(index, 0b0001_0000, 4, &mut dst)?;
        } else {
            encode_integer(index, 0x0, 4, &mut dst)?;
        }

        encode_string(value, flags & Self::HUFFMAN_VALUE == Self::HUFFMAN_VALUE, dst)
    }

    /// Encodes a header whose name and value are both provided in
    /// bytes.
    ///
    /// The representation pattern depends on `flags` exactly as in
    /// [`Self::encode_indexed_name`], with a zero in place of the index
    /// and the name spelled out as a string literal first ([6.2.1.]
    /// figure 7, [6.2.2.] figure 9, [6.2.3.] figure 11). `0x1` and
    /// `0x2` Huffman-encode the name and the value.
    ///
    /// ```txt
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 0 | 1 |           0           |
    /// +---+---+-----------------------+
    /// | H |     Name Length (7+)      |
    /// +---+---------------------------+
    /// |  Name String (Length octets)  |
    /// +---+---------------------------+
    /// | H |     Value Length (7+)     |
    /// +---+---------------------------+
    /// | Value String (Length octets)  |
    /// +-------------------------------+
    /// ```
    ///
    /// [6.2.1.]: https://tools.ietf.org/html/rfc7541#section-6.2.1
    /// [6.2.2.]: https://tools.ietf.org/html/rfc7541#section-6.2.2
    /// [6.2.3.]: https://tools.ietf.org/html/rfc7541#section-6.2.3
    pub fn encode_literal<W: Write>(
        &mut self,
        name: &[u8],
        value: &[u8],
        flags: u8,
        mut dst: W,
    ) -> Result<(), EncoderError> {
        if flags & Self::WITH_INDEXING == Self::WITH_INDEXING {
            dst.write_all(&[0x40])?;
            self.table.insert(name.to_vec(), value.to_vec());
        } else if flags & Self::NEVER_INDEXED == Self::NEVER_INDEXED {
            dst.write_all(&[0b0001_0000])?;
        } else {
            dst.write_all(&[0x0])?;
        }

        encode_string(name, flags & Self::HUFFMAN_NAME == Self::HUFFMAN_NAME, &mut dst)?;
        encode_string(value, flags & Self::HUFFMAN_VALUE == Self::HUFFMAN_VALUE, dst)
    }

    /// Lowers or raises the maximum size of the dynamic table and
    /// encodes the change into a dynamic table size update signal
    /// ([6.3.], figure 12). In HTTP/2 the new size must stay within the
    /// last `SETTINGS_HEADER_TABLE_SIZE` the decoder advertised;
    /// honouring that bound is the caller's contract with its peer.
    ///
    /// ```txt
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 0 | 0 | 1 |   Max size (5+)   |
    /// +---+---------------------------+
    /// ```
    ///
    /// [6.3.]: https://tools.ietf.org/html/rfc7541#section-6.3
    pub fn update_max_dynamic_size<W: Write>(
        &mut self,
        size: u32,
        dst: W,
    ) -> Result<(), EncoderError> {
        self.table.update_max_dynamic_size(size);
        encode_integer(size, 0b0010_0000, 5, dst)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            table: Table::default(),
        }
    }
}
