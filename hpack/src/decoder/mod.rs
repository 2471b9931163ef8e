//! Provides an implementation of the [HPACK] decoder.
//!
//! The decoder is the strict half of the codec. Where the encoder may
//! choose freely among representations, the decoder must accept every
//! conforming choice, reconstruct the exact header list, and mirror the
//! table operations the encoder performed so that both dynamic tables
//! stay identical octet for octet. Any deviation it detects (a
//! truncated primitive, an unknown index, a malformed Huffman sequence,
//! a misplaced size update) is fatal for the whole header block and,
//! per RFC 7540, for the HTTP/2 connection carrying it; recovery is the
//! caller's business, not the codec's.
//!
//! Decoding dispatches on the leading bits of each representation:
//!
//! ```txt
//! 1xxxxxxx  indexed header field               (6.1)
//! 01xxxxxx  literal with incremental indexing  (6.2.1)
//! 001xxxxx  dynamic table size update          (6.3)
//! 0001xxxx  literal never indexed              (6.2.3)
//! 0000xxxx  literal without indexing           (6.2.2)
//! ```
//!
//! The two low literal forms differ only in what they tell
//! intermediaries; this decoder treats them alike, appending the header
//! without touching the table. A literal whose index field is zero
//! spells its name out as a string instead of referencing the table.
//!
//! Size updates may only open a block, at most two of them, covering
//! the lower-then-raise dance an encoder performs when shrinking its
//! table, and must stay within the limit the protocol settings put on
//! the table, when one is known.
//!
//! [HPACK]: https://tools.ietf.org/html/rfc7541

mod error;
pub(crate) mod primitives;

pub use error::*;
use primitives::*;

use crate::table::Table;
use crate::HeaderField;

/// Provides the decoding engine for HTTP/2 headers.
#[derive(Debug)]
pub struct Decoder {
    /// A store for the static and the dynamic headers.
    pub(crate) table: Table,

    /// The size limit advertised through SETTINGS_HEADER_TABLE_SIZE,
    /// when the protocol provides one.
    size_limit: Option<u32>,
}

impl Decoder {
    /// Returns a new decoder instance with the provided maximum allowed
    /// size of the dynamic table.
    pub fn with_dynamic_size(max_dynamic_size: u32) -> Self {
        Self {
            table: Table::with_dynamic_size(max_dynamic_size),
            size_limit: None,
        }
    }

    /// Sets the upper bound that wire-signalled table resizes must
    /// respect. In HTTP/2 this is the last acknowledged value of
    /// `SETTINGS_HEADER_TABLE_SIZE`; `None` removes the bound.
    pub fn set_size_limit(&mut self, limit: Option<u32>) {
        self.size_limit = limit;
    }

    /// Returns the maximum allowed size of the dynamic table.
    pub fn max_dynamic_size(&self) -> u32 {
        self.table.max_dynamic_size()
    }

    /// Returns the current size of the dynamic table.
    pub fn dynamic_size(&self) -> u32 {
        self.table.dynamic_size()
    }

    /// Changes the maximum allowed size of the dynamic table, evicting
    /// entries as needed. Fails when the new size exceeds the settings
    /// limit, if one is set.
    pub fn resize(&mut self, size: u32) -> Result<(), DecoderError> {
        if let Some(limit) = self.size_limit {
            if size > limit {
                return Err(DecoderError::InvalidMaxDynamicSize);
            }
        }
        self.table.update_max_dynamic_size(size);
        Ok(())
    }

    /// Decodes a complete header block fragment, appending the
    /// recovered headers to `dst` in wire order.
    ///
    /// The whole of `src` is consumed; the framing layer above is
    /// responsible for delimiting the block. On an error nothing is
    /// appended to `dst`, but table mutations already performed are
    /// kept: they mirror the encoder's view of the table, which cannot
    /// be rewound.
    ///
    /// **Example:**
    ///
    /// ```rust
    /// use weft_hpack::Decoder;
    ///
    /// let mut decoder = Decoder::default();
    /// let mut dst = Vec::new();
    /// decoder.decode(&[0x82], &mut dst).unwrap();
    /// assert_eq!(dst, vec![(b":method".to_vec(), b"GET".to_vec())]);
    /// ```
    pub fn decode(&mut self, src: &[u8], dst: &mut Vec<HeaderField>) -> Result<(), DecoderError> {
        let mut pos = 0;
        let mut fields: Vec<HeaderField> = Vec::new();
        let mut updates = 0;

        while pos < src.len() {
            let first = src[pos];

            if first & 0x80 == 0x80 {
                // indexed header field (6.1); index 0 is reserved
                let index = decode_integer(src, &mut pos, 7)?;
                let (name, value) = match self.table.get(index) {
                    Some((name, value)) => (name.to_vec(), value.to_vec()),
                    None => return Err(DecoderError::InvalidIndex),
                };
                fields.push((name, value));
            } else if first & 0xc0 == 0x40 {
                // literal with incremental indexing (6.2.1)
                let (name, value) = self.decode_literal(src, &mut pos, 6)?;
                self.table.insert(name.clone(), value.clone());
                fields.push((name, value));
            } else if first & 0xe0 == 0x20 {
                // dynamic table size update (6.3); legal only before the
                // first header field, twice at most
                updates += 1;
                if !fields.is_empty() || updates > 2 {
                    return Err(DecoderError::InvalidTableSizeUpdate);
                }
                let size = decode_integer(src, &mut pos, 5)?;
                self.resize(size)?;
            } else {
                // literal without indexing (6.2.2) or never indexed
                // (6.2.3); neither touches the table on decode
                let (name, value) = self.decode_literal(src, &mut pos, 4)?;
                fields.push((name, value));
            }
        }

        dst.append(&mut fields);
        Ok(())
    }

    fn decode_literal(
        &self,
        src: &[u8],
        pos: &mut usize,
        prefix_size: u8,
    ) -> Result<HeaderField, DecoderError> {
        let index = decode_integer(src, pos, prefix_size)?;
        let name = if index == 0 {
            // a zero index signals the new-name sub-form
            decode_string(src, pos)?
        } else {
            match self.table.get(index) {
                Some((name, _)) => name.to_vec(),
                None => return Err(DecoderError::InvalidIndex),
            }
        };
        let value = decode_string(src, pos)?;
        Ok((name, value))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            table: Table::default(),
            size_limit: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn decode(decoder: &mut Decoder, src: &[u8]) -> Result<Vec<HeaderField>, DecoderError> {
        let mut dst = Vec::new();
        decoder.decode(src, &mut dst)?;
        Ok(dst)
    }

    fn field(name: &[u8], value: &[u8]) -> HeaderField {
        (name.to_vec(), value.to_vec())
    }

    /// Should resolve indexed header fields (6.1) against the static
    /// table without touching the dynamic table.
    #[test]
    fn decodes_indexed() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x82]).unwrap(),
            vec![field(b":method", b"GET")]
        );
        assert_eq!(
            decode(&mut decoder, &[0x86]).unwrap(),
            vec![field(b":scheme", b"http")]
        );
        assert_eq!(decoder.table.dynamic_len(), 0);
    }

    /// Should treat a zero index in the indexed form as an error: that
    /// index is reserved and addresses nothing.
    #[test]
    fn rejects_indexed_zero() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x80]),
            Err(DecoderError::InvalidIndex)
        );
    }

    /// Should reject an index past the end of the address space.
    #[test]
    fn rejects_unknown_index() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0xbe]),
            Err(DecoderError::InvalidIndex)
        );
        assert_eq!(
            decode(&mut decoder, &[0x7e, 0x03, b'a', b'b', b'c']),
            Err(DecoderError::InvalidIndex)
        );
    }

    /// Should decode a literal with incremental indexing and a new name
    /// (6.2.1; the block of RFC 7541, C.2.1) and insert it.
    #[test]
    fn decodes_literal_with_indexing() {
        let mut decoder = Decoder::default();
        let mut src = vec![0x40, 0x0a];
        src.extend_from_slice(b"custom-key");
        src.push(0x0d);
        src.extend_from_slice(b"custom-header");
        assert_eq!(
            decode(&mut decoder, &src).unwrap(),
            vec![field(b"custom-key", b"custom-header")]
        );
        assert_eq!(decoder.table.dynamic_len(), 1);
        assert_eq!(decoder.dynamic_size(), 55);
        assert_eq!(
            decoder.table.get(62),
            Some((&b"custom-key"[..], &b"custom-header"[..]))
        );
    }

    /// Should decode a literal with incremental indexing whose name
    /// references the table, and index the result.
    #[test]
    fn decodes_indexed_name_with_indexing() {
        let mut decoder = Decoder::default();
        let mut src = vec![0x41, 0x0f];
        src.extend_from_slice(b"www.example.com");
        assert_eq!(
            decode(&mut decoder, &src).unwrap(),
            vec![field(b":authority", b"www.example.com")]
        );
        assert_eq!(
            decoder.table.get(62),
            Some((&b":authority"[..], &b"www.example.com"[..]))
        );
    }

    /// Should decode a Huffman-compressed value (the block of RFC 7541,
    /// C.4.1, last field).
    #[test]
    fn decodes_huffman_strings() {
        let mut decoder = Decoder::default();
        let src = [
            0x41, 0x8c, 0xf1, 0xe3, 0xc2, 0xe5, 0xf2, 0x3a, 0x6b, 0xa0, 0xab, 0x90, 0xf4, 0xff,
        ];
        assert_eq!(
            decode(&mut decoder, &src).unwrap(),
            vec![field(b":authority", b"www.example.com")]
        );
    }

    /// Should surface an invalid Huffman sequence as a decode error.
    #[test]
    fn rejects_invalid_huffman() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x10, 0x81, 0xff, 0x00]),
            Err(DecoderError::InvalidHuffman)
        );
    }

    /// Should decode the without-indexing form (6.2.2; the block of
    /// RFC 7541, C.2.2) without touching the table.
    #[test]
    fn decodes_literal_without_indexing() {
        let mut decoder = Decoder::default();
        let mut src = vec![0x04, 0x0c];
        src.extend_from_slice(b"/sample/path");
        assert_eq!(
            decode(&mut decoder, &src).unwrap(),
            vec![field(b":path", b"/sample/path")]
        );
        assert_eq!(decoder.table.dynamic_len(), 0);
    }

    /// Should decode the never-indexed form (6.2.3; the block of
    /// RFC 7541, C.2.3) without touching the table.
    #[test]
    fn decodes_literal_never_indexed() {
        let mut decoder = Decoder::default();
        let mut src = vec![0x10, 0x08];
        src.extend_from_slice(b"password");
        src.push(0x06);
        src.extend_from_slice(b"secret");
        assert_eq!(
            decode(&mut decoder, &src).unwrap(),
            vec![field(b"password", b"secret")]
        );
        assert_eq!(decoder.table.dynamic_len(), 0);
    }

    /// Should apply a leading dynamic table size update, and accept a
    /// second one but no third.
    #[test]
    fn applies_leading_size_updates() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x3f, 0x9a, 0x0a, 0x82]).unwrap(),
            vec![field(b":method", b"GET")]
        );
        assert_eq!(decoder.max_dynamic_size(), 1337);

        let mut decoder = Decoder::default();
        assert!(decode(&mut decoder, &[0x20, 0x3f, 0x9a, 0x0a, 0x82]).is_ok());
        assert_eq!(decoder.max_dynamic_size(), 1337);

        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x20, 0x20, 0x20]),
            Err(DecoderError::InvalidTableSizeUpdate)
        );
    }

    /// Should reject a size update that follows a header field.
    #[test]
    fn rejects_misplaced_size_update() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x82, 0x20]),
            Err(DecoderError::InvalidTableSizeUpdate)
        );
    }

    /// Should enforce the settings limit on wire-signalled resizes and
    /// on the resize operation itself.
    #[test]
    fn enforces_the_size_limit() {
        let mut decoder = Decoder::default();
        decoder.set_size_limit(Some(100));
        assert_eq!(
            decode(&mut decoder, &[0x3f, 0x9a, 0x0a]),
            Err(DecoderError::InvalidMaxDynamicSize)
        );
        assert_eq!(decoder.resize(101), Err(DecoderError::InvalidMaxDynamicSize));
        assert!(decoder.resize(100).is_ok());
        assert_eq!(decoder.max_dynamic_size(), 100);

        decoder.set_size_limit(None);
        assert!(decoder.resize(4096).is_ok());
    }

    /// Should abort on a block that ends mid-representation.
    #[test]
    fn rejects_truncated_blocks() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decode(&mut decoder, &[0x01, 0x02, 0x03]),
            Err(DecoderError::UnexpectedEndOfStream)
        );
        assert_eq!(
            decode(&mut decoder, &[0x40, 0x0a, b'c']),
            Err(DecoderError::UnexpectedEndOfStream)
        );
    }

    /// Should discard the partially decoded header list on an error but
    /// keep the table mutations performed before it: they mirror the
    /// encoder's view.
    #[test]
    fn keeps_table_mutations_on_error() {
        let mut decoder = Decoder::default();
        let mut src = vec![0x40, 0x03];
        src.extend_from_slice(b"foo");
        src.push(0x03);
        src.extend_from_slice(b"bar");
        src.push(0xbf); // indexed 63, not present

        let mut dst = vec![field(b"seen", b"before")];
        assert_eq!(
            decoder.decode(&src, &mut dst),
            Err(DecoderError::InvalidIndex)
        );
        assert_eq!(dst, vec![field(b"seen", b"before")]); // nothing appended
        assert_eq!(decoder.table.get(62), Some((&b"foo"[..], &b"bar"[..])));
    }
}
