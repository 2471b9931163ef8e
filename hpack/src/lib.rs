//! This crate implements [HPACK], the header compression format of
//! HTTP/2.
//!
//! HTTP headers repeat themselves relentlessly: across requests, and
//! between requests and responses on the same connection. HPACK turns
//! that redundancy into savings with three cooperating mechanisms:
//!
//! * An **indexing table**: a fixed [static table] of the 61 most
//!   common header fields, extended per connection by a [dynamic table]
//!   that both peers maintain in lockstep. A header that is present in
//!   the table travels as a single small integer.
//!
//! * A **[Huffman code]** for string literals, provided by the
//!   `weft-huffman` crate, which shortens typical header text to
//!   roughly two thirds of its size.
//!
//! * **Binary representations** tying the two together: indexed
//!   fields, three flavours of literal fields that do or do not feed
//!   the dynamic table, and a table-resize signal.
//!
//! The [`Encoder`] and the [`Decoder`] each own their side's indexing
//! table. Every header block the encoder emits mutates its table, and
//! decoding that block performs the identical mutations on the other
//! side; the two tables never drift apart. The codec itself is pure
//! bytes-in, bytes-out: framing, ordering across streams and the
//! semantics of the headers themselves belong to the HTTP/2 layer
//! above.
//!
//! ```rust
//! use weft_hpack::{Decoder, Encoder};
//!
//! let mut encoder = Encoder::default();
//! let mut wire = Vec::new();
//! let headers = vec![(b":method".to_vec(), b"GET".to_vec())];
//! encoder.encode_block(&headers, &mut wire).unwrap();
//!
//! let mut decoder = Decoder::default();
//! let mut decoded = Vec::new();
//! decoder.decode(&wire, &mut decoded).unwrap();
//! assert_eq!(decoded, headers);
//! ```
//!
//! [HPACK]: https://tools.ietf.org/html/rfc7541
//! [static table]: https://tools.ietf.org/html/rfc7541#section-2.3.1
//! [dynamic table]: https://tools.ietf.org/html/rfc7541#section-2.3.2
//! [Huffman code]: https://tools.ietf.org/html/rfc7541#appendix-B

mod decoder;
mod encoder;
mod table;

pub use decoder::*;
pub use encoder::*;
pub use table::*;

/// A decoded header: a name and a value, both octet strings. The codec
/// carries bytes verbatim and never normalises case or checks header
/// semantics.
pub type HeaderField = (Vec<u8>, Vec<u8>);

#[cfg(test)]
mod test {
    use super::*;

    fn fields(pairs: &[(&[u8], &[u8])]) -> Vec<HeaderField> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_vec(), value.to_vec()))
            .collect()
    }

    fn assert_converged(encoder: &Encoder, decoder: &Decoder) {
        assert_eq!(encoder.table.dynamic_len(), decoder.table.dynamic_len());
        assert_eq!(encoder.table.dynamic_size(), decoder.table.dynamic_size());
        for i in 0..encoder.table.dynamic_len() as u32 {
            assert_eq!(encoder.table.get(62 + i), decoder.table.get(62 + i));
        }
    }

    /// Should recover the exact header list from the encoder's output
    /// for a range of table sizes, leaving both dynamic tables equal
    /// entry for entry.
    #[test]
    fn round_trips_header_lists() {
        let request = fields(&[
            (b":method", b"GET"),
            (b":scheme", b"https"),
            (b":path", b"/search?q=hpack"),
            (b":authority", b"example.org"),
            (b"accept-encoding", b"gzip, deflate"),
            (b"x-request-id", b"d1b2c3"),
        ]);
        let response = fields(&[
            (b":status", b"200"),
            (b"content-type", b"text/html; charset=utf-8"),
            (b"set-cookie", b"session=31d4d96e407aad42; Secure"),
            (b"x-request-id", b"d1b2c3"),
        ]);
        let odd = fields(&[
            (b"empty-value", b""),
            (b"binary", &[0u8, 1, 2, 254, 255]),
            (b"x-request-id", b"d1b2c3"),
        ]);

        for max_size in [64, 1000, 4096] {
            let mut encoder = Encoder::with_dynamic_size(max_size);
            let mut decoder = Decoder::with_dynamic_size(max_size);

            // several blocks through the same contexts
            for block in [&request, &response, &odd, &request] {
                let mut wire = Vec::new();
                encoder.encode_block(block, &mut wire).unwrap();

                let mut decoded = Vec::new();
                decoder.decode(&wire, &mut decoded).unwrap();

                assert_eq!(&decoded, block, "max_size {}", max_size);
                assert_converged(&encoder, &decoder);
                assert!(encoder.dynamic_size() <= max_size);
            }
        }
    }

    /// Should decode the two smallest possible blocks against a fresh
    /// context: a single static index each, no table growth.
    #[test]
    fn decodes_single_indexed_fields() {
        let mut decoder = Decoder::with_dynamic_size(1000);
        let mut dst = Vec::new();
        decoder.decode(&[0x82], &mut dst).unwrap();
        assert_eq!(dst, fields(&[(b":method", b"GET")]));
        assert_eq!(decoder.dynamic_size(), 0);

        let mut dst = Vec::new();
        decoder.decode(&[0x86], &mut dst).unwrap();
        assert_eq!(dst, fields(&[(b":scheme", b"http")]));
        assert_eq!(decoder.dynamic_size(), 0);
    }

    /// Should collapse a fully static header to its one-octet index.
    #[test]
    fn encodes_single_indexed_field() {
        let mut encoder = Encoder::with_dynamic_size(1000);
        let mut wire = Vec::new();
        encoder
            .encode_block(&fields(&[(b":method", b"GET")]), &mut wire)
            .unwrap();
        assert_eq!(wire, vec![0x82]);
    }

    /// Should apply a leading size update and keep the table within the
    /// signalled bound afterwards.
    #[test]
    fn applies_size_update_before_fields() {
        let mut decoder = Decoder::with_dynamic_size(1000);

        // populate the dynamic table first
        let mut dst = Vec::new();
        let mut src = vec![0x40, 0x07];
        src.extend_from_slice(b"x-token");
        src.push(0x05);
        src.extend_from_slice(b"abcde");
        decoder.decode(&src, &mut dst).unwrap();

        // resize to 1337, then reference the surviving entry
        let mut dst = Vec::new();
        decoder.decode(&[0x3f, 0x9a, 0x0a, 0xbe], &mut dst).unwrap();
        assert_eq!(dst, fields(&[(b"x-token", b"abcde")]));
        assert_eq!(decoder.max_dynamic_size(), 1337);
        assert!(decoder.dynamic_size() <= 1337);
    }

    /// Should push a large literal value through the new-name
    /// incremental form, Huffman-compressed, and recover it exactly.
    #[test]
    fn round_trips_long_values() {
        let value: Vec<u8> = (0..1500).map(|i| b'a' + (i % 26) as u8).collect();
        let headers = vec![(b"short-key".to_vec(), value)];

        let mut encoder = Encoder::with_dynamic_size(1000);
        let mut wire = Vec::new();
        encoder.encode_block(&headers, &mut wire).unwrap();

        assert_eq!(wire[0], 0x40); // incremental indexing, new name
        assert_eq!(wire[1] & 0x80, 0x80); // Huffman-compressed name

        let mut decoder = Decoder::with_dynamic_size(1000);
        let mut decoded = Vec::new();
        decoder.decode(&wire, &mut decoded).unwrap();
        assert_eq!(decoded, headers);

        // the entry outgrew the table on both sides
        assert_eq!(encoder.dynamic_size(), 0);
        assert_converged(&encoder, &decoder);
    }

    /// Should reject a block whose value string runs past the end of
    /// the input.
    #[test]
    fn rejects_truncated_block() {
        let mut decoder = Decoder::with_dynamic_size(1000);
        let mut dst = Vec::new();
        assert_eq!(
            decoder.decode(&[0x01, 0x02, 0x03], &mut dst),
            Err(DecoderError::UnexpectedEndOfStream)
        );
        assert!(dst.is_empty());
    }
}
