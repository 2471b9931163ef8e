use std::io::Write;

use super::EncoderError;

/// Encodes `value` as an integer with an N-bit prefix (RFC 7541, 5.1)
/// and writes the octets into `dst`. The `flags` bits occupy the part
/// of the first octet that the prefix leaves free; they carry the
/// representation pattern the integer belongs to.
///
/// A value below `2^N - 1` fits into the prefix. Anything bigger fills
/// the prefix with 1s and continues in little-endian 7-bit groups, the
/// high bit of each octet flagging a follow-up.
pub(crate) fn encode_integer<W: Write>(
    value: u32,
    flags: u8,
    prefix_size: u8,
    mut dst: W,
) -> Result<(), EncoderError> {
    debug_assert!(prefix_size >= 1 && prefix_size <= 8);

    let mask = ((1u16 << prefix_size) - 1) as u8;
    if value < mask as u32 {
        dst.write_all(&[flags | value as u8])?;
        return Ok(());
    }

    dst.write_all(&[flags | mask])?;
    let mut rest = value - mask as u32;
    while rest >= 128 {
        dst.write_all(&[(rest & 0x7f) as u8 | 0x80])?;
        rest >>= 7;
    }
    dst.write_all(&[rest as u8])?;

    Ok(())
}

/// Encodes `data` as a string literal (RFC 7541, 5.2): a length prefix
/// whose high bit announces Huffman compression, followed by the
/// payload octets. The declared length always counts payload octets,
/// compressed or not.
pub(crate) fn encode_string<W: Write>(
    data: &[u8],
    huffman: bool,
    mut dst: W,
) -> Result<(), EncoderError> {
    if huffman {
        let mut encoded = Vec::with_capacity(data.len());
        weft_huffman::encode(data, &mut encoded);
        encode_integer(encoded.len() as u32, 0x80, 7, &mut dst)?;
        dst.write_all(&encoded)?;
    } else {
        encode_integer(data.len() as u32, 0x0, 7, &mut dst)?;
        dst.write_all(data)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decoder::primitives::decode_integer;

    fn encode(value: u32, prefix_size: u8) -> Vec<u8> {
        let mut dst = Vec::new();
        encode_integer(value, 0x0, prefix_size, &mut dst).unwrap();
        dst
    }

    /// Should produce the octet sequences worked through in RFC 7541,
    /// Appendix C.1.
    #[test]
    fn encodes_spec_examples() {
        assert_eq!(encode(10, 5), vec![0x0a]);
        assert_eq!(encode(1337, 5), vec![0x1f, 0x9a, 0x0a]);
        assert_eq!(encode(42, 8), vec![0x2a]);
    }

    /// Should keep the representation flags in the bits the prefix
    /// leaves free.
    #[test]
    fn preserves_flag_bits() {
        let mut dst = Vec::new();
        encode_integer(2, 0x80, 7, &mut dst).unwrap();
        assert_eq!(dst, vec![0x82]);

        let mut dst = Vec::new();
        encode_integer(1337, 0x20, 5, &mut dst).unwrap();
        assert_eq!(dst, vec![0x3f, 0x9a, 0x0a]);
    }

    /// Should survive a round trip through the decoder at every prefix
    /// width, in the minimum number of octets.
    #[test]
    fn round_trips_minimally() {
        let values = [
            0u32,
            1,
            6,
            7,
            8,
            14,
            15,
            16,
            30,
            31,
            32,
            62,
            63,
            64,
            126,
            127,
            128,
            254,
            255,
            256,
            1337,
            65_535,
            1 << 20,
            u32::MAX >> 1,
        ];
        for prefix_size in 4..=7u8 {
            let limit = (1u32 << prefix_size) - 1;
            for value in values.iter().copied() {
                let wire = encode(value, prefix_size);
                let mut pos = 0;
                assert_eq!(decode_integer(&wire, &mut pos, prefix_size).unwrap(), value);
                assert_eq!(pos, wire.len());

                // minimal length: prefix octet plus exactly the 7-bit
                // groups the remainder needs
                let expected = if value < limit {
                    1
                } else {
                    let mut rest = value - limit;
                    let mut octets = 2;
                    while rest >= 128 {
                        rest >>= 7;
                        octets += 1;
                    }
                    octets
                };
                assert_eq!(wire.len(), expected);
            }
        }
    }

    /// Should announce Huffman compression in the length octet and
    /// count compressed octets, not original ones.
    #[test]
    fn encodes_strings() {
        let mut dst = Vec::new();
        encode_string(b"www.example.com", true, &mut dst).unwrap();
        assert_eq!(dst[0], 0x8c); // Huffman flag, 12 octets
        assert_eq!(dst.len(), 13);

        let mut dst = Vec::new();
        encode_string(b"no-cache", false, &mut dst).unwrap();
        assert_eq!(dst[0], 0x08);
        assert_eq!(&dst[1..], b"no-cache");
    }
}
