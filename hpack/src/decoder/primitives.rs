use weft_huffman::DecoderSpeed;

use super::DecoderError;

/// Decodes an integer with an N-bit prefix (RFC 7541, 5.1) starting at
/// `src[*pos]`, advancing `pos` past the octets consumed.
///
/// A filled prefix continues in little-endian 7-bit groups, the high
/// bit of each octet flagging a follow-up. Values past `u32::MAX` are
/// rejected; no legal HPACK quantity comes anywhere near that bound.
pub(crate) fn decode_integer(
    src: &[u8],
    pos: &mut usize,
    prefix_size: u8,
) -> Result<u32, DecoderError> {
    debug_assert!(prefix_size >= 1 && prefix_size <= 8);

    let mask = ((1u16 << prefix_size) - 1) as u8;
    let first = match src.get(*pos) {
        Some(first) => *first,
        None => return Err(DecoderError::UnexpectedEndOfStream),
    };
    *pos += 1;

    let prefix = first & mask;
    if prefix < mask {
        return Ok(prefix as u32);
    }

    let mut value = mask as u64;
    let mut shift = 0;
    loop {
        let byte = match src.get(*pos) {
            Some(byte) => *byte,
            None => return Err(DecoderError::UnexpectedEndOfStream),
        };
        *pos += 1;

        value += ((byte & 0x7f) as u64) << shift;
        if value > u32::MAX as u64 {
            return Err(DecoderError::IntegerOverflow);
        }
        if byte & 0x80 == 0 {
            return Ok(value as u32);
        }

        shift += 7;
        if shift > 28 {
            return Err(DecoderError::IntegerOverflow);
        }
    }
}

/// Decodes a string literal (RFC 7541, 5.2) starting at `src[*pos]`,
/// advancing `pos` past the octets consumed. The high bit of the length
/// octet announces a Huffman-compressed payload.
pub(crate) fn decode_string(src: &[u8], pos: &mut usize) -> Result<Vec<u8>, DecoderError> {
    let huffman = match src.get(*pos) {
        Some(first) => first & 0x80 == 0x80,
        None => return Err(DecoderError::UnexpectedEndOfStream),
    };

    let length = decode_integer(src, pos, 7)? as usize;
    if length > src.len() - *pos {
        return Err(DecoderError::UnexpectedEndOfStream);
    }
    let payload = &src[*pos..*pos + length];
    *pos += length;

    if huffman {
        let mut decoded = Vec::with_capacity(payload.len() * 2);
        weft_huffman::decode(payload, &mut decoded, DecoderSpeed::FourBits)?;
        Ok(decoded)
    } else {
        Ok(payload.to_vec())
    }
}
