use std::borrow::Cow;

/// Provides the input formats understood by the encoder.
///
/// A header handed to the encoder names its parts either by index into
/// the indexing table or as literal bytes. Literal parts travel as
/// clone-on-write slices, so owned buffers and borrowed slices feed the
/// same three variants; the `From` conversions below cover the common
/// tuple shapes. Every literal-carrying variant also holds the
/// configuration flags that steer the representation choice.
#[derive(Debug)]
pub enum EncoderField<'a> {
    /// A header stored in the indexing table under this index, name and
    /// value both.
    Indexed(u32),

    /// A header whose name sits in the indexing table while the value
    /// is provided in bytes.
    IndexedName(u32, Cow<'a, [u8]>, u8),

    /// A header provided entirely in bytes.
    Literal(Cow<'a, [u8]>, Cow<'a, [u8]>, u8),
}

impl<'a> From<u32> for EncoderField<'a> {
    fn from(index: u32) -> Self {
        EncoderField::Indexed(index)
    }
}

impl<'a> From<(u32, Vec<u8>, u8)> for EncoderField<'a> {
    fn from((index, value, flags): (u32, Vec<u8>, u8)) -> Self {
        EncoderField::IndexedName(index, Cow::Owned(value), flags)
    }
}

impl<'a> From<(u32, &'a [u8], u8)> for EncoderField<'a> {
    fn from((index, value, flags): (u32, &'a [u8], u8)) -> Self {
        EncoderField::IndexedName(index, Cow::Borrowed(value), flags)
    }
}

impl<'a> From<(Vec<u8>, Vec<u8>, u8)> for EncoderField<'a> {
    fn from((name, value, flags): (Vec<u8>, Vec<u8>, u8)) -> Self {
        EncoderField::Literal(Cow::Owned(name), Cow::Owned(value), flags)
    }
}

impl<'a> From<(&'a [u8], &'a [u8], u8)> for EncoderField<'a> {
    fn from((name, value, flags): (&'a [u8], &'a [u8], u8)) -> Self {
        EncoderField::Literal(Cow::Borrowed(name), Cow::Borrowed(value), flags)
    }
}
