//! This crate implements the static Huffman code that HPACK (RFC 7541)
//! uses for string literals, in both directions.
//!
//! HPACK compresses HTTP/2 headers, and the string literals inside them
//! are where most of the bytes live, so the specification assigns every
//! octet value a fixed, statistically tuned code word (Appendix B).
//! Frequent characters cost as little as 5 bits, rare ones up to 30.
//! The code is canonical and shared by every HPACK implementation; it
//! is reproduced here in [`ENCODE_TABLE`].
//!
//! * [`encode`] turns an octet string into its packed Huffman sequence,
//!   padding the last octet with the leading bits of the EOS symbol.
//!
//! * [`decode`] reverses the process through a flattened form of the
//!   code tree, reading several bits per step ([`DecoderSpeed`]), and
//!   rejects any sequence a conforming encoder could not have produced.
//!
//! The crate knows nothing about headers, tables or HPACK block
//! structure; it is the string-literal layer that an HPACK codec builds
//! on.

mod decoder;
mod encoder;
mod flatten;

pub use decoder::{decode, DecoderError, DecoderSpeed};
pub use encoder::{encode, ENCODE_TABLE};
