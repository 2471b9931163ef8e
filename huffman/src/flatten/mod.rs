//! Flattens the Huffman code tree into a translation matrix.
//!
//! The decoder never walks the code tree bit by bit. Instead it consumes
//! N bits at a time and resolves each N-bit chunk through a matrix with
//! one row per tree position and one column per chunk value. A cell
//! records where the walk ends up, whether a code word was completed on
//! the way (and for which symbol), and whether the walk ran into the EOS
//! code word, which a well-formed sequence never contains.
//!
//! Rows exist only for inner tree positions. Completing a code word
//! mid-chunk restarts the walk at the root, so a cell can name at most
//! one symbol as long as the chunk is narrower than the shortest code
//! word (5 bits).
//!
//! Each row also carries an `accepts` flag: a sequence may legally end
//! in this position, meaning the unconsumed tail is a strict prefix of
//! EOS: between zero and seven 1-bits.

use crate::encoder::ENCODE_TABLE;

/// A single cell of the translation matrix.
pub(crate) struct Transition {
    /// Row reached after consuming the chunk.
    pub next: u16,

    /// Symbol completed while walking the chunk, if any.
    pub sym: Option<u8>,

    /// The chunk steered the walk into the EOS code word.
    pub failed: bool,
}

/// The flattened code tree for one chunk width.
pub(crate) struct Matrix {
    /// Bits consumed per transition.
    pub chunk: usize,

    /// One row per inner tree position, `2^chunk` cells each.
    pub rows: Vec<Vec<Transition>>,

    /// Positions in which a sequence may end.
    pub accepts: Vec<bool>,
}

#[derive(Default)]
struct Node {
    children: [Option<usize>; 2],
    sym: Option<u16>,
}

/// Builds the translation matrix for the given chunk width. The width
/// must divide an octet so that a chunk never straddles a byte.
pub(crate) fn flatten(chunk: usize) -> Matrix {
    debug_assert!(chunk == 1 || chunk == 2 || chunk == 4);

    // the code tree, root at index 0
    let mut nodes: Vec<Node> = vec![Node::default()];
    for (sym, &(len, code)) in ENCODE_TABLE.iter().enumerate() {
        let mut cur = 0;
        for i in (0..len).rev() {
            let bit = ((code >> i) & 1) as usize;
            cur = match nodes[cur].children[bit] {
                Some(next) => next,
                None => {
                    nodes.push(Node::default());
                    let next = nodes.len() - 1;
                    nodes[cur].children[bit] = Some(next);
                    next
                }
            };
        }
        nodes[cur].sym = Some(sym as u16);
    }

    // inner nodes become matrix rows
    let mut states = vec![0usize; nodes.len()];
    let mut inner = Vec::new();
    for (id, node) in nodes.iter().enumerate() {
        if node.sym.is_none() {
            states[id] = inner.len();
            inner.push(id);
        }
    }

    let mut rows = Vec::with_capacity(inner.len());
    for &start in &inner {
        let mut row = Vec::with_capacity(1 << chunk);
        for path in 0..(1u32 << chunk) {
            let mut cur = start;
            let mut sym = None;
            let mut failed = false;
            for i in (0..chunk).rev() {
                let bit = ((path >> i) & 1) as usize;
                let next = match nodes[cur].children[bit] {
                    Some(next) => next,
                    None => {
                        failed = true;
                        break;
                    }
                };
                match nodes[next].sym {
                    Some(256) => {
                        failed = true;
                        break;
                    }
                    Some(s) => {
                        sym = Some(s as u8);
                        cur = 0;
                    }
                    None => cur = next,
                }
            }
            row.push(Transition {
                next: if failed { 0 } else { states[cur] as u16 },
                sym,
                failed,
            });
        }
        rows.push(row);
    }

    // the all-1s path of length 0..=7 is valid padding
    let mut accepts = vec![false; inner.len()];
    accepts[0] = true;
    let mut cur = 0;
    for _ in 0..7 {
        match nodes[cur].children[1] {
            Some(next) if nodes[next].sym.is_none() => {
                accepts[states[next]] = true;
                cur = next;
            }
            _ => break,
        }
    }

    Matrix {
        chunk,
        rows,
        accepts,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Should produce one row per inner node of the code tree. A full
    /// binary tree with 257 leaves has 256 inner nodes.
    #[test]
    fn sizes_the_matrix() {
        for chunk in &[1, 2, 4] {
            let matrix = flatten(*chunk);
            assert_eq!(matrix.rows.len(), 256);
            assert_eq!(matrix.rows[0].len(), 1 << *chunk);
        }
    }

    /// Should accept exactly the root and the first seven positions of
    /// the all-1s path.
    #[test]
    fn marks_padding_positions() {
        let matrix = flatten(4);
        assert_eq!(matrix.accepts.iter().filter(|a| **a).count(), 8);
        assert!(matrix.accepts[0]);
    }
}
