//! Symbol alphabets the trie can be built over.

/// How input bytes map to trie symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// One symbol per byte, 256 possible values.
    Byte,
    /// Two symbols per byte: the high nibble, then the low nibble.
    Nibble,
}

impl Alphabet {
    /// Number of distinct symbols, and so the width of a transition row.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            Alphabet::Byte => 256,
            Alphabet::Nibble => 16,
        }
    }

    /// Symbols consumed per input byte.
    #[inline]
    pub const fn symbols_per_byte(self) -> u32 {
        match self {
            Alphabet::Byte => 1,
            Alphabet::Nibble => 2,
        }
    }

    /// Split one byte into its symbols. Only the first `n` entries are used.
    #[inline]
    pub fn split(self, byte: u8) -> ([u8; 2], usize) {
        match self {
            Alphabet::Byte => ([byte, 0], 1),
            Alphabet::Nibble => ([byte >> 4, byte & 0x0F], 2),
        }
    }

    /// The symbol sequence for a byte string.
    pub fn symbols(self, bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
        bytes.iter().flat_map(move |&b| {
            let (syms, n) = self.split(b);
            syms.into_iter().take(n)
        })
    }

    /// Whether a node at `depth` sits between the two halves of a byte.
    #[inline]
    pub fn is_mid_byte(self, depth: u32) -> bool {
        depth % self.symbols_per_byte() != 0
    }
}
