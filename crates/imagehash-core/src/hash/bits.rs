//! Bit layout shared by every hash width.
//!
//! Decision `idx` (row-major, 0-based) lives in word `idx / 64` at bit `63 - idx % 64`:
//! the first decision is the most significant bit of the first word. Unused low-order
//! bits of the last word stay zero.

/// Number of 64-bit words needed for `bits` decisions
pub fn word_count(bits: usize) -> usize {
    bits.div_ceil(64)
}

/// Accumulates threshold decisions into big-endian words.
///
/// Consumed by [`BitPacker::into_words`] once every decision has been pushed.
#[derive(Debug, Clone)]
pub struct BitPacker {
    words: Vec<u64>,
    len: usize,
}

impl BitPacker {
    /// Packer sized for `bits` decisions
    pub fn with_bits(bits: usize) -> Self {
        Self {
            words: vec![0; word_count(bits)],
            len: 0,
        }
    }

    /// Record the next decision.
    pub fn push(&mut self, bit: bool) {
        let word = self.len / 64;
        if word == self.words.len() {
            self.words.push(0);
        }
        if bit {
            self.words[word] |= 1 << (63 - self.len % 64);
        }
        self.len += 1;
    }

    /// Decisions pushed so far
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_words(self) -> Vec<u64> {
        self.words
    }
}

impl Extend<bool> for BitPacker {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

/// Pack a sequence of decisions into words.
pub fn pack<I>(decisions: I) -> Vec<u64>
where
    I: IntoIterator<Item = bool>,
{
    let decisions = decisions.into_iter();
    let mut packer = BitPacker::with_bits(decisions.size_hint().0);
    packer.extend(decisions);
    packer.into_words()
}

/// Decision `idx` of a packed word vector; out-of-range indices read as `false`.
pub fn bit_at(words: &[u64], idx: usize) -> bool {
    words
        .get(idx / 64)
        .is_some_and(|word| (word >> (63 - idx % 64)) & 1 == 1)
}

/// Number of positions at which two equally long word vectors differ.
pub fn hamming(left: &[u64], right: &[u64]) -> u32 {
    debug_assert_eq!(left.len(), right.len());
    left.iter()
        .zip(right)
        .map(|(l, r)| (l ^ r).count_ones())
        .sum()
}
