use serde::{Deserialize, Serialize};

use crate::error::{Result, invalid_identifier};

/// Number of bits in a mask, and so the number of distinct identifiers.
pub const WIDTH: u32 = u32::BITS;

/// Largest identifier a mask can hold.
pub const MAX_IDENTIFIER: u32 = WIDTH - 1;

/// A set of identifiers in `0..WIDTH`, packed one bit per identifier into a `u32`.
///
/// Bit `i`, counted from the least significant bit, is set iff identifier `i` is a member.
/// Values are plain `Copy` integers: every update returns a new set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitSet(u32);

impl BitSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns the set with `id` added. Inserting a present identifier is a no-op.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `id` is not below [`WIDTH`].
    pub fn try_insert(self, id: u32) -> Result<Self> {
        Ok(Self(self.0 | singleton(id)?))
    }

    /// # Errors
    /// `InvalidIdentifier` if `id` is not below [`WIDTH`].
    pub fn contains(self, id: u32) -> Result<bool> {
        Ok((self.0 & singleton(id)?) != 0)
    }

    /// Returns the set with the membership of `id` flipped. All other bits are kept.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `id` is not below [`WIDTH`].
    pub fn toggle(self, id: u32) -> Result<Self> {
        Ok(Self(self.0 ^ singleton(id)?))
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the members in ascending order.
    #[must_use]
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

fn singleton(id: u32) -> Result<u32> {
    if id < WIDTH {
        Ok(1 << id)
    } else {
        Err(invalid_identifier(i64::from(id)))
    }
}

pub struct Iter(u32);

impl Iterator for Iter {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let lowest = self.0.trailing_zeros();
        // clear the lowest set bit
        self.0 &= self.0 - 1;
        Some(lowest)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for BitSet {
    type Item = u32;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Packs `ids` into a mask. Duplicates have no further effect, and an empty input gives `0`.
///
/// Every identifier is checked before it is shifted, so a bad one rejects the whole input.
///
/// # Errors
/// `InvalidIdentifier` for the first id that is not below [`WIDTH`].
pub fn encode<I>(ids: I) -> Result<u32>
where
    I: IntoIterator<Item = u32>,
{
    ids.into_iter()
        .try_fold(BitSet::empty(), BitSet::try_insert)
        .map(BitSet::bits)
}

/// Lists the set bits of `mask` in ascending order.
#[must_use]
pub fn decode(mask: u32) -> Vec<u32> {
    BitSet::from_bits(mask).iter().collect()
}

/// # Errors
/// `InvalidIdentifier` if `id` is not below [`WIDTH`].
pub fn has_bit(mask: u32, id: u32) -> Result<bool> {
    BitSet::from_bits(mask).contains(id)
}

/// # Errors
/// `InvalidIdentifier` if `id` is not below [`WIDTH`].
pub fn toggle_bit(mask: u32, id: u32) -> Result<u32> {
    BitSet::from_bits(mask).toggle(id).map(BitSet::bits)
}
