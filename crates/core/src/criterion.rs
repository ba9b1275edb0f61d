// Copyright (C) 2017-2026 cryptapus.
//
// criterion.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

//! Match predicates applied to each value inside a look-back window.

use crate::algo::Algo;
use crate::block::SignalBits;

/// Values that can be tested for a set signal bit.
///
/// `None` means the value carries no bit field and never matches a
/// [`Criterion::SignalBit`].
pub trait BitField {
    /// Non-negative integer form of the value, if it has one.
    fn bit_value(&self) -> Option<u64>;
}

impl BitField for i64 {
    fn bit_value(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl BitField for i32 {
    fn bit_value(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl BitField for SignalBits {
    fn bit_value(&self) -> Option<u64> {
        self.0.map(u64::from)
    }
}

impl BitField for Algo {
    fn bit_value(&self) -> Option<u64> {
        None
    }
}

/// What a value must satisfy to count towards the window percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion<T> {
    /// Value equals the target exactly.
    Exact(T),
    /// Bit number `n` (1-based, counted from the least significant bit) is set.
    SignalBit(u32),
}

impl<T> Criterion<T>
where
    T: PartialEq + BitField,
{
    /// Tests one value.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Criterion::Exact(target) => value == target,
            Criterion::SignalBit(bit) => value
                .bit_value()
                .map_or(false, |v| bit_is_set(v, *bit)),
        }
    }
}

/// Bit `bit` (1-based from the LSB) of `value` is set. Bit 0 never matches.
pub fn bit_is_set(value: u64, bit: u32) -> bool {
    if bit == 0 || bit > u64::BITS {
        return false;
    }
    (value >> (bit - 1)) & 1 == 1
}
