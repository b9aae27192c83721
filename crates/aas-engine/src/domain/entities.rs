//! # Entities
//!
//! Working buffers of one addition and its resolved result.

use super::value_objects::Digit;

/// One position's local sum, written by exactly one worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitSum {
    /// Local sum, already reduced below the base when `carry` is set.
    pub sum: u16,
    /// True when the position's inputs added up to the base or more.
    pub carry: bool,
}

impl DigitSum {
    /// Create a slot.
    pub fn new(sum: u16, carry: bool) -> Self {
        Self { sum, carry }
    }
}

/// Output of the parallel stage: one slot per position, most significant first.
///
/// Carries are local only; a carry flagged at `i + 1` has not yet been added
/// into position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSum {
    slots: Vec<DigitSum>,
}

impl RawSum {
    /// Wrap per-position slots.
    pub fn new(slots: Vec<DigitSum>) -> Self {
        Self { slots }
    }

    /// Fresh zeroed buffer for `len` positions.
    pub fn zeroed(len: usize) -> Self {
        Self {
            slots: vec![DigitSum::default(); len],
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no positions exist.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read-only view of the slots.
    pub fn slots(&self) -> &[DigitSum] {
        &self.slots
    }

    /// Mutable view of the slots, for partitioning among workers.
    pub fn slots_mut(&mut self) -> &mut [DigitSum] {
        &mut self.slots
    }

    /// Number of positions that flagged a local carry.
    pub fn carry_count(&self) -> usize {
        self.slots.iter().filter(|s| s.carry).count()
    }

    /// Take ownership of the slots.
    pub fn into_slots(self) -> Vec<DigitSum> {
        self.slots
    }
}

/// Fully carried sum of two operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addition {
    digits: Vec<Digit>,
    grew: bool,
}

impl Addition {
    pub(crate) fn new(digits: Vec<Digit>, grew: bool) -> Self {
        Self { digits, grew }
    }

    /// Result digits, most significant first (`n` or `n + 1` of them).
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// True when a final carry added one leading digit.
    pub fn grew(&self) -> bool {
        self.grew
    }

    /// Number of result digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false for a resolved sum.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Raw values, convenient for assertions and formatting.
    pub fn values(&self) -> Vec<u16> {
        self.digits.iter().map(|d| d.value()).collect()
    }

    /// Take ownership of the digits.
    pub fn into_digits(self) -> Vec<Digit> {
        self.digits
    }
}
