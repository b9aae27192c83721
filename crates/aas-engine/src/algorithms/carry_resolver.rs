//! # Carry Resolver
//!
//! Sequential repair pass run after the parallel stage has joined.
//!
//! Each worker only saw its own position, so a carry produced at `i + 1`
//! has not been added into `i`. This pass walks right to left (least to most
//! significant) exactly like long addition:
//!
//! 1. For `i` from `n - 2` down to `0`: when `carry[i + 1]` is set, add one to
//!    `sum[i]`; if that overflows, reduce it and set `carry[i]`. Then consume
//!    `carry[i + 1]`.
//! 2. If `carry[0]` survives the sweep, the result gains a leading digit `1`.
//!
//! The direction is load-bearing: sweeping left to right would miss carries
//! that ripple through several positions.

use crate::domain::{
    invariant_digit_bound, invariant_growth, Addition, Digit, RawSum, BASE, MAX_DIGIT,
};

/// Propagate local carries and grow the result by one digit on final overflow.
pub fn resolve_carries(raw: RawSum) -> Addition {
    let mut slots = raw.into_slots();
    let input_len = slots.len();

    // The least significant position has no incoming carry.
    for i in (0..input_len.saturating_sub(1)).rev() {
        if !slots[i + 1].carry {
            continue;
        }

        slots[i].sum += 1;
        if slots[i].sum > MAX_DIGIT {
            slots[i].sum -= BASE;
            slots[i].carry = true;
        }
        // carry[i] is left as it was when the +1 does not overflow. A position
        // with its own local carry holds at most 998, so that carry stays set.
        slots[i + 1].carry = false;
    }

    let grew = slots.first().is_some_and(|s| s.carry);

    let mut digits = Vec::with_capacity(input_len + usize::from(grew));
    if grew {
        digits.push(Digit::ONE);
    }
    digits.extend(slots.iter().map(|s| {
        debug_assert!(invariant_digit_bound(s.sum), "unresolved digit {}", s.sum);
        Digit::from_bounded(s.sum)
    }));

    debug_assert!(invariant_growth(input_len, &digits));

    Addition::new(digits, grew)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DigitSum;

    fn raw(slots: &[(u16, bool)]) -> RawSum {
        RawSum::new(slots.iter().map(|&(s, c)| DigitSum::new(s, c)).collect())
    }

    #[test]
    fn test_no_carries_is_identity() {
        let result = resolve_carries(raw(&[(1, false), (2, false), (3, false)]));
        assert_eq!(result.values(), vec![1, 2, 3]);
        assert!(!result.grew());
    }

    #[test]
    fn test_single_position_without_carry() {
        let result = resolve_carries(raw(&[(2, false)]));
        assert_eq!(result.values(), vec![2]);
        assert!(!result.grew());
    }

    #[test]
    fn test_single_position_with_carry_grows() {
        let result = resolve_carries(raw(&[(0, true)]));
        assert_eq!(result.values(), vec![1, 0]);
        assert!(result.grew());
    }

    #[test]
    fn test_carry_absorbed_without_growth() {
        // [1, 999] + [0, 1]
        let result = resolve_carries(raw(&[(1, false), (0, true)]));
        assert_eq!(result.values(), vec![2, 0]);
        assert!(!result.grew());
    }

    #[test]
    fn test_carry_ripples_into_growth() {
        // [500, 500] + [499, 500]
        let result = resolve_carries(raw(&[(999, false), (0, true)]));
        assert_eq!(result.values(), vec![1, 0, 0]);
        assert!(result.grew());
    }

    #[test]
    fn test_long_ripple_chain() {
        // [999, 999, 999, 999] + [0, 0, 0, 1]
        let result = resolve_carries(raw(&[
            (999, false),
            (999, false),
            (999, false),
            (0, true),
        ]));
        assert_eq!(result.values(), vec![1, 0, 0, 0, 0]);
        assert!(result.grew());
    }

    #[test]
    fn test_local_carry_kept_when_incoming_carry_does_not_overflow() {
        // [999, 999] + [999, 1]: position 0 carries locally (998) and also
        // receives the carry from position 1.
        let result = resolve_carries(raw(&[(998, true), (0, true)]));
        assert_eq!(result.values(), vec![1, 999, 0]);
        assert!(result.grew());
    }

    #[test]
    fn test_chain_broken_by_non_max_digit() {
        // [5, 999, 0] + [0, 0, 1] has no carry at all; [5, 999, 999] + [0, 0, 1]
        // ripples through position 1 and stops at position 0.
        let result = resolve_carries(raw(&[(5, false), (999, false), (0, true)]));
        assert_eq!(result.values(), vec![6, 0, 0]);
        assert!(!result.grew());
    }

    #[test]
    fn test_grown_leading_digit_is_one() {
        // [999, 999] + [999, 999] = 1_999_998
        let result = resolve_carries(raw(&[(998, true), (998, true)]));
        assert_eq!(result.values(), vec![1, 999, 998]);
        assert_eq!(result.digits()[0], Digit::ONE);
    }
}
