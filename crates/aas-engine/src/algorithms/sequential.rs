//! # Sequential Ripple-Carry Addition
//!
//! Single-pass long addition, least significant digit first. Serves as the
//! oracle for the parallel pipeline and as the benchmark baseline.

use crate::domain::{Addition, Digit, Operands, BASE};

/// Add two operands with a running carry.
pub fn add_sequential(operands: &Operands) -> Addition {
    let n = operands.len();
    let mut digits = vec![Digit::ZERO; n];
    let mut carry = 0u16;

    let first = operands.first().digits();
    let second = operands.second().digits();

    for i in (0..n).rev() {
        let total = first[i].value() + second[i].value() + carry;
        carry = total / BASE;
        digits[i] = Digit::from_bounded(total % BASE);
    }

    let grew = carry > 0;
    if grew {
        digits.insert(0, Digit::from_bounded(carry));
    }
    Addition::new(digits, grew)
}
