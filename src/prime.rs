//! Prime capacities for the bucket array.
//!
//! Prime table sizes spread keys more evenly when the key hash has poor low-order
//! entropy, since no common factor of the hashes lines up with the modulus.

/// Smallest number of buckets a table is ever allocated with
pub const MIN_CAPACITY: usize = 7;

/// Returns the smallest prime that is `>= n`.
///
/// Even inputs are advanced to `n + 1` first and only odd candidates are tested after
/// that, so `next_prime(2)` is `3`. Callers sizing a table must clamp to
/// [`MIN_CAPACITY`] themselves.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n.is_multiple_of(2) { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Returns true if `n` is prime.
///
/// Trial division by 2 and 3, then by divisors of the form `6k - 1` and `6k + 1` up to
/// `floor(sqrt(n))`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n <= 1 || n.is_multiple_of(2) || n.is_multiple_of(3) {
        return false;
    }

    // `i <= n / i` is `i * i <= n` without the overflow
    let mut i: usize = 5;
    while i <= n / i {
        if n.is_multiple_of(i) || n.is_multiple_of(i + 2) {
            return false;
        }
        i += 6;
    }

    true
}
