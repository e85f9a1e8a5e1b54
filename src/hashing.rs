//! Structural hashes and the reduction of a hash to a bucket index.

use std::hash::{BuildHasherDefault, DefaultHasher, Hasher};

/// Hash builder used by [`crate::HashTable`] unless another one is supplied.
///
/// Deterministic: the same key lands in the same bucket across runs and processes.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// Hash builder for [`IdentityHasher`]
pub type IdentityHashBuilder = BuildHasherDefault<IdentityHasher>;

/// Hash builder for [`FixedHasher`]
pub type FixedHashBuilder<const H: u64> = BuildHasherDefault<FixedHasher<H>>;

/// Reduces a 64-bit structural hash to an index in `0..capacity`.
///
/// The hash is read as a signed integer and its magnitude is taken before the modulus.
/// `i64::MIN` has no positive counterpart, so its magnitude is computed in unsigned
/// arithmetic (`2^63`) instead of wrapping back to a negative number.
///
/// Returns 0 when `capacity` is 0.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub const fn bucket_index(hash: u64, capacity: usize) -> usize {
    let magnitude = (hash as i64).unsigned_abs();
    match magnitude.checked_rem(capacity as u64) {
        // the remainder is below `capacity`, so it fits back into `usize`
        Some(index) => index as usize,
        None => 0,
    }
}

/// Hasher that hands integer keys through unchanged.
///
/// A key hashed with a single integer write of up to 64 bits hashes to that integer
/// (sign-extended), which mirrors the canonical hash of a boxed integer and makes bucket
/// placement predictable. Byte input, and any write after the first, is folded in with
/// FNV-1a.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityHasher {
    /// Accumulated hash state
    state: u64,
    /// Whether anything has been written yet
    written: bool,
}

impl IdentityHasher {
    /// FNV-1a 64-bit offset basis
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    /// FNV-1a 64-bit prime
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Takes the first integer as-is and folds any later one in as bytes
    fn write_integer(&mut self, value: u64) {
        if self.written {
            self.write(&value.to_le_bytes());
        } else {
            self.state = value;
            self.written = true;
        }
    }
}

#[allow(clippy::cast_sign_loss)]
impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut state = if self.written { self.state } else { Self::FNV_OFFSET };
        for &byte in bytes {
            state ^= u64::from(byte);
            state = state.wrapping_mul(Self::FNV_PRIME);
        }
        self.state = state;
        self.written = true;
    }

    fn write_u8(&mut self, i: u8) {
        self.write_integer(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.write_integer(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.write_integer(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.write_integer(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.write_integer(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.write_integer(i64::from(i) as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.write_integer(i64::from(i) as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.write_integer(i64::from(i) as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.write_integer(i as u64);
    }

    fn write_isize(&mut self, i: isize) {
        self.write_integer(i as u64);
    }
}

/// Hasher that ignores its input and always finishes with `H`.
///
/// Every key collides, which is useful to exercise chains and the `i64::MIN` reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedHasher<const H: u64>;

impl<const H: u64> Hasher for FixedHasher<H> {
    fn finish(&self) -> u64 {
        H
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash};

    use super::*;

    fn hash_with<S: BuildHasher, T: Hash>(builder: &S, value: &T) -> u64 {
        builder.hash_one(value)
    }

    #[test]
    fn test_bucket_index_positive_hash() {
        assert_eq!(bucket_index(0, 7), 0);
        assert_eq!(bucket_index(15, 7), 1);
        assert_eq!(bucket_index(16, 17), 16);
    }

    #[test]
    fn test_bucket_index_negative_hash_uses_magnitude() {
        // -15 as a signed hash
        let hash = 15_u64.wrapping_neg();
        assert_eq!(bucket_index(hash, 7), 1);
    }

    #[test]
    fn test_bucket_index_most_negative_hash() {
        let hash = 1_u64 << 63;
        let index = bucket_index(hash, 7);

        // 2^63 = 8^21 and 8 = 1 (mod 7)
        assert_eq!(index, 1);
        assert_eq!(bucket_index(hash, 17), usize::try_from((1_u64 << 63) % 17).unwrap_or(17));
        for capacity in [7, 11, 13, 17, 37, 79] {
            assert!(bucket_index(hash, capacity) < capacity);
        }
    }

    #[test]
    fn test_bucket_index_zero_capacity() {
        assert_eq!(bucket_index(42, 0), 0);
    }

    #[test]
    fn test_identity_hasher_integers() {
        let builder = IdentityHashBuilder::default();

        assert_eq!(hash_with(&builder, &42_u64), 42);
        assert_eq!(hash_with(&builder, &42_i32), 42);
        assert_eq!(hash_with(&builder, &-1_i32), u64::MAX);
        assert_eq!(hash_with(&builder, &i64::MIN), 1_u64 << 63);
    }

    #[test]
    fn test_identity_hasher_strings_are_stable() {
        let builder = IdentityHashBuilder::default();

        assert_eq!(hash_with(&builder, &"blues power"), hash_with(&builder, &"blues power"));
        assert_ne!(hash_with(&builder, &"blues power"), hash_with(&builder, &"bad to me"));
    }

    #[test]
    fn test_fixed_hasher_ignores_input() {
        let builder = FixedHashBuilder::<99>::default();

        assert_eq!(hash_with(&builder, &"a"), 99);
        assert_eq!(hash_with(&builder, &12_u32), 99);
    }

    #[test]
    fn test_default_builder_is_deterministic() {
        let first = DefaultHashBuilder::default();
        let second = DefaultHashBuilder::default();

        assert_eq!(hash_with(&first, &"A"), hash_with(&second, &"A"));
    }
}
