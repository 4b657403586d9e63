//! Multi-precision integers.
//!
//! [`Mpi`] is a growable sign-magnitude integer: a sign flag plus a vector of
//! 64-bit limbs stored least-significant first. It implements the arithmetic
//! RSA needs — comparison, add/sub/mul/div, shifts, and the modular layer
//! (GCD, modular inverse, modular exponentiation) — without reaching for an
//! external bignum crate.
//!
//! # Example
//!
//! ```
//! use rsalite::Mpi;
//!
//! let a = Mpi::from_str_radix("EFE0", 16).unwrap();
//! let b = Mpi::from(10u64);
//! let (q, r) = a.div_rem(&b).unwrap();
//! assert_eq!(&(&q * &b) + &r, a);
//! ```

mod arith;
mod modular;

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use zeroize::Zeroize;

use crate::errors::{Error, Result};

/// One machine word of an [`Mpi`] magnitude.
pub(crate) type Limb = u64;

pub(crate) const LIMB_BITS: usize = 64;
pub(crate) const LIMB_BYTES: usize = 8;

const RADIX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Arbitrary-precision signed integer.
///
/// The magnitude is a little-endian limb vector with no trailing zero limb;
/// zero is the empty vector and is never negative. Limb storage only grows,
/// so repeated operations on the same value amortize their allocations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mpi {
    negative: bool,
    limbs: Vec<Limb>,
}

impl Mpi {
    /// The value zero.
    pub fn new() -> Self {
        Mpi {
            negative: false,
            limbs: Vec::new(),
        }
    }

    /// The value zero.
    pub fn zero() -> Self {
        Mpi::new()
    }

    /// The value one.
    pub fn one() -> Self {
        Mpi::from_limb(1)
    }

    /// Build a value from a single limb.
    pub fn from_limb(limb: u64) -> Self {
        let limbs = if limb == 0 { Vec::new() } else { alloc::vec![limb] };
        Mpi {
            negative: false,
            limbs,
        }
    }

    pub(crate) fn from_sign_limbs(negative: bool, mut limbs: Vec<Limb>) -> Self {
        arith::trim_limbs(&mut limbs);
        Mpi {
            negative: negative && !limbs.is_empty(),
            limbs,
        }
    }

    /// Parse a signed magnitude in the given radix (2 through 16).
    ///
    /// An optional leading `-` marks a negative value; digits beyond 9 are
    /// accepted in either case. Returns [`Error::InvalidArgument`] for an
    /// out-of-range radix or an invalid digit character.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        if !(2..=16).contains(&radix) {
            return Err(Error::InvalidArgument);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut out = Mpi::new();
        for ch in digits.chars() {
            let d = ch.to_digit(radix).ok_or(Error::InvalidArgument)?;
            arith::mul_add_limb(&mut out.limbs, radix as Limb, d as Limb);
        }
        out.negative = negative && !out.limbs.is_empty();
        Ok(out)
    }

    /// Write the value in the given radix (2 through 16).
    ///
    /// Digits beyond 9 are upper-case; negative values get a `-` prefix.
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        if !(2..=16).contains(&radix) {
            return Err(Error::InvalidArgument);
        }
        if self.is_zero() {
            return Ok(String::from("0"));
        }

        let mut digits = Vec::new();
        let mut mag = self.limbs.clone();
        while !mag.is_empty() {
            let rem = arith::div_rem_limb_in_place(&mut mag, radix as Limb);
            digits.push(RADIX_DIGITS[rem as usize]);
        }
        if self.negative {
            digits.push(b'-');
        }
        digits.reverse();
        // digits holds ASCII produced above
        Ok(String::from_utf8(digits).map_err(|_| Error::InvalidArgument)?)
    }

    /// Read an unsigned magnitude from big-endian bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(LIMB_BYTES));
        for chunk in bytes.rchunks(LIMB_BYTES) {
            let mut limb: Limb = 0;
            for &b in chunk {
                limb = (limb << 8) | b as Limb;
            }
            limbs.push(limb);
        }
        Mpi::from_sign_limbs(false, limbs)
    }

    /// Write the magnitude as minimal big-endian bytes (`[0]` for zero).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return alloc::vec![0];
        }
        let mut out = Vec::with_capacity(self.limbs.len() * LIMB_BYTES);
        for limb in self.limbs.iter().rev() {
            out.extend_from_slice(&limb.to_be_bytes());
        }
        let skip = out.iter().position(|&b| b != 0).unwrap_or(0);
        out.drain(..skip);
        out
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Whether the magnitude is odd.
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|l| l & 1 == 1)
    }

    /// Whether the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The sign of the value: `-1` for negative, `+1` otherwise (including zero).
    pub fn sign(&self) -> i8 {
        if self.negative {
            -1
        } else {
            1
        }
    }

    /// The absolute value.
    pub fn abs(&self) -> Mpi {
        Mpi {
            negative: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Number of significant bits in the magnitude (0 for zero).
    pub fn bit_len(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => {
                (self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// Number of significant bytes in the magnitude (0 for zero).
    pub fn byte_len(&self) -> usize {
        self.bit_len().div_ceil(8)
    }

    /// The magnitude bit at position `i` (0 = least significant).
    pub fn bit(&self, i: usize) -> bool {
        let limb = i / LIMB_BITS;
        match self.limbs.get(limb) {
            Some(&l) => (l >> (i % LIMB_BITS)) & 1 == 1,
            None => false,
        }
    }

    /// Compare magnitudes, ignoring sign.
    pub fn cmp_abs(&self, other: &Mpi) -> Ordering {
        arith::ucmp(&self.limbs, &other.limbs)
    }
}

impl From<u64> for Mpi {
    fn from(value: u64) -> Self {
        Mpi::from_limb(value)
    }
}

impl From<u32> for Mpi {
    fn from(value: u32) -> Self {
        Mpi::from_limb(value as u64)
    }
}

impl Ord for Mpi {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Mpi {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_str_radix(10).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl fmt::UpperHex for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_str_radix(16).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl fmt::LowerHex for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.to_str_radix(16).map_err(|_| fmt::Error)?;
        s.make_ascii_lowercase();
        f.write_str(&s)
    }
}

impl Zeroize for Mpi {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative = false;
    }
}
