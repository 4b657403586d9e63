//! Modular arithmetic: GCD, modular inverse, and modular exponentiation.
//!
//! Exponentiation uses Montgomery reduction for odd moduli. The R^2 constant
//! that converts operands into the Montgomery domain can be precomputed once
//! per modulus with [`Mpi::mont_rr`] and passed to every [`Mpi::exp_mod`]
//! call against that modulus; RSA private-key operations rely on this to
//! avoid recomputing it for P and Q on every decryption.

use alloc::vec::Vec;
use core::cmp::Ordering;

use super::{arith, Limb, Mpi, LIMB_BITS};
use crate::errors::{Error, Result};

impl Mpi {
    /// Greatest common divisor of the absolute values; always non-negative.
    pub fn gcd(&self, other: &Mpi) -> Mpi {
        let mut a = self.limbs.clone();
        let mut b = other.limbs.clone();
        while !b.is_empty() {
            let (_, r) = arith::udiv(&a, &b);
            a = b;
            b = r;
        }
        Mpi::from_sign_limbs(false, a)
    }

    /// Modular inverse: `X` with `self * X == 1 (mod n)` and `0 <= X < n`.
    ///
    /// Returns [`Error::InvalidArgument`] unless `n > 1`, and
    /// [`Error::NotInvertible`] when `gcd(self, n) != 1`.
    pub fn inv_mod(&self, n: &Mpi) -> Result<Mpi> {
        if n.negative || *n <= Mpi::one() {
            return Err(Error::InvalidArgument);
        }

        // extended Euclid on (self mod n, n), tracking only the first cofactor
        let mut old_r = self.rem_euclid(n)?;
        let mut r = n.clone();
        let mut old_s = Mpi::one();
        let mut s = Mpi::new();

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            let next_s = &old_s - &(&q * &s);
            old_r = core::mem::replace(&mut r, rem);
            old_s = core::mem::replace(&mut s, next_s);
        }

        if old_r != Mpi::one() {
            return Err(Error::NotInvertible);
        }
        old_s.rem_euclid(n)
    }

    /// Modular exponentiation: `self ^ exponent mod modulus`.
    ///
    /// `exponent` must be non-negative and `modulus` positive, else
    /// [`Error::InvalidArgument`]; the base is reduced into `[0, modulus)`
    /// first, and a zero exponent yields 1 (0 when the modulus is 1).
    ///
    /// For an odd modulus, `rr` may carry the `R^2 mod modulus` constant from
    /// [`Mpi::mont_rr`]; passing `None` (or a zero value) computes it on the
    /// fly. Even moduli take a slower division-based path and ignore `rr`.
    pub fn exp_mod(&self, exponent: &Mpi, modulus: &Mpi, rr: Option<&Mpi>) -> Result<Mpi> {
        if modulus.is_zero() || modulus.negative || exponent.negative {
            return Err(Error::InvalidArgument);
        }
        let base = self.rem_euclid(modulus)?;
        if modulus.is_odd() {
            mont_exp(&base, exponent, modulus, rr)
        } else {
            plain_exp(&base, exponent, modulus)
        }
    }

    /// The Montgomery constant `R^2 mod modulus` for an odd positive modulus,
    /// where `R = 2^(64 * limb count of modulus)`.
    pub fn mont_rr(modulus: &Mpi) -> Result<Mpi> {
        if modulus.is_zero() || modulus.negative || !modulus.is_odd() {
            return Err(Error::InvalidArgument);
        }
        let mut rr = Mpi::one();
        rr <<= 2 * modulus.limbs.len() * LIMB_BITS;
        rr.rem_euclid(modulus)
    }
}

/// Square-and-multiply with division-based reduction; handles even moduli.
fn plain_exp(base: &Mpi, exponent: &Mpi, modulus: &Mpi) -> Result<Mpi> {
    let mut acc = Mpi::one().rem_euclid(modulus)?;
    for i in (0..exponent.bit_len()).rev() {
        acc = (&acc * &acc).rem_euclid(modulus)?;
        if exponent.bit(i) {
            acc = (&acc * base).rem_euclid(modulus)?;
        }
    }
    Ok(acc)
}

/// `-modulus[0]^-1 mod 2^64` by Hensel lifting (odd squares are 1 mod 8, so
/// `n0` is its own inverse to three bits; each step doubles the precision).
fn mont_inv(n0: Limb) -> Limb {
    let mut x = n0;
    for _ in 0..5 {
        x = x.wrapping_mul(2u64.wrapping_sub(n0.wrapping_mul(x)));
    }
    x.wrapping_neg()
}

/// Interleaved Montgomery multiplication: `a * b * R^-1 mod n` over fixed
/// `n.len()`-limb operands, with one trailing conditional subtraction.
fn mont_mul(a: &[Limb], b: &[Limb], n: &[Limb], mm: Limb) -> Vec<Limb> {
    let nl = n.len();
    let mut d = alloc::vec![0 as Limb; nl + 2];

    for i in 0..nl {
        let u0 = a[i];
        let u1 = d[0]
            .wrapping_add(u0.wrapping_mul(b[0]))
            .wrapping_mul(mm);

        let c = arith::mul_add_limbs(&mut d[..nl], b, u0);
        propagate(&mut d, nl, c);
        let c = arith::mul_add_limbs(&mut d[..nl], n, u1);
        propagate(&mut d, nl, c);

        // d[0] is now zero; divide by the limb radix
        d.copy_within(1..nl + 2, 0);
        d[nl + 1] = 0;
    }

    let mut out = d;
    out.truncate(nl + 1);
    if arith::ucmp(&out, n) != Ordering::Less {
        arith::usub_in_place(&mut out, n);
    }
    out.resize(nl, 0);
    out
}

fn propagate(d: &mut [Limb], mut idx: usize, mut carry: Limb) {
    while carry != 0 {
        let (v, overflow) = d[idx].overflowing_add(carry);
        d[idx] = v;
        carry = overflow as Limb;
        idx += 1;
    }
}

/// Montgomery ladder for an odd modulus; `base` already reduced.
fn mont_exp(base: &Mpi, exponent: &Mpi, modulus: &Mpi, rr: Option<&Mpi>) -> Result<Mpi> {
    let n = &modulus.limbs;
    let nl = n.len();
    let mm = mont_inv(n[0]);

    let local_rr;
    let rr = match rr {
        Some(v) if !v.is_zero() => v,
        _ => {
            local_rr = Mpi::mont_rr(modulus)?;
            &local_rr
        }
    };

    let rr_limbs = padded(&rr.limbs, nl);
    let one = padded(&[1], nl);

    let base_m = mont_mul(&padded(&base.limbs, nl), &rr_limbs, n, mm);
    let mut acc = mont_mul(&one, &rr_limbs, n, mm);

    for i in (0..exponent.bit_len()).rev() {
        acc = mont_mul(&acc, &acc, n, mm);
        if exponent.bit(i) {
            acc = mont_mul(&acc, &base_m, n, mm);
        }
    }

    Ok(Mpi::from_sign_limbs(false, mont_mul(&acc, &one, n, mm)))
}

fn padded(limbs: &[Limb], len: usize) -> Vec<Limb> {
    let mut out = limbs.to_vec();
    out.resize(len, 0);
    out
}
