//! Comparison, addition, subtraction, multiplication, division, and shifts.
//!
//! Signed operations dispatch to unsigned magnitude helpers based on the
//! operand signs; division is truncating (toward zero) with the remainder
//! taking the dividend's sign.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Add, Mul, Neg, ShlAssign, ShrAssign, Sub};

use super::{Limb, Mpi, LIMB_BITS};
use crate::errors::{Error, Result};

/// Index just past the most significant nonzero limb.
fn sig_len(x: &[Limb]) -> usize {
    x.iter().rposition(|&l| l != 0).map_or(0, |p| p + 1)
}

pub(crate) fn trim_limbs(limbs: &mut Vec<Limb>) {
    limbs.truncate(sig_len(limbs));
}

/// Compare magnitudes; tolerates untrimmed slices.
pub(crate) fn ucmp(a: &[Limb], b: &[Limb]) -> Ordering {
    let (al, bl) = (sig_len(a), sig_len(b));
    if al != bl {
        return al.cmp(&bl);
    }
    for i in (0..al).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Magnitude addition with carry.
fn uadd(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry: Limb = 0;
    for i in 0..long.len() {
        let s = short.get(i).copied().unwrap_or(0);
        let (v1, c1) = long[i].overflowing_add(s);
        let (v2, c2) = v1.overflowing_add(carry);
        out.push(v2);
        carry = (c1 as Limb) + (c2 as Limb);
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// Magnitude subtraction in place; requires `a >= b`.
pub(crate) fn usub_in_place(a: &mut Vec<Limb>, b: &[Limb]) {
    debug_assert!(ucmp(a, b) != Ordering::Less);
    let mut borrow: Limb = 0;
    for i in 0..a.len() {
        let s = b.get(i).copied().unwrap_or(0);
        let (v1, b1) = a[i].overflowing_sub(s);
        let (v2, b2) = v1.overflowing_sub(borrow);
        a[i] = v2;
        borrow = (b1 as Limb) + (b2 as Limb);
    }
    debug_assert_eq!(borrow, 0);
    trim_limbs(a);
}

fn usub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut out = a.to_vec();
    usub_in_place(&mut out, b);
    out
}

/// `acc[i] += src[i] * m` over `src.len()` limbs; returns the carry-out.
pub(crate) fn mul_add_limbs(acc: &mut [Limb], src: &[Limb], m: Limb) -> Limb {
    let mut carry: Limb = 0;
    for (a, &s) in acc.iter_mut().zip(src) {
        let t = *a as u128 + (s as u128) * (m as u128) + carry as u128;
        *a = t as Limb;
        carry = (t >> LIMB_BITS) as Limb;
    }
    carry
}

/// `limbs = limbs * m + a` on a trimmed magnitude.
pub(crate) fn mul_add_limb(limbs: &mut Vec<Limb>, m: Limb, a: Limb) {
    let mut carry = a as u128;
    for limb in limbs.iter_mut() {
        let t = (*limb as u128) * (m as u128) + carry;
        *limb = t as Limb;
        carry = t >> LIMB_BITS;
    }
    if carry != 0 {
        limbs.push(carry as Limb);
    }
}

/// Divide a magnitude by a single limb in place; returns the remainder.
pub(crate) fn div_rem_limb_in_place(limbs: &mut Vec<Limb>, d: Limb) -> Limb {
    debug_assert_ne!(d, 0);
    let mut rem: u128 = 0;
    for limb in limbs.iter_mut().rev() {
        let cur = (rem << LIMB_BITS) | *limb as u128;
        *limb = (cur / d as u128) as Limb;
        rem = cur % d as u128;
    }
    trim_limbs(limbs);
    rem as Limb
}

fn shl1_in_place(v: &mut Vec<Limb>) {
    let mut carry: Limb = 0;
    for limb in v.iter_mut() {
        let next = *limb >> (LIMB_BITS - 1);
        *limb = (*limb << 1) | carry;
        carry = next;
    }
    if carry != 0 {
        v.push(carry);
    }
}

/// Magnitude division: binary long division with a single-limb fast path.
pub(crate) fn udiv(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    debug_assert_ne!(sig_len(b), 0);
    match ucmp(a, b) {
        Ordering::Less => return (Vec::new(), a[..sig_len(a)].to_vec()),
        Ordering::Equal => return (alloc::vec![1], Vec::new()),
        Ordering::Greater => {}
    }

    if sig_len(b) == 1 {
        let mut q = a[..sig_len(a)].to_vec();
        let r = div_rem_limb_in_place(&mut q, b[0]);
        let rem = if r == 0 { Vec::new() } else { alloc::vec![r] };
        return (q, rem);
    }

    let bits =
        (sig_len(a) - 1) * LIMB_BITS + LIMB_BITS - a[sig_len(a) - 1].leading_zeros() as usize;
    let mut quotient = alloc::vec![0 as Limb; sig_len(a)];
    let mut rem: Vec<Limb> = Vec::with_capacity(sig_len(b) + 1);

    for i in (0..bits).rev() {
        shl1_in_place(&mut rem);
        if (a[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1 == 1 {
            if rem.is_empty() {
                rem.push(0);
            }
            rem[0] |= 1;
        }
        if ucmp(&rem, b) != Ordering::Less {
            usub_in_place(&mut rem, b);
            quotient[i / LIMB_BITS] |= 1 << (i % LIMB_BITS);
        }
    }

    trim_limbs(&mut quotient);
    trim_limbs(&mut rem);
    (quotient, rem)
}

/// Signed addition; `negate_rhs` folds subtraction into the same dispatch.
fn add_signed(lhs: &Mpi, rhs: &Mpi, negate_rhs: bool) -> Mpi {
    let rhs_negative = rhs.negative ^ negate_rhs;
    if lhs.negative == rhs_negative {
        Mpi::from_sign_limbs(lhs.negative, uadd(&lhs.limbs, &rhs.limbs))
    } else {
        match ucmp(&lhs.limbs, &rhs.limbs) {
            Ordering::Equal => Mpi::new(),
            Ordering::Greater => Mpi::from_sign_limbs(lhs.negative, usub(&lhs.limbs, &rhs.limbs)),
            Ordering::Less => Mpi::from_sign_limbs(rhs_negative, usub(&rhs.limbs, &lhs.limbs)),
        }
    }
}

impl Add for &Mpi {
    type Output = Mpi;

    fn add(self, rhs: &Mpi) -> Mpi {
        add_signed(self, rhs, false)
    }
}

impl Sub for &Mpi {
    type Output = Mpi;

    fn sub(self, rhs: &Mpi) -> Mpi {
        add_signed(self, rhs, true)
    }
}

impl Mul for &Mpi {
    type Output = Mpi;

    fn mul(self, rhs: &Mpi) -> Mpi {
        if self.is_zero() || rhs.is_zero() {
            return Mpi::new();
        }
        let (a, b) = (&self.limbs, &rhs.limbs);
        let mut out = alloc::vec![0 as Limb; a.len() + b.len()];
        for (i, &ai) in a.iter().enumerate() {
            let carry = mul_add_limbs(&mut out[i..i + b.len()], b, ai);
            out[i + b.len()] = carry;
        }
        Mpi::from_sign_limbs(self.negative != rhs.negative, out)
    }
}

impl Neg for Mpi {
    type Output = Mpi;

    fn neg(mut self) -> Mpi {
        self.negative = !self.negative && !self.limbs.is_empty();
        self
    }
}

impl Neg for &Mpi {
    type Output = Mpi;

    fn neg(self) -> Mpi {
        -self.clone()
    }
}

impl ShlAssign<usize> for Mpi {
    fn shl_assign(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let bit_shift = bits % LIMB_BITS;
        if bit_shift != 0 {
            let mut carry: Limb = 0;
            for limb in self.limbs.iter_mut() {
                let next = *limb >> (LIMB_BITS - bit_shift);
                *limb = (*limb << bit_shift) | carry;
                carry = next;
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }
        let limb_shift = bits / LIMB_BITS;
        if limb_shift != 0 {
            self.limbs.splice(0..0, core::iter::repeat(0).take(limb_shift));
        }
    }
}

impl ShrAssign<usize> for Mpi {
    fn shr_assign(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limb_shift = bits / LIMB_BITS;
        if limb_shift >= self.limbs.len() {
            self.limbs.clear();
            self.negative = false;
            return;
        }
        self.limbs.drain(..limb_shift);

        let bit_shift = bits % LIMB_BITS;
        if bit_shift != 0 {
            let mut carry: Limb = 0;
            for limb in self.limbs.iter_mut().rev() {
                let next = *limb << (LIMB_BITS - bit_shift);
                *limb = (*limb >> bit_shift) | carry;
                carry = next;
            }
        }
        trim_limbs(&mut self.limbs);
        if self.limbs.is_empty() {
            self.negative = false;
        }
    }
}

impl Mpi {
    /// Truncating division: `self = q * divisor + r` with `0 <= |r| < |divisor|`
    /// and `r` carrying `self`'s sign when nonzero.
    ///
    /// Returns [`Error::DivideByZero`] when `divisor` is zero.
    pub fn div_rem(&self, divisor: &Mpi) -> Result<(Mpi, Mpi)> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        let (q, r) = udiv(&self.limbs, &divisor.limbs);
        Ok((
            Mpi::from_sign_limbs(self.negative != divisor.negative, q),
            Mpi::from_sign_limbs(self.negative, r),
        ))
    }

    /// Least non-negative residue of `self` modulo `n` (`n` must be positive).
    pub fn rem_euclid(&self, n: &Mpi) -> Result<Mpi> {
        if n.is_zero() || n.negative {
            return Err(Error::InvalidArgument);
        }
        let (_, r) = self.div_rem(n)?;
        if r.negative {
            Ok(&r + n)
        } else {
            Ok(r)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Mpi {
        Mpi::from_str_radix(s, 16).unwrap()
    }

    fn dec(s: &str) -> Mpi {
        Mpi::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn add_with_carry_chain() {
        let a = Mpi::from(u64::MAX);
        let sum = &a + &Mpi::one();
        assert_eq!(sum.to_str_radix(16).unwrap(), "10000000000000000");
        assert_eq!(&a + &Mpi::zero(), a);
    }

    #[test]
    fn signed_add_sub_dispatch() {
        let five = dec("5");
        let three = dec("3");
        let neg_three = dec("-3");
        let neg_five = dec("-5");

        assert_eq!(&five + &neg_three, dec("2"));
        assert_eq!(&three + &neg_five, dec("-2"));
        assert_eq!(&neg_five + &neg_three, dec("-8"));
        assert_eq!(&three - &five, dec("-2"));
        assert_eq!(&neg_three - &neg_five, dec("2"));
        assert_eq!(&five - &five, Mpi::zero());
        assert_eq!(&neg_five - &three, dec("-8"));
    }

    #[test]
    fn sub_with_borrow_chain() {
        let big = hex("10000000000000000");
        assert_eq!(&big - &Mpi::one(), Mpi::from(u64::MAX));
    }

    #[test]
    fn mul_known_values() {
        assert_eq!(&dec("12345") * &dec("67890"), dec("838102050"));
        assert_eq!(&dec("12345") * &Mpi::zero(), Mpi::zero());
        let max = Mpi::from(u64::MAX);
        assert_eq!(
            (&max * &max).to_str_radix(16).unwrap(),
            "FFFFFFFFFFFFFFFE0000000000000001"
        );
    }

    #[test]
    fn mul_sign_and_commutativity() {
        let a = hex("-1234567890ABCDEF1234567890ABCDEF");
        let b = hex("FEDCBA0987654321");
        let ab = &a * &b;
        assert_eq!(ab, &b * &a);
        assert!(ab.is_negative());
        assert!((&a * &a).sign() > 0);
    }

    #[test]
    fn mul_reference_vector() {
        let a = hex(concat!(
            "EFE021C2645FD1DC586E69184AF4A31E",
            "D5F53E93B5F123FA41680867BA110131",
            "944FE7952E2517337780CB0DB80E61AA",
            "E7C8DDC6C5C6AADEB34EB38A2F40D5E6"
        ));
        let n = hex(concat!(
            "0066A198186C18C10B2F5ED9B522752A",
            "9830B69916E535C8F047518A889A43A5",
            "94B6BED27A168D31D4A52F88925AA8F5"
        ));
        let u = hex(concat!(
            "602AB7ECA597A3D6B56FF9829A5E8B85",
            "9E857EA95A03512E2BAE7391688D264A",
            "A5663B0341DB9CCFD2C4C5F421FEC814",
            "8001B72E848A38CAE1C65F78E56ABDEF",
            "E12D3C039B8A02D6BE593F0BBBDA56F1",
            "ECF677152EF804370C1A305CAF3B5BF1",
            "30879B56C61DE584A0F53A2447A51E"
        ));
        assert_eq!(&a * &n, u);
    }

    #[test]
    fn div_reference_vector() {
        let a = hex(concat!(
            "EFE021C2645FD1DC586E69184AF4A31E",
            "D5F53E93B5F123FA41680867BA110131",
            "944FE7952E2517337780CB0DB80E61AA",
            "E7C8DDC6C5C6AADEB34EB38A2F40D5E6"
        ));
        let n = hex(concat!(
            "0066A198186C18C10B2F5ED9B522752A",
            "9830B69916E535C8F047518A889A43A5",
            "94B6BED27A168D31D4A52F88925AA8F5"
        ));
        let (q, r) = a.div_rem(&n).unwrap();
        assert_eq!(q, hex("256567336059E52CAE22925474705F39A94"));
        assert_eq!(
            r,
            hex(concat!(
                "6613F26162223DF488E9CD48CC132C7A",
                "0AC93C701B001B092E4E5B9F73BCD27B",
                "9EE50D0657C77F374E903CDFA4C642"
            ))
        );
        // the product divided back recovers the multiplicand exactly
        let (q2, r2) = (&a * &n).div_rem(&n).unwrap();
        assert_eq!(q2, a);
        assert!(r2.is_zero());
    }

    #[test]
    fn div_truncates_toward_zero() {
        let cases = [
            ("7", "2", "3", "1"),
            ("-7", "2", "-3", "-1"),
            ("7", "-2", "-3", "1"),
            ("-7", "-2", "3", "-1"),
            ("6", "3", "2", "0"),
            ("2", "7", "0", "2"),
        ];
        for (a, b, q, r) in cases {
            let (quot, rem) = dec(a).div_rem(&dec(b)).unwrap();
            assert_eq!(quot, dec(q), "{a} / {b}");
            assert_eq!(rem, dec(r), "{a} % {b}");
        }
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(Mpi::one().div_rem(&Mpi::zero()), Err(Error::DivideByZero));
    }

    #[test]
    fn div_single_limb_fast_path() {
        let a = hex("123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0");
        let b = Mpi::from(10u64);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(&(&q * &b) + &r, a);
        assert!(r < b);
    }

    #[test]
    fn div_identity_on_wide_operands() {
        let a = hex(concat!(
            "B2E7EFD37075B9F03FF989C7C5051C20",
            "34D2A323810251127E7BF8625A4F49A5",
            "F3E27F4DA8BD59C47D6DAABA4C8127BD",
            "5B5C25763222FEFCCFC38B832366C29E"
        ));
        for div_hex in ["3", "FFFF", "C000DF51A7C77AE8D7C7370C1FF55B69", "1"] {
            let b = hex(div_hex);
            let (q, r) = a.div_rem(&b).unwrap();
            assert_eq!(&(&q * &b) + &r, a, "divisor {div_hex}");
            assert!(r.cmp_abs(&b) == Ordering::Less);
        }
    }

    #[test]
    fn rem_euclid_is_non_negative() {
        let n = dec("7");
        assert_eq!(dec("-1").rem_euclid(&n).unwrap(), dec("6"));
        assert_eq!(dec("13").rem_euclid(&n).unwrap(), dec("6"));
        assert_eq!(dec("-14").rem_euclid(&n).unwrap(), Mpi::zero());
        assert_eq!(dec("3").rem_euclid(&dec("-7")), Err(Error::InvalidArgument));
    }

    #[test]
    fn shifts() {
        let mut v = hex("1");
        v <<= 100;
        assert_eq!(v.bit_len(), 101);
        v >>= 100;
        assert_eq!(v, Mpi::one());

        let mut w = hex("DEADBEEF");
        w <<= 67;
        w >>= 3;
        let mut expect = hex("DEADBEEF");
        expect <<= 64;
        assert_eq!(w, expect);

        let mut gone = hex("FF");
        gone >>= 9;
        assert!(gone.is_zero());
    }

    #[test]
    fn neg_flips_sign() {
        assert_eq!(-Mpi::zero(), Mpi::zero());
        assert_eq!(-dec("5"), dec("-5"));
        assert_eq!(-dec("-5"), dec("5"));
    }
}
