//! RSA key types.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::mpi::Mpi;
use crate::traits::{PaddingScheme, PrivateKeyParts, PublicKeyParts, SignatureScheme};

/// Modulus sizes accepted by the key checks, in bits.
const MIN_MODULUS_BITS: usize = 128;
const MAX_MODULUS_BITS: usize = 4096;

/// Fixed plaintext for the private-key round-trip check.
const VALIDATION_PROBE: u64 = 0xABCD_EF01_2345_6789;

/// Represents the public part of an RSA key.
#[derive(Clone, Debug)]
pub struct RsaPublicKey {
    n: Mpi,
    e: Mpi,
    /// Modulus length in bytes, fixed at construction.
    len: usize,
    /// Cached `R^2 mod N`; zero when N does not admit Montgomery reduction.
    rr: Mpi,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone, Debug)]
pub struct RsaPrivateKey {
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: Mpi,
    /// First prime factor of N
    p: Mpi,
    /// Second prime factor of N
    q: Mpi,
    /// Precomputed values to speed up private operations
    precomputed: Option<PrecomputedValues>,
}

/// Chinese-remainder exponents and coefficients plus the Montgomery constants
/// for both primes.
#[derive(Clone, Debug)]
pub(crate) struct PrecomputedValues {
    /// D mod (P-1)
    pub(crate) dp: Mpi,
    /// D mod (Q-1)
    pub(crate) dq: Mpi,
    /// Q^-1 mod P
    pub(crate) qinv: Mpi,
    /// R^2 mod P
    pub(crate) rr_p: Mpi,
    /// R^2 mod Q
    pub(crate) rr_q: Mpi,
}

impl RsaPublicKey {
    /// Create a public key from the modulus and public exponent, running the
    /// consistency checks of [`RsaPublicKey::validate`].
    pub fn new(n: Mpi, e: Mpi) -> Result<Self> {
        let key = Self::new_unchecked(n, e);
        key.validate()?;
        Ok(key)
    }

    /// Create a public key without checking it.
    pub fn new_unchecked(n: Mpi, e: Mpi) -> Self {
        let len = n.byte_len();
        let rr = Mpi::mont_rr(&n).unwrap_or_default();
        RsaPublicKey { n, e, len, rr }
    }

    /// Check the key: N odd and of a sane size, E odd with `1 < E < N`, and
    /// the recorded byte length matching N. Returns [`Error::InvalidKey`] on
    /// any failure.
    pub fn validate(&self) -> Result<()> {
        check_public(self)
    }

    pub(crate) fn rr(&self) -> &Mpi {
        &self.rr
    }

    /// Encrypt the given message.
    pub fn encrypt<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        padding.encrypt(rng, self, msg)
    }

    /// Verify a signed message.
    ///
    /// `hashed` must be the result of hashing the input using the hashing
    /// function identified by the scheme. Returns `Ok(())` when the signature
    /// is valid.
    pub fn verify<S: SignatureScheme>(&self, scheme: S, hashed: &[u8], sig: &[u8]) -> Result<()> {
        scheme.verify(self, hashed, sig)
    }
}

impl PartialEq for RsaPublicKey {
    fn eq(&self, other: &RsaPublicKey) -> bool {
        self.n == other.n && self.e == other.e
    }
}

impl Eq for RsaPublicKey {}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &Mpi {
        &self.n
    }

    fn e(&self) -> &Mpi {
        &self.e
    }

    fn size(&self) -> usize {
        self.len
    }
}

/// Check the public half of a key before using it for an operation.
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    let n = public_key.n();
    let e = public_key.e();
    let bits = n.bit_len();
    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits)
        || n.byte_len() != public_key.size()
        || !n.is_odd()
        || !e.is_odd()
        || *e <= Mpi::one()
        || e >= n
    {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

impl RsaPrivateKey {
    /// Construct a private key from the modulus, both exponents, and the two
    /// prime factors, deriving the CRT exponents and coefficient.
    pub fn from_components(n: Mpi, e: Mpi, d: Mpi, p: Mpi, q: Mpi) -> Result<RsaPrivateKey> {
        let pubkey_components = RsaPublicKey::new(n, e)?;
        let mut key = RsaPrivateKey {
            pubkey_components,
            d,
            p,
            q,
            precomputed: None,
        };
        key.precompute()?;
        Ok(key)
    }

    /// Construct a private key from the full externally-supplied eight-integer
    /// form: modulus, both exponents, primes, CRT exponents `dp = d mod (p-1)`
    /// and `dq = d mod (q-1)`, and CRT coefficient `qp = q^-1 mod p`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_crt_components(
        n: Mpi,
        e: Mpi,
        d: Mpi,
        p: Mpi,
        q: Mpi,
        dp: Mpi,
        dq: Mpi,
        qp: Mpi,
    ) -> Result<RsaPrivateKey> {
        let pubkey_components = RsaPublicKey::new(n, e)?;
        let rr_p = Mpi::mont_rr(&p).map_err(|_| Error::KeyValidation)?;
        let rr_q = Mpi::mont_rr(&q).map_err(|_| Error::KeyValidation)?;
        Ok(RsaPrivateKey {
            pubkey_components,
            d,
            p,
            q,
            precomputed: Some(PrecomputedValues {
                dp,
                dq,
                qinv: qp,
                rr_p,
                rr_q,
            }),
        })
    }

    /// Construct a private key without checking it or deriving the CRT
    /// values; [`RsaPrivateKey::precompute`] can be called afterwards.
    pub fn from_components_unchecked(n: Mpi, e: Mpi, d: Mpi, p: Mpi, q: Mpi) -> RsaPrivateKey {
        RsaPrivateKey {
            pubkey_components: RsaPublicKey::new_unchecked(n, e),
            d,
            p,
            q,
            precomputed: None,
        }
    }

    /// Performs some calculations to speed up private key operations.
    pub fn precompute(&mut self) -> Result<()> {
        if self.precomputed.is_some() {
            return Ok(());
        }

        let one = Mpi::one();
        let p1 = &self.p - &one;
        let q1 = &self.q - &one;
        let dp = self.d.rem_euclid(&p1).map_err(|_| Error::KeyValidation)?;
        let dq = self.d.rem_euclid(&q1).map_err(|_| Error::KeyValidation)?;
        let qinv = self.q.inv_mod(&self.p).map_err(|_| Error::KeyValidation)?;
        let rr_p = Mpi::mont_rr(&self.p).map_err(|_| Error::KeyValidation)?;
        let rr_q = Mpi::mont_rr(&self.q).map_err(|_| Error::KeyValidation)?;

        self.precomputed = Some(PrecomputedValues {
            dp,
            dq,
            qinv,
            rr_p,
            rr_q,
        });
        Ok(())
    }

    /// Clears precomputed values, forcing private operations onto the plain
    /// (non-CRT) exponentiation path.
    pub fn clear_precomputed(&mut self) {
        self.precomputed = None;
    }

    /// Check the private key: the public checks, `P * Q == N`, and an
    /// encrypt-then-decrypt round trip on a fixed probe value through the
    /// full exponents. Returns [`Error::KeyValidation`] on any mismatch.
    pub fn validate(&self) -> Result<()> {
        self.pubkey_components
            .validate()
            .map_err(|_| Error::KeyValidation)?;

        if &(&self.p * &self.q) != self.n() {
            return Err(Error::KeyValidation);
        }

        let x = Mpi::from(VALIDATION_PROBE);
        let rr = self.pubkey_components.rr();
        let c = x
            .exp_mod(self.e(), self.n(), Some(rr))
            .map_err(|_| Error::KeyValidation)?;
        let m = c
            .exp_mod(&self.d, self.n(), Some(rr))
            .map_err(|_| Error::KeyValidation)?;
        if m != x {
            return Err(Error::KeyValidation);
        }
        Ok(())
    }

    /// Get the public key half.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    pub(crate) fn precomputed(&self) -> Option<&PrecomputedValues> {
        self.precomputed.as_ref()
    }

    pub(crate) fn rr(&self) -> &Mpi {
        self.pubkey_components.rr()
    }

    /// Decrypt the given message.
    pub fn decrypt<P: PaddingScheme>(&self, padding: P, ciphertext: &[u8]) -> Result<Vec<u8>> {
        padding.decrypt(self, ciphertext)
    }

    /// Sign the given digest.
    pub fn sign<S: SignatureScheme>(&self, padding: S, digest_in: &[u8]) -> Result<Vec<u8>> {
        padding.sign(self, digest_in)
    }
}

impl PartialEq for RsaPrivateKey {
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl Eq for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &Mpi {
        self.pubkey_components.n()
    }

    fn e(&self) -> &Mpi {
        self.pubkey_components.e()
    }

    fn size(&self) -> usize {
        self.pubkey_components.size()
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &Mpi {
        &self.d
    }

    fn p(&self) -> &Mpi {
        &self.p
    }

    fn q(&self) -> &Mpi {
        &self.q
    }

    fn dp(&self) -> Option<&Mpi> {
        self.precomputed.as_ref().map(|pre| &pre.dp)
    }

    fn dq(&self) -> Option<&Mpi> {
        self.precomputed.as_ref().map(|pre| &pre.dq)
    }

    fn qinv(&self) -> Option<&Mpi> {
        self.precomputed.as_ref().map(|pre| &pre.qinv)
    }
}

impl Zeroize for PrecomputedValues {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
        self.rr_p.zeroize();
        self.rr_q.zeroize();
    }
}

impl Drop for PrecomputedValues {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.precomputed = None;
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}
