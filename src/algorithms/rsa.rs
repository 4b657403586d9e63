//! Raw RSA operations: modular exponentiation against the public or private
//! half of a key, with the Chinese remainder shortcut when the private key
//! carries its precomputed values.

use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::mpi::Mpi;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA encryption of m with the public key. No padding is performed.
#[inline]
pub(crate) fn rsa_encrypt(key: &RsaPublicKey, m: &Mpi) -> Result<Mpi> {
    m.exp_mod(key.e(), key.n(), Some(key.rr()))
}

/// Performs raw RSA decryption with no padding, resulting in a plaintext [`Mpi`].
///
/// Uses the CRT recombination `m = m2 + q * (qinv * (m1 - m2) mod p)` when the
/// precomputed values are present, which replaces one full-width
/// exponentiation with two half-width ones; otherwise falls back to
/// `c^d mod n`.
pub(crate) fn rsa_decrypt(priv_key: &RsaPrivateKey, c: &Mpi) -> Result<Mpi> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    match priv_key.precomputed() {
        Some(pre) => {
            let p = priv_key.p();
            let q = priv_key.q();

            let m1 = Zeroizing::new(c.exp_mod(&pre.dp, p, Some(&pre.rr_p))?);
            let m2 = Zeroizing::new(c.exp_mod(&pre.dq, q, Some(&pre.rr_q))?);
            let h = Zeroizing::new((&(&*m1 - &*m2) * &pre.qinv).rem_euclid(p)?);

            Ok(&*m2 + &(&*h * q))
        }
        None => c.exp_mod(priv_key.d(), priv_key.n(), Some(priv_key.rr())),
    }
}
