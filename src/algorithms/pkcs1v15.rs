//! PKCS#1 v1.5 padding as described in [RFC8017 § 7.2 and § 8.2].
//!
//! [RFC8017 § 7.2 and § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Shortest possible padded block: 3 framing bytes plus 8 bytes of PS.
const MIN_PAD_LEN: usize = 11;

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Applies the padding scheme from PKCS#1 v1.5 for encryption. The message
/// must be no longer than the length of the public modulus minus 11 bytes.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + MIN_PAD_LEN > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M
    let mut em = Zeroizing::new(alloc::vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Removes the encryption padding scheme from PKCS#1 v1.5.
///
/// Note that whether this function returns an error or not discloses secret
/// information; protecting decryption against padding oracles is the
/// caller's concern.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    if k < MIN_PAD_LEN || em.len() != k {
        return Err(Error::InvalidPadding);
    }
    if em[0] != 0x00 || em[1] != 0x02 {
        return Err(Error::InvalidPadding);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M with PS at least 8 nonzero bytes
    let separator = em[2..]
        .iter()
        .position(|&b| b == 0x00)
        .ok_or(Error::InvalidPadding)?
        + 2;
    if separator < 2 + 8 {
        return Err(Error::InvalidPadding);
    }

    Ok(em[separator + 1..].to_vec())
}

/// Applies the padding scheme from PKCS#1 v1.5 for signatures.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + MIN_PAD_LEN {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = alloc::vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}
