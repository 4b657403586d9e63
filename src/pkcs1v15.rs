//! PKCS#1 v1.5 support as described in [RFC8017 § 8.2].
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pkcs1-v15-signatures).
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;

use digest::Digest;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::pkcs1v15::{
    pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad, pkcs1v15_sign_pad,
};
use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::hash::{AssociatedHash, Hash};
use crate::key::{self, RsaPrivateKey, RsaPublicKey};
use crate::mpi::Mpi;
use crate::traits::{PaddingScheme, PublicKeyParts, SignatureScheme};

/// Encryption using PKCS#1 v1.5 padding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pkcs1v15Encrypt;

impl PaddingScheme for Pkcs1v15Encrypt {
    fn decrypt(self, priv_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt(priv_key, ciphertext)
    }

    fn encrypt<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        encrypt(rng, pub_key, msg)
    }
}

/// `RSASSA-PKCS1-v1_5`: digital signatures using PKCS#1 v1.5 padding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pkcs1v15Sign {
    /// Length of hash to use.
    pub hash_len: Option<usize>,

    /// DigestInfo prefix.
    pub prefix: &'static [u8],
}

impl Pkcs1v15Sign {
    /// Create new PKCS#1 v1.5 padding for the given digest type.
    ///
    /// The digest must have an [`AssociatedHash`] impl; enable the `sha1` or
    /// `sha2` crate feature for the corresponding digest crates.
    pub fn new<D>() -> Self
    where
        D: Digest + AssociatedHash,
    {
        Self {
            hash_len: Some(<D as Digest>::output_size()),
            prefix: D::HASH.asn1_prefix(),
        }
    }

    /// Create new PKCS#1 v1.5 padding for the given hash identifier.
    pub fn new_with_hash(hash: Hash) -> Self {
        Self {
            hash_len: Some(hash.size()),
            prefix: hash.asn1_prefix(),
        }
    }

    /// Create new PKCS#1 v1.5 padding for computing an unprefixed signature.
    ///
    /// This sets `hash_len` to `None` and uses an empty `prefix`.
    pub fn new_unprefixed() -> Self {
        Self {
            hash_len: None,
            prefix: &[],
        }
    }
}

impl SignatureScheme for Pkcs1v15Sign {
    fn sign(self, priv_key: &RsaPrivateKey, hashed: &[u8]) -> Result<Vec<u8>> {
        if let Some(hash_len) = self.hash_len {
            if hashed.len() != hash_len {
                return Err(Error::InvalidArgument);
            }
        }

        sign(priv_key, self.prefix, hashed)
    }

    fn verify(self, pub_key: &RsaPublicKey, hashed: &[u8], sig: &[u8]) -> Result<()> {
        if let Some(hash_len) = self.hash_len {
            if hashed.len() != hash_len {
                return Err(Error::InvalidArgument);
            }
        }

        verify(pub_key, self.prefix, hashed, sig)
    }
}

/// Encrypts the given message with RSA and the padding
/// scheme from PKCS#1 v1.5. The message must be no longer than the
/// length of the public modulus minus 11 bytes.
#[inline]
fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    pub_key: &RsaPublicKey,
    msg: &[u8],
) -> Result<Vec<u8>> {
    key::check_public(pub_key)?;

    let em = pkcs1v15_encrypt_pad(rng, msg, pub_key.size())?;
    let int = Mpi::from_bytes_be(&em);
    uint_to_be_pad(rsa_encrypt(pub_key, &int)?, pub_key.size())
}

/// Decrypts a plaintext using RSA and the padding scheme from PKCS#1 v1.5.
///
/// The ciphertext must be exactly the key length; note that whether this
/// function returns an error or not discloses secret information, so callers
/// exposed to an attacker-driven oracle must take their own precautions.
#[inline]
fn decrypt(priv_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    key::check_public(priv_key)?;
    if ciphertext.len() != priv_key.size() {
        return Err(Error::InvalidArgument);
    }

    let c = Mpi::from_bytes_be(ciphertext);
    let em = rsa_decrypt(priv_key, &c)?;
    let em = uint_to_zeroizing_be_pad(em, priv_key.size())?;

    pkcs1v15_encrypt_unpad(&em, priv_key.size())
}

/// Calculates the signature of hashed using
/// RSASSA-PKCS1-V1_5-SIGN from RSA PKCS#1 v1.5. Note that `hashed` must
/// be the result of hashing the input message using the given hash
/// function; signing an unhashed message is only supported through
/// [`Pkcs1v15Sign::new_unprefixed`] for interoperability.
#[inline]
fn sign(priv_key: &RsaPrivateKey, prefix: &[u8], hashed: &[u8]) -> Result<Vec<u8>> {
    key::check_public(priv_key)?;

    let em = pkcs1v15_sign_pad(prefix, hashed, priv_key.size())?;
    let m = Mpi::from_bytes_be(&em);
    uint_to_zeroizing_be_pad(rsa_decrypt(priv_key, &m)?, priv_key.size())
}

/// Verifies an RSA PKCS#1 v1.5 signature by recomputing the expected encoded
/// block and requiring a byte-exact match.
#[inline]
fn verify(pub_key: &RsaPublicKey, prefix: &[u8], hashed: &[u8], sig: &[u8]) -> Result<()> {
    key::check_public(pub_key)?;
    if sig.len() != pub_key.size() {
        return Err(Error::InvalidArgument);
    }

    let s = Mpi::from_bytes_be(sig);
    if &s >= pub_key.n() {
        return Err(Error::SignatureMismatch);
    }

    let em = uint_to_be_pad(rsa_encrypt(pub_key, &s)?, pub_key.size())?;
    let expected = pkcs1v15_sign_pad(prefix, hashed, pub_key.size())?;
    if em != expected {
        return Err(Error::SignatureMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use sha1::{Digest, Sha1};

    fn hex(s: &str) -> Mpi {
        Mpi::from_str_radix(s, 16).unwrap()
    }

    fn get_private_key() -> RsaPrivateKey {
        RsaPrivateKey::from_crt_components(
            hex(concat!(
                "9292758453063D803DD603D5E777D788",
                "8ED1D5BF35786190FA2F23EBC0848AEA",
                "DDA92CA6C3D80B32C4D109BE0F36D6AE",
                "7130B9CED7ACDF54CFC7555AC14EEBAB",
                "93A89813FBF3C4F8066D2D800F7C38A8",
                "1AE31942917403FF4946B0A83D3D3E05",
                "EE57C6F5F5606FB5D4BC6CD34EE0801A",
                "5E94BB77B07507233A0BC7BAC8F90F79"
            )),
            hex("10001"),
            hex(concat!(
                "24BF6185468786FDD303083D25E64EFC",
                "66CA472BC44D253102F8B4A9D3BFA750",
                "91386C0077937FE33FA3252D28855837",
                "AE1B484A8A9A45F7EE8C0C634F99E8CD",
                "DF79C5CE07EE72C7F123142198164234",
                "CABB724CF78B8173B9F880FC86322407",
                "AF1FEDFDDE2BEB674CA15F3E81A1521E",
                "071513A1E85B5DFA031F21ECAE91A34D"
            )),
            hex(concat!(
                "C36D0EB7FCD285223CFB5AABA5BDA3D8",
                "2C01CAD19EA484A87EA4377637E75500",
                "FCB2005C5C7DD6EC4AC023CDA285D796",
                "C3D9E75E1EFC42488BB4F1D13AC30A57"
            )),
            hex(concat!(
                "C000DF51A7C77AE8D7C7370C1FF55B69",
                "E211C2B9E5DB1ED0BF61D0D9899620F4",
                "910E4168387E3C30AA1E00C339A79508",
                "8452DD96A9A5EA5D9DCA68DA636032AF"
            )),
            hex(concat!(
                "C1ACF567564274FB07A0BBAD5D26E298",
                "3C94D22288ACD763FD8E5600ED4A702D",
                "F84198A5F06C2E72236AE490C93F07F8",
                "3CC559CD27BC2D1CA488811730BB5725"
            )),
            hex(concat!(
                "4959CBF6F8FEF750AEE6977C155579C7",
                "D8AAEA56749EA28623272E4F7D0592AF",
                "7C1F1313CAC9471B5C523BFE592F517B",
                "407A1BD76C164B93DA2D32A383E58357"
            )),
            hex(concat!(
                "9AE7FBC99546432DF71896FC239EADAE",
                "F38D18D2B2F0E2DD275AA977E2BF4411",
                "F5A3B2A5D33605AEBBCCBA7FEB9F2D2F",
                "A74206CEC169D74BF5A8C50D6F48EA08"
            )),
        )
        .unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_pkcs1v15() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let k = priv_key.size();

        for i in 1..10 {
            let mut input = alloc::vec![0u8; i * 12];
            rng.fill_bytes(&mut input);
            if input.len() > k - 11 {
                input.truncate(k - 11);
            }

            let pub_key: RsaPublicKey = (&priv_key).into();
            let ciphertext = encrypt(&mut rng, &pub_key, &input).unwrap();
            assert_eq!(ciphertext.len(), k);
            assert_ne!(input, ciphertext);

            let plaintext = decrypt(&priv_key, &ciphertext).unwrap();
            assert_eq!(input, plaintext);
        }
    }

    #[test]
    fn test_decrypt_pkcs1v15_nocrt_path() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut priv_key = get_private_key();
        priv_key.clear_precomputed();
        let pub_key: RsaPublicKey = (&priv_key).into();

        let msg = b"both exponentiation paths must agree";
        let ciphertext = encrypt(&mut rng, &pub_key, msg).unwrap();
        assert_eq!(decrypt(&priv_key, &ciphertext).unwrap(), msg);
    }

    #[test]
    fn encrypt_rejects_long_messages() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pub_key: RsaPublicKey = (&get_private_key()).into();
        let too_long = alloc::vec![0xAAu8; pub_key.size() - 10];
        assert_eq!(
            encrypt(&mut rng, &pub_key, &too_long),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn decrypt_rejects_wrong_length_before_arithmetic() {
        let priv_key = get_private_key();
        let short = alloc::vec![1u8; priv_key.size() - 1];
        assert_eq!(decrypt(&priv_key, &short), Err(Error::InvalidArgument));
        let long = alloc::vec![1u8; priv_key.size() + 1];
        assert_eq!(decrypt(&priv_key, &long), Err(Error::InvalidArgument));
    }

    #[test]
    fn test_sign_verify_pkcs1v15() {
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let digest = Sha1::digest(b"Test.\n").to_vec();

        let sig = priv_key
            .sign(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest)
            .unwrap();
        assert_eq!(sig.len(), priv_key.size());

        pub_key
            .verify(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest, &sig)
            .unwrap();

        // a digest of different content must not verify
        let other = Sha1::digest(b"Test?\n").to_vec();
        assert_eq!(
            pub_key.verify(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &other, &sig),
            Err(Error::SignatureMismatch)
        );
    }

    #[test]
    fn test_sign_verify_pkcs1v15_digest_type() {
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let digest = Sha1::digest(b"Test.\n").to_vec();

        // the generic constructor must agree with the identifier one
        assert_eq!(
            Pkcs1v15Sign::new::<Sha1>(),
            Pkcs1v15Sign::new_with_hash(Hash::Sha1)
        );

        let sig = priv_key.sign(Pkcs1v15Sign::new::<Sha1>(), &digest).unwrap();
        pub_key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &sig)
            .unwrap();
    }

    #[test]
    fn bit_flips_break_verification() {
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let digest = Sha1::digest(b"Test.\n").to_vec();
        let sig = priv_key
            .sign(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest)
            .unwrap();

        for pos in [0, sig.len() / 2, sig.len() - 1] {
            let mut bad_sig = sig.clone();
            bad_sig[pos] ^= 1;
            assert_eq!(
                pub_key.verify(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest, &bad_sig),
                Err(Error::SignatureMismatch)
            );
        }

        for pos in [0, digest.len() - 1] {
            let mut bad_digest = digest.clone();
            bad_digest[pos] ^= 1;
            assert_eq!(
                pub_key.verify(
                    Pkcs1v15Sign::new_with_hash(Hash::Sha1),
                    &bad_digest,
                    &sig
                ),
                Err(Error::SignatureMismatch)
            );
        }
    }

    #[test]
    fn verify_rejects_wrong_lengths() {
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let digest = Sha1::digest(b"Test.\n").to_vec();

        let truncated = alloc::vec![0u8; pub_key.size() - 1];
        assert_eq!(
            pub_key.verify(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest, &truncated),
            Err(Error::InvalidArgument)
        );

        // digest length must match the declared hash
        let sig = alloc::vec![0u8; pub_key.size()];
        assert_eq!(
            pub_key.verify(Pkcs1v15Sign::new_with_hash(Hash::Sha1), &digest[1..], &sig),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn test_unpadded_signature() {
        let msg = b"Thu Dec 19 18:06:16 EST 2013\n";
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();

        let sig = priv_key.sign(Pkcs1v15Sign::new_unprefixed(), msg).unwrap();
        pub_key
            .verify(Pkcs1v15Sign::new_unprefixed(), msg, &sig)
            .expect("failed to verify");
    }

    #[test]
    fn sign_rejects_mismatched_digest_length() {
        let priv_key = get_private_key();
        assert_eq!(
            priv_key.sign(Pkcs1v15Sign::new_with_hash(Hash::Sha1), b"too short"),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn sign_rejects_oversized_digest_info() {
        // SHA-512's DigestInfo cannot fit a 1024-bit modulus twice over; fake
        // an oversized digest through the unprefixed mode instead
        let priv_key = get_private_key();
        let huge = alloc::vec![0x5Au8; priv_key.size()];
        assert_eq!(
            priv_key.sign(Pkcs1v15Sign::new_unprefixed(), &huge),
            Err(Error::MessageTooLong)
        );
    }
}
