//! Hash algorithm identifiers for PKCS#1 v1.5 signatures.
//!
//! Digest computation itself lives in the `digest`-trait ecosystem (`sha1`,
//! `sha2`, ...); this module only knows each algorithm's output size and the
//! fixed DigestInfo prefix that PKCS#1 v1.5 places in front of the raw digest.

/// A hash algorithm usable in PKCS#1 v1.5 signatures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Hash {
    /// MD5 (legacy; verification of existing signatures only).
    Md5,
    /// SHA-1 (legacy; verification of existing signatures only).
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl Hash {
    /// Digest length in bytes.
    pub fn size(self) -> usize {
        match self {
            Hash::Md5 => 16,
            Hash::Sha1 => 20,
            Hash::Sha224 => 28,
            Hash::Sha256 => 32,
            Hash::Sha384 => 48,
            Hash::Sha512 => 64,
        }
    }

    /// The DER prefix identifying this algorithm inside a DigestInfo block.
    pub fn asn1_prefix(self) -> &'static [u8] {
        match self {
            Hash::Md5 => &[
                0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02,
                0x05, 0x05, 0x00, 0x04, 0x10,
            ],
            Hash::Sha1 => &[
                0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00,
                0x04, 0x14,
            ],
            Hash::Sha224 => &[
                0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x04, 0x05, 0x00, 0x04, 0x1c,
            ],
            Hash::Sha256 => &[
                0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x01, 0x05, 0x00, 0x04, 0x20,
            ],
            Hash::Sha384 => &[
                0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x02, 0x05, 0x00, 0x04, 0x30,
            ],
            Hash::Sha512 => &[
                0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x03, 0x05, 0x00, 0x04, 0x40,
            ],
        }
    }
}

/// Associates a [`digest::Digest`] implementation with its [`Hash`] identifier.
///
/// Enable the `sha1`/`sha2` crate features for impls covering those digest
/// crates.
pub trait AssociatedHash {
    /// The identifier of this digest algorithm.
    const HASH: Hash;
}

#[cfg(feature = "sha1")]
impl AssociatedHash for sha1::Sha1 {
    const HASH: Hash = Hash::Sha1;
}

#[cfg(feature = "sha2")]
impl AssociatedHash for sha2::Sha224 {
    const HASH: Hash = Hash::Sha224;
}

#[cfg(feature = "sha2")]
impl AssociatedHash for sha2::Sha256 {
    const HASH: Hash = Hash::Sha256;
}

#[cfg(feature = "sha2")]
impl AssociatedHash for sha2::Sha384 {
    const HASH: Hash = Hash::Sha384;
}

#[cfg(feature = "sha2")]
impl AssociatedHash for sha2::Sha512 {
    const HASH: Hash = Hash::Sha512;
}
