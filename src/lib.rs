#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

//! Pure Rust RSA (PKCS#1 v1.5) built on a self-contained multi-precision
//! integer engine.
//!
//! Keys are supplied as their raw integer components (typically hex strings);
//! there is no key generation and no ASN.1/PEM layer. The [`Mpi`] type and
//! its modular arithmetic are part of the public API, so the crate doubles as
//! a small bignum library.
//!
//! # Usage
//!
//! ## PKCS#1 v1.5 encryption
//!
//! ```
//! use rsalite::{Mpi, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
//!
//! # fn main() -> rsalite::Result<()> {
//! let private_key = RsaPrivateKey::from_components(
//!     Mpi::from_str_radix(
//!         concat!(
//!             "9292758453063D803DD603D5E777D7888ED1D5BF35786190FA2F23EBC0848AEA",
//!             "DDA92CA6C3D80B32C4D109BE0F36D6AE7130B9CED7ACDF54CFC7555AC14EEBAB",
//!             "93A89813FBF3C4F8066D2D800F7C38A81AE31942917403FF4946B0A83D3D3E05",
//!             "EE57C6F5F5606FB5D4BC6CD34EE0801A5E94BB77B07507233A0BC7BAC8F90F79"
//!         ),
//!         16,
//!     )?,
//!     Mpi::from_str_radix("10001", 16)?,
//!     Mpi::from_str_radix(
//!         concat!(
//!             "24BF6185468786FDD303083D25E64EFC66CA472BC44D253102F8B4A9D3BFA750",
//!             "91386C0077937FE33FA3252D28855837AE1B484A8A9A45F7EE8C0C634F99E8CD",
//!             "DF79C5CE07EE72C7F123142198164234CABB724CF78B8173B9F880FC86322407",
//!             "AF1FEDFDDE2BEB674CA15F3E81A1521E071513A1E85B5DFA031F21ECAE91A34D"
//!         ),
//!         16,
//!     )?,
//!     Mpi::from_str_radix(
//!         concat!(
//!             "C36D0EB7FCD285223CFB5AABA5BDA3D82C01CAD19EA484A87EA4377637E75500",
//!             "FCB2005C5C7DD6EC4AC023CDA285D796C3D9E75E1EFC42488BB4F1D13AC30A57"
//!         ),
//!         16,
//!     )?,
//!     Mpi::from_str_radix(
//!         concat!(
//!             "C000DF51A7C77AE8D7C7370C1FF55B69E211C2B9E5DB1ED0BF61D0D9899620F4",
//!             "910E4168387E3C30AA1E00C339A795088452DD96A9A5EA5D9DCA68DA636032AF"
//!         ),
//!         16,
//!     )?,
//! )?;
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! // Encrypt
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let data = b"hello world";
//! let enc_data = public_key.encrypt(&mut rng, Pkcs1v15Encrypt, &data[..])?;
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = private_key.decrypt(Pkcs1v15Encrypt, &enc_data)?;
//! assert_eq!(&data[..], &dec_data[..]);
//! # Ok(())
//! # }
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! Signing takes a precomputed digest plus the identifier of the algorithm
//! that produced it:
//!
#![cfg_attr(feature = "sha1", doc = "```")]
#![cfg_attr(not(feature = "sha1"), doc = "```ignore")]
//! use rsalite::Pkcs1v15Sign;
//! use sha1::{Digest, Sha1};
//!
//! # fn main() -> rsalite::Result<()> {
//! # let private_key = doctest_key::private_key()?;
//! # let public_key = rsalite::RsaPublicKey::from(&private_key);
//! let digest = Sha1::digest(b"important message").to_vec();
//! let signature = private_key.sign(Pkcs1v15Sign::new::<Sha1>(), &digest)?;
//!
//! public_key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)?;
//! # Ok(())
//! # }
//! # mod doctest_key {
//! #     use rsalite::{Mpi, Result, RsaPrivateKey};
//! #     pub fn private_key() -> Result<RsaPrivateKey> {
//! #         RsaPrivateKey::from_components(
//! #             Mpi::from_str_radix(concat!(
//! #                 "9292758453063D803DD603D5E777D7888ED1D5BF35786190FA2F23EBC0848AEA",
//! #                 "DDA92CA6C3D80B32C4D109BE0F36D6AE7130B9CED7ACDF54CFC7555AC14EEBAB",
//! #                 "93A89813FBF3C4F8066D2D800F7C38A81AE31942917403FF4946B0A83D3D3E05",
//! #                 "EE57C6F5F5606FB5D4BC6CD34EE0801A5E94BB77B07507233A0BC7BAC8F90F79"
//! #             ), 16)?,
//! #             Mpi::from_str_radix("10001", 16)?,
//! #             Mpi::from_str_radix(concat!(
//! #                 "24BF6185468786FDD303083D25E64EFC66CA472BC44D253102F8B4A9D3BFA750",
//! #                 "91386C0077937FE33FA3252D28855837AE1B484A8A9A45F7EE8C0C634F99E8CD",
//! #                 "DF79C5CE07EE72C7F123142198164234CABB724CF78B8173B9F880FC86322407",
//! #                 "AF1FEDFDDE2BEB674CA15F3E81A1521E071513A1E85B5DFA031F21ECAE91A34D"
//! #             ), 16)?,
//! #             Mpi::from_str_radix(concat!(
//! #                 "C36D0EB7FCD285223CFB5AABA5BDA3D82C01CAD19EA484A87EA4377637E75500",
//! #                 "FCB2005C5C7DD6EC4AC023CDA285D796C3D9E75E1EFC42488BB4F1D13AC30A57"
//! #             ), 16)?,
//! #             Mpi::from_str_radix(concat!(
//! #                 "C000DF51A7C77AE8D7C7370C1FF55B69E211C2B9E5DB1ED0BF61D0D9899620F4",
//! #                 "910E4168387E3C30AA1E00C339A795088452DD96A9A5EA5D9DCA68DA636032AF"
//! #             ), 16)?,
//! #         )
//! #     }
//! # }
//! ```

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use rand_core;
#[cfg(feature = "sha1")]
pub use sha1;
#[cfg(feature = "sha2")]
pub use sha2;

mod algorithms;
pub mod errors;
pub mod hash;
pub mod mpi;
pub mod pkcs1v15;
pub mod traits;

mod key;

pub use crate::{
    errors::{Error, Result},
    hash::Hash,
    key::{RsaPrivateKey, RsaPublicKey},
    mpi::Mpi,
    pkcs1v15::{Pkcs1v15Encrypt, Pkcs1v15Sign},
};
