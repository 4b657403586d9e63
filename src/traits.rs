//! RSA-related trait definitions.

mod keys;
mod padding;

pub use keys::{PrivateKeyParts, PublicKeyParts};
pub use padding::{PaddingScheme, SignatureScheme};
