//! Internal algorithm implementations: padding codecs and the raw RSA
//! operations they feed.

pub(crate) mod pad;
pub(crate) mod pkcs1v15;
pub(crate) mod rsa;
