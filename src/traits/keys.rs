//! Traits related to the key components

use crate::mpi::Mpi;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &Mpi;

    /// Returns the public exponent of the key.
    fn e(&self) -> &Mpi;

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// or by this public key will have the same size.
    fn size(&self) -> usize {
        self.n().byte_len()
    }
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &Mpi;

    /// Returns the first prime factor of the modulus.
    fn p(&self) -> &Mpi;

    /// Returns the second prime factor of the modulus.
    fn q(&self) -> &Mpi;

    /// Returns the precomputed dp value, D mod (P-1)
    fn dp(&self) -> Option<&Mpi>;

    /// Returns the precomputed dq value, D mod (Q-1)
    fn dq(&self) -> Option<&Mpi>;

    /// Returns the precomputed qinv value, Q^-1 mod P
    fn qinv(&self) -> Option<&Mpi>;
}
