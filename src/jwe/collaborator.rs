// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The cryptographic collaborator seam for JWE (`spec.md` §6). Every primitive that moves
//! secret bytes through an actual cipher, KDF, or key-agreement routine is supplied by the
//! caller; this crate only ever sequences calls to it and never links a crypto backend of its
//! own, with the single exception of DEFLATE/INFLATE (`spec.md` §9: "Deflate collaborator
//! default"), whose default implementation below is backed by `miniz_oxide`, a dependency this
//! crate already carries for byte-exact RFC 7516 §4.1.3 compression.

use crate::error::JweError;
use crate::jwe::algorithm::JweAlgorithm;
use crate::jwe::algorithm::JweEncryption;
use crate::jwk::Jwk;

/// The ciphertext and authentication tag produced by one AEAD seal.
pub struct AeadSealed {
  pub ciphertext: Vec<u8>,
  pub tag: Vec<u8>,
}

/// Every cryptographic primitive the JWE pipeline needs but does not implement itself.
///
/// Implementors typically wrap a handful of RustCrypto crates (`aes-gcm`, `aes-kw`, `rsa`,
/// `p256`/`x25519-dalek`, `hkdf`/`sha2`, `pbkdf2`) behind these methods; none of those crates
/// are a dependency of this crate itself.
pub trait JweCollaborator {
  /// Cryptographically secure random bytes, used for CEKs, IVs and PBES2 salts.
  fn random_bytes(&self, len: usize) -> Vec<u8>;

  /// Seals `plaintext` under `cek` with the content-encryption algorithm `enc`.
  fn aead_encrypt(&self, enc: &JweEncryption, cek: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<AeadSealed, JweError>;

  /// Opens a content-encryption ciphertext back into plaintext.
  fn aead_decrypt(&self, enc: &JweEncryption, cek: &[u8], iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError>;

  /// Wraps `cek` under `kek` for a symmetric (AES-KW) or asymmetric (RSA) key-management
  /// algorithm. `kek` is an oct `Jwk` for AES-KW/PBES2-derived keys, or the recipient's RSA
  /// public `Jwk` for `RSA1_5`/`RSA-OAEP`/`RSA-OAEP-256`.
  fn key_wrap(&self, alg: &JweAlgorithm, kek: &Jwk, cek: &[u8]) -> Result<Vec<u8>, JweError>;

  /// Unwraps an `encrypted_key` back into the CEK.
  fn key_unwrap(&self, alg: &JweAlgorithm, kek: &Jwk, encrypted_key: &[u8]) -> Result<Vec<u8>, JweError>;

  /// AES-GCM key wrap (RFC 7518 §4.7): wraps `cek` under `kek`, returning `(wrapped, tag)`.
  fn gcm_key_wrap(&self, alg: &JweAlgorithm, kek: &Jwk, cek: &[u8], iv: &[u8]) -> Result<(Vec<u8>, Vec<u8>), JweError>;

  /// AES-GCM key unwrap, the inverse of [`JweCollaborator::gcm_key_wrap`].
  fn gcm_key_unwrap(&self, alg: &JweAlgorithm, kek: &Jwk, wrapped: &[u8], iv: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError>;

  /// ECDH key agreement producing the raw shared secret `Z` between `private_key` and
  /// `public_key`. For ECDH-1PU, called once for the ephemeral pair and once for the static
  /// sender/recipient pair; the core concatenates the two `Z` values itself.
  fn key_agreement(&self, private_key: &Jwk, public_key: &Jwk) -> Result<Vec<u8>, JweError>;

  /// Generates a fresh ephemeral key on the same curve/subtype as `like` (its public part only
  /// is read), for ECDH-ES/ECDH-1PU when the caller does not supply one.
  fn generate_ephemeral_key(&self, like: &Jwk) -> Result<Jwk, JweError>;

  /// Concat-KDF (NIST SP 800-56A §5.8.1) producing `keylen_bytes` of key material from `z` and
  /// the pre-assembled `OtherInfo` octets.
  fn concat_kdf(&self, hash_len: usize, z: &[u8], other_info: &[u8], keylen_bytes: usize) -> Result<Vec<u8>, JweError>;

  /// PBKDF2 (RFC 7518 §4.8) deriving `key_len_bytes` of key material from `password` and `salt`.
  fn pbkdf2(&self, password: &[u8], salt: &[u8], iterations: u32, key_len_bytes: usize) -> Result<Vec<u8>, JweError>;

  /// Raw DEFLATE (RFC 1951) compression, used when `zip=DEF`. Defaults to `miniz_oxide`.
  fn deflate(&self, data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec(data, 6)
  }

  /// The inverse of [`JweCollaborator::deflate`].
  fn inflate(&self, data: &[u8]) -> Result<Vec<u8>, JweError> {
    miniz_oxide::inflate::decompress_to_vec(data).map_err(|_| JweError::CompressionFailed("DEFLATE inflation failed".to_owned()))
  }
}
