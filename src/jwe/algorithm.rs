// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The `alg`/`enc`/`zip` values registered for JWE (RFC 7518 §4-5, draft ECDH-1PU) plus their
//! capability metadata (`spec.md` §4.1).

use serde::de::Error as DeError;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// A key-management algorithm: how the CEK is produced or protected for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JweAlgorithm {
  Dir,
  A128KW,
  A192KW,
  A256KW,
  A128GcmKW,
  A192GcmKW,
  A256GcmKW,
  Rsa1_5,
  RsaOaep,
  RsaOaep256,
  Pbes2Hs256A128KW,
  Pbes2Hs384A192KW,
  Pbes2Hs512A256KW,
  EcdhEs,
  EcdhEsA128KW,
  EcdhEsA192KW,
  EcdhEsA256KW,
  Ecdh1PU,
  Ecdh1PUA128KW,
  Ecdh1PUA192KW,
  Ecdh1PUA256KW,
  Custom(String),
}

impl JweAlgorithm {
  pub const ALL: &'static [JweAlgorithm] = &[
    JweAlgorithm::Dir,
    JweAlgorithm::A128KW,
    JweAlgorithm::A192KW,
    JweAlgorithm::A256KW,
    JweAlgorithm::A128GcmKW,
    JweAlgorithm::A192GcmKW,
    JweAlgorithm::A256GcmKW,
    JweAlgorithm::Rsa1_5,
    JweAlgorithm::RsaOaep,
    JweAlgorithm::RsaOaep256,
    JweAlgorithm::Pbes2Hs256A128KW,
    JweAlgorithm::Pbes2Hs384A192KW,
    JweAlgorithm::Pbes2Hs512A256KW,
    JweAlgorithm::EcdhEs,
    JweAlgorithm::EcdhEsA128KW,
    JweAlgorithm::EcdhEsA192KW,
    JweAlgorithm::EcdhEsA256KW,
    JweAlgorithm::Ecdh1PU,
    JweAlgorithm::Ecdh1PUA128KW,
    JweAlgorithm::Ecdh1PUA192KW,
    JweAlgorithm::Ecdh1PUA256KW,
  ];

  pub fn name(&self) -> &str {
    match self {
      Self::Dir => "dir",
      Self::A128KW => "A128KW",
      Self::A192KW => "A192KW",
      Self::A256KW => "A256KW",
      Self::A128GcmKW => "A128GCMKW",
      Self::A192GcmKW => "A192GCMKW",
      Self::A256GcmKW => "A256GCMKW",
      Self::Rsa1_5 => "RSA1_5",
      Self::RsaOaep => "RSA-OAEP",
      Self::RsaOaep256 => "RSA-OAEP-256",
      Self::Pbes2Hs256A128KW => "PBES2-HS256+A128KW",
      Self::Pbes2Hs384A192KW => "PBES2-HS384+A192KW",
      Self::Pbes2Hs512A256KW => "PBES2-HS512+A256KW",
      Self::EcdhEs => "ECDH-ES",
      Self::EcdhEsA128KW => "ECDH-ES+A128KW",
      Self::EcdhEsA192KW => "ECDH-ES+A192KW",
      Self::EcdhEsA256KW => "ECDH-ES+A256KW",
      Self::Ecdh1PU => "ECDH-1PU",
      Self::Ecdh1PUA128KW => "ECDH-1PU+A128KW",
      Self::Ecdh1PUA192KW => "ECDH-1PU+A192KW",
      Self::Ecdh1PUA256KW => "ECDH-1PU+A256KW",
      Self::Custom(name) => name,
    }
  }

  pub fn from_name(name: &str) -> Self {
    match name {
      "dir" => Self::Dir,
      "A128KW" => Self::A128KW,
      "A192KW" => Self::A192KW,
      "A256KW" => Self::A256KW,
      "A128GCMKW" => Self::A128GcmKW,
      "A192GCMKW" => Self::A192GcmKW,
      "A256GCMKW" => Self::A256GcmKW,
      "RSA1_5" => Self::Rsa1_5,
      "RSA-OAEP" => Self::RsaOaep,
      "RSA-OAEP-256" => Self::RsaOaep256,
      "PBES2-HS256+A128KW" => Self::Pbes2Hs256A128KW,
      "PBES2-HS384+A192KW" => Self::Pbes2Hs384A192KW,
      "PBES2-HS512+A256KW" => Self::Pbes2Hs512A256KW,
      "ECDH-ES" => Self::EcdhEs,
      "ECDH-ES+A128KW" => Self::EcdhEsA128KW,
      "ECDH-ES+A192KW" => Self::EcdhEsA192KW,
      "ECDH-ES+A256KW" => Self::EcdhEsA256KW,
      "ECDH-1PU" => Self::Ecdh1PU,
      "ECDH-1PU+A128KW" => Self::Ecdh1PUA128KW,
      "ECDH-1PU+A192KW" => Self::Ecdh1PUA192KW,
      "ECDH-1PU+A256KW" => Self::Ecdh1PUA256KW,
      other => Self::Custom(other.to_owned()),
    }
  }

  pub fn is_direct(&self) -> bool {
    matches!(self, Self::Dir)
  }

  /// ECDH-ES or ECDH-1PU used directly (no key wrap): the CEK *is* the Concat-KDF output.
  pub fn is_direct_agreement(&self) -> bool {
    matches!(self, Self::EcdhEs | Self::Ecdh1PU)
  }

  pub fn is_key_agreement(&self) -> bool {
    matches!(
      self,
      Self::EcdhEs
        | Self::EcdhEsA128KW
        | Self::EcdhEsA192KW
        | Self::EcdhEsA256KW
        | Self::Ecdh1PU
        | Self::Ecdh1PUA128KW
        | Self::Ecdh1PUA192KW
        | Self::Ecdh1PUA256KW
    )
  }

  /// True for the ECDH-1PU family: sender-authenticated one-pass unified key agreement.
  pub fn is_one_pass_unified(&self) -> bool {
    matches!(
      self,
      Self::Ecdh1PU | Self::Ecdh1PUA128KW | Self::Ecdh1PUA192KW | Self::Ecdh1PUA256KW
    )
  }

  /// True for the `+A*KW` agreement variants whose KEK derivation (`spec.md` §4.4 step 4,
  /// 1PU+KW bullet) depends on the content-encryption AEAD tag, forcing content encryption to
  /// happen before key wrapping.
  pub fn is_one_pass_unified_kw(&self) -> bool {
    matches!(self, Self::Ecdh1PUA128KW | Self::Ecdh1PUA192KW | Self::Ecdh1PUA256KW)
  }

  pub fn is_password_based(&self) -> bool {
    matches!(self, Self::Pbes2Hs256A128KW | Self::Pbes2Hs384A192KW | Self::Pbes2Hs512A256KW)
  }

  pub fn is_gcm_key_wrap(&self) -> bool {
    matches!(self, Self::A128GcmKW | Self::A192GcmKW | Self::A256GcmKW)
  }

  pub fn is_rsa(&self) -> bool {
    matches!(self, Self::Rsa1_5 | Self::RsaOaep | Self::RsaOaep256)
  }

  /// Only one recipient is permitted for `dir` and direct key agreement (`spec.md` §4.4 step 3).
  pub fn single_recipient_only(&self) -> bool {
    self.is_direct() || self.is_direct_agreement()
  }

  /// Size, in bits, of the AES-KW key this algorithm wraps the CEK with, where applicable.
  pub fn wrap_key_size_bits(&self) -> Option<usize> {
    match self {
      Self::A128KW | Self::A128GcmKW | Self::EcdhEsA128KW | Self::Ecdh1PUA128KW | Self::Pbes2Hs256A128KW => Some(128),
      Self::A192KW | Self::A192GcmKW | Self::EcdhEsA192KW | Self::Ecdh1PUA192KW | Self::Pbes2Hs384A192KW => Some(192),
      Self::A256KW | Self::A256GcmKW | Self::EcdhEsA256KW | Self::Ecdh1PUA256KW | Self::Pbes2Hs512A256KW => Some(256),
      _ => None,
    }
  }

  /// Digest length, in bytes, of the PRF PBKDF2 runs under for this PBES2 variant.
  pub fn pbes2_prf_hash_len(&self) -> Option<usize> {
    match self {
      Self::Pbes2Hs256A128KW => Some(32),
      Self::Pbes2Hs384A192KW => Some(48),
      Self::Pbes2Hs512A256KW => Some(64),
      _ => None,
    }
  }
}

impl std::fmt::Display for JweAlgorithm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

impl Serialize for JweAlgorithm {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de> Deserialize<'de> for JweAlgorithm {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name: String = String::deserialize(deserializer).map_err(DeError::custom)?;
    Ok(Self::from_name(&name))
  }
}

/// A content-encryption algorithm: the AEAD the plaintext is actually sealed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JweEncryption {
  A128CbcHs256,
  A192CbcHs384,
  A256CbcHs512,
  A128Gcm,
  A192Gcm,
  A256Gcm,
  C20P,
  XC20P,
  Custom(String),
}

impl JweEncryption {
  pub const ALL: &'static [JweEncryption] = &[
    JweEncryption::A128CbcHs256,
    JweEncryption::A192CbcHs384,
    JweEncryption::A256CbcHs512,
    JweEncryption::A128Gcm,
    JweEncryption::A192Gcm,
    JweEncryption::A256Gcm,
    JweEncryption::C20P,
    JweEncryption::XC20P,
  ];

  pub fn name(&self) -> &str {
    match self {
      Self::A128CbcHs256 => "A128CBC-HS256",
      Self::A192CbcHs384 => "A192CBC-HS384",
      Self::A256CbcHs512 => "A256CBC-HS512",
      Self::A128Gcm => "A128GCM",
      Self::A192Gcm => "A192GCM",
      Self::A256Gcm => "A256GCM",
      Self::C20P => "C20P",
      Self::XC20P => "XC20P",
      Self::Custom(name) => name,
    }
  }

  pub fn from_name(name: &str) -> Self {
    match name {
      "A128CBC-HS256" => Self::A128CbcHs256,
      "A192CBC-HS384" => Self::A192CbcHs384,
      "A256CBC-HS512" => Self::A256CbcHs512,
      "A128GCM" => Self::A128Gcm,
      "A192GCM" => Self::A192Gcm,
      "A256GCM" => Self::A256Gcm,
      "C20P" => Self::C20P,
      "XC20P" => Self::XC20P,
      other => Self::Custom(other.to_owned()),
    }
  }

  pub fn is_cbc_hmac(&self) -> bool {
    matches!(self, Self::A128CbcHs256 | Self::A192CbcHs384 | Self::A256CbcHs512)
  }

  pub fn cek_size_bits(&self) -> usize {
    match self {
      Self::A128CbcHs256 => 256,
      Self::A192CbcHs384 => 384,
      Self::A256CbcHs512 => 512,
      Self::A128Gcm => 128,
      Self::A192Gcm => 192,
      Self::A256Gcm | Self::C20P | Self::XC20P => 256,
      Self::Custom(_) => 0,
    }
  }

  pub fn iv_size_bits(&self) -> usize {
    match self {
      Self::A128CbcHs256 | Self::A192CbcHs384 | Self::A256CbcHs512 => 128,
      Self::A128Gcm | Self::A192Gcm | Self::A256Gcm | Self::C20P => 96,
      Self::XC20P => 192,
      Self::Custom(_) => 0,
    }
  }

  pub fn tag_size_bits(&self) -> usize {
    128
  }

  /// Digest length, in bytes, of the HMAC half of a CBC-HS CEK.
  pub fn hmac_hash_len(&self) -> Option<usize> {
    match self {
      Self::A128CbcHs256 => Some(32),
      Self::A192CbcHs384 => Some(48),
      Self::A256CbcHs512 => Some(64),
      _ => None,
    }
  }

  /// Splits a CBC-HS CEK into its `(mac_key, enc_key)` halves (`spec.md` §4.1).
  pub fn split_cbc_hmac_cek<'a>(&self, cek: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
    if !self.is_cbc_hmac() {
      return None;
    }
    let half: usize = cek.len() / 2;
    Some((&cek[..half], &cek[half..]))
  }
}

impl std::fmt::Display for JweEncryption {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

impl Serialize for JweEncryption {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de> Deserialize<'de> for JweEncryption {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name: String = String::deserialize(deserializer).map_err(DeError::custom)?;
    Ok(Self::from_name(&name))
  }
}

/// A compression algorithm (RFC 7516 §4.1.3): only raw DEFLATE is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JweCompression {
  Deflate,
}

impl JweCompression {
  pub fn name(&self) -> &str {
    "DEF"
  }

  pub fn from_name(name: &str) -> Result<Self, crate::error::JweError> {
    match name {
      "DEF" => Ok(Self::Deflate),
      other => Err(crate::error::JweError::UnsupportedAlgorithm(other.to_owned())),
    }
  }
}

impl Serialize for JweCompression {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de> Deserialize<'de> for JweCompression {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name: String = String::deserialize(deserializer).map_err(DeError::custom)?;
    Self::from_name(&name).map_err(DeError::custom)
  }
}
