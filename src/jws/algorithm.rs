// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The `alg` values registered for JWS (RFC 7518 §3, RFC 8037 §3.1) plus their
//! signature-shape capabilities (`spec.md` §4.1).

use serde::de::Error as DeError;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// A signing algorithm. `Custom` carries through any `alg` value this registry does not know
/// about so that a caller-supplied signer/verifier collaborator can still dispatch on it
/// (`spec.md` §9 calls out the source's many overloaded entry points; this is the minimal
/// open extension point a closed `enum` needs to stay closed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JwsAlgorithm {
  HS256,
  HS384,
  HS512,
  RS256,
  RS384,
  RS512,
  PS256,
  PS384,
  PS512,
  ES256,
  ES384,
  ES512,
  ES256K,
  EdDSA,
  /// `alg=none`: an explicitly unsigned JWS (RFC 7515 §6). Never accepted by [`Decoder`](crate::jws::Decoder)
  /// unless the caller opts in.
  None_,
  Custom(String),
}

impl JwsAlgorithm {
  /// Every non-`Custom` variant, for exhaustive test sweeps.
  pub const ALL: &'static [JwsAlgorithm] = &[
    JwsAlgorithm::HS256,
    JwsAlgorithm::HS384,
    JwsAlgorithm::HS512,
    JwsAlgorithm::RS256,
    JwsAlgorithm::RS384,
    JwsAlgorithm::RS512,
    JwsAlgorithm::PS256,
    JwsAlgorithm::PS384,
    JwsAlgorithm::PS512,
    JwsAlgorithm::ES256,
    JwsAlgorithm::ES384,
    JwsAlgorithm::ES512,
    JwsAlgorithm::ES256K,
    JwsAlgorithm::EdDSA,
    JwsAlgorithm::None_,
  ];

  pub fn name(&self) -> &str {
    match self {
      Self::HS256 => "HS256",
      Self::HS384 => "HS384",
      Self::HS512 => "HS512",
      Self::RS256 => "RS256",
      Self::RS384 => "RS384",
      Self::RS512 => "RS512",
      Self::PS256 => "PS256",
      Self::PS384 => "PS384",
      Self::PS512 => "PS512",
      Self::ES256 => "ES256",
      Self::ES384 => "ES384",
      Self::ES512 => "ES512",
      Self::ES256K => "ES256K",
      Self::EdDSA => "EdDSA",
      Self::None_ => "none",
      Self::Custom(name) => name,
    }
  }

  pub fn from_name(name: &str) -> Self {
    match name {
      "HS256" => Self::HS256,
      "HS384" => Self::HS384,
      "HS512" => Self::HS512,
      "RS256" => Self::RS256,
      "RS384" => Self::RS384,
      "RS512" => Self::RS512,
      "PS256" => Self::PS256,
      "PS384" => Self::PS384,
      "PS512" => Self::PS512,
      "ES256" => Self::ES256,
      "ES384" => Self::ES384,
      "ES512" => Self::ES512,
      "ES256K" => Self::ES256K,
      "EdDSA" => Self::EdDSA,
      "none" => Self::None_,
      other => Self::Custom(other.to_owned()),
    }
  }

  /// Length, in bytes, of the IEEE P1363 `r‖s` signature this algorithm produces, for the
  /// ECDSA family (`spec.md` §4.1: "fixed size 64/96/132").
  pub fn ecdsa_signature_len(&self) -> Option<usize> {
    match self {
      Self::ES256 | Self::ES256K => Some(64),
      Self::ES384 => Some(96),
      Self::ES512 => Some(132),
      _ => None,
    }
  }

  /// Digest length, in bytes, of the hash this algorithm's signature scheme is built on.
  pub fn hash_len(&self) -> Option<usize> {
    match self {
      Self::HS256 | Self::RS256 | Self::PS256 | Self::ES256 | Self::ES256K | Self::EdDSA => Some(32),
      Self::HS384 | Self::RS384 | Self::PS384 | Self::ES384 => Some(48),
      Self::HS512 | Self::RS512 | Self::PS512 | Self::ES512 => Some(64),
      Self::None_ | Self::Custom(_) => None,
    }
  }

  pub fn is_none(&self) -> bool {
    matches!(self, Self::None_)
  }
}

impl std::fmt::Display for JwsAlgorithm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

impl Serialize for JwsAlgorithm {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de> Deserialize<'de> for JwsAlgorithm {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name: String = String::deserialize(deserializer).map_err(DeError::custom)?;
    Ok(Self::from_name(&name))
  }
}
