// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;

use crate::error::JwkError;

/// The `crv` values registered for `kty=EC` (RFC 7518 §6.2.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
  P256,
  P384,
  P521,
  Secp256K1,
}

impl EcCurve {
  pub const fn name(self) -> &'static str {
    match self {
      Self::P256 => "P-256",
      Self::P384 => "P-384",
      Self::P521 => "P-521",
      Self::Secp256K1 => "secp256k1",
    }
  }

  /// Size, in bytes, of a single coordinate (`x`/`y`/`d`) for this curve.
  pub const fn coordinate_len(self) -> usize {
    match self {
      Self::P256 => 32,
      Self::P384 => 48,
      Self::P521 => 66,
      Self::Secp256K1 => 32,
    }
  }

  /// OID of this curve, per `spec.md` §4.2.
  pub const fn oid(self) -> &'static str {
    match self {
      Self::P256 => "1.2.840.10045.3.1.7",
      Self::P384 => "1.3.132.0.34",
      Self::P521 => "1.3.132.0.35",
      Self::Secp256K1 => "1.3.132.0.10",
    }
  }

  pub fn from_oid(oid: &str) -> Result<Self, JwkError> {
    match oid {
      "1.2.840.10045.3.1.7" => Ok(Self::P256),
      "1.3.132.0.34" => Ok(Self::P384),
      "1.3.132.0.35" => Ok(Self::P521),
      "1.3.132.0.10" => Ok(Self::Secp256K1),
      other => Err(JwkError::UnrecognizedCurveOid(other.to_owned())),
    }
  }

  pub fn from_name(name: &str) -> Result<Self, JwkError> {
    match name {
      "P-256" => Ok(Self::P256),
      "P-384" => Ok(Self::P384),
      "P-521" => Ok(Self::P521),
      "secp256k1" => Ok(Self::Secp256K1),
      _ => Err(JwkError::InvalidKey("unrecognized EC curve")),
    }
  }
}

/// The `crv` values registered for `kty=OKP` signature keys (RFC 8037 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdCurve {
  Ed25519,
  Ed448,
}

impl EdCurve {
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ed25519 => "Ed25519",
      Self::Ed448 => "Ed448",
    }
  }

  pub fn from_name(name: &str) -> Result<Self, JwkError> {
    match name {
      "Ed25519" => Ok(Self::Ed25519),
      "Ed448" => Ok(Self::Ed448),
      _ => Err(JwkError::InvalidKey("unrecognized Ed curve")),
    }
  }
}

/// The `crv` values registered for `kty=OKP` key-agreement keys (RFC 8037 §3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcxCurve {
  X25519,
  X448,
}

impl EcxCurve {
  pub const fn name(self) -> &'static str {
    match self {
      Self::X25519 => "X25519",
      Self::X448 => "X448",
    }
  }

  pub fn from_name(name: &str) -> Result<Self, JwkError> {
    match name {
      "X25519" => Ok(Self::X25519),
      "X448" => Ok(Self::X448),
      _ => Err(JwkError::InvalidKey("unrecognized X curve")),
    }
  }
}

/// Variant-specific JWK parameters, discriminated by `kty` (RFC 7517 §4, RFC 7518 §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JwkParams {
  Ec(JwkParamsEc),
  Rsa(JwkParamsRsa),
  Oct(JwkParamsOct),
  Okp(JwkParamsOkp),
}

impl From<JwkParamsEc> for JwkParams {
  fn from(params: JwkParamsEc) -> Self {
    Self::Ec(params)
  }
}

impl From<JwkParamsRsa> for JwkParams {
  fn from(params: JwkParamsRsa) -> Self {
    Self::Rsa(params)
  }
}

impl From<JwkParamsOct> for JwkParams {
  fn from(params: JwkParamsOct) -> Self {
    Self::Oct(params)
  }
}

impl From<JwkParamsOkp> for JwkParams {
  fn from(params: JwkParamsOkp) -> Self {
    Self::Okp(params)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkParamsEc {
  pub crv: String,
  pub x: String,
  pub y: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub d: Option<String>,
}

impl JwkParamsEc {
  pub fn try_ec_curve(&self) -> Result<EcCurve, JwkError> {
    EcCurve::from_name(&self.crv)
  }

  /// Strips the private scalar, the RFC 7517 §7 "public projection" for EC keys.
  pub fn to_public(&self) -> Self {
    Self {
      crv: self.crv.clone(),
      x: self.x.clone(),
      y: self.y.clone(),
      d: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkParamsRsa {
  pub n: String,
  pub e: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub d: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub p: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub q: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "dp")]
  pub dp: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "dq")]
  pub dq: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "qi")]
  pub qi: Option<String>,
}

impl JwkParamsRsa {
  pub fn to_public(&self) -> Self {
    Self {
      n: self.n.clone(),
      e: self.e.clone(),
      d: None,
      p: None,
      q: None,
      dp: None,
      dq: None,
      qi: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkParamsOct {
  pub k: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkParamsOkp {
  pub crv: String,
  pub x: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub d: Option<String>,
}

impl JwkParamsOkp {
  pub fn try_ed_curve(&self) -> Result<EdCurve, JwkError> {
    EdCurve::from_name(&self.crv)
  }

  pub fn try_ecx_curve(&self) -> Result<EcxCurve, JwkError> {
    EcxCurve::from_name(&self.crv)
  }

  pub fn to_public(&self) -> Self {
    Self {
      crv: self.crv.clone(),
      x: self.x.clone(),
      d: None,
    }
  }
}
