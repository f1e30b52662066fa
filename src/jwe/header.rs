// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The JWE protected/shared-unprotected/per-recipient header (RFC 7516 §4).

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::jwe::algorithm::JweAlgorithm;
use crate::jwe::algorithm::JweCompression;
use crate::jwe::algorithm::JweEncryption;
use crate::jwk::Jwk;

/// A JOSE header as carried by one layer (protected, shared-unprotected or per-recipient) of a
/// JWE, mirroring [`JwsHeader`](crate::jws::JwsHeader)'s open-map-plus-typed-view shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JweHeader {
  #[serde(skip_serializing_if = "Option::is_none")]
  alg: Option<JweAlgorithm>,
  #[serde(skip_serializing_if = "Option::is_none")]
  enc: Option<JweEncryption>,
  #[serde(skip_serializing_if = "Option::is_none")]
  zip: Option<JweCompression>,
  #[serde(skip_serializing_if = "Option::is_none")]
  jku: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  jwk: Option<Jwk>,
  #[serde(skip_serializing_if = "Option::is_none")]
  kid: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5u: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5c: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5t: Option<String>,
  #[serde(rename = "x5t#S256", skip_serializing_if = "Option::is_none")]
  x5t_s256: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  typ: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  cty: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  crit: Option<Vec<String>>,
  /// The ephemeral public key for ECDH-ES/ECDH-1PU key agreement (RFC 7518 §4.6.1.1).
  #[serde(skip_serializing_if = "Option::is_none")]
  epk: Option<Jwk>,
  /// `PartyUInfo`, base64url-encoded (RFC 7518 §4.6.1.2).
  #[serde(skip_serializing_if = "Option::is_none")]
  apu: Option<String>,
  /// `PartyVInfo`, base64url-encoded (RFC 7518 §4.6.1.3).
  #[serde(skip_serializing_if = "Option::is_none")]
  apv: Option<String>,
  /// Sender's static key id, ECDH-1PU only (draft-madden-jose-ecdh-1pu §2.1).
  #[serde(skip_serializing_if = "Option::is_none")]
  skid: Option<String>,
  /// AES-GCM key-wrap IV, base64url (RFC 7518 §4.7.1.1).
  #[serde(skip_serializing_if = "Option::is_none")]
  iv: Option<String>,
  /// AES-GCM key-wrap authentication tag, base64url (RFC 7518 §4.7.1.2).
  #[serde(skip_serializing_if = "Option::is_none")]
  tag: Option<String>,
  /// PBES2 salt input, base64url (RFC 7518 §4.8.1.1).
  #[serde(skip_serializing_if = "Option::is_none")]
  p2s: Option<String>,
  /// PBES2 iteration count (RFC 7518 §4.8.1.2).
  #[serde(skip_serializing_if = "Option::is_none")]
  p2c: Option<u64>,
  #[serde(flatten)]
  extra: Map<String, Value>,
}

impl JweHeader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn alg(&self) -> Option<&JweAlgorithm> {
    self.alg.as_ref()
  }

  pub fn set_alg(&mut self, alg: JweAlgorithm) -> &mut Self {
    self.alg = Some(alg);
    self
  }

  pub fn enc(&self) -> Option<&JweEncryption> {
    self.enc.as_ref()
  }

  pub fn set_enc(&mut self, enc: JweEncryption) -> &mut Self {
    self.enc = Some(enc);
    self
  }

  pub fn zip(&self) -> Option<JweCompression> {
    self.zip
  }

  pub fn set_zip(&mut self, zip: JweCompression) -> &mut Self {
    self.zip = Some(zip);
    self
  }

  pub fn jku(&self) -> Option<&str> {
    self.jku.as_deref()
  }

  pub fn set_jku(&mut self, value: impl Into<String>) -> &mut Self {
    self.jku = Some(value.into());
    self
  }

  pub fn jwk(&self) -> Option<&Jwk> {
    self.jwk.as_ref()
  }

  pub fn set_jwk(&mut self, value: Jwk) -> &mut Self {
    self.jwk = Some(value);
    self
  }

  pub fn kid(&self) -> Option<&str> {
    self.kid.as_deref()
  }

  pub fn set_kid(&mut self, value: impl Into<String>) -> &mut Self {
    self.kid = Some(value.into());
    self
  }

  pub fn x5u(&self) -> Option<&str> {
    self.x5u.as_deref()
  }

  pub fn set_x5u(&mut self, value: impl Into<String>) -> &mut Self {
    self.x5u = Some(value.into());
    self
  }

  pub fn x5c(&self) -> Option<&[String]> {
    self.x5c.as_deref()
  }

  pub fn set_x5c(&mut self, value: Vec<String>) -> &mut Self {
    self.x5c = Some(value);
    self
  }

  pub fn x5t(&self) -> Option<&str> {
    self.x5t.as_deref()
  }

  pub fn set_x5t(&mut self, value: impl Into<String>) -> &mut Self {
    self.x5t = Some(value.into());
    self
  }

  pub fn x5t_s256(&self) -> Option<&str> {
    self.x5t_s256.as_deref()
  }

  pub fn set_x5t_s256(&mut self, value: impl Into<String>) -> &mut Self {
    self.x5t_s256 = Some(value.into());
    self
  }

  pub fn typ(&self) -> Option<&str> {
    self.typ.as_deref()
  }

  pub fn set_typ(&mut self, value: impl Into<String>) -> &mut Self {
    self.typ = Some(value.into());
    self
  }

  pub fn cty(&self) -> Option<&str> {
    self.cty.as_deref()
  }

  pub fn set_cty(&mut self, value: impl Into<String>) -> &mut Self {
    self.cty = Some(value.into());
    self
  }

  pub fn crit(&self) -> Option<&[String]> {
    self.crit.as_deref()
  }

  pub fn set_crit(&mut self, value: Vec<String>) -> &mut Self {
    self.crit = Some(value);
    self
  }

  pub fn epk(&self) -> Option<&Jwk> {
    self.epk.as_ref()
  }

  pub fn set_epk(&mut self, value: Jwk) -> &mut Self {
    self.epk = Some(value);
    self
  }

  pub fn apu(&self) -> Option<&str> {
    self.apu.as_deref()
  }

  pub fn set_apu(&mut self, value: impl Into<String>) -> &mut Self {
    self.apu = Some(value.into());
    self
  }

  pub fn apv(&self) -> Option<&str> {
    self.apv.as_deref()
  }

  pub fn set_apv(&mut self, value: impl Into<String>) -> &mut Self {
    self.apv = Some(value.into());
    self
  }

  pub fn skid(&self) -> Option<&str> {
    self.skid.as_deref()
  }

  pub fn set_skid(&mut self, value: impl Into<String>) -> &mut Self {
    self.skid = Some(value.into());
    self
  }

  pub fn iv(&self) -> Option<&str> {
    self.iv.as_deref()
  }

  pub fn set_iv(&mut self, value: impl Into<String>) -> &mut Self {
    self.iv = Some(value.into());
    self
  }

  pub fn tag(&self) -> Option<&str> {
    self.tag.as_deref()
  }

  pub fn set_tag(&mut self, value: impl Into<String>) -> &mut Self {
    self.tag = Some(value.into());
    self
  }

  pub fn p2s(&self) -> Option<&str> {
    self.p2s.as_deref()
  }

  pub fn set_p2s(&mut self, value: impl Into<String>) -> &mut Self {
    self.p2s = Some(value.into());
    self
  }

  pub fn p2c(&self) -> Option<u64> {
    self.p2c
  }

  pub fn set_p2c(&mut self, value: u64) -> &mut Self {
    self.p2c = Some(value);
    self
  }

  pub fn extra(&self) -> &Map<String, Value> {
    &self.extra
  }

  pub fn set_extra(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
    self.extra.insert(key.into(), value);
    self
  }
}
