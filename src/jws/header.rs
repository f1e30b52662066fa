// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The JWS protected/unprotected header (RFC 7515 §4).

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::jwk::Jwk;
use crate::jws::algorithm::JwsAlgorithm;

/// A JOSE header as carried by a JWS: the registered members of RFC 7515 §4 as a typed view,
/// plus an open `extra` map for anything this registry does not know about (`spec.md` §9's
/// "header as an open map plus a strongly typed view").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwsHeader {
  #[serde(skip_serializing_if = "Option::is_none")]
  alg: Option<JwsAlgorithm>,
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
  #[serde(skip_serializing_if = "Option::is_none")]
  b64: Option<bool>,
  #[serde(flatten)]
  extra: Map<String, Value>,
}

impl JwsHeader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn alg(&self) -> Option<&JwsAlgorithm> {
    self.alg.as_ref()
  }

  pub fn set_alg(&mut self, alg: JwsAlgorithm) -> &mut Self {
    self.alg = Some(alg);
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

  pub fn b64(&self) -> Option<bool> {
    self.b64
  }

  pub fn set_b64(&mut self, value: bool) -> &mut Self {
    self.b64 = Some(value);
    self
  }

  /// True iff `b64=false` and `b64` is named in `crit`, the RFC 7797 unencoded-payload case.
  pub fn is_unencoded_payload(&self) -> bool {
    self.b64 == Some(false)
  }

  pub fn extra(&self) -> &Map<String, Value> {
    &self.extra
  }

  pub fn set_extra(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
    self.extra.insert(key.into(), value);
    self
  }
}
