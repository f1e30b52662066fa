// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The registered JWT claims (RFC 7519 §4.1) plus an open extension map.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// `aud` may be a single string or an array of strings on the wire (RFC 7519 §4.1.3); this
/// normalizes either form into a list.
fn deserialize_aud<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Aud {
    One(String),
    Many(Vec<String>),
  }

  Ok(Option::<Aud>::deserialize(deserializer)?.map(|aud| match aud {
    Aud::One(value) => vec![value],
    Aud::Many(values) => values,
  }))
}

/// The registered claims of RFC 7519 §4.1, plus any private/public claims the caller adds via
/// [`JwtClaims::set_custom`]. `exp`/`nbf`/`iat` are `NumericDate` values: seconds since the Unix
/// epoch (RFC 7519 §2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
  #[serde(skip_serializing_if = "Option::is_none")]
  iss: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  sub: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_aud")]
  aud: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  exp: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  nbf: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  iat: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  jti: Option<String>,
  #[serde(flatten)]
  custom: Map<String, Value>,
}

impl JwtClaims {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn iss(&self) -> Option<&str> {
    self.iss.as_deref()
  }

  pub fn set_iss(&mut self, value: impl Into<String>) -> &mut Self {
    self.iss = Some(value.into());
    self
  }

  pub fn sub(&self) -> Option<&str> {
    self.sub.as_deref()
  }

  pub fn set_sub(&mut self, value: impl Into<String>) -> &mut Self {
    self.sub = Some(value.into());
    self
  }

  /// `aud` (RFC 7519 §4.1.3), always represented as a list even when the wire value is a
  /// single string.
  pub fn aud(&self) -> Option<&[String]> {
    self.aud.as_deref()
  }

  pub fn set_aud(&mut self, value: Vec<String>) -> &mut Self {
    self.aud = Some(value);
    self
  }

  pub fn exp(&self) -> Option<i64> {
    self.exp
  }

  pub fn set_exp(&mut self, value: i64) -> &mut Self {
    self.exp = Some(value);
    self
  }

  pub fn nbf(&self) -> Option<i64> {
    self.nbf
  }

  pub fn set_nbf(&mut self, value: i64) -> &mut Self {
    self.nbf = Some(value);
    self
  }

  pub fn iat(&self) -> Option<i64> {
    self.iat
  }

  pub fn set_iat(&mut self, value: i64) -> &mut Self {
    self.iat = Some(value);
    self
  }

  pub fn jti(&self) -> Option<&str> {
    self.jti.as_deref()
  }

  pub fn set_jti(&mut self, value: impl Into<String>) -> &mut Self {
    self.jti = Some(value.into());
    self
  }

  pub fn custom(&self) -> &Map<String, Value> {
    &self.custom
  }

  pub fn set_custom(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
    self.custom.insert(key.into(), value);
    self
  }
}
