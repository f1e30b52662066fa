// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;

use crate::jwk::key::Jwk;

/// A JWK Set (RFC 7517 §5): `{"keys": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
  keys: Vec<Jwk>,
}

impl JwkSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Jwk> {
    self.keys.iter()
  }

  pub fn push(&mut self, jwk: Jwk) {
    self.keys.push(jwk);
  }

  pub fn get_by_kid(&self, kid: &str) -> Option<&Jwk> {
    self.keys.iter().find(|jwk| jwk.kid() == Some(kid))
  }

  pub fn get_by_thumbprint(&self, thumbprint_b64: &str) -> Option<&Jwk> {
    self.keys.iter().find(|jwk| jwk.thumbprint_sha256_b64() == thumbprint_b64)
  }
}

impl<'a> IntoIterator for &'a JwkSet {
  type Item = &'a Jwk;
  type IntoIter = std::slice::Iter<'a, Jwk>;

  fn into_iter(self) -> Self::IntoIter {
    self.keys.iter()
  }
}

impl FromIterator<Jwk> for JwkSet {
  fn from_iter<T: IntoIterator<Item = Jwk>>(iter: T) -> Self {
    Self {
      keys: iter.into_iter().collect(),
    }
  }
}
