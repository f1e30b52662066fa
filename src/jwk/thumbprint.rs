// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! RFC 7638 JWK thumbprint.
//!
//! The thumbprint hash itself (SHA-256 by default) is a fixed, non-negotiable digest rather
//! than a pluggable security primitive, so — mirroring the teacher crate's own direct
//! dependency on a "sha" feature for this exact purpose — it is computed in-crate instead of
//! through a collaborator closure.

use serde_json::Map;
use serde_json::Value;
use sha2::Digest;
use sha2::Sha256;

use crate::jwk::key::Jwk;
use crate::jwk::params::JwkParams;
use crate::jwu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbprintHash {
  Sha256,
}

/// Builds the canonical JSON object containing only the `kty`-required members, per RFC 7638 §3.
fn required_members(jwk: &Jwk) -> Map<String, Value> {
  let mut map: Map<String, Value> = Map::new();

  match jwk.params() {
    JwkParams::Ec(params) => {
      map.insert("crv".into(), Value::String(params.crv.clone()));
      map.insert("kty".into(), Value::String("EC".into()));
      map.insert("x".into(), Value::String(params.x.clone()));
      map.insert("y".into(), Value::String(params.y.clone()));
    }
    JwkParams::Rsa(params) => {
      map.insert("e".into(), Value::String(params.e.clone()));
      map.insert("kty".into(), Value::String("RSA".into()));
      map.insert("n".into(), Value::String(params.n.clone()));
    }
    JwkParams::Oct(params) => {
      map.insert("k".into(), Value::String(params.k.clone()));
      map.insert("kty".into(), Value::String("oct".into()));
    }
    JwkParams::Okp(params) => {
      map.insert("crv".into(), Value::String(params.crv.clone()));
      map.insert("kty".into(), Value::String("OKP".into()));
      map.insert("x".into(), Value::String(params.x.clone()));
    }
  }

  map
}

/// Serializes `members` with lexicographically sorted keys and no whitespace, per RFC 7638 §3.2.
fn canonical_json(members: &Map<String, Value>) -> Vec<u8> {
  let mut keys: Vec<&String> = members.keys().collect();
  keys.sort();

  let mut out: Vec<u8> = Vec::with_capacity(128);
  out.push(b'{');
  for (index, key) in keys.iter().enumerate() {
    if index > 0 {
      out.push(b',');
    }
    out.extend_from_slice(serde_json::to_string(key).unwrap().as_bytes());
    out.push(b':');
    out.extend_from_slice(serde_json::to_string(&members[*key]).unwrap().as_bytes());
  }
  out.push(b'}');
  out
}

pub fn thumbprint_b64(jwk: &Jwk, hash: ThumbprintHash) -> String {
  let members: Map<String, Value> = required_members(jwk);
  let canonical: Vec<u8> = canonical_json(&members);

  let digest: Vec<u8> = match hash {
    ThumbprintHash::Sha256 => Sha256::digest(&canonical).to_vec(),
  };

  jwu::encode_b64(digest)
}
