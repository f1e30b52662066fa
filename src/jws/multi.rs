// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Multi-signature general/flattened JSON JWS encoding (RFC 7515 §7.2), pull-style like
//! [`CompactJwsEncoder`](crate::jws::CompactJwsEncoder): the caller signs each recipient's
//! `signing_input` externally and hands the signature back.

use serde_json::Map;
use serde_json::Value;

use crate::error::JwsError;
use crate::jws::header::JwsHeader;
use crate::jwu;

/// The exact bytes one recipient of a general/flattened JWS must sign.
pub struct JwsSigningRequest {
  pub protected_b64: String,
  pub signing_input: Vec<u8>,
}

/// Builds the `signing_input` for one more signature over `payload` under `protected`.
pub fn prepare_signing_request(payload: &[u8], protected: &JwsHeader) -> Result<JwsSigningRequest, JwsError> {
  if protected.alg().is_none() {
    return Err(JwsError::MissingAlgorithm);
  }
  if protected.b64() == Some(false) {
    return Err(JwsError::MalformedInput(
      "`b64=false` is only defined for compact serialization (RFC 7797 §4)",
    ));
  }

  let protected_bytes: Vec<u8> = serde_json::to_vec(protected)?;
  let protected_b64: String = jwu::encode_b64(protected_bytes);
  let payload_b64: String = jwu::encode_b64(payload);
  let signing_input: Vec<u8> = jwu::create_message(protected_b64.as_bytes(), payload_b64.as_bytes());

  Ok(JwsSigningRequest {
    protected_b64,
    signing_input,
  })
}

/// Accumulates completed `(protected, unprotected, signature)` triples and renders them as
/// general or flattened JSON (RFC 7515 §7.2.1/§7.2.2). Flattened ⇔ general whenever there is
/// exactly one signature (`spec.md` §8, property 8).
pub struct JwsGeneralEncoder<'a> {
  payload: &'a [u8],
  entries: Vec<(String, Option<JwsHeader>, Vec<u8>)>,
}

impl<'a> JwsGeneralEncoder<'a> {
  pub fn new(payload: &'a [u8]) -> Self {
    Self {
      payload,
      entries: Vec::new(),
    }
  }

  pub fn add_signature(mut self, protected_b64: impl Into<String>, unprotected: Option<JwsHeader>, signature: &[u8]) -> Self {
    self.entries.push((protected_b64.into(), unprotected, signature.to_vec()));
    self
  }

  pub fn into_flattened(self) -> Result<String, JwsError> {
    if self.entries.len() != 1 {
      return Err(JwsError::MalformedInput("flattened serialization requires exactly one signature"));
    }
    let (protected_b64, unprotected, signature) = self.entries.into_iter().next().unwrap();

    let mut obj: Map<String, Value> = Map::new();
    obj.insert("payload".into(), Value::String(jwu::encode_b64(self.payload)));
    obj.insert("protected".into(), Value::String(protected_b64));
    if let Some(header) = unprotected {
      obj.insert("header".into(), serde_json::to_value(header)?);
    }
    obj.insert("signature".into(), Value::String(jwu::encode_b64(signature)));

    Ok(serde_json::to_string(&Value::Object(obj))?)
  }

  pub fn into_general(self) -> Result<String, JwsError> {
    let mut sig_array: Vec<Value> = Vec::with_capacity(self.entries.len());

    for (protected_b64, unprotected, signature) in self.entries {
      let mut sig_obj: Map<String, Value> = Map::new();
      sig_obj.insert("protected".into(), Value::String(protected_b64));
      if let Some(header) = unprotected {
        sig_obj.insert("header".into(), serde_json::to_value(header)?);
      }
      sig_obj.insert("signature".into(), Value::String(jwu::encode_b64(signature)));
      sig_array.push(Value::Object(sig_obj));
    }

    let mut obj: Map<String, Value> = Map::new();
    obj.insert("payload".into(), Value::String(jwu::encode_b64(self.payload)));
    obj.insert("signatures".into(), Value::Array(sig_array));

    Ok(serde_json::to_string(&Value::Object(obj))?)
  }
}
