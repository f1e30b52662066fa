// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Compact, flattened-JSON and general-JSON JWS encoding/decoding (RFC 7515 §3, §7).
//!
//! Signing and verification are pulled, not pushed: the encoder hands back the exact
//! `signing_input` bytes and waits for the caller's signature; the decoder hands a
//! [`DecodedJws`] to [`DecodedJws::verify`] together with a [`JwsVerifier`] collaborator. No
//! concrete signature algorithm is ever invoked from inside this crate (`spec.md` §6).

use serde_json::Map;
use serde_json::Value;

use crate::error::JwsError;
use crate::jwk::Jwk;
use crate::jws::header::JwsHeader;
use crate::jws::verifier::JwsVerifier;
use crate::jws::verifier::VerificationInput;
use crate::jwt::JwtHeaderSet;
use crate::jwu;

/// A verified JWS: the header(s) that produced it and the payload bytes they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub protected: JwsHeader,
  pub unprotected: Option<JwsHeader>,
  pub claims: Vec<u8>,
}

fn header_b64_and_bytes(header: &JwsHeader) -> Result<(String, Vec<u8>), JwsError> {
  let bytes: Vec<u8> = serde_json::to_vec(header)?;
  let b64: String = jwu::encode_b64(&bytes);
  Ok((b64, bytes))
}

fn check_unencoded_payload_invariant(header: &JwsHeader) -> Result<(), JwsError> {
  if header.b64() == Some(false) {
    let names_b64 = header.crit().map(|c| c.iter().any(|n| n == "b64")).unwrap_or(false);
    if !names_b64 {
      return Err(JwsError::UnencodedPayloadNotCritical);
    }
  }
  Ok(())
}

/// Low-level, single-signature, pull-style compact encoder (`spec.md` §4.3 steps 2-5).
pub struct CompactJwsEncoder<'a> {
  header_b64: String,
  payload_segment: Vec<u8>,
  signing_input: Vec<u8>,
  _payload: &'a [u8],
}

impl<'a> CompactJwsEncoder<'a> {
  pub fn new(payload: &'a [u8], header: &JwsHeader) -> Result<Self, JwsError> {
    if header.alg().is_none() {
      return Err(JwsError::MissingAlgorithm);
    }
    check_unencoded_payload_invariant(header)?;

    let (header_b64, _) = header_b64_and_bytes(header)?;
    let b64_enabled: bool = header.b64().unwrap_or(true);

    let payload_segment: Vec<u8> = if b64_enabled {
      jwu::encode_b64(payload).into_bytes()
    } else {
      if payload.contains(&b'.') {
        return Err(JwsError::MalformedInput(
          "unencoded payload must not contain the `.` byte in compact serialization",
        ));
      }
      payload.to_vec()
    };

    let signing_input: Vec<u8> = jwu::create_message(header_b64.as_bytes(), &payload_segment);

    Ok(Self {
      header_b64,
      payload_segment,
      signing_input,
      _payload: payload,
    })
  }

  pub fn signing_input(&self) -> &[u8] {
    &self.signing_input
  }

  pub fn into_jws(self, signature: &[u8]) -> String {
    let sig_b64: String = jwu::encode_b64(signature);
    let payload_part: String = String::from_utf8_lossy(&self.payload_segment).into_owned();
    format!("{}.{}.{}", self.header_b64, payload_part, sig_b64)
  }
}

/// A not-yet-verified JWS, ready for [`DecodedJws::verify`].
pub struct DecodedJws<'a> {
  protected: JwsHeader,
  unprotected: Option<JwsHeader>,
  payload: std::borrow::Cow<'a, [u8]>,
  signature: Vec<u8>,
  signing_input: Vec<u8>,
}

impl<'a> DecodedJws<'a> {
  pub fn protected(&self) -> &JwsHeader {
    &self.protected
  }

  pub fn unprotected(&self) -> Option<&JwsHeader> {
    self.unprotected.as_ref()
  }

  /// Resolves `alg` and checks it against the key's declared `alg` (if any), invokes the
  /// verifier collaborator, and returns the recovered [`Token`] on success.
  pub fn verify(self, verifier: &impl JwsVerifier, key: &Jwk) -> Result<Token, JwsError> {
    let protected_opt = Some(self.protected.clone());
    let header_set: JwtHeaderSet<'_, JwsHeader> =
      JwtHeaderSet::new().protected(&protected_opt).unprotected(&self.unprotected);
    let alg = header_set.resolve(|h| h.alg().cloned()).ok_or(JwsError::MissingAlgorithm)?;

    if alg.is_none() {
      return Err(JwsError::NoneAlgorithmRejected);
    }

    if let Some(key_alg) = key.alg() {
      if key_alg != alg.name() {
        return Err(JwsError::AlgorithmMismatch);
      }
    }

    let input = VerificationInput {
      alg,
      signing_input: &self.signing_input,
      decoded_signature: self.signature,
    };

    verifier.verify(input, key)?;

    Ok(Token {
      protected: self.protected,
      unprotected: self.unprotected,
      claims: self.payload.into_owned(),
    })
  }

  /// Like [`DecodedJws::verify`] but explicitly permits `alg=none` (the caller's explicit
  /// opt-in per `spec.md` §9's open question).
  pub fn verify_allow_none(self, verifier: &impl JwsVerifier, key: &Jwk) -> Result<Token, JwsError> {
    let protected_opt = Some(self.protected.clone());
    let header_set: JwtHeaderSet<'_, JwsHeader> =
      JwtHeaderSet::new().protected(&protected_opt).unprotected(&self.unprotected);
    let alg = header_set.resolve(|h| h.alg().cloned()).ok_or(JwsError::MissingAlgorithm)?;

    if alg.is_none() {
      if !self.signature.is_empty() {
        return Err(JwsError::MalformedInput("`alg=none` must carry an empty signature"));
      }
      return Ok(Token {
        protected: self.protected,
        unprotected: self.unprotected,
        claims: self.payload.into_owned(),
      });
    }

    self.verify(verifier, key)
  }
}

/// Candidate-matching / parsing configuration for decoding a JWS of any serialization.
#[derive(Debug, Clone)]
pub struct Decoder {
  crit_allowlist: Vec<String>,
}

impl Default for Decoder {
  fn default() -> Self {
    Self {
      crit_allowlist: vec!["b64".to_owned()],
    }
  }
}

impl Decoder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Extends the set of `crit` parameter names this decoder accepts as known (`spec.md` §9:
  /// "strict implementations should refuse any `crit` header naming an unknown parameter").
  pub fn crit_allowlist(mut self, names: Vec<String>) -> Self {
    self.crit_allowlist.extend(names);
    self
  }

  fn check_crit(&self, header: &JwsHeader) -> Result<(), JwsError> {
    if let Some(crit) = header.crit() {
      for name in crit {
        if !self.crit_allowlist.contains(name) {
          return Err(JwsError::UnrecognizedCritical(name.clone()));
        }
      }
    }
    Ok(())
  }

  pub fn decode_compact_serialization<'a>(
    &self,
    data: &'a [u8],
    detached_payload: Option<&'a [u8]>,
  ) -> Result<DecodedJws<'a>, JwsError> {
    let segments: Vec<&[u8]> = jwu::parse_segments(data);
    let [header_seg, payload_seg, signature_seg] = <[&[u8]; 3]>::try_from(segments.as_slice())
      .map_err(|_| JwsError::MalformedInput("compact serialization requires exactly three `.`-separated parts"))?;

    let header_bytes: Vec<u8> = jwu::decode_b64(header_seg)?;
    let protected: JwsHeader = serde_json::from_slice(&header_bytes)?;
    self.check_crit(&protected)?;

    let b64_enabled: bool = protected.b64().unwrap_or(true);

    let (payload, signing_input): (std::borrow::Cow<'a, [u8]>, Vec<u8>) = if b64_enabled {
      let payload: Vec<u8> = jwu::decode_b64(payload_seg)?;
      let signing_input: Vec<u8> = jwu::create_message(header_seg, payload_seg);
      (std::borrow::Cow::Owned(payload), signing_input)
    } else {
      let raw: &[u8] = match detached_payload {
        Some(detached) => detached,
        None => payload_seg,
      };
      let signing_input: Vec<u8> = jwu::create_message(header_seg, raw);
      (std::borrow::Cow::Borrowed(raw), signing_input)
    };

    let signature: Vec<u8> = jwu::decode_b64(signature_seg)?;

    Ok(DecodedJws {
      protected,
      unprotected: None,
      payload,
      signature,
      signing_input,
    })
  }

  fn decode_signature_object(
    &self,
    payload_b64: &[u8],
    signature_obj: &Map<String, Value>,
  ) -> Result<DecodedJws<'static>, JwsError> {
    let protected_b64: &str = signature_obj
      .get("protected")
      .and_then(Value::as_str)
      .ok_or(JwsError::MalformedInput("signature object missing `protected`"))?;
    let protected_bytes: Vec<u8> = jwu::decode_b64(protected_b64)?;
    let protected: JwsHeader = serde_json::from_slice(&protected_bytes)?;
    self.check_crit(&protected)?;

    let unprotected: Option<JwsHeader> = match signature_obj.get("header") {
      Some(value) => Some(serde_json::from_value(value.clone())?),
      None => None,
    };

    let signature_b64: &str = signature_obj
      .get("signature")
      .and_then(Value::as_str)
      .ok_or(JwsError::MalformedInput("signature object missing `signature`"))?;
    let signature: Vec<u8> = jwu::decode_b64(signature_b64)?;

    let b64_enabled: bool = protected.b64().unwrap_or(true);
    let (payload, signing_input): (Vec<u8>, Vec<u8>) = if b64_enabled {
      let payload: Vec<u8> = jwu::decode_b64(payload_b64)?;
      let signing_input: Vec<u8> = jwu::create_message(protected_b64.as_bytes(), payload_b64);
      (payload, signing_input)
    } else {
      let payload: Vec<u8> = jwu::decode_b64(payload_b64).unwrap_or_else(|_| payload_b64.to_vec());
      let signing_input: Vec<u8> = jwu::create_message(protected_b64.as_bytes(), &payload);
      (payload, signing_input)
    };

    Ok(DecodedJws {
      protected,
      unprotected,
      payload: std::borrow::Cow::Owned(payload),
      signature,
      signing_input,
    })
  }

  pub fn decode_flattened_serialization(&self, data: &[u8]) -> Result<DecodedJws<'static>, JwsError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj: &Map<String, Value> = value.as_object().ok_or(JwsError::MalformedInput("expected a JSON object"))?;
    let payload_b64: &str = obj.get("payload").and_then(Value::as_str).unwrap_or_default();
    self.decode_signature_object(payload_b64.as_bytes(), obj)
  }

  /// Every signature candidate of a general-JSON JWS (RFC 7515 §7.2.1), for the caller to
  /// filter by `kid`/thumbprint/`x5t` before calling [`DecodedJws::verify`].
  pub fn decode_general_serialization(&self, data: &[u8]) -> Result<Vec<DecodedJws<'static>>, JwsError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj: &Map<String, Value> = value.as_object().ok_or(JwsError::MalformedInput("expected a JSON object"))?;
    let payload_b64: &str = obj.get("payload").and_then(Value::as_str).unwrap_or_default();
    let signatures: &Vec<Value> = obj
      .get("signatures")
      .and_then(Value::as_array)
      .ok_or(JwsError::MalformedInput("expected a `signatures` array"))?;

    signatures
      .iter()
      .map(|entry| {
        let sig_obj = entry.as_object().ok_or(JwsError::MalformedInput("expected a signature object"))?;
        self.decode_signature_object(payload_b64.as_bytes(), sig_obj)
      })
      .collect()
  }

  /// Selects the one candidate whose header identifies `key` (by `kid`, `jwk` thumbprint,
  /// `x5t`, or `x5t#S256`) and verifies it, per `spec.md` §4.3. Fails `NoSignatureForKey`
  /// if none match.
  pub fn verify_matching(
    &self,
    candidates: Vec<DecodedJws<'static>>,
    verifier: &impl JwsVerifier,
    key: &Jwk,
  ) -> Result<Token, JwsError> {
    let key_thumbprint: String = key.thumbprint_sha256_b64();

    for candidate in candidates {
      let protected_opt = Some(candidate.protected.clone());
      let header_set: JwtHeaderSet<'_, JwsHeader> =
        JwtHeaderSet::new().protected(&protected_opt).unprotected(&candidate.unprotected);

      let kid_match = header_set
        .resolve(|h| h.kid().map(str::to_owned))
        .map(|hk| Some(hk.as_str()) == key.kid())
        .unwrap_or(false);
      let thumb_match = header_set
        .resolve(|h| h.jwk().map(Jwk::thumbprint_sha256_b64))
        .map(|ht| ht == key_thumbprint)
        .unwrap_or(false);
      let x5t_match = header_set
        .resolve(|h| h.x5t().map(str::to_owned))
        .map(|v| Some(v.as_str()) == key.x5t())
        .unwrap_or(false);
      let x5t_s256_match = header_set
        .resolve(|h| h.x5t_s256().map(str::to_owned))
        .map(|v| Some(v.as_str()) == key.x5t_s256())
        .unwrap_or(false);

      if kid_match || thumb_match || x5t_match || x5t_s256_match {
        return candidate.verify(verifier, key);
      }
    }

    Err(JwsError::NoSignatureForKey)
  }
}
