// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Small, dependency-light helpers shared by the `jwk`, `jws`, `jwe` and `jwt` modules.
//!
//! Nothing in this module ever re-encodes bytes it did not itself decode: the
//! byte-exactness invariants in `spec.md` §4.6 depend on callers treating the
//! wire bytes as opaque until they are intentionally parsed.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::JwkError;

/// Encodes `data` as unpadded base64url.
pub fn encode_b64(data: impl AsRef<[u8]>) -> String {
  URL_SAFE_NO_PAD.encode(data)
}

/// Decodes unpadded base64url `data` into raw bytes.
pub fn decode_b64(data: impl AsRef<[u8]>) -> Result<Vec<u8>, JwkError> {
  URL_SAFE_NO_PAD.decode(data.as_ref()).map_err(|_| JwkError::InvalidBase64)
}

/// Joins two already-encoded segments with the JOSE `.` separator.
pub fn create_message(a: &[u8], b: &[u8]) -> Vec<u8> {
  let mut message: Vec<u8> = Vec::with_capacity(a.len() + 1 + b.len());
  message.extend_from_slice(a);
  message.push(b'.');
  message.extend_from_slice(b);
  message
}

/// Splits a compact-serialization string on `.` without allocating per segment.
pub fn parse_segments(data: &[u8]) -> Vec<&[u8]> {
  data.split(|&byte| byte == b'.').collect()
}

/// Computes `AAD = ASCII(base64url(protected)) [. base64url(aad)]`, per `spec.md` §3/§4.4.
pub fn create_aad(protected_b64: &[u8], aad: Option<&[u8]>) -> Vec<u8> {
  match aad {
    Some(aad) => create_message(protected_b64, encode_b64(aad).as_bytes()),
    None => protected_b64.to_vec(),
  }
}

/// The big-endian 64-bit bit-length of `data`, as used in the CBC-HS AEAD's `AL` field.
pub fn bit_length_be64(data: &[u8]) -> [u8; 8] {
  let bits: u64 = (data.len() as u64).saturating_mul(8);
  bits.to_be_bytes()
}

/// The big-endian 32-bit length-prefixed encoding used by Concat-KDF's `OtherInfo` fields.
pub fn concat_kdf_info(data: &[u8]) -> Vec<u8> {
  let mut out: Vec<u8> = Vec::with_capacity(4 + data.len());
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(data);
  out
}
