// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Composing and recognizing the two JWT serializations (RFC 7519 §3, `spec.md` §4.5):
//! JWS-secured (3 segments) and JWE-secured, optionally nested as JWE(JWS) (RFC 7519 §5.2).

use crate::error::JwtError;
use crate::jwe;
use crate::jws;

/// A dot-count-dispatched, not-yet-processed JWT (`spec.md` §4.5 step 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jwt<'a> {
  /// Three `.`-separated segments: `header.payload.signature`.
  Jws(&'a str),
  /// Five `.`-separated segments: `header.key.iv.ciphertext.tag`.
  Jwe(&'a str),
}

impl<'a> Jwt<'a> {
  /// Classifies `token` by its `.` count, per RFC 7519 §3 ("a JWS has two periods, a JWE has
  /// four"). Rejects anything else as malformed rather than guessing.
  pub fn parse(token: &'a str) -> Result<Self, JwtError> {
    match token.bytes().filter(|&b| b == b'.').count() {
      2 => Ok(Self::Jws(token)),
      4 => Ok(Self::Jwe(token)),
      _ => Err(JwtError::MalformedToken("a JWT has either 2 or 4 `.` separators")),
    }
  }

  pub fn as_str(&self) -> &'a str {
    match self {
      Self::Jws(token) | Self::Jwe(token) => token,
    }
  }
}

/// The fully decoded/verified claims payload of a JWT, after JWS verification and, for a nested
/// JWE(JWS), after both decryption and verification.
pub struct DecodedJwt {
  pub protected: jws::JwsHeader,
  pub claims: Vec<u8>,
}

/// Verifies a JWS-secured JWT (`spec.md` §4.5, plain JWS case).
pub fn decode_jws(token: &str, verifier: &impl jws::JwsVerifier, key: &crate::jwk::Jwk) -> Result<DecodedJwt, JwtError> {
  let decoded = jws::Decoder::new().decode_compact_serialization(token.as_bytes(), None)?;
  let jws_token = decoded.verify(verifier, key)?;
  Ok(DecodedJwt {
    protected: jws_token.protected,
    claims: jws_token.claims,
  })
}

/// Decrypts a JWE-secured JWT. When the decrypted `cty` is `JWT` (RFC 7519 §5.2), the plaintext
/// is itself a JWS-secured JWT and is additionally verified, implementing the nested JWE(JWS)
/// composition (`spec.md` §4.5, property S5/S6).
pub fn decode_jwe<C: jwe::JweCollaborator>(
  token: &str,
  decoder: &jwe::Decoder<'_, C>,
  key: &jwe::JweDecryptionKey<'_>,
  verifier: Option<(&impl jws::JwsVerifier, &crate::jwk::Jwk)>,
) -> Result<DecodedJwt, JwtError> {
  let plaintext: Vec<u8> = decoder.decrypt_compact(token.as_bytes(), key)?;

  match verifier {
    Some((verifier, jws_key)) => {
      let inner = std::str::from_utf8(&plaintext).map_err(|_| JwtError::MalformedToken("nested JWT payload is not valid UTF-8"))?;
      decode_jws(inner, verifier, jws_key)
    }
    None => Ok(DecodedJwt {
      protected: jws::JwsHeader::new(),
      claims: plaintext,
    }),
  }
}
