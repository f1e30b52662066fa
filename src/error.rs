// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

/// Top-level error returned at the public boundary of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Jwk(#[from] JwkError),
  #[error(transparent)]
  Jws(#[from] JwsError),
  #[error(transparent)]
  Jwe(#[from] JweError),
  #[error(transparent)]
  Jwt(#[from] JwtError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while parsing, serializing or fingerprinting a [`Jwk`](crate::jwk::Jwk).
#[derive(Debug, thiserror::Error)]
pub enum JwkError {
  #[error("invalid key: {0}")]
  InvalidKey(&'static str),
  #[error("malformed input: {0}")]
  MalformedInput(&'static str),
  #[error("unsupported algorithm: {0}")]
  UnsupportedAlgorithm(String),
  #[error("invalid base64url content")]
  InvalidBase64,
  #[error(transparent)]
  InvalidJson(#[from] serde_json::Error),
  #[error("unrecognized PEM label: {0}")]
  UnrecognizedPemLabel(String),
  #[error("unrecognized curve OID: {0}")]
  UnrecognizedCurveOid(String),
  #[error("unsupported key algorithm OID: {0}")]
  UnsupportedKeyAlgorithmOid(String),
  #[error("malformed PEM or DER content")]
  InvalidPem,
}

/// Errors raised by the JWS signing/verification pipeline.
#[derive(Debug, thiserror::Error)]
pub enum JwsError {
  #[error("malformed input: {0}")]
  MalformedInput(&'static str),
  #[error("missing `alg` parameter")]
  MissingAlgorithm,
  #[error("unsupported algorithm: {0}")]
  UnsupportedAlgorithm(String),
  #[error("key's `alg` disagrees with header's `alg`")]
  AlgorithmMismatch,
  #[error(transparent)]
  InvalidSignature(#[from] SignatureVerificationError),
  #[error("no candidate signature matches the supplied key")]
  NoSignatureForKey,
  #[error("`b64=false` requires `b64` to be named in `crit`")]
  UnencodedPayloadNotCritical,
  #[error("`crit` names an unrecognized header parameter: {0}")]
  UnrecognizedCritical(String),
  #[error("`alg=none` was rejected by policy")]
  NoneAlgorithmRejected,
  #[error("signing collaborator failed: {0}")]
  SigningFailed(String),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Jwk(#[from] JwkError),
  #[error("internal error: {0}")]
  Internal(&'static str),
}

/// Dedicated verification-failure type so verifier collaborators can report a
/// plain boolean-shaped failure distinct from transport/parse errors.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct SignatureVerificationError {
  pub kind: SignatureVerificationErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureVerificationErrorKind {
  #[error("invalid signature")]
  InvalidSignature,
  #[error("incompatible `alg` parameter")]
  UnsupportedAlgorithm,
  #[error("invalid key material for this algorithm")]
  InvalidKeyMaterial,
  #[error("collaborator returned an error")]
  Unspecified,
}

impl From<SignatureVerificationErrorKind> for SignatureVerificationError {
  fn from(kind: SignatureVerificationErrorKind) -> Self {
    Self { kind }
  }
}

impl From<String> for SignatureVerificationError {
  fn from(_: String) -> Self {
    Self {
      kind: SignatureVerificationErrorKind::Unspecified,
    }
  }
}

/// Errors raised by the JWE encryption/decryption pipeline.
#[derive(Debug, thiserror::Error)]
pub enum JweError {
  #[error("malformed input: {0}")]
  MalformedInput(&'static str),
  #[error("missing `enc` parameter")]
  MissingContentEncryption,
  #[error("missing key management `alg` parameter")]
  MissingKeyAlgorithm,
  #[error("unsupported algorithm: {0}")]
  UnsupportedAlgorithm(String),
  #[error("decryption failed")]
  DecryptionFailed,
  #[error("no recipient matches the supplied key")]
  NoRecipientMatch,
  #[error("`dir` and direct ECDH-ES key agreement support exactly one recipient")]
  TooManyRecipientsForDirectAlgorithm,
  #[error("exactly one `enc` value is permitted for the whole JWE")]
  AmbiguousContentEncryption,
  #[error("key management collaborator failed: {0}")]
  KeyManagementFailed(String),
  #[error("ephemeral key generation failed: {0}")]
  EphemeralKeyGenerationFailed(String),
  #[error("compression collaborator failed: {0}")]
  CompressionFailed(String),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Jwk(#[from] JwkError),
  #[error("internal error: {0}")]
  Internal(&'static str),
}

/// Errors raised while validating or composing a JWT.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
  #[error("malformed token: {0}")]
  MalformedToken(&'static str),
  #[error(transparent)]
  Jws(#[from] JwsError),
  #[error(transparent)]
  Jwe(#[from] JweError),
  #[error(transparent)]
  ClaimValidationFailed(#[from] ClaimValidationError),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClaimValidationError {
  #[error("token has expired")]
  Expired,
  #[error("token is not yet valid")]
  NotYetValid,
  #[error("token was issued in the future")]
  IssuedInFuture,
  #[error("unexpected issuer")]
  IssuerMismatch,
  #[error("unexpected subject")]
  SubjectMismatch,
  #[error("audience does not contain the expected value")]
  AudienceMismatch,
  #[error("required claim missing: {0}")]
  RequiredClaimMissing(&'static str),
}
