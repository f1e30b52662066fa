// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The signature-verification collaborator seam (`spec.md` §6: `Verifier(alg, key, msg, sig)`).

use crate::error::SignatureVerificationError;
use crate::jwk::Jwk;
use crate::jws::algorithm::JwsAlgorithm;

/// Everything a verifier collaborator needs to check one signature.
pub struct VerificationInput<'a> {
  pub alg: JwsAlgorithm,
  pub signing_input: &'a [u8],
  pub decoded_signature: Vec<u8>,
}

/// A verification collaborator. Implemented for any closure of matching shape via
/// [`JwsVerifierFn`], mirroring the teacher's `sign_fn`/`verify_fn` closures (`spec.md` §9:
/// collaborators are plain function values, never a concrete crypto dependency).
pub trait JwsVerifier {
  fn verify(&self, input: VerificationInput<'_>, key: &Jwk) -> Result<(), SignatureVerificationError>;
}

pub struct JwsVerifierFn<F>(F);

impl<F> From<F> for JwsVerifierFn<F>
where
  F: Fn(VerificationInput<'_>, &Jwk) -> Result<(), SignatureVerificationError>,
{
  fn from(f: F) -> Self {
    Self(f)
  }
}

impl<F> JwsVerifier for JwsVerifierFn<F>
where
  F: Fn(VerificationInput<'_>, &Jwk) -> Result<(), SignatureVerificationError>,
{
  fn verify(&self, input: VerificationInput<'_>, key: &Jwk) -> Result<(), SignatureVerificationError> {
    (self.0)(input, key)
  }
}

/// `spec.md` §9's redesign flag on the source's process-wide "Bouncy Castle fail-safe": rather
/// than a global flag, ECDSA signature encoding leniency is an explicit, caller-chosen policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureEncodingPolicy {
  /// Reject any ECDSA signature that is not fixed-length IEEE P1363 `r‖s`. The default.
  #[default]
  Standard,
  /// Additionally accept a DER-encoded ECDSA signature, for interop with libraries (e.g. older
  /// Bouncy Castle releases) that emitted ASN.1 signatures instead of the RFC 7518 shape.
  AcceptBothDerAndFixedLength,
}
