// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Claim validation (RFC 7519 §4.1, `spec.md` §4.5): an ordered chain of checks over already
//! decoded/verified [`JwtClaims`], each independently opt-in.

use crate::error::ClaimValidationError;
use crate::jwt::claims::JwtClaims;

/// Which registered claims to check, and against what reference values. Every check defaults
/// to disabled: the caller opts in to exactly the claims it cares about (`spec.md` §4.5,
/// property: "a validator that checks nothing is a no-op, not a vacuous pass/fail").
#[derive(Debug, Clone, Default)]
pub struct ClaimsValidationOptions {
  leeway_seconds: i64,
  current_time: Option<i64>,
  check_expiry: bool,
  check_not_before: bool,
  check_issued_at: bool,
  issuer: Option<String>,
  subject: Option<String>,
  audience: Option<String>,
  required_claims: Vec<&'static str>,
}

impl ClaimsValidationOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clock-skew tolerance applied to `exp`/`nbf`/`iat` checks, in seconds.
  pub fn leeway_seconds(mut self, seconds: i64) -> Self {
    self.leeway_seconds = seconds;
    self
  }

  /// The current time, as a `NumericDate`. Required by [`ClaimsValidationOptions::check_expiry`]
  /// /[`ClaimsValidationOptions::check_not_before`]/[`ClaimsValidationOptions::check_issued_at`]
  /// (`spec.md` §9: the caller supplies the clock, this crate never reads the system clock).
  pub fn current_time(mut self, unix_seconds: i64) -> Self {
    self.current_time = Some(unix_seconds);
    self
  }

  pub fn check_expiry(mut self) -> Self {
    self.check_expiry = true;
    self
  }

  pub fn check_not_before(mut self) -> Self {
    self.check_not_before = true;
    self
  }

  /// Rejects a token whose `iat` is in the future (beyond leeway).
  pub fn check_issued_at(mut self) -> Self {
    self.check_issued_at = true;
    self
  }

  pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
    self.issuer = Some(issuer.into());
    self
  }

  pub fn subject(mut self, subject: impl Into<String>) -> Self {
    self.subject = Some(subject.into());
    self
  }

  pub fn audience(mut self, audience: impl Into<String>) -> Self {
    self.audience = Some(audience.into());
    self
  }

  pub fn require_claim(mut self, name: &'static str) -> Self {
    self.required_claims.push(name);
    self
  }

  /// Runs every opted-in check, in the order: required claims, `exp`, `nbf`, `iat`, `iss`,
  /// `sub`, `aud`. Stops at the first failure.
  pub fn validate(&self, claims: &JwtClaims) -> Result<(), ClaimValidationError> {
    for name in &self.required_claims {
      let present = match *name {
        "iss" => claims.iss().is_some(),
        "sub" => claims.sub().is_some(),
        "aud" => claims.aud().is_some(),
        "exp" => claims.exp().is_some(),
        "nbf" => claims.nbf().is_some(),
        "iat" => claims.iat().is_some(),
        "jti" => claims.jti().is_some(),
        custom => claims.custom().contains_key(custom),
      };
      if !present {
        return Err(ClaimValidationError::RequiredClaimMissing(name));
      }
    }

    if self.check_expiry {
      if let Some(exp) = claims.exp() {
        let now = self.current_time.unwrap_or_default();
        if now - self.leeway_seconds >= exp {
          return Err(ClaimValidationError::Expired);
        }
      }
    }

    if self.check_not_before {
      if let Some(nbf) = claims.nbf() {
        let now = self.current_time.unwrap_or_default();
        if now + self.leeway_seconds < nbf {
          return Err(ClaimValidationError::NotYetValid);
        }
      }
    }

    if self.check_issued_at {
      if let Some(iat) = claims.iat() {
        let now = self.current_time.unwrap_or_default();
        if iat - self.leeway_seconds > now {
          return Err(ClaimValidationError::IssuedInFuture);
        }
      }
    }

    if let Some(expected) = &self.issuer {
      if claims.iss() != Some(expected.as_str()) {
        return Err(ClaimValidationError::IssuerMismatch);
      }
    }

    if let Some(expected) = &self.subject {
      if claims.sub() != Some(expected.as_str()) {
        return Err(ClaimValidationError::SubjectMismatch);
      }
    }

    if let Some(expected) = &self.audience {
      let contains = claims.aud().map(|aud| aud.iter().any(|a| a == expected)).unwrap_or(false);
      if !contains {
        return Err(ClaimValidationError::AudienceMismatch);
      }
    }

    Ok(())
  }
}
