// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Header-merge resolution shared by the JWS and JWE pipelines.
//!
//! `spec.md` §3 "Header Merge Rule": for any header parameter `p`, the value is taken from the
//! first present among `{recipient-specific, shared-unprotected, protected}`, in that order.
//! This is re-exported as `crate::jwt::JwtHeaderSet` to match the shape callers reach for when
//! resolving claims/headers together, but it has no dependency on the claims model itself.

/// Three header layers, resolved in recipient → shared-unprotected → protected order.
#[derive(Debug, Clone, Copy)]
pub struct JwtHeaderSet<'a, H> {
  protected: Option<&'a H>,
  unprotected: Option<&'a H>,
  per_recipient: Option<&'a H>,
}

impl<'a, H> Default for JwtHeaderSet<'a, H> {
  fn default() -> Self {
    Self {
      protected: None,
      unprotected: None,
      per_recipient: None,
    }
  }
}

impl<'a, H> JwtHeaderSet<'a, H> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the protected header layer from an `Option<H>` reference, as produced by a decoded
  /// token's `protected: Option<JwsHeader>` field.
  pub fn protected(mut self, header: &'a Option<H>) -> Self {
    self.protected = header.as_ref();
    self
  }

  pub fn unprotected(mut self, header: &'a Option<H>) -> Self {
    self.unprotected = header.as_ref();
    self
  }

  pub fn per_recipient(mut self, header: &'a Option<H>) -> Self {
    self.per_recipient = header.as_ref();
    self
  }

  pub fn with_protected(self, header: &'a Option<H>) -> Self {
    self.protected(header)
  }

  pub fn with_unprotected(self, header: &'a Option<H>) -> Self {
    self.unprotected(header)
  }

  pub fn protected_header(&self) -> Option<&'a H> {
    self.protected
  }

  pub fn unprotected_header(&self) -> Option<&'a H> {
    self.unprotected
  }

  /// Resolves a parameter by precedence: recipient, then shared-unprotected, then protected.
  pub fn resolve<T>(&self, get: impl Fn(&H) -> Option<T>) -> Option<T> {
    self
      .per_recipient
      .and_then(|h| get(h))
      .or_else(|| self.unprotected.and_then(|h| get(h)))
      .or_else(|| self.protected.and_then(|h| get(h)))
  }
}
