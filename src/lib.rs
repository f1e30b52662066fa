// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON Object Signing and Encryption: JWK (RFC 7517), JWS (RFC 7515, RFC 7797), JWE (RFC 7516),
//! and JWT (RFC 7519) composed over them.
//!
//! Every cryptographic primitive — signing, verification, AEAD, key wrap, key agreement, KDFs —
//! is supplied by the caller as a collaborator. This crate parses, serializes, and sequences the
//! JOSE pipelines; it never links a concrete cryptography backend itself, with the sole
//! exception of DEFLATE compression and PEM/DER key parsing.

mod header_set;

pub mod error;
pub mod jwe;
pub mod jwk;
pub mod jws;
pub mod jwt;
pub mod jwu;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use error::Result;
