// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Signature (RFC 7515), the unencoded-payload extension (RFC 7797), and the
//! algorithms registered for it (RFC 7518 §3, RFC 8037 §3.1).

mod algorithm;
mod compact;
mod header;
mod multi;
mod verifier;

pub use algorithm::JwsAlgorithm;
pub use compact::CompactJwsEncoder;
pub use compact::Decoder;
pub use compact::DecodedJws;
pub use compact::Token;
pub use header::JwsHeader;
pub use multi::prepare_signing_request;
pub use multi::JwsGeneralEncoder;
pub use multi::JwsSigningRequest;
pub use verifier::JwsVerifier;
pub use verifier::JwsVerifierFn;
pub use verifier::SignatureEncodingPolicy;
pub use verifier::VerificationInput;

pub use crate::error::SignatureVerificationError;
pub use crate::error::SignatureVerificationErrorKind;
