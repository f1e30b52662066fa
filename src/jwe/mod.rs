// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Encryption (RFC 7516), the key-management and content-encryption algorithms
//! registered for it (RFC 7518 §4-5), and the draft ECDH-1PU sender-authenticated agreement.

mod algorithm;
mod collaborator;
mod decoder;
mod encoder;
mod header;

pub use algorithm::JweAlgorithm;
pub use algorithm::JweCompression;
pub use algorithm::JweEncryption;
pub use collaborator::AeadSealed;
pub use collaborator::JweCollaborator;
pub use decoder::Decoder;
pub use decoder::JweDecryptionKey;
pub use encoder::Encoder;
pub use encoder::JweFormat;
pub use encoder::JweKeySource;
pub use encoder::JweRecipient;
pub use header::JweHeader;
