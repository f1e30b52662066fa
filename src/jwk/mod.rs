// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Key (RFC 7517) and the algorithms registered for it (RFC 7518 §6, RFC 8037).

mod key;
mod params;
mod pem;
mod set;
mod thumbprint;

pub use key::Jwk;
pub use key::JwkOperation;
pub use key::JwkType;
pub use key::JwkUse;
pub use params::EcCurve;
pub use params::EcxCurve;
pub use params::EdCurve;
pub use params::JwkParams;
pub use params::JwkParamsEc;
pub use params::JwkParamsOct;
pub use params::JwkParamsOkp;
pub use params::JwkParamsRsa;
pub use pem::pem_import;
pub use set::JwkSet;
pub use thumbprint::ThumbprintHash;
