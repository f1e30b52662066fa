// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Token composition, claim validation, and the JWS/JWE(/JWS) dispatch (RFC 7519).

mod claims;
mod token;
mod validate;

pub use claims::JwtClaims;
pub use token::decode_jwe;
pub use token::decode_jws;
pub use token::DecodedJwt;
pub use token::Jwt;
pub use validate::ClaimsValidationOptions;

pub use crate::header_set::JwtHeaderSet;
