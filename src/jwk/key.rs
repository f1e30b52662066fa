// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;

use crate::error::JwkError;
use crate::jwk::params::JwkParams;
use crate::jwk::params::JwkParamsEc;
use crate::jwk::params::JwkParamsOct;
use crate::jwk::params::JwkParamsOkp;
use crate::jwk::params::JwkParamsRsa;
use crate::jwk::thumbprint;

/// The `kty` values registered in RFC 7518 §6.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JwkType {
  #[serde(rename = "EC")]
  Ec,
  #[serde(rename = "RSA")]
  Rsa,
  #[serde(rename = "oct")]
  Oct,
  #[serde(rename = "OKP")]
  Okp,
}

impl JwkType {
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ec => "EC",
      Self::Rsa => "RSA",
      Self::Oct => "oct",
      Self::Okp => "OKP",
    }
  }
}

/// The `use` values registered in RFC 7517 §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JwkUse {
  #[serde(rename = "sig")]
  Signature,
  #[serde(rename = "enc")]
  Encryption,
}

/// The `key_ops` values registered in RFC 7517 §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JwkOperation {
  #[serde(rename = "sign")]
  Sign,
  #[serde(rename = "verify")]
  Verify,
  #[serde(rename = "encrypt")]
  Encrypt,
  #[serde(rename = "decrypt")]
  Decrypt,
  #[serde(rename = "wrapKey")]
  WrapKey,
  #[serde(rename = "unwrapKey")]
  UnwrapKey,
  #[serde(rename = "deriveKey")]
  DeriveKey,
  #[serde(rename = "deriveBits")]
  DeriveBits,
}

/// A JSON Web Key (RFC 7517), a discriminated record over `kty ∈ {EC, RSA, oct, OKP}`
/// plus the common optional members shared by every variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
  kty: JwkType,
  #[serde(flatten)]
  params: JwkParams,
  #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
  use_: Option<JwkUse>,
  #[serde(rename = "key_ops", skip_serializing_if = "Option::is_none")]
  key_ops: Option<Vec<JwkOperation>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  alg: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  kid: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5u: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5c: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  x5t: Option<String>,
  #[serde(rename = "x5t#S256", skip_serializing_if = "Option::is_none")]
  x5t_s256: Option<String>,
}

impl Jwk {
  /// Creates a new, otherwise-empty JWK of the given variant. Prefer [`Jwk::from_params`] when
  /// the parameters are already at hand.
  pub fn new(kty: JwkType) -> Self {
    let params: JwkParams = match kty {
      JwkType::Ec => JwkParams::Ec(JwkParamsEc {
        crv: String::new(),
        x: String::new(),
        y: String::new(),
        d: None,
      }),
      JwkType::Rsa => JwkParams::Rsa(JwkParamsRsa {
        n: String::new(),
        e: String::new(),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
      }),
      JwkType::Oct => JwkParams::Oct(JwkParamsOct { k: String::new() }),
      JwkType::Okp => JwkParams::Okp(JwkParamsOkp {
        crv: String::new(),
        x: String::new(),
        d: None,
      }),
    };

    Self {
      kty,
      params,
      use_: None,
      key_ops: None,
      alg: None,
      kid: None,
      x5u: None,
      x5c: None,
      x5t: None,
      x5t_s256: None,
    }
  }

  pub fn from_params(params: impl Into<JwkParams>) -> Self {
    let params: JwkParams = params.into();
    let kty: JwkType = match &params {
      JwkParams::Ec(_) => JwkType::Ec,
      JwkParams::Rsa(_) => JwkType::Rsa,
      JwkParams::Oct(_) => JwkType::Oct,
      JwkParams::Okp(_) => JwkType::Okp,
    };

    Self {
      kty,
      params,
      ..Self::new(kty)
    }
  }

  /// Builds a symmetric (`kty=oct`) key directly from raw bytes, e.g. a caller-generated CEK.
  pub fn from_oct_bytes(bytes: &[u8]) -> Self {
    Self::from_params(JwkParamsOct {
      k: crate::jwu::encode_b64(bytes),
    })
  }

  /// The raw secret bytes of an oct key, decoded from its `k` member.
  pub fn oct_k_bytes(&self) -> Result<Vec<u8>, JwkError> {
    crate::jwu::decode_b64(&self.try_oct_params()?.k)
  }

  pub fn kty(&self) -> JwkType {
    self.kty
  }

  pub fn params(&self) -> &JwkParams {
    &self.params
  }

  pub fn set_params(&mut self, params: impl Into<JwkParams>) -> Result<(), JwkError> {
    let params: JwkParams = params.into();
    let kty: JwkType = match &params {
      JwkParams::Ec(_) => JwkType::Ec,
      JwkParams::Rsa(_) => JwkType::Rsa,
      JwkParams::Oct(_) => JwkType::Oct,
      JwkParams::Okp(_) => JwkType::Okp,
    };
    if kty != self.kty {
      return Err(JwkError::InvalidKey("parameter kind disagrees with `kty`"));
    }
    self.params = params;
    Ok(())
  }

  pub fn try_ec_params(&self) -> Result<&JwkParamsEc, JwkError> {
    match &self.params {
      JwkParams::Ec(params) => Ok(params),
      _ => Err(JwkError::InvalidKey("not an EC key")),
    }
  }

  pub fn try_rsa_params(&self) -> Result<&JwkParamsRsa, JwkError> {
    match &self.params {
      JwkParams::Rsa(params) => Ok(params),
      _ => Err(JwkError::InvalidKey("not an RSA key")),
    }
  }

  pub fn try_oct_params(&self) -> Result<&JwkParamsOct, JwkError> {
    match &self.params {
      JwkParams::Oct(params) => Ok(params),
      _ => Err(JwkError::InvalidKey("not an oct key")),
    }
  }

  pub fn try_okp_params(&self) -> Result<&JwkParamsOkp, JwkError> {
    match &self.params {
      JwkParams::Okp(params) => Ok(params),
      _ => Err(JwkError::InvalidKey("not an OKP key")),
    }
  }

  pub fn use_(&self) -> Option<&JwkUse> {
    self.use_.as_ref()
  }

  pub fn set_use(&mut self, value: JwkUse) {
    self.use_ = Some(value);
  }

  pub fn key_ops(&self) -> Option<&[JwkOperation]> {
    self.key_ops.as_deref()
  }

  pub fn set_key_ops(&mut self, value: Vec<JwkOperation>) {
    self.key_ops = Some(value);
  }

  pub fn alg(&self) -> Option<&str> {
    self.alg.as_deref()
  }

  pub fn set_alg(&mut self, value: impl Into<String>) {
    self.alg = Some(value.into());
  }

  pub fn kid(&self) -> Option<&str> {
    self.kid.as_deref()
  }

  pub fn set_kid(&mut self, value: impl Into<String>) {
    self.kid = Some(value.into());
  }

  pub fn x5u(&self) -> Option<&str> {
    self.x5u.as_deref()
  }

  pub fn set_x5u(&mut self, value: impl Into<String>) {
    self.x5u = Some(value.into());
  }

  pub fn x5c(&self) -> Option<&[String]> {
    self.x5c.as_deref()
  }

  pub fn set_x5c(&mut self, value: Vec<String>) {
    self.x5c = Some(value);
  }

  pub fn x5t(&self) -> Option<&str> {
    self.x5t.as_deref()
  }

  pub fn set_x5t(&mut self, value: impl Into<String>) {
    self.x5t = Some(value.into());
  }

  pub fn x5t_s256(&self) -> Option<&str> {
    self.x5t_s256.as_deref()
  }

  pub fn set_x5t_s256(&mut self, value: impl Into<String>) {
    self.x5t_s256 = Some(value.into());
  }

  /// True iff no secret component (`d`, `p`, `q`, `dp`, `dq`, `qi`, `k`) is set.
  pub fn is_public(&self) -> bool {
    match &self.params {
      JwkParams::Ec(params) => params.d.is_none(),
      JwkParams::Rsa(params) => params.d.is_none(),
      JwkParams::Okp(params) => params.d.is_none(),
      JwkParams::Oct(_) => false,
    }
  }

  /// RFC 7517 §7 public projection: strips every secret component, keeping `kid`/`alg`/etc.
  ///
  /// For `kty=oct` there is no public projection — the `k` member *is* the secret, so the
  /// caller should never publish the result of calling this on a symmetric key.
  pub fn to_public(&self) -> Self {
    let params: JwkParams = match &self.params {
      JwkParams::Ec(params) => JwkParams::Ec(params.to_public()),
      JwkParams::Rsa(params) => JwkParams::Rsa(params.to_public()),
      JwkParams::Okp(params) => JwkParams::Okp(params.to_public()),
      JwkParams::Oct(params) => JwkParams::Oct(params.clone()),
    };

    Self { params, ..self.clone() }
  }

  /// RFC 7638 thumbprint over the required members of this key, base64url-encoded.
  pub fn thumbprint_sha256_b64(&self) -> String {
    thumbprint::thumbprint_b64(self, thumbprint::ThumbprintHash::Sha256)
  }

  pub fn thumbprint_b64(&self) -> Result<String, JwkError> {
    Ok(self.thumbprint_sha256_b64())
  }
}
