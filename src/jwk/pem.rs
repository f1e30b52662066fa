// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! PEM/DER key import.
//!
//! Recognizes the PEM labels `PRIVATE KEY` (PKCS#8), `RSA PRIVATE KEY` (PKCS#1),
//! `EC PRIVATE KEY` (SEC1) and `PUBLIC KEY` (SubjectPublicKeyInfo), and dispatches by algorithm
//! OID to build an EC or RSA [`Jwk`]. The ASN.1 structure itself is parsed by `pkcs8`/`pkcs1`/
//! `sec1`/`spki` rather than by a bespoke decoder.

use der::Decode;
use pkcs1::RsaPrivateKey as Pkcs1RsaPrivateKey;
use pkcs1::RsaPublicKey as Pkcs1RsaPublicKey;
use pkcs1::UintRef;
use pkcs8::PrivateKeyInfo;
use sec1::EcPrivateKey;
use spki::SubjectPublicKeyInfoRef;

use crate::error::JwkError;
use crate::jwk::key::Jwk;
use crate::jwk::params::EcCurve;
use crate::jwk::params::JwkParamsEc;
use crate::jwk::params::JwkParamsRsa;
use crate::jwu;

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

/// Imports a single key from a PEM-encoded document, per the label/OID dispatch above.
pub fn pem_import(pem: &str) -> Result<Jwk, JwkError> {
  let parsed: ::pem::Pem = ::pem::parse(pem).map_err(|_| JwkError::InvalidPem)?;

  match parsed.tag() {
    "PRIVATE KEY" => import_pkcs8_private(parsed.contents()),
    "RSA PRIVATE KEY" => import_pkcs1_private(parsed.contents()),
    "EC PRIVATE KEY" => import_sec1_private(parsed.contents(), None),
    "PUBLIC KEY" => import_spki_public(parsed.contents()),
    other => Err(JwkError::UnrecognizedPemLabel(other.to_owned())),
  }
}

fn import_pkcs8_private(der: &[u8]) -> Result<Jwk, JwkError> {
  let info: PrivateKeyInfo = PrivateKeyInfo::from_der(der).map_err(|_| JwkError::InvalidPem)?;
  let oid: String = info.algorithm.oid.to_string();

  if oid == OID_RSA_ENCRYPTION {
    import_pkcs1_private(info.private_key)
  } else if oid == OID_EC_PUBLIC_KEY {
    let curve_oid: String = info
      .algorithm
      .parameters
      .ok_or(JwkError::InvalidPem)?
      .decode_as::<der::asn1::ObjectIdentifier>()
      .map_err(|_| JwkError::InvalidPem)?
      .to_string();
    let curve: EcCurve = EcCurve::from_oid(&curve_oid)?;
    import_sec1_private(info.private_key, Some(curve))
  } else {
    Err(JwkError::UnsupportedKeyAlgorithmOid(oid))
  }
}

fn import_pkcs1_private(der: &[u8]) -> Result<Jwk, JwkError> {
  let key: Pkcs1RsaPrivateKey<'_> = Pkcs1RsaPrivateKey::from_der(der).map_err(|_| JwkError::InvalidPem)?;

  let params: JwkParamsRsa = JwkParamsRsa {
    n: encode_uint(key.modulus),
    e: encode_uint(key.public_exponent),
    d: Some(encode_uint(key.private_exponent)),
    p: Some(encode_uint(key.prime1)),
    q: Some(encode_uint(key.prime2)),
    dp: Some(encode_uint(key.exponent1)),
    dq: Some(encode_uint(key.exponent2)),
    qi: Some(encode_uint(key.coefficient)),
  };

  Ok(Jwk::from_params(params))
}

fn import_sec1_private(der: &[u8], curve_hint: Option<EcCurve>) -> Result<Jwk, JwkError> {
  let key: EcPrivateKey<'_> = EcPrivateKey::from_der(der).map_err(|_| JwkError::InvalidPem)?;

  let curve: EcCurve = match curve_hint {
    Some(curve) => curve,
    None => {
      let oid: sec1::der::asn1::ObjectIdentifier = key
        .parameters
        .ok_or(JwkError::InvalidPem)?
        .named_curve()
        .ok_or(JwkError::InvalidPem)?;
      EcCurve::from_oid(&oid.to_string())?
    }
  };

  let public_key: &[u8] = key.public_key.ok_or(JwkError::InvalidPem)?;
  let (x, y) = split_uncompressed_point(public_key, curve)?;

  let params: JwkParamsEc = JwkParamsEc {
    crv: curve.name().to_owned(),
    x: jwu::encode_b64(x),
    y: jwu::encode_b64(y),
    d: Some(jwu::encode_b64(key.private_key)),
  };

  Ok(Jwk::from_params(params))
}

fn import_spki_public(der: &[u8]) -> Result<Jwk, JwkError> {
  let info: SubjectPublicKeyInfoRef<'_> = SubjectPublicKeyInfoRef::from_der(der).map_err(|_| JwkError::InvalidPem)?;
  let oid: String = info.algorithm.oid.to_string();
  let bits: &[u8] = info
    .subject_public_key
    .as_bytes()
    .ok_or(JwkError::InvalidPem)?;

  if oid == OID_RSA_ENCRYPTION {
    let key: Pkcs1RsaPublicKey<'_> = Pkcs1RsaPublicKey::from_der(bits).map_err(|_| JwkError::InvalidPem)?;
    let params: JwkParamsRsa = JwkParamsRsa {
      n: encode_uint(key.modulus),
      e: encode_uint(key.public_exponent),
      d: None,
      p: None,
      q: None,
      dp: None,
      dq: None,
      qi: None,
    };
    Ok(Jwk::from_params(params))
  } else if oid == OID_EC_PUBLIC_KEY {
    let curve_oid: String = info
      .algorithm
      .parameters
      .ok_or(JwkError::InvalidPem)?
      .decode_as::<der::asn1::ObjectIdentifier>()
      .map_err(|_| JwkError::InvalidPem)?
      .to_string();
    let curve: EcCurve = EcCurve::from_oid(&curve_oid)?;
    let (x, y) = split_uncompressed_point(bits, curve)?;

    let params: JwkParamsEc = JwkParamsEc {
      crv: curve.name().to_owned(),
      x: jwu::encode_b64(x),
      y: jwu::encode_b64(y),
      d: None,
    };
    Ok(Jwk::from_params(params))
  } else {
    Err(JwkError::UnsupportedKeyAlgorithmOid(oid))
  }
}

/// Splits an uncompressed SEC1 point (`0x04 ‖ x ‖ y`) into its two fixed-length coordinates.
fn split_uncompressed_point(point: &[u8], curve: EcCurve) -> Result<(Vec<u8>, Vec<u8>), JwkError> {
  let len: usize = curve.coordinate_len();
  if point.len() != 1 + 2 * len || point[0] != 0x04 {
    return Err(JwkError::InvalidPem);
  }
  Ok((point[1..1 + len].to_vec(), point[1 + len..1 + 2 * len].to_vec()))
}

/// Big-endian unsigned integer to base64url, with any ASN.1 leading zero byte stripped.
fn encode_uint(value: UintRef<'_>) -> String {
  let bytes: &[u8] = value.as_bytes();
  let trimmed: &[u8] = match bytes {
    [0x00, rest @ ..] if !rest.is_empty() => rest,
    _ => bytes,
  };
  jwu::encode_b64(trimmed)
}
