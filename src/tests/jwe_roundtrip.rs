// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end coverage for the JWE pipeline, backed by a small in-test [`JweCollaborator`]
//! implementation over a handful of RustCrypto crates. Not every `alg`/`enc` combination the
//! pipeline supports is exercised here; RSA key management in particular is left unimplemented
//! by [`TestCollaborator`] below since it is not part of any scenario this module covers.

use aes_gcm::aead::Aead;
use aes_gcm::aead::KeyInit;
use aes_gcm::aead::Payload;
use aes_gcm::Aes128Gcm;
use aes_gcm::Aes256Gcm;
use sha2::Digest;
use sha2::Sha256;

use crate::error::JweError;
use crate::jwe::AeadSealed;
use crate::jwe::Decoder;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweCollaborator;
use crate::jwe::JweDecryptionKey;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwe::JweRecipient;
use crate::jwe::Encoder;
use crate::jwk::EcCurve;
use crate::jwk::EcxCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsOkp;
use crate::jwk::JwkType;
use crate::jwu;

struct TestCollaborator;

fn gcm_seal_128(key: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<AeadSealed, JweError> {
  let cipher = Aes128Gcm::new_from_slice(key).map_err(|e| JweError::KeyManagementFailed(e.to_string()))?;
  let nonce = aes_gcm::Nonce::from_slice(iv);
  let sealed = cipher
    .encrypt(nonce, Payload { msg: plaintext, aad })
    .map_err(|_| JweError::KeyManagementFailed("AES-128-GCM seal failed".to_owned()))?;
  let (ciphertext, tag) = sealed.split_at(sealed.len() - 16);
  Ok(AeadSealed {
    ciphertext: ciphertext.to_vec(),
    tag: tag.to_vec(),
  })
}

fn gcm_open_128(key: &[u8], iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError> {
  let cipher = Aes128Gcm::new_from_slice(key).map_err(|e| JweError::KeyManagementFailed(e.to_string()))?;
  let nonce = aes_gcm::Nonce::from_slice(iv);
  let mut combined = Vec::with_capacity(ciphertext.len() + tag.len());
  combined.extend_from_slice(ciphertext);
  combined.extend_from_slice(tag);
  cipher
    .decrypt(nonce, Payload { msg: &combined, aad })
    .map_err(|_| JweError::DecryptionFailed)
}

fn gcm_seal_256(key: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<AeadSealed, JweError> {
  let cipher = Aes256Gcm::new_from_slice(key).map_err(|e| JweError::KeyManagementFailed(e.to_string()))?;
  let nonce = aes_gcm::Nonce::from_slice(iv);
  let sealed = cipher
    .encrypt(nonce, Payload { msg: plaintext, aad })
    .map_err(|_| JweError::KeyManagementFailed("AES-256-GCM seal failed".to_owned()))?;
  let (ciphertext, tag) = sealed.split_at(sealed.len() - 16);
  Ok(AeadSealed {
    ciphertext: ciphertext.to_vec(),
    tag: tag.to_vec(),
  })
}

fn gcm_open_256(key: &[u8], iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError> {
  let cipher = Aes256Gcm::new_from_slice(key).map_err(|e| JweError::KeyManagementFailed(e.to_string()))?;
  let nonce = aes_gcm::Nonce::from_slice(iv);
  let mut combined = Vec::with_capacity(ciphertext.len() + tag.len());
  combined.extend_from_slice(ciphertext);
  combined.extend_from_slice(tag);
  cipher
    .decrypt(nonce, Payload { msg: &combined, aad })
    .map_err(|_| JweError::DecryptionFailed)
}

fn aes_kw_wrap(wrap_bits: usize, kek_bytes: &[u8], cek: &[u8]) -> Result<Vec<u8>, JweError> {
  match wrap_bits {
    128 => {
      let key: [u8; 16] = kek_bytes
        .try_into()
        .map_err(|_| JweError::KeyManagementFailed("bad 128-bit KEK length".to_owned()))?;
      aes_kw::KekAes128::new(&key.into())
        .wrap_vec(cek)
        .map_err(|e| JweError::KeyManagementFailed(format!("{e:?}")))
    }
    256 => {
      let key: [u8; 32] = kek_bytes
        .try_into()
        .map_err(|_| JweError::KeyManagementFailed("bad 256-bit KEK length".to_owned()))?;
      aes_kw::KekAes256::new(&key.into())
        .wrap_vec(cek)
        .map_err(|e| JweError::KeyManagementFailed(format!("{e:?}")))
    }
    other => Err(JweError::UnsupportedAlgorithm(format!("{other}-bit AES-KW"))),
  }
}

fn aes_kw_unwrap(wrap_bits: usize, kek_bytes: &[u8], wrapped: &[u8]) -> Result<Vec<u8>, JweError> {
  match wrap_bits {
    128 => {
      let key: [u8; 16] = kek_bytes.try_into().map_err(|_| JweError::DecryptionFailed)?;
      aes_kw::KekAes128::new(&key.into())
        .unwrap_vec(wrapped)
        .map_err(|_| JweError::DecryptionFailed)
    }
    256 => {
      let key: [u8; 32] = kek_bytes.try_into().map_err(|_| JweError::DecryptionFailed)?;
      aes_kw::KekAes256::new(&key.into())
        .unwrap_vec(wrapped)
        .map_err(|_| JweError::DecryptionFailed)
    }
    other => Err(JweError::UnsupportedAlgorithm(format!("{other}-bit AES-KW"))),
  }
}

fn ecdh_p256(private_key: &Jwk, public_key: &Jwk) -> Result<Vec<u8>, JweError> {
  let priv_params: &JwkParamsEc = private_key.try_ec_params()?;
  let d: &str = priv_params.d.as_deref().ok_or(JweError::MalformedInput("missing EC private scalar"))?;
  let secret_key = p256::SecretKey::from_slice(&jwu::decode_b64(d)?).map_err(|_| JweError::MalformedInput("invalid EC private key"))?;

  let pub_params: &JwkParamsEc = public_key.try_ec_params()?;
  let x: Vec<u8> = jwu::decode_b64(&pub_params.x)?;
  let y: Vec<u8> = jwu::decode_b64(&pub_params.y)?;
  let mut sec1: Vec<u8> = Vec::with_capacity(1 + x.len() + y.len());
  sec1.push(0x04);
  sec1.extend_from_slice(&x);
  sec1.extend_from_slice(&y);
  let public_key = p256::PublicKey::from_sec1_bytes(&sec1).map_err(|_| JweError::MalformedInput("invalid EC public key"))?;

  let shared = p256::ecdh::diffie_hellman(secret_key.to_nonzero_scalar(), public_key.as_affine());
  Ok(shared.raw_secret_bytes().to_vec())
}

fn ecdh_x25519(private_key: &Jwk, public_key: &Jwk) -> Result<Vec<u8>, JweError> {
  let priv_params: &JwkParamsOkp = private_key.try_okp_params()?;
  let d: &str = priv_params.d.as_deref().ok_or(JweError::MalformedInput("missing OKP private scalar"))?;
  let d_bytes: [u8; 32] = jwu::decode_b64(d)?
    .try_into()
    .map_err(|_| JweError::MalformedInput("invalid X25519 private key length"))?;
  let secret = x25519_dalek::StaticSecret::from(d_bytes);

  let pub_params: &JwkParamsOkp = public_key.try_okp_params()?;
  let x_bytes: [u8; 32] = jwu::decode_b64(&pub_params.x)?
    .try_into()
    .map_err(|_| JweError::MalformedInput("invalid X25519 public key length"))?;
  let public = x25519_dalek::PublicKey::from(x_bytes);

  Ok(secret.diffie_hellman(&public).as_bytes().to_vec())
}

impl JweCollaborator for TestCollaborator {
  fn random_bytes(&self, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut buf);
    buf
  }

  fn aead_encrypt(&self, enc: &JweEncryption, cek: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<AeadSealed, JweError> {
    match enc {
      JweEncryption::A128Gcm => gcm_seal_128(cek, iv, aad, plaintext),
      JweEncryption::A256Gcm => gcm_seal_256(cek, iv, aad, plaintext),
      other => Err(JweError::UnsupportedAlgorithm(other.name().to_owned())),
    }
  }

  fn aead_decrypt(&self, enc: &JweEncryption, cek: &[u8], iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError> {
    match enc {
      JweEncryption::A128Gcm => gcm_open_128(cek, iv, aad, ciphertext, tag),
      JweEncryption::A256Gcm => gcm_open_256(cek, iv, aad, ciphertext, tag),
      other => Err(JweError::UnsupportedAlgorithm(other.name().to_owned())),
    }
  }

  fn key_wrap(&self, alg: &JweAlgorithm, kek: &Jwk, cek: &[u8]) -> Result<Vec<u8>, JweError> {
    let wrap_bits = alg.wrap_key_size_bits().ok_or_else(|| JweError::UnsupportedAlgorithm(alg.name().to_owned()))?;
    aes_kw_wrap(wrap_bits, &kek.oct_k_bytes()?, cek)
  }

  fn key_unwrap(&self, alg: &JweAlgorithm, kek: &Jwk, encrypted_key: &[u8]) -> Result<Vec<u8>, JweError> {
    let wrap_bits = alg.wrap_key_size_bits().ok_or(JweError::DecryptionFailed)?;
    aes_kw_unwrap(wrap_bits, &kek.oct_k_bytes().map_err(|_| JweError::DecryptionFailed)?, encrypted_key)
  }

  fn gcm_key_wrap(&self, alg: &JweAlgorithm, kek: &Jwk, cek: &[u8], iv: &[u8]) -> Result<(Vec<u8>, Vec<u8>), JweError> {
    let kek_bytes = kek.oct_k_bytes()?;
    let sealed = match alg.wrap_key_size_bits() {
      Some(128) => gcm_seal_128(&kek_bytes, iv, &[], cek)?,
      Some(256) => gcm_seal_256(&kek_bytes, iv, &[], cek)?,
      _ => return Err(JweError::UnsupportedAlgorithm(alg.name().to_owned())),
    };
    Ok((sealed.ciphertext, sealed.tag))
  }

  fn gcm_key_unwrap(&self, alg: &JweAlgorithm, kek: &Jwk, wrapped: &[u8], iv: &[u8], tag: &[u8]) -> Result<Vec<u8>, JweError> {
    let kek_bytes = kek.oct_k_bytes().map_err(|_| JweError::DecryptionFailed)?;
    match alg.wrap_key_size_bits() {
      Some(128) => gcm_open_128(&kek_bytes, iv, &[], wrapped, tag),
      Some(256) => gcm_open_256(&kek_bytes, iv, &[], wrapped, tag),
      _ => Err(JweError::DecryptionFailed),
    }
  }

  fn key_agreement(&self, private_key: &Jwk, public_key: &Jwk) -> Result<Vec<u8>, JweError> {
    match private_key.kty() {
      JwkType::Ec => ecdh_p256(private_key, public_key),
      JwkType::Okp => ecdh_x25519(private_key, public_key),
      _ => Err(JweError::UnsupportedAlgorithm("unsupported key-agreement key type".to_owned())),
    }
  }

  fn generate_ephemeral_key(&self, like: &Jwk) -> Result<Jwk, JweError> {
    match like.kty() {
      JwkType::Ec => {
        let secret_key = p256::SecretKey::random(&mut rand::rngs::OsRng);
        let encoded = secret_key.public_key().to_encoded_point(false);
        let mut jwk = Jwk::new(JwkType::Ec);
        jwk
          .set_params(JwkParamsEc {
            crv: EcCurve::P256.name().to_owned(),
            x: jwu::encode_b64(encoded.x().ok_or(JweError::Internal("missing EC x coordinate"))?),
            y: jwu::encode_b64(encoded.y().ok_or(JweError::Internal("missing EC y coordinate"))?),
            d: Some(jwu::encode_b64(secret_key.to_bytes())),
          })
          .map_err(JweError::from)?;
        Ok(jwk)
      }
      JwkType::Okp => {
        let secret = x25519_dalek::StaticSecret::random_from_rng(&mut rand::rngs::OsRng);
        let public = x25519_dalek::PublicKey::from(&secret);
        let mut jwk = Jwk::new(JwkType::Okp);
        jwk
          .set_params(JwkParamsOkp {
            crv: EcxCurve::X25519.name().to_owned(),
            x: jwu::encode_b64(public.as_bytes()),
            d: Some(jwu::encode_b64(secret.to_bytes())),
          })
          .map_err(JweError::from)?;
        Ok(jwk)
      }
      _ => Err(JweError::EphemeralKeyGenerationFailed("unsupported agreement key type".to_owned())),
    }
  }

  fn concat_kdf(&self, _hash_len: usize, z: &[u8], other_info: &[u8], keylen_bytes: usize) -> Result<Vec<u8>, JweError> {
    let mut output: Vec<u8> = Vec::with_capacity(keylen_bytes + Sha256::output_size());
    let mut counter: u32 = 1;
    while output.len() < keylen_bytes {
      let mut hasher = Sha256::new();
      hasher.update(counter.to_be_bytes());
      hasher.update(z);
      hasher.update(other_info);
      output.extend_from_slice(&hasher.finalize());
      counter += 1;
    }
    output.truncate(keylen_bytes);
    Ok(output)
  }

  fn pbkdf2(&self, password: &[u8], salt: &[u8], iterations: u32, key_len_bytes: usize) -> Result<Vec<u8>, JweError> {
    let mut output = vec![0u8; key_len_bytes];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut output);
    Ok(output)
  }
}

#[test]
fn test_jwe_dir_a256gcm_roundtrip() {
  let collaborator = TestCollaborator;
  let cek = Jwk::from_oct_bytes(&collaborator.random_bytes(32));

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::Dir);
  protected.set_enc(JweEncryption::A256Gcm);

  let plaintext = b"direct symmetric content encryption, no key management at all";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::Dir, &cek))
    .encrypt(plaintext)
    .unwrap();

  let decoder = Decoder::new(&collaborator);
  let decrypted = decoder.decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&cek)).unwrap();

  assert_eq!(decrypted, plaintext);
}

#[test]
fn test_jwe_a128kw_a128gcm_roundtrip() {
  let collaborator = TestCollaborator;
  let kek = Jwk::from_oct_bytes(&collaborator.random_bytes(16));

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::A128KW);
  protected.set_enc(JweEncryption::A128Gcm);

  let plaintext = b"The true sign of intelligence is not knowledge but imagination.";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::A128KW, &kek))
    .encrypt(plaintext)
    .unwrap();

  let decoder = Decoder::new(&collaborator);
  let decrypted = decoder.decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&kek)).unwrap();

  assert_eq!(decrypted, plaintext);

  let wrong_kek = Jwk::from_oct_bytes(&collaborator.random_bytes(16));
  let err = decoder.decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&wrong_kek)).unwrap_err();
  assert!(matches!(err, JweError::DecryptionFailed));
}

#[test]
fn test_jwe_ecdh_es_direct_agreement_roundtrip() {
  let collaborator = TestCollaborator;

  let recipient_secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
  let recipient_point = recipient_secret.public_key().to_encoded_point(false);
  let mut recipient_private_jwk = Jwk::new(JwkType::Ec);
  recipient_private_jwk
    .set_params(JwkParamsEc {
      crv: EcCurve::P256.name().to_owned(),
      x: jwu::encode_b64(recipient_point.x().unwrap()),
      y: jwu::encode_b64(recipient_point.y().unwrap()),
      d: Some(jwu::encode_b64(recipient_secret.to_bytes())),
    })
    .unwrap();
  let recipient_public_jwk = recipient_private_jwk.to_public();

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::EcdhEs);
  protected.set_enc(JweEncryption::A128Gcm);

  let plaintext = b"the CEK here never leaves Concat-KDF";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::EcdhEs, &recipient_public_jwk))
    .encrypt(plaintext)
    .unwrap();

  let decoder = Decoder::new(&collaborator);
  let decrypted = decoder
    .decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&recipient_private_jwk))
    .unwrap();

  assert_eq!(decrypted, plaintext);
}

#[test]
fn test_jwe_ecdh_1pu_a256kw_roundtrip() {
  let collaborator = TestCollaborator;

  let recipient_secret = x25519_dalek::StaticSecret::random_from_rng(&mut rand::rngs::OsRng);
  let recipient_public = x25519_dalek::PublicKey::from(&recipient_secret);
  let mut recipient_private_jwk = Jwk::new(JwkType::Okp);
  recipient_private_jwk
    .set_params(JwkParamsOkp {
      crv: EcxCurve::X25519.name().to_owned(),
      x: jwu::encode_b64(recipient_public.as_bytes()),
      d: Some(jwu::encode_b64(recipient_secret.to_bytes())),
    })
    .unwrap();
  let recipient_public_jwk = recipient_private_jwk.to_public();

  let sender_secret = x25519_dalek::StaticSecret::random_from_rng(&mut rand::rngs::OsRng);
  let sender_public = x25519_dalek::PublicKey::from(&sender_secret);
  let mut sender_private_jwk = Jwk::new(JwkType::Okp);
  sender_private_jwk
    .set_params(JwkParamsOkp {
      crv: EcxCurve::X25519.name().to_owned(),
      x: jwu::encode_b64(sender_public.as_bytes()),
      d: Some(jwu::encode_b64(sender_secret.to_bytes())),
    })
    .unwrap();
  let sender_public_jwk = sender_private_jwk.to_public();

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::Ecdh1PUA256KW);
  protected.set_enc(JweEncryption::A256Gcm);

  let plaintext = b"one-pass unified key agreement, sender authenticated";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::Ecdh1PUA256KW, &recipient_public_jwk))
    .sender_static_key(&sender_private_jwk)
    .encrypt(plaintext)
    .unwrap();

  let decoder = Decoder::new(&collaborator).sender_static_public_key(&sender_public_jwk);
  let decrypted = decoder
    .decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&recipient_private_jwk))
    .unwrap();
  assert_eq!(decrypted, plaintext);

  // The 1PU+KW KEK is derived from `Z_ephemeral ‖ Z_static ‖ tag`; a decoder that trusts the
  // wrong sender public key recovers a different KEK and fails to unwrap the CEK.
  let impostor_secret = x25519_dalek::StaticSecret::random_from_rng(&mut rand::rngs::OsRng);
  let impostor_public = x25519_dalek::PublicKey::from(&impostor_secret);
  let mut impostor_public_jwk = Jwk::new(JwkType::Okp);
  impostor_public_jwk
    .set_params(JwkParamsOkp {
      crv: EcxCurve::X25519.name().to_owned(),
      x: jwu::encode_b64(impostor_public.as_bytes()),
      d: None,
    })
    .unwrap();

  let impostor_decoder = Decoder::new(&collaborator).sender_static_public_key(&impostor_public_jwk);
  let err = impostor_decoder
    .decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&recipient_private_jwk))
    .unwrap_err();
  assert!(matches!(err, JweError::DecryptionFailed));
}

#[test]
fn test_jwe_pbes2_hs256_a128kw_roundtrip() {
  let collaborator = TestCollaborator;
  let password = b"correct horse battery staple";

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::Pbes2Hs256A128KW);
  protected.set_enc(JweEncryption::A128Gcm);

  let plaintext = b"password-based key management";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::with_password(JweAlgorithm::Pbes2Hs256A128KW, password, 16, 210_000))
    .encrypt(plaintext)
    .unwrap();

  let decoder = Decoder::new(&collaborator);
  let decrypted = decoder.decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Password(password)).unwrap();
  assert_eq!(decrypted, plaintext);

  let err = decoder
    .decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Password(b"wrong password"))
    .unwrap_err();
  assert!(matches!(err, JweError::DecryptionFailed));
}

fn p256_key_pair(kid: &str) -> (Jwk, Jwk) {
  let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
  let point = secret.public_key().to_encoded_point(false);
  let mut private_jwk = Jwk::new(JwkType::Ec);
  private_jwk
    .set_params(JwkParamsEc {
      crv: EcCurve::P256.name().to_owned(),
      x: jwu::encode_b64(point.x().unwrap()),
      y: jwu::encode_b64(point.y().unwrap()),
      d: Some(jwu::encode_b64(secret.to_bytes())),
    })
    .unwrap();
  private_jwk.set_kid(kid).unwrap();
  let public_jwk = private_jwk.to_public();
  (private_jwk, public_jwk)
}

/// Two ECDH-ES+A128KW recipients: each must carry its own `epk` in its own recipient header,
/// since a shared protected-header `epk` can only identify one agreement partner.
#[test]
fn test_jwe_multi_recipient_ecdh_es_epk_in_recipient_header() {
  let collaborator = TestCollaborator;

  let (alice_private, alice_public) = p256_key_pair("alice");
  let (bob_private, bob_public) = p256_key_pair("bob");

  let mut protected = JweHeader::new();
  protected.set_enc(JweEncryption::A128Gcm);

  let mut alice_header = JweHeader::new();
  alice_header.set_alg(JweAlgorithm::EcdhEsA128KW);
  alice_header.set_kid("alice");

  let mut bob_header = JweHeader::new();
  bob_header.set_alg(JweAlgorithm::EcdhEsA128KW);
  bob_header.set_kid("bob");

  let plaintext = b"the same ephemeral key agrees with every recipient in turn";

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::EcdhEsA128KW, &alice_public).header(alice_header))
    .recipient(JweRecipient::new(JweAlgorithm::EcdhEsA128KW, &bob_public).header(bob_header))
    .encrypt(plaintext)
    .unwrap();

  let parsed: serde_json::Value = serde_json::from_str(&jwe).unwrap();
  let recipients = parsed.get("recipients").and_then(serde_json::Value::as_array).unwrap();
  assert_eq!(recipients.len(), 2);
  for recipient in recipients {
    let header = recipient.get("header").expect("each recipient must carry its own header");
    assert!(header.get("epk").is_some(), "epk must be placed in the per-recipient header");
  }
  assert!(
    parsed.get("protected").is_some(),
    "protected header must still be present (just without `epk` on it)"
  );

  let decoder = Decoder::new(&collaborator);
  let alice_decrypted = decoder
    .decrypt_general(jwe.as_bytes(), &JweDecryptionKey::Key(&alice_private))
    .unwrap();
  assert_eq!(alice_decrypted, plaintext);

  let bob_decrypted = decoder.decrypt_general(jwe.as_bytes(), &JweDecryptionKey::Key(&bob_private)).unwrap();
  assert_eq!(bob_decrypted, plaintext);
}

/// A key that identifies none of the recipient headers is rejected with `NoRecipientMatch`
/// rather than the generic `DecryptionFailed`, by default.
#[test]
fn test_jwe_decoder_no_recipient_match() {
  let collaborator = TestCollaborator;

  let (_alice_private, alice_public) = p256_key_pair("alice");
  let (_bob_private, bob_public) = p256_key_pair("bob");
  let (stranger_private, _stranger_public) = p256_key_pair("stranger");

  let mut protected = JweHeader::new();
  protected.set_enc(JweEncryption::A128Gcm);

  let mut alice_header = JweHeader::new();
  alice_header.set_alg(JweAlgorithm::EcdhEsA128KW);
  alice_header.set_kid("alice");

  let mut bob_header = JweHeader::new();
  bob_header.set_alg(JweAlgorithm::EcdhEsA128KW);
  bob_header.set_kid("bob");

  let jwe = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::EcdhEsA128KW, &alice_public).header(alice_header))
    .recipient(JweRecipient::new(JweAlgorithm::EcdhEsA128KW, &bob_public).header(bob_header))
    .encrypt(b"neither recipient identifies the stranger's key")
    .unwrap();

  let decoder = Decoder::new(&collaborator);
  let err = decoder
    .decrypt_general(jwe.as_bytes(), &JweDecryptionKey::Key(&stranger_private))
    .unwrap_err();
  assert!(matches!(err, JweError::NoRecipientMatch));
}

/// A caller-supplied CEK and IV make the ciphertext reproducible, as required for fixed-vector
/// interop tests (RFC 7516 Appendix A.3, RFC 7520 §5.5).
#[test]
fn test_jwe_encoder_cek_and_iv_override_are_honored() {
  let collaborator = TestCollaborator;
  let kek = Jwk::from_oct_bytes(&collaborator.random_bytes(16));

  let fixed_cek = vec![0x42u8; 16];
  let fixed_iv = vec![0x24u8; 12];

  let mut protected = JweHeader::new();
  protected.set_alg(JweAlgorithm::A128KW);
  protected.set_enc(JweEncryption::A128Gcm);

  let plaintext = b"deterministic encryption for interop fixtures";

  let jwe = Encoder::new(&collaborator, protected.clone())
    .recipient(JweRecipient::new(JweAlgorithm::A128KW, &kek))
    .cek(&fixed_cek)
    .iv(&fixed_iv)
    .encrypt(plaintext)
    .unwrap();

  let segments: Vec<&str> = jwe.split('.').collect();
  assert_eq!(jwu::decode_b64(segments[2]).unwrap(), fixed_iv);

  let decoder = Decoder::new(&collaborator);
  let decrypted = decoder.decrypt_compact(jwe.as_bytes(), &JweDecryptionKey::Key(&kek)).unwrap();
  assert_eq!(decrypted, plaintext);

  // Same CEK/IV plus the same KEK must reproduce byte-for-byte the same JWE.
  let jwe_again = Encoder::new(&collaborator, protected)
    .recipient(JweRecipient::new(JweAlgorithm::A128KW, &kek))
    .cek(&fixed_cek)
    .iv(&fixed_iv)
    .encrypt(plaintext)
    .unwrap();
  assert_eq!(jwe, jwe_again);
}
