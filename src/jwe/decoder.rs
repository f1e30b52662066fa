// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The JWE decryption pipeline (RFC 7516 §5.2, `spec.md` §4.4).
//!
//! Every failure that depends on secret material collapses into a single
//! [`JweError::DecryptionFailed`], so a caller (or an attacker) cannot distinguish "wrong key",
//! "wrong tag" and "bad padding" from the error alone (`spec.md` §9).

use serde_json::Map;
use serde_json::Value;

use crate::error::JweError;
use crate::jwe::algorithm::JweAlgorithm;
use crate::jwe::algorithm::JweCompression;
use crate::jwe::collaborator::JweCollaborator;
use crate::jwe::header::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

/// The recipient-side key material needed to unwrap one CEK.
pub enum JweDecryptionKey<'a> {
  /// The recipient's own private key: oct for `dir`/AES-KW/AES-GCMKW, RSA private for
  /// `RSA1_5`/`RSA-OAEP*`, or EC/OKP private for ECDH-ES/ECDH-1PU agreement.
  Key(&'a Jwk),
  Password(&'a [u8]),
}

struct ParsedJwe {
  protected: JweHeader,
  protected_b64: String,
  shared_unprotected: Option<JweHeader>,
  recipients: Vec<(Option<JweHeader>, Vec<u8>)>,
  iv: Vec<u8>,
  ciphertext: Vec<u8>,
  tag: Vec<u8>,
}

fn b64_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, JweError> {
  obj
    .get(field)
    .and_then(Value::as_str)
    .ok_or(JweError::MalformedInput(field_missing_message(field)))
}

fn field_missing_message(field: &'static str) -> &'static str {
  match field {
    "protected" => "missing `protected`",
    "iv" => "missing `iv`",
    "ciphertext" => "missing `ciphertext`",
    "tag" => "missing `tag`",
    "encrypted_key" => "missing `encrypted_key`",
    _ => "missing a required JWE member",
  }
}

fn parse_compact(data: &[u8]) -> Result<ParsedJwe, JweError> {
  let segments: Vec<&[u8]> = jwu::parse_segments(data);
  let [protected_seg, key_seg, iv_seg, ciphertext_seg, tag_seg] = <[&[u8]; 5]>::try_from(segments.as_slice())
    .map_err(|_| JweError::MalformedInput("compact serialization requires exactly five `.`-separated parts"))?;

  let protected_bytes: Vec<u8> = jwu::decode_b64(protected_seg)?;
  let protected: JweHeader = serde_json::from_slice(&protected_bytes)?;
  let encrypted_key: Vec<u8> = jwu::decode_b64(key_seg)?;

  Ok(ParsedJwe {
    protected,
    protected_b64: String::from_utf8_lossy(protected_seg).into_owned(),
    shared_unprotected: None,
    recipients: vec![(None, encrypted_key)],
    iv: jwu::decode_b64(iv_seg)?,
    ciphertext: jwu::decode_b64(ciphertext_seg)?,
    tag: jwu::decode_b64(tag_seg)?,
  })
}

fn parse_json(data: &[u8], general: bool) -> Result<ParsedJwe, JweError> {
  let value: Value = serde_json::from_slice(data)?;
  let obj: &Map<String, Value> = value.as_object().ok_or(JweError::MalformedInput("expected a JSON object"))?;

  let protected_b64: &str = b64_str(obj, "protected")?;
  let protected_bytes: Vec<u8> = jwu::decode_b64(protected_b64)?;
  let protected: JweHeader = serde_json::from_slice(&protected_bytes)?;

  let shared_unprotected: Option<JweHeader> = match obj.get("unprotected") {
    Some(value) => Some(serde_json::from_value(value.clone())?),
    None => None,
  };

  let recipients: Vec<(Option<JweHeader>, Vec<u8>)> = if general {
    let array = obj
      .get("recipients")
      .and_then(Value::as_array)
      .ok_or(JweError::MalformedInput("expected a `recipients` array"))?;
    array
      .iter()
      .map(|entry| {
        let entry_obj = entry.as_object().ok_or(JweError::MalformedInput("expected a recipient object"))?;
        let header: Option<JweHeader> = match entry_obj.get("header") {
          Some(value) => Some(serde_json::from_value(value.clone())?),
          None => None,
        };
        let encrypted_key: Vec<u8> = match entry_obj.get("encrypted_key").and_then(Value::as_str) {
          Some(b64) => jwu::decode_b64(b64)?,
          None => Vec::new(),
        };
        Ok((header, encrypted_key))
      })
      .collect::<Result<Vec<_>, JweError>>()?
  } else {
    let header: Option<JweHeader> = match obj.get("header") {
      Some(value) => Some(serde_json::from_value(value.clone())?),
      None => None,
    };
    let encrypted_key: Vec<u8> = match obj.get("encrypted_key").and_then(Value::as_str) {
      Some(b64) => jwu::decode_b64(b64)?,
      None => Vec::new(),
    };
    vec![(header, encrypted_key)]
  };

  let iv: Vec<u8> = match obj.get("iv").and_then(Value::as_str) {
    Some(b64) => jwu::decode_b64(b64)?,
    None => Vec::new(),
  };
  let ciphertext: Vec<u8> = jwu::decode_b64(b64_str(obj, "ciphertext")?)?;
  let tag: Vec<u8> = jwu::decode_b64(b64_str(obj, "tag")?)?;

  Ok(ParsedJwe {
    protected,
    protected_b64: protected_b64.to_owned(),
    shared_unprotected,
    recipients,
    iv,
    ciphertext,
    tag,
  })
}

/// Multi-format JWE decryption. Holds only the collaborator and (for ECDH-1PU) the sender's
/// static public key; the recipient's own key is supplied per call.
pub struct Decoder<'a, C: JweCollaborator> {
  collaborator: &'a C,
  aad: Option<&'a [u8]>,
  sender_static_public_key: Option<&'a Jwk>,
  try_all_recipients: bool,
}

impl<'a, C: JweCollaborator> Decoder<'a, C> {
  pub fn new(collaborator: &'a C) -> Self {
    Self {
      collaborator,
      aad: None,
      sender_static_public_key: None,
      try_all_recipients: false,
    }
  }

  pub fn aad(mut self, aad: &'a [u8]) -> Self {
    self.aad = Some(aad);
    self
  }

  /// Required to verify the sender for any `ECDH-1PU*` recipient.
  pub fn sender_static_public_key(mut self, key: &'a Jwk) -> Self {
    self.sender_static_public_key = Some(key);
    self
  }

  /// Opts into trying every recipient entry in turn instead of selecting the one whose header
  /// identifies the supplied key. Collapses a no-match outcome into `DecryptionFailed` rather
  /// than the more specific `NoRecipientMatch` (`spec.md` §4.4; mirrors
  /// [`crate::jws::Decoder::verify_matching`] on the JWS side, except that the general-matching
  /// behavior is the default here and this flag opts *out* of it).
  pub fn try_all_recipients(mut self, try_all: bool) -> Self {
    self.try_all_recipients = try_all;
    self
  }

  /// Whether `recipient_header`'s `kid`/`jwk` thumbprint/`x5t`/`x5t#S256` identifies `key`,
  /// mirroring [`crate::jws::Decoder::verify_matching`].
  fn recipient_matches_key(&self, parsed: &ParsedJwe, recipient_header: Option<&JweHeader>, key: &Jwk) -> bool {
    let protected_opt = Some(parsed.protected.clone());
    let recipient_opt: Option<JweHeader> = recipient_header.cloned();
    let header_set = crate::header_set::JwtHeaderSet::new()
      .protected(&protected_opt)
      .unprotected(&parsed.shared_unprotected)
      .per_recipient(&recipient_opt);

    let key_thumbprint: String = key.thumbprint_sha256_b64();

    let kid_match = header_set
      .resolve(|h| h.kid().map(str::to_owned))
      .map(|hk| Some(hk.as_str()) == key.kid())
      .unwrap_or(false);
    let thumb_match = header_set
      .resolve(|h| h.jwk().map(Jwk::thumbprint_sha256_b64))
      .map(|ht| ht == key_thumbprint)
      .unwrap_or(false);
    let x5t_match = header_set
      .resolve(|h| h.x5t().map(str::to_owned))
      .map(|v| Some(v.as_str()) == key.x5t())
      .unwrap_or(false);
    let x5t_s256_match = header_set
      .resolve(|h| h.x5t_s256().map(str::to_owned))
      .map(|v| Some(v.as_str()) == key.x5t_s256())
      .unwrap_or(false);

    kid_match || thumb_match || x5t_match || x5t_s256_match
  }

  fn other_info(&self, alg_id: &str, apu: Option<&str>, apv: Option<&str>, keylen_bits: u32, supp_priv_info: &[u8]) -> Result<Vec<u8>, JweError> {
    let apu_bytes: Vec<u8> = apu.map(jwu::decode_b64).transpose()?.unwrap_or_default();
    let apv_bytes: Vec<u8> = apv.map(jwu::decode_b64).transpose()?.unwrap_or_default();

    let mut info: Vec<u8> = Vec::new();
    info.extend(jwu::concat_kdf_info(alg_id.as_bytes()));
    info.extend(jwu::concat_kdf_info(&apu_bytes));
    info.extend(jwu::concat_kdf_info(&apv_bytes));
    info.extend(keylen_bits.to_be_bytes());
    info.extend(supp_priv_info);
    Ok(info)
  }

  /// Computes `Z` for ECDH-ES, or `Z_e ‖ Z_s` for ECDH-1PU, mirroring
  /// [`Encoder::agree`](crate::jwe::encoder::Encoder).
  fn agree(&self, alg: &JweAlgorithm, recipient_private: &Jwk, epk: &Jwk) -> Result<Vec<u8>, JweError> {
    let z_ephemeral: Vec<u8> = self.collaborator.key_agreement(recipient_private, epk)?;
    if !alg.is_one_pass_unified() {
      return Ok(z_ephemeral);
    }
    let sender_static: &Jwk = self
      .sender_static_public_key
      .ok_or(JweError::MalformedInput("ECDH-1PU requires the sender's static public key"))?;
    let z_static: Vec<u8> = self.collaborator.key_agreement(recipient_private, sender_static)?;
    let mut z: Vec<u8> = Vec::with_capacity(z_ephemeral.len() + z_static.len());
    z.extend_from_slice(&z_ephemeral);
    z.extend_from_slice(&z_static);
    Ok(z)
  }

  /// Attempts to recover the CEK for exactly one recipient entry. Every failure here is
  /// collapsed to `()` by the caller before being surfaced as `DecryptionFailed`.
  fn try_recover_cek(
    &self,
    parsed: &ParsedJwe,
    recipient_header: Option<&JweHeader>,
    encrypted_key: &[u8],
    key: &JweDecryptionKey<'_>,
    enc_cek_size_bytes: usize,
  ) -> Result<Vec<u8>, ()> {
    let protected_opt = Some(parsed.protected.clone());
    let recipient_opt: Option<JweHeader> = recipient_header.cloned();
    let header_set = crate::header_set::JwtHeaderSet::new()
      .protected(&protected_opt)
      .unprotected(&parsed.shared_unprotected)
      .per_recipient(&recipient_opt);

    let alg: JweAlgorithm = header_set.resolve(|h| h.alg().cloned()).ok_or(())?;

    match (&alg, key) {
      (JweAlgorithm::Dir, JweDecryptionKey::Key(k)) => k.oct_k_bytes().map_err(|_| ()),

      (alg, JweDecryptionKey::Key(k)) if alg.is_key_agreement() => {
        let k: &Jwk = *k;
        let epk: Jwk = header_set.resolve(|h| h.epk().cloned()).ok_or(())?;
        let epk_ref: &Jwk = &epk;
        let z_info_alg_id: String;
        let alg_id: &str = if alg.is_direct_agreement() {
          z_info_alg_id = parsed.protected.enc().map(|e| e.name().to_owned()).ok_or(())?;
          &z_info_alg_id
        } else {
          alg.name()
        };

        let apu: Option<String> = header_set.resolve(|h| h.apu().map(str::to_owned));
        let apv: Option<String> = header_set.resolve(|h| h.apv().map(str::to_owned));

        let out_len_bytes: usize = if alg.is_direct_agreement() {
          enc_cek_size_bytes
        } else {
          alg.wrap_key_size_bits().ok_or(())? / 8
        };
        let supp_priv: Vec<u8> = if alg.is_one_pass_unified_kw() { parsed.tag.clone() } else { Vec::new() };

        let z: Vec<u8> = self.agree(alg, k, epk_ref).map_err(|_| ())?;
        let other_info: Vec<u8> = self
          .other_info(alg_id, apu.as_deref(), apv.as_deref(), (out_len_bytes * 8) as u32, &supp_priv)
          .map_err(|_| ())?;
        let derived: Vec<u8> = self.collaborator.concat_kdf(32, &z, &other_info, out_len_bytes).map_err(|_| ())?;

        if alg.is_direct_agreement() {
          Ok(derived)
        } else {
          let kek: Jwk = Jwk::from_oct_bytes(&derived);
          self.collaborator.key_unwrap(alg, &kek, encrypted_key).map_err(|_| ())
        }
      }

      (alg, JweDecryptionKey::Key(k)) if alg.is_gcm_key_wrap() => {
        let k: &Jwk = *k;
        let iv_b64: String = header_set.resolve(|h| h.iv().map(str::to_owned)).ok_or(())?;
        let tag_b64: String = header_set.resolve(|h| h.tag().map(str::to_owned)).ok_or(())?;
        let iv: Vec<u8> = jwu::decode_b64(&iv_b64).map_err(|_| ())?;
        let tag: Vec<u8> = jwu::decode_b64(&tag_b64).map_err(|_| ())?;
        self.collaborator.gcm_key_unwrap(alg, k, encrypted_key, &iv, &tag).map_err(|_| ())
      }

      (alg, JweDecryptionKey::Password(password)) if alg.is_password_based() => {
        let password: &[u8] = *password;
        let p2s_b64: String = header_set.resolve(|h| h.p2s().map(str::to_owned)).ok_or(())?;
        let p2c: u64 = header_set.resolve(|h| h.p2c()).ok_or(())?;
        let salt_input: Vec<u8> = jwu::decode_b64(&p2s_b64).map_err(|_| ())?;

        let mut salt: Vec<u8> = Vec::with_capacity(alg.name().len() + 1 + salt_input.len());
        salt.extend_from_slice(alg.name().as_bytes());
        salt.push(0);
        salt.extend_from_slice(&salt_input);

        let wrap_bits: usize = alg.wrap_key_size_bits().ok_or(())?;
        let kek_bytes: Vec<u8> = self.collaborator.pbkdf2(password, &salt, p2c as u32, wrap_bits / 8).map_err(|_| ())?;
        let kek: Jwk = Jwk::from_oct_bytes(&kek_bytes);
        self.collaborator.key_unwrap(alg, &kek, encrypted_key).map_err(|_| ())
      }

      (alg, JweDecryptionKey::Key(k)) => self.collaborator.key_unwrap(alg, *k, encrypted_key).map_err(|_| ()),

      _ => Err(()),
    }
  }

  /// Selects the one recipient entry whose header identifies `key` (by `kid`, `jwk` thumbprint,
  /// `x5t` or `x5t#S256`) and recovers its CEK, per `spec.md` §4.4. Fails `NoRecipientMatch` if
  /// none match, mirroring [`crate::jws::Decoder::verify_matching`] on the JWS side.
  fn recover_cek_matching(&self, parsed: &ParsedJwe, key: &JweDecryptionKey<'_>, cek_size_bytes: usize) -> Result<Vec<u8>, JweError> {
    let jwk_key: &Jwk = match key {
      JweDecryptionKey::Key(k) => *k,
      JweDecryptionKey::Password(_) => return Err(JweError::NoRecipientMatch),
    };

    for (recipient_header, encrypted_key) in &parsed.recipients {
      if self.recipient_matches_key(parsed, recipient_header.as_ref(), jwk_key) {
        return self
          .try_recover_cek(parsed, recipient_header.as_ref(), encrypted_key, key, cek_size_bytes)
          .map_err(|_| JweError::DecryptionFailed);
      }
    }
    Err(JweError::NoRecipientMatch)
  }

  /// Tries every recipient entry in turn, collapsing every outcome (wrong key, no match, bad
  /// tag) into `DecryptionFailed` (`spec.md` §9). Used when there is only one recipient entry
  /// (nothing to disambiguate) or the caller opted into [`Decoder::try_all_recipients`].
  fn recover_cek_try_all(&self, parsed: &ParsedJwe, key: &JweDecryptionKey<'_>, cek_size_bytes: usize) -> Result<Vec<u8>, JweError> {
    for (recipient_header, encrypted_key) in &parsed.recipients {
      if let Ok(cek) = self.try_recover_cek(parsed, recipient_header.as_ref(), encrypted_key, key, cek_size_bytes) {
        return Ok(cek);
      }
    }
    Err(JweError::DecryptionFailed)
  }

  fn finish(&self, parsed: ParsedJwe, key: &JweDecryptionKey<'_>) -> Result<Vec<u8>, JweError> {
    let enc = parsed.protected.enc().cloned().ok_or(JweError::MissingContentEncryption)?;
    let cek_size_bytes: usize = enc.cek_size_bits() / 8;

    let cek: Vec<u8> = if parsed.recipients.len() > 1 && !self.try_all_recipients {
      self.recover_cek_matching(&parsed, key, cek_size_bytes)?
    } else {
      self.recover_cek_try_all(&parsed, key, cek_size_bytes)?
    };

    let aad_bytes: Vec<u8> = jwu::create_aad(parsed.protected_b64.as_bytes(), self.aad);
    let plaintext: Vec<u8> = self
      .collaborator
      .aead_decrypt(&enc, &cek, &parsed.iv, &aad_bytes, &parsed.ciphertext, &parsed.tag)
      .map_err(|_| JweError::DecryptionFailed)?;

    match parsed.protected.zip() {
      Some(JweCompression::Deflate) => self.collaborator.inflate(&plaintext),
      None => Ok(plaintext),
    }
  }

  pub fn decrypt_compact(&self, data: &[u8], key: &JweDecryptionKey<'_>) -> Result<Vec<u8>, JweError> {
    let parsed: ParsedJwe = parse_compact(data)?;
    self.finish(parsed, key)
  }

  pub fn decrypt_flattened(&self, data: &[u8], key: &JweDecryptionKey<'_>) -> Result<Vec<u8>, JweError> {
    let parsed: ParsedJwe = parse_json(data, false)?;
    self.finish(parsed, key)
  }

  pub fn decrypt_general(&self, data: &[u8], key: &JweDecryptionKey<'_>) -> Result<Vec<u8>, JweError> {
    let parsed: ParsedJwe = parse_json(data, true)?;
    self.finish(parsed, key)
  }
}
