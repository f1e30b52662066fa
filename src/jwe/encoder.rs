// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The JWE encryption pipeline (RFC 7516 §5.1, `spec.md` §4.4).

use serde_json::Map;
use serde_json::Value;

use crate::error::JweError;
use crate::jwe::algorithm::JweAlgorithm;
use crate::jwe::collaborator::JweCollaborator;
use crate::jwe::header::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

/// The output serialization an [`Encoder`] run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JweFormat {
  #[default]
  Compact,
  Flattened,
  General,
}

/// How one recipient's CEK is protected.
pub enum JweKeySource<'a> {
  /// A symmetric oct key (AES-KW/AES-GCMKW), an RSA public key, or an EC/OKP public key for
  /// ECDH-ES/ECDH-1PU agreement.
  Key(&'a Jwk),
  /// A password, for the PBES2 family. `salt_len` is the random-salt length in bytes and
  /// `iterations` is the PBKDF2 iteration count (RFC 7518 §4.8.1).
  Password {
    password: &'a [u8],
    salt_len: usize,
    iterations: u32,
  },
}

/// One recipient of a multi-recipient JWE: its key-management algorithm and key material, plus
/// an optional per-recipient unprotected header.
pub struct JweRecipient<'a> {
  pub alg: JweAlgorithm,
  pub key_source: JweKeySource<'a>,
  pub header: Option<JweHeader>,
}

impl<'a> JweRecipient<'a> {
  pub fn new(alg: JweAlgorithm, key: &'a Jwk) -> Self {
    Self {
      alg,
      key_source: JweKeySource::Key(key),
      header: None,
    }
  }

  pub fn with_password(alg: JweAlgorithm, password: &'a [u8], salt_len: usize, iterations: u32) -> Self {
    Self {
      alg,
      key_source: JweKeySource::Password {
        password,
        salt_len,
        iterations,
      },
      header: None,
    }
  }

  pub fn header(mut self, header: JweHeader) -> Self {
    self.header = Some(header);
    self
  }
}

/// Multi-recipient JWE encryption builder. Drives every collaborator call itself; the caller
/// only supplies keys/passwords and a [`JweCollaborator`] implementation.
pub struct Encoder<'a, C: JweCollaborator> {
  collaborator: &'a C,
  protected: JweHeader,
  shared_unprotected: Option<JweHeader>,
  recipients: Vec<JweRecipient<'a>>,
  aad: Option<&'a [u8]>,
  format: JweFormat,
  sender_static_key: Option<&'a Jwk>,
  cek_override: Option<&'a [u8]>,
  iv_override: Option<&'a [u8]>,
  ephemeral_override: Option<&'a Jwk>,
}

impl<'a, C: JweCollaborator> Encoder<'a, C> {
  pub fn new(collaborator: &'a C, protected: JweHeader) -> Self {
    Self {
      collaborator,
      protected,
      shared_unprotected: None,
      recipients: Vec::new(),
      aad: None,
      format: JweFormat::default(),
      sender_static_key: None,
      cek_override: None,
      iv_override: None,
      ephemeral_override: None,
    }
  }

  pub fn shared_unprotected(mut self, header: JweHeader) -> Self {
    self.shared_unprotected = Some(header);
    self
  }

  pub fn recipient(mut self, recipient: JweRecipient<'a>) -> Self {
    self.recipients.push(recipient);
    self
  }

  pub fn aad(mut self, aad: &'a [u8]) -> Self {
    self.aad = Some(aad);
    self
  }

  pub fn format(mut self, format: JweFormat) -> Self {
    self.format = format;
    self
  }

  /// The sender's static private key, required for every `ECDH-1PU*` recipient
  /// (draft-madden-jose-ecdh-1pu §2).
  pub fn sender_static_key(mut self, key: &'a Jwk) -> Self {
    self.sender_static_key = Some(key);
    self
  }

  /// Overrides the content encryption key instead of drawing one from the collaborator's RNG.
  /// Needed to reproduce fixed-vector test cases (RFC 7516 Appendix A.3, RFC 7520 §5.5); must
  /// match `enc`'s key size.
  pub fn cek(mut self, cek: &'a [u8]) -> Self {
    self.cek_override = Some(cek);
    self
  }

  /// Overrides the content encryption IV instead of drawing one from the collaborator's RNG.
  pub fn iv(mut self, iv: &'a [u8]) -> Self {
    self.iv_override = Some(iv);
    self
  }

  /// Supplies a pre-generated ephemeral key-agreement key instead of calling
  /// [`JweCollaborator::generate_ephemeral_key`]. The key must be on the same curve as the
  /// recipients' agreement keys and carry the private scalar.
  pub fn ephemeral_key(mut self, key: &'a Jwk) -> Self {
    self.ephemeral_override = Some(key);
    self
  }

  fn cek_size_bytes(&self) -> Result<usize, JweError> {
    let enc = self.protected.enc().ok_or(JweError::MissingContentEncryption)?;
    Ok(enc.cek_size_bits() / 8)
  }

  /// Computes `Z` for ECDH-ES, or `Z_e ‖ Z_s` for ECDH-1PU (draft-madden-jose-ecdh-1pu §2.2: the
  /// ephemeral-recipient agreement first, then the sender-static-recipient agreement).
  fn agree(&self, alg: &JweAlgorithm, ephemeral_private: &Jwk, recipient_public: &Jwk) -> Result<Vec<u8>, JweError> {
    let z_ephemeral: Vec<u8> = self.collaborator.key_agreement(ephemeral_private, recipient_public)?;
    if !alg.is_one_pass_unified() {
      return Ok(z_ephemeral);
    }
    let sender_static: &Jwk = self
      .sender_static_key
      .ok_or(JweError::MalformedInput("ECDH-1PU requires a sender static key"))?;
    let z_static: Vec<u8> = self.collaborator.key_agreement(sender_static, recipient_public)?;
    let mut z: Vec<u8> = Vec::with_capacity(z_ephemeral.len() + z_static.len());
    z.extend_from_slice(&z_ephemeral);
    z.extend_from_slice(&z_static);
    Ok(z)
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

  /// Derives the agreement key material (the CEK itself for direct agreement, or a KEK for the
  /// `+A*KW` variants) via ephemeral-key generation, `Z` computation and Concat-KDF.
  fn derive_agreement_key(
    &self,
    recipient: &JweRecipient<'a>,
    recipient_key: &Jwk,
    ephemeral: &Jwk,
    out_len_bytes: usize,
    supp_priv_info: &[u8],
  ) -> Result<Vec<u8>, JweError> {
    let z: Vec<u8> = self.agree(&recipient.alg, ephemeral, recipient_key)?;

    let protected_opt = Some(self.protected.clone());
    let header_set = crate::header_set::JwtHeaderSet::new()
      .protected(&protected_opt)
      .unprotected(&self.shared_unprotected)
      .per_recipient(&recipient.header);
    let apu: Option<String> = header_set.resolve(|h| h.apu().map(str::to_owned));
    let apv: Option<String> = header_set.resolve(|h| h.apv().map(str::to_owned));

    let alg_id: &str = if recipient.alg.is_direct_agreement() {
      self.protected.enc().map(|e| e.name()).ok_or(JweError::MissingContentEncryption)?
    } else {
      recipient.alg.name()
    };

    let other_info: Vec<u8> = self.other_info(alg_id, apu.as_deref(), apv.as_deref(), (out_len_bytes * 8) as u32, supp_priv_info)?;
    self
      .collaborator
      .concat_kdf(sha2_len_for(out_len_bytes), &z, &other_info, out_len_bytes)
  }

  fn recipient_key(&self, recipient: &JweRecipient<'a>) -> Result<Jwk, JweError> {
    match &recipient.key_source {
      JweKeySource::Key(key) => Ok(Jwk::clone(*key)),
      JweKeySource::Password { .. } => Err(JweError::Internal("password recipients have no static key")),
    }
  }

  /// Wraps `cek` for one recipient once the CEK (and, for 1PU+KW, the AEAD tag) are known.
  /// `epk_in_recipient_header` is set when the JWE has more than one recipient, per `spec.md`
  /// §4.4 step 6: a shared `epk` only identifies one agreement partner, so each agreement
  /// recipient must carry its own copy rather than relying on the protected header.
  fn wrap_for_recipient(
    &self,
    recipient: &JweRecipient<'a>,
    ephemeral: Option<&Jwk>,
    cek: &[u8],
    tag: &[u8],
    epk_in_recipient_header: bool,
  ) -> Result<(Vec<u8>, JweHeader), JweError> {
    let mut header: JweHeader = recipient.header.clone().unwrap_or_default();

    match (&recipient.alg, &recipient.key_source) {
      (JweAlgorithm::Dir, _) => Ok((Vec::new(), header)),

      (alg, JweKeySource::Key(key)) if alg.is_key_agreement() => {
        let key: &Jwk = *key;
        let ephemeral: &Jwk = ephemeral.ok_or(JweError::Internal("missing ephemeral key for agreement recipient"))?;
        if epk_in_recipient_header {
          header.set_epk(ephemeral.to_public());
        }
        if alg.is_direct_agreement() {
          return Ok((Vec::new(), header));
        }
        let wrap_bits: usize = alg.wrap_key_size_bits().ok_or(JweError::Internal("agreement+KW algorithm missing key size"))?;
        let supp_priv: Vec<u8> = if alg.is_one_pass_unified_kw() { tag.to_vec() } else { Vec::new() };
        let kek_bytes: Vec<u8> = self.derive_agreement_key(recipient, key, ephemeral, wrap_bits / 8, &supp_priv)?;
        let kek: Jwk = Jwk::from_oct_bytes(&kek_bytes);
        let wrapped: Vec<u8> = self.collaborator.key_wrap(alg, &kek, cek)?;
        Ok((wrapped, header))
      }

      (alg, JweKeySource::Key(key)) if alg.is_gcm_key_wrap() => {
        let key: &Jwk = *key;
        let iv: Vec<u8> = self.collaborator.random_bytes(12);
        let (wrapped, wrap_tag) = self.collaborator.gcm_key_wrap(alg, key, cek, &iv)?;
        header.set_iv(jwu::encode_b64(&iv));
        header.set_tag(jwu::encode_b64(&wrap_tag));
        Ok((wrapped, header))
      }

      (alg, JweKeySource::Key(key)) => {
        let wrapped: Vec<u8> = self.collaborator.key_wrap(alg, *key, cek)?;
        Ok((wrapped, header))
      }

      (alg, JweKeySource::Password { password, salt_len, iterations }) if alg.is_password_based() => {
        let salt_input: Vec<u8> = self.collaborator.random_bytes(*salt_len);
        let mut salt: Vec<u8> = Vec::with_capacity(alg.name().len() + 1 + salt_input.len());
        salt.extend_from_slice(alg.name().as_bytes());
        salt.push(0);
        salt.extend_from_slice(&salt_input);

        let wrap_bits: usize = alg.wrap_key_size_bits().ok_or(JweError::Internal("PBES2 algorithm missing key size"))?;
        let kek_bytes: Vec<u8> = self.collaborator.pbkdf2(*password, &salt, *iterations, wrap_bits / 8)?;
        let kek: Jwk = Jwk::from_oct_bytes(&kek_bytes);
        let wrapped: Vec<u8> = self.collaborator.key_wrap(alg, &kek, cek)?;

        header.set_p2s(jwu::encode_b64(&salt_input));
        header.set_p2c(*iterations as u64);
        Ok((wrapped, header))
      }

      (_, JweKeySource::Password { .. }) => Err(JweError::MalformedInput("password key source requires a PBES2 `alg`")),
    }
  }

  /// Runs the full pipeline (`spec.md` §4.4 steps 1-7) and renders the chosen serialization.
  pub fn encrypt(mut self, plaintext: &[u8]) -> Result<String, JweError> {
    if self.recipients.is_empty() {
      return Err(JweError::MalformedInput("at least one recipient is required"));
    }
    if self.protected.enc().is_none() {
      return Err(JweError::MissingContentEncryption);
    }
    if self.recipients.len() > 1 {
      for recipient in &self.recipients {
        if recipient.alg.single_recipient_only() {
          return Err(JweError::TooManyRecipientsForDirectAlgorithm);
        }
      }
    }

    let needs_ephemeral: bool = self.recipients.iter().any(|r| r.alg.is_key_agreement());
    let ephemeral: Option<Jwk> = if needs_ephemeral {
      if let Some(key) = self.ephemeral_override {
        Some(Jwk::clone(key))
      } else {
        let seed_key: &Jwk = self
          .recipients
          .iter()
          .find_map(|r| match (&r.alg, &r.key_source) {
            (alg, JweKeySource::Key(key)) if alg.is_key_agreement() => Some(*key),
            _ => None,
          })
          .ok_or(JweError::Internal("agreement recipient missing key material"))?;
        Some(self.collaborator.generate_ephemeral_key(seed_key)?)
      }
    } else {
      None
    };

    let single_recipient: bool = self.recipients.len() == 1;
    if let Some(epk) = &ephemeral {
      if single_recipient {
        self.protected.set_epk(epk.to_public());
      }
    }

    let content_first: bool = self.recipients.iter().any(|r| r.alg.is_one_pass_unified_kw());

    let cek_size: usize = self.cek_size_bytes()?;
    let cek: Vec<u8> = if let Some(cek) = self.cek_override {
      if cek.len() != cek_size {
        return Err(JweError::MalformedInput("caller-supplied CEK does not match `enc`'s key size"));
      }
      cek.to_vec()
    } else if content_first {
      self.collaborator.random_bytes(cek_size)
    } else if self.recipients.len() == 1 && self.recipients[0].alg.is_direct() {
      match &self.recipients[0].key_source {
        JweKeySource::Key(key) => key.oct_k_bytes()?,
        JweKeySource::Password { .. } => return Err(JweError::MalformedInput("`dir` requires a symmetric key")),
      }
    } else if self.recipients.len() == 1 && self.recipients[0].alg.is_direct_agreement() {
      let recipient_key: Jwk = self.recipient_key(&self.recipients[0])?;
      let ephemeral_key: &Jwk = ephemeral.as_ref().ok_or(JweError::Internal("missing ephemeral key"))?;
      self.derive_agreement_key(&self.recipients[0], &recipient_key, ephemeral_key, cek_size, &[])?
    } else {
      self.collaborator.random_bytes(cek_size)
    };

    let protected_bytes: Vec<u8> = serde_json::to_vec(&self.protected)?;
    let protected_b64: String = jwu::encode_b64(&protected_bytes);
    let aad_bytes: Vec<u8> = jwu::create_aad(protected_b64.as_bytes(), self.aad);

    let compressed_plaintext: Vec<u8>;
    let body: &[u8] = match self.protected.zip() {
      Some(crate::jwe::algorithm::JweCompression::Deflate) => {
        compressed_plaintext = self.collaborator.deflate(plaintext);
        &compressed_plaintext
      }
      None => plaintext,
    };

    let enc = self.protected.enc().unwrap().clone();
    let iv_size: usize = (enc.iv_size_bits() / 8) as usize;
    let iv: Vec<u8> = match self.iv_override {
      Some(iv) if iv.len() == iv_size => iv.to_vec(),
      Some(_) => return Err(JweError::MalformedInput("caller-supplied IV does not match `enc`'s IV size")),
      None => self.collaborator.random_bytes(iv_size),
    };

    let do_content_encryption = |cek: &[u8]| -> Result<crate::jwe::collaborator::AeadSealed, JweError> {
      self.collaborator.aead_encrypt(&enc, cek, &iv, &aad_bytes, body)
    };

    let epk_in_recipient_header: bool = !single_recipient;
    let (sealed, wrapped_keys): (crate::jwe::collaborator::AeadSealed, Vec<(Vec<u8>, JweHeader)>) = if content_first {
      let sealed = do_content_encryption(&cek)?;
      let mut wrapped = Vec::with_capacity(self.recipients.len());
      for recipient in &self.recipients {
        wrapped.push(self.wrap_for_recipient(recipient, ephemeral.as_ref(), &cek, &sealed.tag, epk_in_recipient_header)?);
      }
      (sealed, wrapped)
    } else {
      let mut wrapped = Vec::with_capacity(self.recipients.len());
      for recipient in &self.recipients {
        wrapped.push(self.wrap_for_recipient(recipient, ephemeral.as_ref(), &cek, &[], epk_in_recipient_header)?);
      }
      let sealed = do_content_encryption(&cek)?;
      (sealed, wrapped)
    };

    let ciphertext_b64: String = jwu::encode_b64(&sealed.ciphertext);
    let tag_b64: String = jwu::encode_b64(&sealed.tag);
    let iv_b64: String = jwu::encode_b64(&iv);

    let format = if self.recipients.len() > 1 { JweFormat::General } else { self.format };

    match format {
      JweFormat::Compact => {
        let (encrypted_key, _) = wrapped_keys.into_iter().next().ok_or(JweError::Internal("no recipient"))?;
        Ok(format!(
          "{}.{}.{}.{}.{}",
          protected_b64,
          jwu::encode_b64(&encrypted_key),
          iv_b64,
          ciphertext_b64,
          tag_b64
        ))
      }
      JweFormat::Flattened => {
        let (encrypted_key, recipient_header) = wrapped_keys.into_iter().next().ok_or(JweError::Internal("no recipient"))?;
        let mut obj: Map<String, Value> = Map::new();
        obj.insert("protected".into(), Value::String(protected_b64));
        if let Some(shared) = &self.shared_unprotected {
          obj.insert("unprotected".into(), serde_json::to_value(shared)?);
        }
        if recipient_header != JweHeader::default() {
          obj.insert("header".into(), serde_json::to_value(&recipient_header)?);
        }
        obj.insert("encrypted_key".into(), Value::String(jwu::encode_b64(&encrypted_key)));
        obj.insert("iv".into(), Value::String(iv_b64));
        obj.insert("ciphertext".into(), Value::String(ciphertext_b64));
        obj.insert("tag".into(), Value::String(tag_b64));
        Ok(serde_json::to_string(&Value::Object(obj))?)
      }
      JweFormat::General => {
        let mut recipients_json: Vec<Value> = Vec::with_capacity(wrapped_keys.len());
        for (encrypted_key, recipient_header) in wrapped_keys {
          let mut recipient_obj: Map<String, Value> = Map::new();
          if recipient_header != JweHeader::default() {
            recipient_obj.insert("header".into(), serde_json::to_value(&recipient_header)?);
          }
          recipient_obj.insert("encrypted_key".into(), Value::String(jwu::encode_b64(&encrypted_key)));
          recipients_json.push(Value::Object(recipient_obj));
        }

        let mut obj: Map<String, Value> = Map::new();
        obj.insert("protected".into(), Value::String(protected_b64));
        if let Some(shared) = &self.shared_unprotected {
          obj.insert("unprotected".into(), serde_json::to_value(shared)?);
        }
        obj.insert("recipients".into(), Value::Array(recipients_json));
        obj.insert("iv".into(), Value::String(iv_b64));
        obj.insert("ciphertext".into(), Value::String(ciphertext_b64));
        obj.insert("tag".into(), Value::String(tag_b64));
        Ok(serde_json::to_string(&Value::Object(obj))?)
      }
    }
  }
}

/// The Concat-KDF hash length (bytes) to request for a `keylen_bytes`-sized output. Concat-KDF
/// runs over SHA-256 regardless of output length (RFC 7518 §4.6.2); `keylen_bytes` here only
/// determines how many SHA-256 rounds are needed, which is the collaborator's concern, not the
/// hash choice.
fn sha2_len_for(_keylen_bytes: usize) -> usize {
  32
}
