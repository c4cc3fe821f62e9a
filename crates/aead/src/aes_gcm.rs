//! AES-GCM key manager
//!
//! One type family covers AES-128-GCM and AES-256-GCM; the template's
//! format parameters select the key size as a single byte (16 or 32). An
//! empty format means AES-256. Nonces are 12 random bytes prepended to the
//! raw ciphertext.

use ::aes_gcm::{
    aead::{Aead as CipherAead, AeadCore, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, Key, Nonce,
};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use keywheel_api::{
    Aead, Error, KeyBytes, KeyManager, KeyTemplate, KeyTypeId, OutputPrefixKind, Primitive,
    PrimitiveKind, Result,
};

/// Type identifier of the AES-GCM family
pub const AES_GCM_TYPE_ID: &str = "aead/aes-gcm";

const NONCE_LEN: usize = 12;

/// Template for a fresh AES-128-GCM key
pub fn aes128_gcm_template(prefix_kind: OutputPrefixKind) -> KeyTemplate {
    KeyTemplate::new(AES_GCM_TYPE_ID, vec![16], prefix_kind)
}

/// Template for a fresh AES-256-GCM key
pub fn aes256_gcm_template(prefix_kind: OutputPrefixKind) -> KeyTemplate {
    KeyTemplate::new(AES_GCM_TYPE_ID, vec![32], prefix_kind)
}

/// Key manager for AES-GCM AEAD keys (128- and 256-bit)
pub struct AesGcmKeyManager {
    type_id: KeyTypeId,
}

impl AesGcmKeyManager {
    /// Create the manager for `aead/aes-gcm`
    pub fn new() -> Self {
        Self {
            type_id: KeyTypeId::new(AES_GCM_TYPE_ID),
        }
    }

    fn key_len(format: &[u8]) -> Result<usize> {
        match format {
            [] | [32] => Ok(32),
            [16] => Ok(16),
            [other] => Err(Error::InvalidFormat {
                context: "AesGcmKeyManager",
                message: format!("unsupported key size {}", other),
            }),
            _ => Err(Error::InvalidFormat {
                context: "AesGcmKeyManager",
                message: "format must be a single key-size byte".into(),
            }),
        }
    }
}

impl Default for AesGcmKeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyManager for AesGcmKeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "aes-gcm/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Aead]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        Self::key_len(format).map(|_| ())
    }

    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        let len = Self::key_len(format)?;
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key[..len]);
        let payload = KeyBytes::from_slice(&key[..len]);
        key.zeroize();
        Ok(payload)
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        if kind != PrimitiveKind::Aead {
            return Err(Error::UnsupportedRole {
                requested: kind,
                message: "aes-gcm keys only serve AEAD".into(),
            });
        }
        let cipher = match payload.len() {
            16 => AesGcmCipher::Aes128(Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(
                payload.as_bytes(),
            ))),
            32 => AesGcmCipher::Aes256(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(
                payload.as_bytes(),
            ))),
            other => {
                return Err(Error::InvalidKey {
                    context: "AesGcmKeyManager",
                    message: format!("key must be 16 or 32 bytes, got {}", other),
                })
            }
        };
        Ok(Primitive::Aead(Box::new(AesGcmAead { cipher })))
    }
}

enum AesGcmCipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

struct AesGcmAead {
    cipher: AesGcmCipher,
}

impl Aead for AesGcmAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let payload = Payload {
            msg: plaintext,
            aad: associated_data,
        };
        let ciphertext = match &self.cipher {
            AesGcmCipher::Aes128(c) => c.encrypt(&nonce, payload),
            AesGcmCipher::Aes256(c) => c.encrypt(&nonce, payload),
        }
        .map_err(|_| Error::Other {
            context: "aes-gcm encrypt",
            message: "encryption failed".into(),
        })?;
        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_LEN {
            return Err(Error::InvalidLength {
                context: "aes-gcm decrypt",
                expected: NONCE_LEN,
                actual: ciphertext.len(),
            });
        }
        let (nonce, body) = ciphertext.split_at(NONCE_LEN);
        let payload = Payload {
            msg: body,
            aad: associated_data,
        };
        match &self.cipher {
            AesGcmCipher::Aes128(c) => c.decrypt(Nonce::from_slice(nonce), payload),
            AesGcmCipher::Aes256(c) => c.decrypt(Nonce::from_slice(nonce), payload),
        }
        .map_err(|_| Error::Other {
            context: "aes-gcm decrypt",
            message: "authentication failed".into(),
        })
    }
}
