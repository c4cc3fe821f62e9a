//! XChaCha20-Poly1305 key manager
//!
//! 32-byte keys, 24-byte random nonces. The nonce is prepended to the raw
//! ciphertext, so every output is the nonce, then the ciphertext, then the
//! authentication tag, before the primitive-set framing is applied.

use chacha20poly1305::{
    aead::{Aead as CipherAead, AeadCore, KeyInit, Payload},
    Key, XChaCha20Poly1305, XNonce,
};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use keywheel_api::{
    Aead, Error, KeyBytes, KeyManager, KeyTemplate, KeyTypeId, OutputPrefixKind, Primitive,
    PrimitiveKind, Result,
};

/// Type identifier of the XChaCha20-Poly1305 family
pub const XCHACHA20_POLY1305_TYPE_ID: &str = "aead/xchacha20poly1305";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 24;

/// Template for a fresh XChaCha20-Poly1305 key
///
/// The key size is fixed, so the format bytes are empty.
pub fn xchacha20poly1305_template(prefix_kind: OutputPrefixKind) -> KeyTemplate {
    KeyTemplate::new(XCHACHA20_POLY1305_TYPE_ID, Vec::new(), prefix_kind)
}

/// Key manager for XChaCha20-Poly1305 AEAD keys
pub struct XChaCha20Poly1305KeyManager {
    type_id: KeyTypeId,
}

impl XChaCha20Poly1305KeyManager {
    /// Create the manager for `aead/xchacha20poly1305`
    pub fn new() -> Self {
        Self {
            type_id: KeyTypeId::new(XCHACHA20_POLY1305_TYPE_ID),
        }
    }
}

impl Default for XChaCha20Poly1305KeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyManager for XChaCha20Poly1305KeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "chacha20poly1305/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Aead]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        if format.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidFormat {
                context: "XChaCha20Poly1305KeyManager",
                message: "xchacha20poly1305 takes no format parameters".into(),
            })
        }
    }

    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        self.validate_format(format)?;
        let mut key = [0u8; KEY_LEN];
        rng.fill_bytes(&mut key);
        let payload = KeyBytes::from_slice(&key);
        key.zeroize();
        Ok(payload)
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        if kind != PrimitiveKind::Aead {
            return Err(Error::UnsupportedRole {
                requested: kind,
                message: "xchacha20poly1305 keys only serve AEAD".into(),
            });
        }
        let key: [u8; KEY_LEN] = payload.to_array().map_err(|_| Error::InvalidKey {
            context: "XChaCha20Poly1305KeyManager",
            message: format!("key must be {} bytes", KEY_LEN),
        })?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));
        Ok(Primitive::Aead(Box::new(XChaChaAead { cipher })))
    }
}

struct XChaChaAead {
    cipher: XChaCha20Poly1305,
}

impl Aead for XChaChaAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|_| Error::Other {
                context: "xchacha20poly1305 encrypt",
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
                context: "xchacha20poly1305 decrypt",
                expected: NONCE_LEN,
                actual: ciphertext.len(),
            });
        }
        let (nonce, body) = ciphertext.split_at(NONCE_LEN);
        self.cipher
            .decrypt(
                XNonce::from_slice(nonce),
                Payload {
                    msg: body,
                    aad: associated_data,
                },
            )
            .map_err(|_| Error::Other {
                context: "xchacha20poly1305 decrypt",
                message: "authentication failed".into(),
            })
    }
}
