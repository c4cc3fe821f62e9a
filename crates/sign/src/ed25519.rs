//! Ed25519 key managers backed by `ed25519-dalek`
//!
//! Two type families: `signature/ed25519` holds a 32-byte private seed and
//! serves both sign and verify; `signature/ed25519.pub` holds a 32-byte
//! verifying key and serves verify only (it cannot generate key material).

use ed25519_dalek::{Signature as DalekSignature, Signer as DalekSigner, SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use keywheel_api::{
    Error, KeyBytes, KeyManager, KeyTemplate, KeyTypeId, OutputPrefixKind, Primitive,
    PrimitiveKind, Result, Signer, Verifier,
};

/// Type identifier of the Ed25519 private-key family
pub const ED25519_TYPE_ID: &str = "signature/ed25519";

/// Type identifier of the Ed25519 public-key family
pub const ED25519_PUBLIC_TYPE_ID: &str = "signature/ed25519.pub";

const SEED_LEN: usize = 32;

/// Template for a fresh Ed25519 private key
///
/// Ed25519 has no tunable parameters, so the format bytes are empty.
pub fn ed25519_template(prefix_kind: OutputPrefixKind) -> KeyTemplate {
    KeyTemplate::new(ED25519_TYPE_ID, Vec::new(), prefix_kind)
}

/// Key manager for Ed25519 private keys (sign and verify)
pub struct Ed25519KeyManager {
    type_id: KeyTypeId,
}

impl Ed25519KeyManager {
    /// Create the manager for `signature/ed25519`
    pub fn new() -> Self {
        Self {
            type_id: KeyTypeId::new(ED25519_TYPE_ID),
        }
    }
}

impl Default for Ed25519KeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyManager for Ed25519KeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "ed25519-dalek/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Sign, PrimitiveKind::Verify]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        reject_format_params(format, "Ed25519KeyManager")
    }

    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        self.validate_format(format)?;
        let mut seed = [0u8; SEED_LEN];
        rng.fill_bytes(&mut seed);
        let payload = KeyBytes::from_slice(&seed);
        seed.zeroize();
        Ok(payload)
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        let mut seed: [u8; SEED_LEN] = payload.to_array().map_err(|_| Error::InvalidKey {
            context: "Ed25519KeyManager",
            message: format!("seed must be {} bytes", SEED_LEN),
        })?;
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        match kind {
            PrimitiveKind::Sign => Ok(Primitive::Signer(Box::new(Ed25519Signer {
                key: signing_key,
            }))),
            PrimitiveKind::Verify => Ok(Primitive::Verifier(Box::new(Ed25519Verifier {
                key: signing_key.verifying_key(),
            }))),
            PrimitiveKind::Aead => Err(Error::UnsupportedRole {
                requested: kind,
                message: "ed25519 keys sign and verify".into(),
            }),
        }
    }
}

/// Key manager for Ed25519 public keys (verify only)
pub struct Ed25519PublicKeyManager {
    type_id: KeyTypeId,
}

impl Ed25519PublicKeyManager {
    /// Create the manager for `signature/ed25519.pub`
    pub fn new() -> Self {
        Self {
            type_id: KeyTypeId::new(ED25519_PUBLIC_TYPE_ID),
        }
    }
}

impl Default for Ed25519PublicKeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyManager for Ed25519PublicKeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "ed25519-dalek-pub/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Verify]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        reject_format_params(format, "Ed25519PublicKeyManager")
    }

    fn new_key(&self, _format: &[u8], _rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        Err(Error::GenerationFailed {
            context: "Ed25519PublicKeyManager",
            message: "public key types cannot generate key material".into(),
        })
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        if kind != PrimitiveKind::Verify {
            return Err(Error::UnsupportedRole {
                requested: kind,
                message: "ed25519 public keys only verify".into(),
            });
        }
        let bytes: [u8; SEED_LEN] = payload.to_array()?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|e| Error::InvalidKey {
            context: "Ed25519PublicKeyManager",
            message: e.to_string(),
        })?;
        Ok(Primitive::Verifier(Box::new(Ed25519Verifier { key })))
    }
}

fn reject_format_params(format: &[u8], context: &'static str) -> Result<()> {
    if format.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            context,
            message: "ed25519 takes no format parameters".into(),
        })
    }
}

struct Ed25519Signer {
    key: SigningKey,
}

impl Signer for Ed25519Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.key.sign(message).to_bytes().to_vec())
    }
}

struct Ed25519Verifier {
    key: VerifyingKey,
}

impl Verifier for Ed25519Verifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let signature =
            DalekSignature::from_slice(signature).map_err(|_| Error::InvalidKey {
                context: "Ed25519Verifier",
                message: "malformed signature".into(),
            })?;
        self.key
            .verify_strict(message, &signature)
            .map_err(|_| Error::InvalidKey {
                context: "Ed25519Verifier",
                message: "signature does not verify".into(),
            })
    }
}
