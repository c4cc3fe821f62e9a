//! Test-only key managers exercising the dispatch machinery
//!
//! The "echo" scheme is deliberately trivial: a signature is the key
//! payload followed by the message, so different keys produce different
//! signatures and verification under the wrong key fails.

use rand_core::CryptoRngCore;

use keywheel_api::{
    Error, KeyBytes, KeyManager, KeyTypeId, Primitive, PrimitiveKind, Result, Signer, Verifier,
};

pub struct EchoKeyManager {
    type_id: KeyTypeId,
    implementation_id: &'static str,
}

impl EchoKeyManager {
    pub fn new(type_id: &str) -> Self {
        Self {
            type_id: KeyTypeId::new(type_id),
            implementation_id: "echo/1",
        }
    }

    pub fn with_implementation_id(type_id: &str, implementation_id: &'static str) -> Self {
        Self {
            type_id: KeyTypeId::new(type_id),
            implementation_id,
        }
    }
}

impl KeyManager for EchoKeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        self.implementation_id
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Sign, PrimitiveKind::Verify]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        if format.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidFormat {
                context: "EchoKeyManager",
                message: "echo keys take no format parameters".into(),
            })
        }
    }

    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        self.validate_format(format)?;
        let mut payload = [0u8; 8];
        rng.fill_bytes(&mut payload);
        Ok(KeyBytes::from_slice(&payload))
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        let key = payload.as_bytes().to_vec();
        match kind {
            PrimitiveKind::Sign => Ok(Primitive::Signer(Box::new(EchoSigner { key }))),
            PrimitiveKind::Verify => Ok(Primitive::Verifier(Box::new(EchoVerifier { key }))),
            PrimitiveKind::Aead => Err(Error::UnsupportedRole {
                requested: kind,
                message: "echo keys only sign and verify".into(),
            }),
        }
    }
}

struct EchoSigner {
    key: Vec<u8>,
}

impl Signer for EchoSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut out = self.key.clone();
        out.extend_from_slice(message);
        Ok(out)
    }
}

struct EchoVerifier {
    key: Vec<u8>,
}

impl Verifier for EchoVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let mut expected = self.key.clone();
        expected.extend_from_slice(message);
        if signature == expected.as_slice() {
            Ok(())
        } else {
            Err(Error::InvalidKey {
                context: "EchoVerifier",
                message: "signature does not match".into(),
            })
        }
    }
}

/// Manager whose primitive construction always fails, for partial-assembly
/// scenarios.
pub struct BrokenKeyManager {
    type_id: KeyTypeId,
}

impl BrokenKeyManager {
    pub fn new(type_id: &str) -> Self {
        Self {
            type_id: KeyTypeId::new(type_id),
        }
    }
}

impl KeyManager for BrokenKeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "broken/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Sign, PrimitiveKind::Verify]
    }

    fn validate_format(&self, _format: &[u8]) -> Result<()> {
        Ok(())
    }

    fn new_key(&self, _format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        let mut payload = [0u8; 8];
        rng.fill_bytes(&mut payload);
        Ok(KeyBytes::from_slice(&payload))
    }

    fn primitive(&self, _payload: &KeyBytes, _kind: PrimitiveKind) -> Result<Primitive> {
        Err(Error::InvalidKey {
            context: "BrokenKeyManager",
            message: "primitive construction is wired to fail".into(),
        })
    }
}
