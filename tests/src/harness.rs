//! Deterministic key managers and frame helpers shared by the
//! integration tests
//!
//! `StampKeyManager` implements a trivial scheme across all three
//! primitive roles: a signature (or ciphertext) is the key payload
//! followed by the input. It is worthless cryptographically but makes
//! every test failure attributable to the dispatch machinery rather
//! than to an algorithm.

use rand_core::CryptoRngCore;

use keywheel_api::{
    Aead, Error, KeyBytes, KeyId, KeyManager, KeyTemplate, KeyTypeId, OutputPrefixKind, Primitive,
    PrimitiveKind, Result, Signer, Verifier,
};
use keywheel_core::{FORMAT_TAG, PREFIX_LEN};

pub struct StampKeyManager {
    type_id: KeyTypeId,
}

impl StampKeyManager {
    pub fn new(type_id: &str) -> Self {
        Self {
            type_id: KeyTypeId::new(type_id),
        }
    }

    /// Template for a stamp key with the given framing
    pub fn template(&self, prefix_kind: OutputPrefixKind) -> KeyTemplate {
        KeyTemplate {
            type_id: self.type_id.clone(),
            format: Vec::new(),
            prefix_kind,
        }
    }
}

impl KeyManager for StampKeyManager {
    fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    fn implementation_id(&self) -> &'static str {
        "stamp/1"
    }

    fn supported_kinds(&self) -> &[PrimitiveKind] {
        &[PrimitiveKind::Sign, PrimitiveKind::Verify, PrimitiveKind::Aead]
    }

    fn validate_format(&self, format: &[u8]) -> Result<()> {
        if format.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidFormat {
                context: "StampKeyManager",
                message: "stamp keys take no format parameters".into(),
            })
        }
    }

    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes> {
        self.validate_format(format)?;
        let mut payload = [0u8; 16];
        rng.fill_bytes(&mut payload);
        Ok(KeyBytes::from_slice(&payload))
    }

    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive> {
        let key = payload.as_bytes().to_vec();
        Ok(match kind {
            PrimitiveKind::Sign => Primitive::Signer(Box::new(Stamp { key })),
            PrimitiveKind::Verify => Primitive::Verifier(Box::new(Stamp { key })),
            PrimitiveKind::Aead => Primitive::Aead(Box::new(Stamp { key })),
        })
    }
}

struct Stamp {
    key: Vec<u8>,
}

impl Stamp {
    fn stamp(&self, input: &[u8]) -> Vec<u8> {
        let mut out = self.key.clone();
        out.extend_from_slice(input);
        out
    }

    fn unstamp(&self, framed: &[u8]) -> Result<Vec<u8>> {
        match framed.strip_prefix(self.key.as_slice()) {
            Some(rest) => Ok(rest.to_vec()),
            None => Err(Error::InvalidKey {
                context: "Stamp",
                message: "input was not produced under this key".into(),
            }),
        }
    }
}

impl Signer for Stamp {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.stamp(message))
    }
}

impl Verifier for Stamp {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        if signature == self.stamp(message).as_slice() {
            Ok(())
        } else {
            Err(Error::InvalidKey {
                context: "Stamp",
                message: "signature does not match".into(),
            })
        }
    }
}

impl Aead for Stamp {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut out = self.stamp(associated_data);
        out.extend_from_slice(plaintext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let framed = self.unstamp(ciphertext)?;
        match framed.strip_prefix(associated_data) {
            Some(rest) => Ok(rest.to_vec()),
            None => Err(Error::InvalidKey {
                context: "Stamp",
                message: "associated data does not match".into(),
            }),
        }
    }
}

/// Split a framed output into its 5-byte header and payload
///
/// Returns `None` when the input is too short or the tag byte is wrong,
/// in which case the output can only be raw.
pub fn decode_frame(output: &[u8]) -> Option<(KeyId, &[u8])> {
    if output.len() < PREFIX_LEN || output[0] != FORMAT_TAG {
        return None;
    }
    let mut id = [0u8; 4];
    id.copy_from_slice(&output[1..PREFIX_LEN]);
    Some((KeyId::from_be_bytes(id), &output[PREFIX_LEN..]))
}
