//! Known-answer tests for the Ed25519 key managers
//!
//! Raw-framed sets add no prefix bytes, so a wrapped signer built over a
//! single raw key must reproduce the RFC 8032 signatures bit for bit.

use std::sync::Arc;

use keywheel_api::{
    KeyBytes, KeyId, KeyManager, KeyMaterial, KeyStatus, KeyTypeId, OutputPrefixKind, Primitive,
    PrimitiveKind, Signer, Verifier,
};
use keywheel_core::{PrimitiveSet, Registry};
use keywheel_sign::{
    Ed25519KeyManager, Ed25519PublicKeyManager, ED25519_PUBLIC_TYPE_ID, ED25519_TYPE_ID,
};
use keywheel_tests::vectors::ed25519_vectors;

fn raw_record(type_id: &str, payload: &[u8]) -> KeyMaterial {
    KeyMaterial::new(
        KeyTypeId::new(type_id),
        KeyId(1),
        KeyStatus::Enabled,
        OutputPrefixKind::Raw,
        KeyBytes::from_slice(payload),
    )
}

#[test]
fn signatures_match_the_published_vectors() {
    let registry = Registry::new();
    registry
        .register(Arc::new(Ed25519KeyManager::new()))
        .unwrap();

    for vector in ed25519_vectors().unwrap() {
        let records = [raw_record(ED25519_TYPE_ID, &vector.seed)];
        let set = PrimitiveSet::<Box<dyn Signer>>::assemble(
            &registry,
            &records,
            Some(KeyId(1)),
            PrimitiveKind::Sign,
            Primitive::into_signer,
        )
        .unwrap();
        let signature = set.primary().unwrap().primitive().sign(&vector.message).unwrap();
        assert_eq!(signature.as_slice(), vector.signature.as_slice());
    }
}

#[test]
fn public_only_records_verify_the_published_vectors() {
    let registry = Registry::new();
    registry
        .register(Arc::new(Ed25519PublicKeyManager::new()))
        .unwrap();

    for vector in ed25519_vectors().unwrap() {
        let records = [raw_record(ED25519_PUBLIC_TYPE_ID, &vector.public)];
        let set = PrimitiveSet::<Box<dyn Verifier>>::assemble(
            &registry,
            &records,
            None,
            PrimitiveKind::Verify,
            Primitive::into_verifier,
        )
        .unwrap();
        let entry = set.entries().next().unwrap();
        entry
            .primitive()
            .verify(&vector.message, &vector.signature)
            .unwrap();
        assert!(entry
            .primitive()
            .verify(b"not the message", &vector.signature)
            .is_err());
    }
}

#[test]
fn private_and_public_managers_agree_on_derivation() {
    let private = Ed25519KeyManager::new();
    let public = Ed25519PublicKeyManager::new();

    for vector in ed25519_vectors().unwrap() {
        let signer = private
            .primitive(&KeyBytes::from_slice(&vector.seed), PrimitiveKind::Sign)
            .unwrap()
            .into_signer()
            .unwrap();
        let verifier = public
            .primitive(&KeyBytes::from_slice(&vector.public), PrimitiveKind::Verify)
            .unwrap()
            .into_verifier()
            .unwrap();
        let signature = signer.sign(&vector.message).unwrap();
        verifier.verify(&vector.message, &signature).unwrap();
    }
}
