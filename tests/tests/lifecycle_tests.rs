//! Registry and keyset lifecycle behaviour across crate boundaries

use std::sync::Arc;

use rand::rngs::OsRng;

use keywheel_api::{Error, KeyStatus, OutputPrefixKind};
use keywheel_core::{Keyset, Registry};
use keywheel_tests::harness::StampKeyManager;

fn stamp_registry(type_id: &str) -> (Registry, StampKeyManager) {
    let registry = Registry::new();
    registry
        .register(Arc::new(StampKeyManager::new(type_id)))
        .unwrap();
    (registry, StampKeyManager::new(type_id))
}

#[test]
fn registration_is_idempotent_per_implementation() {
    let registry = Registry::new();
    registry
        .register(Arc::new(StampKeyManager::new("test/stamp")))
        .unwrap();
    // Same type id, same implementation id: a no-op, not an error.
    registry
        .register(Arc::new(StampKeyManager::new("test/stamp")))
        .unwrap();
    assert_eq!(registry.registered_type_ids().len(), 1);
}

#[test]
fn first_generated_key_becomes_primary() {
    let (registry, manager) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    let first = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    assert_eq!(keyset.primary_id(), Some(first));

    let second = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    assert_ne!(first, second);
    // Plain generation does not steal the primary slot.
    assert_eq!(keyset.primary_id(), Some(first));
}

#[test]
fn rotation_promotes_the_new_key() {
    let (registry, manager) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    let old = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    let new = keyset
        .rotate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    assert_eq!(keyset.primary_id(), Some(new));
    // The previous primary stays enabled for old outputs.
    assert_eq!(keyset.record(old).unwrap().status(), KeyStatus::Enabled);
}

#[test]
fn primary_cannot_be_disabled_or_destroyed() {
    let (registry, manager) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    let primary = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    assert!(keyset.disable(primary).is_err());
    assert!(keyset.destroy(primary).is_err());
    assert_eq!(keyset.record(primary).unwrap().status(), KeyStatus::Enabled);
}

#[test]
fn disabled_key_cannot_be_promoted() {
    let (registry, manager) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    let other = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    keyset.disable(other).unwrap();
    assert!(matches!(
        keyset.set_primary(other),
        Err(Error::PrimaryKeyUnavailable { .. })
    ));
}

#[test]
fn destroyed_key_keeps_its_id_but_loses_its_payload() {
    let (registry, manager) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    let doomed = keyset
        .generate(&registry, &manager.template(OutputPrefixKind::Tink), &mut OsRng)
        .unwrap();
    keyset.destroy(doomed).unwrap();

    let record = keyset.record(doomed).unwrap();
    assert_eq!(record.status(), KeyStatus::Destroyed);
    assert!(record.payload().is_empty());
    // The tombstone cannot come back.
    assert!(keyset.enable(doomed).is_err());
}

#[test]
fn unknown_template_type_is_rejected() {
    let (registry, _) = stamp_registry("test/stamp");
    let mut keyset = Keyset::new();
    let stranger = StampKeyManager::new("test/unregistered");
    let result = keyset.generate(
        &registry,
        &stranger.template(OutputPrefixKind::Tink),
        &mut OsRng,
    );
    assert!(matches!(result, Err(Error::UnknownKeyType { .. })));
}
