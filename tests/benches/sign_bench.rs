use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::OsRng;
use std::sync::Arc;

use keywheel_api::{OutputPrefixKind, Signer, Verifier};
use keywheel_core::{Keyset, Registry};
use keywheel_sign::{ed25519_template, Ed25519KeyManager, WrappedSigner, WrappedVerifier};

fn bench_wrapped_sign(c: &mut Criterion) {
    let registry = Registry::new();
    registry
        .register(Arc::new(Ed25519KeyManager::new()))
        .unwrap();

    let mut group = c.benchmark_group("wrapped-ed25519");

    for size in [32, 256, 4096].iter() {
        let message = vec![0u8; *size];

        group.bench_with_input(BenchmarkId::new("sign", size), size, |b, _| {
            let mut keyset = Keyset::new();
            keyset
                .generate(&registry, &ed25519_template(OutputPrefixKind::Tink), &mut OsRng)
                .unwrap();
            let signer = WrappedSigner::for_keyset(&registry, &keyset).unwrap();
            b.iter(|| {
                let _ = signer.sign(&message);
            });
        });

        // Verification cost grows with keyset width; bench against a
        // keyset that has been rotated a few times.
        group.bench_with_input(BenchmarkId::new("verify-4-keys", size), size, |b, _| {
            let mut keyset = Keyset::new();
            for _ in 0..4 {
                keyset
                    .rotate(&registry, &ed25519_template(OutputPrefixKind::Tink), &mut OsRng)
                    .unwrap();
            }
            let signature = WrappedSigner::for_keyset(&registry, &keyset)
                .unwrap()
                .sign(&message)
                .unwrap();
            let verifier = WrappedVerifier::for_keyset(&registry, &keyset).unwrap();
            b.iter(|| {
                let _ = verifier.verify(&message, &signature);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrapped_sign);
criterion_main!(benches);
