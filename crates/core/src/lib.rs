//! Key-type registry and primitive-set construction
//!
//! This crate is the dispatch core of keywheel: the [`Registry`] maps a key
//! type identifier to the key manager able to generate, validate, and wrap
//! keys of that type; a [`Keyset`] owns the generated key material records
//! across rotation generations; and a [`PrimitiveSet`] combines the enabled
//! records into one immutable, prefix-indexed bundle that the role-specific
//! wrappers (in `keywheel-sign` and `keywheel-aead`) turn into a single
//! callable primitive.

pub mod keyset;
#[cfg(test)]
mod testutil;
pub mod prefix;
pub mod primitive_set;
pub mod registry;

pub use keyset::Keyset;
pub use prefix::{output_prefix, FORMAT_TAG, PREFIX_LEN};
pub use primitive_set::{AssemblyWarning, Entry, PrimitiveSet};
pub use registry::Registry;
