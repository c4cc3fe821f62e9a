//! Output-prefix framing
//!
//! The one bit-exact wire contract of this library: outputs of primitives
//! built from `Tink`, `Legacy`, or `Crunchy` keys begin with exactly five
//! bytes, the format tag `0x01` followed by the key id in big-endian,
//! while `Raw` keys prepend nothing. Any implementation of this protocol
//! must produce these bytes identically to stay interoperable.

use keywheel_api::{KeyId, OutputPrefixKind};

/// Format tag carried in byte 0 of every non-raw prefix
pub const FORMAT_TAG: u8 = 0x01;

/// Length in bytes of every non-raw prefix
pub const PREFIX_LEN: usize = 5;

/// Compute the framing prefix for a key
///
/// Pure function of `(kind, key_id)`; the primitive-set assembly computes
/// it once per entry and never per call.
pub fn output_prefix(kind: OutputPrefixKind, key_id: KeyId) -> Vec<u8> {
    match kind {
        OutputPrefixKind::Raw => Vec::new(),
        OutputPrefixKind::Tink | OutputPrefixKind::Legacy | OutputPrefixKind::Crunchy => {
            let mut prefix = Vec::with_capacity(PREFIX_LEN);
            prefix.push(FORMAT_TAG);
            prefix.extend_from_slice(&key_id.to_be_bytes());
            prefix
        }
    }
}
