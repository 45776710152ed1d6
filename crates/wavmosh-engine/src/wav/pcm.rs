//! Payload hashing.

/// BLAKE3 hex digest of a PCM payload.
pub fn pcm_hash(payload: &[u8]) -> String {
    blake3::hash(payload).to_hex().to_string()
}
