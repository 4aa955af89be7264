/// Compute the BLAKE3 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn blake3_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Compute a truncated BLAKE3 digest for content-addressed names.
///
/// `len` is the number of hex characters kept (a full digest is 64).
#[must_use]
pub fn short_hash(data: &[u8], len: usize) -> String {
    let mut digest = blake3_bytes(data);
    digest.truncate(len.min(64));
    digest
}
