pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Seed of the `nonce`-th instance generated from `rand_hash`.
pub fn seed_from_str(rand_hash: &str, nonce: u64) -> [u8; 32] {
    u8s_from_str(&format!("{}:{}", rand_hash, nonce))
}
