/// Content-hash translation
///
/// The registry stores a bare 32-byte SHA-256 digest. Content-addressed
/// gateways want the self-describing multihash form: algorithm byte 0x12
/// (sha2-256), length byte 0x20 (32), then the digest, all Base58-encoded.
use crate::error::{ResolverError, ResolverResult};

/// Multihash prefix for sha2-256 with a 32-byte digest, as hex
const SHA256_PREFIX: &str = "1220";

/// Expected length of prefix + digest
const MULTIHASH_LEN: usize = 34;

/// Translate a hex digest from the registry into a content address
///
/// Accepts the digest with or without a `0x` prefix. Fails if the prefixed
/// value is not exactly 34 bytes.
pub fn to_content_address(hex_digest: &str) -> ResolverResult<String> {
    let digest = hex_digest.strip_prefix("0x").unwrap_or(hex_digest);

    let bytes = hex::decode(format!("{}{}", SHA256_PREFIX, digest))
        .map_err(|e| ResolverError::Translate(format!("digest {:?} is not hex: {}", hex_digest, e)))?;

    if bytes.len() != MULTIHASH_LEN {
        return Err(ResolverError::Translate(format!(
            "digest {:?} yields {} bytes, expected {}",
            hex_digest,
            bytes.len(),
            MULTIHASH_LEN
        )));
    }

    Ok(bs58::encode(bytes).into_string())
}
