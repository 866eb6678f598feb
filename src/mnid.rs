/// MNID codec
///
/// An MNID packs a network identifier and a 20-byte account address into one
/// Base58 string: `[version:1][network:var][address:20][checksum:4]`, where the
/// checksum is the first four bytes of SHA3-256 over everything before it.
use crate::error::{ResolverError, ResolverResult};
use sha3::{Digest, Sha3_256};

/// Current MNID format version
const VERSION: u8 = 1;

/// Bytes of the decoded payload that are not network id:
/// version (1) + address (20) + checksum (4)
const FIXED_LEN: usize = 25;

/// A network-qualified account, produced only by [`decode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Network id as a compact hex string, e.g. `0x1` or `0x2a`
    pub network: String,
    /// Raw 20-byte account address
    pub address: [u8; 20],
}

impl Account {
    /// Address as a `0x`-prefixed lower-case hex string
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address))
    }
}

/// Decode an MNID string into an [`Account`]
pub fn decode(mnid: &str) -> ResolverResult<Account> {
    if mnid.is_empty() {
        return Err(ResolverError::InvalidAccount("empty MNID".to_string()));
    }

    let data = bs58::decode(mnid)
        .into_vec()
        .map_err(|e| ResolverError::InvalidAccount(format!("{}: not Base58 ({})", mnid, e)))?;

    if data.len() <= FIXED_LEN {
        return Err(ResolverError::InvalidAccount(format!(
            "{}: decoded to {} bytes, need more than {}",
            mnid,
            data.len(),
            FIXED_LEN
        )));
    }
    if data[0] != VERSION {
        return Err(ResolverError::InvalidAccount(format!(
            "{}: unsupported version {}",
            mnid, data[0]
        )));
    }

    let net_len = data.len() - FIXED_LEN;
    let (payload, check) = data.split_at(data.len() - 4);
    if checksum(payload) != check {
        return Err(ResolverError::InvalidAccount(format!(
            "{}: checksum mismatch",
            mnid
        )));
    }

    let mut address = [0u8; 20];
    address.copy_from_slice(&payload[1 + net_len..]);

    Ok(Account {
        network: network_to_hex(&payload[1..1 + net_len]),
        address,
    })
}

/// Encode an [`Account`] back into its MNID string
///
/// Inverse of [`decode`]: `decode(&encode(&a)?)? == a` for every valid account.
pub fn encode(account: &Account) -> ResolverResult<String> {
    let network = network_from_hex(&account.network)?;

    let mut payload = Vec::with_capacity(1 + network.len() + 20 + 4);
    payload.push(VERSION);
    payload.extend_from_slice(&network);
    payload.extend_from_slice(&account.address);
    let check = checksum(&payload);
    payload.extend_from_slice(&check);

    Ok(bs58::encode(payload).into_string())
}

/// Cheap structural check without surfacing a decode error
pub fn is_mnid(text: &str) -> bool {
    decode(text).is_ok()
}

fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = Sha3_256::digest(payload);
    let mut check = [0u8; 4];
    check.copy_from_slice(&digest[..4]);
    check
}

/// Render network bytes as compact hex: `[0x01]` becomes `0x1`, `[0x2a]` stays `0x2a`
fn network_to_hex(bytes: &[u8]) -> String {
    let hex = hex::encode(bytes);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Parse a compact hex network id back into bytes, padding to a whole byte
fn network_from_hex(network: &str) -> ResolverResult<Vec<u8>> {
    let stripped = network.strip_prefix("0x").unwrap_or(network);
    if stripped.is_empty() {
        return Err(ResolverError::InvalidAccount(format!(
            "empty network id in {:?}",
            network
        )));
    }
    let padded = if stripped.len() % 2 == 0 {
        stripped.to_string()
    } else {
        format!("0{}", stripped)
    };
    hex::decode(&padded)
        .map_err(|e| ResolverError::InvalidAccount(format!("bad network id {:?}: {}", network, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_MNID: &str = "2nQtiQG6Cgm1GYTBaaKAgr76uY7iSexUkqX";
    const ADDRESS_HEX: &str = "00521965e7bd230323c423d96c657db5b79d099f";

    fn known_address() -> [u8; 20] {
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hex::decode(ADDRESS_HEX).unwrap());
        addr
    }

    #[test]
    fn decodes_known_mainnet_mnid() {
        let account = decode(MAINNET_MNID).unwrap();
        assert_eq!(account.network, "0x1");
        assert_eq!(account.address, known_address());
        assert_eq!(account.address_hex(), format!("0x{}", ADDRESS_HEX));
    }

    #[test]
    fn encodes_known_account() {
        let account = Account {
            network: "0x1".to_string(),
            address: known_address(),
        };
        assert_eq!(encode(&account).unwrap(), MAINNET_MNID);
    }

    #[test]
    fn round_trips_across_networks() {
        for network in ["0x1", "0x3", "0x4", "0x2a", "0x63"] {
            let account = Account {
                network: network.to_string(),
                address: known_address(),
            };
            let mnid = encode(&account).unwrap();
            assert_eq!(decode(&mnid).unwrap(), account, "network {}", network);
        }
    }

    #[test]
    fn rejects_empty_string() {
        assert!(matches!(
            decode(""),
            Err(ResolverError::InvalidAccount(_))
        ));
    }

    #[test]
    fn rejects_non_base58() {
        assert!(matches!(
            decode("0lIO not base58"),
            Err(ResolverError::InvalidAccount(_))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        // Valid Base58 but far too short to hold an address
        assert!(matches!(
            decode("2nQtiQG6"),
            Err(ResolverError::InvalidAccount(_))
        ));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let mut chars: Vec<char> = MAINNET_MNID.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'X' { 'Y' } else { 'X' };
        let corrupted: String = chars.into_iter().collect();
        assert!(matches!(
            decode(&corrupted),
            Err(ResolverError::InvalidAccount(_))
        ));
    }

    #[test]
    fn is_mnid_distinguishes_valid_from_garbage() {
        assert!(is_mnid(MAINNET_MNID));
        assert!(!is_mnid("not-an-mnid"));
        assert!(!is_mnid(""));
    }
}
