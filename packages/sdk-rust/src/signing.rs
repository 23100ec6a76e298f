//! Wallet identity and L1 action signing
//!
//! Exchange actions are signed as an EIP-712 "phantom agent": the action is
//! msgpack-encoded, hashed together with the nonce, and the resulting
//! `connectionId` is signed under the fixed `Exchange` domain.

use crate::error::{SdkError, SdkResult};
use crate::network::Network;
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::Serialize;
use sha3::{Digest, Keccak256};
use std::fmt;

const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const AGENT_TYPE: &str = "Agent(string source,bytes32 connectionId)";
const DOMAIN_NAME: &str = "Exchange";
const DOMAIN_VERSION: &str = "1";
const DOMAIN_CHAIN_ID: u64 = 1337;

/// Keccak-256 digest
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data.as_ref()));
    out
}

/// `{r, s, v}` signature as the exchange endpoint expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireSignature {
    pub r: String,
    pub s: String,
    pub v: u8,
}

/// Private key plus the address derived from it
#[derive(Clone)]
pub struct Wallet {
    key: SigningKey,
    address: String,
}

impl Wallet {
    /// Parse a hex private key, with or without `0x` prefix
    pub fn from_hex(private_key: &str) -> SdkResult<Self> {
        let trimmed = private_key.trim();
        let hex_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let bytes = hex::decode(hex_key).map_err(|e| SdkError::InvalidKey(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(SdkError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let key = SigningKey::from_slice(&bytes).map_err(|e| SdkError::InvalidKey(e.to_string()))?;
        let address = address_of(key.verifying_key());

        Ok(Self { key, address })
    }

    /// Lowercase `0x`-prefixed address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign an exchange action for the given network
    pub fn sign_l1_action<T: Serialize>(
        &self,
        action: &T,
        nonce: u64,
        network: Network,
    ) -> SdkResult<WireSignature> {
        let connection_id = action_hash(action, nonce)?;
        let digest = agent_digest(&connection_id, network);
        self.sign_digest(&digest)
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> SdkResult<WireSignature> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .map_err(|e| SdkError::InvalidKey(e.to_string()))?;

        let bytes = signature.to_bytes();
        Ok(WireSignature {
            r: format!("0x{}", hex::encode(&bytes[..32])),
            s: format!("0x{}", hex::encode(&bytes[32..])),
            v: 27 + recovery_id.to_byte(),
        })
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag
    let hash = keccak256(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// keccak(msgpack(action) || nonce || vault flag)
pub fn action_hash<T: Serialize>(action: &T, nonce: u64) -> SdkResult<[u8; 32]> {
    let mut data = rmp_serde::to_vec_named(action)?;
    data.extend_from_slice(&nonce.to_be_bytes());
    // No vault address
    data.push(0x00);
    Ok(keccak256(&data))
}

/// EIP-712 digest of the phantom agent wrapping `connection_id`
pub fn agent_digest(connection_id: &[u8; 32], network: Network) -> [u8; 32] {
    let mut struct_data = Vec::with_capacity(96);
    struct_data.extend_from_slice(&keccak256(AGENT_TYPE));
    struct_data.extend_from_slice(&keccak256(network.agent_source()));
    struct_data.extend_from_slice(connection_id);
    let struct_hash = keccak256(&struct_data);

    let mut payload = Vec::with_capacity(66);
    payload.extend_from_slice(&[0x19, 0x01]);
    payload.extend_from_slice(&domain_separator());
    payload.extend_from_slice(&struct_hash);
    keccak256(&payload)
}

fn domain_separator() -> [u8; 32] {
    let mut chain_id = [0u8; 32];
    chain_id[24..].copy_from_slice(&DOMAIN_CHAIN_ID.to_be_bytes());
    let verifying_contract = [0u8; 32];

    let mut data = Vec::with_capacity(160);
    data.extend_from_slice(&keccak256(EIP712_DOMAIN_TYPE));
    data.extend_from_slice(&keccak256(DOMAIN_NAME));
    data.extend_from_slice(&keccak256(DOMAIN_VERSION));
    data.extend_from_slice(&chain_id);
    data.extend_from_slice(&verifying_contract);
    keccak256(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::{RecoveryId, Signature};

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[derive(Serialize)]
    struct DummyAction {
        #[serde(rename = "type")]
        kind: &'static str,
        num: u64,
    }

    fn recover(wallet_sig: &WireSignature, digest: &[u8; 32]) -> String {
        let mut bytes = hex::decode(wallet_sig.r.trim_start_matches("0x")).unwrap();
        bytes.extend(hex::decode(wallet_sig.s.trim_start_matches("0x")).unwrap());
        let signature = Signature::from_slice(&bytes).unwrap();
        let recovery_id = RecoveryId::from_byte(wallet_sig.v - 27).unwrap();
        let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id).unwrap();
        address_of(&key)
    }

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_address_derivation() {
        let wallet = Wallet::from_hex(KEY_ONE).unwrap();
        assert_eq!(wallet.address(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");

        let unprefixed = Wallet::from_hex(KEY_ONE.trim_start_matches("0x")).unwrap();
        assert_eq!(unprefixed.address(), wallet.address());
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(Wallet::from_hex("0x1234"), Err(SdkError::InvalidKey(_))));
        assert!(matches!(Wallet::from_hex("not-hex"), Err(SdkError::InvalidKey(_))));
        // Zero is not a valid scalar
        let zero = format!("0x{}", "00".repeat(32));
        assert!(matches!(Wallet::from_hex(&zero), Err(SdkError::InvalidKey(_))));
    }

    #[test]
    fn test_signature_recovers_to_wallet() {
        let wallet = Wallet::from_hex(KEY_ONE).unwrap();
        let action = DummyAction { kind: "dummy", num: 100_000_000_000 };

        let signature = wallet.sign_l1_action(&action, 0, Network::Mainnet).unwrap();
        assert!(signature.v == 27 || signature.v == 28);
        assert_eq!(signature.r.len(), 66);
        assert_eq!(signature.s.len(), 66);

        let digest = agent_digest(&action_hash(&action, 0).unwrap(), Network::Mainnet);
        assert_eq!(recover(&signature, &digest), wallet.address());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let wallet = Wallet::from_hex(KEY_ONE).unwrap();
        let action = DummyAction { kind: "dummy", num: 1 };

        let first = wallet.sign_l1_action(&action, 42, Network::Testnet).unwrap();
        let second = wallet.sign_l1_action(&action, 42, Network::Testnet).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_network_and_nonce_change_digest() {
        let action = DummyAction { kind: "dummy", num: 1 };
        let hash = action_hash(&action, 7).unwrap();

        assert_ne!(
            agent_digest(&hash, Network::Mainnet),
            agent_digest(&hash, Network::Testnet)
        );
        assert_ne!(hash, action_hash(&action, 8).unwrap());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_hex(KEY_ONE).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains(wallet.address()));
        assert!(!debug.contains("0000000000000000000000000000000000000000000000000000000000000001"));
    }
}
