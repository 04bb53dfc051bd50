use std::str::FromStr;

use async_trait::async_trait;
use blake2::{
    Blake2b,
    digest::{Digest, consts::U64},
};
use subxt_signer::{SecretUri, sr25519::Keypair};

use crate::error::Result;

/// Signing identity of the connected wallet - enables mocking in tests
#[async_trait]
pub trait MessageSigner: Send + Sync {
    /// Address shown to the user and sent to the vote service
    fn address(&self) -> &str;

    /// Sign an arbitrary text message, returning the hex encoded signature
    ///
    /// An empty signature means the wallet declined to sign.
    async fn sign_message(&self, message: &str) -> Result<String>;
}

/// Wallet backed by an sr25519 keypair derived from a secret URI
/// (e.g., "//Alice" or a mnemonic phrase)
pub struct Sr25519Wallet {
    keypair: Keypair,
    address: String,
}

impl Sr25519Wallet {
    pub fn from_uri(secret_uri: &str, ss58_prefix: u16) -> Result<Self> {
        let uri = SecretUri::from_str(secret_uri)?;
        let keypair = Keypair::from_uri(&uri)?;
        let address = encode_ss58(&keypair.public_key().0, ss58_prefix);
        log::debug!("Wallet connected: {}", address);
        Ok(Self { keypair, address })
    }
}

impl std::fmt::Debug for Sr25519Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sr25519Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessageSigner for Sr25519Wallet {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self.keypair.sign(message.as_bytes());
        Ok(hex::encode(signature.0))
    }
}

/// Encode a 32-byte public key as an SS58 address with the given prefix
///
/// SS58 format: prefix (1-2 bytes) + account (32 bytes) + checksum (2 bytes),
/// base58 encoded
pub fn encode_ss58(public_key: &[u8; 32], prefix: u16) -> String {
    const SS58_PREFIX: &[u8] = b"SS58PRE";

    let mut data = Vec::with_capacity(36);
    if prefix < 64 {
        data.push(prefix as u8);
    } else {
        data.push(((prefix & 0x00FC) >> 2) as u8 | 0x40);
        data.push(((prefix >> 8) as u8) | ((prefix & 0x0003) << 6) as u8);
    }
    data.extend_from_slice(public_key);

    let checksum = Blake2b::<U64>::new()
        .chain_update(SS58_PREFIX)
        .chain_update(&data)
        .finalize();
    data.extend_from_slice(&checksum[..2]);

    bs58::encode(data).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiveVoteError;

    // Alice's well-known public key
    const ALICE_PUBKEY: [u8; 32] = [
        0xd4, 0x35, 0x93, 0xc7, 0x15, 0xfd, 0xd3, 0x1c, 0x61, 0x14, 0x1a, 0xbd, 0x04, 0xa9, 0x9f,
        0xd6, 0x82, 0x2c, 0x85, 0x58, 0x85, 0x4c, 0xcd, 0xe3, 0x9a, 0x56, 0x84, 0xe7, 0xa5, 0x6d,
        0xa2, 0x7d,
    ];
    const ALICE_SS58: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn test_wallet_from_uri_alice() {
        let wallet = Sr25519Wallet::from_uri("//Alice", 42).unwrap();
        assert_eq!(wallet.keypair.public_key().0, ALICE_PUBKEY);
        assert_eq!(wallet.address(), ALICE_SS58);
    }

    #[test]
    fn test_wallet_invalid_uri() {
        let result = Sr25519Wallet::from_uri("not a valid uri !@#$%", 42);
        assert!(matches!(result, Err(LiveVoteError::InvalidSecretUri(_))));
    }

    #[test]
    fn test_encode_ss58_substrate_prefix() {
        assert_eq!(encode_ss58(&ALICE_PUBKEY, 42), ALICE_SS58);
    }

    #[test]
    fn test_encode_ss58_other_prefixes_differ() {
        let polkadot = encode_ss58(&ALICE_PUBKEY, 0);
        let kusama = encode_ss58(&ALICE_PUBKEY, 2);
        assert_eq!(polkadot, "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");
        assert_ne!(polkadot, kusama);
        assert_ne!(kusama, ALICE_SS58);
    }

    #[test]
    fn test_encode_ss58_two_byte_prefix_is_longer() {
        let short = encode_ss58(&ALICE_PUBKEY, 42);
        let long = encode_ss58(&ALICE_PUBKEY, 1284);
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_wallet_address_depends_on_uri() {
        let bob = Sr25519Wallet::from_uri("//Bob", 42).unwrap();
        assert_ne!(bob.address(), ALICE_SS58);
    }

    #[tokio::test]
    async fn test_sign_message_produces_hex_signature() {
        let wallet = Sr25519Wallet::from_uri("//Alice", 42).unwrap();
        let signature = wallet.sign_message("1700000000000").await.unwrap();
        assert_eq!(signature.len(), 128);
        assert!(hex::decode(&signature).is_ok());
    }
}
