use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, Result};

type HmacSha256 = Hmac<Sha256>;

/// The one service-held signing credential.
///
/// Constructed once at startup from config and shared read-only across
/// all submissions; each transaction envelope is signed independently,
/// so any number of concurrent submissions may use the same handle.
/// The key material never leaves this struct.
pub struct Signer {
    key: Vec<u8>,
    address: String,
}

impl Signer {
    /// Build a signer from the configured credential string.
    ///
    /// Fails when the credential is empty — the caller is expected to
    /// abort startup in that case, not continue without a write path.
    pub fn new(signing_key: &str) -> Result<Self> {
        if signing_key.trim().is_empty() {
            return Err(LedgerError::Credential("signing key is empty".into()));
        }
        let key = signing_key.trim().as_bytes().to_vec();
        let address = derive_address(&key);
        Ok(Self { key, address })
    }

    /// The service account address derived from the credential. Assets
    /// created by this service are owned by this address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// HMAC-SHA256 over the canonical envelope bytes, hex-encoded.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is intentionally absent.
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish()
    }
}

fn derive_address(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    format!("0x{}", hex::encode(digest))
}
