use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::OsRng;

/// Account key that authorizes re-encryption requests.
pub trait WalletSigner: Send + Sync {
    /// On-chain address the ACL knows this wallet by.
    fn address(&self) -> &str;

    /// 64-byte secp256k1 signature over `payload` (SHA-256 prehash).
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, String>;
}

/// In-process wallet holding its secp256k1 key.
pub struct LocalWallet {
    address: String,
    key: SigningKey,
}

impl LocalWallet {
    pub fn new(address: impl Into<String>, key: SigningKey) -> Self {
        Self {
            address: address.into(),
            key,
        }
    }

    pub fn random(address: impl Into<String>) -> Self {
        Self::new(address, SigningKey::random(&mut OsRng))
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        *self.key.verifying_key()
    }
}

impl WalletSigner for LocalWallet {
    fn address(&self) -> &str {
        &self.address
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, String> {
        let signature: Signature = self.key.sign(payload);
        Ok(signature.to_bytes().to_vec())
    }
}

/// Check a 64-byte signature over `payload`.
pub fn verify_signature(key: &VerifyingKey, payload: &[u8], signature: &[u8]) -> bool {
    Signature::from_slice(signature)
        .map(|sig| key.verify(payload, &sig).is_ok())
        .unwrap_or(false)
}
