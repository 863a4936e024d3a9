use pickaxe_fhe::Handle;
use sha2::{Digest, Sha256};

const DOMAIN: &str = "pickaxe-reencrypt:v1";

/// What the wallet signs to authorize one re-encryption.
///
/// Binds the chain, the contract holding the handle, the requester, the
/// handle itself and the public key the result is sealed to. A signature
/// over one payload is useless for any other handle or key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReencryptPayload {
    pub chain_id: String,
    pub contract: String,
    pub requester: String,
    pub handle: Handle,
    /// SEC1 compressed ephemeral public key
    pub public_key: Vec<u8>,
}

impl ReencryptPayload {
    /// Canonical signing bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "{}:{}:{}:{}:{}:{}",
            DOMAIN,
            self.chain_id,
            self.contract,
            self.requester,
            self.handle.to_hex(),
            hex::encode(&self.public_key)
        )
        .into_bytes()
    }

    /// Request id for logs.
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.to_bytes()).into()
    }
}
