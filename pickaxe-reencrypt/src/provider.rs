use std::future::Future;

use pickaxe_fhe::Handle;

use crate::error::ProviderError;
use crate::keys::SealedValue;
use crate::payload::ReencryptPayload;

/// A signed request to re-encrypt one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReencryptRequest {
    pub payload: ReencryptPayload,
    pub signature: Vec<u8>,
}

/// Plaintext recovered for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReencryptedValue {
    pub handle: Handle,
    pub value: u64,
}

/// Capability that holds the decryption key.
///
/// Implementations check the signature and the ACL, then return the
/// plaintext sealed to `payload.public_key`. Requests are idempotent.
pub trait DecryptionProvider: Send + Sync {
    fn reencrypt(
        &self,
        request: ReencryptRequest,
    ) -> impl Future<Output = Result<SealedValue, ProviderError>> + Send;
}
