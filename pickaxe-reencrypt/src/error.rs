use thiserror::Error;

/// Failures reported by a decryption provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Signature did not verify or the requester is not on the handle's ACL.
    #[error("request rejected: {reason}")]
    Rejected { reason: String },

    /// The provider has no ciphertext behind the handle.
    #[error("unknown handle {handle}")]
    UnknownHandle { handle: String },

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReencryptError {
    #[error("decryption timed out after {attempts} attempts")]
    DecryptionTimeout { attempts: u32 },

    #[error("re-encryption rejected for {requester}: {reason}")]
    AclRejected { requester: String, reason: String },

    #[error("wallet declined to sign: {0}")]
    SignatureUnavailable(String),

    #[error("wallet produced an invalid signature")]
    InvalidSignature,

    #[error("handle {handle} changed while decrypting")]
    StaleHandle { handle: String },

    #[error("no encrypted value recorded yet")]
    NoValue,

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
