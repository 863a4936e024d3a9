use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary};
use sha2::{Digest, Sha256};

const HANDLE_DOMAIN: &[u8] = b"pickaxe-fhe/handle/v1";

/// Opaque reference to a ciphertext held by the executor.
///
/// A handle carries no information about the value behind it. The only
/// things a holder can do with it are: pass it to the executor as an op
/// input (if the ACL allows), or ask a decryption provider to re-encrypt it.
#[cw_serde]
#[derive(Eq, Hash, PartialOrd, Ord)]
pub struct Handle(HexBinary);

impl Handle {
    /// Handle of output slot `index` produced by `issuer`.
    ///
    /// The executor derives output handles from the sender address, so a
    /// contract can compute the handles of a program before submitting it
    /// and no contract can write into another contract's slots.
    pub fn derive(issuer: &Addr, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(HANDLE_DOMAIN);
        hasher.update((issuer.as_str().len() as u32).to_be_bytes());
        hasher.update(issuer.as_bytes());
        hasher.update(index.to_be_bytes());
        Handle(HexBinary::from(hasher.finalize().to_vec()))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn from_hex(input: &str) -> cosmwasm_std::StdResult<Self> {
        let bytes = HexBinary::from_hex(input)?;
        if bytes.len() != 32 {
            return Err(cosmwasm_std::StdError::generic_err(format!(
                "handle must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Handle(bytes))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.0.to_hex())
    }
}
