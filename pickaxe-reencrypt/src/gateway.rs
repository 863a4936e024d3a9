//! In-process decryption provider.
//!
//! Mirrors what a gateway in front of the coprocessor does: it keeps the
//! plaintexts and the ACL, knows each account's verifying key and only
//! releases a value sealed to the key the requester signed for.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use k256::ecdsa::VerifyingKey;
use pickaxe_fhe::Handle;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ProviderError;
use crate::keys::{seal, SealedValue};
use crate::provider::{DecryptionProvider, ReencryptRequest};
use crate::signer::verify_signature;

#[derive(Debug, Default)]
pub struct MemoryLedger {
    ciphertexts: HashMap<Handle, u64>,
    acl: HashSet<(Handle, String)>,
    accounts: HashMap<String, VerifyingKey>,
}

impl MemoryLedger {
    pub fn insert(&mut self, handle: Handle, value: u64) {
        self.ciphertexts.insert(handle, value);
    }

    pub fn allow(&mut self, handle: &Handle, account: &str) {
        self.acl.insert((handle.clone(), account.to_string()));
    }

    pub fn is_allowed(&self, handle: &Handle, account: &str) -> bool {
        self.acl.contains(&(handle.clone(), account.to_string()))
    }

    pub fn register_account(&mut self, account: &str, key: VerifyingKey) {
        self.accounts.insert(account.to_string(), key);
    }
}

#[derive(Debug, Clone)]
pub struct LocalGateway {
    chain_id: String,
    ledger: Arc<RwLock<MemoryLedger>>,
    latency: Option<Duration>,
}

impl LocalGateway {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            ledger: Arc::new(RwLock::new(MemoryLedger::default())),
            latency: None,
        }
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn ledger(&self) -> Arc<RwLock<MemoryLedger>> {
        Arc::clone(&self.ledger)
    }

    fn rejected(reason: &str) -> ProviderError {
        ProviderError::Rejected {
            reason: reason.to_string(),
        }
    }
}

impl DecryptionProvider for LocalGateway {
    async fn reencrypt(&self, request: ReencryptRequest) -> Result<SealedValue, ProviderError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let payload = &request.payload;
        if payload.chain_id != self.chain_id {
            return Err(Self::rejected("wrong chain id"));
        }

        let ledger = self.ledger.read().await;
        let key = ledger
            .accounts
            .get(&payload.requester)
            .ok_or_else(|| Self::rejected("unknown account"))?;
        if !verify_signature(key, &payload.to_bytes(), &request.signature) {
            return Err(Self::rejected("signature does not match requester"));
        }

        let value = *ledger
            .ciphertexts
            .get(&payload.handle)
            .ok_or_else(|| ProviderError::UnknownHandle {
                handle: payload.handle.to_string(),
            })?;
        if !ledger.is_allowed(&payload.handle, &payload.requester) {
            return Err(Self::rejected("requester not on handle ACL"));
        }

        debug!(
            request = %hex::encode(payload.digest()),
            handle = %payload.handle,
            "sealing plaintext for requester"
        );
        seal(&payload.public_key, &payload.handle, value)
    }
}
