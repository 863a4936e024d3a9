use std::future::Future;

use pickaxe_fhe::Handle;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::config::ReencryptConfig;
use crate::error::{ProviderError, ReencryptError};
use crate::keys::EphemeralKeypair;
use crate::payload::ReencryptPayload;
use crate::provider::{DecryptionProvider, ReencryptRequest, ReencryptedValue};
use crate::signer::WalletSigner;

/// Reads encrypted values for the wallet owner.
///
/// One ephemeral keypair per client; every request is signed over the
/// handle and that key. Timeouts are retried with backoff. Rejections are
/// returned as is.
pub struct Reencryptor<P, W> {
    config: ReencryptConfig,
    provider: P,
    wallet: W,
    keypair: EphemeralKeypair,
}

impl<P: DecryptionProvider, W: WalletSigner> Reencryptor<P, W> {
    pub fn new(config: ReencryptConfig, provider: P, wallet: W) -> Result<Self, ReencryptError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            wallet,
            keypair: EphemeralKeypair::generate(),
        })
    }

    pub fn requester(&self) -> &str {
        self.wallet.address()
    }

    pub fn public_key(&self) -> Vec<u8> {
        self.keypair.public_key_bytes()
    }

    fn sign_request(&self, contract: &str, handle: &Handle) -> Result<ReencryptRequest, ReencryptError> {
        let payload = ReencryptPayload {
            chain_id: self.config.chain_id.clone(),
            contract: contract.to_string(),
            requester: self.wallet.address().to_string(),
            handle: handle.clone(),
            public_key: self.keypair.public_key_bytes(),
        };
        let signature = self
            .wallet
            .sign(&payload.to_bytes())
            .map_err(ReencryptError::SignatureUnavailable)?;
        if signature.len() != 64 {
            return Err(ReencryptError::InvalidSignature);
        }
        Ok(ReencryptRequest { payload, signature })
    }

    /// Decrypt `handle`, held by `contract`, for this wallet.
    pub async fn reencrypt(
        &self,
        contract: &str,
        handle: &Handle,
    ) -> Result<ReencryptedValue, ReencryptError> {
        let request = self.sign_request(contract, handle)?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            debug!(attempt, %handle, "re-encryption attempt");

            let response = timeout(
                self.config.request_timeout(),
                self.provider.reencrypt(request.clone()),
            )
            .await;

            match response {
                Ok(Ok(sealed)) => {
                    let value = self.keypair.open(handle, &sealed)?;
                    return Ok(ReencryptedValue {
                        handle: handle.clone(),
                        value,
                    });
                }
                Ok(Err(ProviderError::Rejected { reason })) => {
                    return Err(ReencryptError::AclRejected {
                        requester: self.requester().to_string(),
                        reason,
                    });
                }
                Ok(Err(ProviderError::UnknownHandle { handle })) => {
                    return Err(ReencryptError::StaleHandle { handle });
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => {
                    if attempt >= self.config.max_attempts {
                        return Err(ReencryptError::DecryptionTimeout { attempts: attempt });
                    }
                    let delay = self.config.backoff(attempt);
                    warn!(attempt, ?delay, %handle, "re-encryption timed out, retrying");
                    sleep(delay).await;
                }
            }
        }
    }

    /// Decrypt whatever handle `fetch` currently returns.
    ///
    /// The handle is fetched again after decrypting. If it moved in the
    /// meantime (a mine or claim landed) the value is discarded and the
    /// new handle is decrypted instead, up to `max_stale_refetches` times.
    pub async fn decrypt_latest<F, Fut>(
        &self,
        contract: &str,
        mut fetch: F,
    ) -> Result<ReencryptedValue, ReencryptError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Handle, ReencryptError>>,
    {
        let mut refetches = 0u32;
        loop {
            let handle = fetch().await?;
            let stale = match self.reencrypt(contract, &handle).await {
                Ok(value) => {
                    if fetch().await? == value.handle {
                        return Ok(value);
                    }
                    value.handle.to_string()
                }
                Err(ReencryptError::StaleHandle { handle }) => handle,
                Err(err) => return Err(err),
            };

            if refetches >= self.config.max_stale_refetches {
                return Err(ReencryptError::StaleHandle { handle: stale });
            }
            refetches += 1;
            warn!(handle = %stale, refetches, "handle moved during decryption");
        }
    }
}
