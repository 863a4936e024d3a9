//! Owner-only decryption of PICKAXE encrypted state.
//!
//! Flow: query the contract for a handle ([`EncryptedField`]), sign a
//! [`ReencryptPayload`] binding that handle to a fresh ephemeral key, submit
//! it to a [`DecryptionProvider`] and open the sealed reply locally.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod keys;
pub mod payload;
pub mod provider;
pub mod signer;
pub mod target;

pub use client::Reencryptor;
pub use config::ReencryptConfig;
pub use error::{ProviderError, ReencryptError};
pub use gateway::{LocalGateway, MemoryLedger};
pub use keys::{EphemeralKeypair, SealedValue};
pub use payload::ReencryptPayload;
pub use provider::{DecryptionProvider, ReencryptRequest, ReencryptedValue};
pub use signer::{LocalWallet, WalletSigner};
pub use target::EncryptedField;
