//! Sealing a plaintext to a requester's ephemeral key.
//!
//! The provider runs ECDH between a fresh secp256k1 key and the requester's
//! ephemeral public key, derives a keystream and tag with SHA-256 and ships
//! its own public half alongside. Only the holder of the ephemeral secret
//! can recompute the stream.

use k256::ecdh::diffie_hellman;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use pickaxe_fhe::Handle;
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, ReencryptError};

const SEAL_DOMAIN: &[u8] = b"pickaxe-reencrypt/seal/v1";

/// A `u64` plaintext readable only by the owner of the recipient key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedValue {
    /// SEC1 compressed public key of the sealing side
    pub sender_key: Vec<u8>,
    pub ciphertext: [u8; 8],
    pub tag: [u8; 16],
}

/// Client keypair generated per session and reused across requests.
pub struct EphemeralKeypair {
    secret: SecretKey,
}

impl EphemeralKeypair {
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut OsRng),
        }
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        encode(&self.secret.public_key())
    }

    /// Recover the plaintext sealed for `handle`.
    pub fn open(&self, handle: &Handle, sealed: &SealedValue) -> Result<u64, ReencryptError> {
        let sender = PublicKey::from_sec1_bytes(&sealed.sender_key)
            .map_err(|_| ReencryptError::InvalidResponse("bad sender key".to_string()))?;
        let key = derive_key(&self.secret, &sender, handle, &self.public_key_bytes());
        if tag(&key, &sealed.ciphertext) != sealed.tag {
            return Err(ReencryptError::InvalidResponse(
                "seal tag mismatch".to_string(),
            ));
        }
        Ok(u64::from_be_bytes(xor(&key, sealed.ciphertext)))
    }
}

impl std::fmt::Debug for EphemeralKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralKeypair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

/// Provider side: seal `value` to the SEC1 `recipient` key.
pub fn seal(recipient: &[u8], handle: &Handle, value: u64) -> Result<SealedValue, ProviderError> {
    let recipient_key = PublicKey::from_sec1_bytes(recipient).map_err(|_| {
        ProviderError::Rejected {
            reason: "malformed public key".to_string(),
        }
    })?;
    let sender = SecretKey::random(&mut OsRng);
    let key = derive_key(&sender, &recipient_key, handle, recipient);
    let ciphertext = xor(&key, value.to_be_bytes());
    Ok(SealedValue {
        sender_key: encode(&sender.public_key()),
        ciphertext,
        tag: tag(&key, &ciphertext),
    })
}

fn encode(key: &PublicKey) -> Vec<u8> {
    key.to_encoded_point(true).as_bytes().to_vec()
}

fn derive_key(
    secret: &SecretKey,
    public: &PublicKey,
    handle: &Handle,
    recipient: &[u8],
) -> [u8; 32] {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    let mut hasher = Sha256::new();
    hasher.update(SEAL_DOMAIN);
    hasher.update(shared.raw_secret_bytes());
    hasher.update(handle.as_slice());
    hasher.update(recipient);
    hasher.finalize().into()
}

fn xor(key: &[u8; 32], block: [u8; 8]) -> [u8; 8] {
    let mut out = block;
    for (b, k) in out.iter_mut().zip(key.iter()) {
        *b ^= k;
    }
    out
}

fn tag(key: &[u8; 32], ciphertext: &[u8; 8]) -> [u8; 16] {
    let mut hasher = Sha256::new();
    hasher.update(&key[16..]);
    hasher.update(ciphertext);
    let digest = hasher.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..16]);
    out
}
