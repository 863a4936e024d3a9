use cosmwasm_std::Env;
use sha2::{Digest, Sha256};

/// Source of uniform random integers.
///
/// Contracts take `&mut dyn RandomSource` so tests can inject fixed draws
/// while deployed code uses [`BlockEntropy`].
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, n)`. Returns 0 when `n == 0`.
    ///
    /// Rejection sampling: draws below `2^32 mod n` are discarded so every
    /// residue is equally likely.
    fn next_u32_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let r = self.next_u32();
            if r >= threshold {
                return r % n;
            }
        }
    }

    /// Uniform draw in `[min, max]`. Requires `min <= max`.
    fn next_u32_in_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        match (max - min).checked_add(1) {
            Some(span) => min + self.next_u32_below(span),
            None => self.next_u32(),
        }
    }
}

/// SHA-256 counter-mode stream seeded from block and transaction context.
///
/// The seed binds the chain id, block height and time, the transaction
/// index, the executing contract and caller-supplied context, so two draws
/// in different transactions or for different subjects never share a stream.
///
/// Every input is public. A block proposer can choose them, and any caller
/// that reads the executor's nonce can replay the draw before committing to
/// a transaction. Deployments that pay out on rare rolls need a source that
/// is unknown at call time (VRF or a threshold beacon) behind `RandomSource`.
pub struct BlockEntropy {
    seed: [u8; 32],
    counter: u64,
    buffer: [u8; 32],
    offset: usize,
}

impl BlockEntropy {
    pub fn new(domain: &[u8], parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((domain.len() as u32).to_be_bytes());
        hasher.update(domain);
        for part in parts {
            hasher.update((part.len() as u32).to_be_bytes());
            hasher.update(part);
        }
        let seed: [u8; 32] = hasher.finalize().into();
        Self {
            seed,
            counter: 0,
            buffer: [0u8; 32],
            offset: 32,
        }
    }

    pub fn from_env(env: &Env, domain: &[u8], context: &[&[u8]]) -> Self {
        let height = env.block.height.to_be_bytes();
        let nanos = env.block.time.nanos().to_be_bytes();
        let tx_index = env
            .transaction
            .as_ref()
            .map(|t| t.index)
            .unwrap_or_default()
            .to_be_bytes();
        let mut parts: Vec<&[u8]> = vec![
            env.block.chain_id.as_bytes(),
            &height,
            &nanos,
            &tx_index,
            env.contract.address.as_bytes(),
        ];
        parts.extend_from_slice(context);
        Self::new(domain, &parts)
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.buffer = hasher.finalize().into();
        self.counter += 1;
        self.offset = 0;
    }
}

impl RandomSource for BlockEntropy {
    fn next_u32(&mut self) -> u32 {
        if self.offset + 4 > self.buffer.len() {
            self.refill();
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.buffer[self.offset..self.offset + 4]);
        self.offset += 4;
        u32::from_be_bytes(word)
    }
}
