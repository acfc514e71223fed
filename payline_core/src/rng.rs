//! Seeded randomness the player can audit after the session.
//!
//! A spin's uniforms come from `HMAC-SHA256(server_seed, "{client_seed}:{nonce}")`.
//! The 32-byte tag is read as big-endian `u32` words; once a block is used up
//! the next block is the SHA-256 of the previous one.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub type HmacSha256 = Hmac<Sha256>;

const WORD: usize = 4;
const TWO_POW_32: f64 = 4_294_967_296.0;

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Random 32-byte server seed, hex encoded.
pub fn random_seed_hex() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Endless sequence of uniforms in `[0, 1)` drawn from a hash chain.
#[derive(Debug, Clone)]
pub struct UniformStream {
    block: Vec<u8>,
    pos: usize,
}

impl UniformStream {
    pub fn from_block(block: &[u8]) -> Self {
        Self {
            block: block.to_vec(),
            pos: 0,
        }
    }
}

impl Iterator for UniformStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        // A trailing partial word is skipped, not padded.
        while self.pos + WORD > self.block.len() {
            self.block = Sha256::digest(&self.block).to_vec();
            self.pos = 0;
        }
        let mut word = [0u8; WORD];
        word.copy_from_slice(&self.block[self.pos..self.pos + WORD]);
        self.pos += WORD;
        Some(f64::from(u32::from_be_bytes(word)) / TWO_POW_32)
    }
}

pub fn derive_floats(block: &[u8], count: usize) -> Vec<f64> {
    UniformStream::from_block(block).take(count).collect()
}

/// Seeds and nonce of one spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvablyFairRng {
    pub server_seed: String,
    pub client_seed: String,
    pub nonce: u64,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    /// Published before play; commits to the server seed without revealing it.
    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC takes keys of any length");
        mac.update(self.client_seed.as_bytes());
        mac.update(b":");
        mac.update(self.nonce.to_string().as_bytes());
        let mut tag = [0u8; 32];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        tag
    }

    pub fn stream(&self) -> UniformStream {
        UniformStream::from_block(&self.hmac_bytes())
    }

    pub fn next_floats(&self, count: usize) -> Vec<f64> {
        self.stream().take(count).collect()
    }

    pub fn advanced(&self) -> Self {
        Self {
            nonce: self.nonce.wrapping_add(1),
            ..self.clone()
        }
    }
}
