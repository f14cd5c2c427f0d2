use core::mem;

use blake2::{Blake2b512, Blake2s256, Digest};

use super::TreeHasher;

/// BLAKE2s-256 backend producing 32-byte digests.
#[derive(Clone)]
pub struct Blake2sHasher {
    state: Blake2s256,
}

impl Blake2sHasher {
    /// Creates a hasher in its empty state.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }
}

impl Default for Blake2sHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHasher for Blake2sHasher {
    fn reset(&mut self) {
        self.state = Blake2s256::new();
    }

    fn update(&mut self, bytes: &[u8]) {
        blake2::Digest::update(&mut self.state, bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        mem::take(&mut self.state).finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        <Blake2s256 as Digest>::output_size()
    }
}

/// BLAKE2b-512 backend producing 64-byte digests.
#[derive(Clone)]
pub struct Blake2bHasher {
    state: Blake2b512,
}

impl Blake2bHasher {
    /// Creates a hasher in its empty state.
    pub fn new() -> Self {
        Self {
            state: Blake2b512::new(),
        }
    }
}

impl Default for Blake2bHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHasher for Blake2bHasher {
    fn reset(&mut self) {
        self.state = Blake2b512::new();
    }

    fn update(&mut self, bytes: &[u8]) {
        blake2::Digest::update(&mut self.state, bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        mem::take(&mut self.state).finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        <Blake2b512 as Digest>::output_size()
    }
}
