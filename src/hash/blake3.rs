use super::TreeHasher;

/// BLAKE3 backend producing 32-byte digests.
#[derive(Clone)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a hasher in its empty state.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHasher for Blake3Hasher {
    fn reset(&mut self) {
        self.state.reset();
    }

    fn update(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let digest = self.state.finalize();
        self.state.reset();
        digest.as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        blake3::OUT_LEN
    }
}
