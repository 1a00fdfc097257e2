//! Short random tokens used to rename attachments inside one archive.
//!
//! Tokens are 6 ASCII alphanumeric characters. A generator remembers every token it
//! handed out and redraws on collision, so uniqueness is exact rather than probable.
//! Create one generator per export run.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const TOKEN_LEN: usize = 6;

#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Deterministic generator, for tests and reproducible exports.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    pub fn next_token(&mut self) -> String {
        loop {
            let token = self.draw();
            if self.issued.insert(token.clone()) {
                return token;
            }
            tracing::debug!(%token, "id collision, drawing again");
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.issued.contains(token)
    }

    fn draw(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}
