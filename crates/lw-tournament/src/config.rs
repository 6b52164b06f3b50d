//! Configuration for a tournament run.

/// Configuration for a tournament session.
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    /// RNG seed for the draw and for simulated matches.
    pub seed: u64,
    /// Resolve byes and empty matches without waiting for a decision.
    pub auto_resolve_byes: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            auto_resolve_byes: true,
        }
    }
}

impl TournamentConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable automatic bye resolution.
    pub fn with_auto_byes(mut self, enabled: bool) -> Self {
        self.auto_resolve_byes = enabled;
        self
    }
}
