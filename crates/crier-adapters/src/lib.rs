//! Crier Adapters - Infrastructure implementations
//!
//! This crate contains concrete implementations of the ports defined in
//! crier-core: OpenAI text and image generation, Facebook/Instagram Graph
//! API publishing, and JSON file history storage.

pub mod ai;
pub mod social;
pub mod storage;

// Re-export primary adapter types
pub use ai::{DalleAdapter, OpenAiAdapter};
pub use social::{FacebookAdapter, InstagramAdapter};
pub use storage::JsonHistoryStore;

#[cfg(test)]
mod tests {
    use crier_core::config::Config;

    #[test]
    fn test_can_access_core_types() {
        // Verify that crier-adapters can use crier-core types
        let config = Config::default();
        assert_eq!(config.history.lookback_window, 5);
    }
}
