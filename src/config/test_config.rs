use super::{AdaptiveHashBox, Config, Diagnostic, Hasher, Logs, Rescale, Stats};
use crate::diagnostic::Scenario;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        adaptive_hash: AdaptiveHashBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            hasher: Some(Hasher { bits: Some(10) }),
            stats: Some(Stats {
                rescale: Some(Rescale {
                    enabled: true,
                    threshold: Some(4096),
                }),
            }),
            diagnostic: Some(Diagnostic {
                scenario: Some(Scenario::Sequential),
                count: Some(500),
                seed: Some(7),
                random_key_bits: Some(16),
            }),
        },
    }
}
