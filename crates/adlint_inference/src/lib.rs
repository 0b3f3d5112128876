use std::time::Duration;

use adlint_core::TokenUsage;

pub mod backends;

pub use backends::{GeminiBackend, ModelBackend, OpenAiBackend};

/// Shared constructor input for concrete backends. The backend to use is an
/// explicit construction-time choice, never inferred from payload shape.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_key: String,
    /// Overrides the backend's default model identifier.
    pub model: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Per-unit token pricing. Configuration, not logic: provider prices change
/// and these defaults (gpt-4o, April 2024) are not authoritative.
#[derive(Debug, Clone, Copy)]
pub struct PricingTable {
    pub input_per_1k_usd: f64,
    pub output_per_1k_usd: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            input_per_1k_usd: 0.005,
            output_per_1k_usd: 0.015,
        }
    }
}

impl PricingTable {
    /// Estimated cost in USD, rounded to 6 decimal places.
    pub fn cost(&self, usage: &TokenUsage) -> f64 {
        let cost = (usage.prompt as f64 / 1000.0) * self.input_per_1k_usd
            + (usage.completion as f64 / 1000.0) * self.output_per_1k_usd;
        (cost * 1_000_000.0).round() / 1_000_000.0
    }
}

pub mod prelude {
    pub use super::{BackendConfig, GeminiBackend, ModelBackend, OpenAiBackend, PricingTable};
    pub use adlint_core::{Error, ModelReply, ModelRequest, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_matches_published_rates() {
        let usage = TokenUsage {
            prompt: 1000,
            completion: 1000,
            total: 2000,
        };
        assert_eq!(PricingTable::default().cost(&usage), 0.02);
    }

    #[test]
    fn pricing_rounds_to_six_decimals() {
        let usage = TokenUsage {
            prompt: 123,
            completion: 45,
            total: 168,
        };
        // 0.000615 + 0.000675 = 0.00129
        assert_eq!(PricingTable::default().cost(&usage), 0.00129);
    }

    #[test]
    fn zero_usage_costs_nothing() {
        let usage = TokenUsage {
            prompt: 0,
            completion: 0,
            total: 0,
        };
        assert_eq!(PricingTable::default().cost(&usage), 0.0);
    }
}
