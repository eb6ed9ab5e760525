use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values (BRL). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Decimal places kept on every monetary output.
pub const MONEY_DP: u32 = 2;

/// Decimal places kept on reported ratios (Fator R).
pub const RATIO_DP: u32 = 4;

/// Round a monetary amount to cents, half-to-even.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Round a ratio to four places, half-to-even.
pub fn round_ratio(value: Rate) -> Rate {
    value.round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointNearestEven)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub rounding: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            rounding: "half_to_even".to_string(),
        },
    }
}
