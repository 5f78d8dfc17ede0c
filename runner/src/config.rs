use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::constants::DEFAULT_LOG_FILTER;

// ============================================================================
// Logging
// ============================================================================

// Install the global subscriber. `RUST_LOG` wins over `filter` when set.
pub fn init_tracing(filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

// ============================================================================
// CLI Values
// ============================================================================

// Autopilot skill: a finite reaction chance in 0..=1
pub fn parse_skill(value: &str) -> Result<f64, String> {
    let skill: f64 = value.parse().map_err(|e| format!("invalid skill '{value}': {e}"))?;
    if skill.is_finite() && (0.0..=1.0).contains(&skill) {
        Ok(skill)
    } else {
        Err(format!("skill must be between 0 and 1, got '{value}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_accepts_unit_range() {
        assert_eq!(parse_skill("0"), Ok(0.0));
        assert_eq!(parse_skill("0.9"), Ok(0.9));
        assert_eq!(parse_skill("1"), Ok(1.0));
    }

    #[test]
    fn skill_rejects_non_finite_and_out_of_range() {
        for value in ["nan", "NaN", "inf", "-inf", "1.5", "-0.1", "fast"] {
            assert!(parse_skill(value).is_err(), "{value} accepted");
        }
    }
}
