//! Sampling parameters for the generation API.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted temperature range.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.5;
/// Accepted nucleus-sampling range.
pub const TOP_P_RANGE: RangeInclusive<f32> = 0.05..=1.0;
/// Accepted output token budget.
pub const MAX_OUTPUT_TOKENS_RANGE: RangeInclusive<u32> = 32..=2048;

/// A parameter outside its accepted range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("temperature {0} is outside 0.0..=1.5")]
    Temperature(f32),

    #[error("top_p {0} is outside 0.05..=1.0")]
    TopP(f32),

    #[error("max_output_tokens {0} is outside 32..=2048")]
    MaxOutputTokens(u32),
}

/// Sampling parameters (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.90,
            max_output_tokens: 200,
        }
    }
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Check every parameter against its range, returning all violations.
    pub fn validate(&self) -> Vec<ParamError> {
        let mut errors = Vec::new();
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            errors.push(ParamError::Temperature(self.temperature));
        }
        if !TOP_P_RANGE.contains(&self.top_p) {
            errors.push(ParamError::TopP(self.top_p));
        }
        if !MAX_OUTPUT_TOKENS_RANGE.contains(&self.max_output_tokens) {
            errors.push(ParamError::MaxOutputTokens(self.max_output_tokens));
        }
        errors
    }

    /// Copy with every parameter forced into its range.
    ///
    /// NaN values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let clamp = |v: f32, range: &RangeInclusive<f32>, fallback: f32| {
            if v.is_nan() {
                fallback
            } else {
                v.clamp(*range.start(), *range.end())
            }
        };
        Self {
            temperature: clamp(self.temperature, &TEMPERATURE_RANGE, defaults.temperature),
            top_p: clamp(self.top_p, &TOP_P_RANGE, defaults.top_p),
            max_output_tokens: self.max_output_tokens.clamp(
                *MAX_OUTPUT_TOKENS_RANGE.start(),
                *MAX_OUTPUT_TOKENS_RANGE.end(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = GenerationParams::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 0.90);
        assert_eq!(params.max_output_tokens, 200);
        assert!(params.validate().is_empty());
    }

    #[test]
    fn validate_reports_every_violation() {
        let params = GenerationParams::default()
            .with_temperature(2.0)
            .with_top_p(0.0)
            .with_max_output_tokens(4096);
        let errors = params.validate();
        assert_eq!(
            errors,
            vec![
                ParamError::Temperature(2.0),
                ParamError::TopP(0.0),
                ParamError::MaxOutputTokens(4096),
            ]
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let low = GenerationParams::default()
            .with_temperature(0.0)
            .with_top_p(0.05)
            .with_max_output_tokens(32);
        let high = GenerationParams::default()
            .with_temperature(1.5)
            .with_top_p(1.0)
            .with_max_output_tokens(2048);
        assert!(low.validate().is_empty());
        assert!(high.validate().is_empty());
    }

    #[test]
    fn clamped_forces_values_into_range() {
        let params = GenerationParams::default()
            .with_temperature(-1.0)
            .with_top_p(f32::NAN)
            .with_max_output_tokens(1);
        let clamped = params.clamped();
        assert_eq!(clamped.temperature, 0.0);
        assert_eq!(clamped.top_p, 0.90);
        assert_eq!(clamped.max_output_tokens, 32);
        assert!(clamped.validate().is_empty());
    }

    #[test]
    fn deserialize_partial_uses_defaults() {
        let params: GenerationParams = serde_json::from_str(r#"{"temperature": 0.2}"#).unwrap();
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_output_tokens, 200);
    }
}
