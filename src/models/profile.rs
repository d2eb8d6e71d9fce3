use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Pay settings the aggregation engine needs from the user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub salary_rate: f64,
    pub currency: String,
}

impl UserProfile {
    pub fn new(salary_rate: f64, currency: impl Into<String>) -> AppResult<Self> {
        let currency = currency.into().trim().to_uppercase();

        validate_rate(salary_rate)?;
        if currency.is_empty() {
            return Err(AppError::Validation("Currency code cannot be empty".into()));
        }

        Ok(Self {
            salary_rate,
            currency,
        })
    }
}

/// A rate must be a finite, non-negative number.
pub fn validate_rate(rate: f64) -> AppResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::Validation(format!(
            "Salary rate must be a non-negative number, got {}",
            rate
        )));
    }
    Ok(())
}
