//! Unified application error type.
//! All modules (store, core, cli, db, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::core::state_machine::DayState;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid month format: {0}")]
    InvalidMonth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Ledger errors
    // ---------------------------
    #[error("Invalid transition: {current} → {requested}")]
    InvalidTransition {
        current: DayState,
        requested: DayState,
    },

    #[error("Day store unavailable: {0}")]
    StoreUnavailable(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable label used as a structured log field.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::Io(_) => "io",
            AppError::Db(_) => "database",
            AppError::InvalidDate(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidMonth(_)
            | AppError::Validation(_) => "validation",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Config(_) => "config",
            AppError::Other(_) => "internal",
        }
    }

    /// True for every flavour of malformed caller input.
    pub fn is_validation(&self) -> bool {
        self.label() == "validation"
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
