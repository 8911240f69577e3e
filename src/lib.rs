// lib.rs - AutoAssist shared application core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod event;
pub mod model;
pub mod view;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub use app::App;
pub use capabilities::{
    Advisor, AdvisorError, AdvisorResult, Capabilities, Diagnosis, DiagnosisQuery, Effect,
    RiskLevel, Severity,
};
pub use event::Event;
pub use model::Model;
pub use view::ViewModel;

pub const APP_NAME: &str = "AutoAssist Pro";
pub const APP_VERSION: &str = "2.0.0";

pub const DEFAULT_PICKUP_LOCATION: &str = "Dakar, Plateau";
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;
pub const TIRE_CALLOUT_CFA: u64 = 4_500;
pub const BATTERY_CALLOUT_CFA: u64 = 20_000;
pub const STANDARD_CALLOUT_CFA: u64 = 15_000;
pub const NEXT_SERVICE_INTERVAL_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    InvalidTransition,
    Unavailable,
    Advisor,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::Unavailable => "UNAVAILABLE",
            Self::Advisor => "ADVISOR_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Advisor | Self::Unavailable)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::InvalidTransition => {
                "Cette action n'est pas disponible pour le moment.".into()
            }
            ErrorKind::Unavailable => "Passez en ligne pour accepter des missions.".into(),
            ErrorKind::Advisor => "Le diagnostic n'a pas abouti. Veuillez réessayer.".into(),
            ErrorKind::Internal => "Une erreur inattendue s'est produite.".into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

/// Transition rejected by a status table. Generic over the status enum so the
/// request and mission lifecycles share one error shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError<S: fmt::Display + fmt::Debug> {
    #[error("cannot transition to the same status")]
    SameStatus,
    #[error("cannot leave terminal status {status}")]
    FromTerminal { status: S },
    #[error("invalid transition from {from} to {to}")]
    Invalid { from: S, to: S },
}

impl<S: fmt::Display + fmt::Debug> From<TransitionError<S>> for AppError {
    fn from(e: TransitionError<S>) -> Self {
        AppError::new(ErrorKind::InvalidTransition, e.to_string())
    }
}

#[must_use]
pub fn get_current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Explicit timestamp unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixTimeMs(pub u64);

impl UnixTimeMs {
    #[must_use]
    pub fn now() -> Self {
        Self(get_current_time_ms())
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn elapsed_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[must_use]
    pub fn is_before(self, other: Self) -> bool {
        self.0 < other.0
    }
}

impl Default for UnixTimeMs {
    fn default() -> Self {
        Self::now()
    }
}
