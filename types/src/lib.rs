//! Core domain types for Vigil.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod cases;
mod navigation;
mod phases;
mod ping;

pub use cases::{CaseCatalog, CaseRecord, CatalogError, case_library};
pub use navigation::{
    ANALYSIS_PATH, LANDING_PATH, Location, MenuState, NAV_LINKS, NavLink, Route, SectionId,
};
pub use phases::{Accent, DisplayStyle, Emphasis, PhaseRecord, PhaseSet, clause_phases};
pub use ping::{PingState, STATUS_PLACEHOLDER};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// RiskLevel
// ============================================================================

/// Structural risk score of a case, guaranteed to lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskLevel(f64);

#[derive(Debug, Error, PartialEq)]
#[error("risk level must be within [0.0, 1.0], got {0}")]
pub struct RiskLevelError(pub f64);

impl RiskLevel {
    pub const MIN: Self = Self(0.0);
    pub const MAX: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, RiskLevelError> {
        // NaN fails both comparisons, so it is rejected here as well.
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RiskLevelError(value))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiskLevel {
    type Error = RiskLevelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskLevel> for f64 {
    fn from(value: RiskLevel) -> Self {
        value.0
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
