//! Core configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | BUSINESS_TIMEZONE | UTC | Time zone that defines the ledger's calendar dates |

use chrono_tz::Tz;

/// Till core configuration
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Business time zone used to bucket order timestamps into calendar
    /// dates and to resolve "today" for date validation
    pub timezone: Tz,
}

impl CoreConfig {
    /// Load from environment variables, using defaults where unset
    pub fn from_env() -> Self {
        let timezone = std::env::var("BUSINESS_TIMEZONE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Tz::UTC);
        Self { timezone }
    }

    /// Fixed time zone, ignoring the environment (test and embedding use)
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
