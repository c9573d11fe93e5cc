use reqwest::StatusCode;
use thiserror::Error;

/// Why a live weather code could not be obtained.
///
/// Every variant is an expected outcome: callers fall back to the mock
/// generator instead of surfacing it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response has no current weather code")]
    MissingCode,

    #[error("weather provider is offline")]
    Offline,
}

/// A value outside the domain a classifier accepts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("month {0} is outside 1..=12")]
    Month(u32),

    #[error("hour {0} is outside 0..=23")]
    Hour(u32),

    #[error("unknown weather condition '{0}'")]
    Condition(String),
}

/// A refresh cadence the scheduler cannot run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CadenceError {
    #[error("refresh period for {0} must be positive")]
    ZeroPeriod(&'static str),
}
