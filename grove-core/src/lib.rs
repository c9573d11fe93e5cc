//! Core library for the grove page widgets.
//!
//! This crate defines:
//! - Clock and date formatting over an injected time source
//! - Season and weather-icon classification
//! - Weather providers with a randomized mock fallback
//! - Display targets and the refresh scheduler that writes to them
//! - Configuration handling
//!
//! It is used by `grove-cli`, but any host that can supply display targets can drive it.

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod mock;
pub mod provider;
pub mod scheduler;
pub mod season;
pub mod weather;
pub mod widgets;

pub use clock::{FixedClock, LocalClock, TimeSource, format_date, format_time};
pub use config::Config;
pub use display::{DisplayTarget, DisplayTargets, MemoryTarget, TargetId};
pub use error::{CadenceError, FetchError, InvalidInput};
pub use mock::{MockWeather, WinterSplit, generate_mock_condition};
pub use provider::{ProviderId, WeatherProvider};
pub use scheduler::{Cadence, RefreshScheduler};
pub use season::{Season, classify_season};
pub use weather::{IconSet, MockCondition, WeatherIcon, WeatherReading, classify_icon};
pub use widgets::{WeatherUpdate, Widgets};
