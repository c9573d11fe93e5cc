//! Randomized stand-in for live weather.
//!
//! This is a placeholder signal that keeps the weather icon plausible when
//! the provider is unreachable. It is not a forecast.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{error::InvalidInput, weather::MockCondition};

const NIGHT_RAIN_PROBABILITY: f64 = 0.3;
const CLOUD_PROBABILITY: f64 = 0.5;

/// How winter months are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinterSplit {
    /// November through February: clouds or clear.
    TwoWay,
    /// December through February: snow, clouds or clear.
    ThreeWay,
}

impl WinterSplit {
    /// Pages with snow art use the three-way draw.
    pub fn for_snow_art(snow: bool) -> Self {
        if snow { WinterSplit::ThreeWay } else { WinterSplit::TwoWay }
    }
}

fn is_night(hour: u32) -> bool {
    hour >= 18 || hour <= 6
}

/// Draw one mock condition for the given local month (1–12) and hour (0–23).
pub fn generate_mock_condition<R: Rng>(
    rng: &mut R,
    split: WinterSplit,
    month: u32,
    hour: u32,
) -> Result<MockCondition, InvalidInput> {
    if !(1..=12).contains(&month) {
        return Err(InvalidInput::Month(month));
    }
    if hour > 23 {
        return Err(InvalidInput::Hour(hour));
    }

    if is_night(hour) {
        return Ok(if rng.gen_bool(NIGHT_RAIN_PROBABILITY) {
            MockCondition::Rain
        } else {
            MockCondition::Clear
        });
    }

    let condition = match (split, month) {
        (WinterSplit::ThreeWay, 12 | 1 | 2) => match rng.gen_range(0..3) {
            0 => MockCondition::Snow,
            1 => MockCondition::Clouds,
            _ => MockCondition::Clear,
        },
        (WinterSplit::TwoWay, 11 | 12 | 1 | 2) | (_, 9..=11) => {
            if rng.gen_bool(CLOUD_PROBABILITY) {
                MockCondition::Clouds
            } else {
                MockCondition::Clear
            }
        }
        _ => MockCondition::Clear,
    };

    Ok(condition)
}

/// Owns the random source the mock generator draws from.
#[derive(Debug, Clone)]
pub struct MockWeather {
    rng: ChaCha8Rng,
    split: WinterSplit,
}

impl MockWeather {
    /// Reproducible sequence of draws.
    pub fn seeded(seed: u64, split: WinterSplit) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), split }
    }

    /// Fresh sequence from OS entropy.
    pub fn from_entropy(split: WinterSplit) -> Self {
        Self { rng: ChaCha8Rng::from_entropy(), split }
    }

    pub fn condition(&mut self, month: u32, hour: u32) -> Result<MockCondition, InvalidInput> {
        generate_mock_condition(&mut self.rng, self.split, month, hour)
    }
}
