use std::fmt;

use crate::error::InvalidInput;

/// Northern-hemisphere meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }

    /// Art file shown in the season-image target.
    pub fn image_file(&self) -> &'static str {
        match self {
            Season::Spring => "Spring.png",
            Season::Summer => "Summer.png",
            Season::Fall => "Fall.png",
            Season::Winter => "Winter.png",
        }
    }

    pub const fn all() -> &'static [Season] {
        &[Season::Spring, Season::Summer, Season::Fall, Season::Winter]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a calendar month (1 = January) to its season.
pub fn classify_season(month: u32) -> Result<Season, InvalidInput> {
    match month {
        3..=5 => Ok(Season::Spring),
        6..=8 => Ok(Season::Summer),
        9..=11 => Ok(Season::Fall),
        12 | 1 | 2 => Ok(Season::Winter),
        _ => Err(InvalidInput::Month(month)),
    }
}
