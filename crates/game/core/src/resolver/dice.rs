//! Dice notation: `N d M [+|-] K`.
//!
//! `N` defaults to 1 when omitted and `K` is optional. Whitespace is ignored.
//! A roll sums `N` uniform draws from `[1, M]` and applies `K`; only the
//! final total is floored at 0.

use std::fmt;
use std::str::FromStr;

use crate::rng::RngSource;

/// Errors raised while parsing dice notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("dice notation is empty")]
    Empty,

    #[error("dice notation '{0}' is missing the 'd' separator")]
    MissingSeparator(String),

    #[error("invalid number '{value}' in dice notation '{notation}'")]
    InvalidNumber { notation: String, value: String },

    #[error("dice notation '{0}' must roll at least one die with at least one side")]
    ZeroDice(String),
}

/// A parsed dice expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl Dice {
    /// Upper bound on the number of dice in one expression.
    pub const MAX_COUNT: u32 = 100;

    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Rolls the expression. The total is floored at 0.
    pub fn roll(&self, rng: &mut dyn RngSource) -> u32 {
        let sum: i64 = (0..self.count)
            .map(|_| rng.roll_die(self.sides) as i64)
            .sum();
        clamp_total(sum + self.modifier as i64)
    }

    /// Smallest possible total.
    pub fn min(&self) -> u32 {
        clamp_total(self.count as i64 + self.modifier as i64)
    }

    /// Largest possible total.
    pub fn max(&self) -> u32 {
        clamp_total(self.count as i64 * self.sides as i64 + self.modifier as i64)
    }
}

/// Floors at 0 and saturates at `u32::MAX`.
fn clamp_total(total: i64) -> u32 {
    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if notation.is_empty() {
            return Err(DiceError::Empty);
        }

        let lower = notation.to_ascii_lowercase();
        let (count_part, rest) = lower
            .split_once('d')
            .ok_or_else(|| DiceError::MissingSeparator(s.to_string()))?;

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, signed) = rest.split_at(idx);
                let magnitude = parse_number(&signed[1..], s)?;
                let modifier = if signed.starts_with('-') {
                    -(magnitude as i32)
                } else {
                    magnitude as i32
                };
                (sides, modifier)
            }
            None => (rest, 0),
        };

        let count = if count_part.is_empty() {
            1
        } else {
            parse_number(count_part, s)?
        };
        let sides = parse_number(sides_part, s)?;

        if count == 0 || sides == 0 || count > Self::MAX_COUNT {
            return Err(DiceError::ZeroDice(s.to_string()));
        }

        Ok(Self::new(count, sides, modifier))
    }
}

fn parse_number(value: &str, notation: &str) -> Result<u32, DiceError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| *n <= i32::MAX as u32)
        .ok_or_else(|| DiceError::InvalidNumber {
            notation: notation.to_string(),
            value: value.to_string(),
        })
}

impl TryFrom<String> for Dice {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dice> for String {
    fn from(value: Dice) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}
