//! Optional numeric statistics and the string formats used by box scores.
//!
//! Source tables mix JSON numbers, numeric strings and placeholder text for
//! the same column. [`Stat`] absorbs all of these: anything that is not a
//! finite number becomes a missing value instead of a sentinel float, so
//! downstream arithmetic never sees `NaN`.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};

/// A statistic that may be absent or unparseable.
///
/// # Examples
/// ```
/// use portalfit_core::Stat;
///
/// let parsed: Stat = serde_json::from_str("\"104.2\"").unwrap();
/// assert_eq!(parsed.value(), Some(104.2));
/// let placeholder: Stat = serde_json::from_str("\"-\"").unwrap();
/// assert!(placeholder.is_missing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stat(Option<f64>);

impl Stat {
    /// A missing statistic.
    pub const MISSING: Self = Self(None);

    /// Wrap a value, treating non-finite input as missing.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self(None)
        }
    }

    /// Return the value when present.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Report whether the statistic is missing.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        self.0.is_none()
    }

    /// Parse free text into a statistic.
    ///
    /// Surrounding whitespace and a trailing `%` are ignored; every other
    /// non-numeric input is missing.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        numeric.parse::<f64>().map_or(Self::MISSING, Self::new)
    }

    /// Read a statistic from an already decoded JSON value.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::MISSING, Self::new),
            serde_json::Value::String(text) => Self::parse(text),
            _ => Self::MISSING,
        }
    }
}

impl From<f64> for Stat {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Stat {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::MISSING, Self::new)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("-"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStat {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawStat>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawStat::Number(value)) => Self::new(value),
            Some(RawStat::Text(text)) => Self::parse(&text),
            Some(RawStat::Other(_)) | None => Self::MISSING,
        })
    }
}

impl Serialize for Stat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Made and attempted shots parsed from a `"made-attempted"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ShootingSplit {
    /// Shots made.
    pub made: u32,
    /// Shots attempted.
    pub attempted: u32,
}

impl ShootingSplit {
    /// Parse a `"made-attempted"` split such as `"124-227"`.
    ///
    /// # Examples
    /// ```
    /// use portalfit_core::ShootingSplit;
    ///
    /// let split = ShootingSplit::parse("124-227").unwrap();
    /// assert_eq!(split.made, 124);
    /// assert!(ShootingSplit::parse("124").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (made, attempted) = text.trim().split_once('-')?;
        Some(Self {
            made: made.trim().parse().ok()?,
            attempted: attempted.trim().parse().ok()?,
        })
    }
}

/// Convert a `"feet-inches"` height such as `"6-4"` into inches.
///
/// # Examples
/// ```
/// use portalfit_core::parse_height_inches;
///
/// assert_eq!(parse_height_inches("6-4").value(), Some(76.0));
/// assert!(parse_height_inches("76").is_missing());
/// ```
#[must_use]
pub fn parse_height_inches(text: &str) -> Stat {
    let Some((feet, inches)) = text.trim().split_once('-') else {
        return Stat::MISSING;
    };
    let (Ok(feet_value), Ok(inch_value)) = (feet.trim().parse::<u32>(), inches.trim().parse::<u32>())
    else {
        return Stat::MISSING;
    };
    feet_value
        .checked_mul(12)
        .and_then(|total| total.checked_add(inch_value))
        .map_or(Stat::MISSING, |total| Stat::new(f64::from(total)))
}

/// Lenient readers for optional text columns.
pub(crate) mod lenient {
    use serde::de::{Deserializer, IgnoredAny};
    use serde::Deserialize;

    use super::{ShootingSplit, Stat, parse_height_inches};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Number(f64),
        Other(IgnoredAny),
    }

    fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawText>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawText::Text(value)) => Some(value),
            Some(RawText::Number(value)) => Some(value.to_string()),
            Some(RawText::Other(_)) | None => None,
        })
    }

    pub(crate) fn height<'de, D>(deserializer: D) -> Result<Stat, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.map_or(Stat::MISSING, |value| parse_height_inches(&value)))
    }

    pub(crate) fn split<'de, D>(deserializer: D) -> Result<Option<ShootingSplit>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.and_then(|value| ShootingSplit::parse(&value)))
    }

    pub(crate) fn games<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stat = Stat::deserialize(deserializer)?;
        Ok(stat.value().and_then(whole_count))
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is checked to be a whole number inside the u32 range"
    )]
    fn whole_count(value: f64) -> Option<u32> {
        let in_range = (0.0..=f64::from(u32::MAX)).contains(&value);
        (in_range && value.fract().abs() < f64::EPSILON).then(|| value as u32)
    }

    pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFlag {
            Flag(bool),
            Text(String),
            Other(IgnoredAny),
        }
        let raw = Option::<RawFlag>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawFlag::Flag(value)) => value,
            Some(RawFlag::Text(value)) => value.trim().eq_ignore_ascii_case("true"),
            Some(RawFlag::Other(_)) | None => false,
        })
    }

    pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.filter(|value| !value.trim().is_empty()))
    }

    pub(crate) fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_default())
    }
}
