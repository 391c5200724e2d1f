//! The target program's own player-seasons.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::stat::lenient;
use crate::{EntityKey, PlayerStats, PositionBucket, Stat, StatColumn};

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RosterRow {
    #[serde(alias = "player", deserialize_with = "lenient::required_text")]
    name: String,
    #[serde(deserialize_with = "lenient::required_text")]
    role: String,
    #[serde(alias = "g", deserialize_with = "lenient::games")]
    games: Option<u32>,
    #[serde(deserialize_with = "lenient::height")]
    height: Stat,
    #[serde(deserialize_with = "lenient::flag")]
    left_after_season: bool,
    #[serde(flatten)]
    stats: PlayerStats,
}

/// One roster player-season belonging to the target program.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// Display name.
    pub name: String,
    /// Normalised player key.
    pub key: EntityKey,
    /// Raw role label.
    pub role: String,
    /// Bucket derived from [`Self::role`].
    pub position: PositionBucket,
    /// Games played.
    pub games: Option<u32>,
    /// Height in inches.
    pub height_inches: Stat,
    /// Whether the player left the program after the season.
    pub left_after_season: bool,
    /// Box and advanced statistics, including minutes share.
    pub stats: PlayerStats,
}

impl RosterEntry {
    /// Construct a roster entry with empty statistics.
    #[must_use]
    pub fn new(name: &str, role: &str) -> Self {
        Self {
            name: name.to_owned(),
            key: EntityKey::new(name),
            role: role.to_owned(),
            position: PositionBucket::classify(role),
            games: None,
            height_inches: Stat::MISSING,
            left_after_season: false,
            stats: PlayerStats::default(),
        }
    }

    /// Build a roster entry from a source row.
    ///
    /// Roster exports carry every statistic as text; unparseable values
    /// become missing.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the row cannot be read as an object.
    pub fn from_source(source: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let row: RosterRow = serde_json::from_value(Value::Object(source))?;
        let mut entry = Self::new(&row.name, &row.role);
        entry.games = row.games;
        entry.height_inches = row.height;
        entry.left_after_season = row.left_after_season;
        entry.stats = row.stats;
        Ok(entry)
    }

    /// Mark the player as departed with the given minutes share.
    #[must_use]
    pub const fn departed(mut self, min_pct: f64) -> Self {
        self.left_after_season = true;
        self.stats.min_pct = Stat::new(min_pct);
        self
    }

    /// Set the minutes share without changing the departure flag.
    #[must_use]
    pub const fn with_minutes(mut self, min_pct: f64) -> Self {
        self.stats.min_pct = Stat::new(min_pct);
        self
    }

    /// Set a statistic.
    #[must_use]
    pub const fn with_stat(mut self, column: StatColumn, value: f64) -> Self {
        self.stats.set(column, Stat::new(value));
        self
    }

    /// Set the height in inches.
    #[must_use]
    pub const fn with_height(mut self, inches: f64) -> Self {
        self.height_inches = Stat::new(inches);
        self
    }
}
