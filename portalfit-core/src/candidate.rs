//! Transfer-portal candidates and the player statistics shared with roster
//! entries.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::stat::lenient;
use crate::{EntityKey, PositionBucket, ShootingSplit, Stat};

/// Named statistic columns that pillars look up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatColumn {
    /// Box plus/minus, the performance-impact metric.
    Bpm,
    /// Offensive rating.
    Ortg,
    /// Usage rate.
    Usg,
    /// Effective field-goal percentage.
    Efg,
    /// True shooting percentage.
    Ts,
    /// Three-point percentage.
    ThreePPct,
    /// Two-point percentage.
    TwoPPct,
}

impl StatColumn {
    /// Every column, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::Bpm,
        Self::Ortg,
        Self::Usg,
        Self::Efg,
        Self::Ts,
        Self::ThreePPct,
        Self::TwoPPct,
    ];

    /// Column name as it appears in source tables and output records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bpm => "bpm",
            Self::Ortg => "ortg",
            Self::Usg => "usg",
            Self::Efg => "efg",
            Self::Ts => "ts",
            Self::ThreePPct => "threePPct",
            Self::TwoPPct => "twoPPct",
        }
    }
}

impl Serialize for StatColumn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Box and advanced statistics for one player-season.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    /// Share of team minutes played, as a percentage.
    pub min_pct: Stat,
    /// Box plus/minus.
    pub bpm: Stat,
    /// Offensive box plus/minus.
    pub obpm: Stat,
    /// Defensive box plus/minus.
    pub dbpm: Stat,
    /// Offensive rating.
    pub ortg: Stat,
    /// Defensive rating.
    pub drtg: Stat,
    /// Usage rate.
    pub usg: Stat,
    /// Effective field-goal percentage.
    pub efg: Stat,
    /// True shooting percentage.
    pub ts: Stat,
    /// Offensive rebound rate.
    #[serde(rename = "or")]
    pub oreb: Stat,
    /// Defensive rebound rate.
    #[serde(rename = "dr")]
    pub dreb: Stat,
    /// Assist rate.
    pub ast: Stat,
    /// Turnover rate.
    #[serde(rename = "to")]
    pub tov: Stat,
    /// Block rate.
    pub blk: Stat,
    /// Steal rate.
    pub stl: Stat,
    /// Free-throw rate.
    pub ftr: Stat,
    /// Two-point percentage.
    #[serde(rename = "twoPPct")]
    pub two_p_pct: Stat,
    /// Three-point percentage.
    #[serde(rename = "threePPct")]
    pub three_p_pct: Stat,
    /// Free-throw percentage.
    pub ft_pct: Stat,
}

impl PlayerStats {
    /// Look a statistic up by column.
    #[must_use]
    pub const fn get(&self, column: StatColumn) -> Stat {
        match column {
            StatColumn::Bpm => self.bpm,
            StatColumn::Ortg => self.ortg,
            StatColumn::Usg => self.usg,
            StatColumn::Efg => self.efg,
            StatColumn::Ts => self.ts,
            StatColumn::ThreePPct => self.three_p_pct,
            StatColumn::TwoPPct => self.two_p_pct,
        }
    }

    /// Replace a statistic by column.
    pub const fn set(&mut self, column: StatColumn, value: Stat) {
        match column {
            StatColumn::Bpm => self.bpm = value,
            StatColumn::Ortg => self.ortg = value,
            StatColumn::Usg => self.usg = value,
            StatColumn::Efg => self.efg = value,
            StatColumn::Ts => self.ts = value,
            StatColumn::ThreePPct => self.three_p_pct = value,
            StatColumn::TwoPPct => self.two_p_pct = value,
        }
    }
}

/// Per-game shooting volume parsed from `"made-attempted"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShootingSplits {
    /// Two-point field goals.
    #[serde(rename = "twoP", deserialize_with = "lenient::split")]
    pub two_point: Option<ShootingSplit>,
    /// Three-point field goals.
    #[serde(rename = "threeP", deserialize_with = "lenient::split")]
    pub three_point: Option<ShootingSplit>,
    /// Free throws.
    #[serde(rename = "ft", deserialize_with = "lenient::split")]
    pub free_throw: Option<ShootingSplit>,
}

impl ShootingSplits {
    /// Points per game derived from made shots.
    ///
    /// Missing splits count as zero made shots. Returns `None` when `games`
    /// is zero or unknown.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "points per game divides made-shot points by games played"
    )]
    pub fn points_per_game(&self, games: Option<u32>) -> Option<f64> {
        let games_played = games.filter(|count| *count > 0)?;
        let made = |split: Option<ShootingSplit>| f64::from(split.map_or(0, |s| s.made));
        let points = 2.0 * made(self.two_point) + 3.0 * made(self.three_point) + made(self.free_throw);
        Some(points / f64::from(games_played))
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CandidateRow {
    #[serde(deserialize_with = "lenient::required_text")]
    player: String,
    #[serde(deserialize_with = "lenient::required_text")]
    team: String,
    #[serde(deserialize_with = "lenient::required_text")]
    role: String,
    #[serde(alias = "games", deserialize_with = "lenient::games")]
    g: Option<u32>,
    rk: Stat,
    #[serde(deserialize_with = "lenient::height")]
    height: Stat,
    #[serde(flatten)]
    stats: PlayerStats,
    #[serde(flatten)]
    splits: ShootingSplits,
}

/// A transfer-portal candidate for one recruiting cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    /// Display name.
    pub player: String,
    /// Normalised player key.
    pub key: EntityKey,
    /// Origin team display name.
    pub team: String,
    /// Normalised origin team key.
    pub team_key: EntityKey,
    /// Season the statistics were recorded in.
    pub season: u16,
    /// Raw role label.
    pub role: String,
    /// Bucket derived from [`Self::role`].
    pub position: PositionBucket,
    /// Advanced internal ranking within the candidate pool (1 is best).
    pub rank: Stat,
    /// Games played.
    pub games: Option<u32>,
    /// Height in inches.
    pub height_inches: Stat,
    /// Box and advanced statistics.
    pub stats: PlayerStats,
    /// Shooting splits.
    pub splits: ShootingSplits,
    source: Map<String, Value>,
}

impl CandidateRecord {
    /// Construct a candidate with empty statistics.
    ///
    /// # Examples
    /// ```
    /// use portalfit_core::{CandidateRecord, PositionBucket, StatColumn};
    ///
    /// let candidate = CandidateRecord::new("Jordan Hale", "Iowa", "Combo G", 2025)
    ///     .with_stat(StatColumn::Bpm, 4.5);
    /// assert_eq!(candidate.position, PositionBucket::ShootingGuard);
    /// assert_eq!(candidate.stats.bpm.value(), Some(4.5));
    /// ```
    #[must_use]
    pub fn new(player: &str, team: &str, role: &str, season: u16) -> Self {
        Self {
            player: player.to_owned(),
            key: EntityKey::new(player),
            team: team.to_owned(),
            team_key: EntityKey::new(team),
            season,
            role: role.to_owned(),
            position: PositionBucket::classify(role),
            rank: Stat::MISSING,
            games: None,
            height_inches: Stat::MISSING,
            stats: PlayerStats::default(),
            splits: ShootingSplits::default(),
            source: Map::new(),
        }
    }

    /// Build a candidate from a source row, keeping the row for pass-through.
    ///
    /// Unparseable fields become missing values.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the row cannot be read as an object.
    pub fn from_source(source: Map<String, Value>, season: u16) -> Result<Self, serde_json::Error> {
        let row: CandidateRow = serde_json::from_value(Value::Object(source.clone()))?;
        let mut candidate = Self::new(&row.player, &row.team, &row.role, season);
        candidate.rank = row.rk;
        candidate.games = row.g;
        candidate.height_inches = row.height;
        candidate.stats = row.stats;
        candidate.splits = row.splits;
        candidate.source = source;
        Ok(candidate)
    }

    /// Original source row.
    #[must_use]
    pub const fn source(&self) -> &Map<String, Value> {
        &self.source
    }

    /// Set a statistic.
    #[must_use]
    pub const fn with_stat(mut self, column: StatColumn, value: f64) -> Self {
        self.stats.set(column, Stat::new(value));
        self
    }

    /// Set the internal ranking.
    #[must_use]
    pub const fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Stat::new(rank);
        self
    }

    /// Set the height in inches.
    #[must_use]
    pub const fn with_height(mut self, inches: f64) -> Self {
        self.height_inches = Stat::new(inches);
        self
    }

    /// Set games played.
    #[must_use]
    pub const fn with_games(mut self, games: u32) -> Self {
        self.games = Some(games);
        self
    }

    /// Points per game from made shots, when games played is known and
    /// positive.
    #[must_use]
    pub fn points_per_game(&self) -> Option<f64> {
        self.splits.points_per_game(self.games)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, found {other}"),
        }
    }

    #[rstest]
    fn reads_candidate_rows() {
        let source = object(json!({
            "rk": 12,
            "player": "Kylan Boswell",
            "team": "Arizona",
            "role": "Combo G",
            "g": 31,
            "height": "6-2",
            "bpm": 3.4,
            "ortg": "108.1",
            "usg": 21.3,
            "twoPPct": 49.0,
            "threePPct": 36.5,
            "twoP": "80-170",
            "threeP": "60-160",
            "ft": "50-70",
            "recruitRank": "88.2"
        }));

        let candidate = CandidateRecord::from_source(source, 2025).expect("parse candidate");

        assert_eq!(candidate.key, EntityKey::new("kylan boswell"));
        assert_eq!(candidate.position, PositionBucket::ShootingGuard);
        assert_eq!(candidate.games, Some(31));
        assert_eq!(candidate.height_inches.value(), Some(74.0));
        assert_eq!(candidate.stats.ortg.value(), Some(108.1));
        assert_eq!(candidate.stats.get(StatColumn::ThreePPct).value(), Some(36.5));
        assert_eq!(candidate.rank.value(), Some(12.0));
        assert!(candidate.source().contains_key("recruitRank"));
    }

    #[rstest]
    fn malformed_values_become_missing() {
        let source = object(json!({
            "player": "Placeholder",
            "team": "Nowhere",
            "role": "Wing F",
            "g": "many",
            "height": "tall",
            "bpm": "",
            "twoP": "lots"
        }));

        let candidate = CandidateRecord::from_source(source, 2025).expect("parse candidate");

        assert_eq!(candidate.games, None);
        assert!(candidate.height_inches.is_missing());
        assert!(candidate.stats.bpm.is_missing());
        assert_eq!(candidate.splits.two_point, None);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "assertions compare floating point values")]
    fn points_per_game_uses_made_shots() {
        let splits = ShootingSplits {
            two_point: ShootingSplit::parse("80-170"),
            three_point: ShootingSplit::parse("60-160"),
            free_throw: ShootingSplit::parse("50-70"),
        };

        let ppg = splits.points_per_game(Some(30)).expect("ppg for positive games");

        assert!((ppg - 390.0 / 30.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(None)]
    fn points_per_game_requires_games(#[case] games: Option<u32>) {
        let splits = ShootingSplits {
            two_point: ShootingSplit::parse("80-170"),
            ..ShootingSplits::default()
        };
        assert_eq!(splits.points_per_game(games), None);
    }
}
