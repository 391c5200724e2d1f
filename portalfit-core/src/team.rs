//! League-wide team-season style profiles.

use serde_json::{Map, Value};

use crate::{EntityKey, Stat};

/// Number of style features recorded per team-season.
pub const STYLE_FEATURE_COUNT: usize = 18;

/// Style feature names in column order.
///
/// Tempo, shot profile, ball security, rebounding, rim protection, free-throw
/// pressure and size, each paired with its defensive counterpart where one is
/// published.
pub const STYLE_FEATURES: [&str; STYLE_FEATURE_COUNT] = [
    "adjT",
    "rawT",
    "threePRate",
    "threePRateD",
    "twoPPct",
    "twoPPctD",
    "astPct",
    "opAstPct",
    "tovPct",
    "tovPctD",
    "oRebPct",
    "opORebPct",
    "blkPct",
    "blkedPct",
    "ftRate",
    "ftRateD",
    "effHgt",
    "avgHgt",
];

/// Column holding a team's strength rating.
pub const STRENGTH_FIELD: &str = "barthag";

/// One team's style profile and strength for a single season.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeasonRecord {
    /// Display name.
    pub team: String,
    /// Normalised team key.
    pub key: EntityKey,
    /// Season year.
    pub season: u16,
    /// Style features in [`STYLE_FEATURES`] order.
    pub features: [Stat; STYLE_FEATURE_COUNT],
    /// Strength rating used for competition percentiles.
    pub strength: Stat,
}

impl TeamSeasonRecord {
    /// Construct a team-season with the given features.
    #[must_use]
    pub fn new(team: &str, season: u16, features: [Stat; STYLE_FEATURE_COUNT]) -> Self {
        Self {
            team: team.to_owned(),
            key: EntityKey::new(team),
            season,
            features,
            strength: Stat::MISSING,
        }
    }

    /// Set the strength rating.
    #[must_use]
    pub const fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Stat::new(strength);
        self
    }

    /// Build a team-season from a source row.
    ///
    /// A `year` column on the row overrides `default_season`.
    #[must_use]
    pub fn from_source(source: &Map<String, Value>, default_season: u16) -> Self {
        let team = source
            .get("team")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let season = source
            .get("year")
            .and_then(Value::as_u64)
            .and_then(|year| u16::try_from(year).ok())
            .unwrap_or(default_season);
        let features =
            STYLE_FEATURES.map(|name| source.get(name).map_or(Stat::MISSING, Stat::from_json));
        let strength = source
            .get(STRENGTH_FIELD)
            .map_or(Stat::MISSING, Stat::from_json);
        Self {
            strength,
            ..Self::new(team, season, features)
        }
    }

    /// Number of features with a value.
    #[must_use]
    pub fn coverage(&self) -> usize {
        self.features.iter().filter(|stat| !stat.is_missing()).count()
    }

    /// Look a feature up by name.
    #[must_use]
    pub fn feature(&self, name: &str) -> Stat {
        STYLE_FEATURES
            .iter()
            .zip(self.features)
            .find_map(|(feature, value)| (*feature == name).then_some(value))
            .unwrap_or(Stat::MISSING)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn reads_team_rows() {
        let Value::Object(source) = json!({
            "team": "Illinois",
            "adjT": 70.1,
            "effHgt": "54.2",
            "barthag": 0.91,
            "year": 2024
        }) else {
            panic!("fixture must be an object");
        };

        let record = TeamSeasonRecord::from_source(&source, 2025);

        assert_eq!(record.season, 2024);
        assert_eq!(record.coverage(), 2);
        assert_eq!(record.feature("adjT").value(), Some(70.1));
        assert_eq!(record.feature("effHgt").value(), Some(54.2));
        assert_eq!(record.strength.value(), Some(0.91));
    }

    #[rstest]
    fn falls_back_to_file_season() {
        let source = Map::new();
        let record = TeamSeasonRecord::from_source(&source, 2023);
        assert_eq!(record.season, 2023);
        assert_eq!(record.coverage(), 0);
    }
}
