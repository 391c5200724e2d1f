//! Deterministic synthetic snapshots used by unit, behaviour and benchmark
//! code in downstream crates.

use crate::{
    CandidateRecord, ExternalRating, RosterEntry, STYLE_FEATURE_COUNT, Snapshot, Stat,
    StatColumn, TeamSeasonRecord,
};

/// Program every synthetic snapshot targets.
pub const SYNTHETIC_PROGRAM: &str = "Illinois";

/// Season every synthetic snapshot describes.
pub const SYNTHETIC_SEASON: u16 = 2025;

const TEAMS: [&str; 10] = [
    "Illinois",
    "Iowa",
    "Purdue",
    "Michigan",
    "Indiana",
    "Kansas",
    "Duke",
    "Gonzaga",
    "Houston",
    "Arizona",
];

const ROLES: [&str; 6] = ["Pure PG", "Combo G", "Wing G", "Wing F", "Stretch 4", "C"];

const FEATURE_BASES: [f64; STYLE_FEATURE_COUNT] = [
    68.0, 66.0, 35.0, 34.0, 50.0, 49.0, 52.0, 51.0, 16.0, 17.0, 29.0, 28.0, 9.0, 8.0, 32.0,
    31.0, 1.5, 77.0,
];

/// Small linear congruential generator for reproducible fixtures.
#[derive(Debug, Clone, Copy)]
pub struct Lcg(u32);

impl Lcg {
    /// Seed a generator.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self(seed)
    }

    /// Next value in `0.0..1.0` with three decimal places of resolution.
    #[expect(
        clippy::float_arithmetic,
        reason = "fixture values are scaled into the unit interval"
    )]
    pub fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let bits = (self.0 >> 16) & 0x3ff;
        f64::from(bits) / 1024.0
    }

    /// Next value in `low..high`.
    #[expect(
        clippy::float_arithmetic,
        reason = "fixture values are scaled into a range"
    )]
    pub fn next_in(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}

/// Feature vector for a synthetic team-season.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fixture values jitter around per-feature bases"
)]
pub fn synthetic_features(seed: u32) -> [Stat; STYLE_FEATURE_COUNT] {
    let mut rng = Lcg::new(seed);
    FEATURE_BASES.map(|base| Stat::new(base * rng.next_in(0.85, 1.15)))
}

/// Candidate with the stats every pillar reads.
#[must_use]
pub fn synthetic_candidate(name: &str, team: &str, role: &str, rng: &mut Lcg) -> CandidateRecord {
    CandidateRecord::new(name, team, role, SYNTHETIC_SEASON)
        .with_stat(StatColumn::Bpm, rng.next_in(-4.0, 9.0))
        .with_stat(StatColumn::Ortg, rng.next_in(88.0, 125.0))
        .with_stat(StatColumn::Usg, rng.next_in(12.0, 31.0))
        .with_stat(StatColumn::Efg, rng.next_in(42.0, 61.0))
        .with_stat(StatColumn::Ts, rng.next_in(45.0, 64.0))
        .with_stat(StatColumn::ThreePPct, rng.next_in(25.0, 42.0))
        .with_stat(StatColumn::TwoPPct, rng.next_in(42.0, 62.0))
        .with_height(rng.next_in(72.0, 84.0))
        .with_games(30)
}

/// Roster entry with the stats every pillar reads.
#[must_use]
pub fn synthetic_roster_entry(name: &str, role: &str, rng: &mut Lcg) -> RosterEntry {
    RosterEntry::new(name, role)
        .with_minutes(rng.next_in(5.0, 80.0))
        .with_stat(StatColumn::Bpm, rng.next_in(-3.0, 8.0))
        .with_stat(StatColumn::Ortg, rng.next_in(90.0, 122.0))
        .with_stat(StatColumn::Usg, rng.next_in(12.0, 29.0))
        .with_stat(StatColumn::Efg, rng.next_in(43.0, 60.0))
        .with_stat(StatColumn::Ts, rng.next_in(46.0, 63.0))
        .with_stat(StatColumn::ThreePPct, rng.next_in(26.0, 41.0))
        .with_stat(StatColumn::TwoPPct, rng.next_in(43.0, 60.0))
        .with_height(rng.next_in(72.0, 84.0))
}

/// Build a snapshot with `candidates` portal candidates, four seasons of
/// team history, an eight-player roster and a rating for every other
/// candidate.
///
/// Every roster entry in an even position departs.
#[must_use]
pub fn synthetic_snapshot(candidates: usize) -> Snapshot {
    let mut rng = Lcg::new(0x5eed);

    let mut team_seasons = Vec::new();
    let mut seed = 1_u32;
    for season in (SYNTHETIC_SEASON - 3)..=SYNTHETIC_SEASON {
        for team in TEAMS {
            seed = seed.wrapping_add(7);
            team_seasons.push(
                TeamSeasonRecord::new(team, season, synthetic_features(seed))
                    .with_strength(rng.next_unit()),
            );
        }
    }

    let origins = TEAMS.iter().skip(1).cycle();
    let roles = ROLES.iter().cycle();
    let pool: Vec<CandidateRecord> = origins
        .zip(roles)
        .take(candidates)
        .enumerate()
        .map(|(position, (team, role))| {
            let name = format!("Candidate {position}");
            synthetic_candidate(&name, team, role, &mut rng).with_rank(rank_of(position))
        })
        .collect();

    let roster = ROLES
        .iter()
        .chain(ROLES.iter().take(2))
        .enumerate()
        .map(|(position, role)| {
            let entry = synthetic_roster_entry(&format!("Returner {position}"), role, &mut rng);
            if position & 1 == 0 {
                let minutes = entry.stats.min_pct.value().unwrap_or_default();
                entry.departed(minutes.max(15.0))
            } else {
                entry
            }
        })
        .collect();

    let ratings = pool
        .iter()
        .step_by(2)
        .map(|candidate| ExternalRating::new(&candidate.player, rng.next_in(0.80, 0.99)))
        .collect();

    Snapshot::new(SYNTHETIC_PROGRAM, SYNTHETIC_SEASON)
        .with_candidates(pool)
        .with_roster(roster)
        .with_team_seasons(team_seasons)
        .with_ratings(ratings)
}

fn rank_of(position: usize) -> f64 {
    u32::try_from(position).map_or(f64::MAX, |index| f64::from(index.saturating_add(1)))
}
