//! Rank command implementation for the portalfit CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use portalfit_core::CompositeRecord;
use portalfit_data::{
    DEFAULT_HISTORY_SEASONS, DatasetLayout, dir_is_dir, load_snapshot, write_snapshot,
};
use portalfit_scorer::{QualityWeights, ScoringConfig, rank_candidates};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_COMPETITION_WEIGHT, ARG_DATA_DIR, ARG_HISTORY_SEASONS, ARG_OUTPUT, ARG_PRODUCTION_WEIGHT,
    ARG_PROGRAM, ARG_REPUTATION_WEIGHT, ARG_SEASON, ARG_TOP, CliError, ENV_DATA_DIR, ENV_PROGRAM,
    ENV_SEASON,
};

/// Summary lines printed when `--top` is not configured.
pub(crate) const DEFAULT_TOP: usize = 25;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the candidate, roster, team-season and reputation \
                 tables for one program and season, score every candidate \
                 and write the ranked snapshot. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Rank transfer-portal candidates for a program"
)]
#[ortho_config(prefix = "PORTALFIT")]
pub(crate) struct RankArgs {
    /// Directory holding the season's JSON tables.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Season the statistics describe (the cycle is the following year).
    #[arg(long = ARG_SEASON, value_name = "year")]
    #[serde(default)]
    pub(crate) season: Option<u16>,
    /// Target program display name.
    #[arg(long = ARG_PROGRAM, value_name = "name")]
    #[serde(default)]
    pub(crate) program: Option<String>,
    /// Override the output snapshot path.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Team-data seasons used to fit the style space.
    #[arg(long = ARG_HISTORY_SEASONS, value_name = "count")]
    #[serde(default)]
    pub(crate) history_seasons: Option<u16>,
    /// Quality weight for the reputation sub-score.
    #[arg(long = ARG_REPUTATION_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) reputation_weight: Option<f64>,
    /// Quality weight for the production sub-score.
    #[arg(long = ARG_PRODUCTION_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) production_weight: Option<f64>,
    /// Quality weight for the competition sub-score.
    #[arg(long = ARG_COMPETITION_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) competition_weight: Option<f64>,
    /// Number of ranked candidates to print.
    #[arg(long = ARG_TOP, value_name = "count")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Input tables for the program and season.
    pub(crate) layout: DatasetLayout,
    /// Where the ranked snapshot is written.
    pub(crate) output: Utf8PathBuf,
    /// Pillar and aggregator tunables.
    pub(crate) scoring: ScoringConfig,
    /// Summary lines to print.
    pub(crate) top: usize,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = self.layout.root();
        match dir_is_dir(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::DataDirectoryNotDirectory {
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingDataDirectory {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectDataDirectory {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let data_dir = args.data_dir.ok_or(CliError::MissingArgument {
            field: ARG_DATA_DIR,
            env: ENV_DATA_DIR,
        })?;
        let program = args.program.ok_or(CliError::MissingArgument {
            field: ARG_PROGRAM,
            env: ENV_PROGRAM,
        })?;
        let season = args.season.ok_or(CliError::MissingArgument {
            field: ARG_SEASON,
            env: ENV_SEASON,
        })?;

        let defaults = QualityWeights::default();
        let quality_weights = QualityWeights {
            reputation: args.reputation_weight.unwrap_or(defaults.reputation),
            production: args.production_weight.unwrap_or(defaults.production),
            competition: args.competition_weight.unwrap_or(defaults.competition),
        }
        .validate()?;

        let layout = DatasetLayout::new(data_dir, &program, season)
            .with_history_seasons(args.history_seasons.unwrap_or(DEFAULT_HISTORY_SEASONS));
        let output = args
            .output
            .unwrap_or_else(|| layout.default_output_path());
        Ok(Self {
            layout,
            output,
            scoring: ScoringConfig {
                quality_weights,
                ..ScoringConfig::default()
            },
            top: args.top.unwrap_or(DEFAULT_TOP),
        })
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let records = execute_rank(&config)?;
    write_summary(writer, &records, config.top)
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_rank(config: &RankConfig) -> Result<Vec<CompositeRecord>, CliError> {
    let snapshot = load_snapshot(&config.layout)?;
    let records = rank_candidates(&snapshot, &config.scoring);
    write_snapshot(&config.output, &records)?;
    info!(
        "ranked {} candidates for {} ({})",
        records.len(),
        config.layout.program(),
        config.layout.cycle()
    );
    Ok(records)
}

/// Print one `rank. player (team) fit=NN q=.. s=.. n=..` line per record.
pub(crate) fn write_summary(
    writer: &mut dyn Write,
    records: &[CompositeRecord],
    top: usize,
) -> Result<(), CliError> {
    for (rank, record) in (1_usize..).zip(records.iter().take(top)) {
        writeln!(
            writer,
            "{rank}. {} ({}) fit={} q={:.3} s={:.3} n={:.3}",
            record.candidate.player,
            record.candidate.team,
            record.fit_score.value(),
            record.quality_score(),
            record.style_score(),
            record.need_score(),
        )
        .map_err(CliError::WriteSummary)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
