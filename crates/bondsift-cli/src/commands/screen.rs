use bondsift_core::{IssueFloor, ScreenConfig, Screener};

use crate::cli::{FloorPreset, ScreenArgs};
use crate::error::CliError;

use super::Report;

/// Map screen flags onto an engine config.
///
/// `--tolerant` starts from the tolerant preset (schema-tolerant chain,
/// broad floor); an explicit `--floor` or `--min-issue-size` then
/// overrides the floor, the exact size winning over the preset.
pub fn config_from(args: &ScreenArgs) -> Result<ScreenConfig, CliError> {
    if args.limit == 0 {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }
    if args.min_issue_size.is_some_and(|size| size <= 0.0) {
        return Err(CliError::Command(String::from(
            "--min-issue-size must be greater than zero",
        )));
    }

    let mut config = if args.tolerant {
        ScreenConfig::tolerant()
    } else {
        ScreenConfig::default()
    };

    if let Some(size) = args.min_issue_size {
        config.rules = config.rules.with_issue_floor(IssueFloor::Custom(size));
    } else if let Some(preset) = args.floor {
        config.rules = config.rules.with_issue_floor(match preset {
            FloorPreset::Conservative => IssueFloor::Conservative,
            FloorPreset::Broad => IssueFloor::Broad,
        });
    }

    Ok(config.with_limit(args.limit))
}

pub async fn run(screener: &Screener, session: &str) -> Result<Report, CliError> {
    let view = screener.refresh(session).await?;
    Ok(Report::shortlist(session, view))
}
