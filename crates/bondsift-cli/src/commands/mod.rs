mod details;
mod list;
mod screen;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use bondsift_core::{
    BondDetail, MoexIssFeed, ReqwestHttpClient, ScreenConfig, Screener, ShortlistView,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::ReportMeta;
use crate::session_file::FileSnapshotStore;

/// Payload of one command, tagged for the JSON envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportData {
    Shortlist(ShortlistView),
    Detail(BondDetail),
}

/// What a command hands back for rendering: metadata plus payload.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    #[serde(flatten)]
    pub data: ReportData,
}

impl Report {
    pub fn shortlist(session: &str, view: ShortlistView) -> Self {
        Self {
            meta: ReportMeta::new(session),
            data: ReportData::Shortlist(view),
        }
    }

    pub fn detail(session: &str, detail: BondDetail) -> Self {
        Self {
            meta: ReportMeta::new(session),
            data: ReportData::Detail(detail),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::Screen(args) => {
            let screener = build_screener(cli, screen::config_from(args)?);
            screen::run(&screener, &cli.session).await
        }
        Command::List => {
            let screener = build_screener(cli, ScreenConfig::default());
            list::run(&screener, &cli.session).await
        }
        Command::Details(args) => {
            let screener = build_screener(cli, ScreenConfig::default());
            details::run(args, &screener, &cli.session).await
        }
    }
}

fn build_screener(cli: &Cli, config: ScreenConfig) -> Screener {
    let mut feed = MoexIssFeed::with_http_client(Arc::new(ReqwestHttpClient::new()));
    if let Some(base_url) = cli.iss_url.as_deref() {
        feed = feed.with_base_url(base_url);
    }
    if let Some(board) = cli.board.as_deref() {
        feed = feed.with_board(board);
    }

    let sessions = FileSnapshotStore::new(state_dir(cli));
    Screener::with_config(Arc::new(feed), Arc::new(sessions), config)
}

fn state_dir(cli: &Cli) -> PathBuf {
    cli.state_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("bondsift"))
}
