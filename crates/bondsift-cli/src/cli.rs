//! CLI argument definitions for Bondsift.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI wraps the screening engine in three one-shot commands that
//! share a file-backed session snapshot, so a screen can be followed by
//! detail lookups without re-fetching the market.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `screen` | Fetch the bond board, filter and rank, store the shortlist |
//! | `list` | Re-render the stored shortlist without re-fetching |
//! | `details` | Show the detail card for one shortlisted ticker |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--session` | `default` | Session key the snapshot is stored under |
//! | `--state-dir` | temp dir | Directory holding session snapshot files |
//! | `--iss-url` | ISS default | Override the exchange ISS base URL |
//! | `--board` | `TQOB` | Trading board to screen |
//!
//! # Examples
//!
//! ```bash
//! # Screen the board and print the shortlist
//! bondsift screen
//!
//! # Wider net: lower issue floor, schema-tolerant filters
//! bondsift screen --floor broad --tolerant --limit 15
//!
//! # Detail card for one shortlisted bond, as pretty JSON
//! bondsift details SU26238RMFS4 --format json --pretty
//!
//! # Re-render the stored shortlist
//! bondsift list
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 🦀 Bondsift - MOEX bond reliability screener
///
/// Screens the Moscow Exchange bond board for reliable ruble bonds,
/// ranks the survivors by issuer tier and coupon, and renders the
/// shortlist and per-bond detail cards.
#[derive(Debug, Parser)]
#[command(
    name = "bondsift",
    author,
    version,
    about = "MOEX bond reliability screener",
    long_about = "Bondsift screens the Moscow Exchange bond board for reliable ruble bonds. \
Features include:\n\
\n\
  • Ordered reliability filters (listing tier, currency, maturity, offers, size)\n\
  • Issuer-tier rating heuristic with coupon-based ranking\n\
  • Session snapshots so screen, details and list chain without re-fetching\n\
  • Structured JSON output with metadata\n\
\n\
Use 'bondsift <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: ASCII table format (default)
    /// - json: Single JSON object
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Session key the shortlist snapshot is stored under.
    ///
    /// Commands sharing a key share a snapshot; separate keys screen
    /// independently.
    #[arg(long, global = true, default_value = "default")]
    pub session: String,

    /// Directory holding session snapshot files.
    ///
    /// Defaults to `bondsift/` under the system temp directory.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Override the exchange ISS base URL (a mirror, or a fixture server
    /// in tests).
    #[arg(long, global = true)]
    pub iss_url: Option<String>,

    /// Trading board to screen.
    #[arg(long, global = true)]
    pub board: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Named minimum-issue-size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FloorPreset {
    /// 1 billion units of face currency; the default screen.
    Conservative,
    /// 100 million units; a wider net that admits smaller issues.
    Broad,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 🔎 Screen the bond board and store the shortlist.
    ///
    /// Fetches the configured board, runs the reliability filters, ranks
    /// the survivors by issuer tier and coupon, and replaces the
    /// session's stored shortlist.
    ///
    /// # Examples
    ///
    ///   bondsift screen
    ///   bondsift screen --limit 15 --floor broad
    ///   bondsift screen --tolerant --min-issue-size 500000000
    Screen(ScreenArgs),

    /// 📋 Re-render the stored shortlist without re-fetching.
    ///
    /// Reads the session's snapshot; fails with a stale-snapshot error
    /// when the session never screened or the snapshot expired.
    ///
    /// # Examples
    ///
    ///   bondsift list
    ///   bondsift list --session work --format json
    List,

    /// 🧾 Show the detail card for one shortlisted bond.
    ///
    /// Looks the ticker up in the stored shortlist and fetches its
    /// upcoming coupon schedule.
    ///
    /// # Examples
    ///
    ///   bondsift details SU26238RMFS4
    ///   bondsift details SU26238RMFS4 --format json --pretty
    Details(DetailsArgs),
}

/// Arguments for the `screen` command.
#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Maximum shortlist length.
    #[arg(long, default_value_t = bondsift_core::DEFAULT_SHORTLIST_LIMIT)]
    pub limit: usize,

    /// Minimum-issue-size preset.
    ///
    /// Defaults to `conservative` for strict screens and `broad` when
    /// `--tolerant` is set.
    #[arg(long, value_enum)]
    pub floor: Option<FloorPreset>,

    /// Exact minimum issue size; overrides `--floor`.
    #[arg(long)]
    pub min_issue_size: Option<f64>,

    /// Keep records whose filter columns are missing from the payload.
    ///
    /// The strict chain (default) drops a record whose listing tier,
    /// currency or maturity is absent; the tolerant chain skips a filter
    /// whose column the exchange did not send at all.
    #[arg(long, default_value_t = false)]
    pub tolerant: bool,
}

/// Arguments for the `details` command.
#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Ticker of a shortlisted bond (e.g. SU26238RMFS4).
    pub ticker: String,
}
