use bondsift_core::{Screener, Ticker};

use crate::cli::DetailsArgs;
use crate::error::CliError;

use super::Report;

pub async fn run(
    args: &DetailsArgs,
    screener: &Screener,
    session: &str,
) -> Result<Report, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let detail = screener.details(session, &ticker).await?;
    Ok(Report::detail(session, detail))
}
