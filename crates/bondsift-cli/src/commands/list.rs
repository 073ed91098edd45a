use bondsift_core::Screener;

use crate::error::CliError;

use super::Report;

pub async fn run(screener: &Screener, session: &str) -> Result<Report, CliError> {
    let view = screener.current(session).await?;
    Ok(Report::shortlist(session, view))
}
