//! Report rendering: an ASCII table for terminals, JSON for scripts.

use bondsift_core::{BondDetail, ShortlistView};

use crate::cli::OutputFormat;
use crate::commands::{Report, ReportData};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let rendered = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{rendered}");
        }
        OutputFormat::Table => print!("{}", render_table(report)),
    }

    Ok(())
}

fn render_table(report: &Report) -> String {
    match &report.data {
        ReportData::Shortlist(view) => render_shortlist(view, &report.meta.session),
        ReportData::Detail(detail) => render_detail(detail),
    }
}

fn render_shortlist(view: &ShortlistView, session: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<14}  {:<28}  {:<22}  {:>7}  {:>5}\n",
        "#", "TICKER", "NAME", "RATING", "COUPON", "YEARS"
    ));

    for row in &view.rows {
        out.push_str(&format!(
            "{:>3}  {:<14}  {:<28}  {:<22}  {:>7}  {:>5}\n",
            row.ordinal,
            row.ticker,
            row.name,
            row.rating.label(),
            percent_cell(row.coupon_percent),
            years_cell(row.years_to_maturity),
        ));
    }

    out.push_str(&format!(
        "\n{} bonds in session '{session}', generated {}\n",
        view.len(),
        view.generated_at
    ));
    out
}

fn render_detail(detail: &BondDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n\n", detail.ticker, detail.short_name));

    push_field(&mut out, "Issuer", &detail.issuer_name);
    push_field(&mut out, "Rating", detail.rating.label());
    push_field(&mut out, "Coupon", &percent_cell(detail.coupon_percent));
    push_field(
        &mut out,
        "Coupon value",
        &format!("{:.2} {}", detail.coupon_value, detail.currency),
    );
    push_field(
        &mut out,
        "Payments/year",
        &detail.coupon_frequency.to_string(),
    );
    push_field(&mut out, "Maturity", &maturity_cell(detail));
    push_field(
        &mut out,
        "Issue size",
        &format!("{} {}", detail.issue_size_display, detail.currency),
    );
    push_field(
        &mut out,
        "Face value",
        &format!("{} {}", detail.face_value, detail.currency),
    );
    push_field(&mut out, "Yield (close)", &percent_cell(detail.yield_close));

    out.push_str("\nNext coupons\n");
    if detail.next_coupons.is_empty() {
        out.push_str("  none scheduled\n");
    } else {
        for event in &detail.next_coupons {
            out.push_str(&format!("  {}  {}\n", event.date, amount_cell(event.amount)));
        }
    }

    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<14} {value}\n"));
}

fn maturity_cell(detail: &BondDetail) -> String {
    match (detail.maturity_date, detail.years_to_maturity) {
        (Some(date), Some(years)) => format!("{date} ({years:.1} years)"),
        (Some(date), None) => date.to_string(),
        (None, _) => String::from("-"),
    }
}

fn percent_cell(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |pct| format!("{pct:.2}%"))
}

fn years_cell(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |years| format!("{years:.1}"))
}

fn amount_cell(amount: Option<f64>) -> String {
    amount.map_or_else(|| String::from("-"), |value| format!("{value:.2}"))
}
