//! Markdown screen reports.

use screenlab_core::domain::{Horizon, Recommendation};

use crate::screen::ScreenReport;

/// Generate a Markdown report for one screen run: a run summary, one
/// section per horizon, and the skip list.
pub fn generate_report(report: &ScreenReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Screen Report\n\n");

    // Run summary
    md.push_str("## Run\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Generated | {} |\n", report.generated_at));
    if !report.start_date.is_empty() {
        md.push_str(&format!(
            "| Period | {} to {} |\n",
            report.start_date, report.end_date
        ));
    }
    md.push_str(&format!("| Symbols | {} |\n", report.symbol_count));
    md.push_str(&format!("| Listed | {} |\n", report.total_listed()));
    md.push_str(&format!("| Skipped | {} |\n", report.skips.len()));
    let id8: String = report.config_id.chars().take(8).collect();
    md.push_str(&format!("| Config | `{id8}` |\n"));
    md.push('\n');

    // One section per horizon
    for horizon in Horizon::ALL {
        md.push_str(&format!("## {}\n\n", horizon.label()));
        push_horizon_table(&mut md, report.list_for(horizon));
    }

    // Skips
    if !report.skips.is_empty() {
        md.push_str("## Skipped\n\n");
        for skip in &report.skips {
            md.push_str(&format!("- {}: {}\n", skip.symbol, skip.reason));
        }
        md.push('\n');
    }

    md
}

fn push_horizon_table(md: &mut String, recs: &[Recommendation]) {
    if recs.is_empty() {
        md.push_str("_No qualifying instruments._\n\n");
        return;
    }

    md.push_str(
        "| Stock | Current Price | Lower Buy Range | Upper Buy Range \
         | Stop Loss | Target Price | Score |\n",
    );
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: | ---: |\n");
    for rec in recs {
        md.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {} |\n",
            rec.symbol,
            rec.current_price,
            rec.lower_buy,
            rec.upper_buy,
            rec.stop_loss,
            rec.target_price,
            rec.score
        ));
    }
    md.push('\n');
}
