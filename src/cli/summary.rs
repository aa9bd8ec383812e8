use super::ui;
use crate::core::enrich::{EnrichedPortfolio, PortfolioEnricher};
use crate::core::price::Symbol;
use crate::core::wallet::WalletSource;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use comfy_table::Cell;
use serde::Serialize;
use std::collections::BTreeSet;

impl EnrichedPortfolio {
    pub fn display_as_table(&self, quote_currency: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Symbol"),
            ui::header_cell("Balance"),
            ui::header_cell(&format!("Price ({quote_currency})")),
            ui::header_cell(&format!("Value ({quote_currency})")),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(row.symbol.as_str()),
                ui::number_cell(&format!("{:.8}", row.balance)),
                ui::number_cell(&format!("{:.2}", row.price)),
                ui::number_cell(&format!("{:.2}", row.total_value)),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Wallet snapshot", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal Value ({}): {}",
            ui::style_text(quote_currency, ui::StyleType::TotalLabel),
            ui::style_text(&format!("{:.2}", self.total_value()), ui::StyleType::TotalValue)
        ));
        output
    }
}

/// Machine-readable snapshot for the `--json` flag.
#[derive(Serialize)]
struct Snapshot<'a> {
    generated_at: String,
    quote_currency: &'a str,
    total_value: f64,
    rows: &'a [crate::core::enrich::EnrichedRow],
    skipped: &'a BTreeSet<Symbol>,
}

pub async fn run(
    wallets: &dyn WalletSource,
    enricher: &PortfolioEnricher,
    quote_currency: &str,
    json: bool,
) -> Result<()> {
    let rows = wallets
        .fetch_wallets()
        .await
        .context("Failed to fetch wallet holdings")?;

    let pb = ui::new_progress_bar(0, true);
    pb.set_message("Fetching prices...");
    let on_progress = |done: usize, total: usize| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    };

    let portfolio = enricher.enrich(&rows, &on_progress).await;
    pb.finish_and_clear();

    if json {
        let snapshot = Snapshot {
            generated_at: Utc::now().to_rfc3339(),
            quote_currency,
            total_value: portfolio.total_value(),
            rows: &portfolio.rows,
            skipped: &portfolio.skipped,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if portfolio.rows.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No wallet found or nothing could be valued this session.",
                ui::StyleType::Warning
            )
        );
    } else {
        println!("{}", portfolio.display_as_table(quote_currency));
        println!(
            "\n{}",
            ui::style_text(
                &format!("Last updated: {}", Local::now().format("%d %B %Y - %H:%M")),
                ui::StyleType::Subtle
            )
        );
    }

    if !portfolio.skipped.is_empty() {
        let skipped: Vec<&str> = portfolio.skipped.iter().map(|s| s.as_str()).collect();
        println!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Skipped symbols not available on the price source: {}",
                    skipped.join(", ")
                ),
                ui::StyleType::Warning
            )
        );
    }

    Ok(())
}
