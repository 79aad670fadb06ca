use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use golfcal_core::assemble::{self, build_feed};
use owo_colors::OwoColorize;

use super::{Context, UPCOMING_LIMIT, fetch_external, today};
use crate::output::write_atomic;
use crate::render::Render;

/// One full generate-and-write cycle.
pub fn run(ctx: &Context, output: Option<PathBuf>, as_of: Option<NaiveDate>) -> Result<()> {
    let as_of = as_of.unwrap_or_else(today);
    let output = output.unwrap_or_else(|| ctx.settings.output_path());

    println!("{}", "🏌️ Golf Calendar".bold());
    println!(
        "   {} fixed tournaments {}",
        ctx.catalog.len(),
        format!("(catalog {})", ctx.catalog.version()).dimmed()
    );

    let outcome = fetch_external(&ctx.settings);
    println!("   {}", outcome.render());

    let feed = build_feed(
        ctx.catalog.records(),
        &outcome,
        as_of,
        &ctx.settings.feed_policy(),
    )?;

    for error in &feed.skipped {
        println!("   {} {}", "Skipped:".yellow(), error);
    }

    // Never replace a good feed with one a calendar reader would choke on.
    feed.verify().context("Generated feed failed verification")?;

    write_atomic(&output, &feed.document)
        .with_context(|| format!("Failed to write feed to {}", output.display()))?;

    println!(
        "\n📅 {} tournaments written to {}",
        feed.records.len(),
        output.display().green()
    );

    let upcoming = assemble::upcoming(&feed.records, as_of, UPCOMING_LIMIT);
    if !upcoming.is_empty() {
        println!("\nNext tournaments:");
        for record in upcoming {
            println!("   {}", record.render());
        }
    }

    Ok(())
}
