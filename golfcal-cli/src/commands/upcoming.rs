use anyhow::Result;
use chrono::NaiveDate;
use golfcal_core::EventRecord;
use golfcal_core::assemble::{self, build_feed};
use golfcal_core::source::FetchOutcome;
use owo_colors::OwoColorize;

use super::{Context, fetch_external, today};
use crate::render::Render;

pub fn run(ctx: &Context, limit: usize, as_of: Option<NaiveDate>) -> Result<()> {
    let as_of = as_of.unwrap_or_else(today);

    let outcome = fetch_external(&ctx.settings);
    let upcoming = listing(ctx, &outcome, as_of, limit)?;

    if upcoming.is_empty() {
        println!("{}", "No upcoming tournaments.".dimmed());
        return Ok(());
    }

    for record in &upcoming {
        println!("{}", record.render());
    }

    Ok(())
}

/// Upcoming tournaments as they would appear in the written feed, so records
/// that cannot be encoded are not listed.
fn listing(
    ctx: &Context,
    outcome: &FetchOutcome,
    as_of: NaiveDate,
    limit: usize,
) -> Result<Vec<EventRecord>> {
    let feed = build_feed(
        ctx.catalog.records(),
        outcome,
        as_of,
        &ctx.settings.feed_policy(),
    )?;

    Ok(assemble::upcoming(&feed.records, as_of, limit)
        .into_iter()
        .cloned()
        .collect())
}
