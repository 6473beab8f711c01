use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use runway_core::simulation::simulate;

mod document;
mod logging;
mod report;

use document::PlanDocument;

#[derive(Parser, Debug)]
#[command(name = "runway")]
#[command(about = "Deterministic day-by-day projection of a personal financial plan")]
struct Args {
    /// Plan document (.yaml, .yml, or .json)
    plan: PathBuf,

    /// First simulated date (default: the document's start_date)
    #[arg(long)]
    from: Option<jiff::civil::Date>,

    /// Last simulated date (default: the document's end_date)
    #[arg(long)]
    to: Option<jiff::civil::Date>,

    /// Write the projection JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level);

    let document = PlanDocument::load(&args.plan)
        .wrap_err_with(|| format!("could not load plan {}", args.plan.display()))?;

    let from = args
        .from
        .or(document.start_date)
        .ok_or_else(|| eyre!("no start date: pass --from or set start_date in the document"))?;
    let to = args
        .to
        .or(document.end_date)
        .ok_or_else(|| eyre!("no end date: pass --to or set end_date in the document"))?;
    if to < from {
        return Err(eyre!("empty range: {to} is before {from}"));
    }

    let start_day = document.day_offset(from);
    let end_day = document.day_offset(to);
    tracing::debug!(start_day, end_day, "projection range resolved");

    let projection = simulate(&document.plan, start_day, end_day);
    tracing::debug!(
        days = projection.data.len(),
        updates = projection.parameter_updates.len(),
        "projection complete"
    );

    let json = serde_json::to_string_pretty(&projection)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .wrap_err_with(|| format!("could not write {}", path.display()))?,
        None => println!("{json}"),
    }

    report::print_summary(&document, &projection);

    Ok(())
}
