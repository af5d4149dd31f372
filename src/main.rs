use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use serde::Serialize;

// Use modules from the library
use deskmon::core::monitor::{MetricKind, MetricSet, Reading};
use deskmon::ui::render_pass;

/// One tick of readings as emitted in `--json` mode.
#[derive(Serialize)]
struct TickSnapshot<'a> {
    timestamp: i64,
    metrics: Vec<TickEntry<'a>>,
}

#[derive(Serialize)]
struct TickEntry<'a> {
    metric: MetricKind,
    reading: Option<&'a Reading>,
}

fn main() -> Result<()> {
    deskmon::init_logging();

    let matches = Command::new("deskmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Samples system resource counters and prints per-interval readings")
        .arg(
            Arg::new("metrics")
                .short('m')
                .long("metrics")
                .value_name("LIST")
                .value_delimiter(',')
                .default_value("network")
                .help("Comma-separated metrics to display (network, cpu, gpu, disk, memory)"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("1000")
                .help("Sampling interval in milliseconds"),
        )
        .arg(
            Arg::new("ticks")
                .short('n')
                .long("ticks")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u64))
                .help("Stop after this many ticks (default: run until Ctrl-C)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print one JSON object per tick instead of formatted text"),
        )
        .get_matches();

    let kinds: Vec<MetricKind> = matches
        .get_many::<String>("metrics")
        .into_iter()
        .flatten()
        .map(|name| {
            name.parse::<MetricKind>()
                .with_context(|| format!("invalid metric '{}'", name))
        })
        .collect::<Result<_>>()?;

    let interval_ms = matches.get_one::<u64>("interval").copied().unwrap_or(1000);
    let interval = Duration::from_millis(interval_ms);
    let max_ticks = matches.get_one::<u64>("ticks").copied();
    let json_output = matches.get_flag("json");

    // Activation captures each monitor's baseline, so the first tick below
    // measures a real interval. A metric whose counter source is missing
    // (typically disk) is skipped, not fatal.
    let mut metrics = MetricSet::new();
    for kind in kinds {
        if let Err(e) = metrics.activate(kind) {
            log::warn!("Cannot activate {}: {}", kind, e);
        }
    }
    if metrics.is_empty() {
        bail!("no metrics could be activated");
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_in_handler = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_in_handler.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl-C handler")?;

    let mut ticks = 0u64;
    while running.load(Ordering::SeqCst) {
        std::thread::sleep(interval);
        let pass = metrics.sample_all();

        if json_output {
            let snapshot = TickSnapshot {
                timestamp: chrono::Utc::now().timestamp(),
                metrics: pass
                    .iter()
                    .map(|(metric, result)| TickEntry {
                        metric: *metric,
                        reading: result.as_ref().ok(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            for (kind, text) in render_pass(&pass) {
                println!("{:<8} {}", kind, text);
            }
            println!();
        }

        ticks += 1;
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
    }

    Ok(())
}
