//! slidelist - Long-press drag-to-reorder for vertical lists.
//!
//! Usage:
//!   slidelist                      Launch the interactive demo list
//!   slidelist simulate --from 0 --offset 100
//!                                  Replay a drag headlessly and print the result
//!   slidelist --help               Show help

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use itertools::Itertools;
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use slidelist_core::{CommitMode, ReorderConfig, SlideState, apply_reorder};
use slidelist_gesture::{GestureController, ReorderHost, SlideStore};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "slidelist",
    version,
    about = "Long-press drag-to-reorder for vertical lists",
    long_about = "slidelist demonstrates drag-to-reorder on a fixed-height list.\n\n\
                  Run `slidelist` for the interactive terminal demo, or \
                  `slidelist simulate` to replay a drag without a terminal."
)]
struct Cli {
    /// Number of items in the demo list
    #[arg(short = 'n', long)]
    items: Option<usize>,

    /// How a drop is applied to the list
    #[arg(short, long)]
    commit: Option<CommitArg>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a drag against a list and print the reorder
    Simulate {
        /// Index of the dragged item
        #[arg(short, long)]
        from: usize,

        /// Total vertical drag distance in pixels (negative drags up)
        #[arg(short, long, allow_negative_numbers = true)]
        offset: f32,

        /// Size of each pointer move in pixels
        #[arg(short, long, default_value = "10")]
        step: f32,

        /// Number of items in the list
        #[arg(short = 'n', long, default_value = "21")]
        items: usize,

        /// Item height in pixels
        #[arg(long, default_value = "50")]
        item_height: u32,

        /// Slide threshold in pixels (defaults to half the item height)
        #[arg(long)]
        threshold: Option<u32>,

        /// How the drop is applied
        #[arg(short, long, default_value = "swap")]
        commit: CommitArg,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CommitArg {
    Swap,
    Move,
}

impl From<CommitArg> for CommitMode {
    fn from(arg: CommitArg) -> Self {
        match arg {
            CommitArg::Swap => CommitMode::Swap,
            CommitArg::Move => CommitMode::Move,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log.as_ref(), cli.command.is_some())?;

    match cli.command {
        Some(Command::Simulate {
            from,
            offset,
            step,
            items,
            item_height,
            threshold,
            commit,
            format,
        }) => {
            let config = ReorderConfig::builder()
                .item_height(item_height)
                .slide_threshold(threshold)
                .settle_duration_ms(0u64)
                .commit_mode(CommitMode::from(commit))
                .build()
                .context("Invalid reorder settings")?;
            run_simulate(config, items, from, offset, step, format)?;
        }
        None => {
            let config = slidelist_tui::TuiConfig {
                item_count: cli.items,
                commit_mode: cli.commit.map(CommitMode::from),
            };
            slidelist_tui::run(config)?;
        }
    }

    Ok(())
}

/// Install the log subscriber.
///
/// The TUI owns the terminal, so it only logs when a file is given.
fn init_logging(path: Option<&PathBuf>, headless: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slidelist=info,slidelist_core=info,slidelist_gesture=info".into());

    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None if headless => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Result of a simulated drag.
#[derive(Debug, Serialize)]
struct SimulationReport {
    from: usize,
    to: usize,
    commit_mode: CommitMode,
    displaced: Vec<(String, SlideState)>,
    order: Vec<String>,
}

enum SimEvent {
    Stopped { from: usize, to: usize },
}

/// Host that records slide states and forwards the drop.
struct SimHost {
    slides: SlideStore<String>,
    events: mpsc::UnboundedSender<SimEvent>,
}

impl ReorderHost<String> for SimHost {
    fn update_slide_state(&self, item: &String, state: SlideState) {
        tracing::debug!(%item, %state, "Slide state changed");
        self.slides.set(item, state);
    }

    fn on_stop_drag(&self, origin_index: usize, destination_index: usize) {
        let _ = self.events.send(SimEvent::Stopped {
            from: origin_index,
            to: destination_index,
        });
    }
}

/// Most pointer moves a simulation will replay.
const MAX_SIMULATED_MOVES: usize = 100_000;

/// Split a drag of `offset` pixels into moves of at most `step` pixels.
fn pointer_moves(offset: f32, step: f32) -> Result<Vec<f32>> {
    if !offset.is_finite() {
        bail!("Offset must be a finite number of pixels");
    }
    if !step.is_finite() || step <= 0.0 {
        bail!("Step must be positive");
    }

    let distance = offset.abs();
    let count = (distance / step).ceil();
    if count > MAX_SIMULATED_MOVES as f32 {
        bail!(
            "Offset {offset} in steps of {step} needs more than {MAX_SIMULATED_MOVES} moves; use a larger step"
        );
    }

    // Counted moves, so the loop ends even where `step` is below the f32
    // resolution of `distance`.
    let count = count as usize;
    let moves = (0..count)
        .map(|i| {
            let done = i as f32 * step;
            (distance - done).min(step).copysign(offset)
        })
        .filter(|delta| *delta != 0.0)
        .collect();
    Ok(moves)
}

/// Drag `items[from]` by `offset` pixels in `step` sized moves, then drop it.
fn run_simulate(
    config: ReorderConfig,
    count: usize,
    from: usize,
    offset: f32,
    step: f32,
    format: OutputFormat,
) -> Result<()> {
    if from >= count {
        bail!("Item {from} is out of range for a list of {count}");
    }
    let moves = pointer_moves(offset, step)?;

    let mut items: Vec<String> = (0..count).map(|i| format!("Item {i}")).collect();
    let rt = tokio::runtime::Runtime::new()?;

    let report = rt.block_on(async {
        let slides = SlideStore::new();
        let (events, mut event_rx) = mpsc::unbounded_channel();
        let host = std::sync::Arc::new(SimHost {
            slides: slides.clone(),
            events,
        });

        let controller = GestureController::spawn(items[from].clone(), host, &config);
        controller.start(items.clone()).await?;

        let mut applied = 0.0f32;
        for delta in moves {
            controller.drag(delta).await?;
            applied += delta;
        }

        // Commands are queued; wait until the last move has been applied.
        let mut phase = controller.subscribe_phase();
        let mut offsets = controller.subscribe_offset();
        offsets
            .wait_for(|current| *current == applied)
            .await
            .map_err(|_| eyre!("Controller stopped"))?;

        let mut displaced: Vec<(String, SlideState)> = slides.snapshot().into_iter().collect();
        displaced.sort_by(|a, b| a.0.cmp(&b.0));

        controller.end().await?;
        let Some(SimEvent::Stopped { from, to }) = event_rx.recv().await else {
            bail!("Controller stopped before the drop");
        };
        phase
            .wait_for(|phase| !phase.is_active())
            .await
            .map_err(|_| eyre!("Controller stopped"))?;
        controller.shutdown().await;

        Ok::<_, color_eyre::Report>((from, to, displaced))
    })?;

    let (from, to, displaced) = report;
    apply_reorder(&mut items, from, to, config.commit_mode)?;
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    let report = SimulationReport {
        from,
        to,
        commit_mode: config.commit_mode,
        displaced,
        order: items,
    };

    match format {
        OutputFormat::Text => {
            println!(" Dropped item {} at {} ({})", report.from, report.to, report.commit_mode);
            if !report.displaced.is_empty() {
                println!(
                    " Displaced while dragging: {}",
                    report
                        .displaced
                        .iter()
                        .map(|(item, state)| format!("{item} {state}"))
                        .join(", ")
                );
            }
            println!(" Order: {}", report.order.iter().join(", "));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_moves_cover_the_offset() {
        assert_eq!(pointer_moves(25.0, 10.0).unwrap(), vec![10.0, 10.0, 5.0]);
        assert_eq!(pointer_moves(-20.0, 10.0).unwrap(), vec![-10.0, -10.0]);
        assert!(pointer_moves(0.0, 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_pointer_moves_reject_bad_input() {
        assert!(pointer_moves(100.0, 0.0).is_err());
        assert!(pointer_moves(100.0, f32::NAN).is_err());
        assert!(pointer_moves(f32::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_huge_offset_is_rejected_instead_of_looping() {
        assert!(pointer_moves(1e9, 10.0).is_err());

        let moves = pointer_moves(1e6, 10.0).unwrap();
        assert_eq!(moves.len(), 100_000);
        assert!(moves.iter().all(|delta| *delta > 0.0 && *delta <= 10.0));
    }
}
