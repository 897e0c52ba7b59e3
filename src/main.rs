//! `progress-demo`: drives a progress line with simulated work.
//!
//! ```bash
//! progress-demo --total 100 --label "Demo bar" --bar-style Equal --decoration "Bar spinner"
//! progress-demo --steps 40 --decoration "Moon spinner"    # unbounded
//! RUST_LOG=progress_line=debug progress-demo --total 20   # engine events on stderr
//! ```

use std::{thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use progress_line::{LineWriter, Palette, ProgressBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render a live progress line for a simulated workload.
#[derive(Parser, Debug)]
#[command(name = "progress-demo", version, about)]
struct Cli {
    /// Number of steps; omit for an unbounded indicator.
    #[arg(short, long)]
    total: Option<u64>,

    /// Steps to run when no total is given.
    #[arg(long, default_value_t = 50)]
    steps: u64,

    /// Cells in the bar.
    #[arg(short, long, default_value_t = 30)]
    width: usize,

    /// Label shown before the count.
    #[arg(short, long)]
    label: Option<String>,

    /// Bar style: Equal, Solid, Circle, Square.
    #[arg(long, default_value = "Solid")]
    bar_style: String,

    /// Decoration: "Bar spinner", Dots, Column, "Pie spinner", "Moon spinner".
    #[arg(long, default_value = "Dots")]
    decoration: String,

    /// Colour the bar with a scrolling rainbow.
    #[arg(long)]
    rainbow: bool,

    /// Print one line per step instead of redrawing in place.
    #[arg(long)]
    append: bool,

    /// Disable colour escapes.
    #[arg(long)]
    no_color: bool,

    /// Simulated duration of one step, in milliseconds.
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Activity redraws while each step runs.
    #[arg(long, default_value_t = 4)]
    pulses: u32,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Pulses per step and the sleep before each redraw; together they fill `delay_ms`.
///
/// Append mode never pulses, so each step sleeps the whole delay at once.
fn pulse_schedule(cli: &Cli) -> (u32, Duration) {
    let pulses = if cli.append { 0 } else { cli.pulses };
    let every = Duration::from_millis(cli.delay_ms) / pulses.saturating_add(1);
    (pulses, every)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let palette = if cli.no_color {
        Palette::plain()
    } else {
        Palette::detect()
    };

    let mut builder = ProgressBuilder::new(cli.total)
        .with_bar_width(cli.width)
        .with_bar_style(cli.bar_style.as_str())
        .with_decoration(cli.decoration.as_str())
        .with_rainbow(cli.rainbow)
        .with_overwrite(!cli.append)
        .with_palette(palette);
    if let Some(label) = &cli.label {
        builder = builder.with_label(label.as_str());
    }
    let mut progress = builder.build().context("invalid progress configuration")?;

    let mut writer = LineWriter::stdout(!cli.append);
    let steps = cli.total.unwrap_or(cli.steps);
    let (pulses, pulse_every) = pulse_schedule(&cli);

    info!(steps, delay_ms = cli.delay_ms, "starting demo run");
    let mut last = String::new();
    for step in 0..steps {
        for _ in 0..pulses {
            thread::sleep(pulse_every);
            let line = progress.pulse_line(None);
            writer.write_line(&line).context("failed to write progress line")?;
        }
        thread::sleep(pulse_every);

        let sublabel = format!("item {}", step + 1);
        let line = progress.advance_line(None, Some(&sublabel));
        writer.write_line(&line).context("failed to write progress line")?;
        last = line.to_string();
    }

    // Unbounded runs never complete on their own; close the display explicitly.
    if !writer.is_closed() {
        writer
            .write_str(&last, true)
            .context("failed to finish progress line")?;
    }
    Ok(())
}
