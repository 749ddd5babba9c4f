//! Shot-chart CLI
//!
//! Segment reports and A/B delta comparisons over season shot files.

#[cfg(feature = "cli")]
use anyhow::{bail, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use shotchart_cli::{
    build_segment, compare_segments, format_bins, format_delta, format_hierarchy, format_overall,
    format_stats_table, segment_summary, SegmentSelection,
};
#[cfg(feature = "cli")]
use shotchart_core::engine::clock::TimeWindow;
#[cfg(feature = "cli")]
use shotchart_core::ShotStore;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "shotchart")]
#[command(about = "Spatial shot-distribution reports from season files", long_about = None)]
struct Cli {
    /// Directory containing shots_by_season/<season>_<team>.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct SegmentArgs {
    /// Season key, e.g. "2024-25"
    #[arg(long)]
    season: String,

    /// Team code, e.g. "LAL"
    #[arg(long)]
    team: String,

    /// Player id
    #[arg(long)]
    player: u32,

    /// Time window in elapsed game minutes, "start,end" (half-open)
    #[arg(long, default_value = "0,48")]
    range: String,

    /// Require this teammate on court
    #[arg(long)]
    teammate_on: Option<u32>,

    /// Require this teammate off court
    #[arg(long)]
    teammate_off: Option<u32>,

    /// Require this opponent on court
    #[arg(long)]
    opponent_on: Option<u32>,

    /// Require this opponent off court
    #[arg(long)]
    opponent_off: Option<u32>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Report one segment: overall line, shot-type table, heatmap bins
    Report {
        #[command(flatten)]
        segment: SegmentArgs,

        /// Emit the full view-model as JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Compare two segments and print the delta split
    Compare {
        /// Segment A: "season,team,player" (e.g. "2024-25,LAL,2544")
        #[arg(long)]
        a: String,

        /// Segment A time window, "start,end"
        #[arg(long, default_value = "0,24")]
        range_a: String,

        /// Segment B: "season,team,player"
        #[arg(long)]
        b: String,

        /// Segment B time window, "start,end"
        #[arg(long, default_value = "24,48")]
        range_b: String,

        /// Emit the delta split as JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn parse_range(raw: &str) -> Result<TimeWindow> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        bail!("range must be \"start,end\", got '{}'", raw);
    }
    let start: f32 = parts[0].trim().parse()?;
    let end: f32 = parts[1].trim().parse()?;
    Ok(TimeWindow::new(start, end))
}

#[cfg(feature = "cli")]
fn parse_segment_key(raw: &str, range: &str) -> Result<SegmentSelection> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        bail!("segment must be \"season,team,player\", got '{}'", raw);
    }
    Ok(SegmentSelection {
        season: parts[0].trim().to_string(),
        team: parts[1].trim().to_string(),
        player_id: parts[2].trim().parse()?,
        window: parse_range(range)?,
        teammate_on: None,
        teammate_off: None,
        opponent_on: None,
        opponent_off: None,
    })
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut store = ShotStore::new(&cli.data_dir);

    match cli.command {
        Commands::Report { segment, json } => {
            let selection = SegmentSelection {
                season: segment.season,
                team: segment.team,
                player_id: segment.player,
                window: parse_range(&segment.range)?,
                teammate_on: segment.teammate_on,
                teammate_off: segment.teammate_off,
                opponent_on: segment.opponent_on,
                opponent_off: segment.opponent_off,
            };
            let ctx = build_segment(&mut store, &selection);

            if json {
                println!("{}", serde_json::to_string_pretty(&segment_summary(&ctx))?);
            } else {
                println!(
                    "📊 {} {} player {} [{}m, {}m)",
                    selection.season,
                    selection.team,
                    selection.player_id,
                    selection.window.start,
                    selection.window.end
                );
                println!("Overall: {}\n", format_overall(&ctx.overall()));
                print!("{}", format_stats_table(ctx.flat_stats()));
                println!();
                print!("{}", format_hierarchy(ctx.hierarchy()));
                println!();
                print!("{}", format_bins(ctx.bins()));
            }
        }

        Commands::Compare { a, range_a, b, range_b, json } => {
            let sel_a = parse_segment_key(&a, &range_a)?;
            let sel_b = parse_segment_key(&b, &range_b)?;

            let ctx_a = build_segment(&mut store, &sel_a);
            let ctx_b = build_segment(&mut store, &sel_b);
            let delta = compare_segments(&ctx_a, &ctx_b);

            if json {
                println!("{}", serde_json::to_string_pretty(&delta)?);
            } else {
                println!("📊 A: {} {} player {}", sel_a.season, sel_a.team, sel_a.player_id);
                println!("   Overall: {}", format_overall(&ctx_a.overall()));
                println!("📊 B: {} {} player {}", sel_b.season, sel_b.team, sel_b.player_id);
                println!("   Overall: {}\n", format_overall(&ctx_b.overall()));
                print!("{}", format_delta(&delta));
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("shotchart_cli was built without the 'cli' feature");
}
