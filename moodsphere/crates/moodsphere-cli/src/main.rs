use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use moodsphere_core::{
    spoken_emotion, GlyphEmotionEntry, GlyphEmotionMap, MoodSession, PhaseState, SessionConfig,
    SessionFrame,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Reads lines from stdin and prints their mood resonance")]
struct Args {
    /// Session config (JSON); defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Replacement hue → glyph table (JSON)
    #[arg(long)]
    glyph_map: Option<PathBuf>,
    /// Seed for node placement, marks and colour jitter
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let glyph_map = match &args.glyph_map {
        Some(path) => GlyphEmotionMap::load(path)
            .with_context(|| format!("loading glyph map {}", path.display()))?,
        None => GlyphEmotionMap::default(),
    };
    info!(
        glyph_map_version = glyph_map.version(),
        seeded = args.seed.is_some(),
        "moodsphere.start"
    );
    let mut session = match args.seed {
        Some(seed) => MoodSession::with_seed(config, glyph_map, seed),
        None => MoodSession::new(config, glyph_map),
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix(':') {
            if let Err(err) = handle_command(rest, &mut session, args.format) {
                eprintln!("{err}");
            }
            continue;
        }
        let frame = session.submit(trimmed);
        match args.format {
            OutputFormat::Json => print_json(&frame),
            OutputFormat::Text => print_frame(&frame),
        }
    }
    Ok(())
}

fn handle_command(command: &str, session: &mut MoodSession, format: OutputFormat) -> Result<()> {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "state" => print_json(&session.phase_state()),
        "phase" => {
            let state = session.phase_state();
            println!(
                "PHASE {} {} depth={} nodes={} transition_complete={}",
                state.current_phase,
                moodsphere_core::phase_description(state.current_phase),
                state.interaction_depth,
                state.memory_nodes.len(),
                state.phase_transition_complete
            );
        }
        "history" => match format {
            OutputFormat::Json => print_json(&session.history()),
            OutputFormat::Text => {
                for entry in session.history() {
                    println!(
                        "{} hsl({:.0}, {:.0}%, {:.0}%) {}",
                        entry.timestamp.to_rfc3339(),
                        entry.hsl.h,
                        entry.hsl.s,
                        entry.hsl.l,
                        entry.text
                    );
                }
            }
        },
        "glyph" => {
            if arg.is_empty() {
                return Err(anyhow!("usage: :glyph <hue>"));
            }
            let hue: f32 = arg
                .parse()
                .map_err(|_| anyhow!(":glyph expects a number, got {arg}"))?;
            match session.find_glyph_for_hue(hue) {
                Some(entry) => match format {
                    OutputFormat::Json => print_json(entry),
                    OutputFormat::Text => print_entry(entry),
                },
                None => return Err(anyhow!("no glyph for hue {arg}")),
            }
        }
        "complete" => {
            session.complete_transition();
            println!("TRANSITION complete");
        }
        "load" => {
            if arg.is_empty() {
                return Err(anyhow!("usage: :load <file>"));
            }
            let state = read_state(Path::new(arg))?;
            session.load_state(state);
            println!("LOADED phase state <- {arg}");
        }
        "legacy" => match session.legacy() {
            Some(converted) => print_json(&converted?),
            None => return Err(anyhow!("nothing submitted yet")),
        },
        "spoken" => {
            let hsl = session.spoken(arg);
            match format {
                OutputFormat::Json => print_json(&hsl),
                OutputFormat::Text => println!(
                    "SPOKEN {} hsl({:.0}, {:.0}%, {:.0}%) {}",
                    spoken_emotion(arg),
                    hsl.h,
                    hsl.s,
                    hsl.l,
                    hsl.to_rgb()
                ),
            }
        }
        "semantic" => {
            let reading = session.semantic(arg);
            match format {
                OutputFormat::Json => print_json(&reading),
                OutputFormat::Text => println!(
                    "SEMANTIC {} weight={} emits={} hsl({:.0}, {:.0}%, {:.0}%)",
                    reading.mood.as_str(),
                    reading.total_weight,
                    reading.emits,
                    reading.hsl.h,
                    reading.hsl.s,
                    reading.hsl.l
                ),
            }
        }
        "help" => print_help(),
        other => return Err(anyhow!("Unknown command: :{other}")),
    }
    Ok(())
}

fn read_state(path: &Path) -> Result<PhaseState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading phase state {}", path.display()))?;
    let state = serde_json::from_str(&raw)
        .with_context(|| format!("parsing phase state {}", path.display()))?;
    Ok(state)
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(err) => eprintln!("encode failed: {err}"),
    }
}

fn print_frame(frame: &SessionFrame) {
    let mood = &frame.resonance.mood;
    println!(
        "MOOD {} hsl({:.0}, {:.0}%, {:.0}%) amplitude={:.3}",
        mood.color, mood.hsl.h, mood.hsl.s, mood.hsl.l, mood.amplitude
    );
    let glyphs: Vec<String> = frame
        .resonance
        .glyphs
        .iter()
        .map(|(glyph, score)| format!("{glyph}={score:.2}"))
        .collect();
    println!("GLYPHS {} dominant={}", glyphs.join(" "), frame.dominant_glyph);
    println!(
        "PHASE {} {} depth={} nodes={}",
        frame.phase.current_phase,
        frame.phase_description,
        frame.phase.interaction_depth,
        frame.phase.memory_nodes.len()
    );
    let profile = &frame.profile;
    println!(
        "EMOTION {} valence={} arousal={} shift={} color={}",
        profile.dominant_cluster,
        profile.valence.as_str(),
        profile.arousal.as_str(),
        profile.phase_shift,
        profile.color_hex
    );
    println!("  {}", profile.explanation);
    if let Some(entry) = &frame.hue_glyph {
        print_entry(entry);
    }
}

fn print_entry(entry: &GlyphEmotionEntry) {
    println!(
        "HUE {} {} ({}..={}) {}: {}",
        entry.glyph,
        entry.emotion,
        entry.hsl_range.h_min,
        entry.hsl_range.h_max,
        entry.label,
        entry.interpretation
    );
}

fn print_help() {
    println!("Type any line to interpret it. Commands:");
    println!("  :state            phase snapshot as JSON");
    println!("  :phase            current phase summary");
    println!("  :history          recent moods");
    println!("  :glyph <hue>      glyph for a hue in degrees");
    println!("  :complete         acknowledge the phase transition");
    println!("  :load <file>      replace phase state from a JSON snapshot");
    println!("  :legacy           last profile in legacy form");
    println!("  :spoken <text>    spoken-mood colour");
    println!("  :semantic <text>  semantic-weight reading");
    println!("  :help             this list");
}
