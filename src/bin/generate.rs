use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use klondeal::{
    logging, rng::entropy_seed, DealGenerator, DifficultyHint, GameState, GenerationDiagnostics,
    GeneratorOptions, RoomVariant,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyOpt {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoomOpt {
    Classic,
    DrawThree,
    KingsOnly,
}

#[derive(Debug, Parser)]
#[command(name = "generate", about = "Generate solvable Klondike deals as JSON lines")]
struct Args {
    /// Base seed; deal i uses seed + i. Omit for an entropy seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of deals to generate
    #[arg(long, default_value_t = 1)]
    count: u64,

    /// Generator options JSON file; flags below override its fields
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyOpt>,

    #[arg(long, value_enum)]
    room: Option<RoomOpt>,

    /// Override the reshuffle budget
    #[arg(long)]
    max_reshuffles: Option<u32>,

    /// Log level: off | error | warn | info | debug | trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Serialize)]
struct DealOut<'a> {
    deal: &'a GameState,
    diagnostics: &'a GenerationDiagnostics,
}

fn build_options(args: &Args) -> Result<GeneratorOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.options {
        Some(path) => GeneratorOptions::from_json_file(path)
            .map_err(|e| format!("Options load error ({}): {e}", path.display()))?,
        None => GeneratorOptions::default(),
    };
    if let Some(d) = args.difficulty {
        options.difficulty_hint = Some(match d {
            DifficultyOpt::Easy => DifficultyHint::Easy,
            DifficultyOpt::Medium => DifficultyHint::Medium,
            DifficultyOpt::Hard => DifficultyHint::Hard,
        });
    }
    if let Some(r) = args.room {
        options.room_variant = Some(match r {
            RoomOpt::Classic => RoomVariant::Classic,
            RoomOpt::DrawThree => RoomVariant::DrawThree,
            RoomOpt::KingsOnly => RoomVariant::KingsOnly,
        });
    }
    if let Some(n) = args.max_reshuffles {
        options.max_reshuffles = n;
    }
    options.validate().map_err(|e| format!("{e}"))?;
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = logging::parse_level(&args.log_level)
        .ok_or_else(|| format!("Unknown log level: {}", args.log_level))?;
    logging::init(level);

    let options = build_options(&args)?;
    let base = args.seed.or(options.seed).unwrap_or_else(entropy_seed);

    let pb = if args.count > 1 && !args.quiet {
        let pb = ProgressBar::new(args.count);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] deals {bar:40.cyan/blue} {pos}/{len}")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<(GameState, GenerationDiagnostics)> = (0..args.count)
        .into_par_iter()
        .map(|i| {
            let mut opts = options.clone();
            opts.seed = Some(base.wrapping_add(i));
            let out = DealGenerator::new(opts).generate();
            pb.inc(1);
            out
        })
        .collect();
    pb.finish_and_clear();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut degraded = 0usize;
    for (deal, diagnostics) in &results {
        if diagnostics.degraded {
            degraded += 1;
        }
        serde_json::to_writer(&mut out, &DealOut { deal, diagnostics })?;
        writeln!(out)?;
    }
    out.flush()?;

    if args.count > 1 {
        eprintln!(
            "[generate] {} deals from base seed {} ({} degraded)",
            results.len(),
            base,
            degraded
        );
    }
    Ok(())
}
