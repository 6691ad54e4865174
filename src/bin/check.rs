use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use klondeal::{logging, GameState, Oracle, OracleLimits, RoomVariant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoomOpt {
    Classic,
    DrawThree,
    KingsOnly,
}

#[derive(Debug, Parser)]
#[command(name = "check", about = "Run the solvability oracle on a deal")]
struct Args {
    /// Deal JSON file; reads stdin when omitted. Accepts a bare state or a
    /// `generate` output line.
    #[arg(long)]
    deal: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = RoomOpt::Classic)]
    room: RoomOpt,

    #[arg(long)]
    max_moves: Option<u32>,

    #[arg(long)]
    max_stock_passes: Option<u8>,

    #[arg(long)]
    max_states: Option<usize>,

    /// Leave the winning line out of the output
    #[arg(long, default_value_t = false)]
    no_line: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DealIn {
    Wrapped { deal: GameState },
    Bare(GameState),
}

fn read_input(path: Option<&PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(p) = path {
        let data = std::fs::read_to_string(p)
            .map_err(|e| format!("Deal read error ({}): {e}", p.display()))?;
        return Ok(data);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = logging::parse_level(&args.log_level)
        .ok_or_else(|| format!("Unknown log level: {}", args.log_level))?;
    logging::init(level);

    let input = read_input(args.deal.as_ref())?;
    let deal = match serde_json::from_str::<DealIn>(input.trim())
        .map_err(|e| format!("Deal parse error: {e}"))?
    {
        DealIn::Wrapped { deal } | DealIn::Bare(deal) => deal,
    };
    deal.validate().map_err(|e| format!("Deal rejected: {e}"))?;

    let room = match args.room {
        RoomOpt::Classic => RoomVariant::Classic,
        RoomOpt::DrawThree => RoomVariant::DrawThree,
        RoomOpt::KingsOnly => RoomVariant::KingsOnly,
    };
    let mut limits = OracleLimits::default();
    if let Some(v) = args.max_moves {
        limits.max_moves = v;
    }
    if let Some(v) = args.max_stock_passes {
        limits.max_stock_passes = v;
    }
    if let Some(v) = args.max_states {
        limits.max_states = v;
    }

    let mut oracle = Oracle::new(room.rules(), limits);
    let mut verdict = oracle.probe(&deal);
    if args.no_line {
        verdict.line.clear();
    }
    println!("{}", serde_json::to_string(&verdict)?);
    Ok(())
}
