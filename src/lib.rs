#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
// Card ranks, rows and columns are small by construction.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod types;
pub mod error;
pub mod rules;
pub mod cards;
pub mod board;
pub mod state;
pub mod hash;
pub mod rng;
pub mod shuffle;
pub mod resources;
pub mod logging;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod solver;
pub mod generator;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Tableau;
pub use crate::cards::{create_deck, validate_deck, Card};
pub use crate::engine::apply::{apply_move, apply_move_in_place, auto_complete};
pub use crate::engine::score::progress;
pub use crate::error::DealError;
pub use crate::generator::{
    generate_solvable_deal, DealGenerator, DifficultyHint, GenerationDiagnostics,
    GenerationEvent, GeneratorOptions, RoomVariant,
};
pub use crate::hash::zobrist_key;
pub use crate::resources::{CardTags, NoResources, ResourcePreservation, ResourceSnapshot};
pub use crate::rng::rng_for_seed;
pub use crate::rules::{can_place_on_foundation, can_place_on_tableau, Rules};
pub use crate::shuffle::{deal_from_deck, shuffle_deck, shuffle_deck_with};
pub use crate::solver::{is_solvable, solve, Oracle, OracleLimits, Verdict};
pub use crate::state::{check_win_condition, legal_moves, Deal, GameState, Move};
pub use crate::types::{Color, Slot, Suit};
