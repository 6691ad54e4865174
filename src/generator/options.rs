use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DealError, DealResult};
use crate::rules::Rules;
use crate::solver::OracleLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyHint {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyHint {
    /// Oracle limits for this difficulty, derived from `base`.
    ///
    /// Easy only accepts deals with a short witness and few stock passes;
    /// Hard lets the oracle dig deeper before calling a deal unsolvable.
    pub fn adjust(self, base: OracleLimits) -> OracleLimits {
        match self {
            DifficultyHint::Easy => OracleLimits {
                max_moves: base.max_moves.min(300),
                max_stock_passes: base.max_stock_passes.min(2),
                max_states: base.max_states,
            },
            DifficultyHint::Medium => base,
            DifficultyHint::Hard => OracleLimits {
                max_moves: base.max_moves,
                max_stock_passes: base.max_stock_passes.max(6),
                max_states: base.max_states.saturating_mul(2),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomVariant {
    #[default]
    Classic,
    DrawThree,
    KingsOnly,
}

impl RoomVariant {
    pub fn rules(self) -> Rules {
        match self {
            RoomVariant::Classic => Rules::classic(),
            RoomVariant::DrawThree => Rules::draw_three(),
            RoomVariant::KingsOnly => Rules::new(1, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Base seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub difficulty_hint: Option<DifficultyHint>,
    pub room_variant: Option<RoomVariant>,
    /// Fresh shuffles after the first one.
    pub max_reshuffles: u32,
    /// Repair passes attempted on each unsolvable shuffle.
    pub max_repairs_per_shuffle: u32,
    /// Swap combinations tried in one repair pass.
    pub max_swaps_per_repair: u32,
    pub oracle: OracleLimits,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty_hint: None,
            room_variant: None,
            max_reshuffles: 24,
            max_repairs_per_shuffle: 2,
            max_swaps_per_repair: 6,
            oracle: OracleLimits::default(),
        }
    }
}

impl GeneratorOptions {
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.room_variant.unwrap_or_default().rules()
    }

    #[inline]
    pub fn oracle_limits(&self) -> OracleLimits {
        self.difficulty_hint.unwrap_or_default().adjust(self.oracle)
    }

    pub fn validate(&self) -> DealResult<()> {
        if self.oracle.max_states == 0 {
            return Err(DealError::Options {
                reason: "oracle.max_states must be positive".to_string(),
            });
        }
        if self.oracle.max_moves == 0 {
            return Err(DealError::Options {
                reason: "oracle.max_moves must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json_str(data: &str) -> DealResult<Self> {
        let options: GeneratorOptions = serde_json::from_str(data)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DealResult<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }
}
