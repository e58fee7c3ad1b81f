//! Configuration system for the branch predictor simulator.
//!
//! This module defines all configuration structures and enums used to size the
//! predictor tables. It provides:
//! 1. **Defaults:** Table widths used when a field is not supplied.
//! 2. **Structures:** Per-scheme config for gshare, tournament, and the custom hybrid.
//! 3. **Validation:** Rejection of geometries the engine will not allocate.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with
//! `Config::default()`. Every table width is a log2 entry count.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the table geometry when not explicitly overridden.
mod defaults {
    /// Largest index width any table may use (2^30 entries).
    pub const MAX_TABLE_BITS: usize = 30;

    /// Default gshare global history / table index width (128K counters).
    pub const GSHARE_HISTORY_BITS: usize = 17;

    /// Default Tournament choice table index width (16K entries).
    pub const TOURNAMENT_CHOICE_BITS: usize = 14;

    /// Default Tournament global table index width (64K entries).
    pub const TOURNAMENT_GLOBAL_BITS: usize = 16;

    /// Default Tournament local history width, which is also the local table
    /// index width (16K entries).
    pub const TOURNAMENT_LOCAL_HIST_BITS: usize = 14;

    /// Default Tournament local history table index width (1K PC slots).
    pub const TOURNAMENT_PC_BITS: usize = 10;

    /// Default custom-scheme local history table index width (1K PC slots).
    pub const CUSTOM_PC_BITS: usize = 10;

    /// Default custom-scheme local history width (4K counters).
    pub const CUSTOM_LOCAL_HIST_BITS: usize = 12;

    /// Default width of the XOR-folded index feeding both tagged caches.
    pub const CUSTOM_CACHE_HISTORY_BITS: usize = 14;

    /// Default tagged cache set index width (256 sets of 2 ways).
    pub const CUSTOM_CACHE_SET_BITS: usize = 8;
}

pub use defaults::MAX_TABLE_BITS;

/// Branch prediction scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Always predicts taken.
    #[default]
    Static,
    /// Global history XOR PC indexed counter table.
    #[serde(alias = "Gshare")]
    GShare,
    /// Local/global tournament with a choice table.
    Tournament,
    /// Local base predictor with tagged override caches.
    Custom,
}

impl PredictorKind {
    /// Returns the scheme name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::GShare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{Config, PredictorKind};
///
/// let json = r#"{
///     "predictor": {
///         "kind": "Tournament",
///         "tournament": { "choice_bits": 10 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.predictor.kind, PredictorKind::Tournament);
/// assert_eq!(config.predictor.tournament.choice_bits, 10);
/// assert_eq!(config.predictor.tournament.global_bits, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Predictor scheme and table geometry
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.predictor.validate()?;
        Ok(config)
    }
}

/// Scheme selection plus the geometry of every scheme.
///
/// Only the geometry of the selected scheme is used; the others are carried so
/// a single document can be re-run with a different `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictorConfig {
    /// Active scheme
    #[serde(default)]
    pub kind: PredictorKind,

    /// Gshare predictor configuration
    #[serde(default)]
    pub gshare: GShareConfig,

    /// Tournament predictor configuration
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// Custom hybrid predictor configuration
    #[serde(default)]
    pub custom: CustomConfig,
}

impl PredictorConfig {
    /// Checks the geometry of the selected scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableTooLarge`] when a table would exceed
    /// [`MAX_TABLE_BITS`] index bits, and
    /// [`ConfigError::CacheSetsExceedIndex`] when the custom scheme's set index
    /// is wider than its cache index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            PredictorKind::Static => Ok(()),
            PredictorKind::GShare => check_bits("gshare table", self.gshare.history_bits),
            PredictorKind::Tournament => {
                let t = &self.tournament;
                check_bits("tournament choice table", t.choice_bits)?;
                check_bits("tournament global table", t.global_bits)?;
                check_bits("tournament local table", t.local_hist_bits)?;
                check_bits("tournament local history table", t.pc_bits)
            }
            PredictorKind::Custom => {
                let c = &self.custom;
                check_bits("custom local table", c.local_hist_bits)?;
                check_bits("custom local history table", c.pc_bits)?;
                check_bits("custom cache index", c.cache_history_bits)?;
                if c.cache_set_bits > c.cache_history_bits {
                    return Err(ConfigError::CacheSetsExceedIndex {
                        set_bits: c.cache_set_bits,
                        history_bits: c.cache_history_bits,
                    });
                }
                Ok(())
            }
        }
    }
}

fn check_bits(table: &'static str, bits: usize) -> Result<(), ConfigError> {
    if bits > MAX_TABLE_BITS {
        Err(ConfigError::TableTooLarge {
            table,
            bits,
            max: MAX_TABLE_BITS,
        })
    } else {
        Ok(())
    }
}

/// Gshare predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GShareConfig {
    /// Global history length, also the counter table size (log2)
    #[serde(default = "GShareConfig::default_history")]
    pub history_bits: usize,
}

impl GShareConfig {
    /// Returns the default gshare history width.
    fn default_history() -> usize {
        defaults::GSHARE_HISTORY_BITS
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            history_bits: defaults::GSHARE_HISTORY_BITS,
        }
    }
}

/// Tournament branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentConfig {
    /// Choice table size (log2), indexed by global history
    #[serde(default = "TournamentConfig::default_choice")]
    pub choice_bits: usize,

    /// Global table size (log2), indexed by global history
    #[serde(default = "TournamentConfig::default_global")]
    pub global_bits: usize,

    /// Local history width and local table size (log2)
    #[serde(default = "TournamentConfig::default_local_hist")]
    pub local_hist_bits: usize,

    /// Local history table size (log2), indexed by PC
    #[serde(default = "TournamentConfig::default_pc")]
    pub pc_bits: usize,
}

impl TournamentConfig {
    /// Returns the default Tournament choice table size (log2).
    fn default_choice() -> usize {
        defaults::TOURNAMENT_CHOICE_BITS
    }

    /// Returns the default Tournament global table size (log2).
    fn default_global() -> usize {
        defaults::TOURNAMENT_GLOBAL_BITS
    }

    /// Returns the default Tournament local history width (log2 of local table).
    fn default_local_hist() -> usize {
        defaults::TOURNAMENT_LOCAL_HIST_BITS
    }

    /// Returns the default Tournament local history table size (log2).
    fn default_pc() -> usize {
        defaults::TOURNAMENT_PC_BITS
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            choice_bits: defaults::TOURNAMENT_CHOICE_BITS,
            global_bits: defaults::TOURNAMENT_GLOBAL_BITS,
            local_hist_bits: defaults::TOURNAMENT_LOCAL_HIST_BITS,
            pc_bits: defaults::TOURNAMENT_PC_BITS,
        }
    }
}

/// Custom hybrid (local base + tagged override caches) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomConfig {
    /// Local history table size (log2), indexed by PC
    #[serde(default = "CustomConfig::default_pc")]
    pub pc_bits: usize,

    /// Local history width and local table size (log2)
    #[serde(default = "CustomConfig::default_local_hist")]
    pub local_hist_bits: usize,

    /// Width of the PC XOR global history index shared by both caches
    #[serde(default = "CustomConfig::default_cache_history")]
    pub cache_history_bits: usize,

    /// Set index width (log2 of sets per cache); the rest of the index is the tag
    #[serde(default = "CustomConfig::default_cache_sets")]
    pub cache_set_bits: usize,
}

impl CustomConfig {
    fn default_pc() -> usize {
        defaults::CUSTOM_PC_BITS
    }

    fn default_local_hist() -> usize {
        defaults::CUSTOM_LOCAL_HIST_BITS
    }

    fn default_cache_history() -> usize {
        defaults::CUSTOM_CACHE_HISTORY_BITS
    }

    fn default_cache_sets() -> usize {
        defaults::CUSTOM_CACHE_SET_BITS
    }
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            pc_bits: defaults::CUSTOM_PC_BITS,
            local_hist_bits: defaults::CUSTOM_LOCAL_HIST_BITS,
            cache_history_bits: defaults::CUSTOM_CACHE_HISTORY_BITS,
            cache_set_bits: defaults::CUSTOM_CACHE_SET_BITS,
        }
    }
}
