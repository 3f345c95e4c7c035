//! Coalitional-game values over populations of interchangeable player types.
//!
//! Players within a type are interchangeable, so a coalition collapses to a
//! per-type count vector and every algorithm here enumerates those vectors
//! (or distinct orderings of the member multiset) instead of raw subsets.
//!
//! # Module Structure
//!
//! - `kind`: Player type identifiers
//! - `population`: Validated type → count populations
//! - `coalition`: Canonical type-count vectors
//! - `enumerate`: Combinations, powersets, lattice walks, distinct permutations
//! - `valuation`: Formula, table, and voting valuations; table completion
//! - `game`: CoalitionalGame with predicates and zero-normalization
//! - `shapley`: Exact and Monte-Carlo Shapley values
//! - `banzhaf`: Exact Banzhaf indices for simple games
//! - `allocation`: Per-type solution maps
//! - `scenario`: Glove, majority, and Security Council presets
mod allocation;
mod banzhaf;
mod coalition;
mod enumerate;
mod game;
mod kind;
mod population;
mod scenario;
mod shapley;
mod valuation;

pub use allocation::*;
pub use banzhaf::*;
pub use coalition::*;
pub use enumerate::*;
pub use game::*;
pub use kind::*;
pub use population::*;
pub use scenario::*;
pub use shapley::*;
pub use valuation::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Coalition payoffs, marginal contributions, and solution values.
pub type Utility = f64;
/// Number of concrete players of one type (or in one coalition).
pub type Count = usize;

// ============================================================================
// NUMERICS
// ============================================================================
/// Slack for comparing payoffs in predicates and normalization.
pub const TOLERANCE: Utility = 1e-9;

// ============================================================================
// ENUMERATION LIMITS
// Exact algorithms are exponential. Nothing is capped, but anything
// above this many items is announced before the walk begins.
// ============================================================================
/// Item count above which exhaustive enumerations log a warning.
pub const EXHAUSTIVE_WARNING: u128 = 1 << 24;

// ============================================================================
// MONTE CARLO
// ============================================================================
/// Default number of sampled orderings for approximate Shapley values.
pub const MONTE_CARLO_TRIALS: usize = 100_000;
/// Default seed for reproducible sampling from the command line.
pub const MONTE_CARLO_SEED: u64 = 0x5EED;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn logging(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}

/// Announce an exhaustive enumeration, warning when it is very large.
pub(crate) fn announce(what: &str, items: Option<u128>) {
    match items {
        Some(n) if n > EXHAUSTIVE_WARNING => log::warn!("{} walks {} items", what, n),
        Some(n) => log::debug!("{} walks {} items", what, n),
        None => log::warn!("{} walks more items than fit in u128", what),
    }
}
