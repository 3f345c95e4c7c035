use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// Identifier of a player type.
///
/// Anything comparable, hashable and printable qualifies. All players
/// sharing a Kind are interchangeable with respect to every valuation.
pub trait Kind: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> Kind for T where T: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}
