//! Coalition valuations.
//!
//! A valuation is a pure function from a coalition to its payoff. It is
//! backed either by a closure ([`Formula`]), a weighted quota ([`Voting`]),
//! or an explicit lookup ([`Table`], usually produced by completing a
//! sparse table).

mod formula;
mod table;
mod voting;

pub use formula::*;
pub use table::*;
pub use voting::*;

use crate::Coalition;
use crate::Kind;
use crate::Utility;

/// Payoff of every coalition in a population's lattice.
///
/// Implementations must be pure: the same coalition always has the same
/// value. Errors signal coalitions the valuation cannot price, such as a
/// table lookup miss or a type without a declared voting weight.
pub trait Valuation<K: Kind>: Send + Sync {
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility>;
}

impl<K: Kind, V: Valuation<K> + ?Sized> Valuation<K> for Box<V> {
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        self.as_ref().value(coalition)
    }
}

impl<K: Kind, V: Valuation<K> + ?Sized> Valuation<K> for std::sync::Arc<V> {
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        self.as_ref().value(coalition)
    }
}
