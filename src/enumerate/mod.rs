//! Exhaustive enumeration over coalitions and member orderings.
//!
//! Every iterator here is exponential in its input. Sizes are exposed up
//! front through `size_hint`, `binomial`, or `size` so callers can decide
//! before walking.

mod combinations;
mod lattice;
mod oneless;
mod permutations;
mod powerset;

pub use combinations::*;
pub use lattice::*;
pub use oneless::*;
pub use permutations::*;
pub use powerset::*;
