use super::*;

/// Valuation computed on demand by a closure.
///
/// The closure sees a coalition that has already been checked against the
/// game's lattice, so it may assume every declared type is present.
pub struct Formula<F>(F);

impl<F> Formula<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<K, F> Valuation<K> for Formula<F>
where
    K: Kind,
    F: Fn(&Coalition<K>) -> Utility + Send + Sync,
{
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        Ok((self.0)(coalition))
    }
}
