use super::*;
use std::collections::BTreeMap;

/// Banzhaf power for simple games, counted over concrete players.
///
/// A swing is a winning coalition together with one member whose departure
/// makes it lose. Every winning type-count vector is checked against its
/// one-less neighbors, and each losing neighbor contributes the number of
/// concrete (losing coalition, swing member) pairs it stands for.
///
/// Values are normalized so that, weighted by population, they sum to one:
/// a type's value is the chance that a uniformly drawn swing belongs to one
/// particular member of that type.
pub struct Banzhaf;

impl Banzhaf {
    pub fn values<K: Kind>(game: &CoalitionalGame<K>) -> anyhow::Result<Allocation<K>> {
        anyhow::ensure!(game.is_simple()?, "banzhaf values need a simple game");
        let population = game.population();
        crate::announce("banzhaf", population.lattice_size());
        #[cfg(not(feature = "parallel"))]
        let raw = game
            .coalitions()
            .try_fold(Swings::from(population), |acc, c| acc.absorb(game, &c))?;
        #[cfg(feature = "parallel")]
        let raw = {
            use rayon::prelude::*;
            game.coalitions()
                .collect::<Vec<_>>()
                .into_par_iter()
                .try_fold(|| Swings::from(population), |acc, c| acc.absorb(game, &c))
                .try_reduce(|| Swings::from(population), |a, b| a.merge(b))?
        };
        log::info!("banzhaf found {} swings", raw.total);
        Ok(raw.allocation(population))
    }

    /// Concrete coalitions collapsing onto `less`, times the members of
    /// `removed` still outside it: ∏ C(pop_t, less_t) × (pop_r − less_r).
    pub fn weight<K: Kind>(
        population: &Population<K>,
        less: &Coalition<K>,
        removed: &K,
    ) -> anyhow::Result<u128> {
        let outside = population
            .count(removed)
            .and_then(|n| n.checked_sub(less.count(removed)))
            .ok_or_else(|| anyhow::anyhow!("type {} cannot swing from {}", removed, less))?;
        less.entries()
            .iter()
            .try_fold(outside as u128, |acc, (k, n)| {
                let ways = Combinations::binomial(population.count(k)?, *n)?;
                acc.checked_mul(ways)
            })
            .ok_or_else(|| anyhow::anyhow!("swing count for {} overflows", less))
    }
}

/// raw swing tallies per type
struct Swings<K> {
    raw: BTreeMap<K, u128>,
    total: u128,
}

impl<K: Kind> From<&Population<K>> for Swings<K> {
    fn from(population: &Population<K>) -> Self {
        Self {
            raw: population.kinds().map(|k| (k.clone(), 0)).collect(),
            total: 0,
        }
    }
}

impl<K: Kind> Swings<K> {
    fn add(&mut self, kind: K, weight: u128) -> anyhow::Result<()> {
        let slot = self.raw.entry(kind).or_insert(0);
        *slot = slot
            .checked_add(weight)
            .ok_or_else(|| anyhow::anyhow!("swing tally overflows"))?;
        self.total = self
            .total
            .checked_add(weight)
            .ok_or_else(|| anyhow::anyhow!("swing tally overflows"))?;
        Ok(())
    }

    /// every swing out of one winning coalition
    fn absorb(mut self, game: &CoalitionalGame<K>, coalition: &Coalition<K>) -> anyhow::Result<Self> {
        if game.value(coalition)? != 1.0 {
            return Ok(self);
        }
        for (less, removed) in OneLess::from(coalition) {
            if game.value(&less)? == 0.0 {
                let weight = Banzhaf::weight(game.population(), &less, &removed)?;
                self.add(removed, weight)?;
            }
        }
        Ok(self)
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: Self) -> anyhow::Result<Self> {
        for (kind, weight) in other.raw {
            self.add(kind, weight)?;
        }
        Ok(self)
    }

    fn allocation(self, population: &Population<K>) -> Allocation<K> {
        if self.total == 0 {
            log::debug!("no swings at all, every type gets zero");
            return Allocation::zeros(population);
        }
        let total = self.total as Utility;
        self.raw
            .into_iter()
            .map(|(k, raw)| {
                let n = population.count(&k).unwrap_or(1) as Utility;
                (k, raw as Utility / (total * n))
            })
            .collect()
    }
}
