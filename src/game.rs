use super::*;
use anyhow::Context;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A coalitional game: a population of typed players and the payoff of
/// every coalition they can form.
///
/// The game never changes after construction. Solutions are computed on
/// first request and cached per instance; transformations such as
/// [`CoalitionalGame::zero_normalize`] build new games.
pub struct CoalitionalGame<K: Kind> {
    population: Population<K>,
    valuation: Box<dyn Valuation<K>>,
    shapley: OnceLock<Allocation<K>>,
    banzhaf: OnceLock<Allocation<K>>,
}

impl<K: Kind> CoalitionalGame<K> {
    /// Checks that the valuation prices every coalition of the lattice with
    /// a finite number before accepting it. The check walks the whole
    /// lattice once.
    pub fn new<V>(population: Population<K>, valuation: V) -> anyhow::Result<Self>
    where
        V: Valuation<K> + 'static,
    {
        crate::announce("valuation check", population.lattice_size());
        for coalition in LatticeWalk::from(&population) {
            let value = valuation
                .value(&coalition)
                .with_context(|| format!("valuation undefined on {}", coalition))?;
            anyhow::ensure!(
                value.is_finite(),
                "valuation of {} is not finite: {}",
                coalition,
                value
            );
        }
        Ok(Self {
            population,
            valuation: Box::new(valuation),
            shapley: OnceLock::new(),
            banzhaf: OnceLock::new(),
        })
    }

    pub fn population(&self) -> &Population<K> {
        &self.population
    }

    /// payoff of a coalition, rejecting anything off the lattice
    pub fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        anyhow::ensure!(
            self.population.contains(coalition),
            "coalition {} lies outside population {}",
            coalition,
            self.population
        );
        self.valuation.value(coalition)
    }

    /// payoff of everybody together
    pub fn grand(&self) -> anyhow::Result<Utility> {
        self.value(&self.population.grand())
    }

    /// every coalition of the lattice
    pub fn coalitions(&self) -> LatticeWalk<K> {
        LatticeWalk::from(&self.population)
    }

    /// every coalition with its payoff
    pub fn table(&self) -> anyhow::Result<Table<K>> {
        self.coalitions()
            .map(|c| self.value(&c).map(|v| (c, v)))
            .collect::<anyhow::Result<HashMap<_, _>>>()
            .map(Table::new)
    }

    /// every payoff is 0 or 1
    pub fn is_simple(&self) -> anyhow::Result<bool> {
        for coalition in self.coalitions() {
            let v = self.value(&coalition)?;
            if v != 0.0 && v != 1.0 {
                log::debug!("not simple: {} is worth {}", coalition, v);
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// no coalition is worth less than any coalition it contains.
    /// checking one-less neighbors covers every pair by transitivity.
    pub fn is_monotonic(&self) -> anyhow::Result<bool> {
        for coalition in self.coalitions() {
            let v = self.value(&coalition)?;
            for (less, _) in OneLess::from(&coalition) {
                if self.value(&less)? > v + TOLERANCE {
                    log::debug!("not monotonic: {} is worth less than {}", coalition, less);
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// any two disjoint coalitions are worth at least as much together.
    /// quadratic in the lattice size.
    pub fn is_superadditive(&self) -> anyhow::Result<bool> {
        let values = self.table()?;
        for (s, vs) in values.iter() {
            for (t, vt) in values.iter() {
                let Some(union) = s.union(t) else { continue };
                let Some(vu) = values.get(&union) else { continue };
                if vu + TOLERANCE < vs + vt {
                    log::debug!("not superadditive: {} and {} apart beat {}", s, t, union);
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Strategically equivalent game in which every singleton is worth 0.
    ///
    /// Each type's singleton value is its offset. Every coalition loses the
    /// offsets of its members and is divided by the distance between the
    /// grand coalition's value and the sum of all members' offsets, so the
    /// grand coalition ends up worth +1, -1, or 0 (when that distance is
    /// zero and nothing is rescaled). Returns the new game and that sign.
    pub fn zero_normalize(&self) -> anyhow::Result<(Self, i8)> {
        let offsets = self
            .population
            .kinds()
            .map(|k| -> anyhow::Result<(K, Utility)> {
                Ok((k.clone(), self.value(&self.population.singleton(k))?))
            })
            .collect::<anyhow::Result<BTreeMap<K, Utility>>>()?;
        let shift = |coalition: &Coalition<K>| -> Utility {
            coalition
                .entries()
                .iter()
                .map(|(k, n)| offsets[k] * *n as Utility)
                .sum()
        };
        let grand = self.grand()?;
        let offtotal = shift(&self.population.grand());
        let (scale, sign) = if offtotal < grand {
            (grand - offtotal, 1)
        } else if offtotal > grand {
            (offtotal - grand, -1)
        } else {
            (1.0, 0)
        };
        log::debug!("normalizing with offsets {:?} and scale {}", offsets, scale);
        let values = self
            .coalitions()
            .map(|c| -> anyhow::Result<(Coalition<K>, Utility)> {
                let v = (self.value(&c)? - shift(&c)) / scale;
                Ok((c, v))
            })
            .collect::<anyhow::Result<HashMap<_, _>>>()?;
        let game = Self::new(self.population.clone(), Table::new(values))?;
        Ok((game, sign))
    }

    /// exact Shapley values, computed once
    pub fn shapley(&self) -> anyhow::Result<Allocation<K>> {
        if let Some(cached) = self.shapley.get() {
            return Ok(cached.clone());
        }
        let values = Shapley::values(self)?;
        Ok(self.shapley.get_or_init(|| values).clone())
    }

    /// exact Banzhaf values, computed once
    pub fn banzhaf(&self) -> anyhow::Result<Allocation<K>> {
        if let Some(cached) = self.banzhaf.get() {
            return Ok(cached.clone());
        }
        let values = Banzhaf::values(self)?;
        Ok(self.banzhaf.get_or_init(|| values).clone())
    }
}

impl<K: Kind> std::fmt::Debug for CoalitionalGame<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CoalitionalGame")
            .field("population", &self.population)
            .finish_non_exhaustive()
    }
}
