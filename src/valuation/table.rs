use super::*;
use crate::LatticeWalk;
use crate::OneLess;
use crate::Population;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Valuation backed by an explicit coalition → payoff lookup.
///
/// Lookups of coalitions missing from the table are errors, never zero.
/// Tables handed to a game must cover the whole lattice; [`Table::complete`]
/// turns a sparse table into such a total one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table<K: Kind>(HashMap<Coalition<K>, Utility>);

impl<K: Kind> Table<K> {
    /// wrap an explicit table as is, no filling
    pub fn new(values: HashMap<Coalition<K>, Utility>) -> Self {
        Self(values)
    }

    /// Extend a sparse table over the whole lattice of `population`.
    ///
    /// The empty coalition is always worth 0, whatever the caller supplied.
    /// Every coalition without a value takes the best value among the
    /// coalitions one member smaller. Walking the lattice in non-decreasing
    /// size order guarantees those are already settled, and every
    /// coalition reaches the empty one by removing members, so nothing is
    /// ever left undefined.
    ///
    /// This "best known sub-coalition" rule suits non-negative, monotone
    /// profit games. It is not an interpolation. Runs in O(lattice × types).
    pub fn complete(
        mut values: HashMap<Coalition<K>, Utility>,
        population: &Population<K>,
    ) -> anyhow::Result<Self> {
        if let Some(stray) = values.keys().find(|c| !population.contains(c)) {
            anyhow::bail!("coalition {} lies outside population {}", stray, population);
        }
        if let Some(v) = values.insert(population.empty(), 0.0) {
            if v != 0.0 {
                log::debug!("empty coalition forced to 0, discarding {}", v);
            }
        }
        crate::announce("table completion", population.lattice_size());
        let given = values.len();
        for coalition in LatticeWalk::graded(population) {
            if values.contains_key(&coalition) {
                continue;
            }
            let best = OneLess::from(&coalition)
                .filter_map(|(less, _)| values.get(&less).copied())
                .reduce(Utility::max)
                .unwrap_or(0.0);
            values.insert(coalition, best);
        }
        log::debug!("completed {} given values to {}", given, values.len());
        Ok(Self(values))
    }

    /// complete a table keyed by type counts
    pub fn grouped<I>(population: &Population<K>, entries: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (Coalition<K>, Utility)>,
    {
        Self::complete(Self::sparse(entries)?, population)
    }

    /// Complete a table keyed by sets of unique players.
    ///
    /// Every label mentioned anywhere becomes its own type with a
    /// population of one, so `{[0, 1]: 1, [0, 2]: 1}` describes three
    /// players where player 0 pairs with either of the others.
    pub fn ungrouped<I, P>(entries: I) -> anyhow::Result<(Population<K>, Self)>
    where
        I: IntoIterator<Item = (P, Utility)>,
        P: IntoIterator<Item = K>,
    {
        let entries = entries
            .into_iter()
            .map(|(players, v)| (players.into_iter().collect::<BTreeSet<K>>(), v))
            .collect::<Vec<_>>();
        let players = entries
            .iter()
            .flat_map(|(players, _)| players.iter().cloned())
            .collect::<BTreeSet<K>>();
        let population = Population::new(players.iter().map(|k| (k.clone(), 1)))?;
        let values = Self::sparse(entries.into_iter().map(|(members, v)| {
            let coalition = players
                .iter()
                .map(|k| (k.clone(), members.contains(k) as usize))
                .collect::<Coalition<K>>();
            (coalition, v)
        }))?;
        let table = Self::complete(values, &population)?;
        Ok((population, table))
    }

    /// gather sparse entries. a coalition priced twice must get the same value both times.
    fn sparse<I>(entries: I) -> anyhow::Result<HashMap<Coalition<K>, Utility>>
    where
        I: IntoIterator<Item = (Coalition<K>, Utility)>,
    {
        let mut values = HashMap::new();
        for (coalition, v) in entries {
            match values.insert(coalition.clone(), v) {
                Some(old) if old != v => {
                    anyhow::bail!("coalition {} given both {} and {}", coalition, old, v)
                }
                Some(_) => log::debug!("coalition {} given twice", coalition),
                None => {}
            }
        }
        Ok(values)
    }

    pub fn get(&self, coalition: &Coalition<K>) -> Option<Utility> {
        self.0.get(coalition).copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Coalition<K>, &Utility)> {
        self.0.iter()
    }
    pub fn into_inner(self) -> HashMap<Coalition<K>, Utility> {
        self.0
    }
}

impl<K: Kind> Valuation<K> for Table<K> {
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        self.get(coalition)
            .ok_or_else(|| anyhow::anyhow!("no value recorded for coalition {}", coalition))
    }
}

impl Table<String> {
    /// Parses grouped entries such as `"P:5,T:2=1; P:5,T:3=1"`.
    /// Types left out of an entry count zero.
    pub fn parse_grouped(s: &str, population: &Population<String>) -> anyhow::Result<Self> {
        let entries = split_entries(s)?
            .into_iter()
            .map(|(key, v)| -> anyhow::Result<(Coalition<String>, Utility)> {
                let given = Coalition::<String>::try_from(key)?;
                let coalition = population
                    .kinds()
                    .map(|k| (k.clone(), given.count(k)))
                    .collect::<Coalition<String>>();
                anyhow::ensure!(
                    given.kinds().all(|k| population.count(k).is_some()),
                    "entry {} names a type outside population {}",
                    key,
                    population
                );
                Ok((coalition, v))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::grouped(population, entries)
    }

    /// Parses ungrouped entries such as `"0,1=1; 0,2=1"`.
    pub fn parse_ungrouped(s: &str) -> anyhow::Result<(Population<String>, Self)> {
        let entries = split_entries(s)?
            .into_iter()
            .map(|(key, v)| {
                let players = key
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>();
                (players, v)
            })
            .collect::<Vec<_>>();
        Self::ungrouped(entries)
    }
}

/// `"key=value; key=value"` into pairs
fn split_entries(s: &str) -> anyhow::Result<Vec<(&str, Utility)>> {
    s.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> anyhow::Result<(&str, Utility)> {
            let (key, value) = entry
                .rsplit_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected coalition=value, got {}", entry))?;
            let value = value
                .trim()
                .parse::<Utility>()
                .map_err(|e| anyhow::anyhow!("invalid value in {}: {}", entry, e))?;
            Ok((key.trim(), value))
        })
        .collect()
}
