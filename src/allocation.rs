use super::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-type solution values: what each single member of a type receives.
///
/// Multiply by the type's population to get the type's share of the whole;
/// [`Allocation::total`] does exactly that across all types.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Allocation<K: Kind>(BTreeMap<K, Utility>);

impl<K: Kind> Allocation<K> {
    /// every type of the population at zero
    pub fn zeros(population: &Population<K>) -> Self {
        Self(population.kinds().map(|k| (k.clone(), 0.0)).collect())
    }
    pub fn get(&self, kind: &K) -> Option<Utility> {
        self.0.get(kind).copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Utility)> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Σ value × population over all types
    pub fn total(&self, population: &Population<K>) -> Utility {
        population
            .iter()
            .map(|(k, n)| self.get(k).unwrap_or(0.0) * *n as Utility)
            .sum()
    }
    /// largest per-type gap to another allocation
    pub fn distance(&self, other: &Self) -> Utility {
        self.0
            .keys()
            .chain(other.0.keys())
            .map(|k| (self.get(k).unwrap_or(0.0) - other.get(k).unwrap_or(0.0)).abs())
            .fold(0.0, Utility::max)
    }
}

impl<K: Kind> From<BTreeMap<K, Utility>> for Allocation<K> {
    fn from(values: BTreeMap<K, Utility>) -> Self {
        Self(values)
    }
}

impl<K: Kind> FromIterator<(K, Utility)> for Allocation<K> {
    fn from_iter<I: IntoIterator<Item = (K, Utility)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Kind> std::fmt::Display for Allocation<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (k, v) in self.0.iter() {
            writeln!(f, "{:<12}{:>12.6}", k.to_string(), v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_weights_by_population() {
        let pop = Population::new([(0, 2), (1, 1)]).unwrap();
        let allocation = Allocation::from_iter([(0, 1.0 / 6.0), (1, 2.0 / 3.0)]);
        assert!((allocation.total(&pop) - 1.0).abs() < 1e-12);
        assert_eq!(Allocation::zeros(&pop).total(&pop), 0.0);
    }

    #[test]
    fn distance_is_the_worst_gap() {
        let a = Allocation::from_iter([('x', 0.5), ('y', 0.25)]);
        let b = Allocation::from_iter([('x', 0.4), ('y', 0.5)]);
        assert_eq!(a.distance(&b), 0.25);
        assert_eq!(a.distance(&a), 0.0);
    }
}
