use super::*;
use std::collections::BTreeMap;

/// How many interchangeable players of each type take part in a game.
///
/// Every declared type has at least one member. The population fixes the
/// coalition lattice `{0..=pop_1} × … × {0..=pop_k}` that valuations
/// must cover and that the engines walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Population<K>(BTreeMap<K, Count>);

impl<K: Kind> Population<K> {
    /// rejects zero counts and repeated types
    pub fn new<I>(counts: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, Count)>,
    {
        let mut map = BTreeMap::new();
        for (kind, count) in counts {
            anyhow::ensure!(count > 0, "type {} must have a positive population", kind);
            anyhow::ensure!(
                map.insert(kind.clone(), count).is_none(),
                "type {} declared twice",
                kind
            );
        }
        Ok(Self(map))
    }

    /// counts how often each type occurs in a sequence of concrete players
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut map = BTreeMap::new();
        for kind in members {
            *map.entry(kind).or_insert(0) += 1;
        }
        Self(map)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Count)> {
        self.0.iter()
    }
    pub fn kinds(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }
    pub fn count(&self, kind: &K) -> Option<Count> {
        self.0.get(kind).copied()
    }
    /// number of declared types
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// number of concrete players
    pub fn total(&self) -> Count {
        self.0.values().sum()
    }

    /// one entry per concrete player, grouped by type
    pub fn members(&self) -> Vec<K> {
        self.0
            .iter()
            .flat_map(|(k, n)| std::iter::repeat_n(k.clone(), *n))
            .collect()
    }

    /// number of coalitions in the lattice, ∏(pop + 1)
    pub fn lattice_size(&self) -> Option<u128> {
        self.0
            .values()
            .try_fold(1u128, |acc, n| acc.checked_mul(*n as u128 + 1))
    }
    /// number of distinct orderings of the members, n! / ∏ pop!
    pub fn orderings(&self) -> Option<u128> {
        self.0
            .values()
            .try_fold((1u128, 0usize), |(acc, placed), n| {
                let ways = Combinations::binomial(placed + n, *n)?;
                acc.checked_mul(ways).map(|acc| (acc, placed + n))
            })
            .map(|(acc, _)| acc)
    }

    pub fn grand(&self) -> Coalition<K> {
        self.0.iter().map(|(k, n)| (k.clone(), *n)).collect()
    }
    pub fn empty(&self) -> Coalition<K> {
        self.0.keys().map(|k| (k.clone(), 0)).collect()
    }
    /// exactly one member of the given type and nobody else
    pub fn singleton(&self, kind: &K) -> Coalition<K> {
        self.0
            .keys()
            .map(|k| (k.clone(), if k == kind { 1 } else { 0 }))
            .collect()
    }

    /// whether the coalition is a point of this population's lattice
    pub fn contains(&self, coalition: &Coalition<K>) -> bool {
        coalition.entries().len() == self.0.len()
            && coalition
                .entries()
                .iter()
                .zip(self.0.iter())
                .all(|((a, x), (b, y))| a == b && x <= y)
    }
}

/// parses `"A:3,B:2"`
impl TryFrom<&str> for Population<String> {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let coalition = Coalition::<String>::try_from(s)?;
        Self::new(coalition.entries().iter().cloned())
    }
}

impl<K: Kind> std::fmt::Display for Population<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.grand())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_population() {
        assert!(Population::new([('a', 2), ('b', 0)]).is_err());
        assert!(Population::new([('a', 2), ('a', 1)]).is_err());
        assert!(Population::new([('a', 2), ('b', 1)]).is_ok());
    }

    #[test]
    fn sizes() {
        let pop = Population::new([('a', 3), ('b', 2)]).unwrap();
        assert_eq!(pop.total(), 5);
        assert_eq!(pop.lattice_size(), Some(12));
        assert_eq!(pop.orderings(), Some(10));
        let pop = Population::new([(0, 2), (1, 2), (2, 2)]).unwrap();
        assert_eq!(pop.orderings(), Some(90));
    }

    #[test]
    fn members_round_trip() {
        let pop = Population::new([("T", 2), ("P", 3)]).unwrap();
        assert_eq!(pop.members(), vec!["P", "P", "P", "T", "T"]);
        assert_eq!(Population::from_members([0, 1, 2, 3, 3, 3, 0, 0]).count(&0), Some(3));
        assert_eq!(Population::from_members(pop.members()), pop);
    }

    #[test]
    fn lattice_membership() {
        let pop = Population::new([('a', 2), ('b', 1)]).unwrap();
        assert!(pop.contains(&pop.grand()));
        assert!(pop.contains(&pop.empty()));
        assert!(pop.contains(&pop.singleton(&'b')));
        assert!(!pop.contains(&Coalition::from_iter([('a', 3), ('b', 0)])));
        assert!(!pop.contains(&Coalition::from_iter([('a', 1)])));
        assert!(!pop.contains(&Coalition::from_iter([('a', 1), ('c', 0)])));
    }

    #[test]
    fn parse() {
        let pop = Population::<String>::try_from("P:5, T:10").unwrap();
        assert_eq!(pop.count(&"T".to_string()), Some(10));
        assert!(Population::<String>::try_from("P:0").is_err());
        assert!(Population::<String>::try_from("P:1,P:2").is_err());
    }
}
