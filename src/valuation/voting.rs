use super::*;
use crate::Population;
use std::collections::BTreeMap;

/// Weighted voting: a coalition wins (1) when the summed strength of its
/// members reaches the quota, and loses (0) otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Voting<K: Kind> {
    strengths: BTreeMap<K, Utility>,
    quota: Utility,
}

impl<K: Kind> Voting<K> {
    pub fn new<I>(strengths: I, quota: Utility) -> Self
    where
        I: IntoIterator<Item = (K, Utility)>,
    {
        Self {
            strengths: strengths.into_iter().collect(),
            quota,
        }
    }

    /// one vote per member, more than half of all members to win
    pub fn majority(population: &Population<K>) -> Self {
        Self::new(
            population.kinds().map(|k| (k.clone(), 1.0)),
            (population.total() / 2 + 1) as Utility,
        )
    }

    pub fn quota(&self) -> Utility {
        self.quota
    }

    /// summed strength of every member
    pub fn strength(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        coalition
            .entries()
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(k, n)| {
                self.strengths
                    .get(k)
                    .map(|s| s * *n as Utility)
                    .ok_or_else(|| anyhow::anyhow!("type {} has no voting strength", k))
            })
            .sum()
    }
}

impl<K: Kind> Valuation<K> for Voting<K> {
    fn value(&self, coalition: &Coalition<K>) -> anyhow::Result<Utility> {
        Ok(if self.strength(coalition)? >= self.quota { 1.0 } else { 0.0 })
    }
}

impl TryFrom<(&str, Utility)> for Voting<String> {
    type Error = anyhow::Error;
    /// parses strengths such as `"A:1,B:2"` alongside a quota
    fn try_from((strengths, quota): (&str, Utility)) -> Result<Self, Self::Error> {
        let strengths = strengths
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| -> anyhow::Result<(String, Utility)> {
                let (kind, strength) = pair
                    .split_once(':')
                    .ok_or_else(|| anyhow::anyhow!("expected kind:strength, got {}", pair))?;
                let strength = strength
                    .trim()
                    .parse::<Utility>()
                    .map_err(|e| anyhow::anyhow!("invalid strength in {}: {}", pair, e))?;
                Ok((kind.trim().to_string(), strength))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::new(strengths, quota))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_decides() {
        let voting = Voting::new([('a', 1.0), ('b', 2.0)], 4.0);
        let short = Coalition::from_iter([('a', 1), ('b', 1)]);
        let exact = Coalition::from_iter([('a', 2), ('b', 1)]);
        assert_eq!(voting.strength(&exact).unwrap(), 4.0);
        assert_eq!(voting.value(&short).unwrap(), 0.0);
        assert_eq!(voting.value(&exact).unwrap(), 1.0);
    }

    #[test]
    fn majority_of_seven_needs_four() {
        let pop = Population::new([('A', 3), ('B', 2), ('C', 2)]).unwrap();
        let voting = Voting::majority(&pop);
        assert_eq!(voting.quota(), 4.0);
    }

    #[test]
    fn missing_strength_is_an_error() {
        let voting = Voting::new([('a', 1.0)], 1.0);
        let stranger = Coalition::from_iter([('a', 0), ('z', 1)]);
        let absent = Coalition::from_iter([('a', 1), ('z', 0)]);
        assert!(voting.value(&stranger).is_err());
        assert_eq!(voting.value(&absent).unwrap(), 1.0);
    }

    #[test]
    fn parses_strengths() {
        let voting = Voting::<String>::try_from(("A:1, B:2", 3.0)).unwrap();
        let c = Coalition::<String>::try_from("A:1,B:1").unwrap();
        assert_eq!(voting.value(&c).unwrap(), 1.0);
        assert!(Voting::<String>::try_from(("A=1", 3.0)).is_err());
    }
}
