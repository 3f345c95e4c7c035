use super::Combinations;
use crate::Count;
use crate::Kind;
use crate::Population;

/// one type's placement: which of the still-free positions it occupies
#[derive(Clone, Debug)]
struct Placement {
    free: Vec<usize>,
    picks: Combinations,
    taken: Vec<usize>,
}

/// Every distinct ordering of a population's members, each exactly once.
///
/// A population `{a: 3, b: 2}` has 5!/(3!·2!) = 10 distinct orderings
/// rather than 5! = 120, because swapping two `a`s changes nothing.
/// Orderings are built by choosing, type by type, which of the remaining
/// free positions the type fills. The choice for every type is kept on an
/// explicit stack, so the walk is lazy and holds O(n·types) state.
/// The total is [`Population::orderings`].
#[derive(Clone, Debug)]
pub struct DistinctPermutations<K> {
    kinds: Vec<(K, Count)>,
    stack: Vec<Placement>,
    length: usize,
    started: bool,
    finished: bool,
}

impl<K: Kind> From<&Population<K>> for DistinctPermutations<K> {
    fn from(population: &Population<K>) -> Self {
        Self {
            kinds: population.iter().map(|(k, n)| (k.clone(), *n)).collect(),
            stack: Vec::new(),
            length: population.total(),
            started: false,
            finished: false,
        }
    }
}

impl<K: Kind> DistinctPermutations<K> {
    /// place every type below the current stack top at its first choice
    fn descend(&mut self) {
        while self.stack.len() < self.kinds.len() {
            let free = match self.stack.last() {
                None => (0..self.length).collect::<Vec<_>>(),
                Some(above) => above
                    .free
                    .iter()
                    .copied()
                    .filter(|p| !above.taken.contains(p))
                    .collect(),
            };
            let count = self.kinds[self.stack.len()].1;
            let mut picks = Combinations::from((free.len(), count));
            let taken = picks
                .next()
                .map(|pick| pick.into_iter().map(|i| free[i]).collect())
                .unwrap_or_default();
            self.stack.push(Placement { free, picks, taken });
        }
    }

    /// move the deepest type with choices left to its next choice
    fn ascend(&mut self) -> bool {
        while let Some(top) = self.stack.last_mut() {
            if let Some(pick) = top.picks.next() {
                top.taken = pick.into_iter().map(|i| top.free[i]).collect();
                return true;
            }
            self.stack.pop();
        }
        false
    }

    fn arrangement(&self) -> Vec<K> {
        let mut sequence = vec![None; self.length];
        for (placement, (kind, _)) in self.stack.iter().zip(self.kinds.iter()) {
            for &position in placement.taken.iter() {
                sequence[position] = Some(kind.clone());
            }
        }
        sequence.into_iter().flatten().collect()
    }
}

impl<K: Kind> Iterator for DistinctPermutations<K> {
    type Item = Vec<K>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.ascend() {
            self.finished = true;
            return None;
        }
        self.descend();
        Some(self.arrangement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn distinct(population: &Population<char>) -> BTreeSet<Vec<char>> {
        DistinctPermutations::from(population).collect()
    }

    #[test]
    fn three_and_two() {
        let pop = Population::new([('a', 3), ('b', 2)]).unwrap();
        let all = DistinctPermutations::from(&pop).collect::<Vec<_>>();
        assert_eq!(all.len(), 10);
        assert_eq!(distinct(&pop).len(), 10);
        for sequence in all.iter() {
            assert_eq!(sequence.len(), 5);
            assert_eq!(sequence.iter().filter(|k| **k == 'a').count(), 3);
            assert_eq!(sequence.iter().filter(|k| **k == 'b').count(), 2);
        }
    }

    #[test]
    fn counts_are_multinomial() {
        for counts in [vec![('a', 5), ('b', 1)], vec![('a', 2), ('b', 2), ('c', 2)]] {
            let pop = Population::new(counts).unwrap();
            let expected = pop.orderings().unwrap() as usize;
            assert_eq!(DistinctPermutations::from(&pop).count(), expected);
            assert_eq!(distinct(&pop).len(), expected);
        }
        let pop = Population::new([('a', 2), ('b', 2), ('c', 2)]).unwrap();
        assert_eq!(distinct(&pop).len(), 90);
        let pop = Population::new([('a', 5), ('b', 1)]).unwrap();
        assert_eq!(distinct(&pop).len(), 6);
    }

    #[test]
    fn unique_players_give_every_permutation() {
        let pop = Population::new([('a', 1), ('b', 1), ('c', 1), ('d', 1)]).unwrap();
        assert_eq!(distinct(&pop).len(), 24);
    }

    #[test]
    fn single_type_has_one_ordering() {
        let pop = Population::new([('z', 4)]).unwrap();
        let all = DistinctPermutations::from(&pop).collect::<Vec<_>>();
        assert_eq!(all, vec![vec!['z'; 4]]);
    }

    #[test]
    fn empty_population_has_the_empty_ordering() {
        let pop = Population::<char>::new([]).unwrap();
        let all = DistinctPermutations::from(&pop).collect::<Vec<_>>();
        assert_eq!(all, vec![Vec::<char>::new()]);
    }
}
