use crate::Coalition;
use crate::Count;
use crate::Kind;
use crate::Population;

/// Every coalition a population admits: the lattice
/// `{0..=pop_1} × … × {0..=pop_k}`, walked like a mixed-radix odometer
/// with the last type turning fastest.
///
/// Yields ∏(pop_i + 1) coalitions. Any coalition's one-less neighbors come
/// before it, since they are lexicographically smaller. Use
/// [`LatticeWalk::graded`] when a strict non-decreasing size order is needed.
#[derive(Clone, Debug)]
pub struct LatticeWalk<K> {
    current: Coalition<K>,
    limits: Vec<Count>,
    remaining: Option<u128>,
    started: bool,
    finished: bool,
}

impl<K: Kind> From<&Population<K>> for LatticeWalk<K> {
    fn from(population: &Population<K>) -> Self {
        Self {
            current: population.empty(),
            limits: population.iter().map(|(_, n)| *n).collect(),
            remaining: population.lattice_size(),
            started: false,
            finished: false,
        }
    }
}

impl<K: Kind> LatticeWalk<K> {
    /// the whole lattice sorted by member count, smallest first.
    /// materializes ∏(pop_i + 1) coalitions.
    pub fn graded(population: &Population<K>) -> std::vec::IntoIter<Coalition<K>> {
        let mut lattice = Self::from(population).collect::<Vec<_>>();
        lattice.sort_by_key(Coalition::size);
        lattice.into_iter()
    }

    /// increment the odometer. false once it wraps around.
    fn advance(&mut self) -> bool {
        for i in (0..self.limits.len()).rev() {
            let n = self.current.entries()[i].1;
            if n < self.limits[i] {
                self.current.set(i, n + 1);
                return true;
            }
            self.current.set(i, 0);
        }
        false
    }
}

impl<K: Kind> Iterator for LatticeWalk<K> {
    type Item = Coalition<K>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.finished = true;
            return None;
        }
        self.remaining = self.remaining.map(|n| n.saturating_sub(1));
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.finished { Some(0) } else { self.remaining };
        match left.and_then(|n| usize::try_from(n).ok()) {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}
