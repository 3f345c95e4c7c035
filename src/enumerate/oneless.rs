use crate::Coalition;
use crate::Kind;

/// The coalitions reachable by removing a single member.
///
/// Yields one `(smaller coalition, removed type)` pair per type that is
/// present, not one per concrete member: members of a type are
/// interchangeable, so removing any of them gives the same coalition.
/// The removed type's entry stays in the smaller coalition even when it
/// drops to zero, which keeps every neighbor on the same lattice.
#[derive(Clone, Debug)]
pub struct OneLess<'a, K> {
    coalition: &'a Coalition<K>,
    index: usize,
}

impl<'a, K: Kind> From<&'a Coalition<K>> for OneLess<'a, K> {
    fn from(coalition: &'a Coalition<K>) -> Self {
        Self { coalition, index: 0 }
    }
}

impl<'a, K: Kind> Iterator for OneLess<'a, K> {
    type Item = (Coalition<K>, K);
    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.coalition.entries();
        while self.index < entries.len() {
            let i = self.index;
            self.index += 1;
            if entries[i].1 > 0 {
                return Some((self.coalition.decremented(i), entries[i].0.clone()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.coalition.entries().len() - self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_neighbor_per_type_present() {
        let c = Coalition::from_iter([(0, 3), (1, 2), (2, 2)]);
        let neighbors = OneLess::from(&c).collect::<Vec<_>>();
        assert_eq!(
            neighbors,
            vec![
                (Coalition::from_iter([(0, 2), (1, 2), (2, 2)]), 0),
                (Coalition::from_iter([(0, 3), (1, 1), (2, 2)]), 1),
                (Coalition::from_iter([(0, 3), (1, 2), (2, 1)]), 2),
            ]
        );
    }

    #[test]
    fn keeps_zero_entries() {
        let c = Coalition::from_iter([('a', 1), ('b', 0), ('c', 2)]);
        let neighbors = OneLess::from(&c).collect::<Vec<_>>();
        assert_eq!(neighbors.len(), 2);
        let (less, removed) = &neighbors[0];
        assert_eq!(*removed, 'a');
        assert_eq!(less.entries(), &[('a', 0), ('b', 0), ('c', 2)]);
        assert!(neighbors.iter().all(|(less, _)| less.entries().len() == 3));
    }

    #[test]
    fn empty_coalition_has_no_neighbors() {
        let c = Coalition::from_iter([('a', 0), ('b', 0)]);
        assert_eq!(OneLess::from(&c).count(), 0);
    }
}
