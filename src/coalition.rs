use super::*;
use std::collections::BTreeMap;

/// A coalition collapsed by player type.
///
/// Holds one (Kind, count) pair per declared type, sorted by Kind.
/// Entries with count zero are kept, so two coalitions over the same
/// population always have the same shape and compare entry by entry.
/// Construction order never matters: the pairs are canonicalized on entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coalition<K>(Vec<(K, Count)>);

impl<K: Kind> Coalition<K> {
    pub fn entries(&self) -> &[(K, Count)] {
        &self.0
    }
    pub fn kinds(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|(k, _)| k)
    }
    /// members of this type, zero if the type is absent
    pub fn count(&self, kind: &K) -> Count {
        self.index(kind).map(|i| self.0[i].1).unwrap_or(0)
    }
    /// total number of concrete members
    pub fn size(&self) -> Count {
        self.0.iter().map(|(_, n)| n).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, n)| *n == 0)
    }
    pub fn index(&self, kind: &K) -> Option<usize> {
        self.0.binary_search_by(|(k, _)| k.cmp(kind)).ok()
    }

    /// add one member of the given type in place
    pub fn increment(&mut self, kind: &K) -> anyhow::Result<()> {
        let i = self
            .index(kind)
            .ok_or_else(|| anyhow::anyhow!("type {} not in coalition {}", kind, self))?;
        self.0[i].1 += 1;
        Ok(())
    }

    /// copy with the i-th entry lowered by one. the entry stays even at zero.
    pub(crate) fn decremented(&self, i: usize) -> Self {
        debug_assert!(self.0[i].1 > 0, "cannot remove from an empty type");
        let mut less = self.clone();
        less.0[i].1 -= 1;
        less
    }

    /// overwrite the i-th count
    pub(crate) fn set(&mut self, i: usize, n: Count) {
        self.0[i].1 = n;
    }

    /// entrywise sum of two coalitions over the same types
    pub fn union(&self, other: &Self) -> Option<Self> {
        if self.0.len() != other.0.len() {
            return None;
        }
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|((a, x), (b, y))| (a == b).then(|| (a.clone(), x + y)))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// the same types, every count set to zero
    pub fn emptied(&self) -> Self {
        Self(self.0.iter().map(|(k, _)| (k.clone(), 0)).collect())
    }
}

impl<K: Kind> From<BTreeMap<K, Count>> for Coalition<K> {
    fn from(map: BTreeMap<K, Count>) -> Self {
        Self(map.into_iter().collect())
    }
}

/// duplicate kinds collapse, the last count wins
impl<K: Kind> FromIterator<(K, Count)> for Coalition<K> {
    fn from_iter<I: IntoIterator<Item = (K, Count)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl<K: Kind> From<Coalition<K>> for BTreeMap<K, Count> {
    fn from(coalition: Coalition<K>) -> Self {
        coalition.0.into_iter().collect()
    }
}

/// parses `"A:1,B:2"`. whitespace is ignored, repeated types are rejected.
impl TryFrom<&str> for Coalition<String> {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| -> anyhow::Result<(String, Count)> {
                let (kind, count) = pair
                    .split_once(':')
                    .ok_or_else(|| anyhow::anyhow!("expected kind:count, got {}", pair))?;
                let count = count
                    .trim()
                    .parse::<Count>()
                    .map_err(|e| anyhow::anyhow!("invalid count in {}: {}", pair, e))?;
                Ok((kind.trim().to_string(), count))
            })
            .try_fold(BTreeMap::new(), |mut map, pair| -> anyhow::Result<_> {
                let (kind, count) = pair?;
                anyhow::ensure!(!map.contains_key(&kind), "type {} given twice in {}", kind, s);
                map.insert(kind, count);
                Ok(map)
            })
            .map(Self::from)
    }
}

impl<K: Kind> std::fmt::Display for Coalition<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, (k, n)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", k, n)?;
        }
        write!(f, ")")
    }
}
