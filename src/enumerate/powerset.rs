use super::Combinations;

/// Every subset of a finite set, smallest subsets first.
///
/// `PowerSet::from(vec![1, 2, 3])` yields `[] [1] [2] [3] [1,2] [1,3] [2,3] [1,2,3]`.
/// Exactly 2^n items, each once. Clone the iterator to restart it.
#[derive(Clone, Debug)]
pub struct PowerSet<T> {
    items: Vec<T>,
    arity: usize,
    inner: Combinations,
}

impl<T: Clone> From<Vec<T>> for PowerSet<T> {
    fn from(items: Vec<T>) -> Self {
        let inner = Combinations::from((items.len(), 0));
        Self {
            items,
            arity: 0,
            inner,
        }
    }
}

impl<T: Clone> PowerSet<T> {
    /// 2^n, None once that overflows
    pub fn size(&self) -> Option<u128> {
        1u128.checked_shl(self.items.len() as u32)
    }
}

impl<T: Clone> Iterator for PowerSet<T> {
    type Item = Vec<T>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(indices) = self.inner.next() {
                return Some(indices.into_iter().map(|i| self.items[i].clone()).collect());
            }
            if self.arity == self.items.len() {
                return None;
            }
            self.arity += 1;
            self.inner = Combinations::from((self.items.len(), self.arity));
        }
    }
}
