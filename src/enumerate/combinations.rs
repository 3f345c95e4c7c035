/// Every k-element subset of `0..n`, as ascending index vectors,
/// in lexicographic order.
///
/// Yields exactly C(n, k) items; none when k > n, one empty vector when k = 0.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    finished: bool,
}

impl From<(usize, usize)> for Combinations {
    fn from((n, k): (usize, usize)) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            finished: k > n,
        }
    }
}

impl Combinations {
    /// binomial coefficient C(n, k), None on overflow
    pub fn binomial(n: usize, k: usize) -> Option<u128> {
        if k > n {
            return Some(0);
        }
        let k = k.min(n - k);
        (0..k).try_fold(1u128, |acc, i| {
            acc.checked_mul((n - i) as u128).map(|x| x / (i + 1) as u128)
        })
    }

    /// advance the rightmost index that still has room,
    /// then pack everything to its right against it
    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            None => false,
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                true
            }
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;
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
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomials() {
        assert_eq!(Combinations::binomial(5, 2), Some(10));
        assert_eq!(Combinations::binomial(6, 3), Some(20));
        assert_eq!(Combinations::binomial(4, 0), Some(1));
        assert_eq!(Combinations::binomial(4, 4), Some(1));
        assert_eq!(Combinations::binomial(3, 4), Some(0));
        assert_eq!(Combinations::binomial(60, 30), Some(118264581564861424));
    }

    #[test]
    fn enumerates_in_order() {
        let all = Combinations::from((4, 2)).collect::<Vec<_>>();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(Combinations::from((3, 0)).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::from((0, 0)).count(), 1);
        assert_eq!(Combinations::from((2, 3)).count(), 0);
        assert_eq!(Combinations::from((3, 3)).count(), 1);
    }

    #[test]
    fn counts_match() {
        for n in 0..8 {
            for k in 0..=n {
                let expected = Combinations::binomial(n, k).unwrap() as usize;
                assert_eq!(Combinations::from((n, k)).count(), expected);
            }
        }
    }
}
