use super::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Shapley values: each player's marginal contribution averaged over every
/// order in which the grand coalition could assemble.
///
/// Players of one type are interchangeable, so the exact engine only visits
/// distinct orderings of the member multiset. Each of them stands for the
/// same number of concrete orderings, which keeps the plain average exact.
pub struct Shapley;

impl Shapley {
    /// exact values over every distinct ordering
    pub fn values<K: Kind>(game: &CoalitionalGame<K>) -> anyhow::Result<Allocation<K>> {
        let population = game.population();
        crate::announce("exact shapley", population.orderings());
        #[cfg(not(feature = "parallel"))]
        let marginals = DistinctPermutations::from(population)
            .try_fold(Marginals::from(population), |acc, ordering| {
                acc.absorb(game, &ordering)
            })?;
        #[cfg(feature = "parallel")]
        let marginals = {
            use rayon::prelude::*;
            DistinctPermutations::from(population)
                .par_bridge()
                .try_fold(
                    || Marginals::from(population),
                    |acc, ordering| acc.absorb(game, &ordering),
                )
                .try_reduce(|| Marginals::from(population), |a, b| Ok(a.merge(b)))?
        };
        log::info!("exact shapley over {} orderings", marginals.rounds);
        Ok(marginals.allocation(population))
    }

    /// Monte-Carlo estimate from `trials` uniformly shuffled orderings,
    /// seeded from the thread RNG
    pub fn simulate<K: Kind>(
        game: &CoalitionalGame<K>,
        trials: usize,
    ) -> anyhow::Result<Allocation<K>> {
        let ref mut rng = SmallRng::from_rng(&mut rand::rng());
        Self::sample(game, trials, rng)
    }

    /// reproducible Monte-Carlo estimate
    pub fn simulate_seeded<K: Kind>(
        game: &CoalitionalGame<K>,
        trials: usize,
        seed: u64,
    ) -> anyhow::Result<Allocation<K>> {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        Self::sample(game, trials, rng)
    }

    /// Monte-Carlo estimate driven by any random source
    pub fn sample<K: Kind, R: Rng>(
        game: &CoalitionalGame<K>,
        trials: usize,
        rng: &mut R,
    ) -> anyhow::Result<Allocation<K>> {
        anyhow::ensure!(trials > 0, "monte carlo needs at least one trial");
        let population = game.population();
        let mut members = population.members();
        let mut marginals = Marginals::from(population);
        for _ in 0..trials {
            members.shuffle(rng);
            marginals = marginals.absorb(game, &members)?;
        }
        log::info!("sampled shapley over {} orderings", marginals.rounds);
        Ok(marginals.allocation(population))
    }
}

/// running per-type sums of marginal contributions
struct Marginals<K> {
    sums: BTreeMap<K, Utility>,
    rounds: u64,
}

impl<K: Kind> From<&Population<K>> for Marginals<K> {
    fn from(population: &Population<K>) -> Self {
        Self {
            sums: population.kinds().map(|k| (k.clone(), 0.0)).collect(),
            rounds: 0,
        }
    }
}

impl<K: Kind> Marginals<K> {
    /// add the marginals of every member as the ordering is walked front to back
    fn absorb(mut self, game: &CoalitionalGame<K>, ordering: &[K]) -> anyhow::Result<Self> {
        let mut coalition = game.population().empty();
        let mut old = 0.0;
        for kind in ordering {
            coalition.increment(kind)?;
            let new = game.value(&coalition)?;
            *self
                .sums
                .get_mut(kind)
                .ok_or_else(|| anyhow::anyhow!("ordering names unknown type {}", kind))? +=
                new - old;
            old = new;
        }
        self.rounds += 1;
        Ok(self)
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: Self) -> Self {
        for (kind, sum) in other.sums {
            *self.sums.entry(kind).or_insert(0.0) += sum;
        }
        self.rounds += other.rounds;
        self
    }

    /// average marginal per concrete member of each type
    fn allocation(self, population: &Population<K>) -> Allocation<K> {
        let rounds = self.rounds as Utility;
        self.sums
            .into_iter()
            .map(|(k, sum)| {
                let n = population.count(&k).unwrap_or(1) as Utility;
                (k, sum / (rounds * n))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Utility, b: Utility, eps: Utility) -> bool {
        (a - b).abs() < eps
    }

    fn of(values: &Allocation<String>, kind: &str) -> Utility {
        values.get(&kind.to_string()).unwrap()
    }

    fn efficient<K: Kind>(game: &CoalitionalGame<K>) {
        let values = Shapley::values(game).unwrap();
        let total = values.total(game.population());
        assert!(close(total, game.grand().unwrap(), 1e-9));
    }

    #[test]
    fn glove_exact() {
        let values = Shapley::values(&glove().unwrap()).unwrap();
        assert!(close(of(&values, "0"), 1.0 / 6.0, 1e-12));
        assert!(close(of(&values, "1"), 2.0 / 3.0, 1e-12));
    }

    #[test]
    fn efficiency() {
        efficient(&glove().unwrap());
        efficient(&glove_ungrouped().unwrap());
        efficient(&security_council_1945().unwrap());
        let pop = Population::new([('A', 3), ('B', 2), ('C', 2)]).unwrap();
        efficient(&majority(pop).unwrap());
        let pop = Population::new([('a', 2), ('b', 3)]).unwrap();
        let quadratic = Formula::new(|c: &Coalition<char>| {
            let n = c.size() as Utility;
            n * n + c.count(&'a') as Utility
        });
        efficient(&CoalitionalGame::new(pop, quadratic).unwrap());
    }

    #[test]
    fn security_council_1965() {
        let game = crate::security_council_1965().unwrap();
        let values = Shapley::values(&game).unwrap();
        assert!(close(of(&values, "P"), 0.196270396, 1e-8));
        assert!(close(of(&values, "T"), 0.001864802, 1e-8));
    }

    #[test]
    fn monte_carlo_converges() {
        let game = glove_ungrouped().unwrap();
        let values = Shapley::simulate_seeded(&game, MONTE_CARLO_TRIALS, 7).unwrap();
        let exact = Allocation::from_iter(
            [("0", 1.0 / 6.0), ("1", 1.0 / 6.0), ("2", 2.0 / 3.0)].map(|(k, v)| (k.to_string(), v)),
        );
        assert!(values.distance(&exact) < 0.01);
        let values = Shapley::simulate(&glove().unwrap(), MONTE_CARLO_TRIALS).unwrap();
        assert!(close(of(&values, "1"), 2.0 / 3.0, 0.01));
    }

    #[test]
    fn seeded_runs_repeat() {
        let game = glove_ungrouped().unwrap();
        let a = Shapley::simulate_seeded(&game, 1_000, 42).unwrap();
        let b = Shapley::simulate_seeded(&game, 1_000, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_trials_rejected() {
        assert!(Shapley::simulate(&glove().unwrap(), 0).is_err());
    }

    #[test]
    fn lone_player_takes_its_own_value() {
        let pop = Population::new([('x', 1)]).unwrap();
        let game = CoalitionalGame::new(pop, Formula::new(|c: &Coalition<char>| {
            3.5 * c.size() as Utility
        }))
        .unwrap();
        assert_eq!(Shapley::values(&game).unwrap().get(&'x'), Some(3.5));
        assert_eq!(Shapley::simulate_seeded(&game, 10, 1).unwrap().get(&'x'), Some(3.5));
    }
}
