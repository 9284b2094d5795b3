//! The NSGA-II generational loop for one scenario.
//!
//! Individuals are [`Assignment`]s: one option index per decision group plus
//! the objectives of that choice. Every generation breeds a full set of
//! offspring by binary tournament, uniform crossover and per-gene mutation,
//! then keeps the best half of parents and offspring by front rank and
//! crowding distance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tripweave_core::{Assignment, DecisionGroup, Objectives, SolverConfig};

use crate::pareto::{Standing, crowding_distances, non_dominated_fronts};

const CROSSOVER_BIAS: f64 = 0.5;

/// State of one seeded search over a fixed set of groups.
pub(crate) struct Nsga2Search<'g, 'a> {
    groups: &'g [DecisionGroup<'a>],
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
    rng: ChaCha8Rng,
}

impl<'g, 'a> Nsga2Search<'g, 'a> {
    /// Prepare a search. `groups` must all be non-empty.
    pub(crate) fn new(groups: &'g [DecisionGroup<'a>], config: &SolverConfig) -> Self {
        Self {
            groups,
            population_size: config.population_size,
            generations: config.generations,
            mutation_rate: config.mutation_rate,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Evolve the population and return the final generation.
    pub(crate) fn run(mut self) -> Vec<Assignment> {
        let mut population: Vec<Assignment> = (0..self.population_size)
            .map(|_| self.random_individual())
            .collect();

        for _ in 0..self.generations {
            let offspring = self.breed(&population);
            population.extend(offspring);
            population = self.survivors(population);
        }
        population
    }

    fn random_individual(&mut self) -> Assignment {
        let groups = self.groups;
        let rng = &mut self.rng;
        let choices = groups
            .iter()
            .map(|group| rng.gen_range(0..group.len()))
            .collect();
        Assignment::evaluate(groups, choices)
    }

    fn breed(&mut self, population: &[Assignment]) -> Vec<Assignment> {
        let objectives = objectives_of(population);
        let standing = Standing::of(&objectives);
        let mut offspring = Vec::with_capacity(self.population_size);

        while offspring.len() < self.population_size {
            let first = self.tournament(&standing);
            let second = self.tournament(&standing);
            let (Some(a), Some(b)) = (population.get(first), population.get(second)) else {
                break;
            };
            offspring.push(self.crossover(a, b));
        }
        offspring
    }

    /// Binary tournament over two distinct individuals.
    ///
    /// Lower rank wins; equal ranks go to the larger crowding distance, with
    /// the first contestant keeping ties.
    fn tournament(&mut self, standing: &Standing) -> usize {
        let size = standing.rank.len();
        if size < 2 {
            return 0;
        }
        let a = self.rng.gen_range(0..size);
        let mut b = self.rng.gen_range(0..size - 1);
        if b >= a {
            b += 1;
        }
        let rank = |idx: usize| standing.rank.get(idx).copied().unwrap_or(usize::MAX);
        let crowding = |idx: usize| standing.crowding.get(idx).copied().unwrap_or_default();

        match rank(a).cmp(&rank(b)) {
            std::cmp::Ordering::Less => a,
            std::cmp::Ordering::Greater => b,
            std::cmp::Ordering::Equal if crowding(a) >= crowding(b) => a,
            std::cmp::Ordering::Equal => b,
        }
    }

    /// Uniform crossover followed by per-gene mutation.
    fn crossover(&mut self, a: &Assignment, b: &Assignment) -> Assignment {
        let groups = self.groups;
        let mutation_rate = self.mutation_rate;
        let rng = &mut self.rng;
        let choices = groups
            .iter()
            .zip(a.choices.iter().zip(&b.choices))
            .map(|(group, (&from_a, &from_b))| {
                let inherited = if rng.gen_bool(CROSSOVER_BIAS) {
                    from_a
                } else {
                    from_b
                };
                if rng.gen_bool(mutation_rate) {
                    rng.gen_range(0..group.len())
                } else {
                    inherited
                }
            })
            .collect();
        Assignment::evaluate(groups, choices)
    }

    /// Keep `population_size` individuals, filling front by front and
    /// cutting the last admitted front by descending crowding distance.
    fn survivors(&self, combined: Vec<Assignment>) -> Vec<Assignment> {
        let objectives = objectives_of(&combined);
        let mut keep: Vec<usize> = Vec::with_capacity(self.population_size);

        for front in non_dominated_fronts(&objectives) {
            let room = self.population_size - keep.len();
            if front.len() > room {
                let distances = crowding_distances(&objectives, &front);
                let mut order: Vec<(usize, f64)> = front.into_iter().zip(distances).collect();
                order.sort_by(|x, y| y.1.total_cmp(&x.1));
                keep.extend(order.into_iter().take(room).map(|(idx, _)| idx));
                break;
            }
            keep.extend(front);
            if keep.len() == self.population_size {
                break;
            }
        }

        let mut slots: Vec<Option<Assignment>> = combined.into_iter().map(Some).collect();
        keep.into_iter()
            .filter_map(|idx| slots.get_mut(idx).and_then(Option::take))
            .collect()
    }
}

/// The first front of `population`, without repeated choice vectors.
pub(crate) fn first_front(population: Vec<Assignment>) -> Vec<Assignment> {
    let objectives = objectives_of(&population);
    let Some(front) = non_dominated_fronts(&objectives).into_iter().next() else {
        return Vec::new();
    };

    let mut slots: Vec<Option<Assignment>> = population.into_iter().map(Some).collect();
    let mut distinct: Vec<Assignment> = Vec::with_capacity(front.len());
    for assignment in front
        .into_iter()
        .filter_map(|idx| slots.get_mut(idx).and_then(Option::take))
    {
        if !distinct.iter().any(|known| known.choices == assignment.choices) {
            distinct.push(assignment);
        }
    }
    distinct
}

fn objectives_of(population: &[Assignment]) -> Vec<Objectives> {
    population.iter().map(|a| a.objectives).collect()
}
