//! Non-dominated sorting and crowding distance over objective pairs.

use tripweave_core::Objectives;

/// Split `objectives` into Pareto fronts, best first.
///
/// Each front lists indices into `objectives`. Front 0 holds every point no
/// other point dominates; front `k + 1` holds the points dominated only by
/// members of fronts `0..=k`.
#[expect(
    clippy::indexing_slicing,
    reason = "all indices are drawn from 0..objectives.len()"
)]
pub(crate) fn non_dominated_fronts(objectives: &[Objectives]) -> Vec<Vec<usize>> {
    let count = objectives.len();
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut dominated_by = vec![0_usize; count];
    let mut current = Vec::new();

    for p in 0..count {
        for q in 0..count {
            if p == q {
                continue;
            }
            if objectives[p].dominates(&objectives[q]) {
                dominates[p].push(q);
            } else if objectives[q].dominates(&objectives[p]) {
                dominated_by[p] += 1;
            }
        }
        if dominated_by[p] == 0 {
            current.push(p);
        }
    }

    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominates[p] {
                dominated_by[q] -= 1;
                if dominated_by[q] == 0 {
                    next.push(q);
                }
            }
        }
        fronts.push(current);
        current = next;
    }
    fronts
}

/// Crowding distance of each member of `front`, aligned with `front`.
///
/// Per objective, the extreme members get infinite distance and interior
/// members accumulate the normalised gap between their neighbours. An
/// objective on which the whole front ties adds nothing to interior members.
#[expect(
    clippy::indexing_slicing,
    clippy::float_arithmetic,
    reason = "positions are drawn from 0..front.len() and distances are normalised gaps"
)]
pub(crate) fn crowding_distances(objectives: &[Objectives], front: &[usize]) -> Vec<f64> {
    let mut distance = vec![0.0; front.len()];
    let values: Vec<[f64; 2]> = front
        .iter()
        .map(|&idx| objectives[idx].as_array())
        .collect();

    for axis in 0..2 {
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| values[a][axis].total_cmp(&values[b][axis]));
        let (Some(&low), Some(&high)) = (order.first(), order.last()) else {
            continue;
        };
        distance[low] = f64::INFINITY;
        distance[high] = f64::INFINITY;

        let span = values[high][axis] - values[low][axis];
        if span <= 0.0 {
            continue;
        }
        for window in order.windows(3) {
            if let [prev, mid, next] = *window {
                distance[mid] += (values[next][axis] - values[prev][axis]) / span;
            }
        }
    }
    distance
}

/// Front rank and crowding distance of every individual in a population.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Standing {
    pub(crate) rank: Vec<usize>,
    pub(crate) crowding: Vec<f64>,
}

impl Standing {
    /// Rank every point and measure crowding within its own front.
    #[expect(
        clippy::indexing_slicing,
        reason = "front members are indices into objectives"
    )]
    pub(crate) fn of(objectives: &[Objectives]) -> Self {
        let mut rank = vec![0; objectives.len()];
        let mut crowding = vec![0.0; objectives.len()];
        for (level, front) in non_dominated_fronts(objectives).iter().enumerate() {
            let distances = crowding_distances(objectives, front);
            for (&idx, distance) in front.iter().zip(distances) {
                rank[idx] = level;
                crowding[idx] = distance;
            }
        }
        Self { rank, crowding }
    }
}
