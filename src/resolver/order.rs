//! Deterministic dependency ordering for extracted modules
//!
//! Topological sort with explicit in-degree tracking (Kahn's algorithm).
//! The ready queue is a min-heap keyed by discovery index, so among modules
//! whose dependencies are all placed, the earliest-discovered always goes
//! first. That tie-break is what makes the output order reproducible across
//! runs and machines.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::descriptor::ModuleDescriptor;
use crate::error::{Result, WeldError};

/// Order modules so every module follows all of its `@requires`.
///
/// `modules` must be in discovery order. Fails with
/// [`WeldError::DependencyNotFound`] when a requirement names no loaded
/// module, and [`WeldError::CyclicDependency`] with the full ordered cycle
/// when the graph cannot be linearized.
pub fn order_modules(modules: &[ModuleDescriptor]) -> Result<Vec<ModuleDescriptor>> {
    let index_of: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id.as_str(), i))
        .collect();

    // in-degree per module plus the reverse edges used to release dependents
    let mut in_degree = vec![0usize; modules.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); modules.len()];
    for (i, module) in modules.iter().enumerate() {
        for dep in &module.requires {
            let Some(&d) = index_of.get(dep.as_str()) else {
                return Err(WeldError::DependencyNotFound {
                    module: module.id.clone(),
                    dependency: dep.clone(),
                });
            };
            in_degree[i] += 1;
            dependents[d].push(i);
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut placed = Vec::with_capacity(modules.len());
    while let Some(Reverse(i)) = ready.pop() {
        placed.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if placed.len() < modules.len() {
        return Err(WeldError::CyclicDependency {
            chain: find_cycle(modules, &index_of, &in_degree),
        });
    }

    Ok(placed.into_iter().map(|i| modules[i].clone()).collect())
}

/// Extract one ordered cycle from the unplaced remainder.
///
/// Every unplaced module still has an unplaced requirement, so following the
/// first unplaced requirement from the earliest unplaced module must revisit
/// a node; the walk from that node's first visit back to it is the cycle.
fn find_cycle(
    modules: &[ModuleDescriptor],
    index_of: &HashMap<&str, usize>,
    in_degree: &[usize],
) -> String {
    let chain_of = |path: &[usize]| {
        path.iter()
            .map(|&i| modules[i].id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    };

    let Some(start) = (0..modules.len()).find(|&i| in_degree[i] > 0) else {
        return String::new();
    };

    let mut path = vec![start];
    let mut seen_at: HashMap<usize, usize> = HashMap::from([(start, 0)]);
    let mut current = start;
    loop {
        let next = modules[current]
            .requires
            .iter()
            .filter_map(|dep| index_of.get(dep.as_str()).copied())
            .find(|&d| in_degree[d] > 0);
        let Some(next) = next else {
            return chain_of(&path);
        };
        if let Some(&first_visit) = seen_at.get(&next) {
            let mut cycle = path[first_visit..].to_vec();
            cycle.push(next);
            return chain_of(&cycle);
        }
        seen_at.insert(next, path.len());
        path.push(next);
        current = next;
    }
}
