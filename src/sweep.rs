//! Batch flourish survey: deal every seed in a range, run the flourish
//! search, tally the classifications and cross-check the catalog.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use crate::engine::catalog::{self, FlourishClass};
use crate::engine::flourish;
use crate::game::Board;

#[derive(Debug, Clone, Copy)]
pub struct SeedOutcome {
    pub seed: u32,
    pub promoted: usize,
    pub class: FlourishClass,
}

#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    pub scanned: u32,
    pub impossible: u32,
    pub partial: u32,
    pub full: u32,
    /// (seed, computed, catalogued) triples where the catalog disagrees.
    pub mismatches: Vec<(u32, FlourishClass, FlourishClass)>,
}

pub fn classify_seed(seed: u32) -> SeedOutcome {
    let board = Board::new()
        .shuffle(seed)
        .expect("a fresh board holds a full deck")
        .deal_all();
    let line = flourish::can_flourish(&board);
    SeedOutcome {
        seed,
        promoted: line.len(),
        class: catalog::classify(52, line.len()),
    }
}

pub fn run_sweep(from: u32, to: u32) -> SweepSummary {
    let mut summary = SweepSummary::default();
    if from > to {
        return summary;
    }

    let worker_count = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min((to - from + 1) as usize)
        .max(1);

    let next_seed = Arc::new(AtomicU32::new(from));
    let (sender, receiver) = mpsc::channel::<SeedOutcome>();

    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let next_seed = Arc::clone(&next_seed);
        let sender = sender.clone();
        workers.push(thread::spawn(move || loop {
            let seed = next_seed.fetch_add(1, Ordering::Relaxed);
            if seed > to {
                break;
            }
            if sender.send(classify_seed(seed)).is_err() {
                break;
            }
        }));
    }
    drop(sender);

    for outcome in receiver {
        summary.scanned += 1;
        match outcome.class {
            FlourishClass::Impossible => summary.impossible += 1,
            FlourishClass::CanFlourish => summary.partial += 1,
            FlourishClass::CanFlourish52 => summary.full += 1,
        }
        if let Ok(expected) = catalog::classification(outcome.seed) {
            if expected != outcome.class {
                summary.mismatches.push((outcome.seed, outcome.class, expected));
            }
        }
    }
    for worker in workers {
        let _ = worker.join();
    }
    summary.mismatches.sort_unstable_by_key(|(seed, _, _)| *seed);
    summary
}

pub fn msg_sweep_summary(summary: &SweepSummary) -> String {
    format!(
        "Scanned {} deal(s): {} flourish fully, {} flourish partially, {} cannot flourish.",
        summary.scanned, summary.full, summary.partial, summary.impossible
    )
}

pub fn msg_sweep_mismatch(seed: u32, computed: FlourishClass, catalogued: FlourishClass) -> String {
    format!(
        "Seed {seed} computed {} but the catalog says {}.",
        computed.id(),
        catalogued.id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_one_classifies_as_partial_flourish() {
        let outcome = classify_seed(1);
        assert_eq!(outcome.promoted, 5);
        assert_eq!(outcome.class, FlourishClass::CanFlourish);
    }

    #[test]
    fn sweep_tallies_outcomes_and_agrees_with_the_catalog() {
        let summary = run_sweep(1, 2);
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.impossible + summary.partial + summary.full, 2);
        assert!(summary.partial >= 1);
        assert!(summary.mismatches.is_empty());

        assert_eq!(run_sweep(5, 4).scanned, 0);
    }

    #[test]
    fn summary_messages_are_stable() {
        let summary = SweepSummary {
            scanned: 3,
            impossible: 1,
            partial: 2,
            full: 0,
            mismatches: Vec::new(),
        };
        assert_eq!(
            msg_sweep_summary(&summary),
            "Scanned 3 deal(s): 0 flourish fully, 2 flourish partially, 1 cannot flourish."
        );
        let mismatch =
            msg_sweep_mismatch(7, FlourishClass::Impossible, FlourishClass::CanFlourish);
        assert!(mismatch.contains("Seed 7"));
        assert!(mismatch.contains("impossible"));
        assert!(mismatch.contains("canFlourish"));
    }
}
