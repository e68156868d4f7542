use crate::agent::{Agent, AgentOptions};
use crate::{Board, GameError};
use log::debug;
use rayon::prelude::*;

/// A batch of independent solver trials at one board configuration.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub dim: u32,
    pub mine_count: u32,
    pub trials: usize,
    pub options: AgentOptions,
    /// Base seed; trial `i` runs with `seed + i`. `None` draws from
    /// entropy.
    pub seed: Option<u64>,
}

/// How one trial ended. A fatal solver inconsistency fails that trial
/// only; it stays in the report rather than vanishing from the counts.
#[derive(Debug, Clone)]
pub enum TrialOutcome {
    Completed { score: f64 },
    Failed { error: String },
}

#[derive(Debug)]
pub struct ExperimentReport {
    pub outcomes: Vec<TrialOutcome>,
}

impl ExperimentReport {
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TrialOutcome::Completed { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    /// Mean score over completed trials, 0 when none completed.
    pub fn mean_score(&self) -> f64 {
        let scores: Vec<f64> = self
            .outcomes
            .iter()
            .filter_map(|o| match o {
                TrialOutcome::Completed { score } => Some(*score),
                TrialOutcome::Failed { .. } => None,
            })
            .collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Runs every trial on its own board and agent, in parallel. Trials share
/// nothing, so this is correct by construction; results are aggregated
/// only after each agent finishes.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, GameError> {
    Board::validate(config.dim, config.mine_count)?;

    let outcomes: Vec<TrialOutcome> = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let agent = match config.seed {
                Some(seed) => Agent::with_seed(
                    config.dim,
                    config.mine_count,
                    config.options,
                    seed.wrapping_add(trial as u64),
                ),
                None => Agent::new(config.dim, config.mine_count, config.options),
            };
            let outcome = match agent.map(|mut agent| agent.run()) {
                Ok(Ok(score)) => TrialOutcome::Completed { score },
                Ok(Err(e)) => TrialOutcome::Failed {
                    error: e.to_string(),
                },
                Err(e) => TrialOutcome::Failed {
                    error: e.to_string(),
                },
            };
            debug!("trial {trial}: {outcome:?}");
            outcome
        })
        .collect();

    Ok(ExperimentReport { outcomes })
}
