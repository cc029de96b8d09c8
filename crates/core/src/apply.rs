use crate::error::BatchError;
use crate::planner::RenamePlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    Pending,
    InProgress,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    NotStarted,
    Running { index: usize },
    Completed { applied: usize },
    /// Renames before `index` are done and stay done.
    Aborted { index: usize, cause: String },
}

/// Progress of one plan through the filesystem. Renames run in plan order and
/// the first failure ends the run; nothing already renamed is put back.
#[derive(Debug)]
pub struct PlanExecution {
    steps: Vec<StepState>,
    state: ExecutionState,
    unchanged: usize,
    failure: Option<BatchError>,
}

impl PlanExecution {
    fn new(plan: &RenamePlan) -> Self {
        Self {
            steps: vec![StepState::Pending; plan.candidates.len()],
            state: ExecutionState::NotStarted,
            unchanged: plan.stats.unchanged,
            failure: None,
        }
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn steps(&self) -> &[StepState] {
        &self.steps
    }

    pub fn applied(&self) -> usize {
        self.steps.iter().filter(|s| **s == StepState::Done).count()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, ExecutionState::Completed { .. })
    }

    pub fn into_result(self) -> Result<ApplyResult, BatchError> {
        if let Some(err) = self.failure {
            return Err(err);
        }
        Ok(ApplyResult {
            applied: self.applied(),
            unchanged: self.unchanged,
        })
    }

    fn run<F>(&mut self, plan: &RenamePlan, mut rename: F)
    where
        F: FnMut(&Path, &Path) -> io::Result<()>,
    {
        for (index, candidate) in plan.candidates.iter().enumerate() {
            self.state = ExecutionState::Running { index };
            self.steps[index] = StepState::InProgress;

            if let Err(source) = rename(&candidate.original_path, &candidate.target_path) {
                warn!(
                    index,
                    from = %candidate.original_path.display(),
                    to = %candidate.target_path.display(),
                    error = %source,
                    "rename failed; aborting"
                );
                self.steps[index] = StepState::Failed;
                self.state = ExecutionState::Aborted {
                    index,
                    cause: source.to_string(),
                };
                self.failure = Some(BatchError::RenameFailed {
                    index,
                    from: candidate.original_path.clone(),
                    to: candidate.target_path.clone(),
                    source,
                });
                return;
            }

            debug!(
                index,
                from = %candidate.original_path.display(),
                to = %candidate.target_path.display(),
                "renamed"
            );
            self.steps[index] = StepState::Done;
        }

        let applied = self.applied();
        info!(applied, "all renames applied");
        self.state = ExecutionState::Completed { applied };
    }
}

/// Runs every rename of `plan` and returns the finished execution, aborted or
/// not.
pub fn execute_plan(plan: &RenamePlan) -> PlanExecution {
    execute_plan_with(plan, |from, to| fs::rename(from, to))
}

pub(crate) fn execute_plan_with<F>(plan: &RenamePlan, rename: F) -> PlanExecution
where
    F: FnMut(&Path, &Path) -> io::Result<()>,
{
    let mut execution = PlanExecution::new(plan);
    execution.run(plan, rename);
    execution
}

pub fn apply_plan(plan: &RenamePlan) -> Result<ApplyResult, BatchError> {
    execute_plan(plan).into_result()
}
