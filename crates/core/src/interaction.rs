//! The human side of a batch run.
//!
//! A front end supplies a directory and a template and is told how the run
//! ended. [`run_session`] drives the whole pipeline against any
//! [`Interaction`] implementation, so terminal prompts, native dialogs and
//! plain command-line arguments all share the same flow.

use crate::apply::{apply_plan, ApplyResult};
use crate::error::BatchError;
use crate::planner::{generate_plan, PlanOptions, RenamePlan};
use crate::template::{SequenceTemplate, DEFAULT_PLACEHOLDER};
use std::path::PathBuf;
use tracing::warn;

pub trait Interaction {
    /// The directory to rename in. Cancelling returns [`BatchError::Cancelled`].
    fn select_directory(&mut self) -> Result<PathBuf, BatchError>;

    fn prompt_template(&mut self, label: &str) -> Result<String, BatchError>;

    /// Called once the plan is built, before anything is renamed.
    fn show_plan(&mut self, _plan: &RenamePlan) {}

    fn show_error(&mut self, message: &str);

    fn show_info(&mut self, message: &str);
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub placeholder: char,
    pub extra_sentinels: Vec<String>,
    pub dry_run: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            extra_sentinels: Vec::new(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Applied(ApplyResult),
    DryRun(RenamePlan),
}

pub fn template_label(placeholder: char) -> String {
    format!("Enter new formatted name (must have consecutive {placeholder} symbols)")
}

/// Asks for the inputs, plans, applies, and reports the final status through
/// `ui`. Any error is shown with `show_error` and returned.
pub fn run_session<I>(ui: &mut I, options: &SessionOptions) -> Result<SessionOutcome, BatchError>
where
    I: Interaction + ?Sized,
{
    match run_steps(ui, options) {
        Ok(outcome) => {
            let message = match &outcome {
                SessionOutcome::Applied(result) => {
                    format!("Renaming complete: {} files renamed.", result.applied)
                }
                SessionOutcome::DryRun(plan) => format!(
                    "Dry run: {} renames planned, nothing was changed.",
                    plan.stats.planned
                ),
            };
            ui.show_info(&message);
            Ok(outcome)
        }
        Err(err) => {
            ui.show_error(&err.to_string());
            Err(err)
        }
    }
}

fn run_steps<I>(ui: &mut I, options: &SessionOptions) -> Result<SessionOutcome, BatchError>
where
    I: Interaction + ?Sized,
{
    let directory = ui.select_directory()?;
    if directory.as_os_str().is_empty() {
        return Err(BatchError::cancelled("directory selection"));
    }

    let template = ui.prompt_template(&template_label(options.placeholder))?;
    if template.is_empty() {
        return Err(BatchError::cancelled("template entry"));
    }

    for issue in SequenceTemplate::parse(&template, options.placeholder).issues() {
        warn!(template = %template, "{issue}");
    }

    let plan = generate_plan(&PlanOptions {
        directory,
        template,
        placeholder: options.placeholder,
        extra_sentinels: options.extra_sentinels.clone(),
    })?;
    for conflict in plan.conflicts() {
        warn!(?conflict, "planned rename collides");
    }
    ui.show_plan(&plan);

    if options.dry_run {
        return Ok(SessionOutcome::DryRun(plan));
    }
    apply_plan(&plan).map(SessionOutcome::Applied)
}
