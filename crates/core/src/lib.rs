mod apply;
mod config;
mod error;
mod hidden;
mod interaction;
mod listing;
mod planner;
mod template;

pub const DEFAULT_TEMPLATE: &str = "file_###";

pub use apply::{apply_plan, execute_plan, ApplyResult, ExecutionState, PlanExecution, StepState};
pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use error::BatchError;
pub use hidden::is_hidden;
pub use interaction::{
    run_session, template_label, Interaction, SessionOptions, SessionOutcome,
};
pub use listing::{collect_eligible_files, EntryFilter, ListingStats, SENTINEL_NAMES};
pub use planner::{
    distinct_targets, extension_of, generate_plan, os_extension_of, render_preview_sample,
    PlanConflict, PlanOptions, RenameCandidate, RenamePlan, RenameStats,
};
pub use template::{parse_template, SequenceTemplate, TemplateIssue, DEFAULT_PLACEHOLDER};
