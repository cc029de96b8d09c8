use crate::error::BatchError;
use crate::listing::{collect_eligible_files, EntryFilter, ListingStats};
use crate::template::{SequenceTemplate, DEFAULT_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub directory: PathBuf,
    pub template: String,
    pub placeholder: char,
    pub extra_sentinels: Vec<String>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            template: crate::DEFAULT_TEMPLATE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER,
            extra_sentinels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameCandidate {
    pub sequence: usize,
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenameStats {
    #[serde(flatten)]
    pub listing: ListingStats,
    pub planned: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub template: SequenceTemplate,
    pub candidates: Vec<RenameCandidate>,
    pub stats: RenameStats,
}

/// A plan entry whose destination will not survive execution intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanConflict {
    /// Two or more sources map to the same destination.
    DuplicateTarget { target: PathBuf, sources: Vec<PathBuf> },
    /// A destination is a file that is renamed later in the plan and would be
    /// replaced before it gets the chance.
    OverwritesPending {
        index: usize,
        target: PathBuf,
        pending_index: usize,
    },
}

impl RenamePlan {
    /// Reports collisions without changing the plan. Execution order and
    /// behavior are the same whether or not this is empty.
    pub fn conflicts(&self) -> Vec<PlanConflict> {
        let mut out = Vec::new();

        let mut by_target: HashMap<&Path, Vec<PathBuf>> = HashMap::new();
        let mut order = Vec::new();
        for candidate in &self.candidates {
            let sources = by_target
                .entry(candidate.target_path.as_path())
                .or_insert_with(|| {
                    order.push(candidate.target_path.as_path());
                    Vec::new()
                });
            sources.push(candidate.original_path.clone());
        }
        for target in order {
            if let Some(sources) = by_target.remove(target) {
                if sources.len() > 1 {
                    out.push(PlanConflict::DuplicateTarget {
                        target: target.to_path_buf(),
                        sources,
                    });
                }
            }
        }

        let source_index: HashMap<&Path, usize> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.original_path.as_path(), i))
            .collect();
        for (index, candidate) in self.candidates.iter().enumerate() {
            if let Some(&pending_index) = source_index.get(candidate.target_path.as_path()) {
                if pending_index > index {
                    out.push(PlanConflict::OverwritesPending {
                        index,
                        target: candidate.target_path.clone(),
                        pending_index,
                    });
                }
            }
        }

        out
    }
}

pub fn generate_plan(options: &PlanOptions) -> Result<RenamePlan, BatchError> {
    let template = SequenceTemplate::parse(&options.template, options.placeholder);
    let filter = EntryFilter::with_extra_sentinels(&options.extra_sentinels);

    let mut stats = RenameStats::default();
    let files = collect_eligible_files(&options.directory, &filter, &mut stats.listing)?;

    let mut candidates = Vec::with_capacity(files.len());
    for (index, original_path) in files.into_iter().enumerate() {
        let sequence = index + 1;
        let mut target_name = OsString::from(template.render(sequence));
        if let Some(file_name) = original_path.file_name() {
            target_name.push(os_extension_of(file_name));
        }
        let target_path = options.directory.join(target_name);

        let changed = target_path != original_path;
        if !changed {
            stats.unchanged += 1;
        }
        debug!(
            sequence,
            from = %original_path.display(),
            to = %target_path.display(),
            "planned rename"
        );

        stats.planned += 1;
        candidates.push(RenameCandidate {
            sequence,
            original_path,
            target_path,
            changed,
        });
    }

    info!(
        directory = %options.directory.display(),
        planned = stats.planned,
        unchanged = stats.unchanged,
        "rename plan built"
    );

    Ok(RenamePlan {
        directory: options.directory.clone(),
        template,
        candidates,
        stats,
    })
}

pub fn render_preview_sample(
    template: &str,
    placeholder: char,
    sequence: usize,
    extension_with_dot: &str,
) -> String {
    let template = SequenceTemplate::parse(template, placeholder);
    format!("{}{}", template.render(sequence), extension_with_dot)
}

/// Everything from the last `.` of the file name onward, dot included.
/// Names without a dot have no extension.
pub fn extension_of(file_name: &str) -> &str {
    file_name.rfind('.').map(|i| &file_name[i..]).unwrap_or("")
}

/// Same rule as [`extension_of`], applied to the raw file name so bytes
/// outside UTF-8 are carried over untouched.
pub fn os_extension_of(file_name: &OsStr) -> OsString {
    match Path::new(file_name).extension() {
        Some(ext) => {
            let mut out = OsString::from(".");
            out.push(ext);
            out
        }
        None if file_name.as_encoded_bytes().starts_with(b".") => file_name.to_os_string(),
        None => OsString::new(),
    }
}

/// Distinct destinations in a plan. Used to spot collapsed names quickly.
pub fn distinct_targets(plan: &RenamePlan) -> usize {
    plan.candidates
        .iter()
        .map(|c| c.target_path.as_path())
        .collect::<HashSet<_>>()
        .len()
}
