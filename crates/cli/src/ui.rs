use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use rename_batch_core::{distinct_targets, BatchError, Interaction, RenamePlan};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Everything comes from the command line; nothing is asked.
pub struct ArgsInteraction {
    directory: PathBuf,
    template: String,
    output: OutputFormat,
}

impl ArgsInteraction {
    pub fn new(directory: PathBuf, template: String, output: OutputFormat) -> Self {
        Self {
            directory,
            template,
            output,
        }
    }
}

impl Interaction for ArgsInteraction {
    fn select_directory(&mut self) -> Result<PathBuf, BatchError> {
        Ok(self.directory.clone())
    }

    fn prompt_template(&mut self, _label: &str) -> Result<String, BatchError> {
        Ok(self.template.clone())
    }

    fn show_plan(&mut self, plan: &RenamePlan) {
        print_plan(plan, self.output);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn show_info(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Asks on the terminal for whatever the command line left out.
pub struct PromptInteraction {
    directory: Option<PathBuf>,
    default_template: String,
    output: OutputFormat,
    theme: ColorfulTheme,
}

impl PromptInteraction {
    pub fn new(directory: Option<PathBuf>, default_template: String, output: OutputFormat) -> Self {
        Self {
            directory,
            default_template,
            output,
            theme: ColorfulTheme::default(),
        }
    }
}

impl Interaction for PromptInteraction {
    fn select_directory(&mut self) -> Result<PathBuf, BatchError> {
        if let Some(dir) = self.directory.clone() {
            return Ok(dir);
        }
        let answer = prompt_line(&self.theme, "Select input directory", None, "directory selection")?;
        Ok(PathBuf::from(answer.trim()))
    }

    fn prompt_template(&mut self, label: &str) -> Result<String, BatchError> {
        prompt_line(&self.theme, label, Some(&self.default_template), "template entry")
    }

    fn show_plan(&mut self, plan: &RenamePlan) {
        print_plan(plan, self.output);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn show_info(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn prompt_line(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<&str>,
    step: &str,
) -> Result<String, BatchError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(default) = default.filter(|d| !d.is_empty()) {
        input = input.default(default.to_string());
    }
    input.interact_text().map_err(|err| {
        debug!(error = %err, step, "prompt aborted");
        BatchError::cancelled(step)
    })
}

#[cfg(feature = "gui")]
pub use dialog::DialogInteraction;

#[cfg(feature = "gui")]
mod dialog {
    use super::{print_plan, prompt_line, OutputFormat};
    use dialoguer::theme::ColorfulTheme;
    use rename_batch_core::{BatchError, Interaction, RenamePlan};
    use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
    use std::path::PathBuf;

    /// Native folder picker and message boxes. The template is still typed on
    /// the terminal since the dialog toolkit has no text entry.
    pub struct DialogInteraction {
        initial_dir: Option<PathBuf>,
        default_template: String,
        output: OutputFormat,
        theme: ColorfulTheme,
    }

    impl DialogInteraction {
        pub fn new(
            initial_dir: Option<PathBuf>,
            default_template: String,
            output: OutputFormat,
        ) -> Self {
            Self {
                initial_dir,
                default_template,
                output,
                theme: ColorfulTheme::default(),
            }
        }
    }

    impl Interaction for DialogInteraction {
        fn select_directory(&mut self) -> Result<PathBuf, BatchError> {
            let mut dialog = FileDialog::new().set_title("Select input directory");
            if let Some(dir) = self.initial_dir.as_ref().filter(|d| d.is_dir()) {
                dialog = dialog.set_directory(dir);
            }
            dialog
                .pick_folder()
                .ok_or_else(|| BatchError::cancelled("directory selection"))
        }

        fn prompt_template(&mut self, label: &str) -> Result<String, BatchError> {
            prompt_line(&self.theme, label, Some(&self.default_template), "template entry")
        }

        fn show_plan(&mut self, plan: &RenamePlan) {
            print_plan(plan, self.output);
        }

        fn show_error(&mut self, message: &str) {
            eprintln!("error: {message}");
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Error")
                .set_description(message)
                .set_buttons(MessageButtons::Ok)
                .show();
        }

        fn show_info(&mut self, message: &str) {
            MessageDialog::new()
                .set_level(MessageLevel::Info)
                .set_title("Information")
                .set_description(message)
                .set_buttons(MessageButtons::Ok)
                .show();
        }
    }
}

pub fn print_plan(plan: &RenamePlan, output: OutputFormat) {
    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(plan) {
            Ok(body) => println!("{body}"),
            Err(err) => eprintln!("error: could not serialize plan: {err}"),
        },
        OutputFormat::Table => print_table(plan),
    }
}

fn print_table(plan: &RenamePlan) {
    println!("source -> destination");
    for candidate in &plan.candidates {
        let marker = if candidate.changed { "" } else { " (unchanged)" };
        println!(
            "{} -> {}{}",
            candidate.original_path.display(),
            candidate.target_path.display(),
            marker
        );
    }

    let stats = &plan.stats;
    println!(
        "\nsummary: scanned={} dirs_skip={} sentinel_skip={} hidden_skip={} planned={} unchanged={} distinct_targets={}",
        stats.listing.scanned_entries,
        stats.listing.skipped_dirs,
        stats.listing.skipped_sentinel,
        stats.listing.skipped_hidden,
        stats.planned,
        stats.unchanged,
        distinct_targets(plan)
    );
}
