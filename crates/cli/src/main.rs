mod ui;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use rename_batch_core::{
    app_paths, load_config, run_session, save_config, AppConfig, Interaction, SessionOptions,
};
use std::path::PathBuf;
use std::process::ExitCode;
use ui::{ArgsInteraction, OutputFormat, PromptInteraction};

#[derive(Debug, Parser)]
#[command(name = "rename-batch")]
#[command(about = "Renames every file in a folder to a sequential, zero-padded name")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    rename: RenameArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Writes the default settings if no config file exists yet.
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Folder whose files are renamed. Prompted for when omitted.
    directory: Option<PathBuf>,
    /// New name, e.g. `img-###`; the run of placeholders becomes the number.
    template: Option<String>,
    #[arg(long)]
    placeholder: Option<char>,
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Pick the folder and show results with native dialogs.
    #[arg(long, default_value_t = false)]
    gui: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.rename.verbose);

    let result = match cli.command {
        Some(Commands::Config(config)) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
        None => cmd_rename(cli.rename),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            _ => tracing_subscriber::EnvFilter::new("debug"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_rename(args: RenameArgs) -> Result<ExitCode> {
    let config = load_config()?;
    run_rename(&args, &config)
}

fn run_rename(args: &RenameArgs, config: &AppConfig) -> Result<ExitCode> {
    let options = SessionOptions {
        placeholder: args.placeholder.unwrap_or(config.placeholder),
        extra_sentinels: config.extra_sentinels.clone(),
        dry_run: args.dry_run,
    };

    let mut ui = select_interaction(args, config)?;
    // The session has already reported any failure through the interaction.
    match run_session(ui.as_mut(), &options) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn select_interaction(args: &RenameArgs, config: &AppConfig) -> Result<Box<dyn Interaction>> {
    if let (Some(directory), Some(template)) = (&args.directory, &args.template) {
        if !args.gui {
            return Ok(Box::new(ArgsInteraction::new(
                directory.clone(),
                template.clone(),
                args.output,
            )));
        }
    }

    let default_template = args
        .template
        .clone()
        .unwrap_or_else(|| config.default_template.clone());

    if args.gui {
        return dialog_interaction(args, default_template);
    }

    Ok(Box::new(PromptInteraction::new(
        args.directory.clone(),
        default_template,
        args.output,
    )))
}

#[cfg(feature = "gui")]
fn dialog_interaction(args: &RenameArgs, default_template: String) -> Result<Box<dyn Interaction>> {
    Ok(Box::new(ui::DialogInteraction::new(
        args.directory.clone(),
        default_template,
        args.output,
    )))
}

#[cfg(not(feature = "gui"))]
fn dialog_interaction(_args: &RenameArgs, _default_template: String) -> Result<Box<dyn Interaction>> {
    anyhow::bail!("--gui needs a build with the `gui` feature enabled");
}

fn cmd_config_show() -> Result<ExitCode> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_config_init() -> Result<ExitCode> {
    let paths = app_paths()?;
    if paths.config_path.exists() {
        println!("config file already exists: {}", paths.config_path.display());
        return Ok(ExitCode::SUCCESS);
    }
    save_config(&AppConfig::default())?;
    println!("wrote {}", paths.config_path.display());
    Ok(ExitCode::SUCCESS)
}
