use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scorecard_release::cli::{ReleaseWorkflow, ReleaseWorkflowArgs};
use scorecard_release::config::{self, Config};
use scorecard_release::git::{Git2TagStore, TagStore};
use scorecard_release::github::GitHubClient;
use scorecard_release::title::parse_title;
use scorecard_release::{ui, version};

#[derive(Parser)]
#[command(
    name = "scorecard-release",
    version,
    about = "Publish releases for merged Dependabot dependency updates"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[arg(long, global = true, help = "Git remote receiving the tags")]
    remote: Option<String>,

    #[arg(long, global = true, help = "This repository as owner/repo")]
    repository: Option<String>,

    #[arg(long, global = true, help = "Path of the release notes file")]
    notes_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse, fetch notes, tag, push and create the GitHub release
    Release {
        /// Dependabot PR title, e.g. "Bump ossf/scorecard-action from v2.4.1 to v2.4.2"
        title: String,

        #[arg(long, help = "Write the notes file but create no tags or release")]
        dry_run: bool,
    },
    /// Print the dependency extracted from a PR title as step outputs
    Parse { title: String },
    /// Print the next release tag
    NextVersion,
    /// Fetch upstream notes and write the release notes file only
    Notes {
        title: String,

        #[arg(short, long, help = "Where to write the notes (defaults to notes_file)")]
        output: Option<PathBuf>,
    },
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("scorecard_release")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = config::load_config(args.config.as_deref())?;
    config.apply_env();

    if let Some(remote) = &args.remote {
        config.remote = remote.clone();
    }
    if let Some(repository) = &args.repository {
        config.repository = Some(repository.clone());
    }
    if let Some(notes_file) = &args.notes_file {
        config.notes_file = notes_file.clone();
    }

    config.validate()?;
    Ok(config)
}

fn open_store(config: &Config) -> Result<Git2TagStore> {
    let store = Git2TagStore::open(".", config.tagger.clone())
        .context("Not in a git repository")?
        .with_token(config.token.clone());
    Ok(store)
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;

    match &args.command {
        Command::Parse { title } => {
            let parsed = parse_title(title);
            if let Some(warning) = parsed.warning() {
                warning.report();
            }
            let outputs = ui::format_step_outputs(parsed.update());
            print!("{}", outputs);
            if let Some(path) = &config.github_output {
                ui::append_step_outputs(path, &outputs)?;
            }
        }
        Command::NextVersion => {
            let store = open_store(&config)?;
            let tags = store.list_tags()?;
            println!("{}", version::next_version(&tags, &config.seed()?)?);
        }
        Command::Notes { title, output } => {
            let store = open_store(&config)?;
            let client = GitHubClient::new(&config.api_url, config.token.as_ref())?;
            let workflow = ReleaseWorkflow::new(&config, &store, &client, &client);

            let path = output.clone().unwrap_or_else(|| config.notes_file.clone());
            let prepared = workflow.prepare(title, &path)?;
            ui::display_success(&format!(
                "Wrote notes for {} to {}",
                prepared.descriptor.our_version,
                path.display()
            ));
        }
        Command::Release { title, dry_run } => {
            let store = open_store(&config)?;
            let client = GitHubClient::new(&config.api_url, config.token.as_ref())?;
            let workflow = ReleaseWorkflow::new(&config, &store, &client, &client);

            ui::display_status("Starting automated release process");
            let result = workflow.run(&ReleaseWorkflowArgs {
                title: title.clone(),
                dry_run: *dry_run,
            })?;
            println!("{}", result.version);
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logger(args.debug) {
        eprintln!("Error initializing logger: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
