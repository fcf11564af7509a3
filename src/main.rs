// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load layered settings
// 3. Dispatch to the projects or contact flow
// 4. Exit with proper code (0 = success, 1 = the flow failed, 2 = error)
//
// The two flows share nothing but configuration: each builds its own client
// from the settings it is handed.
// =============================================================================

mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - layered settings
mod contact;   // src/contact/ - contact form submission
mod error;     // src/error.rs - loader error taxonomy
mod github;    // src/github/ - repository loading and filtering
mod logging;   // src/logging.rs - tracing setup
mod render;    // src/render.rs - table and JSON output

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::contact::{ContactForm, ContactSubmitter, SubmissionState};
use crate::github::{LanguageFilter, ProjectsView, RepoLoader};

// #[tokio::main] builds the runtime and runs our async main inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = flow succeeded
//   Ok(1) = flow ended in a displayed failure (load failed, message refused)
//   Err = configuration or input problem
async fn run() -> Result<i32> {
    // --help and --version are handled (and exit) inside parse()
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Files and environment first; flags below override them
    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    match cli.command {
        Commands::Projects {
            user,
            token,
            language,
            require_metadata,
            json,
        } => {
            if user.is_some() {
                settings.github.user = user;
            }
            if token.is_some() {
                settings.github.token = token;
            }
            // The flag can only switch the rule on, never off
            settings.github.require_metadata |= require_metadata;

            handle_projects(&settings, LanguageFilter::parse(&language), json).await
        }
        Commands::Contact {
            name,
            email,
            message,
            endpoint,
            json,
        } => {
            if endpoint.is_some() {
                settings.contact.endpoint = endpoint;
            }

            let mut form = ContactForm::new(name, email, message);
            handle_contact(&settings, &mut form, json).await
        }
    }
}

// Handles the 'projects' subcommand
async fn handle_projects(settings: &Settings, language: LanguageFilter, json: bool) -> Result<i32> {
    // Fails fast on a missing user or a bad api_base, before any request
    let loader = RepoLoader::new(&settings.github).context("cannot list repositories")?;

    // Show the loading state while the single request is out
    let mut view = ProjectsView::Loading;
    render::print_view(&view, json)?;

    view = ProjectsView::from_load(loader.load().await);

    // The language choice only applies to a successful load
    if let ProjectsView::Ready(catalog) = &mut view {
        catalog.select(language);
    }
    render::print_view(&view, json)?;

    match view {
        ProjectsView::Failed(_) => Ok(1),
        _ => Ok(0),
    }
}

// Handles the 'contact' subcommand
async fn handle_contact(settings: &Settings, form: &mut ContactForm, json: bool) -> Result<i32> {
    let mut submitter = ContactSubmitter::new(&settings.contact)
        .context("cannot send messages")?
        .with_observer(render::ConsoleObserver { quiet: json });

    // Err here means the form never left (invalid input); a refused or
    // undeliverable message is a Failed state instead
    submitter.submit(form).await.context("message not sent")?;
    render::print_submission(submitter.state(), json)?;

    match submitter.state() {
        SubmissionState::Succeeded => Ok(0),
        _ => Ok(1),
    }
}
