// src/render.rs
// =============================================================================
// Terminal and JSON output for both flows.
//
// This layer only reads state; it never decides what is featured or what a
// filter matches. That lives in github::catalog.
// =============================================================================

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::contact::{SubmissionObserver, SubmissionState};
use crate::github::{ProjectCatalog, ProjectsView, RepositorySummary};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(Debug, Serialize)]
struct ProjectsReport<'a> {
    languages: &'a [String],
    active: &'a str,
    featured: Option<&'a RepositorySummary>,
    others: Vec<&'a RepositorySummary>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SubmissionReport<'a> {
    Idle,
    Pending,
    Succeeded { message: &'a str },
    Failed { message: &'a str },
}

// "Mar 2024", like the date on each project card
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %Y").to_string()
}

pub fn print_view(view: &ProjectsView, json: bool) -> Result<()> {
    match view {
        ProjectsView::Loading => {
            // Keep stdout pure JSON when asked for it
            if !json {
                println!("⏳ Loading projects...");
            }
            Ok(())
        }
        ProjectsView::Failed(message) => print_load_failure(message, json),
        ProjectsView::Ready(catalog) => print_projects(catalog, json),
    }
}

fn print_projects(catalog: &ProjectCatalog, json: bool) -> Result<()> {
    if json {
        let report = ProjectsReport {
            languages: catalog.languages(),
            active: catalog.active().label(),
            featured: catalog.featured(),
            others: catalog.others(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_projects_table(catalog);
    }
    Ok(())
}

fn print_projects_table(catalog: &ProjectCatalog) {
    match catalog.featured() {
        Some(featured) => {
            println!("🚀 Featured: {}", featured.name);
            println!("   {}", featured.description_or_default());
            println!("   View Code: {}", featured.html_url);
            if let Some(demo) = featured.live_demo() {
                println!("   Live Demo: {}", demo);
            }
        }
        None => println!("No projects match {}", catalog.active()),
    }
    println!();

    // Chips, active one in brackets
    let chips: Vec<String> = catalog
        .languages()
        .iter()
        .map(|lang| {
            if lang == catalog.active().label() {
                format!("[{}]", lang)
            } else {
                lang.clone()
            }
        })
        .collect();
    println!("Languages: {}", chips.join("  "));
    println!();

    let others = catalog.others();
    if others.is_empty() {
        return;
    }

    println!(
        "{:<30} {:<14} {:>6} {:>6} {:<9} {}",
        "NAME", "LANGUAGE", "STARS", "FORKS", "UPDATED", "URL"
    );
    println!("{}", "=".repeat(100));

    for repo in &others {
        println!(
            "{:<30} {:<14} {:>6} {:>6} {:<9} {}",
            truncate(&repo.name, 30),
            repo.language_label().unwrap_or("-"),
            repo.stargazers_count,
            repo.forks_count,
            format_date(&repo.updated_at),
            repo.html_url
        );
    }

    println!();
    println!(
        "📊 Showing {} of {} project(s)",
        catalog.visible().len(),
        catalog.repos().len()
    );
}

fn print_load_failure(message: &str, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "error": message }))?
        );
    } else {
        println!("❌ {}", message);
    }
    Ok(())
}

fn submission_report(state: &SubmissionState) -> SubmissionReport<'_> {
    match state {
        SubmissionState::Idle => SubmissionReport::Idle,
        SubmissionState::Pending => SubmissionReport::Pending,
        SubmissionState::Succeeded => SubmissionReport::Succeeded {
            message: SUCCESS_MESSAGE,
        },
        SubmissionState::Failed(reason) => SubmissionReport::Failed { message: reason },
    }
}

pub fn print_submission(state: &SubmissionState, json: bool) -> Result<()> {
    let report = submission_report(state);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match report {
            SubmissionReport::Succeeded { message } => println!("✅ {}", message),
            SubmissionReport::Failed { message } => println!("❌ {}", message),
            SubmissionReport::Idle | SubmissionReport::Pending => {}
        }
    }
    Ok(())
}

// Prints progress while a message is being sent
pub struct ConsoleObserver {
    pub quiet: bool,
}

impl SubmissionObserver for ConsoleObserver {
    fn on_change(&self, state: &SubmissionState) {
        if !self.quiet && state.is_pending() {
            println!("📨 Sending...");
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
