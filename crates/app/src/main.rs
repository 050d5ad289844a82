//! T3 Tracker - command-line time tracking client

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use t3tracker_core::TrackingReport;
use t3tracker_domain::format_elapsed;
use t3tracker_infra::config;
use t3tracker_lib::utils::{init_tracing, prompt_password};
use t3tracker_lib::{
    list_projects, list_tasks, login, logout, task_total, track_until, whoami, AppContext,
};

#[derive(Debug, Parser)]
#[command(name = "t3tracker", version, about = "T3 time tracking client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the access token
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "T3TRACKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List your projects
    Projects,
    /// List a project's tasks
    Tasks { project: String },
    /// Show the time you have booked on a task
    Total { project: String, task: String },
    /// Track time until Ctrl-C or the optional duration elapses
    Track {
        #[arg(long)]
        project: String,
        #[arg(long)]
        task: String,
        /// Stop after this many seconds
        #[arg(long)]
        duration: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env loaded"),
    }

    let ctx = AppContext::new(config)?;
    let outcome = run(&ctx, cli.command).await;

    ctx.shutdown().await;
    outcome
}

async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    let mut out = io::stdout();

    match command {
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password").context("failed to read password")?,
            };
            let user = login(ctx, &email, &password).await?;
            writeln!(out, "Signed in as {}", user.display_name())?;
        }
        Command::Logout => {
            logout(ctx).await?;
            writeln!(out, "Signed out")?;
        }
        Command::Whoami => match whoami(ctx).await? {
            Some(user) => writeln!(
                out,
                "{} <{}> ({})",
                user.display_name(),
                user.email.as_deref().unwrap_or("-"),
                user.id
            )?,
            None => writeln!(out, "Not signed in")?,
        },
        Command::Projects => {
            for project in list_projects(ctx).await? {
                writeln!(out, "{}\t{}", project.id, project.name)?;
            }
        }
        Command::Tasks { project } => {
            let listing = list_tasks(ctx, &project).await?;
            writeln!(out, "My tasks:")?;
            for task in &listing.mine {
                writeln!(out, "  {}\t{}", task.id, task.name)?;
            }
            writeln!(out, "Other tasks:")?;
            for task in &listing.others {
                writeln!(out, "  {}\t{}", task.id, task.name)?;
            }
        }
        Command::Total { project, task } => {
            let total = task_total(ctx, &project, &task).await?;
            let seconds = u64::try_from(total.total_time_millis / 1_000).unwrap_or_default();
            writeln!(out, "{}", format_elapsed(seconds))?;
        }
        Command::Track { project, task, duration } => {
            let report = track_until(ctx, &project, &task, stop_signal(duration)).await?;
            print_report(&report)?;
        }
    }

    Ok(())
}

async fn stop_signal(duration: Option<u64>) {
    let limit = async {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
            }
        }
        () = limit => {}
    }
}

fn print_report(report: &TrackingReport) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "Tracked {} in {} window(s): {} delivered, {} failed",
        format_elapsed(report.session.elapsed_seconds),
        report.session.windows_emitted,
        report.delivery.delivered,
        report.delivery.failed
    )
}
