// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CV-Session command-line client
//!
//! Signs in against the CV builder backend and shows the signed-in profile,
//! keeping the token pair in a local file between runs.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use cv_session::{
    config::Config,
    models::{LoginCredentials, RegistrationForm},
    services::{SessionManager, SessionState, Submission},
    time_utils::format_member_since,
    AuthError,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env()?;
    if let Commands::Register { no_probe: true, .. } = &cli.command {
        config = config.with_health_probe(false);
    }
    tracing::debug!(api = %config.api_base_url, "Configuration loaded");

    let session = SessionManager::from_config(&config)?;
    let mut submission = Submission::new();
    submission.begin();

    let outcome = run(&session, cli.command).await;
    submission.finish(&outcome);

    match submission.message() {
        Some(message) => {
            eprintln!("Error: {}", message);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn run(session: &SessionManager, command: Commands) -> Result<(), AuthError> {
    match command {
        Commands::Login {
            identifier,
            email,
            password,
        } => {
            let credentials = if email {
                LoginCredentials::email(identifier, password)
            } else {
                LoginCredentials::username(identifier, password)
            };
            session.login(&credentials).await?;
            println!("Signed in.");
        }
        Commands::Register {
            username,
            email,
            password,
            password_confirm,
            first_name,
            last_name,
            no_probe: _,
        } => {
            let form = RegistrationForm {
                password_confirm: password_confirm.unwrap_or_else(|| password.clone()),
                username,
                email,
                password,
                first_name,
                last_name,
            };
            session.register(&form).await?;
            println!("Account created, signed in.");
        }
        Commands::Profile => match session.session_state().await? {
            SessionState::Authenticated(user) => {
                println!("Welcome, {}!", user.display_name());
                println!("Username:     {}", user.username);
                println!("Email:        {}", user.email);
                if let Some(first_name) = &user.first_name {
                    println!("First Name:   {}", first_name);
                }
                if let Some(last_name) = &user.last_name {
                    println!("Last Name:    {}", last_name);
                }
                println!("Member since: {}", format_member_since(user.created_at));
            }
            SessionState::Anonymous => return Err(AuthError::Unauthenticated),
        },
        Commands::Verify => {
            if session.verify_session().await? {
                println!("Session is valid.");
            } else {
                println!("No valid session.");
            }
        }
        Commands::Logout => {
            session.logout();
            println!("Signed out.");
        }
        Commands::Health => {
            session.health().await?;
            println!("Backend reachable.");
        }
    }
    Ok(())
}

/// Initialize structured JSON logging on stderr; stdout is for the user.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cv_session=info,warn"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
