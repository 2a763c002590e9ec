// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line front end: collects form input and reports one message per
//! failed attempt.

use clap::{Parser, Subcommand};

/// CV builder session client
#[derive(Debug, Parser)]
#[command(name = "cv-session", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the issued tokens
    Login {
        /// Username, or email address with --email
        identifier: String,

        /// Treat the identifier as an email address
        #[arg(long)]
        email: bool,

        #[arg(long, env = "CV_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        username: String,

        email: String,

        #[arg(long, env = "CV_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat of the password; defaults to --password
        #[arg(long)]
        password_confirm: Option<String>,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Skip the backend health probe
        #[arg(long)]
        no_probe: bool,
    },

    /// Show the signed-in user's profile
    Profile,

    /// Ask the backend whether the stored session is still valid
    Verify,

    /// Forget the stored tokens
    Logout,

    /// Check that the backend is reachable
    Health,
}
