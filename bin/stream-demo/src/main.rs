// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # stream-demo
//!
//! Command-line driver for the pooled reactive event stack. It plays the
//! role the host application would: wiring event sources, subscribing
//! observers, and pushing values through the chain.
//!
//! ## Usage
//! ```bash
//! # Fan events out to observers through an adapted event handler
//! stream-demo emit --observers 4 --events 10
//!
//! # Hammer the allocator across size classes and print its statistics
//! stream-demo churn --iterations 100000 --json
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stream-demo",
    about = "Demo driver for the pooled reactive event stack",
    version,
    author
)]
struct Cli {
    /// Path to a TOML pool configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wire an event source to observers and fire events through it.
    Emit {
        /// Number of observers to subscribe.
        #[arg(short, long, default_value_t = 2)]
        observers: usize,

        /// Number of events to fire.
        #[arg(short, long, default_value_t = 5)]
        events: u32,

        /// Payload for the first event; subsequent events increment it.
        #[arg(long, default_value_t = 0)]
        start: i32,
    },

    /// Run an allocation/deallocation workload and report pool statistics.
    Churn {
        /// Number of allocate/free rounds.
        #[arg(short, long, default_value_t = 10000)]
        iterations: u32,

        /// Print statistics as JSON instead of the summary line.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let pool = commands::build_pool(cli.config.as_deref())?;

    match cli.command {
        Commands::Emit {
            observers,
            events,
            start,
        } => commands::emit::execute(&pool, observers, events, start),
        Commands::Churn { iterations, json } => commands::churn::execute(&pool, iterations, json),
    }
}
