// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
pub mod config;
mod kubernetes;
mod output;
mod scan;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use cli::Args;
use kubernetes::IncludeExcludeLists;
use scan::{FilterOptions, Opts};

/// Initialize logging to stderr, keeping stdout clean for the report
fn init_logging(verbose: bool) {
    let filter = if verbose { "k8prune=debug" } else { "k8prune=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (aws-lc-rs)
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();
    init_logging(args.verbose);

    let user_config = config::Config::load()?;

    let filter = FilterOptions::new(&args.exclude_labels, args.older_than, args.newer_than)?;

    let mut exceptions = scan::default_exceptions();
    exceptions.extend(user_config.exempt_configmaps);

    let mut lists = IncludeExcludeLists::from_specs(
        args.include_namespaces.as_deref(),
        args.exclude_namespaces.as_deref(),
    );
    lists.exclude.extend(user_config.exclude_namespaces);

    let opts = Opts {
        delete: args.delete,
        no_interactive: args.no_interactive,
    };

    if opts.delete && !opts.no_interactive {
        info!("Delete mode: each deletion will ask for confirmation");
    }

    let client = kubernetes::build_client(args.context.as_deref()).await?;
    let report = scan::scan_cluster(&client, &lists, &filter, &exceptions, &opts).await?;

    if report.is_empty() {
        warn!("No namespaces were scanned successfully");
    }

    println!("{}", report.format(&args.output)?);

    Ok(())
}
