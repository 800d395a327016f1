// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "k8prune")]
#[command(author, version, about = "Find and prune unused Kubernetes config maps")]
pub struct Args {
    /// Kubernetes context to use (defaults to the current kubeconfig context)
    #[arg(short, long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Namespaces to scan. Supports comma-separated lists and glob patterns.
    /// Examples: -n default, -n "team-*", -n "prod,staging"
    /// When omitted, every namespace in the cluster is scanned.
    #[arg(short = 'n', long, value_name = "NAMESPACES")]
    pub include_namespaces: Option<String>,

    /// Namespaces to skip. Same syntax as --include-namespaces.
    #[arg(short = 'e', long, value_name = "NAMESPACES")]
    pub exclude_namespaces: Option<String>,

    /// Skip config maps carrying this label (key=value, repeatable)
    #[arg(long = "exclude-labels", value_name = "KEY=VALUE")]
    pub exclude_labels: Vec<String>,

    /// Only consider config maps older than this (e.g. 24h, 7d)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub older_than: Option<Duration>,

    /// Only consider config maps newer than this (e.g. 24h, 7d)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub newer_than: Option<Duration>,

    /// Delete unused config maps after the scan
    #[arg(long)]
    pub delete: bool,

    /// Skip per-object confirmation prompts when deleting
    #[arg(long)]
    pub no_interactive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
    Yaml,
}
