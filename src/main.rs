// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::*;
use dontgo403::cli::Cli;
use dontgo403::engine::Engine;
use dontgo403::executor::HttpExecutor;
use dontgo403::report::{ReportFormat, ReportGenerator};
use dontgo403::techniques::TechniqueHandler;
use dontgo403::wordlist::Wordlists;
use log::error;
use simple_logger::SimpleLogger;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config()?;
    let format = ReportFormat::parse(&cli.format)
        .ok_or_else(|| anyhow!("unknown report format: {}", cli.format))?;
    let handler = TechniqueHandler::select(&cli.techniques)
        .map_err(|unknown| anyhow!("unknown techniques: {}", unknown.join(", ")))?;
    let wordlists = Wordlists::load_all(config.wordlist_folder())
        .context("loading wordlists")?;
    let executor = Arc::new(HttpExecutor::new(&config)?);

    if format == ReportFormat::Text {
        if let Some(proxy) = config.proxy() {
            println!("{}", format!("\n[*] USING PROXY: {}", proxy).magenta());
        }
    }

    let color = config.color();
    let engine = Engine::new(config, wordlists, executor);
    engine
        .run(&handler, |report| {
            println!("{}", ReportGenerator::generate(report, format, color).trim_end());
        })
        .await;

    if !cli.suppress_stats && format == ReportFormat::Text {
        eprintln!("\n{}", engine.state().summary());
    }
    Ok(())
}
