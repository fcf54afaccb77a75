// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::Parser;
use std::path::PathBuf;

use crate::config::{RunConfig, DEFAULT_POOL_SIZE, DEFAULT_WORDLIST_FOLDER};
use crate::errors::BypassResult;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(short = 'u', long = "uri", help = "Target URI")]
    pub uri: String,

    #[arg(short = 'p', long = "proxy", help = "Proxy, e.g. 127.0.0.1:8080")]
    pub proxy: Option<String>,

    #[arg(short = 'a', long = "useragent", default_value = "dontgo403")]
    pub user_agent: String,

    #[arg(
        short = 'H',
        long = "header",
        help = "Extra header as name:value, can be repeated"
    )]
    pub headers: Vec<String>,

    #[arg(short = 'm', long = "method", default_value = "GET")]
    pub method: String,

    #[arg(
        short = 'b',
        long = "bypass-ip",
        help = "Use this IP instead of the ips wordlist for header spoofing"
    )]
    pub bypass_ip: Option<String>,

    #[arg(short = 't', long = "pool-size", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    #[arg(
        short = 'd',
        long = "delay",
        default_value_t = 0,
        help = "Delay between submissions in milliseconds"
    )]
    pub delay: u64,

    #[arg(
        long = "timeout",
        default_value_t = 10,
        help = "Per-request deadline in seconds"
    )]
    pub timeout: u64,

    #[arg(short = 'f', long = "folder", default_value = DEFAULT_WORDLIST_FOLDER)]
    pub folder: PathBuf,

    #[arg(
        long = "techniques",
        value_delimiter = ',',
        default_value = "methods,headers,endpaths,midpaths,capitalization"
    )]
    pub techniques: Vec<String>,

    #[arg(long = "format", default_value = "text", help = "Report format: text or json")]
    pub format: String,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short = 'q', long = "quiet", help = "Reduce output verbosity")]
    pub quiet: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long = "no-progress", help = "Hide the progress bar")]
    pub no_progress: bool,

    #[arg(
        short = 's',
        long = "suppress-stats",
        help = "Suppress the request summary"
    )]
    pub suppress_stats: bool,
}

impl Cli {
    /// Builds and validates the run configuration.
    pub fn to_config(&self) -> BypassResult<RunConfig> {
        let mut config = RunConfig::new(&self.uri);
        if let Some(proxy) = &self.proxy {
            config.set_proxy(proxy)?;
        }
        config.set_user_agent(&self.user_agent);
        for header in &self.headers {
            config.add_header(header)?;
        }
        config.set_http_method(&self.method);
        config.set_bypass_ip(self.bypass_ip.clone());
        config.set_pool_size(self.pool_size);
        config.set_submission_delay_ms(self.delay);
        config.set_timeout(self.timeout);
        config.set_wordlist_folder(&self.folder);
        config.set_color(!self.no_color);
        config.set_progress(!self.no_progress && !self.quiet);
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            return log::LevelFilter::Debug;
        }
        if self.quiet {
            return log::LevelFilter::Error;
        }
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }
}
