// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{
    convert::Infallible,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use gas_report_config::{Config, LogFormat, Verbosity};
use tracing::subscriber::set_global_default;
use tracing_subscriber::{filter::Directive, EnvFilter, FmtSubscriber};

use crate::{ConditionalReporter, Emission, ReceiptRecord};

#[derive(Parser, Debug)]
#[command(version, about = "Print the gas usage report of a batch of transaction receipts")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the batch, shown in the report header.
    #[arg(long)]
    pub name: String,

    /// Overrides `log.verbosity`.
    /// Takes a level name, its first letter or a number between 0 and 9.
    #[arg(long, value_name = "LEVEL", value_parser = parse_verbosity, verbatim_doc_comment)]
    pub verbosity: Option<Verbosity>,

    /// JSON array of `{"description": .., "receipt": {"gasUsed": ..}}` records.
    /// Use `-` to read from stdin.
    #[arg(value_name = "RECEIPTS", verbatim_doc_comment)]
    pub receipts: PathBuf,
}

fn parse_verbosity(s: &str) -> Result<Verbosity, Infallible> {
    Ok(Verbosity::parse_lenient(s))
}

/// Sets up tracing, allows log level to be set from the environment variables
fn init_tracing(format: LogFormat, verbosity: Verbosity, reports: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(verbosity.level_filter().into())
        .from_env_lossy();
    if reports {
        // reports are written at info level whatever the ambient verbosity maps to
        filter = filter.add_directive("gas_usage=info".parse::<Directive>()?);
    }
    let subscriber_builder: tracing_subscriber::fmt::SubscriberBuilder<
        tracing_subscriber::fmt::format::DefaultFields,
        tracing_subscriber::fmt::format::Format,
        EnvFilter,
    > = FmtSubscriber::builder().with_env_filter(filter);
    let result = match format {
        LogFormat::Json => set_global_default(subscriber_builder.json().finish()),
        LogFormat::Full => set_global_default(subscriber_builder.finish()),
        LogFormat::Compact => set_global_default(subscriber_builder.compact().finish()),
        LogFormat::Pretty => {
            set_global_default(subscriber_builder.with_ansi(true).pretty().finish())
        }
    };
    result.context(
        "Could not set up global default subscriber for logger, check \
        environmental variable `RUST_LOG`",
    )
}

pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::parse(cli.config.as_ref()).map_err(|e| {
        // nothing is listening yet, fall back to the defaults to surface the error
        let _ = init_tracing(LogFormat::Pretty, Verbosity::default(), false);
        tracing::error!(
            "Invalid configuration file `{}`: {}",
            cli.config.clone().unwrap_or_default().display(),
            e
        );
        anyhow::anyhow!(e)
    })?;

    if let Some(verbosity) = cli.verbosity {
        config.log.verbosity = verbosity;
    }

    init_tracing(
        config.log.format,
        config.log.verbosity,
        config.reports_enabled(),
    )?;

    Ok(config)
}

pub fn read_receipts(path: &Path) -> anyhow::Result<Vec<ReceiptRecord>> {
    let reader: Box<dyn Read> = if path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open receipts file `{}`", path.display()))?;
        Box::new(BufReader::new(file))
    };
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse receipts from `{}`", path.display()))
}

pub fn run(cli: Cli) -> anyhow::Result<Emission> {
    let config = get_config(&cli)?;
    let receipts = read_receipts(&cli.receipts)?;
    tracing::debug!(
        name = %cli.name,
        receipts = receipts.len(),
        "Loaded receipt batch"
    );

    let reporter = ConditionalReporter::from_config(&config);
    Ok(reporter.report(
        Some(cli.name.as_str()),
        Some(receipts.as_slice()),
        None,
    ))
}
