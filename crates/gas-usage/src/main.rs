// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use clap::Parser;
use gas_usage::cli::{self, Cli};

fn main() -> ExitCode {
    match cli::run(Cli::parse()) {
        Ok(emission) => {
            tracing::debug!(?emission, "Gas usage report done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("gas-report error: {e:#}");
            ExitCode::from(1)
        }
    }
}
