// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Mutex, PoisonError};

use gas_report_config::Verbosity;

/// Destination for reports.
pub trait LogSink: Send + Sync {
    /// Verbosity the sink's owner runs at.
    fn verbosity(&self) -> Verbosity;

    fn write(&self, text: &str);
}

/// Forwards reports to `tracing` at info level under the `gas_usage` target.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    verbosity: Verbosity,
}

impl TracingSink {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl LogSink for TracingSink {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn write(&self, text: &str) {
        tracing::info!(target: "gas_usage", "\n{}", text.trim_end());
    }
}

/// Keeps everything written to it, e.g. to attach the report of one
/// operation to that operation's own log.
#[derive(Debug, Default)]
pub struct MemorySink {
    verbosity: Verbosity,
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            entries: Mutex::default(),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contents(&self) -> String {
        self.entries().concat()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn write(&self, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
