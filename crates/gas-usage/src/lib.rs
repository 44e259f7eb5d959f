// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

//! # Gas usage
//!
//! Sums the gas used by a batch of transaction receipts and renders it as a
//! short report, one line per receipt plus a total.
//!
//! [`compose`] builds the report. [`ConditionalReporter`] writes it to a
//! [`LogSink`], but only when the ambient verbosity is high enough and the
//! batch actually used gas. Neither fails: unreadable receipts are skipped and
//! everything else degrades to writing nothing.

pub mod cli;
mod compose;
mod gas;
mod palette;
mod receipt;
mod reporter;
mod sink;

pub use compose::{compose, compose_styled, ReportOutcome, UsageEntry, UsageReport};
pub use gas::{GasParseError, GasUsed};
pub use gas_report_config::Verbosity;
pub use palette::Palette;
pub use receipt::ReceiptRecord;
pub use reporter::{ConditionalReporter, Emission};
pub use sink::{LogSink, MemorySink, TracingSink};
