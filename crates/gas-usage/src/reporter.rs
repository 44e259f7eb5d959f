// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use gas_report_config::{Config, Verbosity};

use crate::{
    compose::{compose_styled, ReportOutcome},
    palette::Palette,
    receipt::ReceiptRecord,
    sink::{LogSink, TracingSink},
};

/// What [`ConditionalReporter::report`] did with a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Written,
    /// Ambient verbosity is below the reporter's threshold.
    BelowThreshold,
    /// Missing name or receipts.
    NothingToReport,
    /// The batch used no gas, or none of it could be read.
    ZeroUsage,
}

/// Writes gas usage reports when the ambient verbosity asks for them.
///
/// The default logger supplies the ambient verbosity and is where reports go
/// unless a call passes its own sink.
#[derive(bon::Builder)]
pub struct ConditionalReporter {
    logger: Arc<dyn LogSink>,
    #[builder(default = Verbosity::Notice)]
    threshold: Verbosity,
    #[builder(default)]
    palette: Palette,
}

impl ConditionalReporter {
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .logger(Arc::new(TracingSink::new(config.log.verbosity)))
            .threshold(config.report.threshold)
            .palette(Palette::new(config.log.colors))
            .build()
    }

    pub fn threshold(&self) -> Verbosity {
        self.threshold
    }

    pub fn report(
        &self,
        name: Option<&str>,
        receipts: Option<&[ReceiptRecord]>,
        sink: Option<&dyn LogSink>,
    ) -> Emission {
        if self.logger.verbosity() < self.threshold {
            return Emission::BelowThreshold;
        }
        let sink = sink.unwrap_or(&*self.logger);

        let report = match compose_styled(name, receipts, &self.palette) {
            ReportOutcome::Empty => return Emission::NothingToReport,
            ReportOutcome::Report(report) => report,
        };
        if report.text.is_empty() || report.sum_gas_used.is_zero() {
            tracing::trace!(
                report = ?name,
                skipped = report.skipped,
                "Not writing gas usage report without usage"
            );
            return Emission::ZeroUsage;
        }

        sink.write(&report.text);
        Emission::Written
    }
}

impl std::fmt::Debug for ConditionalReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionalReporter")
            .field("verbosity", &self.logger.verbosity())
            .field("threshold", &self.threshold)
            .field("palette", &self.palette)
            .finish()
    }
}
