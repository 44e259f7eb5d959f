// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use crate::{gas::GasUsed, palette::Palette, receipt::ReceiptRecord};

const INDENT: &str = "    ";
const LEADER: &str = ".....";

/// A receipt that made it into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub description: String,
    pub gas_used: GasUsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReport {
    pub sum_gas_used: GasUsed,
    /// Header, one line per entry and the trailing `SUM` line, each ending
    /// with a newline.
    pub text: String,
    pub entries: Vec<UsageEntry>,
    /// Records whose gas usage could not be read.
    pub skipped: usize,
}

/// Result of composing a report. `Empty` means there was nothing to name or
/// nothing to read, not that the batch had no usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Empty,
    Report(UsageReport),
}

impl ReportOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn report(&self) -> Option<&UsageReport> {
        match self {
            Self::Empty => None,
            Self::Report(report) => Some(report),
        }
    }

    pub fn into_report(self) -> Option<UsageReport> {
        match self {
            Self::Empty => None,
            Self::Report(report) => Some(report),
        }
    }
}

/// Sums the gas used by a batch of receipts and renders it as plain text.
pub fn compose(name: Option<&str>, receipts: Option<&[ReceiptRecord]>) -> ReportOutcome {
    compose_styled(name, receipts, &Palette::plain())
}

/// Same as [`compose`] but decorates the text with `palette`.
///
/// Records without a readable `gasUsed` are left out of both the text and
/// the sum and only counted in [`UsageReport::skipped`].
pub fn compose_styled(
    name: Option<&str>,
    receipts: Option<&[ReceiptRecord]>,
    palette: &Palette,
) -> ReportOutcome {
    let (Some(name), Some(receipts)) = (name.filter(|n| !n.is_empty()), receipts) else {
        return ReportOutcome::Empty;
    };

    let mut sum_gas_used = GasUsed::zero();
    let mut entries = Vec::with_capacity(receipts.len());
    let mut skipped = 0;
    let mut text = format!(
        "{}{}\n",
        palette.info("Gas usage report for "),
        palette.attention(name)
    );

    for (index, record) in receipts.iter().enumerate() {
        let gas_used = match record.gas_used() {
            Ok(gas_used) => gas_used,
            Err(error) => {
                tracing::debug!(
                    report = name,
                    index,
                    description = %record.description,
                    %error,
                    "Skipping receipt without usable gas usage"
                );
                skipped += 1;
                continue;
            }
        };
        sum_gas_used += &gas_used;
        text.push_str(&format!(
            "{INDENT}{}{}{}\n",
            palette.notice(&record.description),
            palette.debug(LEADER),
            palette.info(&gas_used.to_string())
        ));
        entries.push(UsageEntry {
            description: record.description.clone(),
            gas_used,
        });
    }

    text.push_str(&format!(
        "{INDENT}{}{}{}\n",
        palette.attention("SUM"),
        palette.debug(LEADER),
        palette.info(&sum_gas_used.to_string())
    ));

    ReportOutcome::Report(UsageReport {
        sum_gas_used,
        text,
        entries,
        skipped,
    })
}
