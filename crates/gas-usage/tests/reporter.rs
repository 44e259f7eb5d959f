// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use gas_usage::{
    compose, ConditionalReporter, Emission, GasUsed, MemorySink, ReceiptRecord, ReportOutcome,
    Verbosity,
};
use serde_json::json;
use test_log::test;

fn batch(value: serde_json::Value) -> Vec<ReceiptRecord> {
    serde_json::from_value(value).expect("valid receipt batch")
}

/// A deposit as it comes back from a JSON-RPC node: quantities are hex.
fn rpc_payment() -> Vec<ReceiptRecord> {
    batch(json!([
        {
            "description": "approve",
            "receipt": {
                "transactionHash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
                "blockNumber": "0x10",
                "gasUsed": "0xb4f5",
                "status": "0x1"
            }
        },
        {
            "description": "depositERC20",
            "receipt": {
                "blockNumber": "0x11",
                "gasUsed": "0x1a1a6",
                "status": "0x1"
            }
        }
    ]))
}

#[test]
fn rpc_receipts_are_summed_and_written() {
    let logger = Arc::new(MemorySink::new(Verbosity::Notice));
    let reporter = ConditionalReporter::builder().logger(logger.clone()).build();

    let emission = reporter.report(
        Some("ERC-20 PAYMENT FROM MAIN NET"),
        Some(rpc_payment().as_slice()),
        None,
    );

    assert_eq!(emission, Emission::Written);
    // 0xb4f5 = 46325, 0x1a1a6 = 106918
    assert_eq!(
        logger.contents(),
        "Gas usage report for ERC-20 PAYMENT FROM MAIN NET\n\
         \x20   approve.....46325\n\
         \x20   depositERC20.....106918\n\
         \x20   SUM.....153243\n"
    );
}

#[test]
fn ethers_big_numbers_are_understood() {
    let receipts = batch(json!([
        {"description": "mint", "receipt": {"gasUsed": {"type": "BigNumber", "hex": "0x5208"}}},
        {"description": "burn", "receipt": {"gasUsed": {"_hex": "0x5208", "_isBigNumber": true}}}
    ]));

    let report = compose(Some("MINT AND BURN"), Some(receipts.as_slice()))
        .into_report()
        .unwrap();

    assert_eq!(report.sum_gas_used, GasUsed::from(42_000u64));
    assert_eq!(report.entries.len(), 2);
}

#[test]
fn details_sink_gets_the_report_and_logger_stays_clean() {
    let logger = Arc::new(MemorySink::new(Verbosity::Debug));
    let reporter = ConditionalReporter::builder().logger(logger.clone()).build();
    let details = MemorySink::new(Verbosity::Debug);

    reporter.report(
        Some("REIMBURSEMENT_WALLET_RECHARGE"),
        Some(&[ReceiptRecord::new("rechargeUserWallet", "31000")][..]),
        Some(&details),
    );

    assert!(logger.is_empty());
    assert_eq!(details.entries().len(), 1);
    assert!(details
        .contents()
        .starts_with("Gas usage report for REIMBURSEMENT_WALLET_RECHARGE\n"));
}

#[test]
fn quiet_logger_suppresses_reports() {
    let logger = Arc::new(MemorySink::new(Verbosity::Information));
    let reporter = ConditionalReporter::builder().logger(logger.clone()).build();
    let details = MemorySink::new(Verbosity::Trace);

    let emission = reporter.report(
        Some("ETH PAYMENT FROM MAIN NET"),
        Some(rpc_payment().as_slice()),
        Some(&details),
    );

    assert_eq!(emission, Emission::BelowThreshold);
    assert!(logger.is_empty());
    assert!(details.is_empty());
}

#[test]
fn partially_broken_batch_still_reports_the_rest() {
    let logger = Arc::new(MemorySink::new(Verbosity::Trace));
    let reporter = ConditionalReporter::builder().logger(logger.clone()).build();
    let receipts = batch(json!([
        {"description": "lost", "receipt": null},
        {"description": "garbled", "receipt": {"gasUsed": "twelve"}},
        {"description": "transfer", "receipt": {"gasUsed": 21000}}
    ]));

    let outcome = compose(Some("ETH PAYMENT FROM S-CHAIN"), Some(receipts.as_slice()));
    let ReportOutcome::Report(report) = outcome else {
        panic!("expected a report");
    };
    assert_eq!(report.skipped, 2);
    assert_eq!(report.sum_gas_used, GasUsed::from(21_000u64));

    let emission = reporter.report(
        Some("ETH PAYMENT FROM S-CHAIN"),
        Some(receipts.as_slice()),
        None,
    );
    assert_eq!(emission, Emission::Written);
    assert_eq!(logger.contents(), report.text);
    assert!(!logger.contents().contains("lost"));
    assert!(!logger.contents().contains("garbled"));
}

#[test]
fn reports_are_independent_between_calls() {
    let logger = Arc::new(MemorySink::new(Verbosity::Notice));
    let reporter = ConditionalReporter::builder().logger(logger.clone()).build();
    let receipts = [ReceiptRecord::new("tx", "7")];

    for _ in 0..3 {
        reporter.report(Some("repeat"), Some(receipts.as_slice()), None);
    }

    let entries = logger.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.ends_with("    SUM.....7\n")));
}
