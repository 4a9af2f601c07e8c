//! `invoiceflow-rules` — validators and the approve/reject decision.
//!
//! Validators are pure over the record except for the duplicate ledger,
//! which is explicit, injectable, process-wide state. Every check emits
//! human-readable error strings; any error anywhere forces rejection.

pub mod arithmetic;
pub mod business;
pub mod decision;
pub mod ledger;

pub use arithmetic::ArithmeticValidator;
pub use business::{
    BusinessRulesValidator, MAX_AUTO_APPROVE_AMOUNT, MAX_FUTURE_DAYS, MAX_PAST_DAYS,
    MIN_INVOICE_AMOUNT,
};
pub use decision::DecisionEngine;
pub use ledger::DuplicateLedger;
