//! Process-wide duplicate-submission ledger.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Set of previously seen `vendor:invoice_number` keys.
///
/// The only state that outlives a run. It is explicitly owned and injected
/// into the business-rules validator; nothing else reads or writes it.
/// Concurrent runs racing on the same key go through one critical section,
/// so exactly one of them registers and the rest see a duplicate.
#[derive(Debug, Default)]
pub struct DuplicateLedger {
    keys: Mutex<HashSet<String>>,
}

impl DuplicateLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized ledger key: lowercase `vendor:invoice_number`.
    fn key(vendor_name: &str, invoice_number: &str) -> String {
        format!("{vendor_name}:{invoice_number}").to_lowercase()
    }

    /// Atomic check-then-register.
    ///
    /// Returns `true` if the key was already registered (a duplicate). A
    /// fresh key is registered as a side effect and reported as seen from
    /// then on, until [`DuplicateLedger::clear`].
    pub fn check_and_register(&self, vendor_name: &str, invoice_number: &str) -> bool {
        let mut keys = self.lock();
        !keys.insert(Self::key(vendor_name, invoice_number))
    }

    /// Read-only membership probe (does not register).
    pub fn contains(&self, vendor_name: &str, invoice_number: &str) -> bool {
        self.lock().contains(&Self::key(vendor_name, invoice_number))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every registered key. Test/reset hook only.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means another run panicked mid-insert; the
        // set itself is still a set, so keep going.
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
