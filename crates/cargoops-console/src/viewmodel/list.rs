//! Sequenced List
//!
//! A page-level record set where only the newest refresh may land.

use cargoops_core::{DomainError, FetchOutcome, RecordSet};
use tracing::{debug, warn};

use crate::notice::{Notice, Notices};

pub struct SequencedList<R> {
    set: RecordSet<R>,
    seq: u64,
    /// Noun used in notices, e.g. "package".
    what: &'static str,
}

impl<R> SequencedList<R> {
    pub fn new(what: &'static str) -> Self {
        Self {
            set: RecordSet::new(),
            seq: 0,
            what,
        }
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.seq += 1;
        self.set.start_loading();
        self.seq
    }

    /// Returns `false` when a newer refresh has been issued since `seq`.
    pub fn apply(&mut self, seq: u64, result: Result<FetchOutcome<R>, DomainError>, notices: &mut Notices) -> bool {
        self.apply_with(seq, result, notices, |rows| rows)
    }

    /// Like `apply`, reshaping the decoded rows before they are stored.
    pub fn apply_with<F>(
        &mut self,
        seq: u64,
        result: Result<FetchOutcome<R>, DomainError>,
        notices: &mut Notices,
        shape: F,
    ) -> bool
    where
        F: FnOnce(Vec<R>) -> Vec<R>,
    {
        if seq != self.seq {
            warn!(seq, current = self.seq, what = self.what, "Discarding superseded list");
            return false;
        }
        match result {
            Ok(outcome) => {
                if !outcome.skipped.is_empty() {
                    notices.push(Notice::warning(format!(
                        "{} {} record(s) could not be read",
                        outcome.skipped.len(),
                        self.what
                    )));
                }
                debug!(rows = outcome.rows.len(), what = self.what, "List loaded");
                self.set.finish(shape(outcome.rows));
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                self.set.fail(e.to_string());
            }
        }
        true
    }

    pub fn set(&self) -> &RecordSet<R> {
        &self.set
    }

    pub fn rows_mut(&mut self) -> &mut [R] {
        self.set.rows_mut()
    }

    pub fn rows(&self) -> &[R] {
        self.set.rows()
    }
}
