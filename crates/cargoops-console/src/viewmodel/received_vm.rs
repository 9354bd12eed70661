//! Receiving List ViewModel
//!
//! Storing orders already received, with their inspection result and an
//! editable discrepancy detail.

use cargoops_core::{DiscrepancyUpdate, DomainError, FetchOutcome, RecordSet, StoringOrder};
use tracing::debug;

use super::list::SequencedList;
use crate::notice::{Notice, Notices};

pub struct ReceivedOrdersViewModel {
    orders: SequencedList<StoringOrder>,
    /// Only orders received by this employee are listed; `None` lists all.
    receiver: Option<String>,
    /// Order whose discrepancy save is in flight.
    pub saving: Option<String>,
}

impl ReceivedOrdersViewModel {
    pub fn new(receiver: Option<String>) -> Self {
        Self {
            orders: SequencedList::new("storing order"),
            receiver,
            saving: None,
        }
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.orders.begin_refresh()
    }

    pub fn apply_orders(
        &mut self,
        seq: u64,
        result: Result<FetchOutcome<StoringOrder>, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        let receiver = self.receiver.clone();
        self.orders.apply_with(seq, result, notices, |rows| match receiver {
            Some(employee_id) => rows.into_iter().filter(|o| o.received_by(&employee_id)).collect(),
            None => rows.into_iter().filter(|o| !o.receiver_id.is_empty()).collect(),
        })
    }

    pub fn orders(&self) -> &RecordSet<StoringOrder> {
        self.orders.set()
    }

    pub fn rows(&self) -> &[StoringOrder] {
        self.orders.rows()
    }

    /// Discrepancy shown for a row: `-` once inspection passed.
    pub fn discrepancy_text(order: &StoringOrder) -> &str {
        if order.passed_inspection() {
            "-"
        } else {
            &order.discrepancy_detail
        }
    }

    pub fn current_detail(&self, storing_order_id: &str) -> Option<&str> {
        self.rows()
            .iter()
            .find(|o| o.storing_order_id == storing_order_id)
            .map(|o| o.discrepancy_detail.as_str())
    }

    pub fn begin_discrepancy(&mut self, storing_order_id: &str, detail: &str) -> Result<DiscrepancyUpdate, DomainError> {
        if let Some(pending) = &self.saving {
            return Err(DomainError::Rejected(format!("Discrepancy for {} is still saving", pending)));
        }
        let update = DiscrepancyUpdate::new(storing_order_id, detail)?;
        self.saving = Some(update.storing_order_id.clone());
        Ok(update)
    }

    pub fn apply_discrepancy(
        &mut self,
        update: DiscrepancyUpdate,
        result: Result<(), DomainError>,
        notices: &mut Notices,
    ) {
        if self.saving.as_deref() == Some(update.storing_order_id.as_str()) {
            self.saving = None;
        }
        match result {
            Ok(()) => {
                if let Some(order) = self
                    .orders
                    .rows_mut()
                    .iter_mut()
                    .find(|o| o.storing_order_id == update.storing_order_id)
                {
                    order.discrepancy_detail = update.discrepancy_detail;
                } else {
                    debug!(storing_order_id = %update.storing_order_id, "Saved discrepancy for an order not in the list");
                }
                notices.push(Notice::success(format!("Saved for {}", update.storing_order_id)));
            }
            Err(e) => notices.push(Notice::error(format!("Save failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    fn order(id: &str, receiver: &str, result: &str) -> StoringOrder {
        StoringOrder {
            storing_order_id: id.to_string(),
            receiver_id: receiver.to_string(),
            doc_inspection_result: result.to_string(),
            discrepancy_detail: "Invoice mismatch".into(),
            ..StoringOrder::default()
        }
    }

    fn loaded(receiver: Option<&str>) -> ReceivedOrdersViewModel {
        let mut vm = ReceivedOrdersViewModel::new(receiver.map(str::to_string));
        let mut notices = Notices::new();
        let seq = vm.begin_refresh();
        let rows = vec![
            order("SO-1", "RCV2054", "FAIL"),
            order("SO-2", "RCV1000", "PASS"),
            order("SO-3", "", ""),
        ];
        vm.apply_orders(seq, Ok(FetchOutcome::new(rows)), &mut notices);
        vm
    }

    #[test]
    fn test_lists_only_own_receipts() {
        let vm = loaded(Some("RCV2054"));
        assert_eq!(vm.rows().len(), 1);
        assert_eq!(vm.rows()[0].storing_order_id, "SO-1");

        let all = loaded(None);
        let ids: Vec<_> = all.rows().iter().map(|o| o.storing_order_id.as_str()).collect();
        assert_eq!(ids, vec!["SO-1", "SO-2"]);
        assert_eq!(ReceivedOrdersViewModel::discrepancy_text(&all.rows()[1]), "-");
    }

    #[test]
    fn test_saved_discrepancy_updates_row() {
        let mut vm = loaded(Some("RCV2054"));
        let mut notices = Notices::new();
        let update = vm.begin_discrepancy("SO-1", "3 cartons short").unwrap();
        assert!(vm.begin_discrepancy("SO-1", "again").is_err());

        vm.apply_discrepancy(update, Ok(()), &mut notices);
        assert!(vm.saving.is_none());
        assert_eq!(vm.current_detail("SO-1"), Some("3 cartons short"));
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_failed_save_keeps_old_detail() {
        let mut vm = loaded(Some("RCV2054"));
        let mut notices = Notices::new();
        let update = vm.begin_discrepancy("SO-1", "3 cartons short").unwrap();
        vm.apply_discrepancy(update, Err(DomainError::network(Some(500), "API returned 500")), &mut notices);
        assert_eq!(vm.current_detail("SO-1"), Some("Invoice mismatch"));
        assert!(notices.latest().unwrap().message.starts_with("Save failed"));
    }
}
