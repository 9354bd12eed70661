//! Receiving ViewModel
//!
//! Barcode scan workflow for receiving a storing order and the result of the
//! last submission.

use cargoops_core::{DiscrepancyUpdate, DomainError, ReceiveOutcome, ReceivingReceipt, ScanStep, ScanWorkflow};

use crate::notice::{Notice, Notices};

#[derive(Default)]
pub struct ReceivingViewModel {
    pub workflow: ScanWorkflow,
    pub submitting: bool,
    pub last_result: Option<(ReceivingReceipt, ReceiveOutcome)>,
    pub saving_discrepancy: bool,
}

impl ReceivingViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan into the expected step. Rejections become warnings and keep earlier scans.
    pub fn scan(&mut self, value: &str, notices: &mut Notices) -> Option<ScanStep> {
        match self.workflow.scan_next(value) {
            Ok(step) => Some(step),
            Err(e) => {
                notices.push(Notice::from_error(&e));
                None
            }
        }
    }

    pub fn set_quantity(&mut self, quantity: u32, notices: &mut Notices) -> bool {
        match self.workflow.set_quantity(quantity) {
            Ok(()) => true,
            Err(e) => {
                notices.push(Notice::from_error(&e));
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.workflow.reset();
    }

    /// Build the receipt and mark the submission in flight. The scans are kept
    /// until a response arrives.
    pub fn begin_submit(&mut self, employee_id: &str) -> Result<ReceivingReceipt, DomainError> {
        if self.submitting {
            return Err(DomainError::Rejected("A receipt is already being submitted".into()));
        }
        let receipt = self.workflow.submit(employee_id)?;
        self.submitting = true;
        Ok(receipt)
    }

    pub fn apply_receipt(
        &mut self,
        receipt: ReceivingReceipt,
        result: Result<ReceiveOutcome, DomainError>,
        notices: &mut Notices,
    ) {
        self.submitting = false;
        match result {
            Ok(outcome) => {
                let notice = match &outcome {
                    ReceiveOutcome::Passed => {
                        Notice::success(format!("{} received", receipt.storing_order_id))
                    }
                    ReceiveOutcome::Failed { discrepancy_detail } if discrepancy_detail.is_empty() => {
                        Notice::error(format!("{} failed inspection", receipt.storing_order_id))
                    }
                    ReceiveOutcome::Failed { discrepancy_detail } => Notice::error(format!(
                        "{} failed inspection: {}",
                        receipt.storing_order_id, discrepancy_detail
                    )),
                };
                notices.push(notice);
                self.workflow.reset();
                self.last_result = Some((receipt, outcome));
            }
            // no response: keep the scans so the user can resubmit
            Err(e) => notices.push(Notice::from_error(&e)),
        }
    }

    /// Storing order of the last answered receipt.
    pub fn discrepancy_target(&self) -> Option<&str> {
        self.last_result
            .as_ref()
            .map(|(receipt, _)| receipt.storing_order_id.as_str())
    }

    pub fn begin_discrepancy(&mut self, detail: &str) -> Result<DiscrepancyUpdate, DomainError> {
        if self.saving_discrepancy {
            return Err(DomainError::Rejected("A discrepancy is already being saved".into()));
        }
        let target = self.discrepancy_target().unwrap_or_default();
        let update = DiscrepancyUpdate::new(target, detail)?;
        self.saving_discrepancy = true;
        Ok(update)
    }

    pub fn apply_discrepancy(
        &mut self,
        update: DiscrepancyUpdate,
        result: Result<(), DomainError>,
        notices: &mut Notices,
    ) {
        self.saving_discrepancy = false;
        match result {
            Ok(()) => {
                if let Some((receipt, ReceiveOutcome::Failed { discrepancy_detail })) = &mut self.last_result {
                    if receipt.storing_order_id == update.storing_order_id {
                        *discrepancy_detail = update.discrepancy_detail.clone();
                    }
                }
                notices.push(Notice::success(format!("Saved for {}", update.storing_order_id)));
            }
            Err(e) => notices.push(Notice::error(format!("Save failed: {}", e))),
        }
    }
}
