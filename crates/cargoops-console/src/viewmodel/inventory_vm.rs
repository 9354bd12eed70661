//! Inventory ViewModel

use cargoops_core::domain::inventory::{BINS_PER_RACK, RACK_COUNT};
use cargoops_core::{floor_layout, DomainError, FetchOutcome, InventoryBin, RecordSet};

use super::list::SequencedList;
use crate::notice::Notices;

/// Floor bins in slot order, split into racks for display.
pub struct InventoryViewModel {
    bins: SequencedList<InventoryBin>,
}

impl Default for InventoryViewModel {
    fn default() -> Self {
        Self {
            bins: SequencedList::new("inventory"),
        }
    }
}

impl InventoryViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.bins.begin_refresh()
    }

    pub fn apply_bins(
        &mut self,
        seq: u64,
        result: Result<FetchOutcome<InventoryBin>, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        self.bins.apply_with(seq, result, notices, floor_layout)
    }

    pub fn bins(&self) -> &RecordSet<InventoryBin> {
        self.bins.set()
    }

    /// Bins of one rack (1-based), in slot order.
    pub fn rack(&self, rack: u8) -> Vec<&InventoryBin> {
        self.bins.rows().iter().filter(|bin| bin.rack() == Some(rack)).collect()
    }

    pub fn racks(&self) -> impl Iterator<Item = u8> {
        1..=RACK_COUNT
    }

    pub fn slots_per_rack(&self) -> usize {
        usize::from(BINS_PER_RACK)
    }

    pub fn total_quantity(&self) -> u64 {
        self.bins.rows().iter().map(|bin| u64::from(bin.quantity)).sum()
    }
}
