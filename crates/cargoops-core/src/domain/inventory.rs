// ============================================================================
// CargoOps Core - Inventory Bins
// File: crates/cargoops-core/src/domain/inventory.rs
// Description: Stock per bin and the two-rack floor layout
// ============================================================================

use serde::{Deserialize, Serialize};

/// Bins per rack on the floor.
pub const BINS_PER_RACK: u8 = 4;
pub const RACK_COUNT: u8 = 2;

/// Stock held in one bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBin {
    pub bin_id: String,
    pub product_id: String,
    pub quantity: u32,
}

impl InventoryBin {
    /// Floor slot for ids of the form `BIN1`..`BIN8`.
    pub fn slot(&self) -> Option<u8> {
        let digits = self.bin_id.strip_prefix("BIN")?;
        if digits.len() != 1 {
            return None;
        }
        let slot: u8 = digits.parse().ok()?;
        (1..=BINS_PER_RACK * RACK_COUNT).contains(&slot).then_some(slot)
    }

    /// Rack number, 1 or 2.
    pub fn rack(&self) -> Option<u8> {
        self.slot().map(|slot| (slot - 1) / BINS_PER_RACK + 1)
    }

    /// Label such as `R1 - BIN3`.
    pub fn location(&self) -> String {
        match self.rack() {
            Some(rack) => format!("R{} - {}", rack, self.bin_id),
            None => self.bin_id.clone(),
        }
    }
}

/// Floor bins only, ordered by slot. Bins outside the layout are left out.
pub fn floor_layout(bins: Vec<InventoryBin>) -> Vec<InventoryBin> {
    let mut floor: Vec<InventoryBin> = bins.into_iter().filter(|bin| bin.slot().is_some()).collect();
    floor.sort_by_key(|bin| bin.slot());
    floor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(id: &str) -> InventoryBin {
        InventoryBin {
            bin_id: id.to_string(),
            product_id: "PROD1".into(),
            quantity: 2,
        }
    }

    #[test]
    fn test_slot_and_rack() {
        assert_eq!(bin("BIN1").rack(), Some(1));
        assert_eq!(bin("BIN4").rack(), Some(1));
        assert_eq!(bin("BIN5").rack(), Some(2));
        assert_eq!(bin("BIN8").location(), "R2 - BIN8");
        assert_eq!(bin("BIN9").slot(), None);
        assert_eq!(bin("BIN10").slot(), None);
        assert_eq!(bin("BIN0").slot(), None);
        assert_eq!(bin("A-01").location(), "A-01");
    }

    #[test]
    fn test_floor_layout_filters_and_sorts() {
        let floor = floor_layout(vec![bin("BIN7"), bin("DOCK"), bin("BIN2"), bin("BIN12"), bin("BIN5")]);
        let ids: Vec<_> = floor.iter().map(|b| b.bin_id.as_str()).collect();
        assert_eq!(ids, vec!["BIN2", "BIN5", "BIN7"]);
    }
}
