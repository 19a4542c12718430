//! PLL ownership.

use std::collections::BTreeSet;

use crate::record::TileRecord;

/// Grants the PLL of each clock domain to its first clocked tile.
///
/// `records` must be in scan order. Unclocked tiles never own a PLL.
pub fn assign_plls(records: &mut [TileRecord]) {
    let mut claimed = BTreeSet::new();
    for record in records.iter_mut() {
        record.has_pll = record.kind.is_clocked() && claimed.insert(record.clock_domain);
    }
}
