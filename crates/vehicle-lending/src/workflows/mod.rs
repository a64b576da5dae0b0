pub mod loans;
pub mod memory;
pub mod valuation;
pub mod vehicles;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{Datelike, Utc};

/// Calendar year used for age-based rules when no reference year is pinned.
pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}
