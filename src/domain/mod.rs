//! Exchange-agnostic domain types.

mod announcement;
mod category;
mod period;

pub use announcement::{to_crore, Announcement, EnrichedFiling, ScripInfo, CRORE};
pub use category::{CategoryRule, CategoryTable};
pub use period::{LookbackWindow, Period, DAYS_PER_YEAR};
