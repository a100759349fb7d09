pub mod activity;
pub mod finance;
pub mod period;
pub mod recap;

pub use activity::Activity;
pub use finance::Finance;
pub use period::Period;
pub use recap::{MonthlyRecap, RecapTotals};
