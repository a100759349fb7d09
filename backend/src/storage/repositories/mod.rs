// Repository modules
pub mod activity_repository;
pub mod finance_repository;

// Re-export repository types
pub use activity_repository::ActivityRepository;
pub use finance_repository::FinanceRepository;
