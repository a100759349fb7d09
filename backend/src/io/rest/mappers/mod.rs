pub mod activity_mapper;
pub mod finance_mapper;
pub mod recap_mapper;
