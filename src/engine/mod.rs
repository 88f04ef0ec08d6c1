pub mod availability;
pub mod fanout;
pub mod lifecycle;
pub mod pricing;
