pub mod actor;
pub mod driver;
pub mod notification;
pub mod order;
pub mod product;
