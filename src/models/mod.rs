pub mod cart;
pub mod library;
pub mod plans;
pub mod purchases;
pub mod subscriptions;
pub mod users;
