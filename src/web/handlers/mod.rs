pub mod analyze;
pub mod examples;
pub mod health;
