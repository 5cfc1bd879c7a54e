pub mod health;
pub mod visitors;
