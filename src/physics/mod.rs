pub mod gravity;

pub use gravity::GravityField;
