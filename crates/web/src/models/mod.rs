//! Domain models for the shoestore.

pub mod shoe;

pub use shoe::{CreateShoeInput, Shoe, UpdateShoeInput};
