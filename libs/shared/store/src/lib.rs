pub mod memory;
pub mod records;
pub mod seed;

pub use memory::{ClinicStore, Tables};
pub use records::*;
