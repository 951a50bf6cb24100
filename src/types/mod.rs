pub mod addr;
pub mod errors;
pub mod stats;
