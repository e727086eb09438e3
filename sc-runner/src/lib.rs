pub mod suite;
pub use suite::*;
