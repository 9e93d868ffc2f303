pub mod config;
pub mod error;
pub mod hazard;
pub mod node_row;
pub mod snapshot;
#[cfg(test)]
mod tests;

pub use config::*;
pub use error::*;
pub use hazard::*;
pub use node_row::*;
pub use snapshot::*;
