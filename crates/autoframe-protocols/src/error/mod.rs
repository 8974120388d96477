//! Error types for the AutoFrame protocol layer.

mod frame;
mod host;
mod layout;
mod prediction;
mod selection;

pub use frame::*;
pub use host::*;
pub use layout::*;
pub use prediction::*;
pub use selection::*;
