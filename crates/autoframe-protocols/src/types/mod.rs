//! Data model shared by the host, the pipeline and the prediction service.

mod element;
mod message;
mod node;
mod prediction;
mod snapshot;
mod value;

pub use element::*;
pub use message::*;
pub use node::*;
pub use prediction::*;
pub use snapshot::*;
pub use value::*;
