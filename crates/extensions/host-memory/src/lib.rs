//! In-memory design document host for AutoFrame.
//!
//! Loads a document tree from JSON and serves it through the
//! [`DesignHost`](autoframe_protocols::DesignHost) trait. Mutations stay in
//! memory until the document is written back with [`MemoryHost::save`].
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "name": "Campaign",
//!   "selection": ["1:2"],
//!   "availableFonts": [{ "family": "Inter", "style": "Regular" }],
//!   "images": { "a1b2c3": "<base64 bytes>" },
//!   "nodes": [
//!     {
//!       "id": "1:2", "name": "Banner", "type": "FRAME",
//!       "x": 0, "y": 0, "width": 400, "height": 300,
//!       "children": [
//!         {
//!           "id": "1:3", "name": "Headline", "type": "TEXT",
//!           "x": 20, "y": 20, "width": 200, "height": 40,
//!           "text": { "characters": "Sale", "fontSize": 24,
//!                     "fonts": [{ "family": "Inter", "style": "Regular" }] }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Node coordinates are relative to the parent. Any style attribute may be
//! replaced by `{"$mixed": true}` to model a mixed value.

mod document;
mod error;
mod host;

pub use document::{DocumentFile, NodeSpec};
pub use error::MemoryHostError;
pub use host::MemoryHost;
