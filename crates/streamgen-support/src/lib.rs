//! Runtime support for code emitted by `streamgen`.
//!
//! Generated models implement [`JsonSerializable`] (and [`XmlSerializable`] for XML models)
//! on top of the readers and writers defined here. The crates generated code needs for its
//! client types are re-exported so a consumer only depends on this crate.

mod error;
pub mod json;
mod merge_patch;
pub mod wire;
#[cfg(feature = "quick-xml")]
pub mod xml;

pub use chrono;
pub use error::StreamError;
pub use indexmap::{self, IndexMap};
pub use json::{JsonReader, JsonSerializable, JsonToken, JsonWriter};
pub use merge_patch::MergePatchState;
pub use serde_json;
pub use uuid;
#[cfg(feature = "quick-xml")]
pub use xml::{QName, XmlReader, XmlSerializable, XmlToken, XmlWriter};
