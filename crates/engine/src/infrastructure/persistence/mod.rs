//! Paged key-value persistence
//!
//! A single on-disk store holding named, ordered maps. Keys encode so that
//! byte order matches key order; values go through the codecs in
//! [`crate::infrastructure::codec`].

mod connection;
mod error;
mod keys;
mod typed_map;

pub use connection::PagedStore;
pub use error::StoreError;
pub use keys::{KeyCodec, ZoneKey};
pub use typed_map::TypedMap;
