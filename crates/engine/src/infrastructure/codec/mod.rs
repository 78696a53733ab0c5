//! Binary codecs for every persisted record.
//!
//! Each persisted type has a codec implementing [`Codec`]. Composite codecs
//! hold the codecs of their parts, so the codec tree mirrors the data model:
//! a map codec owns a zone codec, which owns region and identifier-list
//! codecs, and so on down to the primitives.
//!
//! Layout rules shared by all codecs:
//! - integers are big-endian, fixed width
//! - strings are an `i32` byte length followed by UTF-8; a negative length
//!   is the null string
//! - lists are an `i32` element count followed by the elements
//! - polymorphic records start with an `i16` kind tag

mod buffer;
mod components;
mod entity;
mod error;
mod primitives;
mod registry;
mod world;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use components::{
    EntityUidCodec, InventoryCodec, ItemPropertiesCodec, MapUidCodec, ModUidCodec,
    ScriptHooksCodec, ShapeCodec, StatsCodec,
};
pub use entity::EntityCodec;
pub use error::CodecError;
pub use primitives::{
    BoolCodec, I16Codec, I32Codec, I64Codec, ListCodec, OptionalStringCodec, StringCodec,
    U16Codec, U64Codec,
};
pub use registry::CodecRegistry;
pub use world::{MapCodec, MapPathCodec, ModCodec, RegionCodec, ScriptScheduleCodec, ZoneCodec};

/// Paired encoder/decoder for one record type.
///
/// Implementations must satisfy `read(write(x)) == x` for every valid `x`.
pub trait Codec<T>: Send + Sync {
    fn write(&self, buf: &mut WriteBuffer, value: &T) -> Result<(), CodecError>;

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<T, CodecError>;

    /// Approximate in-memory size of a decoded value, for cache accounting.
    /// Zero means "not tracked".
    fn memory_estimate(&self, _value: &T) -> usize {
        0
    }
}

/// Encode a single record into a fresh byte vector.
pub fn encode_to_vec<T, C>(codec: &C, value: &T) -> Result<Vec<u8>, CodecError>
where
    C: Codec<T> + ?Sized,
{
    let mut buf = WriteBuffer::with_capacity(64);
    codec.write(&mut buf, value)?;
    Ok(buf.into_vec())
}

/// Decode a single record that must span all of `bytes`.
pub fn decode_from_slice<T, C>(codec: &C, bytes: &[u8]) -> Result<T, CodecError>
where
    C: Codec<T> + ?Sized,
{
    let mut buf = ReadBuffer::new(bytes);
    let value = codec.read(&mut buf)?;
    if !buf.is_empty() {
        return Err(CodecError::TrailingBytes(buf.remaining()));
    }
    Ok(value)
}
