//! Fixed-width integers, strings and lists.

use std::mem::size_of;

use super::{Codec, CodecError, ReadBuffer, WriteBuffer};

macro_rules! fixed_codec {
    ($name:ident, $ty:ty, $put:ident, $get:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Codec<$ty> for $name {
            fn write(&self, buf: &mut WriteBuffer, value: &$ty) -> Result<(), CodecError> {
                buf.$put(*value);
                Ok(())
            }

            fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<$ty, CodecError> {
                buf.$get()
            }

            fn memory_estimate(&self, _value: &$ty) -> usize {
                size_of::<$ty>()
            }
        }
    };
}

fixed_codec!(BoolCodec, bool, put_bool, get_bool);
fixed_codec!(I16Codec, i16, put_i16, get_i16);
fixed_codec!(U16Codec, u16, put_u16, get_u16);
fixed_codec!(I32Codec, i32, put_i32, get_i32);
fixed_codec!(I64Codec, i64, put_i64, get_i64);
fixed_codec!(U64Codec, u64, put_u64, get_u64);

/// Length of the null string.
const NULL_LENGTH: i32 = -1;

fn put_len(buf: &mut WriteBuffer, what: &'static str, len: usize) -> Result<(), CodecError> {
    let len = i32::try_from(len)
        .map_err(|_| CodecError::invalid_length(what, i64::try_from(len).unwrap_or(i64::MAX)))?;
    buf.put_i32(len);
    Ok(())
}

fn read_str(buf: &mut ReadBuffer<'_>, len: i32) -> Result<String, CodecError> {
    let bytes = buf.take(len as usize)?;
    String::from_utf8(bytes.to_vec()).map_err(|e| CodecError::InvalidUtf8(e.to_string()))
}

/// Nullable string: `None` is written with length `-1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalStringCodec;

impl Codec<Option<String>> for OptionalStringCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &Option<String>) -> Result<(), CodecError> {
        match value {
            Some(s) => {
                put_len(buf, "string", s.len())?;
                buf.put_bytes(s.as_bytes());
            }
            None => buf.put_i32(NULL_LENGTH),
        }
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Option<String>, CodecError> {
        let len = buf.get_i32()?;
        if len < 0 {
            return Ok(None);
        }
        read_str(buf, len).map(Some)
    }

    fn memory_estimate(&self, value: &Option<String>) -> usize {
        size_of::<Option<String>>() + value.as_ref().map_or(0, String::len)
    }
}

/// Non-null string. Reading the null string is a decode error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn write(&self, buf: &mut WriteBuffer, value: &String) -> Result<(), CodecError> {
        put_len(buf, "string", value.len())?;
        buf.put_bytes(value.as_bytes());
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<String, CodecError> {
        let len = buf.get_i32()?;
        if len < 0 {
            return Err(CodecError::invalid_length("required string", len));
        }
        read_str(buf, len)
    }

    fn memory_estimate(&self, value: &String) -> usize {
        size_of::<String>() + value.len()
    }
}

/// Count-prefixed list of values encoded by the inner codec.
#[derive(Debug, Clone, Default)]
pub struct ListCodec<C>(pub C);

impl<T, C: Codec<T>> Codec<Vec<T>> for ListCodec<C> {
    fn write(&self, buf: &mut WriteBuffer, value: &Vec<T>) -> Result<(), CodecError> {
        put_len(buf, "list", value.len())?;
        for item in value {
            self.0.write(buf, item)?;
        }
        Ok(())
    }

    fn read(&self, buf: &mut ReadBuffer<'_>) -> Result<Vec<T>, CodecError> {
        let len = buf.get_i32()?;
        if len < 0 {
            return Err(CodecError::invalid_length("list", len));
        }
        let len = len as usize;
        // Every element takes at least one byte.
        if len > buf.remaining() {
            return Err(CodecError::Truncated {
                needed: len,
                remaining: buf.remaining(),
            });
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.0.read(buf)?);
        }
        Ok(items)
    }

    fn memory_estimate(&self, value: &Vec<T>) -> usize {
        size_of::<Vec<T>>() + value.iter().map(|v| self.0.memory_estimate(v)).sum::<usize>()
    }
}
