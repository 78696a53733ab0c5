//! Order-preserving key encodings.
//!
//! The backend orders keys bytewise, so every key type encodes to bytes
//! whose lexicographic order matches the key's own order: unsigned numbers
//! big-endian, signed numbers big-endian with the sign bit flipped, strings
//! as raw UTF-8.

use delve_domain::{EntityUid, MapUid, ModUid};

use crate::infrastructure::codec::CodecError;

pub trait KeyCodec: Sized {
    fn encode_key(&self) -> Vec<u8>;

    fn decode_key(bytes: &[u8]) -> Result<Self, CodecError>;
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| {
        CodecError::Invalid(format!("key of {} bytes, expected {N}", bytes.len()))
    })
}

macro_rules! unsigned_key {
    ($ty:ty) => {
        impl KeyCodec for $ty {
            fn encode_key(&self) -> Vec<u8> {
                self.to_be_bytes().to_vec()
            }

            fn decode_key(bytes: &[u8]) -> Result<Self, CodecError> {
                fixed(bytes).map(<$ty>::from_be_bytes)
            }
        }
    };
}

macro_rules! signed_key {
    ($ty:ty, $unsigned:ty) => {
        impl KeyCodec for $ty {
            fn encode_key(&self) -> Vec<u8> {
                ((*self as $unsigned) ^ (1 << (<$unsigned>::BITS - 1)))
                    .to_be_bytes()
                    .to_vec()
            }

            fn decode_key(bytes: &[u8]) -> Result<Self, CodecError> {
                let raw = <$unsigned>::from_be_bytes(fixed(bytes)?);
                Ok((raw ^ (1 << (<$unsigned>::BITS - 1))) as $ty)
            }
        }
    };
}

macro_rules! uid_key {
    ($uid:ty, $repr:ty) => {
        impl KeyCodec for $uid {
            fn encode_key(&self) -> Vec<u8> {
                self.get().encode_key()
            }

            fn decode_key(bytes: &[u8]) -> Result<Self, CodecError> {
                <$repr>::decode_key(bytes).map(<$uid>::new)
            }
        }
    };
}

unsigned_key!(u16);
unsigned_key!(u64);
signed_key!(i32, u32);
signed_key!(i64, u64);
uid_key!(EntityUid, u64);
uid_key!(MapUid, u16);
uid_key!(ModUid, u16);

impl KeyCodec for String {
    fn encode_key(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, CodecError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| CodecError::InvalidUtf8(e.to_string()))
    }
}

/// Key of a single zone: owning map, then level. Zones of one map sort
/// together, lowest level first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneKey {
    pub map: MapUid,
    pub level: i32,
}

impl ZoneKey {
    pub fn new(map: MapUid, level: i32) -> Self {
        Self { map, level }
    }
}

impl KeyCodec for ZoneKey {
    fn encode_key(&self) -> Vec<u8> {
        let mut bytes = self.map.encode_key();
        bytes.extend(self.level.encode_key());
        bytes
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != 6 {
            return Err(CodecError::Invalid(format!(
                "zone key of {} bytes, expected 6",
                bytes.len()
            )));
        }
        let (map, level) = bytes.split_at(2);
        Ok(Self {
            map: MapUid::decode_key(map)?,
            level: i32::decode_key(level)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_keys_sort_numerically() {
        let mut values = vec![5i32, -1, 0, i32::MIN, i32::MAX, -300];
        let mut encoded: Vec<Vec<u8>> = values.iter().map(KeyCodec::encode_key).collect();
        values.sort();
        encoded.sort();
        let decoded: Vec<i32> = encoded
            .iter()
            .map(|bytes| i32::decode_key(bytes).unwrap())
            .collect();
        assert_eq!(decoded, values);
    }

    #[test]
    fn unsigned_keys_sort_numerically() {
        assert!(255u64.encode_key() < 256u64.encode_key());
        assert_eq!(EntityUid::decode_key(&EntityUid::new(9).encode_key()), Ok(EntityUid::new(9)));
    }

    #[test]
    fn zone_keys_group_by_map() {
        let a = ZoneKey::new(MapUid::new(1), 40).encode_key();
        let b = ZoneKey::new(MapUid::new(2), -40).encode_key();
        let c = ZoneKey::new(MapUid::new(2), 3).encode_key();
        assert!(a < b && b < c);
        assert_eq!(ZoneKey::decode_key(&c), Ok(ZoneKey::new(MapUid::new(2), 3)));
    }

    #[test]
    fn wrong_width_key_is_rejected() {
        assert!(u64::decode_key(&[1, 2, 3]).is_err());
        assert!(ZoneKey::decode_key(&[0; 5]).is_err());
    }
}
