//! Raw telemetry value representations and scalar decoding.
//!
//! The native data provider hands over values in several shapes: plain
//! scalars, typed binary buffers tagged with an irsdk_VarType code, arrays
//! (one slot per car), or nothing at all. Decoding is total: every shape
//! collapses deterministically to a numeric or boolean scalar, defaulting
//! to zero/false instead of failing.

use serde::Deserialize;

/// Supported binary value kinds.
/// Maps to the subset of iRacing SDK's irsdk_VarType enum this service reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// 8-bit signed integer
    Int8,
    /// 32-bit signed integer (maps to irsdk_int; doubles as irsdk_bool)
    Int32,
    /// 32-bit unsigned bitfield (maps to irsdk_bitField)
    BitField,
    /// 32-bit floating point (maps to irsdk_float)
    Float32,
    /// 64-bit floating point (maps to irsdk_double)
    Float64,
}

impl VarKind {
    /// Returns the size in bytes of this value kind.
    /// Matches the irsdk_VarTypeBytes array from the iRacing SDK.
    pub const fn size(&self) -> usize {
        match self {
            VarKind::Int8 => 1,
            VarKind::Int32 | VarKind::BitField | VarKind::Float32 => 4,
            VarKind::Float64 => 8,
        }
    }
}

/// A raw telemetry field value of unknown shape.
///
/// `Missing` also stands in for fields absent from the sample map.
/// Buffers never appear in JSON recordings, only from native providers.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    #[serde(skip)]
    Buffer { kind: VarKind, bytes: Vec<u8> },
    Array(Vec<RawValue>),
}

impl RawValue {
    /// Decode to a 64-bit float. Absent, unparsable, and truncated buffers
    /// all yield `0.0`; arrays yield their first element.
    pub fn as_f64(&self) -> f64 {
        match self {
            RawValue::Missing => 0.0,
            RawValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            RawValue::Int(v) => *v as f64,
            RawValue::Float(v) => *v,
            RawValue::Buffer { kind, bytes } => buffer_to_f64(*kind, bytes),
            RawValue::Array(values) => values.first().map(RawValue::as_f64).unwrap_or(0.0),
        }
    }

    /// Decode to a boolean. An Int32 buffer is interpreted as irsdk_bool
    /// (non-zero means true), matching how the SDK encodes boolean fields.
    pub fn as_bool(&self) -> bool {
        match self {
            RawValue::Missing => false,
            RawValue::Bool(b) => *b,
            RawValue::Int(v) => *v != 0,
            RawValue::Float(v) => *v != 0.0,
            RawValue::Buffer { kind, bytes } => buffer_to_f64(*kind, bytes) != 0.0,
            RawValue::Array(values) => values.first().map(RawValue::as_bool).unwrap_or(false),
        }
    }

    /// Decode to a 32-bit signed integer, truncating floats.
    pub fn as_i32(&self) -> i32 {
        self.as_f64() as i32
    }

    /// Decode to a 32-bit unsigned bitfield value.
    pub fn as_u32(&self) -> u32 {
        self.as_f64() as u32
    }
}

/// Decode a typed binary buffer per its declared width and signedness.
/// Zero-length and truncated buffers decode to `0.0`.
fn buffer_to_f64(kind: VarKind, bytes: &[u8]) -> f64 {
    match kind {
        VarKind::Int8 => bytes.first().map(|b| *b as i8 as f64).unwrap_or(0.0),
        VarKind::Int32 => le_bytes::<4>(bytes).map(|b| i32::from_le_bytes(b) as f64).unwrap_or(0.0),
        VarKind::BitField => {
            le_bytes::<4>(bytes).map(|b| u32::from_le_bytes(b) as f64).unwrap_or(0.0)
        }
        VarKind::Float32 => {
            le_bytes::<4>(bytes).map(|b| f32::from_le_bytes(b) as f64).unwrap_or(0.0)
        }
        VarKind::Float64 => le_bytes::<8>(bytes).map(f64::from_le_bytes).unwrap_or(0.0),
    }
}

fn le_bytes<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.get(..N).and_then(|slice| slice.try_into().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_defaults_to_zero_and_false() {
        assert_eq!(RawValue::Missing.as_f64(), 0.0);
        assert_eq!(RawValue::Missing.as_i32(), 0);
        assert!(!RawValue::Missing.as_bool());
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(RawValue::Float(42.5).as_f64(), 42.5);
        assert_eq!(RawValue::Int(7).as_i32(), 7);
        assert!(RawValue::Bool(true).as_bool());
        assert_eq!(RawValue::Bool(true).as_f64(), 1.0);
    }

    #[test]
    fn typed_buffers_decode_per_declared_kind() {
        let f32_buf = RawValue::Buffer { kind: VarKind::Float32, bytes: 91.25f32.to_le_bytes().to_vec() };
        assert_eq!(f32_buf.as_f64(), 91.25);

        let f64_buf = RawValue::Buffer { kind: VarKind::Float64, bytes: 1234.5f64.to_le_bytes().to_vec() };
        assert_eq!(f64_buf.as_f64(), 1234.5);

        let i32_buf = RawValue::Buffer { kind: VarKind::Int32, bytes: (-12i32).to_le_bytes().to_vec() };
        assert_eq!(i32_buf.as_i32(), -12);

        let i8_buf = RawValue::Buffer { kind: VarKind::Int8, bytes: vec![0xFF] };
        assert_eq!(i8_buf.as_i32(), -1);

        let bits = RawValue::Buffer {
            kind: VarKind::BitField,
            bytes: 0x8000_0001u32.to_le_bytes().to_vec(),
        };
        assert_eq!(bits.as_u32(), 0x8000_0001);
    }

    #[test]
    fn int32_buffer_reads_as_irsdk_bool() {
        let truthy = RawValue::Buffer { kind: VarKind::Int32, bytes: 1i32.to_le_bytes().to_vec() };
        let falsy = RawValue::Buffer { kind: VarKind::Int32, bytes: 0i32.to_le_bytes().to_vec() };
        assert!(truthy.as_bool());
        assert!(!falsy.as_bool());
    }

    #[test]
    fn empty_buffer_decodes_to_zero() {
        for kind in [VarKind::Int8, VarKind::Int32, VarKind::BitField, VarKind::Float32, VarKind::Float64] {
            let value = RawValue::Buffer { kind, bytes: Vec::new() };
            assert_eq!(value.as_f64(), 0.0, "{kind:?} should default to 0");
            assert!(!value.as_bool());
        }
    }

    #[test]
    fn array_takes_first_element_or_zero() {
        let arr = RawValue::Array(vec![RawValue::Float(3.5), RawValue::Float(9.0)]);
        assert_eq!(arr.as_f64(), 3.5);
        assert_eq!(RawValue::Array(Vec::new()).as_f64(), 0.0);
    }

    #[test]
    fn kind_sizes_match_sdk_layout() {
        assert_eq!(VarKind::Int8.size(), 1);
        assert_eq!(VarKind::Int32.size(), 4);
        assert_eq!(VarKind::BitField.size(), 4);
        assert_eq!(VarKind::Float32.size(), 4);
        assert_eq!(VarKind::Float64.size(), 8);
    }

    #[test]
    fn json_scalars_deserialize() {
        let value: RawValue = serde_json::from_str("93.5").unwrap();
        assert_eq!(value.as_f64(), 93.5);

        let value: RawValue = serde_json::from_str("true").unwrap();
        assert!(value.as_bool());

        let value: RawValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, RawValue::Missing);

        let value: RawValue = serde_json::from_str("[2, 3]").unwrap();
        assert_eq!(value.as_i32(), 2);
    }

    proptest! {
        #[test]
        fn decoding_never_panics_for_any_buffer(
            kind_idx in 0usize..5,
            bytes in prop::collection::vec(any::<u8>(), 0..16),
        ) {
            let kind = [VarKind::Int8, VarKind::Int32, VarKind::BitField, VarKind::Float32, VarKind::Float64][kind_idx];
            let value = RawValue::Buffer { kind, bytes: bytes.clone() };

            let _ = value.as_f64();
            let _ = value.as_bool();
            let _ = value.as_i32();
            let _ = value.as_u32();

            // Truncated buffers must behave exactly like absent values
            if bytes.len() < kind.size() {
                prop_assert_eq!(value.as_f64(), 0.0);
            }
        }

        #[test]
        fn roundtrip_f64_buffers(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let value = RawValue::Buffer { kind: VarKind::Float64, bytes: v.to_le_bytes().to_vec() };
            prop_assert_eq!(value.as_f64(), v);
        }
    }
}
