//! The canonical attribute list of a volumetric file.
//!
//! Each preserved header field becomes one named, typed attribute, in the
//! field order of the header's own layout. Fields dropped by NIfTI-2 are
//! never emitted, bit-packed fields are emitted already split, and both
//! affines are always present.

use crate::affine::Affine4;
use crate::header::{Nifti1Header, Nifti2Header, NiftiHeader};
use crate::util::trim_nul_str;
use crate::volume::VoxelArray;
use std::borrow::Cow;
use std::fmt;

/// The value of a canonical attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// An integer scalar.
    Int(i64),
    /// A floating point scalar.
    Float(f64),
    /// A text field, up to its first NUL byte.
    Text(String),
    /// A fixed-size integer vector.
    IntVector(Vec<i64>),
    /// A fixed-size floating point vector.
    FloatVector(Vec<f64>),
    /// A 4x4 matrix.
    Matrix(Affine4),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Text(v) => write!(f, "{:?}", v),
            AttributeValue::IntVector(v) => write!(f, "{:?}", v),
            AttributeValue::FloatVector(v) => write!(f, "{:?}", v),
            AttributeValue::Matrix(m) => {
                let rows: Vec<_> = m
                    .row_iter()
                    .map(|r| format!("{:?}", r.iter().collect::<Vec<_>>()))
                    .collect();
                write!(f, "[{}]", rows.join(", "))
            }
        }
    }
}

/// A named, typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalAttribute {
    /// Attribute name.
    pub name: Cow<'static, str>,
    /// Attribute value.
    pub value: AttributeValue,
}

/// The full canonical form of one volumetric file: its attributes and its
/// voxel data.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalVolume {
    /// Attributes, in header layout order.
    pub attributes: Vec<CanonicalAttribute>,
    /// Voxel data, in declared axis order.
    pub data: VoxelArray,
}

impl CanonicalVolume {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        find(&self.attributes, name)
    }
}

/// Look up an attribute by name in a list.
pub fn find<'a>(attributes: &'a [CanonicalAttribute], name: &str) -> Option<&'a AttributeValue> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| &a.value)
}

#[derive(Default)]
struct AttributeList(Vec<CanonicalAttribute>);

impl AttributeList {
    fn push(&mut self, name: &'static str, value: AttributeValue) {
        self.0.push(CanonicalAttribute {
            name: Cow::Borrowed(name),
            value,
        });
    }

    fn int<T: Into<i64>>(&mut self, name: &'static str, value: T) {
        self.push(name, AttributeValue::Int(value.into()));
    }

    fn float<T: Into<f64>>(&mut self, name: &'static str, value: T) {
        self.push(name, AttributeValue::Float(value.into()));
    }

    fn text(&mut self, name: &'static str, raw: &[u8]) {
        self.push(name, AttributeValue::Text(trim_nul_str(raw).into_owned()));
    }

    fn ints<T: Copy + Into<i64>>(&mut self, name: &'static str, values: &[T]) {
        let values = values.iter().map(|v| (*v).into()).collect();
        self.push(name, AttributeValue::IntVector(values));
    }

    fn floats<T: Copy + Into<f64>>(&mut self, name: &'static str, values: &[T]) {
        let values = values.iter().map(|v| (*v).into()).collect();
        self.push(name, AttributeValue::FloatVector(values));
    }

    fn matrix(&mut self, name: &'static str, value: Affine4) {
        self.push(name, AttributeValue::Matrix(value));
    }
}

/// Build the ordered attribute list of a header.
pub fn canonical_attributes(header: &NiftiHeader) -> Vec<CanonicalAttribute> {
    let mut list = AttributeList::default();
    match header {
        NiftiHeader::Nifti1(h) => nifti1_attributes(h, &mut list),
        NiftiHeader::Nifti2(h) => nifti2_attributes(h, &mut list),
    }
    list.0
}

fn nifti1_attributes(h: &Nifti1Header, list: &mut AttributeList) {
    list.int("nifti_version", 1);
    list.int("sizeof_hdr", 348);
    list.int("freq_dim", h.dim_info.freq_dim);
    list.int("phase_dim", h.dim_info.phase_dim);
    list.int("slice_dim", h.dim_info.slice_dim);
    list.ints("dim", &h.dim);
    list.float("intent_p1", h.intent_p1);
    list.float("intent_p2", h.intent_p2);
    list.float("intent_p3", h.intent_p3);
    list.int("intent_code", h.intent_code);
    list.int("datatype", h.datatype);
    list.int("bitpix", h.bitpix);
    list.int("slice_start", h.slice_start);
    list.floats("pixdim", &h.pixdim);
    list.float("vox_offset", h.vox_offset);
    list.float("scl_slope", h.scl_slope);
    list.float("scl_inter", h.scl_inter);
    list.int("slice_end", h.slice_end);
    list.int("slice_code", h.slice_code);
    list.int("spatial_units", h.xyzt_units.spatial_units);
    list.int("temporal_units", h.xyzt_units.temporal_units);
    list.float("cal_max", h.cal_max);
    list.float("cal_min", h.cal_min);
    list.float("slice_duration", h.slice_duration);
    list.float("toffset", h.toffset);
    list.text("descrip", &h.descrip);
    list.text("aux_file", &h.aux_file);
    list.int("qform_code", h.qform_code);
    list.int("sform_code", h.sform_code);
    list.float("quatern_b", h.quatern_b);
    list.float("quatern_c", h.quatern_c);
    list.float("quatern_d", h.quatern_d);
    list.float("qoffset_x", h.quatern_x);
    list.float("qoffset_y", h.quatern_y);
    list.float("qoffset_z", h.quatern_z);
    list.floats("srow_x", &h.srow_x);
    list.floats("srow_y", &h.srow_y);
    list.floats("srow_z", &h.srow_z);
    list.text("intent_name", &h.intent_name);
    list.text("magic", &h.magic);
    list.matrix("qform_affine", h.qform_affine());
    list.matrix("sform_affine", h.sform_affine());
}

fn nifti2_attributes(h: &Nifti2Header, list: &mut AttributeList) {
    list.int("nifti_version", 2);
    list.int("sizeof_hdr", 540);
    list.text("magic", &h.magic);
    list.int("datatype", h.datatype);
    list.int("bitpix", h.bitpix);
    list.ints("dim", &h.dim);
    list.float("intent_p1", h.intent_p1);
    list.float("intent_p2", h.intent_p2);
    list.float("intent_p3", h.intent_p3);
    list.floats("pixdim", &h.pixdim);
    list.int("vox_offset", h.vox_offset);
    list.float("scl_slope", h.scl_slope);
    list.float("scl_inter", h.scl_inter);
    list.float("cal_max", h.cal_max);
    list.float("cal_min", h.cal_min);
    list.float("slice_duration", h.slice_duration);
    list.float("toffset", h.toffset);
    list.int("slice_start", h.slice_start);
    list.int("slice_end", h.slice_end);
    list.text("descrip", &h.descrip);
    list.text("aux_file", &h.aux_file);
    list.int("qform_code", h.qform_code);
    list.int("sform_code", h.sform_code);
    list.float("quatern_b", h.quatern_b);
    list.float("quatern_c", h.quatern_c);
    list.float("quatern_d", h.quatern_d);
    list.float("qoffset_x", h.quatern_x);
    list.float("qoffset_y", h.quatern_y);
    list.float("qoffset_z", h.quatern_z);
    list.floats("srow_x", &h.srow_x);
    list.floats("srow_y", &h.srow_y);
    list.floats("srow_z", &h.srow_z);
    list.int("slice_code", h.slice_code);
    list.int("x_units", h.xyzt_units.x_units);
    list.int("y_units", h.xyzt_units.y_units);
    list.int("z_units", h.xyzt_units.z_units);
    list.int("t_units", h.xyzt_units.t_units);
    list.int("intent_code", h.intent_code);
    list.text("intent_name", &h.intent_name);
    list.int("freq_dim", h.dim_info.freq_dim);
    list.int("phase_dim", h.dim_info.phase_dim);
    list.int("slice_dim", h.dim_info.slice_dim);
    list.matrix("qform_affine", h.qform_affine());
    list.matrix("sform_affine", h.sform_affine());
}
