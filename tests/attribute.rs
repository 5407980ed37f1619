use nifti_canon::attribute::find;
use nifti_canon::bitfield::{DimInfo, Nifti1Units};
use nifti_canon::header::{Nifti1Header, Nifti2Header};
use nifti_canon::{convert_volume, AttributeValue, Endianness, MemorySink, NiftiType};
use pretty_assertions::assert_eq;

mod util;

use util::{descrip, nifti1_bytes, nifti2_bytes, text};

#[test]
fn nifti1_volume_attributes() {
    let header = Nifti1Header {
        dim_info: DimInfo::from_raw(0b00_10_01),
        dim: [2, 2, 2, 1, 1, 1, 1, 1],
        datatype: NiftiType::Uint8 as i16,
        bitpix: 8,
        pixdim: [1., 0.5, 0.5, 1., 1., 1., 1., 1.],
        xyzt_units: Nifti1Units::from_raw(0x09),
        descrip: descrip("canonical"),
        aux_file: text("aux.txt"),
        intent_name: text("shape"),
        quatern_x: 1.,
        srow_x: [1., 0., 0., 4.],
        endianness: Endianness::Big,
        ..Default::default()
    };
    let mut bytes = nifti1_bytes(&header);
    bytes.extend_from_slice(&[1, 2, 3, 4]);

    let mut sink = MemorySink::default();
    convert_volume(bytes.as_slice(), &mut sink).unwrap();
    assert_eq!(sink.volumes.len(), 1);
    let volume = &sink.volumes[0];

    let get = |name: &str| volume.attribute(name).cloned();
    assert_eq!(get("nifti_version"), Some(AttributeValue::Int(1)));
    assert_eq!(get("freq_dim"), Some(AttributeValue::Int(1)));
    assert_eq!(get("phase_dim"), Some(AttributeValue::Int(2)));
    assert_eq!(get("slice_dim"), Some(AttributeValue::Int(2)));
    assert_eq!(get("spatial_units"), Some(AttributeValue::Int(1)));
    assert_eq!(get("temporal_units"), Some(AttributeValue::Int(8)));
    assert_eq!(
        get("dim"),
        Some(AttributeValue::IntVector(vec![2, 2, 2, 1, 1, 1, 1, 1]))
    );
    assert_eq!(
        get("pixdim"),
        Some(AttributeValue::FloatVector(vec![1., 0.5, 0.5, 1., 1., 1., 1., 1.]))
    );
    assert_eq!(get("descrip"), Some(AttributeValue::Text("canonical".into())));
    assert_eq!(get("aux_file"), Some(AttributeValue::Text("aux.txt".into())));
    assert_eq!(get("intent_name"), Some(AttributeValue::Text("shape".into())));
    assert_eq!(get("qoffset_x"), Some(AttributeValue::Float(1.)));
    assert_eq!(
        get("srow_x"),
        Some(AttributeValue::FloatVector(vec![1., 0., 0., 4.]))
    );
    for legacy in &[
        "data_type",
        "db_name",
        "extents",
        "session_error",
        "regular",
        "glmax",
        "glmin",
    ] {
        assert_eq!(get(*legacy), None);
    }
    match get("qform_affine") {
        Some(AttributeValue::Matrix(m)) => {
            assert_eq!(m[(0, 0)], 0.5);
            assert_eq!(m[(0, 3)], 1.);
        }
        other => panic!("unexpected {:?}", other),
    }
    match get("sform_affine") {
        Some(AttributeValue::Matrix(m)) => {
            assert_eq!(m[(0, 3)], 4.);
            assert_eq!(m[(3, 3)], 1.);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(volume.data.shape(), &[2, 2]);
}

#[test]
fn nifti2_volume_attributes() {
    let header = Nifti2Header {
        dim: [1, 3, 1, 1, 1, 1, 1, 1],
        datatype: NiftiType::Int8 as i16,
        bitpix: 8,
        vox_offset: 544,
        ..Default::default()
    };
    let mut bytes = nifti2_bytes(&header);
    bytes.extend_from_slice(&[0xFF, 0, 1]);

    let mut sink = MemorySink::default();
    convert_volume(bytes.as_slice(), &mut sink).unwrap();
    let volume = &sink.volumes[0];
    assert_eq!(
        find(&volume.attributes, "nifti_version"),
        Some(&AttributeValue::Int(2))
    );
    assert_eq!(
        find(&volume.attributes, "vox_offset"),
        Some(&AttributeValue::Int(544))
    );
    assert_eq!(
        find(&volume.attributes, "magic"),
        Some(&AttributeValue::Text("n+2".into()))
    );
    for name in &["x_units", "y_units", "z_units", "t_units"] {
        assert!(find(&volume.attributes, name).is_some());
    }
    assert!(find(&volume.attributes, "spatial_units").is_none());
    assert_eq!(
        volume.data.clone(),
        nifti_canon::VoxelArray::Scalar {
            shape: vec![3],
            data: nifti_canon::TypedBuffer::Int8(vec![-1, 0, 1]),
        }
    );
}

#[test]
fn failed_decoding_leaves_sink_empty() {
    let header = Nifti1Header {
        datatype: 99,
        dim: [1, 1, 1, 1, 1, 1, 1, 1],
        ..Default::default()
    };
    let mut bytes = nifti1_bytes(&header);
    bytes.push(0);
    let mut sink = MemorySink::default();
    assert!(convert_volume(bytes.as_slice(), &mut sink).is_err());
    assert!(sink.volumes.is_empty());
}
