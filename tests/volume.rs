use nifti_canon::header::{Nifti1Header, Nifti2Header};
use nifti_canon::typedef::{ChannelLayout, ElementKind};
use nifti_canon::{Endianness, NiftiError, NiftiObject, NiftiType, TypedBuffer, VoxelArray};
use num_complex::Complex64;
use pretty_assertions::assert_eq;
use rgb::RGBA8;

mod util;

use util::{f32_bytes, nifti1_bytes, nifti2_bytes};

fn nifti1_file(datatype: NiftiType, dim: [u16; 8], endianness: Endianness, data: &[u8]) -> Vec<u8> {
    let header = Nifti1Header {
        datatype: datatype as i16,
        bitpix: (datatype.size_of() * 8) as i16,
        dim,
        endianness,
        ..Default::default()
    };
    let mut bytes = nifti1_bytes(&header);
    bytes.extend_from_slice(data);
    bytes
}

#[test]
fn complex64_of_ten_elements() {
    let values: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
    let bytes = nifti1_file(
        NiftiType::Complex64,
        [1, 10, 1, 1, 1, 1, 1, 1],
        Endianness::Big,
        &f32_bytes(&values, Endianness::Big),
    );
    let object = NiftiObject::from_reader(bytes.as_slice()).unwrap();
    match object.volume() {
        VoxelArray::Complex { shape, real, imag } => {
            assert_eq!(shape, &vec![10]);
            assert_eq!(real.len(), 10);
            assert_eq!(imag.len(), 10);
            assert_eq!(
                real,
                &TypedBuffer::Float32((0..10).map(|i| i as f32).collect())
            );
            assert_eq!(
                imag,
                &TypedBuffer::Float32((0..10).map(|i| i as f32 + 0.5).collect())
            );
        }
        other => panic!("expected a complex array, got {:?}", other),
    }
    let values = object.volume().complex_values().unwrap();
    assert_eq!(values[9], Complex64::new(9., 9.5));
}

#[test]
fn complex128_is_a_double_pair() {
    let values = [1f64, 2., 3., 4.];
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let bytes = nifti1_file(
        NiftiType::Complex128,
        [1, 2, 1, 1, 1, 1, 1, 1],
        Endianness::Little,
        &data,
    );
    let object = NiftiObject::from_reader(bytes.as_slice()).unwrap();
    assert_eq!(
        object.volume(),
        &VoxelArray::MultiChannel {
            shape: vec![2],
            layout: ChannelLayout::DoublePair,
            channels: vec![
                TypedBuffer::Float64(vec![1., 3.]),
                TypedBuffer::Float64(vec![2., 4.]),
            ],
        }
    );
    assert!(object.volume().complex_values().is_none());
}

#[test]
fn rgba_channels() {
    let data = [10, 20, 30, 255, 11, 21, 31, 128, 12, 22, 32, 0];
    let bytes = nifti1_file(
        NiftiType::Rgba32,
        [2, 3, 1, 1, 1, 1, 1, 1],
        Endianness::Little,
        &data,
    );
    let object = NiftiObject::from_reader(bytes.as_slice()).unwrap();
    let volume = object.volume();
    assert_eq!(volume.shape(), &[3, 1]);
    assert_eq!(volume.channel_count(), 4);
    assert_eq!(volume.element_kind(), ElementKind::Uint8);
    assert_eq!(
        volume.rgba_pixels().unwrap(),
        vec![
            RGBA8::new(10, 20, 30, 255),
            RGBA8::new(11, 21, 31, 128),
            RGBA8::new(12, 22, 32, 0),
        ]
    );
}

#[test]
fn nifti2_volume() {
    let header = Nifti2Header {
        datatype: NiftiType::Int64 as i16,
        bitpix: 64,
        dim: [2, 2, 2, 1, 1, 1, 1, 1],
        endianness: Endianness::Big,
        ..Default::default()
    };
    let mut bytes = nifti2_bytes(&header);
    for v in &[-1i64, 2, -3, i64::max_value()] {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    let object = NiftiObject::from_reader(bytes.as_slice()).unwrap();
    assert_eq!(
        object.into_volume(),
        VoxelArray::Scalar {
            shape: vec![2, 2],
            data: TypedBuffer::Int64(vec![-1, 2, -3, i64::max_value()]),
        }
    );
}

#[test]
fn unsupported_datatype_code() {
    let header = Nifti1Header {
        datatype: 99,
        dim: [1, 4, 1, 1, 1, 1, 1, 1],
        ..Default::default()
    };
    let mut bytes = nifti1_bytes(&header);
    bytes.extend_from_slice(&[0; 4]);
    match NiftiObject::from_reader(bytes.as_slice()) {
        Err(NiftiError::UnsupportedDataType(code)) => assert_eq!(code, 99),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn float128_is_unsupported() {
    let bytes = nifti1_file(
        NiftiType::Float128,
        [1, 1, 1, 1, 1, 1, 1, 1],
        Endianness::Little,
        &[0; 16],
    );
    assert!(matches!(
        NiftiObject::from_reader(bytes.as_slice()),
        Err(NiftiError::UnsupportedDataType(1536))
    ));
}

#[test]
fn short_and_long_buffers() {
    let short = nifti1_file(
        NiftiType::Float32,
        [3, 2, 2, 2, 1, 1, 1, 1],
        Endianness::Little,
        &[0; 31],
    );
    match NiftiObject::from_reader(short.as_slice()) {
        Err(NiftiError::MalformedBuffer { expected, got }) => {
            assert_eq!(expected, 32);
            assert_eq!(got, 31);
        }
        other => panic!("unexpected {:?}", other),
    }
    let long = nifti1_file(
        NiftiType::Float32,
        [3, 2, 2, 2, 1, 1, 1, 1],
        Endianness::Little,
        &[0; 36],
    );
    assert!(matches!(
        NiftiObject::from_reader(long.as_slice()),
        Err(NiftiError::MalformedBuffer {
            expected: 32,
            got: 36
        })
    ));
}

#[test]
fn invalid_dim() {
    let bytes = nifti1_file(
        NiftiType::Uint8,
        [0, 4, 1, 1, 1, 1, 1, 1],
        Endianness::Little,
        &[0; 4],
    );
    assert!(matches!(
        NiftiObject::from_reader(bytes.as_slice()),
        Err(NiftiError::InconsistentDim(0, 0))
    ));
}

#[test]
fn padding_before_voxels_is_skipped() {
    let header = Nifti1Header {
        datatype: NiftiType::Uint8 as i16,
        bitpix: 8,
        dim: [1, 3, 1, 1, 1, 1, 1, 1],
        vox_offset: 360.,
        ..Default::default()
    };
    let mut bytes = nifti1_bytes(&header);
    bytes.extend_from_slice(&[0xEE; 8]);
    bytes.extend_from_slice(&[7, 8, 9]);
    let object = NiftiObject::from_reader(bytes.as_slice()).unwrap();
    assert_eq!(
        object.volume(),
        &VoxelArray::Scalar {
            shape: vec![3],
            data: TypedBuffer::Uint8(vec![7, 8, 9]),
        }
    );
}

#[test]
fn header_only_stream_has_no_volume() {
    let header = Nifti1Header {
        magic: *b"ni1\0",
        ..Default::default()
    };
    let bytes = nifti1_bytes(&header);
    assert!(matches!(
        NiftiObject::from_reader(bytes.as_slice()),
        Err(NiftiError::NoVolumeData)
    ));
}

#[cfg(feature = "ndarray_volumes")]
mod ndarray_volumes {
    use super::nifti1_file;
    use nifti_canon::{Endianness, IntoNdArray, NiftiObject, NiftiType};
    use pretty_assertions::assert_eq;

    #[test]
    fn fortran_order() {
        let data: Vec<u8> = (0u16..24).flat_map(|v| v.to_le_bytes()).collect();
        let bytes = nifti1_file(
            NiftiType::Uint16,
            [3, 2, 3, 4, 1, 1, 1, 1],
            Endianness::Little,
            &data,
        );
        let volume = NiftiObject::from_reader(bytes.as_slice())
            .unwrap()
            .into_volume();
        let array = volume.into_ndarray::<f32>().unwrap();
        assert_eq!(array.shape(), &[2, 3, 4]);
        assert_eq!(array[[1, 0, 0]], 1.);
        assert_eq!(array[[0, 1, 0]], 2.);
        assert_eq!(array[[0, 0, 1]], 6.);
        assert_eq!(array[[1, 2, 3]], 23.);
    }
}
