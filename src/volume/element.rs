//! This module defines the data element API: typed buffers of primitive
//! elements and the decoding of raw bytes into them.
use crate::error::{NiftiError, Result};
use crate::typedef::ElementKind;
use crate::util::Endianness;
use byteordered::ByteOrdered;
use bytemuck::Pod;
use num_traits::AsPrimitive;
use std::io::{self, Read};

/// A flat buffer of primitive elements of one kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedBuffer {
    /// `u8` elements
    Uint8(Vec<u8>),
    /// `i8` elements
    Int8(Vec<i8>),
    /// `u16` elements
    Uint16(Vec<u16>),
    /// `i16` elements
    Int16(Vec<i16>),
    /// `u32` elements
    Uint32(Vec<u32>),
    /// `i32` elements
    Int32(Vec<i32>),
    /// `u64` elements
    Uint64(Vec<u64>),
    /// `i64` elements
    Int64(Vec<i64>),
    /// `f32` elements
    Float32(Vec<f32>),
    /// `f64` elements
    Float64(Vec<f64>),
}

macro_rules! dispatch {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            TypedBuffer::Uint8($values) => $body,
            TypedBuffer::Int8($values) => $body,
            TypedBuffer::Uint16($values) => $body,
            TypedBuffer::Int16($values) => $body,
            TypedBuffer::Uint32($values) => $body,
            TypedBuffer::Int32($values) => $body,
            TypedBuffer::Uint64($values) => $body,
            TypedBuffer::Int64($values) => $body,
            TypedBuffer::Float32($values) => $body,
            TypedBuffer::Float64($values) => $body,
        }
    };
}

impl TypedBuffer {
    /// Decode a byte buffer holding elements of the given kind in the
    /// given byte order.
    ///
    /// # Errors
    ///
    /// - `NiftiError::MalformedBuffer` if the length of `bytes` is not a
    ///   multiple of the element width.
    pub fn decode(kind: ElementKind, bytes: &[u8], endianness: Endianness) -> Result<Self> {
        let width = kind.size_of();
        if bytes.len() % width != 0 {
            return Err(NiftiError::MalformedBuffer {
                expected: bytes.len() / width * width,
                got: bytes.len(),
            });
        }
        let buffer = match kind {
            ElementKind::Uint8 => TypedBuffer::Uint8(bytes.to_vec()),
            ElementKind::Int8 => TypedBuffer::Int8(bytemuck::cast_slice(bytes).to_vec()),
            ElementKind::Uint16 => TypedBuffer::Uint16(read_all(bytes, endianness)?),
            ElementKind::Int16 => TypedBuffer::Int16(read_all(bytes, endianness)?),
            ElementKind::Uint32 => TypedBuffer::Uint32(read_all(bytes, endianness)?),
            ElementKind::Int32 => TypedBuffer::Int32(read_all(bytes, endianness)?),
            ElementKind::Uint64 => TypedBuffer::Uint64(read_all(bytes, endianness)?),
            ElementKind::Int64 => TypedBuffer::Int64(read_all(bytes, endianness)?),
            ElementKind::Float32 => TypedBuffer::Float32(read_all(bytes, endianness)?),
            ElementKind::Float64 => TypedBuffer::Float64(read_all(bytes, endianness)?),
        };
        Ok(buffer)
    }

    /// The kind of element held.
    pub fn kind(&self) -> ElementKind {
        match self {
            TypedBuffer::Uint8(_) => ElementKind::Uint8,
            TypedBuffer::Int8(_) => ElementKind::Int8,
            TypedBuffer::Uint16(_) => ElementKind::Uint16,
            TypedBuffer::Int16(_) => ElementKind::Int16,
            TypedBuffer::Uint32(_) => ElementKind::Uint32,
            TypedBuffer::Int32(_) => ElementKind::Int32,
            TypedBuffer::Uint64(_) => ElementKind::Uint64,
            TypedBuffer::Int64(_) => ElementKind::Int64,
            TypedBuffer::Float32(_) => ElementKind::Float32,
            TypedBuffer::Float64(_) => ElementKind::Float64,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert every element to `T`, as with an `as` cast.
    pub fn cast<T: DataElement>(self) -> Vec<T> {
        T::from_buffer(self)
    }

    /// Split interleaved elements into `channels` buffers, the channel
    /// index being the fastest varying one.
    pub(crate) fn deinterleave(self, channels: usize) -> Vec<TypedBuffer> {
        dispatch!(self, v => split_channels(v, channels)
            .into_iter()
            .map(DataElement::wrap)
            .collect())
    }

    /// Split interleaved pairs into two buffers.
    pub(crate) fn split_pairs(self) -> (TypedBuffer, TypedBuffer) {
        dispatch!(self, v => {
            let (first, second): (Vec<_>, Vec<_>) =
                v.chunks_exact(2).map(|c| (c[0], c[1])).unzip();
            (DataElement::wrap(first), DataElement::wrap(second))
        })
    }
}

/// Stack same-kind, same-length buffers along a new fastest-varying axis,
/// so that element `i` of buffer `t` lands at `i * buffers.len() + t`.
///
/// # Errors
///
/// - `NiftiError::InconsistentTimeSeries` with the index of the first
///   buffer whose kind or length differs from the first one.
pub(crate) fn interleave(buffers: Vec<TypedBuffer>) -> Result<TypedBuffer> {
    let kind = match buffers.first() {
        Some(b) => b.kind(),
        None => return Err(NiftiError::InconsistentTimeSeries(0)),
    };
    match kind {
        ElementKind::Uint8 => interleave_as::<u8>(buffers),
        ElementKind::Int8 => interleave_as::<i8>(buffers),
        ElementKind::Uint16 => interleave_as::<u16>(buffers),
        ElementKind::Int16 => interleave_as::<i16>(buffers),
        ElementKind::Uint32 => interleave_as::<u32>(buffers),
        ElementKind::Int32 => interleave_as::<i32>(buffers),
        ElementKind::Uint64 => interleave_as::<u64>(buffers),
        ElementKind::Int64 => interleave_as::<i64>(buffers),
        ElementKind::Float32 => interleave_as::<f32>(buffers),
        ElementKind::Float64 => interleave_as::<f64>(buffers),
    }
}

fn interleave_as<T: DataElement>(buffers: Vec<TypedBuffer>) -> Result<TypedBuffer> {
    let parts = buffers
        .into_iter()
        .enumerate()
        .map(|(i, b)| T::unwrap_buffer(b).ok_or(NiftiError::InconsistentTimeSeries(i)))
        .collect::<Result<Vec<Vec<T>>>>()?;
    let len = parts[0].len();
    if let Some(i) = parts.iter().position(|p| p.len() != len) {
        return Err(NiftiError::InconsistentTimeSeries(i));
    }
    let mut out = Vec::with_capacity(len * parts.len());
    for k in 0..len {
        out.extend(parts.iter().map(|p| p[k]));
    }
    Ok(T::wrap(out))
}

fn split_channels<T: Copy>(values: Vec<T>, channels: usize) -> Vec<Vec<T>> {
    (0..channels)
        .map(|c| values.iter().skip(c).step_by(channels).copied().collect())
        .collect()
}

fn read_all<T: DataElement>(bytes: &[u8], endianness: Endianness) -> io::Result<Vec<T>> {
    let n = bytes.len() / T::KIND.size_of();
    let mut src = ByteOrdered::runtime(bytes, endianness);
    (0..n).map(|_| T::from_raw(&mut src)).collect()
}

fn cast_buffer<O>(buffer: TypedBuffer) -> Vec<O>
where
    O: 'static + Copy,
    u8: AsPrimitive<O>,
    i8: AsPrimitive<O>,
    u16: AsPrimitive<O>,
    i16: AsPrimitive<O>,
    u32: AsPrimitive<O>,
    i32: AsPrimitive<O>,
    u64: AsPrimitive<O>,
    i64: AsPrimitive<O>,
    f32: AsPrimitive<O>,
    f64: AsPrimitive<O>,
{
    dispatch!(buffer, v => v.into_iter().map(|x| x.as_()).collect())
}

/// Trait type for characterizing a data element, implemented for the
/// primitive numeric types which are used by the crate to represent
/// voxel and vertex values.
pub trait DataElement: 'static + Sized + Copy + Pod {
    /// The element kind mapped to the type.
    const KIND: ElementKind;

    /// Read a single element from the given byte source.
    fn from_raw<R: Read>(src: &mut ByteOrdered<R, Endianness>) -> io::Result<Self>;

    /// Wrap a vector of elements into a typed buffer.
    fn wrap(values: Vec<Self>) -> TypedBuffer;

    /// Take the vector out of a buffer of this exact kind.
    fn unwrap_buffer(buffer: TypedBuffer) -> Option<Vec<Self>>;

    /// Convert a buffer of any kind into elements of this type.
    fn from_buffer(buffer: TypedBuffer) -> Vec<Self>;
}

macro_rules! impl_data_element {
    ($t:ty, $variant:ident, $read:ident) => {
        impl DataElement for $t {
            const KIND: ElementKind = ElementKind::$variant;

            fn from_raw<R: Read>(src: &mut ByteOrdered<R, Endianness>) -> io::Result<Self> {
                src.$read()
            }

            fn wrap(values: Vec<Self>) -> TypedBuffer {
                TypedBuffer::$variant(values)
            }

            fn unwrap_buffer(buffer: TypedBuffer) -> Option<Vec<Self>> {
                match buffer {
                    TypedBuffer::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_buffer(buffer: TypedBuffer) -> Vec<Self> {
                cast_buffer::<$t>(buffer)
            }
        }
    };
}

impl_data_element!(u8, Uint8, read_u8);
impl_data_element!(i8, Int8, read_i8);
impl_data_element!(u16, Uint16, read_u16);
impl_data_element!(i16, Int16, read_i16);
impl_data_element!(u32, Uint32, read_u32);
impl_data_element!(i32, Int32, read_i32);
impl_data_element!(u64, Uint64, read_u64);
impl_data_element!(i64, Int64, read_i64);
impl_data_element!(f32, Float32, read_f32);
impl_data_element!(f64, Float64, read_f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_big_endian_i16() {
        let bytes = [0x00, 0x01, 0xff, 0xfe];
        let buffer = TypedBuffer::decode(ElementKind::Int16, &bytes, Endianness::Big).unwrap();
        assert_eq!(buffer, TypedBuffer::Int16(vec![1, -2]));
        let buffer = TypedBuffer::decode(ElementKind::Int16, &bytes, Endianness::Little).unwrap();
        assert_eq!(buffer, TypedBuffer::Int16(vec![256, -257]));
    }

    #[test]
    fn decode_rejects_partial_element() {
        let bytes = [0u8; 7];
        assert!(matches!(
            TypedBuffer::decode(ElementKind::Float32, &bytes, Endianness::Little),
            Err(NiftiError::MalformedBuffer { expected: 4, got: 7 })
        ));
    }

    #[test]
    fn deinterleave_channels() {
        let buffer = TypedBuffer::Uint8(vec![1, 2, 3, 4, 5, 6]);
        let channels = buffer.deinterleave(3);
        assert_eq!(
            channels,
            vec![
                TypedBuffer::Uint8(vec![1, 4]),
                TypedBuffer::Uint8(vec![2, 5]),
                TypedBuffer::Uint8(vec![3, 6]),
            ]
        );
    }

    #[test]
    fn interleave_time_points() {
        let stacked = interleave(vec![
            TypedBuffer::Float32(vec![1., 2.]),
            TypedBuffer::Float32(vec![10., 20.]),
            TypedBuffer::Float32(vec![100., 200.]),
        ])
        .unwrap();
        assert_eq!(
            stacked,
            TypedBuffer::Float32(vec![1., 10., 100., 2., 20., 200.])
        );

        let mixed = interleave(vec![
            TypedBuffer::Float32(vec![1., 2.]),
            TypedBuffer::Int32(vec![1, 2]),
        ]);
        assert!(matches!(mixed, Err(NiftiError::InconsistentTimeSeries(1))));
    }

    #[test]
    fn cast_to_wider_type() {
        let buffer = TypedBuffer::Int8(vec![-1, 2]);
        assert_eq!(buffer.cast::<f64>(), vec![-1., 2.]);
    }
}
