//! Canonical records of a GIFTI document.

use crate::affine::Affine4;
use crate::attribute::{AttributeValue, CanonicalAttribute};
use crate::error::{NiftiError, Result};
use crate::gifti::affine::{resolve_affine, DEFAULT_AFFINE_PRIORITY};
use crate::gifti::intent::{resolve_intent, MeshGroup, ResolvedIntent};
use crate::gifti::{DataArray, GiftiDocument};
use crate::typedef::XForm;
use crate::volume::element::interleave;
use crate::volume::TypedBuffer;
use log::{debug, trace};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Metadata keys copied into canonical records by default.
pub const DEFAULT_METADATA_KEYS: [&str; 15] = [
    "AnatomicalStructurePrimary",
    "AnatomicalStructureSecondary",
    "Date",
    "Description",
    "GeometricType",
    "Intent_p1",
    "Intent_p2",
    "Intent_p3",
    "Name",
    "SubjectID",
    "SurfaceID",
    "TimeStep",
    "TopologicalType",
    "UniqueID",
    "UserName",
];

/// Options of the mesh canonicalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOptions {
    /// Spaces searched for when resolving an affine, best first.
    pub affine_priority: Vec<XForm>,
    /// Metadata keys to keep. All others are dropped.
    pub metadata_keys: Vec<String>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            affine_priority: DEFAULT_AFFINE_PRIORITY.to_vec(),
            metadata_keys: DEFAULT_METADATA_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The canonical form of one logical data array.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMeshRecord {
    /// Group the record is filed under.
    pub group: MeshGroup,
    /// Semantic tag, e.g. `"points"`.
    pub intent: String,
    /// Array extents. Time series gain a trailing time axis.
    pub shape: Vec<usize>,
    /// Elements, in row major order.
    pub data: TypedBuffer,
    /// The resolved affine.
    pub affine: Affine4,
    /// `(key, name)` pairs of the label table, for label arrays.
    pub labels: Option<Vec<(i32, String)>>,
    /// Metadata that passed the whitelist.
    pub metadata: BTreeMap<String, String>,
}

impl CanonicalMeshRecord {
    /// The attribute list of the record: intent, group, affine, then the
    /// metadata entries in key order.
    pub fn attributes(&self) -> Vec<CanonicalAttribute> {
        let mut attributes = vec![
            CanonicalAttribute {
                name: Cow::Borrowed("intent"),
                value: AttributeValue::Text(self.intent.clone()),
            },
            CanonicalAttribute {
                name: Cow::Borrowed("group"),
                value: AttributeValue::Text(self.group.as_str().to_string()),
            },
            CanonicalAttribute {
                name: Cow::Borrowed("affine"),
                value: AttributeValue::Matrix(self.affine),
            },
        ];
        attributes.extend(self.metadata.iter().map(|(k, v)| CanonicalAttribute {
            name: Cow::Owned(k.clone()),
            value: AttributeValue::Text(v.clone()),
        }));
        attributes
    }
}

/// Turn every logical data array of a document into a canonical record.
///
/// Every intent is resolved first. When the document holds more than one
/// array and any of them is a time series, all arrays are taken as
/// consecutive time points, in document order, and stacked into a single
/// record. Otherwise each array yields its own record.
///
/// # Errors
///
/// - `NiftiError::UnknownIntent`, `NiftiError::UnknownElementType` or
///   `NiftiError::MalformedBuffer` for the first array that cannot be
///   decoded. No records are returned in that case.
/// - `NiftiError::InconsistentTimeSeries` if a time point differs from the
///   first one in shape or element type.
pub fn canonicalize(
    document: &GiftiDocument,
    options: &MeshOptions,
) -> Result<Vec<CanonicalMeshRecord>> {
    let arrays = &document.data_arrays;
    let mut intents = arrays
        .iter()
        .map(|a| resolve_intent(&a.intent))
        .collect::<Result<Vec<_>>>()?;
    if arrays.len() > 1 {
        if let Some(i) = intents.iter().position(|r| r.is_time_series()) {
            debug!("stacking {} time points", arrays.len());
            let intent = intents.swap_remove(i);
            return Ok(vec![time_series_record(arrays, intent, options)?]);
        }
    }
    arrays
        .iter()
        .zip(intents)
        .map(|(array, intent)| {
            let data = array.decode()?;
            Ok(build_record(document, array, intent, array.dims.clone(), data, options))
        })
        .collect()
}

fn time_series_record(
    arrays: &[DataArray],
    intent: ResolvedIntent,
    options: &MeshOptions,
) -> Result<CanonicalMeshRecord> {
    let first = &arrays[0];
    let buffers = arrays
        .iter()
        .enumerate()
        .map(|(i, a)| {
            if a.dims != first.dims {
                return Err(NiftiError::InconsistentTimeSeries(i));
            }
            a.decode()
        })
        .collect::<Result<Vec<_>>>()?;
    let mut shape = first.dims.clone();
    shape.push(arrays.len());
    let data = interleave(buffers)?;
    Ok(CanonicalMeshRecord {
        group: intent.group,
        intent: intent.tag,
        shape,
        data,
        affine: resolve_affine(first, &options.affine_priority),
        labels: None,
        metadata: filter_metadata(&first.metadata, options),
    })
}

fn build_record(
    document: &GiftiDocument,
    array: &DataArray,
    intent: ResolvedIntent,
    shape: Vec<usize>,
    data: TypedBuffer,
    options: &MeshOptions,
) -> CanonicalMeshRecord {
    let labels = if intent.is_label() {
        Some(
            document
                .labels
                .iter()
                .map(|l| (l.key, l.name.clone()))
                .collect(),
        )
    } else {
        None
    };
    CanonicalMeshRecord {
        group: intent.group,
        intent: intent.tag,
        shape,
        data,
        affine: resolve_affine(array, &options.affine_priority),
        labels,
        metadata: filter_metadata(&array.metadata, options),
    }
}

fn filter_metadata(metadata: &[(String, String)], options: &MeshOptions) -> BTreeMap<String, String> {
    metadata
        .iter()
        .filter(|(key, _)| {
            let keep = options.metadata_keys.iter().any(|k| k == key);
            if !keep {
                trace!("dropping metadata entry `{}`", key);
            }
            keep
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gifti::Label;
    use crate::util::Endianness;

    fn float_array(intent: &str, values: &[f32]) -> DataArray {
        DataArray {
            intent: intent.to_string(),
            data_type: "NIFTI_TYPE_FLOAT32".to_string(),
            dims: vec![values.len()],
            endianness: Endianness::Little,
            data: values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn one_record_per_array() {
        let document = GiftiDocument {
            data_arrays: vec![
                float_array("NIFTI_INTENT_POINTSET", &[0., 1., 2., 3., 4., 5.]),
                float_array("NIFTI_INTENT_SHAPE", &[0.5, 0.25]),
            ],
            ..Default::default()
        };
        let records = canonicalize(&document, &MeshOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group, MeshGroup::Points);
        assert_eq!(records[1].intent, "scalar");
        assert_eq!(records[1].data, TypedBuffer::Float32(vec![0.5, 0.25]));
        assert_eq!(records[1].affine, Affine4::identity());
    }

    #[test]
    fn label_table_only_for_label_arrays() {
        let mut labels = float_array("NIFTI_INTENT_LABEL", &[]);
        labels.data_type = "NIFTI_TYPE_INT32".to_string();
        labels.dims = vec![2];
        labels.data = vec![1, 0, 0, 0, 2, 0, 0, 0];
        let document = GiftiDocument {
            data_arrays: vec![labels, float_array("NIFTI_INTENT_SHAPE", &[1.])],
            labels: vec![
                Label {
                    key: 1,
                    name: "cortex".to_string(),
                    color: None,
                },
                Label {
                    key: 2,
                    name: "medial wall".to_string(),
                    color: Some([1., 1., 1., 1.]),
                },
            ],
            ..Default::default()
        };
        let records = canonicalize(&document, &MeshOptions::default()).unwrap();
        assert_eq!(
            records[0].labels,
            Some(vec![(1, "cortex".to_string()), (2, "medial wall".to_string())])
        );
        assert_eq!(records[0].data, TypedBuffer::Int32(vec![1, 2]));
        assert_eq!(records[1].labels, None);
    }

    #[test]
    fn metadata_whitelist() {
        let mut array = float_array("NIFTI_INTENT_SHAPE", &[1.]);
        array.metadata = vec![
            ("Name".to_string(), "thickness".to_string()),
            ("SomethingElse".to_string(), "dropped".to_string()),
            ("Date".to_string(), "today".to_string()),
        ];
        let document = GiftiDocument {
            data_arrays: vec![array],
            ..Default::default()
        };
        let records = canonicalize(&document, &MeshOptions::default()).unwrap();
        let keys: Vec<_> = records[0].metadata.keys().cloned().collect();
        assert_eq!(keys, vec!["Date".to_string(), "Name".to_string()]);

        let names: Vec<String> = records[0]
            .attributes()
            .into_iter()
            .map(|a| a.name.into_owned())
            .collect();
        assert_eq!(names, vec!["intent", "group", "affine", "Date", "Name"]);
    }
}
