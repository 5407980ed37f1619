//! Intent resolution: which group a data array belongs to, and what it
//! holds.

use crate::error::{NiftiError, Result};
use crate::typedef::Intent;
use std::fmt;

/// Prefix shared by all intent names.
pub const INTENT_PREFIX: &str = "NIFTI_INTENT_";

/// The group a canonical mesh record is filed under.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MeshGroup {
    /// Vertex coordinates.
    Points,
    /// Faces.
    Facet,
    /// Per-vertex values.
    Field,
    /// Anything else, such as node indices.
    Other,
}

impl MeshGroup {
    /// The group name.
    pub fn as_str(self) -> &'static str {
        match self {
            MeshGroup::Points => "points",
            MeshGroup::Facet => "facet",
            MeshGroup::Field => "field",
            MeshGroup::Other => "other",
        }
    }
}

impl fmt::Display for MeshGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intent, resolved to a group and a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIntent {
    /// The known intent, if the name is one.
    pub intent: Option<Intent>,
    /// The group.
    pub group: MeshGroup,
    /// The semantic tag, e.g. `"triangles"`.
    pub tag: String,
}

impl ResolvedIntent {
    /// Whether the array is one time point of a series.
    pub fn is_time_series(&self) -> bool {
        self.intent == Some(Intent::TimeSeries)
    }

    /// Whether the array holds label keys.
    pub fn is_label(&self) -> bool {
        self.intent == Some(Intent::Label)
    }
}

/// Resolve a GIFTI `Intent` value.
///
/// # Errors
///
/// - `NiftiError::UnknownIntent` if the name neither is in the table nor
///   carries the `NIFTI_INTENT_` prefix.
pub fn resolve_intent(name: &str) -> Result<ResolvedIntent> {
    let intent = Intent::from_gifti_name(name);
    let (group, tag) = match intent {
        Some(Intent::Pointset) => (MeshGroup::Points, "points"),
        Some(Intent::Triangle) => (MeshGroup::Facet, "triangles"),
        Some(Intent::Shape) => (MeshGroup::Field, "scalar"),
        Some(Intent::Label) => (MeshGroup::Field, "label"),
        Some(Intent::NodeIndex) => (MeshGroup::Other, "nodes"),
        Some(Intent::TimeSeries) => (MeshGroup::Field, "time_series"),
        _ => match name.strip_prefix(INTENT_PREFIX) {
            Some(rest) if !rest.is_empty() => {
                return Ok(ResolvedIntent {
                    intent,
                    group: MeshGroup::Field,
                    tag: rest.to_lowercase(),
                })
            }
            _ => return Err(NiftiError::UnknownIntent(name.to_string())),
        },
    };
    Ok(ResolvedIntent {
        intent,
        group,
        tag: tag.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entries() {
        let cases = [
            ("NIFTI_INTENT_POINTSET", MeshGroup::Points, "points"),
            ("NIFTI_INTENT_TRIANGLE", MeshGroup::Facet, "triangles"),
            ("NIFTI_INTENT_SHAPE", MeshGroup::Field, "scalar"),
            ("NIFTI_INTENT_LABEL", MeshGroup::Field, "label"),
            ("NIFTI_INTENT_NODE_INDEX", MeshGroup::Other, "nodes"),
            ("NIFTI_INTENT_TIME_SERIES", MeshGroup::Field, "time_series"),
        ];
        for (name, group, tag) in &cases {
            let resolved = resolve_intent(name).unwrap();
            assert_eq!(resolved.group, *group);
            assert_eq!(resolved.tag, *tag);
        }
    }

    #[test]
    fn prefix_fallback() {
        let resolved = resolve_intent("NIFTI_INTENT_ZSCORE").unwrap();
        assert_eq!(resolved.intent, Some(Intent::Zscore));
        assert_eq!(resolved.group, MeshGroup::Field);
        assert_eq!(resolved.tag, "zscore");

        let resolved = resolve_intent("NIFTI_INTENT_MY_THING").unwrap();
        assert_eq!(resolved.intent, None);
        assert_eq!(resolved.tag, "my_thing");
    }

    #[test]
    fn unknown_intents() {
        for name in &["POINTSET", "", "NIFTI_INTENT_", "nifti_intent_shape"] {
            match resolve_intent(name) {
                Err(NiftiError::UnknownIntent(i)) => assert_eq!(&i, name),
                other => panic!("{:?} should be rejected, got {:?}", name, other),
            }
        }
    }
}
