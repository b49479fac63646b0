//! Per-object bake options.

/// Shadow participation of one mesh object.
///
/// Objects without options behave as if both flags are set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BakeOptions {
    /// This object occludes light for other vertices.
    pub cast_shadows: bool,
    /// This object's vertices are darkened when occluded.
    pub receive_shadows: bool,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

/// True unless `options` exist and disable receiving.
pub(crate) fn receives_shadows(options: Option<&BakeOptions>) -> bool {
    options.map_or(true, |o| o.receive_shadows)
}

/// True unless `options` exist and disable casting.
pub(crate) fn casts_shadows(options: Option<&BakeOptions>) -> bool {
    options.map_or(true, |o| o.cast_shadows)
}
