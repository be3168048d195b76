//! Deferred-load texture descriptors

/// A texture the artifact loads at initialization time.
///
/// Only the path to the pre-converted asset is recorded; pixel data never
/// passes through the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Path handed to the runtime texture loader
    pub path: String,
}

impl Texture {
    /// Descriptor for `<prefix><image>.<extension>`
    pub fn deferred(image_name: &str, prefix: &str, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        Self {
            path: format!("{prefix}{image_name}.{extension}"),
        }
    }
}
