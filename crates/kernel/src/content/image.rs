//! Image URL resolution.
//!
//! Asset references look like `image-<id>-<width>x<height>-<format>` and
//! map onto the image CDN as `<id>-<width>x<height>.<format>`. The CDN picks
//! the best output format and never upscales (`auto=format&fit=max`).

use super::ImageRef;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Resolves image references to fetchable URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    project: Option<(String, String)>,
}

impl ImageResolver {
    /// Resolver for a project and dataset.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project: Some((project_id.into(), dataset.into())),
        }
    }

    /// Resolver with no project; every lookup yields `None`.
    pub fn disabled() -> Self {
        Self { project: None }
    }

    /// URL for an image, or `None` when the image, its asset, or a
    /// well-formed reference is missing.
    pub fn url_for(&self, image: Option<&ImageRef>) -> Option<String> {
        let (project_id, dataset) = self.project.as_ref()?;
        let reference = &image?.asset.as_ref()?.reference;
        let file = asset_file_name(reference)?;
        Some(format!(
            "{CDN_BASE}/{project_id}/{dataset}/{file}?auto=format&fit=max"
        ))
    }

    /// Like [`url_for`](Self::url_for) but falls back to a placeholder path.
    pub fn url_or(&self, image: Option<&ImageRef>, placeholder: &str) -> String {
        self.url_for(image)
            .unwrap_or_else(|| placeholder.to_string())
    }
}

/// `image-abc-800x600-jpg` → `abc-800x600.jpg`
fn asset_file_name(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let format = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    if id.is_empty() || format.is_empty() || !format.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let (width, height) = dimensions.split_once('x')?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !numeric(width) || !numeric(height) {
        return None;
    }

    Some(format!("{id}-{dimensions}.{format}"))
}
