//! Image transform seam.
//!
//! The training framework owns the real transform pipeline (crop, resize,
//! normalize, augmentation). This crate only needs a callable boundary: it
//! hands over an RGB image and takes back whatever the framework produces.
//! The transform's configuration is opaque here; any randomized augmentation
//! policy belongs to the implementor, not to the dataset.

use image::RgbImage;

/// An opaque image transform applied to each tile before it is returned.
pub trait Transform {
    /// What the transform produces (a tensor type, another image, ...).
    type Output;

    /// Apply the transform to a decoded RGB tile.
    fn apply(&self, image: RgbImage) -> Self::Output;
}

/// Pass-through transform returning the decoded image unchanged.
///
/// Used by the CLI and anywhere no framework transform is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    type Output = RgbImage;

    fn apply(&self, image: RgbImage) -> RgbImage {
        image
    }
}

/// Any `Fn(RgbImage) -> O` is a transform.
impl<F, O> Transform for F
where
    F: Fn(RgbImage) -> O,
{
    type Output = O;

    fn apply(&self, image: RgbImage) -> O {
        self(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_returns_image_unchanged() {
        let image = RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        let out = Identity.apply(image.clone());
        assert_eq!(out, image);
    }

    #[test]
    fn test_closure_is_a_transform() {
        let dims = |image: RgbImage| (image.width(), image.height());
        let out = dims.apply(RgbImage::new(8, 6));
        assert_eq!(out, (8, 6));
    }
}
