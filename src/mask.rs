//! Corroded-area percentage of a segmentation mask
//!
//! A [`Mask`] is a row-major grid of raw pixel values. The crate never
//! interprets the pixel encoding itself: a [`PixelDiscriminator`] decides for
//! each pixel whether it belongs to the corroded foreground. Boolean, byte and
//! categorical masks all go through the same code path.

use crate::error::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};

/// Decides whether a raw pixel value is corroded foreground
///
/// Implemented for every `Fn(&P) -> bool`, so a closure is usually enough:
///
/// ```
/// use corrosion_severity::mask::{compute_percentage, Mask};
///
/// let mask = Mask::from_rows(vec![vec![0u8, 255], vec![255, 255]]);
/// let pct = compute_percentage(&mask, &|p: &u8| *p > 127).unwrap();
/// assert_eq!(pct, 75.0);
/// ```
pub trait PixelDiscriminator<P> {
    fn is_foreground(&self, pixel: &P) -> bool;
}

impl<P, F> PixelDiscriminator<P> for F
where
    F: Fn(&P) -> bool,
{
    fn is_foreground(&self, pixel: &P) -> bool {
        self(pixel)
    }
}

/// Foreground when the pixel is strictly greater than a cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoff<T> {
    pub cutoff: T,
}

impl<T> Cutoff<T> {
    pub fn new(cutoff: T) -> Self {
        Self { cutoff }
    }
}

impl Cutoff<u8> {
    /// Binarization rule for 8-bit grayscale masks (white = corroded)
    pub fn grayscale() -> Self {
        Self { cutoff: 127 }
    }
}

impl<T: PartialOrd> PixelDiscriminator<T> for Cutoff<T> {
    fn is_foreground(&self, pixel: &T) -> bool {
        *pixel > self.cutoff
    }
}

/// Foreground when the pixel carries a specific categorical label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Category<T> {
    pub label: T,
}

impl<T> Category<T> {
    pub fn new(label: T) -> Self {
        Self { label }
    }
}

impl<T: PartialEq> PixelDiscriminator<T> for Category<T> {
    fn is_foreground(&self, pixel: &T) -> bool {
        *pixel == self.label
    }
}

/// Boolean masks: `true` is foreground
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truthy;

impl PixelDiscriminator<bool> for Truthy {
    fn is_foreground(&self, pixel: &bool) -> bool {
        *pixel
    }
}

/// Row-major pixel grid as handed over by a mask loader
///
/// Rows are kept as supplied. A loader may produce ragged rows from a corrupt
/// file; that is reported by [`compute_percentage`], not at construction, so
/// batch labelling can record the failure against the mask's identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask<P> {
    rows: Vec<Vec<P>>,
}

impl<P> Mask<P> {
    /// Wrap loader output without validating its shape
    pub fn from_rows(rows: Vec<Vec<P>>) -> Self {
        Self { rows }
    }

    /// Build a rectangular mask from a flat row-major buffer
    ///
    /// Returns `RaggedMask` when `pixels.len()` is not `width * height`, or
    /// when that product does not fit in `usize`.
    pub fn from_flat(width: usize, height: usize, pixels: Vec<P>) -> LabelResult<Self> {
        let Some(expected) = width.checked_mul(height) else {
            return Err(LabelError::RaggedMask {
                row: 0,
                expected: usize::MAX,
                found: pixels.len(),
            });
        };
        if pixels.len() != expected {
            return Err(LabelError::RaggedMask {
                row: pixels.len() / width.max(1),
                expected,
                found: pixels.len(),
            });
        }
        if width == 0 {
            return Ok(Self { rows: Vec::new() });
        }

        let mut rows = Vec::with_capacity(height);
        let mut iter = pixels.into_iter();
        for _ in 0..height {
            rows.push(iter.by_ref().take(width).collect());
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<P>] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row (0 for an empty mask)
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total pixel count across all rows
    pub fn pixel_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

impl<P: Clone> Mask<P> {
    /// Rectangular mask where every pixel has the same value
    pub fn filled(width: usize, height: usize, value: P) -> Self {
        Self {
            rows: vec![vec![value; width]; height],
        }
    }
}

/// Percentage (0–100) of pixels the discriminator marks as foreground
///
/// # Errors
/// - `EmptyMask` if the mask has no pixels
/// - `RaggedMask` if a row length differs from the first row
pub fn compute_percentage<P, D>(mask: &Mask<P>, discriminator: &D) -> LabelResult<f64>
where
    D: PixelDiscriminator<P> + ?Sized,
{
    let width = mask.width();
    if width == 0 {
        return Err(LabelError::EmptyMask);
    }

    let mut foreground = 0usize;
    for (row_index, row) in mask.rows.iter().enumerate() {
        if row.len() != width {
            return Err(LabelError::RaggedMask {
                row: row_index,
                expected: width,
                found: row.len(),
            });
        }
        foreground += row.iter().filter(|p| discriminator.is_foreground(p)).count();
    }

    let total = width * mask.height();
    Ok(100.0 * foreground as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_mask(size: usize) -> Mask<u8> {
        let rows = (0..size)
            .map(|_| (0..size).map(|x| if x < size / 2 { 255 } else { 0 }).collect())
            .collect();
        Mask::from_rows(rows)
    }

    #[test]
    fn test_all_background() {
        let mask = Mask::filled(100, 100, 0u8);
        assert_eq!(compute_percentage(&mask, &Cutoff::grayscale()).unwrap(), 0.0);
    }

    #[test]
    fn test_all_foreground() {
        let mask = Mask::filled(100, 100, 255u8);
        assert_eq!(
            compute_percentage(&mask, &Cutoff::grayscale()).unwrap(),
            100.0
        );
    }

    #[test]
    fn test_half_foreground() {
        let mask = half_mask(100);
        assert_eq!(
            compute_percentage(&mask, &Cutoff::grayscale()).unwrap(),
            50.0
        );
    }

    #[test]
    fn test_grayscale_cutoff_is_exclusive() {
        let mask = Mask::from_rows(vec![vec![127u8, 128]]);
        assert_eq!(
            compute_percentage(&mask, &Cutoff::grayscale()).unwrap(),
            50.0
        );
    }

    #[test]
    fn test_empty_mask() {
        let mask: Mask<u8> = Mask::from_rows(vec![]);
        assert_eq!(
            compute_percentage(&mask, &Cutoff::grayscale()),
            Err(LabelError::EmptyMask)
        );

        let zero_width: Mask<u8> = Mask::from_rows(vec![vec![], vec![]]);
        assert_eq!(
            compute_percentage(&zero_width, &Cutoff::grayscale()),
            Err(LabelError::EmptyMask)
        );
    }

    #[test]
    fn test_ragged_mask() {
        let mask = Mask::from_rows(vec![vec![true, false], vec![true]]);
        assert_eq!(
            compute_percentage(&mask, &Truthy),
            Err(LabelError::RaggedMask {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_categorical_mask() {
        // 0 = background, 1 = paint, 2 = corrosion
        let mask = Mask::from_rows(vec![vec![0u32, 1, 2, 2]]);
        assert_eq!(compute_percentage(&mask, &Category::new(2u32)).unwrap(), 50.0);
    }

    #[test]
    fn test_closure_discriminator() {
        let mask = Mask::from_rows(vec![vec![0.1f32, 0.9, 0.7, 0.2]]);
        let pct = compute_percentage(&mask, &|p: &f32| *p >= 0.5).unwrap();
        assert_eq!(pct, 50.0);
    }

    #[test]
    fn test_from_flat() {
        let mask = Mask::from_flat(3, 2, vec![1u8, 0, 0, 1, 1, 1]).unwrap();
        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.pixel_count(), 6);
        assert_eq!(compute_percentage(&mask, &Category::new(1u8)).unwrap(), 400.0 / 6.0);

        assert!(Mask::from_flat(3, 2, vec![0u8; 5]).is_err());
    }

    #[test]
    fn test_from_flat_dimension_overflow() {
        assert_eq!(
            Mask::from_flat(usize::MAX, 2, vec![0u8; 4]),
            Err(LabelError::RaggedMask {
                row: 0,
                expected: usize::MAX,
                found: 4
            })
        );
    }
}
