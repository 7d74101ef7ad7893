use image::{GenericImageView, Pixel, Rgba};

use crate::{config::Rect, vector::Vector2};

/// Classifies a cell as blocked or passable.
///
/// Implementations must be total: every coordinate, including those far
/// outside the sampled area, gets an answer, and anything outside the sampled
/// area is a wall.
pub trait WallDetector {
    fn is_wall(&self, p: Vector2) -> bool;
}

impl<D: WallDetector + ?Sized> WallDetector for &D {
    fn is_wall(&self, p: Vector2) -> bool {
        (**self).is_wall(p)
    }
}

/// Perceived brightness of a pixel in `[0, 1]`: the length of the normalized
/// rgb vector divided by the length of white.
///
/// Colour channels are premultiplied by alpha, so transparent pixels are dark.
pub fn brightness<P: Pixel<Subpixel = u8>>(pixel: &P) -> f64 {
    let Rgba([r, g, b, a]) = pixel.to_rgba();
    let alpha = f64::from(a) / f64::from(u8::MAX);
    let [r, g, b] = [r, g, b].map(|c| f64::from(c) / f64::from(u8::MAX) * alpha);
    (r * r + g * g + b * b).sqrt() / 3f64.sqrt()
}

/// Wall detector reading a raster image. Pixels brighter than the threshold
/// are walls, or darker ones when inverted.
#[derive(Debug, Clone)]
pub struct BrightnessWallDetector<'a, I> {
    surface: &'a I,
    bounds: Rect,
    threshold: f64,
    invert: bool,
}

impl<'a, I> BrightnessWallDetector<'a, I>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    pub fn new(surface: &'a I, threshold: f64) -> Self {
        let (width, height) = surface.dimensions();
        Self {
            surface,
            bounds: Rect::from_size(width, height),
            threshold,
            invert: false,
        }
    }

    /// Restricts sensing to `bounds` (e.g. the crop rectangle). The bounds are
    /// clamped to the surface so sampling can never go out of range.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        let (width, height) = self.surface.dimensions();
        self.bounds = Rect {
            x0: bounds.x0.max(0),
            y0: bounds.y0.max(0),
            x1: bounds.x1.min(width as i32),
            y1: bounds.y1.min(height as i32),
        };
        self
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<'a, I> WallDetector for BrightnessWallDetector<'a, I>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    fn is_wall(&self, p: Vector2) -> bool {
        if !self.bounds.contains(p) {
            return true;
        }

        let b = brightness(&self.surface.get_pixel(p.x as u32, p.y as u32));
        if self.invert {
            b < self.threshold
        } else {
            b > self.threshold
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, RgbImage, RgbaImage};

    /// 4x3 image, white border column on the right, everything else black
    fn create_basic_image() -> RgbImage {
        ImageBuffer::from_fn(4, 3, |x, _| {
            if x == 3 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_brightness() {
        assert_eq!(brightness(&Rgb([0u8, 0, 0])), 0.0);
        assert!((brightness(&Rgb([255u8, 255, 255])) - 1.0).abs() < 1e-12);
        assert!((brightness(&Rgb([255u8, 0, 0])) - 1.0 / 3f64.sqrt()).abs() < 1e-12);
        assert!((brightness(&Luma([255u8])) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transparent_pixels_are_dark() {
        assert_eq!(brightness(&Rgba([255u8, 255, 255, 0])), 0.0);
        assert!((brightness(&Rgba([255u8, 255, 255, 255])) - 1.0).abs() < 1e-12);
        assert!((brightness(&Rgba([255u8, 255, 255, 51])) - 0.2).abs() < 1e-12);

        // white wall with a transparent hole punched into it
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([255, 255, 255, 0])
            }
        });
        let wd = BrightnessWallDetector::new(&img, 0.5);
        assert!(wd.is_wall(Vector2::new(0, 0)));
        assert!(!wd.is_wall(Vector2::new(1, 0)));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let img = create_basic_image();
        let wd = BrightnessWallDetector::new(&img, 0.5);

        for p in [
            Vector2::new(-1, 0),
            Vector2::new(0, -1),
            Vector2::new(4, 0),
            Vector2::new(0, 3),
            Vector2::new(i32::MIN, i32::MAX),
        ] {
            assert!(wd.is_wall(p), "{p} should be a wall");
        }
    }

    #[test]
    fn test_threshold_and_invert() {
        let img = create_basic_image();

        let wd = BrightnessWallDetector::new(&img, 0.5);
        assert!(!wd.is_wall(Vector2::new(0, 0)));
        assert!(wd.is_wall(Vector2::new(3, 1)));

        let wd = BrightnessWallDetector::new(&img, 0.5).inverted(true);
        assert!(wd.is_wall(Vector2::new(0, 0)));
        assert!(!wd.is_wall(Vector2::new(3, 1)));
        // outside is a wall regardless of polarity
        assert!(wd.is_wall(Vector2::new(4, 1)));

        // nothing is brighter than 1
        let wd = BrightnessWallDetector::new(&img, 1.0);
        assert!(!wd.is_wall(Vector2::new(3, 1)));
    }

    #[test]
    fn test_bounds() {
        let img = create_basic_image();
        let wd = BrightnessWallDetector::new(&img, 0.5).with_bounds(Rect {
            x0: 1,
            y0: -5,
            x1: 10,
            y1: 2,
        });

        assert_eq!(
            wd.bounds(),
            Rect {
                x0: 1,
                y0: 0,
                x1: 4,
                y1: 2
            }
        );
        assert!(wd.is_wall(Vector2::new(0, 0)));
        assert!(!wd.is_wall(Vector2::new(1, 0)));
        assert!(wd.is_wall(Vector2::new(1, 2)));
    }
}
