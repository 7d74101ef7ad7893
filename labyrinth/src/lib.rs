//! Solves small mazes drawn as images by keeping one hand on the wall.
//!
//! The pieces, leaf first: [`Vector2`] headings and positions, a
//! [`WallDetector`] deciding what is a wall, a [`Walker`] that senses and
//! moves, and the [`Solver`] that steers it with the left-hand rule.

use image::{DynamicImage, GenericImageView, Pixel, Rgba, RgbaImage};

pub mod config;
pub mod error;
pub mod grid;
pub mod instrument;
pub mod solver;
pub mod vector;
pub mod walker;
pub mod wall;

pub use config::{Crop, Rect, SolveConfig};
pub use error::{ConfigError, Error, SolveError};
pub use grid::{Cell, MazeGrid};
pub use instrument::{DrawWalker, PathWalker, StepLogWalker};
pub use solver::{decide, SolveReport, Solver, SolverState};
pub use vector::Vector2;
pub use walker::{GridWalker, ImageWalker, Look, Walker};
pub use wall::{brightness, BrightnessWallDetector, WallDetector};

pub const PATH_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Validates `config` against `surface` and places a walker on it. Only the
/// cropped part of the surface is walkable.
pub fn image_walker<'a, I>(
    surface: &'a I,
    config: &SolveConfig,
) -> Result<ImageWalker<'a, I>, ConfigError>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = surface.dimensions();
    let domain = config.validate(width, height)?;

    let detector = BrightnessWallDetector::new(surface, config.threshold)
        .with_bounds(domain)
        .inverted(config.invert);

    Ok(GridWalker::new(detector, config.start, config.end))
}

/// Solves with step logging, painting the path onto `canvas`.
pub fn solve_with_trail<W: Walker>(
    walker: W,
    config: &SolveConfig,
    canvas: &mut RgbaImage,
) -> Result<SolveReport, SolveError> {
    let walker = DrawWalker::new(StepLogWalker::new(walker), canvas, PATH_COLOR);
    Solver::new(walker).with_max_steps(config.max_steps).solve()
}

/// Solves the maze in `img` and draws the path onto `canvas`, which is
/// usually a copy of `img`.
///
/// With `rasterize` the wall detector is sampled once up front instead of on
/// every look.
pub fn solve_image(
    img: &DynamicImage,
    config: &SolveConfig,
    canvas: &mut RgbaImage,
    rasterize: bool,
) -> Result<SolveReport, Error> {
    let walker = image_walker(img, config)?;

    let walker: Box<dyn Walker + '_> = if rasterize {
        let (width, height) = img.dimensions();
        let grid = MazeGrid::rasterize(width as usize, height as usize, walker.detector());
        Box::new(GridWalker::new(grid, config.start, config.end))
    } else {
        Box::new(walker)
    };

    Ok(solve_with_trail(walker, config, canvas)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    /// Renders ascii art as an image, `#` white and everything else black.
    fn create_maze_image(art: &str) -> DynamicImage {
        let map: MazeGrid = art.parse().unwrap();
        let img: RgbImage = ImageBuffer::from_fn(map.columns as u32, map.rows as u32, |x, y| {
            match map.cells[y as usize][x as usize] {
                Cell::Wall => Rgb([255, 255, 255]),
                Cell::Open => Rgb([0, 0, 0]),
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn create_basic_maze() -> DynamicImage {
        create_maze_image(
            "#######\n\
             #.###.#\n\
             #.###.#\n\
             #.#...#\n\
             #.#.###\n\
             #......\n\
             #######",
        )
    }

    #[test]
    fn test_solve_image() {
        let img = create_basic_maze();
        let mut canvas = img.to_rgba8();
        let config = SolveConfig::new(Vector2::new(1, 1), Vector2::new(5, 1));

        let report = solve_image(&img, &config, &mut canvas, false).unwrap();
        assert_eq!(report.end, Vector2::new(5, 1));
        assert_eq!(report.moves, 12);

        for (x, y) in [(1, 1), (1, 5), (3, 3), (5, 1)] {
            assert_eq!(*canvas.get_pixel(x, y), PATH_COLOR);
        }
        // the dead end on the right is never walked
        assert_ne!(*canvas.get_pixel(6, 5), PATH_COLOR);
    }

    #[test]
    fn test_rasterized_matches_direct() {
        let img = create_basic_maze();
        let config = SolveConfig::new(Vector2::new(1, 1), Vector2::new(5, 1));

        let mut direct = img.to_rgba8();
        let mut cached = img.to_rgba8();
        let a = solve_image(&img, &config, &mut direct, false).unwrap();
        let b = solve_image(&img, &config, &mut cached, true).unwrap();

        assert_eq!(a, b);
        assert_eq!(direct, cached);
    }

    #[test]
    fn test_inverted_maze() {
        // dark walls on a bright background
        let mut img = create_basic_maze().to_rgb8();
        image::imageops::invert(&mut img);
        let img = DynamicImage::ImageRgb8(img);

        let mut config = SolveConfig::new(Vector2::new(1, 1), Vector2::new(5, 1));
        config.invert = true;

        let mut canvas = img.to_rgba8();
        let report = solve_image(&img, &config, &mut canvas, false).unwrap();
        assert_eq!(report.moves, 12);
    }

    #[test]
    fn test_crop_blocks_outside() {
        let img = create_maze_image(".....\n.....\n.....");
        let mut config = SolveConfig::new(Vector2::new(1, 0), Vector2::new(3, 0));
        // leave only columns 1..4
        config.crop = Crop::from([1, 0, 1, 0]);

        let walker = image_walker(&img, &config).unwrap();
        assert!(walker.detector().is_wall(Vector2::new(0, 0)));
        assert!(walker.detector().is_wall(Vector2::new(4, 0)));
        assert!(!walker.detector().is_wall(Vector2::new(1, 0)));

        config.start = Vector2::new(0, 0);
        assert!(matches!(
            image_walker(&img, &config),
            Err(ConfigError::OutOfDomain { which: "start", .. })
        ));
    }

    #[test]
    fn test_stuck_is_reported() {
        let img = create_maze_image(".....\n.....\n.....\n.....\n.....");
        let mut config = SolveConfig::new(Vector2::new(0, 0), Vector2::new(2, 2));
        config.max_steps = Some(100);

        let mut canvas = img.to_rgba8();
        assert!(matches!(
            solve_image(&img, &config, &mut canvas, false),
            Err(Error::Solve(SolveError::Stuck {
                iterations: 100,
                ..
            }))
        ));
    }

    #[test]
    fn test_bad_threshold() {
        let img = create_basic_maze();
        let mut config = SolveConfig::new(Vector2::new(1, 1), Vector2::new(5, 1));
        config.threshold = -0.1;

        let mut canvas = img.to_rgba8();
        assert!(matches!(
            solve_image(&img, &config, &mut canvas, false),
            Err(Error::Config(ConfigError::Threshold(_)))
        ));
    }
}
