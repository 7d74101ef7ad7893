use image::{GenericImageView, Pixel};

use crate::{
    vector::Vector2,
    wall::{BrightnessWallDetector, WallDetector},
};

/// Wall readings around a walker, relative to its heading. `true` means there
/// is a wall in that direction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Look {
    pub left: bool,
    pub front: bool,
    pub right: bool,
}

/// Something that can be steered through a maze.
///
/// The solver only ever talks to a maze through this trait, so decorators can
/// wrap any walker and observe it.
pub trait Walker {
    /// Moves one cell forward, unless there is a wall ahead in which case
    /// nothing happens.
    fn walk(&mut self);

    /// Rotates the heading 90 degrees counter-clockwise without moving.
    fn turn_left(&mut self);

    /// Senses left, front and right of the current heading.
    fn look(&self) -> Look;

    fn wall_ahead(&self) -> bool;

    /// Whether the walker stands on the goal.
    fn done(&self) -> bool;

    fn position(&self) -> Vector2;

    fn direction(&self) -> Vector2;
}

impl<W: Walker + ?Sized> Walker for Box<W> {
    fn walk(&mut self) {
        (**self).walk()
    }
    fn turn_left(&mut self) {
        (**self).turn_left()
    }
    fn look(&self) -> Look {
        (**self).look()
    }
    fn wall_ahead(&self) -> bool {
        (**self).wall_ahead()
    }
    fn done(&self) -> bool {
        (**self).done()
    }
    fn position(&self) -> Vector2 {
        (**self).position()
    }
    fn direction(&self) -> Vector2 {
        (**self).direction()
    }
}

/// Walker over a rectangular grid, sensing walls through a [`WallDetector`].
/// Starts out facing right.
#[derive(Debug, Clone)]
pub struct GridWalker<D> {
    detector: D,
    pos: Vector2,
    dir: Vector2,
    end: Vector2,
}

/// Walker that senses walls directly in a raster image.
pub type ImageWalker<'a, I> = GridWalker<BrightnessWallDetector<'a, I>>;

impl<D: WallDetector> GridWalker<D> {
    pub fn new(detector: D, start: Vector2, end: Vector2) -> Self {
        Self {
            detector,
            pos: start,
            dir: Vector2::RIGHT,
            end,
        }
    }

    pub fn goal(&self) -> Vector2 {
        self.end
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Senses the neighbour in direction `dir`. A neighbour past the edge of
    /// the coordinate range counts as a wall.
    fn wall_towards(&self, dir: Vector2) -> bool {
        self.pos
            .checked_add(dir)
            .map_or(true, |p| self.detector.is_wall(p))
    }
}

impl<D: WallDetector> Walker for GridWalker<D> {
    fn walk(&mut self) {
        // sense again, the heading may have changed since the last look()
        if !self.wall_ahead() {
            self.pos = self.pos + self.dir;
        }
    }

    fn turn_left(&mut self) {
        self.dir = self.dir.rotate_left();
    }

    fn look(&self) -> Look {
        Look {
            left: self.wall_towards(self.dir.rotate_left()),
            front: self.wall_towards(self.dir),
            right: self.wall_towards(self.dir.rotate_right()),
        }
    }

    fn wall_ahead(&self) -> bool {
        self.wall_towards(self.dir)
    }

    fn done(&self) -> bool {
        self.pos == self.end
    }

    fn position(&self) -> Vector2 {
        self.pos
    }

    fn direction(&self) -> Vector2 {
        self.dir
    }
}

impl<'a, I> ImageWalker<'a, I>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    pub fn from_image(
        surface: &'a I,
        threshold: f64,
        invert: bool,
        start: Vector2,
        end: Vector2,
    ) -> Self {
        let detector = BrightnessWallDetector::new(surface, threshold).inverted(invert);
        Self::new(detector, start, end)
    }
}
