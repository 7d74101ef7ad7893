//! Walkers that wrap another walker and watch what it does.
//!
//! Every wrapper forwards each call to the inner walker exactly once and hands
//! back its answer untouched, so a solve behaves the same with or without
//! them.

use image::GenericImage;
use log::info;

use crate::{
    vector::Vector2,
    walker::{Look, Walker},
};

/// Logs runs of steps and every turn.
#[derive(Debug)]
pub struct StepLogWalker<W> {
    inner: W,
    step_count: usize,
}

impl<W: Walker> StepLogWalker<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            step_count: 0,
        }
    }

    /// Steps attempted since the last turn.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Walker> Walker for StepLogWalker<W> {
    fn walk(&mut self) {
        self.step_count += 1;
        self.inner.walk();
    }

    fn turn_left(&mut self) {
        if self.step_count > 0 {
            info!("walk {} step(s)", self.step_count);
        }
        info!("turn left");
        self.step_count = 0;
        self.inner.turn_left();
    }

    fn look(&self) -> Look {
        self.inner.look()
    }

    fn wall_ahead(&self) -> bool {
        self.inner.wall_ahead()
    }

    fn done(&self) -> bool {
        let done = self.inner.done();
        if done {
            info!("walk {} step(s), done", self.step_count);
        }
        done
    }

    fn position(&self) -> Vector2 {
        self.inner.position()
    }

    fn direction(&self) -> Vector2 {
        self.inner.direction()
    }
}

/// Records every cell the walker stands on, starting cell included.
#[derive(Debug)]
pub struct PathWalker<W> {
    inner: W,
    path: Vec<Vector2>,
}

impl<W: Walker> PathWalker<W> {
    pub fn new(inner: W) -> Self {
        let path = vec![inner.position()];
        Self { inner, path }
    }

    pub fn path(&self) -> &[Vector2] {
        &self.path
    }

    pub fn into_parts(self) -> (W, Vec<Vector2>) {
        (self.inner, self.path)
    }
}

impl<W: Walker> Walker for PathWalker<W> {
    fn walk(&mut self) {
        let before = self.inner.position();
        self.inner.walk();
        let after = self.inner.position();
        if after != before {
            self.path.push(after);
        }
    }

    fn turn_left(&mut self) {
        self.inner.turn_left();
    }

    fn look(&self) -> Look {
        self.inner.look()
    }

    fn wall_ahead(&self) -> bool {
        self.inner.wall_ahead()
    }

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn position(&self) -> Vector2 {
        self.inner.position()
    }

    fn direction(&self) -> Vector2 {
        self.inner.direction()
    }
}

/// Paints the walker's trail onto a canvas as it goes.
pub struct DrawWalker<'a, W, I: GenericImage> {
    inner: W,
    canvas: &'a mut I,
    color: I::Pixel,
}

impl<'a, W: Walker, I: GenericImage> DrawWalker<'a, W, I> {
    pub fn new(inner: W, canvas: &'a mut I, color: I::Pixel) -> Self {
        let mut walker = Self {
            inner,
            canvas,
            color,
        };
        walker.paint(walker.inner.position());
        walker
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn paint(&mut self, p: Vector2) {
        let (width, height) = self.canvas.dimensions();
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            self.canvas.put_pixel(p.x as u32, p.y as u32, self.color);
        }
    }
}

impl<'a, W: Walker, I: GenericImage> Walker for DrawWalker<'a, W, I> {
    fn walk(&mut self) {
        self.inner.walk();
        self.paint(self.inner.position());
    }

    fn turn_left(&mut self) {
        self.inner.turn_left();
    }

    fn look(&self) -> Look {
        self.inner.look()
    }

    fn wall_ahead(&self) -> bool {
        self.inner.wall_ahead()
    }

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn position(&self) -> Vector2 {
        self.inner.position()
    }

    fn direction(&self) -> Vector2 {
        self.inner.direction()
    }
}
