use log::{debug, info, trace};
use serde::Serialize;

use crate::{
    error::SolveError,
    vector::Vector2,
    walker::{Look, Walker},
};

/// Number of left turns to make before the next step.
///
/// Always prefers the leftmost open direction, which keeps the left hand on
/// the wall. First match wins:
/// * left open: turn left
/// * left and front blocked, right open: turn right (three lefts)
/// * boxed in: turn around (two lefts)
/// * otherwise: straight on
pub fn decide(look: Look) -> u8 {
    match look {
        Look { left: false, .. } => 1,
        Look {
            front: true,
            right: false,
            ..
        } => 3,
        Look {
            left: true,
            front: true,
            right: true,
        } => 2,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Walking,
    Reached,
    /// Gave up after hitting the iteration limit.
    Stuck,
}

/// Summary of a finished solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub start: Vector2,
    pub end: Vector2,
    /// Loop iterations, i.e. calls to `walk()`.
    pub iterations: u64,
    /// Iterations that actually moved the walker.
    pub moves: u64,
    /// Iterations that changed heading.
    pub turns: u64,
    /// Total quarter turns to the left.
    pub rotations: u64,
}

/// Drives a [`Walker`] with the left-hand rule until it reaches its goal.
#[derive(Debug)]
pub struct Solver<W> {
    walker: W,
    start: Vector2,
    max_steps: Option<u64>,
    iterations: u64,
    moves: u64,
    turns: u64,
    rotations: u64,
    state: SolverState,
}

impl<W: Walker> Solver<W> {
    pub fn new(walker: W) -> Self {
        Self {
            start: walker.position(),
            walker,
            max_steps: None,
            iterations: 0,
            moves: 0,
            turns: 0,
            rotations: 0,
            state: SolverState::Walking,
        }
    }

    /// Give up with [`SolveError::Stuck`] after this many iterations.
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Runs until the goal is reached or the iteration limit is hit.
    pub fn solve(&mut self) -> Result<SolveReport, SolveError> {
        loop {
            match self.step() {
                SolverState::Walking => {}
                SolverState::Reached => return Ok(self.report()),
                SolverState::Stuck => {
                    return Err(SolveError::Stuck {
                        iterations: self.iterations,
                        position: self.walker.position(),
                    })
                }
            }
        }
    }

    /// Like [`Solver::solve`] but hands the walker back as well.
    pub fn finish(mut self) -> (Result<SolveReport, SolveError>, W) {
        let res = self.solve();
        (res, self.walker)
    }

    /// Performs one iteration: look, turn, walk.
    pub fn step(&mut self) -> SolverState {
        if self.state != SolverState::Walking {
            return self.state;
        }

        if self.walker.done() {
            info!(
                "reached {} after {} iterations",
                self.walker.position(),
                self.iterations
            );
            self.state = SolverState::Reached;
            return self.state;
        }

        if self.max_steps.is_some_and(|max| self.iterations >= max) {
            debug!("giving up at {}", self.walker.position());
            self.state = SolverState::Stuck;
            return self.state;
        }

        let look = self.walker.look();
        let turns = decide(look);
        trace!(
            "at {} facing {}: {:?} -> {} left turn(s)",
            self.walker.position(),
            self.walker.direction(),
            look,
            turns
        );

        for _ in 0..turns {
            self.walker.turn_left();
        }

        // walk() re-checks the new heading and is a no-op if it is still blocked
        let before = self.walker.position();
        self.walker.walk();

        self.iterations += 1;
        self.rotations += u64::from(turns);
        if turns > 0 {
            self.turns += 1;
        }
        if self.walker.position() != before {
            self.moves += 1;
        }

        self.state
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn report(&self) -> SolveReport {
        SolveReport {
            start: self.start,
            end: self.walker.position(),
            iterations: self.iterations,
            moves: self.moves,
            turns: self.turns,
            rotations: self.rotations,
        }
    }

    pub fn walker(&self) -> &W {
        &self.walker
    }

    pub fn into_walker(self) -> W {
        self.walker
    }
}
