// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::Complex64;
use rayon::prelude::*;

/// Points with a magnitude above this value are guaranteed to diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Active sets smaller than this are updated on the current thread.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;

// {{{ structs

/// A point that has not escaped yet.
#[derive(Clone, Copy, Debug)]
struct ActivePoint {
    /// Current iterate.
    z: Complex64,
    /// Starting point, also the constant offset of the iteration.
    c: Complex64,
    /// Position of the point in the flattened input.
    index: usize,
}

impl ActivePoint {
    #[inline]
    fn step(&mut self) {
        self.z = self.z * self.z + self.c;
    }

    /// Non-finite iterates compare false and count as escaped.
    #[inline]
    fn is_inside(&self) -> bool {
        self.z.norm() <= ESCAPE_RADIUS
    }
}

/// Snapshot handed to the progress hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Number of iterations completed so far.
    pub iteration: usize,
    /// Number of points still being iterated.
    pub active: usize,
    /// Number of points that escaped so far.
    pub escaped: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EscapeResult {
    /// Starting points that never escaped, in their original order.
    pub surviving: Vec<Complex64>,
    /// Iteration (1-indexed) at which each input point escaped, or 0.
    pub record: Vec<usize>,
}

impl EscapeResult {
    /// Number of points that did not escape within the budget.
    pub fn interior_count(&self) -> usize {
        self.record.iter().filter(|&&k| k == 0).count()
    }
}

// }}}

// {{{ Mandelbrot

/// Escape-time iteration for the quadratic Mandelbrot map
///
/// $$
///     z_{n + 1} = z_n^2 + c, \qquad z_0 = c.
/// $$
///
/// All points are advanced together and the ones that leave the disk of radius
/// [`ESCAPE_RADIUS`] are removed from the working set after every step.
pub struct Mandelbrot<'a> {
    /// Maximum number of iterations before the point is considered in the set.
    maxit: usize,
    /// Call the progress hook every this many iterations.
    every: usize,
    /// Optional progress hook.
    progress: Option<Box<dyn FnMut(Progress) + 'a>>,
    /// Use rayon for large working sets.
    parallel: bool,
}

impl<'a> Mandelbrot<'a> {
    pub fn new(maxit: usize) -> Self {
        Mandelbrot {
            maxit,
            every: 1,
            progress: None,
            parallel: true,
        }
    }

    /// Report progress every *every* iterations (and once at the end).
    ///
    /// A value of 0 removes the hook.
    pub fn with_progress<F>(mut self, every: usize, hook: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        if every == 0 {
            self.progress = None;
        } else {
            self.every = every;
            self.progress = Some(Box::new(hook));
        }
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn report(&mut self, iteration: usize, active: usize, total: usize) {
        if let Some(hook) = self.progress.as_mut() {
            hook(Progress {
                iteration,
                active,
                escaped: total - active,
            });
        }
    }

    pub fn run(&mut self, points: &[Complex64]) -> EscapeResult {
        let npoints = points.len();
        let mut record = vec![0usize; npoints];

        let mut active: Vec<ActivePoint> = points
            .iter()
            .enumerate()
            .map(|(index, &c)| ActivePoint { z: c, c, index })
            .collect();

        let mut completed = 0;
        for i in 0..self.maxit {
            if active.is_empty() {
                log::debug!("All {} points escaped before iteration {}", npoints, i);
                break;
            }

            if i % self.every == 0 {
                self.report(i, active.len(), npoints);
            }

            if self.parallel && active.len() >= PARALLEL_THRESHOLD {
                active.par_iter_mut().for_each(ActivePoint::step);
            } else {
                active.iter_mut().for_each(ActivePoint::step);
            }

            // NOTE: `retain` is stable, so the points keep their relative order
            active.retain(|p| {
                let inside = p.is_inside();
                if !inside {
                    record[p.index] += i + 1;
                }
                inside
            });

            log::trace!("Iteration {}: {} points active", i, active.len());
            completed = i + 1;
        }

        if completed > 0 {
            self.report(completed, active.len(), npoints);
        }

        EscapeResult {
            surviving: active.iter().map(|p| p.c).collect(),
            record,
        }
    }
}

/// Run the escape-time iteration on *points* without any progress reporting.
pub fn mandelbrot_escape(points: &[Complex64], maxit: usize) -> EscapeResult {
    Mandelbrot::new(maxit).run(points)
}

// }}}

// {{{ tests


// }}}
