// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the escape-time kernel over every pixel of the plane,
//! spreading rows across a pool of scoped worker threads.
//!
//! The output buffer is split at chunk-of-rows granularity, so no two
//! workers ever touch the same byte, and the only synchronized step
//! during the render is the claim of the next chunk under the dynamic
//! and guided policies.  Which worker computes which row affects
//! nothing but timing: for a fixed plane and depth the buffer is
//! bit-identical whatever the policy or worker count.

extern crate crossbeam;
extern crate num_cpus;

use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};

use errors::Error;
use escape::escape_time;
use planes::{Pixel, PlaneMapper};
use schedule::SchedulePolicy;

type ChunkQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u8>>>>;

/// How a render distributes its work.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Row-distribution policy, normally `SchedulePolicy::from_env()`.
    pub policy: SchedulePolicy,
    /// Size of the worker pool.
    pub threads: usize,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            policy: SchedulePolicy::default(),
            threads: num_cpus::get(),
        }
    }
}

/// Renders every pixel of the plane at the given iteration depth and
/// returns the intensity buffer in row-major order.
pub fn render(
    plane: &PlaneMapper,
    depth: usize,
    options: &RenderOptions,
) -> Result<Vec<u8>, Error> {
    let width = plane.width();
    let height = plane.height();
    let threads = options.threads.max(1);
    let mut buffer = vec![0u8; plane.len()];

    debug!(
        "rendering {} rows across {} workers, {:?}",
        height, threads, options.policy
    );

    match options.policy {
        SchedulePolicy::Static { chunk } => {
            let chunk = chunk.unwrap_or(height / threads).max(1).min(height);
            // Chunks are dealt round-robin before any worker starts;
            // nothing rebalances afterwards.
            let mut assignments: Vec<Vec<(usize, &mut [u8])>> =
                (0..threads).map(|_| Vec::new()).collect();
            for (index, block) in buffer.chunks_mut(chunk * width).enumerate() {
                assignments[index % threads].push((index * chunk, block));
            }
            crossbeam::scope(|spawner| {
                for blocks in assignments {
                    spawner.spawn(move |_| {
                        for (start_row, block) in blocks {
                            render_block(plane, depth, start_row, block);
                        }
                    });
                }
            })
            .unwrap();
        }
        SchedulePolicy::Dynamic { chunk } => {
            let chunk = chunk.max(1).min(height);
            let queue: ChunkQueue =
                Arc::new(Mutex::new(buffer.chunks_mut(chunk * width).enumerate()));
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let queue = queue.clone();
                    spawner.spawn(move |_| loop {
                        let claim = { queue.lock().unwrap().next() };
                        match claim {
                            Some((index, block)) => {
                                render_block(plane, depth, index * chunk, block)
                            }
                            None => break,
                        }
                    });
                }
            })
            .unwrap();
        }
        SchedulePolicy::Guided { min_chunk } => {
            let queue = Arc::new(Mutex::new(GuidedQueue::new(
                &mut buffer,
                width,
                min_chunk,
                threads,
            )));
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let queue = queue.clone();
                    spawner.spawn(move |_| loop {
                        let claim = { queue.lock().unwrap().claim() };
                        match claim {
                            Some((start_row, block)) => {
                                render_block(plane, depth, start_row, block)
                            }
                            None => break,
                        }
                    });
                }
            })
            .unwrap();
        }
    }

    Ok(buffer)
}

/// Runs the kernel over one contiguous block of rows.
fn render_block(plane: &PlaneMapper, depth: usize, start_row: usize, block: &mut [u8]) {
    let width = plane.width();
    for (offset, row) in block.chunks_mut(width).enumerate() {
        for (column, out) in row.iter_mut().enumerate() {
            let point = plane.pixel_to_point(&Pixel(column, start_row + offset));
            *out = escape_time(point, depth);
        }
    }
}

/// Hands out shrinking blocks of rows: each claim takes the remaining
/// rows divided by the worker count, never fewer than `min_chunk`.
struct GuidedQueue<'a> {
    tail: Option<&'a mut [u8]>,
    next_row: usize,
    width: usize,
    min_chunk: usize,
    workers: usize,
}

impl<'a> GuidedQueue<'a> {
    fn new(buffer: &'a mut [u8], width: usize, min_chunk: usize, workers: usize) -> GuidedQueue<'a> {
        GuidedQueue {
            tail: Some(buffer),
            next_row: 0,
            width,
            min_chunk: min_chunk.max(1),
            workers: workers.max(1),
        }
    }

    fn claim(&mut self) -> Option<(usize, &'a mut [u8])> {
        let tail = self.tail.take()?;
        let remaining = tail.len() / self.width;
        if remaining == 0 {
            return None;
        }
        let rows = (remaining / self.workers).max(self.min_chunk).min(remaining);
        let (block, rest) = tail.split_at_mut(rows * self.width);
        let start_row = self.next_row;
        self.next_row += rows;
        self.tail = Some(rest);
        Some((start_row, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;
    use num::Complex;

    fn test_plane(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper::new(width, height, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap()
    }

    fn reference(plane: &PlaneMapper, depth: usize) -> Vec<u8> {
        iproduct!(0..plane.height(), 0..plane.width())
            .map(|(row, column)| escape_time(plane.pixel_to_point(&Pixel(column, row)), depth))
            .collect()
    }

    #[test]
    fn every_policy_matches_the_sequential_traversal() {
        let plane = test_plane(32, 24);
        let depth = 300;
        let expected = reference(&plane, depth);
        let policies = [
            SchedulePolicy::Static { chunk: None },
            SchedulePolicy::Static { chunk: Some(3) },
            SchedulePolicy::Dynamic { chunk: 1 },
            SchedulePolicy::Dynamic { chunk: 4 },
            SchedulePolicy::Guided { min_chunk: 1 },
            SchedulePolicy::Guided { min_chunk: 3 },
        ];
        for &policy in &policies {
            for &threads in &[1, 3, 7] {
                let options = RenderOptions { policy, threads };
                let buffer = render(&plane, depth, &options).unwrap();
                assert_eq!(buffer, expected, "{:?} with {} workers", policy, threads);
            }
        }
    }

    #[test]
    fn origin_lands_in_the_set() {
        let plane = test_plane(3, 3);
        let options = RenderOptions {
            policy: SchedulePolicy::default(),
            threads: 2,
        };
        let buffer = render(&plane, 50, &options).unwrap();
        // the centre pixel sits exactly on 0+0i
        assert_eq!(buffer[4], 255);
        // (-2, -2) leaves the radius-2 circle on its first update
        assert_eq!(buffer[0], 1);
    }

    #[test]
    fn single_row_grids_render_every_column() {
        let plane =
            PlaneMapper::new(3, 1, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        let options = RenderOptions {
            policy: SchedulePolicy::Dynamic { chunk: 1 },
            threads: 2,
        };
        let buffer = render(&plane, 10, &options).unwrap();
        assert_eq!(buffer, vec![1, 2, 1]);
    }

    #[test]
    fn chunk_sizes_larger_than_the_image_still_work() {
        let plane = test_plane(8, 5);
        let expected = reference(&plane, 40);
        let policies = [
            SchedulePolicy::Static { chunk: Some(64) },
            SchedulePolicy::Dynamic { chunk: 64 },
            SchedulePolicy::Guided { min_chunk: 64 },
        ];
        for &policy in &policies {
            let options = RenderOptions { policy, threads: 4 };
            let buffer = render(&plane, 40, &options).unwrap();
            assert_eq!(buffer, expected, "{:?}", policy);
        }
    }
}
