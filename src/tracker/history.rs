//! Bounded position history of the tracked object.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Tracked position in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point as float coordinates, the form the drawing routines take.
    #[inline]
    pub fn as_f32(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for Centroid {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed-capacity FIFO of centroids, oldest first.
///
/// Pushing onto a full history evicts the oldest entry, so
/// `len() <= capacity()` holds after every operation.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    points: VecDeque<Centroid>,
    capacity: usize,
}

impl PositionHistory {
    /// Create an empty history holding at most `capacity` points.
    ///
    /// A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a centroid, evicting the oldest one when full.
    pub fn push(&mut self, centroid: Centroid) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(centroid);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed centroid.
    pub fn latest(&self) -> Option<Centroid> {
        self.points.back().copied()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Centroid> {
        self.points.iter()
    }

    /// Snapshot of the history, oldest first.
    pub fn to_vec(&self) -> Vec<Centroid> {
        self.points.iter().copied().collect()
    }
}
