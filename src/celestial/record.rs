//! Bounded kinematic history
//!
//! A [`KinematicRecord`] is an append-only series of position/velocity pairs
//! with a capacity fixed at construction. Appending past the capacity fails
//! with [`RecordError::CapacityExceeded`] and leaves the record untouched.

use thiserror::Error;

use crate::vector::Vec2;

/// Error type for kinematic records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record is full: capacity of {capacity} entries reached")]
    CapacityExceeded { capacity: usize },

    #[error("Record has no entries")]
    EmptyRecord,

    #[error("Record capacity must be at least 1")]
    InvalidCapacity,

    #[error("Cannot allocate a record of {capacity} entries")]
    AllocationFailed { capacity: usize },
}

/// Position and velocity at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    /// Position in meters
    pub position: Vec2<f64>,
    /// Velocity in m/s
    pub velocity: Vec2<f64>,
}

impl KinematicState {
    pub const fn new(position: Vec2<f64>, velocity: Vec2<f64>) -> Self {
        Self { position, velocity }
    }
}

/// Fixed-capacity, append-only series of kinematic states
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicRecord {
    capacity: usize,
    positions: Vec<Vec2<f64>>,
    velocities: Vec<Vec2<f64>>,
}

impl KinematicRecord {
    /// Create an empty record holding at most `capacity` entries
    ///
    /// Storage for every entry is reserved up front; a capacity that cannot
    /// be allocated fails with [`RecordError::AllocationFailed`].
    pub fn with_capacity(capacity: usize) -> Result<Self, RecordError> {
        if capacity == 0 {
            return Err(RecordError::InvalidCapacity);
        }
        let mut positions = Vec::new();
        let mut velocities = Vec::new();
        positions
            .try_reserve_exact(capacity)
            .and_then(|()| velocities.try_reserve_exact(capacity))
            .map_err(|_| RecordError::AllocationFailed { capacity })?;
        Ok(Self {
            capacity,
            positions,
            velocities,
        })
    }

    /// Append the next state in time order
    pub fn append(&mut self, position: Vec2<f64>, velocity: Vec2<f64>) -> Result<(), RecordError> {
        if self.is_full() {
            return Err(RecordError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.positions.push(position);
        self.velocities.push(velocity);
        Ok(())
    }

    /// The most recently appended state
    pub fn current(&self) -> Result<KinematicState, RecordError> {
        self.len()
            .checked_sub(1)
            .and_then(|last| self.get(last))
            .ok_or(RecordError::EmptyRecord)
    }

    /// The first appended state (the initial condition)
    pub fn initial(&self) -> Result<KinematicState, RecordError> {
        self.get(0).ok_or(RecordError::EmptyRecord)
    }

    /// State at `index`, if recorded
    pub fn get(&self, index: usize) -> Option<KinematicState> {
        Some(KinematicState::new(
            *self.positions.get(index)?,
            *self.velocities.get(index)?,
        ))
    }

    /// Positions recorded so far, oldest first
    pub fn positions(&self) -> &[Vec2<f64>] {
        &self.positions
    }

    /// Velocities recorded so far, oldest first
    pub fn velocities(&self) -> &[Vec2<f64>] {
        &self.velocities
    }

    /// Iterate over recorded states, oldest first
    pub fn states(&self) -> impl Iterator<Item = KinematicState> + '_ {
        self.positions
            .iter()
            .zip(self.velocities.iter())
            .map(|(&position, &velocity)| KinematicState::new(position, velocity))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Number of appends left before the record is full
    pub fn remaining(&self) -> usize {
        self.capacity - self.len()
    }
}
