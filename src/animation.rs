//! Marker animation along the selected route.
//!
//! The controller owns no timer. The host calls [`AnimationController::tick`]
//! at whatever cadence it renders at; each tick moves the marker forward by
//! a whole number of coordinates derived from the speed multiplier.

use crate::geo::GeoPoint;
use crate::traits::PositionSink;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.25;
pub const DEFAULT_SPEED: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Nothing playing; position is 0.
    Idle,
    Running,
    /// Stopped mid-route; `resume` continues from the kept position.
    Paused,
    /// Reached the last coordinate.
    Arrived,
}

/// Result of one [`AnimationController::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not running; nothing emitted.
    Inactive,
    Moved(GeoPoint),
    Arrived(GeoPoint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    coordinates: Vec<GeoPoint>,
    position: usize,
    speed: f64,
    status: AnimationStatus,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            coordinates: Vec::new(),
            position: 0,
            speed: DEFAULT_SPEED,
            status: AnimationStatus::Idle,
        }
    }
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the route without starting playback.
    ///
    /// Any running animation stops and the position goes back to 0. Returns
    /// the first coordinate so the marker can snap to it.
    pub fn load(&mut self, coordinates: &[GeoPoint]) -> Option<GeoPoint> {
        self.coordinates = coordinates.to_vec();
        self.position = 0;
        self.status = AnimationStatus::Idle;
        self.coordinates.first().copied()
    }

    /// Loads `coordinates` and starts from the first one.
    ///
    /// Does nothing and returns `false` for an empty route.
    pub fn start(&mut self, coordinates: &[GeoPoint]) -> bool {
        if coordinates.is_empty() {
            return false;
        }
        self.load(coordinates);
        self.status = AnimationStatus::Running;
        true
    }

    /// Resumes when paused, otherwise restarts the loaded route from 0.
    pub fn play(&mut self) -> bool {
        match self.status {
            AnimationStatus::Running => true,
            AnimationStatus::Paused => self.resume(),
            AnimationStatus::Idle | AnimationStatus::Arrived => {
                if self.coordinates.is_empty() {
                    return false;
                }
                self.position = 0;
                self.status = AnimationStatus::Running;
                true
            }
        }
    }

    /// Stops ticking, keeping the position for `resume`.
    pub fn pause(&mut self) {
        if self.status == AnimationStatus::Running {
            self.status = AnimationStatus::Paused;
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.status == AnimationStatus::Paused {
            self.status = AnimationStatus::Running;
            true
        } else {
            false
        }
    }

    /// Stops and rewinds to the first coordinate.
    pub fn cancel(&mut self) {
        self.position = 0;
        self.status = AnimationStatus::Idle;
    }

    /// Sets the multiplier used from the next tick on.
    ///
    /// Values are clamped to [`MIN_SPEED`]..=[`MAX_SPEED`] and snapped to
    /// [`SPEED_STEP`]. Non-finite values are ignored. Returns the speed now
    /// in effect.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        if multiplier.is_finite() {
            let snapped = (multiplier / SPEED_STEP).round() * SPEED_STEP;
            self.speed = snapped.clamp(MIN_SPEED, MAX_SPEED);
        }
        self.speed
    }

    /// Advances one frame.
    ///
    /// The position is committed before anything is sent to `sink`. Reaching
    /// or passing the end clamps to the last coordinate and stops.
    pub fn tick(&mut self, sink: &mut impl PositionSink) -> TickOutcome {
        if self.status != AnimationStatus::Running {
            return TickOutcome::Inactive;
        }

        let next = self.position + self.step();
        match self.coordinates.get(next).copied() {
            Some(point) => {
                self.position = next;
                sink.marker_moved(point);
                TickOutcome::Moved(point)
            }
            None => {
                self.status = AnimationStatus::Arrived;
                let Some(last) = self.coordinates.last().copied() else {
                    self.position = 0;
                    return TickOutcome::Inactive;
                };
                self.position = self.coordinates.len() - 1;
                sink.arrived(last);
                TickOutcome::Arrived(last)
            }
        }
    }

    fn step(&self) -> usize {
        (self.speed.round() as usize).max(1)
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AnimationStatus::Running
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn coordinates(&self) -> &[GeoPoint] {
        &self.coordinates
    }

    /// Where the marker currently is, if a route is loaded.
    pub fn current(&self) -> Option<GeoPoint> {
        self.coordinates.get(self.position).copied()
    }
}
