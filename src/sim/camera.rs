use nalgebra::{Point3, Vector3};

use crate::bodies::{Body, BodyID};

// Idle sweep: two independent phase accumulators composed into a slow
// Lissajous-like drift around the system, always looking at the origin.
const IDLE_SWEEP_STEP: f32 = 0.0005;
const IDLE_DRIFT_STEP: f32 = 0.005;
const IDLE_RADIUS: f32 = 400.0;
const IDLE_DRIFT_AMPLITUDE: f32 = 100.0;
const IDLE_DRIFT_HEIGHT: f32 = 50.0;

// Tracking: constant-ratio interpolation toward the viewpoint each frame.
// No arrival condition; the camera approaches the viewpoint asymptotically.
const TRACK_RATIO: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Idle { sweep: f32, drift: f32 },
    Tracking { target: BodyID },
}

/// The camera controller: either sweeping idly around the whole system, or
/// gliding in to follow one body. Pose is recomputed every tick; the GUI
/// camera just mirrors `position`/`look_at`.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
}

impl CameraRig {
    pub fn new() -> Self {
        CameraRig {
            mode: CameraMode::Idle {
                sweep: 0.0,
                drift: 0.0,
            },
            position: Point3::new(0.0, 0.0, IDLE_RADIUS),
            look_at: Point3::origin(),
        }
    }

    pub fn follow(&mut self, target: BodyID) {
        self.mode = CameraMode::Tracking { target };
    }

    /// Drops back to the idle sweep. The accumulators restart from zero
    /// rather than resuming where the sweep left off.
    pub fn release(&mut self) {
        self.mode = CameraMode::Idle {
            sweep: 0.0,
            drift: 0.0,
        };
    }

    pub fn target(&self) -> Option<BodyID> {
        match self.mode {
            CameraMode::Idle { .. } => None,
            CameraMode::Tracking { target } => Some(target),
        }
    }

    /// Advances the rig one tick. Body positions must already be updated for
    /// this tick, since tracking reads them.
    pub fn advance(&mut self, bodies: &[Body]) {
        match self.mode {
            CameraMode::Idle {
                ref mut sweep,
                ref mut drift,
            } => {
                *sweep += IDLE_SWEEP_STEP;
                *drift += IDLE_DRIFT_STEP;
                let (sweep, drift) = (*sweep, *drift);
                self.position = Point3::new(
                    sweep.cos() * IDLE_RADIUS + drift.sin() * IDLE_DRIFT_AMPLITUDE,
                    drift.sin() * IDLE_DRIFT_HEIGHT,
                    sweep.sin() * IDLE_RADIUS + drift.cos() * IDLE_DRIFT_AMPLITUDE,
                );
                self.look_at = Point3::origin();
            }
            CameraMode::Tracking { target } => {
                let body = &bodies[target.0];
                let goal = viewpoint(body);
                self.position.coords = self.position.coords.lerp(&goal.coords, TRACK_RATIO);
                // Look at the body itself, not the offset viewpoint, so the
                // camera keeps tracking as the body orbits.
                self.look_at = body.position;
            }
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        CameraRig::new()
    }
}

/// Where the camera settles when inspecting a body: a short chase offset for
/// planets, and a fixed vantage point for the sun.
pub fn viewpoint(body: &Body) -> Point3<f32> {
    if body.is_sun() {
        Point3::new(0.0, 60.0, 100.0)
    } else {
        body.position + Vector3::new(0.0, 10.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::solar_system;
    use approx::assert_relative_eq;

    #[test]
    fn idle_accumulators_advance_monotonically() {
        let bodies = solar_system();
        let mut rig = CameraRig::new();
        let mut last = (0.0, 0.0);
        for _ in 0..50 {
            rig.advance(&bodies);
            match rig.mode {
                CameraMode::Idle { sweep, drift } => {
                    assert!(sweep > last.0);
                    assert!(drift > last.1);
                    last = (sweep, drift);
                }
                _ => panic!("rig left idle mode on its own"),
            }
        }
        assert_relative_eq!(last.0, 50.0 * 0.0005, max_relative = 1e-4);
        assert_relative_eq!(last.1, 50.0 * 0.005, max_relative = 1e-4);
    }

    #[test]
    fn idle_position_stays_on_the_composed_curve() {
        let bodies = solar_system();
        let mut rig = CameraRig::new();
        for _ in 0..200 {
            rig.advance(&bodies);
            let (sweep, drift) = match rig.mode {
                CameraMode::Idle { sweep, drift } => (sweep, drift),
                _ => unreachable!(),
            };
            assert_relative_eq!(
                rig.position.x,
                sweep.cos() * 400.0 + drift.sin() * 100.0,
                max_relative = 1e-5
            );
            assert_relative_eq!(rig.position.y, drift.sin() * 50.0, max_relative = 1e-5);
            assert_relative_eq!(rig.look_at.x, 0.0);
        }
    }

    #[test]
    fn tracking_converges_on_a_stationary_target() {
        let bodies = solar_system();
        let earth = &bodies[3];
        let goal = viewpoint(earth);

        let mut rig = CameraRig::new();
        rig.follow(earth.id);

        let mut last_distance = (goal - rig.position).norm();
        assert!(last_distance > 1.0);
        let mut converged = false;
        for _ in 0..500 {
            rig.advance(&bodies);
            let distance = (goal - rig.position).norm();
            if distance < 1e-3 {
                converged = true;
                break;
            }
            assert!(distance < last_distance, "approach must be monotone");
            last_distance = distance;
        }
        assert!(converged);
        // Orientation follows the body itself, not the offset viewpoint
        assert_relative_eq!(rig.look_at.x, earth.position.x);
        assert_relative_eq!(rig.look_at.z, earth.position.z);
    }

    #[test]
    fn sun_gets_the_fixed_vantage_point() {
        let bodies = solar_system();
        let sun_view = viewpoint(&bodies[0]);
        assert_relative_eq!(sun_view.y, 60.0);
        assert_relative_eq!(sun_view.z, 100.0);
    }

    #[test]
    fn release_restarts_the_idle_sweep() {
        let bodies = solar_system();
        let mut rig = CameraRig::new();
        for _ in 0..100 {
            rig.advance(&bodies);
        }
        rig.follow(BodyID(3));
        rig.advance(&bodies);
        rig.release();
        assert_eq!(
            rig.mode,
            CameraMode::Idle {
                sweep: 0.0,
                drift: 0.0
            }
        );
    }
}
