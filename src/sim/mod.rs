pub mod camera;

use self::camera::CameraRig;
use crate::bodies::{self, Body, BodyID, SPEED_MAX, SPEED_MIN, SPIN_STEP};
use crate::math::ray::{self, Ray};

/// Everything the UI layer is allowed to do to the simulation. Input
/// handlers build commands; `App::apply` is the single place state changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set a planet's angular speed; clamped to the slider range, ignored
    /// for the sun.
    SetSpeed(BodyID, f32),
    TogglePause,
    /// Cosmetic background swap only; no effect on motion.
    ToggleNightMode,
    /// Zoom in on a body. No-op while already zoomed in.
    Select(BodyID),
    /// Leave the inspect view and restart the idle sweep. Idempotent.
    Back,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    pub zoomed_in: bool,
    pub selected: Option<BodyID>,
}

/// The whole application state, advanced one tick per frame.
///
/// Invariant: the rig is in Tracking mode exactly when `selection.zoomed_in`
/// is set (and then `selection.selected` names the same body). `apply` is
/// the only transition path, so the invariant holds between any two ticks.
pub struct App {
    pub bodies: Vec<Body>,
    pub paused: bool,
    pub night_mode: bool,
    pub selection: Selection,
    pub rig: CameraRig,
}

impl App {
    pub fn new() -> Self {
        App {
            bodies: bodies::solar_system(),
            paused: false,
            night_mode: false,
            selection: Selection::default(),
            rig: CameraRig::new(),
        }
    }

    pub fn body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetSpeed(id, value) => {
                let body = &mut self.bodies[id.0];
                if body.is_sun() {
                    return;
                }
                body.speed = value.clamp(SPEED_MIN, SPEED_MAX);
                log::debug!("{} speed set to {:.3} rad/tick", body.info.name, body.speed);
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            Command::ToggleNightMode => {
                self.night_mode = !self.night_mode;
            }
            Command::Select(id) => {
                if self.selection.zoomed_in {
                    return;
                }
                self.selection = Selection {
                    zoomed_in: true,
                    selected: Some(id),
                };
                self.rig.follow(id);
                log::info!("Inspecting {}", self.body(id).info.name);
            }
            Command::Back => {
                self.selection = Selection::default();
                self.rig.release();
            }
        }
    }

    /// One frame: advance orbits, then spins, then the camera (which reads
    /// the freshly updated body positions).
    ///
    /// Angles move by a fixed per-tick increment, so visible speed depends
    /// on the frame rate; the binary pins the renderer to 60 fps.
    pub fn tick(&mut self) {
        // Orbits keep moving during a zoomed inspect even when paused, so
        // the tracked body doesn't freeze mid-approach.
        if !self.paused || self.selection.zoomed_in {
            for body in &mut self.bodies {
                if body.is_sun() {
                    continue;
                }
                body.angle += body.speed;
                body.place_on_orbit();
            }
        }

        // Self-rotation is unconditional, pause or no pause.
        for body in &mut self.bodies {
            body.spin += SPIN_STEP;
        }

        self.rig.advance(&self.bodies);
    }

    /// Nearest body along the ray, testing each body's visual sphere.
    /// Read-only; the hover affordance calls this every pointer move.
    pub fn pick(&self, ray: &Ray) -> Option<BodyID> {
        let mut nearest: Option<(f32, BodyID)> = None;
        for body in &self.bodies {
            if let Some(toi) = ray::toi_with_sphere(ray, &body.position, body.info.radius) {
                let closer = match nearest {
                    Some((best, _)) => toi < best,
                    None => true,
                };
                if closer {
                    nearest = Some((toi, body.id));
                }
            }
        }
        nearest.map(|(_, id)| id)
    }

    /// The description panel contents for the current selection, if any.
    pub fn inspected(&self) -> Option<&Body> {
        self.selection.selected.map(|id| self.body(id))
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

#[cfg(test)]
mod tests {
    use super::camera::CameraMode;
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    const EARTH: BodyID = BodyID(3);
    const SUN: BodyID = BodyID(0);

    #[test]
    fn positions_stay_on_their_orbits() {
        let mut app = App::new();
        for _ in 0..1000 {
            app.tick();
        }
        for body in app.bodies.iter().filter(|b| !b.is_sun()) {
            let r = body.info.orbit_radius;
            assert_relative_eq!(
                body.position.x * body.position.x + body.position.z * body.position.z,
                r * r,
                max_relative = 1e-4
            );
        }
    }

    #[test]
    fn pause_freezes_orbits_but_not_spin() {
        let mut app = App::new();
        app.apply(Command::TogglePause);

        let angles: Vec<f32> = app.bodies.iter().map(|b| b.angle).collect();
        let spins: Vec<f32> = app.bodies.iter().map(|b| b.spin).collect();
        for _ in 0..10 {
            app.tick();
        }
        for (body, angle) in app.bodies.iter().zip(&angles) {
            assert_relative_eq!(body.angle, *angle);
        }
        for (body, spin) in app.bodies.iter().zip(&spins) {
            assert!(body.spin > *spin);
        }
    }

    #[test]
    fn zoomed_inspect_overrides_pause() {
        let mut app = App::new();
        app.apply(Command::TogglePause);
        app.apply(Command::Select(EARTH));

        let before = app.body(EARTH).angle;
        for _ in 0..10 {
            app.tick();
        }
        assert!(app.body(EARTH).angle > before);
    }

    #[test]
    fn select_while_zoomed_is_a_no_op() {
        let mut app = App::new();
        app.apply(Command::Select(EARTH));
        app.apply(Command::Select(BodyID(5)));
        assert_eq!(app.selection.selected, Some(EARTH));
        assert_eq!(app.rig.target(), Some(EARTH));
    }

    #[test]
    fn back_is_idempotent_from_idle() {
        let mut app = App::new();
        let before = app.selection;
        app.apply(Command::Back);
        assert_eq!(app.selection, before);
        assert!(app.rig.target().is_none());
    }

    #[test]
    fn select_then_back_round_trip() {
        let mut app = App::new();
        app.apply(Command::Select(EARTH));
        assert!(app.selection.zoomed_in);
        assert_eq!(app.rig.target(), Some(EARTH));

        app.apply(Command::Back);
        assert!(!app.selection.zoomed_in);
        assert_eq!(app.selection.selected, None);
        assert_eq!(
            app.rig.mode,
            CameraMode::Idle {
                sweep: 0.0,
                drift: 0.0
            }
        );
    }

    #[test]
    fn set_speed_clamps_to_slider_range() {
        let mut app = App::new();
        app.apply(Command::SetSpeed(EARTH, 10.0));
        assert_relative_eq!(app.body(EARTH).speed, SPEED_MAX);
        app.apply(Command::SetSpeed(EARTH, 0.0));
        assert_relative_eq!(app.body(EARTH).speed, SPEED_MIN);
    }

    #[test]
    fn the_sun_ignores_speed_changes() {
        let mut app = App::new();
        app.apply(Command::SetSpeed(SUN, 0.02));
        assert_relative_eq!(app.body(SUN).speed, 0.0);
    }

    #[test]
    fn night_mode_is_cosmetic() {
        let mut app = App::new();
        let angles: Vec<f32> = app.bodies.iter().map(|b| b.angle).collect();
        app.apply(Command::ToggleNightMode);
        assert!(app.night_mode);
        for (body, angle) in app.bodies.iter().zip(&angles) {
            assert_relative_eq!(body.angle, *angle);
        }
    }

    #[test]
    fn pick_selects_the_nearest_body_along_the_ray() {
        let app = App::new();
        // Down the +x axis from beyond Neptune: first sphere hit is
        // Neptune's (r=420), not Earth's or the sun's.
        let ray = Ray::new(Point3::new(1000.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(app.pick(&ray), Some(BodyID(8)));

        // From the origin side, looking out: Mercury comes first.
        let ray = Ray::new(Point3::new(40.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(app.pick(&ray), Some(BodyID(1)));
    }

    #[test]
    fn pick_misses_cleanly() {
        let app = App::new();
        // Straight up from high above the plane: nothing there
        let ray = Ray::new(Point3::new(0.0, 500.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(app.pick(&ray), None);
    }
}
