use std::path::Path;
use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Event, EventManager, Key, MouseButton, TouchAction, WindowEvent};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3};
use rand::Rng;

mod camera;
mod scene;

use self::camera::TourCamera;
use self::scene::SceneObjects;
use crate::bodies::BodyID;
use crate::sim::{App, Command};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_NIGHT_MODE: Key = Key::N;
const KEY_BACK: Key = Key::B;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;

/// One keypress worth of angular speed change.
const SPEED_STEP: f32 = 0.001;

const LIGHT_BACKGROUND: (f32, f32, f32) = (0.93, 0.93, 0.93);
const NIGHT_BACKGROUND: (f32, f32, f32) = (0.0, 0.0, 0.0);

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

/// The kiss3d binding: turns window events into simulation commands, mirrors
/// simulation state into the scene, and draws the overlays.
pub struct Viewer {
    app: App,
    scene: SceneObjects,
    camera: TourCamera,
    cursor: Point2<f32>,
    hovered: Option<BodyID>,
    fps_counter: FpsCounter,
}

impl Viewer {
    pub fn new<R: Rng>(
        app: App,
        window: &mut Window,
        texture_dir: &Path,
        star_count: usize,
        debris_count: usize,
        rng: &mut R,
    ) -> Self {
        let scene = SceneObjects::new(
            window,
            &app.bodies,
            texture_dir,
            star_count,
            debris_count,
            rng,
        );
        Viewer {
            app,
            scene,
            camera: TourCamera::new(),
            cursor: Point2::origin(),
            hovered: None,
            fps_counter: FpsCounter::new(1000),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: Event) {
        match event.value {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Point2::new(x as f32, y as f32);
                // Hover affordance only; never touches the selection
                self.hovered = self.cast_at_cursor();
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.pick_at_cursor();
            }
            WindowEvent::Touch(_, x, y, TouchAction::Start, _) => {
                self.cursor = Point2::new(x as f32, y as f32);
                self.pick_at_cursor();
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.app.apply(Command::TogglePause);
            }
            WindowEvent::Key(KEY_NIGHT_MODE, Action::Press, _) => {
                self.app.apply(Command::ToggleNightMode);
            }
            WindowEvent::Key(KEY_BACK, Action::Press, _) => {
                self.app.apply(Command::Back);
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.nudge_speed(SPEED_STEP);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.nudge_speed(-SPEED_STEP);
            }
            _ => {}
        }
    }

    fn cast_at_cursor(&self) -> Option<BodyID> {
        let ray = self.camera.pick_ray(&self.cursor);
        self.app.pick(&ray)
    }

    fn pick_at_cursor(&mut self) {
        // Clicks are inert while inspecting; Back is the only way out
        if self.app.selection.zoomed_in {
            return;
        }
        if let Some(id) = self.cast_at_cursor() {
            self.app.apply(Command::Select(id));
        }
    }

    /// Speed adjustments land on the inspected body if there is one,
    /// otherwise on whatever the cursor is over.
    fn nudge_speed(&mut self, delta: f32) {
        let id = match self.app.selection.selected.or(self.hovered) {
            Some(id) => id,
            None => return,
        };
        let speed = self.app.body(id).speed + delta;
        self.app.apply(Command::SetSpeed(id, speed));
    }

    fn hud_text(&self) -> String {
        let status = if self.app.paused { "paused" } else { "running" };
        let hovered = match self.hovered {
            Some(id) => self.app.body(id).info.name,
            None => "-",
        };
        format!(
            "Solar system ({})
Hovering: {}
FPS: {:.0}
[click] inspect  [space] pause  [n] night  [,/.] speed",
            status,
            hovered,
            self.fps_counter.value(),
        )
    }

    fn inspect_text(&self) -> Option<String> {
        if !self.app.selection.zoomed_in {
            return None;
        }
        let body = self.app.inspected()?;
        Some(format!(
            "{}
{}
Speed: {:.3} rad/tick
[b] back to solar view",
            body.info.name, body.info.description, body.speed,
        ))
    }
}

impl State for Viewer {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        // Bodies move first, then the camera reads their fresh positions
        self.app.tick();
        self.camera
            .set_pose(self.app.rig.position, self.app.rig.look_at);
        self.scene.update(&self.app.bodies);

        let (r, g, b) = if self.app.night_mode {
            NIGHT_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        };
        window.set_background_color(r, g, b);

        self.scene.draw_starfield(window);
        self.scene.draw_rings(window, &self.app.bodies);

        let font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.hud_text(),
            &Point2::origin(),
            50.0,
            &font,
            &text_color,
        );
        if let Some(text) = self.inspect_text() {
            window.draw_text(&text, &Point2::new(0.0, 260.0), 50.0, &font, &text_color);
        }

        self.fps_counter.increment();
    }
}
