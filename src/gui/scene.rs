use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::Path;

use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};
use rand::Rng;

use crate::bodies::{Body, BodyID};

const STARFIELD_EXTENT: f32 = 10_000.0;
const STARFIELD_DEPTH: f32 = 5_000.0;
const DEBRIS_EXTENT: f32 = 3_000.0;
const ORBIT_RING_SEGMENTS: usize = 128;
const PLANET_RING_SEGMENTS: usize = 64;
const PLANET_RING_LOOPS: usize = 4;

/// Owns the kiss3d scene nodes and the immediate-mode decorations. All the
/// per-frame positioning comes from the simulation's bodies; nothing here
/// holds state of its own beyond the node handles and the star positions.
pub struct SceneObjects {
    body_spheres: HashMap<BodyID, SceneNode>,
    // Kept alive so the nodes stay in the scene graph
    #[allow(dead_code)]
    debris: Vec<SceneNode>,
    stars: Vec<Point3<f32>>,
}

impl SceneObjects {
    pub fn new<R: Rng>(
        window: &mut Window,
        bodies: &[Body],
        texture_dir: &Path,
        star_count: usize,
        debris_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut body_spheres = HashMap::new();
        for body in bodies {
            let sphere = create_body_object(window, body, texture_dir);
            body_spheres.insert(body.id, sphere);
        }

        let mut scene = SceneObjects {
            body_spheres,
            debris: create_debris(window, debris_count, rng),
            stars: create_starfield(star_count, rng),
        };
        scene.update(bodies);
        scene
    }

    /// Mirrors body positions and spins into their scene nodes. Runs after
    /// the simulation tick, before the camera is read.
    pub fn update(&mut self, bodies: &[Body]) {
        for body in bodies {
            let sphere = match self.body_spheres.get_mut(&body.id) {
                Some(sphere) => sphere,
                None => continue,
            };
            sphere.set_local_translation(Translation3::from(body.position.coords));
            sphere.set_local_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                body.spin,
            ));
        }
    }

    pub fn draw_starfield(&self, window: &mut Window) {
        let white = Point3::new(1.0, 1.0, 1.0);
        for star in &self.stars {
            window.draw_point(star, &white);
        }
    }

    /// Faint circles marking each planet's orbit, plus the ring loops of any
    /// ringed planet, following it around its orbit.
    pub fn draw_rings(&self, window: &mut Window, bodies: &[Body]) {
        let orbit_color = Point3::new(0.2, 0.2, 0.2);
        for body in bodies.iter().filter(|b| !b.is_sun()) {
            draw_circle(
                window,
                Point3::origin(),
                body.info.orbit_radius,
                ORBIT_RING_SEGMENTS,
                &orbit_color,
            );
        }

        let ring_color = Point3::new(0.8, 0.75, 0.6);
        for body in bodies {
            let (inner, outer) = match body.info.ring {
                Some(bounds) => bounds,
                None => continue,
            };
            for i in 0..PLANET_RING_LOOPS {
                let t = i as f32 / (PLANET_RING_LOOPS - 1) as f32;
                let radius = inner + (outer - inner) * t;
                draw_circle(
                    window,
                    body.position,
                    radius,
                    PLANET_RING_SEGMENTS,
                    &ring_color,
                );
            }
        }
    }
}

fn create_body_object(window: &mut Window, body: &Body, texture_dir: &Path) -> SceneNode {
    let mut sphere = window.add_sphere(body.info.radius);
    let color = &body.info.color;
    sphere.set_color(color.x, color.y, color.z);

    // Texture loading is best-effort: a missing file just leaves the flat
    // body color in place.
    let path = texture_dir.join(body.info.texture);
    if path.exists() {
        sphere.set_texture_from_file(&path, body.info.name);
    }
    sphere
}

fn create_starfield<R: Rng>(count: usize, rng: &mut R) -> Vec<Point3<f32>> {
    (0..count)
        .map(|_| {
            Point3::new(
                (rng.gen::<f32>() - 0.5) * STARFIELD_EXTENT,
                (rng.gen::<f32>() - 0.5) * STARFIELD_EXTENT,
                -rng.gen::<f32>() * STARFIELD_DEPTH,
            )
        })
        .collect()
}

fn create_debris<R: Rng>(window: &mut Window, count: usize, rng: &mut R) -> Vec<SceneNode> {
    let mut nodes = Vec::with_capacity(count);
    for _ in 0..count {
        let size = rng.gen::<f32>() * 1.5 + 0.5;
        let mut chunk = window.add_sphere(size);
        chunk.set_color(1.0, 0.4, 0.0);
        chunk.set_local_translation(Translation3::new(
            (rng.gen::<f32>() - 0.5) * DEBRIS_EXTENT,
            (rng.gen::<f32>() - 0.5) * DEBRIS_EXTENT,
            (rng.gen::<f32>() - 0.5) * DEBRIS_EXTENT,
        ));
        nodes.push(chunk);
    }
    nodes
}

// An XZ-plane line loop, same construction as an orbit path.
fn draw_circle(
    window: &mut Window,
    center: Point3<f32>,
    radius: f32,
    segments: usize,
    color: &Point3<f32>,
) {
    let mut prev: Option<Point3<f32>> = None;
    for i in 0..=segments {
        let theta = 2.0 * PI * (i as f32) / (segments as f32);
        let pt = center + Vector3::new(theta.cos() * radius, 0.0, theta.sin() * radius);
        if let Some(prev) = prev {
            window.draw_line(&prev, &pt, color);
        }
        prev = Some(pt);
    }
}
