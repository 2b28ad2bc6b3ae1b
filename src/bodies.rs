use std::f32::consts::PI;

use nalgebra::Point3;
use rand::Rng;

/// Bounds on a planet's per-tick angular speed, shared with the UI layer.
pub const SPEED_MIN: f32 = 0.001;
pub const SPEED_MAX: f32 = 0.05;

/// Per-tick self-rotation increment, applied to every body.
pub const SPIN_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: &'static str,
    /// Visual radius of the sphere, also used as the picking bound.
    pub radius: f32,
    /// Distance from the origin; 0 marks the sun.
    pub orbit_radius: f32,
    /// Starting angular speed, radians per tick.
    pub speed: f32,
    pub color: Point3<f32>,
    /// Texture file looked up under the texture directory; best-effort.
    pub texture: &'static str,
    /// Inner and outer radius of a planetary ring, if it has one.
    pub ring: Option<(f32, f32)>,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    /// Orbital angle in radians; conceptually wraps mod 2π.
    pub angle: f32,
    /// Current angular speed, kept within [SPEED_MIN, SPEED_MAX] by the UI.
    pub speed: f32,
    /// Self-rotation accumulator (about +Y).
    pub spin: f32,
    /// Derived each tick from angle and orbit radius.
    pub position: Point3<f32>,
}

impl Body {
    fn new(id: BodyID, info: BodyInfo) -> Self {
        let mut body = Body {
            id,
            speed: info.speed,
            info,
            angle: 0.0,
            spin: 0.0,
            position: Point3::origin(),
        };
        body.place_on_orbit();
        body
    }

    pub fn is_sun(&self) -> bool {
        self.info.orbit_radius == 0.0
    }

    /// Recomputes x/z from the current angle; y is left alone.
    pub fn place_on_orbit(&mut self) {
        if self.is_sun() {
            return;
        }
        self.position.x = self.angle.cos() * self.info.orbit_radius;
        self.position.z = self.angle.sin() * self.info.orbit_radius;
    }
}

/// The nine-body catalog, sun first. IDs index into the returned Vec.
pub fn solar_system() -> Vec<Body> {
    let infos = vec![
        BodyInfo {
            name: "Sun",
            radius: 30.0,
            orbit_radius: 0.0,
            speed: 0.0,
            color: Point3::new(1.0, 0.67, 0.2),
            texture: "2k_sun.jpg",
            ring: None,
            description: "The center of our solar system. A massive ball of hot plasma \
                          that provides light and heat to all planets.",
        },
        BodyInfo {
            name: "Mercury",
            radius: 4.0,
            orbit_radius: 60.0,
            speed: 0.02,
            color: Point3::new(0.55, 0.52, 0.5),
            texture: "8k_mercury.jpg",
            ring: None,
            description: "The smallest planet and closest to the Sun. It has a rocky \
                          surface covered in craters.",
        },
        BodyInfo {
            name: "Venus",
            radius: 6.5,
            orbit_radius: 100.0,
            speed: 0.015,
            color: Point3::new(0.9, 0.75, 0.5),
            texture: "2k_venus_surface.jpg",
            ring: None,
            description: "Venus has a thick, toxic atmosphere and is the hottest planet \
                          in our solar system.",
        },
        BodyInfo {
            name: "Earth",
            radius: 8.0,
            orbit_radius: 140.0,
            speed: 0.012,
            color: Point3::new(0.2, 0.45, 0.85),
            texture: "2k_earth_daymap.jpg",
            ring: None,
            description: "Our home planet, the only one known to support life with water \
                          and atmosphere.",
        },
        BodyInfo {
            name: "Mars",
            radius: 6.0,
            orbit_radius: 180.0,
            speed: 0.01,
            color: Point3::new(0.8, 0.35, 0.2),
            texture: "mars.jpg",
            ring: None,
            description: "Known as the Red Planet, Mars may have once had water and \
                          possibly life.",
        },
        BodyInfo {
            name: "Jupiter",
            radius: 18.0,
            orbit_radius: 240.0,
            speed: 0.007,
            color: Point3::new(0.82, 0.7, 0.55),
            texture: "jupiter.jpg",
            ring: None,
            description: "The largest planet, a gas giant with a Great Red Spot — a \
                          massive storm.",
        },
        BodyInfo {
            name: "Saturn",
            radius: 16.0,
            orbit_radius: 300.0,
            speed: 0.006,
            color: Point3::new(0.85, 0.78, 0.6),
            texture: "saturn.jpg",
            ring: Some((17.0, 23.0)),
            description: "Famous for its stunning ring system, Saturn is another gas \
                          giant.",
        },
        BodyInfo {
            name: "Uranus",
            radius: 13.0,
            orbit_radius: 360.0,
            speed: 0.004,
            color: Point3::new(0.6, 0.85, 0.9),
            texture: "uranus.jpg",
            ring: None,
            description: "A cold gas giant that rotates on its side, with faint rings.",
        },
        BodyInfo {
            name: "Neptune",
            radius: 13.0,
            orbit_radius: 420.0,
            speed: 0.003,
            color: Point3::new(0.25, 0.35, 0.9),
            texture: "neptune.jpg",
            ring: None,
            description: "The farthest known planet, deep blue and home to the strongest \
                          winds in the solar system.",
        },
    ];

    infos
        .into_iter()
        .enumerate()
        .map(|(i, info)| Body::new(BodyID(i), info))
        .collect()
}

/// Gives every planet a random starting phase, like a freshly shuffled orrery.
pub fn scatter_angles<R: Rng>(bodies: &mut [Body], rng: &mut R) {
    for body in bodies.iter_mut() {
        if body.is_sun() {
            continue;
        }
        body.angle = rng.gen_range(0.0..2.0 * PI);
        body.place_on_orbit();
    }
}
