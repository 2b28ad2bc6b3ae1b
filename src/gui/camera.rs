use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Point4, Vector3};

use crate::math::ray::{viewport_to_ndc, Ray};

// Unlike ArcBall, this camera takes no pointer input of its own: its pose is
// written every frame from the simulation's camera rig, which is what lets
// the idle sweep and the tracking glide live in testable code. All this type
// does is hold the pose and the perspective projection.
pub struct TourCamera {
    eye: Point3<f32>,
    target: Point3<f32>,
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl TourCamera {
    pub fn new() -> Self {
        TourCamera {
            eye: Point3::new(0.0, 0.0, 400.0),
            target: Point3::origin(),
            width: 800,
            height: 600,
            fovy: PI / 4.0,
            znear: 0.1,
            zfar: 4000.0,
        }
    }

    pub fn set_pose(&mut self, eye: Point3<f32>, target: Point3<f32>) {
        self.eye = eye;
        self.target = target;
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    /// World-space ray through a viewport position, for picking.
    pub fn pick_ray(&self, cursor: &Point2<f32>) -> Ray {
        let ndc = viewport_to_ndc(cursor.x, cursor.y, self.width as f32, self.height as f32);
        let inv = self.inverse_transformation();

        let near = inv * Point4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far = inv * Point4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = Point3::new(near.x / near.w, near.y / near.w, near.z / near.w);
        let far = Point3::new(far.x / far.w, far.y / far.w, far.z / far.w);

        Ray::new(near, far - near)
    }
}

impl Default for TourCamera {
    fn default() -> Self {
        TourCamera::new()
    }
}

impl Camera for TourCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        // Pose comes from the rig; the only event we care about is a resize.
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation().try_inverse().unwrap()
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
