//! types and constants facillitating geometry and transforms

use euclid::Point2D;
use iced::Point as IcedPoint;
use serde::{Deserialize, Serialize};
pub use tether::{WSBox, WSPoint, WSVec, WorldSpace};

/// PhantomData tag used to denote the patch of screen being drawn on (f32)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct CanvasSpace;

/// CanvasSpace Point
pub type CSPoint = euclid::Point2D<f32, CanvasSpace>;
/// CanvasSpace Box
pub type CSBox = euclid::Box2D<f32, CanvasSpace>;
/// CanvasSpace Vector
pub type CSVec = euclid::Vector2D<f32, CanvasSpace>;

/// radians of orbit per canvas pixel dragged
const ORBIT_RATE: f32 = 0.008;
/// pitch stays this far from the poles so the view basis never degenerates
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// orthographic orbit camera. projects world space onto canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// world point at the center of the view
    pub focus: WSPoint,
    /// rotation about the world y axis
    pub yaw: f32,
    /// elevation above the xz plane
    pub pitch: f32,
    /// canvas pixels per world unit
    pub scale: f32,
    /// canvas point the focus is drawn at
    pub center: CSPoint,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(0.6, 0.4, 60.0)
    }
}

impl Camera {
    pub fn new(yaw: f32, pitch: f32, scale: f32) -> Self {
        Camera {
            focus: WSPoint::origin(),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            scale,
            center: CSPoint::origin(),
        }
    }

    /// right, up and forward unit vectors of the view
    pub fn basis(&self) -> (WSVec, WSVec, WSVec) {
        let ((sy, cy), (sp, cp)) = (self.yaw.sin_cos(), self.pitch.sin_cos());
        let right = WSVec::new(cy, 0.0, -sy);
        let up = WSVec::new(-sp * sy, cp, -sp * cy);
        let forward = WSVec::new(-cp * sy, -sp, -cp * cy);
        (right, up, forward)
    }

    /// returns the canvas position of `wsp` and its depth along the view direction. greater depth is further away.
    pub fn project(&self, wsp: WSPoint) -> (CSPoint, f32) {
        let (right, up, forward) = self.basis();
        let d = wsp - self.focus;
        let csp = CSPoint::new(
            self.center.x + d.dot(right) * self.scale,
            self.center.y - d.dot(up) * self.scale,
        );
        (csp, d.dot(forward))
    }

    /// world displacement in the view plane matching a canvas displacement
    pub fn unproject_vector(&self, csv: CSVec) -> WSVec {
        let (right, up, _) = self.basis();
        right * (csv.x / self.scale) - up * (csv.y / self.scale)
    }

    /// same camera, drawn centered in canvas bounds `csb`
    pub fn centered_in(&self, csb: CSBox) -> Self {
        Camera {
            center: csb.center(),
            ..*self
        }
    }

    /// rotate the view by a canvas drag of `csv`
    pub fn orbit(&self, csv: CSVec) -> Self {
        Camera {
            yaw: self.yaw - csv.x * ORBIT_RATE,
            pitch: (self.pitch + csv.y * ORBIT_RATE).clamp(-PITCH_LIMIT, PITCH_LIMIT),
            ..*self
        }
    }

    /// move the focus so the scene follows a canvas drag of `csv`
    pub fn pan(&self, csv: CSVec) -> Self {
        Camera {
            focus: self.focus - self.unproject_vector(csv),
            ..*self
        }
    }

    /// change scale by `factor`, clamped to zoom limits
    pub fn zoom(&self, factor: f32, min_scale: f32, max_scale: f32) -> Self {
        Camera {
            scale: (self.scale * factor).clamp(min_scale, max_scale),
            ..*self
        }
    }

    /// returns camera looking at world box `wsb` such that it fits inside canvas bounds `csb`
    pub fn fit(&self, wsb: WSBox, csb: CSBox, min_scale: f32, max_scale: f32) -> Self {
        let radius = ((wsb.max - wsb.min).length() * 0.5).max(1.0);
        let s = (csb.width().min(csb.height()) / (2.4 * radius)).clamp(min_scale, max_scale);
        Camera {
            focus: wsb.center(),
            scale: s,
            ..*self
        }
    }
}

/// Newtype for working with iced::Point and euclid::Point2D s
#[derive(Debug, Copy, Clone)]
pub struct Point(CSPoint);

impl From<IcedPoint> for Point {
    fn from(src: IcedPoint) -> Self {
        Point(Point2D::new(src.x, src.y))
    }
}

impl From<Point> for IcedPoint {
    fn from(src: Point) -> Self {
        IcedPoint::new(src.0.x, src.0.y)
    }
}

impl From<Point> for CSPoint {
    fn from(src: Point) -> Self {
        src.0
    }
}

impl From<CSPoint> for Point {
    fn from(src: CSPoint) -> Self {
        Self(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn focus_projects_to_center() {
        let cam = Camera::default().centered_in(CSBox::new(
            CSPoint::origin(),
            CSPoint::new(400.0, 300.0),
        ));
        let (csp, depth) = cam.project(cam.focus);
        assert_eq!(csp, CSPoint::new(200.0, 150.0));
        assert_eq!(depth, 0.0);
    }

    #[test]
    fn unproject_inverts_project() {
        let cam = Camera::new(1.1, -0.3, 45.0);
        let csv = CSVec::new(30.0, -12.0);
        let wsv = cam.unproject_vector(csv);
        let (p0, z0) = cam.project(WSPoint::new(0.5, 0.2, -1.0));
        let (p1, z1) = cam.project(WSPoint::new(0.5, 0.2, -1.0) + wsv);
        assert!(close(p1.x - p0.x, csv.x));
        assert!(close(p1.y - p0.y, csv.y));
        // view plane drags keep depth
        assert!(close(z0, z1));
    }

    #[test]
    fn basis_is_orthonormal() {
        let (r, u, f) = Camera::new(-2.0, 0.7, 10.0).basis();
        for v in [r, u, f] {
            assert!(close(v.length(), 1.0));
        }
        assert!(close(r.dot(u), 0.0));
        assert!(close(r.dot(f), 0.0));
        assert!(close(u.dot(f), 0.0));
    }

    #[test]
    fn world_up_is_canvas_up() {
        let cam = Camera::new(0.0, 0.0, 10.0);
        let (csp, _) = cam.project(WSPoint::new(0.0, 1.0, 0.0));
        assert!(csp.y < cam.center.y);
    }

    #[test]
    fn orbit_clamps_pitch_and_zoom_clamps_scale() {
        let cam = Camera::default().orbit(CSVec::new(0.0, 10_000.0));
        assert!(close(cam.pitch, PITCH_LIMIT));
        assert_eq!(cam.zoom(100.0, 5.0, 200.0).scale, 200.0);
        assert_eq!(cam.zoom(0.0001, 5.0, 200.0).scale, 5.0);
    }

    #[test]
    fn fit_centers_on_box() {
        let wsb = WSBox::new(WSPoint::new(-1.0, 0.0, 0.0), WSPoint::new(3.0, 2.0, 0.0));
        let csb = CSBox::new(CSPoint::origin(), CSPoint::new(500.0, 500.0));
        let cam = Camera::default().fit(wsb, csb, 1.0, 1000.0);
        assert_eq!(cam.focus, WSPoint::new(1.0, 1.0, 0.0));
        assert!(cam.scale > 1.0);
    }
}
