//! wireframe graphics of the shape kinds

use crate::transforms::{Camera, Point, WSPoint, WSVec};
use iced::widget::canvas::{path::Builder, stroke, Frame, LineCap, Stroke};
use iced::Color;
use lazy_static::lazy_static;
use tether::ShapeKind;

/// edges of a shape, as offsets from the node position
#[derive(Clone, Debug, PartialEq)]
pub struct Graphics {
    pub edges: Vec<(WSVec, WSVec)>,
    pub color: Color,
}

lazy_static! {
    /// 4 sided cone, radius 1 and height 2
    static ref PYRAMID_GRAPHICS: Graphics = {
        let apex = WSVec::new(0., 1., 0.);
        let base = [
            WSVec::new(0., -1., 1.),
            WSVec::new(1., -1., 0.),
            WSVec::new(0., -1., -1.),
            WSVec::new(-1., -1., 0.),
        ];
        let mut edges = vec![];
        for i in 0..base.len() {
            edges.push((base[i], base[(i + 1) % base.len()]));
            edges.push((base[i], apex));
        }
        Graphics {
            edges,
            color: Color::from_rgb(1.0, 0.65, 0.0),
        }
    };
    /// unit cube
    static ref DIGIT_GRAPHICS: Graphics = {
        let h = 0.5;
        let corner = |i: usize| {
            WSVec::new(
                if i & 1 == 0 { -h } else { h },
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            )
        };
        let mut edges = vec![];
        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    edges.push((corner(i), corner(i | bit)));
                }
            }
        }
        Graphics {
            edges,
            color: Color::from_rgb(0.2, 0.4, 1.0),
        }
    };
}

/// graphics for `kind`
pub fn graphics(kind: ShapeKind) -> &'static Graphics {
    match kind {
        ShapeKind::Pyramid => &PYRAMID_GRAPHICS,
        ShapeKind::Digit => &DIGIT_GRAPHICS,
    }
}

impl Graphics {
    /// stroke the wireframe centered on `wsp`
    pub fn draw_at(&self, wsp: WSPoint, camera: &Camera, frame: &mut Frame, stroke: Stroke) {
        let mut path_builder = Builder::new();
        for (a, b) in &self.edges {
            path_builder.move_to(Point::from(camera.project(wsp + *a).0).into());
            path_builder.line_to(Point::from(camera.project(wsp + *b).0).into());
        }
        frame.stroke(&path_builder.build(), stroke);
    }

    pub fn draw_persistent(&self, wsp: WSPoint, camera: &Camera, frame: &mut Frame) {
        let stroke = Stroke {
            width: 2.0,
            style: stroke::Style::Solid(self.color),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.draw_at(wsp, camera, frame, stroke);
    }

    /// shape under the cursor
    pub fn draw_preview(&self, wsp: WSPoint, camera: &Camera, frame: &mut Frame) {
        let stroke = Stroke {
            width: 3.0,
            style: stroke::Style::Solid(Color::from_rgb(1.0, 1.0, 0.5)),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.draw_at(wsp, camera, frame, stroke);
    }

    /// shape being dragged
    pub fn draw_selected(&self, wsp: WSPoint, camera: &Camera, frame: &mut Frame) {
        let stroke = Stroke {
            width: 3.0,
            style: stroke::Style::Solid(Color::from_rgb(1.0, 0.8, 0.0)),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.draw_at(wsp, camera, frame, stroke);
    }
}
