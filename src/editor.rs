//! Editor
//! the chain of shapes as viewport content - adding, deleting and dragging nodes

use std::collections::BTreeMap;

use crate::shapes;
use crate::transforms::{CSPoint, Camera, Point, WSBox, WSPoint, WSVec};
use crate::viewport::{self, Pointer};
use iced::widget::canvas::{event::Event, stroke, Frame, LineCap, LineDash, Path, Stroke, Text};
use iced::{mouse, Color};
use tether::links::{self, Link, LiveEndpoints};
use tether::{Chain, DragBinding, DragBindings, RcRPosition, ShapeKind, Solver};

/// default pick radius around a node's projected center, in canvas pixels
pub const PICK_RADIUS: f32 = 12.0;

#[derive(Debug, Clone, Copy)]
pub enum Msg {
    /// canvas event, with the pointer if the cursor is over the canvas
    Event(Event, Option<Pointer>),
    /// append a node of this kind
    Add(ShapeKind),
    /// truncate the chain from this index
    Delete(usize),
    /// frame tick
    Tick,
}

impl viewport::ContentMsg for Msg {
    fn canvas_event_msg(event: Event, pointer: Option<Pointer>) -> Self {
        Msg::Event(event, pointer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EditorSt {
    #[default]
    Idle,
    /// node being dragged, its position and the cursor position when it was grabbed,
    /// re-based whenever the camera changes mid drag
    Dragging {
        index: usize,
        grab_wsp: WSPoint,
        grab_csp: CSPoint,
        grab_camera: Camera,
    },
}

/// a node visual mounted on the canvas
#[derive(Debug)]
struct NodeVisual {
    kind: ShapeKind,
    position: RcRPosition,
    /// held for as long as the visual is mounted
    _binding: DragBinding,
}

/// link endpoints as seen by the canvas: only mounted visuals have a position
struct Mounted<'a> {
    chain: &'a Chain,
    visuals: &'a BTreeMap<usize, NodeVisual>,
}

impl LiveEndpoints for Mounted<'_> {
    fn node_count(&self) -> usize {
        self.chain.len()
    }
    fn live_position(&self, index: usize) -> Option<WSPoint> {
        self.visuals.get(&index).map(|v| v.position.get())
    }
}

/// struct holding editor state (the chain, its visuals and the drag in progress)
#[derive(Debug)]
pub struct Editor {
    chain: Chain,
    solver: Solver,
    bindings: DragBindings,
    /// mounted visuals by node index. nodes appended since the last tick are not mounted yet
    visuals: BTreeMap<usize, NodeVisual>,

    state: EditorSt,
    /// node under the cursor
    hovered: Option<usize>,
    /// anchor reported by the last constrained drag update
    anchor: Option<WSPoint>,

    /// offset from the predecessor at which new nodes spawn
    spawn_offset: WSVec,
    pick_radius: f32,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new(Solver::default(), WSVec::new(1.5, 0.0, 0.0), PICK_RADIUS)
    }
}

impl Editor {
    pub fn new(solver: Solver, spawn_offset: WSVec, pick_radius: f32) -> Self {
        Editor {
            chain: Chain::new(),
            solver,
            bindings: DragBindings::new(),
            visuals: BTreeMap::new(),
            state: EditorSt::Idle,
            hovered: None,
            anchor: None,
            spawn_offset,
            pick_radius,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn state(&self) -> EditorSt {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn anchor(&self) -> Option<WSPoint> {
        self.anchor
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &DragBindings {
        &self.bindings
    }

    /// links between mounted neighbours, at their current positions
    pub fn links(&self) -> Vec<Link> {
        links::derive(&Mounted {
            chain: &self.chain,
            visuals: &self.visuals,
        })
    }

    /// append a node of `kind`, spawned next to its predecessor
    pub fn add(&mut self, kind: ShapeKind) -> usize {
        let wsp = match self.chain.predecessor_position(self.chain.len()) {
            Some(pred) => self.solver.clamp(pred + self.spawn_offset, pred).0,
            None => WSPoint::origin(),
        };
        self.chain.append_at(kind, wsp)
    }

    /// delete the node at `index` along with every node after it
    pub fn delete(&mut self, index: usize) {
        let removed = self.chain.truncate_from(index);
        if removed.is_empty() {
            return;
        }
        // unmounting drops the drag bindings
        drop(self.visuals.split_off(&index));
        if let EditorSt::Dragging { index: i, .. } = self.state {
            if i >= index {
                self.state = EditorSt::Idle;
            }
        }
        if self.hovered.map_or(false, |i| i >= index) {
            self.hovered = None;
        }
        log::info!(
            "deleted {} node(s) from index {}, {} remain",
            removed.len(),
            index,
            self.chain.len()
        );
    }

    /// mount visuals for nodes appended since the last tick
    pub fn tick(&mut self) {
        for node in &self.chain {
            if !self.visuals.contains_key(&node.index()) {
                let visual = NodeVisual {
                    kind: node.kind(),
                    position: node.position().clone(),
                    _binding: self.bindings.acquire(node.index()),
                };
                self.visuals.insert(node.index(), visual);
            }
        }
    }

    /// returns the drag-bound node closest to the camera whose center is within pick radius of the pointer
    fn pick(&self, pointer: &Pointer) -> Option<usize> {
        self.visuals
            .iter()
            .filter(|(i, _)| self.bindings.is_bound(**i))
            .filter_map(|(i, v)| {
                let (csp, depth) = pointer.camera.project(v.position.get());
                ((csp - pointer.csp).length() <= self.pick_radius).then_some((*i, depth))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// move the node at `index` towards `proposed`, subject to the chain constraint
    fn drag_to(&mut self, index: usize, proposed: WSPoint) {
        if let Some(correction) = self.solver.apply(&self.chain, index, proposed) {
            self.anchor = Some(correction.anchor);
        }
    }

    fn events_handler(&mut self, event: Event, opt_pointer: Option<Pointer>) {
        match (self.state, event, opt_pointer) {
            (EditorSt::Idle, Event::Mouse(mouse::Event::CursorMoved { .. }), Some(pointer)) => {
                self.hovered = self.pick(&pointer);
            }
            (
                EditorSt::Idle,
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
                Some(pointer),
            ) => {
                if let Some(index) = self.pick(&pointer) {
                    if let Some(grab_wsp) = self.chain.position(index) {
                        log::debug!("drag started on node {}", index);
                        self.state = EditorSt::Dragging {
                            index,
                            grab_wsp,
                            grab_csp: pointer.csp,
                            grab_camera: pointer.camera,
                        };
                        self.hovered = Some(index);
                    }
                }
            }
            (
                EditorSt::Dragging {
                    index,
                    grab_wsp,
                    grab_csp,
                    grab_camera,
                },
                Event::Mouse(mouse::Event::CursorMoved { .. }),
                Some(pointer),
            ) => {
                if pointer.camera != grab_camera {
                    // view orbited, panned or zoomed: the node holds still and the drag restarts from here
                    if let Some(wsp) = self.chain.position(index) {
                        self.state = EditorSt::Dragging {
                            index,
                            grab_wsp: wsp,
                            grab_csp: pointer.csp,
                            grab_camera: pointer.camera,
                        };
                    }
                } else {
                    let proposed = grab_wsp + grab_camera.unproject_vector(pointer.csp - grab_csp);
                    self.drag_to(index, proposed);
                }
            }
            (
                EditorSt::Dragging { index, .. },
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
                opt_pointer,
            ) => {
                log::debug!("drag ended on node {}", index);
                self.state = EditorSt::Idle;
                // a clamped node may have been left behind the cursor
                self.hovered = opt_pointer.and_then(|p| self.pick(&p));
            }
            (
                EditorSt::Dragging {
                    index, grab_wsp, ..
                },
                Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key_code: iced::keyboard::KeyCode::Escape,
                    ..
                }),
                _,
            ) => {
                // grab position already satisfied the constraint
                if let Some(node) = self.chain.get(index) {
                    node.position().set(grab_wsp);
                }
                self.state = EditorSt::Idle;
                self.hovered = None;
            }
            (
                EditorSt::Idle,
                Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key_code: iced::keyboard::KeyCode::Delete | iced::keyboard::KeyCode::Backspace,
                    ..
                }),
                _,
            ) => {
                if let Some(index) = self.hovered {
                    self.delete(index);
                }
            }
            _ => {}
        }
    }

    fn draw_links(&self, camera: &Camera, frame: &mut Frame) {
        let link_stroke = Stroke {
            width: 1.5,
            style: stroke::Style::Solid(Color::WHITE),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        for link in self.links() {
            let c = Path::line(
                Point::from(camera.project(link.pts.0).0).into(),
                Point::from(camera.project(link.pts.1).0).into(),
            );
            frame.stroke(&c, link_stroke.clone());
        }
    }

    /// sphere around the predecessor of the dragged node
    fn draw_constraint(&self, camera: &Camera, frame: &mut Frame) {
        let EditorSt::Dragging { index, .. } = self.state else {
            return;
        };
        if let Some(anchor) = self.chain.predecessor_position(index) {
            let (csp, _) = camera.project(anchor);
            let c = Path::circle(
                Point::from(csp).into(),
                self.solver.max_distance() * camera.scale,
            );
            let stroke = Stroke {
                width: 1.0,
                style: stroke::Style::Solid(Color::from_rgba(1.0, 1.0, 0.5, 0.5)),
                line_cap: LineCap::Butt,
                line_dash: LineDash {
                    segments: &[6.0, 4.0],
                    offset: 0,
                },
                ..Stroke::default()
            };
            frame.stroke(&c, stroke);
        }
    }

    fn draw_nodes(&self, camera: &Camera, frame: &mut Frame) {
        let dragged = match self.state {
            EditorSt::Dragging { index, .. } => Some(index),
            EditorSt::Idle => None,
        };
        let mut draws: Vec<(usize, &NodeVisual, WSPoint, f32)> = self
            .visuals
            .iter()
            .map(|(i, v)| {
                let wsp = v.position.get();
                (*i, v, wsp, camera.project(wsp).1)
            })
            .collect();
        // far to near
        draws.sort_by(|a, b| b.3.total_cmp(&a.3));
        for (i, v, wsp, _) in draws {
            let g = shapes::graphics(v.kind);
            if dragged == Some(i) {
                g.draw_selected(wsp, camera, frame);
            } else if self.hovered == Some(i) {
                g.draw_preview(wsp, camera, frame);
            } else {
                g.draw_persistent(wsp, camera, frame);
            }
            let label = Text {
                content: format!("{}", i),
                position: Point::from(camera.project(wsp + WSVec::new(0.0, 1.3, 0.0)).0).into(),
                color: Color::from_rgba(1.0, 1.0, 1.0, 0.7),
                size: 14.0,
                ..Default::default()
            };
            frame.fill_text(label);
        }
    }
}

impl viewport::Content<Msg> for Editor {
    fn mouse_interaction(&self) -> mouse::Interaction {
        match self.state {
            EditorSt::Dragging { .. } => mouse::Interaction::Grabbing,
            EditorSt::Idle if self.hovered.is_some() => mouse::Interaction::Grab,
            EditorSt::Idle => mouse::Interaction::default(),
        }
    }

    fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::Event(event, opt_pointer) => self.events_handler(event, opt_pointer),
            Msg::Add(kind) => {
                self.add(kind);
            }
            Msg::Delete(index) => self.delete(index),
            Msg::Tick => self.tick(),
        }
        false
    }

    fn draw_active(&self, camera: &Camera, frame: &mut Frame) {
        self.draw_links(camera, frame);
        self.draw_constraint(camera, frame);
        self.draw_nodes(camera, frame);
    }

    fn draw_passive(&self, _camera: &Camera, _frame: &mut Frame) {}

    fn bounds(&self) -> WSBox {
        self.chain.bounding_box()
    }
}
