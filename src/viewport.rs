//! the viewport implements common canvas functions - e.g. orbiting, panning, zooming
//! WorldSpace <-> CanvasSpace through an orthographic camera
//! separated from editor controls - wouldn't want orbiting the view to cancel dragging a node, etc.

use crate::transforms::{CSBox, CSPoint, Camera, Point, WSBox, WSPoint};
use crate::IcedStruct;

use iced::widget::canvas::{
    self, event, path::Builder, stroke, Cache, Event, Frame, Geometry, LineCap, Stroke, Text,
};
use iced::{mouse, Color, Length, Rectangle, Renderer, Theme};

/// viewport state
#[derive(Clone, Debug, Default)]
pub enum State {
    /// default viewport state
    #[default]
    Idle,
    /// viewport orbiting (right click-drag) - previous cursor position
    Orbiting(CSPoint),
    /// viewport panning (middle click-drag) - previous cursor position
    Panning(CSPoint),
}

/// viewport message
#[derive(Clone, Copy, Debug)]
pub enum Msg {
    /// do nothing
    None,
    /// change camera
    NewView(Camera),
}

/// cursor position together with the camera it was measured against
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    pub csp: CSPoint,
    pub camera: Camera,
}

/// message type that is the union of content and viewport messages - allows content and viewport to process events simultaneously
#[derive(Clone, Copy, Debug)]
pub struct CompositeMsg<M>
where
    M: ContentMsg,
{
    /// content msg
    pub content_msg: M,
    /// viewport message processed from canvas event
    pub viewport_msg: Msg,
}

pub trait Content<Msg> {
    /// returns the mouse interaction to display on canvas based on content state
    fn mouse_interaction(&self) -> mouse::Interaction;
    /// mutate self based on ContentMsg. Returns whether to clear passive cache
    fn update(&mut self, msg: Msg) -> bool;
    /// draw geometry onto active frame
    fn draw_active(&self, camera: &Camera, frame: &mut Frame);
    /// draw geometry onto passive frame
    fn draw_passive(&self, camera: &Camera, frame: &mut Frame);
    /// returns the bounding box of all elements in content
    fn bounds(&self) -> WSBox;
}

/// trait for message type of viewport content
pub trait ContentMsg {
    /// function to generate message to handle iced canvas event
    fn canvas_event_msg(event: Event, pointer: Option<Pointer>) -> Self;
}

/// The viewport handles the camera, zooming, orbiting, etc.
pub struct Viewport<C, M>
where
    C: Content<M>,
    M: ContentMsg,
{
    /// Contents displayed through this viewport
    pub content: C,
    /// phantom data to mark ContentMsg type
    content_msg: std::marker::PhantomData<M>,
    /// iced canvas graphical cache, cleared every frame
    pub active_cache: Cache,
    /// iced canvas graphical cache, cleared following camera changes
    pub passive_cache: Cache,
    /// iced canvas graphical cache, almost never cleared
    pub background_cache: Cache,

    /// the camera, not yet centered in canvas bounds
    camera: Camera,

    /// zoom in limit
    max_scale: f32,
    /// zoom out limit
    min_scale: f32,
}

impl<C, M> canvas::Program<CompositeMsg<M>> for Viewport<C, M>
where
    C: Content<M>,
    M: ContentMsg,
{
    type State = State;

    fn update(
        &self,
        state: &mut State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<CompositeMsg<M>>) {
        let opt_curpos: Option<CSPoint> = cursor.position_in(bounds).map(|p| Point::from(p).into());
        let bounds_csb = CSBox::from_points([
            CSPoint::origin(),
            CSPoint::new(bounds.width, bounds.height),
        ]);

        self.active_cache.clear();

        match opt_curpos {
            Some(curpos_csp) => {
                let msgs = self.events_handler(state, event, bounds_csb, curpos_csp);
                (event::Status::Captured, Some(msgs))
            }
            None => {
                // releasing outside the canvas still ends drags
                if let Event::Mouse(mouse::Event::ButtonReleased(_)) = event {
                    *state = State::Idle;
                    let msgs = CompositeMsg {
                        content_msg: M::canvas_event_msg(event, None),
                        viewport_msg: Msg::None,
                    };
                    (event::Status::Ignored, Some(msgs))
                } else {
                    (event::Status::Ignored, None)
                }
            }
        }
    }

    fn draw(
        &self,
        _state: &State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let camera = self.camera.centered_in(CSBox::new(
            CSPoint::origin(),
            CSPoint::new(bounds.width, bounds.height),
        ));

        let active = self.active_cache.draw(renderer, bounds.size(), |frame| {
            self.content.draw_active(&camera, frame);
        });

        let passive = self.passive_cache.draw(renderer, bounds.size(), |frame| {
            self.draw_grid(&camera, frame);
            self.draw_origin_marker(&camera, frame);
            self.content.draw_passive(&camera, frame);
        });

        let background = self
            .background_cache
            .draw(renderer, bounds.size(), |frame| {
                let f = canvas::Fill {
                    style: canvas::Style::Solid(Color::from_rgb(0.2, 0.2, 0.2)),
                    ..canvas::Fill::default()
                };
                frame.fill_rectangle(iced::Point::ORIGIN, bounds.size(), f);
            });

        vec![background, passive, active]
    }

    fn mouse_interaction(
        &self,
        viewport_st: &State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            match &viewport_st {
                State::Panning(_) | State::Orbiting(_) => mouse::Interaction::Grabbing,
                State::Idle => self.content.mouse_interaction(),
            }
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<C, M> IcedStruct<CompositeMsg<M>> for Viewport<C, M>
where
    C: Content<M>,
    M: ContentMsg,
{
    fn update(&mut self, msgs: CompositeMsg<M>) {
        match msgs.viewport_msg {
            Msg::NewView(camera) => {
                self.camera = camera;
                self.passive_cache.clear();
            }
            Msg::None => {}
        }
        if self.content.update(msgs.content_msg) {
            self.passive_cache.clear();
        }
        self.active_cache.clear();
    }

    fn view(&self) -> iced::Element<CompositeMsg<M>> {
        iced::widget::canvas(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl<C, M> Viewport<C, M>
where
    C: Content<M>,
    M: ContentMsg,
{
    pub fn new(content: C, camera: Camera, min_scale: f32, max_scale: f32) -> Self {
        Viewport {
            content,
            content_msg: std::marker::PhantomData,
            active_cache: Default::default(),
            passive_cache: Default::default(),
            background_cache: Default::default(),
            camera,
            min_scale,
            max_scale,
        }
    }

    /// generate message based on canvas event
    pub fn events_handler(
        &self,
        state: &mut State,
        event: Event,
        bounds_csb: CSBox,
        curpos_csp: CSPoint,
    ) -> CompositeMsg<M> {
        let mut viewport_msg = Msg::None;
        let mut stcp = state.clone();
        let camera = self.camera.centered_in(bounds_csb);
        match (&mut stcp, event) {
            // zooming
            (_, Event::Mouse(mouse::Event::WheelScrolled { delta })) => match delta {
                mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => {
                    let factor = 1.0 + y.clamp(-5.0, 5.0) / 5.;
                    viewport_msg = Msg::NewView(self.camera.zoom(
                        factor,
                        self.min_scale,
                        self.max_scale,
                    ));
                }
            },
            // orbiting
            (State::Idle, Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right))) => {
                stcp = State::Orbiting(curpos_csp);
            }
            (State::Orbiting(csp_prev), Event::Mouse(mouse::Event::CursorMoved { .. })) => {
                viewport_msg = Msg::NewView(self.camera.orbit(curpos_csp - *csp_prev));
                *csp_prev = curpos_csp;
            }
            (State::Orbiting(_), Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Right))) => {
                stcp = State::Idle;
            }
            // panning
            (State::Idle, Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Middle))) => {
                stcp = State::Panning(curpos_csp);
            }
            (State::Panning(csp_prev), Event::Mouse(mouse::Event::CursorMoved { .. })) => {
                viewport_msg = Msg::NewView(self.camera.pan(curpos_csp - *csp_prev));
                *csp_prev = curpos_csp;
            }
            (State::Panning(_), Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Middle))) => {
                stcp = State::Idle;
            }
            // fit view to content
            (
                State::Idle,
                Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key_code: iced::keyboard::KeyCode::F,
                    modifiers: _,
                }),
            ) => {
                viewport_msg = Msg::NewView(self.camera.fit(
                    self.content.bounds(),
                    bounds_csb,
                    self.min_scale,
                    self.max_scale,
                ));
            }
            _ => {}
        }
        *state = stcp;

        let content_msg = M::canvas_event_msg(
            event,
            Some(Pointer {
                csp: curpos_csp,
                camera,
            }),
        );
        CompositeMsg {
            content_msg,
            viewport_msg,
        }
    }

    /// returns the camera
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// draw the origin marker
    pub fn draw_origin_marker(&self, camera: &Camera, frame: &mut Frame) {
        let (origin, _) = camera.project(WSPoint::origin());
        let a = Text {
            content: String::from("origin"),
            position: Point::from(origin).into(),
            color: Color::from_rgba(1.0, 0.0, 0.0, 0.2),
            size: 12.0,
            ..Default::default()
        };
        frame.fill_text(a);
        let axes = [
            (WSPoint::new(1.0, 0.0, 0.0), Color::from_rgba(1.0, 0.3, 0.3, 0.6)),
            (WSPoint::new(0.0, 1.0, 0.0), Color::from_rgba(0.3, 1.0, 0.3, 0.6)),
            (WSPoint::new(0.0, 0.0, 1.0), Color::from_rgba(0.3, 0.3, 1.0, 0.6)),
        ];
        for (tip, color) in axes {
            let ref_stroke = Stroke {
                width: 2.0,
                style: stroke::Style::Solid(color),
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            let mut path_builder = Builder::new();
            path_builder.move_to(Point::from(origin).into());
            path_builder.line_to(Point::from(camera.project(tip).0).into());
            frame.stroke(&path_builder.build(), ref_stroke);
        }
    }

    /// draw the ground grid (xz plane) onto canvas
    pub fn draw_grid(&self, camera: &Camera, frame: &mut Frame) {
        const HALF_EXTENT: i32 = 10;
        let grid_stroke = Stroke {
            width: 1.0,
            style: stroke::Style::Solid(Color::from_rgba(1.0, 1.0, 1.0, 0.12)),
            ..Stroke::default()
        };
        let e = HALF_EXTENT as f32;
        let mut path_builder = Builder::new();
        for i in -HALF_EXTENT..=HALF_EXTENT {
            let t = i as f32;
            for (p0, p1) in [
                (WSPoint::new(t, 0.0, -e), WSPoint::new(t, 0.0, e)),
                (WSPoint::new(-e, 0.0, t), WSPoint::new(e, 0.0, t)),
            ] {
                path_builder.move_to(Point::from(camera.project(p0).0).into());
                path_builder.line_to(Point::from(camera.project(p1).0).into());
            }
        }
        frame.stroke(&path_builder.build(), grid_stroke);
    }
}
