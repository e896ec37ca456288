//! Editor GUI page
//! includes the add toolbar, the chain panel, and the canvas itself

use crate::config::Config;
use crate::editor::{self, Editor};
use crate::viewport::{self, CompositeMsg, Viewport};
use crate::IcedStruct;
use iced::keyboard::Modifiers;
use iced::widget::canvas::Event;
use iced::widget::{button, row, text, Row, Text};
use iced::{Element, Length};
use tether::{ShapeKind, Solver};

#[derive(Debug, Clone)]
pub enum EditorPageMsg {
    ViewportEvt(viewport::CompositeMsg<editor::Msg>),
    Add(ShapeKind),
    Delete(usize),
    Tick,
    CloseModal,
}

/// editor page
pub struct EditorPage {
    /// viewport
    viewport: Viewport<Editor, editor::Msg>,

    /// show key bindings
    show_modal: bool,
}

impl EditorPage {
    pub fn new(config: &Config) -> Self {
        let solver = config.solver().unwrap_or_else(|e| {
            log::warn!("{}, using default constraint", e);
            Solver::default()
        });
        let mut editor = Editor::new(solver, config.spawn_offset(), config.pick_radius);
        for kind in &config.startup_chain {
            editor.add(*kind);
        }
        EditorPage {
            viewport: Viewport::new(
                editor,
                config.camera(),
                config.camera.min_scale,
                config.camera.max_scale,
            ),
            show_modal: false,
        }
    }

    fn content_update(&mut self, content_msg: editor::Msg) {
        self.viewport.update(CompositeMsg {
            content_msg,
            viewport_msg: viewport::Msg::None,
        });
    }
}

impl IcedStruct<EditorPageMsg> for EditorPage {
    fn update(&mut self, msg: EditorPageMsg) {
        const NO_MODIFIER: Modifiers = Modifiers::empty();
        match msg {
            EditorPageMsg::Add(kind) => self.content_update(editor::Msg::Add(kind)),
            EditorPageMsg::Delete(index) => self.content_update(editor::Msg::Delete(index)),
            EditorPageMsg::Tick => self.content_update(editor::Msg::Tick),
            EditorPageMsg::CloseModal => {
                self.show_modal = false;
            }
            EditorPageMsg::ViewportEvt(msgs) => match msgs.content_msg {
                editor::Msg::Event(
                    Event::Keyboard(iced::keyboard::Event::KeyPressed {
                        key_code: iced::keyboard::KeyCode::H,
                        modifiers: NO_MODIFIER,
                    }),
                    _,
                ) => {
                    self.show_modal = !self.show_modal;
                }
                editor::Msg::Event(
                    Event::Keyboard(iced::keyboard::Event::KeyPressed {
                        key_code: iced::keyboard::KeyCode::P,
                        modifiers: NO_MODIFIER,
                    }),
                    _,
                ) => {
                    self.content_update(editor::Msg::Add(ShapeKind::Pyramid));
                }
                editor::Msg::Event(
                    Event::Keyboard(iced::keyboard::Event::KeyPressed {
                        key_code: iced::keyboard::KeyCode::D,
                        modifiers: NO_MODIFIER,
                    }),
                    _,
                ) => {
                    self.content_update(editor::Msg::Add(ShapeKind::Digit));
                }
                _ => {
                    self.viewport.update(msgs);
                }
            },
        }
    }

    fn view(&self) -> Element<EditorPageMsg> {
        let editor = &self.viewport.content;
        let anchor_str = match editor.anchor() {
            Some(a) => format!("anchor: ({:.2}, {:.2}, {:.2})", a.x, a.y, a.z),
            None => String::from("anchor: -"),
        };
        let status_str = match (editor.state(), editor.hovered()) {
            (editor::EditorSt::Dragging { index, .. }, _) => format!("dragging {}", index),
            (editor::EditorSt::Idle, Some(index)) => format!("over {}", index),
            (editor::EditorSt::Idle, None) => String::new(),
        };
        let canvas = self.viewport.view().map(EditorPageMsg::ViewportEvt);
        let panel = chain_panel::chain_panel(editor.chain().kinds(), EditorPageMsg::Delete);
        let infobar = row![
            text(format!("nodes: {}", editor.chain().len()))
                .size(16)
                .height(16)
                .vertical_alignment(iced::alignment::Vertical::Center),
            text(format!("links: {}", editor.links().len()))
                .size(16)
                .height(16)
                .vertical_alignment(iced::alignment::Vertical::Center),
            text(format!("{:04.1}", self.viewport.camera().scale))
                .size(16)
                .height(16)
                .vertical_alignment(iced::alignment::Vertical::Center),
            text(anchor_str)
                .size(16)
                .height(16)
                .vertical_alignment(iced::alignment::Vertical::Center),
            text(status_str)
                .size(16)
                .height(16)
                .vertical_alignment(iced::alignment::Vertical::Center),
        ]
        .spacing(10);
        let toolbar = Row::with_children(
            ShapeKind::ALL
                .iter()
                .map(|kind| {
                    button(text(format!("Add {}", kind)))
                        .on_press(EditorPageMsg::Add(*kind))
                        .into()
                })
                .collect(),
        )
        .spacing(10)
        .width(Length::Fill);

        let page = iced::widget::column![
            toolbar,
            iced::widget::row![panel, iced::widget::column![canvas, infobar,]]
        ];

        iced_aw::Modal::new(
            self.show_modal,
            page,
            iced_aw::Card::new(
                Text::new("Key Bindings"),
                Text::new(
                    "
                P: add pyramid
                D: add digit
                Del: delete hovered shape and its successors
                F: fit view
                Esc: cancel drag
                Right drag: orbit
                Middle drag: pan
                ",
                ),
            )
            .foot(Row::new().spacing(10).padding(5).width(Length::Fill))
            .max_width(300.0)
            .on_close(EditorPageMsg::CloseModal),
        )
        .backdrop(EditorPageMsg::CloseModal)
        .on_esc(EditorPageMsg::CloseModal)
        .into()
    }
}

mod chain_panel {
    use iced::widget::{button, component, text, Column, Component};
    use iced::{Element, Length, Renderer};
    use tether::ShapeKind;

    #[derive(Debug, Clone)]
    pub enum Evt {
        Delete(usize),
    }

    /// one delete button per node in the chain
    pub struct ChainPanel<Message> {
        kinds: Vec<ShapeKind>,
        on_delete: Box<dyn Fn(usize) -> Message>,
    }

    impl<Message> ChainPanel<Message> {
        pub fn new(kinds: Vec<ShapeKind>, on_delete: impl Fn(usize) -> Message + 'static) -> Self {
            Self {
                kinds,
                on_delete: Box::new(on_delete),
            }
        }
    }

    pub fn chain_panel<Message>(
        kinds: Vec<ShapeKind>,
        on_delete: impl Fn(usize) -> Message + 'static,
    ) -> ChainPanel<Message> {
        ChainPanel::new(kinds, on_delete)
    }

    impl<Message> Component<Message, Renderer> for ChainPanel<Message> {
        type State = ();
        type Event = Evt;

        fn update(&mut self, _state: &mut Self::State, event: Evt) -> Option<Message> {
            match event {
                Evt::Delete(index) => Some((self.on_delete)(index)),
            }
        }
        fn view(&self, _state: &Self::State) -> Element<Evt, Renderer> {
            Column::with_children(
                self.kinds
                    .iter()
                    .enumerate()
                    .map(|(i, kind)| {
                        button(text(format!("Delete {}", kind)))
                            .on_press(Evt::Delete(i))
                            .width(Length::Fill)
                            .into()
                    })
                    .collect(),
            )
            .spacing(4)
            .width(Length::Fixed(140.0))
            .into()
        }
    }

    impl<'a, Message> From<ChainPanel<Message>> for Element<'a, Message, Renderer>
    where
        Message: 'a,
    {
        fn from(chainpanel: ChainPanel<Message>) -> Self {
            component(chainpanel)
        }
    }
}
