mod config;
mod editor;
mod editor_page;
mod shapes;
mod transforms;
mod viewport;

use std::io::Write;

use colored::Colorize;
use editor_page::{EditorPage, EditorPageMsg};
use iced::time::Instant;
use iced::{executor, Application, Command, Element, Settings, Subscription, Theme};

/// trait for a struct which is updated by messages and viewed as an iced element
pub trait IcedStruct<T> {
    fn update(&mut self, msg: T);
    fn view(&self) -> Element<T>;
}

pub fn main() -> iced::Result {
    init_logging();
    let path = config::path();
    let config = config::load(&path).unwrap_or_else(|e| {
        log::warn!("{}: {}, using defaults", path.display(), e);
        config::Config::default()
    });
    Catena::run(Settings {
        window: iced::window::Settings {
            size: (900, 600),
            ..iced::window::Settings::default()
        },
        antialiasing: true,
        flags: config,
        ..Settings::default()
    })
}

/// env_logger with colored level tags, `RUST_LOG` defaults to info
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "error".red(),
                log::Level::Warn => "warn".yellow(),
                log::Level::Info => "info".green(),
                log::Level::Debug => "debug".blue(),
                log::Level::Trace => "trace".magenta(),
            };
            writeln!(buf, "[{} {}] {}", level, record.target(), record.args())
        })
        .init();
}

struct Catena {
    page: EditorPage,
}

#[derive(Debug, Clone)]
pub enum Msg {
    EditorPageMsg(EditorPageMsg),
    /// a frame is about to be drawn
    Frame(Instant),
}

impl Application for Catena {
    type Executor = executor::Default;
    type Message = Msg;
    type Theme = Theme;
    type Flags = config::Config;

    fn new(flags: config::Config) -> (Self, Command<Msg>) {
        log::info!(
            "starting with max distance {} and {} startup shape(s)",
            flags.max_distance,
            flags.startup_chain.len()
        );
        (
            Catena {
                page: EditorPage::new(&flags),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        String::from("Catena")
    }

    fn update(&mut self, message: Msg) -> Command<Msg> {
        match message {
            Msg::EditorPageMsg(page_msg) => self.page.update(page_msg),
            Msg::Frame(_) => self.page.update(EditorPageMsg::Tick),
        }
        Command::none()
    }

    fn view(&self) -> Element<Msg> {
        self.page.view().map(Msg::EditorPageMsg)
    }

    fn subscription(&self) -> Subscription<Msg> {
        iced::window::frames().map(Msg::Frame)
    }
}
