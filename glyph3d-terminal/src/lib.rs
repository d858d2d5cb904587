/// Terminal front end: an ASCII painting surface driven by a keyboard panel
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use glyph3d_core::{Scene, SceneConfig};
use log::{debug, info};
use std::fs::File;
use std::io::{self, stdout, Write};
use std::time::Duration;

pub mod panel;
pub mod renderer;

pub use panel::{Action, ControlPanel, Target};
pub use renderer::AsciiRenderer;

/// How long to wait for input before checking for a pending redraw
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str =
    "1/2/c=Select WASD/ER=Rotate +/-=Scale hjk/HJK=Size x/y=Mirror m=Mode 0=Reset q=Quit";

/// Logger writing to `file`, filtered by `RUST_LOG`. The frame owns the
/// alternate screen, so log lines must not go to stderr.
pub fn file_logger(file: File) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    builder
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    panel: ControlPanel,
    renderer: AsciiRenderer,
    running: bool,
    needs_redraw: bool,
}

impl TerminalApp {
    pub fn new(config: SceneConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height as usize);
        let (px_width, px_height) = renderer.pixel_size();

        Ok(Self {
            panel: ControlPanel::new(&config),
            scene: Scene::with_config(config, px_width, px_height),
            renderer,
            running: true,
            needs_redraw: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if event::poll(POLL_INTERVAL)? {
                self.handle_event(event::read()?);
            }

            if self.needs_redraw {
                self.render()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                match self.panel.handle_key(code) {
                    Action::Quit => self.running = false,
                    Action::Apply(command) => {
                        debug!("key {code:?} -> {command:?}");
                        self.scene.apply(command);
                        self.needs_redraw = true;
                    }
                    // The status line shows the selection
                    Action::Select => self.needs_redraw = true,
                    Action::Ignore => {}
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                let (px_width, px_height) = self.renderer.pixel_size();
                info!("resized to {width}x{height} cells");
                self.scene.notify_resize(px_width, px_height);
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.scene.render();
        let mode = frame.mode;
        frame.paint(&mut self.renderer);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let target = match self.panel.target() {
            Target::Letter(letter) => format!("letter {letter:?}"),
            Target::Camera => "camera".to_string(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Glyph3D | {target} | {} | {HELP}",
                mode.label()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
