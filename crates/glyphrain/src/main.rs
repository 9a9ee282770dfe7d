use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use glyphrain_core::RainConfig;
use glyphrain_engine::{FixedTicker, RainView, SymbolRng, seeded_rng};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};

mod canvas;
mod config;
mod logging;

use canvas::RainLayer;
use config::AppConfig;

/// Terminal cells are square symbols, so the surface is unscaled.
const DENSITY: f32 = 1.0;

/// How long to wait for input while the rain is paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init() {
        info!("logging to {}", path.display());
    }
    let config = AppConfig::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Paused from the keyboard.
    paused: bool,
    /// Whether the terminal has focus.
    focused: bool,
    /// Something outside the rain changed and needs drawing.
    dirty: bool,
    /// Loaded configuration.
    config: AppConfig,
    /// Whether `config` changed since it was loaded.
    config_changed: bool,
    /// The rain itself.
    view: RainView<SymbolRng>,
    /// Paces engine ticks.
    ticker: FixedTicker,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: AppConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!("rain seed {seed}");
        let rain = RainConfig::DEFAULT;
        Self {
            running: false,
            paused: false,
            focused: true,
            dirty: true,
            view: RainView::new(rain, DENSITY, config.theme.palette(), seeded_rng(seed)),
            ticker: FixedTicker::new(rain.tick_interval()),
            config,
            config_changed: false,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        execute!(io::stdout(), EnableFocusChange)?;
        let result = self.run_loop(&mut terminal);
        let restored = execute!(io::stdout(), DisableFocusChange);
        first_error(result, restored)?;
        self.save_config()
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        self.sync_activity();

        self.running = true;
        while self.running {
            let redraw = self.view.take_redraw_request() | std::mem::take(&mut self.dirty);
            if redraw {
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
            if self.ticker.poll(Instant::now()) {
                self.view.tick();
            }
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(RainLayer::new(&self.view), area);

        if self.paused {
            let color = Color::from(self.view.palette().highlight);
            let help = Line::from(vec![
                "space".bold().fg(color),
                " resume  ".dark_gray(),
                "c".bold().fg(color),
                format!(" theme ({})  ", self.config.theme.name()).dark_gray(),
                "q".bold().fg(color),
                " quit".dark_gray(),
            ])
            .centered();
            let [_, bottom] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            frame.render_widget(help, bottom);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks until the next tick is due, or for [`IDLE_POLL`] while paused.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.ticker.timeout(Instant::now()).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.resize(width, height),
                Event::FocusGained => {
                    self.focused = true;
                    self.sync_activity();
                }
                Event::FocusLost => {
                    self.focused = false;
                    self.sync_activity();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ') | KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('c')) => self.cycle_theme(),
            _ => {}
        }
    }

    /// Rebuild the rain for a terminal of `width` x `height` cells.
    fn resize(&mut self, width: u16, height: u16) {
        let cell = self.view.engine().geometry().symbol_size;
        let width = f32::from(width) * cell;
        let height = f32::from(height) * cell;
        self.view.on_size_changed(width, height);
        if self.ticker.is_running() {
            self.ticker.start(Instant::now());
        }
    }

    /// Start or stop ticking to match focus and pause state.
    fn sync_activity(&mut self) {
        let should_run = self.focused && !self.paused;
        if should_run && !self.view.is_active() {
            self.view.on_activate();
            self.ticker.start(Instant::now());
        } else if !should_run && self.view.is_active() {
            self.view.on_deactivate();
            self.ticker.stop();
        }
        self.dirty = true;
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.sync_activity();
    }

    /// Cycle through available color themes.
    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.config_changed = true;
        self.view.set_palette(self.config.theme.palette());
    }

    /// Persist a theme picked during this session.
    fn save_config(&self) -> color_eyre::Result<()> {
        if !self.config_changed {
            return Ok(());
        }
        let Some(path) = AppConfig::path() else {
            return Ok(());
        };
        self.config.save_to(&path)?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Report the loop's error ahead of a failure to restore terminal modes.
fn first_error(result: color_eyre::Result<()>, restored: io::Result<()>) -> color_eyre::Result<()> {
    result?;
    restored?;
    Ok(())
}
