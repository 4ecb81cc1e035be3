use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rainpage_background::{BackgroundAnimator, GlyphSet, RainSettings};
use rainpage_config::{Config, ThemeConfig};
use rainpage_core::{ColorTheme, Viewport};
use rainpage_effects::{Document, PageEffects, PageLayout, ScrollState};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
};

use crate::page_view::PageView;

/// Widest the page column gets.
const MAX_CONTENT_WIDTH: u16 = 72;
/// Poll timeout while the rain is off or paused.
const IDLE_TICK_MS: u64 = 33;
/// Rows moved by a page key.
const PAGE_STEP: i64 = 10;

/// Build the rain settings from the config.
pub fn rain_settings(config: &Config) -> RainSettings {
    RainSettings {
        cell_size: config.rain.cell_size,
        fade_alpha: config.rain.fade_alpha,
        reset_probability: config.rain.reset_probability,
        frame_rate: config.rain.frame_rate,
        glyph_color: config.theme.glyph,
        fade_color: config.theme.background,
        glyphs: config
            .rain
            .glyphs
            .as_deref()
            .map(GlyphSet::from_chars)
            .unwrap_or_default(),
    }
}

/// Split the screen into the page column and the help line.
fn page_areas(area: Rect) -> (Rect, Rect) {
    let [body, help] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    let width = body.width.saturating_sub(4).min(MAX_CONTENT_WIDTH);
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(body);
    (column, help)
}

/// Owns the background, the page and every effect controller.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    started: Instant,
    background: Option<BackgroundAnimator>,
    document: Document,
    layout: PageLayout,
    scroll: ScrollState,
    effects: PageEffects,
    rng: StdRng,
    theme: ThemeConfig,
    color_theme: ColorTheme,
    page_area: Rect,
}

impl App {
    /// Construct the page for a terminal of the given size.
    pub fn new(config: &Config, mut document: Document, area: Rect) -> Self {
        let background = config
            .rain
            .enabled
            .then(|| BackgroundAnimator::for_terminal(rain_settings(config), Viewport::from(area)));

        let (page_area, _) = page_areas(area);
        let effects = PageEffects::new(&mut document, config.page.smooth_scroll_ms, 0);
        let layout = PageLayout::compute(&document, page_area.width);
        let scroll = ScrollState::new(u32::from(page_area.height), layout.total_height());

        Self {
            running: false,
            started: Instant::now(),
            background,
            document,
            layout,
            scroll,
            effects,
            rng: StdRng::from_entropy(),
            theme: config.theme.clone(),
            color_theme: ColorTheme::default(),
            page_area,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let now_ms = self.now_ms();
            self.update(now_ms);
            terminal.draw(|frame| self.render(frame, now_ms))?;
            self.document.mark_loaded();
            self.handle_crossterm_events()?;
        }
        if let Some(background) = &mut self.background {
            background.stop();
        }
        tracing::info!("goodbye");
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Advance the background and the page effects to `now_ms`.
    fn update(&mut self, now_ms: u64) {
        if let Some(background) = &mut self.background {
            background.tick(now_ms);
        }
        self.relayout();
        self.effects.update(
            &mut self.document,
            &self.layout,
            &mut self.scroll,
            &mut self.rng,
            now_ms,
        );
    }

    fn relayout(&mut self) {
        self.layout = PageLayout::compute(&self.document, self.page_area.width);
        self.scroll
            .set_dimensions(u32::from(self.page_area.height), self.layout.total_height());
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, now_ms: u64) {
        let area = frame.area();
        if let Some(background) = &self.background {
            frame.render_widget(background.surface(), area);
        }

        let (page_area, help_area) = page_areas(area);
        PageView {
            document: &self.document,
            layout: &self.layout,
            scroll_offset: self.scroll.offset(),
            theme: &self.theme,
            now_ms,
        }
        .render(page_area, frame.buffer_mut());

        let color = ratatui::style::Color::from(self.theme.accent);
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "j/k".bold().fg(color),
            " scroll  ".dark_gray(),
            "1-9".bold().fg(color),
            " jump  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "space".bold().fg(color),
            " pause".dark_gray(),
        ])
        .centered()
        .style(Style::new().bg(self.theme.background.into()));
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next background frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let now_ms = self.now_ms();
        let timeout = match &self.background {
            Some(background) if background.is_running() && !background.is_paused() => {
                background.time_until_next_frame(now_ms)
            }
            _ => IDLE_TICK_MS,
        };

        if event::poll(Duration::from_millis(timeout))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(Rect::new(0, 0, width, height)),
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
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_by(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_by(-1),
            (_, KeyCode::PageDown) => self.scroll_by(PAGE_STEP),
            (_, KeyCode::PageUp) => self.scroll_by(-PAGE_STEP),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.scroll_to(0),
            (_, KeyCode::End | KeyCode::Char('G')) => self.scroll_to(u32::MAX),
            (_, KeyCode::Char(c @ '1'..='9')) => self.jump_to_anchor(c),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            _ => {}
        }
    }

    fn on_resize(&mut self, area: Rect) {
        if let Some(background) = &mut self.background {
            background.init(Viewport::from(area));
        }
        self.page_area = page_areas(area).0;
        self.relayout();
    }

    fn scroll_by(&mut self, delta: i64) {
        self.effects.cancel_scroll();
        self.scroll.scroll_by(delta);
    }

    fn scroll_to(&mut self, offset: u32) {
        self.effects.cancel_scroll();
        self.scroll.scroll_to(offset);
    }

    /// Smooth-scroll to the target of the n-th in-page anchor.
    fn jump_to_anchor(&mut self, digit: char) {
        let Some(n) = digit.to_digit(10).and_then(|d| usize::try_from(d).ok()) else {
            return;
        };
        let now_ms = self.now_ms();
        self.effects
            .activate_anchor(n - 1, &self.document, &self.layout, &self.scroll, now_ms);
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
        self.theme.glyph = self.color_theme.rgb();
        if let Some(background) = &mut self.background {
            background.set_glyph_color(self.color_theme.rgb());
        }
        tracing::debug!(theme = self.color_theme.name(), "cycled color theme");
    }

    /// Pause or resume the background.
    fn toggle_pause(&mut self) {
        if let Some(background) = &mut self.background {
            background.set_paused(!background.is_paused());
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
