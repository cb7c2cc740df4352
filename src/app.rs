use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::time::Duration;

use helpcenter::config::Config;
use helpcenter::navigation::NavigationController;
use helpcenter::view::{self, Screen};

use crate::ui::browser::row_count;
use crate::ui::{
    install_panic_hook, open_external, Activation, Browser, HeaderBar, HelpOverlay, SearchBar,
    StatusBar, TerminalGuard,
};

pub struct App {
    config: Config,
    nav: NavigationController,
    /// Set when the content document failed to load
    load_error: Option<String>,
    browser: Browser,
    help: HelpOverlay,
    search_bar: SearchBar,
    /// One-shot message shown in the status bar until the next key
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, nav: NavigationController, load_error: Option<String>) -> Self {
        Self {
            config,
            nav,
            load_error,
            browser: Browser::new(),
            help: HelpOverlay::new(),
            search_bar: SearchBar::new(),
            status_message: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let (_guard, mut terminal) = TerminalGuard::enter()?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            let screen = self.screen();
            terminal.draw(|f| self.draw(f, &screen))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }

        terminal.show_cursor()?;
        Ok(())
    }

    /// Rebuilt from navigation state on every frame
    fn screen(&self) -> Screen {
        if self.load_error.is_some() {
            return view::load_failed_screen();
        }
        view::render(&self.nav, self.config.render_options())
    }

    fn draw(&mut self, frame: &mut Frame, screen: &Screen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        HeaderBar {
            title: &screen.title,
            back_label: screen.back_label.as_deref(),
            search: &self.search_bar,
        }
        .render(frame, chunks[0]);

        self.browser.render(frame, chunks[1], screen);

        StatusBar {
            message: self.status_message.as_deref(),
            progress: screen.progress.as_deref(),
            searching: self.search_bar.active,
        }
        .render(frame, chunks[2]);

        self.help.render(frame);
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        self.status_message = None;

        // Help overlay swallows the next key
        if self.help.visible {
            self.help.visible = false;
            return Ok(());
        }

        if self.search_bar.active {
            return self.handle_search_key(key);
        }

        let rows = row_count(&self.screen());

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help.toggle();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.browser.select_prev(rows);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.browser.select_next(rows);
            }
            KeyCode::Enter | KeyCode::Char('l') => {
                self.activate()?;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                self.toggle_selected();
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
                self.nav.back();
                self.after_navigation();
            }
            KeyCode::Char('g') => {
                self.nav.go_home();
                self.after_navigation();
            }
            KeyCode::Char('/') if self.load_error.is_none() => {
                self.search_bar.focus();
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyCode) -> Result<()> {
        let rows = row_count(&self.screen());

        match key {
            KeyCode::Esc => {
                self.search_bar.clear();
                self.nav.clear_search();
                self.after_navigation();
            }
            KeyCode::Enter => {
                if self.nav.location().is_search() {
                    self.nav.select_hit_at(self.browser.selected());
                    self.after_navigation();
                }
                self.search_bar.clear();
            }
            KeyCode::Up => {
                self.browser.select_prev(rows);
            }
            KeyCode::Down => {
                self.browser.select_next(rows);
            }
            KeyCode::Backspace => {
                self.search_bar.pop();
                self.run_search();
            }
            KeyCode::Char(c) => {
                self.search_bar.push(c);
                self.run_search();
            }
            _ => {}
        }

        Ok(())
    }

    fn run_search(&mut self) {
        self.nav.search(self.search_bar.text());
        self.browser.reset();
    }

    fn activate(&mut self) -> Result<()> {
        let screen = self.screen();
        let Some(activation) = self.browser.activation(&screen) else {
            return Ok(());
        };

        match activation {
            Activation::Select(slug) => {
                self.nav.select(&slug);
                self.after_navigation();
            }
            Activation::ToggleStep(index) => {
                self.toggle_step(index);
            }
            Activation::OpenHref(href) => {
                if let Err(e) = open_external(&href) {
                    tracing::warn!(href, error = %e, "Could not open link");
                    self.status_message = Some(format!("Could not open {href}"));
                }
            }
            Activation::SelectHit(n) => {
                self.nav.select_hit_at(n);
                self.after_navigation();
            }
        }

        Ok(())
    }

    fn toggle_selected(&mut self) {
        let screen = self.screen();
        if let Some(Activation::ToggleStep(index)) = self.browser.activation(&screen) {
            self.toggle_step(index);
        }
    }

    fn toggle_step(&mut self, index: usize) {
        if let Some(done) = self.nav.toggle_step(index) {
            self.status_message = Some(if done {
                "Marked as done".to_string()
            } else {
                "Marked as not done".to_string()
            });
        }
    }

    /// Reset the list after a location change and honor a pending focus
    fn after_navigation(&mut self) {
        self.browser.reset();
        if let Some(index) = self.nav.take_focus() {
            self.browser.select(index);
        }
        if !self.nav.location().is_search() {
            self.search_bar.clear();
        }
    }
}
