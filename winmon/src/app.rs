//! App state and main loop: input handling, dispatching monitor requests, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::client::{MonitorClient, MonitorError};
use crate::form::{Field, ServerForm};
use crate::panel::SavedPanel;
use crate::profiles::ProfileStore;
use crate::types::{Credentials, MonitorReport};
use crate::ui::{
    banner::draw_banner, cpu::draw_cpu, disks::draw_disks, form::draw_form, header::draw_header,
    mem::draw_mem, saved::draw_saved,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Form,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Success(String),
}

/// A submission produced by input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub source: Source,
    pub credentials: Credentials,
}

#[derive(Debug)]
struct Outcome {
    source: Source,
    credentials: Credentials,
    result: Result<MonitorReport, MonitorError>,
}

pub struct App {
    client: MonitorClient,
    store: ProfileStore,

    pub form: ServerForm,
    pub panel: SavedPanel,
    pub focus: Focus,

    // Requests currently awaiting the backend, and whether one came from the form
    in_flight: usize,
    form_busy: bool,

    pub banner: Option<Banner>,
    pub report: Option<MonitorReport>,

    // Bumped after each successful save so the saved list reloads
    refresh_signal: u64,

    should_quit: bool,

    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(client: MonitorClient, store: ProfileStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            panel: SavedPanel::new(store.clone()),
            client,
            store,
            form: ServerForm::new(),
            focus: Focus::Form,
            in_flight: 0,
            form_busy: false,
            banner: None,
            report: None,
            refresh_signal: 0,
            should_quit: false,
            tx,
            rx,
        }
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn form_busy(&self) -> bool {
        self.form_busy
    }

    pub fn endpoint(&self) -> &url::Url {
        self.client.endpoint()
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (waits briefly so finished requests are picked up promptly)
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(k) = event::read()? {
                    if k.kind == KeyEventKind::Press {
                        if let Some(req) = self.handle_key(k, Instant::now()) {
                            self.submit(req);
                        }
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Finished requests, in arrival order
            while let Ok(outcome) = self.rx.try_recv() {
                self.apply(outcome);
            }
            self.panel.tick(Instant::now());

            terminal.draw(|f| self.draw(f))?;

            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Translate one key press into state changes, returning a request to send
    /// when the key submits.
    pub fn handle_key(&mut self, k: KeyEvent, now: Instant) -> Option<Submit> {
        if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('c')) {
            self.should_quit = true;
            return None;
        }
        match k.code {
            KeyCode::Esc => {
                if self.banner.take().is_none() {
                    self.should_quit = true;
                }
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Form => Focus::Saved,
                    Focus::Saved => Focus::Form,
                };
                return None;
            }
            _ => {}
        }
        match self.focus {
            Focus::Form => self.form_key(k),
            Focus::Saved => self.saved_key(k, now),
        }
    }

    fn form_key(&mut self, k: KeyEvent) -> Option<Submit> {
        match k.code {
            KeyCode::Up => self.form.focus_prev(),
            KeyCode::Down => self.form.focus_next(),
            KeyCode::Left if self.form.focus == Field::Transport => self.form.cycle_transport(false),
            KeyCode::Right if self.form.focus == Field::Transport => self.form.cycle_transport(true),
            KeyCode::Enter => {
                // submit stays disabled until the form's own request finishes
                if self.form_busy {
                    return None;
                }
                return self.form.validate().ok().map(|credentials| Submit {
                    source: Source::Form,
                    credentials,
                });
            }
            _ if self.form_busy => {}
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }
        None
    }

    fn saved_key(&mut self, k: KeyEvent, now: Instant) -> Option<Submit> {
        match k.code {
            KeyCode::Up | KeyCode::Char('k') => self.panel.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.panel.select_next(),
            KeyCode::Char('r') => self.panel.reload(),
            KeyCode::Char('d') | KeyCode::Delete => match self.panel.press_delete(now) {
                Ok(Some(id)) => info!(%id, "saved server deleted"),
                Ok(None) => {}
                Err(e) => self.banner = Some(Banner::Error(e.to_string())),
            },
            KeyCode::Enter => {
                let credentials = self.panel.activate()?;
                self.form.fill(&credentials);
                return Some(Submit {
                    source: Source::Saved,
                    credentials,
                });
            }
            _ => {}
        }
        None
    }

    /// Start a request in the background. The previous result and banners are cleared.
    pub fn submit(&mut self, req: Submit) {
        self.banner = None;
        self.report = None;
        self.in_flight += 1;
        if req.source == Source::Form {
            self.form_busy = true;
        }
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.monitor(&req.credentials).await;
            let _ = tx.send(Outcome {
                source: req.source,
                credentials: req.credentials,
                result,
            });
        });
    }

    fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if outcome.source == Source::Form {
            self.form_busy = false;
        }
        match outcome.result {
            Ok(report) => {
                info!(server = %report.server, "metrics received");
                self.banner = Some(match self.store.save(&outcome.credentials) {
                    Ok(_) => Banner::Success(format!("Successfully connected to {}", report.server)),
                    Err(e) => {
                        warn!("could not remember {}: {e}", outcome.credentials.server);
                        Banner::Error(format!(
                            "Connected to {}, but saving the server failed: {e}",
                            report.server
                        ))
                    }
                });
                self.refresh_signal += 1;
                self.panel.sync(self.refresh_signal);
                self.report = Some(report);
            }
            Err(e) => {
                warn!(server = %outcome.credentials.server, "monitor failed: {e}");
                self.banner = Some(Banner::Error(e.to_string()));
            }
        }
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, banner, body
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(if self.banner.is_some() { 1 } else { 0 }),
                Constraint::Min(10),
            ])
            .split(area);

        draw_header(f, rows[0], self);
        if let Some(b) = &self.banner {
            draw_banner(f, rows[1], b);
        }

        // Body: left = form + saved list, right = metrics
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[2]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(4)])
            .split(body[0]);
        draw_form(f, left[0], &self.form, self.focus == Focus::Form, self.form_busy);
        draw_saved(f, left[1], &self.panel, self.focus == Focus::Saved, Instant::now());

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // cpu
                Constraint::Length(4), // memory
                Constraint::Min(4),    // disks
            ])
            .split(body[1]);

        let snapshot = self.report.as_ref().map(|r| &r.snapshot);
        draw_cpu(f, right[0], snapshot);
        draw_mem(f, right[1], snapshot);
        draw_disks(f, right[2], snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::{CpuInfo, MemoryInfo, MetricsSnapshot, Transport};
    use std::sync::Arc;

    fn app() -> App {
        let client = MonitorClient::new(
            url::Url::parse("http://127.0.0.1:9").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        App::new(client, ProfileStore::new(Arc::new(MemoryStore::new())))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)), Instant::now());
        }
    }

    fn creds(server: &str) -> Credentials {
        Credentials {
            server: server.into(),
            username: "admin".into(),
            password: "x".into(),
            port: 5985,
            transport: Transport::Ntlm,
        }
    }

    fn ok(server: &str) -> Result<MonitorReport, MonitorError> {
        Ok(MonitorReport {
            server: server.into(),
            snapshot: MetricsSnapshot {
                cpu: CpuInfo { percent: 10.0 },
                memory: MemoryInfo {
                    total_gb: 8.0,
                    used_gb: 4.0,
                    free_gb: 4.0,
                    percent_used: 50.0,
                },
                disk: vec![],
            },
        })
    }

    #[test]
    fn enter_on_complete_form_submits() {
        let mut a = app();
        type_str(&mut a, "10.0.0.5");
        a.handle_key(key(KeyCode::Down), Instant::now());
        type_str(&mut a, "admin");
        a.handle_key(key(KeyCode::Down), Instant::now());
        type_str(&mut a, "x");
        let req = a.handle_key(key(KeyCode::Enter), Instant::now()).unwrap();
        assert_eq!(req.source, Source::Form);
        assert_eq!(req.credentials, creds("10.0.0.5"));
    }

    #[test]
    fn enter_on_invalid_form_only_shows_errors() {
        let mut a = app();
        assert!(a.handle_key(key(KeyCode::Enter), Instant::now()).is_none());
        assert!(a.form.errors.get(Field::Server).is_some());
    }

    #[test]
    fn successful_result_saves_and_refreshes_list() {
        let mut a = app();
        a.in_flight = 1;
        a.form_busy = true;
        a.apply(Outcome {
            source: Source::Form,
            credentials: creds("10.0.0.5"),
            result: ok("10.0.0.5"),
        });
        assert!(!a.loading() && !a.form_busy());
        assert_eq!(
            a.banner,
            Some(Banner::Success("Successfully connected to 10.0.0.5".into()))
        );
        assert_eq!(a.panel.entries().len(), 1);
        assert!(a.report.is_some());
    }

    #[test]
    fn failed_result_shows_category_message() {
        let mut a = app();
        a.in_flight = 1;
        a.apply(Outcome {
            source: Source::Saved,
            credentials: creds("10.0.0.5"),
            result: Err(MonitorError::Timeout),
        });
        assert_eq!(
            a.banner,
            Some(Banner::Error(
                "Connection timeout. The server took too long to respond.".into()
            ))
        );
        assert!(a.report.is_none());
        assert!(a.panel.entries().is_empty());
    }

    #[test]
    fn saved_panel_enter_fills_form_and_submits_with_password() {
        let mut a = app();
        a.store.save(&creds("srv01")).unwrap();
        a.panel.reload();
        a.handle_key(key(KeyCode::Tab), Instant::now());
        let req = a.handle_key(key(KeyCode::Enter), Instant::now()).unwrap();
        assert_eq!(req.source, Source::Saved);
        assert_eq!(req.credentials.password, "x");
        assert_eq!(a.form.server, "srv01");
    }

    #[test]
    fn delete_needs_two_presses() {
        let mut a = app();
        a.store.save(&creds("srv01")).unwrap();
        a.panel.reload();
        a.focus = Focus::Saved;
        let t0 = Instant::now();
        a.handle_key(key(KeyCode::Char('d')), t0);
        assert_eq!(a.panel.entries().len(), 1);
        a.handle_key(key(KeyCode::Char('d')), t0 + Duration::from_secs(1));
        assert!(a.panel.entries().is_empty());
    }

    #[test]
    fn esc_dismisses_banner_before_quitting() {
        let mut a = app();
        a.banner = Some(Banner::Error("x".into()));
        a.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(a.banner.is_none());
        assert!(!a.should_quit);
        a.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(a.should_quit);
    }

    #[test]
    fn typing_is_ignored_while_form_request_pending() {
        let mut a = app();
        a.form_busy = true;
        type_str(&mut a, "abc");
        assert!(a.form.server.is_empty());
        assert!(a.handle_key(key(KeyCode::Enter), Instant::now()).is_none());
    }
}
