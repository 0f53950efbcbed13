use std::{io, path::PathBuf, process::Stdio, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{
    spawn,
    sync::mpsc,
    time::{interval, MissedTickBehavior},
};
use phishgame_core::{
    error::SubmissionError,
    session::{Event as GameEvent, Notice},
    AppConfig, AssetStore, Catalog, Effect, GameOverReason, GameRng, Image, Phase, RoundEngine,
    Side, TelegramNotifier,
};
use tracing::{debug, error, info, warn};

use crate::input::TextInput;

const INPUT_POLL: Duration = Duration::from_millis(250);
const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const CONSENT_TEXT: &str = "Submitting enters you into the ranking; \
    your name and phone number are used only to deliver prizes.";

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Phone,
    Consent,
    Restart,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Name,
        FormField::Phone,
        FormField::Consent,
        FormField::Restart,
        FormField::Submit,
    ];

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + delta).rem_euclid(len) as usize]
    }
}

enum AppEvent {
    Input(Event),
    Preloaded {
        round: u64,
        result: Result<[PathBuf; 2], String>,
    },
    Submitted {
        game: u64,
        result: Result<(), String>,
    },
}

/// Terminal frontend driving a [`RoundEngine`].
pub struct PhishApp {
    engine: Option<RoundEngine>,
    load_error: Option<String>,
    assets: AssetStore,
    notifier: Option<TelegramNotifier>,
    viewer: String,
    theme: Theme,
    status: String,
    focus: FormField,
    name_input: TextInput,
    phone_input: TextInput,
    previews: Option<(u64, [PathBuf; 2])>,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    clock_reset: bool,
    should_quit: bool,
}

impl PhishApp {
    pub fn new(
        catalog: Result<Catalog>,
        rng: GameRng,
        config: &AppConfig,
        assets: AssetStore,
        notifier: Option<TelegramNotifier>,
    ) -> Self {
        let (engine, load_error, status) = match catalog {
            Ok(catalog) => {
                let status = format!(
                    "Loaded {} screenshots across {} sites",
                    catalog.len(),
                    catalog.playable_sites()
                );
                (
                    Some(RoundEngine::new(catalog, rng, config.round.seconds)),
                    None,
                    status,
                )
            }
            Err(err) => (
                None,
                Some(format!("{err:#}")),
                "Failed to load game data".to_string(),
            ),
        };

        Self {
            engine,
            load_error,
            assets,
            notifier,
            viewer: config.viewer.command.clone(),
            theme: Theme::default(),
            status,
            focus: FormField::Name,
            name_input: TextInput::default(),
            phone_input: TextInput::default(),
            previews: None,
            event_tx: None,
            clock_reset: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let mut clock = interval(CLOCK_PERIOD);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.process_app_event(event),
                        None => break,
                    }
                }
                _ = clock.tick() => self.dispatch(GameEvent::Tick),
            }

            if self.clock_reset {
                clock.reset();
                self.clock_reset = false;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(event) => self.handle_input(event),
            AppEvent::Preloaded { round, result } => match result {
                Ok(paths) => {
                    self.previews = Some((round, paths));
                    self.dispatch(GameEvent::PreloadFinished {
                        round,
                        result: Ok(()),
                    });
                }
                Err(reason) => {
                    self.dispatch(GameEvent::PreloadFinished {
                        round,
                        result: Err(reason),
                    });
                }
            },
            AppEvent::Submitted { game, result } => {
                let awaited = self.engine.as_ref().is_some_and(|engine| {
                    engine.session().is_submitting() && engine.session().game() == game
                });
                if awaited {
                    self.status = match &result {
                        Ok(()) => "Result submitted".to_string(),
                        Err(_) => "Submission failed; press Submit to retry".to_string(),
                    };
                }
                self.dispatch(GameEvent::SubmissionFinished { game, result });
            }
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let effects = engine.dispatch(event);
        for effect in effects {
            self.run_effect(effect);
        }
        self.sync_form();
    }

    fn run_effect(&mut self, effect: Effect) {
        let Some(sender) = self.event_tx.clone() else {
            error!("event_channel_missing");
            return;
        };
        match effect {
            Effect::Preload { round, pair } => {
                debug!(round, site = pair.site_name(), "Preloading pair");
                let store = self.assets.clone();
                spawn(async move {
                    let result = store
                        .preload(&pair)
                        .await
                        .map(|loaded| loaded.paths)
                        .map_err(|err| err.to_string());
                    let _ = sender.send(AppEvent::Preloaded { round, result }).await;
                });
            }
            Effect::RoundStarted { round } => {
                debug!(round, "Round started");
                self.clock_reset = true;
            }
            Effect::Submit { game, submission } => match self.notifier.clone() {
                Some(notifier) => {
                    self.status = "Submitting result…".to_string();
                    spawn(async move {
                        let result = notifier
                            .send(&submission)
                            .await
                            .map_err(|err| err.to_string());
                        let _ = sender.send(AppEvent::Submitted { game, result }).await;
                    });
                }
                None => {
                    let reason = SubmissionError::NotConfigured.to_string();
                    self.status = "Submission unavailable".to_string();
                    self.dispatch(GameEvent::SubmissionFinished {
                        game,
                        result: Err(reason),
                    });
                }
            },
        }
    }

    /// Mirror session form changes (e.g. clearing after submit) into the inputs.
    fn sync_form(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let form = engine.session().form();
        if self.name_input.value() != form.name {
            self.name_input.set(&form.name);
        }
        if self.phone_input.value() != form.phone {
            self.phone_input.set(&form.phone);
        }
    }

    fn phase(&self) -> Option<Phase> {
        self.engine.as_ref().map(|engine| engine.session().phase())
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.phase() {
            None => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
                    self.should_quit = true;
                }
            }
            Some(Phase::Idle) => self.handle_intro_key(key),
            Some(Phase::Playing) => self.handle_play_key(key),
            Some(Phase::RoundOver) => self.handle_game_over_key(key),
        }
    }

    fn handle_intro_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => {
                info!("Player started a game");
                self.status = "Pick the genuine site!".to_string();
                self.dispatch(GameEvent::Start);
            }
            _ => {}
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') | KeyCode::Char('1') => {
                self.choose(Side::Left)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') | KeyCode::Char('2') => {
                self.choose(Side::Right)
            }
            KeyCode::Char('o') => self.open_preview(Side::Left),
            KeyCode::Char('p') => self.open_preview(Side::Right),
            KeyCode::Char('r') => self.dispatch(GameEvent::RetryRound),
            _ => {}
        }
    }

    fn choose(&mut self, side: Side) {
        let picked_real = self
            .engine
            .as_ref()
            .and_then(|engine| engine.session().pair())
            .map(|pair| pair.get(side).is_real());
        if let Some(correct) = picked_real {
            self.status = if correct {
                "Correct, that was the real site.".to_string()
            } else {
                "Caught! That one was the phishing copy.".to_string()
            };
            self.dispatch(GameEvent::Choose(side));
        }
    }

    fn open_preview(&mut self, side: Side) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let round = engine.session().round();
        let path = match &self.previews {
            Some((preview_round, paths)) if *preview_round == round => match side {
                Side::Left => paths[0].clone(),
                Side::Right => paths[1].clone(),
            },
            _ => {
                self.status = "Screenshots are still loading".to_string();
                return;
            }
        };

        let spawned = tokio::process::Command::new(&self.viewer)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => {
                let label = match side {
                    Side::Left => "left",
                    Side::Right => "right",
                };
                self.status = format!("Opened {label} screenshot");
            }
            Err(err) => {
                warn!(viewer = %self.viewer, ?err, "Failed to launch viewer");
                self.status = format!("Could not launch {}: {err}", self.viewer);
            }
        }
    }

    fn handle_game_over_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('r') {
            self.restart();
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.step(1),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.step(-1),
            KeyCode::Enter => match self.focus {
                FormField::Submit => self.dispatch(GameEvent::Submit),
                FormField::Restart => self.restart(),
                _ => self.focus = self.focus.step(1),
            },
            _ => match self.focus {
                FormField::Name => {
                    if edit_input(&mut self.name_input, key) {
                        let value = self.name_input.value().to_string();
                        self.dispatch(GameEvent::SetName(value));
                    }
                }
                FormField::Phone => {
                    if edit_input(&mut self.phone_input, key) {
                        let value = self.phone_input.value().to_string();
                        self.dispatch(GameEvent::SetPhone(value));
                    }
                }
                FormField::Consent => {
                    if key.code == KeyCode::Char(' ') {
                        let consent = self
                            .engine
                            .as_ref()
                            .map(|engine| engine.session().form().consent)
                            .unwrap_or(false);
                        self.dispatch(GameEvent::SetConsent(!consent));
                    }
                }
                FormField::Restart | FormField::Submit => {
                    if key.code == KeyCode::Char('q') {
                        self.should_quit = true;
                    }
                }
            },
        }
    }

    fn restart(&mut self) {
        info!("Player restarted");
        self.focus = FormField::Name;
        self.previews = None;
        self.status = "Pick the genuine site!".to_string();
        self.dispatch(GameEvent::Restart);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);

        match self.phase() {
            None => self.draw_load_error(frame, layout[0]),
            Some(Phase::Idle) => self.draw_intro(frame, layout[0]),
            Some(Phase::Playing) => self.draw_play(frame, layout[0]),
            Some(Phase::RoundOver) => self.draw_game_over(frame, layout[0]),
        }
        self.render_status(frame, layout[1]);
    }

    fn draw_load_error(&self, frame: &mut Frame, area: Rect) {
        let message = self.load_error.clone().unwrap_or_default();
        let lines = vec![
            Line::from(Span::styled(
                "Could not load game data",
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(message),
            Line::from(""),
            Line::from(Span::styled(
                "Check catalog.manifest / catalog.assets in the config file. Press q to quit.",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(72, 10, area));
    }

    fn draw_intro(&self, frame: &mut Frame, area: Rect) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let seconds = engine.session().timer().duration();
        let accent = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled("SPOT THE PHISH", accent)),
            Line::from(""),
            Line::from(Span::styled("How to play", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("1. Two screenshots of the same website are shown."),
            Line::from("2. One is the real site, the other is a phishing copy."),
            Line::from(format!(
                "3. Pick the real one within {seconds} seconds (←/→, o/p to view)."
            )),
            Line::from("4. Clear as many rounds as you can for a high score!"),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} screenshots · {} sites",
                    engine.catalog().len(),
                    engine.catalog().playable_sites()
                ),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", accent),
                Span::raw(" start   "),
                Span::styled("q", accent),
                Span::raw(" quit"),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Phishing Game"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(70, 15, area));
    }

    fn draw_play(&self, frame: &mut Frame, area: Rect) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let session = engine.session();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let timer = session.timer();
        let ratio = f64::from(timer.remaining()) / f64::from(timer.duration().max(1));
        let color = if timer.remaining() <= 2 {
            self.theme.danger
        } else {
            self.theme.warning
        };
        let score = session.score();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Round {} · correct {} · wrong {}",
                session.round(),
                score.correct,
                score.incorrect
            )))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("{}s left", timer.remaining()));
        frame.render_widget(gauge, layout[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);

        match session.pair() {
            Some(pair) => {
                self.render_choice(frame, panels[0], pair.get(Side::Left), "[1] Left", "o");
                self.render_choice(frame, panels[1], pair.get(Side::Right), "[2] Right", "p");
            }
            None => {
                let message = match session.notice() {
                    Some(Notice::AssetLoad(reason)) => vec![
                        Line::from(Span::styled(
                            "Failed to load images.",
                            Style::default().fg(self.theme.danger),
                        )),
                        Line::from(reason.clone()),
                        Line::from(""),
                        Line::from("Press r to try again."),
                    ],
                    _ => vec![Line::from("Loading screenshots…")],
                };
                let paragraph = Paragraph::new(message)
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, layout[1]);
            }
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(
                "Pick the genuine site!  ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "←/→ choose · o/p view · q quit",
                Style::default().fg(self.theme.muted),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        frame.render_widget(footer, layout[2]);
    }

    fn render_choice(
        &self,
        frame: &mut Frame,
        area: Rect,
        image: &Image,
        title: &str,
        view_key: &str,
    ) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                image.site_name().to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("difficulty: {}", image.difficulty()),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(format!("Press {view_key} to view the screenshot")),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_game_over(&self, frame: &mut Frame, area: Rect) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let session = engine.session();
        let score = session.score();
        let headline = match session.game_over_reason() {
            Some(GameOverReason::TimeUp) => "Game over! Time ran out.",
            Some(GameOverReason::Exhausted) => "Game over! You've seen every screenshot.",
            None => "Game over!",
        };

        let focus_style = |field: FormField| {
            if self.focus == field {
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            }
        };
        let checkbox = if session.form().consent { "[x]" } else { "[ ]" };
        let submit_label = if session.is_submitting() {
            " Submitting… "
        } else {
            " Save result "
        };

        let mut lines = vec![
            Line::from(Span::styled(
                headline,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Correct: {}", score.correct)),
            Line::from(format!("Wrong:   {}", score.incorrect)),
            Line::from(""),
            Line::from(vec![
                Span::raw("Name   "),
                Span::styled(
                    format!(" {:<30}", self.name_input.value()),
                    focus_style(FormField::Name),
                ),
            ]),
            Line::from(vec![
                Span::raw("Phone  "),
                Span::styled(
                    format!(" {:<30}", self.phone_input.value()),
                    focus_style(FormField::Phone),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("{checkbox} {CONSENT_TEXT}"),
                focus_style(FormField::Consent),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Restart ", focus_style(FormField::Restart)),
                Span::raw("   "),
                Span::styled(submit_label, focus_style(FormField::Submit)),
            ]),
            Line::from(""),
        ];

        if let Some(notice) = session.notice() {
            let (text, color) = match notice {
                Notice::Validation(err) => (err.to_string(), self.theme.warning),
                Notice::Submitted => (
                    "Result submitted successfully.".to_string(),
                    self.theme.success,
                ),
                Notice::SubmissionFailed(reason) => (
                    format!("Submission failed, please try again. ({reason})"),
                    self.theme.danger,
                ),
                Notice::AssetLoad(reason) => (reason.clone(), self.theme.danger),
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
        }
        lines.push(Line::from(Span::styled(
            "Tab move · Space toggle · Enter select · Ctrl-R restart · Esc quit",
            Style::default().fg(self.theme.muted),
        )));

        let form_area = centered_rect(76, 18, area);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, form_area);

        let cursor = match self.focus {
            FormField::Name => Some((6, self.name_input.cursor())),
            FormField::Phone => Some((7, self.phone_input.cursor())),
            _ => None,
        };
        if let Some((row, column)) = cursor {
            let x = form_area.x + 1 + 8 + column as u16;
            let y = form_area.y + row;
            if x < form_area.x + form_area.width.saturating_sub(1)
                && y < form_area.y + form_area.height.saturating_sub(1)
            {
                frame.set_cursor(x, y);
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let secondary = match self.engine.as_ref().map(|engine| engine.session()) {
            Some(session) if session.phase() == Phase::Playing => {
                format!("Shown so far: {}", session.used().len())
            }
            _ if self.notifier.is_none() => "Result submission not configured".to_string(),
            _ => String::new(),
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::raw(self.status.clone()),
            Span::raw("  "),
            Span::styled(secondary, Style::default().fg(self.theme.muted)),
        ]))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Apply an editing key to a text field. Returns true when the value changed.
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    let before = input.value().to_string();
    match key.code {
        KeyCode::Left => input.move_cursor(-1),
        KeyCode::Right => input.move_cursor(1),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Char(ch) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                input.insert(ch);
            }
        }
        _ => {}
    }
    input.value() != before
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.is_closed() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
