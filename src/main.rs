mod app;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing_appender::non_blocking::WorkerGuard;

use wordrush::config::{Config, CorpusMode};
use wordrush::generator::paragraph;
use wordrush::report::ReportStatus;

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::results::ResultsPanel;
use ui::components::stats_header::StatsHeader;
use ui::components::time_bar::TimeBar;
use ui::components::typing_area::TypingArea;
use ui::layout::AppLayout;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(
    name = "wordrush",
    version,
    about = "Timed terminal typing test with live WPM and accuracy"
)]
struct Cli {
    #[arg(short, long, help = "Session length in seconds")]
    duration: Option<u32>,

    #[arg(short, long, value_enum, help = "Where words come from")]
    mode: Option<CorpusMode>,

    #[arg(long, help = "Text file to type once (finite mode)")]
    text_file: Option<PathBuf>,

    #[arg(short, long, help = "Participant label sent with the result")]
    label: Option<String>,

    #[arg(long, help = "Allow starting again after the results screen")]
    repeatable: bool,

    #[arg(long, help = "Collector URL to POST results to")]
    result_url: Option<String>,

    #[arg(long, help = "Word list URL for random mode")]
    word_list_url: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) -> Option<PathBuf> {
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(mode) = self.mode {
            config.corpus_mode = mode;
        }
        if self.text_file.is_some() && self.mode.is_none() {
            config.corpus_mode = CorpusMode::Finite;
        }
        if let Some(label) = self.label {
            config.participant_label = Some(label);
            config.ask_participant = false;
        }
        if self.repeatable {
            config.repeatable = true;
        }
        if self.result_url.is_some() {
            config.result_url = self.result_url;
        }
        if self.word_list_url.is_some() {
            config.word_list_url = self.word_list_url;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        self.text_file
    }
}

fn init_logging() -> Option<WorkerGuard> {
    let log_dir = dirs::data_dir()?.join("wordrush");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "wordrush.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_panic(info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let mut config = Config::load().context("failed to load config")?;
    let text_file = cli.apply(&mut config);
    config.normalize_paragraph(&paragraph::available());
    config.validate()?;

    let mut app = App::new(config, text_file)?;
    tracing::info!(mode = app.mode_name(), "wordrush starting");

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.tracker.in_flight() > 0 {
        eprintln!("Waiting for result submission...");
    }
    if let ReportStatus::Failed(reason) = app.wait_for_reports(Duration::from_secs(10)) {
        eprintln!("Result was not saved: {reason}");
    }

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key)?,
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Only process Press events; Repeat would inflate the keystroke counters
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    match app.screen {
        AppScreen::Participant => match app.label_input.handle(key) {
            InputResult::Submit => app.submit_label()?,
            InputResult::Cancel => app.should_quit = true,
            InputResult::Continue => {}
        },
        AppScreen::Typing => match key.code {
            KeyCode::Esc => app.should_quit = true,
            _ => app.type_key(event::key_input(&key)),
        },
        AppScreen::Results => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Enter => app.restart()?,
            _ => {}
        },
    }
    Ok(())
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Participant => render_participant(frame, app),
        AppScreen::Typing => render_typing(frame, app),
        AppScreen::Results => {
            render_typing(frame, app);
            render_results(frame, app);
        }
    }
}

fn render_participant(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let centered = ui::layout::centered_rect(50, 30, frame.area());

    let block = Block::bordered()
        .title(" Participant ")
        .border_style(Style::default().fg(colors.accent))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        "  Enter a name or team (optional):",
        Style::default().fg(colors.fg),
    )))
    .render(layout[0], frame.buffer_mut());

    let (before, at, after) = app.label_input.render_parts();
    let cursor_style = Style::default()
        .fg(colors.cursor_fg)
        .bg(colors.cursor_bg);
    let input_line = Line::from(vec![
        Span::raw("  > "),
        Span::styled(before, Style::default().fg(colors.accent)),
        Span::styled(at.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
        Span::styled(after, Style::default().fg(colors.accent)),
    ]);
    Paragraph::new(input_line).render(layout[1], frame.buffer_mut());

    let footer = format!(
        "  [Enter] Start {}s test  [Esc] Quit",
        app.config.duration_secs
    );
    Paragraph::new(Line::from(Span::styled(
        footer,
        Style::default().fg(colors.upcoming),
    )))
    .render(layout[3], frame.buffer_mut());
}

fn render_typing(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let session = app.runner.session();
    let app_layout = AppLayout::new(area);

    let header = StatsHeader::new(session, app.mode_name(), &app.theme)
        .compact(app_layout.progress.is_none());
    frame.render_widget(header, app_layout.header);

    frame.render_widget(TypingArea::new(session, &app.theme), app_layout.main);

    if let Some(progress_area) = app_layout.progress {
        let bar = TimeBar::new(session.seconds_remaining(), session.duration_limit, &app.theme);
        frame.render_widget(bar, progress_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Space] Next word  [Backspace] Delete  [Esc] Quit ",
        Style::default()
            .fg(colors.upcoming)
            .add_modifier(Modifier::DIM),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    let Some(summary) = app.runner.last_summary() else {
        return;
    };
    let centered = ui::layout::centered_rect(50, 60, frame.area());
    let panel = ResultsPanel::new(
        summary,
        app.report_status(),
        app.config.repeatable,
        &app.theme,
    );
    frame.render_widget(ratatui::widgets::Clear, centered);
    frame.render_widget(panel, centered);
}
