use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    fs::File,
    io::{self, stdout, Stdout, Write},
    time::{Duration, Instant},
};

use blockfall::board::{BOARD_HEIGHT, BOARD_WIDTH};
use blockfall::collab::{AudioSink, DeadlineTimer, Sound};
use blockfall::config::Config;
use blockfall::input::{input_for_key, is_quit};
use blockfall::session::{Phase, Session, ViewCell};
use blockfall::shapes;

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const SHADOW_CHAR: &str = "░░";
const EMPTY_CHAR: &str = "  ";

// Poll timeout while the gravity timer is cancelled (game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

type Game = Session<TerminalBell, DeadlineTimer>;

// ============================================================================
// Audio
// ============================================================================

/// Rings the terminal bell for clears, hard drops and game over. Moves and
/// rotations are only logged.
struct TerminalBell {
    muted: bool,
}

impl AudioSink for TerminalBell {
    fn play(&mut self, sound: Sound) {
        log::trace!("sound {:?}", sound);
        if self.muted || matches!(sound, Sound::Move | Sound::Rotate) {
            return;
        }
        let mut out = stdout();
        // Best effort: a failed bell must not disturb the game.
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

fn tui_color(color: shapes::Color) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, game: &Game) {
    let area = frame.size();

    render_game(frame, game, area);
    if game.phase() == Phase::GameOver {
        render_game_over(frame, game, area);
    }
}

fn render_game(frame: &mut Frame, game: &Game, area: Rect) {
    let grid_display_width = (BOARD_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = BOARD_HEIGHT as u16 + 2;
    let preview_width = 12;
    let info_width = 14;
    let total_width = grid_display_width + preview_width + info_width + 4;
    let total_height = grid_display_height + 3;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // Layout: [Grid][Next][Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(preview_width),
        Constraint::Length(info_width),
    ])
    .split(game_row);

    render_grid(frame, game, horizontal[0]);
    render_next(frame, game, horizontal[1]);
    render_info(frame, game, horizontal[2]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2,
    };

    if controls_area.y + 1 < area.height {
        let controls = Paragraph::new(vec![Line::from(
            "←→/AD: Move | ↑/W: Rotate | ↓/S: Soft drop | Space: Hard drop | Q/ESC: Quit",
        )])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    ViewCell::Empty => Span::raw(EMPTY_CHAR),
                    ViewCell::Shadow => Span::styled(SHADOW_CHAR, Style::default().fg(Color::Gray)),
                    ViewCell::Locked(color) | ViewCell::Active(color) => {
                        Span::styled(BLOCK_CHAR, Style::default().fg(tui_color(color)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(shape) = game.next_shape() else {
        return;
    };
    let style = Style::default().fg(tui_color(shape.color));

    let mut lines: Vec<Line> = vec![Line::from("")];
    for row in shape.matrix {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for &filled in row.iter() {
            if filled {
                spans.push(Span::styled(BLOCK_CHAR, style));
            } else {
                spans.push(Span::raw(EMPTY_CHAR));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", game.score)),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", game.lines_cleared)),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", game.level)),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, game: &Game, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", game.score)),
        Line::from(format!("Lines: {}", game.lines_cleared)),
        Line::from(format!("Level: {}", game.level)),
        Line::from(""),
        Line::from(Span::styled(
            "Press R to restart",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(24, 13, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Main Loop
// ============================================================================

fn init_logging(config: &Config) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, game: &mut Game) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, game))?;

        let timeout = game
            .timer()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if is_quit(key) {
                        return Ok(());
                    }
                    if let Some(input) = input_for_key(key) {
                        game.handle_input(input);
                    }
                }
            }
        }

        if game.timer_mut().fire_if_due(Instant::now()) {
            game.gravity_tick();
        }
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let mut game: Game = Session::with_provider(
        Box::new(config.shape_provider()),
        TerminalBell { muted: config.mute },
        DeadlineTimer::new(),
    );

    enable_raw_mode().context("cannot enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    // Always try to restore the terminal, even if the loop failed.
    let restored: io::Result<()> = disable_raw_mode()
        .and_then(|_| stdout().execute(LeaveAlternateScreen).map(|_| ()));

    log::info!(
        "exiting: score {}, lines {}, level {}",
        game.score,
        game.lines_cleared,
        game.level
    );
    result?;
    restored.context("cannot restore terminal")
}
