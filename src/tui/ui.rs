//! UI rendering using ratatui
//!
//! Screens:
//! - Home: category list
//! - Levels: puzzles of one category with solved/unlocked/locked markers
//! - Puzzle: slots, key pool, progress and attempts
//! - Error: error message display

use crate::app::round::RoundStatus;
use crate::app::screen::{AppCoordinator, PuzzleView, Screen, Tone};
use crate::game::slots::Slot;
use crate::storage::progress::LevelStatus;
use crate::storage::KeyValueStore;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

/// Render the appropriate screen based on app state
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &AppCoordinator<S>) {
    match &app.screen {
        Screen::Home { selected } => render_home(frame, app, *selected),
        Screen::Levels { category, selected } => render_levels(frame, app, *category, *selected),
        Screen::Puzzle(view) => render_puzzle(frame, view, app.status.as_ref()),
        Screen::Error { message } => render_error(frame, message),
    }
}

fn render_home<S: KeyValueStore>(frame: &mut Frame, app: &AppCoordinator<S>, selected: usize) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(4),    // Categories
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(frame.area());

    let title = Paragraph::new("SLOTWORD")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let items: Vec<ListItem> = app
        .catalog()
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let solved = category
                .items
                .iter()
                .filter(|item| app.gate().is_complete(&item.id))
                .count();
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!(
                "{}{} ({}/{})",
                prefix,
                category.name,
                solved,
                category.items.len()
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Categories"),
    );
    frame.render_widget(list, layout[1]);

    render_footer(frame, layout[2], "↑↓ Navigate  Enter Open  q Quit");
}

fn render_levels<S: KeyValueStore>(
    frame: &mut Frame,
    app: &AppCoordinator<S>,
    category: usize,
    selected: usize,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(4),    // Levels
            Constraint::Length(1), // Banner
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(frame.area());

    let Some(cat) = app.catalog().get(category) else {
        render_error(frame, "Unknown category");
        return;
    };

    let header = Paragraph::new(cat.name.as_str())
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let items: Vec<ListItem> = (0..cat.items.len())
        .map(|i| {
            let status = app.level_status(category, i);
            let (marker, color) = match status {
                LevelStatus::Solved => ("✓", Color::Green),
                LevelStatus::Unlocked => ("·", Color::White),
                LevelStatus::Locked => ("🔒", Color::DarkGray),
            };
            let mut style = Style::default().fg(color);
            if i == selected {
                style = style.bold().reversed();
            }
            ListItem::new(format!(" {} Level {}", marker, i + 1)).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), layout[1]);

    if let Some(banner) = &app.banner {
        let banner = Paragraph::new(banner.as_str())
            .style(Style::default().fg(Color::Cyan).bold())
            .alignment(Alignment::Center);
        frame.render_widget(banner, layout[2]);
    }

    render_footer(frame, layout[3], "↑↓ Navigate  Enter Play  Esc Back");
}

fn render_puzzle(frame: &mut Frame, view: &PuzzleView, status: Option<&(String, Tone)>) {
    let round = view.session.round();
    let sequence = view.session.sequence();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Slots
            Constraint::Length(1), // Slot numbers
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Key pool
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Status
            Constraint::Min(0),
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(frame.area());

    // Header: level | picture reference | attempts
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = header_block.inner(layout[0]);
    frame.render_widget(header_block, layout[0]);
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(10),
            Constraint::Length(14),
        ])
        .split(inner);

    let level = Paragraph::new(format!("Level {}/{}", sequence.index() + 1, sequence.len()))
        .style(Style::default().fg(Color::Yellow).bold());
    frame.render_widget(level, header_layout[0]);

    let picture = round.puzzle().image.as_deref().unwrap_or("(no picture)");
    frame.render_widget(
        Paragraph::new(picture)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        header_layout[1],
    );

    let attempts_color = if round.attempts_remaining() <= 1 {
        Color::Red
    } else {
        Color::Green
    };
    let attempts = Paragraph::new(format!("Tries: {}", round.attempts_remaining()))
        .style(Style::default().fg(attempts_color))
        .alignment(Alignment::Right);
    frame.render_widget(attempts, header_layout[2]);

    // Slots
    let slot_color = match view.session.status() {
        RoundStatus::Active => Color::White,
        RoundStatus::Correct => Color::Green,
        RoundStatus::Wrong => Color::Red,
    };
    let slots = Paragraph::new(format_slots(round.board().slots()))
        .style(Style::default().fg(slot_color).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Answer"));
    frame.render_widget(slots, layout[1]);

    let numbers = (1..=round.board().len())
        .map(|n| format!(" {} ", n % 10))
        .collect::<Vec<_>>()
        .join(" ");
    frame.render_widget(
        Paragraph::new(numbers)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        layout[2],
    );

    // Key pool
    let spans: Vec<Span> = round
        .pool()
        .tiles()
        .iter()
        .flat_map(|tile| {
            let text = format!("[{}]", tile.letter);
            let carried = view.carry.is_some_and(|c| c.tile_index == tile.index);
            let mut style = if round.board().is_used(tile.index) {
                Style::default().fg(Color::DarkGray)
            } else if carried {
                Style::default().fg(Color::Magenta).bold()
            } else {
                Style::default().fg(Color::Cyan).bold()
            };
            if tile.index == view.cursor {
                style = style.reversed();
            }
            [Span::styled(text, style), Span::raw(" ")]
        })
        .collect();
    let pool_title = if round.hint_used() { "Keys (hint used)" } else { "Keys" };
    let pool = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(pool_title));
    frame.render_widget(pool, layout[4]);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(round.progress().clamp(0.0, 1.0))
        .label(format!("{}/{}", round.board().filled_count(), round.board().len()));
    frame.render_widget(progress, layout[5]);

    // Status line: answer reveal beats transient signals
    let (text, color) = if let Some(answer) = &view.revealed_answer {
        (format!("Out of tries. The answer was {}", answer), Color::Yellow)
    } else if let Some((text, tone)) = status {
        let color = match tone {
            Tone::Good => Color::Green,
            Tone::Bad => Color::Red,
            Tone::Neutral => Color::White,
        };
        (text.clone(), color)
    } else {
        (String::new(), Color::White)
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(color).bold())
            .alignment(Alignment::Center),
        layout[6],
    );

    let footer = if view.carry.is_some() {
        "1-9 Drop on slot  Esc Cancel"
    } else {
        "←→ Move  Enter Place  Space Pick up  1-9 Clear slot  h Hint  r Reset  Esc Back"
    };
    render_footer(frame, layout[8], footer);
}

/// Render error screen
fn render_error(frame: &mut Frame, message: &str) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .margin(2)
        .split(frame.area());

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error, layout[1]);

    render_footer(frame, layout[2], "Press Esc to go back");
}

fn render_footer(frame: &mut Frame, area: Rect, text: &str) {
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Format the answer slots for display
fn format_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|slot| match slot.letter() {
            Some(letter) => format!("[{}]", letter),
            None => String::from("[_]"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
