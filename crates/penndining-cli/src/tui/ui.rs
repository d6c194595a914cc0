//! TUI rendering logic for the venue directory.

use penndining_api::schedule::format_date_label;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use super::state::{DirectoryState, LoadStatus};

/// Draws the directory UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut DirectoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header (date + load status)
            Constraint::Min(6),    // sections
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let section_count = u32::try_from(state.sections.len()).unwrap_or(1).max(1);
    let constraints: Vec<Constraint> = state
        .sections
        .iter()
        .map(|_| Constraint::Ratio(1, section_count))
        .collect();
    let section_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);

    for (idx, area) in section_chunks.iter().enumerate() {
        draw_section(frame, *area, state, idx);
    }

    draw_footer(frame, chunks[2]);
}

/// Draws the header with the selected day and feed status.
fn draw_header(frame: &mut Frame, area: Rect, state: &DirectoryState) {
    let date_line = if state.date == state.today {
        format!("{}  (today)", format_date_label(state.date))
    } else {
        format_date_label(state.date)
    };

    let (status_text, status_style) = if let Some(notice) = &state.notice {
        (notice.clone(), Style::default().fg(Color::Red))
    } else {
        status_line(state)
    };

    let header = Paragraph::new(vec![
        Line::from(date_line).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(status_text).style(status_style),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Penn Dining "));
    frame.render_widget(header, area);
}

/// Text and style for the feed load status.
fn status_line(state: &DirectoryState) -> (String, Style) {
    match &state.status {
        LoadStatus::Idle => (String::new(), Style::default()),
        LoadStatus::Loading => (
            String::from("Loading venues..."),
            Style::default().fg(Color::Yellow),
        ),
        LoadStatus::Ready => (
            format!("{} venues", state.venue_count()),
            Style::default().fg(Color::Green),
        ),
        LoadStatus::Failed(msg) => (
            format!("Failed: {msg}  (r: retry)"),
            Style::default().fg(Color::Red),
        ),
    }
}

/// Draws one directory section as a table.
fn draw_section(frame: &mut Frame, area: Rect, state: &mut DirectoryState, idx: usize) {
    let active = state.is_active(idx);
    let Some(section) = state.sections.get_mut(idx) else {
        return;
    };

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let header = Row::new(vec!["Status", "Venue", "Hours"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = section
        .rows
        .iter()
        .map(|r| {
            let style = if r.status == "OPEN" {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                String::from(r.status),
                r.name.clone(),
                r.hours.clone(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(28),
        Constraint::Min(20),
    ];

    let highlight = if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", section.category.heading()))
                .border_style(border_style),
        )
        .row_highlight_style(highlight);

    frame.render_stateful_widget(table, area, &mut section.table_state);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(
        "\u{2191}\u{2193}/j/k: move  Tab: section  \u{2190}\u{2192}/h/l: day  t: today  Enter/o: open  r: reload  q: quit",
    );
    let footer = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
