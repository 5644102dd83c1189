//! Terminal UI: hex map canvas, resource bar, research panel, event log.
//!
//! Pure presentation: every number shown here comes out of the engine's
//! render snapshots; no game logic lives in this module.

mod research_panel;

use crate::core::constants::LOG_VIEW_LINES;
use crate::core::engine::Engine;
use crate::render::{center_pixel, room_views};
use crate::ui::research_panel::draw_research_panel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

/// Presentation-only state: selection, open overlays.
#[derive(Debug, Default)]
pub struct UiState {
    pub selected_research: usize,
    pub show_details: bool,
    pub confirm_prestige: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn draw(frame: &mut Frame, engine: &Engine, ui: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(frame.size());

    draw_status_bar(frame, rows[0], engine);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    draw_map(frame, columns[0], engine);
    draw_research_panel(frame, columns[1], engine, ui.selected_research);
    draw_log(frame, rows[2], engine);

    if ui.show_details {
        draw_details_overlay(frame, engine, ui.selected_research);
    }
    if ui.confirm_prestige {
        draw_prestige_confirm(frame, engine);
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, engine: &Engine) {
    let state = &engine.state;
    let difficulty = state
        .difficulty
        .samples()
        .last()
        .map(|d| d.round() as i64)
        .unwrap_or(0);
    let line = Line::from(vec![
        Span::styled(
            format!(" Gold {} ", state.resources.gold.floor() as i64),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!(" Mana {} ", state.resources.mana.floor() as i64),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(" Essence {} ", state.resources.essence.floor() as i64),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(" Souls {} ", state.resources.souls.floor() as i64),
            Style::default().fg(Color::LightRed),
        ),
        Span::raw(format!(
            " | Floor {} | Rooms {} | Prestige {} | Diff {} | x{} {}",
            state.floor,
            engine.map.room_count(),
            state.prestige_level,
            difficulty,
            state.time_scale,
            if state.running { "" } else { "[PAUSED]" },
        )),
    ]);
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Dungeon Heart "),
    );
    frame.render_widget(bar, area);
}

fn draw_map(frame: &mut Frame, area: Rect, engine: &Engine) {
    // Unit-size projection; the canvas scales world coords to the viewport.
    let views = room_views(&engine.map, 1.0, (0.0, 0.0));
    let center = center_pixel(&engine.map, 1.0, (0.0, 0.0));
    let bound = views
        .iter()
        .map(|v| v.pixel.0.abs().max(v.pixel.1.abs()))
        .fold(4.0_f64, f64::max)
        + 2.0;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Dungeon "))
        .marker(Marker::Braille)
        .x_bounds([-bound, bound])
        .y_bounds([-bound, bound])
        .paint(|ctx: &mut Context| {
            for view in &views {
                let (x, y) = view.pixel;
                let (r, g, b) = view.color;
                let marker = if view.living_monsters > 0 {
                    format!("{}*", view.living_monsters.min(9))
                } else if view.trap_count > 0 {
                    "^".to_string()
                } else {
                    "o".to_string()
                };
                ctx.print(
                    x,
                    -y,
                    Line::styled(marker, Style::default().fg(Color::Rgb(r, g, b))),
                );
            }
            ctx.print(
                center.0,
                -center.1,
                Line::styled("@", Style::default().fg(Color::LightMagenta)),
            );
        });
    frame.render_widget(canvas, area);
}

fn draw_log(frame: &mut Frame, area: Rect, engine: &Engine) {
    let lines: Vec<Line> = engine
        .state
        .log
        .recent(LOG_VIEW_LINES)
        .map(Line::from)
        .collect();
    let shown = lines.len();
    let skip = shown.saturating_sub(area.height.saturating_sub(2) as usize);
    let log = Paragraph::new(lines[skip..].to_vec())
        .block(Block::default().borders(Borders::ALL).title(" Events "))
        .wrap(Wrap { trim: true });
    frame.render_widget(log, area);
}

/// Centered overlay rect helper.
fn centered_rect(width: u16, height: u16, size: Rect) -> Rect {
    let w = width.min(size.width.saturating_sub(4));
    let h = height.min(size.height.saturating_sub(4));
    Rect::new(
        (size.width.saturating_sub(w)) / 2,
        (size.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}

fn draw_details_overlay(frame: &mut Frame, engine: &Engine, selected: usize) {
    let views = crate::render::research_views(&engine.state);
    let Some(view) = views.get(selected) else {
        return;
    };
    let area = centered_rect(56, 14, frame.size());
    frame.render_widget(Clear, area);

    let status = if view.completed {
        Span::styled("Completed", Style::default().fg(Color::Green))
    } else if view.active {
        Span::styled(
            format!(
                "In progress — {}% ({}s left)",
                view.progress_percent.unwrap_or(0),
                view.remaining_seconds.unwrap_or(0.0).ceil() as i64
            ),
            Style::default().fg(Color::Magenta),
        )
    } else if !view.unlocked {
        Span::styled("Locked", Style::default().fg(Color::Red))
    } else {
        Span::styled("Available", Style::default().fg(Color::Cyan))
    };

    let lines = vec![
        Line::from(""),
        Line::from(view.desc),
        Line::from(""),
        Line::from(vec![Span::raw("Effect: "), Span::raw(view.effect_summary)]),
        Line::from(format!(
            "Cost: Mana {} | Gold {} | Essence {}",
            view.cost.mana, view.cost.gold, view.cost.essence
        )),
        Line::from(format!("Duration: {}s (scaled by speed)", view.duration)),
        Line::from(format!(
            "Branch: {} — level {}",
            view.branch.name(),
            view.level
        )),
        Line::from(vec![Span::raw("Status: "), status]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] start  [Esc] close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.title)),
        );
    frame.render_widget(dialog, area);
}

fn draw_prestige_confirm(frame: &mut Frame, engine: &Engine) {
    let area = centered_rect(46, 9, frame.size());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(""),
        Line::from("Reset the dungeon and gain 1 Essence?"),
        Line::from(format!(
            "Research levels will be halved. Prestige {} -> {}.",
            engine.state.prestige_level,
            engine.state.prestige_level + 1
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] prestige  [n] cancel",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Prestige ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(dialog, area);
}
