//! The research tree panel: per-branch node rows with dependency markers.

use crate::core::engine::Engine;
use crate::render::{research_edges, research_views, EdgeSignal};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Catalog-order list of research nodes with status glyphs. The edge glyph
/// ahead of each row beyond level 1 reflects the dependency-arrow signal the
/// graph view would draw.
pub fn draw_research_panel(frame: &mut Frame, area: Rect, engine: &Engine, selected: usize) {
    let views = research_views(&engine.state);
    let edges = research_edges(&engine.state);

    let items: Vec<ListItem> = views
        .iter()
        .map(|view| {
            let edge = edges.iter().find(|e| e.to == view.id);
            let link = match edge.map(|e| e.signal) {
                Some(EdgeSignal::Settled) => Span::styled("═", Style::default().fg(Color::Green)),
                Some(EdgeSignal::InProgress) => {
                    Span::styled("─", Style::default().fg(Color::Magenta))
                }
                Some(EdgeSignal::Dim) => Span::styled("┄", Style::default().fg(Color::DarkGray)),
                None => Span::raw(" "),
            };
            let (glyph, style) = if view.completed {
                ("#", Style::default().fg(Color::Green))
            } else if view.active {
                (">", Style::default().fg(Color::Magenta))
            } else if !view.unlocked {
                ("x", Style::default().fg(Color::DarkGray))
            } else if view.affordable {
                ("+", Style::default().fg(Color::Cyan))
            } else {
                ("-", Style::default().fg(Color::Gray))
            };
            let mut spans = vec![
                link,
                Span::styled(format!(" {glyph} "), style),
                Span::styled(
                    format!("{:<13}", view.branch.name()),
                    Style::default().fg(Color::Blue),
                ),
                Span::raw(format!("L{} {}", view.level, view.title)),
            ];
            if view.active {
                spans.push(Span::styled(
                    format!("  {}%", view.progress_percent.unwrap_or(0)),
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Research  [Enter] start  [d] details "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
