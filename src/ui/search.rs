//! Search modal widget (keyword input and result list overlay).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::state::{SearchModalState, SearchPhase};
use crate::ui::layout::centered_fixed;
use crate::ui::spinner;
use crate::ui::theme::Theme;

pub struct SearchModalWidget<'a> {
    pub search: &'a SearchModalState,
    /// Drives the loading spinner frame.
    pub tick: u64,
}

impl<'a> Widget for SearchModalWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(64, 18, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Document Search ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut y = inner.y;
        let bottom = inner.y + inner.height;

        Paragraph::new(Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                self.search.keyword.as_str(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
            Span::raw("▏"),
        ]))
        .render(Rect::new(inner.x, y, inner.width, 1), buf);
        y = y.saturating_add(2);
        if y >= bottom {
            return;
        }

        match &self.search.phase {
            SearchPhase::Loading => {
                let text = format!("{} searching…", spinner::frame(self.tick));
                Paragraph::new(Line::from(Span::styled(text, Theme::loading_style())))
                    .render(Rect::new(inner.x, y, inner.width, 1), buf);
            }
            SearchPhase::Failed(message) => {
                let text = format!("search failed: {message}");
                Paragraph::new(Line::from(Span::styled(text, Theme::error_style())))
                    .render(Rect::new(inner.x, y, inner.width, 1), buf);
            }
            SearchPhase::Idle => {
                Paragraph::new(Line::from(Span::styled(
                    "Type a keyword and press Enter.",
                    Theme::meta_style(),
                )))
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            }
            SearchPhase::Loaded if self.search.results.is_empty() => {
                Paragraph::new(Line::from(Span::styled(
                    "No results.",
                    Theme::meta_style(),
                )))
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            }
            SearchPhase::Loaded => {
                let max_rows = bottom.saturating_sub(y + 1) as usize;
                for (row_idx, hit) in self.search.results.iter().take(max_rows).enumerate() {
                    let selected = self.search.selected == Some(row_idx);
                    let marker = if selected { "> " } else { "  " };
                    let title_style = if selected {
                        Theme::result_selected_style()
                    } else {
                        Theme::result_style()
                    };
                    let byline = match &hit.author {
                        Some(author) => {
                            format!("  {author} • {}", hit.updated_at.format("%Y-%m-%d %H:%M"))
                        }
                        None => format!("  {}", hit.updated_at.format("%Y-%m-%d %H:%M")),
                    };
                    Paragraph::new(Line::from(vec![
                        Span::styled(format!("{marker}{}", hit.title), title_style),
                        Span::styled(byline, Theme::meta_style()),
                        Span::styled(format!("  [{}]", hit.workspace), Theme::meta_style()),
                    ]))
                    .render(Rect::new(inner.x, y + row_idx as u16, inner.width, 1), buf);
                }
            }
        }

        // Hint bar on the last inner row.
        let hint_y = bottom.saturating_sub(1);
        if hint_y > y {
            Paragraph::new(Line::from(Span::styled(
                "  Enter: search/open  ↑↓: select  Esc: close",
                Theme::meta_style(),
            )))
            .render(Rect::new(inner.x, hint_y, inner.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::DocumentHit;
    use chrono::Local;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    fn render(search: &SearchModalState) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SearchModalWidget { search, tick: 0 }.render(area, &mut buf);
        buffer_text(&buf)
    }

    fn hit(title: &str) -> DocumentHit {
        DocumentHit {
            id: format!("{title}.md"),
            title: title.to_string(),
            workspace: "/".to_string(),
            author: Some("Sam".to_string()),
            updated_at: Local::now(),
            path: format!("{title}.md").into(),
        }
    }

    #[test]
    fn empty_result_set_shows_empty_state_not_loading() {
        let search = SearchModalState {
            keyword: "nothing".into(),
            phase: SearchPhase::Loaded,
            ..Default::default()
        };
        let text = render(&search);
        assert!(text.contains("No results."));
        assert!(!text.contains("searching"));
    }

    #[test]
    fn loading_shows_spinner() {
        let search = SearchModalState {
            keyword: "plan".into(),
            phase: SearchPhase::Loading,
            ..Default::default()
        };
        let text = render(&search);
        assert!(text.contains("searching"));
        assert!(!text.contains("No results."));
    }

    #[test]
    fn failure_shows_error_message() {
        let search = SearchModalState {
            phase: SearchPhase::Failed("boom".into()),
            ..Default::default()
        };
        assert!(render(&search).contains("search failed: boom"));
    }

    #[test]
    fn loaded_results_are_listed_with_selection_marker() {
        let search = SearchModalState {
            keyword: "plan".into(),
            phase: SearchPhase::Loaded,
            results: vec![hit("Plan"), hit("Plan B")],
            selected: Some(1),
            ..Default::default()
        };
        let text = render(&search);
        assert!(text.contains("  Plan"));
        assert!(text.contains("> Plan B"));
    }
}
