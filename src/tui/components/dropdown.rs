//! # Dropdown Component
//!
//! A filterable dropdown (combobox) over a list of labelled entries. Typing
//! narrows the list; arrow keys, Home/End and mouse hover move the highlight.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DropdownState` lives for the whole session and owns the [`Navigator`]
//! - `Dropdown` is created each frame with borrowed state
//!
//! The navigator and the rendered rows live in sibling fields so that
//! `self.nav.move_down(&mut self.host)` borrows them independently.

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph};
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::host::{ActiveItem, Host, ListElement};
use crate::core::{NavKey, Navigator, NavigatorConfig};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub label: String,
}

impl Entry {
    /// Build entries from raw lines. Blank lines are skipped; repeated labels
    /// get `#2`, `#3`, ... appended to their id so every id stays unique.
    pub fn from_lines<I, S>(lines: I) -> Vec<Entry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<Entry> = Vec::new();
        let mut used: HashSet<String> = HashSet::new();
        for line in lines {
            let label = line.as_ref().trim_end();
            if label.trim().is_empty() {
                continue;
            }
            let mut id = label.to_string();
            let mut n = 1;
            while used.contains(&id) {
                n += 1;
                id = format!("{label}#{n}");
            }
            used.insert(id.clone());
            entries.push(Entry {
                id,
                label: label.to_string(),
            });
        }
        entries
    }
}

/// Events emitted by the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    Select(Entry),
    Dismiss,
}

// ============================================================================
// Host side: what the navigator sees
// ============================================================================

/// The rendered side of the dropdown: filtered rows, scroll offset, focus.
pub struct DropdownHost {
    item_role: String,
    entries: Vec<Entry>,
    query: String,
    /// Indices into `entries` that match `query`, in display order.
    matches: Vec<usize>,
    /// `(role, id)` per visible row, handed to the navigator.
    rows: Vec<(String, String)>,
    open: bool,
    offset: usize,
    viewport: usize,
    list_area: Rect,
    hovering: bool,
    focused: Option<usize>,
    input_focused: bool,
    status: String,
}

impl DropdownHost {
    pub fn new(item_role: &str, entries: Vec<Entry>, viewport: usize) -> Self {
        let mut host = Self {
            item_role: item_role.to_string(),
            entries,
            query: String::new(),
            matches: Vec::new(),
            rows: Vec::new(),
            open: false,
            offset: 0,
            viewport: viewport.max(1),
            list_area: Rect::default(),
            hovering: false,
            focused: None,
            input_focused: true,
            status: String::new(),
        };
        host.refilter();
        host
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn visible_len(&self) -> usize {
        self.matches.len()
    }

    /// The entry shown at visible position `index`.
    pub fn visible_entry(&self, index: usize) -> Option<&Entry> {
        self.matches.get(index).map(|&i| &self.entries[i])
    }

    fn close(&mut self) {
        self.open = false;
        self.focused = None;
        self.input_focused = true;
        self.hovering = false;
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.rows = self
            .matches
            .iter()
            .map(|&i| (self.item_role.clone(), self.entries[i].id.clone()))
            .collect();
        self.offset = 0;
        self.focused = None;
    }

    /// Adjust the offset so `index` sits inside the viewport.
    fn reveal(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.open || !self.list_area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.offset + usize::from(row - self.list_area.y);
        (index < self.matches.len()).then_some(index)
    }
}

struct RowHandle<'a> {
    host: &'a mut DropdownHost,
    index: usize,
}

impl ActiveItem for RowHandle<'_> {
    fn scroll_into_view(&mut self) {
        self.host.reveal(self.index);
    }

    fn focus(&mut self) {
        self.host.focused = Some(self.index);
        self.host.input_focused = false;
    }
}

impl Host for DropdownHost {
    fn list_element(&self) -> Option<&dyn ListElement> {
        if self.open {
            Some(&self.rows)
        } else {
            None
        }
    }

    fn active_item(&mut self, index: usize) -> Option<Box<dyn ActiveItem + '_>> {
        if index >= self.rows.len() {
            return None;
        }
        Some(Box::new(RowHandle { host: self, index }))
    }

    fn before_open(&mut self) {
        if !self.open {
            debug!("Dropdown opened with {} matches", self.matches.len());
            self.open = true;
        }
    }

    fn after_highlight(&mut self, index: usize) {
        let Some(entry) = self.visible_entry(index) else {
            return;
        };
        let status = format!("{}/{}  {}", index + 1, self.matches.len(), entry.label);
        self.status = status;
    }

    fn beginning_of_list(&mut self) {
        self.status = "Top of list".to_string();
    }

    fn end_of_list(&mut self) {
        self.status = if self.matches.is_empty() {
            "No matches".to_string()
        } else {
            "End of list".to_string()
        };
    }
}

// ============================================================================
// Persistent state
// ============================================================================

pub struct DropdownState {
    pub nav: Navigator,
    pub host: DropdownHost,
}

impl DropdownState {
    pub fn new(config: NavigatorConfig, entries: Vec<Entry>, viewport: usize) -> Self {
        let host = DropdownHost::new(&config.item_role, entries, viewport);
        Self {
            nav: Navigator::new(config),
            host,
        }
    }

    /// Call once per frame after drawing.
    pub fn settle(&mut self) {
        self.nav.render_settled(&mut self.host);
    }

    pub fn highlighted(&self) -> Option<&Entry> {
        self.nav.index().and_then(|i| self.host.visible_entry(i))
    }

    fn query_changed(&mut self) {
        self.host.refilter();
        self.host.before_open();
        self.host.input_focused = true;
        self.nav.sync(&self.host);
        if let Some(index) = self.nav.index() {
            self.host.reveal(index);
        }
        self.host.status = format!("{} matches", self.host.matches.len());
    }

    fn pointer_moved(&mut self, column: u16, row: u16) {
        match self.host.row_at(column, row) {
            Some(index) => {
                self.host.hovering = true;
                if self.nav.index() != Some(index) {
                    self.nav.set_highlight_by_index(&self.host, index);
                }
            }
            None if self.host.hovering => {
                self.host.hovering = false;
                self.host.focused = None;
                self.nav.reset();
            }
            None => {}
        }
    }
}

impl EventHandler for DropdownState {
    type Event = DropdownEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DropdownEvent> {
        match event {
            TuiEvent::ForceQuit => Some(DropdownEvent::Dismiss),
            TuiEvent::Escape => {
                if self.host.open {
                    self.host.close();
                    self.nav.reset();
                    None
                } else {
                    Some(DropdownEvent::Dismiss)
                }
            }
            TuiEvent::Submit => self.highlighted().cloned().map(DropdownEvent::Select),
            TuiEvent::Navigate(key) => {
                if matches!(key, NavKey::Home | NavKey::End) {
                    self.host.before_open();
                }
                self.nav.handle_key(&mut self.host, *key);
                None
            }
            TuiEvent::InputChar(c) => {
                self.host.query.push(*c);
                self.query_changed();
                None
            }
            TuiEvent::Backspace => {
                if self.host.query.pop().is_some() {
                    self.query_changed();
                }
                None
            }
            TuiEvent::MouseMove(column, row) => {
                self.pointer_moved(*column, *row);
                None
            }
            TuiEvent::FocusLost => {
                self.host.hovering = false;
                self.host.focused = None;
                self.nav.reset();
                None
            }
        }
    }
}

// ============================================================================
// Transient render wrapper
// ============================================================================

pub struct Dropdown<'a> {
    state: &'a mut DropdownState,
    title: &'a str,
    max_visible: u16,
}

impl<'a> Dropdown<'a> {
    pub fn new(state: &'a mut DropdownState, title: &'a str, max_visible: u16) -> Self {
        Self {
            state,
            title,
            max_visible,
        }
    }
}

impl Component for Dropdown<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let help_text = " ↑↓ Move  Home/End Jump  Enter Select  Esc Close ";
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [query_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let host = &mut self.state.host;

        // Query line
        let prompt = "> ";
        let query_style = if host.input_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prompt, Style::default().fg(Color::Cyan)),
                Span::styled(host.query.as_str(), query_style),
            ])),
            query_area,
        );
        if host.input_focused {
            let x = query_area.x + (prompt.width() + host.query.width()) as u16;
            frame.set_cursor_position((x.min(query_area.right().saturating_sub(1)), query_area.y));
        }

        // Status line
        frame.render_widget(
            Paragraph::new(host.status.as_str()).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );

        if !host.open {
            host.list_area = Rect::default();
            frame.render_widget(
                Paragraph::new("↓ to browse").style(Style::default().fg(Color::DarkGray)),
                list_area,
            );
            return;
        }

        let viewport = list_area.height.min(self.max_visible).max(1);
        host.viewport = usize::from(viewport);
        host.list_area = Rect {
            height: list_area.height.min(viewport),
            ..list_area
        };
        host.offset = host
            .offset
            .min(host.matches.len().saturating_sub(host.viewport));

        if host.matches.is_empty() {
            frame.render_widget(
                Paragraph::new("No matches").style(Style::default().fg(Color::DarkGray)),
                list_area,
            );
            return;
        }

        let highlighted = self.state.nav.index();
        let label_width = usize::from(list_area.width).saturating_sub(2);
        let items: Vec<ListItem> = (host.offset..host.matches.len())
            .take(host.viewport)
            .map(|i| {
                let entry = &host.entries[host.matches[i]];
                let marker = if host.focused == Some(i) { "▸ " } else { "  " };
                let style = if highlighted == Some(i) {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(truncate_to_width(&entry.label, label_width), style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), host.list_area);
    }
}

/// Truncate a string to `max_width` display columns, adding "..." if needed.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state(labels: &[&str]) -> DropdownState {
        DropdownState::new(NavigatorConfig::default(), Entry::from_lines(labels), 3)
    }

    fn press(state: &mut DropdownState, key: NavKey) {
        state.handle_event(&TuiEvent::Navigate(key));
    }

    fn type_str(state: &mut DropdownState, s: &str) {
        for c in s.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn render_text(state: &mut DropdownState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Dropdown::new(&mut *state, "Fruit", 10).render(f, f.area()))
            .unwrap();
        state.settle();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_from_lines_dedupes_ids() {
        let entries = Entry::from_lines(["apple", "", "apple", "pear", "apple"]);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["apple", "apple#2", "pear", "apple#3"]);
        assert_eq!(entries[1].label, "apple");
    }

    #[test]
    fn test_down_opens_and_highlights_first() {
        let mut state = state(&["apple", "banana", "cherry"]);
        assert!(!state.host.is_open());

        press(&mut state, NavKey::Down);
        assert!(state.host.is_open());
        assert_eq!(state.nav.index(), Some(0));
        assert_eq!(state.highlighted().map(|e| e.label.as_str()), Some("apple"));
    }

    #[test]
    fn test_home_end_open_closed_dropdown() {
        let mut state = state(&["a", "b", "c", "d", "e"]);
        press(&mut state, NavKey::End);
        assert!(state.host.is_open());
        assert_eq!(state.nav.index(), Some(4));
        // viewport of 3: last three rows visible
        assert_eq!(state.host.offset(), 2);

        press(&mut state, NavKey::Home);
        assert_eq!(state.nav.index(), Some(0));
        assert_eq!(state.host.offset(), 0);
    }

    #[test]
    fn test_scroll_follows_highlight() {
        let mut state = state(&["a", "b", "c", "d", "e"]);
        for _ in 0..4 {
            press(&mut state, NavKey::Down);
        }
        assert_eq!(state.nav.index(), Some(3));
        assert_eq!(state.host.offset(), 1);
    }

    #[test]
    fn test_scroll_disabled_keeps_offset() {
        let config = NavigatorConfig {
            scroll_on_highlight: false,
            ..Default::default()
        };
        let mut state = DropdownState::new(config, Entry::from_lines(["a", "b", "c", "d", "e"]), 3);
        press(&mut state, NavKey::End);
        assert_eq!(state.nav.index(), Some(4));
        assert_eq!(state.host.offset(), 0);
    }

    #[test]
    fn test_focus_marker_follows_navigation() {
        let config = NavigatorConfig {
            focus_on_navigation: true,
            ..Default::default()
        };
        let mut state = DropdownState::new(config, Entry::from_lines(["a", "b"]), 3);
        press(&mut state, NavKey::Down);
        press(&mut state, NavKey::Down);
        assert_eq!(state.host.focused(), Some(1));
        assert!(!state.host.input_focused());

        press(&mut state, NavKey::Up);
        press(&mut state, NavKey::Up);
        assert_eq!(state.nav.index(), Some(0));
        assert_eq!(state.host.focused(), Some(0));
        assert_eq!(state.host.status(), "Top of list");

        // typing hands focus back to the query
        type_str(&mut state, "a");
        assert!(state.host.input_focused());
        assert_eq!(state.host.focused(), None);
    }

    #[test]
    fn test_end_of_list_sets_status() {
        let mut state = state(&["a", "b"]);
        press(&mut state, NavKey::Down);
        press(&mut state, NavKey::Down);
        press(&mut state, NavKey::Down);
        assert_eq!(state.nav.index(), Some(1));
        assert_eq!(state.host.status(), "End of list");
    }

    #[test]
    fn test_typing_filters_and_keeps_highlight() {
        let mut state = state(&["apple", "apricot", "banana", "blueberry"]);
        press(&mut state, NavKey::Down);
        press(&mut state, NavKey::Down);
        assert_eq!(state.highlighted().map(|e| e.label.as_str()), Some("apricot"));

        type_str(&mut state, "ap");
        assert_eq!(state.host.visible_len(), 2);
        assert_eq!(state.highlighted().map(|e| e.label.as_str()), Some("apricot"));

        type_str(&mut state, "p");
        assert_eq!(state.host.visible_len(), 1);
        assert_eq!(state.nav.index(), Some(0));
        assert_eq!(state.highlighted().map(|e| e.label.as_str()), Some("apple"));

        type_str(&mut state, "zzz");
        assert_eq!(state.host.visible_len(), 0);
        assert_eq!(state.nav.index(), None);

        for _ in 0.."appzzz".len() {
            state.handle_event(&TuiEvent::Backspace);
        }
        assert_eq!(state.host.query(), "");
        assert_eq!(state.host.visible_len(), 4);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut state = state(&["Apple", "banana"]);
        type_str(&mut state, "APP");
        assert_eq!(state.host.visible_len(), 1);
        assert_eq!(state.host.visible_entry(0).map(|e| e.label.as_str()), Some("Apple"));
    }

    #[test]
    fn test_submit_selects_highlighted() {
        let mut state = state(&["apple", "banana"]);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        press(&mut state, NavKey::End);
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(DropdownEvent::Select(Entry {
                id: "banana".to_string(),
                label: "banana".to_string(),
            }))
        );
    }

    #[test]
    fn test_escape_closes_then_dismisses() {
        let mut state = state(&["apple"]);
        press(&mut state, NavKey::Down);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
        assert!(!state.host.is_open());
        assert_eq!(state.nav.index(), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(DropdownEvent::Dismiss)
        );
    }

    #[test]
    fn test_focus_lost_resets_highlight() {
        let mut state = state(&["apple", "banana"]);
        press(&mut state, NavKey::Down);
        state.handle_event(&TuiEvent::FocusLost);
        assert_eq!(state.nav.index(), None);
        assert!(state.host.is_open());
    }

    #[test]
    fn test_hover_highlights_and_leaving_resets() {
        let mut state = state(&["apple", "banana", "cherry"]);
        press(&mut state, NavKey::Down);
        render_text(&mut state, 40, 12);

        let area = state.host.list_area;
        assert!(area.height > 0);
        state.handle_event(&TuiEvent::MouseMove(area.x + 1, area.y + 2));
        assert_eq!(state.nav.index(), Some(2));

        state.handle_event(&TuiEvent::MouseMove(0, 0));
        assert_eq!(state.nav.index(), None);
    }

    #[test]
    fn test_hover_below_last_row_resets() {
        let mut state = state(&["apple", "banana"]);
        press(&mut state, NavKey::Down);
        render_text(&mut state, 40, 12);

        let area = state.host.list_area;
        assert!(area.height > 3);
        state.handle_event(&TuiEvent::MouseMove(area.x + 1, area.y + 1));
        assert_eq!(state.nav.index(), Some(1));

        // blank rows under the matches are not part of the list
        state.handle_event(&TuiEvent::MouseMove(area.x + 1, area.y + 3));
        assert_eq!(state.nav.index(), None);
        assert_eq!(state.host.row_at(area.x + 1, area.y + 3), None);
    }

    #[test]
    fn test_from_lines_handles_large_unique_input() {
        let lines: Vec<String> = (0..50_000).map(|i| format!("src/file_{i}.rs")).collect();
        let entries = Entry::from_lines(&lines);
        assert_eq!(entries.len(), 50_000);
        assert_eq!(entries[49_999].id, "src/file_49999.rs");

        let repeated = Entry::from_lines(["x", "x#2", "x"]);
        let ids: Vec<_> = repeated.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "x#2", "x#3"]);
    }

    #[test]
    fn test_render_shows_rows_and_settled_status() {
        let mut state = state(&["apple", "banana", "cherry"]);
        let closed = render_text(&mut state, 40, 12);
        assert!(closed.contains("Fruit"));
        assert!(closed.contains("to browse"));

        press(&mut state, NavKey::Down);
        press(&mut state, NavKey::Down);
        assert_eq!(state.host.status(), "");

        let text = render_text(&mut state, 40, 12);
        assert!(text.contains("apple"));
        assert!(text.contains("banana"));
        assert!(text.contains("cherry"));
        // after_highlight only runs once the frame has been drawn
        assert_eq!(state.host.status(), "2/3  banana");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer label", 8), "a lon...");
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本...");
        assert_eq!(truncate_to_width("abcdef", 2), "..");
    }
}
