//! # Highlight Navigator
//!
//! Tracks a single highlighted position over a list the navigator does not
//! own. The host renders the rows; the navigator only asks it for their
//! count, order and identifiers.
//!
//! ```text
//!            move_down / jump_*            move_down at end
//!   ┌──────┐ ─────────────────▶ ┌─────────────┐ ───────────▶ end_of_list()
//!   │ Idle │                    │ Highlighted │
//!   └──────┘ ◀───────────────── └─────────────┘ ───────────▶ beginning_of_list()
//!                reset()                          move_up at start
//! ```
//!
//! ## Settle point
//!
//! A highlight change is visible in [`Navigator::index`] immediately, but the
//! host's `after_highlight` hook only runs from [`Navigator::render_settled`],
//! which the host calls once it has rendered the new state. Hosts that build
//! the active row lazily can therefore rely on that row existing when the hook
//! fires.

use log::{debug, warn};
use std::fmt;

use crate::core::config::NavigatorConfig;
use crate::core::host::Host;

// ============================================================================
// State
// ============================================================================

/// The highlighted position and the identifier of the row occupying it.
///
/// `index` is `None` exactly when nothing is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub index: Option<usize>,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Highlighted(usize),
}

/// Keys the navigator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Home,
    End,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// The host has no list element to query.
    MissingHostReference,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::MissingHostReference => write!(f, "host returned no list element"),
        }
    }
}

impl std::error::Error for NavError {}

// ============================================================================
// Navigator
// ============================================================================

#[derive(Debug, Default)]
pub struct Navigator {
    config: NavigatorConfig,
    state: HighlightState,
    /// Highlight changes waiting for the next settle point.
    pending: Vec<usize>,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            config,
            state: HighlightState::default(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn index(&self) -> Option<usize> {
        self.state.index
    }

    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn phase(&self) -> Phase {
        match self.state.index {
            Some(index) => Phase::Highlighted(index),
            None => Phase::Idle,
        }
    }

    /// Identifier for "active descendant" wiring, `None` while idle.
    pub fn active_descendant(&self) -> Option<&str> {
        self.state.index.map(|_| self.state.id.as_str())
    }

    /// True when highlight changes are waiting for [`Navigator::render_settled`].
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // ------------------------------------------------------------------------
    // Directional navigation
    // ------------------------------------------------------------------------

    pub fn move_up<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.before_open();
        let Some(ids) = self.rendered_ids_or_log(&*host) else {
            return;
        };

        match self.state.index {
            Some(index) if index > 0 && !ids.is_empty() => {
                // A stale index from a shrunken list lands on the last row.
                let target = (index - 1).min(ids.len() - 1);
                self.highlight(&ids, target);
            }
            _ => {
                debug!("move_up at beginning of list (index {:?})", self.state.index);
                if ids.is_empty() && self.state.index.is_some() {
                    self.reset();
                }
                host.beginning_of_list();
            }
        }

        self.apply_side_effects(host);
    }

    pub fn move_down<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.before_open();
        let Some(ids) = self.rendered_ids_or_log(&*host) else {
            return;
        };

        let next = self.state.index.map_or(0, |index| index + 1);
        if next < ids.len() {
            self.highlight(&ids, next);
        } else {
            // A stale index from a shrunken list lands on the last row.
            match ids.len().checked_sub(1) {
                Some(last) if self.state.index.is_some_and(|index| index > last) => {
                    self.highlight(&ids, last);
                }
                None if self.state.index.is_some() => self.reset(),
                _ => {}
            }
            debug!(
                "move_down at end of list (index {:?}, count {})",
                self.state.index,
                ids.len()
            );
            host.end_of_list();
        }

        self.apply_side_effects(host);
    }

    pub fn jump_to_start<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(ids) = self.rendered_ids_or_log(&*host) else {
            return;
        };
        if !ids.is_empty() {
            self.highlight(&ids, 0);
        }
        self.apply_side_effects(host);
    }

    pub fn jump_to_end<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(ids) = self.rendered_ids_or_log(&*host) else {
            return;
        };
        if let Some(last) = ids.len().checked_sub(1) {
            self.highlight(&ids, last);
        }
        self.apply_side_effects(host);
    }

    /// Dispatch a navigation key. Returns false if the host list is missing.
    pub fn handle_key<H: Host + ?Sized>(&mut self, host: &mut H, key: NavKey) -> bool {
        if host.list_element().is_none() && !matches!(key, NavKey::Up | NavKey::Down) {
            warn!("{:?} ignored: {}", key, NavError::MissingHostReference);
            return false;
        }
        match key {
            NavKey::Up => self.move_up(host),
            NavKey::Down => self.move_down(host),
            NavKey::Home => self.jump_to_start(host),
            NavKey::End => self.jump_to_end(host),
        }
        host.list_element().is_some()
    }

    // ------------------------------------------------------------------------
    // Direct highlight
    // ------------------------------------------------------------------------

    /// Highlight the row at `index`. Out-of-range positions are ignored.
    pub fn set_highlight_by_index<H: Host + ?Sized>(&mut self, host: &H, index: usize) {
        let Some(ids) = self.rendered_ids_or_log(host) else {
            return;
        };
        if index >= ids.len() {
            debug!("set_highlight_by_index({index}) out of range (count {})", ids.len());
            return;
        }
        self.highlight(&ids, index);
    }

    /// Highlight the row carrying `id`. Unknown identifiers are ignored.
    pub fn set_highlight_by_id<H: Host + ?Sized>(&mut self, host: &H, id: &str) {
        let Some(ids) = self.rendered_ids_or_log(host) else {
            return;
        };
        match ids.iter().position(|candidate| candidate == id) {
            Some(index) => self.highlight(&ids, index),
            None => debug!("set_highlight_by_id({id:?}) not rendered"),
        }
    }

    /// Return to Idle, e.g. when the pointer leaves the list or focus is lost.
    pub fn reset(&mut self) {
        if self.state.index.is_some() {
            debug!("highlight reset from {:?}", self.state.index);
        }
        self.state = HighlightState::default();
        self.pending.clear();
    }

    /// Reconcile with a list the host has just changed.
    ///
    /// The highlighted item stays highlighted if it is still rendered;
    /// otherwise the index is clamped to the new last row. An empty list
    /// returns to Idle.
    pub fn sync<H: Host + ?Sized>(&mut self, host: &H) {
        let Some(ids) = self.rendered_ids_or_log(host) else {
            return;
        };
        let Some(index) = self.state.index else {
            return;
        };
        if ids.is_empty() {
            self.reset();
            return;
        }

        let target = ids
            .iter()
            .position(|id| *id == self.state.id)
            .unwrap_or_else(|| index.min(ids.len() - 1));
        if target != index || ids[target] != self.state.id {
            debug!("sync moved highlight {index} -> {target}");
            self.highlight(&ids, target);
        }
    }

    /// The settle point: run `after_highlight` for every change made since
    /// the previous call, oldest first.
    pub fn render_settled<H: Host + ?Sized>(&mut self, host: &mut H) {
        for index in std::mem::take(&mut self.pending) {
            host.after_highlight(index);
        }
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    pub fn lookup_index_of_id<H: Host + ?Sized>(&self, host: &H, id: &str) -> Option<usize> {
        self.rendered_ids_or_log(host)?
            .iter()
            .position(|candidate| candidate == id)
    }

    pub fn lookup_id_of_index<H: Host + ?Sized>(&self, host: &H, index: usize) -> Option<String> {
        self.rendered_ids_or_log(host)?.into_iter().nth(index)
    }

    pub fn item_count<H: Host + ?Sized>(&self, host: &H) -> usize {
        self.rendered_ids_or_log(host).map_or(0, |ids| ids.len())
    }

    /// Identifiers of the rows matching the item role, in display order.
    pub fn rendered_ids<H: Host + ?Sized>(&self, host: &H) -> Result<Vec<String>, NavError> {
        let list = host.list_element().ok_or(NavError::MissingHostReference)?;
        Ok(list
            .items()
            .into_iter()
            .filter(|item| item.role == self.config.item_role)
            .map(|item| item.id.to_string())
            .collect())
    }

    fn rendered_ids_or_log<H: Host + ?Sized>(&self, host: &H) -> Option<Vec<String>> {
        match self.rendered_ids(host) {
            Ok(ids) => Some(ids),
            Err(e) => {
                warn!("Navigation skipped: {e}");
                None
            }
        }
    }

    fn highlight(&mut self, ids: &[String], index: usize) {
        self.state.index = Some(index);
        self.state.id = ids[index].clone();
        self.pending.push(index);
        debug!("highlight -> {index} ({:?})", self.state.id);
    }

    fn apply_side_effects<H: Host + ?Sized>(&self, host: &mut H) {
        let Some(index) = self.state.index else {
            return;
        };
        if !self.config.scroll_on_highlight && !self.config.focus_on_navigation {
            return;
        }
        if let Some(mut item) = host.active_item(index) {
            if self.config.scroll_on_highlight {
                item.scroll_into_view();
            }
            if self.config.focus_on_navigation {
                item.focus();
            }
        }
    }
}
