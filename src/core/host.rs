//! # Host Contract
//!
//! The navigator never owns list items. Whoever renders the list (the "host")
//! implements [`Host`] and hands itself to every navigator call.
//!
//! ```text
//! Navigator ──list_element()──▶ ListElement ──items()──▶ [RenderedItem]
//!     │
//!     ├──active_item(i)──▶ ActiveItem (scroll_into_view / focus)
//!     │
//!     └──hooks──▶ before_open / after_highlight / beginning_of_list / end_of_list
//! ```
//!
//! Every hook has a no-op default, so a host only implements what it reacts to.

/// One rendered row as seen by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedItem<'a> {
    /// Role attribute. Only rows matching the navigator's item role are counted.
    pub role: &'a str,
    /// Stable identifier of the item.
    pub id: &'a str,
}

impl<'a> RenderedItem<'a> {
    pub fn new(role: &'a str, id: &'a str) -> Self {
        Self { role, id }
    }
}

/// The root of a rendered list.
pub trait ListElement {
    /// All rendered descendants in display order, including rows whose role
    /// is not an item role (headers, separators).
    fn items(&self) -> Vec<RenderedItem<'_>>;
}

impl ListElement for Vec<(String, String)> {
    fn items(&self) -> Vec<RenderedItem<'_>> {
        self.iter()
            .map(|(role, id)| RenderedItem::new(role, id))
            .collect()
    }
}

/// The visual representation of the highlighted row.
pub trait ActiveItem {
    fn scroll_into_view(&mut self);
    fn focus(&mut self);
}

/// The component that renders the list and reacts to navigation.
pub trait Host {
    /// The list root, or `None` when nothing is rendered yet.
    fn list_element(&self) -> Option<&dyn ListElement>;

    /// The row currently rendered at `index`, for scroll and focus.
    fn active_item(&mut self, _index: usize) -> Option<Box<dyn ActiveItem + '_>> {
        None
    }

    /// Called before up/down navigation so the list can become visible.
    fn before_open(&mut self) {}

    /// Called once the host has rendered a highlight change.
    fn after_highlight(&mut self, _index: usize) {}

    /// Up was pressed while already at the first item.
    fn beginning_of_list(&mut self) {}

    /// Down was pressed while already at the last item.
    fn end_of_list(&mut self) {}
}
