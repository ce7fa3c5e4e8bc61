//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::host::{ActiveItem, Host, ListElement};

/// Everything the navigator asked a [`MockHost`] to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    BeforeOpen,
    AfterHighlight(usize),
    BeginningOfList,
    EndOfList,
    ScrollIntoView(usize),
    Focus(usize),
}

/// A host that records hook calls instead of rendering anything.
pub struct MockHost {
    /// `(role, id)` rows. `None` simulates a host with no list element.
    pub rows: Option<Vec<(String, String)>>,
    pub calls: Vec<HostCall>,
    pub provide_active_item: bool,
}

impl MockHost {
    pub fn with_rows(rows: &[(&str, &str)]) -> Self {
        Self {
            rows: Some(
                rows.iter()
                    .map(|(role, id)| (role.to_string(), id.to_string()))
                    .collect(),
            ),
            calls: Vec::new(),
            provide_active_item: true,
        }
    }

    /// Rows that all carry the default `option` role.
    pub fn with_ids(ids: &[&str]) -> Self {
        let mut host = Self::with_rows(&[]);
        host.set_ids(ids);
        host
    }

    pub fn set_ids(&mut self, ids: &[&str]) {
        self.rows = Some(
            ids.iter()
                .map(|id| ("option".to_string(), id.to_string()))
                .collect(),
        );
    }
}

struct MockItem<'a> {
    calls: &'a mut Vec<HostCall>,
    index: usize,
}

impl ActiveItem for MockItem<'_> {
    fn scroll_into_view(&mut self) {
        self.calls.push(HostCall::ScrollIntoView(self.index));
    }

    fn focus(&mut self) {
        self.calls.push(HostCall::Focus(self.index));
    }
}

impl Host for MockHost {
    fn list_element(&self) -> Option<&dyn ListElement> {
        self.rows.as_ref().map(|rows| rows as &dyn ListElement)
    }

    fn active_item(&mut self, index: usize) -> Option<Box<dyn ActiveItem + '_>> {
        if !self.provide_active_item {
            return None;
        }
        Some(Box::new(MockItem {
            calls: &mut self.calls,
            index,
        }))
    }

    fn before_open(&mut self) {
        self.calls.push(HostCall::BeforeOpen);
    }

    fn after_highlight(&mut self, index: usize) {
        self.calls.push(HostCall::AfterHighlight(index));
    }

    fn beginning_of_list(&mut self) {
        self.calls.push(HostCall::BeginningOfList);
    }

    fn end_of_list(&mut self) {
        self.calls.push(HostCall::EndOfList);
    }
}
