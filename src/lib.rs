//! listnav library exports
//!
//! [`core`] holds the highlight navigator and its host contract; [`tui`] is a
//! ratatui dropdown that hosts it.

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
