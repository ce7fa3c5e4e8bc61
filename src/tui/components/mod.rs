//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components follow the persistent state + transient wrapper pattern:
//! - a `*State` struct lives across frames and handles events
//!   (via [`EventHandler`](super::component::EventHandler))
//! - a borrowed wrapper is built each frame and renders
//!   (via [`Component`](super::component::Component))
//!
//! Each component file contains its state, events, rendering and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! └── dropdown.rs   (filterable list driven by the highlight navigator)
//! ```

pub mod dropdown;
pub use dropdown::{Dropdown, DropdownEvent, DropdownHost, DropdownState, Entry, centered_rect};
