//! # Core Navigation Logic
//!
//! The highlight navigator and the contract it has with whoever renders
//! the list. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Navigator (state)    │
//!                    │  • Host (contract)      │
//!                    │  • Config               │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │ implements Host
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Dropdown  │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`navigator`]: `Navigator`, the highlight state machine
//! - [`host`]: `Host`, what a list renderer must provide
//! - [`config`]: settings with defaults → file → env → CLI resolution

pub mod config;
pub mod host;
pub mod navigator;

pub use config::NavigatorConfig;
pub use host::{ActiveItem, Host, ListElement, RenderedItem};
pub use navigator::{HighlightState, NavError, NavKey, Navigator, Phase};
