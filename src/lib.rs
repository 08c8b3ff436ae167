//! # deskwm - Desktop Window Manager Core
//!
//! Window management core for a single-user browser-style desktop: a window
//! registry with stacking, a pointer interaction state machine for dragging
//! and resizing, and a taskbar.
//!
//! ## Architecture
//!
//! - `window`: Window registry, lifecycle and geometry operations
//! - `input`: Pointer events and the drag/resize state machine
//! - `decoration`: Title bar, control buttons, resize zones and hit testing
//! - `taskbar`: Taskbar entries, the entry click rule and the start menu
//! - `desktop`: Session (user, theme, launchers) tying everything together
//! - `script`: JSON session replay
//! - `config`: Configuration parsing and management
//!
//! ## Usage
//!
//! ```rust
//! use deskwm::{DeskConfig, Desktop};
//!
//! let mut desktop = Desktop::new(DeskConfig::default());
//! let id = desktop.launch(0).expect("default launchers");
//!
//! // Grab the title bar and drag
//! desktop.pointer_down_at(300, 110);
//! desktop.pointer_move(350, 160);
//! desktop.pointer_up(350, 160);
//!
//! assert_eq!(desktop.windows().get_window(id).unwrap().position.x, 150);
//! ```

pub mod config;
pub mod decoration;
pub mod desktop;
pub mod input;
pub mod script;
pub mod taskbar;
pub mod window;

// Re-export main types for easy access
pub use config::DeskConfig;
pub use decoration::DecorationManager;
pub use desktop::{Desktop, DesktopSnapshot, SharedDesktop, Theme};
pub use input::{InputEvent, InputManager, InteractionState, PointerTarget, ResizeEdge};
pub use script::{replay, Script, ScriptError};
pub use taskbar::Taskbar;
pub use window::{WindowId, WindowKind, WindowManager, WindowOperation, WindowSpec};

// Re-export common error types
pub use anyhow::{Context, Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
pub const BUILD_DATE: &str = env!("BUILD_DATE");
