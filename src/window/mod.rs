//! Core Window Management System
//!
//! This module owns the window registry and the two controllers that mutate it:
//! - Lifecycle: open, close, minimize, maximize, focus, restore
//! - Geometry: reposition and resize with clamping
//!
//! Stacking is expressed by a per-window `z_index` drawn from a monotonically
//! increasing counter. Every open, focus and restore issues a fresh value, so the
//! most recently raised window always carries the numerically highest index.
//!
//! Every operation is total: an unknown window id is a silent no-op.

use crate::config::WindowConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a managed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// Content hosted inside a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    FileExplorer,
    App,
}

impl WindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::FileExplorer => "file-explorer",
            WindowKind::App => "app",
        }
    }
}

/// Top-left corner of a window in workspace coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Rectangle for window positioning and hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_loc_and_size(loc: Point, size: Size) -> Self {
        Self::new(loc.x, loc.y, size.width, size.height)
    }

    /// Saturates at `i32::MAX` for extreme geometry
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Request to open a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub title: String,
    pub kind: WindowKind,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, kind: WindowKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// A single managed surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    pub kind: WindowKind,

    /// Hidden from the workspace but still listed on the taskbar
    pub minimized: bool,

    /// Fills the workspace; `position`/`size` are kept underneath for restore
    pub maximized: bool,

    pub position: Point,
    pub size: Size,

    /// Stacking order, higher draws on top
    pub z_index: u64,
}

impl Window {
    /// Stored geometry, ignoring the maximized flag
    pub fn rect(&self) -> Rectangle {
        Rectangle::from_loc_and_size(self.position, self.size)
    }
}

/// Window operation types accepted by [`WindowManager::execute_operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOperation {
    Close,
    Minimize,
    Maximize,
    Focus,
    Restore,
    Reposition { x: i32, y: i32 },
    Resize { width: i32, height: i32 },
}

/// Window registry plus lifecycle and geometry controllers
#[derive(Debug, Clone)]
pub struct WindowManager {
    config: WindowConfig,

    /// Window records in insertion order (iteration only, not stacking)
    windows: Vec<Window>,

    /// Next window ID
    next_window_id: u64,

    /// Next stacking value; never decreases
    next_z_index: u64,
}

impl WindowManager {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            config: config.clone(),
            windows: Vec::new(),
            next_window_id: 1,
            next_z_index: 1,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Execute a window operation. Unknown ids are ignored.
    pub fn execute_operation(&mut self, window_id: WindowId, operation: WindowOperation) {
        debug!("Executing window operation: {:?} on window {}", operation, window_id);

        match operation {
            WindowOperation::Close => self.close(window_id),
            WindowOperation::Minimize => self.minimize(window_id),
            WindowOperation::Maximize => self.maximize(window_id),
            WindowOperation::Focus => self.focus(window_id),
            WindowOperation::Restore => self.restore(window_id),
            WindowOperation::Reposition { x, y } => self.reposition(window_id, x, y),
            WindowOperation::Resize { width, height } => self.resize(window_id, width, height),
        }
    }

    // === Lifecycle ===

    /// Open a new window with default geometry on top of the stack.
    ///
    /// Never deduplicates: two identical requests produce two windows.
    pub fn open(&mut self, spec: WindowSpec) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        let z_index = self.issue_z_index();

        let window = Window {
            id,
            title: spec.title,
            kind: spec.kind,
            minimized: false,
            maximized: false,
            position: Point::new(self.config.default_x, self.config.default_y),
            size: Size::new(self.config.default_width, self.config.default_height),
            z_index,
        };

        debug!(
            "Opened window {} ({}) with title: {} at z {}",
            id,
            window.kind.as_str(),
            window.title,
            z_index
        );
        self.windows.push(window);
        id
    }

    /// Remove a window unconditionally. Absent ids are a no-op.
    pub fn close(&mut self, window_id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != window_id);
        if self.windows.len() != before {
            debug!("Closed window {}", window_id);
        }
    }

    /// Toggle the minimized flag.
    ///
    /// This is a flip, not a set: the taskbar derives restore-vs-minimize from
    /// the current state before calling in.
    pub fn minimize(&mut self, window_id: WindowId) {
        if let Some(window) = self.get_window_mut(window_id) {
            window.minimized = !window.minimized;
            debug!("Window {} minimized: {}", window_id, window.minimized);
        }
    }

    /// Toggle the maximized flag. Stored geometry is left untouched.
    pub fn maximize(&mut self, window_id: WindowId) {
        if let Some(window) = self.get_window_mut(window_id) {
            window.maximized = !window.maximized;
            debug!("Window {} maximized: {}", window_id, window.maximized);
        }
    }

    /// Raise a window above every other by issuing the next stacking value.
    pub fn focus(&mut self, window_id: WindowId) {
        if !self.contains(window_id) {
            return;
        }
        let z_index = self.issue_z_index();
        if let Some(window) = self.get_window_mut(window_id) {
            window.z_index = z_index;
            debug!("Focused window {} at z {}", window_id, z_index);
        }
    }

    /// Clear `minimized` and raise the window to the top.
    pub fn restore(&mut self, window_id: WindowId) {
        if !self.contains(window_id) {
            return;
        }
        let z_index = self.issue_z_index();
        if let Some(window) = self.get_window_mut(window_id) {
            window.minimized = false;
            window.z_index = z_index;
            debug!("Restored window {} at z {}", window_id, z_index);
        }
    }

    /// Drop every window. The id and stacking counters keep running.
    pub fn close_all(&mut self) {
        if !self.windows.is_empty() {
            debug!("Closing {} windows", self.windows.len());
        }
        self.windows.clear();
    }

    // === Geometry ===

    /// Store a new origin, clamped per axis to be non-negative.
    ///
    /// Maximized windows accept the write; the renderer ignores stored
    /// geometry while the flag is set.
    pub fn reposition(&mut self, window_id: WindowId, x: i32, y: i32) {
        if let Some(window) = self.get_window_mut(window_id) {
            window.position = Point::new(x.max(0), y.max(0));
            debug!(
                "Moved window {} to ({}, {})",
                window_id, window.position.x, window.position.y
            );
        }
    }

    /// Store a new size, clamped to the configured minimum.
    pub fn resize(&mut self, window_id: WindowId, width: i32, height: i32) {
        let (min_width, min_height) = (self.config.min_width, self.config.min_height);
        if let Some(window) = self.get_window_mut(window_id) {
            window.size = Size::new(width.max(min_width), height.max(min_height));
            debug!(
                "Resized window {} to {}x{}",
                window_id, window.size.width, window.size.height
            );
        }
    }

    // === Queries ===

    /// Get a window by ID
    pub fn get_window(&self, window_id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    fn get_window_mut(&mut self, window_id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.get_window(window_id).is_some()
    }

    /// All windows in insertion order (taskbar order)
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Non-minimized windows from bottom to top
    pub fn get_render_order(&self) -> Vec<&Window> {
        let mut visible: Vec<&Window> = self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// The focused window: highest stacking value among non-minimized windows
    pub fn focused_window(&self) -> Option<&Window> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused_window().map(|w| w.id)
    }

    /// Highest stacking value over the full window set, minimized included
    pub fn max_z_index(&self) -> Option<u64> {
        self.windows.iter().map(|w| w.z_index).max()
    }

    /// Whether the window holds the maximum stacking value of the full set
    pub fn is_topmost(&self, window_id: WindowId) -> bool {
        match (self.get_window(window_id), self.max_z_index()) {
            (Some(window), Some(max)) => window.z_index == max,
            _ => false,
        }
    }

    /// Last stacking value handed out, 0 before the first open
    pub fn last_issued_z_index(&self) -> u64 {
        self.next_z_index - 1
    }

    fn issue_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index += 1;
        z_index
    }
}
