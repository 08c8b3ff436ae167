//! Taskbar control logic
//!
//! One entry per open window, in the order windows were opened. Clicking an
//! entry restores a minimized window, minimizes the window currently on top,
//! and otherwise raises it. The start menu is a plain open/closed flag.

use log::debug;
use serde::Serialize;

use crate::config::TaskbarConfig;
use crate::window::{Rectangle, WindowId, WindowManager, WindowOperation};

/// Apply the taskbar click rule for `window_id` and return the operation used.
///
/// "Topmost" is a strict comparison against the maximum stacking value of the
/// full window set at click time, minimized windows included.
pub fn toggle_window(windows: &mut WindowManager, window_id: WindowId) -> Option<WindowOperation> {
    let window = windows.get_window(window_id)?;

    let op = if window.minimized {
        WindowOperation::Restore
    } else if windows.is_topmost(window_id) {
        WindowOperation::Minimize
    } else {
        WindowOperation::Focus
    };

    debug!("Taskbar click on window {} -> {:?}", window_id, op);
    windows.execute_operation(window_id, op);
    Some(op)
}

/// Render model of one taskbar button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub title: String,
    /// Entry of the focused window
    pub active: bool,
    pub minimized: bool,
}

/// Entries for every window, minimized included, in insertion order
pub fn entries(windows: &WindowManager) -> Vec<TaskbarEntry> {
    let focused = windows.focused_window_id();
    windows
        .windows()
        .map(|w| TaskbarEntry {
            window_id: w.id,
            title: w.title.clone(),
            active: Some(w.id) == focused,
            minimized: w.minimized,
        })
        .collect()
}

/// Taskbar strip state and layout
#[derive(Debug, Clone)]
pub struct Taskbar {
    config: TaskbarConfig,
    start_menu_open: bool,
}

impl Taskbar {
    pub fn new(config: &TaskbarConfig) -> Self {
        Self {
            config: config.clone(),
            start_menu_open: false,
        }
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    pub fn is_start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn toggle_start_menu(&mut self) {
        self.start_menu_open = !self.start_menu_open;
        debug!("Start menu open: {}", self.start_menu_open);
    }

    pub fn close_start_menu(&mut self) {
        if self.start_menu_open {
            self.start_menu_open = false;
            debug!("Start menu closed");
        }
    }

    /// Strip rectangle at the bottom of a viewport
    pub fn bounds(&self, viewport_width: i32, viewport_height: i32) -> Rectangle {
        Rectangle::new(
            0,
            viewport_height.saturating_sub(self.config.height),
            viewport_width,
            self.config.height,
        )
    }

    /// Start button rectangle inside the strip
    pub fn start_button_bounds(&self, strip: Rectangle) -> Rectangle {
        Rectangle::new(
            strip.x + self.config.entry_gap,
            strip.y,
            self.config.start_button_width,
            strip.height,
        )
    }

    /// Rectangle of the entry at `index`, laid out left to right after the start button
    pub fn entry_bounds(&self, strip: Rectangle, index: usize) -> Rectangle {
        let start = self.start_button_bounds(strip);
        let step = self.config.entry_width + self.config.entry_gap;
        Rectangle::new(
            start.right() + self.config.entry_gap + index as i32 * step,
            strip.y,
            self.config.entry_width,
            strip.height,
        )
    }

    /// Index of the entry under a point inside the strip
    pub fn entry_at(&self, strip: Rectangle, entry_count: usize, x: i32, y: i32) -> Option<usize> {
        (0..entry_count).find(|&i| self.entry_bounds(strip, i).contains(x, y))
    }
}
