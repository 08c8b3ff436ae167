//! Desktop session
//!
//! Ties the window registry, the interaction state machine, window chrome and
//! the taskbar together behind one object, and adds the session-level state
//! that surrounds them: the signed-in user, the theme and desktop launchers.

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DeskConfig;
use crate::decoration::DecorationManager;
use crate::input::{InputEvent, InputManager, PointerTarget};
use crate::taskbar::{self, Taskbar, TaskbarEntry};
use crate::window::{
    Rectangle, WindowId, WindowKind, WindowManager, WindowOperation, WindowSpec,
};

/// Desktop shared between threads; every access goes through the lock
pub type SharedDesktop = Arc<Mutex<Desktop>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors used to paint chrome for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                background: "#1a1a1a",
                text: "rgba(255, 255, 255, 0.87)",
                border: "rgba(255, 255, 255, 0.3)",
            },
            Theme::Light => ThemePalette {
                background: "#f5f5f5",
                text: "#1a1a1a",
                border: "rgba(0, 0, 0, 0.3)",
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("user name must not be empty")]
    EmptyUserName,
}

/// One visible window as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    pub kind: WindowKind,
    /// Effective frame, the workspace rect while maximized
    pub frame: Rectangle,
    pub z_index: u64,
    pub maximized: bool,
    pub focused: bool,
}

/// Serializable render model of the whole desktop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopSnapshot {
    pub user: Option<String>,
    pub theme: Theme,
    pub palette: ThemePalette,
    pub start_menu_open: bool,
    /// Window bound to the active drag or resize
    pub interacting_with: Option<WindowId>,
    /// Visible windows, bottom to top
    pub windows: Vec<WindowView>,
    pub taskbar: Vec<TaskbarEntry>,
}

/// The desktop: registry, input, chrome and taskbar plus session state
#[derive(Debug)]
pub struct Desktop {
    config: DeskConfig,

    window_manager: WindowManager,
    input_manager: InputManager,
    decoration_manager: DecorationManager,
    taskbar: Taskbar,

    theme: Theme,
    user: Option<String>,
}

/// Viewport minus the taskbar strip, height clamped at 0
fn workspace_for(viewport_width: i32, viewport_height: i32, taskbar_height: i32) -> Rectangle {
    Rectangle::new(
        0,
        0,
        viewport_width,
        viewport_height.saturating_sub(taskbar_height).max(0),
    )
}

impl Desktop {
    pub fn new(config: DeskConfig) -> Self {
        debug!("🪟 Initializing window manager...");
        let window_manager = WindowManager::new(&config.window);
        let input_manager = InputManager::new(&config.window);
        let taskbar = Taskbar::new(&config.taskbar);
        let workspace = workspace_for(
            config.workspace.viewport_width,
            config.workspace.viewport_height,
            taskbar.height(),
        );
        let decoration_manager = DecorationManager::new(&config.decoration, workspace);
        let theme = config.desktop.theme;

        info!(
            "🖥️ Desktop ready: {}x{} viewport, {} launchers",
            config.workspace.viewport_width,
            config.workspace.viewport_height,
            config.desktop.launchers.len()
        );

        Self {
            config,
            window_manager,
            input_manager,
            decoration_manager,
            taskbar,
            theme,
            user: None,
        }
    }

    pub fn into_shared(self) -> SharedDesktop {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager {
        &self.window_manager
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.window_manager
    }

    pub fn input(&self) -> &InputManager {
        &self.input_manager
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    /// Area a maximized window fills (viewport minus the taskbar strip)
    pub fn workspace_rect(&self) -> Rectangle {
        self.decoration_manager.workspace()
    }

    /// Change the viewport; maximized frames follow the new workspace
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.config.workspace.viewport_width = width;
        self.config.workspace.viewport_height = height;
        let workspace = workspace_for(width, height, self.taskbar.height());
        self.decoration_manager.set_workspace(workspace);
        debug!("Viewport set to {}x{}", width, height);
    }

    // Session

    pub fn login(&mut self, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("⚠️ Rejected login with empty user name");
            return Err(SessionError::EmptyUserName);
        }
        info!("👤 User {} signed in", name);
        self.user = Some(name.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("👋 User {} signed out", user);
        }
        self.taskbar.close_start_menu();
        self.input_manager.cancel();
        self.window_manager.close_all();
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        debug!("Theme set to {:?}", theme);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn toggle_start_menu(&mut self) {
        self.taskbar.toggle_start_menu();
    }

    // Windows

    pub fn open(&mut self, spec: WindowSpec) -> WindowId {
        self.window_manager.open(spec)
    }

    /// Open the window behind the desktop launcher at `index`
    pub fn launch(&mut self, index: usize) -> Option<WindowId> {
        let Some(launcher) = self.config.desktop.launchers.get(index) else {
            warn!("⚠️ No launcher at index {}", index);
            return None;
        };
        let spec = WindowSpec::new(launcher.title.clone(), launcher.kind);
        Some(self.window_manager.open(spec))
    }

    pub fn execute_operation(&mut self, window_id: WindowId, operation: WindowOperation) {
        self.window_manager.execute_operation(window_id, operation);
    }

    /// Run the taskbar click rule for a window
    pub fn taskbar_click(&mut self, window_id: WindowId) -> Option<WindowOperation> {
        taskbar::toggle_window(&mut self.window_manager, window_id)
    }

    // Pointer input

    /// Resolve a viewport point to what lies under it, taskbar on top
    pub fn hit_test(&self, x: i32, y: i32) -> PointerTarget {
        let strip = self.taskbar.bounds(
            self.config.workspace.viewport_width,
            self.config.workspace.viewport_height,
        );
        if strip.contains(x, y) {
            let window_ids: Vec<WindowId> = self.window_manager.windows().map(|w| w.id).collect();
            if let Some(index) = self.taskbar.entry_at(strip, window_ids.len(), x, y) {
                return PointerTarget::TaskbarEntry(window_ids[index]);
            }
            if self.taskbar.start_button_bounds(strip).contains(x, y) {
                return PointerTarget::StartButton;
            }
            return PointerTarget::Taskbar;
        }

        self.decoration_manager
            .hit_test(&self.window_manager, x, y)
            .unwrap_or(PointerTarget::Desktop)
    }

    /// Feed an input event through the state machine
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<(WindowId, WindowOperation)> {
        match event {
            InputEvent::Click {
                target: PointerTarget::StartButton,
            } => {
                self.taskbar.toggle_start_menu();
                Vec::new()
            }
            InputEvent::Click {
                target: PointerTarget::Desktop,
            } => {
                self.taskbar.close_start_menu();
                Vec::new()
            }
            _ => self
                .input_manager
                .process_input_event(event, &mut self.window_manager),
        }
    }

    pub fn pointer_down_at(&mut self, x: i32, y: i32) -> Vec<(WindowId, WindowOperation)> {
        let target = self.hit_test(x, y);
        self.handle_event(InputEvent::PointerDown { target, x, y })
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) -> Vec<(WindowId, WindowOperation)> {
        self.handle_event(InputEvent::PointerMove { x, y })
    }

    pub fn pointer_up(&mut self, x: i32, y: i32) -> Vec<(WindowId, WindowOperation)> {
        self.handle_event(InputEvent::PointerUp { x, y })
    }

    pub fn click_at(&mut self, x: i32, y: i32) -> Vec<(WindowId, WindowOperation)> {
        let target = self.hit_test(x, y);
        self.handle_event(InputEvent::Click { target })
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        let focused = self.window_manager.focused_window_id();
        let windows = self
            .window_manager
            .get_render_order()
            .into_iter()
            .map(|w| WindowView {
                id: w.id,
                title: w.title.clone(),
                kind: w.kind,
                frame: self.decoration_manager.frame_for(w),
                z_index: w.z_index,
                maximized: w.maximized,
                focused: Some(w.id) == focused,
            })
            .collect();

        DesktopSnapshot {
            user: self.user.clone(),
            theme: self.theme,
            palette: self.theme.palette(),
            start_menu_open: self.taskbar.is_start_menu_open(),
            interacting_with: self.input_manager.state().window_id(),
            windows,
            taskbar: taskbar::entries(&self.window_manager),
        }
    }
}
