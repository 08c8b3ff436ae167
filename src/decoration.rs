//! Window chrome geometry for deskwm
//!
//! This module lays out the parts of each window the pointer can grab
//! (title bar, control buttons, eight resize zones) and classifies pointer
//! positions into [`PointerTarget`]s for the input module.

use log::debug;
use serde::Serialize;

use crate::config::DecorationConfig;
use crate::input::{PointerTarget, ResizeEdge, WindowControl};
use crate::window::{Rectangle, Window, WindowManager};

/// Title bar button rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TitlebarButtons {
    pub minimize: Rectangle,
    pub maximize: Rectangle,
    pub close: Rectangle,
}

impl TitlebarButtons {
    fn hit(&self, x: i32, y: i32) -> Option<WindowControl> {
        // Right to left, matching visual order from the close button inward
        if self.close.contains(x, y) {
            Some(WindowControl::Close)
        } else if self.maximize.contains(x, y) {
            Some(WindowControl::Maximize)
        } else if self.minimize.contains(x, y) {
            Some(WindowControl::Minimize)
        } else {
            None
        }
    }
}

/// Laid-out chrome of one window, in workspace coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowChrome {
    /// Effective frame (workspace rect while maximized)
    pub frame: Rectangle,
    pub titlebar: Rectangle,
    pub content: Rectangle,
    pub buttons: TitlebarButtons,
    /// Resize affordances; empty while maximized
    pub resize_zones: Vec<(ResizeEdge, Rectangle)>,
}

/// Computes chrome layout and performs pointer hit testing
#[derive(Debug, Clone)]
pub struct DecorationManager {
    config: DecorationConfig,

    /// Area a maximized window fills
    workspace: Rectangle,
}

impl DecorationManager {
    pub fn new(config: &DecorationConfig, workspace: Rectangle) -> Self {
        debug!(
            "🎨 Decoration layout: titlebar {}px, buttons {}px, workspace {}x{}",
            config.titlebar_height, config.button_size, workspace.width, workspace.height
        );
        Self {
            config: config.clone(),
            workspace,
        }
    }

    pub fn workspace(&self) -> Rectangle {
        self.workspace
    }

    pub fn set_workspace(&mut self, workspace: Rectangle) {
        self.workspace = workspace;
    }

    /// Rectangle a window occupies on screen
    pub fn frame_for(&self, window: &Window) -> Rectangle {
        if window.maximized {
            self.workspace
        } else {
            window.rect()
        }
    }

    /// Lay out the chrome of `window`
    pub fn chrome_for(&self, window: &Window) -> WindowChrome {
        let frame = self.frame_for(window);
        let cfg = &self.config;

        let titlebar_height = cfg.titlebar_height.min(frame.height);
        let titlebar = Rectangle::new(frame.x, frame.y, frame.width, titlebar_height);
        let content = Rectangle::new(
            frame.x,
            frame.y.saturating_add(titlebar_height),
            frame.width,
            frame.height - titlebar_height,
        );

        let button_y = frame
            .y
            .saturating_add((cfg.titlebar_height - cfg.button_size) / 2);
        let close_x = frame.right() - cfg.button_padding - cfg.button_size;
        let maximize_x = close_x - cfg.button_gap - cfg.button_size;
        let minimize_x = maximize_x - cfg.button_gap - cfg.button_size;
        let button = |x| Rectangle::new(x, button_y, cfg.button_size, cfg.button_size);
        let buttons = TitlebarButtons {
            minimize: button(minimize_x),
            maximize: button(maximize_x),
            close: button(close_x),
        };

        let resize_zones = if window.maximized {
            Vec::new()
        } else {
            self.resize_zones(frame)
        };

        WindowChrome {
            frame,
            titlebar,
            content,
            buttons,
            resize_zones,
        }
    }

    fn resize_zones(&self, frame: Rectangle) -> Vec<(ResizeEdge, Rectangle)> {
        let c = self.config.corner_size;
        let e = self.config.edge_thickness;
        let inner_width = (frame.width - 2 * c).max(0);
        let inner_height = (frame.height - 2 * c).max(0);

        // Corners first so they win where they overlap an edge strip
        vec![
            (ResizeEdge::TopLeft, Rectangle::new(frame.x, frame.y, c, c)),
            (ResizeEdge::TopRight, Rectangle::new(frame.right() - c, frame.y, c, c)),
            (ResizeEdge::BottomLeft, Rectangle::new(frame.x, frame.bottom() - c, c, c)),
            (
                ResizeEdge::BottomRight,
                Rectangle::new(frame.right() - c, frame.bottom() - c, c, c),
            ),
            (
                ResizeEdge::Top,
                Rectangle::new(frame.x.saturating_add(c), frame.y, inner_width, e),
            ),
            (
                ResizeEdge::Bottom,
                Rectangle::new(frame.x.saturating_add(c), frame.bottom() - e, inner_width, e),
            ),
            (
                ResizeEdge::Left,
                Rectangle::new(frame.x, frame.y.saturating_add(c), e, inner_height),
            ),
            (
                ResizeEdge::Right,
                Rectangle::new(frame.right() - e, frame.y.saturating_add(c), e, inner_height),
            ),
        ]
    }

    /// Classify a point against a single window, `None` if outside its frame
    pub fn hit_test_window(&self, window: &Window, x: i32, y: i32) -> Option<PointerTarget> {
        if window.minimized {
            return None;
        }
        let chrome = self.chrome_for(window);
        if !chrome.frame.contains(x, y) {
            return None;
        }

        if let Some((edge, _)) = chrome.resize_zones.iter().find(|(_, zone)| zone.contains(x, y)) {
            return Some(PointerTarget::ResizeHandle(window.id, *edge));
        }
        if let Some(control) = chrome.buttons.hit(x, y) {
            return Some(PointerTarget::Control(window.id, control));
        }
        if chrome.titlebar.contains(x, y) {
            return Some(PointerTarget::TitleBar(window.id));
        }
        Some(PointerTarget::Content(window.id))
    }

    /// Classify a point against every visible window, topmost first
    pub fn hit_test(&self, windows: &WindowManager, x: i32, y: i32) -> Option<PointerTarget> {
        windows
            .get_render_order()
            .into_iter()
            .rev()
            .find_map(|window| self.hit_test_window(window, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use crate::window::{WindowId, WindowKind, WindowSpec};

    const WORKSPACE: Rectangle = Rectangle::new(0, 0, 1920, 1032);

    fn setup() -> (DecorationManager, WindowManager, WindowId) {
        let mut wm = WindowManager::new(&WindowConfig::default());
        let id = wm.open(WindowSpec::new("Files", WindowKind::FileExplorer));
        (DecorationManager::new(&DecorationConfig::default(), WORKSPACE), wm, id)
    }

    #[test]
    fn test_frame_follows_maximize() {
        let (deco, mut wm, id) = setup();
        assert_eq!(deco.frame_for(wm.get_window(id).unwrap()), Rectangle::new(100, 100, 800, 600));

        wm.maximize(id);
        assert_eq!(deco.frame_for(wm.get_window(id).unwrap()), WORKSPACE);
    }

    #[test]
    fn test_chrome_layout() {
        let (deco, wm, id) = setup();
        let chrome = deco.chrome_for(wm.get_window(id).unwrap());

        assert_eq!(chrome.titlebar, Rectangle::new(100, 100, 800, 32));
        assert_eq!(chrome.content, Rectangle::new(100, 132, 800, 568));
        // 900 - 12 padding - 16 button
        assert_eq!(chrome.buttons.close, Rectangle::new(872, 108, 16, 16));
        assert_eq!(chrome.buttons.maximize.x, 852);
        assert_eq!(chrome.buttons.minimize.x, 832);
        assert_eq!(chrome.resize_zones.len(), 8);
    }

    #[test]
    fn test_maximized_window_has_no_resize_zones() {
        let (deco, mut wm, id) = setup();
        wm.maximize(id);
        let window = wm.get_window(id).unwrap();
        assert!(deco.chrome_for(window).resize_zones.is_empty());
        assert_eq!(deco.hit_test_window(window, 0, 0), Some(PointerTarget::TitleBar(id)));
    }

    #[test]
    fn test_hit_test_precedence() {
        let (deco, wm, id) = setup();
        let window = wm.get_window(id).unwrap();

        assert_eq!(
            deco.hit_test_window(window, 101, 101),
            Some(PointerTarget::ResizeHandle(id, ResizeEdge::TopLeft))
        );
        assert_eq!(
            deco.hit_test_window(window, 500, 101),
            Some(PointerTarget::ResizeHandle(id, ResizeEdge::Top))
        );
        assert_eq!(
            deco.hit_test_window(window, 898, 400),
            Some(PointerTarget::ResizeHandle(id, ResizeEdge::Right))
        );
        assert_eq!(
            deco.hit_test_window(window, 899, 699),
            Some(PointerTarget::ResizeHandle(id, ResizeEdge::BottomRight))
        );
        assert_eq!(
            deco.hit_test_window(window, 875, 115),
            Some(PointerTarget::Control(id, WindowControl::Close))
        );
        assert_eq!(
            deco.hit_test_window(window, 835, 115),
            Some(PointerTarget::Control(id, WindowControl::Minimize))
        );
        assert_eq!(deco.hit_test_window(window, 300, 115), Some(PointerTarget::TitleBar(id)));
        assert_eq!(deco.hit_test_window(window, 300, 400), Some(PointerTarget::Content(id)));
        assert_eq!(deco.hit_test_window(window, 50, 50), None);
    }

    #[test]
    fn test_hit_test_picks_topmost_and_skips_minimized() {
        let (deco, mut wm, a) = setup();
        let b = wm.open(WindowSpec::new("Other", WindowKind::App));
        wm.reposition(b, 300, 300);

        // Overlap region: both windows cover (400, 400)
        assert_eq!(deco.hit_test(&wm, 400, 400), Some(PointerTarget::Content(b)));

        wm.focus(a);
        assert_eq!(deco.hit_test(&wm, 400, 400), Some(PointerTarget::Content(a)));

        wm.minimize(a);
        assert_eq!(deco.hit_test(&wm, 400, 400), Some(PointerTarget::Content(b)));

        assert_eq!(deco.hit_test(&wm, 10, 10), None);
    }
}
