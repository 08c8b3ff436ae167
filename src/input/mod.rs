//! Pointer interaction handling
//!
//! Translates a press-move-release pointer stream into window operations.
//! A single [`InteractionState`] slot tracks the active gesture for the whole
//! desktop: either a drag bound to a title bar, or a resize bound to one of
//! the eight edge/corner handles. Every move is applied immediately, so a
//! release only clears the slot.

use crate::config::WindowConfig;
use crate::taskbar;
use crate::window::{Point, Rectangle, Size, WindowId, WindowManager, WindowOperation};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Edge or corner grabbed by a resize gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
        ResizeEdge::Right,
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
    ];

    pub fn touches_top(self) -> bool {
        matches!(self, ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight)
    }

    pub fn touches_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }

    pub fn touches_left(self) -> bool {
        matches!(self, ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft)
    }

    pub fn touches_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    /// Whether resizing from this edge moves the window origin
    pub fn moves_origin(self) -> bool {
        self.touches_left() || self.touches_top()
    }
}

/// Title bar control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowControl {
    Minimize,
    Maximize,
    Close,
}

/// Classification of what lies under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty workspace
    Desktop,
    /// Start button on the taskbar strip
    StartButton,
    /// Empty part of the taskbar strip
    Taskbar,
    TaskbarEntry(WindowId),
    TitleBar(WindowId),
    ResizeHandle(WindowId, ResizeEdge),
    Control(WindowId, WindowControl),
    Content(WindowId),
}

impl PointerTarget {
    /// Window addressed by this target, if any
    pub fn window_id(&self) -> Option<WindowId> {
        match *self {
            PointerTarget::TaskbarEntry(id)
            | PointerTarget::TitleBar(id)
            | PointerTarget::ResizeHandle(id, _)
            | PointerTarget::Control(id, _)
            | PointerTarget::Content(id) => Some(id),
            PointerTarget::Desktop | PointerTarget::StartButton | PointerTarget::Taskbar => None,
        }
    }
}

/// Pointer events delivered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { target: PointerTarget, x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    /// Pointer capture lost; handled like a release
    PointerCancel,
    Click { target: PointerTarget },
}

/// Geometry snapshot taken when a resize starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeAnchor {
    pub pointer: Point,
    pub position: Point,
    pub size: Size,
}

/// The single active-gesture slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        window_id: WindowId,
        /// Pointer minus window origin at press time, fixed for the gesture
        anchor_offset: Point,
    },
    Resizing {
        window_id: WindowId,
        edge: ResizeEdge,
        anchor: ResizeAnchor,
    },
}

impl InteractionState {
    pub fn window_id(&self) -> Option<WindowId> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Dragging { window_id, .. }
            | InteractionState::Resizing { window_id, .. } => Some(window_id),
        }
    }
}

/// New origin for a drag: the window moves rigidly with the pointer.
pub fn drag_position(anchor_offset: Point, x: i32, y: i32) -> Point {
    Point::new(
        x.saturating_sub(anchor_offset.x).max(0),
        y.saturating_sub(anchor_offset.y).max(0),
    )
}

/// New geometry for a resize gesture with the pointer at `(x, y)`.
///
/// With `pin_opposite_edge` the origin is derived from the clamped size, so
/// the edge opposite the grabbed one stays put once the minimum is reached.
/// Without it the origin follows the raw pointer delta.
pub fn resize_geometry(
    edge: ResizeEdge,
    anchor: &ResizeAnchor,
    x: i32,
    y: i32,
    min_size: Size,
    pin_opposite_edge: bool,
) -> Rectangle {
    let delta_x = x.saturating_sub(anchor.pointer.x);
    let delta_y = y.saturating_sub(anchor.pointer.y);

    let mut width = anchor.size.width;
    let mut height = anchor.size.height;
    let mut new_x = anchor.position.x;
    let mut new_y = anchor.position.y;

    if edge.touches_right() {
        width = anchor.size.width.saturating_add(delta_x).max(min_size.width);
    }
    if edge.touches_left() {
        width = anchor.size.width.saturating_sub(delta_x).max(min_size.width);
        let unclamped_x = if pin_opposite_edge {
            anchor
                .position
                .x
                .saturating_add(anchor.size.width)
                .saturating_sub(width)
        } else {
            anchor.position.x.saturating_add(delta_x)
        };
        new_x = unclamped_x.max(0);
    }
    if edge.touches_bottom() {
        height = anchor.size.height.saturating_add(delta_y).max(min_size.height);
    }
    if edge.touches_top() {
        height = anchor.size.height.saturating_sub(delta_y).max(min_size.height);
        let unclamped_y = if pin_opposite_edge {
            anchor
                .position
                .y
                .saturating_add(anchor.size.height)
                .saturating_sub(height)
        } else {
            anchor.position.y.saturating_add(delta_y)
        };
        new_y = unclamped_y.max(0);
    }

    Rectangle::new(new_x, new_y, width, height)
}

/// Drives the interaction state machine against a [`WindowManager`]
#[derive(Debug)]
pub struct InputManager {
    config: WindowConfig,

    state: InteractionState,

    /// Last pointer position seen
    pointer_position: Point,
}

impl InputManager {
    pub fn new(config: &WindowConfig) -> Self {
        info!(
            "🖱️ Input manager ready (pin opposite edge: {})",
            config.pin_opposite_edge
        );
        Self {
            config: config.clone(),
            state: InteractionState::Idle,
            pointer_position: Point::default(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    /// Process an input event and return the operations applied to `windows`
    pub fn process_input_event(
        &mut self,
        event: InputEvent,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        match event {
            InputEvent::PointerDown { target, x, y } => self.process_pointer_down(target, x, y, windows),
            InputEvent::PointerMove { x, y } => self.process_pointer_move(x, y, windows),
            InputEvent::PointerUp { x, y } => {
                self.pointer_position = Point::new(x, y);
                self.cancel();
                Vec::new()
            }
            InputEvent::PointerCancel => {
                self.cancel();
                Vec::new()
            }
            InputEvent::Click { target } => self.process_click(target, windows),
        }
    }

    /// End any active gesture without touching the registry
    pub fn cancel(&mut self) {
        if let Some(window_id) = self.state.window_id() {
            debug!("Gesture on window {} ended", window_id);
        }
        self.state = InteractionState::Idle;
    }

    fn process_pointer_down(
        &mut self,
        target: PointerTarget,
        x: i32,
        y: i32,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        self.pointer_position = Point::new(x, y);

        // A fresh press always supersedes whatever gesture was running
        self.cancel();

        match target {
            PointerTarget::TitleBar(window_id) => self.begin_drag(window_id, x, y, windows),
            PointerTarget::ResizeHandle(window_id, edge) => {
                self.begin_resize(window_id, edge, x, y, windows)
            }
            _ => Vec::new(),
        }
    }

    fn begin_drag(
        &mut self,
        window_id: WindowId,
        x: i32,
        y: i32,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        let Some(window) = windows.get_window(window_id) else {
            debug!("Ignoring drag on unknown window {}", window_id);
            return Vec::new();
        };
        if window.maximized || window.minimized {
            debug!("Ignoring drag on window {} (maximized or minimized)", window_id);
            return Vec::new();
        }

        let anchor_offset = Point::new(
            x.saturating_sub(window.position.x),
            y.saturating_sub(window.position.y),
        );
        self.state = InteractionState::Dragging {
            window_id,
            anchor_offset,
        };
        windows.focus(window_id);
        debug!(
            "Drag started on window {} with offset ({}, {})",
            window_id, anchor_offset.x, anchor_offset.y
        );
        vec![(window_id, WindowOperation::Focus)]
    }

    fn begin_resize(
        &mut self,
        window_id: WindowId,
        edge: ResizeEdge,
        x: i32,
        y: i32,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        let Some(window) = windows.get_window(window_id) else {
            debug!("Ignoring resize on unknown window {}", window_id);
            return Vec::new();
        };
        if window.maximized || window.minimized {
            debug!("Ignoring resize on window {} (maximized or minimized)", window_id);
            return Vec::new();
        }

        let anchor = ResizeAnchor {
            pointer: Point::new(x, y),
            position: window.position,
            size: window.size,
        };
        self.state = InteractionState::Resizing {
            window_id,
            edge,
            anchor,
        };
        windows.focus(window_id);
        debug!("Resize started on window {} from {:?}", window_id, edge);
        vec![(window_id, WindowOperation::Focus)]
    }

    fn process_pointer_move(
        &mut self,
        x: i32,
        y: i32,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        self.pointer_position = Point::new(x, y);

        let Some(window_id) = self.state.window_id() else {
            return Vec::new();
        };
        // The window may have been closed or maximized mid-gesture
        match windows.get_window(window_id) {
            Some(window) if !window.maximized => {}
            _ => return Vec::new(),
        }

        match self.state {
            InteractionState::Idle => Vec::new(),
            InteractionState::Dragging { anchor_offset, .. } => {
                let position = drag_position(anchor_offset, x, y);
                let op = WindowOperation::Reposition {
                    x: position.x,
                    y: position.y,
                };
                windows.execute_operation(window_id, op);
                vec![(window_id, op)]
            }
            InteractionState::Resizing { edge, anchor, .. } => {
                let min_size = Size::new(self.config.min_width, self.config.min_height);
                let rect = resize_geometry(edge, &anchor, x, y, min_size, self.config.pin_opposite_edge);

                let mut ops = vec![(
                    window_id,
                    WindowOperation::Resize {
                        width: rect.width,
                        height: rect.height,
                    },
                )];
                if edge.moves_origin() {
                    ops.push((window_id, WindowOperation::Reposition { x: rect.x, y: rect.y }));
                }
                for &(id, op) in &ops {
                    windows.execute_operation(id, op);
                }
                ops
            }
        }
    }

    fn process_click(
        &mut self,
        target: PointerTarget,
        windows: &mut WindowManager,
    ) -> Vec<(WindowId, WindowOperation)> {
        let op = match target {
            PointerTarget::Control(window_id, control) => {
                let op = match control {
                    WindowControl::Minimize => WindowOperation::Minimize,
                    WindowControl::Maximize => WindowOperation::Maximize,
                    WindowControl::Close => WindowOperation::Close,
                };
                if !windows.contains(window_id) {
                    return Vec::new();
                }
                windows.execute_operation(window_id, op);
                if op == WindowOperation::Close {
                    return vec![(window_id, op)];
                }
                // Minimize and maximize clicks also raise the window
                windows.focus(window_id);
                return vec![(window_id, op), (window_id, WindowOperation::Focus)];
            }
            PointerTarget::TaskbarEntry(window_id) => {
                taskbar::toggle_window(windows, window_id).map(|op| (window_id, op))
            }
            PointerTarget::TitleBar(window_id)
            | PointerTarget::Content(window_id)
            | PointerTarget::ResizeHandle(window_id, _) => {
                if !windows.contains(window_id) {
                    return Vec::new();
                }
                windows.focus(window_id);
                Some((window_id, WindowOperation::Focus))
            }
            PointerTarget::Desktop | PointerTarget::StartButton | PointerTarget::Taskbar => None,
        };
        op.into_iter().collect()
    }
}
