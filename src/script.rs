//! Scripted session replay
//!
//! A script is a JSON document with an optional viewport and a list of
//! events, each tagged by `"type"`:
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 720 },
//!   "events": [
//!     { "type": "Login", "name": "ana" },
//!     { "type": "Launch", "index": 0 },
//!     { "type": "PointerDown", "x": 300, "y": 110 },
//!     { "type": "PointerMove", "x": 350, "y": 160 },
//!     { "type": "PointerUp", "x": 350, "y": 160 },
//!     { "type": "TaskbarClick", "window": 1 }
//!   ]
//! }
//! ```
//!
//! Windows are referenced by their 1-based position in the order the script
//! opened them. References that do not resolve are skipped.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::desktop::{Desktop, SessionError};
use crate::input::InputEvent;
use crate::window::{WindowId, WindowKind, WindowOperation, WindowSpec};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("login rejected at event {index}: {source}")]
    Login {
        index: usize,
        #[source]
        source: SessionError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

/// One scripted step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptEvent {
    Login { name: String },
    Logout,
    ToggleTheme,
    ToggleStartMenu,

    /// Open the desktop launcher at `index`
    Launch { index: usize },
    Open { title: String, kind: WindowKind },

    Close { window: usize },
    Minimize { window: usize },
    Maximize { window: usize },
    Focus { window: usize },
    Restore { window: usize },
    Reposition { window: usize, x: i32, y: i32 },
    Resize { window: usize, width: i32, height: i32 },
    TaskbarClick { window: usize },

    /// Raw pointer input, hit-tested against the current layout
    PointerDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    PointerCancel,
    Click { x: i32, y: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Option<Viewport>,
    pub events: Vec<ScriptEvent>,
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Script {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }
}

/// What a replay did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    /// Windows opened by the script, in open order
    pub opened: Vec<WindowId>,
    /// Window operations applied, including those produced by pointer input
    pub operations: usize,
    /// Events skipped because their window reference did not resolve
    pub skipped: usize,
}

impl ReplaySummary {
    fn resolve(&self, window: usize) -> Option<WindowId> {
        window
            .checked_sub(1)
            .and_then(|index| self.opened.get(index))
            .copied()
    }
}

/// Replay `script` against `desktop`, stopping at the first rejected login
pub fn replay(desktop: &mut Desktop, script: &Script) -> Result<ReplaySummary, ScriptError> {
    if let Some(viewport) = script.viewport {
        desktop.set_viewport(viewport.width, viewport.height);
    }

    let mut summary = ReplaySummary::default();
    for (index, event) in script.events.iter().enumerate() {
        debug!("Script event {}: {:?}", index, event);
        summary.events += 1;

        let window_op = match *event {
            ScriptEvent::Login { ref name } => {
                desktop
                    .login(name)
                    .map_err(|source| ScriptError::Login { index, source })?;
                None
            }
            ScriptEvent::Logout => {
                desktop.logout();
                None
            }
            ScriptEvent::ToggleTheme => {
                desktop.toggle_theme();
                None
            }
            ScriptEvent::ToggleStartMenu => {
                desktop.toggle_start_menu();
                None
            }
            ScriptEvent::Launch { index: launcher } => {
                if let Some(id) = desktop.launch(launcher) {
                    summary.opened.push(id);
                }
                None
            }
            ScriptEvent::Open { ref title, kind } => {
                summary.opened.push(desktop.open(WindowSpec::new(title.clone(), kind)));
                None
            }
            ScriptEvent::Close { window } => Some((window, WindowOperation::Close)),
            ScriptEvent::Minimize { window } => Some((window, WindowOperation::Minimize)),
            ScriptEvent::Maximize { window } => Some((window, WindowOperation::Maximize)),
            ScriptEvent::Focus { window } => Some((window, WindowOperation::Focus)),
            ScriptEvent::Restore { window } => Some((window, WindowOperation::Restore)),
            ScriptEvent::Reposition { window, x, y } => {
                Some((window, WindowOperation::Reposition { x, y }))
            }
            ScriptEvent::Resize {
                window,
                width,
                height,
            } => Some((window, WindowOperation::Resize { width, height })),
            ScriptEvent::TaskbarClick { window } => {
                match summary.resolve(window) {
                    Some(id) => {
                        if desktop.taskbar_click(id).is_some() {
                            summary.operations += 1;
                        }
                    }
                    None => summary.skipped += 1,
                }
                None
            }
            ScriptEvent::PointerDown { x, y } => {
                summary.operations += desktop.pointer_down_at(x, y).len();
                None
            }
            ScriptEvent::PointerMove { x, y } => {
                summary.operations += desktop.pointer_move(x, y).len();
                None
            }
            ScriptEvent::PointerUp { x, y } => {
                summary.operations += desktop.pointer_up(x, y).len();
                None
            }
            ScriptEvent::PointerCancel => {
                summary.operations += desktop
                    .handle_event(InputEvent::PointerCancel)
                    .len();
                None
            }
            ScriptEvent::Click { x, y } => {
                summary.operations += desktop.click_at(x, y).len();
                None
            }
        };

        if let Some((window, op)) = window_op {
            match summary.resolve(window) {
                Some(id) => {
                    desktop.execute_operation(id, op);
                    summary.operations += 1;
                }
                None => {
                    debug!("Script window reference {} does not resolve", window);
                    summary.skipped += 1;
                }
            }
        }
    }

    info!(
        "📜 Replayed {} events: {} windows opened, {} operations",
        summary.events,
        summary.opened.len(),
        summary.operations
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeskConfig;
    use crate::desktop::Theme;
    use crate::window::{Point, Size};

    fn run(json: &str) -> (Desktop, ReplaySummary) {
        let mut desktop = Desktop::new(DeskConfig::default());
        let script: Script = json.parse().unwrap();
        let summary = replay(&mut desktop, &script).unwrap();
        (desktop, summary)
    }

    #[test]
    fn test_event_deserialization() {
        let script: Script = r#"{"events":[
            {"type":"Open","title":"Notes","kind":"app"},
            {"type":"Resize","window":1,"width":640,"height":480},
            {"type":"PointerCancel"}
        ]}"#
        .parse()
        .unwrap();

        assert_eq!(script.viewport, None);
        assert_eq!(
            script.events[0],
            ScriptEvent::Open {
                title: "Notes".to_string(),
                kind: WindowKind::App
            }
        );
        assert_eq!(
            script.events[1],
            ScriptEvent::Resize {
                window: 1,
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn test_malformed_script_is_parse_error() {
        let err = "{\"events\":[{\"type\":\"Teleport\"}]}".parse::<Script>().unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));

        let err = "not json".parse::<Script>().unwrap_err();
        assert!(err.to_string().starts_with("malformed script"));
    }

    #[test]
    fn test_window_references_follow_open_order() {
        let (desktop, summary) = run(
            r#"{"events":[
                {"type":"Launch","index":0},
                {"type":"Open","title":"Notes","kind":"app"},
                {"type":"Reposition","window":2,"x":-10,"y":40},
                {"type":"Minimize","window":1}
            ]}"#,
        );

        assert_eq!(summary.opened.len(), 2);
        let first = desktop.windows().get_window(summary.opened[0]).unwrap();
        let second = desktop.windows().get_window(summary.opened[1]).unwrap();
        assert!(first.minimized);
        assert_eq!(second.position, Point::new(0, 40));
        assert_eq!(summary.operations, 2);
    }

    #[test]
    fn test_unresolved_references_are_skipped() {
        let (desktop, summary) = run(
            r#"{"events":[
                {"type":"Launch","index":0},
                {"type":"Close","window":0},
                {"type":"Focus","window":5},
                {"type":"TaskbarClick","window":3},
                {"type":"Launch","index":42}
            ]}"#,
        );

        assert_eq!(desktop.windows().len(), 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.opened.len(), 1);
    }

    #[test]
    fn test_rejected_login_stops_replay() {
        let mut desktop = Desktop::new(DeskConfig::default());
        let script: Script = r#"{"events":[
            {"type":"Launch","index":0},
            {"type":"Login","name":"   "},
            {"type":"Launch","index":0}
        ]}"#
        .parse()
        .unwrap();

        let err = replay(&mut desktop, &script).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Login {
                index: 1,
                source: SessionError::EmptyUserName
            }
        ));
        assert_eq!(desktop.windows().len(), 1);
    }

    #[test]
    fn test_pointer_gestures_replay() {
        let (desktop, summary) = run(
            r#"{"viewport":{"width":1280,"height":800},"events":[
                {"type":"Login","name":"ana"},
                {"type":"ToggleTheme"},
                {"type":"Launch","index":0},
                {"type":"PointerDown","x":300,"y":110},
                {"type":"PointerMove","x":320,"y":130},
                {"type":"PointerUp","x":320,"y":130},
                {"type":"PointerDown","x":918,"y":718},
                {"type":"PointerMove","x":818,"y":668},
                {"type":"PointerUp","x":818,"y":668}
            ]}"#,
        );

        let window = desktop.windows().get_window(summary.opened[0]).unwrap();
        assert_eq!(window.position, Point::new(120, 120));
        assert_eq!(window.size, Size::new(700, 550));
        assert!(desktop.input().is_idle());
        assert_eq!(desktop.theme(), Theme::Light);
        assert_eq!(desktop.workspace_rect().height, 752);
    }

    #[test]
    fn test_click_and_taskbar_events() {
        let (desktop, summary) = run(
            r#"{"events":[
                {"type":"Launch","index":0},
                {"type":"Launch","index":1},
                {"type":"TaskbarClick","window":2},
                {"type":"Click","x":855,"y":115},
                {"type":"Click","x":20,"y":1050}
            ]}"#,
        );

        let second = desktop.windows().get_window(summary.opened[1]).unwrap();
        assert!(second.minimized);
        // Second window is minimized, so the click lands on the first one's maximize button
        let first = desktop.windows().get_window(summary.opened[0]).unwrap();
        assert!(first.maximized);
        assert!(desktop.taskbar().is_start_menu_open());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Script::load("/nonexistent/deskwm-script.json").unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}
