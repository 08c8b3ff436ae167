//! Configuration management for deskwm
//!
//! This module handles loading, parsing, and validating configuration
//! from TOML files. It combines settings for window defaults, chrome
//! geometry, the workspace viewport, the taskbar and the desktop session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::desktop::Theme;
use crate::window::WindowKind;

/// Main configuration struct containing all deskwm settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DeskConfig {
    /// Window defaults and size limits
    #[serde(default)]
    pub window: WindowConfig,

    /// Window chrome geometry (title bar, buttons, resize zones)
    #[serde(default)]
    pub decoration: DecorationConfig,

    /// Workspace viewport
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Taskbar strip layout
    #[serde(default)]
    pub taskbar: TaskbarConfig,

    /// Desktop session settings (theme, launchers)
    #[serde(default)]
    pub desktop: DesktopConfig,

    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Window management configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Left edge of a freshly opened window
    pub default_x: i32,

    /// Top edge of a freshly opened window
    pub default_y: i32,

    /// Width of a freshly opened window
    pub default_width: i32,

    /// Height of a freshly opened window
    pub default_height: i32,

    /// Minimum width any resize may produce
    pub min_width: i32,

    /// Minimum height any resize may produce
    pub min_height: i32,

    /// Keep the right/bottom edge fixed when a left/top resize hits the
    /// minimum size. When false, the origin follows the raw pointer delta.
    pub pin_opposite_edge: bool,
}

/// Chrome geometry used for hit testing and frame layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecorationConfig {
    /// Title bar height (pixels)
    pub titlebar_height: i32,

    /// Control button edge length (pixels)
    pub button_size: i32,

    /// Gap between control buttons (pixels)
    pub button_gap: i32,

    /// Padding between the last button and the right edge (pixels)
    pub button_padding: i32,

    /// Square corner resize zone edge length (pixels)
    pub corner_size: i32,

    /// Thickness of the edge resize zones (pixels)
    pub edge_thickness: i32,
}

/// Workspace viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Viewport width (pixels)
    pub viewport_width: i32,

    /// Viewport height including the taskbar strip (pixels)
    pub viewport_height: i32,
}

/// Taskbar configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskbarConfig {
    /// Height of the strip at the bottom of the viewport
    pub height: i32,

    /// Width of the start button at the left end of the strip
    pub start_button_width: i32,

    /// Width of each window entry
    pub entry_width: i32,

    /// Gap between entries
    pub entry_gap: i32,
}

/// A desktop icon that opens a window when activated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LauncherConfig {
    /// Icon label, also used as the window title
    pub title: String,

    /// Content hosted by the launched window
    pub kind: WindowKind,
}

/// Desktop session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesktopConfig {
    /// Theme applied at startup
    pub theme: Theme,

    /// Desktop icons in display order
    pub launchers: Vec<LauncherConfig>,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable debug logging
    pub debug: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_x: 100,
            default_y: 100,
            default_width: 800,
            default_height: 600,
            min_width: 300,
            min_height: 200,
            pin_opposite_edge: true,
        }
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            titlebar_height: 32,
            button_size: 16,
            button_gap: 4,
            button_padding: 12,
            corner_size: 8,
            edge_thickness: 4,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            height: 48,
            start_button_width: 72,
            entry_width: 160,
            entry_gap: 8,
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            launchers: vec![
                LauncherConfig {
                    title: "Explorador de archivos".to_string(),
                    kind: WindowKind::FileExplorer,
                },
                LauncherConfig {
                    title: "Aplicación".to_string(),
                    kind: WindowKind::App,
                },
            ],
        }
    }
}

impl DeskConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Path::new(&home).join(path.strip_prefix("~").unwrap_or(path))
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: DeskConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let window = &self.window;
        if window.min_width <= 0 || window.min_height <= 0 {
            anyhow::bail!(
                "Invalid minimum window size {}x{}: both dimensions must be positive",
                window.min_width,
                window.min_height
            );
        }
        if window.default_width < window.min_width || window.default_height < window.min_height {
            anyhow::bail!(
                "Invalid default window size {}x{}: below minimum {}x{}",
                window.default_width,
                window.default_height,
                window.min_width,
                window.min_height
            );
        }
        if window.default_x < 0 || window.default_y < 0 {
            anyhow::bail!("Invalid default window position: coordinates must be non-negative");
        }

        let decoration = &self.decoration;
        if decoration.titlebar_height <= 0 || decoration.button_size <= 0 {
            anyhow::bail!("Invalid decoration: title bar and button sizes must be positive");
        }
        if decoration.edge_thickness <= 0 || decoration.corner_size < decoration.edge_thickness {
            anyhow::bail!(
                "Invalid resize zones: corner_size ({}) must be at least edge_thickness ({}) > 0",
                decoration.corner_size,
                decoration.edge_thickness
            );
        }

        if self.workspace.viewport_width <= 0 {
            anyhow::bail!("Invalid viewport_width: must be positive");
        }
        if self.taskbar.height < 0 || self.workspace.viewport_height <= self.taskbar.height {
            anyhow::bail!(
                "Invalid viewport_height {}: must exceed taskbar height {}",
                self.workspace.viewport_height,
                self.taskbar.height
            );
        }
        if self.taskbar.entry_width <= 0 {
            anyhow::bail!("Invalid taskbar entry_width: must be positive");
        }

        if let Some(launcher) = self.desktop.launchers.iter().find(|l| l.title.trim().is_empty()) {
            anyhow::bail!("Invalid launcher for {:?}: title must not be empty", launcher.kind);
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Merge a partial configuration into this one
    /// Non-default sections from the partial config will override this config
    pub fn merge_partial(mut self, partial: DeskConfig) -> Self {
        let default_config = DeskConfig::default();

        if partial.window != default_config.window {
            self.window = partial.window;
        }
        if partial.decoration != default_config.decoration {
            self.decoration = partial.decoration;
        }
        if partial.workspace != default_config.workspace {
            self.workspace = partial.workspace;
        }
        if partial.taskbar != default_config.taskbar {
            self.taskbar = partial.taskbar;
        }
        if partial.desktop != default_config.desktop {
            self.desktop = partial.desktop;
        }
        if partial.general != default_config.general {
            self.general = partial.general;
        }

        self
    }
}


#[cfg(test)]
mod property_tests;
