//! Property-based tests for configuration module
//!
//! These tests use proptest to generate random configurations and verify
//! invariants, serialization round-trips, and validation boundaries.

use super::*;
use proptest::prelude::*;

// Strategy for generating valid window configurations
prop_compose! {
    fn valid_window_config()(
        min_width in 1i32..600,
        min_height in 1i32..400,
        extra_width in 0i32..1000,
        extra_height in 0i32..1000,
        default_x in 0i32..500,
        default_y in 0i32..500,
        pin_opposite_edge in any::<bool>(),
    ) -> WindowConfig {
        WindowConfig {
            default_x,
            default_y,
            default_width: min_width + extra_width,
            default_height: min_height + extra_height,
            min_width,
            min_height,
            pin_opposite_edge,
        }
    }
}

prop_compose! {
    fn valid_decoration_config()(
        titlebar_height in 16i32..64,
        button_size in 8i32..32,
        button_gap in 0i32..12,
        button_padding in 0i32..24,
        edge_thickness in 1i32..8,
        corner_extra in 0i32..8,
    ) -> DecorationConfig {
        DecorationConfig {
            titlebar_height,
            button_size,
            button_gap,
            button_padding,
            corner_size: edge_thickness + corner_extra,
            edge_thickness,
        }
    }
}

// Strategy for generating a viewport with a taskbar that fits inside it
prop_compose! {
    fn valid_workspace_and_taskbar()(
        viewport_width in 320i32..7680,
        taskbar_height in 0i32..96,
        workspace_height in 1i32..4320,
        start_button_width in 0i32..128,
        entry_width in 1i32..320,
        entry_gap in 0i32..16,
    ) -> (WorkspaceConfig, TaskbarConfig) {
        (
            WorkspaceConfig {
                viewport_width,
                viewport_height: workspace_height + taskbar_height,
            },
            TaskbarConfig {
                height: taskbar_height,
                start_button_width,
                entry_width,
                entry_gap,
            },
        )
    }
}

prop_compose! {
    fn valid_desktop_config()(
        light in any::<bool>(),
        launchers in prop::collection::vec(
            ("[A-Za-z][A-Za-z ]{0,15}", any::<bool>()),
            0..6,
        ),
    ) -> DesktopConfig {
        DesktopConfig {
            theme: if light { Theme::Light } else { Theme::Dark },
            launchers: launchers
                .into_iter()
                .map(|(title, explorer)| LauncherConfig {
                    title,
                    kind: if explorer { WindowKind::FileExplorer } else { WindowKind::App },
                })
                .collect(),
        }
    }
}

// Strategy for generating full valid configurations
prop_compose! {
    fn valid_desk_config()(
        window in valid_window_config(),
        decoration in valid_decoration_config(),
        layout in valid_workspace_and_taskbar(),
        desktop in valid_desktop_config(),
        debug in any::<bool>(),
    ) -> DeskConfig {
        let (workspace, taskbar) = layout;
        DeskConfig {
            window,
            decoration,
            workspace,
            taskbar,
            desktop,
            general: GeneralConfig { debug },
        }
    }
}

proptest! {
    /// Generated configurations pass validation
    #[test]
    fn test_generated_configs_validate(config in valid_desk_config()) {
        prop_assert!(config.validate().is_ok(), "rejected: {:?}", config);
    }

    /// TOML round-trip preserves every field
    #[test]
    fn test_config_toml_roundtrip(config in valid_desk_config()) {
        let toml_str = toml::to_string(&config)?;
        let parsed_config: DeskConfig = toml::from_str(&toml_str)?;
        prop_assert_eq!(config, parsed_config);
    }

    /// Merging replaces only sections that differ from the defaults
    #[test]
    fn test_partial_config_merge(
        base_config in valid_desk_config(),
        window_override in valid_window_config(),
    ) {
        let mut partial_config = DeskConfig::default();
        partial_config.window = window_override.clone();

        let base_desktop = base_config.desktop.clone();
        let base_window = base_config.window.clone();
        let merged = base_config.merge_partial(partial_config);

        if window_override == WindowConfig::default() {
            prop_assert_eq!(merged.window, base_window);
        } else {
            prop_assert_eq!(merged.window, window_override);
        }
        prop_assert_eq!(merged.desktop, base_desktop);
    }

    /// Minimum sizes must be positive
    #[test]
    fn test_non_positive_minimums_rejected(min_width in -500i32..=0) {
        let mut config = DeskConfig::default();
        config.window.min_width = min_width;
        prop_assert!(config.validate().is_err());
    }

    /// The taskbar must leave room for the workspace
    #[test]
    fn test_taskbar_must_fit_viewport(viewport_height in 0i32..200, taskbar_height in 0i32..200) {
        let mut config = DeskConfig::default();
        config.workspace.viewport_height = viewport_height;
        config.taskbar.height = taskbar_height;

        let result = config.validate();
        if viewport_height > taskbar_height {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
