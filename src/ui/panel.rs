// src/ui/panel.rs
//! Heads-up display panels
//!
//! Crosshair, the "click to play" prompt, the collection notification and the
//! inventory overlay. Every panel is non-interactive so it never steals input
//! from the first-person controls.

use imgui::Condition;

use super::images::UiImages;
use crate::interaction::{InventoryLine, Session};

const PROMPT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const NOTIFICATION_COLOR: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
const CROSSHAIR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
const THUMBNAIL_WIDTH: f32 = 96.0;

/// Draws every HUD element that applies to the session's current state
pub fn hud(ui: &imgui::Ui, session: &Session, images: &UiImages) {
    let display_size = ui.io().display_size;
    // Guard against a minimised window
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    if session.is_locked() {
        crosshair(ui);
    } else {
        play_prompt(ui);
    }

    if let Some(text) = session.notification() {
        notification_banner(ui, text);
    }

    if session.inventory_visible() {
        inventory_panel(ui, &session.inventory_lines(), images);
    }
}

/// Small cross at the centre of the screen, where the highlight probe points
pub fn crosshair(ui: &imgui::Ui) {
    let [width, height] = ui.io().display_size;
    let center = [width * 0.5, height * 0.5];
    let arm = 8.0;

    let draw_list = ui.get_foreground_draw_list();
    draw_list
        .add_line(
            [center[0] - arm, center[1]],
            [center[0] + arm, center[1]],
            CROSSHAIR_COLOR,
        )
        .thickness(2.0)
        .build();
    draw_list
        .add_line(
            [center[0], center[1] - arm],
            [center[0], center[1] + arm],
            CROSSHAIR_COLOR,
        )
        .thickness(2.0)
        .build();
}

/// Centered instructions shown while the pointer is free
pub fn play_prompt(ui: &imgui::Ui) {
    let [width, height] = ui.io().display_size;

    ui.window("Play")
        .position([width * 0.5, height * 0.5], Condition::Always)
        .position_pivot([0.5, 0.5])
        .always_auto_resize(true)
        .no_decoration()
        .no_inputs()
        .bg_alpha(0.6)
        .build(|| {
            ui.text_colored(PROMPT_COLOR, "Click to play");
            ui.separator();
            ui.text("Move: W A S D / arrow keys");
            ui.text("Look: mouse");
            ui.text("Collect: click the highlighted object");
            ui.text("Inventory: I");
            ui.text("Release mouse: Escape");
        });
}

pub fn notification_banner(ui: &imgui::Ui, text: &str) {
    let [width, _] = ui.io().display_size;

    ui.window("Notification")
        .position([width * 0.5, 40.0], Condition::Always)
        .position_pivot([0.5, 0.0])
        .always_auto_resize(true)
        .no_decoration()
        .no_inputs()
        .bg_alpha(0.5)
        .build(|| {
            ui.text_colored(NOTIFICATION_COLOR, text);
        });
}

/// Collected items in collection order, each with its picture and description
pub fn inventory_panel(ui: &imgui::Ui, lines: &[InventoryLine], images: &UiImages) {
    let [_, height] = ui.io().display_size;
    let panel_height = (height * 0.6).max(200.0);

    ui.window("Inventory")
        .size([360.0, panel_height], Condition::Always)
        .position([20.0, 20.0], Condition::Always)
        .no_inputs()
        .collapsible(false)
        .resizable(false)
        .bg_alpha(0.75)
        .build(|| {
            if lines.is_empty() {
                ui.text_disabled("Nothing collected yet.");
                return;
            }

            for line in lines {
                // Pictures that failed to load were logged at start-up
                let picture = line.image.as_deref().and_then(|path| images.get(path));
                if let Some(picture) = picture {
                    imgui::Image::new(picture.texture_id, picture.fit_width(THUMBNAIL_WIDTH))
                        .build(ui);
                    ui.same_line();
                }
                ui.group(|| {
                    ui.text(&line.name);
                    ui.text_wrapped(&line.description);
                });
                ui.separator();
            }
        });
}
