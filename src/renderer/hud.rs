//! HUD text shared by all renderers

use super::FrameView;
use crate::consts::SCHEME_TOGGLE_KEY;
use crate::settings::{ControlScheme, KeyBindings};
use crate::sim::{SessionPhase, SessionState};

pub const RUNNING_LABEL: &str = "Game Running";
pub const LOST_TITLE: &str = "YOU LOST";

/// Elapsed session time as `mm:ss` (minutes are not wrapped)
pub fn format_elapsed(ms: f64) -> String {
    let seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Display form of a key identifier
pub fn key_label(key: &str) -> String {
    key.to_uppercase()
}

pub fn start_prompt(bindings: &KeyBindings) -> String {
    format!("PRESS \"{}\" TO START", key_label(&bindings.start))
}

pub fn drop_prompt(bindings: &KeyBindings) -> String {
    format!("PRESS \"{}\" TO DROP", key_label(&bindings.drop))
}

/// Countdown text, rounded up to whole seconds
pub fn countdown_text(bindings: &KeyBindings, remaining_ms: f32) -> String {
    let secs = (remaining_ms.max(0.0) / 1000.0).ceil() as u64;
    format!(
        "PRESS \"{}\" TO ADD A BALL: {}s",
        key_label(&bindings.add_ball),
        secs
    )
}

/// One line per control, merging actions that share a key
pub fn legend(bindings: &KeyBindings, spawn_enabled: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if bindings.catch_a == bindings.catch_b {
        lines.push(format!("{}: catch", key_label(&bindings.catch_a)));
    } else {
        lines.push(format!("{}: catch left", key_label(&bindings.catch_a)));
        lines.push(format!("{}: catch right", key_label(&bindings.catch_b)));
    }

    if bindings.start == bindings.drop {
        lines.push(format!("{}: start / drop", key_label(&bindings.start)));
    } else {
        lines.push(format!("{}: start", key_label(&bindings.start)));
        lines.push(format!("{}: drop", key_label(&bindings.drop)));
    }

    if spawn_enabled {
        lines.push(format!("{}: add ball", key_label(&bindings.add_ball)));
    }
    lines
}

/// Start-screen hint for cycling the control scheme
pub fn scheme_hint(scheme: ControlScheme) -> String {
    format!(
        "{}: switch controls ({})",
        key_label(SCHEME_TOGGLE_KEY),
        scheme.as_str()
    )
}

pub fn ball_count_text(session: &SessionState) -> String {
    format!("Balls: {}", session.ball_count())
}

/// Final stats shown on the lost screen
pub fn lost_summary(session: &SessionState) -> Vec<String> {
    vec![
        LOST_TITLE.to_string(),
        format!("Time: {}", format_elapsed(session.elapsed_ms)),
        ball_count_text(session),
    ]
}

/// Compact one-line summary of the frame, for text output
pub fn status_line(view: &FrameView<'_>) -> String {
    let session = view.session;
    let bindings = &view.settings.bindings;

    match session.phase() {
        SessionPhase::Idle => format!(
            "{} | {}",
            start_prompt(bindings),
            scheme_hint(view.settings.scheme)
        ),
        SessionPhase::Lost => lost_summary(session).join(" | "),
        SessionPhase::Running => {
            let mut parts = vec![
                format_elapsed(session.elapsed_ms),
                ball_count_text(session),
            ];
            if session.spawn.countdown_active {
                parts.push(countdown_text(bindings, session.spawn.countdown_remaining));
            }
            if session.any_caught() {
                parts.push(drop_prompt(bindings));
            }
            parts.join(" | ")
        }
    }
}
