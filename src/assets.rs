//! Glyphs and spinner animations for dialog chrome.

use std::time::Duration;

/// Look up the glyph for a named status icon.
pub fn icon_glyph(name: &str) -> Option<&'static str> {
    match name {
        "ok" | "success" => Some("✓"),
        "error" | "danger" => Some("✗"),
        "warning" => Some("⚠"),
        "info" => Some("ℹ"),
        "question" => Some("?"),
        "close" => Some("×"),
        _ => None,
    }
}

/// A looping spinner animation: frames plus the delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spinner {
    pub frames: &'static [&'static str],
    pub interval: Duration,
}

impl Spinner {
    /// The frame shown `elapsed` after the spinner started.
    pub fn frame_at(&self, elapsed: Duration) -> &'static str {
        let step = (elapsed.as_millis() / self.interval.as_millis()) as usize;
        self.frames[step % self.frames.len()]
    }
}

const BORDER: Spinner = Spinner {
    frames: &["|", "/", "-", "\\"],
    interval: Duration::from_millis(120),
};

const DOTS: Spinner = Spinner {
    frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    interval: Duration::from_millis(80),
};

const GROW: Spinner = Spinner {
    frames: &["▁", "▃", "▅", "▇", "▅", "▃"],
    interval: Duration::from_millis(120),
};

const BOUNCE: Spinner = Spinner {
    frames: &["⠁", "⠂", "⠄", "⠂"],
    interval: Duration::from_millis(120),
};

const WAVE: Spinner = Spinner {
    frames: &["▖", "▘", "▝", "▗"],
    interval: Duration::from_millis(140),
};

/// Look up a spinner animation by name. Unknown names fall back to the
/// border spinner.
pub fn spinner(name: &str) -> Spinner {
    match name {
        "dots" => DOTS,
        "grow" => GROW,
        "bounce" => BOUNCE,
        "wave" => WAVE,
        _ => BORDER,
    }
}
