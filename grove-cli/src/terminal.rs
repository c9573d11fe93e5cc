use grove_core::{DisplayTarget, DisplayTargets, TargetId};
use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

/// Prints every write as `label: value` to stdout.
///
/// Repeated identical values are printed only once, since the clock rewrites
/// the same minute sixty times.
#[derive(Debug)]
pub struct TerminalTarget {
    label: &'static str,
    last: Mutex<Option<String>>,
}

impl TerminalTarget {
    pub fn new(label: &'static str) -> Arc<Self> {
        Arc::new(Self { label, last: Mutex::new(None) })
    }

    /// Remember `value` and report whether it differs from the previous write.
    fn changed(&self, value: &str) -> bool {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if last.as_deref() == Some(value) {
            return false;
        }
        *last = Some(value.to_string());
        true
    }

    fn print(&self, value: &str) {
        if !self.changed(value) {
            return;
        }

        let mut out = io::stdout().lock();
        // A closed stdout only loses display output.
        let _ = writeln!(out, "{:>13}: {value}", self.label);
    }
}

impl DisplayTarget for TerminalTarget {
    fn set_text(&self, text: &str) {
        self.print(text);
    }

    fn set_image_source(&self, source: &str) {
        self.print(source);
    }
}

/// One terminal target per widget.
pub fn terminal_targets() -> DisplayTargets {
    TargetId::all().iter().fold(DisplayTargets::new(), |targets, id| {
        targets.with(*id, TerminalTarget::new(id.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_values_are_reported_once() {
        let target = TerminalTarget::new("time");

        assert!(target.changed("9:05 pm"));
        assert!(!target.changed("9:05 pm"));
        assert!(target.changed("9:06 pm"));
        assert!(target.changed("9:05 pm"));
    }

    #[test]
    fn text_and_image_writes_share_the_last_value() {
        let target = TerminalTarget::new("weather-image");

        target.set_text("assets/Sun.png");
        assert!(!target.changed("assets/Sun.png"));
        target.set_image_source("assets/Rain.png");
        assert!(!target.changed("assets/Rain.png"));
    }

    #[test]
    fn every_widget_gets_a_terminal_target() {
        let targets = terminal_targets();

        for id in TargetId::all() {
            assert!(targets.contains(*id), "{id}");
        }
    }
}
