use keycloud_core::core::notify::{Notification, NotificationLevel, Notifier};

/// Prints store notifications to stderr so stdout stays clean for `--format json`.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn render(notification: &Notification) -> String {
        match notification.level {
            NotificationLevel::Info => format!("✅ {}", notification.message),
            NotificationLevel::Error => format!("❌ {}", notification.message),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        log::debug!(
            "Notification shown for {}ms",
            notification.duration.as_millis()
        );
        eprintln!("{}", Self::render(&notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_levels() {
        assert_eq!(TerminalNotifier::render(&Notification::saved()), "✅ Saved");
        assert_eq!(
            TerminalNotifier::render(&Notification::error("500", Duration::from_secs(2))),
            "❌ 500"
        );
    }
}
