/// Reminder delivery boundary.
///
/// The core decides when a reminder fires; implementations decide how
/// it is surfaced. The two flags mirror the per-urgency sound settings.
pub trait Notifier {
    fn notify(&self, message: &str, play_sound: bool, is_urgent: bool);
}

/// Desktop notifications. Currently only implements macOS.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str, play_sound: bool, is_urgent: bool) {
        #[cfg(target_os = "macos")]
        {
            use std::process::Command;

            let sound = if !play_sound {
                ""
            } else if is_urgent {
                r#" sound name "Sosumi""#
            } else {
                r#" sound name "Glass""#
            };

            let script = format!(
                r#"display notification "{}" with title "Rupt"{}"#,
                message.replace('"', "\\\""),
                sound
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(not(target_os = "macos"))]
        {
            // No-op on other platforms
            let _ = (message, play_sound, is_urgent);
        }
    }
}
