//! Host launcher environment: dialogs, clipboard, URL opening, notifications
//!
//! The menu host is a collaborator, not part of the core; everything it does
//! for us sits behind a trait so the orchestrator can be tested with a
//! scripted fake.

use anyhow::Result;

#[cfg(target_os = "linux")]
const APP_NAME: &str = "Product Hunt";

/// Outcome of the two-choice token prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// The user says the token is on the clipboard
    Confirmed,
    /// The user backed out
    Cancelled,
}

/// Trait for host environment interactions
pub trait HostEnvironment: Send + Sync {
    /// Opens a URL in the default browser
    fn open_url(&self, url: &str) -> Result<()>;

    /// Shows a two-button dialog and reports the user's choice
    fn prompt_for_token(
        &self,
        title: &str,
        message: &str,
        ok_label: &str,
        cancel_label: &str,
    ) -> PromptChoice;

    /// Reads the current clipboard text, if any
    fn read_clipboard(&self) -> Option<String>;

    /// Sends a desktop notification. Failures are logged, never propagated
    fn notify(&self, title: &str, message: &str);
}

impl<E: HostEnvironment + ?Sized> HostEnvironment for std::sync::Arc<E> {
    fn open_url(&self, url: &str) -> Result<()> {
        self.as_ref().open_url(url)
    }

    fn prompt_for_token(
        &self,
        title: &str,
        message: &str,
        ok_label: &str,
        cancel_label: &str,
    ) -> PromptChoice {
        self.as_ref()
            .prompt_for_token(title, message, ok_label, cancel_label)
    }

    fn read_clipboard(&self) -> Option<String> {
        self.as_ref().read_clipboard()
    }

    fn notify(&self, title: &str, message: &str) {
        self.as_ref().notify(title, message);
    }
}

/// Desktop implementation backed by system tools
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopHost;

impl DesktopHost {
    /// Creates a new desktop host
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "linux")]
    fn show_dialog(title: &str, message: &str, ok_label: &str, cancel_label: &str) -> PromptChoice {
        let status = std::process::Command::new("zenity")
            .args([
                "--question",
                "--title",
                title,
                "--text",
                message,
                "--ok-label",
                ok_label,
                "--cancel-label",
                cancel_label,
            ])
            .status();

        match status {
            Ok(s) if s.success() => PromptChoice::Confirmed,
            Ok(_) => PromptChoice::Cancelled,
            Err(e) => {
                tracing::warn!("Failed to show dialog: {}", e);
                PromptChoice::Cancelled
            }
        }
    }

    #[cfg(target_os = "macos")]
    fn show_dialog(title: &str, message: &str, ok_label: &str, cancel_label: &str) -> PromptChoice {
        let script = format!(
            "display dialog \"{}\" with title \"{}\" buttons {{\"{}\", \"{}\"}} default button 2",
            message, title, cancel_label, ok_label
        );
        let output = std::process::Command::new("osascript")
            .args(["-e", &script])
            .output();

        match output {
            // osascript exits non-zero when the cancel button is picked
            Ok(out) if out.status.success() => PromptChoice::Confirmed,
            Ok(_) => PromptChoice::Cancelled,
            Err(e) => {
                tracing::warn!("Failed to show dialog: {}", e);
                PromptChoice::Cancelled
            }
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn show_dialog(
        title: &str,
        message: &str,
        _ok_label: &str,
        _cancel_label: &str,
    ) -> PromptChoice {
        tracing::warn!("No dialog backend on this platform: {} - {}", title, message);
        PromptChoice::Cancelled
    }

    #[cfg(target_os = "linux")]
    fn clipboard_text() -> Option<String> {
        // Wayland first, then X11
        let commands: [(&str, &[&str]); 2] = [
            ("wl-paste", &["--no-newline"]),
            ("xclip", &["-selection", "clipboard", "-o"]),
        ];

        for (program, args) in commands {
            if let Ok(output) = std::process::Command::new(program).args(args).output() {
                if output.status.success() {
                    return Some(String::from_utf8_lossy(&output.stdout).into_owned());
                }
            }
        }
        None
    }

    #[cfg(target_os = "macos")]
    fn clipboard_text() -> Option<String> {
        let output = std::process::Command::new("pbpaste").output().ok()?;
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            None
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn clipboard_text() -> Option<String> {
        None
    }

    #[cfg(target_os = "linux")]
    fn send_notification(title: &str, message: &str) -> Result<()> {
        use notify_rust::Notification;

        Notification::new()
            .summary(title)
            .body(message)
            .appname(APP_NAME)
            .timeout(5000)
            .show()?;

        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn send_notification(title: &str, message: &str) -> Result<()> {
        std::process::Command::new("osascript")
            .args([
                "-e",
                &format!(
                    "display notification \"{}\" with title \"{}\"",
                    message, title
                ),
            ])
            .output()?;

        Ok(())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn send_notification(title: &str, message: &str) -> Result<()> {
        tracing::info!("Notification: {} - {}", title, message);
        Ok(())
    }
}

impl HostEnvironment for DesktopHost {
    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }

    fn prompt_for_token(
        &self,
        title: &str,
        message: &str,
        ok_label: &str,
        cancel_label: &str,
    ) -> PromptChoice {
        Self::show_dialog(title, message, ok_label, cancel_label)
    }

    fn read_clipboard(&self) -> Option<String> {
        let text = Self::clipboard_text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn notify(&self, title: &str, message: &str) {
        if let Err(e) = Self::send_notification(title, message) {
            tracing::warn!("Failed to send notification: {}", e);
        }
    }
}
