pub mod personas;
pub mod run;

use colored::Colorize;

use giron_core::notify::{NotificationLevel, NotificationSink};

/// Notification sink that writes user-visible messages to stderr.
pub struct TermSink;

impl NotificationSink for TermSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info => eprintln!("{}", message.bright_blue()),
            NotificationLevel::Error => eprintln!("{}", message.bright_red()),
        }
    }
}
