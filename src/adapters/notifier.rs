use crate::domain::model::{Notification, NotificationKind};
use crate::domain::ports::Notifier;

/// 非阻塞的提示訊息：寫日誌並印到 stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("{} {}", notification.title, notification.description);
                eprintln!("✅ {}", notification.title);
                eprintln!("   {}", notification.description);
            }
            NotificationKind::Failure => {
                tracing::warn!("{} {}", notification.title, notification.description);
                eprintln!("❌ {}", notification.title);
                eprintln!("💡 {}", notification.description);
            }
        }
    }
}
