//! Toast overlay drawn over the rest of the window.

use eframe::egui;
use tokio::runtime::Handle;

use crate::notification::{Notification, NotificationQueue};

use super::components;

/// Newest `max_visible` toasts, still oldest first.
pub fn visible(snapshot: &[Notification], max_visible: usize) -> &[Notification] {
    let skip = snapshot.len().saturating_sub(max_visible);
    &snapshot[skip..]
}

/// Draw live toasts in the bottom-right corner and dismiss closed ones.
pub fn show(ctx: &egui::Context, queue: &NotificationQueue, max_visible: usize) {
    let snapshot = queue.snapshot();
    if snapshot.is_empty() {
        return;
    }

    let mut closed = Vec::new();
    egui::Area::new(egui::Id::new("toast_overlay"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for notification in visible(&snapshot, max_visible) {
                if components::toast_card(ui, notification) {
                    closed.push(notification.id);
                }
                ui.add_space(6.0);
            }
        });

    for id in closed {
        tracing::debug!(%id, "Toast closed by user");
        queue.dismiss(id);
    }
}

/// Repaint the window whenever the queue changes, including timer expiry.
pub fn forward_repaints(rt: &Handle, queue: &NotificationQueue, ctx: egui::Context) {
    let mut rx = queue.subscribe();
    rt.spawn(async move {
        while rx.changed().await.is_ok() {
            ctx.request_repaint();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_visible_keeps_newest() {
        let queue = NotificationQueue::current().unwrap();
        for i in 0..7 {
            queue.notify_info(format!("toast {i}"), Some(Duration::from_secs(10)));
        }
        let snapshot = queue.snapshot();
        let shown: Vec<_> = visible(&snapshot, 3).iter().map(|n| n.message.as_str()).collect();
        assert_eq!(shown, ["toast 4", "toast 5", "toast 6"]);
        assert_eq!(visible(&snapshot, 10).len(), 7);
    }

    #[test]
    fn test_visible_empty() {
        assert!(visible(&[], 5).is_empty());
    }
}
