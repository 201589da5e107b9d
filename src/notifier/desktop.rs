use notify_rust::Notification;

use crate::error::NotificationError;

pub const SUMMARY: &str = "Tomato Basket";

pub fn send_notification(message: &str) -> Result<(), NotificationError> {
    Notification::new()
        .summary(SUMMARY)
        .body(message)
        .show()
        .map_err(|e| NotificationError::Desktop(e.to_string()))?;
    Ok(())
}
