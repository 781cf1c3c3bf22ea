//! Subscriber notification on top-list changes
//!
//! Ranking only reports whether the top list changed. This module is the
//! calling side: it walks the active subscribers and hands one message per
//! subscriber to a [`Notifier`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const TOP_PRODUCTS_CHANGED_SUBJECT: &str = "Top 10 Products Changed";
pub const TOP_PRODUCTS_CHANGED_BODY: &str =
    "The top 10 products list has changed. Please visit the page to grab this opportunity.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    #[serde(default = "default_subscribed")]
    pub subscribed: bool,
}

fn default_subscribed() -> bool {
    true
}

impl Subscriber {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            subscribed: true,
        }
    }

    /// Load a JSON array of subscribers
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, NotifyError> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn top_products_changed() -> Self {
        Self {
            subject: TOP_PRODUCTS_CHANGED_SUBJECT.to_string(),
            body: TOP_PRODUCTS_CHANGED_BODY.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Delivers a notification to one recipient
pub trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that only writes the message to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: &str, notification: &Notification) -> Result<(), NotifyError> {
        info!(recipient, subject = %notification.subject, "notification sent");
        Ok(())
    }
}

/// Result of a fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FanOutReport {
    pub sent: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
}

/// Send `notification` to every active subscriber.
/// A failed delivery is logged and recorded; it does not stop the others.
pub fn notify_subscribers(
    notifier: &dyn Notifier,
    subscribers: &[Subscriber],
    notification: &Notification,
) -> FanOutReport {
    let mut report = FanOutReport::default();

    for subscriber in subscribers {
        if !subscriber.subscribed {
            report.skipped += 1;
            continue;
        }

        match notifier.notify(&subscriber.email, notification) {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!("{}", e);
                report.failed.push(subscriber.email.clone());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<String>>,
    }

    impl Notifier for Recording {
        fn notify(&self, recipient: &str, _notification: &Notification) -> Result<(), NotifyError> {
            if recipient.ends_with("@bounce.example") {
                return Err(NotifyError::Delivery {
                    recipient: recipient.to_string(),
                    reason: "mailbox full".to_string(),
                });
            }
            self.sent.lock().push(recipient.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_skips_unsubscribed() {
        let subscribers = vec![
            Subscriber::new("a@example.com"),
            Subscriber { email: "b@example.com".to_string(), subscribed: false },
            Subscriber::new("c@example.com"),
        ];
        let notifier = Recording::default();

        let report = notify_subscribers(&notifier, &subscribers, &Notification::top_products_changed());
        assert_eq!(report.sent, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(*notifier.sent.lock(), vec!["a@example.com", "c@example.com"]);
    }

    #[test]
    fn test_failures_do_not_stop_fan_out() {
        let subscribers = vec![
            Subscriber::new("x@bounce.example"),
            Subscriber::new("y@example.com"),
        ];

        let report = notify_subscribers(&Recording::default(), &subscribers, &Notification::top_products_changed());
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, vec!["x@bounce.example".to_string()]);
    }

    #[test]
    fn test_subscribed_defaults_to_true() {
        let subscribers: Vec<Subscriber> =
            serde_json::from_str(r#"[{"email": "a@example.com"}]"#).unwrap();
        assert!(subscribers[0].subscribed);
    }

    #[test]
    fn test_log_notifier() {
        let report = notify_subscribers(
            &LogNotifier,
            &[Subscriber::new("a@example.com")],
            &Notification::top_products_changed(),
        );
        assert_eq!(report.sent, 1);
    }
}
