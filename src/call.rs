// Fire-and-forget daemon calls with fixed outcome messages.
//
// A dialog submits, the call is dispatched, the dialog closes. The
// outcome comes back later as a notification built from the message
// pair of the call kind; the daemon's own error text only goes to the
// log.

use std::future::Future;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::Event;
use crate::notification::{Notification, NotificationLevel};

/// Every kind of daemon call a dialog or key action can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Connect,
    ConnectHidden,
    Disconnect,
    Forget,
    ApStart,
    ApStop,
}

/// Human-readable outcome texts for one call kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

impl CallKind {
    pub const fn messages(self) -> CallMessages {
        match self {
            CallKind::Connect => CallMessages {
                success: "Connected to network",
                failure: "Failed to connect to network",
            },
            CallKind::ConnectHidden => CallMessages {
                success: "Found hidden network",
                failure: "Failed to connect to hidden network",
            },
            CallKind::Disconnect => CallMessages {
                success: "Disconnected",
                failure: "Failed to disconnect",
            },
            CallKind::Forget => CallMessages {
                success: "Network removed",
                failure: "Failed to remove network",
            },
            CallKind::ApStart => CallMessages {
                success: "Access point started",
                failure: "Failed to start access point",
            },
            CallKind::ApStop => CallMessages {
                success: "Access point stopped",
                failure: "Failed to stop access point",
            },
        }
    }
}

/// Dispatch one call on the runtime and report its outcome as a
/// notification when it completes. The caller does not wait.
pub fn dispatch<F>(kind: CallKind, sender: UnboundedSender<Event>, call: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        let messages = kind.messages();
        match call.await {
            Ok(()) => {
                let _ = Notification::send(
                    messages.success.to_string(),
                    NotificationLevel::Info,
                    &sender,
                );
            }
            Err(e) => {
                log::warn!("{:?} failed: {e:#}", kind);
                let _ = Notification::send(
                    messages.failure.to_string(),
                    NotificationLevel::Error,
                    &sender,
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_connect_messages_match_configured_literals() {
        let messages = CallKind::ConnectHidden.messages();
        assert_eq!(messages.success, "Found hidden network");
        assert_eq!(messages.failure, "Failed to connect to hidden network");
    }

    #[test]
    fn message_pairs_are_constant_across_invocations() {
        for kind in [
            CallKind::Connect,
            CallKind::ConnectHidden,
            CallKind::Disconnect,
            CallKind::Forget,
            CallKind::ApStart,
            CallKind::ApStop,
        ] {
            assert_eq!(kind.messages(), kind.messages());
        }
    }

    #[test]
    fn message_pairs_are_distinct_per_kind() {
        let kinds = [
            CallKind::Connect,
            CallKind::ConnectHidden,
            CallKind::Disconnect,
            CallKind::Forget,
            CallKind::ApStart,
            CallKind::ApStop,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(a.messages().success, b.messages().success);
                assert_ne!(a.messages().failure, b.messages().failure);
            }
        }
    }

    #[tokio::test]
    async fn dispatch_reports_static_failure_text() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();

        dispatch(CallKind::ConnectHidden, sender, async {
            Err(anyhow::anyhow!("net.connman.iwd.Failed: operation failed"))
        });

        match receiver.recv().await {
            Some(Event::Notification(n)) => {
                assert_eq!(n.message, "Failed to connect to hidden network");
                assert_eq!(n.level, NotificationLevel::Error);
            }
            other => panic!("expected a notification, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_reports_static_success_text() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();

        dispatch(CallKind::ConnectHidden, sender, async { Ok(()) });

        match receiver.recv().await {
            Some(Event::Notification(n)) => {
                assert_eq!(n.message, "Found hidden network");
                assert_eq!(n.level, NotificationLevel::Info);
            }
            other => panic!("expected a notification, got {other:?}"),
        }
    }
}
