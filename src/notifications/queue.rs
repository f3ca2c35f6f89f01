//! Bounded, drop-on-overflow dispatch queue for post-purchase notifications.
//! A panicking sink must never take down the drain loop, so each dispatch
//! is wrapped in `catch_unwind` via `AssertUnwindSafe`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crossbeam_queue::ArrayQueue;
use futures::FutureExt;
use tokio::sync::Notify;

use super::email::{EmailSink, ReceiptOutcome};
use super::sheets::SpreadsheetSink;

const QUEUE_CAPACITY: usize = 1024;

pub enum Notification {
    OrderConfirmation {
        email: String,
        order_number: String,
    },
    SymbicodeReceipt {
        email: String,
        phone: String,
        outcome: ReceiptOutcome,
        symbicode: Option<String>,
    },
    SheetAppend {
        order_number: String,
        phone: String,
        total_amount: i64,
    },
}

pub struct NotificationQueue {
    queue: ArrayQueue<Notification>,
    notify: Notify,
}

impl NotificationQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            queue: ArrayQueue::new(QUEUE_CAPACITY),
            notify: Notify::new(),
        })
    }

    pub fn enqueue(&self, notification: Notification) {
        if self.queue.push(notification).is_err() {
            tracing::warn!("notification queue full, dropping notification");
        } else {
            self.notify.notify_one();
        }
    }

    /// Spawns the background drain loop. Returns immediately; the task runs
    /// until the process exits.
    pub fn spawn_drain_loop(
        self: Arc<Self>,
        email: Arc<dyn EmailSink>,
        sheets: Arc<dyn SpreadsheetSink>,
    ) {
        tokio::spawn(async move {
            loop {
                while let Some(notification) = self.queue.pop() {
                    let email = email.clone();
                    let sheets = sheets.clone();
                    let dispatch = AssertUnwindSafe(dispatch(notification, email, sheets)).catch_unwind();
                    if let Err(panic) = dispatch.await {
                        tracing::error!(?panic, "notification dispatch panicked");
                    }
                }
                self.notify.notified().await;
            }
        });
    }
}

async fn dispatch(
    notification: Notification,
    email: Arc<dyn EmailSink>,
    sheets: Arc<dyn SpreadsheetSink>,
) {
    match notification {
        Notification::OrderConfirmation { email: to, order_number } => {
            email.send_order_confirmation(&to, &order_number).await;
        }
        Notification::SymbicodeReceipt { email: to, phone, outcome, symbicode } => {
            email
                .send_symbicode_receipt(&to, &phone, outcome, symbicode.as_deref())
                .await;
        }
        Notification::SheetAppend { order_number, phone, total_amount } => {
            sheets.append_order(&order_number, &phone, total_amount).await;
        }
    }
}
