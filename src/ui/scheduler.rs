//! Cancellable delayed callbacks for the presentation delay.
//!
//! The controller never sleeps. It asks a [`Scheduler`] to deliver a
//! [`Ticket`] back after a delay and reacts when the ticket arrives. Tickets
//! for work that was cancelled or superseded are ignored on arrival, so
//! cancelling is also safe when a ticket is already in flight.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// Handle to a scheduled callback.
#[derive(Debug)]
pub struct TaskHandle {
    ticket: Ticket,
    abort: Option<AbortHandle>,
}

impl TaskHandle {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn cancel(self) {
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }
}

pub trait Scheduler: Send {
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TaskHandle;
}

/// Sleeps on the tokio runtime and sends the ticket down a channel.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Ticket>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Ticket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    /// Must be called from within a tokio runtime.
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TaskHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the UI loop has exited
            let _ = tx.send(ticket);
        });
        TaskHandle { ticket, abort: Some(task.abort_handle()) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub ticket: Ticket,
}

/// Records scheduled tickets for the caller to deliver by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Vec<Scheduled>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything scheduled so far, oldest first, emptying the queue.
    pub fn drain(&self) -> Vec<Scheduled> {
        match self.queue.lock() {
            Ok(mut q) => std::mem::take(&mut *q),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TaskHandle {
        if let Ok(mut q) = self.queue.lock() {
            q.push(Scheduled { delay, ticket });
        }
        TaskHandle { ticket, abort: None }
    }
}
