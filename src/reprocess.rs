//! Background reprocessing queue.
//!
//! A single detached worker thread drains a LIFO stack of nodes and calls
//! each node's [`NodeBehavior::on_reprocess_requested`] hook. Pushing a node
//! that is already waiting is a no-op, so a node marked dirty many times
//! before the worker gets to it is reprocessed once.
//!
//! ## Threading
//!
//! The stack is the only state shared with the worker. Observer callbacks
//! run while the stack lock is held so depth reports arrive in order; they
//! must not push back into the queue. Pop-side events are raised on the
//! worker thread, so observers that touch UI state should forward them
//! (see [`crate::FlowCanvas::process_queue_events`]).

use crate::error::FlowResult;
use crate::graph::{NodeBehavior, NodeId};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, Thread};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ReprocessOutcome {
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// Number of nodes still waiting, after a push or a pop
    DepthChanged(usize),
    /// A node's hook returned (or panicked)
    Reprocessed {
        node: NodeId,
        outcome: ReprocessOutcome,
    },
}

pub type QueueObserver = Arc<dyn Fn(QueueEvent) + Send + Sync>;

struct PendingNode {
    node: NodeId,
    behavior: Arc<dyn NodeBehavior>,
}

struct Shared {
    stack: Mutex<Vec<PendingNode>>,
    shutdown: AtomicBool,
}

pub struct ReprocessQueue {
    shared: Arc<Shared>,
    observer: QueueObserver,
    worker: Thread,
}

impl ReprocessQueue {
    /// Start the worker. It parks for `idle_poll` whenever the stack is empty.
    pub fn spawn(
        idle_poll: Duration,
        observer: impl Fn(QueueEvent) + Send + Sync + 'static,
    ) -> FlowResult<Self> {
        let shared = Arc::new(Shared {
            stack: Mutex::new(Vec::new()),
            shutdown: AtomicBool::new(false),
        });
        let observer: QueueObserver = Arc::new(observer);

        let handle = thread::Builder::new()
            .name("flowgraph-reprocess".to_string())
            .spawn({
                let shared = Arc::clone(&shared);
                let observer = Arc::clone(&observer);
                move || run_worker(&shared, &observer, idle_poll)
            })?;

        // Dropping the JoinHandle detaches the worker.
        let worker = handle.thread().clone();
        Ok(Self {
            shared,
            observer,
            worker,
        })
    }

    /// Queue `node` unless it is already waiting. Returns whether it was queued.
    pub fn push(&self, node: NodeId, behavior: Arc<dyn NodeBehavior>) -> bool {
        {
            let mut stack = self.shared.stack.lock();
            if stack.iter().any(|pending| pending.node == node) {
                tracing::trace!(%node, "Already queued for reprocessing");
                return false;
            }
            stack.push(PendingNode { node, behavior });
            (self.observer)(QueueEvent::DepthChanged(stack.len()));
        }
        self.worker.unpark();
        true
    }

    pub fn depth(&self) -> usize {
        self.shared.stack.lock().len()
    }
}

impl Drop for ReprocessQueue {
    fn drop(&mut self) {
        // Pending work is abandoned; the worker exits on its next wake-up.
        self.shared.shutdown.store(true, Ordering::Release);
        self.worker.unpark();
    }
}

fn run_worker(shared: &Shared, observer: &QueueObserver, idle_poll: Duration) {
    tracing::debug!("Reprocess worker started");
    while !shared.shutdown.load(Ordering::Acquire) {
        let next = {
            let mut stack = shared.stack.lock();
            let next = stack.pop();
            if next.is_some() {
                observer(QueueEvent::DepthChanged(stack.len()));
            }
            next
        };

        match next {
            Some(pending) => {
                let outcome = reprocess(&pending);
                observer(QueueEvent::Reprocessed {
                    node: pending.node,
                    outcome,
                });
                thread::yield_now();
            }
            None => thread::park_timeout(idle_poll),
        }
    }
    tracing::debug!("Reprocess worker stopped");
}

/// Run one hook. Errors and panics are reported, never propagated.
fn reprocess(pending: &PendingNode) -> ReprocessOutcome {
    let node = pending.node;
    match catch_unwind(AssertUnwindSafe(|| pending.behavior.on_reprocess_requested())) {
        Ok(Ok(())) => {
            tracing::trace!(%node, "Reprocessed");
            ReprocessOutcome::Completed
        }
        Ok(Err(e)) => {
            tracing::warn!(%node, error = %format!("{e:#}"), "Reprocess failed");
            ReprocessOutcome::Failed(format!("{e:#}"))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%node, panic = %message, "Reprocess hook panicked");
            ReprocessOutcome::Failed(message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
