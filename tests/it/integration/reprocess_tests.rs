//! Reprocessing through the canvas: dedupe, depth reports, dirty marking.

use crate::helpers::{wait_for, RecordingSurface, TestCanvasBuilder};
use flowgraph::{FlowError, NodeBehavior, NodeBuilder, NodeId};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

impl Counting {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NodeBehavior for Counting {
    fn on_reprocess_requested(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Keeps the worker busy until the test lets it go.
struct Gate {
    started: Barrier,
    release: Barrier,
}

impl Gate {
    fn new() -> Self {
        Self {
            started: Barrier::new(2),
            release: Barrier::new(2),
        }
    }
}

impl NodeBehavior for Gate {
    fn on_reprocess_requested(&self) -> anyhow::Result<()> {
        self.started.wait();
        self.release.wait();
        Ok(())
    }
}

struct Failing;

impl NodeBehavior for Failing {
    fn on_reprocess_requested(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("upstream image missing"))
    }
}

fn record_depths(canvas: &mut flowgraph::FlowCanvas) -> Rc<RefCell<Vec<usize>>> {
    let depths = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&depths);
    canvas.on_queue_depth_changed(move |depth| sink.borrow_mut().push(depth));
    depths
}

#[test]
fn test_double_push_reprocesses_once() {
    let gate = Arc::new(Gate::new());
    let counting = Arc::new(Counting::default());
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(NodeBuilder::new("gate", gate.clone()))
        .with_node(NodeBuilder::new("x", counting.clone()))
        .build();
    let depths = record_depths(&mut canvas);

    assert!(canvas.push_for_reprocessing(ids[0]).unwrap());
    gate.started.wait();

    assert!(canvas.push_for_reprocessing(ids[1]).unwrap());
    assert!(!canvas.push_for_reprocessing(ids[1]).unwrap());
    assert_eq!(canvas.queue_depth(), 1);
    gate.release.wait();

    let done = wait_for(
        &mut canvas,
        |_| counting.calls() == 1 && depths.borrow().last() == Some(&0) && depths.borrow().len() == 4,
        TIMEOUT,
    );
    assert!(done, "worker did not drain: {:?}", depths.borrow());
    assert_eq!(counting.calls(), 1);
    assert_eq!(*depths.borrow(), vec![1, 0, 1, 0]);
    assert!(!depths.borrow().contains(&2));
}

#[test]
fn test_push_absent_node_fails() {
    let (canvas, _) = TestCanvasBuilder::new().build();
    let err = canvas.push_for_reprocessing(NodeId(42)).unwrap_err();
    assert!(matches!(err, FlowError::NodeNotFound(NodeId(42))));
    assert_eq!(err.to_string(), "node #42 not found");
}

#[test]
fn test_finished_node_is_marked_dirty_and_invalidated() {
    let counting = Arc::new(Counting::default());
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(NodeBuilder::new("x", counting.clone()).at(20.0, 20.0))
        .build();

    canvas.push_for_reprocessing(ids[0]).unwrap();
    assert!(wait_for(
        &mut canvas,
        |c| c.graph().node(ids[0]).unwrap().dirty,
        TIMEOUT
    ));

    let bounds = canvas.graph().node(ids[0]).unwrap().invalidation_bounds();
    assert!(canvas.pending_invalidations().covers(&bounds));

    canvas.paint(&mut RecordingSurface::default());
    assert!(!canvas.graph().node(ids[0]).unwrap().dirty);
}

#[test]
fn test_failing_node_does_not_stop_the_queue() {
    let counting = Arc::new(Counting::default());
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(NodeBuilder::new("good", counting.clone()))
        .with_node(NodeBuilder::new("bad", Arc::new(Failing)))
        .build();

    canvas.push_for_reprocessing(ids[0]).unwrap();
    canvas.push_for_reprocessing(ids[1]).unwrap();
    assert!(wait_for(&mut canvas, |_| counting.calls() == 1, TIMEOUT));

    canvas.push_for_reprocessing(ids[0]).unwrap();
    assert!(wait_for(&mut canvas, |_| counting.calls() == 2, TIMEOUT));
}

#[test]
fn test_node_removed_while_queued_is_tolerated() {
    let gate = Arc::new(Gate::new());
    let counting = Arc::new(Counting::default());
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(NodeBuilder::new("gate", gate.clone()))
        .with_node(NodeBuilder::new("x", counting.clone()))
        .build();

    canvas.push_for_reprocessing(ids[0]).unwrap();
    gate.started.wait();
    canvas.push_for_reprocessing(ids[1]).unwrap();
    canvas.remove_node(ids[1]).unwrap();
    gate.release.wait();

    // The worker holds its own handle to the behaviour, so the hook still runs.
    assert!(wait_for(&mut canvas, |c| counting.calls() == 1 && c.queue_depth() == 0, TIMEOUT));
    assert!(canvas.graph().node(ids[1]).is_none());
}

#[test]
fn test_processing_disabled_nodes_are_still_reprocessed() {
    let counting = Arc::new(Counting::default());
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(NodeBuilder::new("frozen", counting.clone()).processing_disabled(true))
        .build();

    assert!(canvas.push_for_reprocessing(ids[0]).unwrap());
    assert!(wait_for(
        &mut canvas,
        |c| counting.calls() == 1 && c.graph().node(ids[0]).unwrap().dirty,
        TIMEOUT
    ));
}
