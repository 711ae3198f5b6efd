//! Connection gesture tests: arm on one anchor, complete on another.

use crate::helpers::{
    anchor_on_screen, click, click_connect, input_of, linked, output_of, sink, source,
    TestCanvasBuilder,
};
use flowgraph::{ConnectorSpec, FlowCanvas, NodeBuilder, NodeId, PointerEvent, Session, Vec2};

/// O and C are sources, A and B are sinks, all far enough apart that no
/// anchor lies inside another node.
fn fan_out_canvas() -> (FlowCanvas, NodeId, NodeId, NodeId, NodeId) {
    let (canvas, ids) = TestCanvasBuilder::new()
        .with_node(source("O", 0.0, 0.0))
        .with_node(sink("A", 300.0, 0.0))
        .with_node(sink("B", 300.0, 200.0))
        .with_node(source("C", 0.0, 400.0))
        .build();
    (canvas, ids[0], ids[1], ids[2], ids[3])
}

#[test]
fn test_click_on_anchor_arms_connector() {
    let (mut canvas, o, ..) = fan_out_canvas();
    let at = anchor_on_screen(&canvas, output_of(o));
    assert_eq!(at, Vec2::new(108.0, 28.0));

    click(&mut canvas, at);
    assert_eq!(canvas.session().armed_connector(), Some(output_of(o)));
}

#[test]
fn test_output_fans_out_then_input_rewires() {
    let (mut canvas, o, a, b, c) = fan_out_canvas();

    click_connect(&mut canvas, output_of(o), input_of(a));
    click_connect(&mut canvas, output_of(o), input_of(b));
    assert_eq!(linked(&canvas, output_of(o)), vec![input_of(a), input_of(b)]);

    click_connect(&mut canvas, input_of(a), output_of(c));
    assert_eq!(linked(&canvas, input_of(a)), vec![output_of(c)]);
    assert_eq!(linked(&canvas, output_of(o)), vec![input_of(b)]);
    assert_eq!(canvas.graph().upstreams(input_of(a)), vec![output_of(c)]);
    assert!(canvas.session().is_idle());
}

#[test]
fn test_repeated_connection_is_not_duplicated() {
    let (mut canvas, o, a, ..) = fan_out_canvas();
    click_connect(&mut canvas, output_of(o), input_of(a));
    click_connect(&mut canvas, output_of(o), input_of(a));
    assert_eq!(linked(&canvas, output_of(o)), vec![input_of(a)]);
}

#[test]
fn test_same_direction_leaves_links_unchanged() {
    let (mut canvas, o, a, b, c) = fan_out_canvas();
    click_connect(&mut canvas, output_of(o), input_of(a));

    click_connect(&mut canvas, input_of(a), input_of(b));
    assert_eq!(linked(&canvas, input_of(a)), Vec::new());
    assert_eq!(linked(&canvas, input_of(b)), Vec::new());

    click_connect(&mut canvas, output_of(o), output_of(c));
    assert_eq!(linked(&canvas, output_of(o)), vec![input_of(a)]);
    assert_eq!(linked(&canvas, output_of(c)), Vec::new());
    assert!(canvas.session().is_idle());
}

#[test]
fn test_kind_mismatch_aborts_and_disarms() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(source("O", 0.0, 0.0))
        .with_node(
            NodeBuilder::inert("Image sink")
                .at(300.0, 0.0)
                .with_input(ConnectorSpec::new("in", "image")),
        )
        .build();

    click_connect(&mut canvas, output_of(ids[0]), input_of(ids[1]));
    assert!(canvas.graph().links().is_empty());
    assert!(canvas.session().is_idle());
}

#[test]
fn test_miss_keeps_connector_armed() {
    let (mut canvas, o, ..) = fan_out_canvas();
    let at = anchor_on_screen(&canvas, output_of(o));
    click(&mut canvas, at);

    canvas.pointer_down(PointerEvent::primary(200.0, 300.0));
    canvas.pointer_move(Vec2::new(260.0, 320.0));
    canvas.pointer_up(Vec2::new(260.0, 320.0));
    assert_eq!(canvas.session().armed_connector(), Some(output_of(o)));
    // No pan starts while the connector is armed.
    assert_eq!(canvas.graph().node(o).unwrap().position, Vec2::ZERO);
}

#[test]
fn test_secondary_press_disarms_without_linking() {
    let (mut canvas, o, a, ..) = fan_out_canvas();
    let at = anchor_on_screen(&canvas, output_of(o));
    click(&mut canvas, at);

    let at = anchor_on_screen(&canvas, input_of(a));
    canvas.pointer_down(PointerEvent::secondary(at.x, at.y));
    canvas.pointer_up(at);

    assert!(canvas.session().is_idle());
    assert!(canvas.graph().links().is_empty());
}

#[test]
fn test_preview_line_sweep_is_invalidated() {
    let (mut canvas, o, ..) = fan_out_canvas();
    let anchor = anchor_on_screen(&canvas, output_of(o));
    click(&mut canvas, anchor);

    canvas.pointer_move(Vec2::new(200.0, 100.0));
    canvas.pointer_move(Vec2::new(250.0, 40.0));

    let invalidations = canvas.pending_invalidations();
    let padding = canvas.config().stroke_padding;
    for end in [Vec2::new(200.0, 100.0), Vec2::new(250.0, 40.0)] {
        let segment = flowgraph::Rect::from_corners(anchor, end).inflate(padding);
        assert!(invalidations.covers(&segment), "segment to {end} not invalidated");
    }
}

#[test]
fn test_connect_at_zoom() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_node(source("O", 0.0, 0.0))
        .with_node(sink("A", 300.0, 0.0))
        .build();

    assert_eq!(anchor_on_screen(&canvas, output_of(ids[0])), Vec2::new(216.0, 56.0));
    click_connect(&mut canvas, output_of(ids[0]), input_of(ids[1]));
    assert_eq!(linked(&canvas, output_of(ids[0])), vec![input_of(ids[1])]);
}

#[test]
fn test_removing_node_severs_links() {
    let (mut canvas, o, a, b, _) = fan_out_canvas();
    click_connect(&mut canvas, output_of(o), input_of(a));
    click_connect(&mut canvas, output_of(o), input_of(b));

    canvas.remove_node(a).unwrap();
    assert_eq!(linked(&canvas, output_of(o)), vec![input_of(b)]);
}

#[test]
fn test_removing_armed_node_cancels_gesture() {
    let (mut canvas, o, ..) = fan_out_canvas();
    let at = anchor_on_screen(&canvas, output_of(o));
    click(&mut canvas, at);

    canvas.remove_node(o).unwrap();
    assert_eq!(*canvas.session(), Session::Idle);
}
