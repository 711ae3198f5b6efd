//! Node drag tests: grab offsets, group drags and invalidation coverage.

use crate::helpers::{drag, plain, position_of, RecordingSurface, TestCanvasBuilder};
use flowgraph::{ConnectorSpec, Key, NodeBuilder, PointerEvent, Rect, Vec2};

#[test]
fn test_drag_keeps_grab_offset() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("n", 50.0, 50.0))
        .build();

    canvas.pointer_down(PointerEvent::primary(60.0, 60.0));
    assert!(canvas.session().is_dragging());
    canvas.pointer_move(Vec2::new(80.0, 90.0));

    assert_eq!(position_of(&canvas, ids[0]), Vec2::new(70.0, 80.0));
    canvas.pointer_up(Vec2::new(80.0, 90.0));
    assert!(canvas.session().is_idle());
}

#[test]
fn test_drag_at_zoom_tracks_pointer_in_model_space() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_node(plain("n", 50.0, 50.0))
        .build();

    drag(&mut canvas, Vec2::new(120.0, 120.0), Vec2::new(160.0, 180.0));
    assert_eq!(position_of(&canvas, ids[0]), Vec2::new(70.0, 80.0));
}

#[test]
fn test_drag_selects_the_pressed_node() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("a", 0.0, 0.0))
        .with_node(plain("b", 200.0, 0.0))
        .build();

    drag(&mut canvas, Vec2::new(210.0, 10.0), Vec2::new(230.0, 10.0));
    assert_eq!(canvas.selection().sorted(), vec![ids[1]]);
    assert_eq!(canvas.selection().primary(), Some(ids[1]));
    assert_eq!(position_of(&canvas, ids[0]), Vec2::ZERO);
}

#[test]
fn test_topmost_node_is_dragged() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("below", 0.0, 0.0))
        .with_node(plain("above", 50.0, 50.0))
        .build();

    drag(&mut canvas, Vec2::new(75.0, 75.0), Vec2::new(85.0, 75.0));
    assert_eq!(position_of(&canvas, ids[0]), Vec2::ZERO);
    assert_eq!(position_of(&canvas, ids[1]), Vec2::new(60.0, 50.0));
}

#[test]
fn test_group_drag_moves_whole_selection() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("a", 0.0, 0.0))
        .with_node(plain("b", 150.0, 0.0))
        .with_node(plain("c", 0.0, 300.0))
        .build();

    canvas.key_down(Key::Multiselect);
    drag(&mut canvas, Vec2::new(-10.0, -10.0), Vec2::new(260.0, 50.0));
    canvas.key_up(Key::Multiselect);
    assert_eq!(canvas.selection().sorted(), vec![ids[0], ids[1]]);

    drag(&mut canvas, Vec2::new(160.0, 10.0), Vec2::new(190.0, 50.0));
    assert_eq!(position_of(&canvas, ids[0]), Vec2::new(30.0, 40.0));
    assert_eq!(position_of(&canvas, ids[1]), Vec2::new(180.0, 40.0));
    assert_eq!(position_of(&canvas, ids[2]), Vec2::new(0.0, 300.0));
    assert_eq!(canvas.selection().len(), 2);
}

#[test]
fn test_press_outside_multi_selection_keeps_group() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("a", 0.0, 0.0))
        .with_node(plain("b", 150.0, 0.0))
        .with_node(plain("c", 0.0, 300.0))
        .build();

    canvas.key_down(Key::Multiselect);
    drag(&mut canvas, Vec2::new(-10.0, -10.0), Vec2::new(260.0, 50.0));
    canvas.key_up(Key::Multiselect);

    canvas.pointer_down(PointerEvent::primary(10.0, 310.0));
    assert_eq!(canvas.session().dragged_nodes(), vec![ids[0], ids[1]]);
    canvas.pointer_move(Vec2::new(20.0, 310.0));
    canvas.pointer_up(Vec2::new(20.0, 310.0));

    assert_eq!(canvas.selection().sorted(), vec![ids[0], ids[1]]);
    assert_eq!(position_of(&canvas, ids[0]), Vec2::new(10.0, 0.0));
    assert_eq!(position_of(&canvas, ids[1]), Vec2::new(160.0, 0.0));
    assert_eq!(position_of(&canvas, ids[2]), Vec2::new(0.0, 300.0));
}

#[test]
fn test_empty_canvas_press_ends_multi_selection() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("a", 0.0, 0.0))
        .with_node(plain("b", 150.0, 0.0))
        .build();

    canvas.key_down(Key::Multiselect);
    drag(&mut canvas, Vec2::new(-10.0, -10.0), Vec2::new(260.0, 50.0));
    canvas.key_up(Key::Multiselect);
    assert_eq!(canvas.selection().len(), 2);

    drag(&mut canvas, Vec2::new(500.0, 500.0), Vec2::new(500.0, 500.0));
    drag(&mut canvas, Vec2::new(160.0, 10.0), Vec2::new(170.0, 10.0));
    assert_eq!(canvas.selection().sorted(), vec![ids[1]]);
    assert_eq!(position_of(&canvas, ids[0]), Vec2::ZERO);
}

#[test]
fn test_drag_invalidates_old_and_new_connector_glyphs() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(
            NodeBuilder::inert("labelled")
                .at(50.0, 50.0)
                .with_input(ConnectorSpec::new("a", "f32").with_invalidation_width(30.0))
                .with_input(ConnectorSpec::new("b", "f32"))
                .with_input(ConnectorSpec::new("c", "f32"))
                .with_input(ConnectorSpec::new("d", "f32"))
                .with_output(ConnectorSpec::new("out", "f32").with_invalidation_width(12.0))
                .with_auxiliary_image(100.0, 40.0),
        )
        .build();
    let id = ids[0];

    let node = canvas.graph().node(id).unwrap();
    let bounds_before = node.invalidation_bounds();
    let glyphs_before: Vec<Rect> = node.connector_regions_to_invalidate().collect();

    drag(&mut canvas, Vec2::new(60.0, 60.0), Vec2::new(145.0, 20.0));

    let node = canvas.graph().node(id).unwrap();
    let bounds_after = node.invalidation_bounds();
    let glyphs_after: Vec<Rect> = node.connector_regions_to_invalidate().collect();

    let swept = bounds_before.union(&bounds_after);
    let pending = canvas.pending_invalidations();
    for glyph in glyphs_before.iter().chain(glyphs_after.iter()) {
        assert!(swept.contains_rect(glyph), "{glyph:?} outside {swept:?}");
        assert!(pending.covers(glyph), "{glyph:?} not invalidated");
    }
    assert!(pending.covers(&bounds_before));
    assert!(pending.covers(&bounds_after));
}

#[test]
fn test_drag_invalidations_are_scaled_and_normalized() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_node(plain("n", 50.0, 50.0))
        .build();

    drag(&mut canvas, Vec2::new(120.0, 120.0), Vec2::new(100.0, 100.0));

    let mut surface = RecordingSurface::default();
    canvas.flush_invalidations(&mut surface);
    let rects = surface.invalidated();
    assert!(!rects.is_empty());
    assert!(rects.iter().all(|r| r.width >= 0.0 && r.height >= 0.0));
    // New position (40, 40) at zoom 2, widened by the connector gutters.
    assert!(rects.contains(&Rect::new(48.0, 80.0, 280.0, 200.0)));
}

#[test]
fn test_press_during_drag_is_ignored() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_node(plain("n", 50.0, 50.0))
        .build();

    canvas.pointer_down(PointerEvent::primary(60.0, 60.0));
    canvas.pointer_down(PointerEvent::secondary(400.0, 400.0));
    assert!(canvas.session().is_dragging());

    canvas.pointer_move(Vec2::new(70.0, 60.0));
    assert_eq!(position_of(&canvas, ids[0]), Vec2::new(60.0, 50.0));
}
