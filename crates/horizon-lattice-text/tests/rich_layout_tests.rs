//! Integration tests for rich text layout.

mod common;

use horizon_lattice_text::text::{Part, PartId, RichLayout, TextStyle};
use horizon_lattice_text::{Color, DrawList, Drawable, Point, Rect, TextError, Transform2D};

use common::{init_tracing, monospace};

/// A layout at size 20: advance 12, line spacing 30.
fn layout() -> RichLayout {
    let mut layout = RichLayout::new();
    layout.set_font(Some(monospace(20)));
    layout
}

fn run_positions(layout: &RichLayout) -> Vec<Point> {
    layout.runs().iter().map(|run| run.position()).collect()
}

#[test]
fn test_words_flow_on_one_line_without_wrap() {
    init_tracing();
    let mut layout = layout();
    layout.add_part(Part::new("one two"));
    layout.generate().unwrap();

    let words: Vec<_> = layout.runs().iter().map(|run| run.string()).collect();
    assert_eq!(words, ["one ", "two"]);
    assert_eq!(
        run_positions(&layout),
        [Point::new(0.0, 0.0), Point::new(48.0, 0.0)]
    );
}

#[test]
fn test_wrap_moves_overflowing_word_down() {
    let mut layout = layout();
    layout.set_max_width(130.0);
    // Widths 60, 60 and 48: the third word would end at 168.
    layout.add_part(Part::new("aaaa bbbb cccc"));
    layout.generate().unwrap();

    assert_eq!(
        run_positions(&layout),
        [
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(0.0, 30.0),
        ]
    );
}

#[test]
fn test_wrap_spans_parts() {
    let mut layout = layout();
    layout.set_max_width(50.0);
    layout.add_part(Part::new("abc "));
    layout.add_part(Part::new("de"));
    layout.generate().unwrap();

    // "abc " is 48 wide, the empty remainder stays, "de" (24) overflows.
    let positions = run_positions(&layout);
    assert_eq!(positions.len(), 3);
    assert_eq!(positions[1], Point::new(48.0, 0.0));
    assert_eq!(positions[2], Point::new(0.0, 30.0));
}

#[test]
fn test_over_wide_first_word_still_moves_down() {
    let mut layout = layout();
    layout.set_max_width(10.0);
    layout.add_part(Part::new("abc"));
    layout.generate().unwrap();
    assert_eq!(run_positions(&layout), [Point::new(0.0, 30.0)]);
}

#[test]
fn test_zero_width_disables_wrap() {
    let mut layout = layout();
    layout.set_max_width(0.0);
    layout.add_part(Part::new("aaaa bbbb cccc dddd eeee"));
    layout.generate().unwrap();
    assert!(layout.runs().iter().all(|run| run.position().y == 0.0));
}

#[test]
fn test_line_break_parts_start_new_lines() {
    let mut layout = layout();
    let id = layout.add_part(Part::new("ab\ncd"));
    layout.generate().unwrap();

    assert_eq!(layout.parts().len(), 2);
    assert!(layout.parts()[0].is_line_break());
    assert!(!layout.parts()[1].is_line_break());
    assert_eq!(
        run_positions(&layout),
        [Point::new(0.0, 0.0), Point::new(0.0, 30.0)]
    );
    assert!(layout.hitboxes().iter().all(|hitbox| hitbox.id == id));
}

#[test]
fn test_trailing_space_keeps_empty_run() {
    let mut layout = layout();
    layout.add_part(Part::new("ab "));
    layout.generate().unwrap();

    assert_eq!(layout.runs().len(), 2);
    let mut empty = layout.runs()[1].clone();
    assert!(empty.is_empty());
    assert!(empty.vertices().unwrap().is_empty());
    assert_eq!(empty.position(), Point::new(36.0, 0.0));
    assert_eq!(layout.hitboxes()[1].rect.width(), 0.0);
}

#[test]
fn test_hitboxes_cover_each_word() {
    let mut layout = layout();
    layout.add_part(Part::new("ab "));
    layout.add_part(Part::new("cd"));
    layout.generate().unwrap();

    let rects: Vec<_> = layout.hitboxes().iter().map(|hitbox| hitbox.rect).collect();
    assert_eq!(
        rects,
        [
            Rect::new(0.0, -20.0, 36.0, 20.0),
            Rect::new(36.0, -20.0, 0.0, 20.0),
            Rect::new(36.0, -20.0, 24.0, 20.0),
        ]
    );
}

#[test]
fn test_point_on_finds_the_part() {
    let mut layout = layout();
    let first = layout.add_part(Part::new("ab "));
    let second = layout.add_part(Part::new("cd"));
    layout.generate().unwrap();

    assert_eq!(first, PartId(0));
    assert_eq!(second, PartId(1));
    assert_eq!(layout.point_on(Point::new(10.0, -10.0)), Some(first));
    // The empty run at x = 36 has no area, so the next part wins.
    assert_eq!(layout.point_on(Point::new(36.0, -10.0)), Some(second));
    assert_eq!(layout.point_on(Point::new(50.0, -1.0)), Some(second));
    assert_eq!(layout.point_on(Point::new(100.0, 100.0)), None);
    assert_eq!(layout.point_on(Point::new(10.0, 5.0)), None);
}

#[test]
fn test_point_on_uses_layout_placement() {
    let mut layout = layout();
    let id = layout.add_part(Part::new("hello"));
    layout.generate().unwrap();
    layout.set_position(Point::new(100.0, 50.0));

    assert_eq!(layout.point_on(Point::new(110.0, 40.0)), Some(id));
    assert_eq!(layout.point_on(Point::new(10.0, -10.0)), None);
}

#[test]
fn test_bounds_reach_furthest_hitbox_edges() {
    let mut layout = layout();
    layout.add_part(Part::new("ab\nwxyz"));
    layout.generate().unwrap();

    // Second line hitbox spans y 10..30 and x 0..48.
    assert_eq!(layout.local_bounds(), Rect::new(0.0, 0.0, 48.0, 30.0));

    layout.set_position(Point::new(5.0, 5.0));
    assert_eq!(layout.global_bounds(), Rect::new(5.0, 5.0, 48.0, 30.0));
}

#[test]
fn test_generate_rebuilds_from_scratch() {
    let mut layout = layout();
    layout.add_part(Part::new("one two three"));
    layout.generate().unwrap();
    let hitboxes = layout.hitboxes().to_vec();

    layout.generate().unwrap();
    assert_eq!(layout.hitboxes(), hitboxes.as_slice());
    assert_eq!(layout.runs().len(), 3);

    layout.set_max_width(60.0);
    layout.generate().unwrap();
    assert_eq!(layout.runs()[1].position(), Point::new(0.0, 30.0));
}

#[test]
fn test_part_style_reaches_runs() {
    let corners = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
    let mut layout = layout();
    layout.add_part(
        Part::new("styled text")
            .with_color(Color::YELLOW)
            .with_corner_colors(corners)
            .with_style(TextStyle::BOLD | TextStyle::ITALIC),
    );
    layout.add_part(Part::new("plain").with_color(Color::BLUE));
    layout.generate().unwrap();

    let runs = layout.runs();
    assert_eq!(runs[0].corner_colors(), corners);
    assert_eq!(runs[0].style(), TextStyle::BOLD | TextStyle::ITALIC);
    assert_eq!(runs[2].corner_colors(), [Color::BLUE; 4]);
    assert!(runs[2].style().is_regular());
}

#[test]
fn test_draw_submits_every_run() {
    let mut layout = layout();
    layout.add_part(Part::new("ab cd").with_style(TextStyle::UNDERLINE));
    layout.add_part(Part::new("\nef"));
    layout.generate().unwrap();
    layout.set_position(Point::new(10.0, 20.0));

    let mut list = DrawList::new();
    layout.draw(&mut list, &Transform2D::IDENTITY).unwrap();

    // Seven drawable characters counting the space, one underline per underlined run.
    assert_eq!(list.vertex_count(), 28);
    assert_eq!(list.rectangles().count(), 2);
}

#[test]
fn test_generate_without_font_fails() {
    let mut layout = RichLayout::new();
    layout.add_part(Part::new("text"));
    assert!(matches!(layout.generate(), Err(TextError::NoFont)));
    assert_eq!(layout.char_size(), None);
}

#[test]
fn test_clear_empties_everything() {
    let mut layout = layout();
    layout.add_part(Part::new("some words here"));
    layout.generate().unwrap();
    layout.clear();

    assert!(layout.parts().is_empty());
    assert!(layout.runs().is_empty());
    assert!(layout.hitboxes().is_empty());
    assert_eq!(layout.add_part(Part::new("again")), PartId(1));

    layout.generate().unwrap();
    assert_eq!(layout.runs().len(), 1);
}

#[test]
#[should_panic(expected = "before generate()")]
fn test_bounds_after_clear_require_generate() {
    let mut layout = layout();
    layout.add_part(Part::new("abc"));
    layout.generate().unwrap();
    layout.clear();
    let _ = layout.local_bounds();
}
