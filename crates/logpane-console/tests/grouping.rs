use logpane_console::{render_html, Surface};
use logpane_protocol::{process_batch, RawBatch, StyleCategory, StyleConfig};
use serde_json::json;

fn run(batch: &RawBatch) -> Surface {
    let styles = StyleConfig::new();
    let mut surface = Surface::new();
    for command in process_batch(&styles, batch) {
        let _ = surface.execute(command);
    }
    surface
}

#[test]
fn rows_render_into_a_grouped_console() {
    let batch = RawBatch::from_rows(vec![
        json!([["request"], false, "groupCollapsed"]),
        json!([["handled", 200], "api.php:10", "info"]),
        json!([[], false, "groupEnd"]),
        json!([["done"], false, "log"]),
    ]);
    let surface = run(&batch);

    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.nodes().len(), 2);

    let html = render_html(&surface);
    assert!(html.contains("<li class=\"group collapsed\">"));
    assert!(html.contains(">request</span>"));
    assert!(html.contains("handled"));
    assert!(html.contains("api.php:10"));
    assert!(html.contains("<li class=\"log\">"));
}

#[test]
fn group_labels_use_the_group_category_style() {
    let batch = RawBatch::from_rows(vec![json!([["section"], false, "groupCollapsed"])]);
    let surface = run(&batch);
    assert!(surface.nodes()[0]
        .html()
        .contains(StyleCategory::Group.stock_style()));
}

#[test]
fn passing_assertions_vanish_failing_ones_render_errors() {
    let batch = RawBatch::from_rows(vec![
        json!([[true, "fine"], false, "assert"]),
        json!([[false, "broken"], false, "assert"]),
    ]);
    let surface = run(&batch);

    assert_eq!(surface.nodes().len(), 1);
    let html = render_html(&surface);
    assert!(html.contains("<li class=\"error\">"));
    assert!(html.contains("broken"));
    assert!(!html.contains("fine"));
}

#[test]
fn tables_flow_through_the_pipeline() {
    let batch = RawBatch::from_rows(vec![json!([
        [[{"name": "ada"}, {"name": "grace"}]],
        false,
        "table"
    ])]);
    let surface = run(&batch);

    let html = surface.nodes()[0].html();
    assert!(html.starts_with("<table>"));
    assert!(html.contains("<th>name</th>"));
    assert!(html.contains("ada"));
    assert!(html.contains("grace"));
}

#[test]
fn explicit_patterns_substitute_in_place() {
    let batch = RawBatch::from_rows(vec![json!([
        ["loaded %d of %d: %s", 2, 10, "images"],
        false,
        "log"
    ])]);
    let surface = run(&batch);
    assert_eq!(surface.nodes()[0].html(), "loaded 2 of 10: images");
}

#[test]
fn clear_resets_even_inside_groups() {
    let batch = RawBatch::from_rows(vec![
        json!([["old"], false, "log"]),
        json!([["section"], false, "group"]),
        json!([[], false, "clear"]),
        json!([["new"], false, "log"]),
    ]);
    let surface = run(&batch);

    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.nodes().len(), 1);
    assert!(surface.nodes()[0].html().contains("new"));
}
