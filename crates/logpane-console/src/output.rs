//! Default HTML projection of a surface's render tree.
//!
//! Mirrors the list markup the viewing panel builds: a `console` list of
//! method-classed items, groups as `group` items holding a nested list.
//! A presentation layer with its own widgets can ignore this and walk
//! [`Surface::nodes`](crate::Surface::nodes) directly.

use crate::node::RenderNode;
use crate::surface::Surface;

pub fn render_html(surface: &Surface) -> String {
    let mut html = String::from("<ul class=\"console\">");
    for node in surface.nodes() {
        push_node(&mut html, node);
    }
    html.push_str("</ul>");
    html
}

fn push_node(html: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Item { method, html: content } => {
            html.push_str("<li class=\"");
            html.push_str(method.as_str());
            html.push_str("\">");
            html.push_str(content);
            html.push_str("</li>");
        }
        RenderNode::Group { label_html, collapsed, children } => {
            html.push_str(if *collapsed {
                "<li class=\"group collapsed\">"
            } else {
                "<li class=\"group\">"
            });
            html.push_str(label_html);
            html.push_str("<ul>");
            for child in children {
                push_node(html, child);
            }
            html.push_str("</ul></li>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpane_protocol::{Command, Method, RenderValue};

    fn run(surface: &mut Surface, method: Method, text: &str) {
        let args = if text.is_empty() {
            vec![]
        } else {
            vec![RenderValue::from(text)]
        };
        surface.execute(Command::new(method, args)).unwrap();
    }

    #[test]
    fn projects_items_with_method_classes() {
        let mut surface = Surface::new();
        run(&mut surface, Method::Warn, "careful");
        assert_eq!(
            render_html(&surface),
            "<ul class=\"console\"><li class=\"warn\">careful</li></ul>"
        );
    }

    #[test]
    fn projects_groups_with_nested_lists() {
        let mut surface = Surface::new();
        run(&mut surface, Method::GroupCollapsed, "section");
        run(&mut surface, Method::Log, "inside");
        surface.execute(Command::new(Method::GroupEnd, vec![])).unwrap();
        run(&mut surface, Method::Log, "after");

        assert_eq!(
            render_html(&surface),
            "<ul class=\"console\">\
             <li class=\"group collapsed\">section<ul>\
             <li class=\"log\">inside</li>\
             </ul></li>\
             <li class=\"log\">after</li>\
             </ul>"
        );
    }

    #[test]
    fn open_groups_project_too() {
        let mut surface = Surface::new();
        run(&mut surface, Method::Group, "open");
        run(&mut surface, Method::Log, "inside");
        assert_eq!(
            render_html(&surface),
            "<ul class=\"console\">\
             <li class=\"group\">open<ul><li class=\"log\">inside</li></ul></li>\
             </ul>"
        );
    }

    #[test]
    fn empty_surface_projects_an_empty_console() {
        assert_eq!(render_html(&Surface::new()), "<ul class=\"console\"></ul>");
    }
}
