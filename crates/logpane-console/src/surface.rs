//! Stateful command interpretation against one output surface.

use logpane_markup::{encode, substitute};
use logpane_protocol::{Command, Method, RenderValue};
use serde_json::Value;
use thiserror::Error;

use crate::node::RenderNode;
use crate::table;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// `groupEnd` arrived with no group open.
    #[error("groupEnd with no open group")]
    GroupEndAtRoot,
}

/// One output surface: a render tree plus the stack of open groups.
///
/// The stack holds the index path to the group whose children currently
/// receive new nodes; an empty stack appends at the root.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    nodes: Vec<RenderNode>,
    stack: Vec<usize>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the render tree, open groups included.
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// Current group nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Interprets one command against this surface.
    pub fn execute(&mut self, command: Command) -> Result<(), ConsoleError> {
        match command.method {
            Method::GroupEnd => {
                return match self.stack.pop() {
                    Some(_) => Ok(()),
                    None => Err(ConsoleError::GroupEndAtRoot),
                };
            }
            Method::Clear => {
                self.nodes.clear();
                self.stack.clear();
                return Ok(());
            }
            _ => {}
        }

        let html = render_command(&command);

        if matches!(command.method, Method::Group | Method::GroupCollapsed) {
            // Groups are appended even with an empty label; subsequent
            // nodes land inside them.
            let collapsed = command.method == Method::GroupCollapsed;
            let index = {
                let sink = self.sink_mut();
                sink.push(RenderNode::Group {
                    label_html: html,
                    collapsed,
                    children: Vec::new(),
                });
                sink.len() - 1
            };
            self.stack.push(index);
        } else if !html.is_empty() {
            let method = command.method;
            self.sink_mut().push(RenderNode::Item { method, html });
        }

        Ok(())
    }

    fn sink_mut(&mut self) -> &mut Vec<RenderNode> {
        let mut nodes = &mut self.nodes;
        for &index in &self.stack {
            // Invariant: stack entries address group nodes this surface
            // appended itself.
            nodes = match nodes.get_mut(index) {
                Some(RenderNode::Group { children, .. }) => children,
                _ => unreachable!("group stack addresses group nodes"),
            };
        }
        nodes
    }
}

/// Renders a command's payload markup. Empty output means the command
/// has nothing to show.
fn render_command(command: &Command) -> String {
    let args = command.args.as_slice();

    match command.method {
        Method::Dir | Method::Dirxml => {
            let mut html = encode(args.first().unwrap_or(&RenderValue::Undefined));
            append_encoded(&mut html, args.get(1..).unwrap_or_default());
            html
        }
        Method::Table => match args.first() {
            Some(RenderValue::Data(data)) => {
                let mask = match args.get(1) {
                    Some(RenderValue::Data(Value::Array(columns))) => Some(columns.as_slice()),
                    _ => None,
                };
                let mut html = table::render(data, mask);
                append_encoded(&mut html, args.get(2..).unwrap_or_default());
                html
            }
            _ => plain_line(args),
        },
        _ => plain_line(args),
    }
}

fn plain_line(args: &[RenderValue]) -> String {
    match args.split_first() {
        None => String::new(),
        Some((RenderValue::Text(pattern), rest)) => substitute(pattern, rest),
        Some((first, rest)) => {
            let mut html = encode(first);
            append_encoded(&mut html, rest);
            html
        }
    }
}

fn append_encoded(html: &mut String, rest: &[RenderValue]) {
    for arg in rest {
        html.push(' ');
        html.push_str(&encode(arg));
    }
}
