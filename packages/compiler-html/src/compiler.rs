use crate::options::{AttributeDialect, CompileOptions, StyleMode};
use crate::style::{declarations, inject_translate, inline_declarations, jsx_object};
use indexmap::IndexMap;
use pagecraft_tree::{walk_node, Key, Node, NodeError, NodeType, StyleMap, StyleValue, Visitor};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during markup compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid node: {0}")]
    InvalidNode(#[from] NodeError),

    #[error("Keys {first} and {second} both generate class '{class_name}'")]
    ClassNameCollision {
        class_name: String,
        first: Key,
        second: Key,
    },
}

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add_indent();
        self.add(text);
        self.add("\n");
    }

    fn add_indent(&mut self) {
        let width = self.options.base_indent_offset + self.depth * self.options.indent_step;
        self.buffer.extend(std::iter::repeat(' ').take(width));
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a render-ready forest to indented markup
///
/// In classname mode the `<style>` block (if enabled and non-empty) comes
/// first, followed by one line per element or text node. Elements keep their
/// inline `style` attribute in every mode.
#[instrument(skip_all, fields(roots = nodes.len(), mode = ?options.style_mode))]
pub fn compile_to_markup(nodes: &[Node], options: &CompileOptions) -> Result<String, CompileError> {
    for node in nodes {
        node.validate()?;
    }

    let mut ctx = Context::new(options);

    if options.style_mode == StyleMode::Classname {
        let rules = collect_style_rules(nodes)?;
        if options.style_block {
            compile_style_rules(&rules, &mut ctx);
        }
    }

    for node in nodes {
        compile_node(node, &mut ctx);
    }

    let output = ctx.get_output();
    debug!(bytes = output.len(), "Markup compiled");
    Ok(output)
}

/// Compile only the `<style>` block for a forest.
///
/// Returns an empty string outside classname mode, or when no node has a
/// generated class with styles.
pub fn compile_style_block(nodes: &[Node], options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    if options.style_mode == StyleMode::Classname {
        compile_style_rules(&collect_style_rules(nodes)?, &mut ctx);
    }
    Ok(ctx.get_output())
}

fn compile_node(node: &Node, ctx: &mut Context) {
    match node.node_type {
        NodeType::Text => {
            let content = node.content.as_deref().unwrap_or_default();
            ctx.add_line(&escape_text(content));
        }
        NodeType::Single | NodeType::Container => compile_element(node, ctx),
    }
}

fn compile_element(node: &Node, ctx: &mut Context) {
    ctx.add_indent();
    ctx.add(&opening_tag(node, ctx.options));

    if node.is_single() {
        ctx.add("\n");
        return;
    }

    if node.children.is_empty() {
        ctx.add(&format!("</{}>\n", node.tag));
        return;
    }

    ctx.add("\n");
    ctx.indent();
    for child in &node.children {
        compile_node(child, ctx);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", node.tag));
}

fn opening_tag(node: &Node, options: &CompileOptions) -> String {
    let mut tag = format!("<{}", node.tag);
    let props = node.props.as_ref();

    if let Some(id) = props.and_then(|props| props.id.as_deref()) {
        tag.push_str(&format!(" id=\"{}\"", escape_html(id)));
    }

    if let Some(class_name) = class_name(node, options) {
        tag.push_str(&format!(
            " {}=\"{}\"",
            options.attribute_dialect.class_attribute(),
            escape_html(&class_name)
        ));
    }

    for attribute in props.map(|props| props.attributes.as_slice()).unwrap_or_default() {
        tag.push_str(&format!(
            " {}=\"{}\"",
            attribute.name,
            escape_html(&attribute.value)
        ));
    }

    if let Some(style) = inline_style(node, options) {
        tag.push(' ');
        tag.push_str(&style);
    }

    tag.push_str(if node.is_single() { " />" } else { ">" });
    tag
}

fn explicit_class(node: &Node) -> Option<&str> {
    node.props
        .as_ref()
        .and_then(|props| props.class_name.as_deref())
        .filter(|class_name| !class_name.trim().is_empty())
}

/// Explicit class verbatim, otherwise a key-derived class in classname mode
fn class_name(node: &Node, options: &CompileOptions) -> Option<String> {
    match explicit_class(node) {
        Some(class_name) => Some(class_name.to_string()),
        None if options.style_mode == StyleMode::Classname => Some(node.key.class_name()),
        None => None,
    }
}

/// Style map with the canvas position injected, if the node has any styles
fn effective_style(node: &Node) -> Option<StyleMap> {
    let props = node.props.as_ref()?;
    if props.style.is_empty() {
        return None;
    }

    let mut style = props.style.clone();
    if let Some(position) = props.position {
        inject_translate(&mut style, position);
    }
    Some(style)
}

fn inline_style(node: &Node, options: &CompileOptions) -> Option<String> {
    let style = effective_style(node)?;
    if !style.values().any(StyleValue::is_valid) {
        return None;
    }

    if options.style_mode == StyleMode::Inline && options.attribute_dialect == AttributeDialect::Jsx {
        return Some(format!("style={{{}}}", jsx_object(&style)));
    }

    Some(format!("style=\"{}\"", escape_html(&inline_declarations(&style))))
}

type StyleRules = IndexMap<String, Vec<(String, String)>>;

/// Collects one rule per generated class, in pre-order
#[derive(Default)]
struct StyleRuleCollector {
    owners: HashMap<String, Key>,
    rules: StyleRules,
    collision: Option<CompileError>,
}

impl Visitor for StyleRuleCollector {
    fn visit_node(&mut self, node: &Node) {
        if node.is_text() || self.collision.is_some() {
            return;
        }

        if explicit_class(node).is_none() {
            let class_name = node.key.class_name();
            match self.owners.get(&class_name) {
                // identical subtrees can share keys; the first rule wins
                Some(owner) if owner == &node.key => {}
                Some(owner) => {
                    self.collision = Some(CompileError::ClassNameCollision {
                        class_name,
                        first: owner.clone(),
                        second: node.key.clone(),
                    });
                    return;
                }
                None => {
                    self.owners.insert(class_name.clone(), node.key.clone());
                    let declarations = effective_style(node)
                        .map(|style| declarations(&style))
                        .unwrap_or_default();
                    if !declarations.is_empty() {
                        self.rules.insert(class_name, declarations);
                    }
                }
            }
        }

        // children of self-closing nodes are never emitted
        if !node.is_single() {
            walk_node(self, node);
        }
    }
}

fn collect_style_rules(nodes: &[Node]) -> Result<StyleRules, CompileError> {
    let mut collector = StyleRuleCollector::default();
    collector.visit_forest(nodes);
    match collector.collision {
        Some(err) => Err(err),
        None => Ok(collector.rules),
    }
}

fn compile_style_rules(rules: &StyleRules, ctx: &mut Context) {
    if rules.is_empty() {
        return;
    }

    ctx.add_line("<style>");
    ctx.indent();
    for (class_name, declarations) in rules {
        ctx.add_line(&format!(".{} {{", class_name));
        ctx.indent();
        for (property, value) in declarations {
            ctx.add_line(&format!("{}: {};", property, value));
        }
        ctx.dedent();
        ctx.add_line("}");
    }
    ctx.dedent();
    ctx.add_line("</style>");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
