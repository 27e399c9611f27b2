// src/analysis/syntax.rs
//! Exact-grammar frontend over a tree-sitter Python tree.
//!
//! Key rules:
//! 1. `if`, `elif`, `while` and `for` open a nesting level before they are
//!    scored, so a top-level `if` sits at depth 1.
//! 2. Every `elif` is one level deeper than the branch it follows.
//! 3. `try` and conditional expressions are scored at the current depth
//!    without opening a level.
//! 4. Boolean operators outside a scored condition add one path each.

use super::tally::{ScopeFrame, Tally};
use super::weights::{dc_contribution, TokenWeight};
use crate::error::{AnalysisError, Result};
use crate::lang::Lang;
use crate::types::{AnalysisResult, ConstructKind};
use tree_sitter::{Node, Parser, Tree};

/// Scores `source`. Malformed input yields the baseline result.
///
/// # Errors
/// Returns `Internal` if the grammar cannot be loaded or parsing is aborted.
pub fn analyze(source: &str, lang: Lang) -> Result<AnalysisResult> {
    let tree = match parse(source, lang) {
        Ok(tree) => tree,
        Err(AnalysisError::MalformedSource { line }) => {
            tracing::debug!(%lang, line, "grammar violation, returning baseline result");
            return Ok(AnalysisResult::baseline());
        }
        Err(e) => return Err(e),
    };

    let mut walker = Walker::new(source);
    walker.walk(tree.root_node());
    Ok(walker.finish())
}

fn parse(source: &str, lang: Lang) -> Result<Tree> {
    let grammar = lang
        .grammar()
        .ok_or_else(|| AnalysisError::Internal(format!("no grammar available for {lang}")))?;
    let mut parser = Parser::new();
    parser
        .set_language(grammar)
        .map_err(|e| AnalysisError::Internal(format!("grammar rejected: {e}")))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::Internal("parser produced no tree".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(AnalysisError::MalformedSource {
            line: first_error_line(root),
        });
    }
    Ok(tree)
}

fn first_error_line(root: Node) -> usize {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(|c| c.has_error());
        match next {
            Some(child) => node = child,
            None => return node.start_position().row + 1,
        }
    }
}

/// Pending work for the walker. Trees nest as deep as the source's
/// expressions, so traversal runs off an explicit stack.
enum Task<'t> {
    Visit(Node<'t>),
    Condition(Node<'t>),
    EndCondition,
    Elif(Node<'t>),
    Ascend,
    CloseMethod,
    CloseClass,
}

struct Walker<'a> {
    source: &'a [u8],
    depth: usize,
    /// Non-zero while visiting a scored construct's condition.
    in_condition: usize,
    methods: Vec<ScopeFrame>,
    classes: Vec<ScopeFrame>,
    tally: Tally,
}

impl<'a> Walker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            depth: 0,
            in_condition: 0,
            methods: Vec::new(),
            classes: Vec::new(),
            tally: Tally::new(),
        }
    }

    fn finish(mut self) -> AnalysisResult {
        while let Some(frame) = self.methods.pop() {
            self.tally.close_method(frame);
        }
        while let Some(frame) = self.classes.pop() {
            self.tally.close_class(frame);
        }
        self.tally.finish()
    }

    fn walk(&mut self, root: Node) {
        let mut stack = vec![Task::Visit(root)];
        while let Some(task) = stack.pop() {
            match task {
                Task::Visit(node) => self.visit(node, &mut stack),
                Task::Condition(node) => {
                    self.in_condition += 1;
                    stack.push(Task::EndCondition);
                    stack.push(Task::Visit(node));
                }
                Task::EndCondition => self.in_condition -= 1,
                Task::Elif(node) => {
                    self.depth += 1;
                    self.visit_branch(node, &mut stack);
                }
                Task::Ascend => self.depth -= 1,
                Task::CloseMethod => {
                    if let Some(frame) = self.methods.pop() {
                        self.tally.close_method(frame);
                    }
                }
                Task::CloseClass => {
                    if let Some(frame) = self.classes.pop() {
                        self.tally.close_class(frame);
                    }
                }
            }
        }
    }

    /// Handles `node` on entry and schedules its children. Tasks are pushed
    /// in reverse so they run in document order.
    fn visit<'t>(&mut self, node: Node<'t>, stack: &mut Vec<Task<'t>>) {
        match node.kind() {
            "function_definition" => {
                self.methods.push(ScopeFrame::open(self.name_of(node)));
                stack.push(Task::CloseMethod);
                push_children(node, None, stack);
            }
            "class_definition" => {
                self.classes.push(ScopeFrame::open(self.name_of(node)));
                stack.push(Task::CloseClass);
                push_children(node, None, stack);
            }
            "if_statement" => self.visit_if(node, stack),
            "while_statement" => {
                self.depth += 1;
                let condition = node.child_by_field_name("condition");
                let body = node.child_by_field_name("body");
                self.register(ConstructKind::While, node, condition, body);
                stack.push(Task::Ascend);
                push_children(node, condition, stack);
            }
            "for_statement" => {
                self.depth += 1;
                let body = node.child_by_field_name("body");
                self.register(ConstructKind::For, node, None, body);
                stack.push(Task::Ascend);
                push_children(node, None, stack);
            }
            "try_statement" => {
                let body = node.child_by_field_name("body");
                self.register(ConstructKind::Try, node, None, body);
                push_children(node, None, stack);
            }
            "conditional_expression" => {
                // `body if condition else alternative`
                let condition = node.named_child(1);
                self.register(ConstructKind::Ternary, node, condition, None);
                push_children(node, condition, stack);
            }
            "boolean_operator" => {
                if self.in_condition == 0 {
                    self.add_short_circuit_path();
                }
                push_children(node, None, stack);
            }
            _ => push_children(node, None, stack),
        }
    }

    /// The `if` opens one level and every `elif` one more. All of them close
    /// after the last alternative.
    fn visit_if<'t>(&mut self, node: Node<'t>, stack: &mut Vec<Task<'t>>) {
        self.depth += 1;

        let mut cursor = node.walk();
        let alternatives: Vec<Node<'t>> = node
            .children(&mut cursor)
            .filter(|c| matches!(c.kind(), "elif_clause" | "else_clause"))
            .collect();

        let mut levels = 1;
        let mut pending = Vec::new();
        for alt in alternatives {
            if alt.kind() == "elif_clause" {
                levels += 1;
                pending.push(Task::Elif(alt));
            } else {
                let mut cursor = alt.walk();
                pending.extend(alt.children(&mut cursor).map(Task::Visit));
            }
        }

        stack.extend((0..levels).map(|_| Task::Ascend));
        stack.extend(pending.into_iter().rev());
        self.visit_branch(node, stack);
    }

    /// Scores an `if` or `elif` head and schedules its condition and consequence.
    fn visit_branch<'t>(&mut self, node: Node<'t>, stack: &mut Vec<Task<'t>>) {
        let condition = node.child_by_field_name("condition");
        let body = node.child_by_field_name("consequence");
        self.register(ConstructKind::If, node, condition, body);
        if let Some(body) = body {
            stack.push(Task::Visit(body));
        }
        if let Some(condition) = condition {
            stack.push(Task::Condition(condition));
        }
    }

    /// A short-circuit operator adds a path to the total and to the innermost
    /// open scope.
    fn add_short_circuit_path(&mut self) {
        self.tally.add_paths(1);
        if let Some(method) = self.methods.last_mut() {
            method.add_paths(1);
        } else if let Some(class) = self.classes.last_mut() {
            class.add_paths(1);
        }
    }

    fn register(
        &mut self,
        kind: ConstructKind,
        node: Node,
        condition: Option<Node>,
        body: Option<Node>,
    ) {
        let tokens = condition.map_or_else(TokenWeight::bare, extract_tokens);
        let dc = dc_contribution(kind, self.depth, tokens);
        let line = node.start_position().row + 1;

        self.tally.score(line, dc);
        if let Some(method) = self.methods.last_mut() {
            method.charge(dc);
        }
        if let Some(class) = self.classes.last_mut() {
            class.charge(dc);
        }

        self.tally.structures.record(kind, self.depth);
        if let Some(body) = body {
            for child in collect_nested(body) {
                self.tally.structures.note_nested(kind, self.depth, child);
            }
        }

        tracing::trace!(line, %kind, depth = self.depth, dc, "scored construct");
    }

    fn name_of(&self, node: Node) -> String {
        node.child_by_field_name("name")
            .and_then(|n| n.utf8_text(self.source).ok())
            .unwrap_or("<anonymous>")
            .to_string()
    }
}

/// Schedules the children of `node`, marking `condition` as a scored condition.
fn push_children<'t>(node: Node<'t>, condition: Option<Node<'t>>, stack: &mut Vec<Task<'t>>) {
    let condition_id = condition.map(|c| c.id());
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    stack.extend(children.into_iter().rev().map(|child| {
        if Some(child.id()) == condition_id {
            Task::Condition(child)
        } else {
            Task::Visit(child)
        }
    }));
}

fn construct_kind(kind: &str) -> Option<ConstructKind> {
    match kind {
        "if_statement" | "elif_clause" => Some(ConstructKind::If),
        "for_statement" => Some(ConstructKind::For),
        "while_statement" => Some(ConstructKind::While),
        "try_statement" => Some(ConstructKind::Try),
        "conditional_expression" => Some(ConstructKind::Ternary),
        _ => None,
    }
}

/// Collects every construct anywhere beneath `node`.
fn collect_nested(node: Node) -> Vec<ConstructKind> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return out;
    }
    loop {
        if let Some(kind) = construct_kind(cursor.node().kind()) {
            out.push(kind);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() || cursor.node().id() == node.id() {
                return out;
            }
        }
    }
}

fn extract_tokens(condition: Node) -> TokenWeight {
    let mut tokens = TokenWeight::bare();
    let mut pending = vec![condition];
    while let Some(node) = pending.pop() {
        if count_token(node, &mut tokens) {
            let mut cursor = node.walk();
            pending.extend(node.children(&mut cursor));
        }
    }
    tokens
}

/// Adds `node`'s own weight. Returns whether its children still need counting.
fn count_token(node: Node, tokens: &mut TokenWeight) -> bool {
    match node.kind() {
        "boolean_operator" => {
            tokens.conds += 1;
            tokens.ops += 1;
        }
        "binary_operator" => tokens.ops += 1,
        // `a < b <= c` chains two comparisons over three operands.
        "comparison_operator" => tokens.ops += node.named_child_count().saturating_sub(1) as u64,
        "identifier" if !is_member_name(node) => tokens.operands += 1,
        "integer" | "float" | "true" | "false" | "none" | "ellipsis" => tokens.operands += 1,
        "string" | "concatenated_string" => {
            tokens.operands += 1;
            return false;
        }
        _ => {}
    }
    true
}

/// Attribute names (`obj.name`) and keyword names (`f(name=x)`) are labels,
/// not operands.
fn is_member_name(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let field = match parent.kind() {
        "attribute" => "attribute",
        "keyword_argument" => "name",
        _ => return false,
    };
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == node.id())
}
