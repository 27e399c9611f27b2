// src/analysis/heuristic.rs
//! Line-oriented frontend for brace-delimited languages.
//!
//! Constructs, nesting and method/class boundaries are inferred from lexical
//! patterns, one physical line at a time. Known approximations:
//! - A line holding a `}` pops one construct off the nesting stack and also
//!   closes whichever method and class are open. Accurate only for
//!   conventionally formatted code.
//! - One method and one class are tracked at a time. A new header flushes the
//!   previous scope; nested classes and local methods are not represented.
//! - A line that looks like a ternary is scored only as a ternary.

use super::tally::{ScopeFrame, Tally};
use super::weights::{dc_contribution, TokenWeight};
use crate::lang::Lang;
use crate::types::{AnalysisResult, ConstructKind};
use regex::Regex;
use std::sync::LazyLock;

static CLASS_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(r"^(?:(?:public|private|protected|abstract|final|static|sealed)\s+)*class\s+(\w+)")
});

static METHOD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(concat!(
        r"^(?:(?:public|private|protected|static|final|abstract|synchronized|native|",
        r"virtual|inline|explicit|constexpr|default)\s+)*",
        r"([\w:<>\[\]*&]+)\s+(\w+)\s*\([^)]*\)\s*(?:const\s*)?(?:throws\s+[\w.,\s]+)?\{",
    ))
});

static KEYWORD_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^(else\s+if|if|for|while|switch|case|catch)\b"));

static OPERATOR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"[=!<>+\-*/%]"));

static WORD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\b\w+\b"));

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| tracing::error!(pattern, error = %e, "invalid scanner pattern"))
        .ok()
}

/// Words that fit the method-header shape but head control statements.
const CONTROL_WORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "return", "new", "throw", "do",
];

/// Scans `source` line by line. Never fails: ambiguous input just skews the
/// statistics.
#[must_use]
pub fn analyze(source: &str, lang: Lang, extra_excluded: &[String]) -> AnalysisResult {
    let mut scanner = BlockScanner::new(lang, extra_excluded);
    for (idx, line) in source.split('\n').enumerate() {
        scanner.scan_line(idx + 1, line);
    }
    scanner.finish()
}

struct BlockScanner<'a> {
    lang: Lang,
    extra_excluded: &'a [String],
    nesting: Vec<ConstructKind>,
    method: Option<ScopeFrame>,
    class: Option<ScopeFrame>,
    tally: Tally,
}

impl<'a> BlockScanner<'a> {
    fn new(lang: Lang, extra_excluded: &'a [String]) -> Self {
        Self {
            lang,
            extra_excluded,
            nesting: Vec::new(),
            method: None,
            class: None,
            tally: Tally::new(),
        }
    }

    fn scan_line(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();
        if is_skippable(line) {
            return;
        }

        if let Some(name) = capture(&CLASS_RE, line, 1) {
            if let Some(previous) = self.class.replace(ScopeFrame::open(name)) {
                self.tally.close_class(previous);
            }
            return;
        }

        if self.method.is_none() {
            if let Some(name) = self.method_header(line) {
                if let Some(previous) = self.method.replace(ScopeFrame::open(name)) {
                    self.tally.close_method(previous);
                }
                return;
            }
        }

        let depth = self.nesting.len();
        if line.contains('?') && line.contains(':') {
            self.score(line_no, ConstructKind::Ternary, depth, line);
        } else if let Some(kind) = leading_keyword(line) {
            self.nesting.push(kind);
            self.score(line_no, kind, depth, line);
        }

        if line.contains('}') {
            self.close_block();
        }
    }

    fn method_header(&self, line: &str) -> Option<String> {
        let re = METHOD_RE.as_ref()?;
        let caps = re.captures(line)?;
        let return_type = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();

        if line.starts_with("throw")
            || CONTROL_WORDS.contains(&return_type)
            || CONTROL_WORDS.contains(&name)
            || self.is_excluded(name)
        {
            return None;
        }
        Some(name.to_string())
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.lang.excluded_identifiers().contains(&name)
            || self.extra_excluded.iter().any(|e| e == name)
    }

    fn score(&mut self, line_no: usize, kind: ConstructKind, depth: usize, line: &str) {
        let tokens = line_tokens(condition_text(line, kind));
        let dc = dc_contribution(kind, depth, tokens);

        self.tally.score(line_no, dc);
        if let Some(method) = self.method.as_mut() {
            method.charge(dc);
        }
        if let Some(class) = self.class.as_mut() {
            class.charge(dc);
        }

        self.tally.structures.record(kind, depth);
        // The entry below the top of the stack is taken as the parent, even
        // for ternaries, which are never pushed themselves.
        if depth > 0 && self.nesting.len() > 1 {
            let parent = self.nesting[self.nesting.len() - 2];
            self.tally.structures.note_nested(parent, depth - 1, kind);
        }

        tracing::trace!(line = line_no, %kind, depth, dc, "scored construct");
    }

    fn close_block(&mut self) {
        self.nesting.pop();
        if let Some(method) = self.method.take() {
            self.tally.close_method(method);
        }
        if let Some(class) = self.class.take() {
            self.tally.close_class(class);
        }
    }

    fn finish(mut self) -> AnalysisResult {
        if let Some(method) = self.method.take() {
            self.tally.close_method(method);
        }
        if let Some(class) = self.class.take() {
            self.tally.close_class(class);
        }
        self.tally.finish()
    }
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

fn capture(re: &LazyLock<Option<Regex>>, line: &str, group: usize) -> Option<String> {
    let re = re.as_ref()?;
    let caps = re.captures(line)?;
    Some(caps.get(group)?.as_str().to_string())
}

fn leading_keyword(line: &str) -> Option<ConstructKind> {
    let m = KEYWORD_RE.as_ref()?.find(line)?;
    let kind = match m.as_str() {
        "if" => ConstructKind::If,
        "for" => ConstructKind::For,
        "while" => ConstructKind::While,
        "switch" => ConstructKind::Switch,
        "case" => ConstructKind::Case,
        "catch" => ConstructKind::Catch,
        _ => ConstructKind::ElseIf,
    };
    Some(kind)
}

/// The governing text of a construct: everything before `?` for a ternary,
/// otherwise the contents of the first parenthesised group.
fn condition_text(line: &str, kind: ConstructKind) -> &str {
    if kind == ConstructKind::Ternary {
        return line.split('?').next().unwrap_or("");
    }
    let Some(open) = line.find('(') else {
        return "";
    };
    let mut depth = 0usize;
    for (offset, ch) in line[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &line[open + 1..open + offset];
                }
            }
            _ => {}
        }
    }
    ""
}

/// Lexical token weight: one clause per `&&`/`||`/`?` plus one; operators are
/// the logical combinators plus every arithmetic, relational or assignment
/// symbol; operands are word tokens.
fn line_tokens(condition: &str) -> TokenWeight {
    let logical = (condition.matches("&&").count() + condition.matches("||").count()) as u64;
    let questions = condition.matches('?').count() as u64;
    let symbols = OPERATOR_RE
        .as_ref()
        .map_or(0, |re| re.find_iter(condition).count()) as u64;
    let words = WORD_RE
        .as_ref()
        .map_or(0, |re| re.find_iter(condition).count()) as u64;

    TokenWeight {
        conds: logical + questions + 1,
        ops: logical + symbols,
        operands: words,
    }
}
