//! JavaScript re-indentation for the `prettify` option
//!
//! Beautification sits behind [`ScriptFormatter`] so callers can plug in a
//! full beautifier. [`IndentFormatter`] is the built-in one: it breaks lines
//! after `{`, `}` and statement-ending `;`, and indents by brace depth. String,
//! template and regex literals and comments are copied untouched. Existing
//! line breaks are kept so automatic semicolon insertion sees the same input;
//! blank lines are dropped.

/// Rewrites script source for readability without changing its meaning
pub trait ScriptFormatter {
    fn format(&self, source: &str) -> String;
}

/// Brace-depth re-indenter
#[derive(Debug, Clone)]
pub struct IndentFormatter {
    indent: String,
}

impl Default for IndentFormatter {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }
}

impl IndentFormatter {
    #[must_use]
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    Template,
    Regex { in_class: bool },
    LineComment,
    BlockComment,
}

struct Writer<'a> {
    out: String,
    indent: &'a str,
    depth: usize,
    at_line_start: bool,
}

impl Writer<'_> {
    fn push(&mut self, c: char) {
        if self.at_line_start {
            for _ in 0..self.depth {
                self.out.push_str(self.indent);
            }
            self.at_line_start = false;
        }
        self.out.push(c);
    }

    fn newline(&mut self) {
        if self.at_line_start {
            return;
        }
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Last character written that is not whitespace
    fn last_significant(&self) -> Option<char> {
        self.out.chars().rev().find(|c| !c.is_whitespace())
    }
}

/// A `/` starts a regex literal when it cannot be a division operator
fn regex_can_start(previous: Option<char>) -> bool {
    match previous {
        None => true,
        Some(c) => "(,=:[!&|?{};+-*%<>~^".contains(c),
    }
}

impl ScriptFormatter for IndentFormatter {
    fn format(&self, source: &str) -> String {
        let mut w = Writer {
            out: String::with_capacity(source.len() + source.len() / 4),
            indent: &self.indent,
            depth: 0,
            at_line_start: true,
        };
        let mut state = State::Code;
        let mut paren_depth = 0usize;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                State::Code => match c {
                    '\'' | '"' => {
                        state = State::Quoted(c);
                        w.push(c);
                    }
                    '`' => {
                        state = State::Template;
                        w.push(c);
                    }
                    '/' if chars.peek() == Some(&'/') => {
                        state = State::LineComment;
                        w.push(c);
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        state = State::BlockComment;
                        w.push(c);
                    }
                    '/' if regex_can_start(w.last_significant()) => {
                        state = State::Regex { in_class: false };
                        w.push(c);
                    }
                    '{' => {
                        w.push(c);
                        w.depth += 1;
                        w.newline();
                    }
                    '}' => {
                        w.depth = w.depth.saturating_sub(1);
                        w.newline();
                        w.push(c);
                        if !matches!(chars.peek(), Some(';' | ',' | ')' | '.')) {
                            w.newline();
                        }
                    }
                    '(' => {
                        paren_depth += 1;
                        w.push(c);
                    }
                    ')' => {
                        paren_depth = paren_depth.saturating_sub(1);
                        w.push(c);
                    }
                    ';' => {
                        w.push(c);
                        if paren_depth == 0 {
                            w.newline();
                        }
                    }
                    '\n' => w.newline(),
                    '\r' => {}
                    c if c.is_whitespace() => {
                        if !w.at_line_start && !w.out.ends_with(' ') {
                            w.push(' ');
                        }
                    }
                    c => w.push(c),
                },
                State::Quoted(quote) => {
                    w.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            w.push(escaped);
                        }
                    } else if c == quote || c == '\n' {
                        state = State::Code;
                    }
                }
                State::Template => {
                    w.out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            w.out.push(escaped);
                        }
                    } else if c == '`' {
                        state = State::Code;
                    }
                }
                State::Regex { in_class } => {
                    w.push(c);
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                w.push(escaped);
                            }
                        }
                        '[' => state = State::Regex { in_class: true },
                        ']' => state = State::Regex { in_class: false },
                        '/' if !in_class => state = State::Code,
                        '\n' => state = State::Code,
                        _ => {}
                    }
                }
                State::LineComment => {
                    if c == '\n' {
                        state = State::Code;
                        w.newline();
                    } else {
                        w.push(c);
                    }
                }
                State::BlockComment => {
                    if c == '\n' {
                        w.out.push('\n');
                    } else {
                        w.push(c);
                    }
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        w.push('/');
                        state = State::Code;
                    }
                }
            }
        }

        let trimmed = w.out.trim_end().len();
        w.out.truncate(trimmed);
        w.out.push('\n');
        w.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(source: &str) -> String {
        IndentFormatter::default().format(source)
    }

    #[test]
    fn test_breaks_and_indents_blocks() {
        assert_eq!(
            format("function f(a){if(a){return 1;}return 2;}"),
            "function f(a){\n    if(a){\n        return 1;\n    }\n    return 2;\n}\n"
        );
    }

    #[test]
    fn test_for_header_semicolons_stay_on_one_line() {
        assert_eq!(
            format("for(var i=0;i<3;i++){x();}"),
            "for(var i=0;i<3;i++){\n    x();\n}\n"
        );
    }

    #[test]
    fn test_string_literals_are_untouched() {
        assert_eq!(format("var s = '{;}';"), "var s = '{;}';\n");
        assert_eq!(format(r#"var s = "a\"{b";"#), "var s = \"a\\\"{b\";\n");
        assert_eq!(format("var t = `x{\n;y`;"), "var t = `x{\n;y`;\n");
    }

    #[test]
    fn test_regex_literals_are_untouched() {
        assert_eq!(format("var r = /a{2};[}]/g;"), "var r = /a{2};[}]/g;\n");
        assert_eq!(format("var half = a / 2;"), "var half = a / 2;\n");
    }

    #[test]
    fn test_line_breaks_are_kept_for_asi() {
        assert_eq!(format("a = 1\nb = 2"), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_comments_are_untouched() {
        assert_eq!(format("// {;}\nx();"), "// {;}\nx();\n");
        assert_eq!(format("/* { ; } */x();"), "/* { ; } */x();\n");
    }

    #[test]
    fn test_object_literal_followed_by_semicolon() {
        assert_eq!(format("var o = {a: 1};"), "var o = {\n    a: 1\n};\n");
    }
}
