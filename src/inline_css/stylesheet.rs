//! Stylesheet model for the CSS passes
//!
//! Only as much structure as inlining needs is kept: style rules and
//! `@font-face` rules expose their declarations, `@import` rules expose their
//! href, and every other at-rule is carried as its source text. Selectors and
//! declaration values are stored as written.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};

/// A single `name: value` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDeclaration {
    pub name: String,
    /// Value as written, including any `!important`
    pub value: String,
}

impl CssDeclaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One entry of a declaration block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    Declaration(CssDeclaration),
    /// Anything that is not a plain declaration (nested rules, `*zoom:1`
    /// style hacks), kept as written
    Verbatim(String),
}

/// The contents of a rule body or `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    pub items: Vec<BodyItem>,
}

impl DeclarationBlock {
    /// Parse the inside of a `{ ... }` block or a `style` attribute
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        collect_block(&mut parser)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &CssDeclaration> {
        self.items.iter().filter_map(|item| match item {
            BodyItem::Declaration(declaration) => Some(declaration),
            BodyItem::Verbatim(_) => None,
        })
    }

    pub fn declarations_mut(&mut self) -> impl Iterator<Item = &mut CssDeclaration> {
        self.items.iter_mut().filter_map(|item| match item {
            BodyItem::Declaration(declaration) => Some(declaration),
            BodyItem::Verbatim(_) => None,
        })
    }

    /// Serialize as `name:value;name:value`
    #[must_use]
    pub fn to_css(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                BodyItem::Declaration(d) => format!("{}:{}", d.name, d.value),
                BodyItem::Verbatim(raw) => raw.clone(),
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl From<Vec<CssDeclaration>> for DeclarationBlock {
    fn from(declarations: Vec<CssDeclaration>) -> Self {
        Self {
            items: declarations.into_iter().map(BodyItem::Declaration).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    Style {
        selectors: String,
        block: DeclarationBlock,
    },
    FontFace {
        block: DeclarationBlock,
    },
    Import {
        href: String,
        /// Rule text as written, used when the import is kept
        raw: String,
    },
    /// Any other at-rule, kept verbatim
    Other(String),
}

impl CssRule {
    /// Body of rules whose urls are rewritten
    pub fn block_mut(&mut self) -> Option<&mut DeclarationBlock> {
        match self {
            CssRule::Style { block, .. } | CssRule::FontFace { block } => Some(block),
            CssRule::Import { .. } | CssRule::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_import(&self) -> bool {
        matches!(self, CssRule::Import { .. })
    }

    fn write_to(&self, out: &mut String) {
        match self {
            CssRule::Style { selectors, block } => {
                out.push_str(selectors);
                write_block(block, out);
            }
            CssRule::FontFace { block } => {
                out.push_str("@font-face");
                write_block(block, out);
            }
            CssRule::Import { raw, .. } => out.push_str(raw),
            CssRule::Other(raw) => out.push_str(raw),
        }
    }
}

fn write_block(block: &DeclarationBlock, out: &mut String) {
    out.push('{');
    out.push_str(&block.to_css());
    out.push('}');
}

/// A parsed stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Parse stylesheet text
    ///
    /// Parsing is lenient: rules cssparser rejects are dropped with a warning.
    /// A leading `@charset` is consumed by the parser and does not survive.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rule_parser = TopLevelRuleParser;
        let mut sheet_parser = StyleSheetParser::new(&mut parser, &mut rule_parser);

        let mut rules = Vec::new();
        loop {
            let start = sheet_parser.input.position();
            let Some(result) = sheet_parser.next() else {
                break;
            };
            match result {
                Ok(kind) => {
                    let raw = sheet_parser.input.slice_from(start).trim();
                    rules.push(kind.into_rule(raw));
                }
                Err((_, rejected)) => {
                    log::warn!("Dropping unparseable CSS rule: {}", rejected.trim());
                }
            }
        }

        Self { rules }
    }

    #[must_use]
    pub fn has_imports(&self) -> bool {
        self.rules.iter().any(CssRule::is_import)
    }

    /// Serialize back to CSS text, one rule per line
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            rule.write_to(&mut out);
        }
        out
    }
}

fn collect_block<'i>(input: &mut Parser<'i, '_>) -> DeclarationBlock {
    let mut items = Vec::new();
    let mut decl_parser = DeclarationCollector;
    for result in RuleBodyParser::new(input, &mut decl_parser) {
        match result {
            Ok(declaration) => items.push(BodyItem::Declaration(declaration)),
            Err((_, rejected)) => {
                let raw = rejected.trim().trim_end_matches(';').trim_end();
                if !raw.is_empty() {
                    log::debug!("Keeping unrecognized block item as written: {raw}");
                    items.push(BodyItem::Verbatim(raw.to_string()));
                }
            }
        }
    }
    DeclarationBlock { items }
}

/// Consume the rest of the input and return it as written
fn rest_as_written<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim()
}

/// What a top-level rule turned out to be, before its source text is known
enum RuleKind {
    Style {
        selectors: String,
        block: DeclarationBlock,
    },
    FontFace(DeclarationBlock),
    Import(String),
    Other,
}

impl RuleKind {
    fn into_rule(self, raw: &str) -> CssRule {
        match self {
            RuleKind::Style { selectors, block } => CssRule::Style { selectors, block },
            RuleKind::FontFace(block) => CssRule::FontFace { block },
            RuleKind::Import(href) => CssRule::Import {
                href,
                raw: raw.to_string(),
            },
            RuleKind::Other => CssRule::Other(raw.to_string()),
        }
    }
}

enum AtPrelude {
    FontFace,
    Import(String),
    Other,
}

struct TopLevelRuleParser;

impl<'i> AtRuleParser<'i> for TopLevelRuleParser {
    type Prelude = AtPrelude;
    type AtRule = RuleKind;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("font-face") {
            Ok(AtPrelude::FontFace)
        } else if name.eq_ignore_ascii_case("import") {
            let href = input.expect_url_or_string()?.to_string();
            // Media and supports conditions do not survive a splice
            rest_as_written(input);
            Ok(AtPrelude::Import(href))
        } else {
            rest_as_written(input);
            Ok(AtPrelude::Other)
        }
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        match prelude {
            AtPrelude::Import(href) => Ok(RuleKind::Import(href)),
            AtPrelude::Other => Ok(RuleKind::Other),
            AtPrelude::FontFace => Err(()),
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        match prelude {
            AtPrelude::FontFace => Ok(RuleKind::FontFace(collect_block(input))),
            AtPrelude::Other => {
                rest_as_written(input);
                Ok(RuleKind::Other)
            }
            AtPrelude::Import(_) => Err(input.new_custom_error(())),
        }
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser {
    type Prelude = String;
    type QualifiedRule = RuleKind;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(rest_as_written(input).to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(RuleKind::Style {
            selectors: prelude,
            block: collect_block(input),
        })
    }
}

/// Collects declarations of a rule body or `style` attribute
struct DeclarationCollector;

impl<'i> AtRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type AtRule = CssDeclaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type QualifiedRule = CssDeclaration;
    type Error = ();
}

impl<'i> DeclarationParser<'i> for DeclarationCollector {
    type Declaration = CssDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let value = rest_as_written(input);
        Ok(CssDeclaration::new(&*name, value))
    }
}

impl<'i> RuleBodyItemParser<'i, CssDeclaration, ()> for DeclarationCollector {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}
