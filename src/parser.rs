//! Parser for the boolean subset of the SMV input language.
//!
//! ```text
//! MODULE main
//! VAR   req : boolean;  ack : boolean;
//! IVAR  go : boolean;
//! ASSIGN
//!   init(req) := FALSE;
//!   next(req) := case go : {TRUE, FALSE}; TRUE : req; esac;
//! TRANS next(ack) = req
//! LTLSPEC G F req -> G F ack
//! ```
//!
//! The parser only builds syntax; names are resolved when the model is encoded
//! (see [`SymbolicModel`][crate::model::SymbolicModel]).

use std::fmt;

use logos::Logos;

use crate::error::{Error, Result};
use crate::formula::{Kind, Node};

/// Words that start a new top-level section.
const SECTIONS: &[&str] = &[
    "MODULE",
    "VAR",
    "IVAR",
    "FROZENVAR",
    "DEFINE",
    "CONSTANTS",
    "INIT",
    "INVAR",
    "TRANS",
    "ASSIGN",
    "FAIRNESS",
    "JUSTICE",
    "COMPASSION",
    "LTLSPEC",
    "SPEC",
    "CTLSPEC",
    "INVARSPEC",
    "PSLSPEC",
    "COMPUTE",
];

/// Spelled as an alias so the `Logos` derive keeps the `'static` lifetime
/// instead of rewriting it to the source lifetime.
type Punctuation = &'static str;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"--[^\n]*")]
enum Lexeme<'a> {
    #[regex(r"[A-Za-z_][A-Za-z0-9_$#]*", |lex| lex.slice())]
    Ident(&'a str),

    #[regex(r"-?[0-9]+", |lex| lex.slice())]
    Number(&'a str),

    #[token("<->", |_| "<->")]
    #[token("->", |_| "->")]
    #[token("<=", |_| "<=")]
    #[token(">=", |_| ">=")]
    #[token("!=", |_| "!=")]
    #[token(":=", |_| ":=")]
    #[token("..", |_| "..")]
    #[token("=", |_| "=")]
    #[token("<", |_| "<")]
    #[token(">", |_| ">")]
    #[token("!", |_| "!")]
    #[token("&", |_| "&")]
    #[token("|", |_| "|")]
    #[token("(", |_| "(")]
    #[token(")", |_| ")")]
    #[token("{", |_| "{")]
    #[token("}", |_| "}")]
    #[token(";", |_| ";")]
    #[token(":", |_| ":")]
    #[token(",", |_| ",")]
    Punct(Punctuation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Number(i64),
    Punct(&'static str),
    Eof,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Ident(name) => write!(f, "'{}'", name),
            Tok::Number(value) => write!(f, "'{}'", value),
            Tok::Punct(p) => write!(f, "'{}'", p),
            Tok::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    line: usize,
    column: usize,
    start: usize,
    end: usize,
}

/// Byte offsets of line starts, for turning spans into `line:column`.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line and column (in characters) of a byte offset.
    fn position(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = source[line_start..offset].chars().count() + 1;
        (line, column)
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let lines = LineIndex::new(source);
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let (line, column) = lines.position(source, span.start);
        let error = |message: String| Error::Parse { line, column, message };

        let tok = match lexeme {
            Ok(Lexeme::Ident(name)) => Tok::Ident(name.to_string()),
            Ok(Lexeme::Number(text)) => {
                let value = text
                    .parse::<i64>()
                    .map_err(|_| error(format!("number '{}' is out of range", text)))?;
                Tok::Number(value)
            }
            Ok(Lexeme::Punct(p)) => Tok::Punct(p),
            Err(()) => return Err(error(format!("unexpected character '{}'", lexer.slice()))),
        };
        tokens.push(Token {
            tok,
            line,
            column,
            start: span.start,
            end: span.end,
        });
    }

    let (line, column) = lines.position(source, source.len());
    tokens.push(Token {
        tok: Tok::Eof,
        line,
        column,
        start: source.len(),
        end: source.len(),
    });
    Ok(tokens)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PropertyKind {
    Ltl,
    Ctl,
    Invar,
    Psl,
    Compute,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Ltl => "LTLSPEC",
            PropertyKind::Ctl => "CTLSPEC",
            PropertyKind::Invar => "INVARSPEC",
            PropertyKind::Psl => "PSLSPEC",
            PropertyKind::Compute => "COMPUTE",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub kind: PropertyKind,
    pub name: Option<String>,
    /// Parsed formula, wrapped in a [`Node::Context`]. Only LTL properties are parsed.
    pub formula: Option<Node>,
    /// Source text of the formula.
    pub text: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AssignTarget {
    /// `init(v) := ...`
    Init(String),
    /// `next(v) := ...`
    Next(String),
    /// `v := ...`
    Current(String),
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rhs {
    Expr(Node),
    /// Nondeterministic choice `{e1, ..., en}`.
    Set(Vec<Node>),
    /// `case c1 : rhs1; ... esac`, first matching branch wins.
    Case(Vec<(Node, Rhs)>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Assign {
    pub target: AssignTarget,
    pub rhs: Rhs,
}

/// Parsed `MODULE main`.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub state_vars: Vec<String>,
    pub input_vars: Vec<String>,
    pub init: Vec<Node>,
    pub invar: Vec<Node>,
    pub trans: Vec<Node>,
    pub assigns: Vec<Assign>,
    pub properties: Vec<Property>,
}

impl Model {
    pub fn is_declared(&self, name: &str) -> bool {
        self.state_vars.iter().chain(&self.input_vars).any(|v| v == name)
    }
}

pub fn parse_model(source: &str) -> Result<Model> {
    let tokens = tokenize(source)?;
    Parser::new(source, tokens).model()
}

/// Parse a standalone expression, e.g. a formula given on the command line.
pub fn parse_expression(source: &str) -> Result<Node> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(source, tokens);
    let expr = parser.expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    prev_end: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            prev_end: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + k).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.tok != Tok::Eof {
            self.pos += 1;
            self.prev_end = token.end;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> Error {
        let token = self.peek();
        Error::Parse {
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        self.error(format!("expected {}, found {}", expected, self.peek().tok))
    }

    fn is_punct(&self, p: &str) -> bool {
        matches!(self.peek().tok, Tok::Punct(q) if q == p)
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(&self.peek().tok, Tok::Ident(name) if name == kw)
    }

    fn at_section(&self) -> bool {
        matches!(&self.peek().tok, Tok::Ident(name) if SECTIONS.contains(&name.as_str()))
    }

    fn at_eof(&self) -> bool {
        self.peek().tok == Tok::Eof
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.is_punct(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.is_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> Result<()> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", p)))
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", kw)))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match &self.peek().tok {
            Tok::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn expect_eof(&self) -> Result<()> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn model(&mut self) -> Result<Model> {
        self.expect_keyword("MODULE")?;
        let name = self.expect_ident()?;
        if name != "main" {
            return Err(Error::UnsupportedSection(format!("MODULE {}", name)));
        }

        let mut model = Model::default();
        while !self.at_eof() {
            let section = self.expect_ident()?;
            match section.as_str() {
                "VAR" => self.declarations(&mut model, false)?,
                "IVAR" => self.declarations(&mut model, true)?,
                "INIT" => {
                    model.init.push(self.expr()?);
                    self.eat_punct(";");
                }
                "INVAR" => {
                    model.invar.push(self.expr()?);
                    self.eat_punct(";");
                }
                "TRANS" => {
                    model.trans.push(self.expr()?);
                    self.eat_punct(";");
                }
                "ASSIGN" => {
                    while !self.at_section() && !self.at_eof() {
                        model.assigns.push(self.assign()?);
                    }
                }
                "LTLSPEC" => model.properties.push(self.ltl_property()?),
                "SPEC" | "CTLSPEC" => model.properties.push(self.raw_property(PropertyKind::Ctl)),
                "INVARSPEC" => model.properties.push(self.raw_property(PropertyKind::Invar)),
                "PSLSPEC" => model.properties.push(self.raw_property(PropertyKind::Psl)),
                "COMPUTE" => model.properties.push(self.raw_property(PropertyKind::Compute)),
                "MODULE" => {
                    let name = self.expect_ident()?;
                    return Err(Error::UnsupportedSection(format!("MODULE {}", name)));
                }
                _ => return Err(Error::UnsupportedSection(section)),
            }
        }

        Ok(model)
    }

    fn declarations(&mut self, model: &mut Model, input: bool) -> Result<()> {
        while !self.at_section() && !self.at_eof() {
            let name = self.expect_ident()?;
            self.expect_punct(":")?;

            let start = self.peek().start;
            while !self.is_punct(";") && !self.at_eof() {
                self.advance();
            }
            let ty = self.source[start..self.prev_end.max(start)].trim().to_string();
            self.expect_punct(";")?;

            if ty != "boolean" {
                return Err(Error::UnsupportedType { name, ty });
            }
            if model.is_declared(&name) {
                return Err(Error::DuplicateVariable(name));
            }
            if input {
                model.input_vars.push(name);
            } else {
                model.state_vars.push(name);
            }
        }
        Ok(())
    }

    fn assign(&mut self) -> Result<Assign> {
        let target = if (self.is_keyword("init") || self.is_keyword("next")) && matches!(self.peek_at(1).tok, Tok::Punct("(")) {
            let wrapper = self.expect_ident()?;
            self.expect_punct("(")?;
            let name = self.expect_ident()?;
            self.expect_punct(")")?;
            if wrapper == "init" {
                AssignTarget::Init(name)
            } else {
                AssignTarget::Next(name)
            }
        } else {
            AssignTarget::Current(self.expect_ident()?)
        };
        self.expect_punct(":=")?;
        let rhs = self.rhs()?;
        self.expect_punct(";")?;
        Ok(Assign { target, rhs })
    }

    fn rhs(&mut self) -> Result<Rhs> {
        if self.eat_punct("{") {
            let mut items = vec![self.expr()?];
            while self.eat_punct(",") {
                items.push(self.expr()?);
            }
            self.expect_punct("}")?;
            Ok(Rhs::Set(items))
        } else if self.eat_keyword("case") {
            let mut branches = Vec::new();
            while !self.eat_keyword("esac") {
                let condition = self.expr()?;
                self.expect_punct(":")?;
                let value = self.rhs()?;
                self.expect_punct(";")?;
                branches.push((condition, value));
            }
            Ok(Rhs::Case(branches))
        } else {
            Ok(Rhs::Expr(self.expr()?))
        }
    }

    fn ltl_property(&mut self) -> Result<Property> {
        let name = if self.eat_keyword("NAME") {
            let name = self.expect_ident()?;
            self.expect_punct(":=")?;
            Some(name)
        } else {
            None
        };

        let start = self.peek().start;
        let expr = self.expr()?;
        let text = self.source[start..self.prev_end].trim().to_string();
        self.eat_punct(";");

        Ok(Property {
            kind: PropertyKind::Ltl,
            name,
            formula: Some(Node::context(None, expr)),
            text,
        })
    }

    fn raw_property(&mut self, kind: PropertyKind) -> Property {
        let start = self.peek().start;
        while !self.at_section() && !self.at_eof() {
            self.advance();
        }
        let text = self.source[start..self.prev_end.max(start)].trim().trim_end_matches(';').trim().to_string();
        Property {
            kind,
            name: None,
            formula: None,
            text,
        }
    }

    /// Entry point for expressions: `->` binds loosest.
    fn expr(&mut self) -> Result<Node> {
        let left = self.iff()?;
        if self.eat_punct("->") {
            let right = self.expr()?;
            Ok(Node::binary(Kind::Implies, left, right))
        } else {
            Ok(left)
        }
    }

    fn iff(&mut self) -> Result<Node> {
        let mut left = self.or()?;
        while self.eat_punct("<->") {
            let right = self.or()?;
            left = Node::binary(Kind::Iff, left, right);
        }
        Ok(left)
    }

    fn or(&mut self) -> Result<Node> {
        let mut left = self.and()?;
        loop {
            let kind = if self.eat_punct("|") {
                Kind::Or
            } else if self.eat_keyword("xor") {
                Kind::Xor
            } else if self.eat_keyword("xnor") {
                Kind::Xnor
            } else {
                return Ok(left);
            };
            let right = self.and()?;
            left = Node::binary(kind, left, right);
        }
    }

    fn and(&mut self) -> Result<Node> {
        let mut left = self.until()?;
        while self.eat_punct("&") {
            let right = self.until()?;
            left = Node::binary(Kind::And, left, right);
        }
        Ok(left)
    }

    fn until(&mut self) -> Result<Node> {
        let left = self.comparison()?;
        if self.eat_keyword("U") {
            let right = self.until()?;
            Ok(Node::binary(Kind::Until, left, right))
        } else {
            Ok(left)
        }
    }

    fn comparison(&mut self) -> Result<Node> {
        let mut left = self.unary()?;
        loop {
            let kind = match self.peek().tok {
                Tok::Punct("=") => Kind::Equal,
                Tok::Punct("!=") => Kind::NotEqual,
                Tok::Punct("<") => Kind::Less,
                Tok::Punct(">") => Kind::Greater,
                Tok::Punct("<=") => Kind::LessEqual,
                Tok::Punct(">=") => Kind::GreaterEqual,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = Node::binary(kind, left, right);
        }
    }

    fn unary(&mut self) -> Result<Node> {
        let kind = if self.is_punct("!") {
            Kind::Not
        } else if self.is_keyword("G") {
            Kind::Globally
        } else if self.is_keyword("F") {
            Kind::Eventually
        } else if self.is_keyword("X") {
            Kind::Next
        } else {
            return self.primary();
        };
        self.advance();
        let child = self.unary()?;
        Ok(Node::unary(kind, child))
    }

    fn primary(&mut self) -> Result<Node> {
        let token = self.peek().clone();
        match token.tok {
            Tok::Number(value) => {
                self.advance();
                Ok(Node::Number(value))
            }
            Tok::Punct("(") => {
                self.advance();
                let expr = self.expr()?;
                self.expect_punct(")")?;
                Ok(expr)
            }
            Tok::Ident(name) => match name.as_str() {
                "TRUE" => {
                    self.advance();
                    Ok(Node::True)
                }
                "FALSE" => {
                    self.advance();
                    Ok(Node::False)
                }
                "next" if matches!(self.peek_at(1).tok, Tok::Punct("(")) => {
                    self.advance();
                    self.advance();
                    let var = self.expect_ident()?;
                    self.expect_punct(")")?;
                    Ok(Node::NextVar(var))
                }
                "case" => {
                    self.advance();
                    self.case_expr()
                }
                "U" | "esac" | "xor" | "xnor" => Err(self.unexpected("expression")),
                _ if SECTIONS.contains(&name.as_str()) => Err(self.unexpected("expression")),
                _ => {
                    self.advance();
                    Ok(Node::Atom(name))
                }
            },
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `case` inside an expression, rewritten to nested if-then-else.
    fn case_expr(&mut self) -> Result<Node> {
        let mut branches = Vec::new();
        while !self.eat_keyword("esac") {
            let condition = self.expr()?;
            self.expect_punct(":")?;
            let value = self.expr()?;
            self.expect_punct(";")?;
            branches.push((condition, value));
        }

        // No matching branch: FALSE.
        let mut result = Node::False;
        for (condition, value) in branches.into_iter().rev() {
            result = if condition == Node::True {
                value
            } else {
                Node::or(
                    Node::and(condition.clone(), value),
                    Node::and(Node::not(condition), result),
                )
            };
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(text: &str) -> Node {
        parse_expression(text).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expr("a | b & c").to_string(), "(a | (b & c))");
        assert_eq!(expr("a -> b -> c").to_string(), "(a -> (b -> c))");
        assert_eq!(expr("a <-> b | c").to_string(), "(a <-> (b | c))");
        assert_eq!(expr("!a = b").to_string(), "(!a = b)");
        assert_eq!(expr("a U b U c").to_string(), "(a U (b U c))");
        assert_eq!(expr("a & b U c").to_string(), "(a & (b U c))");
        assert_eq!(expr("a xor b xnor c").to_string(), "((a xor b) xnor c)");
    }

    #[test]
    fn test_reactivity_shape() {
        let f = expr("G F (req & !busy) -> G F ack");
        assert_eq!(f.kind(), Kind::Implies);
        assert_eq!(f.to_string(), "(G F (req & !busy) -> G F ack)");
    }

    #[test]
    fn test_case_expression() {
        let f = expr("case a : b; TRUE : c; esac");
        assert_eq!(f.to_string(), "((a & b) | (!a & c))");
    }

    #[test]
    fn test_next_and_numbers() {
        assert_eq!(expr("next(x) = !x"), Node::binary(Kind::Equal, Node::NextVar("x".into()), Node::not(Node::atom("x"))));
        assert_eq!(expr("x = -3"), Node::binary(Kind::Equal, Node::atom("x"), Node::Number(-3)));
    }

    #[test]
    fn test_model() {
        let source = "
            -- toggling flag
            MODULE main
            VAR
              x : boolean;
              y : boolean;
            IVAR
              i : boolean;
            ASSIGN
              init(x) := FALSE;
              next(x) := case i : !x; TRUE : {TRUE, FALSE}; esac;
              y := x;
            TRANS TRUE
            LTLSPEC NAME p1 := G F x -> G F y;
            CTLSPEC AG x
            LTLSPEC G x
        ";
        let model = parse_model(source).unwrap();

        assert_eq!(model.state_vars, vec!["x", "y"]);
        assert_eq!(model.input_vars, vec!["i"]);
        assert_eq!(model.trans, vec![Node::True]);
        assert_eq!(model.assigns.len(), 3);
        assert_eq!(model.assigns[0].target, AssignTarget::Init("x".into()));
        assert_eq!(model.assigns[0].rhs, Rhs::Expr(Node::False));
        assert_eq!(model.assigns[2].target, AssignTarget::Current("y".into()));
        match &model.assigns[1].rhs {
            Rhs::Case(branches) => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[1].1, Rhs::Set(vec![Node::True, Node::False]));
            }
            other => panic!("unexpected rhs {:?}", other),
        }

        assert_eq!(model.properties.len(), 3);
        let p1 = &model.properties[0];
        assert_eq!(p1.kind, PropertyKind::Ltl);
        assert_eq!(p1.name.as_deref(), Some("p1"));
        assert_eq!(p1.text, "G F x -> G F y");
        assert_eq!(p1.formula.as_ref().unwrap().kind(), Kind::Context);

        let p2 = &model.properties[1];
        assert_eq!(p2.kind, PropertyKind::Ctl);
        assert_eq!(p2.text, "AG x");
        assert!(p2.formula.is_none());

        assert_eq!(model.properties[2].text, "G x");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_model("MODULE main VAR x : 0..3;"),
            Err(Error::UnsupportedType { name, ty }) if name == "x" && ty == "0..3"
        ));
        assert!(matches!(
            parse_model("MODULE main VAR x : boolean; IVAR x : boolean;"),
            Err(Error::DuplicateVariable(name)) if name == "x"
        ));
        assert!(matches!(
            parse_model("MODULE main DEFINE d := TRUE;"),
            Err(Error::UnsupportedSection(name)) if name == "DEFINE"
        ));
        assert!(matches!(parse_model("MODULE other"), Err(Error::UnsupportedSection(_))));
        assert!(matches!(
            parse_model("MODULE main\nINIT x &"),
            Err(Error::Parse { line: 2, column: 9, .. })
        ));
        assert!(matches!(parse_expression("a ? b"), Err(Error::Parse { line: 1, column: 3, .. })));
    }

    #[test]
    fn test_tokenize_spans() {
        let source = "x := -12; -- note\n  next(y)<->z";
        let tokens = tokenize(source).unwrap();
        let toks: Vec<&Tok> = tokens.iter().map(|t| &t.tok).collect();
        assert_eq!(
            toks,
            [
                &Tok::Ident("x".to_string()),
                &Tok::Punct(":="),
                &Tok::Number(-12),
                &Tok::Punct(";"),
                &Tok::Ident("next".to_string()),
                &Tok::Punct("("),
                &Tok::Ident("y".to_string()),
                &Tok::Punct(")"),
                &Tok::Punct("<->"),
                &Tok::Ident("z".to_string()),
                &Tok::Eof,
            ]
        );

        let next = &tokens[4];
        assert_eq!((next.line, next.column), (2, 3));
        assert_eq!(&source[next.start..next.end], "next");
        let iff = &tokens[8];
        assert_eq!((iff.line, iff.column), (2, 10));
        assert_eq!(tokens.last().unwrap().start, source.len());
    }

    #[test]
    fn test_tokenize_rejects_number_overflow() {
        assert!(matches!(
            tokenize("99999999999999999999"),
            Err(Error::Parse { line: 1, column: 1, message }) if message.contains("out of range")
        ));
    }
}
