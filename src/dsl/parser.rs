//! Parser for the netlist format.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::circuit::PinRef;
use crate::components::ComponentKind;
use crate::error::{LogicError, Result};

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {}
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let decl = self.parse_component()?;
                    ast.components.push(decl);
                }
                _ => {
                    return Err(LogicError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(LogicError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(LogicError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_directive(&mut self, ast: &mut NetlistAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".wire" => {
                let from = self.parse_endpoint()?;
                let to = self.parse_endpoint()?;
                ast.wires.push(WireDecl { from, to, line });
            }
            ".select" => {
                let id = self.expect(TokenKind::Identifier)?;
                ast.selected = Some(id.text);
            }
            _ => {
                return Err(LogicError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// `id` or `id:pin`
    fn parse_endpoint(&mut self) -> Result<PinRef> {
        let id = self.expect(TokenKind::Identifier)?;
        let mut pin = 0;
        if self.current.kind == TokenKind::Colon {
            self.advance()?;
            let tok = self.expect(TokenKind::Number)?;
            pin = tok.text.parse::<usize>().map_err(|_| {
                LogicError::parse(tok.line, format!("invalid pin index: {}", tok.text))
            })?;
        }
        Ok(PinRef::new(id.text, pin))
    }

    fn parse_component(&mut self) -> Result<ComponentDecl> {
        let type_tok = self.expect(TokenKind::Identifier)?;
        let line = type_tok.line;
        let kind = ComponentKind::from_name(&type_tok.text).ok_or_else(|| {
            LogicError::parse(line, format!("unknown component type: {}", type_tok.text))
        })?;
        let id = self.expect(TokenKind::Identifier)?.text;

        let mut decl = ComponentDecl {
            kind,
            id,
            x: 0.0,
            y: 0.0,
            label: None,
            value: None,
            line,
        };

        // Optional position
        if self.current.kind == TokenKind::Number {
            decl.x = self.parse_number()?;
            decl.y = self.parse_number()?;
        }

        // key=value parameters until end of line
        while self.current.kind == TokenKind::Identifier {
            let key = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Equals)?;
            let value = self.current.clone();
            if !matches!(
                value.kind,
                TokenKind::Identifier | TokenKind::Number | TokenKind::Str
            ) {
                return Err(LogicError::parse(line, format!("missing value for '{}'", key)));
            }
            self.advance()?;

            match key.to_lowercase().as_str() {
                "label" => decl.label = Some(value.text),
                "value" => decl.value = Some(parse_bool(&value.text, line)?),
                _ => {
                    return Err(LogicError::parse(line, format!("unknown parameter: {}", key)));
                }
            }
        }

        Ok(decl)
    }

    fn parse_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        tok.text
            .parse::<f64>()
            .map_err(|_| LogicError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }
}

/// Parse a logic level: `1`/`0`, `true`/`false`, `high`/`low`.
pub fn parse_bool(text: &str, line: usize) -> Result<bool> {
    match text.to_lowercase().as_str() {
        "1" | "true" | "high" | "on" => Ok(true),
        "0" | "false" | "low" | "off" => Ok(false),
        _ => Err(LogicError::parse(line, format!("invalid logic level: {}", text))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_parse_component() {
        let ast = parse("INPUT a 10 -20 value=1 label=\"A in\"").unwrap();
        assert_eq!(
            ast.components,
            vec![ComponentDecl {
                kind: ComponentKind::Input,
                id: "a".into(),
                x: 10.0,
                y: -20.0,
                label: Some("A in".into()),
                value: Some(true),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_parse_position_optional() {
        let ast = parse("half_adder ha\nOUTPUT s label=sum").unwrap();
        assert_eq!(ast.components[0].kind, ComponentKind::HalfAdder);
        approx::assert_relative_eq!(ast.components[0].x, 0.0);
        assert_eq!(ast.components[1].label.as_deref(), Some("sum"));
        assert_eq!(ast.components[1].line, 2);
    }

    #[test]
    fn test_parse_wires_and_select() {
        let input = "INPUT a\nNOT n\n.wire a n\n.wire n:0 out:2\n.select n\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.wires.len(), 2);
        assert_eq!(ast.wires[0].from, PinRef::new("a", 0));
        assert_eq!(ast.wires[0].to, PinRef::new("n", 0));
        assert_eq!(ast.wires[1].to, PinRef::new("out", 2));
        assert_eq!(ast.wires[1].line, 4);
        assert_eq!(ast.selected.as_deref(), Some("n"));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# This is a comment\nAND g ; inline comment style\n\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            "LATCH l1",
            "AND",
            "AND g 10",
            "AND g speed=3",
            "INPUT a value=maybe",
            ".wire a:x b",
            ".route a b",
            "AND g 1 2 3",
        ];
        for input in cases {
            assert!(
                matches!(parse(input), Err(LogicError::ParseError { .. })),
                "expected parse error for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("HIGH", 1).unwrap());
        assert!(!parse_bool("0", 1).unwrap());
        assert!(parse_bool("2", 1).is_err());
    }
}
