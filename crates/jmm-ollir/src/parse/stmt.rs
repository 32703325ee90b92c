use std::collections::HashMap;

use jmm_common::ir::{
    Assign, BinaryOp, Branch, Call, Condition, Element, GetField, InstructionKind, Invocation,
    MethodBuilder, Operation, PutField, Return, UnaryOp,
};
use jmm_common::message::Span;

use super::Parser;
use crate::lex::Token;

impl Parser {
    /// ```abnf
    /// stmt  = name ":"
    /// stmt =/ "goto" name ";"
    /// stmt =/ "if" "(" rhs ")" "goto" name ";"
    /// stmt =/ "ret" typed [element] ";"
    /// stmt =/ call ";"
    /// stmt =/ element ":=" typed rhs ";"
    /// ```
    ///
    /// Label definitions and uses are recorded in `labels` so that control
    /// flow errors can point somewhere useful.
    pub fn parse_stmt(
        &mut self,
        builder: &mut MethodBuilder,
        labels: &mut HashMap<String, Span>,
    ) -> Option<()> {
        if self.peek(Token::Name(String::new())) && self.peek_nth(1, Token::Colon) {
            let (label, span) = self.expect_name("a label")?;
            self.advance();
            labels.insert(label.clone(), span);
            builder.label(label);
            return Some(());
        }

        let kind = if self.keyword("goto") && self.peek_nth(1, Token::Name(String::new())) {
            self.advance();
            InstructionKind::Goto(self.parse_label_use(labels)?)
        } else if self.keyword("if") && self.peek_nth(1, Token::LParen) {
            self.advance();
            self.advance();
            let start = self.span();
            let condition = match self.parse_rhs()? {
                InstructionKind::NoOp(element) => Condition::Single(element),
                InstructionKind::UnaryOp(unary) => Condition::Unary(unary),
                InstructionKind::BinaryOp(binary) => Condition::Binary(binary),
                _ => {
                    self.msgs
                        .at(start)
                        .parse_expected("a condition", "a call");
                    return None;
                }
            };

            self.expect(Token::RParen, "`)` after the condition")?;
            self.expect_keyword("goto")?;
            let label = self.parse_label_use(labels)?;
            InstructionKind::Branch(Branch { condition, label })
        } else if self.keyword("ret") && self.peek_nth(1, Token::Dot) {
            self.advance();
            let ty = self.parse_typed()?;
            let value = if self.peek(Token::Semicolon) {
                None
            } else {
                Some(self.parse_element()?)
            };

            InstructionKind::Return(Return { value, ty })
        } else if self.peek(Token::Name(String::new())) && self.peek_nth(1, Token::LParen) {
            self.parse_call()?
        } else {
            self.parse_assign()?
        };

        self.expect(Token::Semicolon, "`;` after a statement")?;
        builder.push(kind);
        Some(())
    }

    fn parse_label_use(&mut self, labels: &mut HashMap<String, Span>) -> Option<String> {
        let (label, span) = self.expect_name("a label")?;
        labels.entry(label.clone()).or_insert(span);
        Some(label)
    }

    fn parse_assign(&mut self) -> Option<InstructionKind> {
        let start = self.span();
        let dest = self.parse_element()?;
        if dest.name().is_none() {
            self.msgs
                .at(start)
                .parse_expected("a variable to assign to", &dest.to_string());
            return None;
        }

        self.expect(Token::ColonEqual, "`:=`")?;
        let ty = self.parse_typed()?;
        let rhs = self.parse_rhs()?;

        Some(InstructionKind::Assign(Assign {
            dest,
            ty,
            rhs: Box::new(rhs),
        }))
    }

    /// ```abnf
    /// rhs  = "!" typed element
    /// rhs =/ call
    /// rhs =/ element [op typed element]
    /// ```
    fn parse_rhs(&mut self) -> Option<InstructionKind> {
        if self.consume(Token::Bang) {
            self.parse_typed()?;
            let operand = self.parse_element()?;
            return Some(InstructionKind::UnaryOp(UnaryOp {
                op: Operation::Not,
                operand,
            }));
        }

        if self.peek(Token::Name(String::new())) && self.peek_nth(1, Token::LParen) {
            return self.parse_call();
        }

        let left = self.parse_element()?;
        let Some(op) = self.binary_op() else {
            return Some(InstructionKind::NoOp(left));
        };

        self.advance();
        self.parse_typed()?;
        let right = self.parse_element()?;

        Some(InstructionKind::BinaryOp(BinaryOp { op, left, right }))
    }

    fn binary_op(&self) -> Option<Operation> {
        let op = match self.tokens.get(self.pos).map(|(tok, _)| tok)? {
            Token::Plus => Operation::Add,
            Token::Minus => Operation::Sub,
            Token::Star => Operation::Mul,
            Token::Slash => Operation::Div,
            Token::AndAnd => Operation::And,
            Token::PipePipe => Operation::Or,
            Token::Less => Operation::Lt,
            Token::Greater => Operation::Gt,
            Token::LessEqual => Operation::Le,
            Token::GreaterEqual => Operation::Ge,
            Token::EqualEqual => Operation::Eq,
            Token::BangEqual => Operation::Ne,
            _ => return None,
        };

        Some(op)
    }

    /// ```abnf
    /// call  = ("invokevirtual" / "invokestatic" / "invokespecial")
    ///         "(" element "," string *("," element) ")" typed
    /// call =/ "new" "(" element *("," element) ")" typed
    /// call =/ "arraylength" "(" element ")" typed
    /// call =/ "getfield" "(" element "," element ")" typed
    /// call =/ "putfield" "(" element "," element "," element ")" typed
    /// ```
    fn parse_call(&mut self) -> Option<InstructionKind> {
        let (name, span) = self.expect_name("an invocation")?;
        self.expect(Token::LParen, "`(`")?;

        let invocation = match name.as_str() {
            "invokevirtual" => Invocation::Virtual,
            "invokestatic" => Invocation::Static,
            "invokespecial" => Invocation::Special,
            "new" => Invocation::New,
            "arraylength" => Invocation::ArrayLength,

            "getfield" => {
                let object = self.parse_element()?;
                self.expect(Token::Comma, "`,` after the object")?;
                let field = self.parse_element()?;
                self.expect(Token::RParen, "`)`")?;
                let ty = self.parse_typed()?;
                return Some(InstructionKind::GetField(GetField { object, field, ty }));
            }

            "putfield" => {
                let object = self.parse_element()?;
                self.expect(Token::Comma, "`,` after the object")?;
                let field = self.parse_element()?;
                self.expect(Token::Comma, "`,` after the field")?;
                let value = self.parse_element()?;
                self.expect(Token::RParen, "`)`")?;
                self.parse_typed()?;
                return Some(InstructionKind::PutField(PutField {
                    object,
                    field,
                    value,
                }));
            }

            _ => {
                self.msgs.at(span).parse_unknown_invocation(&name);
                return None;
            }
        };

        let target = self.parse_element()?;

        let method = match invocation {
            Invocation::Virtual | Invocation::Static | Invocation::Special => {
                self.expect(Token::Comma, "`,` after the call target")?;
                Some(self.expect_str("a method name")?)
            }
            Invocation::New | Invocation::ArrayLength => None,
        };

        let mut args: Vec<Element> = Vec::new();
        while self.consume(Token::Comma) {
            args.push(self.parse_element()?);
        }

        self.expect(Token::RParen, "`)` to close the argument list")?;
        let ret = self.parse_typed()?;

        Some(InstructionKind::Call(Call {
            invocation,
            target,
            method,
            args,
            ret,
        }))
    }

    fn expect_str(&mut self, expected: &str) -> Option<String> {
        match self.tokens.get(self.pos) {
            Some((Token::Str(value), _)) => {
                let value = value.clone();
                self.advance();
                Some(value)
            }

            _ => {
                let found = self.found();
                self.msgs.at(self.span()).parse_expected(expected, &found);
                None
            }
        }
    }
}
