use jmm_common::ir::{Element, Literal, Type};
use jmm_common::message::Span;

use super::Parser;
use crate::lex::Token;

impl Parser {
    /// ```abnf
    /// type  = "i32" / "bool" / "V" / "String"
    /// type =/ "array" "." type
    /// type =/ name
    /// ```
    pub fn parse_type(&mut self) -> Option<Type> {
        let (name, _) = self.expect_name("a type")?;
        let ty = match name.as_str() {
            "i32" => Type::Int32,
            "bool" => Type::Boolean,
            "V" => Type::Void,
            "String" => Type::String,
            "array" => {
                self.expect(Token::Dot, "`.` after `array`")?;
                Type::array_of(self.parse_type()?)
            }
            _ => Type::Object(name),
        };

        Some(ty)
    }

    /// ```abnf
    /// typed = "." type
    /// ```
    pub fn parse_typed(&mut self) -> Option<Type> {
        self.expect(Token::Dot, "`.` before a type")?;
        self.parse_type()
    }

    /// ```abnf
    /// element  = ["-"] number typed
    /// element =/ ("true" / "false") typed
    /// element =/ "this" [typed]
    /// element =/ [param "."] name ["[" element "]"] typed
    /// element =/ name                 ; a class
    /// ```
    pub fn parse_element(&mut self) -> Option<Element> {
        let start = self.span();

        if self.peek(Token::Minus) && self.peek_nth(1, Token::Number(0)) {
            self.advance();
            return self.parse_literal(true, start);
        }

        if self.peek(Token::Number(0)) {
            return self.parse_literal(false, start);
        }

        if (self.keyword("true") || self.keyword("false")) && self.peek_nth(1, Token::Dot) {
            let value = self.keyword("true");
            self.advance();
            let ty = self.parse_typed()?;
            return Some(Element::Literal {
                value: Literal::Bool(value),
                ty,
            });
        }

        if self.keyword("this") {
            self.advance();
            if self.peek(Token::Dot) {
                self.parse_typed()?;
            }
            return Some(Element::this());
        }

        if self.peek(Token::Param(0)) {
            self.advance();
            self.expect(Token::Dot, "`.` after a parameter index")?;
        }

        let (name, _) = self.expect_name("an operand")?;

        if self.consume(Token::LBracket) {
            let index = self.parse_element()?;
            self.expect(Token::RBracket, "`]`")?;
            let ty = self.parse_typed()?;
            return Some(Element::array(name, index, ty));
        }

        if self.peek(Token::Dot) {
            let ty = self.parse_typed()?;
            Some(Element::operand(name, ty))
        } else {
            Some(Element::class(name))
        }
    }

    fn parse_literal(&mut self, negative: bool, start: Span) -> Option<Element> {
        let Some((Token::Number(value), span)) = self.tokens.get(self.pos).cloned() else {
            let found = self.found();
            self.msgs.at(self.span()).parse_expected("a number", &found);
            return None;
        };

        self.advance();
        let ty = self.parse_typed()?;

        let text = if negative {
            format!("-{value}")
        } else {
            value.to_string()
        };

        let Ok(value) = text.parse::<i32>() else {
            self.msgs.at(start + span).parse_literal_out_of_range(&text);
            return None;
        };

        let value = match ty {
            Type::Boolean => Literal::Bool(value != 0),
            _ => Literal::Int(value),
        };

        Some(Element::Literal { value, ty })
    }
}
