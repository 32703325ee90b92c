use std::collections::HashMap;

use jmm_common::ir::{AccessModifier, CfgError, ClassUnit, Field, Method, MethodBuilder, Type};
use jmm_common::message::Span;
use log::debug;

use super::matcher::Keyword;
use super::Parser;
use crate::lex::Token;

/// The modifiers written before a field or method name.
#[derive(Debug, Default)]
struct Modifiers {
    access: AccessModifier,
    is_static: bool,
    is_final: bool,
}

impl Parser {
    /// ```abnf
    /// program = *import class
    /// ```
    pub fn parse_program(&mut self) -> Option<ClassUnit> {
        let mut imports = Vec::new();
        while self.keyword("import") {
            self.advance();
            match self.parse_import() {
                Some(import) => imports.push(import),
                None => self.recover(),
            }
        }

        let mut class = self.parse_class()?;
        class.imports = imports;

        if !self.is_done() {
            let found = self.found();
            self.msgs.at(self.span()).parse_expected("end of input", &found);
        }

        Some(class)
    }

    /// ```abnf
    /// import = "import" name *("." name) ";"
    /// ```
    fn parse_import(&mut self) -> Option<String> {
        let (mut path, _) = self.expect_name("an import path")?;
        while self.consume(Token::Dot) {
            let (part, _) = self.expect_name("an import path")?;
            path.push('.');
            path.push_str(&part);
        }

        self.expect(Token::Semicolon, "`;` after an import")?;
        Some(path)
    }

    /// ```abnf
    /// class = [access] name ["extends" name] "{" *member "}"
    /// ```
    fn parse_class(&mut self) -> Option<ClassUnit> {
        let access = self.parse_access().unwrap_or(AccessModifier::Public);
        let (name, _) = self.expect_name("a class name")?;

        let mut class = ClassUnit::new(name);
        class.access = access;

        if self.keyword("extends") {
            self.advance();
            let (super_class, _) = self.expect_name("a superclass name")?;
            class.super_class = Some(super_class);
        }

        self.expect(Token::LBrace, "`{` to open the class body")?;

        while !self.is_done() && !self.peek(Token::RBrace) {
            let Some(start) = self.expect(Token::Dot, "a `.field`, `.method` or `.construct`")
            else {
                self.recover();
                continue;
            };

            if self.keyword("field") {
                self.advance();
                match self.parse_field() {
                    Some(field) => class.fields.push(field),
                    None => self.recover(),
                }
            } else if self.keyword("method") || self.keyword("construct") {
                let is_constructor = self.keyword("construct");
                self.advance();
                if let Some(method) = self.parse_method(is_constructor, start) {
                    class.methods.push(method);
                }
            } else {
                let found = self.found();
                self.msgs
                    .at(self.span())
                    .parse_expected("`field`, `method` or `construct`", &found);
                self.recover();
            }
        }

        self.expect(Token::RBrace, "`}` to close the class body")?;

        debug!(
            "read class `{}` with {} fields and {} methods",
            class.name,
            class.fields.len(),
            class.methods.len()
        );

        Some(class)
    }

    fn parse_access(&mut self) -> Option<AccessModifier> {
        let access = if self.keyword("public") {
            AccessModifier::Public
        } else if self.keyword("private") {
            AccessModifier::Private
        } else if self.keyword("protected") {
            AccessModifier::Protected
        } else if self.keyword("default") {
            AccessModifier::Default
        } else {
            return None;
        };

        self.advance();
        Some(access)
    }

    /// Parse modifiers for as long as the name after them is followed by
    /// `next`.
    fn parse_modifiers(&mut self, next: Token) -> Modifiers {
        let mut modifiers = Modifiers::default();

        while self.peek(Token::Name(String::new())) && !self.peek_nth(1, next.clone()) {
            if let Some(access) = self.parse_access() {
                modifiers.access = access;
            } else if self.consume(Keyword("static")) {
                modifiers.is_static = true;
            } else if self.consume(Keyword("final")) {
                modifiers.is_final = true;
            } else {
                break;
            }
        }

        modifiers
    }

    /// ```abnf
    /// field = "." "field" *modifier name typed ";"
    /// ```
    fn parse_field(&mut self) -> Option<Field> {
        let modifiers = self.parse_modifiers(Token::Dot);
        let (name, _) = self.expect_name("a field name")?;
        let ty = self.parse_typed()?;
        self.expect(Token::Semicolon, "`;` after a field")?;

        Some(Field {
            name,
            ty,
            access: modifiers.access,
            is_static: modifiers.is_static,
            is_final: modifiers.is_final,
        })
    }

    /// ```abnf
    /// method  = "." "method" *modifier name params typed body
    /// method =/ "." "construct" name params typed body
    /// params  = "(" [name typed *("," name typed)] ")"
    /// body    = "{" *stmt "}"
    /// ```
    fn parse_method(&mut self, is_constructor: bool, start: Span) -> Option<Method> {
        let modifiers = self.parse_modifiers(Token::LParen);
        let Some((name, name_span)) = self.expect_name("a method name") else {
            self.skip_block();
            return None;
        };

        let mut builder = if is_constructor {
            MethodBuilder::constructor()
        } else {
            MethodBuilder::new(name, Type::Void)
        };

        builder
            .access(if is_constructor {
                AccessModifier::Public
            } else {
                modifiers.access
            })
            .is_static(modifiers.is_static)
            .is_final(modifiers.is_final);

        let header = self.parse_signature(&mut builder);
        let Some(ret) = header else {
            self.skip_block();
            return None;
        };

        if !is_constructor {
            builder.returns(ret);
        }

        if self.expect(Token::LBrace, "`{` to open the method body").is_none() {
            self.skip_block();
            return None;
        }

        let mut labels = HashMap::new();
        while !self.is_done() && !self.peek(Token::RBrace) {
            if self.parse_stmt(&mut builder, &mut labels).is_none() {
                self.recover();
            }
        }

        self.expect(Token::RBrace, "`}` to close the method body");

        match builder.build() {
            Ok(method) => Some(method),
            Err(err) => {
                let span = |label: &str| labels.get(label).copied().unwrap_or(start + name_span);
                match &err {
                    CfgError::UnknownLabel { method, label } => {
                        self.msgs.at(span(label)).parse_unknown_label(method, label)
                    }
                    CfgError::DuplicateLabel { method, label } => {
                        self.msgs.at(span(label)).parse_duplicate_label(method, label)
                    }
                    CfgError::DanglingLabel { method, label } => {
                        self.msgs.at(span(label)).parse_dangling_label(method, label)
                    }
                }

                None
            }
        }
    }

    fn parse_signature(&mut self, builder: &mut MethodBuilder) -> Option<Type> {
        self.expect(Token::LParen, "`(` to open the parameter list")?;

        if !self.peek(Token::RParen) {
            loop {
                let (name, _) = self.expect_name("a parameter name")?;
                let ty = self.parse_typed()?;
                builder.param(name, ty);

                if !self.consume(Token::Comma) {
                    break;
                }
            }
        }

        self.expect(Token::RParen, "`)` to close the parameter list")?;
        self.parse_typed()
    }

    /// Skip to just after the closing brace of the current block.
    fn skip_block(&mut self) {
        while !self.is_done() && !self.consume(Token::LBrace) {
            if self.peek(Token::RBrace) {
                return;
            }
            self.advance();
        }

        let mut depth = 1;
        while !self.is_done() && depth > 0 {
            if self.consume(Token::LBrace) {
                depth += 1;
            } else if self.consume(Token::RBrace) {
                depth -= 1;
            } else {
                self.advance();
            }
        }
    }
}
