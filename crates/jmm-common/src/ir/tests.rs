use super::{
    Assign, BinaryOp, Branch, CfgError, Condition, Element, InstId, InstructionKind, MethodBuilder,
    Operation, Return, Successor, Type, VarScope,
};

fn assign(dest: &str, rhs: InstructionKind) -> InstructionKind {
    InstructionKind::Assign(Assign {
        dest: Element::operand(dest, Type::Int32),
        ty: Type::Int32,
        rhs: Box::new(rhs),
    })
}

fn var(name: &str) -> Element {
    Element::operand(name, Type::Int32)
}

#[test]
fn var_table_order() {
    let mut builder = MethodBuilder::new("f", Type::Int32);
    builder.param("a", Type::Int32);
    builder.push(assign(
        "b",
        InstructionKind::BinaryOp(BinaryOp {
            op: Operation::Add,
            left: var("a"),
            right: var("c"),
        }),
    ));
    builder.push(InstructionKind::Return(Return {
        value: Some(var("b")),
        ty: Type::Int32,
    }));

    let method = builder.build().unwrap();

    assert_eq!(Some(0), method.register("this"));
    assert_eq!(Some(1), method.register("a"));
    assert_eq!(Some(2), method.register("b"));
    assert_eq!(Some(3), method.register("c"));
    assert_eq!(VarScope::Parameter, method.descriptor("a").unwrap().scope);
    assert_eq!(VarScope::Local, method.descriptor("b").unwrap().scope);
}

#[test]
fn static_methods_have_no_this() {
    let mut builder = MethodBuilder::new("main", Type::Void);
    builder
        .is_static(true)
        .param("args", Type::array_of(Type::String));
    builder.push(assign("i", InstructionKind::NoOp(Element::int(0))));

    let method = builder.build().unwrap();

    assert_eq!(None, method.register("this"));
    assert_eq!(Some(0), method.register("args"));
    assert_eq!(Some(1), method.register("i"));
}

#[test]
fn array_elements_declare_array_and_index() {
    let mut builder = MethodBuilder::new("g", Type::Void);
    builder.push(InstructionKind::Assign(Assign {
        dest: Element::array("arr", var("i"), Type::Int32),
        ty: Type::Int32,
        rhs: Box::new(InstructionKind::NoOp(Element::int(1))),
    }));

    let method = builder.build().unwrap();

    assert_eq!(
        Type::array_of(Type::Int32),
        method.descriptor("arr").unwrap().ty
    );
    assert_eq!(Some(2), method.register("i"));
}

#[test]
fn class_operands_are_not_variables() {
    let mut builder = MethodBuilder::new("h", Type::Void);
    builder.push(InstructionKind::Call(super::Call {
        invocation: super::Invocation::Static,
        target: Element::class("io"),
        method: Some("println".into()),
        args: vec![var("x")],
        ret: Type::Void,
    }));

    let method = builder.build().unwrap();

    assert_eq!(None, method.register("io"));
    assert_eq!(Some(1), method.register("x"));
}

#[test]
fn successors() {
    let mut builder = MethodBuilder::new("loop", Type::Void);
    builder.label("top");
    builder.push(InstructionKind::Branch(Branch {
        condition: Condition::Binary(BinaryOp {
            op: Operation::Ge,
            left: var("i"),
            right: Element::int(10),
        }),
        label: "done".into(),
    }));
    builder.push(assign(
        "i",
        InstructionKind::BinaryOp(BinaryOp {
            op: Operation::Add,
            left: var("i"),
            right: Element::int(1),
        }),
    ));
    builder.push(InstructionKind::Goto("top".into()));
    builder.label("done");
    builder.push(InstructionKind::Return(Return {
        value: None,
        ty: Type::Void,
    }));

    let method = builder.build().unwrap();

    let succs = |id: usize| method.instruction(InstId(id)).successors.clone();
    assert_eq!(
        vec![
            Successor::Instruction(InstId(4)),
            Successor::Instruction(InstId(2))
        ],
        succs(1)
    );
    assert_eq!(vec![Successor::Instruction(InstId(3))], succs(2));
    assert_eq!(vec![Successor::Instruction(InstId(1))], succs(3));
    assert_eq!(vec![Successor::End], succs(4));
    assert_eq!(Some(InstId(4)), method.label("done"));
}

#[test]
fn last_instruction_falls_to_end() {
    let mut builder = MethodBuilder::constructor();
    builder.push(assign("x", InstructionKind::NoOp(Element::int(1))));

    let method = builder.build().unwrap();

    assert!(method.is_constructor);
    assert_eq!(vec![Successor::End], method.instructions[0].successors);
}

#[test]
fn unknown_label() {
    let mut builder = MethodBuilder::new("f", Type::Void);
    builder.push(InstructionKind::Goto("nowhere".into()));

    assert_eq!(
        CfgError::UnknownLabel {
            method: "f".into(),
            label: "nowhere".into()
        },
        builder.build().unwrap_err()
    );
}

#[test]
fn duplicate_label() {
    let mut builder = MethodBuilder::new("f", Type::Void);
    builder.label("a");
    builder.push(InstructionKind::NoOp(Element::int(0)));
    builder.label("a");
    builder.push(InstructionKind::NoOp(Element::int(0)));

    assert!(matches!(
        builder.build(),
        Err(CfgError::DuplicateLabel { .. })
    ));
}

#[test]
fn dangling_label() {
    let mut builder = MethodBuilder::new("f", Type::Void);
    builder.push(InstructionKind::NoOp(Element::int(0)));
    builder.label("end");

    assert!(matches!(builder.build(), Err(CfgError::DanglingLabel { .. })));
}

#[test]
fn display_in_ollir_notation() {
    let kind = assign(
        "b",
        InstructionKind::BinaryOp(BinaryOp {
            op: Operation::Add,
            left: var("a"),
            right: Element::int(1),
        }),
    );

    assert_eq!("b.i32 :=.i32 a.i32 +.i32 1.i32", kind.to_string());
}
