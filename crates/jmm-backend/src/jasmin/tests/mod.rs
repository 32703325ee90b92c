
use jmm_common::ir::{
    ClassUnit, Element, Field, InstructionKind, Literal, MethodBuilder, Return, Type,
};
use jmm_common::BufferedDriver;
use jmm_midend::{allocate, RegisterBudget};

use self::sim::{Line, Listing};
use super::repr::{Comparison, Instruction, Invoke, InvokeKind, Item};
use super::{emit, generate, max_stack, EmitError, Frame};

const SAMPLE: &str = r#"
import io;
import java.util.List;

Sample extends List {
    .field private count.i32;
    .field public static total.i32;

    .construct Sample().V {
        invokespecial(this, "<init>").V;
    }

    .method public f(a.i32).i32 {
        b.i32 :=.i32 $1.a.i32 +.i32 1.i32;
        ret.i32 b.i32;
    }

    .method public get().i32 {
        c.i32 :=.i32 getfield(this, count.i32).i32;
        ret.i32 c.i32;
    }

    .method public set(x.i32).V {
        putfield(this, count.i32, $1.x.i32).V;
        ret.V;
    }

    .method public touch().V {
        invokevirtual(this, "get").i32;
        ret.V;
    }

    .method public less(x.i32, y.i32).bool {
        b.bool :=.bool $1.x.i32 <.bool $2.y.i32;
        ret.bool b.bool;
    }

    .method public logic(a.bool, b.bool).bool {
        c.bool :=.bool $1.a.bool &&.bool $2.b.bool;
        d.bool :=.bool !.bool c.bool;
        if (d.bool) goto yes;
        if (!.bool c.bool) goto yes;
        ret.bool c.bool;
    yes:
        ret.bool d.bool;
    }

    .method public static arrays(i.i32).i32 {
        arr.array.i32 :=.array.i32 new(array, 3.i32).array.i32;
        arr[i.i32].i32 :=.i32 5.i32;
        x.i32 :=.i32 arr[i.i32].i32;
        n.i32 :=.i32 arraylength(arr.array.i32).i32;
        ret.i32 n.i32;
    }

    .method public static main(args.array.String).V {
        s.Sample :=.Sample new(Sample).Sample;
        invokespecial(s.Sample, "<init>").V;
        i.i32 :=.i32 0.i32;
    loop:
        if (i.i32 >=.bool 10.i32) goto end;
        invokestatic(io, "println", i.i32).V;
        i.i32 :=.i32 i.i32 +.i32 1.i32;
        goto loop;
    end:
        ret.V;
    }
}
"#;

fn class(src: &str) -> ClassUnit {
    let mut driver = BufferedDriver::new();
    let class = jmm_ollir::read(&mut driver, src, 0);
    assert!(driver.messages.is_empty(), "{:?}", driver.messages);
    class.unwrap()
}

fn listings(src: &str) -> (String, Vec<Listing>) {
    let code = emit(&class(src)).unwrap();
    let methods = sim::methods(&code);
    (code, methods)
}

fn listing<'a>(methods: &'a [Listing], name: &str) -> &'a Listing {
    let prefix = format!("{name}(");
    methods
        .iter()
        .find(|listing| listing.header.split_whitespace().last().unwrap().starts_with(&prefix))
        .unwrap_or_else(|| panic!("no method `{name}`"))
}

fn assert_contains_seq(haystack: &[&str], needle: &[&str]) {
    assert!(
        haystack.windows(needle.len()).any(|window| window == needle),
        "{needle:?} not in {haystack:?}"
    );
}

fn method_class(name: &str, builder: MethodBuilder) -> ClassUnit {
    let mut class = ClassUnit::new(name);
    class.methods.push(builder.build().unwrap());
    class
}

#[test]
fn class_header() {
    let (code, _) = listings(SAMPLE);
    let lines: Vec<_> = code.lines().collect();

    assert_eq!(lines[0], ".class public Sample");
    assert_eq!(lines[1], ".super java/util/List");
    assert!(lines.contains(&".field private count I"));
    assert!(lines.contains(&".field public static total I"));
    assert!(lines.contains(&".method public <init>()V"));
    assert!(lines.contains(&".method public f(I)I"));
    assert!(lines.contains(&".method public static main([Ljava/lang/String;)V"));
    assert!(lines.contains(&".end method"));
}

#[test]
fn super_constructor_and_implicit_return() {
    let (_, methods) = listings(SAMPLE);
    let init = listing(&methods, "<init>");

    assert_eq!(
        init.instructions(),
        vec!["aload_0", "invokespecial java/util/List/<init>()V", "return"]
    );
    assert_eq!(init.stack, 1);
    assert_eq!(init.locals, 1);
}

#[test]
fn stack_limits_are_sound() {
    let (_, methods) = listings(SAMPLE);
    assert!(!methods.is_empty());

    for method in methods.iter() {
        assert_eq!(
            sim::max_depth(method),
            method.stack,
            "wrong stack limit for {}",
            method.header
        );
    }
}

#[test]
fn literal_boundaries() {
    let src = r#"
    Literals {
        .method public static values().V {
            a.i32 :=.i32 -1.i32;
            a.i32 :=.i32 5.i32;
            a.i32 :=.i32 6.i32;
            a.i32 :=.i32 127.i32;
            a.i32 :=.i32 128.i32;
            a.i32 :=.i32 32768.i32;
            a.i32 :=.i32 -129.i32;
            t.bool :=.bool true.bool;
            ret.V;
        }
    }
    "#;

    let (_, methods) = listings(src);
    let insts = listing(&methods, "values").instructions();

    assert_eq!(
        insts,
        vec![
            "iconst_m1",
            "istore_0",
            "iconst_5",
            "istore_0",
            "bipush 6",
            "istore_0",
            "bipush 127",
            "istore_0",
            "sipush 128",
            "istore_0",
            "ldc 32768",
            "istore_0",
            "sipush -129",
            "istore_0",
            "iconst_1",
            "istore_1",
            "return",
        ]
    );
}

#[test]
fn increments_fold_into_iinc() {
    let src = r#"
    Counter {
        .method public small(a.i32).V {
            x.i32 :=.i32 $1.a.i32;
            x.i32 :=.i32 x.i32 +.i32 5.i32;
            x.i32 :=.i32 1.i32 +.i32 x.i32;
            x.i32 :=.i32 x.i32 -.i32 3.i32;
            ret.V;
        }

        .method public big(a.i32).V {
            x.i32 :=.i32 $1.a.i32;
            x.i32 :=.i32 x.i32 +.i32 200.i32;
            x.i32 :=.i32 3.i32 -.i32 x.i32;
            ret.V;
        }
    }
    "#;

    let (_, methods) = listings(src);

    let small = listing(&methods, "small").instructions();
    assert_eq!(
        small,
        vec!["iload_1", "istore_2", "iinc 2 5", "iinc 2 1", "iinc 2 -3", "return"]
    );

    let big = listing(&methods, "big").instructions();
    assert!(!big.iter().any(|inst| inst.starts_with("iinc")));
    assert_contains_seq(&big, &["iload_2", "sipush 200", "iadd", "istore_2"]);
    assert_contains_seq(&big, &["iconst_3", "iload_2", "isub", "istore_2"]);
}

#[test]
fn increment_range_limits() {
    let src = r#"
    Counter {
        .method public limits(a.i32).V {
            x.i32 :=.i32 $1.a.i32;
            x.i32 :=.i32 x.i32 +.i32 127.i32;
            x.i32 :=.i32 x.i32 +.i32 128.i32;
            x.i32 :=.i32 x.i32 -.i32 128.i32;
            x.i32 :=.i32 x.i32 -.i32 -128.i32;
            ret.V;
        }
    }
    "#;

    let (_, methods) = listings(src);
    let insts = listing(&methods, "limits").instructions();

    assert_eq!(
        insts,
        vec![
            "iload_1",
            "istore_2",
            "iinc 2 127",
            "iload_2",
            "sipush 128",
            "iadd",
            "istore_2",
            "iinc 2 -128",
            "iload_2",
            "bipush -128",
            "isub",
            "istore_2",
            "return",
        ]
    );
}

#[test]
fn comparisons_against_zero() {
    let src = r#"
    Compare {
        .method public static cmp(x.i32, y.i32).V {
            if ($1.x.i32 <.bool 0.i32) goto out;
            if (0.i32 <.bool $1.x.i32) goto out;
            if ($1.x.i32 <.bool $2.y.i32) goto out;
            if ($1.x.i32 ==.bool 0.i32) goto out;
        out:
            ret.V;
        }
    }
    "#;

    let (_, methods) = listings(src);
    let insts = listing(&methods, "cmp").instructions();

    assert_eq!(
        insts,
        vec![
            "iload_0",
            "iflt out",
            "iload_0",
            "ifgt out",
            "iload_0",
            "iload_1",
            "if_icmplt out",
            "iload_0",
            "ifeq out",
            "return",
        ]
    );
}

#[test]
fn zero_on_the_left_mirrors_the_comparison() {
    let src = r#"
    Mirror {
        .method public static cmp(x.i32).V {
            if (0.i32 <=.bool $1.x.i32) goto out;
            if (0.i32 >=.bool $1.x.i32) goto out;
            if (0.i32 >.bool $1.x.i32) goto out;
            if (0.i32 ==.bool $1.x.i32) goto out;
        out:
            ret.V;
        }

        .method public static positive(x.i32).bool {
            b.bool :=.bool 0.i32 <.bool $1.x.i32;
            ret.bool b.bool;
        }
    }
    "#;

    let (_, methods) = listings(src);

    let cmp = listing(&methods, "cmp").instructions();
    assert_eq!(
        cmp,
        vec![
            "iload_0",
            "ifge out",
            "iload_0",
            "ifle out",
            "iload_0",
            "iflt out",
            "iload_0",
            "ifeq out",
            "return",
        ]
    );

    let positive = listing(&methods, "positive").instructions();
    assert_contains_seq(&positive, &["iload_0", "ifgt cmp0_true", "iconst_0"]);
    assert!(!positive.iter().any(|inst| inst.starts_with("if_icmp")));
    assert_contains_seq(&positive, &["iconst_1", "istore_1", "iload_1", "ireturn"]);
}

#[test]
fn comparisons_as_values() {
    let (_, methods) = listings(SAMPLE);
    let less = listing(&methods, "less");

    assert_eq!(
        less.body,
        vec![
            Line::Inst("iload_1".into()),
            Line::Inst("iload_2".into()),
            Line::Inst("if_icmplt cmp0_true".into()),
            Line::Inst("iconst_0".into()),
            Line::Inst("goto cmp0_end".into()),
            Line::Label("cmp0_true".into()),
            Line::Inst("iconst_1".into()),
            Line::Label("cmp0_end".into()),
            Line::Inst("istore_3".into()),
            Line::Inst("iload_3".into()),
            Line::Inst("ireturn".into()),
        ]
    );
    assert_eq!(less.stack, 2);
}

#[test]
fn comparison_labels_are_unique_in_the_class() {
    let src = r#"
    Twice {
        .method public static a(x.i32).bool {
            b.bool :=.bool $1.x.i32 <.bool 1.i32;
            ret.bool b.bool;
        }

        .method public static b(x.i32).bool {
            b.bool :=.bool $1.x.i32 >.bool 1.i32;
            ret.bool b.bool;
        }
    }
    "#;

    let (code, _) = listings(src);
    assert!(code.contains("cmp0_true:"));
    assert!(code.contains("if_icmpgt cmp1_true"));
}

#[test]
fn boolean_operations() {
    let (_, methods) = listings(SAMPLE);
    let logic = listing(&methods, "logic").instructions();

    assert_contains_seq(&logic, &["iload_1", "iload_2", "iand", "istore_3"]);
    assert_contains_seq(&logic, &["iload_3", "iconst_1", "ixor", "istore 4"]);
    assert_contains_seq(&logic, &["iload 4", "ifne yes"]);
    assert_contains_seq(&logic, &["iload_3", "ifeq yes"]);
}

#[test]
fn arrays() {
    let (_, methods) = listings(SAMPLE);
    let arrays = listing(&methods, "arrays");

    assert_eq!(
        arrays.instructions(),
        vec![
            "iconst_3",
            "newarray int",
            "astore_1",
            "aload_1",
            "iload_0",
            "iconst_5",
            "iastore",
            "aload_1",
            "iload_0",
            "iaload",
            "istore_2",
            "aload_1",
            "arraylength",
            "istore_3",
            "iload_3",
            "ireturn",
        ]
    );
    assert_eq!(arrays.stack, 3);
    assert_eq!(arrays.locals, 4);
}

#[test]
fn fields_and_calls() {
    let (_, methods) = listings(SAMPLE);

    assert_eq!(
        listing(&methods, "get").instructions(),
        vec!["aload_0", "getfield Sample/count I", "istore_1", "iload_1", "ireturn"]
    );

    assert_eq!(
        listing(&methods, "set").instructions(),
        vec!["aload_0", "iload_1", "putfield Sample/count I", "return"]
    );

    assert_eq!(
        listing(&methods, "touch").instructions(),
        vec!["aload_0", "invokevirtual Sample/get()I", "pop", "return"]
    );
}

#[test]
fn constructions_are_fused() {
    let (_, methods) = listings(SAMPLE);
    let main = listing(&methods, "main").instructions();

    assert_eq!(
        &main[..4],
        &["new Sample", "dup", "invokespecial Sample/<init>()V", "astore_1"]
    );
    assert_contains_seq(&main, &["iload_2", "invokestatic io/println(I)V", "iinc 2 1"]);
    assert_contains_seq(&main, &["iload_2", "bipush 10", "if_icmpge end"]);
}

#[test]
fn goto_chains_collapse() {
    let src = r#"
    Chains {
        .method public static chain(x.i32).i32 {
            if ($1.x.i32 <.bool 0.i32) goto first;
            ret.i32 $1.x.i32;
        first:
            goto second;
        second:
            goto done;
        done:
            ret.i32 0.i32;
        }

        .method public static spin().V {
        one:
            goto two;
        two:
            goto one;
        }
    }
    "#;

    let (_, methods) = listings(src);

    let chain = listing(&methods, "chain").instructions();
    assert_contains_seq(&chain, &["iload_0", "iflt done"]);
    assert_eq!(chain.iter().filter(|inst| **inst == "goto done").count(), 2);

    let spin = listing(&methods, "spin").instructions();
    assert_eq!(spin.len(), 2);
    assert!(spin.iter().all(|inst| inst.starts_with("goto")));
}

#[test]
fn end_to_end_with_natural_registers() {
    let src = r#"
    Example {
        .method public f(a.i32).i32 {
            b.i32 :=.i32 $1.a.i32 +.i32 1.i32;
            ret.i32 b.i32;
        }
    }
    "#;

    let mut class = class(src);
    let mut driver = BufferedDriver::new();
    allocate(&mut driver, &mut class, RegisterBudget::Natural);

    let code = emit(&class).unwrap();
    let methods = sim::methods(&code);
    let f = listing(&methods, "f");

    assert_eq!(f.locals, 3);
    assert_eq!(f.stack, 2);
    assert_eq!(f.instructions().last(), Some(&"ireturn"));
}

#[test]
fn allocation_shrinks_locals() {
    let src = r#"
    Temps {
        .method public static f(a.i32).i32 {
            t1.i32 :=.i32 $0.a.i32 +.i32 1.i32;
            t2.i32 :=.i32 t1.i32 *.i32 2.i32;
            t3.i32 :=.i32 t2.i32 -.i32 $0.a.i32;
            ret.i32 t3.i32;
        }
    }
    "#;

    let mut class = class(src);
    let before = emit(&class).unwrap();
    assert!(before.contains(".limit locals 4"));

    let mut driver = BufferedDriver::new();
    allocate(&mut driver, &mut class, RegisterBudget::Unconstrained);
    assert!(driver.messages.is_empty());

    let code = emit(&class).unwrap();
    let methods = sim::methods(&code);
    let f = listing(&methods, "f");

    assert_eq!(f.locals, 3);
    assert_eq!(sim::max_depth(f), f.stack);
}

#[test]
fn unresolved_variables_fail() {
    let mut builder = MethodBuilder::new("m", Type::Int32);
    builder.is_static(true);
    builder.push(InstructionKind::Return(Return {
        value: Some(Element::operand("x", Type::Int32)),
        ty: Type::Int32,
    }));

    let mut class = method_class("Broken", builder);
    class.methods[0].vars.remove("x");

    let err = emit(&class).unwrap_err();
    assert_eq!(err.class, "Broken");
    assert_eq!(
        err.failures,
        vec![("m".to_string(), EmitError::Unresolved("x".into()))]
    );
}

#[test]
fn fields_are_read_by_name() {
    let mut builder = MethodBuilder::new("get", Type::Int32);
    builder.push(InstructionKind::Return(Return {
        value: Some(Element::operand("count", Type::Int32)),
        ty: Type::Int32,
    }));

    let mut class = method_class("Holder", builder);
    class.methods[0].vars.remove("count");
    class.fields.push(Field {
        name: "count".into(),
        ty: Type::Int32,
        access: Default::default(),
        is_static: false,
        is_final: false,
    });

    let code = emit(&class).unwrap();
    let methods = sim::methods(&code);

    assert_eq!(
        listing(&methods, "get").instructions(),
        vec!["aload_0", "getfield Holder/count I", "ireturn"]
    );
    assert!(code.contains(".field public count I"));
}

#[test]
fn ill_typed_literals_fail() {
    let mut builder = MethodBuilder::new("m", Type::Int32);
    builder.push(InstructionKind::Return(Return {
        value: Some(Element::Literal {
            value: Literal::Bool(true),
            ty: Type::Int32,
        }),
        ty: Type::Int32,
    }));

    let err = emit(&method_class("Odd", builder)).unwrap_err();
    assert_eq!(
        err.failures[0].1,
        EmitError::LiteralType {
            literal: "true".into(),
            ty: "i32".into(),
        }
    );
}

#[test]
fn every_failing_method_is_reported() {
    let src = r#"
    Bad {
        .method public static bad(x.i32).i32 {
            y.i32 :=.i32 $0.x.i32;
        }

        .method public static fine().V {
            ret.V;
        }

        .method public static worse().bool {
            y.i32 :=.i32 1.i32;
        }
    }
    "#;

    let class = class(src);
    let err = emit(&class).unwrap_err();
    let names: Vec<_> = err.failures.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(names, vec!["bad", "worse"]);
    assert!(err
        .failures
        .iter()
        .all(|(_, err)| *err == EmitError::MissingReturn));

    let mut driver = BufferedDriver::new();
    assert!(generate(&mut driver, &class).is_none());
    assert!(driver.messages.has_errors());
    assert_eq!(driver.messages.len(), 2);
}

#[test]
fn frame_follows_labels() {
    let body = vec![
        Item::Inst(Instruction::Iconst(1)),
        Item::Inst(Instruction::If(Comparison::Ne, "a".into())),
        Item::Inst(Instruction::Iconst(2)),
        Item::Inst(Instruction::Goto("b".into())),
        Item::Label("a".into()),
        Item::Inst(Instruction::Iconst(4)),
        Item::Label("b".into()),
        Item::Inst(Instruction::Ireturn),
    ];

    let mut frame = Frame::new();
    for item in body.iter() {
        frame.apply(item).unwrap();
    }

    assert_eq!(frame.depth(), 0);
    assert_eq!(frame.max(), 1);
    assert_eq!(max_stack(&body), Ok(1));
}

#[test]
fn frame_reports_underflow() {
    let body = vec![
        Item::Inst(Instruction::Iconst(1)),
        Item::Inst(Instruction::Iadd),
    ];

    assert_eq!(
        max_stack(&body),
        Err(EmitError::StackUnderflow("iadd".into()))
    );
}

#[test]
fn instruction_text() {
    assert_eq!(Instruction::Iload(3).to_string(), "iload_3");
    assert_eq!(Instruction::Iload(4).to_string(), "iload 4");
    assert_eq!(Instruction::Astore(0).to_string(), "astore_0");
    assert_eq!(Instruction::Iconst(-1).to_string(), "iconst_m1");
    assert_eq!(
        Instruction::IfIcmp(Comparison::Ge, "end".into()).to_string(),
        "if_icmpge end"
    );

    let invoke = Instruction::Invoke(Invoke {
        kind: InvokeKind::Virtual,
        class: "java/io/PrintStream".into(),
        method: "println".into(),
        params: vec!["I".into(), "[Ljava/lang/String;".into()],
        ret: "V".into(),
    });

    assert_eq!(
        invoke.to_string(),
        "invokevirtual java/io/PrintStream/println(I[Ljava/lang/String;)V"
    );
    assert_eq!(invoke.stack_effect(), (3, 0));
}
