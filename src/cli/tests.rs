use std::path::PathBuf;

use clap::Parser;
use jmm_common::BufferedDriver;
use jmm_midend::RegisterBudget;

use super::GraphViz;
use crate::args::{Arguments, Dump};
use crate::output::output_path;

const SWAP: &str = r#"
Swap {
    .method public static swap(a.i32, b.i32).i32 {
        t.i32 :=.i32 $0.a.i32;
        u.i32 :=.i32 $1.b.i32 +.i32 t.i32;
        ret.i32 u.i32;
    }
}
"#;

#[test]
fn parse_build_arguments() {
    let args = Arguments::try_parse_from([
        "jc",
        "build",
        "Swap.ollir",
        "-r",
        "3",
        "--dump",
        "liveness",
        "--dump",
        "interference",
    ])
    .unwrap();

    assert!(args.command.build());

    let opts = args.options();
    assert_eq!(opts.path, PathBuf::from("Swap.ollir"));
    assert_eq!(opts.registers, RegisterBudget::Limited(3));
    assert_eq!(opts.dump, vec![Dump::Liveness, Dump::Interference]);
    assert_eq!(opts.output, None);
}

#[test]
fn parse_register_budgets() {
    let budget = |value: &str| {
        let args = Arguments::try_parse_from(["jc", "check", "a.ollir", "-r", value]).unwrap();
        args.options().registers
    };

    assert_eq!(budget("-1"), RegisterBudget::Disabled);
    assert_eq!(budget("0"), RegisterBudget::Natural);
    assert_eq!(budget("auto"), RegisterBudget::Unconstrained);

    let args = Arguments::try_parse_from(["jc", "c", "a.ollir"]).unwrap();
    assert!(!args.command.build());
    assert_eq!(args.options().registers, RegisterBudget::Disabled);

    assert!(Arguments::try_parse_from(["jc", "check", "a.ollir", "-r", "-2"]).is_err());
}

#[test]
fn listing_goes_next_to_the_input() {
    let args = Arguments::try_parse_from(["jc", "build", "src/Swap.ollir"]).unwrap();
    assert_eq!(output_path(args.options(), "Swap"), PathBuf::from("src/Swap.j"));

    let args = Arguments::try_parse_from(["jc", "build", "src/Swap.ollir", "-o", "out.j"]).unwrap();
    assert_eq!(output_path(args.options(), "Swap"), PathBuf::from("out.j"));
}

#[test]
fn interference_graph_as_dot() {
    let mut driver = BufferedDriver::new();
    let class = jmm_ollir::read(&mut driver, SWAP, 0).unwrap();

    let mut out = Vec::new();
    GraphViz::new(&class).render(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("graph interference {"));
    assert!(out.contains("label=\"swap.b (1)\""));
    assert!(out.contains("label=\"swap.t (2)\""));
    assert!(out.contains(" -- "));
}
