use jmm_common::ir::{InstId, Method};
use jmm_common::BufferedDriver;

use super::{def_use, liveness, VarSet};

fn method(src: &str, name: &str) -> Method {
    let mut driver = BufferedDriver::new();
    let class = jmm_ollir::read(&mut driver, src, 0).unwrap();
    class.method(name).unwrap().clone()
}

fn set(names: &[&str]) -> VarSet {
    names.iter().map(|name| name.to_string()).collect()
}

const LOOP: &str = r#"
Loop {
    .method public sum(n.i32).i32 {
        s.i32 :=.i32 0.i32;
        i.i32 :=.i32 0.i32;
    top:
        if (i.i32 >=.bool n.i32) goto done;
        s.i32 :=.i32 s.i32 +.i32 i.i32;
        i.i32 :=.i32 i.i32 +.i32 1.i32;
        goto top;
    done:
        ret.i32 s.i32;
    }

    .method public fields(o.Loop).V {
        x.i32 :=.i32 getfield(o.Loop, count.i32).i32;
        putfield(this, count.i32, x.i32).V;
        a.array.i32 :=.array.i32 new(array, x.i32).array.i32;
        a[x.i32].i32 :=.i32 1.i32;
        ret.V;
    }
}
"#;

#[test]
fn straight_line() {
    let sum = method(LOOP, "sum");
    let live = liveness(&sum);

    let first = live.node(InstId(1));
    assert_eq!(set(&["s"]), first.def);
    assert!(first.uses.is_empty());
    assert_eq!(set(&["n"]), first.live_in);
    assert_eq!(set(&["n", "s"]), first.live_out);
}

#[test]
fn loop_carries_variables() {
    let sum = method(LOOP, "sum");
    let live = liveness(&sum);

    let branch = live.node(InstId(3));
    assert_eq!(set(&["i", "n", "s"]), branch.live_in);
    assert_eq!(set(&["i", "n", "s"]), branch.live_out);

    let back = live.node(InstId(6));
    assert_eq!(set(&["i", "n", "s"]), back.live_in);

    let ret = live.node(InstId(7));
    assert_eq!(set(&["s"]), ret.live_in);
    assert!(ret.live_out.is_empty());
}

#[test]
fn fixpoint_is_stable() {
    for name in ["sum", "fields"] {
        let method = method(LOOP, name);
        let mut live = liveness(&method);
        let settled = live.clone();

        assert!(!live.iterate());
        assert_eq!(settled, live);
    }
}

#[test]
fn equations_hold() {
    for name in ["sum", "fields"] {
        let method = method(LOOP, name);
        let live = liveness(&method);

        for node in live.nodes.iter() {
            let expected_in: VarSet = node
                .uses
                .union(&node.live_out.difference(&node.def).cloned().collect())
                .cloned()
                .collect();
            assert_eq!(expected_in, node.live_in, "in({})", node.id);

            let expected_out: VarSet = node
                .succs
                .iter()
                .flat_map(|succ| live.node(*succ).live_in.iter().cloned())
                .collect();
            assert_eq!(expected_out, node.live_out, "out({})", node.id);
        }
    }
}

#[test]
fn field_access_uses_object() {
    let fields = method(LOOP, "fields");

    let (def, uses) = def_use(&fields.instruction(InstId(1)).kind);
    assert_eq!(set(&["x"]), def);
    assert_eq!(set(&["o"]), uses);

    let (def, uses) = def_use(&fields.instruction(InstId(2)).kind);
    assert!(def.is_empty());
    assert_eq!(set(&["this", "x"]), uses);
}

#[test]
fn array_store_is_not_a_def() {
    let fields = method(LOOP, "fields");

    let (def, uses) = def_use(&fields.instruction(InstId(4)).kind);
    assert!(def.is_empty());
    assert_eq!(set(&["a", "x"]), uses);
}

#[test]
fn literals_are_ignored() {
    let fields = method(LOOP, "fields");
    let (_, uses) = def_use(&fields.instruction(InstId(3)).kind);

    assert_eq!(set(&["x"]), uses);
}
