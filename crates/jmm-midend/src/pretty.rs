use jmm_common::ir::Method;
use pretty::{Arena, DocAllocator, DocBuilder};

use crate::interfere::InterferenceGraph;
use crate::liveness::{Liveness, VarSet};

pub struct Prettier<'a> {
    allocator: Arena<'a>,
    width: usize,
}

impl<'a> Prettier<'a> {
    pub fn new() -> Self {
        Self {
            allocator: Arena::new(),
            width: 80,
        }
    }

    pub fn pretty_liveness(&'a self, method: &Method, liveness: &Liveness) -> String {
        let doc = self.doc_liveness(method, liveness);
        self.render(doc)
    }

    pub fn pretty_interference(&'a self, method: &str, graph: &InterferenceGraph) -> String {
        let doc = self.doc_interference(method, graph);
        self.render(doc)
    }

    fn render(&'a self, doc: DocBuilder<'a, Arena<'a>>) -> String {
        let mut res = Vec::new();
        doc.render(self.width, &mut res).unwrap();
        String::from_utf8(res).unwrap()
    }

    fn doc_liveness(&'a self, method: &Method, liveness: &Liveness) -> DocBuilder<'a, Arena<'a>> {
        let nodes = liveness.nodes.iter().map(|node| {
            let inst = method.instruction(node.id);
            let sets = self
                .doc_set("def", &node.def)
                .append(self.allocator.line())
                .append(self.doc_set("use", &node.uses))
                .append(self.allocator.line())
                .append(self.doc_set("in", &node.live_in))
                .append(self.allocator.line())
                .append(self.doc_set("out", &node.live_out))
                .group();

            self.allocator
                .text(format!("{:>3}  {}", node.id, inst.kind))
                .append(self.allocator.hardline().append(sets).nest(5))
        });

        self.allocator
            .text(format!("liveness of {}", method.name))
            .append(
                self.allocator
                    .hardline()
                    .append(self.allocator.intersperse(nodes, self.allocator.hardline()))
                    .nest(2),
            )
            .append(self.allocator.hardline())
    }

    fn doc_set(&'a self, name: &str, set: &VarSet) -> DocBuilder<'a, Arena<'a>> {
        self.allocator.text(format!("{name} ")).append(
            self.allocator
                .intersperse(
                    set.iter().map(|var| self.allocator.text(var.clone())),
                    self.allocator.text(", "),
                )
                .braces(),
        )
    }

    fn doc_interference(
        &'a self,
        method: &str,
        graph: &InterferenceGraph,
    ) -> DocBuilder<'a, Arena<'a>> {
        let vertices = graph.vertices().map(|name| {
            let neighbours = graph
                .neighbours(name)
                .map(|other| self.allocator.text(other.to_string()));

            self.allocator
                .text(format!("{name} --"))
                .append(self.allocator.space())
                .append(self.allocator.intersperse(neighbours, self.allocator.text(", ")))
        });

        self.allocator
            .text(format!("interference of {method}"))
            .append(
                self.allocator
                    .hardline()
                    .append(self.allocator.intersperse(vertices, self.allocator.hardline()))
                    .nest(2),
            )
            .append(self.allocator.hardline())
    }
}

impl Default for Prettier<'_> {
    fn default() -> Self {
        Self::new()
    }
}
