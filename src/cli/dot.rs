use jmm_common::ir::ClassUnit;
use jmm_midend::{interference, liveness};

/// The interference graphs of every method in a class, as one GraphViz graph.
/// Vertices are labelled with their method and current register.
pub struct GraphViz {
    labels: Vec<String>,
    edges: Vec<(usize, usize)>,
}

impl GraphViz {
    pub fn new(class: &ClassUnit) -> Self {
        let mut labels = Vec::new();
        let mut edges = Vec::new();

        for method in class.methods.iter() {
            let graph = interference(&liveness(method));
            let first = labels.len();

            let names: Vec<_> = graph.vertices().collect();
            for name in names.iter() {
                let label = match method.register(name) {
                    Some(register) => format!("{}.{name} ({register})", method.name),
                    None => format!("{}.{name}", method.name),
                };

                labels.push(label);
            }

            let id = |name: &str| names.iter().position(|other| *other == name).map(|at| first + at);
            for (a, b) in graph.edges() {
                if let (Some(a), Some(b)) = (id(a), id(b)) {
                    edges.push((a, b));
                }
            }
        }

        Self { labels, edges }
    }

    pub fn render<W: std::io::Write>(&self, output: &mut W) -> dot2::Result {
        dot2::render(self, output)
    }
}

impl<'a> dot2::Labeller<'a> for GraphViz {
    type Node = usize;
    type Edge = (usize, usize);
    type Subgraph = ();

    fn graph_id(&'a self) -> dot2::Result<dot2::Id<'a>> {
        dot2::Id::new("interference")
    }

    fn node_id(&'a self, n: &Self::Node) -> dot2::Result<dot2::Id<'a>> {
        dot2::Id::new(format!("N{n}"))
    }

    fn node_label(&'a self, n: &Self::Node) -> dot2::Result<dot2::label::Text<'a>> {
        Ok(dot2::label::Text::LabelStr(self.labels[*n].as_str().into()))
    }

    fn kind(&self) -> dot2::Kind {
        dot2::Kind::Graph
    }
}

impl<'a> dot2::GraphWalk<'a> for GraphViz {
    type Node = usize;
    type Edge = (usize, usize);
    type Subgraph = ();

    fn nodes(&'a self) -> dot2::Nodes<'a, Self::Node> {
        (0..self.labels.len()).collect()
    }

    fn edges(&'a self) -> dot2::Edges<'a, Self::Edge> {
        (&self.edges[..]).into()
    }

    fn source(&'a self, edge: &Self::Edge) -> Self::Node {
        edge.0
    }

    fn target(&'a self, edge: &Self::Edge) -> Self::Node {
        edge.1
    }
}
