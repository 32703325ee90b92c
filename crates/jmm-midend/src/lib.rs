//! Register allocation for the methods of a class: liveness analysis, the
//! interference graph built from it, and a greedy coloring of that graph
//! which is written back into the variable tables.

pub mod alloc;
pub mod color;
pub mod interfere;
pub mod liveness;
pub mod pretty;


pub use alloc::{allocate, allocate_method, BudgetError, RegisterBudget};
pub use color::{Coloring, Infeasible};
pub use interfere::{interference, InterferenceGraph};
pub use liveness::{liveness, Liveness, LivenessNode};
