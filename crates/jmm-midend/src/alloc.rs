use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jmm_common::ir::{ClassUnit, Method, VarScope};
use jmm_common::message::Messages;
use jmm_common::{Driver, IrOutput};
use log::{debug, info, trace};
use thiserror::Error;

use crate::color::{Coloring, Infeasible};
use crate::interfere::interference;
use crate::liveness::liveness;
use crate::pretty::Prettier;

/// How many registers allocation may use per method.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RegisterBudget {
    /// Skip allocation entirely.
    #[default]
    Disabled,

    /// Keep the registers of the variable table. The analyses still run so
    /// that they can be inspected.
    Natural,

    /// Allocate with as many registers as the interference graph needs.
    Unconstrained,

    Limited(usize),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid register budget `{0}`, expected `off`, `auto` or an integer of at least -1")]
pub struct BudgetError(pub String);

impl FromStr for RegisterBudget {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => return Ok(Self::Disabled),
            "auto" => return Ok(Self::Unconstrained),
            _ => {}
        }

        match s.parse::<i64>() {
            Ok(-1) => Ok(Self::Disabled),
            Ok(0) => Ok(Self::Natural),
            Ok(n) if n > 0 => usize::try_from(n)
                .map(Self::Limited)
                .map_err(|_| BudgetError(s.into())),
            _ => Err(BudgetError(s.into())),
        }
    }
}

impl fmt::Display for RegisterBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "-1"),
            Self::Natural => write!(f, "0"),
            Self::Unconstrained => write!(f, "auto"),
            Self::Limited(n) => write!(f, "{n}"),
        }
    }
}

/// Run register allocation on every method of a class. Methods which cannot
/// be allocated within the budget keep their registers, and a warning is
/// reported for each.
pub fn allocate(driver: &mut impl Driver, class: &mut ClassUnit, budget: RegisterBudget) {
    if budget == RegisterBudget::Disabled {
        debug!("register allocation is disabled");
        return;
    }

    info!("beginning register allocation for `{}` with budget {budget}", class.name);

    let mut msgs = Messages::new();

    for method in class.methods.iter_mut() {
        driver.output_ir(IrOutput::Liveness, || {
            let live = liveness(method);
            let prettier = Prettier::new();
            prettier.pretty_liveness(method, &live)
        });

        driver.output_ir(IrOutput::Interference, || {
            let graph = interference(&liveness(method));
            let prettier = Prettier::new();
            prettier.pretty_interference(&method.name, &graph)
        });

        let max_registers = match budget {
            RegisterBudget::Disabled | RegisterBudget::Natural => continue,
            RegisterBudget::Unconstrained => 0,
            RegisterBudget::Limited(n) => n,
        };

        if let Err(err) = allocate_method(method, max_registers) {
            debug!("allocation for `{}` failed: {err}", method.name);
            msgs.anywhere().alloc_infeasible(&method.name, budget, err);
        }
    }

    driver.report(msgs);
    trace!("done allocating registers for `{}`", class.name);
}

/// Color the variables of a method within `max_registers` registers (0 for
/// no limit) and write the result into its variable table. `this` and the
/// parameters stay where the calling convention puts them. On failure the
/// method is left untouched.
pub fn allocate_method(method: &mut Method, max_registers: usize) -> Result<Coloring, Infeasible> {
    let live = liveness(method);
    let graph = interference(&live);

    let pinned: HashMap<String, usize> = method
        .vars
        .iter()
        .filter(|(_, desc)| desc.scope != VarScope::Local)
        .map(|(name, desc)| (name.clone(), desc.register))
        .collect();

    let coloring = graph.color_with(max_registers, &pinned)?;

    for (name, register) in coloring.iter() {
        if let Some(desc) = method.vars.get_mut(name) {
            trace!("`{}`: `{name}` moves from {} to {register}", method.name, desc.register);
            desc.register = *register;
        }
    }

    Ok(coloring)
}
