use tracing::{debug, instrument};

use midc_ir::{Function, Program};

pub mod dominance;
pub mod frontier;
pub mod liveness;
pub mod phi;
pub mod reaching;
pub mod rename;
pub mod validate;

#[cfg(test)]
mod tests;

pub use dominance::{compute_dominators, compute_rpo, DomTree};
pub use frontier::compute_dominance_frontiers;
pub use liveness::{compute_liveness, Liveness};
pub use phi::insert_phis;
pub use reaching::{compute_reaching_defs, DefPoint, ReachingDefs};
pub use rename::rename_variables;
pub use validate::{is_valid_ssa, validate_ssa, SsaViolation};

/// Converts a lowered function with built CFG edges into SSA form:
/// dominators, dominance frontiers, phi placement, then renaming.
#[instrument(skip_all, fields(blocks = fct.block_count()))]
pub fn construct_ssa(fct: &mut Function) {
    if fct.block_count() == 0 {
        fct.is_ssa = true;
        return;
    }

    compute_dominators(fct);
    compute_dominance_frontiers(fct);
    let phis = insert_phis(fct);

    let tree = DomTree::new(fct);
    rename_variables(fct, &tree);
    fct.is_ssa = true;

    debug!(phis, vregs = fct.reg_count(), "ssa constructed");
}

pub fn construct_ssa_program(prog: &mut Program) {
    for fct in &mut prog.functions {
        construct_ssa(fct);
    }
}
