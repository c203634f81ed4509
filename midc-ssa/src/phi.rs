use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use midc_ir::{BlockId, Function, Instr, Operand, PhiArg, VarId};

/// Places phis for every variable at the iterated dominance frontier of its
/// definition blocks. Each phi defines the variable's canonical register,
/// has one empty argument per predecessor and is prepended to its block.
/// Returns the number of phis inserted.
pub fn insert_phis(fct: &mut Function) -> usize {
    let var_count = fct.vars.len();
    let block_count = fct.block_count();
    if var_count == 0 || block_count == 0 {
        return 0;
    }

    let def_blocks = collect_def_blocks(fct);
    let mut inserted = 0;
    let mut worklist: Vec<BlockId> = Vec::new();

    for (idx, defs) in def_blocks.iter().enumerate() {
        let var = VarId(idx);
        let mut has_phi = FixedBitSet::with_capacity(block_count);
        let mut ever_on_worklist = FixedBitSet::with_capacity(block_count);

        worklist.clear();
        for &block in defs {
            ever_on_worklist.insert(block.0);
            worklist.push(block);
        }

        while let Some(block) = worklist.pop() {
            let frontier = fct.block(block).dom_frontier.clone();

            for join in frontier {
                if has_phi.put(join.0) {
                    continue;
                }

                let data = fct.var(var);
                let dst = Operand::reg(data.reg, data.ty);
                let args = fct
                    .block(join)
                    .preds
                    .iter()
                    .map(|&pred| PhiArg {
                        value: Operand::None,
                        pred,
                    })
                    .collect();

                fct.block_mut(join)
                    .prepend(Instr::phi(dst, Some(var), args, 0));
                inserted += 1;
                trace!(var = idx, block = %join, "phi placed");

                if !ever_on_worklist.put(join.0) {
                    worklist.push(join);
                }
            }
        }
    }

    debug!(phis = inserted, "phis inserted");
    inserted
}

// Blocks containing a definition of each variable's canonical register, in
// block order.
fn collect_def_blocks(fct: &Function) -> Vec<Vec<BlockId>> {
    let var_of_reg = fct.var_of_reg();
    let mut def_blocks = vec![Vec::new(); fct.vars.len()];

    for block in &fct.blocks {
        for instr in &block.instrs {
            let var = instr
                .def()
                .and_then(|reg| var_of_reg.get(reg.0).copied().flatten());

            if let Some(var) = var {
                let defs: &mut Vec<BlockId> = &mut def_blocks[var.0];
                if !defs.contains(&block.id) {
                    defs.push(block.id);
                }
            }
        }
    }

    def_blocks
}
