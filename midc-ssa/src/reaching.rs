use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use midc_ir::{BlockId, Function, Register};

/// An instruction that defines a register: block, register and position in
/// the block.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DefPoint {
    pub block: BlockId,
    pub reg: Register,
    pub index: usize,
}

/// Reaching definitions, as sets of indices into `defs()`.
pub struct ReachingDefs {
    defs: Vec<DefPoint>,
    gen: Vec<FixedBitSet>,
    kill: Vec<FixedBitSet>,
    reach_in: Vec<FixedBitSet>,
    reach_out: Vec<FixedBitSet>,
}

impl ReachingDefs {
    pub fn defs(&self) -> &[DefPoint] {
        &self.defs
    }

    pub fn gen(&self, block: BlockId) -> &FixedBitSet {
        &self.gen[block.0]
    }

    pub fn kill(&self, block: BlockId) -> &FixedBitSet {
        &self.kill[block.0]
    }

    pub fn reach_in(&self, block: BlockId) -> &FixedBitSet {
        &self.reach_in[block.0]
    }

    pub fn reach_out(&self, block: BlockId) -> &FixedBitSet {
        &self.reach_out[block.0]
    }

    /// Definitions of `reg` that reach the start of `block`.
    pub fn reaching_defs_of(&self, block: BlockId, reg: Register) -> Vec<DefPoint> {
        self.reach_in[block.0]
            .ones()
            .map(|idx| self.defs[idx])
            .filter(|def| def.reg == reg)
            .collect()
    }
}

pub fn compute_reaching_defs(fct: &Function) -> ReachingDefs {
    let block_count = fct.block_count();

    let mut defs = Vec::new();
    for block in &fct.blocks {
        for (index, instr) in block.instrs.iter().enumerate() {
            if let Some(reg) = instr.def() {
                defs.push(DefPoint {
                    block: block.id,
                    reg,
                    index,
                });
            }
        }
    }

    let def_count = defs.len();
    let mut defs_of_reg: HashMap<Register, Vec<usize>> = HashMap::new();
    for (idx, def) in defs.iter().enumerate() {
        defs_of_reg.entry(def.reg).or_default().push(idx);
    }

    let mut gen = vec![FixedBitSet::with_capacity(def_count); block_count];
    let mut kill = vec![FixedBitSet::with_capacity(def_count); block_count];

    for (idx, def) in defs.iter().enumerate() {
        let block = def.block.0;

        for &other in &defs_of_reg[&def.reg] {
            if other != idx {
                kill[block].insert(other);
            }
        }
    }

    // The last definition of each register in a block wins.
    let mut last_def: HashMap<(BlockId, Register), usize> = HashMap::new();
    for (idx, def) in defs.iter().enumerate() {
        last_def.insert((def.block, def.reg), idx);
    }
    for (&(block, _), &idx) in &last_def {
        gen[block.0].insert(idx);
    }

    let mut reach_in = vec![FixedBitSet::with_capacity(def_count); block_count];
    let mut reach_out = vec![FixedBitSet::with_capacity(def_count); block_count];
    let mut changed = true;
    let mut rounds = 0;

    while changed {
        changed = false;
        rounds += 1;

        for idx in 0..block_count {
            let mut input = FixedBitSet::with_capacity(def_count);
            for pred in &fct.blocks[idx].preds {
                input.union_with(&reach_out[pred.0]);
            }

            let mut out = input.clone();
            out.difference_with(&kill[idx]);
            out.union_with(&gen[idx]);

            if input != reach_in[idx] || out != reach_out[idx] {
                changed = true;
                trace!(block = idx, round = rounds, "reaching sets changed");
            }

            reach_in[idx] = input;
            reach_out[idx] = out;
        }
    }

    debug!(defs = def_count, rounds, "reaching definitions computed");

    ReachingDefs {
        defs,
        gen,
        kill,
        reach_in,
        reach_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{counting_loop, if_else_assign};

    #[test]
    fn both_branch_definitions_reach_merge() {
        let fct = if_else_assign();
        let rd = compute_reaching_defs(&fct);
        let x = fct.vars[0].reg;

        let reaching = rd.reaching_defs_of(BlockId(3), x);
        let blocks = reaching.iter().map(|def| def.block).collect::<Vec<_>>();
        assert_eq!(vec![BlockId(1), BlockId(2)], blocks);
        assert!(rd.reaching_defs_of(BlockId(1), x).is_empty());
    }

    #[test]
    fn loop_redefinition_kills_entry_definition() {
        let fct = counting_loop();
        let rd = compute_reaching_defs(&fct);
        let i = fct.vars[1].reg;

        // the entry and the body definition both reach the header
        let header = rd.reaching_defs_of(BlockId(1), i);
        assert_eq!(2, header.len());

        // only the body definition leaves the body
        let body_out = rd
            .reach_out(BlockId(2))
            .ones()
            .map(|idx| rd.defs()[idx])
            .filter(|def| def.reg == i)
            .collect::<Vec<_>>();
        assert_eq!(1, body_out.len());
        assert_eq!(BlockId(2), body_out[0].block);
        assert_eq!(1, rd.gen(BlockId(2)).ones().filter(|&d| rd.defs()[d].reg == i).count());
    }
}
