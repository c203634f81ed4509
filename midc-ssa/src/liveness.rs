use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use midc_ir::{BlockId, Function, Operand, Register};

/// Per-block liveness of virtual registers.
pub struct Liveness {
    defs: Vec<FixedBitSet>,
    uses: Vec<FixedBitSet>,
    live_in: Vec<FixedBitSet>,
    live_out: Vec<FixedBitSet>,
}

impl Liveness {
    pub fn is_live_in(&self, block: BlockId, reg: Register) -> bool {
        self.live_in[block.0].contains(reg.0)
    }

    pub fn is_live_out(&self, block: BlockId, reg: Register) -> bool {
        self.live_out[block.0].contains(reg.0)
    }

    pub fn live_in(&self, block: BlockId) -> &FixedBitSet {
        &self.live_in[block.0]
    }

    pub fn live_out(&self, block: BlockId) -> &FixedBitSet {
        &self.live_out[block.0]
    }

    pub fn defs(&self, block: BlockId) -> &FixedBitSet {
        &self.defs[block.0]
    }

    pub fn uses(&self, block: BlockId) -> &FixedBitSet {
        &self.uses[block.0]
    }

    pub fn render(&self, fct: &Function) -> String {
        let mut result = String::new();

        for block in &fct.blocks {
            result.push_str(&format!("  {} ({}):\n", block.label, block.id));
            render_set(&mut result, "live_in", &self.live_in[block.id.0]);
            render_set(&mut result, "live_out", &self.live_out[block.id.0]);
        }

        result
    }
}

fn render_set(out: &mut String, name: &str, set: &FixedBitSet) {
    out.push_str(&format!("    ; {}({}):", name, set.count_ones(..)));
    for reg in set.ones() {
        out.push_str(&format!(" t{}", reg));
    }
    out.push_str("\n");
}

/// Backward dataflow to a fixed point over the blocks in reverse index
/// order. A phi argument is a use at the end of the predecessor it names;
/// parameter entry versions are defined by the entry block.
pub fn compute_liveness(fct: &Function) -> Liveness {
    let block_count = fct.block_count();
    let reg_count = fct.reg_count();
    let (defs, uses) = def_use_sets(fct);

    let mut live_in = vec![FixedBitSet::with_capacity(reg_count); block_count];
    let mut live_out = vec![FixedBitSet::with_capacity(reg_count); block_count];
    let mut changed = true;
    let mut rounds = 0;

    while changed {
        changed = false;
        rounds += 1;

        for idx in (0..block_count).rev() {
            let mut out = FixedBitSet::with_capacity(reg_count);
            for succ in &fct.blocks[idx].succs {
                out.union_with(&live_in[succ.0]);
            }

            let mut input = out.clone();
            input.difference_with(&defs[idx]);
            input.union_with(&uses[idx]);

            if input != live_in[idx] || out != live_out[idx] {
                changed = true;
                trace!(block = idx, round = rounds, "live sets changed");
            }

            live_in[idx] = input;
            live_out[idx] = out;
        }
    }

    debug!(blocks = block_count, vregs = reg_count, rounds, "liveness computed");

    Liveness {
        defs,
        uses,
        live_in,
        live_out,
    }
}

// use(B) holds registers read before any definition in B.
fn def_use_sets(fct: &Function) -> (Vec<FixedBitSet>, Vec<FixedBitSet>) {
    let reg_count = fct.reg_count();
    let mut defs = vec![FixedBitSet::with_capacity(reg_count); fct.block_count()];
    let mut uses = vec![FixedBitSet::with_capacity(reg_count); fct.block_count()];

    if let Some(entry) = defs.get_mut(fct.entry.0) {
        for reg in fct.ssa_param_regs.iter().flatten() {
            entry.insert(reg.0);
        }
    }

    for block in &fct.blocks {
        let (def, used) = (&mut defs[block.id.0], &mut uses[block.id.0]);

        for instr in &block.instrs {
            if !instr.is_phi() {
                collect_use(&instr.src1, def, used);
                collect_use(&instr.src2, def, used);
            }

            if let Some(reg) = instr.def() {
                def.insert(reg.0);
            }
        }
    }

    for block in &fct.blocks {
        let (def, used) = (&defs[block.id.0], &mut uses[block.id.0]);

        for succ in &block.succs {
            for phi in fct.block(*succ).phis() {
                for arg in phi.phi_args().iter().filter(|arg| arg.pred == block.id) {
                    collect_use(&arg.value, def, used);
                }
            }
        }
    }

    (defs, uses)
}

fn collect_use(operand: &Operand, def: &FixedBitSet, used: &mut FixedBitSet) {
    if let Some(reg) = operand.to_reg() {
        if reg.0 < used.len() && !def.contains(reg.0) {
            used.insert(reg.0);
        }
    }
}
