use tracing::debug;

use midc_ir::{BlockId, Function, Operand, Register, VarId};

use crate::dominance::DomTree;

enum Visit {
    Enter(BlockId),
    Exit(Vec<VarId>),
}

struct Renamer {
    stacks: Vec<Vec<Register>>,
    var_of_reg: Vec<Option<VarId>>,
}

impl Renamer {
    fn var(&self, operand: &Operand) -> Option<VarId> {
        let reg = operand.to_reg()?;
        self.var_of_reg.get(reg.0).copied().flatten()
    }

    fn current(&self, var: VarId) -> Option<Register> {
        self.stacks[var.0].last().copied()
    }

    fn rename_use(&self, operand: &mut Operand) {
        if let Some(var) = self.var(operand) {
            match self.current(var) {
                Some(reg) => operand.rename(reg),
                None => *operand = Operand::Int(0),
            }
        }
    }
}

/// Renames every variable into single-assignment versions by walking the
/// dominator tree with one version stack per variable. Parameters enter with
/// a fresh version each. Unreachable blocks are walked as extra roots. The
/// walk keeps its own stack so deep trees do not recurse.
pub fn rename_variables(fct: &mut Function, tree: &DomTree) {
    let var_count = fct.vars.len();
    let mut renamer = Renamer {
        stacks: vec![Vec::new(); var_count],
        var_of_reg: fct.var_of_reg(),
    };

    fct.ssa_param_regs = vec![None; var_count];
    for idx in 0..var_count {
        if fct.vars[idx].is_param {
            let reg = fct.new_reg();
            renamer.stacks[idx].push(reg);
            fct.ssa_param_regs[idx] = Some(reg);
        }
    }

    if var_count == 0 {
        return;
    }

    for root in tree.roots() {
        let mut visits = vec![Visit::Enter(root)];

        while let Some(visit) = visits.pop() {
            match visit {
                Visit::Enter(block) => {
                    let pushed = rename_block(fct, block, &mut renamer);
                    visits.push(Visit::Exit(pushed));

                    for &child in tree.children(block).iter().rev() {
                        visits.push(Visit::Enter(child));
                    }
                }

                Visit::Exit(pushed) => {
                    for var in pushed {
                        renamer.stacks[var.0].pop();
                    }
                }
            }
        }
    }

    debug!(vars = var_count, vregs = fct.reg_count(), "variables renamed");
}

// Renames phi definitions, then the uses and definitions of the remaining
// instructions, then fills this block's slot in the successors' phis.
// Returns the variables that got a new version here.
fn rename_block(fct: &mut Function, id: BlockId, renamer: &mut Renamer) -> Vec<VarId> {
    let mut pushed = Vec::new();
    let phi_count = fct.block(id).phi_count();

    for idx in 0..phi_count {
        if let Some(var) = fct.block(id).instrs[idx].phi_var() {
            let reg = fct.new_reg();
            fct.block_mut(id).instrs[idx].dst.rename(reg);
            renamer.stacks[var.0].push(reg);
            pushed.push(var);
        }
    }

    for idx in phi_count..fct.block(id).instrs.len() {
        {
            let instr = &mut fct.block_mut(id).instrs[idx];
            renamer.rename_use(&mut instr.src1);
            renamer.rename_use(&mut instr.src2);
        }

        if let Some(var) = renamer.var(&fct.block(id).instrs[idx].dst) {
            let reg = fct.new_reg();
            fct.block_mut(id).instrs[idx].dst.rename(reg);
            renamer.stacks[var.0].push(reg);
            pushed.push(var);
        }
    }

    let succs = fct.block(id).succs.clone();

    for succ in succs {
        let phi_count = fct.block(succ).phi_count();

        for idx in 0..phi_count {
            let var = match fct.block(succ).instrs[idx].phi_var() {
                Some(var) => var,
                None => continue,
            };

            let value = match renamer.current(var) {
                Some(reg) => Operand::reg(reg, fct.var(var).ty),
                None => Operand::Int(0),
            };

            let instr = &mut fct.block_mut(succ).instrs[idx];
            if let Some(arg) = instr.phi_args_mut().iter_mut().find(|arg| arg.pred == id) {
                arg.value = value;
            }
        }
    }

    pushed
}
