use fixedbitset::FixedBitSet;
use thiserror::Error;

use midc_ir::{BlockId, Function, Operand, Register};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SsaViolation {
    #[error("SSA violation: function is not in SSA form")]
    NotInSsaForm,
    #[error("SSA violation: {reg} defined {count} times")]
    MultipleDefinitions { reg: Register, count: usize },
    #[error("SSA violation: {reg} used but not defined ({block})")]
    UndefinedUse { reg: Register, block: BlockId },
    #[error("SSA violation: PHI arg {reg} not defined ({block} pred {pred})")]
    UndefinedPhiArg {
        reg: Register,
        block: BlockId,
        pred: BlockId,
    },
    #[error("SSA violation: PHI in {block} has {args} args but block has {preds} preds")]
    PhiArityMismatch {
        block: BlockId,
        args: usize,
        preds: usize,
    },
    #[error("SSA violation: PHI in {block} names {pred} which is not a predecessor")]
    PhiPredNotPredecessor { block: BlockId, pred: BlockId },
}

/// Checks the single-assignment properties of a function in SSA form and
/// returns every violation found. Parameter entry versions count as defined.
pub fn validate_ssa(fct: &Function) -> Vec<SsaViolation> {
    if !fct.is_ssa {
        return vec![SsaViolation::NotInSsaForm];
    }

    let mut violations = Vec::new();
    let reg_count = fct.reg_count();
    let mut def_count = vec![0usize; reg_count];
    let mut defined = FixedBitSet::with_capacity(reg_count);

    for block in &fct.blocks {
        for instr in &block.instrs {
            if let Some(reg) = instr.def() {
                if reg.0 < reg_count {
                    def_count[reg.0] += 1;
                    defined.insert(reg.0);
                }
            }
        }
    }

    for (idx, &count) in def_count.iter().enumerate() {
        if count > 1 {
            violations.push(SsaViolation::MultipleDefinitions {
                reg: Register(idx),
                count,
            });
        }
    }

    for reg in fct.ssa_param_regs.iter().flatten() {
        if reg.0 < reg_count {
            defined.insert(reg.0);
        }
    }

    let is_defined = |operand: &Operand| match operand.to_reg() {
        Some(reg) if reg.0 < reg_count => Some((reg, defined.contains(reg.0))),
        _ => None,
    };

    for block in &fct.blocks {
        for instr in &block.instrs {
            for operand in [&instr.src1, &instr.src2] {
                if let Some((reg, false)) = is_defined(operand) {
                    violations.push(SsaViolation::UndefinedUse {
                        reg,
                        block: block.id,
                    });
                }
            }

            for arg in instr.phi_args() {
                if let Some((reg, false)) = is_defined(&arg.value) {
                    violations.push(SsaViolation::UndefinedPhiArg {
                        reg,
                        block: block.id,
                        pred: arg.pred,
                    });
                }
            }
        }
    }

    for block in &fct.blocks {
        for phi in block.phis() {
            let args = phi.phi_args();

            if args.len() != block.preds.len() {
                violations.push(SsaViolation::PhiArityMismatch {
                    block: block.id,
                    args: args.len(),
                    preds: block.preds.len(),
                });
            }

            for arg in args {
                if !block.preds.contains(&arg.pred) {
                    violations.push(SsaViolation::PhiPredNotPredecessor {
                        block: block.id,
                        pred: arg.pred,
                    });
                }
            }
        }
    }

    violations
}

pub fn is_valid_ssa(fct: &Function) -> bool {
    validate_ssa(fct).is_empty()
}
