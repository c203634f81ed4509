use midc_ast::{Name, Types};
use midc_ir::{build_cfg, BlockId, Function, Instr, Opcode, Operand, Register};

use crate::{construct_ssa, validate_ssa, DomTree, SsaViolation};

fn reg(reg: Register) -> Operand {
    Operand::reg(reg, None)
}

fn copy(dst: Register, src: Operand) -> Instr {
    Instr::unary(Opcode::Copy, reg(dst), src, 1)
}

fn konst(dst: Register, value: i64) -> Instr {
    Instr::unary(Opcode::Const, reg(dst), Operand::Int(value), 1)
}

/// bb0 branches to bb1 and bb2, which both jump to bb3.
pub fn diamond() -> Function {
    let mut fct = Function::new(Name(0), 1);
    let entry = fct.new_block(Some("entry"));
    let then = fct.new_block(None);
    let els = fct.new_block(None);
    let merge = fct.new_block(None);
    let cond = fct.new_reg();

    fct.emit(entry, konst(cond, 1));
    fct.emit(entry, Instr::branch(reg(cond), then, els, 1));
    fct.emit(then, Instr::jump(merge, 1));
    fct.emit(els, Instr::jump(merge, 1));
    fct.emit(merge, Instr::ret(Operand::None, 1));
    build_cfg(&mut fct);
    fct
}

/// bb0 -> bb1 (header), bb1 -> bb2 (body) | bb3 (exit), bb2 -> bb1.
pub fn loop_fct() -> Function {
    let mut fct = Function::new(Name(0), 1);
    let entry = fct.new_block(Some("entry"));
    let header = fct.new_block(None);
    let body = fct.new_block(None);
    let exit = fct.new_block(None);
    let cond = fct.new_reg();

    fct.emit(entry, Instr::jump(header, 1));
    fct.emit(header, konst(cond, 1));
    fct.emit(header, Instr::branch(reg(cond), body, exit, 1));
    fct.emit(body, Instr::jump(header, 1));
    fct.emit(exit, Instr::ret(Operand::None, 1));
    build_cfg(&mut fct);
    fct
}

/// bb2 is unreachable and jumps into bb1.
pub fn unreachable_fct() -> Function {
    let mut fct = Function::new(Name(0), 1);
    let entry = fct.new_block(Some("entry"));
    let target = fct.new_block(None);
    let dead = fct.new_block(None);

    fct.emit(entry, Instr::jump(target, 1));
    fct.emit(target, Instr::ret(Operand::None, 1));
    fct.emit(dead, Instr::jump(target, 1));
    build_cfg(&mut fct);
    fct
}

/// `if (1) x = 1; else x = 2; return x;`
pub fn if_else_assign() -> Function {
    let mut fct = Function::new(Name(0), 1);
    let x = fct.var_lookup(Name(1), None);
    let cond = fct.new_reg();
    let entry = fct.new_block(Some("entry"));
    let then = fct.new_block(Some("if_then"));
    let els = fct.new_block(Some("if_else"));
    let merge = fct.new_block(Some("if_merge"));

    fct.emit(entry, konst(cond, 1));
    fct.emit(entry, Instr::branch(reg(cond), then, els, 1));
    fct.emit(then, copy(x, Operand::Int(1)));
    fct.emit(then, Instr::jump(merge, 1));
    fct.emit(els, copy(x, Operand::Int(2)));
    fct.emit(els, Instr::jump(merge, 1));
    fct.emit(merge, Instr::ret(reg(x), 1));
    build_cfg(&mut fct);
    fct
}

/// `f(n) { i = 0; sum = 0; while (i < n) { sum = sum + i; i = i + 1; } return sum; }`
pub fn counting_loop() -> Function {
    let types = Types::new();
    let mut fct = Function::new(Name(0), 1);
    let n = fct.declare_param(Name(1), types.int());
    let i = fct.var_lookup(Name(2), None);
    let sum = fct.var_lookup(Name(3), None);
    let cond = fct.new_reg();

    let entry = fct.new_block(Some("entry"));
    let header = fct.new_block(Some("while_cond"));
    let body = fct.new_block(Some("while_body"));
    let exit = fct.new_block(Some("exit"));

    fct.emit(entry, copy(i, Operand::Int(0)));
    fct.emit(entry, copy(sum, Operand::Int(0)));
    fct.emit(entry, Instr::jump(header, 1));
    fct.emit(
        header,
        Instr::binary(Opcode::CmpLt, reg(cond), reg(i), reg(n), 1),
    );
    fct.emit(header, Instr::branch(reg(cond), body, exit, 1));
    fct.emit(
        body,
        Instr::binary(Opcode::Add, reg(sum), reg(sum), reg(i), 1),
    );
    fct.emit(
        body,
        Instr::binary(Opcode::Add, reg(i), reg(i), Operand::Int(1), 1),
    );
    fct.emit(body, Instr::jump(header, 1));
    fct.emit(exit, Instr::ret(reg(sum), 1));
    build_cfg(&mut fct);
    fct
}

/// `return x;` with `x` never assigned.
pub fn read_before_write() -> Function {
    let mut fct = Function::new(Name(0), 1);
    let x = fct.var_lookup(Name(1), None);
    let entry = fct.new_block(Some("entry"));
    fct.emit(entry, Instr::ret(reg(x), 1));
    build_cfg(&mut fct);
    fct
}

fn assert_defs_dominate_uses(fct: &Function) {
    let tree = DomTree::new(fct);
    let mut def_site = vec![None; fct.reg_count()];

    for block in &fct.blocks {
        for (idx, instr) in block.instrs.iter().enumerate() {
            if let Some(reg) = instr.def() {
                def_site[reg.0] = Some((block.id, idx));
            }
        }
    }

    let defined_before = |reg: Register, block: BlockId, idx: usize| {
        if fct.ssa_param_regs.contains(&Some(reg)) {
            return true;
        }
        match def_site[reg.0] {
            Some((def_block, def_idx)) if def_block == block => def_idx < idx,
            Some((def_block, _)) => tree.dominates(def_block, block),
            None => false,
        }
    };

    for block in &fct.blocks {
        if !tree.is_reachable(block.id) {
            continue;
        }

        for (idx, instr) in block.instrs.iter().enumerate() {
            if instr.is_phi() {
                for arg in instr.phi_args() {
                    if let Some(reg) = arg.value.to_reg() {
                        let end = fct.block(arg.pred).instrs.len();
                        assert!(defined_before(reg, arg.pred, end));
                    }
                }
            } else {
                for reg in instr.uses() {
                    assert!(defined_before(reg, block.id, idx), "t{} in bb{}", reg.0, block.id.0);
                }
            }
        }
    }
}

#[test]
fn while_loop_gets_one_phi_per_variable() {
    let mut fct = counting_loop();
    construct_ssa(&mut fct);

    assert!(fct.is_ssa);
    let header = fct.block(BlockId(1));
    assert_eq!(2, header.phi_count());
    for phi in header.phis() {
        assert_eq!(2, phi.phi_args().len());
        assert!(phi.phi_var().is_some());
    }

    assert_defs_dominate_uses(&fct);
}

#[test]
fn helpers_convert_to_valid_ssa() {
    for mut fct in vec![
        diamond(),
        loop_fct(),
        unreachable_fct(),
        if_else_assign(),
        counting_loop(),
        read_before_write(),
    ] {
        construct_ssa(&mut fct);
        assert!(validate_ssa(&fct).is_empty());
        assert_defs_dominate_uses(&fct);
    }
}

#[test]
fn corrupted_definition_reports_one_violation() {
    let mut fct = counting_loop();
    construct_ssa(&mut fct);

    // make the body's second add define the same register as the first
    let first = fct.block(BlockId(2)).instrs[0].def().expect("def");
    fct.block_mut(BlockId(2)).instrs[1].dst.rename(first);

    let violations = validate_ssa(&fct);
    let duplicates = violations
        .iter()
        .filter(|v| match v {
            SsaViolation::MultipleDefinitions { reg, count } => *reg == first && *count == 2,
            _ => false,
        })
        .count();
    assert_eq!(1, duplicates);
}

#[test]
fn cfg_rebuild_after_ssa_is_stable() {
    let mut fct = counting_loop();
    construct_ssa(&mut fct);

    let before = fct
        .blocks
        .iter()
        .map(|block| (block.preds.clone(), block.succs.clone()))
        .collect::<Vec<_>>();
    build_cfg(&mut fct);
    let after = fct
        .blocks
        .iter()
        .map(|block| (block.preds.clone(), block.succs.clone()))
        .collect::<Vec<_>>();

    assert_eq!(before, after);
    assert!(validate_ssa(&fct).is_empty());
}

#[test]
fn unreachable_block_versions_are_unique() {
    let mut fct = Function::new(Name(0), 1);
    let x = fct.var_lookup(Name(1), None);
    let entry = fct.new_block(Some("entry"));
    let join = fct.new_block(Some("join"));
    let dead = fct.new_block(Some("dead"));

    fct.emit(entry, copy(x, Operand::Int(1)));
    fct.emit(entry, Instr::jump(join, 1));
    fct.emit(join, Instr::ret(reg(x), 1));
    fct.emit(dead, copy(x, Operand::Int(2)));
    fct.emit(dead, Instr::jump(join, 1));
    build_cfg(&mut fct);
    construct_ssa(&mut fct);

    assert!(validate_ssa(&fct).is_empty());

    // join merges the live entry version with the dead block's version
    let phi = &fct.block(join).instrs[0];
    assert!(phi.is_phi());
    let values = phi
        .phi_args()
        .iter()
        .map(|arg| arg.value.to_reg())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            fct.block(entry).instrs[0].def(),
            fct.block(dead).instrs[0].def()
        ],
        values
    );
}
