use midc_ast::{BinExpr, BinOp, TypeId};
use midc_ir::{Opcode, Operand, PhiArg};

use super::gen_expr;
use crate::generator::LowerGen;

/// `a && b` and `a || b`. The right operand gets its own block; the
/// merge block joins the short-circuit constant with the right operand
/// coerced to 0/1.
pub(super) fn gen_expr_logical(g: &mut LowerGen, node: &BinExpr, ty: Option<TypeId>) -> Operand {
    let is_and = node.op == BinOp::LogicalAnd;

    let result = g.new_temp(ty);
    let rhs_block = g.new_block(if is_and { "and_rhs" } else { "or_rhs" });
    let merge_block = g.new_block("logic_merge");

    let lhs = gen_expr(g, node.lhs);
    if is_and {
        g.emit_branch(lhs, rhs_block, merge_block);
    } else {
        g.emit_branch(lhs, merge_block, rhs_block);
    }
    let lhs_end = g.current();

    g.switch_to(rhs_block);
    let rhs = gen_expr(g, node.rhs);
    let rhs_bool = g.emit_binary(Opcode::CmpNe, None, rhs, Operand::Int(0));
    g.ensure_terminator(merge_block);
    let rhs_end = g.current();

    g.switch_to(merge_block);
    let short_circuit = Operand::Int(if is_and { 0 } else { 1 });
    g.emit_phi(
        result,
        vec![
            PhiArg {
                value: short_circuit,
                pred: lhs_end,
            },
            PhiArg {
                value: rhs_bool,
                pred: rhs_end,
            },
        ],
    );

    result
}
