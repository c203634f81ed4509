use midc_ast::{AssignExpr, ExprKind, UnOp};
use midc_ir::{Opcode, Operand};

use super::gen_expr;
use crate::generator::LowerGen;

/// The value is evaluated before the target. The assignment yields the
/// assigned value, so `a = b = c` works.
pub(super) fn gen_expr_assign(g: &mut LowerGen, node: &AssignExpr) -> Operand {
    let value = gen_expr(g, node.value);
    let target = g.expr(node.target);

    match target.kind {
        ExprKind::Ident(name) => {
            let var = g.var_reg(name, target.ty);
            g.emit_copy(var, value);
        }

        ExprKind::Un(ref un) if un.op == UnOp::Deref => {
            let addr = gen_expr(g, un.operand);
            g.emit_store(addr, value);
        }

        ExprKind::Index(ref index) => {
            let array = gen_expr(g, index.array);
            let idx = gen_expr(g, index.index);
            let addr = g.emit_binary(Opcode::IndexAddr, None, array, idx);
            g.emit_store(addr, value);
        }

        ExprKind::Member(ref member) => {
            let base = gen_expr(g, member.base);
            let addr = g.emit_binary(Opcode::Member, None, base, Operand::Member(member.member));
            g.emit_store(addr, value);
        }

        _ => {
            let addr = gen_expr(g, node.target);
            g.emit_store(addr, value);
        }
    }

    value
}
