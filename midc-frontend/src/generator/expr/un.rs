use midc_ast::{TypeId, UnExpr, UnOp};
use midc_ir::{Opcode, Operand};

use super::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_expr_un(g: &mut LowerGen, node: &UnExpr, ty: Option<TypeId>) -> Operand {
    match node.op {
        UnOp::Neg => gen_expr_un_simple(g, node, Opcode::Neg, ty),
        UnOp::Not => gen_expr_un_simple(g, node, Opcode::Not, ty),
        UnOp::BitNot => gen_expr_un_simple(g, node, Opcode::BitNot, ty),
        UnOp::Deref => gen_expr_un_simple(g, node, Opcode::Load, ty),
        UnOp::AddrOf => gen_expr_un_simple(g, node, Opcode::AddrOf, ty),
        UnOp::PreInc => gen_expr_pre_update(g, node, Opcode::Add, ty),
        UnOp::PreDec => gen_expr_pre_update(g, node, Opcode::Sub, ty),
        UnOp::PostInc => gen_expr_post_update(g, node, Opcode::Add, ty),
        UnOp::PostDec => gen_expr_post_update(g, node, Opcode::Sub, ty),
    }
}

fn gen_expr_un_simple(
    g: &mut LowerGen,
    node: &UnExpr,
    opcode: Opcode,
    ty: Option<TypeId>,
) -> Operand {
    let src = gen_expr(g, node.operand);
    g.emit_unary(opcode, ty, src)
}

/// `++x`, `--x`: yields the updated value.
fn gen_expr_pre_update(
    g: &mut LowerGen,
    node: &UnExpr,
    opcode: Opcode,
    ty: Option<TypeId>,
) -> Operand {
    let src = gen_expr(g, node.operand);
    let updated = g.emit_binary(opcode, ty, src, Operand::Int(1));
    write_back(g, node, updated, ty);
    updated
}

/// `x++`, `x--`: yields the value before the update.
fn gen_expr_post_update(
    g: &mut LowerGen,
    node: &UnExpr,
    opcode: Opcode,
    ty: Option<TypeId>,
) -> Operand {
    let src = gen_expr(g, node.operand);
    let old = g.emit_unary(Opcode::Copy, ty, src);
    let updated = g.emit_binary(opcode, ty, src, Operand::Int(1));
    write_back(g, node, updated, ty);
    old
}

// Only variables are written back; other operands just yield the value.
fn write_back(g: &mut LowerGen, node: &UnExpr, value: Operand, ty: Option<TypeId>) {
    if let Some(name) = g.expr(node.operand).kind.to_ident() {
        let var = g.var_reg(name, ty);
        g.emit_copy(var, value);
    }
}
