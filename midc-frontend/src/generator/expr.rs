use midc_ast::{ExprId, ExprKind, IndexExpr, MemberExpr, Name, TypeId};
use midc_ir::{Opcode, Operand};

use super::LowerGen;

mod assign;
mod bin;
mod call;
mod logical;
mod un;

use self::assign::gen_expr_assign;
use self::bin::gen_expr_bin;
use self::call::gen_expr_call;
use self::un::gen_expr_un;

/// Lowers an expression and returns the operand holding its value, or
/// `Operand::None` for shapes that produce no value.
pub(super) fn gen_expr(g: &mut LowerGen, id: ExprId) -> Operand {
    let expr = g.expr(id);
    let saved_line = g.line;
    g.line = expr.line;

    let result = match expr.kind {
        ExprKind::LitInt(value) => g.emit_const(Operand::Int(value), expr.ty),
        ExprKind::LitFloat(value) => g.emit_const(Operand::Float(value), expr.ty),
        ExprKind::LitStr(ref value) => {
            let id = g.strings.intern(value);
            g.emit_const(Operand::Str(id), expr.ty)
        }
        ExprKind::Ident(name) => gen_expr_ident(g, name, expr.ty),
        ExprKind::Bin(ref node) => gen_expr_bin(g, node, expr.ty),
        ExprKind::Un(ref node) => gen_expr_un(g, node, expr.ty),
        ExprKind::Cast(ref node) => {
            let src = gen_expr(g, node.expr);
            g.emit_unary(Opcode::Cast, Some(node.target), src)
        }
        ExprKind::Index(ref node) => gen_expr_index(g, node, expr.ty),
        ExprKind::Member(ref node) => gen_expr_member(g, node, expr.ty),
        ExprKind::Call(ref node) => gen_expr_call(g, node, expr.ty),
        ExprKind::Assign(ref node) => gen_expr_assign(g, node),
        ExprKind::InitList(ref elements) => match elements.first() {
            Some(&first) => gen_expr(g, first),
            None => Operand::None,
        },
        ExprKind::Error => Operand::None,
    };

    g.line = saved_line;
    result
}

/// Every read of a variable copies its canonical register into a fresh
/// temporary.
fn gen_expr_ident(g: &mut LowerGen, name: Name, ty: Option<TypeId>) -> Operand {
    let var = g.var_reg(name, ty);
    g.emit_unary(Opcode::Copy, ty, var)
}

fn gen_expr_index(g: &mut LowerGen, node: &IndexExpr, ty: Option<TypeId>) -> Operand {
    let array = gen_expr(g, node.array);
    let index = gen_expr(g, node.index);
    g.emit_binary(Opcode::Index, ty, array, index)
}

fn gen_expr_member(g: &mut LowerGen, node: &MemberExpr, ty: Option<TypeId>) -> Operand {
    let base = gen_expr(g, node.base);
    g.emit_binary(Opcode::Member, ty, base, Operand::Member(node.member))
}
