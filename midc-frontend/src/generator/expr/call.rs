use midc_ast::{CallExpr, TypeId};
use midc_ir::{Opcode, Operand};

use super::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_expr_call(g: &mut LowerGen, node: &CallExpr, ty: Option<TypeId>) -> Operand {
    for &arg in &node.args {
        let value = gen_expr(g, arg);
        g.emit_param(value);
    }

    let argc = node.args.len() as i64;
    g.emit_binary(
        Opcode::Call,
        ty,
        Operand::Func(node.callee),
        Operand::Int(argc),
    )
}
