use midc_ast::{BinExpr, BinOp, TypeId};
use midc_ir::{Opcode, Operand};

use super::gen_expr;
use super::logical::gen_expr_logical;
use crate::generator::LowerGen;

pub(super) fn gen_expr_bin(g: &mut LowerGen, node: &BinExpr, ty: Option<TypeId>) -> Operand {
    if node.op.is_short_circuit() {
        return gen_expr_logical(g, node, ty);
    }

    let lhs = gen_expr(g, node.lhs);
    let rhs = gen_expr(g, node.rhs);
    g.emit_binary(opcode_for(node.op), ty, lhs, rhs)
}

fn opcode_for(op: BinOp) -> Opcode {
    match op {
        BinOp::Add => Opcode::Add,
        BinOp::Sub => Opcode::Sub,
        BinOp::Mul => Opcode::Mul,
        BinOp::Div => Opcode::Div,
        BinOp::Mod => Opcode::Mod,
        BinOp::BitAnd => Opcode::And,
        BinOp::BitOr => Opcode::Or,
        BinOp::BitXor => Opcode::Xor,
        BinOp::Shl => Opcode::Shl,
        BinOp::Shr => Opcode::Shr,
        BinOp::Eq => Opcode::CmpEq,
        BinOp::Ne => Opcode::CmpNe,
        BinOp::Lt => Opcode::CmpLt,
        BinOp::Le => Opcode::CmpLe,
        BinOp::Gt => Opcode::CmpGt,
        BinOp::Ge => Opcode::CmpGe,
        BinOp::LogicalAnd => Opcode::LogicalAnd,
        BinOp::LogicalOr => Opcode::LogicalOr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_map_to_compare_opcodes() {
        for op in [BinOp::Eq, BinOp::Ne, BinOp::Lt, BinOp::Le, BinOp::Gt, BinOp::Ge] {
            assert!(op.is_compare());
            assert!(opcode_for(op).is_compare());
        }
        assert!(!opcode_for(BinOp::Add).is_compare());
        assert_eq!("xor", opcode_for(BinOp::BitXor).name());
    }
}
