use midc_ast::IfStmt;

use super::gen_stmt;
use crate::generator::expr::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_stmt_if(g: &mut LowerGen, node: &IfStmt) {
    let then_block = g.new_block("if_then");
    let else_block = node.else_branch.map(|_| g.new_block("if_else"));
    let merge_block = g.new_block("if_merge");

    let cond = gen_expr(g, node.cond);
    g.emit_branch(cond, then_block, else_block.unwrap_or(merge_block));

    g.switch_to(then_block);
    gen_stmt(g, node.then_branch);
    g.ensure_terminator(merge_block);

    if let (Some(else_block), Some(else_branch)) = (else_block, node.else_branch) {
        g.switch_to(else_block);
        gen_stmt(g, else_branch);
        g.ensure_terminator(merge_block);
    }

    g.switch_to(merge_block);
}
