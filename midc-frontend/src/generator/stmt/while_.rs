use midc_ast::{DoWhileStmt, WhileStmt};

use super::gen_stmt;
use crate::generator::expr::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_stmt_while(g: &mut LowerGen, node: &WhileStmt) {
    let cond_block = g.new_block("while_cond");
    let body_block = g.new_block("while_body");
    let exit_block = g.new_block("while_exit");

    g.break_targets.push(exit_block);
    g.continue_targets.push(cond_block);

    g.ensure_terminator(cond_block);
    g.switch_to(cond_block);
    let cond = gen_expr(g, node.cond);
    g.emit_branch(cond, body_block, exit_block);

    g.switch_to(body_block);
    gen_stmt(g, node.body);
    g.ensure_terminator(cond_block);

    g.break_targets.pop();
    g.continue_targets.pop();
    g.switch_to(exit_block);
}

pub(super) fn gen_stmt_do_while(g: &mut LowerGen, node: &DoWhileStmt) {
    let body_block = g.new_block("do_body");
    let cond_block = g.new_block("do_cond");
    let exit_block = g.new_block("do_exit");

    g.break_targets.push(exit_block);
    g.continue_targets.push(cond_block);

    g.ensure_terminator(body_block);
    g.switch_to(body_block);
    gen_stmt(g, node.body);
    g.ensure_terminator(cond_block);

    g.switch_to(cond_block);
    let cond = gen_expr(g, node.cond);
    g.emit_branch(cond, body_block, exit_block);

    g.break_targets.pop();
    g.continue_targets.pop();
    g.switch_to(exit_block);
}
