use midc_ast::ForStmt;

use super::gen_stmt;
use crate::generator::expr::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_stmt_for(g: &mut LowerGen, node: &ForStmt) {
    let cond_block = g.new_block("for_cond");
    let body_block = g.new_block("for_body");
    let incr_block = g.new_block("for_incr");
    let exit_block = g.new_block("for_exit");

    g.break_targets.push(exit_block);
    g.continue_targets.push(incr_block);

    if let Some(init) = node.init {
        gen_stmt(g, init);
    }
    g.ensure_terminator(cond_block);

    g.switch_to(cond_block);
    match node.cond {
        Some(cond) => {
            let cond = gen_expr(g, cond);
            g.emit_branch(cond, body_block, exit_block);
        }
        None => g.emit_jump(body_block),
    }

    g.switch_to(body_block);
    if let Some(body) = node.body {
        gen_stmt(g, body);
    }
    g.ensure_terminator(incr_block);

    g.switch_to(incr_block);
    if let Some(incr) = node.incr {
        gen_expr(g, incr);
    }
    g.ensure_terminator(cond_block);

    g.break_targets.pop();
    g.continue_targets.pop();
    g.switch_to(exit_block);
}
