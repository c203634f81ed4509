use std::slice;

use midc_ast::{StmtId, StmtKind, SwitchStmt};
use midc_ir::{BlockId, SwitchCase};

use super::{gen_stmt, open_dead_block};
use crate::generator::expr::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_stmt_switch(g: &mut LowerGen, node: &SwitchStmt) {
    let exit_block = g.new_block("switch_exit");
    g.break_targets.push(exit_block);

    let value = gen_expr(g, node.cond);

    let stmts: &[StmtId] = match g.stmt(node.body).kind {
        StmtKind::Block(ref stmts) => stmts,
        _ => slice::from_ref(&node.body),
    };

    // One block per case/default label, in order of appearance.
    let mut cases = Vec::new();
    let mut default_block = None;
    let mut label_blocks: Vec<Option<BlockId>> = Vec::with_capacity(stmts.len());

    for &id in stmts {
        let block = match g.stmt(id).kind {
            StmtKind::Case(value) => {
                let target = g.new_block(&format!("case_{}", value));
                cases.push(SwitchCase { value, target });
                Some(target)
            }

            StmtKind::Default => {
                let target = g.new_block("default");
                default_block = Some(target);
                Some(target)
            }

            _ => None,
        };

        label_blocks.push(block);
    }

    g.emit_switch(value, cases, default_block.unwrap_or(exit_block));

    for (&id, label_block) in stmts.iter().zip(label_blocks) {
        match label_block {
            Some(block) => {
                // fall through from the previous case
                g.ensure_terminator(block);
                g.switch_to(block);
            }

            None => {
                open_dead_block(g, id);
                gen_stmt(g, id);
            }
        }
    }

    g.ensure_terminator(exit_block);
    g.break_targets.pop();
    g.switch_to(exit_block);
}
