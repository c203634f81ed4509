use midc_ast::{Name, StmtId};

use crate::generator::LowerGen;

pub(super) fn gen_stmt_goto(g: &mut LowerGen, label: Name) {
    match g.goto_targets.get(&label) {
        Some(&target) => g.emit_jump(target),
        None => g.emit_nop(),
    }
}

pub(super) fn gen_stmt_label(g: &mut LowerGen, id: StmtId) {
    let block = match g.label_blocks.get(&id) {
        Some(&block) => block,
        None => return,
    };

    g.ensure_terminator(block);
    g.switch_to(block);
}
