use crate::generator::LowerGen;

// Outside of any loop or switch these lower to nothing.

pub(super) fn gen_stmt_break(g: &mut LowerGen) {
    if let Some(&target) = g.break_targets.last() {
        g.emit_jump(target);
    }
}

pub(super) fn gen_stmt_continue(g: &mut LowerGen) {
    if let Some(&target) = g.continue_targets.last() {
        g.emit_jump(target);
    }
}
