use midc_ast::{ExprId, StmtId, StmtKind, TypeId, VarDecl};
use midc_ir::Operand;

use super::expr::gen_expr;
use super::LowerGen;

mod assert_;
mod break_;
mod for_;
mod goto;
mod if_;
mod switch;
mod while_;

use self::assert_::gen_stmt_assert;
use self::break_::{gen_stmt_break, gen_stmt_continue};
use self::for_::gen_stmt_for;
use self::goto::{gen_stmt_goto, gen_stmt_label};
use self::if_::gen_stmt_if;
use self::switch::gen_stmt_switch;
use self::while_::{gen_stmt_do_while, gen_stmt_while};

pub(super) fn gen_stmt(g: &mut LowerGen, id: StmtId) {
    let stmt = g.stmt(id);
    let saved_line = g.line;
    g.line = stmt.line;

    match stmt.kind {
        StmtKind::Block(ref stmts) => gen_stmt_list(g, stmts),
        StmtKind::VarDecl(ref decl) => gen_stmt_var(g, decl, stmt.ty),
        StmtKind::Expr(expr) => {
            gen_expr(g, expr);
        }
        StmtKind::Return(value) => gen_stmt_return(g, value),
        StmtKind::If(ref node) => gen_stmt_if(g, node),
        StmtKind::While(ref node) => gen_stmt_while(g, node),
        StmtKind::DoWhile(ref node) => gen_stmt_do_while(g, node),
        StmtKind::For(ref node) => gen_stmt_for(g, node),
        StmtKind::Switch(ref node) => gen_stmt_switch(g, node),
        StmtKind::Break => gen_stmt_break(g),
        StmtKind::Continue => gen_stmt_continue(g),
        StmtKind::Goto(label) => gen_stmt_goto(g, label),
        StmtKind::Label(..) => gen_stmt_label(g, id),
        StmtKind::Assert(cond) => gen_stmt_assert(g, cond),
        StmtKind::Error => g.emit_nop(),

        // only meaningful as direct children of a switch body
        StmtKind::Case(..) | StmtKind::Default => {}
        StmtKind::Empty => {}
    }

    g.line = saved_line;
}

fn gen_stmt_list(g: &mut LowerGen, stmts: &[StmtId]) {
    for &id in stmts {
        open_dead_block(g, id);
        gen_stmt(g, id);
    }
}

/// Code after a terminator goes into a fresh block. Labels open their own
/// block, so they need none.
fn open_dead_block(g: &mut LowerGen, next: StmtId) {
    if !g.is_terminated() {
        return;
    }

    match g.stmt(next).kind {
        StmtKind::Label(..) | StmtKind::Case(..) | StmtKind::Default => {}
        _ => {
            let dead = g.new_block("dead");
            g.switch_to(dead);
        }
    }
}

fn gen_stmt_var(g: &mut LowerGen, decl: &VarDecl, ty: Option<TypeId>) {
    let var = g.var_reg(decl.name, ty);

    if let Some(init) = decl.init {
        let value = gen_expr(g, init);
        g.emit_copy(var, value);
    }
}

fn gen_stmt_return(g: &mut LowerGen, value: Option<ExprId>) {
    let value = match value {
        Some(value) => gen_expr(g, value),
        None => Operand::None,
    };
    g.emit_ret(value);
}
