use midc_ast::ExprId;
use midc_ir::Operand;

use crate::generator::expr::gen_expr;
use crate::generator::LowerGen;

pub(super) fn gen_stmt_assert(g: &mut LowerGen, cond: Option<ExprId>) {
    let cond = match cond {
        Some(cond) => cond,
        None => return,
    };

    let fail_block = g.new_block("assert_fail");
    let ok_block = g.new_block("assert_ok");

    let cond = gen_expr(g, cond);
    g.emit_branch(cond, ok_block, fail_block);

    g.switch_to(fail_block);
    g.emit_nop();
    g.emit_ret(Operand::None);

    g.switch_to(ok_block);
}
