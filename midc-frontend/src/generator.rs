use std::collections::HashMap;

use midc_ast::{Expr, ExprId, Name, Stmt, StmtId, TranslationUnit, TypeId};
use midc_ir::{
    BlockId, Function, Instr, Opcode, Operand, PhiArg, StringTable, SwitchCase,
};

mod expr;
mod function;
mod stmt;

pub use self::function::{generate_fct, generate_global, generate_program};

/// Per-function lowering state: the function under construction, the
/// block that receives new instructions and the jump targets of the
/// enclosing loops and switches.
pub(crate) struct LowerGen<'a> {
    unit: &'a TranslationUnit,
    strings: &'a mut StringTable,
    fct: Function,
    current: BlockId,
    line: u32,

    break_targets: Vec<BlockId>,
    continue_targets: Vec<BlockId>,
    goto_targets: HashMap<Name, BlockId>,
    label_blocks: HashMap<StmtId, BlockId>,
}

impl<'a> LowerGen<'a> {
    fn expr(&self, id: ExprId) -> &'a Expr {
        self.unit.expr(id)
    }

    fn stmt(&self, id: StmtId) -> &'a Stmt {
        self.unit.stmt(id)
    }

    fn name(&self, name: Name) -> &'a str {
        self.unit.name(name)
    }

    fn new_block(&mut self, label: &str) -> BlockId {
        self.fct.new_block(Some(label))
    }

    fn switch_to(&mut self, block: BlockId) {
        self.current = block;
    }

    fn current(&self) -> BlockId {
        self.current
    }

    fn is_terminated(&self) -> bool {
        self.fct.block(self.current).is_terminated()
    }

    fn emit(&mut self, instr: Instr) {
        self.fct.emit(self.current, instr);
    }

    /// Ends the current block with a jump to `target` unless it already
    /// ends in a terminator.
    fn ensure_terminator(&mut self, target: BlockId) {
        if !self.is_terminated() {
            self.emit_jump(target);
        }
    }

    fn new_temp(&mut self, ty: Option<TypeId>) -> Operand {
        Operand::reg(self.fct.new_reg(), ty)
    }

    fn var_reg(&mut self, name: Name, ty: Option<TypeId>) -> Operand {
        let reg = self.fct.var_lookup(name, ty);
        Operand::reg(reg, ty)
    }

    fn emit_unary(&mut self, opcode: Opcode, ty: Option<TypeId>, src: Operand) -> Operand {
        let dst = self.new_temp(ty);
        let line = self.line;
        self.emit(Instr::unary(opcode, dst, src, line));
        dst
    }

    fn emit_binary(
        &mut self,
        opcode: Opcode,
        ty: Option<TypeId>,
        lhs: Operand,
        rhs: Operand,
    ) -> Operand {
        let dst = self.new_temp(ty);
        let line = self.line;
        self.emit(Instr::binary(opcode, dst, lhs, rhs, line));
        dst
    }

    fn emit_const(&mut self, value: Operand, ty: Option<TypeId>) -> Operand {
        self.emit_unary(Opcode::Const, ty, value)
    }

    fn emit_copy(&mut self, dst: Operand, src: Operand) {
        let line = self.line;
        self.emit(Instr::unary(Opcode::Copy, dst, src, line));
    }

    fn emit_store(&mut self, addr: Operand, value: Operand) {
        let line = self.line;
        self.emit(Instr::store(addr, value, line));
    }

    fn emit_param(&mut self, value: Operand) {
        let line = self.line;
        let mut instr = Instr::new(Opcode::Param, line);
        instr.src1 = value;
        self.emit(instr);
    }

    fn emit_jump(&mut self, target: BlockId) {
        let line = self.line;
        self.emit(Instr::jump(target, line));
    }

    fn emit_branch(&mut self, cond: Operand, true_target: BlockId, false_target: BlockId) {
        let line = self.line;
        self.emit(Instr::branch(cond, true_target, false_target, line));
    }

    fn emit_switch(&mut self, value: Operand, cases: Vec<SwitchCase>, default: BlockId) {
        let line = self.line;
        self.emit(Instr::switch(value, cases, default, line));
    }

    fn emit_ret(&mut self, value: Operand) {
        let line = self.line;
        self.emit(Instr::ret(value, line));
    }

    fn emit_nop(&mut self) {
        let line = self.line;
        self.emit(Instr::nop(line));
    }

    fn emit_phi(&mut self, dst: Operand, args: Vec<PhiArg>) {
        let line = self.line;
        self.emit(Instr::phi(dst, None, args, line));
    }
}
