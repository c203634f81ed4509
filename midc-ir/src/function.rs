use midc_ast::{Name, TypeId};

use crate::data::{BlockId, Instr, Register, VarId};

pub struct Block {
    pub id: BlockId,
    pub label: String,
    pub instrs: Vec<Instr>,
    pub preds: Vec<BlockId>,
    pub succs: Vec<BlockId>,
    pub idom: Option<BlockId>,
    pub dom_frontier: Vec<BlockId>,
    // Reserved for loop analysis; nothing in this workspace fills them in.
    pub loop_depth: u32,
    pub loop_header: Option<BlockId>,
}

impl Block {
    pub fn new(id: BlockId, label: String) -> Block {
        Block {
            id,
            label,
            instrs: Vec::new(),
            preds: Vec::new(),
            succs: Vec::new(),
            idom: None,
            dom_frontier: Vec::new(),
            loop_depth: 0,
            loop_header: None,
        }
    }

    pub fn push(&mut self, instr: Instr) {
        debug_assert!(!self.is_terminated(), "instruction after terminator");
        self.instrs.push(instr);
    }

    pub fn prepend(&mut self, instr: Instr) {
        self.instrs.insert(0, instr);
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn last(&self) -> Option<&Instr> {
        self.instrs.last()
    }

    pub fn terminator(&self) -> Option<&Instr> {
        self.instrs.last().filter(|instr| instr.is_terminator())
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator().is_some()
    }

    pub fn phis(&self) -> impl Iterator<Item = &Instr> {
        self.instrs.iter().take_while(|instr| instr.is_phi())
    }

    pub fn phi_count(&self) -> usize {
        self.phis().count()
    }

    pub fn pred_index(&self, pred: BlockId) -> Option<usize> {
        self.preds.iter().position(|&p| p == pred)
    }
}

#[derive(Clone, Debug)]
pub struct VarData {
    pub name: Name,
    pub reg: Register,
    pub ty: Option<TypeId>,
    pub is_param: bool,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: TypeId,
}

pub struct Function {
    pub name: Name,
    pub return_type: Option<TypeId>,
    pub params: Vec<Param>,
    pub blocks: Vec<Block>,
    pub entry: BlockId,
    pub vars: Vec<VarData>,
    pub is_ssa: bool,
    /// Entry version of every variable after SSA construction: the canonical
    /// register for parameters, `None` for locals.
    pub ssa_param_regs: Vec<Option<Register>>,
    pub line: u32,
    next_reg: usize,
}

impl Function {
    pub fn new(name: Name, line: u32) -> Function {
        Function {
            name,
            return_type: None,
            params: Vec::new(),
            blocks: Vec::new(),
            entry: BlockId(0),
            vars: Vec::new(),
            is_ssa: false,
            ssa_param_regs: Vec::new(),
            line,
            next_reg: 0,
        }
    }

    /// Appends a block; an unlabeled block is named after its id.
    pub fn new_block(&mut self, label: Option<&str>) -> BlockId {
        let id = BlockId(self.blocks.len());
        let label = match label {
            Some(label) => label.to_string(),
            None => format!("bb{}", id.0),
        };
        self.blocks.push(Block::new(id, label));
        id
    }

    pub fn new_reg(&mut self) -> Register {
        let reg = Register(self.next_reg);
        self.next_reg += 1;
        reg
    }

    pub fn reg_count(&self) -> usize {
        self.next_reg
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.0]
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> {
        (0..self.blocks.len()).map(BlockId)
    }

    pub fn emit(&mut self, block: BlockId, instr: Instr) {
        self.block_mut(block).push(instr);
    }

    pub fn var(&self, id: VarId) -> &VarData {
        &self.vars[id.0]
    }

    pub fn find_var(&self, name: Name) -> Option<VarId> {
        self.vars.iter().position(|var| var.name == name).map(VarId)
    }

    /// Returns the canonical register of `name`, creating the variable on
    /// first use.
    pub fn var_lookup(&mut self, name: Name, ty: Option<TypeId>) -> Register {
        if let Some(id) = self.find_var(name) {
            return self.vars[id.0].reg;
        }

        let reg = self.new_reg();
        self.vars.push(VarData {
            name,
            reg,
            ty,
            is_param: false,
        });
        reg
    }

    pub fn declare_param(&mut self, name: Name, ty: TypeId) -> Register {
        let reg = self.var_lookup(name, Some(ty));
        for var in self.vars.iter_mut().filter(|var| var.name == name) {
            var.is_param = true;
        }
        self.params.push(Param { name, ty });
        reg
    }

    /// Maps each register below `reg_count()` to the variable that owns it
    /// as its canonical register.
    pub fn var_of_reg(&self) -> Vec<Option<VarId>> {
        let mut map = vec![None; self.next_reg];
        for (idx, var) in self.vars.iter().enumerate() {
            map[var.reg.0] = Some(VarId(idx));
        }
        map
    }

    pub fn instr_count(&self) -> usize {
        self.blocks.iter().map(|block| block.instrs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Opcode, Operand};

    #[test]
    fn blocks_get_default_labels() {
        let mut fct = Function::new(Name(0), 1);
        let entry = fct.new_block(Some("entry"));
        let other = fct.new_block(None);

        assert_eq!("entry", fct.block(entry).label);
        assert_eq!("bb1", fct.block(other).label);
        assert_eq!(2, fct.block_count());
    }

    #[test]
    fn var_lookup_reuses_register() {
        let mut fct = Function::new(Name(0), 1);
        let x = fct.var_lookup(Name(1), None);
        let tmp = fct.new_reg();
        assert_eq!(x, fct.var_lookup(Name(1), None));
        assert_ne!(x, tmp);
        assert_eq!(2, fct.reg_count());

        let map = fct.var_of_reg();
        assert_eq!(Some(VarId(0)), map[x.0]);
        assert_eq!(None, map[tmp.0]);
    }

    #[test]
    fn phis_lead_the_block() {
        let mut fct = Function::new(Name(0), 1);
        let bb = fct.new_block(None);
        let t0 = fct.new_reg();
        fct.emit(bb, Instr::ret(Operand::reg(t0, None), 1));
        fct.block_mut(bb)
            .prepend(Instr::phi(Operand::reg(t0, None), None, Vec::new(), 1));

        let block = fct.block(bb);
        assert_eq!(1, block.phi_count());
        assert_eq!(Some(Opcode::Ret), block.terminator().map(|t| t.opcode));
    }
}
