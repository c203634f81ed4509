use std::fmt;

use midc_ast::{Name, TypeId};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Register(pub usize);

impl Register {
    pub fn to_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BlockId(pub usize);

impl BlockId {
    pub fn to_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VarId(pub usize);

impl VarId {
    pub fn to_usize(&self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StringId(pub usize);

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Operand {
    None,
    Reg(Register, Option<TypeId>),
    Member(Name),
    Int(i64),
    Float(f64),
    Label(BlockId),
    Func(Name),
    Str(StringId),
}

impl Operand {
    pub fn reg(reg: Register, ty: Option<TypeId>) -> Operand {
        Operand::Reg(reg, ty)
    }

    pub fn is_none(&self) -> bool {
        match self {
            Operand::None => true,
            _ => false,
        }
    }

    pub fn to_reg(&self) -> Option<Register> {
        match self {
            Operand::Reg(reg, _) => Some(*reg),
            _ => None,
        }
    }

    pub fn to_label(&self) -> Option<BlockId> {
        match self {
            Operand::Label(block) => Some(*block),
            _ => None,
        }
    }

    pub fn to_int(&self) -> Option<i64> {
        match self {
            Operand::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Operand::Reg(_, ty) => *ty,
            _ => None,
        }
    }

    /// Replaces the register of a register operand, keeping its type.
    pub fn rename(&mut self, new_reg: Register) {
        match self {
            Operand::Reg(reg, _) => *reg = new_reg,
            _ => unreachable!("rename of non-register operand"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Opcode {
    Const,
    Copy,
    Alloca,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpLe,
    CmpGt,
    CmpGe,
    LogicalAnd,
    LogicalOr,
    Neg,
    Not,
    BitNot,
    Load,
    Store,
    AddrOf,
    Member,
    Cast,
    Index,
    IndexAddr,
    Param,
    Call,
    Jump,
    Branch,
    Ret,
    Switch,
    Nop,
    Phi,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Const => "const",
            Opcode::Copy => "copy",
            Opcode::Alloca => "alloca",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::CmpEq => "cmp_eq",
            Opcode::CmpNe => "cmp_ne",
            Opcode::CmpLt => "cmp_lt",
            Opcode::CmpLe => "cmp_le",
            Opcode::CmpGt => "cmp_gt",
            Opcode::CmpGe => "cmp_ge",
            Opcode::LogicalAnd => "logical_and",
            Opcode::LogicalOr => "logical_or",
            Opcode::Neg => "neg",
            Opcode::Not => "not",
            Opcode::BitNot => "bitnot",
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::AddrOf => "addr_of",
            Opcode::Member => "member",
            Opcode::Cast => "cast",
            Opcode::Index => "index",
            Opcode::IndexAddr => "index_addr",
            Opcode::Param => "param",
            Opcode::Call => "call",
            Opcode::Jump => "jump",
            Opcode::Branch => "branch",
            Opcode::Ret => "ret",
            Opcode::Switch => "switch",
            Opcode::Nop => "nop",
            Opcode::Phi => "phi",
        }
    }

    pub fn is_terminator(&self) -> bool {
        match self {
            Opcode::Jump | Opcode::Branch | Opcode::Ret | Opcode::Switch => true,
            _ => false,
        }
    }

    pub fn is_compare(&self) -> bool {
        match self {
            Opcode::CmpEq
            | Opcode::CmpNe
            | Opcode::CmpLt
            | Opcode::CmpLe
            | Opcode::CmpGt
            | Opcode::CmpGe => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SwitchCase {
    pub value: i64,
    pub target: BlockId,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PhiArg {
    pub value: Operand,
    pub pred: BlockId,
}

#[derive(Clone, PartialEq, Debug)]
pub enum InstrData {
    None,
    Branch {
        false_target: BlockId,
    },
    Switch {
        cases: Vec<SwitchCase>,
        default: BlockId,
    },
    Phi {
        var: Option<VarId>,
        args: Vec<PhiArg>,
    },
}

/// A three-address instruction.
///
/// Slot conventions: `jump` keeps its target label in `src1`; `branch` keeps
/// the condition in `src1` and the true target in `src2`; `store` writes
/// `src2` through the address in `src1` and defines nothing; `call` keeps the
/// callee in `src1` and the argument count in `src2`.
#[derive(Clone, PartialEq, Debug)]
pub struct Instr {
    pub opcode: Opcode,
    pub dst: Operand,
    pub src1: Operand,
    pub src2: Operand,
    pub line: u32,
    pub data: InstrData,
}

impl Instr {
    pub fn new(opcode: Opcode, line: u32) -> Instr {
        Instr {
            opcode,
            dst: Operand::None,
            src1: Operand::None,
            src2: Operand::None,
            line,
            data: InstrData::None,
        }
    }

    pub fn unary(opcode: Opcode, dst: Operand, src: Operand, line: u32) -> Instr {
        let mut instr = Instr::new(opcode, line);
        instr.dst = dst;
        instr.src1 = src;
        instr
    }

    pub fn binary(opcode: Opcode, dst: Operand, lhs: Operand, rhs: Operand, line: u32) -> Instr {
        let mut instr = Instr::new(opcode, line);
        instr.dst = dst;
        instr.src1 = lhs;
        instr.src2 = rhs;
        instr
    }

    pub fn store(addr: Operand, value: Operand, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Store, line);
        instr.src1 = addr;
        instr.src2 = value;
        instr
    }

    pub fn jump(target: BlockId, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Jump, line);
        instr.src1 = Operand::Label(target);
        instr
    }

    pub fn branch(cond: Operand, true_target: BlockId, false_target: BlockId, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Branch, line);
        instr.src1 = cond;
        instr.src2 = Operand::Label(true_target);
        instr.data = InstrData::Branch { false_target };
        instr
    }

    pub fn switch(value: Operand, cases: Vec<SwitchCase>, default: BlockId, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Switch, line);
        instr.src1 = value;
        instr.data = InstrData::Switch { cases, default };
        instr
    }

    pub fn ret(value: Operand, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Ret, line);
        instr.src1 = value;
        instr
    }

    pub fn nop(line: u32) -> Instr {
        Instr::new(Opcode::Nop, line)
    }

    pub fn phi(dst: Operand, var: Option<VarId>, args: Vec<PhiArg>, line: u32) -> Instr {
        let mut instr = Instr::new(Opcode::Phi, line);
        instr.dst = dst;
        instr.data = InstrData::Phi { var, args };
        instr
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    pub fn is_phi(&self) -> bool {
        self.opcode == Opcode::Phi
    }

    /// The register this instruction defines, if any.
    pub fn def(&self) -> Option<Register> {
        self.dst.to_reg()
    }

    /// Every register read by this instruction, phi arguments included.
    pub fn uses(&self) -> impl Iterator<Item = Register> + '_ {
        self.src1
            .to_reg()
            .into_iter()
            .chain(self.src2.to_reg())
            .chain(self.phi_args().iter().filter_map(|arg| arg.value.to_reg()))
    }

    pub fn phi_var(&self) -> Option<VarId> {
        match self.data {
            InstrData::Phi { var, .. } => var,
            _ => None,
        }
    }

    pub fn phi_args(&self) -> &[PhiArg] {
        match self.data {
            InstrData::Phi { ref args, .. } => args,
            _ => &[],
        }
    }

    pub fn phi_args_mut(&mut self) -> &mut [PhiArg] {
        match self.data {
            InstrData::Phi { ref mut args, .. } => args,
            _ => &mut [],
        }
    }

    pub fn false_target(&self) -> Option<BlockId> {
        match self.data {
            InstrData::Branch { false_target } => Some(false_target),
            _ => None,
        }
    }

    pub fn switch_cases(&self) -> &[SwitchCase] {
        match self.data {
            InstrData::Switch { ref cases, .. } => cases,
            _ => &[],
        }
    }

    pub fn switch_default(&self) -> Option<BlockId> {
        match self.data {
            InstrData::Switch { default, .. } => Some(default),
            _ => None,
        }
    }

    /// Control-flow targets of a terminator in edge order. Non-terminators
    /// have none.
    pub fn targets(&self) -> Vec<BlockId> {
        match self.opcode {
            Opcode::Jump => self.src1.to_label().into_iter().collect(),
            Opcode::Branch => self
                .src2
                .to_label()
                .into_iter()
                .chain(self.false_target())
                .collect(),
            Opcode::Switch => self
                .switch_cases()
                .iter()
                .map(|case| case.target)
                .chain(self.switch_default())
                .collect(),
            _ => Vec::new(),
        }
    }
}
