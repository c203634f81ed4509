use id_arena::{Arena, Id};

use crate::interner::{Interner, Name};
use crate::ty::{TypeId, Types};

pub type ExprId = Id<Expr>;
pub type StmtId = Id<Stmt>;

pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<TypeId>,
    pub line: u32,
}

pub enum ExprKind {
    LitInt(i64),
    LitFloat(f64),
    LitStr(String),
    Ident(Name),
    Bin(BinExpr),
    Un(UnExpr),
    Cast(CastExpr),
    Index(IndexExpr),
    Member(MemberExpr),
    Call(CallExpr),
    Assign(AssignExpr),
    InitList(Vec<ExprId>),
    Error,
}

impl ExprKind {
    pub fn to_ident(&self) -> Option<Name> {
        match self {
            ExprKind::Ident(name) => Some(*name),
            _ => None,
        }
    }

    pub fn is_lit_int(&self) -> bool {
        match self {
            ExprKind::LitInt(..) => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LogicalAnd,
    LogicalOr,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::LogicalAnd => "&&",
            BinOp::LogicalOr => "||",
        }
    }

    pub fn is_short_circuit(&self) -> bool {
        match self {
            BinOp::LogicalAnd | BinOp::LogicalOr => true,
            _ => false,
        }
    }

    pub fn is_compare(&self) -> bool {
        match self {
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnOp {
    Neg,
    Not,
    BitNot,
    Deref,
    AddrOf,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

pub struct BinExpr {
    pub op: BinOp,
    pub lhs: ExprId,
    pub rhs: ExprId,
}

pub struct UnExpr {
    pub op: UnOp,
    pub operand: ExprId,
}

pub struct CastExpr {
    pub target: TypeId,
    pub expr: ExprId,
}

pub struct IndexExpr {
    pub array: ExprId,
    pub index: ExprId,
}

pub struct MemberExpr {
    pub base: ExprId,
    pub member: Name,
    pub arrow: bool,
}

pub struct CallExpr {
    pub callee: Name,
    pub args: Vec<ExprId>,
}

pub struct AssignExpr {
    pub target: ExprId,
    pub value: ExprId,
}

pub struct Stmt {
    pub kind: StmtKind,
    pub ty: Option<TypeId>,
    pub line: u32,
}

pub enum StmtKind {
    Block(Vec<StmtId>),
    VarDecl(VarDecl),
    Expr(ExprId),
    Return(Option<ExprId>),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Case(i64),
    Default,
    Break,
    Continue,
    Goto(Name),
    Label(Name),
    Assert(Option<ExprId>),
    Empty,
    Error,
}

impl StmtKind {
    pub fn is_switch_label(&self) -> bool {
        match self {
            StmtKind::Case(..) | StmtKind::Default => true,
            _ => false,
        }
    }
}

pub struct VarDecl {
    pub name: Name,
    pub init: Option<ExprId>,
}

pub struct IfStmt {
    pub cond: ExprId,
    pub then_branch: StmtId,
    pub else_branch: Option<StmtId>,
}

pub struct WhileStmt {
    pub cond: ExprId,
    pub body: StmtId,
}

pub struct DoWhileStmt {
    pub body: StmtId,
    pub cond: ExprId,
}

pub struct ForStmt {
    pub init: Option<StmtId>,
    pub cond: Option<ExprId>,
    pub incr: Option<ExprId>,
    pub body: Option<StmtId>,
}

pub struct SwitchStmt {
    pub cond: ExprId,
    pub body: StmtId,
}

pub struct ParamDecl {
    pub name: Option<Name>,
    pub ty: TypeId,
}

pub struct FunctionDecl {
    pub name: Name,
    pub return_type: TypeId,
    pub params: Vec<ParamDecl>,
    pub body: Option<StmtId>,
    pub line: u32,
}

impl FunctionDecl {
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

pub struct GlobalDecl {
    pub name: Name,
    pub ty: TypeId,
    pub init: Option<ExprId>,
    pub line: u32,
}

pub enum Item {
    Function(FunctionDecl),
    Global(GlobalDecl),
}

/// A type-checked translation unit: the top-level items plus the arenas
/// every node id points into.
pub struct TranslationUnit {
    pub interner: Interner,
    pub types: Types,
    pub items: Vec<Item>,
    exprs: Arena<Expr>,
    stmts: Arena<Stmt>,
}

impl TranslationUnit {
    pub fn new(interner: Interner, types: Types) -> TranslationUnit {
        TranslationUnit {
            interner,
            types,
            items: Vec::new(),
            exprs: Arena::new(),
            stmts: Arena::new(),
        }
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.alloc(expr)
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.stmts.alloc(stmt)
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    pub fn name(&self, name: Name) -> &str {
        self.interner.str(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(fct) => Some(fct),
            Item::Global(..) => None,
        })
    }

    pub fn globals(&self) -> impl Iterator<Item = &GlobalDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Global(global) => Some(global),
            Item::Function(..) => None,
        })
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionDecl> {
        let name = self.interner.lookup(name)?;
        self.functions().find(|fct| fct.name == name)
    }
}
