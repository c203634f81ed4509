use crate::ast::*;
use crate::interner::{Interner, Name};
use crate::ty::{TypeId, Types};

/// Builds a `TranslationUnit` node by node. Expressions get the `int` type
/// unless a typed constructor is used; every node records the current line.
pub struct Builder {
    unit: TranslationUnit,
    line: u32,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            unit: TranslationUnit::new(Interner::new(), Types::new()),
            line: 1,
        }
    }

    pub fn finish(self) -> TranslationUnit {
        self.unit
    }

    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    pub fn types(&mut self) -> &mut Types {
        &mut self.unit.types
    }

    pub fn int_ty(&self) -> TypeId {
        self.unit.types.int()
    }

    pub fn void_ty(&self) -> TypeId {
        self.unit.types.void()
    }

    pub fn name(&mut self, value: &str) -> Name {
        self.unit.interner.intern(value)
    }

    fn expr(&mut self, kind: ExprKind, ty: Option<TypeId>) -> ExprId {
        let line = self.line;
        self.unit.alloc_expr(Expr { kind, ty, line })
    }

    fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.stmt_typed(kind, None)
    }

    fn stmt_typed(&mut self, kind: StmtKind, ty: Option<TypeId>) -> StmtId {
        let line = self.line;
        self.unit.alloc_stmt(Stmt { kind, ty, line })
    }

    pub fn build_int(&mut self, value: i64) -> ExprId {
        let ty = self.int_ty();
        self.expr(ExprKind::LitInt(value), Some(ty))
    }

    pub fn build_float(&mut self, value: f64) -> ExprId {
        let ty = self.unit.types.double();
        self.expr(ExprKind::LitFloat(value), Some(ty))
    }

    pub fn build_string(&mut self, value: &str) -> ExprId {
        let char_ty = self.unit.types.char();
        let ty = self.unit.types.ptr(char_ty);
        self.expr(ExprKind::LitStr(value.to_string()), Some(ty))
    }

    pub fn build_ident(&mut self, name: &str) -> ExprId {
        let ty = self.int_ty();
        self.build_ident_typed(name, ty)
    }

    pub fn build_ident_typed(&mut self, name: &str, ty: TypeId) -> ExprId {
        let name = self.name(name);
        self.expr(ExprKind::Ident(name), Some(ty))
    }

    pub fn build_bin(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let ty = self.int_ty();
        self.expr(ExprKind::Bin(BinExpr { op, lhs, rhs }), Some(ty))
    }

    pub fn build_un(&mut self, op: UnOp, operand: ExprId) -> ExprId {
        let ty = self.int_ty();
        self.expr(ExprKind::Un(UnExpr { op, operand }), Some(ty))
    }

    pub fn build_cast(&mut self, target: TypeId, expr: ExprId) -> ExprId {
        self.expr(ExprKind::Cast(CastExpr { target, expr }), Some(target))
    }

    pub fn build_index(&mut self, array: ExprId, index: ExprId) -> ExprId {
        let ty = self.int_ty();
        self.expr(ExprKind::Index(IndexExpr { array, index }), Some(ty))
    }

    pub fn build_member(&mut self, base: ExprId, member: &str, arrow: bool) -> ExprId {
        let ty = self.int_ty();
        let member = self.name(member);
        self.expr(
            ExprKind::Member(MemberExpr {
                base,
                member,
                arrow,
            }),
            Some(ty),
        )
    }

    pub fn build_call(&mut self, callee: &str, args: Vec<ExprId>) -> ExprId {
        let ty = self.int_ty();
        let callee = self.name(callee);
        self.expr(ExprKind::Call(CallExpr { callee, args }), Some(ty))
    }

    pub fn build_assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        let ty = self.unit.expr(target).ty;
        self.expr(ExprKind::Assign(AssignExpr { target, value }), ty)
    }

    pub fn build_init_list(&mut self, elements: Vec<ExprId>) -> ExprId {
        self.expr(ExprKind::InitList(elements), None)
    }

    pub fn build_error_expr(&mut self) -> ExprId {
        self.expr(ExprKind::Error, None)
    }

    pub fn build_block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        self.stmt(StmtKind::Block(stmts))
    }

    pub fn build_var(&mut self, name: &str, init: Option<ExprId>) -> StmtId {
        let ty = self.int_ty();
        self.build_var_typed(name, ty, init)
    }

    pub fn build_var_typed(&mut self, name: &str, ty: TypeId, init: Option<ExprId>) -> StmtId {
        let name = self.name(name);
        self.stmt_typed(StmtKind::VarDecl(VarDecl { name, init }), Some(ty))
    }

    pub fn build_expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn build_return(&mut self, expr: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Return(expr))
    }

    pub fn build_if(
        &mut self,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.stmt(StmtKind::If(IfStmt {
            cond,
            then_branch,
            else_branch,
        }))
    }

    pub fn build_while(&mut self, cond: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::While(WhileStmt { cond, body }))
    }

    pub fn build_do_while(&mut self, body: StmtId, cond: ExprId) -> StmtId {
        self.stmt(StmtKind::DoWhile(DoWhileStmt { body, cond }))
    }

    pub fn build_for(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        incr: Option<ExprId>,
        body: Option<StmtId>,
    ) -> StmtId {
        self.stmt(StmtKind::For(ForStmt {
            init,
            cond,
            incr,
            body,
        }))
    }

    pub fn build_switch(&mut self, cond: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::Switch(SwitchStmt { cond, body }))
    }

    pub fn build_case(&mut self, value: i64) -> StmtId {
        self.stmt(StmtKind::Case(value))
    }

    pub fn build_default(&mut self) -> StmtId {
        self.stmt(StmtKind::Default)
    }

    pub fn build_break(&mut self) -> StmtId {
        self.stmt(StmtKind::Break)
    }

    pub fn build_continue(&mut self) -> StmtId {
        self.stmt(StmtKind::Continue)
    }

    pub fn build_goto(&mut self, label: &str) -> StmtId {
        let label = self.name(label);
        self.stmt(StmtKind::Goto(label))
    }

    pub fn build_label(&mut self, label: &str) -> StmtId {
        let label = self.name(label);
        self.stmt(StmtKind::Label(label))
    }

    pub fn build_assert(&mut self, cond: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Assert(cond))
    }

    pub fn build_empty(&mut self) -> StmtId {
        self.stmt(StmtKind::Empty)
    }

    pub fn build_error_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Error)
    }

    /// Adds a function definition whose parameters are all `int`.
    pub fn build_fct(&mut self, name: &str, params: &[&str], body: StmtId) {
        let int_ty = self.int_ty();
        let params = params
            .iter()
            .map(|param| (Some(*param), int_ty))
            .collect::<Vec<_>>();
        self.build_fct_typed(name, int_ty, &params, Some(body));
    }

    pub fn build_fct_typed(
        &mut self,
        name: &str,
        return_type: TypeId,
        params: &[(Option<&str>, TypeId)],
        body: Option<StmtId>,
    ) {
        let name = self.name(name);
        let params = params
            .iter()
            .map(|&(param, ty)| ParamDecl {
                name: param.map(|param| self.unit.interner.intern(param)),
                ty,
            })
            .collect();
        let line = self.line;

        self.unit.items.push(Item::Function(FunctionDecl {
            name,
            return_type,
            params,
            body,
            line,
        }));
    }

    pub fn build_global(&mut self, name: &str, ty: TypeId, init: Option<ExprId>) {
        let name = self.name(name);
        let line = self.line;
        self.unit
            .items
            .push(Item::Global(GlobalDecl { name, ty, init, line }));
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_function_with_body() {
        let mut b = Builder::new();
        b.set_line(3);
        let x = b.build_ident("x");
        let one = b.build_int(1);
        let sum = b.build_bin(BinOp::Add, x, one);
        let ret = b.build_return(Some(sum));
        let body = b.build_block(vec![ret]);
        b.build_fct("inc", &["x"], body);
        let unit = b.finish();

        let fct = unit.find_function("inc").expect("missing function");
        assert_eq!(1, fct.params.len());
        assert_eq!(Some("x"), fct.params[0].name.map(|name| unit.name(name)));
        assert_eq!(3, unit.expr(sum).line);

        match &unit.stmt(fct.body.expect("missing body")).kind {
            StmtKind::Block(stmts) => assert_eq!(1, stmts.len()),
            _ => panic!("block expected"),
        }
    }

    #[test]
    fn build_typed_declaration() {
        let mut b = Builder::new();
        let long = b.types().long();
        let var = b.build_var_typed("count", long, None);
        let body = b.build_block(vec![var]);
        b.build_fct("f", &[], body);
        let unit = b.finish();

        let stmt = unit.stmt(var);
        assert_eq!(Some(long), stmt.ty);
        assert!(unit.functions().all(|fct| fct.has_body()));
    }
}
