use std::collections::HashMap;

use tracing::debug;

use midc_ast::{ExprKind, FunctionDecl, GlobalDecl, Item, StmtId, StmtKind, TranslationUnit};
use midc_ir::{build_cfg, Function, Global, Operand, Program, StringTable};

use super::stmt::gen_stmt;
use super::LowerGen;

pub fn generate_program(unit: &TranslationUnit) -> Program {
    let mut prog = Program::new();

    for item in &unit.items {
        match item {
            Item::Function(decl) => {
                if let Some(fct) = generate_fct(unit, &mut prog.strings, decl) {
                    prog.functions.push(fct);
                }
            }
            Item::Global(decl) => prog.globals.push(generate_global(unit, decl)),
        }
    }

    debug!(
        functions = prog.functions.len(),
        globals = prog.globals.len(),
        strings = prog.strings.len(),
        "program lowered"
    );
    prog
}

/// Lowers one function definition. Declarations without a body produce no
/// function.
pub fn generate_fct(
    unit: &TranslationUnit,
    strings: &mut StringTable,
    decl: &FunctionDecl,
) -> Option<Function> {
    let body = decl.body?;

    let mut fct = Function::new(decl.name, decl.line);
    fct.return_type = Some(decl.return_type);
    create_params(unit, &mut fct, decl);
    let entry = fct.new_block(Some("entry"));
    fct.entry = entry;

    let g = LowerGen {
        unit,
        strings,
        fct,
        current: entry,
        line: decl.line,

        break_targets: Vec::new(),
        continue_targets: Vec::new(),
        goto_targets: HashMap::new(),
        label_blocks: HashMap::new(),
    };

    Some(generate_fct_impl(g, body))
}

fn generate_fct_impl(mut g: LowerGen, body: StmtId) -> Function {
    create_label_blocks(&mut g, body);
    gen_stmt(&mut g, body);
    terminate_open_blocks(&mut g);

    let mut fct = g.fct;
    build_cfg(&mut fct);

    debug!(
        function = %g.unit.name(fct.name),
        blocks = fct.block_count(),
        vregs = fct.reg_count(),
        vars = fct.vars.len(),
        "function lowered"
    );
    fct
}

/// Records a global variable. Only an integer literal initializer is kept.
pub fn generate_global(unit: &TranslationUnit, decl: &GlobalDecl) -> Global {
    let init = decl.init.and_then(|init| match unit.expr(init).kind {
        ExprKind::LitInt(value) => Some(value),
        _ => None,
    });

    Global {
        name: decl.name,
        ty: decl.ty,
        init,
    }
}

fn create_params(unit: &TranslationUnit, fct: &mut Function, decl: &FunctionDecl) {
    for param in &decl.params {
        let name = match param.name {
            Some(name) => name,
            None => continue,
        };

        if unit.types.is_void(param.ty) {
            continue;
        }

        fct.declare_param(name, param.ty);
    }
}

/// Creates one block per label statement, in source order, so that both
/// backward and forward gotos have a target.
fn create_label_blocks(g: &mut LowerGen, id: StmtId) {
    let stmt = g.stmt(id);

    match stmt.kind {
        StmtKind::Label(name) => {
            let label = g.name(name);
            let block = g.new_block(label);
            g.label_blocks.insert(id, block);
            g.goto_targets.entry(name).or_insert(block);
        }

        StmtKind::Block(ref stmts) => {
            for &child in stmts {
                create_label_blocks(g, child);
            }
        }

        StmtKind::If(ref node) => {
            create_label_blocks(g, node.then_branch);
            if let Some(else_branch) = node.else_branch {
                create_label_blocks(g, else_branch);
            }
        }

        StmtKind::While(ref node) => create_label_blocks(g, node.body),
        StmtKind::DoWhile(ref node) => create_label_blocks(g, node.body),

        StmtKind::For(ref node) => {
            if let Some(init) = node.init {
                create_label_blocks(g, init);
            }
            if let Some(body) = node.body {
                create_label_blocks(g, body);
            }
        }

        StmtKind::Switch(ref node) => create_label_blocks(g, node.body),

        StmtKind::VarDecl(..)
        | StmtKind::Expr(..)
        | StmtKind::Return(..)
        | StmtKind::Case(..)
        | StmtKind::Default
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Goto(..)
        | StmtKind::Assert(..)
        | StmtKind::Empty
        | StmtKind::Error => {}
    }
}

// The block that lowering ends in gets the implicit return; a label block
// that was never entered gets one as well.
fn terminate_open_blocks(g: &mut LowerGen) {
    g.line = g.fct.line;

    for block in g.fct.block_ids().collect::<Vec<_>>() {
        if !g.fct.block(block).is_terminated() {
            g.switch_to(block);
            g.emit_ret(Operand::None);
        }
    }
}
