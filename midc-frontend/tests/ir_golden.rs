use std::fs;
use std::path::PathBuf;

use midc_ast::{BinOp, Builder, TranslationUnit};
use midc_frontend::{compile, Options};
use midc_ir::display_program;

// int both(int a, int b) { return a && b; }
fn logical_and() -> TranslationUnit {
    let mut b = Builder::new();
    let a = b.build_ident("a");
    let rhs = b.build_ident("b");
    let and = b.build_bin(BinOp::LogicalAnd, a, rhs);
    let ret = b.build_return(Some(and));
    let body = b.build_block(vec![ret]);
    b.build_fct("both", &["a", "b"], body);
    b.finish()
}

// int count(int c) { int x = 0; while (c) { x = x + 1; } return x; }
fn while_counter() -> TranslationUnit {
    let mut b = Builder::new();
    let zero = b.build_int(0);
    let decl = b.build_var("x", Some(zero));

    let cond = b.build_ident("c");
    let x = b.build_ident("x");
    let one = b.build_int(1);
    let add = b.build_bin(BinOp::Add, x, one);
    let target = b.build_ident("x");
    let assign = b.build_assign(target, add);
    let stmt = b.build_expr_stmt(assign);
    let loop_body = b.build_block(vec![stmt]);
    let while_ = b.build_while(cond, loop_body);

    let x = b.build_ident("x");
    let ret = b.build_return(Some(x));
    let body = b.build_block(vec![decl, while_, ret]);
    b.build_fct("count", &["c"], body);
    b.finish()
}

// int g = 7;
// int pick(int v) {
//     switch (v) { case 1: return 10; case 2: v = 3; default: break; }
//     return v;
// }
fn switch_fallthrough() -> TranslationUnit {
    let mut b = Builder::new();
    let ty = b.int_ty();
    let seven = b.build_int(7);
    b.build_global("g", ty, Some(seven));

    let value = b.build_ident("v");
    let case1 = b.build_case(1);
    let ten = b.build_int(10);
    let ret10 = b.build_return(Some(ten));
    let case2 = b.build_case(2);
    let target = b.build_ident("v");
    let three = b.build_int(3);
    let assign = b.build_assign(target, three);
    let assign = b.build_expr_stmt(assign);
    let default = b.build_default();
    let brk = b.build_break();
    let cases = b.build_block(vec![case1, ret10, case2, assign, default, brk]);
    let switch = b.build_switch(value, cases);

    let v = b.build_ident("v");
    let ret = b.build_return(Some(v));
    let body = b.build_block(vec![switch, ret]);
    b.build_fct("pick", &["v"], body);
    b.finish()
}

fn golden_programs() -> Vec<(&'static str, TranslationUnit)> {
    vec![
        ("logical_and", logical_and()),
        ("while_counter", while_counter()),
        ("switch_fallthrough", switch_fallthrough()),
    ]
}

#[test]
fn ir_golden_files() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("ir");
    let mut mismatches = 0;

    for (name, unit) in golden_programs() {
        let compilation = compile(&unit, &Options::new()).expect("valid ssa");
        let actual = display_program(&compilation.program, &unit.interner);

        let path = dir.join(format!("{}.out", name));
        let expected = fs::read_to_string(&path).expect("missing golden file");

        if expected != actual {
            println!("golden mismatch for {}", name);
            println!("== EXPECTED");
            println!("{}", expected);
            println!("== ACTUAL");
            println!("{}", actual);
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        panic!("{} golden file(s) mismatched", mismatches);
    }
}
