use tracing::{debug, instrument};

use midc_ast::TranslationUnit;
use midc_ir::{display_fct, Program};
use midc_ssa::{
    compute_liveness, compute_reaching_defs, construct_ssa, validate_ssa, Liveness, ReachingDefs,
};

pub mod error;
pub mod generator;
pub mod options;

pub use error::CompileError;
pub use generator::{generate_fct, generate_global, generate_program};
pub use options::Options;

/// Analysis results of one function, indexed like `Program::functions`.
pub struct FunctionAnalyses {
    pub liveness: Liveness,
    pub reaching: ReachingDefs,
}

pub struct Compilation {
    pub program: Program,
    pub analyses: Vec<FunctionAnalyses>,
}

/// Lowers a translation unit and runs the stages selected by `options`:
/// SSA construction, validation, analyses, then dumps.
#[instrument(skip_all)]
pub fn compile(unit: &TranslationUnit, options: &Options) -> Result<Compilation, CompileError> {
    let mut program = generate_program(unit);

    if let Some(ref filter) = options.emit_ir {
        emit_ir(unit, &program, filter);
    }

    if options.ssa {
        for fct in &mut program.functions {
            construct_ssa(fct);

            if options.validate {
                let violations = validate_ssa(fct);
                let function = unit.name(fct.name).to_string();
                debug!(function = %function, violations = violations.len(), "ssa validated");

                if !violations.is_empty() {
                    return Err(CompileError::InvalidSsa {
                        function,
                        violations,
                    });
                }
            }
        }

        if let Some(ref filter) = options.emit_ssa {
            emit_ir(unit, &program, filter);
        }
    }

    let analyses = if options.analyses {
        program
            .functions
            .iter()
            .map(|fct| FunctionAnalyses {
                liveness: compute_liveness(fct),
                reaching: compute_reaching_defs(fct),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Compilation { program, analyses })
}

/// Prints the dump of every function whose name matches `filter`.
pub fn emit_ir(unit: &TranslationUnit, prog: &Program, filter: &str) {
    for fct in &prog.functions {
        let name = unit.name(fct.name);
        if fct_pattern_match(name, filter) {
            print!("{}", display_fct(fct, &unit.interner, &prog.strings));
        }
    }
}

fn fct_pattern_match(name: &str, pattern: &str) -> bool {
    if pattern == "all" || pattern == "*" {
        return true;
    }

    for part in pattern.split(',') {
        if name.ends_with(part) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use midc_ast::{BinOp, Builder};
    use midc_ssa::SsaViolation;

    fn sample_unit() -> TranslationUnit {
        let mut b = Builder::new();
        let x = b.build_ident("x");
        let one = b.build_int(1);
        let add = b.build_bin(BinOp::Add, x, one);
        let ret = b.build_return(Some(add));
        let body = b.build_block(vec![ret]);
        b.build_fct("inc", &["x"], body);

        let ty = b.int_ty();
        let init = b.build_int(42);
        b.build_global("answer", ty, Some(init));
        b.finish()
    }

    #[test]
    fn pattern_match() {
        assert!(fct_pattern_match("foo", "all"));
        assert!(fct_pattern_match("foo", "*"));
        assert!(fct_pattern_match("foo", "bar,foo"));
        assert!(fct_pattern_match("my_foo", "foo"));
        assert!(!fct_pattern_match("foo", "bar"));
    }

    #[test]
    fn default_pipeline_builds_validated_ssa() {
        let unit = sample_unit();
        let compilation = compile(&unit, &Options::new()).expect("valid ssa");

        assert_eq!(1, compilation.program.functions.len());
        assert_eq!(Some(42), compilation.program.globals[0].init);
        assert!(compilation.program.functions[0].is_ssa);
        assert!(compilation.analyses.is_empty());
    }

    #[test]
    fn ssa_can_be_disabled() {
        let unit = sample_unit();
        let options = Options::new().set_ssa(false);
        let compilation = compile(&unit, &options).expect("no validation");

        assert!(!compilation.program.functions[0].is_ssa);
    }

    #[test]
    fn analyses_are_computed_per_function() {
        let unit = sample_unit();
        let options = Options::new().set_analyses(true);
        let compilation = compile(&unit, &options).expect("valid ssa");

        assert_eq!(1, compilation.analyses.len());
        let fct = &compilation.program.functions[0];
        let param = fct.ssa_param_regs[0].expect("param version");
        assert!(compilation.analyses[0].liveness.defs(fct.entry).contains(param.0));
        assert!(!compilation.analyses[0].reaching.defs().is_empty());
    }

    #[test]
    fn invalid_ssa_error_lists_violations() {
        let err = CompileError::InvalidSsa {
            function: "f".into(),
            violations: vec![SsaViolation::NotInSsaForm],
        };
        assert_eq!(
            "function f is not in valid SSA form:\n  SSA violation: function is not in SSA form",
            err.to_string()
        );
        err.report();
    }
}
