use midc_ast::Interner;

use crate::data::{Instr, Opcode, Operand};
use crate::function::{Block, Function};
use crate::program::{Program, StringTable};

pub fn display_program(prog: &Program, interner: &Interner) -> String {
    let mut result = String::new();
    result.push_str("; === IR Program ===\n");
    result.push_str(&format!(
        "; {} functions, {} globals\n\n",
        prog.functions.len(),
        prog.globals.len()
    ));

    for global in &prog.globals {
        result.push_str("@");
        result.push_str(interner.str(global.name));
        if let Some(init) = global.init {
            result.push_str(&format!(" = {}", init));
        }
        result.push_str("\n");
    }

    if !prog.globals.is_empty() {
        result.push_str("\n");
    }

    for fct in &prog.functions {
        result.push_str(&display_fct(fct, interner, &prog.strings));
    }

    result
}

pub fn display_fct(fct: &Function, interner: &Interner, strings: &StringTable) -> String {
    let mut result = String::new();
    result.push_str("function @");
    result.push_str(interner.str(fct.name));
    result.push_str("(");
    let mut first = true;
    for param in &fct.params {
        if !first {
            result.push_str(", ");
        }
        result.push_str(interner.str(param.name));
        first = false;
    }
    result.push_str(") {\n");

    if !fct.vars.is_empty() {
        result.push_str("  ; vars:");
        for var in &fct.vars {
            result.push_str(&format!(" {}=t{}", interner.str(var.name), var.reg.0));
            if var.is_param {
                result.push_str("[param]");
            }
        }
        result.push_str("\n");
    }

    result.push_str(&format!(
        "  ; {} blocks, {} vregs{}\n\n",
        fct.blocks.len(),
        fct.reg_count(),
        if fct.is_ssa { " (SSA)" } else { "" }
    ));

    let printer = Printer { interner, strings };

    for block in &fct.blocks {
        printer.block(&mut result, block);
        result.push_str("\n");
    }

    result.push_str("}\n\n");
    result
}

pub fn display_instr(instr: &Instr, interner: &Interner, strings: &StringTable) -> String {
    let mut result = String::new();
    Printer { interner, strings }.instr(&mut result, instr);
    result
}

struct Printer<'a> {
    interner: &'a Interner,
    strings: &'a StringTable,
}

impl<'a> Printer<'a> {
    fn block(&self, out: &mut String, block: &Block) {
        out.push_str(&format!("  {} (bb{}):", block.label, block.id.0));

        if !block.preds.is_empty() {
            out.push_str("  ; preds:");
            for pred in &block.preds {
                out.push_str(&format!(" bb{}", pred.0));
            }
        }

        if let Some(idom) = block.idom {
            out.push_str(&format!("  ; idom: bb{}", idom.0));
        }

        if !block.dom_frontier.is_empty() {
            out.push_str("  ; DF:");
            for df in &block.dom_frontier {
                out.push_str(&format!(" bb{}", df.0));
            }
        }

        if block.loop_depth > 0 {
            if let Some(header) = block.loop_header {
                out.push_str(&format!(
                    "  ; loop: depth={} hdr=bb{}",
                    block.loop_depth, header.0
                ));
            }
        }
        out.push_str("\n");

        for instr in &block.instrs {
            out.push_str("    ");
            self.instr(out, instr);
            out.push_str("\n");
        }

        if !block.succs.is_empty() {
            out.push_str("    ; succs:");
            for succ in &block.succs {
                out.push_str(&format!(" bb{}", succ.0));
            }
            out.push_str("\n");
        }
    }

    fn instr(&self, out: &mut String, instr: &Instr) {
        match instr.opcode {
            Opcode::Phi => {
                self.operand(out, &instr.dst);
                out.push_str(" = phi");
                for arg in instr.phi_args() {
                    out.push_str(" [");
                    self.operand(out, &arg.value);
                    out.push_str(&format!(", bb{}]", arg.pred.0));
                }
            }

            Opcode::Switch => {
                out.push_str("switch ");
                self.operand(out, &instr.src1);
                out.push_str(" {");
                for case in instr.switch_cases() {
                    out.push_str(&format!(" case {}: bb{}", case.value, case.target.0));
                }
                if let Some(default) = instr.switch_default() {
                    out.push_str(&format!(" default: bb{}", default.0));
                }
                out.push_str(" }");
            }

            Opcode::Branch => {
                out.push_str("branch ");
                self.operand(out, &instr.src1);
                out.push_str(" ? ");
                self.operand(out, &instr.src2);
                if let Some(false_target) = instr.false_target() {
                    out.push_str(&format!(" : bb{}", false_target.0));
                }
            }

            _ => {
                if !instr.dst.is_none() {
                    self.operand(out, &instr.dst);
                    out.push_str(" = ");
                }
                out.push_str(instr.opcode.name());
                if !instr.src1.is_none() {
                    out.push_str(" ");
                    self.operand(out, &instr.src1);
                }
                if !instr.src2.is_none() {
                    out.push_str(", ");
                    self.operand(out, &instr.src2);
                }
            }
        }
    }

    fn operand(&self, out: &mut String, operand: &Operand) {
        match operand {
            Operand::None => out.push_str("_"),
            Operand::Reg(reg, _) => out.push_str(&format!("t{}", reg.0)),
            Operand::Member(name) => {
                out.push_str("%");
                out.push_str(self.interner.str(*name));
            }
            Operand::Int(value) => out.push_str(&format!("${}", value)),
            Operand::Float(value) => {
                out.push_str("$");
                out.push_str(&format_float(*value));
            }
            Operand::Label(block) => out.push_str(&format!("bb{}", block.0)),
            Operand::Func(name) => {
                out.push_str("@");
                out.push_str(self.interner.str(*name));
            }
            Operand::Str(id) => out.push_str(&format!("{:?}", self.strings.get(*id))),
        }
    }
}

/// Formats like C's `%.6g`: six significant digits, trailing zeros removed,
/// exponent notation outside `1e-4 <= |v| < 1e6`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if value == 0.0 {
        return "0".into();
    }

    let sci = format!("{:.5e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= 6 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (5 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(value: &str) -> &str {
    if value.contains('.') {
        value.trim_end_matches('0').trim_end_matches('.')
    } else {
        value
    }
}
