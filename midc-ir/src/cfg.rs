use tracing::trace;

use crate::data::{BlockId, Opcode};
use crate::function::Function;

/// Recomputes all predecessor and successor lists from the block
/// terminators. Blocks that do not end in a terminator (including empty
/// ones) fall through to the next block by index. Running it twice yields
/// the same graph.
pub fn build_cfg(fct: &mut Function) {
    for block in &mut fct.blocks {
        block.preds.clear();
        block.succs.clear();
    }

    let count = fct.blocks.len();

    for idx in 0..count {
        let targets = match fct.blocks[idx].last() {
            Some(last) if last.opcode == Opcode::Ret => Vec::new(),
            Some(last) if last.is_terminator() => last.targets(),
            _ if idx + 1 < count => vec![BlockId(idx + 1)],
            _ => Vec::new(),
        };

        for target in targets {
            add_edge(fct, BlockId(idx), target);
        }
    }

    align_phi_args(fct);

    trace!(
        blocks = count,
        edges = fct.blocks.iter().map(|b| b.succs.len()).sum::<usize>(),
        "cfg built"
    );
}

/// Adds `from -> to` unless the edge already exists. Targets outside the
/// function are ignored.
pub fn add_edge(fct: &mut Function, from: BlockId, to: BlockId) {
    if to.0 >= fct.blocks.len() || fct.block(from).succs.contains(&to) {
        return;
    }

    fct.block_mut(from).succs.push(to);
    fct.block_mut(to).preds.push(from);
}

// Phi arguments are kept in predecessor order. Arguments whose block is not
// a predecessor keep their relative order at the end.
fn align_phi_args(fct: &mut Function) {
    for block in &mut fct.blocks {
        let preds = &block.preds;

        for instr in block.instrs.iter_mut().take_while(|instr| instr.is_phi()) {
            instr.phi_args_mut().sort_by_key(|arg| {
                preds
                    .iter()
                    .position(|&pred| pred == arg.pred)
                    .unwrap_or(usize::MAX)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Instr, Operand, PhiArg, SwitchCase};
    use midc_ast::Name;

    fn diamond() -> Function {
        let mut fct = Function::new(Name(0), 1);
        let entry = fct.new_block(Some("entry"));
        let then = fct.new_block(None);
        let els = fct.new_block(None);
        let merge = fct.new_block(None);
        let cond = fct.new_reg();

        fct.emit(entry, Instr::branch(Operand::reg(cond, None), then, els, 1));
        fct.emit(then, Instr::jump(merge, 1));
        fct.emit(els, Instr::jump(merge, 1));
        fct.emit(merge, Instr::ret(Operand::None, 1));
        fct
    }

    #[test]
    fn diamond_edges() {
        let mut fct = diamond();
        build_cfg(&mut fct);

        assert_eq!(vec![BlockId(1), BlockId(2)], fct.blocks[0].succs);
        assert_eq!(vec![BlockId(1), BlockId(2)], fct.blocks[3].preds);
        assert!(fct.blocks[3].succs.is_empty());
        assert!(fct.blocks[0].preds.is_empty());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut fct = diamond();
        build_cfg(&mut fct);
        build_cfg(&mut fct);

        for block in &fct.blocks {
            for &succ in &block.succs {
                let count = fct.block(succ).preds.iter().filter(|&&p| p == block.id);
                assert_eq!(1, count.count());
            }
        }
        assert_eq!(vec![BlockId(0)], fct.blocks[1].preds);
    }

    #[test]
    fn unterminated_blocks_fall_through() {
        let mut fct = Function::new(Name(0), 1);
        let first = fct.new_block(None);
        let second = fct.new_block(None);
        let third = fct.new_block(None);
        fct.emit(second, Instr::nop(1));
        fct.emit(third, Instr::ret(Operand::None, 1));
        build_cfg(&mut fct);

        assert_eq!(vec![second], fct.block(first).succs);
        assert_eq!(vec![third], fct.block(second).succs);
        assert!(fct.block(third).succs.is_empty());
    }

    #[test]
    fn switch_edges_dedup() {
        let mut fct = Function::new(Name(0), 1);
        let entry = fct.new_block(None);
        let target = fct.new_block(None);
        let cases = vec![
            SwitchCase {
                value: 1,
                target,
            },
            SwitchCase {
                value: 2,
                target,
            },
        ];
        fct.emit(entry, Instr::switch(Operand::Int(0), cases, target, 1));
        fct.emit(target, Instr::ret(Operand::None, 1));
        build_cfg(&mut fct);

        assert_eq!(vec![target], fct.block(entry).succs);
        assert_eq!(vec![entry], fct.block(target).preds);
    }

    #[test]
    fn phi_args_follow_pred_order() {
        let mut fct = diamond();
        let dst = fct.new_reg();
        let args = vec![
            PhiArg {
                value: Operand::Int(2),
                pred: BlockId(2),
            },
            PhiArg {
                value: Operand::Int(1),
                pred: BlockId(1),
            },
        ];
        fct.blocks[3].prepend(Instr::phi(Operand::reg(dst, None), None, args, 1));
        build_cfg(&mut fct);

        let preds = fct.blocks[3].instrs[0]
            .phi_args()
            .iter()
            .map(|arg| arg.pred)
            .collect::<Vec<_>>();
        assert_eq!(vec![BlockId(1), BlockId(2)], preds);
    }
}
