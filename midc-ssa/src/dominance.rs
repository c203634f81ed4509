use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use midc_ir::{BlockId, Function};

/// Reverse postorder of the blocks reachable from the entry block. The
/// depth-first search visits successors in list order.
pub fn compute_rpo(fct: &Function) -> Vec<BlockId> {
    let count = fct.block_count();
    if count == 0 {
        return Vec::new();
    }

    let mut visited = FixedBitSet::with_capacity(count);
    let mut postorder = Vec::with_capacity(count);
    let mut stack: Vec<(BlockId, usize)> = vec![(fct.entry, 0)];
    visited.insert(fct.entry.0);

    while let Some((block, next)) = stack.last_mut() {
        let current = *block;
        let succs = &fct.block(current).succs;

        if *next < succs.len() {
            let succ = succs[*next];
            *next += 1;

            if !visited.put(succ.0) {
                stack.push((succ, 0));
            }
        } else {
            postorder.push(current);
            stack.pop();
        }
    }

    postorder.reverse();
    postorder
}

/// Computes immediate dominators with the Cooper-Harvey-Kennedy iteration
/// and stores them in the blocks. The entry block and unreachable blocks end
/// up with `idom == None`.
pub fn compute_dominators(fct: &mut Function) {
    let count = fct.block_count();
    for block in &mut fct.blocks {
        block.idom = None;
    }
    if count == 0 {
        return;
    }

    let rpo = compute_rpo(fct);
    let rpo_number = rpo_numbers(count, &rpo);
    let entry = fct.entry;

    let mut idom: Vec<Option<BlockId>> = vec![None; count];
    idom[entry.0] = Some(entry);

    let mut changed = true;
    let mut rounds = 0;

    while changed {
        changed = false;
        rounds += 1;

        for &block in rpo.iter().skip(1) {
            let mut new_idom: Option<BlockId> = None;

            for &pred in &fct.block(block).preds {
                if idom[pred.0].is_none() {
                    continue;
                }

                new_idom = Some(match new_idom {
                    None => pred,
                    Some(current) => intersect(&idom, &rpo_number, current, pred),
                });
            }

            if new_idom.is_some() && idom[block.0] != new_idom {
                idom[block.0] = new_idom;
                changed = true;
            }
        }

        trace!(round = rounds, changed, "dominator iteration");
    }

    idom[entry.0] = None;

    for (block, idom) in fct.blocks.iter_mut().zip(idom) {
        block.idom = idom;
    }

    debug!(blocks = count, reachable = rpo.len(), rounds, "dominators computed");
}

fn rpo_numbers(count: usize, rpo: &[BlockId]) -> Vec<Option<usize>> {
    let mut numbers = vec![None; count];
    for (pos, block) in rpo.iter().enumerate() {
        numbers[block.0] = Some(pos);
    }
    numbers
}

// Both blocks are reachable and already have an idom, so every walk ends at
// the entry, which is its own idom during the iteration.
fn intersect(
    idom: &[Option<BlockId>],
    rpo_number: &[Option<usize>],
    mut b1: BlockId,
    mut b2: BlockId,
) -> BlockId {
    while b1 != b2 {
        while rpo_number[b1.0] > rpo_number[b2.0] {
            b1 = idom[b1.0].unwrap_or(b1);
        }
        while rpo_number[b2.0] > rpo_number[b1.0] {
            b2 = idom[b2.0].unwrap_or(b2);
        }
    }
    b1
}

/// The dominator tree derived from the idoms stored in the blocks.
pub struct DomTree {
    idom: Vec<Option<BlockId>>,
    children: Vec<Vec<BlockId>>,
    rpo: Vec<BlockId>,
    rpo_number: Vec<Option<usize>>,
    entry: BlockId,
}

impl DomTree {
    pub fn new(fct: &Function) -> DomTree {
        let count = fct.block_count();
        let idom = fct.blocks.iter().map(|block| block.idom).collect::<Vec<_>>();
        let mut children = vec![Vec::new(); count];

        for (idx, parent) in idom.iter().enumerate() {
            if let Some(parent) = parent {
                if parent.0 != idx {
                    children[parent.0].push(BlockId(idx));
                }
            }
        }

        let rpo = compute_rpo(fct);
        let rpo_number = rpo_numbers(count, &rpo);

        DomTree {
            idom,
            children,
            rpo,
            rpo_number,
            entry: fct.entry,
        }
    }

    pub fn idom(&self, block: BlockId) -> Option<BlockId> {
        self.idom[block.0]
    }

    pub fn children(&self, block: BlockId) -> &[BlockId] {
        &self.children[block.0]
    }

    pub fn rpo(&self) -> &[BlockId] {
        &self.rpo
    }

    pub fn rpo_number(&self, block: BlockId) -> Option<usize> {
        self.rpo_number[block.0]
    }

    pub fn is_reachable(&self, block: BlockId) -> bool {
        self.rpo_number[block.0].is_some()
    }

    /// Reflexive dominance. Unreachable blocks dominate only themselves.
    pub fn dominates(&self, a: BlockId, b: BlockId) -> bool {
        if a == b {
            return true;
        }

        if !self.is_reachable(b) {
            return false;
        }

        let mut current = b;
        while let Some(parent) = self.idom[current.0] {
            if parent == a {
                return true;
            }
            current = parent;
        }

        false
    }

    pub fn strictly_dominates(&self, a: BlockId, b: BlockId) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Roots of the renaming walk: the entry followed by every unreachable
    /// block in index order.
    pub fn roots(&self) -> Vec<BlockId> {
        let mut roots = Vec::new();
        if self.idom.is_empty() {
            return roots;
        }
        roots.push(self.entry);

        for idx in 0..self.idom.len() {
            let block = BlockId(idx);
            if block != self.entry && !self.is_reachable(block) {
                roots.push(block);
            }
        }

        roots
    }
}
