use tracing::debug;

use midc_ir::{BlockId, Function};

/// Fills `dom_frontier` of every block from the stored idoms: for each join
/// block, walk up from every predecessor until the join's idom is reached.
pub fn compute_dominance_frontiers(fct: &mut Function) {
    for block in &mut fct.blocks {
        block.dom_frontier.clear();
    }

    let mut total = 0;

    for idx in 0..fct.block_count() {
        if fct.blocks[idx].preds.len() < 2 {
            continue;
        }

        let join = BlockId(idx);
        let join_idom = fct.blocks[idx].idom;
        let preds = fct.blocks[idx].preds.clone();

        for pred in preds {
            let mut runner = Some(pred);

            while let Some(current) = runner {
                if Some(current) == join_idom {
                    break;
                }

                let frontier = &mut fct.block_mut(current).dom_frontier;
                if !frontier.contains(&join) {
                    frontier.push(join);
                    total += 1;
                }

                runner = fct.block(current).idom;
            }
        }
    }

    debug!(entries = total, "dominance frontiers computed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::{compute_dominators, DomTree};
    use crate::tests::{diamond, loop_fct, unreachable_fct};

    fn frontiers(mut fct: Function) -> Function {
        compute_dominators(&mut fct);
        compute_dominance_frontiers(&mut fct);
        fct
    }

    #[test]
    fn diamond_frontiers() {
        let fct = frontiers(diamond());
        assert!(fct.blocks[0].dom_frontier.is_empty());
        assert_eq!(vec![BlockId(3)], fct.blocks[1].dom_frontier);
        assert_eq!(vec![BlockId(3)], fct.blocks[2].dom_frontier);
        assert!(fct.blocks[3].dom_frontier.is_empty());
    }

    #[test]
    fn loop_header_is_in_its_own_frontier() {
        let fct = frontiers(loop_fct());
        assert_eq!(vec![BlockId(1)], fct.blocks[1].dom_frontier);
        assert_eq!(vec![BlockId(1)], fct.blocks[2].dom_frontier);
        assert!(fct.blocks[3].dom_frontier.is_empty());
    }

    #[test]
    fn frontier_matches_definition() {
        // y in DF(x) iff x dominates a pred of y and does not strictly
        // dominate y.
        for fct in vec![frontiers(diamond()), frontiers(loop_fct())] {
            let tree = DomTree::new(&fct);

            for x in fct.block_ids() {
                for y in fct.block_ids() {
                    let expected = fct
                        .block(y)
                        .preds
                        .iter()
                        .any(|&p| tree.dominates(x, p))
                        && !tree.strictly_dominates(x, y);
                    let actual = fct.block(x).dom_frontier.contains(&y);
                    assert_eq!(expected, actual, "DF(bb{}) / bb{}", x.0, y.0);
                }
            }
        }
    }

    #[test]
    fn unreachable_pred_feeds_frontier() {
        let fct = frontiers(unreachable_fct());
        assert_eq!(vec![BlockId(1)], fct.blocks[2].dom_frontier);
        assert!(fct.blocks[0].dom_frontier.is_empty());
    }
}
