use log::trace;

use crate::{Action, ActionFailure, Actions, Arg, Args, EvalError, InternalError, Node};

/// Computes made values of a tree with a set of actions
///
/// Values are memoized on the nodes, so a subtree is evaluated at most once, whichever
/// evaluator asks for it first.
#[derive(Debug)]
pub struct Evaluator<'a, V> {
    actions: &'a Actions<V>,
    prune: bool,
}

impl<'a, V> Clone for Evaluator<'a, V> {
    fn clone(&self) -> Self {
        Evaluator {
            actions: self.actions,
            prune: self.prune,
        }
    }
}

impl<'a, V: Clone> Evaluator<'a, V> {
    pub fn new(actions: &'a Actions<V>) -> Self {
        Evaluator {
            actions,
            prune: false,
        }
    }

    /// Drop the children of evaluated nodes once `evaluate` is done
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn actions(&self) -> &'a Actions<V> {
        self.actions
    }

    /// Made value of the root, dropping evaluated subtrees afterwards when pruning
    pub fn evaluate<'t>(&self, tree: &'t mut Node<V>) -> Result<Option<&'t V>, EvalError> {
        self.made(tree)?;
        if self.prune {
            self.prune_evaluated(tree);
        }
        let tree: &'t Node<V> = tree;
        Ok(tree.made_value())
    }

    /// Memoized made value of `node`
    ///
    /// Nodes without an action have no value. The subtree is walked in post-order on a heap
    /// stack, descending only into children that the pending actions consume.
    pub fn made<'t>(&self, node: &'t Node<V>) -> Result<Option<&'t V>, EvalError> {
        let mut pending = vec![(node, false)];
        while let Some((current, ready)) = pending.pop() {
            if current.made_cell().get().is_some() {
                continue;
            }
            let action = self.actions.lookup(current.node_name(), current.tag());
            if ready {
                self.settle(current, action)?;
                continue;
            }
            pending.push((current, true));
            if consumes_children(current, action) {
                pending.extend(current.children().iter().rev().map(|child| (child, false)));
            }
        }
        Ok(node.made_value())
    }

    /// Run the action of `node`, whose consumed children are already settled
    fn settle(&self, node: &Node<V>, action: Option<&Action<V>>) -> Result<(), EvalError> {
        let value = match action {
            Some(action) => {
                trace!("Running {:?} for {}", action, node.qualified_name());
                self.compute(node, action)?
            }
            None => None,
        };
        node.made_cell()
            .set(value)
            .map_err(|_| InternalError::MadeTwice {
                node: node.qualified_name(),
            })?;
        Ok(())
    }

    /// Drop the children of every node whose action has run
    fn prune_evaluated(&self, tree: &mut Node<V>) {
        let mut pending = vec![tree];
        while let Some(node) = pending.pop() {
            let evaluated = node.made_cell().get().is_some()
                && self.actions.lookup(node.node_name(), node.tag()).is_some();
            if let Node::Internal(internal) = node {
                if evaluated {
                    internal.prune();
                } else {
                    pending.extend(internal.children_mut().iter_mut());
                }
            }
        }
    }

    fn compute(&self, node: &Node<V>, action: &Action<V>) -> Result<Option<V>, EvalError> {
        match action {
            Action::Bubble => {
                let children = node.children();
                if children.len() != 1 {
                    return Err(EvalError::Bubble {
                        node: node.qualified_name(),
                        children: children.len(),
                    });
                }
                let made = self.made(&children[0])?.cloned();
                Ok(made)
            }
            Action::Node(action) => action(node, self)
                .map(Some)
                .map_err(|failure| self.failure(node, failure)),
            Action::Made(action) => {
                let result = match node {
                    Node::Leaf(leaf) => action(Args::new(vec![Arg::Token(leaf.token().content())])),
                    Node::Internal(_) => {
                        let children = node.children();
                        let mut args = Vec::with_capacity(children.len());
                        for child in children {
                            args.push(self.arg(child)?);
                        }
                        action(Args::new(args))
                    }
                };
                result.map(Some).map_err(|failure| self.failure(node, failure))
            }
        }
    }

    fn arg<'t>(&self, child: &'t Node<V>) -> Result<Arg<'t, V>, EvalError> {
        Ok(match (self.made(child)?, child) {
            (Some(value), _) => Arg::Made(value),
            (None, Node::Leaf(leaf)) => Arg::Token(leaf.token().content()),
            (None, Node::Internal(_)) => Arg::Null,
        })
    }

    fn failure(&self, node: &Node<V>, failure: ActionFailure) -> EvalError {
        match failure {
            // Failures of nested evaluations were already attributed to their node.
            ActionFailure::Error(error) => match error.downcast::<EvalError>() {
                Ok(error) => *error,
                Err(source) => EvalError::Action {
                    node: node.qualified_name(),
                    source,
                },
            },
            ActionFailure::Abort(abort) => EvalError::Abort {
                message: abort.message,
                offset: abort.offset.or_else(|| node.offset()),
            },
        }
    }
}

fn consumes_children<V>(node: &Node<V>, action: Option<&Action<V>>) -> bool {
    match action {
        Some(Action::Made(_)) => true,
        Some(Action::Bubble) => node.children().len() == 1,
        _ => false,
    }
}

/// Evaluates `tree` and returns a copy of the root's made value
pub fn evaluate<V: Clone>(
    tree: &mut Node<V>,
    actions: &Actions<V>,
    prune: bool,
) -> Result<Option<V>, EvalError> {
    let evaluator = Evaluator::new(actions).prune(prune);
    Ok(evaluator.evaluate(tree)?.cloned())
}
