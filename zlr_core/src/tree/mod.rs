mod action;
pub use self::action::{Abort, Action, ActionFailure, Actions, Arg, Args};

mod eval;
pub use self::eval::{evaluate, Evaluator};

mod node;
pub use self::node::{Internal, Leaf, Node};
