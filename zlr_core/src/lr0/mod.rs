mod symbol;
pub use self::symbol::Symbol;

mod rule;
pub use self::rule::Rule;
pub(crate) use self::rule::qualified_name;

mod grammar;
pub use self::grammar::{Grammar, GrammarBuilder, Production};

mod analysis;
pub use self::analysis::FollowSets;

mod item;
pub use self::item::Item;

mod item_set;
pub use self::item_set::ItemSet;

mod table;
pub use self::table::{Table, TableRow};
