pub mod graphviz;

#[cfg(feature = "logos_support")]
mod logos_support;
#[cfg(feature = "logos_support")]
pub use self::logos_support::{LogosSupport, LogosTerminal, LogosTokens};

#[cfg(feature = "pretty")]
pub mod pretty;
