//! Command handlers, one module per subcommand.

pub mod calc;
pub mod check;
pub mod completion;
pub mod eval;
pub mod list;
pub mod show;
pub mod vars;
