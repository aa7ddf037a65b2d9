//! The abstract syntax tree of a preprocessed expression.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use literal::LitNum;
pub use paren::Paren;
pub use unary::Unary;
