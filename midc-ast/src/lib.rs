pub mod ast;
pub mod builder;
pub mod interner;
pub mod ty;

pub use ast::*;
pub use builder::Builder;
pub use interner::{Interner, Name};
pub use ty::{display_ty, Type, TypeId, Types};
