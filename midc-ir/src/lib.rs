pub mod cfg;
pub mod data;
pub mod display;
pub mod function;
pub mod program;

pub use cfg::{add_edge, build_cfg};
pub use data::*;
pub use display::{display_fct, display_instr, display_program, format_float};
pub use function::{Block, Function, Param, VarData};
pub use program::{Global, Program, StringTable};
