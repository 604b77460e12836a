pub mod analyze;
pub mod model;

pub use analyze::{
    analyze_entries, block_edges, build_blocks, functions, Analysis, Block, EdgeKind, EdgeOut, FunctionOut, Report,
};
pub use model::{load_raw_bin, read_opcode, read_u16, read_u8, Image};
