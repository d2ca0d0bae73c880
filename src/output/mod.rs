pub mod strand;
pub mod writer;

pub use strand::encode_strand;
pub use writer::CellWriter;
