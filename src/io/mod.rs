/// I/O operations for reading and writing aero data files

/// Reader implementation for aero data files
pub mod reader;
/// Typed cursor over the token stream
pub mod token_reader;
/// Writer implementation for aero data files
pub mod writer;

pub use reader::{parse_dat, read_dat};
pub use token_reader::TokenReader;
pub use writer::{write_dat, write_dat_string};
