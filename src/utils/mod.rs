pub mod perft;

pub use perft::{perft, perft_divide};
