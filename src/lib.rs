pub mod board;
pub mod collab;
pub mod config;
pub mod input;
pub mod piece;
pub mod session;
pub mod shapes;
pub mod test_helpers;
