pub mod colors;
pub mod options;
