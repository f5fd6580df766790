pub mod lenient;
pub mod parse;
