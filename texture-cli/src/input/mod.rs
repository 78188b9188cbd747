//! Input handling module

pub mod glob_resolver;
pub mod word_list;

pub use glob_resolver::resolve_patterns;
pub use word_list::read_word_list;
