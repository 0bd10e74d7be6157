// Parser module: HTML field extraction.

pub mod webstore_parser;

pub use webstore_parser::{Parser, WebstoreParser};
