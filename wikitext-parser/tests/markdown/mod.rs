//! Markdown dialect tests

mod blocks;
mod spans;
