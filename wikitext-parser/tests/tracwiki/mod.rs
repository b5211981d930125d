//! TracWiki dialect tests
//!
//! HTML produced by html5ever is HTML5: void elements are written as `<br>` and `<img ...>`.

mod blocks;
mod links;
mod macros;
mod spans;
