//! Line-oriented wiki markup parsing
//!
//!     This crate turns lightweight wiki markup (TracWiki, Markdown) into a stream of structural
//!     events: begin/end of blocks and spans, text, entities, images and line breaks. The parser
//!     never builds output itself; it drives a DocumentBuilder, and the builder decides what the
//!     events become (HTML, a recorded event list, nothing at all).
//!
//!     This is a pure lib, that is, it powers wikitext-cli but is shell agnostic: no code here
//!     reads env vars, prints to stdout or assumes a terminal.
//!
//! Architecture
//!
//!     A dialect is data, not a type hierarchy: a MarkupLanguage holds an ordered list of block
//!     rules, an ordered list of span rules, a macro table, an escape convention and options.
//!     The generic machinery in ./markup and ./parser.rs runs any such composition.
//!
//!     The file structure:
//!     .
//!     ├── attributes.rs           # Attribute bag for blocks, spans and images
//!     ├── builder.rs              # DocumentBuilder trait, BlockType, SpanType
//!     ├── builders
//!     │   ├── html                # HTML DOM builder (html5ever)
//!     │   ├── recording.rs        # Event recorder, used by tests and the CLI
//!     │   └── noop.rs
//!     ├── markup
//!     │   ├── mod.rs              # MarkupLanguage, options and configuration
//!     │   ├── block.rs            # Block rules and the open-block protocol
//!     │   ├── span.rs             # Span rules and phrase recognition
//!     │   └── macros.rs           # [[Macro(args)]] expansion
//!     ├── dialects
//!     │   ├── tracwiki
//!     │   └── markdown
//!     ├── parser.rs               # Line driver, ParseSession
//!     ├── registry.rs             # DialectRegistry for discovery and selection
//!     └── error.rs
//!
//! Testing
//!     tests
//!     └── <dialect>
//!         └── <area>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are included
//!     from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     Blocks: each line is offered to the innermost open block, which continues, finishes or
//!     rejects it. Rejected lines cascade outward and finally start a new block through the first
//!     matching rule. Blocks that nest arbitrary content (Markdown quotes) parse their lines with
//!     a nested parser state.
//!
//!     Spans: at each position every span rule looks for its next match; the earliest wins and
//!     ties go to the rule listed first. Escapes suppress exactly the token that follows them.
//!
//!     Both are forgiving: malformed markup degrades to literal text and never fails. The only
//!     runtime errors are the builder's own, which abort the parse and are returned unchanged.

pub mod attributes;
pub mod builder;
pub mod builders;
pub mod dialects;
pub mod error;
pub mod markup;
pub mod parser;
pub mod registry;

pub use attributes::Attributes;
pub use builder::{BlockType, DocumentBuilder, SpanType};
pub use builders::{
    Event, HtmlDocumentBuilder, HtmlOptions, NoOpDocumentBuilder, RecordingDocumentBuilder,
};
pub use error::{BuilderError, WikitextError};
pub use markup::{LanguageConfiguration, LanguageOptions, MarkupLanguage};
pub use parser::{MarkupParser, ParseSession};
pub use registry::DialectRegistry;
