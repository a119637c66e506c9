//! vox HTML Parser
//!
//! HTML5 parser built on html5ever.
//! Parses markup (including inline MathML) and converts it to the vox DOM.

mod parser;

pub use parser::HtmlParser;
pub use vox_dom::{Document, DomTree, Node, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string with a base URL
pub fn parse_with_url(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}
