use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use super::document::{Document, DocumentBuilder};
use crate::error::Result;

/// Tag name used for the element that a Markdown construct renders to.
fn tag_name(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => match level {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        },
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Link { .. } => "a",
        Tag::Image { .. } => "img",
        _ => "div",
    }
}

impl Document {
    /// Build a tree from Markdown, rooted at a `body` element.
    ///
    /// Block and inline constructs become elements named like their HTML
    /// rendering; text, inline code and soft breaks become text leaves.
    /// Raw HTML carries no text and is dropped.
    pub fn from_markdown(content: &str) -> Result<Self> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);

        let mut builder = DocumentBuilder::new("body");
        for event in Parser::new_ext(content, options) {
            match event {
                Event::Start(tag) => {
                    builder.open(tag_name(&tag));
                }
                Event::End(_) => {
                    builder.close();
                }
                Event::Text(text) => {
                    builder.text(&text);
                }
                Event::Code(code) => {
                    builder.leaf("code", &code);
                }
                Event::SoftBreak => {
                    builder.text("\n");
                }
                Event::HardBreak => {
                    builder.open("br").close();
                }
                Event::Rule => {
                    builder.open("hr").close();
                }
                _ => {}
            }
        }
        builder.finish()
    }
}
