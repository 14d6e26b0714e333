mod blocks;

pub use blocks::{Annotations, Block, EmbedContent, RichText, RichTextContent, TextColor, TextContent};
