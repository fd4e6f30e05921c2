use rust_embed::Embed;

use crate::generator::tokenize;

#[derive(Embed)]
#[folder = "assets/paragraphs/"]
struct ParagraphAssets;

pub const DEFAULT_PARAGRAPH: &str = "riverbank";

/// Raw text of a bundled paragraph.
pub fn load(name: &str) -> Option<String> {
    let file = ParagraphAssets::get(&format!("{name}.txt"))?;
    std::str::from_utf8(file.data.as_ref())
        .ok()
        .map(|s| s.trim().to_string())
}

/// Tokens of a bundled paragraph, falling back to the default paragraph.
pub fn load_tokens(name: &str) -> Vec<String> {
    let text = load(name)
        .or_else(|| {
            tracing::warn!(paragraph = name, "unknown paragraph, using default");
            load(DEFAULT_PARAGRAPH)
        })
        .unwrap_or_default();
    tokenize(&text)
}

pub fn available() -> Vec<String> {
    let mut names: Vec<String> = ParagraphAssets::iter()
        .filter_map(|f| f.strip_suffix(".txt").map(|n| n.to_string()))
        .collect();
    names.sort();
    names
}
