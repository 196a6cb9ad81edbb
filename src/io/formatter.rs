//! Front matter codec
//!
//! Splits note content into its leading `---` delimited metadata block and
//! the body, and joins them back together. The body is never touched: what
//! follows the closing delimiter line is carried through byte for byte.

use crate::core::front_matter::FrontmatterBlock;
use crate::error::{PersonoteError, Result};
use log::warn;
use serde::{Deserialize, Serialize};

const DELIMITER: &str = "---";

/// How the metadata block is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeStyle {
    /// Block-style YAML mapping
    #[default]
    Yaml,
    /// Pretty-printed JSON object, which YAML readers accept as a flow mapping
    Json,
}

/// Decode content into front matter and body.
///
/// Content without a `---` line pair at the start has an empty block and is
/// all body. A block that is not a mapping degrades the same way, so a
/// rewrite never drops what was there.
pub fn decode(content: &str) -> (FrontmatterBlock, String) {
    let Some((yaml, body)) = split(content) else {
        return (FrontmatterBlock::new(), content.to_string());
    };

    match parse_block(yaml) {
        Ok(mut block) => {
            block.set_crlf(content.split('\n').next().is_some_and(|line| line.ends_with('\r')));
            (block, body.to_string())
        }
        Err(e) => {
            warn!("Ignoring front matter: {}", e);
            (FrontmatterBlock::new(), content.to_string())
        }
    }
}

/// Encode front matter and body back into note content.
///
/// An empty block produces the body alone. The block is written with the
/// line ending its opening delimiter was read with.
pub fn encode(block: &FrontmatterBlock, body: &str, style: EncodeStyle) -> Result<String> {
    if block.is_empty() {
        return Ok(body.to_string());
    }

    let text = match style {
        EncodeStyle::Yaml => serde_yaml::to_string(&block.to_yaml())?,
        EncodeStyle::Json => escape_for_yaml(&serde_json::to_string_pretty(&block.to_json())?),
    };

    let eol = block.line_ending();
    Ok(format!(
        "{}{eol}{}{eol}{}{eol}{}",
        DELIMITER,
        text.trim_end().replace('\n', eol),
        DELIMITER,
        body
    ))
}

/// Escape characters that JSON leaves raw but YAML readers reject or read
/// as line breaks. Outside strings JSON text is plain ASCII.
fn escape_for_yaml(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '\u{7f}'..='\u{9f}' | '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}' => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}

/// Locate the metadata text and the body that follows it
fn split(content: &str) -> Option<(&str, &str)> {
    let first_end = content.find('\n')?;
    if !is_delimiter(&content[..first_end]) {
        return None;
    }

    let start = first_end + 1;
    let mut pos = start;
    while pos < content.len() {
        let rest = &content[pos..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], pos + i + 1),
            None => (rest, content.len()),
        };
        if is_delimiter(line) {
            return Some((&content[start..pos], &content[next..]));
        }
        pos = next;
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

fn parse_block(yaml: &str) -> Result<FrontmatterBlock> {
    if yaml.trim().is_empty() {
        return Ok(FrontmatterBlock::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let map = match value {
        serde_yaml::Value::Mapping(map) => map,
        serde_yaml::Value::Null => return Ok(FrontmatterBlock::new()),
        other => {
            return Err(PersonoteError::malformed_frontmatter(
                "<front matter>",
                format!("expected a mapping, found {}", describe(&other)),
            ))
        }
    };

    let mut block = FrontmatterBlock::new();
    for (key, value) in &map {
        let name = match key {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            other => {
                return Err(PersonoteError::malformed_frontmatter(
                    "<front matter>",
                    format!("unsupported key {}", describe(other)),
                ))
            }
        };
        block.insert_decoded(name, value.clone());
    }
    Ok(block)
}

fn describe(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
