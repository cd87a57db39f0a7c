//! Reading and editing Eclipse `.project` descriptors.
//!
//! Edits are textual insertions at positions located in the original
//! document, so everything outside the inserted element is preserved as-is.

use quick_xml::escape::{escape, resolve_xml_entity};
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

pub const DESCRIPTOR_FILE: &str = ".project";

const ROOT: &[&[u8]] = &[b"projectDescription"];
const NAME: &[&[u8]] = &[b"projectDescription", b"name"];
const NATURES: &[&[u8]] = &[b"projectDescription", b"natures"];
const NATURE: &[&[u8]] = &[b"projectDescription", b"natures", b"nature"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub name: Option<String>,
    pub natures: Vec<String>,
}

impl ProjectDescriptor {
    pub fn has_nature(&self, nature: &str) -> bool {
        self.natures.iter().any(|n| n == nature)
    }
}

/// Byte offsets of the elements a nature insertion cares about.
#[derive(Debug, Default)]
struct Layout {
    descriptor: ProjectDescriptor,
    natures_end: Option<usize>,
    empty_natures: Option<(usize, usize)>,
    last_nature: Option<usize>,
    root_end: Option<usize>,
}

fn at(stack: &[Vec<u8>], path: &[&[u8]]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a.as_slice() == *b)
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
        return Ok(ch.to_string());
    }
    let name = std::str::from_utf8(reference).map_err(|e| e.to_string())?;
    resolve_xml_entity(name)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown entity `&{name};`"))
}

fn scan(content: &str) -> Result<Layout, String> {
    let mut reader = Reader::from_str(content);
    let mut layout = Layout::default();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut text = String::new();

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(e.name().as_ref().to_vec());
                if at(&stack, NATURE) {
                    layout.last_nature = Some(start);
                }
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                if at(&stack, ROOT) && e.name().as_ref() == b"natures" && layout.empty_natures.is_none() {
                    layout.empty_natures = Some((start, reader.buffer_position() as usize));
                }
            }
            Ok(Event::End(_)) => {
                let value = text.trim();
                if at(&stack, NAME) && !value.is_empty() {
                    layout.descriptor.name = Some(value.to_string());
                } else if at(&stack, NATURE) && !value.is_empty() {
                    layout.descriptor.natures.push(value.to_string());
                } else if at(&stack, NATURES) && layout.natures_end.is_none() {
                    layout.natures_end = Some(start);
                } else if at(&stack, ROOT) {
                    layout.root_end = Some(start);
                }
                text.clear();
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                text.push_str(std::str::from_utf8(&t).map_err(|e| e.to_string())?);
            }
            Ok(Event::GeneralRef(r)) => text.push_str(&resolve_reference(&r)?),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "{} at byte {}",
                    e,
                    reader.error_position()
                ))
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }

    Ok(layout)
}

pub fn parse(content: &str) -> Result<ProjectDescriptor, String> {
    scan(content).map(|layout| layout.descriptor)
}

fn newline_of(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Leading whitespace of the line containing `pos`, if nothing but
/// whitespace precedes `pos` on that line.
fn line_indent(content: &str, pos: usize) -> Option<&str> {
    let line_start = content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &content[line_start..pos];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        Some(prefix)
    } else {
        None
    }
}

fn child_indent(content: &str, sibling: Option<usize>, parent_indent: &str) -> String {
    if let Some(indent) = sibling.and_then(|pos| line_indent(content, pos)) {
        return indent.to_string();
    }
    let unit = if parent_indent.starts_with(' ') { "  " } else { "\t" };
    format!("{parent_indent}{unit}")
}

/// Returns the descriptor text with `nature` added, or `None` if the
/// descriptor already declares it.
pub fn insert_nature(content: &str, nature: &str) -> Result<Option<String>, String> {
    let layout = scan(content)?;
    if layout.descriptor.has_nature(nature) {
        return Ok(None);
    }

    let nl = newline_of(content);
    let element = format!("<nature>{}</nature>", escape(nature));
    let mut updated = String::with_capacity(content.len() + element.len() + 8);

    if let Some(pos) = layout.natures_end {
        match line_indent(content, pos) {
            Some(indent) => {
                let insert_at = pos - indent.len();
                let child = child_indent(content, layout.last_nature, indent);
                updated.push_str(&content[..insert_at]);
                updated.push_str(&format!("{child}{element}{nl}"));
                updated.push_str(&content[insert_at..]);
            }
            None => {
                updated.push_str(&content[..pos]);
                updated.push_str(&element);
                updated.push_str(&content[pos..]);
            }
        }
        return Ok(Some(updated));
    }

    if let Some((start, end)) = layout.empty_natures {
        let indent = line_indent(content, start).unwrap_or("");
        let child = child_indent(content, None, indent);
        updated.push_str(&content[..start]);
        updated.push_str(&format!("<natures>{nl}{child}{element}{nl}{indent}</natures>"));
        updated.push_str(&content[end..]);
        return Ok(Some(updated));
    }

    let pos = layout
        .root_end
        .ok_or_else(|| "missing <projectDescription> element".to_string())?;
    let indent = line_indent(content, pos).unwrap_or("");
    let insert_at = pos - indent.len();
    let natures_indent = child_indent(content, None, indent);
    let nature_indent = child_indent(content, None, &natures_indent);
    updated.push_str(&content[..insert_at]);
    updated.push_str(&format!(
        "{natures_indent}<natures>{nl}{nature_indent}{element}{nl}{natures_indent}</natures>{nl}"
    ));
    updated.push_str(&content[insert_at..]);
    Ok(Some(updated))
}
