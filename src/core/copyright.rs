//! Copyright notice detection and insertion.

use crate::core::rewriter::PrependIfMissing;

/// Whether the file already opens with a notice: the second line, with its
/// comment gutter character removed, starts with `marker`.
pub fn has_notice(content: &str, marker: &str) -> bool {
    let Some(line) = content.lines().nth(1) else {
        return false;
    };

    let mut line = line.trim();
    if let Some(first) = line.chars().next() {
        line = line[first.len_utf8()..].trim();
    }

    line.starts_with(marker)
}

/// Normalises a configured notice so it ends in exactly one line break.
pub fn notice_block(notice: &str) -> String {
    let mut block = notice.trim_end_matches(['\r', '\n']).to_string();
    block.push('\n');
    block
}

pub fn action(notice: &str, marker: &str) -> PrependIfMissing<impl Fn(&str) -> bool> {
    let marker = marker.to_string();
    PrependIfMissing::new(notice_block(notice), move |content: &str| {
        has_notice(content, &marker)
    })
}
