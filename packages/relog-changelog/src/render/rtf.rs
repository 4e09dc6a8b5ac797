use markdown::{mdast::Node, to_mdast, ParseOptions};

use relog_provider::ReleaseRecord;

use super::entry_title;

const RTF_HEADER: &str = "{\\rtf1\\ansi\\deff0\n{\\fonttbl{\\f0\\fswiss Helvetica;}}\n\\f0\\fs20\n";
const RTF_FOOTER: &str = "}\n";

pub(crate) fn render(records: &[ReleaseRecord]) -> String {
    let mut doc = String::from(RTF_HEADER);
    for record in records {
        doc.push_str(&format!("{{\\b {}}}\\par\n", escape(&entry_title(record))));
        for paragraph in body_paragraphs(&record.body) {
            doc.push_str(&paragraph);
            doc.push('\n');
        }
        doc.push_str("\\par\n");
    }
    doc.push_str(RTF_FOOTER);
    doc
}

/// Converts Markdown release notes into RTF paragraphs by walking the
/// Markdown AST: headings turn bold, list items turn into bulleted lines.
/// Notes that fail to parse are emitted line by line.
fn body_paragraphs(body: &str) -> Vec<String> {
    let ast = match to_mdast(body, &ParseOptions::default()) {
        Ok(ast) => ast,
        Err(_) => return fallback_paragraphs(body),
    };
    let mut paragraphs = Vec::new();
    if let Some(children) = ast.children() {
        for node in children {
            collect_paragraphs(node, &mut paragraphs);
        }
    }
    if paragraphs.is_empty() {
        fallback_paragraphs(body)
    } else {
        paragraphs
    }
}

fn fallback_paragraphs(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{}\\par", escape(line.trim_end())))
        .collect()
}

fn collect_paragraphs(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Heading(_) => out.push(format!("{{\\b {}}}\\par", escape(&inline_text(node)))),
        Node::List(list) => {
            for item in &list.children {
                out.push(format!("\\bullet  {}\\par", escape(&inline_text(item))));
            }
        }
        Node::Paragraph(_) => out.push(format!("{}\\par", escape(&inline_text(node)))),
        Node::Code(code) => {
            for line in code.value.lines() {
                out.push(format!("{}\\par", escape(line)));
            }
        }
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    collect_paragraphs(child, out);
                }
            }
        }
    }
}

fn inline_text(node: &Node) -> String {
    let mut text = String::new();
    append_text(node, &mut text);
    text.replace('\n', " ")
}

fn append_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    append_text(child, out);
                }
            }
        }
    }
}

/// RTF escaping: backslash and braces get escaped, anything outside ASCII is
/// emitted as a signed 16-bit `\uN?` sequence (surrogate pairs above U+FFFF).
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            c if (c as u32) > 0x7f => {
                let code = c as u32;
                if code > 0xffff {
                    let v = code - 0x10000;
                    push_unit(&mut escaped, 0xd800 + (v >> 10));
                    push_unit(&mut escaped, 0xdc00 + (v & 0x3ff));
                } else {
                    push_unit(&mut escaped, code);
                }
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn push_unit(out: &mut String, unit: u32) {
    let signed = if unit > 0x7fff {
        unit as i64 - 0x10000
    } else {
        unit as i64
    };
    out.push_str(&format!("\\u{}?", signed));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, body: &str) -> ReleaseRecord {
        ReleaseRecord {
            name: name.to_string(),
            tag_name: name.to_string(),
            published_at: "2024-06-07T18:21:05Z".to_string(),
            body: body.to_string(),
            prerelease: false,
        }
    }

    #[test]
    fn test_render_envelope() {
        let doc = render(&[]);
        assert!(doc.starts_with("{\\rtf1\\ansi"));
        assert!(doc.trim_end().ends_with('}'));
    }

    #[test]
    fn test_render_bold_title_and_bullets() {
        let doc = render(&[release("v1.2.0", "* Added dark mode\n* Faster startup")]);
        assert!(doc.contains("{\\b v1.2.0 - 2024-06-07}\\par"));
        assert!(doc.contains("\\bullet  Added dark mode\\par"));
        assert!(doc.contains("\\bullet  Faster startup\\par"));
    }

    #[test]
    fn test_render_heading_in_body_turns_bold() {
        let doc = render(&[release("v1.2.0", "## Highlights\n\nBetter logs")]);
        assert!(doc.contains("{\\b Highlights}\\par"));
        assert!(doc.contains("Better logs\\par"));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape("{x}"), "\\{x\\}");
        assert_eq!(escape("café"), "caf\\u233?");
        assert_eq!(escape("日"), "\\u26085?");
    }

    #[test]
    fn test_escape_astral_plane_uses_surrogates() {
        // U+1F600 -> D83D DE00
        assert_eq!(escape("\u{1f600}"), "\\u-10179?\\u-8704?");
    }
}
