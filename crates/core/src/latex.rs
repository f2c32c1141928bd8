//! LaTeX document assembly.
//!
//! Turns a project's outline plus its generated content into one `.tex`
//! document. Titles are user-entered and always escaped; generated content
//! is trusted markup and is spliced in verbatim.
//!
//! Only three tiers are rendered: top-level `chapter` nodes, their `section`
//! children, and those sections' `subsection` children. A node whose level
//! does not match that shape (for example a chapter-level node with a
//! parent) is left out of the body.

use std::collections::HashMap;

use crate::outline::{OutlineLevel, OutlineNode};
use crate::outline_tree::OutlineIndex;

/// Preamble used when a project has no stored header.
pub const DEFAULT_PREAMBLE: &str = r"\documentclass[12pt]{book}
\usepackage{amsmath, amssymb, amsthm}
\usepackage{physics}
\usepackage{graphicx}
\usepackage{xcolor}
\usepackage[UTF8]{ctex}

\newcommand{\ex}[1]{\begin{exercise}#1\end{exercise}}
\newcommand{\sol}[1]{\begin{solution}#1\end{solution}}

\newtheorem{exercise}{例题}[section]
\newtheorem{solution}{解析}[section]";

/// Author line of the title block.
pub const DOCUMENT_AUTHOR: &str = "AI Generated Textbook";

/// Media type of the exported document.
pub const LATEX_CONTENT_TYPE: &str = "application/x-latex";

/// Escape user-entered text for inclusion in LaTeX source.
///
/// Three replacement passes in fixed order: backslash, then the
/// brace/punctuation set, then tilde and caret. The braces emitted for a
/// backslash go through the second pass, so `\` renders as
/// `\textbackslash\{\}`.
pub fn escape_latex(text: &str) -> String {
    let mut out = text.replace('\\', r"\textbackslash{}");
    for special in ['&', '%', '$', '#', '_', '{', '}'] {
        out = out.replace(special, &format!("\\{special}"));
    }
    out.replace('~', r"\textasciitilde{}")
        .replace('^', r"\textasciicircum{}")
}

/// Everything the assembler needs about the owning project.
#[derive(Debug, Clone, Copy)]
pub struct DocumentMeta<'a> {
    pub title: &'a str,
    /// Stored header, emitted verbatim; empty or `None` falls back to [`DEFAULT_PREAMBLE`].
    pub latex_header: Option<&'a str>,
}

/// Assemble the full document.
///
/// `contents` maps outline id to generated LaTeX. Missing or empty entries
/// render as heading-only.
pub fn assemble_document(
    meta: DocumentMeta<'_>,
    nodes: &[OutlineNode],
    contents: &HashMap<String, String>,
) -> String {
    let header = meta
        .latex_header
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_PREAMBLE);
    let body = render_body(nodes, contents);

    format!(
        "{header}\n\n\\begin{{document}}\n\n\\title{{{title}}}\n\\author{{{DOCUMENT_AUTHOR}}}\n\\date{{\\today}}\n\\maketitle\n\n\\tableofcontents\n\\newpage\n\n{body}\n\n\\end{{document}}",
        title = escape_latex(meta.title),
    )
}

/// Render the chapter/section/subsection body only.
pub fn render_body(nodes: &[OutlineNode], contents: &HashMap<String, String>) -> String {
    let index = OutlineIndex::new(nodes);
    let mut out = String::new();
    for chapter in index.roots().filter(|n| n.level == OutlineLevel::Chapter) {
        render_node(&index, chapter, contents, &mut out);
    }
    out
}

fn render_node(
    index: &OutlineIndex<'_>,
    node: &OutlineNode,
    contents: &HashMap<String, String>,
    out: &mut String,
) {
    out.push_str(&format!(
        "\\{}{{{}}}\n\n",
        node.level.latex_command(),
        escape_latex(&node.title)
    ));

    if let Some(content) = contents.get(&node.id).filter(|c| !c.is_empty()) {
        out.push_str(content);
        out.push_str("\n\n");
    }

    if let Some(child_level) = node.level.child_level() {
        for child in index.children_of(&node.id).filter(|c| c.level == child_level) {
            render_node(index, child, contents, out);
        }
    }
}

/// Download filename for a project's export: `<title>.tex` with characters
/// that break a quoted `Content-Disposition` filename replaced by `_`.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        "document.tex".to_string()
    } else {
        format!("{stem}.tex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::OutlineLevel::{Chapter, Section, Subsection};
    use crate::outline_tree::test_support::node;

    fn titled(mut n: OutlineNode, title: &str) -> OutlineNode {
        n.title = title.to_string();
        n
    }

    fn meta(title: &str) -> DocumentMeta<'_> {
        DocumentMeta {
            title,
            latex_header: None,
        }
    }

    fn content(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -- Escaping --

    #[test]
    fn escapes_ampersand_and_underscore_only() {
        assert_eq!(escape_latex("A & B_C"), r"A \& B\_C");
    }

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(escape_latex("%$#{}"), r"\%\$\#\{\}");
        assert_eq!(escape_latex("a~b^c"), r"a\textasciitilde{}b\textasciicircum{}c");
    }

    #[test]
    fn backslash_braces_go_through_the_brace_pass() {
        assert_eq!(escape_latex(r"a\b"), r"a\textbackslash\{\}b");
    }

    #[test]
    fn tilde_and_caret_braces_are_left_alone() {
        assert_eq!(escape_latex("~{"), r"\textasciitilde{}\{");
    }

    #[test]
    fn plain_and_unicode_text_is_untouched() {
        assert_eq!(escape_latex("牛顿力学 Ω"), "牛顿力学 Ω");
    }

    // -- Assembly --

    #[test]
    fn single_chapter_with_content() {
        let nodes = vec![titled(node("c1", None, Chapter, 0), "Intro & Basics")];
        let doc = assemble_document(meta("Physics"), &nodes, &content(&[("c1", "Hello")]));

        assert_eq!(doc.matches(r"\chapter{").count(), 1);
        assert!(doc.contains("\\chapter{Intro \\& Basics}\n\nHello\n\n"));
    }

    #[test]
    fn uses_default_preamble_and_title_block() {
        let doc = assemble_document(meta("Mechanics_101"), &[], &HashMap::new());
        assert!(doc.starts_with(DEFAULT_PREAMBLE));
        assert!(doc.contains("\\begin{document}"));
        assert!(doc.contains("\\title{Mechanics\\_101}"));
        assert!(doc.contains("\\author{AI Generated Textbook}"));
        assert!(doc.contains("\\tableofcontents\n\\newpage"));
        assert!(doc.ends_with("\\end{document}"));
    }

    #[test]
    fn stored_header_replaces_default() {
        let header = "\\documentclass{report}";
        let doc = assemble_document(
            DocumentMeta {
                title: "T",
                latex_header: Some(header),
            },
            &[],
            &HashMap::new(),
        );
        assert!(doc.starts_with("\\documentclass{report}\n\n\\begin{document}"));
        assert!(!doc.contains("ctex"));
    }

    #[test]
    fn empty_header_falls_back_to_default() {
        let doc = assemble_document(
            DocumentMeta {
                title: "T",
                latex_header: Some(""),
            },
            &[],
            &HashMap::new(),
        );
        assert!(doc.starts_with(DEFAULT_PREAMBLE));
    }

    #[test]
    fn whitespace_header_is_emitted_verbatim() {
        let doc = assemble_document(
            DocumentMeta {
                title: "T",
                latex_header: Some("  "),
            },
            &[],
            &HashMap::new(),
        );
        assert!(doc.starts_with("  \n\n\\begin{document}"));
        assert!(!doc.contains(DEFAULT_PREAMBLE));
    }

    #[test]
    fn hierarchy_renders_in_sibling_order() {
        let nodes = vec![
            titled(node("c2", None, Chapter, 1), "Second"),
            titled(node("s-b", Some("c1"), Section, 2), "S2"),
            titled(node("c1", None, Chapter, 0), "First"),
            titled(node("s-a", Some("c1"), Section, 0), "S0"),
            titled(node("s-m", Some("c1"), Section, 1), "S1"),
            titled(node("ss", Some("s-a"), Subsection, 0), "Sub"),
        ];
        let body = render_body(&nodes, &HashMap::new());
        assert_eq!(
            body,
            "\\chapter{First}\n\n\\section{S0}\n\n\\subsection{Sub}\n\n\\section{S1}\n\n\\section{S2}\n\n\\chapter{Second}\n\n"
        );
    }

    #[test]
    fn content_is_spliced_verbatim() {
        let nodes = vec![node("c1", None, Chapter, 0), node("s1", Some("c1"), Section, 0)];
        let raw = r"Energy $E = mc^2$ & 100% \ex{q}";
        let body = render_body(&nodes, &content(&[("s1", raw)]));
        assert!(body.contains(raw));
    }

    #[test]
    fn missing_or_empty_content_renders_heading_only() {
        let nodes = vec![node("c1", None, Chapter, 0), node("c2", None, Chapter, 1)];
        let body = render_body(&nodes, &content(&[("c2", "")]));
        assert_eq!(body, "\\chapter{Title c1}\n\n\\chapter{Title c2}\n\n");
    }

    #[test]
    fn nested_chapter_is_excluded_from_body() {
        let nodes = vec![
            titled(node("c1", None, Chapter, 0), "Top"),
            titled(node("s1", Some("c1"), Section, 0), "Sec"),
            titled(node("stray", Some("s1"), Chapter, 0), "Stray Chapter"),
            titled(node("c-under-c", Some("c1"), Chapter, 1), "Nested Chapter"),
        ];
        let body = render_body(&nodes, &content(&[("stray", "never"), ("c-under-c", "never")]));
        assert!(!body.contains("Stray Chapter"));
        assert!(!body.contains("Nested Chapter"));
        assert!(!body.contains("never"));
        assert_eq!(body.matches("\\chapter{").count(), 1);
    }

    #[test]
    fn top_level_non_chapters_are_excluded() {
        let nodes = vec![node("s", None, Section, 0), node("ss", None, Subsection, 1)];
        assert_eq!(render_body(&nodes, &HashMap::new()), "");
    }

    #[test]
    fn escaping_runs_once_per_render() {
        let nodes = vec![titled(node("c1", None, Chapter, 0), "50% & more")];
        let doc = assemble_document(meta("A & B"), &nodes, &HashMap::new());
        assert!(doc.contains("\\title{A \\& B}"));
        assert!(doc.contains("\\chapter{50\\% \\& more}"));
        assert!(!doc.contains("\\\\&"));
        assert!(!doc.contains("textbackslash"));
    }

    #[test]
    fn cyclic_nodes_do_not_hang_rendering() {
        let nodes = vec![
            node("c1", None, Chapter, 0),
            node("a", Some("b"), Section, 0),
            node("b", Some("a"), Subsection, 0),
        ];
        assert_eq!(render_body(&nodes, &HashMap::new()), "\\chapter{Title c1}\n\n");
    }

    // -- Filenames --

    #[test]
    fn export_filename_sanitizes_title() {
        assert_eq!(export_filename("Physics I"), "Physics I.tex");
        assert_eq!(export_filename("a/b:\"c\""), "a_b__c_.tex");
        assert_eq!(export_filename("   "), "document.tex");
    }
}
