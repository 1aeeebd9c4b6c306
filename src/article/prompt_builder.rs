//! Prompt builder for article generation.
//!
//! The prompt is an ordered list of sections. Each section has a guard and a
//! renderer; sections whose guard fails are skipped and the rest are joined
//! with a blank line.

use crate::article::request::ArticleRequest;

/// First line of the outline instructions.
pub const OUTLINE_MARKER: &str = "Include a clear outline before the main content.";
/// Line emitted instead of the outline instructions.
pub const SKIP_OUTLINE_LINE: &str = "Skip the outline; start directly with the article.";
/// Keyword placeholder when the list is empty.
pub const NO_KEYWORDS: &str = "N/A";

const SECTION_SEPARATOR: &str = "\n\n";

/// A flag-guarded block of prompt text.
struct Section {
    guard: fn(&ArticleRequest) -> bool,
    render: fn(&ArticleRequest) -> String,
}

const SECTIONS: &[Section] = &[
    Section { guard: always, render: render_preamble },
    Section { guard: always, render: render_goal },
    Section { guard: always, render: render_structure },
    Section { guard: always, render: render_content_requirements },
    Section { guard: wants_extra_deliverables, render: render_deliverables },
    Section { guard: always, render: render_output_order },
    Section { guard: always, render: render_extra_instructions },
];

/// Optional "Output Order" entries. Numbers are fixed text.
const OUTPUT_ORDER_EXTRAS: &[(fn(&ArticleRequest) -> bool, &str)] = &[
    (wants_seo, "3) SEO Block"),
    (wants_references, "4) References"),
];

/// Build the full instruction text for `req`.
///
/// Pure and deterministic. The caller is expected to have rejected a blank
/// topic already; user text is interpolated without escaping.
#[must_use]
pub fn build_prompt(req: &ArticleRequest) -> String {
    let rendered: Vec<String> = SECTIONS
        .iter()
        .filter(|section| (section.guard)(req))
        .map(|section| (section.render)(req))
        .collect();

    rendered.join(SECTION_SEPARATOR).trim().to_string()
}

/// Keywords joined by ", ", or `N/A` when there are none.
#[must_use]
pub fn keyword_line(keywords: &[String]) -> String {
    if keywords.is_empty() {
        NO_KEYWORDS.to_string()
    } else {
        keywords.join(", ")
    }
}

const fn always(_: &ArticleRequest) -> bool {
    true
}

const fn wants_seo(req: &ArticleRequest) -> bool {
    req.include_seo
}

const fn wants_references(req: &ArticleRequest) -> bool {
    req.include_references
}

const fn wants_extra_deliverables(req: &ArticleRequest) -> bool {
    wants_seo(req) || wants_references(req)
}

/// Goal heading. Its underline is one dash longer than the title.
const GOAL_HEADING: &str = "Goal\n-----";

fn heading(title: &str) -> String {
    format!("{title}\n{}", "-".repeat(title.chars().count()))
}

fn render_preamble(_: &ArticleRequest) -> String {
    "You are a senior content strategist and expert writer.".to_string()
}

fn render_goal(req: &ArticleRequest) -> String {
    let mut out = GOAL_HEADING.to_string();
    out.push('\n');
    out.push_str(&format!(
        "Write a comprehensive, well-structured article in {} for the topic:\n\"{}\"\n\n",
        req.language, req.topic
    ));
    out.push_str(&format!("Audience: {}\n", req.audience));
    out.push_str(&format!("Tone/Voice: {}\n", req.tone));
    out.push_str(&format!("Reading Level: {}\n", req.reading_level.label()));
    out.push_str(&format!("Target Length: ~{} words\n", req.target_words));
    out.push_str(&format!("Primary Keywords: {}", keyword_line(&req.keywords)));
    out
}

fn render_structure(req: &ArticleRequest) -> String {
    let mut out = heading("Structure & Style");
    out.push('\n');
    if req.include_outline {
        out.push_str(OUTLINE_MARKER);
        out.push_str("\n- H1 title\n- 5–8 H2 sections with concise H3s where helpful\n");
    } else {
        out.push_str(SKIP_OUTLINE_LINE);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(
        "- Use Markdown formatting.\n\
         - Use scannable headings, short paragraphs, and bullet lists where helpful.\n\
         - Provide concrete examples and actionable tips.\n\
         - Avoid fluff; keep it factual and clear.\n\
         - Natural keyword usage; avoid keyword stuffing.",
    );
    out
}

fn render_content_requirements(_: &ArticleRequest) -> String {
    let mut out = heading("Content Requirements");
    out.push('\n');
    out.push_str(
        "- Strong hook and crisp thesis in intro.\n\
         - Each H2 should fully cover one major point.\n\
         - Add comparisons, pros/cons, pitfalls, or checklists where useful.\n\
         - Conclude with practical summary or next steps.",
    );
    out
}

fn render_deliverables(req: &ArticleRequest) -> String {
    let mut out = heading("Additional Sections");
    if req.include_seo {
        out.push_str(
            "\nAfter the article, output an SEO block with:\n\
             - SEO Title (≤ 60 chars)\n\
             - Meta Description (≤ 155 chars)\n\
             - 8–12 SEO Keywords (comma-separated)",
        );
    }
    if req.include_references {
        out.push_str(
            "\nAdd a short 'References' section with 3–5 plausible sources (titles only, no links).",
        );
    }
    out
}

fn render_output_order(req: &ArticleRequest) -> String {
    let mut out = heading("Output Order");
    out.push_str("\n1) Outline (if requested)\n2) Full article in Markdown");
    for (guard, line) in OUTPUT_ORDER_EXTRAS {
        if guard(req) {
            out.push('\n');
            out.push_str(line);
        }
    }
    out
}

fn render_extra_instructions(req: &ArticleRequest) -> String {
    let mut out = heading("Extra Instructions");
    out.push('\n');
    out.push_str(&req.extra_instructions);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ArticleRequest {
        ArticleRequest::new("Composting at home")
    }

    #[test]
    fn test_outline_toggle() {
        let with_outline = build_prompt(&request().with_outline(true));
        assert!(with_outline.contains(OUTLINE_MARKER));
        assert!(!with_outline.contains(SKIP_OUTLINE_LINE));

        let without_outline = build_prompt(&request().with_outline(false));
        assert!(!without_outline.contains(OUTLINE_MARKER));
        assert!(without_outline.contains(SKIP_OUTLINE_LINE));
    }

    #[test]
    fn test_section_underlines() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Goal\n-----\nWrite a comprehensive"));
        assert!(prompt.contains("Structure & Style\n-----------------\n"));
        assert!(prompt.contains("Output Order\n------------\n"));
    }

    #[test]
    fn test_keyword_line_empty() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Primary Keywords: N/A"));
    }

    #[test]
    fn test_keyword_line_keeps_order() {
        let prompt = build_prompt(&request().with_keywords(["worms", "bokashi", "leaf mould"]));
        assert!(prompt.contains("Primary Keywords: worms, bokashi, leaf mould"));
        assert!(!prompt.contains("N/A"));
    }

    #[test]
    fn test_references_keep_fixed_number() {
        let prompt = build_prompt(&request().with_seo(false).with_references(true));
        assert!(prompt.contains("4) References"));
        assert!(!prompt.contains("3) "));
        assert!(!prompt.contains("SEO Title"));
        assert!(prompt.contains("3–5 plausible sources"));
    }

    #[test]
    fn test_seo_block() {
        let prompt = build_prompt(&request().with_seo(true));
        assert!(prompt.contains("3) SEO Block"));
        assert!(prompt.contains("SEO Title (≤ 60 chars)"));
        assert!(prompt.contains("Meta Description (≤ 155 chars)"));
        assert!(prompt.contains("8–12 SEO Keywords"));
        assert!(!prompt.contains("4) References"));
    }

    #[test]
    fn test_no_optional_deliverables() {
        let prompt = build_prompt(&request().with_seo(false).with_references(false));
        assert!(!prompt.contains("Additional Sections"));
        assert!(prompt.contains("2) Full article in Markdown\n\nExtra Instructions"));
    }

    #[test]
    fn test_fields_interpolated_verbatim() {
        let req = request()
            .with_language("French")
            .with_audience("Gardeners & <allotment> holders")
            .with_tone("Warm")
            .with_target_words(1_500);
        let prompt = build_prompt(&req);
        assert!(prompt.contains("article in French for the topic:\n\"Composting at home\""));
        assert!(prompt.contains("Audience: Gardeners & <allotment> holders"));
        assert!(prompt.contains("Tone/Voice: Warm"));
        assert!(prompt.contains("Reading Level: Easy to read (Grade 8–10)"));
        assert!(prompt.contains("Target Length: ~1500 words"));
    }

    #[test]
    fn test_trimmed_and_extra_at_end() {
        let prompt = build_prompt(&request().with_extra_instructions("Add a checklist.  "));
        assert!(prompt.starts_with("You are a senior content strategist"));
        assert!(prompt.ends_with("Extra Instructions\n------------------\nAdd a checklist."));

        let empty_extra = build_prompt(&request());
        assert!(empty_extra.ends_with("Extra Instructions\n------------------"));
    }

    #[test]
    fn test_deterministic() {
        let req = request().with_keywords(["a", "b"]).with_references(true);
        assert_eq!(build_prompt(&req), build_prompt(&req));
    }
}
