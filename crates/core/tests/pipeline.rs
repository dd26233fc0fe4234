use std::sync::Arc;

use spudtext_core::{
    Contributor, MediaLink, ParseOptions, RecordingSink, Registries, SpudText, SpudTextError,
    parse,
};

fn contributors() -> Vec<Contributor> {
    vec![
        Contributor::new("BlueStrategosJ", "359bff"),
        Contributor::new("Matty5957", "daa520"),
        Contributor::new("Spammer92", "92ff00").with_twitch("Spammer_92"),
    ]
}

fn media() -> Vec<MediaLink> {
    vec![MediaLink {
        name: "logo.png".to_string(),
        link: "/spud-wiki/media/logo.png".to_string(),
        description: "Website logo.".to_string(),
    }]
}

struct Outcome {
    result: Result<SpudText, SpudTextError>,
    sink: Arc<RecordingSink>,
}

impl Outcome {
    fn doc(&self) -> &SpudText {
        self.result.as_ref().expect("document should compile")
    }

    fn warnings(&self) -> Vec<String> {
        self.sink
            .warnings()
            .into_iter()
            .map(|d| d.message)
            .collect()
    }
}

fn compile(input: &str) -> Outcome {
    let contributors = contributors();
    let media = media();
    let sink = Arc::new(RecordingSink::new());
    let options = ParseOptions::silent()
        .with_filepath("pages/test.txt")
        .with_sink(sink.clone());
    let result = parse(input, &Registries::new(&contributors, &media), &options);
    Outcome { result, sink }
}

#[test]
fn title_and_single_paragraph() {
    let out = compile("!title Hello\n\nWorld");
    let doc = out.doc();
    assert_eq!(doc.title(), "Hello");
    assert_eq!(doc.html(), "<p>World</p>");
    assert_eq!(doc.title_html(), r#"<h1 id="article-title">Hello</h1>"#);
    assert!(out.sink.diagnostics().iter().all(|d| d.severity != spudtext_core::Severity::Warning));
}

#[test]
fn render_is_idempotent() {
    let out = compile("!title T\n*a* **b** ##c##\n\n> quote\n==Head==\n{n}\n!noten note");
    let doc = out.doc();
    let first = doc.html().to_string();
    assert_eq!(doc.html(), first);
    assert!(std::ptr::eq(doc.html(), doc.html()));
    assert_eq!(doc.title_html(), doc.title_html());
}

#[test]
fn balanced_bold_markers_become_containers() {
    let out = compile("!title T\n**a** **b** **c**\n**d**");
    let html = out.doc().html();
    assert_eq!(html.matches("<b>").count(), 4);
    assert_eq!(html.matches("</b>").count(), 4);
}

#[test]
fn undefined_note_is_dropped_with_one_warning() {
    let out = compile("!title T\nText {x}");
    let doc = out.doc();
    assert_eq!(out.warnings(), vec!["Note 'x' is referenced but never defined"]);
    assert_eq!(doc.html(), "<p>Text</p>");
    assert!(!doc.html().contains("sup"));
}

#[test]
fn repeated_references_share_one_note() {
    let out = compile("!title T\n{x} and {x}\n!notex Footnote text");
    insta::assert_snapshot!(out.doc().html(), @r##"<p><sup id="ref-x-a" class="article-ref"><a href="#bottom-ref-x">[x]</a></sup> and <sup id="ref-x-b" class="article-ref"><a href="#bottom-ref-x">[x]</a></sup></p><h2 id="notes">Notes</h2><div id="bottom-refs"><div class="bottom-ref" id="bottom-ref-x"><div>x:</div><div><a href="#ref-x-a">a</a> <a href="#ref-x-b">b</a> Footnote text</div></div></div>"##);
    assert!(out.warnings().is_empty());
}

#[test]
fn removed_reference_leaves_no_empty_elements() {
    for (input, html) in [
        ("!title T\nsee *{x}* here", "<p>see  here</p>"),
        ("!title T\n> {x}", ""),
        ("!title T\n> a\n> {x}", "<blockquote><p>a</p></blockquote>"),
        ("!title T\n=={x}==", ""),
    ] {
        let out = compile(input);
        assert_eq!(out.doc().html(), html, "{input}");
        assert!(out.doc().headings().is_empty(), "{input}");
    }
}

#[test]
fn note_ids_are_valid_fragments() {
    let out = compile("!title T\nClaim{Key/One}\n!noteKey/One Source");
    let html = out.doc().html();
    assert!(html.contains(r##"<sup id="ref-keyone-a" class="article-ref"><a href="#bottom-ref-keyone">[Key/One]</a></sup>"##));
    assert!(html.contains(r##"<div class="bottom-ref" id="bottom-ref-keyone"><div>Key/One:</div>"##));
}

#[test]
fn heading_with_edge_whitespace_around_emphasis() {
    let out = compile("!title T\n==*x* ==\n== *y*==");
    assert_eq!(out.doc().html(), r#"<h2 id="x"><i>x</i></h2><h2 id="y"><i>y</i></h2>"#);
}

#[test]
fn single_reference_backlink_is_a_caret() {
    let out = compile("!title T\nClaim{src}\n!notesrc Source");
    assert!(out.doc().html().contains(r##"<a href="#ref-src-a">^</a> Source"##));
}

#[test]
fn unclosed_emphasis_fails_with_one_error() {
    let out = compile("!title T\n*hello");
    let err = out.result.as_ref().unwrap_err();
    let errors = out.sink.errors();
    assert_eq!(errors.len(), 1);
    let location = errors[0].location.as_ref().expect("location");
    assert_eq!(location.offset, 9);
    assert_eq!(err.location(), Some(location));
    assert!(errors[0].message.contains("'em'"));
}

#[test]
fn escaped_markers_are_literal() {
    let out = compile("!title T\n\\*not italic\\*");
    assert_eq!(out.doc().html(), "<p>*not italic*</p>");
}

#[test]
fn embedded_file_present() {
    let out = compile("!title T\n[[[logo.png|50|left|My caption]]]");
    assert!(out.warnings().is_empty());
    insta::assert_snapshot!(out.doc().html(), @r#"<figure class="embedded-file float-left" style="width:50%"><a href="/spud-wiki/media/logo.png" target="_blank" rel="noopener noreferrer"><img src="/spud-wiki/media/logo.png" alt="My caption"/></a><figcaption>My caption</figcaption></figure>"#);
}

#[test]
fn embedded_file_defaults_to_description() {
    let out = compile("!title T\n[[[LOGO.PNG]]]");
    let html = out.doc().html();
    assert!(html.contains("float-right"));
    assert!(html.contains("width:30%"));
    assert!(html.contains("<figcaption>Website logo.</figcaption>"));
}

#[test]
fn embedded_file_absent() {
    let out = compile("!title T\n[[[missing.png|50|left|My caption]]]");
    assert_eq!(out.warnings().len(), 1);
    assert_eq!(out.doc().html(), "");
}

#[test]
fn text_is_escaped() {
    let out = compile("!title Fish & <Chips>\na < b & c");
    let doc = out.doc();
    assert_eq!(doc.title(), "Fish & <Chips>");
    assert_eq!(
        doc.title_html(),
        r#"<h1 id="article-title">Fish &amp; &lt;Chips&gt;</h1>"#
    );
    assert_eq!(doc.html(), "<p>a &lt; b &amp; c</p>");
}

#[test]
fn blocks_and_links() {
    let out = compile(
        "!title T\n!center_title\n==Intro==\n> one\n> two\nSee [[https://example.com Example]].",
    );
    let doc = out.doc();
    insta::assert_snapshot!(doc.html(), @r#"<h2 id="intro">Intro</h2><blockquote><p>one</p><p>two</p></blockquote><p>See <a href="https://example.com" target="_blank" rel="noopener noreferrer">Example</a>.</p>"#);
    assert_eq!(
        doc.title_html(),
        r#"<h1 id="article-title" class="article-title-centered">T</h1>"#
    );
    assert_eq!(doc.headings().len(), 1);
    assert_eq!(doc.headings()[0].slug, "intro");
}

#[test]
fn metadata_is_collected() {
    let out = compile(
        "!title T\n!contributor bluestrategosj\n!contributor Spammer92\n!contributor Matty5957\n!make_blue_red\n!nosearchindex\n!command Potato\nBody",
    );
    let doc = out.doc();
    let flags = doc.flags();
    assert!(flags.make_blue_red && flags.no_search_index);
    assert!(!flags.no_edit && !flags.center_title);
    assert_eq!(doc.commands(), ["potato"]);

    let credits = doc.contributor_credits_html();
    assert!(credits.starts_with(r#"<a target="_blank" rel="noopener noreferrer" class="tw-name" href="https://www.twitch.tv/BlueStrategosJ" style="color:#f77">BlueStrategosJ</a>, "#));
    assert!(credits.contains("https://www.twitch.tv/Spammer_92"));
    assert!(credits.contains("</a> and <a "));
    assert!(credits.ends_with(">Matty5957</a>."));
}

#[test]
fn unknown_directives_are_kept_and_reported() {
    let out = compile("!title T\n!sparkle 3\nBody");
    let doc = out.doc();
    assert_eq!(out.warnings(), vec!["Unknown directive 'sparkle'"]);
    assert_eq!(doc.unresolved_directives().len(), 1);
    let location = &out.sink.warnings()[0].location;
    assert_eq!(
        location.as_ref().map(ToString::to_string),
        Some("pages/test.txt:2:1".to_string())
    );
}

#[test]
fn missing_title_is_fatal() {
    let out = compile("No title here");
    assert_eq!(out.result.as_ref().unwrap_err(), &SpudTextError::MissingTitle);
    assert_eq!(out.sink.errors().len(), 1);
}

#[test]
fn documents_are_shareable_across_threads() {
    let doc = Arc::new(compile("!title T\n*shared*").result.expect("valid"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = Arc::clone(&doc);
            std::thread::spawn(move || doc.html().to_string())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread"), "<p><i>shared</i></p>");
    }
}

#[test]
fn elapsed_time_is_reported_in_milliseconds() {
    let out = compile("!title T\nx");
    let text = out.doc().elapsed_string();
    assert!(text.ends_with(" ms"));
    let value: f64 = text.trim_end_matches(" ms").parse().expect("number");
    assert!(value >= 0.0);
    assert_eq!(text.split('.').nth(1).map(|d| d.len()), Some(6));
}
