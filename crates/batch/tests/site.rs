use spudtext_batch::{BatchInput, BatchOptions, parse_batch};
use spudtext_registry::default_registry;

fn pages() -> Vec<BatchInput> {
    (0..24)
        .map(|i| {
            BatchInput::new(
                format!("pages/page_{i}.txt"),
                format!("!title Page {i}\n!contributor Matty5957\n==Section==\nBody {i}[[[logo.png]]]"),
            )
        })
        .collect()
}

#[test]
fn whole_site_parses_against_the_default_registry() {
    let registry = default_registry().build().expect("defaults validate");
    let outcome = parse_batch(pages(), &registry.registries(), &BatchOptions::default());

    assert_eq!(outcome.stats.total, 24);
    assert_eq!(outcome.stats.succeeded, 24);
    assert_eq!(outcome.failures().count(), 0);
    for (i, result) in outcome.results.iter().enumerate() {
        assert_eq!(result.id, format!("pages/page_{i}.txt"));
        let doc = result.document.as_ref().expect("parsed");
        assert_eq!(doc.title(), format!("Page {i}"));
        assert_eq!(doc.contributors()[0].username, "Matty5957");
        assert!(doc.html().contains(r#"<h2 id="section">Section</h2>"#));
    }
}

#[test]
fn stats_serialize_as_camel_case() {
    let outcome = parse_batch(
        vec![BatchInput::new("empty.txt", "")],
        &spudtext_core::Registries::empty(),
        &BatchOptions {
            log_diagnostics: false,
            ..BatchOptions::default()
        },
    );
    let json = serde_json::to_value(outcome.stats).expect("serialize");
    assert_eq!(json["total"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["succeeded"], 0);
    assert!(json["processingTimeMs"].as_f64().is_some());
    insta::assert_snapshot!(
        outcome.results[0].error.as_ref().map(ToString::to_string).unwrap_or_default(),
        @"Source text is empty"
    );
}
