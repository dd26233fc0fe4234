use std::sync::Arc;

use spudtext_core::{ParseOptions, RecordingSink, parse};
use spudtext_registry::{RegistryConfig, default_registry};

#[test]
fn page_resolves_against_the_default_registry() {
    let registry = default_registry().build().expect("defaults validate");
    let sink = Arc::new(RecordingSink::new());
    let options = ParseOptions::silent().with_sink(sink.clone());
    let doc = parse(
        "!title Logo\n!contributor matty5957\n!contributor kawaiitron\n[[[logo.png|40]]]",
        &registry.registries(),
        &options,
    )
    .expect("valid page");

    assert!(sink.warnings().is_empty());
    let names: Vec<_> = doc.contributors().iter().map(|c| c.username.as_str()).collect();
    assert_eq!(names, vec!["Matty5957", "Kawaiitron"]);
    insta::assert_snapshot!(doc.html(), @r#"<figure class="embedded-file float-right" style="width:40%"><a href="/spud-wiki/media/logo.png" target="_blank" rel="noopener noreferrer"><img src="/spud-wiki/media/logo.png" alt="Website logo."/></a><figcaption>Website logo.</figcaption></figure>"#);
}

#[test]
fn yaml_registry_drives_lookups() {
    let registry = RegistryConfig::from_yaml_str(
        r#"
contributors:
  - username: Tater
    color: "abcdef"
"#,
    )
    .expect("valid yaml")
    .build()
    .expect("valid registry");
    let sink = Arc::new(RecordingSink::new());
    let options = ParseOptions::silent().with_sink(sink.clone());
    let doc = parse(
        "!title T\n!contributor tater\n!contributor Matty5957\n[[[logo.png]]]",
        &registry.registries(),
        &options,
    )
    .expect("valid page");

    assert_eq!(doc.contributors().len(), 1);
    let warnings: Vec<_> = sink.warnings().into_iter().map(|d| d.message).collect();
    assert_eq!(
        warnings,
        vec![
            "Unknown contributor 'Matty5957'",
            "Unknown media file 'logo.png'"
        ]
    );
}
