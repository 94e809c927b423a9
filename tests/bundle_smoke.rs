use elementa_engine::{ConfigError, ContentBundle, Phase, Sandbox};

#[test]
fn builtin_bundle_parses_and_resolves() {
    let bundle = ContentBundle::builtin().expect("built-in bundle should parse");
    assert!(bundle.element_count() > 10);

    let water = bundle.get("water").expect("water is built in");
    assert_eq!(water.phase, Phase::Liquid);
    assert!(water.reaction_with("lava").is_some());

    let registry = bundle.into_registry().expect("every referenced element exists");
    for name in ["sand", "water", "lava", "steam", "stone", "fire", "smoke", "acid-gas"] {
        assert!(registry.contains(name), "missing {name}");
    }
}

#[test]
fn manifest_lists_every_element() {
    let bundle = ContentBundle::builtin().unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&bundle.manifest_json()).unwrap();
    assert_eq!(manifest["formatVersion"], 1);
    let elements = manifest["elements"].as_array().unwrap();
    assert_eq!(elements.len(), bundle.element_count());
    assert!(elements
        .iter()
        .any(|e| e["name"] == "sand" && e["behavior"] == "powder" && e["phase"] == "powder"));
}

#[test]
fn custom_bundle_drives_a_sandbox() {
    let content = r#"{"formatVersion":1,"elements":[
        {"name":"grit","behavior":"powder","phase":"powder","density":2.0}
    ]}"#;
    let mut sb = Sandbox::from_content_json(4, 4, content, "{}").unwrap();
    assert_eq!(sb.element_names(), "grit");
    assert!(sb.add_particle(0, 0, "grit"));
    assert!(!sb.add_particle(1, 0, "sand"));
    for _ in 0..3 {
        sb.tick();
    }
    assert_eq!(sb.kind_at(0, 3).as_deref(), Some("grit"));
}

#[test]
fn broken_bundles_are_rejected() {
    let dangling = r#"{"elements":[
        {"name":"rock","behavior":"static","phaseChange":{"high":{"temp":900,"to":"magma"}}}
    ]}"#;
    let err = ContentBundle::from_json(dangling).unwrap().into_registry().unwrap_err();
    assert_eq!(err, ConfigError::Unregistered { count: 1, names: vec!["magma".into()] });

    let bad_behavior = r#"{"elements":[{"name":"goo","behavior":"slime"}]}"#;
    assert!(matches!(
        ContentBundle::from_json(bad_behavior).unwrap().into_registry(),
        Err(ConfigError::UnknownBehavior { .. })
    ));

    let duplicate = r#"{"elements":[{"name":"a"},{"name":"a"}]}"#;
    assert_eq!(
        ContentBundle::from_json(duplicate).unwrap_err(),
        ConfigError::DuplicateElement("a".into())
    );

    let future = r#"{"formatVersion":9,"elements":[]}"#;
    assert!(matches!(ContentBundle::from_json(future), Err(ConfigError::Bundle(_))));
}
