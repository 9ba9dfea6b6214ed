//! Integration tests for the artboard import pipeline

use pretty_assertions::assert_eq;

use xd_layout::layout::BoundingBox;
use xd_layout::output::{AnchorX, AnchorY, Color};
use xd_layout::rules::RuleOutput;
use xd_layout::{
    import_artboard, import_file, Asset, AssetLoader, Component, DesignFile, ImportConfig,
    ImportError, LayoutDocument, LayoutError, ObjectRule, Point, ResolvedNode, RuleSet, Size,
};

const HOME: &str = r#"{
    "artboards": [{
        "name": "Home",
        "geometry": { "x": 0, "y": 0, "width": 200, "height": 100 },
        "children": [
            {
                "id": "bg", "name": "Background", "type": "rect",
                "style": { "fill": { "type": "solid", "color": { "value": { "r": 255, "g": 255, "b": 255 } } } },
                "shape": { "type": "rect", "x": 0, "y": 0, "width": 200, "height": 100 }
            },
            {
                "id": "title", "name": "Title", "type": "text",
                "transform": { "tx": 20, "ty": 30 },
                "style": { "font": { "postscriptName": "Inter-Regular", "size": 10 } },
                "text": { "rawText": "Hello", "frame": { "type": "positioned" } }
            },
            {
                "id": "buy", "type": "syncRef", "syncSourceGuid": "sym-button",
                "transform": { "tx": 150, "ty": 70 },
                "meta": { "ux": { "constraintRight": true, "constraintBottom": true } }
            }
        ]
    }],
    "resources": {
        "symbols": [{
            "id": "sym-button", "name": "Buy@button", "type": "group",
            "group": { "children": [{
                "id": "sym-button-bg", "name": "Fill", "type": "rect",
                "shape": { "type": "rect", "width": 40, "height": 20 }
            }] }
        }]
    }
}"#;

fn import_home() -> LayoutDocument {
    let file = DesignFile::from_json_str(HOME).expect("fixture should parse");
    let config = ImportConfig::default();
    let mut docs = import_file(&file, &RuleSet::builtin(&config), &config).expect("should import");
    assert_eq!(docs.len(), 1);
    docs.remove(0)
}

#[test]
fn test_identities_are_contiguous_from_root() {
    let doc = import_home();
    let ids: Vec<u32> = doc.elements.keys().copied().collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert_eq!(doc.root, 0);

    let root = doc.root_element().unwrap();
    assert_eq!(root.name, "Home");
    assert_eq!(root.size, Size::new(200.0, 100.0));
    assert_eq!(root.children, vec![1, 2, 3]);
}

#[test]
fn test_shape_becomes_image_with_sprite() {
    let doc = import_home();
    let bg = doc.element(1).unwrap();
    assert_eq!(bg.name, "Background");
    assert_eq!(bg.position, Point::new(0.0, 0.0));
    assert_eq!(bg.size, Size::new(200.0, 100.0));
    assert_eq!(
        bg.components,
        vec![Component::Image {
            sprite: Some("bg.svg".to_string()),
            color: Some(Color {
                r: 255,
                g: 255,
                b: 255,
                a: 1.0
            }),
        }]
    );
    assert!(doc.load("bg.svg").is_some_and(|bytes| bytes.starts_with(b"<svg")));
}

#[test]
fn test_symbol_instance_is_resolved_and_tagged() {
    let doc = import_home();
    let buy = doc.element(3).unwrap();
    assert_eq!(buy.name, "Buy");
    assert_eq!(buy.components, vec![Component::Button]);
    // instance rect spans (50, 20)..(90, 40) in artboard-centered space
    assert_eq!(buy.position, Point::new(70.0, -30.0));
    assert_eq!(buy.size, Size::new(40.0, 20.0));
    assert_eq!((buy.anchor_x, buy.anchor_y), (AnchorX::Right, AnchorY::Bottom));
    assert_eq!(buy.children, vec![4]);

    let fill = doc.element(4).unwrap();
    assert_eq!(fill.name, "Fill");
    assert_eq!(fill.position, Point::new(0.0, 0.0));
    assert_eq!((fill.anchor_x, fill.anchor_y), (AnchorX::Center, AnchorY::Middle));
}

#[test]
fn test_text_component() {
    let doc = import_home();
    let title = doc.element(2).unwrap();
    match &title.components[..] {
        [Component::Text {
            text, size, font, ..
        }] => {
            assert_eq!(text.as_deref(), Some("Hello"));
            assert_eq!(*size, Some(10.0));
            assert_eq!(font.as_deref(), Some("Inter-Regular"));
        }
        other => panic!("expected one text component, got {:?}", other),
    }
}

#[test]
fn test_assets_in_first_seen_order() {
    let doc = import_home();
    let files: Vec<&str> = doc.assets.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(files, vec!["bg.svg", "sym-button-bg.svg"]);
}

#[test]
fn test_json_output_shape() {
    let doc = import_home();
    let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

    assert_eq!(json["meta"]["source"], "xd-layout");
    assert_eq!(json["root"], 0);
    assert_eq!(json["elements"]["3"]["anchor_x"], "right");
    assert_eq!(json["elements"]["3"]["components"][0]["type"], "button");
    assert_eq!(
        json["assets"][0],
        serde_json::json!({ "type": "sprite", "file": "bg.svg" })
    );
}

#[test]
fn test_hash_tracks_raw_artboard() {
    let first = import_home();
    let second = import_home();
    assert_eq!(first.hash, second.hash);

    let changed = HOME.replace("\"rawText\": \"Hello\"", "\"rawText\": \"Bye\"");
    let file = DesignFile::from_json_str(&changed).unwrap();
    let config = ImportConfig::default();
    let docs = import_file(&file, &RuleSet::builtin(&config), &config).unwrap();
    assert_ne!(docs[0].hash, first.hash);
}

/// Emits a fixed sprite whose bytes carry the node identity
struct LogoRule;

impl ObjectRule for LogoRule {
    fn name(&self) -> &str {
        "logo"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        node.has_parameter("logo")
    }

    fn size(&self, _node: &ResolvedNode, position: Point) -> BoundingBox {
        BoundingBox::new(position.x, position.y, 10.0, 10.0)
    }

    fn emit(&self, node: &ResolvedNode, _size: Size) -> Result<RuleOutput, LayoutError> {
        Ok(RuleOutput {
            components: vec![Component::Image {
                sprite: Some("logo.png".to_string()),
                color: None,
            }],
            assets: vec![Asset::sprite("logo.png", node.key().as_bytes().to_vec())],
        })
    }
}

#[test]
fn test_duplicate_asset_keeps_first_bytes() {
    let file = DesignFile::from_json_str(
        r#"{ "artboards": [{
            "name": "Logos",
            "geometry": { "width": 50, "height": 50 },
            "children": [
                { "id": "first", "name": "A@logo", "type": "rect" },
                { "id": "second", "name": "B@logo", "type": "rect", "transform": { "tx": 20, "ty": 0 } }
            ]
        }] }"#,
    )
    .unwrap();
    let config = ImportConfig::default();
    let rules = RuleSet::builder().object_rule(LogoRule).build(&config);

    let doc = import_artboard(&file.artboards[0], &file.resources, &rules, &config)
        .unwrap()
        .unwrap();
    assert_eq!(doc.assets.len(), 1);
    assert_eq!(doc.load("logo.png"), Some(b"first".as_slice()));
    assert_eq!(doc.elements.len(), 3);
}

#[test]
fn test_empty_artboard_is_skipped() {
    let file = DesignFile::from_json_str(
        r#"{ "artboards": [
            { "name": "Empty", "geometry": { "width": 10, "height": 10 } },
            { "name": "Full", "geometry": { "width": 10, "height": 10 },
              "children": [{ "id": "g", "name": "G", "type": "group" }] }
        ] }"#,
    )
    .unwrap();
    let config = ImportConfig::default();
    let docs = import_file(&file, &RuleSet::builtin(&config), &config).unwrap();
    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Full"]);
}

#[test]
fn test_shape_without_geometry_is_unknown() {
    let file = DesignFile::from_json_str(
        r#"{ "artboards": [{
            "name": "Broken",
            "geometry": { "width": 10, "height": 10 },
            "children": [{ "id": "r", "name": "Bare", "type": "rect" }]
        }] }"#,
    )
    .unwrap();
    let config = ImportConfig::default();
    let err = import_file(&file, &RuleSet::builtin(&config), &config).unwrap_err();

    let ImportError::Artboard { artboard, source } = err else {
        panic!("expected artboard context");
    };
    assert_eq!(artboard, "Broken");
    assert!(matches!(
        *source,
        ImportError::Layout(LayoutError::UnknownNodeKind { .. })
    ));
}

#[test]
fn test_unresolved_symbol_aborts_artboard() {
    let file = DesignFile::from_json_str(
        r#"{ "artboards": [{
            "name": "Dangling",
            "geometry": { "width": 10, "height": 10 },
            "children": [{ "id": "ref", "type": "syncRef", "syncSourceGuid": "gone" }]
        }] }"#,
    )
    .unwrap();
    let config = ImportConfig::default();
    let err = import_file(&file, &RuleSet::builtin(&config), &config).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"artboard 'Dangling': symbol resolution failed: unresolved symbol reference 'gone' on node '' (id: ref)"
    );
}

#[test]
fn test_unsupported_node_type_fails_only_its_artboard() {
    let file = DesignFile::from_json_str(
        r#"{ "artboards": [
            {
                "name": "Good",
                "geometry": { "width": 10, "height": 10 },
                "children": [{ "id": "g", "name": "Plain", "type": "group" }]
            },
            {
                "name": "Bad",
                "geometry": { "width": 10, "height": 10 },
                "children": [{ "id": "img", "name": "Photo", "type": "image" }]
            }
        ] }"#,
    )
    .expect("unknown node types should still load");
    let config = ImportConfig::default();
    let rules = RuleSet::builtin(&config);

    let good = import_artboard(&file.artboards[0], &file.resources, &rules, &config).unwrap();
    assert_eq!(good.map(|doc| doc.elements.len()), Some(2));

    let err = import_artboard(&file.artboards[1], &file.resources, &rules, &config).unwrap_err();
    match err {
        ImportError::Layout(LayoutError::UnknownNodeKind { name, id, .. }) => {
            assert_eq!((name.as_str(), id.as_str()), ("Photo", "img"));
        }
        other => panic!("expected unknown node kind, got {other:?}"),
    }

    let err = import_file(&file, &rules, &config).unwrap_err();
    assert!(matches!(err, ImportError::Artboard { ref artboard, .. } if artboard == "Bad"));
}

#[test]
fn test_reference_without_source_aborts_artboard() {
    let file = DesignFile::from_json_str(
        r#"{
            "artboards": [{
                "name": "Bare",
                "geometry": { "width": 10, "height": 10 },
                "children": [{ "id": "ref", "type": "syncRef" }]
            }],
            "resources": { "symbols": [{
                "id": "sym", "name": "Sym", "type": "group",
                "group": { "children": [{
                    "name": "Anon", "type": "rect",
                    "shape": { "type": "rect", "width": 4, "height": 4 }
                }] }
            }] }
        }"#,
    )
    .unwrap();
    let config = ImportConfig::default();
    let err = import_file(&file, &RuleSet::builtin(&config), &config).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"artboard 'Bare': symbol resolution failed: unresolved symbol reference '' on node '' (id: ref)"
    );
}
