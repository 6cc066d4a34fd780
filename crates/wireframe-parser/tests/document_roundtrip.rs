//! Document parse tests.
//!
//! These tests verify that every construct of the wireframe grammar parses
//! into the expected CST structure:
//!
//! 1. Project header
//! 2. Theme / tokens / colors / mocks blocks
//! 3. Screens and root layouts
//! 4. Layout params, nested layouts, grid cells
//! 5. Components and property lists
//! 6. Define declarations

use wireframe_ast::cst::{RawDocument, RawItem, RawNode, RawValue};
use wireframe_lexer::tokenize;
use wireframe_parser::parse_document;

/// Helper to parse a document from source.
fn parse(source: &str) -> RawDocument {
    let tokens = tokenize(source).expect("Lex failed");
    parse_document(&tokens, 0).expect("Parse failed")
}

#[test]
fn test_empty_project() {
    let doc = parse(r#"project "Empty" { }"#);
    assert_eq!(&*doc.project.name, "Empty");
    assert!(doc.project.items.is_empty());
}

#[test]
fn test_theme_block() {
    let doc = parse(
        r#"
        project "T" {
            theme {
                spacing: lg
                density: compact
            }
        }
        "#,
    );

    assert_eq!(doc.project.items.len(), 1);
    let RawItem::Theme(block) = &doc.project.items[0] else {
        panic!("Expected theme item");
    };
    assert_eq!(block.entries.len(), 2);
    assert_eq!(&*block.entries[0].key, "spacing");
    assert_eq!(block.entries[0].value, RawValue::Ident("lg".into()));
}

#[test]
fn test_tokens_keyword_is_theme_alias() {
    let doc = parse(r#"project "T" { tokens { spacing: sm } }"#);
    assert!(matches!(doc.project.items[0], RawItem::Theme(_)));
}

#[test]
fn test_colors_and_mocks() {
    let doc = parse(
        r##"
        project "T" {
            colors { primary: "#336699" }
            mocks { user: "Ada Lovelace" }
        }
        "##,
    );
    assert!(matches!(doc.project.items[0], RawItem::Colors(_)));
    assert!(matches!(doc.project.items[1], RawItem::Mocks(_)));
}

#[test]
fn test_screen_with_root_layout() {
    let doc = parse(
        r#"
        project "T" {
            screen Main {
                layout stack {
                    component Heading text: "Hi"
                }
            }
        }
        "#,
    );

    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen item");
    };
    assert_eq!(&*screen.name, "Main");
    assert_eq!(&*screen.root.layout_type, "stack");
    assert_eq!(screen.root.children.len(), 1);

    let RawNode::Component(heading) = &screen.root.children[0] else {
        panic!("Expected component child");
    };
    assert_eq!(&*heading.component_type, "Heading");
    assert_eq!(&*heading.props[0].key, "text");
    assert_eq!(heading.props[0].value, RawValue::Str("Hi".into()));
}

#[test]
fn test_screen_name_as_string() {
    let doc = parse(r#"project "T" { screen "Sign In" { layout stack { } } }"#);
    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen item");
    };
    assert_eq!(&*screen.name, "Sign In");
}

#[test]
fn test_layout_params() {
    let doc = parse(
        r#"
        project "T" {
            screen Main {
                layout split(sidebar: 260, gap: 16) {
                    layout stack { }
                    layout stack { }
                }
            }
        }
        "#,
    );

    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen");
    };
    assert_eq!(&*screen.root.layout_type, "split");
    assert_eq!(screen.root.params.len(), 2);
    assert_eq!(screen.root.params[0].value, RawValue::Num(260.0));
    assert_eq!(screen.root.children.len(), 2);
}

#[test]
fn test_grid_with_cells() {
    let doc = parse(
        r#"
        project "T" {
            screen Main {
                layout grid(columns: 12) {
                    cell span: 8 {
                        component Chart chart: bar
                    }
                    cell span: 4 {
                        component List items: 5
                    }
                }
            }
        }
        "#,
    );

    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen");
    };
    assert_eq!(screen.root.children.len(), 2);

    let RawNode::Cell(cell) = &screen.root.children[0] else {
        panic!("Expected cell");
    };
    assert_eq!(&*cell.props[0].key, "span");
    assert_eq!(cell.props[0].value, RawValue::Num(8.0));
    assert_eq!(cell.children.len(), 1);
}

#[test]
fn test_define_declaration() {
    let doc = parse(
        r#"
        project "T" {
            define component StatCard {
                layout card {
                    component Heading text: "Metric"
                    component Text text: "42"
                }
            }
        }
        "#,
    );

    let RawItem::Define(define) = &doc.project.items[0] else {
        panic!("Expected define item");
    };
    assert_eq!(&*define.name, "StatCard");
    let RawNode::Layout(body) = &define.body else {
        panic!("Expected layout body");
    };
    assert_eq!(&*body.layout_type, "card");
    assert_eq!(body.children.len(), 2);
}

#[test]
fn test_define_name_as_string() {
    let doc = parse(
        r#"
        project "T" {
            define component "StatCard" {
                component Text text: "42"
            }
        }
        "#,
    );
    let RawItem::Define(define) = &doc.project.items[0] else {
        panic!("Expected define item");
    };
    assert_eq!(&*define.name, "StatCard");
}

#[test]
fn test_component_property_run_ends_at_next_keyword() {
    // Properties belong to the nearest preceding component; the next
    // `component` keyword ends the run
    let doc = parse(
        r#"
        project "T" {
            screen Main {
                layout stack {
                    component Input placeholder: "Email"
                    component Button label: "Send" variant: primary
                }
            }
        }
        "#,
    );

    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen");
    };
    assert_eq!(screen.root.children.len(), 2);

    let RawNode::Component(button) = &screen.root.children[1] else {
        panic!("Expected component");
    };
    assert_eq!(button.props.len(), 2);
    assert_eq!(button.props[1].value, RawValue::Ident("primary".into()));
}

#[test]
fn test_spans_cover_declarations() {
    let source = r#"project "T" { screen Main { layout stack { } } }"#;
    let tokens = tokenize(source).expect("lex");
    let doc = parse_document(&tokens, 7).expect("parse");

    let RawItem::Screen(screen) = &doc.project.items[0] else {
        panic!("Expected screen");
    };
    assert_eq!(screen.span.file_id, 7);
    assert_eq!(&source[screen.span.start as usize..screen.span.end as usize],
        "screen Main { layout stack { } }");
}

#[test]
fn test_reentrant_parsing() {
    // Two documents parsed back to back with independent streams produce
    // identical results (no shared state)
    let source = r#"project "T" { screen Main { layout stack { component Text text: "x" } } }"#;
    let tokens = tokenize(source).expect("lex");
    let first = parse_document(&tokens, 0).expect("parse");
    let second = parse_document(&tokens, 0).expect("parse");
    assert_eq!(first, second);
}
