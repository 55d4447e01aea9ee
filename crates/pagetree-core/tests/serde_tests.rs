//! Serialized shape of parse trees and pages (requires the `serde` feature)

#![cfg(feature = "serde")]

use pagetree_core::{Reader, Token};
use serde_json::json;

fn tokens() -> Vec<Token> {
    vec![
        Token::open("html"),
        Token::open("head"),
        Token::open("title"),
        Token::text("T"),
        Token::end("title"),
        Token::end("head"),
        Token::open("body"),
        Token::start("p", [("class", "x")]),
        Token::text("Hi"),
        Token::end("p"),
        Token::end("body"),
        Token::end("html"),
    ]
}

#[test]
fn test_parse_tree_json() {
    let tokens = tokens();
    let tree = Reader::new().parse_tree(&tokens).unwrap();
    let value = serde_json::to_value(&tree.body).unwrap();

    assert_eq!(value["name"], json!("body"));
    assert_eq!(value["kind"], json!("Container"));
    assert_eq!(value["closed"], json!(true));

    let p = &value["content"]["Children"][0]["Node"];
    assert_eq!(p["name"], json!("p"));
    assert_eq!(p["content"]["Children"][0]["Text"], json!("Hi"));
}

#[test]
fn test_page_json() {
    let tokens = tokens();
    let page = Reader::new().read(&tokens).unwrap();
    let value = serde_json::to_value(&page).unwrap();

    let paragraph = &value["body"]["Body"]["children"]["Markup"][0]["Element"]["Paragraph"];
    assert_eq!(paragraph["children"]["Markup"][0]["Text"], json!("Hi"));
    assert_eq!(paragraph["attributes"]["entries"][0], json!(["class", "x"]));
}
