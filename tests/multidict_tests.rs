#![allow(clippy::unwrap_used, clippy::expect_used)]

use opspec::multidict::{parse_multi_dict, MultiDict};
use serde_json::{json, Value};

fn flatten(dict: &MultiDict) -> Value {
    Value::Object(parse_multi_dict(dict))
}

#[test]
fn test_single_value_is_unwrapped() {
    let dict: MultiDict = vec![("x", "1")].into_iter().collect();
    assert_eq!(flatten(&dict), json!({ "x": "1" }));
}

#[test]
fn test_repeated_key_keeps_sequence() {
    let dict: MultiDict = vec![("y", "1"), ("y", "2")].into_iter().collect();
    assert_eq!(flatten(&dict), json!({ "y": ["1", "2"] }));
}

#[test]
fn test_empty_container() {
    assert!(parse_multi_dict(&MultiDict::new()).is_empty());
}

#[test]
fn test_duplicates_preserved_and_key_order_kept() {
    let dict = MultiDict::from_query("tag=a&limit=5&tag=a&tag=b");
    let flat = parse_multi_dict(&dict);
    let keys: Vec<&String> = flat.keys().collect();
    assert_eq!(keys, vec!["tag", "limit"]);
    assert_eq!(flat["tag"], json!(["a", "a", "b"]));
    assert_eq!(flat["limit"], json!("5"));
}

#[test]
fn test_every_key_survives() {
    let mut dict = MultiDict::new();
    dict.append("a", "1");
    dict.append("b", "");
    dict.append("c", "3");
    dict.append("a", "4");
    let flat = parse_multi_dict(&dict);
    assert_eq!(flat.len(), 3);
    assert_eq!(flat["b"], json!(""));
}

#[test]
fn test_flattened_query_feeds_model_deserialization() {
    #[derive(serde::Deserialize)]
    struct Search {
        q: String,
        tag: Vec<String>,
    }

    let dict = MultiDict::from_query("q=cats&tag=small&tag=fluffy");
    let search: Search = serde_json::from_value(flatten(&dict)).unwrap();
    assert_eq!(search.q, "cats");
    assert_eq!(search.tag, vec!["small", "fluffy"]);
}

#[test]
fn test_cookie_header_flattening() {
    let dict = MultiDict::from_cookie_header("session=abc; theme=dark; theme=light");
    assert_eq!(
        flatten(&dict),
        json!({ "session": "abc", "theme": ["dark", "light"] })
    );
}
