use restblock::document;
use restblock::generator::CurlTranslator;
use restblock::http::Method;
use restblock::parser::{Body, FieldValue, Request, RequestParser};
use restblock::variable::VariableTable;
use restblock::{curl_to_descriptor, descriptor_to_curl};
use serde_json::Value;

/// 请求块 -> curl -> 请求块，再解析一次
fn round_trip(block: &[&str]) -> Request {
    let command = descriptor_to_curl(block, block).unwrap();
    let lines = curl_to_descriptor(&command).unwrap();
    RequestParser::parse(&lines, &VariableTable::new()).unwrap()
}

fn raw_body(request: &Request) -> &str {
    match &request.body {
        Body::Raw(text) => text,
        Body::Form(_) => panic!("expected raw body, got {:?}", request.body),
    }
}

#[test]
fn test_round_trip_json_body() {
    let request = round_trip(&[
        "# :name = tést",
        "PATCH http://example.com/items/1?fields=a&b=2",
        "Content-Type: application/json",
        "X-Trace: $HOME `id`",
        "{",
        "  \"name\": \":name\",",
        "  \"tags\": [\"x\", \"y\"]",
        "}",
    ]);

    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.url, "http://example.com/items/1?fields=a&b=2");
    assert_eq!(
        request.headers,
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Trace".to_string(), "$HOME `id`".to_string()),
        ]
    );

    let body: Value = serde_json::from_str(raw_body(&request)).unwrap();
    assert_eq!(body, serde_json::json!({"name": "tést", "tags": ["x", "y"]}));
}

#[test]
fn test_round_trip_raw_and_form_body() {
    let request = round_trip(&["POST http://example.com/post", "some \"quoted\" data"]);
    assert_eq!(request.method, Method::Post);
    assert_eq!(raw_body(&request), "some \"quoted\" data");

    let request = round_trip(&["PUT http://example.com/put", "forma=a b"]);
    assert_eq!(request.method, Method::Put);
    assert_eq!(
        request.body.field("forma"),
        Some(&FieldValue::Literal("a b".to_string()))
    );
}

#[test]
fn test_round_trip_body_starting_with_dash() {
    for body in ["-1", "--boundary", "- item one"] {
        let block = ["POST http://h/p", body];
        let request = round_trip(&block);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://h/p");
        assert_eq!(raw_body(&request), body);
    }
}

#[test]
fn test_round_trip_without_body() {
    let request = round_trip(&["DELETE https://example.com/items/1", "Accept: */*"]);
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.header("Accept"), Some("*/*"));
    assert!(request.body.is_empty());
}

#[test]
fn test_document_variables_in_curl() {
    let document = [
        "# $host = api.example.com",
        "# $token = secret",
        "",
        "GET https://$host/me",
        "Authorization: Bearer $token",
    ];

    let command = descriptor_to_curl(&document[3..], &document).unwrap();
    assert_eq!(
        command,
        r#"curl -X GET -H "Authorization: Bearer secret" -v -d "" https://api.example.com/me"#
    );
}

#[test]
fn test_escape_for_host_layer() {
    let block = ["POST http://h/p", "{\"k\": 1}"];
    let command = descriptor_to_curl(&block, &block).unwrap();
    assert_eq!(command, r#"curl -X POST -v -d "{\"k\": 1}" http://h/p"#);
    assert_eq!(
        CurlTranslator::escape_for_host(&command),
        r#"curl -X POST -v -d \"{\\\"k\\\": 1}\" http://h/p"#
    );
}

#[test]
fn test_multiline_command_from_document() {
    let document = [
        "# copied from the browser",
        "curl -X POST \\",
        "  -H 'Content-Type: application/json' \\",
        "  -d '{\"b\": 2, \"a\": \"ü\"}' \\",
        "  http://example.com/post",
    ];

    let block = document::find_block(&document, 2);
    let lines = curl_to_descriptor(&document::join_command_lines(block)).unwrap();
    assert_eq!(
        lines,
        vec![
            "POST http://example.com/post",
            "Content-Type: application/json",
            "{",
            "    \"a\": \"\\u00fc\",",
            "    \"b\": 2",
            "}",
        ]
    );
}
