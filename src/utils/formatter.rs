use crate::config::JsonSettings;
use crate::http::Response;
use crate::utils::json::{JsonStyle, format_json};
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";

/// 渲染后的响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    /// body 行、空行、状态行、每个 header 一行
    pub lines: Vec<String>,
    /// JSON 系列统一为 application/json，其余为去掉参数后的原值
    pub content_type: String,
    /// 建议的显示语法，如 json / xml / html / http
    pub syntax: String,
    pub status: u16,
}

impl RenderedResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.status)
    }
}

/// 把响应格式化为显示用的文本行
pub struct ResponseRenderer {
    style: JsonStyle,
    json_syntax: String,
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new(&JsonSettings::default())
    }
}

impl ResponseRenderer {
    pub fn new(settings: &JsonSettings) -> Self {
        Self {
            style: JsonStyle::new(settings.indent_width, settings.escape_non_ascii),
            json_syntax: settings.syntax.clone(),
        }
    }

    pub fn render(&self, response: &Response) -> RenderedResponse {
        let mut content_type = response.content_type();
        let mut body = response.body.clone();

        if Self::is_json_type(&content_type) {
            content_type = JSON_CONTENT_TYPE.to_string();
            // 解析失败时保留原文
            match format_json(&response.body, self.style) {
                Ok(pretty) => body = pretty,
                Err(e) => debug!("response declared as JSON but failed to parse: {}", e),
            }
        }

        let mut lines: Vec<String> = body.split('\n').map(str::to_string).collect();
        lines.push(String::new());
        lines.push(format!("// status code: {}", response.status));
        lines.extend(
            response
                .headers
                .iter()
                .map(|(name, value)| format!("// {}: {}", name, value)),
        );

        let syntax = self.syntax_for(&content_type);
        RenderedResponse {
            lines,
            content_type,
            syntax,
            status: response.status,
        }
    }

    /// 以 json 或 javascript 结尾（不区分大小写）
    fn is_json_type(content_type: &str) -> bool {
        let lower = content_type.to_ascii_lowercase();
        lower.ends_with("json") || lower.ends_with("javascript")
    }

    fn syntax_for(&self, content_type: &str) -> String {
        match content_type {
            JSON_CONTENT_TYPE => self.json_syntax.clone(),
            "application/xml" => "xml".to_string(),
            "text/html" => "html".to_string(),
            _ => "http".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>, body: &str) -> Response {
        let mut headers = Vec::new();
        if let Some(ct) = content_type {
            headers.push(("Content-Type".to_string(), ct.to_string()));
        }
        headers.push(("X-Server".to_string(), "mock".to_string()));
        Response::new(200, headers, body)
    }

    #[test]
    fn test_render_json_sorted() {
        let rendered = ResponseRenderer::default().render(&response(
            Some("application/json; charset=utf-8"),
            r#"{"b":1,"a":2}"#,
        ));

        assert_eq!(
            rendered.lines,
            vec![
                "{",
                "  \"a\": 2,",
                "  \"b\": 1",
                "}",
                "",
                "// status code: 200",
                "// Content-Type: application/json; charset=utf-8",
                "// X-Server: mock",
            ]
        );
        assert_eq!(rendered.content_type, "application/json");
        assert_eq!(rendered.syntax, "json");
    }

    #[test]
    fn test_render_invalid_json_falls_back() {
        let rendered = ResponseRenderer::default()
            .render(&response(Some("application/json"), "{oops\nstill oops"));

        assert_eq!(rendered.lines[0], "{oops");
        assert_eq!(rendered.lines[1], "still oops");
        assert_eq!(rendered.lines[2], "");
        assert_eq!(rendered.content_type, "application/json");
    }

    #[test]
    fn test_render_javascript_is_normalized() {
        let rendered =
            ResponseRenderer::default().render(&response(Some("text/JavaScript"), "[1]"));
        assert_eq!(rendered.content_type, "application/json");
        assert_eq!(rendered.lines[..3], ["[", "  1", "]"]);
    }

    #[test]
    fn test_render_plain_text() {
        let rendered =
            ResponseRenderer::default().render(&response(Some("text/plain; charset=utf-8"), "hi"));
        assert_eq!(rendered.lines[0], "hi");
        assert_eq!(rendered.lines[2], "// status code: 200");
        assert_eq!(rendered.content_type, "text/plain");
        assert_eq!(rendered.syntax, "http");
    }

    #[test]
    fn test_render_without_content_type() {
        let rendered = ResponseRenderer::default().render(&response(None, ""));
        assert_eq!(
            rendered.lines,
            vec!["", "", "// status code: 200", "// X-Server: mock"]
        );
        assert_eq!(rendered.content_type, "");
    }

    #[test]
    fn test_syntax_mapping() {
        let renderer = ResponseRenderer::new(&JsonSettings {
            syntax: "javascript".to_string(),
            ..JsonSettings::default()
        });
        assert_eq!(
            renderer
                .render(&response(Some("application/hal+json"), "{}"))
                .syntax,
            "javascript"
        );
        assert_eq!(
            renderer.render(&response(Some("application/xml"), "<a/>")).syntax,
            "xml"
        );
        assert_eq!(
            renderer.render(&response(Some("text/html"), "<p>")).syntax,
            "html"
        );
    }

    #[test]
    fn test_render_respects_indent_and_escape() {
        let renderer = ResponseRenderer::new(&JsonSettings {
            escape_non_ascii: false,
            indent_width: 4,
            ..JsonSettings::default()
        });
        let rendered = renderer.render(&response(Some("application/json"), r#"{"k":"é"}"#));
        assert_eq!(rendered.lines[1], "    \"k\": \"é\"");
    }

    #[test]
    fn test_render_keeps_large_numbers_exact() {
        let rendered = ResponseRenderer::default().render(&response(
            Some("application/json"),
            r#"{"id":12345678901234567890123,"ratio":0.1000000000000000055511151231257827}"#,
        ));
        assert_eq!(rendered.lines[1], "  \"id\": 12345678901234567890123,");
        assert_eq!(rendered.lines[2], "  \"ratio\": 0.1000000000000000055511151231257827");
    }

    #[test]
    fn test_status_classes() {
        let mut rendered = ResponseRenderer::default().render(&response(None, ""));
        assert!(rendered.is_success());

        rendered.status = 404;
        assert!(rendered.is_client_error());
        assert!(!rendered.is_success());

        rendered.status = 500;
        assert!(!rendered.is_client_error());
        assert!(!rendered.is_success());
    }
}
