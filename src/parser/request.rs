use crate::http::types::Method;
use crate::parser::body::BodyClassifier;
use crate::parser::lexer::{self, Token};
use crate::parser::types::{ParseError, ParseResult, Request};
use crate::variable::{VariableResolver, VariableTable};
use tracing::debug;

/// 请求行与 headers 解析完成后的中间结果，body 尚未分类
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHead {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// 剩余的 body 行（已完成变量替换）
    pub body_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectMethod,
    ExpectHeaderOrBody,
    InBody,
}

/// 请求块解析器
pub struct RequestParser;

impl RequestParser {
    /// 解析完整请求（包括 body 分类）
    pub fn parse<S: AsRef<str>>(block: &[S], variables: &VariableTable) -> ParseResult<Request> {
        let head = Self::parse_head(block, variables)?;
        let body = BodyClassifier::classify(&head.body_lines);

        debug!(
            method = %head.method,
            url = %head.url,
            headers = head.headers.len(),
            "request parsed"
        );

        Ok(Request {
            method: head.method,
            url: head.url,
            headers: head.headers,
            body,
        })
    }

    /// 解析请求行与 headers，剩余行替换变量后原样返回
    pub fn parse_head<S: AsRef<str>>(
        block: &[S],
        variables: &VariableTable,
    ) -> ParseResult<RequestHead> {
        let lines = lexer::significant_lines(block);
        if lines.is_empty() {
            return Err(ParseError::EmptyBlock);
        }

        let mut state = State::ExpectMethod;
        let mut method = Method::Get;
        let mut url = String::new();
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut body_lines = Vec::new();

        for line in lines {
            match state {
                State::ExpectMethod => match lexer::request_line(line) {
                    Some(Token::RequestLine { method: m, url: u }) => {
                        method = m;
                        url = VariableResolver::substitute(u, variables);
                        state = State::ExpectHeaderOrBody;
                    }
                    _ => {
                        return Err(ParseError::MalformedRequestLine {
                            line: line.to_string(),
                        });
                    }
                },
                State::ExpectHeaderOrBody => match lexer::header_line(line) {
                    Some(Token::Header { name, value }) => {
                        let value = VariableResolver::substitute(value, variables);
                        Self::set_header(&mut headers, name, value);
                    }
                    _ => {
                        state = State::InBody;
                        body_lines.push(VariableResolver::substitute(line, variables));
                    }
                },
                State::InBody => body_lines.push(VariableResolver::substitute(line, variables)),
            }
        }

        Ok(RequestHead {
            method,
            url,
            headers,
            body_lines,
        })
    }

    fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
        match headers.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => headers.push((name.to_string(), value)),
        }
    }
}
