//! 请求块的行级词法分析。
//!
//! 同一行在不同解析状态下含义不同（例如 `GET http://x` 在请求行之后会被当作
//! header），所以这里只提供按状态调用的识别函数，状态转换由
//! [`crate::parser::RequestParser`] 驱动。

use crate::http::types::Method;

/// header 名中不允许出现的分隔字符
const HEADER_NAME_DELIMITERS: &[char] = &[
    '(', ')', '<', '>', '@', ',', ';', ':', '/', '[', ']', '?', '=', '{', '}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `METHOD URL`
    RequestLine { method: Method, url: &'a str },
    /// `Name: value`
    Header { name: &'a str, value: &'a str },
}

/// 判断是否为注释行
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// 去掉注释和空行，保持其余行的相对顺序
pub fn significant_lines<S: AsRef<str>>(block: &[S]) -> Vec<&str> {
    block
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !is_comment(line) && !is_blank(line))
        .collect()
}

/// 识别请求行：方法名后紧跟一个空格，其余部分原样作为 URL
pub fn request_line(line: &str) -> Option<Token<'_>> {
    let (method, url) = line.split_once(' ')?;
    let method = method.parse().ok()?;
    Some(Token::RequestLine { method, url })
}

/// 识别 header 行
pub fn header_line(line: &str) -> Option<Token<'_>> {
    let (name, rest) = line.split_once(':')?;
    if name.is_empty() || name.contains(HEADER_NAME_DELIMITERS) {
        return None;
    }
    Some(Token::Header {
        name,
        value: rest.trim_start(),
    })
}
