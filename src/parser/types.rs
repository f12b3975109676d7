use std::path::PathBuf;

use crate::http::types::Method;

/// 从请求块解析出的 HTTP 请求
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,

    /// 已完成变量替换的 URL
    pub url: String,

    /// Headers，保持首次出现的顺序；同名 header 后出现的值覆盖前者
    pub headers: Vec<(String, String)>,

    pub body: Body,
}

impl Request {
    /// 按名称（大小写敏感）获取 header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// 请求体：原始文本或表单，二者互斥
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Raw(String),
    Form(Vec<FormField>),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Raw(text) => text.is_empty(),
            Body::Form(fields) => fields.is_empty(),
        }
    }

    /// 按字段名获取表单值
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match self {
            Body::Raw(_) => None,
            Body::Form(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

/// 表单字段值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 普通文本字段
    Literal(String),
    /// `!file(path)`：发送时读取文件内容
    File(PathBuf),
    /// `!content(text)`：直接作为附件内容
    Content(String),
}

/// 请求块解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// 去掉注释和空行后什么都不剩
    #[error("Request was empty")]
    EmptyBlock,

    /// 首行不是 `METHOD URL`
    #[error("Could not find method or URL in line '{line}'")]
    MalformedRequestLine { line: String },
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ParseError>;
