use std::path::Path;

use tracing::debug;

use crate::http::types::Method;
use crate::parser::{Body, FieldValue, Request};
use crate::{RestBlockError, Result};

/// multipart 中的一个附件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 发送给传输层的请求体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Empty,
    Text(String),
    /// 没有附件的表单，按 application/x-www-form-urlencoded 发送
    UrlEncoded(Vec<(String, String)>),
    /// 含附件的表单，按 multipart/form-data 发送
    Multipart {
        fields: Vec<(String, String)>,
        attachments: Vec<Attachment>,
    },
}

/// 附件已读入内存、可直接交给 [`crate::http::Transport`] 的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
}

impl PreparedRequest {
    /// 读取所有 `!file(...)` 附件；任何一个读取失败都不会产生请求
    pub fn prepare(request: &Request) -> Result<Self> {
        let payload = match &request.body {
            Body::Raw(text) if text.is_empty() => Payload::Empty,
            Body::Raw(text) => Payload::Text(text.clone()),
            Body::Form(form) => {
                let mut fields = Vec::new();
                let mut attachments = Vec::new();
                for field in form {
                    match &field.value {
                        FieldValue::Literal(value) => {
                            fields.push((field.name.clone(), value.clone()))
                        }
                        FieldValue::File(path) => attachments.push(Attachment {
                            field: field.name.clone(),
                            file_name: Self::file_name(path),
                            bytes: Self::read_attachment(path)?,
                        }),
                        FieldValue::Content(content) => attachments.push(Attachment {
                            field: field.name.clone(),
                            file_name: field.name.clone(),
                            bytes: content.clone().into_bytes(),
                        }),
                    }
                }

                if attachments.is_empty() {
                    Payload::UrlEncoded(fields)
                } else {
                    Payload::Multipart {
                        fields,
                        attachments,
                    }
                }
            }
        };

        Ok(Self {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            payload,
        })
    }

    /// 按名称（不区分大小写）查找 header
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    fn read_attachment(path: &Path) -> Result<Vec<u8>> {
        let bytes = std::fs::read(path).map_err(|source| RestBlockError::AttachmentRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), size = bytes.len(), "attachment loaded");
        Ok(bytes)
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}
