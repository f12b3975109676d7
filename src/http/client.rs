use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::config::HttpSettings;
use crate::http::request::{Payload, PreparedRequest};
use crate::http::response::Response;
use crate::{RestBlockError, Result};

/// 发送一个请求并等待响应的能力
///
/// 解析与渲染都不做 I/O，网络访问只经过这里。测试里可以换成内存实现。
pub trait Transport {
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<Response>> + Send;
}

/// 基于 reqwest 的传输层
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .build()?;

        if !settings.verify_ssl {
            debug!("TLS certificate verification disabled");
        }

        Ok(Self { inner })
    }

    async fn execute(&self, request: PreparedRequest) -> Result<Response> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| RestBlockError::InvalidUrl(format!("{} ({})", request.url, e)))?;

        let mut req = self.inner.request(request.method.to_reqwest(), url);
        let is_multipart = matches!(request.payload, Payload::Multipart { .. });
        for (name, value) in &request.headers {
            // multipart 的 Content-Type 带 boundary，由 reqwest 生成
            if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                debug!(value = %value, "ignoring Content-Type header for multipart body");
                continue;
            }
            req = req.header(name.as_str(), value.as_str());
        }

        let has_content_type = request.has_header("Content-Type");
        req = match request.payload {
            Payload::Empty => req,
            Payload::Text(text) => req.body(text),
            Payload::UrlEncoded(fields) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&fields)
                    .finish();
                if !has_content_type {
                    req = req.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                }
                req.body(encoded)
            }
            Payload::Multipart {
                fields,
                attachments,
            } => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for attachment in attachments {
                    let part = Part::bytes(attachment.bytes).file_name(attachment.file_name);
                    form = form.part(attachment.field, part);
                }
                req.multipart(form)
            }
        };

        info!(method = %request.method, url = %request.url, "sending request");
        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;
        debug!(status, size = body.len(), "response received");

        Ok(Response::new(status, headers, body))
    }
}

impl Transport for Client {
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<Response>> + Send {
        self.execute(request)
    }
}
