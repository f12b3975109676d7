use crate::Result;
use crate::config::Settings;
use crate::http::{PreparedRequest, Transport};
use crate::parser::RequestParser;
use crate::utils::formatter::{RenderedResponse, ResponseRenderer};
use crate::variable::VariableResolver;
use tracing::info;

/// 解析请求块、通过传输层发送、渲染响应
pub struct Executor<T> {
    transport: T,
    renderer: ResponseRenderer,
}

impl<T: Transport> Executor<T> {
    pub fn new(transport: T, settings: &Settings) -> Self {
        Self {
            transport,
            renderer: ResponseRenderer::new(&settings.json),
        }
    }

    /// 执行单个请求块
    ///
    /// 解析错误和附件读取错误都发生在发送之前；传输层错误原样返回。
    pub async fn execute_descriptor<B, D>(
        &self,
        block: &[B],
        document: &[D],
    ) -> Result<RenderedResponse>
    where
        B: AsRef<str>,
        D: AsRef<str>,
    {
        let variables = VariableResolver::resolve(document, block);
        let request = RequestParser::parse(block, &variables)?;
        let prepared = PreparedRequest::prepare(&request)?;

        let response = self.transport.send(prepared).await?;
        info!(status = response.status, "response received");

        Ok(self.renderer.render(&response))
    }
}
