pub mod executor;

pub use executor::Executor;

use crate::Result;
use crate::generator::CurlTranslator;
use crate::variable::VariableResolver;

/// 请求块 -> curl 命令（变量已替换）
pub fn descriptor_to_curl<B, D>(block: &[B], document: &[D]) -> Result<String>
where
    B: AsRef<str>,
    D: AsRef<str>,
{
    let variables = VariableResolver::resolve(document, block);
    CurlTranslator::to_command_line(block, &variables)
}

/// curl 命令 -> 请求块行
pub fn curl_to_descriptor(command: &str) -> Result<Vec<String>> {
    CurlTranslator::from_command_line(command)
}
