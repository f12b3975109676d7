use crate::parser::RequestParser;
use crate::utils::json::{JsonStyle, format_json};
use crate::variable::VariableTable;
use crate::{RestBlockError, Result};
use clap::{ArgAction, Parser};
use tracing::debug;

/// curl 命令行中支持的固定参数集合
#[derive(Parser, Debug)]
#[command(
    name = "curl",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct CurlArgs {
    #[arg(short = 'H', allow_hyphen_values = true)]
    headers: Vec<String>,

    /// 可重复出现，取值不影响转换结果
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    #[arg(short = 'd', allow_hyphen_values = true)]
    data: Option<String>,

    #[arg(short = 'X', allow_hyphen_values = true)]
    method: Option<String>,

    url: String,
}

/// 请求块与 curl 命令之间的双向转换
pub struct CurlTranslator;

impl CurlTranslator {
    /// 请求块 -> curl 命令
    ///
    /// 总是输出 `-X`、`-v` 和 `-d`；body 行逐行 trim 后用空格拼接。
    pub fn to_command_line<S: AsRef<str>>(
        block: &[S],
        variables: &VariableTable,
    ) -> Result<String> {
        let head = RequestParser::parse_head(block, variables)?;

        let data = head
            .body_lines
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" ");

        let mut command = format!("curl -X {}", head.method);
        for (name, value) in &head.headers {
            let header = format!("{}: {}", name, value);
            command.push_str(&format!(" -H \"{}\"", Self::escape_double_quoted(&header)));
        }
        command.push_str(&format!(" -v -d \"{}\" ", Self::escape_double_quoted(&data)));

        let url = shlex::try_quote(&head.url)
            .map_err(|e| RestBlockError::MalformedCurl(format!("cannot quote URL: {}", e)))?;
        command.push_str(&url);

        debug!(command = %command, "curl command generated");
        Ok(command)
    }

    /// 给命令再加一层转义，便于嵌入宿主的双引号字符串
    pub fn escape_for_host(command: &str) -> String {
        command.replace('\\', "\\\\").replace('"', "\\\"")
    }

    /// curl 命令 -> 请求块行
    ///
    /// 只接受 `-X`、`-H`、`-v`、`-d` 和一个 URL，其它参数一律报错。
    pub fn from_command_line(text: &str) -> Result<Vec<String>> {
        let mut tokens = shlex::split(text).ok_or_else(|| {
            RestBlockError::MalformedCurl("unbalanced quotes or trailing escape".to_string())
        })?;

        if tokens.first().is_some_and(|t| t == "curl") {
            tokens.remove(0);
        }

        let args = CurlArgs::try_parse_from(std::iter::once("curl".to_string()).chain(tokens))
            .map_err(|e| RestBlockError::MalformedCurl(Self::clap_message(&e)))?;

        let method = args.method.clone().unwrap_or_else(|| {
            if args.data.is_some() { "POST" } else { "GET" }.to_string()
        });

        let mut lines = vec![format!("{} {}", method, args.url)];
        lines.extend(args.headers.iter().cloned());

        if let Some(data) = args.data.as_deref().filter(|d| !d.is_empty()) {
            match format_json(data, JsonStyle::CURL_BODY) {
                Ok(pretty) => lines.extend(pretty.lines().map(str::to_string)),
                Err(_) => lines.push(data.to_string()),
            }
        }

        debug!(lines = lines.len(), verbose = args.verbose, "curl command parsed");
        Ok(lines)
    }

    /// 双引号内需要转义的字符：`\` `"` `$` `` ` ``
    fn escape_double_quoted(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if matches!(c, '\\' | '"' | '$' | '`') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn clap_message(err: &clap::Error) -> String {
        err.to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string()
    }
}
