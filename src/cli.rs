use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use colored::*;

use restblock::config::{ConfigLoader, Settings};
use restblock::document;
use restblock::generator::CurlTranslator;
use restblock::http::Client;
use restblock::runner::{self, Executor};
use restblock::utils::RenderedResponse;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径，默认查找 restblock.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 不校验 TLS 证书
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// 请求超时（秒）
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// JSON 响应缩进宽度
    #[arg(long, global = true)]
    pub indent: Option<usize>,

    /// JSON 响应保留非 ASCII 字符
    #[arg(long, global = true)]
    pub no_escape_unicode: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 发送文件中指定行所在的请求块
    Send {
        file: PathBuf,
        /// 行号（从 1 开始），默认第一个非空行
        #[arg(short, long)]
        line: Option<usize>,
    },
    /// 把请求块转换为 curl 命令
    ToCurl {
        file: PathBuf,
        #[arg(short, long)]
        line: Option<usize>,
        /// 再加一层转义，便于嵌入双引号字符串
        #[arg(long)]
        escape_for_host: bool,
    },
    /// 把 curl 命令转换为请求块
    FromCurl {
        /// 包含 curl 命令的文件；省略时读取 --command 或标准输入
        file: Option<PathBuf>,
        #[arg(short, long)]
        line: Option<usize>,
        #[arg(short, long)]
        command: Option<String>,
    },
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => ConfigLoader::find_and_load().unwrap_or_default(),
        };

        // CLI 参数优先级最高
        if self.insecure {
            settings.http.verify_ssl = false;
        }
        if let Some(timeout) = self.timeout {
            settings.http.timeout_secs = timeout;
        }
        if let Some(indent) = self.indent {
            settings.json.indent_width = indent;
        }
        if self.no_escape_unicode {
            settings.json.escape_non_ascii = false;
        }

        Ok(settings)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;

    match cli.command {
        Commands::Send { file, line } => {
            let lines = read_lines(&file)?;
            let block = document::find_block(&lines, block_index(&lines, line)?);

            let client = Client::new(&settings.http)?;
            let executor = Executor::new(client, &settings);
            let rendered = executor.execute_descriptor(block, &lines).await?;
            print_rendered(&rendered);
        }
        Commands::ToCurl {
            file,
            line,
            escape_for_host,
        } => {
            let lines = read_lines(&file)?;
            let block = document::find_block(&lines, block_index(&lines, line)?);

            let command = runner::descriptor_to_curl(block, &lines)?;
            if escape_for_host {
                println!("{}", CurlTranslator::escape_for_host(&command));
            } else {
                println!("{}", command);
            }
        }
        Commands::FromCurl {
            file,
            line,
            command,
        } => {
            let text = match (command, file) {
                (Some(command), _) => command,
                (None, Some(file)) => {
                    let lines = read_lines(&file)?;
                    let block = document::find_block(&lines, block_index(&lines, line)?);
                    document::join_command_lines(block)
                }
                (None, None) => {
                    let mut input = String::new();
                    std::io::stdin()
                        .read_to_string(&mut input)
                        .context("Failed to read curl command from stdin")?;
                    let lines: Vec<&str> = input.lines().collect();
                    document::join_command_lines(&lines)
                }
            };

            for line in runner::curl_to_descriptor(&text)? {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// 把 1 起始的行号换成下标；未指定时取第一个非空行
fn block_index(lines: &[String], line: Option<usize>) -> Result<usize> {
    match line {
        Some(0) => Err(anyhow!("Line numbers start at 1")),
        Some(n) if n > lines.len() => Err(anyhow!(
            "Line {} is past the end of the file ({} lines)",
            n,
            lines.len()
        )),
        Some(n) => Ok(n - 1),
        None => lines
            .iter()
            .position(|l| !l.trim().is_empty())
            .ok_or_else(|| anyhow!("File is empty")),
    }
}

fn print_rendered(rendered: &RenderedResponse) {
    let color = std::io::stdout().is_terminal();
    let status_line = format!("// status code: {}", rendered.status);

    for line in &rendered.lines {
        if color && *line == status_line {
            let colored_line = if rendered.is_success() {
                line.green().bold()
            } else if rendered.is_client_error() {
                line.yellow().bold()
            } else {
                line.red().bold()
            };
            println!("{}", colored_line);
        } else {
            println!("{}", line);
        }
    }
}
