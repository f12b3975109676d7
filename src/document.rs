//! 宿主侧的文档辅助：从整篇文档里取出光标所在的请求块。

use crate::parser::lexer;

/// 返回 `index`（从 0 开始）所在的连续非空行；该行本身为空或越界时返回空切片
pub fn find_block<S: AsRef<str>>(lines: &[S], index: usize) -> &[S] {
    if index >= lines.len() || lexer::is_blank(lines[index].as_ref()) {
        return &lines[0..0];
    }

    let mut start = index;
    while start > 0 && !lexer::is_blank(lines[start - 1].as_ref()) {
        start -= 1;
    }

    let mut end = index + 1;
    while end < lines.len() && !lexer::is_blank(lines[end].as_ref()) {
        end += 1;
    }

    &lines[start..end]
}

/// 把块内的 curl 命令拼成一行：去掉注释、空行和行尾的 `\` 续行符
pub fn join_command_lines<S: AsRef<str>>(block: &[S]) -> String {
    lexer::significant_lines(block)
        .into_iter()
        .map(|line| {
            let line = line.trim_end();
            line.strip_suffix('\\').unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
