//! JSON 美化输出：键排序、可配置缩进、可选的非 ASCII 转义。

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::io;

/// JSON 输出风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle {
    pub indent: usize,
    pub escape_non_ascii: bool,
}

impl JsonStyle {
    /// 从 curl 命令还原请求体时使用的风格
    pub const CURL_BODY: JsonStyle = JsonStyle {
        indent: 4,
        escape_non_ascii: true,
    };

    pub fn new(indent: usize, escape_non_ascii: bool) -> Self {
        Self {
            indent,
            escape_non_ascii,
        }
    }
}

/// 解析并重新格式化 JSON 文本，对象的键按字典序排列
pub fn format_json(text: &str, style: JsonStyle) -> serde_json::Result<String> {
    let mut value: Value = serde_json::from_str(text)?;
    value.sort_all_objects();

    let indent = " ".repeat(style.indent);
    let pretty = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::with_capacity(text.len() * 2);

    if style.escape_non_ascii {
        let mut serializer = Serializer::with_formatter(&mut buf, AsciiFormatter(pretty));
        value.serialize(&mut serializer)?;
    } else {
        let mut serializer = Serializer::with_formatter(&mut buf, pretty);
        value.serialize(&mut serializer)?;
    }

    // serde_json 只会写出合法的 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 在 PrettyFormatter 基础上把非 ASCII 字符写成 `\uXXXX`
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}
