use crate::parser::types::{Body, FieldValue, FormField};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// 判断请求体是原始文本还是表单
///
/// 规则很简单：每一行都含有 `=` 时按表单处理，否则所有行用换行拼成原始文本。
/// 因此只有一行且带 `=` 的文本（例如 `a=1&b=2` 形式的内容）总会被当作表单。
pub struct BodyClassifier;

impl BodyClassifier {
    pub fn classify<S: AsRef<str>>(lines: &[S]) -> Body {
        if lines.is_empty() {
            return Body::Raw(String::new());
        }

        if !lines.iter().all(|line| line.as_ref().contains('=')) {
            let text = lines
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("\n");
            return Body::Raw(text);
        }

        let mut fields: Vec<FormField> = Vec::with_capacity(lines.len());
        for line in lines {
            let Some((name, value)) = line.as_ref().split_once('=') else {
                continue;
            };
            let value = Self::field_value(value);

            // 同名字段后者覆盖前者
            match fields.iter_mut().find(|f| f.name == name) {
                Some(field) => field.value = value,
                None => fields.push(FormField {
                    name: name.to_string(),
                    value,
                }),
            }
        }

        Body::Form(fields)
    }

    /// 解析字段值里的 `!file(...)` / `!content(...)` 指令，指令必须占满整个值
    pub fn field_value(value: &str) -> FieldValue {
        static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = DIRECTIVE_REGEX
            .get_or_init(|| Regex::new(r"^!(file|content)\((.*)\)$").unwrap());

        let Some(caps) = re.captures(value) else {
            return FieldValue::Literal(value.to_string());
        };

        let argument = Self::unescape_parens(&caps[2]);
        match &caps[1] {
            "file" => FieldValue::File(PathBuf::from(argument)),
            _ => FieldValue::Content(argument),
        }
    }

    fn unescape_parens(text: &str) -> String {
        text.replace("\\(", "(").replace("\\)", ")")
    }
}
