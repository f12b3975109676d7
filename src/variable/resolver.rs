use crate::variable::types::{Declaration, Scope, VariableTable};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// 变量解析与替换
pub struct VariableResolver;

impl VariableResolver {
    /// 构建变量表：先收集文档级 `# $name = value`，再用块内 `# :name = value` 覆盖
    pub fn resolve<D, B>(document: &[D], block: &[B]) -> VariableTable
    where
        D: AsRef<str>,
        B: AsRef<str>,
    {
        let mut table: VariableTable = Self::declarations(document, Scope::Document).collect();
        let local: VariableTable = Self::declarations(block, Scope::Block).collect();
        table.overlay(local);

        debug!(variables = table.len(), "variable table resolved");
        table
    }

    /// 扫描指定作用域的所有声明
    pub fn declarations<S: AsRef<str>>(
        lines: &[S],
        scope: Scope,
    ) -> impl Iterator<Item = Declaration> + '_ {
        lines
            .iter()
            .filter_map(move |line| Self::parse_declaration(line.as_ref(), scope))
    }

    /// 解析一行声明；不是该作用域的声明时返回 None
    pub fn parse_declaration(line: &str, scope: Scope) -> Option<Declaration> {
        static BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
        static DOCUMENT_REGEX: OnceLock<Regex> = OnceLock::new();

        let re = match scope {
            Scope::Block => BLOCK_REGEX
                .get_or_init(|| Regex::new(r"^# ?(:[^:\s=]+)\s*=\s*(.+)$").unwrap()),
            Scope::Document => DOCUMENT_REGEX
                .get_or_init(|| Regex::new(r"^# ?(\$[^$\s=]+)\s*=\s*(.+)$").unwrap()),
        };

        re.captures(line).map(|caps| Declaration {
            scope,
            token: caps[1].to_string(),
            value: caps[2].to_string(),
        })
    }

    /// 替换文本中的变量 token
    ///
    /// 从左到右单遍扫描，每个位置取最长匹配的 token，替换结果不再重新扫描。
    pub fn substitute(text: &str, table: &VariableTable) -> String {
        if table.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(c) = rest.chars().next() {
            match Self::longest_token(rest, table) {
                Some((token, value)) => {
                    output.push_str(value);
                    rest = &rest[token.len()..];
                }
                None => {
                    output.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        output
    }

    fn longest_token<'t>(text: &str, table: &'t VariableTable) -> Option<(&'t str, &'t str)> {
        table
            .iter()
            .filter(|(token, _)| !token.is_empty() && text.starts_with(token))
            .max_by_key(|(token, _)| token.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> VariableTable {
        let mut table = VariableTable::new();
        for (token, value) in entries {
            table.insert(*token, *value);
        }
        table
    }

    #[test]
    fn test_parse_block_declaration() {
        let decl = VariableResolver::parse_declaration("# :a = barf", Scope::Block).unwrap();
        assert_eq!(decl.token, ":a");
        assert_eq!(decl.value, "barf");

        let decl = VariableResolver::parse_declaration("#:a=barf", Scope::Block).unwrap();
        assert_eq!(decl.token, ":a");
        assert_eq!(decl.value, "barf");
    }

    #[test]
    fn test_parse_document_declaration() {
        let decl =
            VariableResolver::parse_declaration("# $global = httpbin.org", Scope::Document)
                .unwrap();
        assert_eq!(decl.token, "$global");
        assert_eq!(decl.value, "httpbin.org");
    }

    #[test]
    fn test_declaration_value_keeps_remainder() {
        let decl = VariableResolver::parse_declaration("# :auth = Bearer a=b c", Scope::Block)
            .unwrap();
        assert_eq!(decl.token, ":auth");
        assert_eq!(decl.value, "Bearer a=b c");
    }

    #[test]
    fn test_parse_declaration_rejects_other_lines() {
        assert!(VariableResolver::parse_declaration("# plain comment", Scope::Block).is_none());
        assert!(VariableResolver::parse_declaration("# :a =", Scope::Block).is_none());
        assert!(VariableResolver::parse_declaration(":a = b", Scope::Block).is_none());
        assert!(VariableResolver::parse_declaration("# $a = b", Scope::Block).is_none());
        assert!(VariableResolver::parse_declaration("# :a = b", Scope::Document).is_none());
        assert!(VariableResolver::parse_declaration("#  :a = b", Scope::Block).is_none());
    }

    #[test]
    fn test_resolve_merges_scopes() {
        let document = vec![
            "# $host = example.com",
            "",
            "# :a = outside",
            "# :b = 1",
            "GET http://$host/:a",
        ];
        let block = vec!["# :b = 1", "GET http://$host/:b"];

        let table = VariableResolver::resolve(&document, &block);
        assert_eq!(table.get("$host"), Some("example.com"));
        assert_eq!(table.get(":b"), Some("1"));
        // 块外的局部声明不可见
        assert_eq!(table.get(":a"), None);
    }

    #[test]
    fn test_resolve_block_redeclaration_wins() {
        let block = vec!["# :a = first", "# :a = second", "GET http://h/:a"];
        let table = VariableResolver::resolve::<&str, _>(&[], &block);
        assert_eq!(table.get(":a"), Some("second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_substitute_every_occurrence() {
        let table = table(&[(":a", "X")]);
        assert_eq!(
            VariableResolver::substitute("pre :a mid :a post", &table),
            "pre X mid X post"
        );
    }

    #[test]
    fn test_substitute_leaves_other_text() {
        let table = table(&[(":a", "X")]);
        assert_eq!(
            VariableResolver::substitute("http://host:8080/path", &table),
            "http://host:8080/path"
        );
    }

    #[test]
    fn test_substitute_longest_token_wins() {
        let table = table(&[(":a", "short"), (":ab", "long")]);
        assert_eq!(VariableResolver::substitute(":ab/:a", &table), "long/short");
    }

    #[test]
    fn test_substitute_does_not_rescan_values() {
        let table = table(&[(":a", ":b"), (":b", "B")]);
        assert_eq!(VariableResolver::substitute(":a :b", &table), ":b B");
    }

    #[test]
    fn test_substitute_multibyte_text() {
        let table = table(&[("$name", "世界")]);
        assert_eq!(VariableResolver::substitute("你好 $name!", &table), "你好 世界!");
    }

    #[test]
    fn test_substitute_empty_table() {
        let table = VariableTable::new();
        assert_eq!(VariableResolver::substitute(":a", &table), ":a");
    }
}
