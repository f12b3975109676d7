/// 变量作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `# $name = value`，整个文档可见
    Document,
    /// `# :name = value`，只在声明所在的请求块内可见
    Block,
}

/// 一条变量声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub scope: Scope,
    /// 含前缀字符的完整 token，如 `:host`
    pub token: String,
    pub value: String,
}

/// 变量表：token -> 替换值，保持插入顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    entries: Vec<(String, String)>,
}

impl VariableTable {
    /// 创建新的空变量表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入变量，已存在的 token 原位覆盖
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    /// 获取变量值
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    /// 用另一张表覆盖当前表
    pub fn overlay(&mut self, other: VariableTable) {
        for (token, value) in other.entries {
            self.insert(token, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// 变量数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Declaration> for VariableTable {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut table = VariableTable::new();
        for declaration in iter {
            table.insert(declaration.token, declaration.value);
        }
        table
    }
}
