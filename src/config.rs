use crate::error::{RelgraphError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum characters kept in an edge label
pub const EDGE_LABEL_MAX: usize = 20;

/// Maximum characters kept from the role/title column
pub const ROLE_MAX: usize = 40;

/// Placeholder some spreadsheet exports write into empty cells
pub const ABSENT_MARKER: &str = "nan";

/// Progress update interval (tick every N rows)
pub const PROGRESS_INTERVAL: usize = 64;

pub const DEFAULT_INPUT: &str = "奥古斯都人物信息表_完整版.xlsx";
pub const DEFAULT_OUTPUT: &str = "app/data/books/augustus.json";

/// Everything that varies between books: metadata, protagonist and column headers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    pub book: BookMeta,
    pub protagonist: Protagonist,
    pub columns: Columns,
}

impl BookConfig {
    /// Load a TOML book file. Keys left out fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            RelgraphError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RelgraphError::Config(e.to_string()))
    }
}

/// Fixed metadata copied into the output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BookMeta {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub year: String,
    pub author: String,
    pub cover_color: String,
}

impl Default for BookMeta {
    fn default() -> Self {
        Self {
            id: "augustus".to_string(),
            title: "奥古斯都".to_string(),
            category: "历史小说".to_string(),
            description: "以书信体形式展现罗马帝国第一位皇帝奥古斯都的一生，通过多个人物视角勾勒出复杂的政治权谋与人性。".to_string(),
            year: "1972".to_string(),
            author: "约翰·威廉斯".to_string(),
            cover_color: "#8B4513".to_string(),
        }
    }
}

/// The central character. Any row whose name contains one of `names` collapses onto `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Protagonist {
    pub id: String,
    pub names: Vec<String>,
}

impl Default for Protagonist {
    fn default() -> Self {
        Self {
            id: "augustus".to_string(),
            names: vec![
                "奥古斯都".to_string(),
                "Augustus".to_string(),
                "屋大维".to_string(),
            ],
        }
    }
}

impl Protagonist {
    pub fn matches(&self, text: &str) -> bool {
        self.names
            .iter()
            .any(|name| !name.is_empty() && text.contains(name.as_str()))
    }
}

/// Column headers, matched by exact string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Columns {
    pub name: String,
    pub localized_name: String,
    pub role: String,
    pub category: String,
    pub relation_to_protagonist: String,
    pub other_relations: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            name: "人物姓名".to_string(),
            localized_name: "中文译名".to_string(),
            role: "身份/职位".to_string(),
            category: "人物类别".to_string(),
            relation_to_protagonist: "与奥古斯都关系".to_string(),
            other_relations: "与其他人物的重要关系".to_string(),
        }
    }
}

impl Columns {
    /// Headers in the order of the original workbook
    pub fn headers(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.localized_name.as_str(),
            self.role.as_str(),
            self.category.as_str(),
            self.relation_to_protagonist.as_str(),
            self.other_relations.as_str(),
        ]
    }
}
