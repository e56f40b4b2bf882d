//! Output language for Markdown documents.

use serde::{Deserialize, Serialize};

use crate::metadata::RelationKind;

/// Language of headings, column headers and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Human-readable label for a relation kind. Total over all kinds.
    pub fn relation_label(self, kind: RelationKind) -> &'static str {
        match (self, kind) {
            (Self::Zh, RelationKind::OneToOne) => "一对一",
            (Self::Zh, RelationKind::ManyToOne) => "多对一",
            (Self::Zh, RelationKind::OneToMany) => "一对多",
            (Self::Zh, RelationKind::ManyToMany) => "多对多",
            (Self::Zh, RelationKind::Unknown) => "未知",
            (Self::En, RelationKind::OneToOne) => "One-to-One",
            (Self::En, RelationKind::ManyToOne) => "Many-to-One",
            (Self::En, RelationKind::OneToMany) => "One-to-Many",
            (Self::En, RelationKind::ManyToMany) => "Many-to-Many",
            (Self::En, RelationKind::Unknown) => "Unknown",
        }
    }

    pub(crate) fn dictionary_heading(self) -> &'static str {
        match self {
            Self::Zh => "数据库字典",
            Self::En => "Database Dictionary",
        }
    }

    pub(crate) fn table_list_heading(self) -> &'static str {
        match self {
            Self::Zh => "数据库表清单",
            Self::En => "Table List",
        }
    }

    pub(crate) fn table_list_headers(self) -> [&'static str; 2] {
        match self {
            Self::Zh => ["表名", "说明"],
            Self::En => ["Table", "Comment"],
        }
    }

    pub(crate) fn column_headers(self) -> [&'static str; 8] {
        match self {
            Self::Zh => ["字段", "列名", "类型", "长度", "允许为空", "默认值", "主键", "说明"],
            Self::En => [
                "Field", "Column", "Type", "Length", "Nullable", "Default", "Primary Key",
                "Comment",
            ],
        }
    }

    pub(crate) fn association_heading(self) -> &'static str {
        match self {
            Self::Zh => "关联关系",
            Self::En => "Associations",
        }
    }

    pub(crate) fn association_headers(self) -> [&'static str; 4] {
        match self {
            Self::Zh => ["关联名", "关系类型", "目标实体", "目标表"],
            Self::En => ["Association", "Relation", "Target Entity", "Target Table"],
        }
    }

    pub(crate) fn entity_label(self) -> &'static str {
        match self {
            Self::Zh => "实体",
            Self::En => "Entity",
        }
    }

    pub(crate) fn yes_no(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Zh, true) => "是",
            (Self::Zh, false) => "否",
            (Self::En, true) => "Yes",
            (Self::En, false) => "No",
        }
    }
}
