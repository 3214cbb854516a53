use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    News,
    Blog,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Blog => "blog",
        }
    }
}

impl Default for RecordKind {
    fn default() -> Self {
        Self::News
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for RecordKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "news" => Ok(Self::News),
            "blog" => Ok(Self::Blog),
            _ => Err(format!("invalid record kind: {}", s)),
        }
    }
}
