/// Case-insensitive substring matcher over note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    keyword: String,
    needle: String,
}

impl KeywordQuery {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_owned(),
            needle: keyword.to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// An empty keyword matches everything, as any string contains the empty string.
    pub fn matches(&self, content: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        content.to_lowercase().contains(&self.needle)
    }
}
