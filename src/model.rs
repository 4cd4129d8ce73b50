/// One scraped recipe, mirroring a row of the record table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Primary key; `None` until the row has been stored and read back
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    /// Newline-joined ingredient lines
    pub ingredients: String,
    /// Newline-joined preparation steps
    pub description: String,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        ingredients: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            ingredients: ingredients.into(),
            description: description.into(),
        }
    }
}
