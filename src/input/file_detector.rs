//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Text,
    Markdown,
    /// Binary document formats whose text must be extracted elsewhere
    Binary(String),
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "pdf" | "docx" | "doc" => FileType::Binary(ext.to_lowercase()),
            _ => FileType::Unknown,
        }
    }
}
