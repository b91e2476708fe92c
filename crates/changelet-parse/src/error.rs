use thiserror::Error;

/// Why an entry file could not be decoded or encoded.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("entry must start with a '---' line")]
    MissingOpeningDelimiter,

    #[error("front matter is not closed by a '---' line")]
    MissingClosingDelimiter,

    #[error("front matter is empty, expected at least 'type'")]
    EmptyFrontMatter,

    #[error("entry is larger than {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("invalid front matter")]
    Yaml(#[from] serde_yml::Error),
}
