use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("layout `{layout}` is not present in the layout configuration")]
    UnknownLayout { layout: String },
}

impl DomainError {
    pub fn unknown_layout(layout: impl Into<String>) -> Self {
        Self::UnknownLayout {
            layout: layout.into(),
        }
    }
}
