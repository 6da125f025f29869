use thiserror::Error;

use crate::domain::process_model::bpmn_element::ElementType;
use crate::domain::utils::id::ElementId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse diagram JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to build process model: {0}")]
    ModelConstructionError(String),

    #[error("Process ID is missing for start event '{element}'")]
    MissingProcessContext { element: ElementId },

    #[error("No translation routine for element '{element}' of type {element_type:?}")]
    UnresolvedVariant { element: ElementId, element_type: ElementType },
}

pub type Result<T> = std::result::Result<T, Error>;
