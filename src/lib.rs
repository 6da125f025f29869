use std::path::Path;

use crate::api::diagram_dto::DiagramDto;
use crate::domain::process_model::ProcessModel;
use crate::domain::translation::config::TranslatorConfig;
use crate::domain::translation::generator::{Generator, TranslationOutput};
use crate::domain::translation::klaim_emitter::KlaimEmitter;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a diagram JSON file into a `ProcessModel`.
pub fn load_process_model(file_path: impl AsRef<Path>) -> Result<ProcessModel> {
    let diagram: DiagramDto = parse_json_file(file_path)?;
    log::info!("JSON file parsed successfully.");

    ProcessModel::try_from(diagram)
}

/// Loads a diagram and translates it with the bundled X-Klaim emitter.
pub fn translate_diagram_file(file_path: impl AsRef<Path>, config: TranslatorConfig) -> Result<TranslationOutput> {
    let model = load_process_model(file_path)?;
    log::info!("Process model '{}' constructed with {} elements.", model.id, model.len());

    Generator::new(&model, &KlaimEmitter, config).translate()
}
