use std::fmt::Write;

use serde::Serialize;

use crate::domain::process_model::process_model::ProcessModel;
use crate::domain::translation::assembler::{ProcessAssembler, ProcessOutput};
use crate::domain::translation::collaboration::translate_collaborations;
use crate::domain::translation::config::TranslatorConfig;
use crate::domain::translation::dispatcher::{Dispatcher, Fragment, FragmentEmitter};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationOutput {
    pub collaborations: Vec<Fragment>,
    pub processes: ProcessOutput,
}

impl TranslationOutput {
    /// Collaborations first, then one `// process <id>` section per process.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        for collaboration in &self.collaborations {
            let _ = writeln!(out, "{}\n", collaboration);
        }
        for (process_id, fragments) in &self.processes {
            let _ = writeln!(out, "// process {}", process_id);
            for fragment in fragments {
                let _ = writeln!(out, "{}", fragment);
            }
            out.push('\n');
        }
        out
    }
}

/// Entry point for translating one model.
///
/// Holds no mutable state; every call builds its own visited sets and
/// accumulators, so a `Generator` can be shared between threads when the
/// emitter is `Sync`.
pub struct Generator<'a, E: FragmentEmitter + ?Sized> {
    model: &'a ProcessModel,
    dispatcher: Dispatcher<'a, E>,
}

impl<'a, E: FragmentEmitter + ?Sized> Generator<'a, E> {
    pub fn new(model: &'a ProcessModel, emitter: &'a E, config: TranslatorConfig) -> Self {
        Generator { model, dispatcher: Dispatcher::new(model, emitter, config.unhandled) }
    }

    pub fn translate_collaborations(&self) -> Result<Vec<Fragment>> {
        translate_collaborations(self.model, &self.dispatcher)
    }

    pub fn translate_processes(&self) -> Result<ProcessOutput> {
        ProcessAssembler::new(self.model, &self.dispatcher).assemble_all()
    }

    pub fn translate(&self) -> Result<TranslationOutput> {
        Ok(TranslationOutput { collaborations: self.translate_collaborations()?, processes: self.translate_processes()? })
    }
}
