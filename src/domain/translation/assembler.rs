use indexmap::IndexMap;

use crate::domain::process_model::bpmn_element::ElementType;
use crate::domain::process_model::process_model::ProcessModel;
use crate::domain::translation::dispatcher::{Dispatcher, Fragment, FragmentEmitter};
use crate::domain::translation::traversal::{TraceEngine, VisitedSet};
use crate::domain::utils::id::ProcessId;
use crate::error::{Error, Result};

/// Fragments per process, in the order the processes were first seen.
pub type ProcessOutput = IndexMap<ProcessId, Vec<Fragment>>;

pub struct ProcessAssembler<'a, E: FragmentEmitter + ?Sized> {
    model: &'a ProcessModel,
    dispatcher: &'a Dispatcher<'a, E>,
}

impl<'a, E: FragmentEmitter + ?Sized> ProcessAssembler<'a, E> {
    pub fn new(model: &'a ProcessModel, dispatcher: &'a Dispatcher<'a, E>) -> Self {
        ProcessAssembler { model, dispatcher }
    }

    /// Builds the fragment list of every process that has a start event.
    ///
    /// Each start event contributes, in this order: the event sub-processes
    /// of its process, then its own trace. Contributions of several start
    /// events of one process are appended to each other.
    ///
    /// Fails with `Error::MissingProcessContext` if any start event lacks a
    /// process id; nothing is returned in that case.
    pub fn assemble_all(&self) -> Result<ProcessOutput> {
        let sub_processes = self.translate_event_sub_processes()?;
        let engine = TraceEngine::new(self.model, self.dispatcher);
        let mut result = ProcessOutput::new();

        for start_event in self.model.start_events() {
            let process_id = start_event
                .process_id
                .as_ref()
                .ok_or_else(|| Error::MissingProcessContext { element: start_event.id.clone() })?;

            let trace = engine.trace(start_event, &mut VisitedSet::new())?;
            log::debug!("Start event '{}' traced to {} fragments.", start_event.id, trace.len());

            let combined = result.entry(process_id.clone()).or_default();
            if let Some(fragments) = sub_processes.get(process_id) {
                combined.extend(fragments.iter().cloned());
            }
            combined.extend(trace);
        }

        log::info!("Assembled {} processes.", result.len());
        Ok(result)
    }

    /// Event sub-processes are translated as single units, grouped by process.
    fn translate_event_sub_processes(&self) -> Result<ProcessOutput> {
        let mut grouped = ProcessOutput::new();

        for sub_process in self.model.elements_by_type(ElementType::EventSubProcess) {
            let Some(fragment) = self.dispatcher.translate(sub_process)? else {
                continue;
            };
            match &sub_process.process_id {
                Some(process_id) => grouped.entry(process_id.clone()).or_default().push(fragment),
                None => log::warn!("Event sub-process '{}' has no process ID and is dropped.", sub_process.id),
            }
        }

        Ok(grouped)
    }
}
