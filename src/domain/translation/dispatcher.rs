use crate::domain::process_model::bpmn_element::{BpmnElement, ElementKind};
use crate::domain::process_model::process_model::ProcessModel;
use crate::domain::translation::config::UnhandledPolicy;
use crate::error::{Error, Result};

/// Text produced for exactly one element.
pub type Fragment = String;

/// Emission routines, one per element variant that has a translation.
///
/// Pools and unsupported elements have no routine: the dispatcher reports
/// them as `Dispatch::Unhandled`.
pub trait FragmentEmitter {
    fn none_start_event(&self, element: &BpmnElement) -> Fragment;
    fn message_start_event(&self, element: &BpmnElement, message: Option<&str>) -> Fragment;
    fn signal_start_event(&self, element: &BpmnElement, signal: Option<&str>) -> Fragment;
    fn event_sub_process(&self, element: &BpmnElement, trigger: Option<&str>) -> Fragment;
    fn task(&self, element: &BpmnElement) -> Fragment;
    fn send_task(&self, element: &BpmnElement, message: Option<&str>) -> Fragment;
    fn receive_task(&self, element: &BpmnElement, message: Option<&str>) -> Fragment;
    fn end_event(&self, element: &BpmnElement) -> Fragment;
    fn flow_node(&self, element: &BpmnElement, tag: &str) -> Fragment;
    fn sequence_flow(&self, element: &BpmnElement, source: &str, target: &str) -> Fragment;
    fn collaboration(&self, element: &BpmnElement, participants: &[&BpmnElement]) -> Fragment;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Fragment(Fragment),
    Unhandled,
}

/// Selects the emission routine for an element by its variant.
///
/// `participants` is only read for collaborations. No graph navigation happens here.
pub fn dispatch<E: FragmentEmitter + ?Sized>(
    emitter: &E,
    element: &BpmnElement,
    participants: &[&BpmnElement],
) -> Dispatch {
    let fragment = match &element.kind {
        ElementKind::NoneStartEvent => emitter.none_start_event(element),
        ElementKind::MessageStartEvent { message } => emitter.message_start_event(element, message.as_deref()),
        ElementKind::SignalStartEvent { signal } => emitter.signal_start_event(element, signal.as_deref()),
        ElementKind::EventSubProcess { trigger } => emitter.event_sub_process(element, trigger.as_deref()),
        ElementKind::Task => emitter.task(element),
        ElementKind::SendTask { message } => emitter.send_task(element, message.as_deref()),
        ElementKind::ReceiveTask { message } => emitter.receive_task(element, message.as_deref()),
        ElementKind::EndEvent => emitter.end_event(element),
        ElementKind::FlowNode { tag } => emitter.flow_node(element, tag),
        ElementKind::SequenceFlow { source, target } => {
            emitter.sequence_flow(element, source.as_str(), target.as_str())
        }
        ElementKind::Collaboration { .. } => emitter.collaboration(element, participants),
        ElementKind::Pool { .. } | ElementKind::Unsupported { .. } => return Dispatch::Unhandled,
    };
    Dispatch::Fragment(fragment)
}

/// Applies the unhandled-element policy to a dispatch result.
///
/// `Ok(None)` means "skip this element", `Err` aborts the whole translation.
pub fn resolve(dispatch: Dispatch, element: &BpmnElement, policy: UnhandledPolicy) -> Result<Option<Fragment>> {
    match dispatch {
        Dispatch::Fragment(fragment) => Ok(Some(fragment)),
        Dispatch::Unhandled => match policy {
            UnhandledPolicy::Skip => {
                log::warn!("No translation for element '{}' ({:?}), skipping.", element.id, element.element_type());
                Ok(None)
            }
            UnhandledPolicy::Abort => {
                Err(Error::UnresolvedVariant { element: element.id.clone(), element_type: element.element_type() })
            }
        },
    }
}

/// Binds an emitter and the unhandled policy to one model.
///
/// The model is only used to look up collaboration participants.
pub struct Dispatcher<'a, E: FragmentEmitter + ?Sized> {
    model: &'a ProcessModel,
    emitter: &'a E,
    policy: UnhandledPolicy,
}

impl<'a, E: FragmentEmitter + ?Sized> Dispatcher<'a, E> {
    pub fn new(model: &'a ProcessModel, emitter: &'a E, policy: UnhandledPolicy) -> Self {
        Dispatcher { model, emitter, policy }
    }

    pub fn dispatch(&self, element: &BpmnElement) -> Dispatch {
        let participants: Vec<&BpmnElement> = match &element.kind {
            ElementKind::Collaboration { participants } => {
                participants.iter().filter_map(|id| self.model.element_by_id(id)).collect()
            }
            _ => Vec::new(),
        };
        dispatch(self.emitter, element, &participants)
    }

    /// Dispatches and applies the policy in one step.
    pub fn translate(&self, element: &BpmnElement) -> Result<Option<Fragment>> {
        resolve(self.dispatch(element), element, self.policy)
    }
}
