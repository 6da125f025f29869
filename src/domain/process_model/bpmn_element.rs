use crate::domain::utils::id::{ElementId, ProcessId};

/// Variant-specific payload of a `BpmnElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    NoneStartEvent,
    MessageStartEvent { message: Option<String> },
    SignalStartEvent { signal: Option<String> },

    /// Translated as one self-contained unit, never walked.
    EventSubProcess { trigger: Option<String> },

    Task,
    SendTask { message: Option<String> },
    ReceiveTask { message: Option<String> },
    EndEvent,

    /// Any other flow node (gateways, intermediate events, specialised tasks).
    /// `tag` keeps the BPMN type name.
    FlowNode { tag: String },

    /// Directed edge between two flow nodes.
    SequenceFlow { source: ElementId, target: ElementId },

    /// Keys to the pools taking part in the collaboration.
    Collaboration { participants: Vec<ElementId> },
    Pool { process_ref: Option<ProcessId> },

    /// Any element type the loader does not know. `tag` keeps the raw type name.
    Unsupported { tag: String },
}

/// Fieldless discriminant of `ElementKind`, used as the key of the type index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    NoneStartEvent,
    MessageStartEvent,
    SignalStartEvent,
    EventSubProcess,
    Task,
    SendTask,
    ReceiveTask,
    EndEvent,
    FlowNode,
    SequenceFlow,
    Collaboration,
    Pool,
    Unsupported,
}

impl ElementType {
    pub const START_EVENTS: [ElementType; 3] =
        [ElementType::NoneStartEvent, ElementType::MessageStartEvent, ElementType::SignalStartEvent];

    pub fn is_start_event(self) -> bool {
        Self::START_EVENTS.contains(&self)
    }
}

/// One node of the process graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmnElement {
    pub id: ElementId,
    pub name: Option<String>,

    /// Owning process. Mandatory for start events, absent for collaboration-level elements.
    pub process_id: Option<ProcessId>,

    /// Key to the designated outgoing `SequenceFlow` in the ProcessModel.
    pub outgoing: Option<ElementId>,

    pub kind: ElementKind,
}

impl BpmnElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        BpmnElement { id: ElementId::new(id), name: None, process_id: None, outgoing: None, kind }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_process(mut self, process_id: impl Into<String>) -> Self {
        self.process_id = Some(ProcessId::new(process_id));
        self
    }

    pub fn with_outgoing(mut self, flow_id: impl Into<String>) -> Self {
        self.outgoing = Some(ElementId::new(flow_id));
        self
    }

    pub fn element_type(&self) -> ElementType {
        match self.kind {
            ElementKind::NoneStartEvent => ElementType::NoneStartEvent,
            ElementKind::MessageStartEvent { .. } => ElementType::MessageStartEvent,
            ElementKind::SignalStartEvent { .. } => ElementType::SignalStartEvent,
            ElementKind::EventSubProcess { .. } => ElementType::EventSubProcess,
            ElementKind::Task => ElementType::Task,
            ElementKind::SendTask { .. } => ElementType::SendTask,
            ElementKind::ReceiveTask { .. } => ElementType::ReceiveTask,
            ElementKind::EndEvent => ElementType::EndEvent,
            ElementKind::FlowNode { .. } => ElementType::FlowNode,
            ElementKind::SequenceFlow { .. } => ElementType::SequenceFlow,
            ElementKind::Collaboration { .. } => ElementType::Collaboration,
            ElementKind::Pool { .. } => ElementType::Pool,
            ElementKind::Unsupported { .. } => ElementType::Unsupported,
        }
    }

    /// Name if present, otherwise the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
