use std::collections::HashMap;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::api::diagram_dto::{DiagramDto, ElementDto};
use crate::domain::process_model::bpmn_element::{BpmnElement, ElementKind, ElementType};
use crate::domain::utils::id::{ElementId, ProcessId};
use crate::error::{Error, Result};

/// Read-only store of all elements of one diagram.
///
/// Elements are kept in insertion order; `type_index` lists the keys of each
/// `ElementType` in that same order.
#[derive(Debug, Clone, Default)]
pub struct ProcessModel {
    pub id: String,
    elements: IndexMap<ElementId, BpmnElement>,
    type_index: HashMap<ElementType, Vec<ElementId>>,
}

impl ProcessModel {
    /// Builds a model from already constructed elements.
    ///
    /// Fails with `Error::ModelConstructionError` on a duplicate element id.
    pub fn from_elements(id: impl Into<String>, elements: impl IntoIterator<Item = BpmnElement>) -> Result<Self> {
        let mut model = ProcessModel { id: id.into(), ..Default::default() };
        for element in elements {
            model.insert(element)?;
        }
        Ok(model)
    }

    fn insert(&mut self, element: BpmnElement) -> Result<()> {
        match self.elements.entry(element.id.clone()) {
            Entry::Occupied(entry) => Err(Error::ModelConstructionError(format!("duplicate element id '{}'", entry.key()))),
            Entry::Vacant(entry) => {
                self.type_index.entry(element.element_type()).or_default().push(element.id.clone());
                entry.insert(element);
                Ok(())
            }
        }
    }

    pub fn element_by_id(&self, id: &ElementId) -> Option<&BpmnElement> {
        self.elements.get(id)
    }

    /// Resolves a connector id to the element the connector points at.
    ///
    /// Returns `None` if the id is unknown, is not a sequence flow, or the
    /// flow's target is not part of the model.
    pub fn next_element_by_id(&self, connector_id: &ElementId) -> Option<&BpmnElement> {
        match &self.element_by_id(connector_id)?.kind {
            ElementKind::SequenceFlow { target, .. } => self.element_by_id(target),
            _ => None,
        }
    }

    pub fn elements_by_type(&self, element_type: ElementType) -> Vec<&BpmnElement> {
        self.type_index
            .get(&element_type)
            .map(|ids| ids.iter().filter_map(|id| self.elements.get(id)).collect())
            .unwrap_or_default()
    }

    /// None start events first, then message, then signal start events.
    pub fn start_events(&self) -> Vec<&BpmnElement> {
        ElementType::START_EVENTS.iter().flat_map(|typ| self.elements_by_type(*typ)).collect()
    }

    pub fn pools(&self) -> Vec<&BpmnElement> {
        self.elements_by_type(ElementType::Pool)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &BpmnElement> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Constructs a ProcessModel from a parsed diagram.
impl TryFrom<DiagramDto> for ProcessModel {
    type Error = Error;

    fn try_from(dto: DiagramDto) -> Result<Self> {
        // Phase 1: Map every DTO to a domain element
        let mut elements = dto.elements.iter().map(map_element).collect::<Result<Vec<_>>>()?;

        // Phase 2: Pick the designated outgoing connector of every flow node
        resolve_outgoing_connectors(&dto.elements, &mut elements);

        log::info!("Diagram '{}' mapped to {} elements.", dto.id, elements.len());

        ProcessModel::from_elements(dto.id, elements)
    }
}

/// BPMN flow node types without a dedicated `ElementKind`.
const FLOW_NODE_TYPES: &[&str] = &[
    "userTask",
    "serviceTask",
    "scriptTask",
    "manualTask",
    "businessRuleTask",
    "callActivity",
    "subProcess",
    "exclusiveGateway",
    "parallelGateway",
    "inclusiveGateway",
    "eventBasedGateway",
    "complexGateway",
    "intermediateCatchEvent",
    "intermediateThrowEvent",
    "boundaryEvent",
];

/// **Phase 1:** Maps a single `ElementDto` to a `BpmnElement` without outgoing connector.
fn map_element(dto: &ElementDto) -> Result<BpmnElement> {
    let kind = match dto.typ.as_str() {
        "startEvent" | "noneStartEvent" => ElementKind::NoneStartEvent,
        "messageStartEvent" => ElementKind::MessageStartEvent { message: dto.message_ref.clone() },
        "signalStartEvent" => ElementKind::SignalStartEvent { signal: dto.signal_ref.clone() },
        "eventSubProcess" => {
            ElementKind::EventSubProcess { trigger: dto.message_ref.clone().or_else(|| dto.signal_ref.clone()) }
        }
        "task" => ElementKind::Task,
        "sendTask" => ElementKind::SendTask { message: dto.message_ref.clone() },
        "receiveTask" => ElementKind::ReceiveTask { message: dto.message_ref.clone() },
        "endEvent" => ElementKind::EndEvent,
        tag if FLOW_NODE_TYPES.contains(&tag) => ElementKind::FlowNode { tag: tag.to_string() },
        "sequenceFlow" => {
            let (Some(source), Some(target)) = (&dto.source_ref, &dto.target_ref) else {
                return Err(Error::ModelConstructionError(format!(
                    "sequence flow '{}' needs both sourceRef and targetRef",
                    dto.id
                )));
            };
            ElementKind::SequenceFlow { source: ElementId::new(source.as_str()), target: ElementId::new(target.as_str()) }
        }
        "collaboration" => ElementKind::Collaboration {
            participants: dto.participants.iter().map(|p| ElementId::new(p.as_str())).collect(),
        },
        "participant" | "pool" => ElementKind::Pool { process_ref: dto.process_ref.as_deref().map(ProcessId::new) },
        other => {
            log::debug!("Element '{}' has unsupported type '{}'.", dto.id, other);
            ElementKind::Unsupported { tag: other.to_string() }
        }
    };

    Ok(BpmnElement {
        id: ElementId::new(dto.id.as_str()),
        name: dto.name.clone(),
        process_id: dto.process_id.as_deref().map(ProcessId::new),
        outgoing: None,
        kind,
    })
}

/// **Phase 2:** Sets `outgoing` on every non-connector element.
///
/// The first id of the DTO's `outgoing` list wins. Without such a list the
/// first sequence flow (declaration order) whose source is the element is used.
/// Further outgoing flows are ignored.
fn resolve_outgoing_connectors(dtos: &[ElementDto], elements: &mut [BpmnElement]) {
    let mut flows_by_source: HashMap<&str, Vec<&str>> = HashMap::new();
    // Message flows also carry sourceRef/targetRef but never drive the trace.
    for dto in dtos.iter().filter(|dto| dto.typ == "sequenceFlow") {
        if let (Some(source), Some(_)) = (&dto.source_ref, &dto.target_ref) {
            flows_by_source.entry(source.as_str()).or_default().push(dto.id.as_str());
        }
    }

    for (dto, element) in dtos.iter().zip(elements.iter_mut()) {
        if matches!(element.kind, ElementKind::SequenceFlow { .. }) {
            continue;
        }

        let candidates: Vec<&str> = if dto.outgoing.is_empty() {
            flows_by_source.get(dto.id.as_str()).cloned().unwrap_or_default()
        } else {
            dto.outgoing.iter().map(String::as_str).collect()
        };

        if candidates.len() > 1 {
            log::warn!(
                "Element '{}' has {} outgoing flows, only '{}' is followed.",
                dto.id,
                candidates.len(),
                candidates[0]
            );
        }

        element.outgoing = candidates.first().map(|flow| ElementId::new(*flow));
    }
}
