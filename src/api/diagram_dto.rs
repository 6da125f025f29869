use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDto {
    pub id: String,
    pub elements: Vec<ElementDto>,
}

/// Flat record for every BPMN element kind; `typ` selects which optional fields matter.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementDto {
    pub id: String,

    #[serde(rename = "type")]
    pub typ: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub process_id: Option<String>,

    /// Ids of outgoing sequence flows.
    #[serde(default)]
    pub outgoing: Vec<String>,

    // sequenceFlow
    #[serde(default)]
    pub source_ref: Option<String>,
    #[serde(default)]
    pub target_ref: Option<String>,

    // message/signal start events, send/receive tasks, event sub-processes
    #[serde(default)]
    pub message_ref: Option<String>,
    #[serde(default)]
    pub signal_ref: Option<String>,

    // participant
    #[serde(default)]
    pub process_ref: Option<String>,

    // collaboration
    #[serde(default)]
    pub participants: Vec<String>,
}
