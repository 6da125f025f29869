pub mod bpmn_element;
pub mod process_model;

pub use bpmn_element::{BpmnElement, ElementKind, ElementType};
pub use process_model::ProcessModel;
