use std::fmt::Write;

use crate::domain::process_model::bpmn_element::{BpmnElement, ElementKind};
use crate::domain::translation::dispatcher::{Fragment, FragmentEmitter};

/// Emits X-Klaim statements.
///
/// Waiting start events and receive tasks become `in`/`read` on the local
/// tuple space, send tasks become `out` towards the message's target.
#[derive(Debug, Clone, Copy, Default)]
pub struct KlaimEmitter;

impl KlaimEmitter {
    /// Quoted string literal for a tuple field.
    fn tuple(value: Option<&str>, element: &BpmnElement) -> String {
        quote(value.unwrap_or(element.label()))
    }

    /// Net and node names: the label when it is a valid identifier, otherwise the id.
    fn identifier(element: &BpmnElement) -> String {
        let label = element.label();
        if is_identifier(label) { label.to_string() } else { sanitize(element.id.as_str()) }
    }

    /// Labels end up in line comments and must stay on one line.
    fn comment_label(element: &BpmnElement) -> String {
        element.label().replace(['\n', '\r'], " ")
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn sanitize(value: &str) -> String {
    let mut name: String = value.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if !is_identifier(&name) {
        name.insert(0, '_');
    }
    name
}

impl FragmentEmitter for KlaimEmitter {
    fn none_start_event(&self, element: &BpmnElement) -> Fragment {
        format!("// start {}", Self::comment_label(element))
    }

    fn message_start_event(&self, element: &BpmnElement, message: Option<&str>) -> Fragment {
        format!("in({})@self", Self::tuple(message, element))
    }

    fn signal_start_event(&self, element: &BpmnElement, signal: Option<&str>) -> Fragment {
        format!("read({})@self", Self::tuple(signal, element))
    }

    fn event_sub_process(&self, element: &BpmnElement, trigger: Option<&str>) -> Fragment {
        let body = sanitize(element.id.as_str());
        match trigger {
            Some(trigger) => format!("eval({{ in({})@self; {}() }})@self", quote(trigger), body),
            None => format!("eval({}())@self", body),
        }
    }

    fn task(&self, element: &BpmnElement) -> Fragment {
        format!("// task {}", Self::comment_label(element))
    }

    fn send_task(&self, element: &BpmnElement, message: Option<&str>) -> Fragment {
        format!("out({})@target", Self::tuple(message, element))
    }

    fn receive_task(&self, element: &BpmnElement, message: Option<&str>) -> Fragment {
        format!("in({})@self", Self::tuple(message, element))
    }

    fn end_event(&self, element: &BpmnElement) -> Fragment {
        format!("// end {}", Self::comment_label(element))
    }

    fn flow_node(&self, element: &BpmnElement, tag: &str) -> Fragment {
        format!("// {} {}", tag, Self::comment_label(element))
    }

    fn sequence_flow(&self, _element: &BpmnElement, source: &str, target: &str) -> Fragment {
        format!("// {} -> {}", source, target)
    }

    fn collaboration(&self, element: &BpmnElement, participants: &[&BpmnElement]) -> Fragment {
        let mut net = String::new();
        let _ = writeln!(net, "net {} physical \"localhost:9999\" {{", Self::identifier(element));
        for participant in participants {
            let process = match &participant.kind {
                ElementKind::Pool { process_ref: Some(process) } => sanitize(process.as_str()),
                _ => sanitize(participant.id.as_str()),
            };
            let _ = writeln!(net, "    node {} {{ eval(new {}())@self }}", Self::identifier(participant), process);
        }
        net.push('}');
        net
    }
}
