use std::collections::HashSet;

use crate::domain::process_model::bpmn_element::BpmnElement;
use crate::domain::process_model::process_model::ProcessModel;
use crate::domain::translation::dispatcher::{Dispatcher, Fragment, FragmentEmitter};
use crate::domain::utils::id::ElementId;
use crate::error::Result;

/// Ids of the elements already translated during one trace.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    ids: HashSet<ElementId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: &ElementId) {
        self.ids.insert(id.clone());
    }
}

/// Depth-first walker along the designated outgoing connector of each element.
///
/// Uses an explicit stack, so arbitrarily long chains do not grow the call stack.
pub struct TraceEngine<'a, E: FragmentEmitter + ?Sized> {
    model: &'a ProcessModel,
    dispatcher: &'a Dispatcher<'a, E>,
}

impl<'a, E: FragmentEmitter + ?Sized> TraceEngine<'a, E> {
    pub fn new(model: &'a ProcessModel, dispatcher: &'a Dispatcher<'a, E>) -> Self {
        TraceEngine { model, dispatcher }
    }

    /// Translates `start` and everything reachable from it.
    ///
    /// For every translated element the connector is emitted next, followed by
    /// the connector's target unless that target was already visited. An
    /// element without translation ends its path. A connector that does not
    /// resolve to an existing target ends the path as well.
    pub fn trace(&self, start: &'a BpmnElement, visited: &mut VisitedSet) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::new();
        let mut pending: Vec<&'a BpmnElement> = vec![start];

        while let Some(element) = pending.pop() {
            let Some(fragment) = self.dispatcher.translate(element)? else {
                continue;
            };

            visited.insert(&element.id);
            log::debug!("Translated '{}' ({:?}).", element.id, element.element_type());
            fragments.push(fragment);

            let Some(connector_id) = &element.outgoing else {
                continue;
            };

            let (Some(connector), Some(next)) =
                (self.model.element_by_id(connector_id), self.model.next_element_by_id(connector_id))
            else {
                log::debug!("Connector '{}' of '{}' has no target, path ends.", connector_id, element.id);
                continue;
            };

            // Stack is LIFO: the target is pushed first so the connector comes out first.
            if !visited.contains(&next.id) {
                pending.push(next);
            }
            if !visited.contains(&connector.id) {
                pending.push(connector);
            }
        }

        Ok(fragments)
    }

    /// `trace` with a fresh visited set.
    pub fn trace_from(&self, start: &'a BpmnElement) -> Result<Vec<Fragment>> {
        self.trace(start, &mut VisitedSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process_model::bpmn_element::ElementKind;
    use crate::domain::translation::config::UnhandledPolicy;
    use crate::error::Error;

    /// Emits just the element id, so traces read as id lists.
    struct IdEmitter;

    impl FragmentEmitter for IdEmitter {
        fn none_start_event(&self, e: &BpmnElement) -> Fragment {
            e.id.to_string()
        }
        fn message_start_event(&self, e: &BpmnElement, _: Option<&str>) -> Fragment {
            e.id.to_string()
        }
        fn signal_start_event(&self, e: &BpmnElement, _: Option<&str>) -> Fragment {
            e.id.to_string()
        }
        fn event_sub_process(&self, e: &BpmnElement, _: Option<&str>) -> Fragment {
            e.id.to_string()
        }
        fn task(&self, e: &BpmnElement) -> Fragment {
            e.id.to_string()
        }
        fn send_task(&self, e: &BpmnElement, _: Option<&str>) -> Fragment {
            e.id.to_string()
        }
        fn receive_task(&self, e: &BpmnElement, _: Option<&str>) -> Fragment {
            e.id.to_string()
        }
        fn end_event(&self, e: &BpmnElement) -> Fragment {
            e.id.to_string()
        }
        fn flow_node(&self, e: &BpmnElement, _: &str) -> Fragment {
            e.id.to_string()
        }
        fn sequence_flow(&self, e: &BpmnElement, _: &str, _: &str) -> Fragment {
            e.id.to_string()
        }
        fn collaboration(&self, e: &BpmnElement, _: &[&BpmnElement]) -> Fragment {
            e.id.to_string()
        }
    }

    fn flow(id: &str, source: &str, target: &str) -> BpmnElement {
        BpmnElement::new(id, ElementKind::SequenceFlow { source: source.into(), target: target.into() }).in_process("P")
    }

    fn task(id: &str, outgoing: Option<&str>) -> BpmnElement {
        let task = BpmnElement::new(id, ElementKind::Task).in_process("P");
        match outgoing {
            Some(flow_id) => task.with_outgoing(flow_id),
            None => task,
        }
    }

    fn start(id: &str, outgoing: &str) -> BpmnElement {
        BpmnElement::new(id, ElementKind::NoneStartEvent).in_process("P").with_outgoing(outgoing)
    }

    fn run(model: &ProcessModel, start_id: &str, policy: UnhandledPolicy) -> (Result<Vec<Fragment>>, VisitedSet) {
        let dispatcher = Dispatcher::new(model, &IdEmitter, policy);
        let engine = TraceEngine::new(model, &dispatcher);
        let mut visited = VisitedSet::new();
        let start = model.element_by_id(&ElementId::new(start_id)).unwrap();
        let result = engine.trace(start, &mut visited);
        (result, visited)
    }

    #[test]
    fn linear_chain() {
        let model = ProcessModel::from_elements(
            "d",
            vec![start("S1", "C1"), flow("C1", "S1", "A1"), task("A1", Some("C2")), flow("C2", "A1", "E1"), task("E1", None)],
        )
        .unwrap();

        let (result, visited) = run(&model, "S1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["S1", "C1", "A1", "C2", "E1"]);
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn gateways_are_walked_like_tasks() {
        let gateway = BpmnElement::new("G1", ElementKind::FlowNode { tag: "exclusiveGateway".to_string() })
            .in_process("P")
            .with_outgoing("C2");
        let model = ProcessModel::from_elements(
            "d",
            vec![start("S1", "C1"), flow("C1", "S1", "G1"), gateway, flow("C2", "G1", "A1"), task("A1", None)],
        )
        .unwrap();

        let (result, visited) = run(&model, "S1", UnhandledPolicy::Abort);
        assert_eq!(result.unwrap(), vec!["S1", "C1", "G1", "C2", "A1"]);
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn cycle_back_to_start_emits_closing_connector_once() {
        let model = ProcessModel::from_elements(
            "d",
            vec![start("S1", "C1"), flow("C1", "S1", "A1"), task("A1", Some("C2")), flow("C2", "A1", "S1")],
        )
        .unwrap();

        let (result, _) = run(&model, "S1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["S1", "C1", "A1", "C2"]);
    }

    #[test]
    fn self_loop_terminates() {
        let model = ProcessModel::from_elements("d", vec![task("A1", Some("C1")), flow("C1", "A1", "A1")]).unwrap();

        let (result, visited) = run(&model, "A1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["A1", "C1"]);
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn dangling_connector_ends_path() {
        let model = ProcessModel::from_elements("d", vec![start("S1", "C1"), flow("C1", "S1", "Missing")]).unwrap();
        let (result, _) = run(&model, "S1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["S1"]);

        let model = ProcessModel::from_elements("d", vec![start("S1", "Unknown")]).unwrap();
        let (result, _) = run(&model, "S1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["S1"]);
    }

    #[test]
    fn unhandled_element_stops_descent() {
        let data = BpmnElement::new("G1", ElementKind::Unsupported { tag: "dataStoreReference".to_string() })
            .in_process("P")
            .with_outgoing("C2");
        let model = ProcessModel::from_elements(
            "d",
            vec![start("S1", "C1"), flow("C1", "S1", "G1"), data, flow("C2", "G1", "A1"), task("A1", None)],
        )
        .unwrap();

        let (result, visited) = run(&model, "S1", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap(), vec!["S1", "C1"]);
        assert!(!visited.contains(&ElementId::new("G1")));
        assert!(!visited.contains(&ElementId::new("A1")));

        let (result, _) = run(&model, "S1", UnhandledPolicy::Abort);
        assert!(matches!(result, Err(Error::UnresolvedVariant { element, .. }) if element.as_str() == "G1"));
    }

    #[test]
    fn shared_visited_set_skips_known_targets() {
        let model = ProcessModel::from_elements(
            "d",
            vec![start("S1", "C1"), flow("C1", "S1", "A1"), task("A1", None), start("S2", "C2"), flow("C2", "S2", "A1")],
        )
        .unwrap();
        let dispatcher = Dispatcher::new(&model, &IdEmitter, UnhandledPolicy::Skip);
        let engine = TraceEngine::new(&model, &dispatcher);

        let mut visited = VisitedSet::new();
        let s1 = model.element_by_id(&ElementId::new("S1")).unwrap();
        let s2 = model.element_by_id(&ElementId::new("S2")).unwrap();
        assert_eq!(engine.trace(s1, &mut visited).unwrap(), vec!["S1", "C1", "A1"]);
        assert_eq!(engine.trace(s2, &mut visited).unwrap(), vec!["S2", "C2"]);

        // A fresh set translates A1 again.
        assert_eq!(engine.trace_from(s2).unwrap(), vec!["S2", "C2", "A1"]);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let mut elements = vec![start("S", "F0")];
        let length = 50_000;
        for i in 0..length {
            elements.push(flow(&format!("F{}", i), &format!("N{}", i), &format!("N{}", i + 1)));
            let next_flow = format!("F{}", i + 1);
            elements.push(task(&format!("N{}", i + 1), (i + 1 < length).then_some(next_flow.as_str())));
        }
        let model = ProcessModel::from_elements("d", elements).unwrap();

        let (result, visited) = run(&model, "S", UnhandledPolicy::Skip);
        assert_eq!(result.unwrap().len(), 1 + 2 * length);
        assert_eq!(visited.len(), model.len());
    }
}
