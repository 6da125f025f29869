use crate::domain::process_model::bpmn_element::ElementKind;
use crate::domain::process_model::process_model::ProcessModel;
use crate::domain::translation::dispatcher::{Dispatcher, Fragment, FragmentEmitter};
use crate::error::Result;

/// One fragment per collaboration, in model insertion order.
///
/// Pools are only referenced from their collaboration, never emitted on their own.
pub fn translate_collaborations<E: FragmentEmitter + ?Sized>(
    model: &ProcessModel,
    dispatcher: &Dispatcher<'_, E>,
) -> Result<Vec<Fragment>> {
    let mut translations = Vec::new();

    for element in model.elements().filter(|e| matches!(e.kind, ElementKind::Collaboration { .. })) {
        if let Some(fragment) = dispatcher.translate(element)? {
            translations.push(fragment);
        }
    }

    log::info!("Translated {} collaborations.", translations.len());
    Ok(translations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process_model::bpmn_element::BpmnElement;
    use crate::domain::translation::config::UnhandledPolicy;
    use crate::domain::translation::klaim_emitter::KlaimEmitter;

    #[test]
    fn one_fragment_per_collaboration_in_insertion_order() {
        let model = ProcessModel::from_elements(
            "d",
            vec![
                BpmnElement::new("Collab_B", ElementKind::Collaboration { participants: vec![] }),
                BpmnElement::new("PL1", ElementKind::Pool { process_ref: None }),
                BpmnElement::new("Collab_A", ElementKind::Collaboration { participants: vec!["PL1".into()] }),
            ],
        )
        .unwrap();
        let dispatcher = Dispatcher::new(&model, &KlaimEmitter, UnhandledPolicy::Abort);

        let fragments = translate_collaborations(&model, &dispatcher).unwrap();
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].starts_with("net Collab_B"));
        assert!(fragments[1].starts_with("net Collab_A"));
        assert!(fragments[1].contains("node PL1"));
    }

    #[test]
    fn model_without_collaborations_yields_nothing() {
        let model = ProcessModel::from_elements("d", vec![BpmnElement::new("T", ElementKind::Task)]).unwrap();
        let dispatcher = Dispatcher::new(&model, &KlaimEmitter, UnhandledPolicy::Skip);
        assert!(translate_collaborations(&model, &dispatcher).unwrap().is_empty());
    }
}
