//! Property-based tests for fallback resolution.

use std::sync::Arc;

use content_fallback::mocks::{InMemoryLanguageDirectory, MockContent, MockContentTree, MockProperty};
use content_fallback::{
    ContextualizeVariation, Fallback, FallbackMode, PublishedValueFallback, Resolution,
    StaticVariationContextAccessor, VariationContext,
};
use content_types::{ContentVariation, Language, NodeId, PropertyType};
use proptest::prelude::*;
use serde_json::json;

fn culture_name(i: usize) -> String {
    format!("l{i}-XX")
}

/// Languages `l0..ln`, each optionally falling back to another one. Any
/// shape is allowed, cycles and self-loops included.
fn language_graph() -> impl Strategy<Value = Vec<Option<usize>>> {
    (1usize..8).prop_flat_map(|n| prop::collection::vec(prop::option::of(0..n), n))
}

fn directory(graph: &[Option<usize>]) -> InMemoryLanguageDirectory {
    graph
        .iter()
        .enumerate()
        .fold(InMemoryLanguageDirectory::new(), |dir, (i, next)| {
            let language = Language::new(culture_name(i));
            dir.with(match next {
                Some(j) => language.with_fallback(culture_name(*j)),
                None => language,
            })
        })
}

/// Fallback targets queried from `start`, in order. Only targets are
/// remembered, so the start language is queried again if the chain
/// returns to it.
fn reference_walk(graph: &[Option<usize>], start: usize) -> Vec<usize> {
    let mut hops = Vec::new();
    let mut current = start;
    while let Some(next) = graph[current] {
        if hops.contains(&next) {
            break;
        }
        hops.push(next);
        current = next;
    }
    hops
}

fn resolver(languages: InMemoryLanguageDirectory) -> PublishedValueFallback<MockContent> {
    PublishedValueFallback::new(
        Arc::new(languages),
        Arc::new(StaticVariationContextAccessor::default()),
        Arc::new(MockContentTree::new()),
    )
}

fn mode() -> impl Strategy<Value = FallbackMode> {
    prop_oneof![
        Just(FallbackMode::None),
        Just(FallbackMode::Language),
        Just(FallbackMode::DefaultLanguage),
    ]
}

proptest! {
    #[test]
    fn language_graphs_without_values_never_resolve(graph in language_graph(), start in 0usize..8) {
        let start = start % graph.len();
        let resolver = resolver(directory(&graph));
        let property = MockProperty::new(PropertyType::by_culture("title"));

        let result = resolver
            .try_get_property_value::<_, String>(
                &property,
                Some(&culture_name(start)),
                None,
                &Fallback::to_language(),
                None,
            )
            .unwrap();
        prop_assert_eq!(result, Resolution::NotFound);
    }

    #[test]
    fn language_value_found_iff_walk_reaches_it(
        graph in language_graph(),
        start in 0usize..8,
        holder in 0usize..8,
    ) {
        let start = start % graph.len();
        let holder = holder % graph.len();
        let hops = reference_walk(&graph, start);

        let resolver = resolver(directory(&graph));
        let property = MockProperty::new(PropertyType::by_culture("title"))
            .with_value(Some(&culture_name(holder)), None, json!("found"));

        let result: Resolution<String> = resolver
            .try_get_property_value(
                &property,
                Some(&culture_name(start)),
                None,
                &Fallback::to_language(),
                None,
            )
            .unwrap();

        let expected = if hops.contains(&holder) {
            Resolution::Found(Some("found".to_string()))
        } else {
            Resolution::NotFound
        };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn default_value_at_any_position_resolves(
        before in prop::collection::vec(mode(), 0..5),
        after in prop::collection::vec(mode(), 0..5),
        default in any::<u32>(),
    ) {
        let resolver = resolver(
            InMemoryLanguageDirectory::new().with(Language::new("en-US").as_default()),
        );
        let property = MockProperty::new(PropertyType::by_culture("count"));
        let fallback = Fallback::to(
            before
                .into_iter()
                .chain(std::iter::once(FallbackMode::DefaultValue))
                .chain(after),
        );

        let result = resolver
            .try_get_property_value(&property, Some("fr-FR"), None, &fallback, Some(default))
            .unwrap();
        prop_assert_eq!(result, Resolution::Found(Some(default)));
    }

    #[test]
    fn contextualize_is_idempotent(
        flags in (any::<bool>(), any::<bool>()),
        culture in prop::option::of("[a-z]{2}-[A-Z]{2}"),
        segment in prop::option::of("[a-z]{1,8}"),
        node in prop::option::of(1i32..100),
    ) {
        let variation = ContentVariation::from_flags(flags.0, flags.1);
        let accessor = StaticVariationContextAccessor::new(Some(
            VariationContext::new(Some("en-US".into()), Some("members".into()))
                .with_node_segment(NodeId(7), "vip"),
        ));
        let node = node.map(NodeId);

        let once = accessor.contextualize(variation, node, culture.as_deref(), segment.as_deref());
        let twice = accessor.contextualize(variation, node, once.culture(), once.segment());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.culture.is_some(), variation.varies_by_culture());
        prop_assert_eq!(once.segment.is_some(), variation.varies_by_segment());
    }
}
