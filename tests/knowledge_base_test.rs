#![cfg(all(feature = "search", feature = "graph"))]

use lecarnet::{CarnetConfig, CategoryFilter, KnowledgeBase, NodeCategory};
use lecarnet::{Category, Corpus, Entity};
use proptest::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn kb() -> KnowledgeBase {
    KnowledgeBase::sample(&CarnetConfig::default()).expect("sample workspace builds")
}

#[rstest]
fn misspelled_name_finds_character(kb: KnowledgeBase) {
    let results = kb.search("sarah jonson", CategoryFilter::All);
    assert_eq!(results[0].entity.id, "2");
    assert!(results[0].score <= 0.3);
    assert!(results[0].match_percent() >= 70);
}

#[rstest]
fn gibberish_finds_nothing(kb: KnowledgeBase) {
    assert!(kb.search("xyzzy", CategoryFilter::All).is_empty());
}

#[rstest]
#[case("The Stranger", "3")]
#[case("Maple Street Coffee Shop", "4")]
#[case("World Building Notes", "5")]
fn exact_title_ranks_first(kb: KnowledgeBase, #[case] title: &str, #[case] id: &str) {
    let results = kb.search(title, CategoryFilter::All);
    assert_eq!(results[0].entity.id, id);
    assert!(results[0].score < 1e-6);
}

#[rstest]
#[case(CategoryFilter::All, &["1", "2", "3", "4", "5"])]
#[case(CategoryFilter::Characters, &["2", "3"])]
#[case(CategoryFilter::Locations, &["4"])]
#[case(CategoryFilter::Notes, &["5"])]
fn empty_query_lists_filtered_corpus(
    kb: KnowledgeBase,
    #[case] filter: CategoryFilter,
    #[case] expected: &[&str],
) {
    let results = kb.search("   ", filter);
    let ids: Vec<&str> = results.iter().map(|r| r.entity.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert!(results.iter().all(|r| r.score == 0.0 && r.matches.is_empty()));
}

#[rstest]
fn filter_never_changes_scores(kb: KnowledgeBase) {
    let all = kb.search("mysterious", CategoryFilter::All);
    let characters = kb.search("mysterious", CategoryFilter::Characters);

    assert!(!characters.is_empty());
    for result in &characters {
        let unfiltered = all
            .iter()
            .find(|r| r.entity.id == result.entity.id)
            .expect("filtered result also appears unfiltered");
        assert_eq!(unfiltered.score, result.score);
    }
}

#[rstest]
fn sarah_neighbors(kb: KnowledgeBase) {
    let view = kb.neighbors_of("sarah").unwrap();
    assert_eq!(view.connection_count, 9);
    assert_eq!(
        view.neighbors,
        vec![
            "The Stranger",
            "The Mentor",
            "Coffee Shop",
            "Hidden World",
            "Magic Academy",
            "Chapter 1",
            "Chapter 2",
            "Magic System",
            "Ancient Prophecy",
        ]
    );
}

#[rstest]
fn sample_statistics(kb: KnowledgeBase) {
    let stats = kb.statistics();
    assert_eq!(stats.total_nodes, 11);
    assert_eq!(stats.total_edges, 18);
    assert_eq!(stats[NodeCategory::Document], 3);
    assert_eq!(stats[NodeCategory::Character], 3);
    assert_eq!(stats[NodeCategory::Location], 3);
    assert_eq!(stats[NodeCategory::Concept], 2);
}

#[rstest]
fn unknown_node_is_a_recoverable_miss(kb: KnowledgeBase) {
    let err = kb.neighbors_of("dragon").unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.suggestion().is_some());
}

#[rstest]
fn stricter_threshold_from_config() {
    let mut config = CarnetConfig::default();
    config.search.threshold = 0.0;
    let kb = KnowledgeBase::sample(&config).unwrap();

    assert!(kb.search("sarah jonson", CategoryFilter::All).is_empty());
    assert_eq!(kb.search("Sarah Johnson", CategoryFilter::All)[0].entity.id, "2");
}

#[rstest]
fn exact_title_beats_body_only_mentions(kb: KnowledgeBase) {
    let results = kb.search("coffee shop", CategoryFilter::All);
    assert_eq!(results[0].entity.id, "4");
    assert!(results.iter().any(|r| r.entity.id == "3"));
}

fn entities() -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::vec(("[a-e ]{1,12}", "[a-e ]{0,30}"), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, body))| Entity::new(format!("e{i}"), title, body, Category::Note))
            .collect()
    })
}

proptest! {
    #[test]
    fn rebuilt_snapshot_replaces_corpus_and_index_together(
        batches in prop::collection::vec(entities(), 1..5),
    ) {
        let kb = KnowledgeBase::sample(&CarnetConfig::default()).unwrap();

        for batch in batches {
            let expected: Vec<String> = batch.iter().map(|e| e.id.clone()).collect();
            let before = kb.snapshot();
            kb.rebuild_index(Corpus::new(batch).unwrap());

            let after = kb.snapshot();
            prop_assert_eq!(after.corpus.len(), after.index.len());
            prop_assert_eq!(before.corpus.len(), before.index.len());

            let listed: Vec<String> = kb
                .search("", CategoryFilter::All)
                .iter()
                .map(|r| r.entity.id.clone())
                .collect();
            prop_assert_eq!(listed, expected);
        }
    }
}
