// Sample Workspace
//
// Built-in story workspace used by the demo CLI and tests.

use lecorpus::{Category, Corpus, CorpusError, Entity};

#[cfg(feature = "graph")]
use legraphe::{GraphEdge, GraphError, GraphNode, KnowledgeGraph, NodeCategory, PresentationHint};

/// Five entities spanning all four corpus categories
pub fn sample_corpus() -> Result<Corpus, CorpusError> {
    Corpus::new(vec![
        Entity::new(
            "1",
            "Chapter 1: The Beginning",
            "The hero's journey starts in the most unexpected place - a quiet coffee shop on the \
             corner of Maple Street. Sarah had always been an ordinary person, or so she thought.",
            Category::Document,
        )
        .with_tags(["chapter", "beginning", "sarah", "coffee-shop"])
        .with_last_modified("2 minutes ago"),
        Entity::new(
            "2",
            "Sarah Johnson",
            "Protagonist of our story. Age 28, works as a graphic designer. Has a mysterious past \
             that she's unaware of.",
            Category::Character,
        )
        .with_tags(["character", "protagonist", "main"])
        .with_last_modified("1 hour ago"),
        Entity::new(
            "3",
            "The Stranger",
            "Mysterious figure who approaches Sarah in the coffee shop. Wears a dark coat and \
             seems to know more than they let on.",
            Category::Character,
        )
        .with_tags(["character", "mysterious", "antagonist"])
        .with_last_modified("1 hour ago"),
        Entity::new(
            "4",
            "Maple Street Coffee Shop",
            "A cozy coffee shop where the story begins. Has vintage decorations and serves the \
             best latte in town.",
            Category::Location,
        )
        .with_tags(["location", "coffee-shop", "beginning"])
        .with_last_modified("3 hours ago"),
        Entity::new(
            "5",
            "World Building Notes",
            "The story takes place in a world where certain people have hidden abilities. Magic \
             exists but is kept secret from the general population.",
            Category::Note,
        )
        .with_tags(["worldbuilding", "magic", "abilities"])
        .with_last_modified("1 day ago"),
    ])
}

/// Story graph: 11 nodes, 18 edges
#[cfg(feature = "graph")]
pub fn sample_graph() -> Result<KnowledgeGraph, GraphError> {
    let node = |id: &str, label: &str, category: NodeCategory, size: f32| {
        let color = PresentationHint::default_for(category).color;
        (
            GraphNode::new(id, label, category),
            PresentationHint::new(size, color),
        )
    };

    let nodes = vec![
        node("chapter1", "Chapter 1", NodeCategory::Document, 40.0),
        node("chapter2", "Chapter 2", NodeCategory::Document, 35.0),
        node("worldbuilding", "World Building", NodeCategory::Document, 30.0),
        node("sarah", "Sarah Johnson", NodeCategory::Character, 35.0),
        node("stranger", "The Stranger", NodeCategory::Character, 30.0),
        node("mentor", "The Mentor", NodeCategory::Character, 25.0),
        node("coffeeshop", "Coffee Shop", NodeCategory::Location, 28.0),
        node("hiddenworld", "Hidden World", NodeCategory::Location, 32.0),
        node("academy", "Magic Academy", NodeCategory::Location, 30.0),
        node("magic", "Magic System", NodeCategory::Concept, 25.0),
        node("prophecy", "Ancient Prophecy", NodeCategory::Concept, 22.0),
    ];

    let edges = [
        ("chapter1", "chapter2", "follows"),
        ("chapter1", "worldbuilding", "references"),
        ("chapter2", "worldbuilding", "references"),
        ("sarah", "stranger", "meets"),
        ("sarah", "mentor", "trained_by"),
        ("stranger", "mentor", "knows"),
        ("sarah", "coffeeshop", "visits"),
        ("stranger", "coffeeshop", "appears_at"),
        ("sarah", "hiddenworld", "discovers"),
        ("sarah", "academy", "studies_at"),
        ("chapter1", "sarah", "features"),
        ("chapter1", "stranger", "introduces"),
        ("chapter2", "sarah", "features"),
        ("chapter2", "mentor", "introduces"),
        ("magic", "sarah", "affects"),
        ("magic", "hiddenworld", "governs"),
        ("prophecy", "sarah", "about"),
        ("prophecy", "stranger", "known_by"),
    ]
    .into_iter()
    .map(|(source, target, relationship)| GraphEdge::new(source, target, relationship))
    .collect();

    KnowledgeGraph::build_with_hints(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_corpus_builds() {
        let corpus = sample_corpus().unwrap();
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.by_category(Category::Character).len(), 2);
        assert_eq!(corpus.get("5").unwrap().category, Category::Note);
    }

    #[cfg(feature = "graph")]
    #[test]
    fn test_sample_graph_builds() {
        let graph = sample_graph().unwrap();
        assert_eq!(graph.node_count(), 11);
        assert_eq!(graph.edge_count(), 18);
        assert_eq!(graph.hint("sarah").map(|h| h.size), Some(35.0));
        assert_eq!(
            graph.hint("prophecy").map(|h| h.color.as_str()),
            Some("#f59e0b")
        );
    }
}
