//! Every walk ends, and bounded searches give up instead of hanging

mod common;

use common::shapes;
use proptest::prelude::*;
use vox_a11y::DomPredicate;
use vox_dom::{Document, DomTree, NodeId};
use vox_nav::{
    CursorSelection, Direction, GroupWalker, MoveOutcome, NavConfig, NavError, NavigationManager,
    ObjectWalker, SelectionWalker, TextGrain, Verbosity, Walker, WrapPolicy, find_predicate,
};

/// Walk from the start, returning the visited selections; fails past `limit`
fn walk(walker: &dyn Walker, doc: &Document, reversed: bool, limit: usize) -> Vec<CursorSelection> {
    let mut sel = walker.begin(doc, reversed);
    let mut seen = Vec::new();
    while let Some(next) = walker.next(doc, &sel).unwrap() {
        seen.push(next.clone());
        assert!(seen.len() <= limit, "{} walk did not end", walker.name());
        sel = next;
    }
    seen
}

fn content_text_nodes(doc: &Document) -> Vec<NodeId> {
    let tree: &DomTree = doc.tree();
    tree.descendants(doc.body())
        .filter(|&n| tree.text(n).is_some() && vox_a11y::has_content(tree, n))
        .collect()
}

/// Body whose first `blanks` children are empty spans, followed by one paragraph
fn padded(blanks: usize) -> Document {
    let mut html = "<span></span>".repeat(blanks);
    html.push_str("<p>x</p>");
    vox_html::parse(&html)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn object_walk_ends_and_covers_content(shapes in prop::collection::vec(shapes::shape(), 1..5)) {
        let doc = shapes::document(&shapes);
        let tree = doc.tree();
        let walker = ObjectWalker::default();
        let nodes = tree.descendants(tree.root()).count();

        let seen = walk(&walker, &doc, false, nodes);
        if let Some(last) = seen.last() {
            prop_assert!(walker.next(&doc, last).unwrap().is_none());
        }

        for text in content_text_nodes(&doc) {
            prop_assert!(
                seen.iter().any(|s| tree.contains(s.start.node, text)),
                "text {:?} was never reached",
                tree.text(text)
            );
        }
    }

    #[test]
    fn text_walks_end(shapes in prop::collection::vec(shapes::shape(), 1..4)) {
        let doc = shapes::document(&shapes);
        let tree = doc.tree();
        let limit = 10 * (tree.text_content(doc.body()).len() + tree.descendants(tree.root()).count());
        for grain in [TextGrain::Line, TextGrain::Sentence, TextGrain::Word, TextGrain::Character] {
            let walker = SelectionWalker::new(grain);
            walk(&walker, &doc, false, limit);
            walk(&walker, &doc, true, limit);
        }
        walk(&GroupWalker::default(), &doc, false, limit);
    }
}

#[test]
fn test_walker_gives_up_past_step_budget() {
    let doc = padded(20);
    let walker = ObjectWalker::new(5, Verbosity::Verbose);
    let err = walker.next(&doc, &walker.begin(&doc, false)).unwrap_err();
    assert!(matches!(err, NavError::TraversalExhausted { steps: 5 }));

    let roomy = ObjectWalker::default();
    let found = roomy.next(&doc, &roomy.begin(&doc, false)).unwrap().unwrap();
    assert_eq!(doc.tree().text_content(found.start.node), "x");
}

#[test]
fn test_manager_reports_exhaustion_as_edge() {
    let doc = padded(20);
    let mut manager = NavigationManager::new(NavConfig {
        max_steps: 5,
        wrap_policy: WrapPolicy::Stop,
        ..Default::default()
    });
    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Edge);
    assert_eq!(out.descriptions[0].text, "End of page");
}

#[test]
fn test_find_gives_up_on_long_document() {
    let mut html = "<p>filler</p>".repeat(50);
    html.push_str("<h2>Far</h2>");
    let doc = vox_html::parse(&html);
    let start = CursorSelection::from_body(&doc);

    assert!(matches!(
        find_predicate(&doc, &start, &DomPredicate::Heading(None), 10),
        Err(NavError::TraversalExhausted { .. })
    ));
    let found = find_predicate(&doc, &start, &DomPredicate::Heading(None), 1000)
        .unwrap()
        .unwrap();
    assert_eq!(doc.tree().text_content(found.start.node), "Far");

    let mut manager = NavigationManager::new(NavConfig {
        max_steps: 10,
        ..Default::default()
    });
    let out = manager
        .find_next(&doc, DomPredicate::Heading(None), Direction::Forward)
        .unwrap();
    assert_eq!(out.outcome, MoveOutcome::Edge);
    assert_eq!(out.descriptions[0].text, "No next heading");
}
