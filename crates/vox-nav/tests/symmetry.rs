//! Walking forward then back returns to the same selection

mod common;

use common::shapes;
use proptest::prelude::*;
use vox_dom::Document;
use vox_nav::{
    CursorSelection, GroupWalker, ObjectWalker, SelectionWalker, TextGrain, Verbosity, Walker,
};

fn walkers() -> Vec<Box<dyn Walker>> {
    vec![
        Box::new(ObjectWalker::default()),
        Box::new(GroupWalker::new(1000, 40, Verbosity::Verbose)),
        Box::new(SelectionWalker::new(TextGrain::Line).with_line_width(12)),
        Box::new(SelectionWalker::new(TextGrain::Sentence)),
        Box::new(SelectionWalker::new(TextGrain::Word)),
        Box::new(SelectionWalker::new(TextGrain::Character)),
    ]
}

fn forward_walk(walker: &dyn Walker, doc: &Document) -> Vec<CursorSelection> {
    let mut out = Vec::new();
    let mut sel = walker.begin(doc, false);
    while let Some(next) = walker.next(doc, &sel).unwrap() {
        out.push(next.clone());
        sel = next;
        assert!(out.len() < 10_000, "{} never reached the end", walker.name());
    }
    out
}

#[test]
fn test_backward_walk_mirrors_forward_walk() {
    let doc = vox_html::parse(
        "<h1>Title</h1><p>First sentence. Second one.</p><ul><li>a</li><li><a href=\"/\">b c</a></li></ul>",
    );
    for walker in walkers() {
        let forward = forward_walk(walker.as_ref(), &doc);

        let mut backward = Vec::new();
        let mut sel = walker.begin(&doc, true);
        while let Some(prev) = walker.next(&doc, &sel).unwrap() {
            backward.push(prev.clone());
            sel = prev;
        }
        backward.reverse();
        assert_eq!(forward, backward, "{} walks differ by direction", walker.name());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn next_then_previous_returns(shapes in prop::collection::vec(shapes::shape(), 1..4)) {
        let doc = shapes::document(&shapes);
        for walker in walkers() {
            let forward = forward_walk(walker.as_ref(), &doc);
            for pair in forward.windows(2) {
                let back = walker.previous(&doc, &pair[1]).unwrap();
                prop_assert_eq!(
                    back.as_ref(),
                    Some(&pair[0]),
                    "{} did not step back from {:?}",
                    walker.name(),
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn first_step_back_from_start_is_boundary(shapes in prop::collection::vec(shapes::shape(), 1..3)) {
        let doc = shapes::document(&shapes);
        for walker in walkers() {
            let forward = forward_walk(walker.as_ref(), &doc);
            if let Some(first) = forward.first() {
                let back = walker.previous(&doc, first).unwrap();
                prop_assert!(back.is_none(), "{} stepped before the first stop", walker.name());
            }
        }
    }
}
