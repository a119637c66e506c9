//! Semantic jumps through the navigation manager

mod common;

use common::{all_tags, first_tag, recording_manager};
use vox_a11y::{AriaRole, DomPredicate};
use vox_nav::{
    CursorSelection, Direction, Earcon, Granularity, MoveOutcome, NavCommand, NavConfig,
    find_predicate,
};

const PAGE: &str = "<h1>Title</h1>\
    <p>Intro with <a href=\"/a\">first link</a>.</p>\
    <h2>Setup</h2>\
    <p>Read the <a href=\"/b\">second link</a>.</p>\
    <h3>Details</h3>\
    <form><input type=\"checkbox\" aria-label=\"Agree\"><button>Send</button></form>\
    <h2>Usage</h2>";

#[test]
fn test_headings_in_order_then_none() {
    let doc = vox_html::parse(PAGE);
    let tree = doc.tree();
    let mut sel = CursorSelection::from_body(&doc);
    let mut names = Vec::new();
    while let Some(found) = find_predicate(&doc, &sel, &DomPredicate::Heading(None), 1000).unwrap() {
        names.push(tree.text_content(found.start.node));
        sel = found;
    }
    assert_eq!(names, vec!["Title", "Setup", "Details", "Usage"]);
}

#[test]
fn test_heading_level_filter() {
    let doc = vox_html::parse(PAGE);
    let tree = doc.tree();
    let start = CursorSelection::from_body(&doc);
    let first = find_predicate(&doc, &start, &DomPredicate::Heading(Some(2)), 1000)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text_content(first.start.node), "Setup");
    let second = find_predicate(&doc, &first, &DomPredicate::Heading(Some(2)), 1000)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text_content(second.start.node), "Usage");
}

#[test]
fn test_find_previous_walks_backward() {
    let doc = vox_html::parse(PAGE);
    let links = all_tags(&doc, "a");
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.sync_to(&doc, first_tag(&doc, "h3")).unwrap();

    let out = manager.find_next(&doc, DomPredicate::Link, Direction::Backward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Moved);
    assert_eq!(out.selection.start.node, links[1]);
    assert_eq!(log.borrow().spoken()[0], "second link");

    let out = manager.find_next(&doc, DomPredicate::Link, Direction::Backward).unwrap();
    assert_eq!(out.selection.start.node, links[0]);
}

#[test]
fn test_no_match_announces_edge() {
    let doc = vox_html::parse(PAGE);
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.sync_to(&doc, all_tags(&doc, "h2")[1]).unwrap();

    let out = manager
        .find_next(&doc, DomPredicate::Heading(None), Direction::Forward)
        .unwrap();
    assert_eq!(out.outcome, MoveOutcome::Edge);
    assert_eq!(out.selection.start.node, all_tags(&doc, "h2")[1]);
    let log = log.borrow();
    assert_eq!(log.spoken(), vec!["No next heading"]);
    assert_eq!(log.earcons, vec![Earcon::WrapEdge]);
}

#[test]
fn test_form_controls_by_role_and_command() {
    let doc = vox_html::parse(PAGE);
    let (mut manager, _log) = recording_manager(NavConfig::default());

    let out = manager
        .find_next_by_role(&doc, AriaRole::Button, Direction::Forward)
        .unwrap();
    assert_eq!(out.selection.start.node, first_tag(&doc, "button"));

    let out = manager
        .handle_command(&doc, NavCommand::FindPrevious(DomPredicate::Checkbox))
        .unwrap();
    assert_eq!(out.selection.start.node, first_tag(&doc, "input"));
    assert_eq!(out.descriptions[0].text, "Agree");
}

#[test]
fn test_found_node_is_synced_to_current_granularity() {
    let doc = vox_html::parse("<p>one</p><h2>Heading text</h2><p>two</p>");
    let (mut manager, _log) = recording_manager(NavConfig {
        default_granularity: Granularity::Word,
        ..Default::default()
    });
    manager
        .find_next(&doc, DomPredicate::Heading(None), Direction::Forward)
        .unwrap();
    let current = manager.current().unwrap();
    assert_eq!(current.selected_text(), "Heading");

    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(out.selection.selected_text(), "text");
}

#[test]
fn test_iframe_stops_the_search() {
    let doc = vox_html::parse("<p>a</p><iframe title=\"ad\"></iframe><h2>After</h2>");
    let found = find_predicate(
        &doc,
        &CursorSelection::from_body(&doc),
        &DomPredicate::Heading(None),
        1000,
    )
    .unwrap()
    .unwrap();
    assert_eq!(found.start.node, first_tag(&doc, "iframe"));
}
