//! Navigation manager: wrap policy, output ordering, recovery and commands

mod common;

use common::{all_tags, first_tag, recording_manager};
use pretty_assertions::assert_eq;
use vox_nav::{
    BrailleCommand, Direction, Earcon, Granularity, KeyboardShortcut, MoveOutcome, NavCommand,
    NavConfig, NavState, QueueMode, ShortcutRegistry, WrapPolicy,
};

const TWO: &str = "<p>one</p><p>two</p>";

fn config(wrap_policy: WrapPolicy) -> NavConfig {
    NavConfig {
        wrap_policy,
        ..Default::default()
    }
}

#[test]
fn test_stop_policy_stays_at_edge() {
    let doc = vox_html::parse(TWO);
    let (mut manager, log) = recording_manager(config(WrapPolicy::Stop));
    manager.next(&doc, Direction::Forward).unwrap();
    manager.next(&doc, Direction::Forward).unwrap();
    log.borrow_mut().clear();

    for _ in 0..2 {
        let out = manager.next(&doc, Direction::Forward).unwrap();
        assert_eq!(out.outcome, MoveOutcome::Edge);
        assert_eq!(doc.tree().text_content(out.selection.start.node), "two");
    }
    assert_eq!(manager.state(), NavState::AtBoundary { reversed: false });
    let log = log.borrow();
    assert_eq!(log.spoken(), vec!["End of page", "End of page"]);
    assert_eq!(log.earcons, vec![Earcon::WrapEdge, Earcon::WrapEdge]);
}

#[test]
fn test_wrap_policy_wraps_immediately() {
    let doc = vox_html::parse(TWO);
    let (mut manager, log) = recording_manager(config(WrapPolicy::Wrap));
    manager.next(&doc, Direction::Forward).unwrap();
    manager.next(&doc, Direction::Forward).unwrap();
    log.borrow_mut().clear();

    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Wrapped);
    assert_eq!(doc.tree().text_content(out.selection.start.node), "one");
    let log = log.borrow();
    assert_eq!(
        log.speech,
        vec![
            ("Wrapped to top".to_string(), QueueMode::Flush),
            ("one".to_string(), QueueMode::Queue),
        ]
    );
    assert_eq!(log.earcons, vec![Earcon::Wrap]);
}

#[test]
fn test_wrap_after_boundary_announces_first() {
    let doc = vox_html::parse(TWO);
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();

    let out = manager.next(&doc, Direction::Backward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Edge);
    assert_eq!(manager.state(), NavState::AtBoundary { reversed: true });

    let out = manager.next(&doc, Direction::Backward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Wrapped);
    assert_eq!(doc.tree().text_content(out.selection.start.node), "two");
    assert_eq!(manager.state(), NavState::Idle);
    assert_eq!(
        log.borrow().spoken(),
        vec!["one", "Start of page", "Wrapped to bottom", "two"]
    );
}

#[test]
fn test_boundary_in_one_direction_does_not_wrap_the_other() {
    let doc = vox_html::parse(TWO);
    let (mut manager, _log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();
    manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(manager.next(&doc, Direction::Forward).unwrap().outcome, MoveOutcome::Edge);

    let out = manager.next(&doc, Direction::Backward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Moved);
    assert_eq!(doc.tree().text_content(out.selection.start.node), "one");
}

#[test]
fn test_context_flushes_and_content_queues() {
    let doc = vox_html::parse("<ul><li>a</li><li>b</li></ul>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();

    let log = log.borrow();
    assert_eq!(
        log.speech,
        vec![
            ("List with 2 items".to_string(), QueueMode::Flush),
            ("a".to_string(), QueueMode::Queue),
        ]
    );
    assert_eq!(log.earcons, vec![Earcon::ObjectEnter, Earcon::ListItem]);
    assert_eq!(log.braille.len(), 1);
}

#[test]
fn test_read_current_repeats_context() {
    let doc = vox_html::parse("<ul><li>a</li><li>b</li></ul>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();
    manager.next(&doc, Direction::Forward).unwrap();
    log.borrow_mut().clear();

    let out = manager.read_current(&doc).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Unchanged);
    assert_eq!(log.borrow().spoken(), vec!["List with 2 items", "b"]);
}

#[test]
fn test_stale_selection_resyncs_from_nearest_ancestor() {
    let mut doc = vox_html::parse("<div><p>one</p><p>two</p></div><p>three</p>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    let paragraphs = all_tags(&doc, "p");
    manager.sync_to(&doc, paragraphs[1]).unwrap();

    let div = first_tag(&doc, "div");
    doc.tree_mut().remove_child(div, paragraphs[1]).unwrap();

    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(out.outcome, MoveOutcome::Moved);
    assert_eq!(out.selection.start.node, paragraphs[0]);
    assert_eq!(log.borrow().spoken(), vec!["one"]);

    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(out.selection.start.node, paragraphs[2]);
}

#[test]
fn test_sync_to_is_silent() {
    let doc = vox_html::parse("<p>one</p><p>two</p><p>three</p>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    let sel = manager.sync_to(&doc, all_tags(&doc, "p")[1]).unwrap();
    assert_eq!(doc.tree().text_content(sel.start.node), "two");
    assert!(log.borrow().speech.is_empty());

    let out = manager.next(&doc, Direction::Forward).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "three");
}

#[test]
fn test_granularity_ladder_is_announced() {
    let doc = vox_html::parse("<p>Some words here.</p>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();
    log.borrow_mut().clear();

    manager.make_more_granular(&doc).unwrap();
    manager.make_more_granular(&doc).unwrap();
    manager.make_more_granular(&doc).unwrap();
    assert_eq!(manager.granularity(), Granularity::Word);
    assert_eq!(manager.current().unwrap().selected_text(), "Some");

    manager.make_less_granular(&doc).unwrap();
    manager.make_less_granular(&doc).unwrap();
    manager.make_less_granular(&doc).unwrap();
    manager.make_less_granular(&doc).unwrap();
    manager.make_less_granular(&doc).unwrap();
    assert_eq!(manager.granularity(), Granularity::Group);
    assert_eq!(
        log.borrow().spoken(),
        vec!["Line", "Sentence", "Word", "Sentence", "Line", "Object", "Group", "Group"]
    );
}

#[test]
fn test_jumps_to_either_end() {
    let doc = vox_html::parse("<p>one</p><p>two</p><p>three</p>");
    let (mut manager, _log) = recording_manager(NavConfig::default());

    let out = manager.jump_to_bottom(&doc).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "three");
    let out = manager.jump_to_top(&doc).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "one");
}

#[test]
fn test_commands_from_shortcuts() {
    let doc = vox_html::parse("<p>one</p><p>two</p>");
    let (mut manager, _log) = recording_manager(NavConfig::default());
    let registry = ShortcutRegistry::new();

    let forward = registry
        .command(&KeyboardShortcut::new("ArrowDown").alt().shift())
        .unwrap();
    manager.handle_command(&doc, forward).unwrap();
    let out = manager.handle_command(&doc, forward).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "two");

    let out = manager.handle_command(&doc, NavCommand::Backward).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "one");
    let out = manager.handle_command(&doc, NavCommand::JumpToBottom).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "two");
}

#[test]
fn test_braille_keys() {
    let doc = vox_html::parse("<pre>first line\nsecond line</pre><p>after</p>");
    let (mut manager, log) = recording_manager(NavConfig::default());
    manager.next(&doc, Direction::Forward).unwrap();

    let out = manager.handle_braille_command(&doc, BrailleCommand::LineDown).unwrap();
    assert_eq!(out.selection.selected_text(), "second line");
    assert_eq!(manager.granularity(), Granularity::Object);
    let braille = log.borrow().braille.last().cloned().unwrap();
    assert_eq!(braille.text, "second line");

    let out = manager.handle_braille_command(&doc, BrailleCommand::PanRight).unwrap();
    assert_eq!(doc.tree().text_content(out.selection.start.node), "after");
    let out = manager.handle_braille_command(&doc, BrailleCommand::PanLeft).unwrap();
    assert!(doc.tree().is_tag(out.selection.start.node, "pre"));
}

#[test]
fn test_word_moves_speak_line_prefix_by_default() {
    let doc = vox_html::parse("<p>alpha beta gamma</p>");
    let (mut manager, log) = recording_manager(NavConfig {
        default_granularity: Granularity::Word,
        ..Default::default()
    });
    manager.next(&doc, Direction::Forward).unwrap();
    manager.next(&doc, Direction::Forward).unwrap();
    let out = manager.next(&doc, Direction::Forward).unwrap();

    assert_eq!(out.selection.selected_text(), "gamma");
    assert_eq!(log.borrow().spoken().last(), Some(&"alpha beta gamma"));
}

#[test]
fn test_unbound_key_plays_invalid_keypress() {
    let doc = vox_html::parse(TWO);
    let (mut manager, log) = recording_manager(NavConfig::default());
    let registry = ShortcutRegistry::new();

    let out = manager
        .handle_key(&doc, &registry, &KeyboardShortcut::new("q").ctrl())
        .unwrap();
    assert_eq!(out.outcome, MoveOutcome::Unchanged);
    assert_eq!(log.borrow().earcons, vec![Earcon::InvalidKeypress]);
    assert!(log.borrow().speech.is_empty());

    let out = manager
        .handle_key(&doc, &registry, &KeyboardShortcut::new("ArrowDown").alt().shift())
        .unwrap();
    assert_eq!(out.outcome, MoveOutcome::Moved);
    assert_eq!(doc.tree().text_content(out.selection.start.node), "one");
}
