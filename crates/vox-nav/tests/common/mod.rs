//! Shared helpers for vox-nav integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vox_dom::{Document, NodeId};
use vox_nav::{
    BrailleDisplay, Earcon, Earcons, NavBraille, NavConfig, NavigationManager, QueueMode, Speech,
    SpeechProperties,
};

/// Everything the manager sent to its outputs
#[derive(Debug, Default)]
pub struct Log {
    pub speech: Vec<(String, QueueMode)>,
    pub earcons: Vec<Earcon>,
    pub braille: Vec<NavBraille>,
}

impl Log {
    pub fn spoken(&self) -> Vec<&str> {
        self.speech.iter().map(|(text, _)| text.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.speech.clear();
        self.earcons.clear();
        self.braille.clear();
    }
}

/// Output double that records into a shared log
#[derive(Debug, Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Log>>);

impl Speech for Recorder {
    fn speak(&mut self, text: &str, mode: QueueMode, _properties: Option<&SpeechProperties>) {
        self.0.borrow_mut().speech.push((text.to_string(), mode));
    }

    fn stop(&mut self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

impl Earcons for Recorder {
    fn play_earcon(&mut self, earcon: Earcon) {
        self.0.borrow_mut().earcons.push(earcon);
    }
}

impl BrailleDisplay for Recorder {
    fn write(&mut self, braille: &NavBraille) {
        self.0.borrow_mut().braille.push(braille.clone());
    }
}

/// Manager wired to a recorder
pub fn recording_manager(config: NavConfig) -> (NavigationManager, Rc<RefCell<Log>>) {
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let manager = NavigationManager::with_output(
        config,
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
        Box::new(recorder),
    );
    (manager, log)
}

/// First element with the given tag
pub fn first_tag(doc: &Document, tag: &str) -> NodeId {
    let tree = doc.tree();
    tree.descendants(tree.root())
        .find(|&n| tree.is_tag(n, tag))
        .unwrap_or(NodeId::NONE)
}

/// All elements with the given tag, in document order
pub fn all_tags(doc: &Document, tag: &str) -> Vec<NodeId> {
    let tree = doc.tree();
    tree.descendants(tree.root()).filter(|&n| tree.is_tag(n, tag)).collect()
}

pub mod shapes {
    //! Random documents for property tests

    use proptest::prelude::*;
    use vox_dom::{Document, NodeId};

    #[derive(Debug, Clone)]
    pub enum Shape {
        Text(String),
        Element(&'static str, Vec<(&'static str, &'static str)>, Vec<Shape>),
    }

    pub fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            "[a-z]{1,6}( [a-z]{1,6}){0,2}\\.?".prop_map(Shape::Text),
            Just(Shape::Text("  ".to_string())),
            Just(Shape::Element("img", vec![("alt", "pic")], vec![])),
            Just(Shape::Element("img", vec![("alt", "")], vec![])),
            Just(Shape::Element("input", vec![("value", "typed")], vec![])),
            Just(Shape::Element("br", vec![], vec![])),
        ];
        leaf.prop_recursive(5, 48, 4, |inner| {
            (
                prop::sample::select(vec![
                    "div", "p", "span", "ul", "li", "h2", "a", "button", "section", "b", "pre",
                ]),
                prop::sample::select(vec![
                    vec![],
                    vec![("href", "/")],
                    vec![("hidden", "")],
                    vec![("aria-label", "labelled")],
                ]),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(tag, attrs, children)| Shape::Element(tag, attrs, children))
        })
    }

    fn build(doc: &mut Document, parent: NodeId, shape: &Shape) {
        let tree = doc.tree_mut();
        match shape {
            Shape::Text(text) => {
                let id = tree.create_text(text);
                tree.append_child(parent, id).unwrap();
            }
            Shape::Element(tag, attrs, children) => {
                let id = tree.create_element(tag);
                for (k, v) in attrs {
                    tree.set_attribute(id, k, v).unwrap();
                }
                tree.append_child(parent, id).unwrap();
                for child in children {
                    build(doc, id, child);
                }
            }
        }
    }

    /// Document whose body holds the given shapes
    pub fn document(shapes: &[Shape]) -> Document {
        let mut doc = Document::default();
        let body = doc.body();
        for shape in shapes {
            build(&mut doc, body, shape);
        }
        doc
    }
}
