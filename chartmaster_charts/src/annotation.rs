// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-text notes pinned to a chart.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::primitive::{Label, Mark, Primitive};
use crate::theme::Theme;
use crate::view_state::Offset;
use crate::z_order;

/// One note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Identifier, unique within its [`Annotations`].
    pub id: u64,
    /// Trimmed, non-empty text.
    pub text: String,
    /// Anchor in plot coordinates.
    pub position: Offset,
}

/// An ordered collection of notes with monotonically increasing ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    next_id: u64,
    items: Vec<Annotation>,
}

impl Annotations {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note and returns its id. Text is trimmed; blank text is rejected.
    pub fn add(&mut self, text: &str, position: Point) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Annotation {
            id,
            text: text.to_string(),
            position: Offset::new(position.x, position.y),
        });
        tracing::debug!(id, "added annotation");
        Some(id)
    }

    /// Removes the note `id`, returning it.
    pub fn remove(&mut self, id: u64) -> Option<Annotation> {
        let index = self.items.iter().position(|a| a.id == id)?;
        Some(self.items.remove(index))
    }

    /// Moves the note `id`. Returns false if there is no such note.
    pub fn move_to(&mut self, id: u64, position: Point) -> bool {
        match self.items.iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.position = Offset::new(position.x, position.y);
                true
            }
            None => false,
        }
    }

    /// Returns the notes in insertion order.
    pub fn items(&self) -> &[Annotation] {
        &self.items
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no notes.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns one label mark per note, above every chart layer.
    pub fn marks(&self, theme: &Theme) -> Vec<Mark> {
        self.items
            .iter()
            .map(|a| {
                let anchor = Point::new(a.position.x, a.position.y);
                Mark::new(
                    z_order::ANNOTATIONS,
                    Primitive::Label(Label::new(anchor, a.text.clone(), theme.text)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn add_trims_and_rejects_blank_text() {
        let mut notes = Annotations::new();
        assert_eq!(notes.add("   ", Point::ZERO), None);
        assert_eq!(notes.add("  peak  ", Point::ZERO), Some(0));
        assert_eq!(notes.add("dip", Point::new(5.0, 6.0)), Some(1));
        assert_eq!(notes.items()[0].text, "peak");
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut notes = Annotations::new();
        let a = notes.add("a", Point::ZERO).unwrap();
        assert_eq!(notes.remove(a).map(|n| n.text), Some("a".into()));
        assert!(notes.is_empty());
        assert_eq!(notes.add("b", Point::ZERO), Some(1));
        assert!(notes.remove(a).is_none());
    }

    #[test]
    fn moved_notes_render_at_their_new_position() {
        let mut notes = Annotations::new();
        let id = notes.add("note", Point::ZERO).unwrap();
        assert!(notes.move_to(id, Point::new(40.0, 20.0)));
        assert!(!notes.move_to(99, Point::ZERO));
        let marks = notes.marks(&Theme::light());
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].z_index, z_order::ANNOTATIONS);
        let Primitive::Label(label) = &marks[0].primitive else {
            panic!("annotations render as labels");
        };
        assert_eq!(label.anchor, Point::new(40.0, 20.0));
    }

    #[test]
    fn annotations_serialize() {
        let mut notes = Annotations::new();
        notes.add("x", Point::new(1.0, 2.0));
        let json = serde_json::to_string(&notes).unwrap();
        assert!(json.contains("\"nextId\":1"));
        let back: Annotations = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notes);
    }
}
