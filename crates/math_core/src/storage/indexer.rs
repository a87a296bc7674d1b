use crate::set::MathSet;
use crate::traits::Element;
use std::collections::HashMap;

/// A fixed numbering of the members of a set, used as matrix row/column indices.
#[derive(Debug, Clone)]
pub struct Indexer<E: Element> {
    elements: Vec<E>,
    positions: HashMap<E, usize>,
}

impl<E: Element> Indexer<E> {
    pub fn new(set: &MathSet<E>) -> Self {
        let elements: Vec<E> = set.iter().cloned().collect();
        let positions = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.clone(), i))
            .collect();
        Self {
            elements,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn position(&self, element: &E) -> Option<usize> {
        self.positions.get(element).copied()
    }

    pub fn get(&self, index: usize) -> &E {
        &self.elements[index]
    }
}
