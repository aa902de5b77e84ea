// SPDX-License-Identifier: Apache-2.0

//! Event sink that folds parser events into a [`Value`] tree.

use crate::{ContextError, Map, ParseError, Value};

/// Receiver of the parser's events, one call per JSON token.
///
/// Implementations decide which sequences are legal; returning an error
/// aborts the parse.
pub trait JsonHandler {
    fn begin_object(&mut self) -> Result<(), ParseError>;
    fn end_object(&mut self) -> Result<(), ParseError>;
    fn begin_array(&mut self) -> Result<(), ParseError>;
    fn end_array(&mut self) -> Result<(), ParseError>;
    /// A complete scalar: string, number, boolean or null.
    fn append_value(&mut self, value: Value) -> Result<(), ParseError>;
    /// `:`
    fn key_value_separator(&mut self) -> Result<(), ParseError>;
    /// `,`
    fn array_separator(&mut self) -> Result<(), ParseError>;

    /// Insignificant whitespace between tokens.
    fn whitespace(&mut self, _c: char) -> Result<(), ParseError> {
        Ok(())
    }

    /// The source is exhausted and every container is closed.
    fn end_of_stream(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
}

impl<H: JsonHandler + ?Sized> JsonHandler for &mut H {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        (**self).begin_object()
    }
    fn end_object(&mut self) -> Result<(), ParseError> {
        (**self).end_object()
    }
    fn begin_array(&mut self) -> Result<(), ParseError> {
        (**self).begin_array()
    }
    fn end_array(&mut self) -> Result<(), ParseError> {
        (**self).end_array()
    }
    fn append_value(&mut self, value: Value) -> Result<(), ParseError> {
        (**self).append_value(value)
    }
    fn key_value_separator(&mut self) -> Result<(), ParseError> {
        (**self).key_value_separator()
    }
    fn array_separator(&mut self) -> Result<(), ParseError> {
        (**self).array_separator()
    }
    fn whitespace(&mut self, c: char) -> Result<(), ParseError> {
        (**self).whitespace(c)
    }
    fn end_of_stream(&mut self) -> Result<(), ParseError> {
        (**self).end_of_stream()
    }
}

static NULL: Value = Value::Null;

/// Index into the decoder's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

/// An open construct and what it has collected so far.
#[derive(Debug)]
enum Slot {
    Array(Vec<Value>),
    Object(Map),
    /// A key waiting for its value.
    PendingKey(Value),
}

impl Slot {
    fn into_value(self) -> Value {
        match self {
            Slot::Array(items) => Value::Array(items),
            Slot::Object(map) => Value::Object(map),
            Slot::PendingKey(key) => key,
        }
    }
}

#[derive(Debug)]
struct Node {
    slot: Slot,
    parent: Option<NodeId>,
}

/// Arena of open nodes. Released slots are reused by the next allocation.
#[derive(Debug, Default)]
struct NodeArena {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
}

impl NodeArena {
    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                if let Some(entry) = self.nodes.get_mut(index) {
                    *entry = Some(node);
                }
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get_mut(id.0).and_then(Option::take)?;
        self.free.push(id.0);
        Some(node)
    }

    fn open_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

/// Builds the value tree from parser events.
///
/// Open containers form a parent-linked chain from the root to the current
/// node. Closing a container moves its value into whatever encloses it
/// through the same placement logic used for scalars.
///
/// ```
/// use streamjson::{Decoder, JsonHandler, Value};
///
/// let mut decoder = Decoder::new();
/// decoder.begin_array().unwrap();
/// decoder.append_value(Value::from("one")).unwrap();
/// decoder.end_array().unwrap();
/// decoder.end_of_stream().unwrap();
/// assert_eq!(decoder.into_result().unwrap(), Value::Array(vec![Value::from("one")]));
/// ```
#[derive(Debug, Default)]
pub struct Decoder {
    arena: NodeArena,
    current: Option<NodeId>,
    result: Option<Value>,
    finished: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded document, available once `end_of_stream` has fired.
    pub fn result(&self) -> Option<&Value> {
        if self.finished {
            self.result.as_ref().or(Some(&NULL))
        } else {
            None
        }
    }

    /// Take the decoded document. A stream without any value decodes to
    /// `null`.
    pub fn into_result(self) -> Result<Value, ParseError> {
        if !self.finished {
            return Err(ParseError::IncompleteDocument);
        }
        Ok(self.result.unwrap_or_default())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of containers (and pending keys) still open.
    pub fn open_nodes(&self) -> usize {
        self.arena.open_count()
    }

    fn current_slot(&self) -> Option<&Slot> {
        self.current
            .and_then(|id| self.arena.get(id))
            .map(|node| &node.slot)
    }

    fn push_child(&mut self, slot: Slot) {
        let parent = self.current;
        self.current = Some(self.arena.alloc(Node { slot, parent }));
    }

    /// Release the current node and fold its value into the parent.
    fn close(&mut self) -> Result<(), ParseError> {
        let Some(id) = self.current else {
            return Ok(());
        };
        if let Some(node) = self.arena.release(id) {
            self.current = node.parent;
            self.append_value(node.slot.into_value())?;
        }
        Ok(())
    }
}

impl JsonHandler for Decoder {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        self.push_child(Slot::Object(Map::new()));
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), ParseError> {
        if !matches!(self.current_slot(), Some(Slot::Object(_))) {
            return Err(ContextError::NoObjectToEnd.into());
        }
        self.close()
    }

    fn begin_array(&mut self) -> Result<(), ParseError> {
        self.push_child(Slot::Array(Vec::new()));
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), ParseError> {
        if !matches!(self.current_slot(), Some(Slot::Array(_))) {
            return Err(ContextError::NoArrayToEnd.into());
        }
        self.close()
    }

    fn append_value(&mut self, value: Value) -> Result<(), ParseError> {
        let Some(id) = self.current else {
            self.result = Some(value);
            return Ok(());
        };
        let Some(node) = self.arena.get_mut(id) else {
            self.result = Some(value);
            return Ok(());
        };

        match &mut node.slot {
            Slot::Array(items) => items.push(value),
            // Any value is accepted in key position; it is turned into text on insert
            Slot::Object(_) => self.push_child(Slot::PendingKey(value)),
            Slot::PendingKey(_) => {
                let Some(Node {
                    slot: Slot::PendingKey(key),
                    parent,
                }) = self.arena.release(id)
                else {
                    return Ok(());
                };
                self.current = parent;
                if let Some(Node {
                    slot: Slot::Object(map),
                    ..
                }) = parent.and_then(|p| self.arena.get_mut(p))
                {
                    map.insert(key.into_key(), value);
                }
            }
        }
        Ok(())
    }

    fn key_value_separator(&mut self) -> Result<(), ParseError> {
        match self.current_slot() {
            Some(Slot::PendingKey(_)) => Ok(()),
            _ => Err(ContextError::NotInObjectContext.into()),
        }
    }

    fn array_separator(&mut self) -> Result<(), ParseError> {
        match self.current_slot() {
            Some(Slot::Array(_) | Slot::Object(_)) => Ok(()),
            _ => Err(ContextError::NotInContainerContext.into()),
        }
    }

    fn end_of_stream(&mut self) -> Result<(), ParseError> {
        self.finished = true;
        Ok(())
    }
}
