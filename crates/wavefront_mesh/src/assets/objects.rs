//! Object/group tracking
//!
//! Partitions the triangle stream into named [`MeshObject`]s. Each object
//! moves through `Unopened -> Open` and is closed into a [`MeshObject`] by the
//! next `g`/`o` or the end of input; the offset is captured by the first face
//! written after the object was opened.

use super::mesh::MeshObject;

/// Name given to geometry that precedes any `g`/`o` directive
pub const DEFAULT_OBJECT_NAME: &str = "default";

/// State of the object currently being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    /// Opened by a directive, no face yet
    Unopened,
    /// Receiving faces
    Open {
        /// First output element of this object
        offset: usize,
        /// Elements written so far
        count: usize,
    },
}

#[derive(Debug)]
struct TrackedObject {
    name: String,
    material_ref: String,
    smooth: bool,
    state: ObjectState,
}

impl TrackedObject {
    fn new(name: String) -> Self {
        Self {
            name,
            material_ref: String::new(),
            smooth: false,
            state: ObjectState::Unopened,
        }
    }

    /// Freeze the range; objects without faces yield `None`
    fn close(self) -> Option<MeshObject> {
        match self.state {
            ObjectState::Unopened => None,
            ObjectState::Open { offset, count } => Some(MeshObject::new(
                self.name,
                offset,
                count,
                self.material_ref,
                self.smooth,
            )),
        }
    }
}

/// Tracks the open object and collects finished ones in source order
#[derive(Debug)]
pub struct ObjectTracker {
    current: TrackedObject,
    finished: Vec<MeshObject>,
}

impl ObjectTracker {
    /// Start with the implicit leading object
    pub fn new() -> Self {
        Self {
            current: TrackedObject::new(DEFAULT_OBJECT_NAME.to_string()),
            finished: Vec::new(),
        }
    }

    /// Close the current object and open a new one named `name`
    pub fn open(&mut self, name: &str) {
        let previous = std::mem::replace(&mut self.current, TrackedObject::new(name.to_string()));
        self.retire(previous);
    }

    /// `usemtl` on the current object
    pub fn set_material(&mut self, material_ref: &str) {
        self.current.material_ref = material_ref.to_string();
    }

    /// `s` on the current object
    pub fn set_smooth(&mut self, smooth: bool) {
        self.current.smooth = smooth;
    }

    /// Account for `elements` output elements written starting at `output_len`.
    ///
    /// `output_len` is the output length before the face was written.
    pub fn record(&mut self, output_len: usize, elements: usize) {
        self.current.state = match self.current.state {
            ObjectState::Unopened => {
                log::trace!("Object '{}' starts at element {}", self.current.name, output_len);
                ObjectState::Open { offset: output_len, count: elements }
            }
            ObjectState::Open { offset, count } => ObjectState::Open { offset, count: count + elements },
        };
    }

    /// State of the object currently being written
    pub fn state(&self) -> ObjectState {
        self.current.state
    }

    /// Close the last object and return all objects that received faces
    pub fn finish(mut self) -> Vec<MeshObject> {
        let last = std::mem::replace(&mut self.current, TrackedObject::new(String::new()));
        self.retire(last);
        self.finished
    }

    fn retire(&mut self, object: TrackedObject) {
        let name = object.name.clone();
        match object.close() {
            Some(closed) => {
                log::trace!("Object '{}' closed at {}+{}", name, closed.offset(), closed.count());
                self.finished.push(closed);
            }
            None => log::trace!("Dropping object '{}' without faces", name),
        }
    }
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new()
    }
}
