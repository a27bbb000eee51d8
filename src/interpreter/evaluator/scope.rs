use std::collections::HashMap;

use crate::interpreter::value::core::{DataType, Value};

/// Maximum number of nested user-defined calls.
///
/// Each call recurses through the evaluator, so this bounds native stack use.
/// The `skim` binary runs programs on a thread of [`INTERPRETER_STACK_SIZE`]
/// bytes, which fits this many frames with room to spare in debug builds.
pub const MAX_CALL_DEPTH: usize = 1000;

/// Native stack size for a thread that runs programs up to
/// [`MAX_CALL_DEPTH`] nested calls.
pub const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Handle to a variable slot in the [`Scopes`] arena.
///
/// Two names bound to the same handle alias each other: a write through one
/// is visible through the other. This is how reference parameters work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// A mutable cell holding one value and the type it was declared with.
///
/// The value always has the declared type; writes are coerced on the way in.
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value:     Value,
    data_type: DataType,
}

/// A name bound in a block level.
///
/// Only the binding that created a slot owns it. Reference parameters borrow
/// the caller's slot and leave it alone when their frame is popped.
#[derive(Debug, Clone, Copy)]
struct Binding {
    slot:  SlotId,
    owned: bool,
}

/// The block levels of one call frame, innermost last.
#[derive(Debug, Clone)]
struct Frame {
    levels: Vec<HashMap<String, Binding>>,
}

impl Frame {
    fn new() -> Self {
        Self { levels: vec![HashMap::new()] }
    }

    fn lookup(&self, name: &str) -> Option<SlotId> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| level.get(name))
            .map(|binding| binding.slot)
    }
}

/// Variable storage: a slot arena plus the global frame and the call stack.
///
/// Lookup searches the current frame from its innermost block outward. Inside
/// a function it then falls back to the global frame's outermost level only;
/// a function never sees its caller's locals or variables declared inside
/// top-level blocks.
#[derive(Debug, Clone)]
pub struct Scopes {
    slots:  Vec<Option<Slot>>,
    free:   Vec<usize>,
    global: Frame,
    calls:  Vec<Frame>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// Creates storage holding only the empty global level.
    #[must_use]
    pub fn new() -> Self {
        Self { slots:  Vec::new(),
               free:   Vec::new(),
               global: Frame::new(),
               calls:  Vec::new(), }
    }

    fn current_frame(&self) -> &Frame {
        self.calls.last().unwrap_or(&self.global)
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.calls.last_mut().unwrap_or(&mut self.global)
    }

    /// Returns the number of active function calls.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.calls.len()
    }

    /// Opens a block level in the current frame.
    pub fn enter_block(&mut self) {
        self.current_frame_mut().levels.push(HashMap::new());
    }

    /// Closes the innermost block level and frees the slots it owns.
    ///
    /// The outermost level of a frame is never removed.
    pub fn exit_block(&mut self) {
        let frame = self.current_frame_mut();
        if frame.levels.len() > 1
           && let Some(level) = frame.levels.pop()
        {
            self.release(level);
        }
    }

    /// Starts a function call with a fresh frame.
    pub fn push_frame(&mut self) {
        self.calls.push(Frame::new());
    }

    /// Ends the current function call and frees every slot its frame owns.
    pub fn pop_frame(&mut self) {
        if let Some(frame) = self.calls.pop() {
            for level in frame.levels {
                self.release(level);
            }
        }
    }

    fn release(&mut self, level: HashMap<String, Binding>) {
        for binding in level.into_values().filter(|binding| binding.owned) {
            self.slots[binding.slot.0] = None;
            self.free.push(binding.slot.0);
        }
    }

    /// Creates a variable in the innermost level of the current frame.
    ///
    /// The value is coerced to `data_type` before it is stored.
    ///
    /// # Returns
    /// The new slot, or `None` if the name already exists in that level.
    pub fn declare(&mut self, name: &str, value: Value, data_type: DataType) -> Option<SlotId> {
        if self.declared_in_current_level(name) {
            return None;
        }

        let slot = Slot { value: value.into_type(data_type),
                          data_type };
        let id = if let Some(index) = self.free.pop() {
            self.slots[index] = Some(slot);
            SlotId(index)
        } else {
            self.slots.push(Some(slot));
            SlotId(self.slots.len() - 1)
        };

        self.bind(name, Binding { slot:  id,
                                  owned: true, });
        Some(id)
    }

    /// Binds `name` to an existing slot without taking ownership of it.
    ///
    /// # Returns
    /// `false` if the name already exists in the innermost level.
    pub fn bind_reference(&mut self, name: &str, slot: SlotId) -> bool {
        if self.declared_in_current_level(name) {
            return false;
        }
        self.bind(name, Binding { slot, owned: false });
        true
    }

    fn declared_in_current_level(&self, name: &str) -> bool {
        self.current_frame()
            .levels
            .last()
            .is_some_and(|level| level.contains_key(name))
    }

    fn bind(&mut self, name: &str, binding: Binding) {
        if let Some(level) = self.current_frame_mut().levels.last_mut() {
            level.insert(name.to_string(), binding);
        }
    }

    /// Resolves a name to its slot.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        if self.calls.is_empty() {
            return self.global.lookup(name);
        }

        self.current_frame().lookup(name).or_else(|| {
                                              self.global
                                                  .levels
                                                  .first()
                                                  .and_then(|level| level.get(name))
                                                  .map(|binding| binding.slot)
                                          })
    }

    /// Returns the value stored in a slot.
    #[must_use]
    pub fn value(&self, id: SlotId) -> Option<&Value> {
        self.slot(id).map(|slot| &slot.value)
    }

    /// Returns the declared type of a slot.
    #[must_use]
    pub fn data_type(&self, id: SlotId) -> Option<DataType> {
        self.slot(id).map(|slot| slot.data_type)
    }

    /// Writes through a slot, coercing the value to the slot's declared type.
    ///
    /// The slot itself is kept, so every name bound to it sees the new value.
    pub fn assign(&mut self, id: SlotId, value: Value) {
        if let Some(Some(slot)) = self.slots.get_mut(id.0) {
            slot.value = value.into_type(slot.data_type);
        }
    }

    fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Returns the number of live slots.
    #[must_use]
    pub fn live_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_values_are_coerced() {
        let mut scopes = Scopes::new();
        let id = scopes.declare("x", Value::Float(2.9), DataType::Int).unwrap();
        assert_eq!(scopes.value(id), Some(&Value::Int(2)));

        scopes.assign(id, Value::from("12"));
        assert_eq!(scopes.value(id), Some(&Value::Int(12)));
        assert_eq!(scopes.data_type(id), Some(DataType::Int));
    }

    #[test]
    fn redeclaring_in_same_level_fails() {
        let mut scopes = Scopes::new();
        scopes.declare("x", Value::Int(1), DataType::Int).unwrap();
        assert!(scopes.declare("x", Value::Int(2), DataType::Int).is_none());

        scopes.enter_block();
        assert!(scopes.declare("x", Value::Int(3), DataType::Int).is_some());
    }

    #[test]
    fn block_exit_drops_its_variables() {
        let mut scopes = Scopes::new();
        let outer = scopes.declare("x", Value::Int(1), DataType::Int).unwrap();
        scopes.enter_block();
        scopes.declare("x", Value::Int(2), DataType::Int).unwrap();
        scopes.declare("y", Value::Int(3), DataType::Int).unwrap();
        assert_eq!(scopes.value(scopes.lookup("x").unwrap()), Some(&Value::Int(2)));

        scopes.exit_block();
        assert_eq!(scopes.lookup("x"), Some(outer));
        assert_eq!(scopes.lookup("y"), None);
        assert_eq!(scopes.live_slots(), 1);
    }

    #[test]
    fn functions_see_only_outermost_globals() {
        let mut scopes = Scopes::new();
        scopes.declare("global", Value::Int(1), DataType::Int).unwrap();
        scopes.enter_block();
        scopes.declare("block_local", Value::Int(2), DataType::Int).unwrap();

        scopes.push_frame();
        assert!(scopes.lookup("global").is_some());
        assert_eq!(scopes.lookup("block_local"), None);
        scopes.pop_frame();

        assert!(scopes.lookup("block_local").is_some());
    }

    #[test]
    fn callers_locals_are_invisible() {
        let mut scopes = Scopes::new();
        scopes.push_frame();
        scopes.declare("caller_local", Value::Int(1), DataType::Int).unwrap();
        scopes.push_frame();
        assert_eq!(scopes.lookup("caller_local"), None);
        scopes.pop_frame();
        assert!(scopes.lookup("caller_local").is_some());
    }

    #[test]
    fn references_alias_and_survive_frame_pop() {
        let mut scopes = Scopes::new();
        let x = scopes.declare("x", Value::Int(5), DataType::Int).unwrap();

        scopes.push_frame();
        assert!(scopes.bind_reference("n", x));
        let n = scopes.lookup("n").unwrap();
        let next = scopes.value(n).unwrap().as_int() + 1;
        scopes.assign(n, Value::Int(next));
        scopes.pop_frame();

        assert_eq!(scopes.value(x), Some(&Value::Int(6)));
        assert_eq!(scopes.live_slots(), 1);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut scopes = Scopes::new();
        scopes.enter_block();
        let first = scopes.declare("a", Value::Int(1), DataType::Int).unwrap();
        scopes.exit_block();

        let second = scopes.declare("b", Value::Int(2), DataType::Int).unwrap();
        assert_eq!(first, second);
        assert_eq!(scopes.value(second), Some(&Value::Int(2)));
    }

    #[test]
    fn global_level_is_never_popped() {
        let mut scopes = Scopes::new();
        scopes.declare("x", Value::Bool(true), DataType::Bool).unwrap();
        scopes.exit_block();
        assert!(scopes.lookup("x").is_some());
    }
}
