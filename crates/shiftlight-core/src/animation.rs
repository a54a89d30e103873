//! Animation sequence
//!
//! An [`Animation`] is the ordered list of frames that gets programmed into
//! the device. Each entry keeps the line it was authored from, so it can be
//! re-resolved later against a different [`VariableTable`].
//!
//! Mutations notify every subscribed observer:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use shiftlight_core::{Animation, AnimationEvent};
//!
//! let seen = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&seen);
//!
//! let mut animation = Animation::new();
//! animation.subscribe(Box::new(move |_event: &AnimationEvent| *counter.borrow_mut() += 1));
//! animation.append("[1],0,1000,0,0,0,0,0,0,0", None)?;
//! animation.clear();
//! assert_eq!(*seen.borrow(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core::fmt;

use crate::error::{AnimationError, DecodeError};
use crate::frame::Frame;
use crate::variables::VariableTable;

/// Maximum number of frames an animation may hold
pub const MAX_FRAMES: usize = 80;

/// Change notification emitted by [`Animation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A frame was appended at `index`
    FrameAppended {
        /// The appended frame
        frame: Frame,
        /// Its position
        index: usize,
    },
    /// The frame at `index` was removed
    FrameRemoved {
        /// The removed frame
        frame: Frame,
        /// Its former position
        index: usize,
    },
    /// A non-empty animation was cleared
    SequenceCleared,
}

/// Observer callback
pub type Observer = Box<dyn FnMut(&AnimationEvent)>;

/// One frame together with the line it was authored as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    frame: Frame,
    source: String,
}

impl Entry {
    /// Decoded frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Line as authored, possibly containing expressions
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Decode the authored line again against `vars`
    pub fn resolve(&self, vars: Option<&VariableTable>) -> Result<Frame, DecodeError> {
        Frame::decode(&self.source, vars)
    }
}

/// Ordered, bounded sequence of frames
#[derive(Default)]
pub struct Animation {
    entries: Vec<Entry>,
    observers: Vec<Observer>,
}

impl Animation {
    /// Create an empty animation
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for change events
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Decode `line` and append it
    ///
    /// Fails with [`AnimationError::CapacityExceeded`] before decoding if the
    /// animation is full. On any error the animation is unchanged.
    pub fn append(
        &mut self,
        line: &str,
        vars: Option<&VariableTable>,
    ) -> Result<usize, AnimationError> {
        if self.entries.len() >= MAX_FRAMES {
            return Err(AnimationError::CapacityExceeded(MAX_FRAMES));
        }
        let frame = Frame::decode(line, vars)?;
        Ok(self.push(Entry {
            frame,
            source: line.trim().to_string(),
        }))
    }

    /// Append an already decoded frame
    ///
    /// Its canonical encoding is kept as the source line.
    pub fn append_frame(&mut self, frame: Frame) -> Result<usize, AnimationError> {
        if self.entries.len() >= MAX_FRAMES {
            return Err(AnimationError::CapacityExceeded(MAX_FRAMES));
        }
        let source = frame.encode();
        Ok(self.push(Entry { frame, source }))
    }

    fn push(&mut self, entry: Entry) -> usize {
        let index = self.entries.len();
        log::trace!("animation: appended frame {}: {}", index, entry.source);
        let event = AnimationEvent::FrameAppended {
            frame: entry.frame.clone(),
            index,
        };
        self.entries.push(entry);
        self.notify(&event);
        index
    }

    /// Remove the first frame structurally equal to `frame`
    ///
    /// Returns the index it was removed from, or `None` if no frame matched.
    pub fn remove_first_match(&mut self, frame: &Frame) -> Option<usize> {
        let index = self.entries.iter().position(|e| &e.frame == frame)?;
        Some(self.remove_at(index))
    }

    /// Remove the first entry authored as `line`, or whose frame equals `line` decoded
    pub fn remove_line(
        &mut self,
        line: &str,
        vars: Option<&VariableTable>,
    ) -> Result<Option<usize>, DecodeError> {
        let line = line.trim();
        if let Some(index) = self.entries.iter().position(|e| e.source == line) {
            return Ok(Some(self.remove_at(index)));
        }
        let frame = Frame::decode(line, vars)?;
        Ok(self.remove_first_match(&frame))
    }

    fn remove_at(&mut self, index: usize) -> usize {
        let entry = self.entries.remove(index);
        log::trace!("animation: removed frame {}: {}", index, entry.source);
        self.notify(&AnimationEvent::FrameRemoved {
            frame: entry.frame,
            index,
        });
        index
    }

    /// Remove every frame
    ///
    /// Emits [`AnimationEvent::SequenceCleared`] only if something was removed.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.notify(&AnimationEvent::SequenceCleared);
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the animation has no frames
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether another frame can be appended
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_FRAMES
    }

    /// Entries in order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Frames in order
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.entries.iter().map(|e| &e.frame)
    }

    fn notify(&mut self, event: &AnimationEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const LINE: &str = "[1,2,4-6,8],1000,5000,0,0,0,255,255,255,0";

    fn recording(animation: &mut Animation) -> Rc<RefCell<Vec<AnimationEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        animation.subscribe(Box::new(move |e: &AnimationEvent| {
            sink.borrow_mut().push(e.clone())
        }));
        events
    }

    #[test]
    fn test_append_emits_event() {
        let mut animation = Animation::new();
        let events = recording(&mut animation);

        assert_eq!(animation.append(LINE, None), Ok(0));
        assert_eq!(animation.len(), 1);
        assert_eq!(
            events.borrow().as_slice(),
            &[AnimationEvent::FrameAppended {
                frame: Frame::decode(LINE, None).unwrap(),
                index: 0,
            }]
        );
    }

    #[test]
    fn test_append_invalid_line_leaves_sequence_unchanged() {
        let mut animation = Animation::new();
        let events = recording(&mut animation);

        assert!(matches!(
            animation.append("[1],9,1,0,0,0,0,0,0,0", None),
            Err(AnimationError::Decode(DecodeError::RpmOrderViolation { .. }))
        ));
        assert!(animation.is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut animation = Animation::new();
        for i in 0..MAX_FRAMES {
            assert_eq!(animation.append(LINE, None), Ok(i));
        }
        assert!(animation.is_full());
        assert_eq!(
            animation.append(LINE, None),
            Err(AnimationError::CapacityExceeded(MAX_FRAMES))
        );
        assert_eq!(animation.len(), MAX_FRAMES);
    }

    #[test]
    fn test_capacity_checked_before_decode() {
        let mut animation = Animation::new();
        for _ in 0..MAX_FRAMES {
            animation.append(LINE, None).unwrap();
        }
        assert_eq!(
            animation.append("garbage", None),
            Err(AnimationError::CapacityExceeded(MAX_FRAMES))
        );
    }

    #[test]
    fn test_remove_first_match() {
        let mut animation = Animation::new();
        animation.append("[1],0,0,0,0,0,0,0,0,0", None).unwrap();
        animation.append(LINE, None).unwrap();
        animation.append(LINE, None).unwrap();
        let events = recording(&mut animation);

        let target = Frame::decode("[8,6,5,4,2,1],1000,5000,0,0,0,255,255,255,0,0", None).unwrap();
        assert_eq!(animation.remove_first_match(&target), Some(1));
        assert_eq!(animation.len(), 2);
        assert_eq!(
            events.borrow().as_slice(),
            &[AnimationEvent::FrameRemoved {
                frame: target.clone(),
                index: 1
            }]
        );

        let missing = Frame::decode("[13],0,0,0,0,0,0,0,0,0", None).unwrap();
        assert_eq!(animation.remove_first_match(&missing), None);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_remove_line_by_source() {
        let vars = VariableTable::parse("rpm=3000").unwrap();
        let mut animation = Animation::new();
        animation.append("[1],0,rpm,0,0,0,0,0,0,0", Some(&vars)).unwrap();

        // Matches the authored text without needing the variables
        assert_eq!(animation.remove_line("[1],0,rpm,0,0,0,0,0,0,0", None), Ok(Some(0)));
        assert!(animation.is_empty());

        animation.append("[1],0,rpm,0,0,0,0,0,0,0", Some(&vars)).unwrap();
        assert_eq!(
            animation.remove_line("[1],0,3000,0,0,0,0,0,0,0,0", None),
            Ok(Some(0))
        );
        assert!(animation.remove_line("nonsense", None).is_err());
    }

    #[test]
    fn test_clear() {
        let mut animation = Animation::new();
        let events = recording(&mut animation);

        animation.clear();
        assert!(events.borrow().is_empty());

        animation.append(LINE, None).unwrap();
        animation.clear();
        assert!(animation.is_empty());
        assert_eq!(events.borrow().last(), Some(&AnimationEvent::SequenceCleared));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_entry_resolve_uses_new_variables() {
        let mut animation = Animation::new();
        let vars = VariableTable::parse("top=4000").unwrap();
        animation.append("[1],0,top,0,0,0,0,0,0,0", Some(&vars)).unwrap();

        let entry = &animation.entries()[0];
        assert_eq!(entry.frame().end_rpm(), 4000);
        let vars = VariableTable::parse("top=5000").unwrap();
        assert_eq!(entry.resolve(Some(&vars)).unwrap().end_rpm(), 5000);
        assert!(entry.resolve(None).is_err());
    }

    #[test]
    fn test_append_frame() {
        let mut animation = Animation::new();
        let frame: Frame = LINE.parse().unwrap();
        animation.append_frame(frame.clone()).unwrap();
        assert_eq!(animation.entries()[0].source(), frame.encode());
    }
}
