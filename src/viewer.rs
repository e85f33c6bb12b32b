//! Full-screen viewer navigation.
//!
//! A viewer session is a tiny state machine over a list of known length:
//!
//! ```text
//!            open(i)              next / prev (clamped)
//!  Closed ──────────────▶ Viewing(i) ◀──────────────┐
//!    ▲                        │  │                   │
//!    └──────── close ─────────┘  └───────────────────┘
//! ```
//!
//! Moving past either end is a no-op rather than an error, so repeated input
//! at a boundary is idempotent. Once closed, inputs are ignored until the
//! viewer is opened again. Index arguments (`open`, `jump`) outside the list
//! are rejected with [`NavigationError::OutOfRange`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("photo index {index} is out of range ({len} photos)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    Viewing(usize),
}

/// Navigation intent, independent of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerInput {
    Escape,
    Forward,
    Backward,
}

/// Where a pointer activation landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the photo.
    Backdrop,
    /// The left-side navigation control.
    LeftControl,
    /// The right-side navigation control.
    RightControl,
    /// The photo or its details panel.
    Photo,
}

impl ViewerInput {
    /// Map a keyboard key name (`Escape`, `ArrowRight`, `ArrowLeft`).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(ViewerInput::Escape),
            "ArrowRight" => Some(ViewerInput::Forward),
            "ArrowLeft" => Some(ViewerInput::Backward),
            _ => None,
        }
    }

    /// Map a pointer activation. Clicks on the photo itself do nothing.
    pub fn from_pointer(target: PointerTarget) -> Option<Self> {
        match target {
            PointerTarget::Backdrop => Some(ViewerInput::Escape),
            PointerTarget::LeftControl => Some(ViewerInput::Backward),
            PointerTarget::RightControl => Some(ViewerInput::Forward),
            PointerTarget::Photo => None,
        }
    }
}

/// Outcome of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// Already at the end of the list in the input's direction; state unchanged.
    AtBoundary { index: usize, edge: Edge },
    Closed,
    /// The viewer was not open.
    Ignored,
}

/// Which end of the list a clamped move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

/// Snapshot for drawing navigation controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    pub has_next: bool,
    pub has_previous: bool,
    pub current: Option<usize>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    len: usize,
    state: ViewerState,
}

impl Viewer {
    /// A closed viewer over a list of `len` photos.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: ViewerState::Closed,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            ViewerState::Viewing(i) => Some(i),
            ViewerState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, index: usize) -> Result<(), NavigationError> {
        if index < self.len {
            Ok(())
        } else {
            Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Start a session at `index`, replacing any previous position.
    pub fn open(&mut self, index: usize) -> Result<(), NavigationError> {
        self.check(index)?;
        self.state = ViewerState::Viewing(index);
        Ok(())
    }

    pub fn close(&mut self) -> Transition {
        match self.state {
            ViewerState::Viewing(_) => {
                self.state = ViewerState::Closed;
                Transition::Closed
            }
            ViewerState::Closed => Transition::Ignored,
        }
    }

    pub fn next(&mut self) -> Transition {
        match self.state {
            ViewerState::Viewing(i) if i + 1 < self.len => {
                self.state = ViewerState::Viewing(i + 1);
                Transition::Moved { from: i, to: i + 1 }
            }
            ViewerState::Viewing(index) => Transition::AtBoundary {
                index,
                edge: Edge::Last,
            },
            ViewerState::Closed => Transition::Ignored,
        }
    }

    pub fn prev(&mut self) -> Transition {
        match self.state {
            ViewerState::Viewing(i) if i > 0 => {
                self.state = ViewerState::Viewing(i - 1);
                Transition::Moved { from: i, to: i - 1 }
            }
            ViewerState::Viewing(index) => Transition::AtBoundary {
                index,
                edge: Edge::First,
            },
            ViewerState::Closed => Transition::Ignored,
        }
    }

    /// Go straight to `index` while a session is open.
    pub fn jump(&mut self, index: usize) -> Result<Transition, NavigationError> {
        self.check(index)?;
        Ok(match self.state {
            ViewerState::Viewing(from) => {
                self.state = ViewerState::Viewing(index);
                Transition::Moved { from, to: index }
            }
            ViewerState::Closed => Transition::Ignored,
        })
    }

    pub fn handle(&mut self, input: ViewerInput) -> Transition {
        match input {
            ViewerInput::Escape => self.close(),
            ViewerInput::Forward => self.next(),
            ViewerInput::Backward => self.prev(),
        }
    }

    pub fn info(&self) -> NavigationInfo {
        let current = self.current();
        NavigationInfo {
            has_next: current.is_some_and(|i| i + 1 < self.len),
            has_previous: current.is_some_and(|i| i > 0),
            current,
            total: self.len,
        }
    }

    /// Move an open session to `index` without reporting a transition.
    /// Used when the underlying list is reordered.
    pub(crate) fn reposition(&mut self, index: usize) {
        if self.is_open() && index < self.len {
            self.state = ViewerState::Viewing(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewing(len: usize, index: usize) -> Viewer {
        let mut v = Viewer::new(len);
        v.open(index).unwrap();
        v
    }

    #[test]
    fn starts_closed() {
        let v = Viewer::new(3);
        assert_eq!(v.state(), ViewerState::Closed);
        assert_eq!(v.current(), None);
    }

    #[test]
    fn next_and_prev_move_one_step() {
        let mut v = viewing(3, 1);
        assert_eq!(v.next(), Transition::Moved { from: 1, to: 2 });
        assert_eq!(v.prev(), Transition::Moved { from: 2, to: 1 });
        assert_eq!(v.prev(), Transition::Moved { from: 1, to: 0 });
    }

    #[test]
    fn prev_at_first_is_clamped() {
        let mut v = viewing(3, 0);
        for _ in 0..5 {
            assert_eq!(
                v.prev(),
                Transition::AtBoundary {
                    index: 0,
                    edge: Edge::First,
                }
            );
        }
        assert_eq!(v.current(), Some(0));
    }

    #[test]
    fn next_at_last_is_clamped() {
        let mut v = viewing(3, 2);
        for _ in 0..5 {
            assert_eq!(
                v.next(),
                Transition::AtBoundary {
                    index: 2,
                    edge: Edge::Last,
                }
            );
        }
        assert_eq!(v.current(), Some(2));
    }

    #[test]
    fn closed_viewer_ignores_input() {
        let mut v = viewing(3, 1);
        assert_eq!(v.close(), Transition::Closed);
        assert_eq!(v.next(), Transition::Ignored);
        assert_eq!(v.prev(), Transition::Ignored);
        assert_eq!(v.close(), Transition::Ignored);
        assert_eq!(v.jump(0), Ok(Transition::Ignored));
        assert_eq!(v.state(), ViewerState::Closed);
    }

    #[test]
    fn reopen_resets_position() {
        let mut v = viewing(5, 4);
        v.close();
        v.open(1).unwrap();
        assert_eq!(v.state(), ViewerState::Viewing(1));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut v = Viewer::new(2);
        assert_eq!(
            v.open(2),
            Err(NavigationError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(v.state(), ViewerState::Closed);

        v.open(0).unwrap();
        assert_eq!(
            v.jump(9),
            Err(NavigationError::OutOfRange { index: 9, len: 2 })
        );
        assert_eq!(v.current(), Some(0));
    }

    #[test]
    fn empty_list_cannot_open() {
        let mut v = Viewer::new(0);
        assert!(v.open(0).is_err());
    }

    #[test]
    fn jump_moves_directly() {
        let mut v = viewing(10, 2);
        assert_eq!(v.jump(7), Ok(Transition::Moved { from: 2, to: 7 }));
        assert_eq!(v.current(), Some(7));
    }

    #[test]
    fn keys_map_to_inputs() {
        assert_eq!(ViewerInput::from_key("Escape"), Some(ViewerInput::Escape));
        assert_eq!(ViewerInput::from_key("ArrowRight"), Some(ViewerInput::Forward));
        assert_eq!(ViewerInput::from_key("ArrowLeft"), Some(ViewerInput::Backward));
        assert_eq!(ViewerInput::from_key("ArrowUp"), None);
    }

    #[test]
    fn pointer_targets_map_to_inputs() {
        assert_eq!(
            ViewerInput::from_pointer(PointerTarget::Backdrop),
            Some(ViewerInput::Escape)
        );
        assert_eq!(
            ViewerInput::from_pointer(PointerTarget::LeftControl),
            Some(ViewerInput::Backward)
        );
        assert_eq!(
            ViewerInput::from_pointer(PointerTarget::RightControl),
            Some(ViewerInput::Forward)
        );
        assert_eq!(ViewerInput::from_pointer(PointerTarget::Photo), None);
    }

    #[test]
    fn handle_dispatches_inputs() {
        let mut v = viewing(2, 0);
        assert_eq!(
            v.handle(ViewerInput::Forward),
            Transition::Moved { from: 0, to: 1 }
        );
        assert_eq!(
            v.handle(ViewerInput::Forward),
            Transition::AtBoundary {
                index: 1,
                edge: Edge::Last,
            }
        );
        assert_eq!(
            v.handle(ViewerInput::Backward),
            Transition::Moved { from: 1, to: 0 }
        );
        assert_eq!(v.handle(ViewerInput::Escape), Transition::Closed);
    }

    #[test]
    fn info_hides_controls_at_the_ends() {
        let mut v = viewing(3, 0);
        let info = v.info();
        assert!(!info.has_previous);
        assert!(info.has_next);
        assert_eq!(info.total, 3);

        v.jump(2).unwrap();
        let info = v.info();
        assert!(info.has_previous);
        assert!(!info.has_next);

        v.close();
        assert_eq!(v.info(), NavigationInfo {
            has_next: false,
            has_previous: false,
            current: None,
            total: 3,
        });
    }
}
