//! Actions and the two-state machine that drives them

use crate::behavior::interaction::Interaction;
use crate::core::error::BehaviorError;
use crate::entity::GameObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An effect an actor applies to its chosen targets
///
/// `start` runs once when targets first qualify, `apply` runs on every tick
/// with qualifying targets, and `stop` runs on every tick without them
/// (receiving the unfiltered target list). The default `start` and `stop`
/// do nothing beyond the state transition made by [`ActionSlot`].
pub trait Action: fmt::Debug {
    fn start(
        &mut self,
        _actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        Ok(())
    }

    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError>;

    fn stop(
        &mut self,
        _actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action>;
}

impl Clone for Box<dyn Action> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionState {
    #[default]
    Stopped,
    Started,
}

/// An action together with its started/stopped state
///
/// | state   | targets? | calls        | next    |
/// |---------|----------|--------------|---------|
/// | Stopped | yes      | start, apply | Started |
/// | Started | yes      | apply        | Started |
/// | any     | no       | stop         | Stopped |
#[derive(Debug)]
pub struct ActionSlot {
    action: Box<dyn Action>,
    state: ActionState,
}

impl ActionSlot {
    pub fn new(action: Box<dyn Action>) -> Self {
        Self { action, state: ActionState::Stopped }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == ActionState::Started
    }

    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }

    /// Targets qualify. A failing `start` leaves the slot stopped.
    pub fn engage(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if self.state == ActionState::Stopped {
            self.action.start(actor, targets, interaction)?;
            self.state = ActionState::Started;
        }
        self.action.apply(actor, targets, interaction)
    }

    /// No target qualifies. Fires on every such tick, not only on the edge.
    pub fn disengage(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        self.state = ActionState::Stopped;
        self.action.stop(actor, targets, interaction)
    }
}

impl Clone for ActionSlot {
    /// Copies start stopped
    fn clone(&self) -> Self {
        Self::new(self.action.box_clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_start: bool,
    }

    impl Action for Recorder {
        fn start(
            &mut self,
            _actor: &mut GameObject,
            _targets: &mut [&mut GameObject],
            _interaction: &mut Interaction,
        ) -> Result<(), BehaviorError> {
            self.calls.borrow_mut().push("start");
            if self.fail_start {
                return Err(BehaviorError::action("recorder", "refused to start"));
            }
            Ok(())
        }

        fn apply(
            &mut self,
            _actor: &mut GameObject,
            _targets: &mut [&mut GameObject],
            _interaction: &mut Interaction,
        ) -> Result<(), BehaviorError> {
            self.calls.borrow_mut().push("apply");
            Ok(())
        }

        fn stop(
            &mut self,
            _actor: &mut GameObject,
            _targets: &mut [&mut GameObject],
            _interaction: &mut Interaction,
        ) -> Result<(), BehaviorError> {
            self.calls.borrow_mut().push("stop");
            Ok(())
        }

        fn box_clone(&self) -> Box<dyn Action> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_transition_table() {
        let recorder = Recorder::default();
        let calls = recorder.calls.clone();
        let mut slot = ActionSlot::new(Box::new(recorder));
        let mut actor = GameObject::new();
        let mut target = GameObject::new();
        let mut interaction = Interaction::new(0.1);

        slot.engage(&mut actor, &mut [&mut target], &mut interaction).unwrap();
        assert!(slot.is_started());
        slot.engage(&mut actor, &mut [&mut target], &mut interaction).unwrap();
        slot.disengage(&mut actor, &mut [], &mut interaction).unwrap();
        assert_eq!(slot.state(), ActionState::Stopped);
        slot.disengage(&mut actor, &mut [], &mut interaction).unwrap();

        assert_eq!(*calls.borrow(), vec!["start", "apply", "apply", "stop", "stop"]);
    }

    #[test]
    fn test_failed_start_stays_stopped() {
        let recorder = Recorder { fail_start: true, ..Recorder::default() };
        let calls = recorder.calls.clone();
        let mut slot = ActionSlot::new(Box::new(recorder));
        let mut actor = GameObject::new();
        let mut target = GameObject::new();
        let mut interaction = Interaction::new(0.1);

        let result = slot.engage(&mut actor, &mut [&mut target], &mut interaction);
        assert!(result.is_err());
        assert!(!slot.is_started());
        assert_eq!(*calls.borrow(), vec!["start"]);
    }

    #[test]
    fn test_clone_starts_stopped() {
        let mut slot = ActionSlot::new(Box::new(Recorder::default()));
        let mut actor = GameObject::new();
        let mut target = GameObject::new();
        slot.engage(&mut actor, &mut [&mut target], &mut Interaction::new(0.1)).unwrap();
        assert!(slot.is_started());
        assert!(!slot.clone().is_started());
    }
}
