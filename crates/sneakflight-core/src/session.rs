//! Session mode transitions driven by player input.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::GameWorld;
use crate::map::{Direction, MapId};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Menu,
    MapSelection,
    Playing,
    Paused,
    Win,
    Lost,
}

impl SessionState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Win | Self::Lost)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Menu => "menu",
            Self::MapSelection => "map selection",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Win => "won",
            Self::Lost => "caught",
        };
        f.write_str(label)
    }
}

/// Abstract player input, already decoded from the terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    PauseToggle,
    Menu,
    Quit,
    /// Numeric choice on the menu or map selection screen.
    Select(u8),
    Restart,
    Other,
}

/// Whether the front end should keep running after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Effect of one input, decided before the world is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    ShowInstructions,
    DismissInstructions,
    Goto(SessionState),
    StartMap(MapId),
    Restart,
    MovePlayer(Direction),
    Quit,
}

/// Transition table for `(state, input)`. Unlisted pairs map to [`Action::None`].
#[must_use]
pub fn next_action(state: SessionState, instructions_visible: bool, input: Input) -> Action {
    use SessionState as S;
    match (state, input) {
        (S::Menu, _) if instructions_visible => Action::DismissInstructions,
        (S::Menu, Input::Select(1)) => Action::Goto(S::MapSelection),
        (S::Menu, Input::Select(2)) => Action::ShowInstructions,
        (S::Menu, Input::Select(3) | Input::Quit) => Action::Quit,
        (S::MapSelection, Input::Select(selector)) => {
            MapId::from_selector(selector).map_or(Action::None, Action::StartMap)
        }
        (S::Playing, Input::PauseToggle) => Action::Goto(S::Paused),
        (S::Playing, Input::Quit) => Action::Quit,
        (S::Playing, Input::Move(direction)) => Action::MovePlayer(direction),
        (S::Paused, Input::PauseToggle) => Action::Goto(S::Playing),
        (S::Win | S::Lost, Input::Restart) => Action::Restart,
        (S::MapSelection | S::Playing | S::Paused | S::Win | S::Lost, Input::Menu) => {
            Action::Goto(S::Menu)
        }
        _ => Action::None,
    }
}

impl GameWorld {
    /// Apply one decoded input to the session.
    pub fn apply_input(&mut self, input: Input) -> Flow {
        match next_action(self.session, self.instructions_visible, input) {
            Action::None => {}
            Action::ShowInstructions => self.instructions_visible = true,
            Action::DismissInstructions => self.instructions_visible = false,
            Action::Goto(state) => self.set_session(state),
            Action::StartMap(id) => self.start(id),
            Action::Restart => self.restart(),
            Action::MovePlayer(direction) => {
                let map = self.maps.get(self.current_map);
                self.player.try_move(direction, map);
            }
            Action::Quit => {
                info!(from = %self.session, "quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    pub(crate) fn set_session(&mut self, state: SessionState) {
        if self.session != state {
            info!(from = %self.session, to = %state, "session transition");
            self.session = state;
        }
    }
}
