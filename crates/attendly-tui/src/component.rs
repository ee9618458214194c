//! Component trait — the building block for every screen.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use attendly_api::DirectoryClient;

use crate::action::Action;

/// Every screen implements Component.
///
/// Lifecycle: `init` → (`handle_key_event` | `update` | `render`)*.
/// Remote work happens in tasks the component spawns itself; results come
/// back through `update` as actions carrying a generation token.
pub trait Component: Send {
    /// Called once when the component is mounted. Receives the action
    /// sender for dispatching and the shared API client for spawned tasks.
    fn init(&mut self, action_tx: UnboundedSender<Action>, client: Arc<DirectoryClient>)
    -> Result<()>;

    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Set focus state.
    fn set_focused(&mut self, _focused: bool) {}

    /// Whether a modal/dialog on this screen currently captures input
    /// (suppresses global keybindings except Ctrl+C).
    fn captures_input(&self) -> bool {
        false
    }
}
