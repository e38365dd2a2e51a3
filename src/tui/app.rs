use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::tui::{Command, Subscription, Theme};

/// The main trait that all TUI apps must implement.
///
/// This follows the Elm architecture:
/// - State: data that represents the app's current state
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands
/// - view: renders the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + Send + 'static {
    /// The app's state type
    type State: Send;

    /// The app's message type
    type Msg: Clone + Send + 'static;

    /// Update the state based on a message and return a command
    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// Render the current state into `area`
    fn view(state: &mut Self::State, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Declare what inputs this app wants to receive
    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Route a raw key before subscriptions are consulted, e.g. while a text
    /// field has focus. Returning `None` falls through to subscriptions.
    fn capture_key(_state: &Self::State, _key: &KeyEvent) -> Option<Self::Msg> {
        None
    }

    /// Return the app's title
    fn title() -> &'static str;

    /// Return optional status text (dynamic, styled based on state)
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
