//! Application state and update logic for the shopchat TUI.

use crate::event::Action;
use crate::ui::chat::screen_layout;
use crate::ui::widgets::TextInputState;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use shopchat_engine::{
    ChatView, ChatWidget, Config, KeyPress, Resolution, ServiceError, Submission, Ticket,
    ViewOptions,
};

/// Lines moved per page scroll.
const PAGE_SCROLL: usize = 10;

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Conversation and draft.
    pub widget: ChatWidget,

    /// Cursor editing for the draft. Mirrored into `widget` after every edit.
    pub input: TextInputState,

    /// Labels for the view tree.
    pub view_options: ViewOptions,

    /// Lines scrolled up from the bottom of the message list. Zero follows new messages.
    pub scroll: usize,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Create a new app from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            widget: ChatWidget::with_greeting(&config.greeting),
            input: TextInputState::new(),
            view_options: ViewOptions::from(config),
            scroll: 0,
            tick: 0,
        }
    }

    /// Create an app with default configuration for testing.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new(&Config::default())
    }

    /// Current view tree.
    pub fn view(&self) -> ChatView {
        self.widget.render(&self.view_options)
    }

    /// Push the input content into the widget's draft.
    pub fn sync_draft(&mut self) {
        self.widget.on_draft_change(self.input.content());
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handle an action. Returns a submission when the action committed the draft.
    pub fn handle_action(&mut self, action: Action) -> Option<Submission> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::Submit => {
                let submission = self.widget.on_key_press(KeyPress::Enter);
                self.after_submit(submission)
            }
            Action::Insert(ch) => {
                self.input.insert(ch);
                self.sync_draft();
                None
            }
            Action::Backspace => {
                self.input.backspace();
                self.sync_draft();
                None
            }
            Action::Delete => {
                self.input.delete();
                self.sync_draft();
                None
            }
            Action::Left => {
                self.input.move_left();
                None
            }
            Action::Right => {
                self.input.move_right();
                None
            }
            Action::Home => {
                self.input.move_home();
                None
            }
            Action::End => {
                self.input.move_end();
                None
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_add(PAGE_SCROLL);
                None
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_sub(PAGE_SCROLL);
                None
            }
            Action::None => None,
        }
    }

    /// Handle a mouse event on a screen of size `area`.
    ///
    /// The wheel scrolls the message list; a left click on the send control
    /// submits the draft.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Option<Submission> {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_action(Action::ScrollUp),
            MouseEventKind::ScrollDown => self.handle_action(Action::ScrollDown),
            MouseEventKind::Down(MouseButton::Left) => {
                let send = screen_layout(&self.view(), area).send;
                if send.contains(Position::new(mouse.column, mouse.row)) {
                    self.submit()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Commit the draft via the send control.
    pub fn submit(&mut self) -> Option<Submission> {
        let submission = self.widget.submit();
        self.after_submit(submission)
    }

    fn after_submit(&mut self, submission: Option<Submission>) -> Option<Submission> {
        if submission.is_some() {
            self.input.clear();
            self.scroll = 0;
        }
        submission
    }

    /// Hand a chat service outcome to the widget.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, ServiceError>,
    ) -> Resolution {
        self.widget.complete(ticket, outcome)
    }

    /// Keep the scroll offset within what the message list can show.
    pub fn clamp_scroll(&mut self, max_scroll: usize) {
        self.scroll = self.scroll.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use shopchat_engine::{Message, FALLBACK_REPLY};

    const SCREEN: Rect = Rect::new(0, 0, 80, 24);

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_action(Action::Insert(ch));
        }
    }

    #[test]
    fn test_new_app_has_greeting() {
        let app = App::new_for_test();
        assert_eq!(app.widget.log().len(), 1);
        assert!(app.input.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typing_updates_widget_draft() {
        let mut app = App::new_for_test();
        type_text(&mut app, "12 pages");
        app.handle_action(Action::Backspace);
        assert_eq!(app.widget.draft(), "12 page");
        assert_eq!(app.input.content(), "12 page");
    }

    #[test]
    fn test_enter_submits_and_clears() {
        let mut app = App::new_for_test();
        type_text(&mut app, " cost? ");

        let submission = app.handle_action(Action::Submit).unwrap();
        assert_eq!(submission.text, " cost? ");
        assert!(app.input.is_empty());
        assert_eq!(app.widget.draft(), "");
        assert_eq!(app.widget.log().last(), Some(&Message::user(" cost? ")));
    }

    #[test]
    fn test_enter_on_blank_draft_keeps_input() {
        let mut app = App::new_for_test();
        type_text(&mut app, "   ");

        assert!(app.handle_action(Action::Submit).is_none());
        assert_eq!(app.input.content(), "   ");
        assert_eq!(app.widget.log().len(), 1);
    }

    #[test]
    fn test_send_control_matches_enter() {
        let mut by_enter = App::new_for_test();
        let mut by_click = App::new_for_test();
        type_text(&mut by_enter, "bind 40 pages");
        type_text(&mut by_click, "bind 40 pages");

        let a = by_enter.handle_action(Action::Submit);
        let b = by_click.submit();

        assert_eq!(a, b);
        assert_eq!(by_enter.widget.log(), by_click.widget.log());
    }

    #[test]
    fn test_complete_failure_shows_fallback() {
        let mut app = App::new_for_test();
        type_text(&mut app, "cost?");
        let submission = app.handle_action(Action::Submit).unwrap();

        let resolution = app.complete(
            submission.ticket,
            Err(ServiceError::Other("connection refused".into())),
        );
        assert_eq!(resolution, Resolution::Fallback);
        assert_eq!(app.widget.log().last(), Some(&Message::bot(FALLBACK_REPLY)));
    }

    #[test]
    fn test_scrolling_and_follow_on_submit() {
        let mut app = App::new_for_test();
        app.handle_action(Action::PageUp);
        app.handle_action(Action::ScrollUp);
        assert_eq!(app.scroll, PAGE_SCROLL + 1);

        app.clamp_scroll(3);
        assert_eq!(app.scroll, 3);

        app.handle_action(Action::PageDown);
        assert_eq!(app.scroll, 0);

        app.scroll = 5;
        type_text(&mut app, "hi");
        app.handle_action(Action::Submit);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_quit_action() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_cursor_keys_do_not_touch_draft() {
        let mut app = App::new_for_test();
        type_text(&mut app, "ab");
        app.handle_action(Action::Left);
        app.handle_action(Action::Home);
        app.handle_action(Action::Insert('x'));
        app.handle_action(Action::End);
        app.handle_action(Action::Right);
        app.handle_action(Action::Left);
        app.handle_action(Action::Delete);
        assert_eq!(app.widget.draft(), "xa");
    }

    #[test]
    fn test_click_on_send_control_submits() {
        let mut app = App::new_for_test();
        type_text(&mut app, "staple 5 copies");

        let send = screen_layout(&app.view(), SCREEN).send;
        let submission = app.handle_mouse(left_click(send.x + 2, send.y + 1), SCREEN);

        assert_eq!(submission.map(|s| s.text).as_deref(), Some("staple 5 copies"));
        assert!(app.input.is_empty());
        assert_eq!(app.widget.log().last(), Some(&Message::user("staple 5 copies")));
    }

    #[test]
    fn test_click_outside_send_control_does_nothing() {
        let mut app = App::new_for_test();
        type_text(&mut app, "staple 5 copies");

        let layout = screen_layout(&app.view(), SCREEN);
        for (column, row) in [
            (layout.input.x + 1, layout.input.y + 1),
            (layout.messages.x + 1, layout.messages.y + 1),
            (layout.send.x + 2, layout.status.y),
        ] {
            assert!(app.handle_mouse(left_click(column, row), SCREEN).is_none());
        }
        assert_eq!(app.input.content(), "staple 5 copies");
        assert_eq!(app.widget.log().len(), 1);
    }

    #[test]
    fn test_click_on_send_with_blank_draft_is_noop() {
        let mut app = App::new_for_test();
        let send = screen_layout(&app.view(), SCREEN).send;
        assert!(app.handle_mouse(left_click(send.x + 1, send.y + 1), SCREEN).is_none());
        assert_eq!(app.widget.log().len(), 1);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = App::new_for_test();
        app.handle_mouse(mouse(MouseEventKind::ScrollUp, 5, 5), SCREEN);
        app.handle_mouse(mouse(MouseEventKind::ScrollUp, 5, 5), SCREEN);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 5), SCREEN);
        assert_eq!(app.scroll, 1);
    }
}
