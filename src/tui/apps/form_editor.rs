//! The questionnaire editor screen.
//!
//! Every edit goes through the history reducer; the screen only keeps cursor
//! and mode state on top of it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::api::{SubmissionError, SubmissionReceipt, Submitter};
use crate::form::{FormAction, HistoryState, MoveGesture, OptionsPatch, reorder_action};
use crate::model::{Question, QuestionId, Questionary};
use crate::tui::widgets::{ListState, TextInputState};
use crate::tui::{App, Command, Subscription, Theme};

const ANSWERS_LIMIT_STEP: i64 = 10;

pub struct FormEditor;

/// What a text edit will be committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Question(QuestionId),
    Option { id: QuestionId, index: usize },
}

impl EditTarget {
    fn label(&self) -> String {
        match self {
            EditTarget::Title => "title".to_string(),
            EditTarget::Question(id) => format!("question {}", id),
            EditTarget::Option { id, index } => format!("option {} of question {}", index + 1, id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Editing { target: EditTarget, buffer: String },
    /// A question is picked up; the list cursor is the drop position
    Moving { source: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

pub struct State {
    history: HistoryState,
    questions: ListState,
    /// `None` focuses the question text, `Some(i)` its i-th option
    option_focus: Option<usize>,
    mode: Mode,
    input: TextInputState,
    submitter: Submitter,
    submitting: bool,
    notification: Option<Notification>,
    last_receipt: Option<SubmissionReceipt>,
}

impl State {
    pub fn new(history: HistoryState, submitter: Submitter) -> Self {
        let mut questions = ListState::with_selection();
        questions.clamp(history.present().questions.len());
        Self {
            history,
            questions,
            option_focus: None,
            mode: Mode::Browse,
            input: TextInputState::new(),
            submitter,
            submitting: false,
            notification: None,
            last_receipt: None,
        }
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn document(&self) -> &Questionary {
        self.history.present()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.questions.selected()
    }

    pub fn option_focus(&self) -> Option<usize> {
        self.option_focus
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions
            .selected()
            .and_then(|index| self.history.present().questions.get(index))
    }

    fn question_count(&self) -> usize {
        self.history.present().questions.len()
    }

    fn apply(&mut self, action: FormAction) -> bool {
        let changed = self.history.apply(&action);
        self.sync_selection();
        changed
    }

    /// Keep the cursors pointing at things that still exist after an edit
    fn sync_selection(&mut self) {
        self.questions.clamp(self.question_count());
        let option_count = self.selected_question().map_or(0, |q| q.option_list().len());
        self.option_focus = match self.option_focus {
            Some(_) if option_count == 0 => None,
            Some(index) => Some(index.min(option_count - 1)),
            None => None,
        };
    }

    fn notify(&mut self, kind: NotificationKind, text: impl Into<String>) {
        self.notification = Some(Notification {
            kind,
            text: text.into(),
        });
    }

    fn begin_edit(&mut self, target: EditTarget, buffer: String) {
        self.input.set_cursor_to_end(&buffer);
        self.mode = Mode::Editing { target, buffer };
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    SelectPrevious,
    SelectNext,
    FocusPreviousOption,
    FocusNextOption,
    AddQuestion,
    RemoveQuestion,
    CloneQuestion,
    CycleType,
    AddOption,
    RemoveOption,
    BeginEdit,
    BeginEditTitle,
    InputKey(KeyCode),
    CommitEdit,
    CancelEdit,
    ToggleMove,
    ToggleAnonymous,
    AdjustAnswersLimit(i64),
    Undo,
    Redo,
    Submit,
    Submitted(Result<SubmissionReceipt, SubmissionError>),
    Escape,
    Quit,
}

impl App for FormEditor {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::SelectPrevious => {
                state.questions.move_up(state.question_count());
                state.option_focus = None;
            }
            Msg::SelectNext => {
                state.questions.move_down(state.question_count());
                state.option_focus = None;
            }
            Msg::FocusPreviousOption => {
                state.option_focus = match state.option_focus {
                    Some(0) | None => None,
                    Some(index) => Some(index - 1),
                };
            }
            Msg::FocusNextOption => {
                let count = state.selected_question().map_or(0, |q| q.option_list().len());
                if count > 0 {
                    state.option_focus = Some(match state.option_focus {
                        None => 0,
                        Some(index) => (index + 1).min(count - 1),
                    });
                }
            }
            Msg::AddQuestion => {
                state.apply(FormAction::AddQuestion);
                state.questions.select_last(state.question_count());
                state.option_focus = None;
            }
            Msg::RemoveQuestion => {
                if let Some(id) = state.selected_question().map(|q| q.id) {
                    state.apply(FormAction::RemoveQuestion(id));
                }
            }
            Msg::CloneQuestion => {
                if let Some(id) = state.selected_question().map(|q| q.id) {
                    state.apply(FormAction::CloneQuestion(id));
                    // The copy lands right after the original
                    state.questions.move_down(state.question_count());
                    state.option_focus = None;
                }
            }
            Msg::CycleType => {
                if let Some(q) = state.selected_question() {
                    let action = FormAction::UpdateQuestionType {
                        id: q.id,
                        question_type: q.question_type.next(),
                    };
                    state.apply(action);
                }
            }
            Msg::AddOption => match state.selected_question() {
                Some(q) if q.question_type.has_options() => {
                    let id = q.id;
                    state.apply(FormAction::AddOption(id));
                    let count = state.selected_question().map_or(0, |q| q.option_list().len());
                    state.option_focus = count.checked_sub(1);
                }
                Some(q) => {
                    let message = format!("{} questions have no options", q.question_type.label());
                    state.notify(NotificationKind::Warning, message);
                }
                None => {}
            },
            Msg::RemoveOption => {
                let id = state.selected_question().map(|q| q.id);
                if let (Some(id), Some(option_index)) = (id, state.option_focus) {
                    state.apply(FormAction::RemoveOption { id, option_index });
                }
            }
            Msg::BeginEdit => {
                let Some(q) = state.selected_question() else {
                    return Command::None;
                };
                let (target, buffer) = match state.option_focus {
                    Some(index) => (
                        EditTarget::Option { id: q.id, index },
                        q.option_list().get(index).cloned().unwrap_or_default(),
                    ),
                    None => (EditTarget::Question(q.id), q.text.clone()),
                };
                state.begin_edit(target, buffer);
            }
            Msg::BeginEditTitle => {
                let title = state.document().title.clone();
                state.begin_edit(EditTarget::Title, title);
            }
            Msg::InputKey(code) => {
                if let Mode::Editing { buffer, .. } = &mut state.mode {
                    if let Some(value) = state.input.handle_key(code, buffer, None) {
                        *buffer = value;
                    }
                }
            }
            Msg::CommitEdit => {
                let Mode::Editing { target, buffer } = std::mem::replace(&mut state.mode, Mode::Browse) else {
                    return Command::None;
                };
                let action = match target {
                    EditTarget::Title => FormAction::SetTitle(buffer),
                    EditTarget::Question(id) => FormAction::UpdateQuestionTitle { id, title: buffer },
                    EditTarget::Option { id, index } => FormAction::UpdateOption {
                        id,
                        option_index: index,
                        value: buffer,
                    },
                };
                state.apply(action);
            }
            Msg::CancelEdit => {
                if matches!(state.mode, Mode::Editing { .. }) {
                    state.mode = Mode::Browse;
                }
            }
            Msg::ToggleMove => match state.mode.clone() {
                Mode::Browse => {
                    if let Some(source) = state.questions.selected() {
                        state.mode = Mode::Moving { source };
                        state.option_focus = None;
                    }
                }
                Mode::Moving { source } => {
                    state.mode = Mode::Browse;
                    let destination = state.questions.selected().unwrap_or(source);
                    let gesture = MoveGesture::new(source, destination);
                    match reorder_action(&state.document().questions, gesture) {
                        Some(action) => {
                            state.apply(action);
                            state.questions.select(Some(destination));
                        }
                        None => debug!("Move of question {} dropped in place", source),
                    }
                }
                Mode::Editing { .. } => {}
            },
            Msg::ToggleAnonymous => {
                let anonymous = !state.document().options.anonymous;
                state.apply(FormAction::SetOptions(OptionsPatch {
                    anonymous: Some(anonymous),
                    ..OptionsPatch::default()
                }));
            }
            Msg::AdjustAnswersLimit(delta) => {
                let current = i64::from(state.document().options.answers_limit);
                let next = (current + delta).clamp(1, i64::from(u32::MAX));
                if next != current {
                    state.apply(FormAction::SetOptions(OptionsPatch {
                        answers_limit: Some(next as u32),
                        ..OptionsPatch::default()
                    }));
                }
            }
            Msg::Undo => {
                if !state.apply(FormAction::Undo) {
                    state.notify(NotificationKind::Info, "Nothing to undo");
                }
            }
            Msg::Redo => {
                if !state.apply(FormAction::Redo) {
                    state.notify(NotificationKind::Info, "Nothing to redo");
                }
            }
            Msg::Submit => {
                if state.submitting {
                    state.notify(NotificationKind::Warning, "A submission is already in progress");
                    return Command::None;
                }
                let problems = state.document().validate();
                if !problems.is_empty() {
                    state.notify(
                        NotificationKind::Error,
                        format!("Cannot submit: {}", problems.join("; ")),
                    );
                    return Command::None;
                }
                let snapshot = state.history.snapshot();
                let submitter = state.submitter.clone();
                info!("Submitting questionnaire {} ({})", snapshot.id, snapshot.title);
                state.notify(NotificationKind::Info, format!("Submitting \"{}\"...", snapshot.title));
                state.submitting = true;
                return Command::perform(async move { submitter.submit(snapshot).await }, Msg::Submitted);
            }
            Msg::Submitted(result) => {
                state.submitting = false;
                match result {
                    Ok(receipt) => {
                        state.notify(
                            NotificationKind::Success,
                            format!(
                                "Questionnaire \"{}\" created with {} questions",
                                receipt.title, receipt.question_count
                            ),
                        );
                        state.last_receipt = Some(receipt);
                    }
                    Err(e) => state.notify(NotificationKind::Error, e.user_message()),
                }
            }
            Msg::Escape => match state.mode {
                Mode::Moving { source } => {
                    state.mode = Mode::Browse;
                    state.questions.select(Some(source));
                }
                _ => state.notification = None,
            },
            Msg::Quit => return Command::Quit,
        }
        Command::None
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .areas(area);
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body_area);

        render_header(state, frame, header_area, theme);
        render_questions(state, frame, list_area, theme);
        render_detail(state, frame, detail_area, theme);
        render_footer(state, frame, footer_area, theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        match state.mode {
            Mode::Editing { .. } => vec![
                Subscription::keyboard(KeyCode::Enter, "Save", Msg::CommitEdit),
                Subscription::keyboard(KeyCode::Esc, "Cancel", Msg::CancelEdit),
            ],
            Mode::Moving { .. } => vec![
                Subscription::keyboard(KeyCode::Up, "Move up", Msg::SelectPrevious),
                Subscription::keyboard(KeyCode::Down, "Move down", Msg::SelectNext),
                Subscription::keyboard(KeyCode::Char('m'), "Drop here", Msg::ToggleMove),
                Subscription::keyboard(KeyCode::Enter, "Drop here", Msg::ToggleMove),
                Subscription::keyboard(KeyCode::Esc, "Cancel move", Msg::Escape),
                Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit),
            ],
            Mode::Browse => vec![
                Subscription::keyboard(KeyCode::Up, "Previous question", Msg::SelectPrevious),
                Subscription::keyboard(KeyCode::Down, "Next question", Msg::SelectNext),
                Subscription::keyboard(KeyCode::Left, "Previous option", Msg::FocusPreviousOption),
                Subscription::keyboard(KeyCode::Right, "Next option", Msg::FocusNextOption),
                Subscription::keyboard(KeyCode::Char('a'), "Add question", Msg::AddQuestion),
                Subscription::keyboard(KeyCode::Char('d'), "Remove question", Msg::RemoveQuestion),
                Subscription::keyboard(KeyCode::Char('c'), "Clone question", Msg::CloneQuestion),
                Subscription::keyboard(KeyCode::Char('t'), "Cycle type", Msg::CycleType),
                Subscription::keyboard(KeyCode::Char('o'), "Add option", Msg::AddOption),
                Subscription::keyboard(KeyCode::Char('x'), "Remove option", Msg::RemoveOption),
                Subscription::keyboard(KeyCode::Char('e'), "Edit", Msg::BeginEdit),
                Subscription::keyboard(KeyCode::Enter, "Edit", Msg::BeginEdit),
                Subscription::keyboard(KeyCode::Char('T'), "Edit title", Msg::BeginEditTitle),
                Subscription::keyboard(KeyCode::Char('m'), "Move question", Msg::ToggleMove),
                Subscription::keyboard(KeyCode::Char('n'), "Toggle anonymous", Msg::ToggleAnonymous),
                Subscription::keyboard(
                    KeyCode::Char('+'),
                    "More answers",
                    Msg::AdjustAnswersLimit(ANSWERS_LIMIT_STEP),
                ),
                Subscription::keyboard(
                    KeyCode::Char('-'),
                    "Fewer answers",
                    Msg::AdjustAnswersLimit(-ANSWERS_LIMIT_STEP),
                ),
                Subscription::keyboard(KeyCode::Char('u'), "Undo", Msg::Undo),
                Subscription::ctrl('z', "Undo", Msg::Undo),
                Subscription::keyboard(KeyCode::Char('r'), "Redo", Msg::Redo),
                Subscription::ctrl('y', "Redo", Msg::Redo),
                Subscription::keyboard(KeyCode::Char('s'), "Submit", Msg::Submit),
                Subscription::keyboard(KeyCode::Esc, "Dismiss", Msg::Escape),
                Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit),
            ],
        }
    }

    fn capture_key(state: &State, key: &KeyEvent) -> Option<Msg> {
        if !matches!(state.mode, Mode::Editing { .. }) {
            return None;
        }
        match key.code {
            KeyCode::Enter => Some(Msg::CommitEdit),
            KeyCode::Esc => Some(Msg::CancelEdit),
            _ if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            code => Some(Msg::InputKey(code)),
        }
    }

    fn title() -> &'static str {
        "Questionnaire Editor"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let history = state.history();
        let mut spans = vec![Span::styled(
            format!("undo {} · redo {}", history.past_len(), history.future_len()),
            Style::default().fg(theme.subtext0),
        )];
        if state.is_submitting() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled("submitting…", theme.warning_style()));
        }
        Some(Line::from(spans))
    }
}

fn render_header(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let doc = state.document();
    let options = &doc.options;
    let lines = vec![
        Line::from(Span::styled(
            doc.title.clone(),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("#{} ", doc.id), Style::default().fg(theme.overlay1)),
            Span::styled(
                format!(
                    "{} → {}",
                    options.start_date.format("%Y-%m-%d"),
                    options.end_date.format("%Y-%m-%d")
                ),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                format!(" · limit {} · ", options.answers_limit),
                Style::default().fg(theme.subtext0),
            ),
            Span::styled(
                if options.anonymous { "anonymous" } else { "identified" },
                Style::default().fg(theme.mauve),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Questionnaire ")
        .border_style(theme.border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_questions(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let moving = match state.mode {
        Mode::Moving { source } => Some(source),
        _ => None,
    };

    let items: Vec<ListItem> = state
        .document()
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let marker = if moving == Some(index) { "↕ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.peach)),
                Span::styled(format!("{}. ", index + 1), Style::default().fg(theme.overlay1)),
                Span::styled(q.text.clone(), Style::default().fg(theme.text)),
                Span::styled(format!("  [{}]", q.question_type.label()), Style::default().fg(theme.teal)),
            ]))
        })
        .collect();

    let title = if moving.is_some() { " Questions (moving) " } else { " Questions " };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(theme.border_style(state.option_focus.is_none())),
        )
        .highlight_style(theme.selected_style());

    let mut list_state = ratatui::widgets::ListState::default().with_selected(state.questions.selected());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(theme.border_style(state.option_focus.is_some()));

    let Some(q) = state.selected_question() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No questions. Press a to add one.",
            Style::default().fg(theme.overlay1),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let text_style = if state.option_focus.is_none() {
        theme.selected_style()
    } else {
        Style::default().fg(theme.text)
    };
    let mut lines = vec![
        Line::from(Span::styled(q.text.clone(), text_style)),
        Line::from(vec![
            Span::styled("Type: ", Style::default().fg(theme.subtext0)),
            Span::styled(q.question_type.label(), Style::default().fg(theme.teal)),
            Span::styled(format!("  Id: {}", q.id), Style::default().fg(theme.overlay1)),
        ]),
        Line::from(""),
    ];

    if q.question_type.has_options() {
        if q.option_list().is_empty() {
            lines.push(Line::from(Span::styled(
                "No options yet. Press o to add one.",
                Style::default().fg(theme.overlay1),
            )));
        }
        for (index, option) in q.option_list().iter().enumerate() {
            let style = if state.option_focus == Some(index) {
                theme.selected_style()
            } else {
                Style::default().fg(theme.text)
            };
            let label = if option.is_empty() { "(empty)" } else { option.as_str() };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}) ", index + 1), Style::default().fg(theme.mauve)),
                Span::styled(label.to_string(), style),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!("{} questions have no options", q.question_type.label()),
            Style::default().fg(theme.overlay1),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_footer(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = match (&state.mode, &state.notification) {
        (Mode::Editing { target, buffer }, _) => {
            let (before, under, after) = state.input.split(buffer);
            let cursor = under.map_or_else(|| " ".to_string(), |c| c.to_string());
            Line::from(vec![
                Span::styled(format!("Edit {}: ", target.label()), Style::default().fg(theme.lavender)),
                Span::styled(before.to_string(), Style::default().fg(theme.text)),
                Span::styled(cursor, theme.cursor_style()),
                Span::styled(after.to_string(), Style::default().fg(theme.text)),
            ])
        }
        (Mode::Moving { .. }, _) => Line::from(Span::styled(
            "Use ↑/↓ to choose the new position, m to drop, Esc to cancel",
            theme.info_style(),
        )),
        (Mode::Browse, Some(notification)) => {
            let style = match notification.kind {
                NotificationKind::Info => theme.info_style(),
                NotificationKind::Success => theme.success_style(),
                NotificationKind::Warning => theme.warning_style(),
                NotificationKind::Error => theme.error_style(),
            };
            Line::from(Span::styled(notification.text.clone(), style))
        }
        (Mode::Browse, None) => Line::from(""),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(matches!(state.mode, Mode::Editing { .. })));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
