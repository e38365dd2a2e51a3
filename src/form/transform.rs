//! Pure document transforms, one per edit action.
//!
//! Every function takes the current document by reference and returns a new
//! one. Edits that name a missing question or option index return an
//! unchanged copy; there is no error path.

use crate::model::{Question, QuestionId, QuestionType, Questionary, Statistics};

use super::action::{FormAction, OptionsPatch};
use super::ids::IdPolicy;

pub const NEW_QUESTION_TEXT: &str = "New question";
pub const COPY_PREFIX: &str = "Copy of ";

/// Apply a mutating action to `doc`. Returns `None` for undo, redo and unknown
/// actions, which do not transform the document.
pub fn apply(doc: &Questionary, action: &FormAction, ids: IdPolicy) -> Option<Questionary> {
    let next = match action {
        FormAction::SetTitle(title) => set_title(doc, title),
        FormAction::AddQuestion => add_question(doc, ids),
        FormAction::UpdateQuestionTitle { id, title } => update_question_title(doc, *id, title),
        FormAction::UpdateQuestionType { id, question_type } => {
            update_question_type(doc, *id, *question_type)
        }
        FormAction::AddOption(id) => add_option(doc, *id),
        FormAction::UpdateOption { id, option_index, value } => {
            update_option(doc, *id, *option_index, value)
        }
        FormAction::RemoveOption { id, option_index } => remove_option(doc, *id, *option_index),
        FormAction::RemoveQuestion(id) => remove_question(doc, *id),
        FormAction::CloneQuestion(id) => clone_question(doc, *id, ids),
        FormAction::ReorderQuestions(questions) => reorder_questions(doc, questions),
        FormAction::SetOptions(patch) => set_options(doc, patch),
        FormAction::Undo | FormAction::Redo | FormAction::Unknown => return None,
    };
    Some(next)
}

/// Rebuild the document with every question whose id matches passed through `edit`
fn map_question<F>(doc: &Questionary, id: QuestionId, edit: F) -> Questionary
where
    F: Fn(&Question) -> Question,
{
    Questionary {
        questions: doc
            .questions
            .iter()
            .map(|q| if q.id == id { edit(q) } else { q.clone() })
            .collect(),
        ..doc.clone()
    }
}

pub fn set_title(doc: &Questionary, title: &str) -> Questionary {
    Questionary {
        title: title.to_string(),
        ..doc.clone()
    }
}

pub fn add_question(doc: &Questionary, ids: IdPolicy) -> Questionary {
    let mut next = doc.clone();
    let id = ids.next_id(&doc.questions);
    next.questions
        .push(Question::new(id, NEW_QUESTION_TEXT, QuestionType::MultipleChoice));
    next
}

pub fn update_question_title(doc: &Questionary, id: QuestionId, title: &str) -> Questionary {
    map_question(doc, id, |q| Question {
        text: title.to_string(),
        ..q.clone()
    })
}

pub fn update_question_type(
    doc: &Questionary,
    id: QuestionId,
    question_type: QuestionType,
) -> Questionary {
    map_question(doc, id, |q| Question {
        question_type,
        statistics: Some(Statistics::new()),
        options: if question_type.has_options() {
            Some(q.options.clone().unwrap_or_default())
        } else {
            None
        },
        ..q.clone()
    })
}

pub fn add_option(doc: &Questionary, id: QuestionId) -> Questionary {
    map_question(doc, id, |q| {
        if q.question_type != QuestionType::MultipleChoice {
            return q.clone();
        }
        let mut options = q.options.clone().unwrap_or_default();
        options.push(String::new());
        Question {
            options: Some(options),
            ..q.clone()
        }
    })
}

pub fn update_option(doc: &Questionary, id: QuestionId, option_index: usize, value: &str) -> Questionary {
    map_question(doc, id, |q| {
        let mut updated = q.clone();
        if let Some(option) = updated.options.as_mut().and_then(|o| o.get_mut(option_index)) {
            *option = value.to_string();
        }
        updated
    })
}

pub fn remove_option(doc: &Questionary, id: QuestionId, option_index: usize) -> Questionary {
    map_question(doc, id, |q| {
        let mut updated = q.clone();
        if let Some(options) = updated.options.as_mut() {
            if option_index < options.len() {
                options.remove(option_index);
            }
        }
        updated
    })
}

pub fn remove_question(doc: &Questionary, id: QuestionId) -> Questionary {
    Questionary {
        questions: doc.questions.iter().filter(|q| q.id != id).cloned().collect(),
        ..doc.clone()
    }
}

pub fn clone_question(doc: &Questionary, id: QuestionId, ids: IdPolicy) -> Questionary {
    let new_id = ids.next_id(&doc.questions);
    let mut questions = Vec::with_capacity(doc.questions.len() + 1);

    for question in &doc.questions {
        questions.push(question.clone());
        if question.id == id {
            questions.push(Question {
                id: new_id,
                text: format!("{}{}", COPY_PREFIX, question.text),
                ..question.clone()
            });
        }
    }

    Questionary {
        questions,
        ..doc.clone()
    }
}

pub fn reorder_questions(doc: &Questionary, questions: &[Question]) -> Questionary {
    Questionary {
        questions: questions.to_vec(),
        ..doc.clone()
    }
}

pub fn set_options(doc: &Questionary, patch: &OptionsPatch) -> Questionary {
    let mut next = doc.clone();
    if let Some(start_date) = patch.start_date {
        next.options.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        next.options.end_date = end_date;
    }
    if let Some(answers_limit) = patch.answers_limit {
        next.options.answers_limit = answers_limit.max(1);
    }
    if let Some(anonymous) = patch.anonymous {
        next.options.anonymous = anonymous;
    }
    next
}
