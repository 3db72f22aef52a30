//! Per-list draft/edit state machine.
//!
//! A `FormController` owns the single active form of one entity list. It
//! validates and hands a `Submission` to the coordinator; the coordinator
//! reports back through `succeed`/`fail` with the submission's ticket. A
//! completion whose ticket no longer matches (the form was cancelled or
//! restarted meanwhile) leaves the form alone.

use std::collections::BTreeSet;

use crate::entity_store::Catalog;
use crate::models::{Draft, Entity, EntityId, EntityKind};
use crate::sync::{SubmitError, SyncError};
use crate::validation::{validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Idle,
    Create,
    Editing(EntityId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: Draft,
    pub touched: BTreeSet<String>,
    pub submitting: bool,
    /// Set by the first submit attempt; makes every field's error visible.
    pub submitted: bool,
    /// Message of the last failed remote operation, for out-of-band display.
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTarget {
    Create,
    Update(EntityId),
}

/// A validated draft handed to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    pub kind: EntityKind,
    pub target: SubmissionTarget,
    pub draft: Draft,
}

#[derive(Debug)]
pub struct FormController {
    kind: EntityKind,
    state: FormState,
    active_ticket: Option<u64>,
    next_ticket: u64,
}

impl FormController {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: FormState::default(),
            active_ticket: None,
            next_ticket: 1,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> FormMode {
        self.state.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// Opens an empty create form, replacing whatever form was active.
    pub fn start_create(&mut self) {
        self.reset(FormMode::Create, Draft::empty(self.kind));
    }

    /// Opens an edit form seeded from `entity`, replacing whatever form was active.
    pub fn start_edit<E: Entity>(&mut self, entity: &E) {
        debug_assert_eq!(E::KIND, self.kind);
        self.reset(FormMode::Editing(entity.id()), entity.to_draft());
    }

    /// Updates one field and marks it touched. Ignored when no form is open
    /// or the field is not editable for this kind.
    pub fn change_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.state.mode == FormMode::Idle || !self.kind.fields().contains(&name) {
            return false;
        }
        self.state.draft.set(name, value);
        self.state.touched.insert(name.to_string());
        true
    }

    /// Discards the active form. An in-flight request is not cancelled.
    pub fn cancel(&mut self) {
        self.reset(FormMode::Idle, Draft::default());
    }

    /// Validates the full draft against `catalog`.
    ///
    /// On failure every field becomes touched and nothing else changes. A
    /// valid draft with no touched field is refused with `Pristine` and the
    /// state is left as it was. On success the form enters the submitting
    /// state and a `Submission` is returned for dispatch.
    pub fn submit(&mut self, catalog: &Catalog) -> Result<Submission, SubmitError> {
        let target = match self.state.mode {
            FormMode::Idle => return Err(SubmitError::NoActiveForm),
            FormMode::Create => SubmissionTarget::Create,
            FormMode::Editing(id) => SubmissionTarget::Update(id),
        };
        if self.state.submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        let errors = validate(self.kind, &self.state.draft, catalog);
        if !errors.is_valid() {
            self.state.submitted = true;
            self.touch_all();
            return Err(SubmitError::Invalid(errors));
        }
        if self.state.touched.is_empty() {
            return Err(SubmitError::Pristine);
        }

        self.state.submitted = true;
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.active_ticket = Some(ticket);
        self.state.submitting = true;
        self.state.last_error = None;

        Ok(Submission {
            ticket,
            kind: self.kind,
            target,
            draft: self.state.draft.clone(),
        })
    }

    /// Confirmed completion: closes the form. Returns false if `ticket` is stale.
    pub fn succeed(&mut self, ticket: u64) -> bool {
        if self.active_ticket != Some(ticket) {
            return false;
        }
        self.reset(FormMode::Idle, Draft::default());
        true
    }

    /// Failed completion: keeps mode and draft, records the error. Returns
    /// false if `ticket` is stale.
    pub fn fail(&mut self, ticket: u64, error: &SyncError) -> bool {
        if self.active_ticket != Some(ticket) {
            return false;
        }
        self.active_ticket = None;
        self.state.submitting = false;
        self.state.last_error = Some(error.user_message());
        true
    }

    pub fn errors(&self, catalog: &Catalog) -> ValidationErrors {
        validate(self.kind, &self.state.draft, catalog)
    }

    /// Errors for touched fields, or all of them once a submit was attempted.
    pub fn visible_errors(&self, catalog: &Catalog) -> ValidationErrors {
        let errors = self.errors(catalog);
        if self.state.submitted {
            return errors;
        }
        errors.retain(|field| self.state.touched.contains(field))
    }

    /// Whether the submit affordance is enabled.
    ///
    /// Requires at least one touched field, so a pristine form cannot be
    /// submitted even when its draft is valid.
    pub fn can_submit(&self, catalog: &Catalog) -> bool {
        self.state.mode != FormMode::Idle
            && !self.state.submitting
            && !self.state.touched.is_empty()
            && self.errors(catalog).is_valid()
    }

    fn touch_all(&mut self) {
        for field in self.kind.fields() {
            self.state.touched.insert(field.to_string());
        }
    }

    fn reset(&mut self, mode: FormMode, draft: Draft) {
        self.active_ticket = None;
        self.state = FormState {
            mode,
            draft,
            ..FormState::default()
        };
    }
}
