//! Form controller behind the company setup screen.
//!
//! [`CompanySetup`] owns the draft being edited, the loading flag and the
//! inline error message, and runs the prefill and submit flows against a
//! [`CompanyService`]. It keeps no Yew state of its own: the page hands it
//! callbacks for toasts, navigation and re-rendering, which also lets tests
//! drive it without a browser.

use std::cell::{Cell, RefCell};

use base64::{Engine as _, engine::general_purpose};
use payloads::{
    APIClient, ClientError, Company, CompanyId, LogoFile, requests, responses,
};
use yew::Callback;

use crate::Route;

/// Shown when a failed update carries no message from the backend.
pub const GENERIC_FAILURE: &str = "An error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    Website,
    Location,
}

impl CompanyField {
    pub const ALL: [CompanyField; 4] = [
        CompanyField::Name,
        CompanyField::Description,
        CompanyField::Website,
        CompanyField::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompanyField::Name => "Company Name",
            CompanyField::Description => "Description",
            CompanyField::Website => "Website",
            CompanyField::Location => "Location",
        }
    }

    /// Form control name, matching the multipart part it is sent as.
    pub fn input_name(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::Website => "website",
            CompanyField::Location => "location",
        }
    }
}

/// The editable draft of a company plus an optional new logo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    /// `None` keeps the logo already on file.
    pub file: Option<LogoFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("All fields are required")]
pub struct FieldsMissing;

impl CompanyForm {
    pub fn field(&self, field: CompanyField) -> &str {
        match field {
            CompanyField::Name => &self.name,
            CompanyField::Description => &self.description,
            CompanyField::Website => &self.website,
            CompanyField::Location => &self.location,
        }
    }

    pub fn set_field(&mut self, field: CompanyField, value: String) {
        let slot = match field {
            CompanyField::Name => &mut self.name,
            CompanyField::Description => &mut self.description,
            CompanyField::Website => &mut self.website,
            CompanyField::Location => &mut self.location,
        };
        *slot = value;
    }

    /// Copy the text fields from a remote record. The logo stays as is.
    fn prefill(&mut self, company: &Company) {
        self.name = company.name.clone();
        self.description = company.description.clone();
        self.website = company.website.clone();
        self.location = company.location.clone();
    }

    /// Build the update request, or fail if a text field is empty.
    pub fn to_request(&self) -> Result<requests::UpdateCompany, FieldsMissing> {
        if CompanyField::ALL
            .iter()
            .any(|&field| self.field(field).is_empty())
        {
            return Err(FieldsMissing);
        }
        Ok(requests::UpdateCompany {
            name: self.name.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            location: self.location.clone(),
            file: self.file.clone(),
        })
    }
}

/// A toast the controller wants shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// The backend call made on submit.
#[allow(async_fn_in_trait)]
pub trait CompanyService {
    async fn update_company(
        &self,
        company_id: &CompanyId,
        details: requests::UpdateCompany,
    ) -> Result<responses::SuccessEnvelope, ClientError>;
}

impl CompanyService for APIClient {
    async fn update_company(
        &self,
        company_id: &CompanyId,
        details: requests::UpdateCompany,
    ) -> Result<responses::SuccessEnvelope, ClientError> {
        APIClient::update_company(self, company_id, details).await
    }
}

pub struct SetupCallbacks {
    pub notify: Callback<Notification>,
    pub navigate: Callback<Route>,
    /// Fired whenever anything the page renders has changed.
    pub on_change: Callback<()>,
}

pub struct CompanySetup<S> {
    company_id: CompanyId,
    service: S,
    callbacks: SetupCallbacks,
    form: RefCell<CompanyForm>,
    logo_preview: RefCell<Option<String>>,
    /// Last remote record copied into the form.
    applied_remote: RefCell<Option<Company>>,
    edited: Cell<bool>,
    loading: Cell<bool>,
    disposed: Cell<bool>,
    error: RefCell<Option<String>>,
}

/// Clears the loading flag when dropped, whichever way submit ends.
struct LoadingGuard<'a, S>(&'a CompanySetup<S>);

impl<'a, S> LoadingGuard<'a, S> {
    fn start(setup: &'a CompanySetup<S>) -> Self {
        setup.loading.set(true);
        setup.changed();
        Self(setup)
    }
}

impl<S> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.0.loading.set(false);
        self.0.changed();
    }
}

impl<S> CompanySetup<S> {
    pub fn new(
        company_id: CompanyId,
        service: S,
        callbacks: SetupCallbacks,
    ) -> Self {
        Self {
            company_id,
            service,
            callbacks,
            form: RefCell::default(),
            logo_preview: RefCell::default(),
            applied_remote: RefCell::default(),
            edited: Cell::new(false),
            loading: Cell::new(false),
            disposed: Cell::new(false),
            error: RefCell::default(),
        }
    }

    pub fn field(&self, field: CompanyField) -> String {
        self.form.borrow().field(field).to_string()
    }

    pub fn form(&self) -> CompanyForm {
        self.form.borrow().clone()
    }

    /// `data:` URL of the logo picked in this session.
    pub fn logo_preview(&self) -> Option<String> {
        self.logo_preview.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Sync the text fields from the shared store's record.
    ///
    /// A record is only copied while the user hasn't typed anything; once the
    /// form has been edited, later refreshes are ignored rather than
    /// discarding the edits.
    pub fn on_remote_company_change(&self, remote: Option<&Company>) {
        let Some(remote) = remote else {
            return;
        };
        if self.applied_remote.borrow().as_ref() == Some(remote) {
            return;
        }
        if self.edited.get() {
            tracing::debug!(
                company_id = %remote.id,
                "form has edits; ignoring refreshed company"
            );
            return;
        }
        self.form.borrow_mut().prefill(remote);
        *self.applied_remote.borrow_mut() = Some(remote.clone());
        self.changed();
    }

    pub fn on_field_change(&self, field: CompanyField, value: String) {
        self.form.borrow_mut().set_field(field, value);
        self.edited.set(true);
        self.changed();
    }

    /// Accept a newly picked logo. A rejected file leaves the previous
    /// selection in place and is reported with an error toast.
    pub fn on_file_change(&self, file: Option<LogoFile>) {
        let Some(file) = file else {
            return;
        };
        tracing::debug!(
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            size = file.size(),
            "logo selected"
        );

        if let Err(rejection) = file.check() {
            tracing::debug!("logo rejected: {rejection}");
            self.callbacks
                .notify
                .emit(Notification::Error(rejection.to_string()));
            return;
        }

        let preview = format!(
            "data:{};base64,{}",
            file.mime_type,
            general_purpose::STANDARD.encode(&file.data)
        );
        *self.logo_preview.borrow_mut() = Some(preview);
        self.form.borrow_mut().file = Some(file);
        self.changed();
    }

    /// Stop reporting outcomes; called when the page unmounts.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    fn changed(&self) {
        if !self.disposed.get() {
            self.callbacks.on_change.emit(());
        }
    }
}

impl<S: CompanyService> CompanySetup<S> {
    /// Validate the draft and send it.
    ///
    /// On success the backend's message is toasted and the user is sent back
    /// to the company list. On failure an error toast is shown and the draft
    /// is kept for another attempt.
    pub async fn submit(&self) {
        if self.loading.get() {
            tracing::debug!("update already in flight; ignoring submit");
            return;
        }

        let request = self.form.borrow().to_request();
        let request = match request {
            Ok(request) => request,
            Err(missing) => {
                *self.error.borrow_mut() = Some(missing.to_string());
                self.changed();
                return;
            }
        };
        *self.error.borrow_mut() = None;

        let _loading = LoadingGuard::start(self);
        let result = self
            .service
            .update_company(&self.company_id, request)
            .await
            .and_then(|envelope| {
                if envelope.success {
                    Ok(envelope)
                } else {
                    Err(ClientError::Rejected(envelope.message))
                }
            });

        if self.disposed.get() {
            tracing::debug!(
                company_id = %self.company_id,
                "screen closed before the update finished; ignoring result"
            );
            return;
        }

        match result {
            Ok(envelope) => {
                tracing::info!(company_id = %self.company_id, "company updated");
                self.callbacks
                    .notify
                    .emit(Notification::Success(envelope.message));
                self.callbacks.navigate.emit(Route::Companies);
            }
            Err(e) => {
                tracing::warn!(company_id = %self.company_id, "update failed: {e}");
                let message = e.server_message().unwrap_or(GENERIC_FAILURE);
                self.callbacks
                    .notify
                    .emit(Notification::Error(message.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;
    use payloads::MAX_LOGO_SIZE;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::rc::Rc;

    type UpdateResult = Result<responses::SuccessEnvelope, ClientError>;

    /// Records requests and answers each one from a queued channel, so a
    /// test decides when (and whether) the response arrives.
    #[derive(Default)]
    struct FakeService {
        calls: Rc<RefCell<Vec<(CompanyId, requests::UpdateCompany)>>>,
        replies: Rc<RefCell<VecDeque<oneshot::Receiver<UpdateResult>>>>,
    }

    impl CompanyService for FakeService {
        async fn update_company(
            &self,
            company_id: &CompanyId,
            details: requests::UpdateCompany,
        ) -> UpdateResult {
            self.calls.borrow_mut().push((company_id.clone(), details));
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected update request");
            reply.await.expect("reply sender dropped")
        }
    }

    struct Harness {
        setup: Rc<CompanySetup<FakeService>>,
        calls: Rc<RefCell<Vec<(CompanyId, requests::UpdateCompany)>>>,
        replies: Rc<RefCell<VecDeque<oneshot::Receiver<UpdateResult>>>>,
        notifications: Rc<RefCell<Vec<Notification>>>,
        routes: Rc<RefCell<Vec<Route>>>,
        changes: Rc<Cell<usize>>,
    }

    impl Harness {
        fn new() -> Self {
            let service = FakeService::default();
            let calls = service.calls.clone();
            let replies = service.replies.clone();
            let notifications = Rc::new(RefCell::new(Vec::new()));
            let routes = Rc::new(RefCell::new(Vec::new()));
            let changes = Rc::new(Cell::new(0));

            let callbacks = SetupCallbacks {
                notify: {
                    let notifications = notifications.clone();
                    Callback::from(move |n| notifications.borrow_mut().push(n))
                },
                navigate: {
                    let routes = routes.clone();
                    Callback::from(move |r| routes.borrow_mut().push(r))
                },
                on_change: {
                    let changes = changes.clone();
                    Callback::from(move |_| changes.set(changes.get() + 1))
                },
            };

            Self {
                setup: Rc::new(CompanySetup::new(
                    CompanyId::from("c1"),
                    service,
                    callbacks,
                )),
                calls,
                replies,
                notifications,
                routes,
                changes,
            }
        }

        fn fill(&self) {
            self.setup.on_field_change(CompanyField::Name, "Acme".into());
            self.setup
                .on_field_change(CompanyField::Description, "Widgets".into());
            self.setup
                .on_field_change(CompanyField::Website, "acme.co".into());
            self.setup.on_field_change(CompanyField::Location, "NYC".into());
        }

        /// Queue a response the test will send later.
        fn deferred_reply(&self) -> oneshot::Sender<UpdateResult> {
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push_back(rx);
            tx
        }

        fn reply_with(&self, result: UpdateResult) {
            let _ = self.deferred_reply().send(result);
        }
    }

    fn envelope(success: bool, message: &str) -> UpdateResult {
        Ok(responses::SuccessEnvelope {
            success,
            message: message.to_string(),
        })
    }

    fn logo(mime_type: &str, size: usize) -> LogoFile {
        LogoFile {
            file_name: "logo.png".to_string(),
            mime_type: mime_type.to_string(),
            data: vec![1; size],
        }
    }

    fn acme() -> Company {
        Company {
            id: CompanyId::from("c1"),
            name: "Acme".to_string(),
            description: "Widgets".to_string(),
            website: "acme.co".to_string(),
            location: "NYC".to_string(),
            logo: Some("https://cdn.example/acme.png".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn blank_field_blocks_submit() {
        for blank in CompanyField::ALL {
            let h = Harness::new();
            h.fill();
            h.setup.on_field_change(blank, String::new());

            block_on(h.setup.submit());

            assert!(h.calls.borrow().is_empty(), "{blank:?} blank");
            assert_eq!(h.setup.error().as_deref(), Some("All fields are required"));
            assert!(!h.setup.is_loading());
        }
    }

    #[test]
    fn whitespace_value_is_sent_as_is() {
        let h = Harness::new();
        h.fill();
        h.setup.on_field_change(CompanyField::Name, " ".into());
        h.reply_with(envelope(true, "Updated"));

        block_on(h.setup.submit());

        let calls = h.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.name, " ");
        assert_eq!(h.setup.error(), None);
    }

    #[test]
    fn submit_sends_one_request_without_file() {
        let h = Harness::new();
        h.fill();
        h.reply_with(envelope(true, "Updated"));

        block_on(h.setup.submit());

        let calls = h.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (company_id, request) = &calls[0];
        assert_eq!(company_id, &CompanyId::from("c1"));
        assert_eq!(request.name, "Acme");
        assert_eq!(request.description, "Widgets");
        assert_eq!(request.website, "acme.co");
        assert_eq!(request.location, "NYC");
        assert_eq!(request.file, None);
    }

    #[test]
    fn submit_includes_selected_file() {
        let h = Harness::new();
        h.fill();
        h.setup.on_file_change(Some(logo("image/png", 64)));
        h.reply_with(envelope(true, "Updated"));

        block_on(h.setup.submit());

        let calls = h.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.file, Some(logo("image/png", 64)));
    }

    #[test]
    fn earlier_error_is_cleared_by_valid_submit() {
        let h = Harness::new();
        block_on(h.setup.submit());
        assert!(h.setup.error().is_some());

        h.fill();
        h.reply_with(envelope(true, "Updated"));
        block_on(h.setup.submit());
        assert_eq!(h.setup.error(), None);
    }

    #[test]
    fn non_image_is_rejected_and_previous_file_kept() {
        let h = Harness::new();
        h.setup.on_file_change(Some(logo("image/jpeg", 10)));
        let before = h.setup.form().file;

        h.setup.on_file_change(Some(logo("application/pdf", 10)));

        assert_eq!(h.setup.form().file, before);
        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error("Please upload an image file.".into())]
        );
    }

    #[test]
    fn logo_size_boundary() {
        let h = Harness::new();
        h.setup.on_file_change(Some(logo("image/png", MAX_LOGO_SIZE)));
        assert_eq!(h.setup.form().file.map(|f| f.size()), Some(MAX_LOGO_SIZE));
        assert!(h.notifications.borrow().is_empty());

        h.setup.on_file_change(Some(logo("image/gif", MAX_LOGO_SIZE + 1)));
        let kept = h.setup.form().file.unwrap();
        assert_eq!(kept.mime_type, "image/png");
        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error("File size must be less than 5MB.".into())]
        );
    }

    #[test]
    fn no_file_selected_is_a_no_op() {
        let h = Harness::new();
        h.setup.on_file_change(None);

        assert_eq!(h.setup.form(), CompanyForm::default());
        assert_eq!(h.changes.get(), 0);
        assert!(h.notifications.borrow().is_empty());
    }

    #[test]
    fn accepted_logo_gets_a_preview() {
        let h = Harness::new();
        assert_eq!(h.setup.logo_preview(), None);

        h.setup.on_file_change(Some(LogoFile {
            file_name: "a.png".into(),
            mime_type: "image/png".into(),
            data: b"png".to_vec(),
        }));

        assert_eq!(
            h.setup.logo_preview().as_deref(),
            Some("data:image/png;base64,cG5n")
        );
    }

    #[test]
    fn remote_company_prefills_text_fields() {
        let h = Harness::new();
        h.setup.on_remote_company_change(Some(&acme()));

        let form = h.setup.form();
        assert_eq!(form.name, "Acme");
        assert_eq!(form.description, "Widgets");
        assert_eq!(form.website, "acme.co");
        assert_eq!(form.location, "NYC");
        assert_eq!(form.file, None);
        assert_eq!(h.changes.get(), 1);
    }

    #[test]
    fn absent_or_unchanged_remote_is_ignored() {
        let h = Harness::new();
        h.setup.on_remote_company_change(None);
        assert_eq!(h.changes.get(), 0);

        h.setup.on_remote_company_change(Some(&acme()));
        h.setup.on_remote_company_change(Some(&acme()));
        assert_eq!(h.changes.get(), 1);
    }

    #[test]
    fn refreshed_remote_applies_until_user_edits() {
        let h = Harness::new();
        h.setup.on_remote_company_change(Some(&acme()));

        let mut refreshed = acme();
        refreshed.location = "Boston".into();
        h.setup.on_remote_company_change(Some(&refreshed));
        assert_eq!(h.setup.field(CompanyField::Location), "Boston");

        h.setup.on_field_change(CompanyField::Name, "Acme Corp".into());
        refreshed.location = "Chicago".into();
        h.setup.on_remote_company_change(Some(&refreshed));

        assert_eq!(h.setup.field(CompanyField::Name), "Acme Corp");
        assert_eq!(h.setup.field(CompanyField::Location), "Boston");
    }

    #[test]
    fn loading_is_set_only_while_request_is_pending() {
        for (outcome, navigations) in
            [(envelope(true, "Updated"), 1), (envelope(false, "Nope"), 0)]
        {
            let h = Harness::new();
            h.fill();
            let reply = h.deferred_reply();
            assert!(!h.setup.is_loading());

            let mut pool = LocalPool::new();
            let setup = h.setup.clone();
            pool.spawner()
                .spawn_local(async move { setup.submit().await })
                .unwrap();
            pool.run_until_stalled();
            assert!(h.setup.is_loading());
            assert!(h.notifications.borrow().is_empty());

            let _ = reply.send(outcome);
            pool.run_until_stalled();
            assert!(!h.setup.is_loading());
            assert_eq!(h.notifications.borrow().len(), 1);
            assert_eq!(h.routes.borrow().len(), navigations);
        }
    }

    #[test]
    fn submit_while_in_flight_is_ignored() {
        let h = Harness::new();
        h.fill();
        let reply = h.deferred_reply();

        let mut pool = LocalPool::new();
        let setup = h.setup.clone();
        pool.spawner()
            .spawn_local(async move { setup.submit().await })
            .unwrap();
        pool.run_until_stalled();

        block_on(h.setup.submit());
        assert_eq!(h.calls.borrow().len(), 1);

        let _ = reply.send(envelope(true, "Updated"));
        pool.run_until_stalled();
        assert!(!h.setup.is_loading());
    }

    #[test]
    fn success_notifies_and_navigates() {
        let h = Harness::new();
        h.fill();
        h.reply_with(envelope(true, "Updated"));

        block_on(h.setup.submit());

        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Success("Updated".into())]
        );
        assert_eq!(*h.routes.borrow(), vec![Route::Companies]);
        assert!(!h.setup.is_loading());
    }

    #[test]
    fn refused_update_shows_server_message_and_keeps_draft() {
        let h = Harness::new();
        h.fill();
        h.reply_with(Err(ClientError::Rejected("Name taken".into())));

        block_on(h.setup.submit());

        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error("Name taken".into())]
        );
        assert!(h.routes.borrow().is_empty());
        assert!(!h.setup.is_loading());
        assert_eq!(h.setup.field(CompanyField::Name), "Acme");
        assert_eq!(h.setup.field(CompanyField::Location), "NYC");
    }

    #[test]
    fn unsuccessful_envelope_is_a_failure() {
        let h = Harness::new();
        h.fill();
        h.reply_with(envelope(false, "Name taken"));

        block_on(h.setup.submit());

        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error("Name taken".into())]
        );
        assert!(h.routes.borrow().is_empty());
    }

    #[test]
    fn failure_without_message_uses_generic_text() {
        let h = Harness::new();
        h.fill();
        h.reply_with(Err(ClientError::APIError(
            StatusCode::BAD_GATEWAY,
            String::new(),
        )));

        block_on(h.setup.submit());

        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error(GENERIC_FAILURE.into())]
        );
        assert!(h.routes.borrow().is_empty());
        assert!(!h.setup.is_loading());
    }

    #[test]
    fn transport_failure_uses_generic_text() {
        let transport = reqwest::multipart::Part::text("")
            .mime_str("not a mime type")
            .unwrap_err();
        let h = Harness::new();
        h.fill();
        h.reply_with(Err(ClientError::Network(transport)));

        block_on(h.setup.submit());

        assert_eq!(
            *h.notifications.borrow(),
            vec![Notification::Error(GENERIC_FAILURE.into())]
        );
        assert!(h.routes.borrow().is_empty());
        assert!(!h.setup.is_loading());
        assert_eq!(h.setup.field(CompanyField::Name), "Acme");
    }

    #[test]
    fn result_after_dispose_is_ignored() {
        let h = Harness::new();
        h.fill();
        let reply = h.deferred_reply();

        let mut pool = LocalPool::new();
        let setup = h.setup.clone();
        pool.spawner()
            .spawn_local(async move { setup.submit().await })
            .unwrap();
        pool.run_until_stalled();

        h.setup.dispose();
        let _ = reply.send(envelope(true, "Updated"));
        pool.run_until_stalled();

        assert!(h.notifications.borrow().is_empty());
        assert!(h.routes.borrow().is_empty());
        assert!(!h.setup.is_loading());
    }
}
