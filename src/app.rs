//! Application state and core logic

use crate::config::AppConfig;
use crate::dispatch;
use crate::service::{DocumentService, ServiceError};
use crate::state::{AppState, ChooseFocus, DirectoryState, PartyRecord, Step, ValidationErrors};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

type DirectoryResult = Result<Vec<PartyRecord>, ServiceError>;
type SubmitResult = Result<PathBuf, ServiceError>;

/// A background request whose result is picked up by `poll_background`
struct Pending<T> {
    rx: oneshot::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Pending<T> {
    fn spawn(fut: impl std::future::Future<Output = T> + Send + 'static) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
        Self { rx, task }
    }

    /// `None` while still running; a dropped sender counts as aborted
    fn try_take(&mut self) -> Option<Result<T, oneshot::error::TryRecvError>> {
        match self.rx.try_recv() {
            Err(oneshot::error::TryRecvError::Empty) => None,
            other => Some(other),
        }
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: AppConfig,
    service: Arc<dyn DocumentService>,
    /// Pending directory fetch
    directory: Option<Pending<DirectoryResult>>,
    /// Party selected before the running fetch, matched again once it lands
    previous_party: Option<PartyRecord>,
    /// Pending document generation
    submission: Option<Pending<SubmitResult>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app and start the directory fetch. Must run inside a tokio runtime.
    pub fn new(config: AppConfig, service: Arc<dyn DocumentService>) -> Self {
        let mut app = Self {
            state: AppState::default(),
            config,
            service,
            directory: None,
            previous_party: None,
            submission: None,
            quit: false,
        };
        app.load_directory();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a document request is in flight
    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Spawn the directory read; any fetch still in flight is aborted
    pub fn load_directory(&mut self) {
        let selected = self
            .state
            .wizard
            .selected_party(self.state.parties())
            .cloned();
        self.previous_party = selected.or(self.previous_party.take());

        self.directory = None;
        self.state.directory = DirectoryState::Loading;

        let service = Arc::clone(&self.service);
        self.directory = Some(Pending::spawn(async move { service.list_parties().await }));
    }

    /// Pick up finished background requests without blocking
    pub fn poll_background(&mut self) {
        if let Some(result) = self.directory.as_mut().and_then(Pending::try_take) {
            self.directory = None;
            let result = result.unwrap_or_else(|_| {
                Err(ServiceError::Network {
                    url: self.config.directory_endpoint.clone(),
                    message: "request aborted".to_string(),
                })
            });
            self.finish_directory_load(result);
        }

        if let Some(result) = self.submission.as_mut().and_then(Pending::try_take) {
            self.submission = None;
            let result = result.unwrap_or_else(|_| {
                Err(ServiceError::Network {
                    url: String::new(),
                    message: "request aborted".to_string(),
                })
            });
            self.finish_submission(result);
        }
    }

    fn finish_directory_load(&mut self, result: DirectoryResult) {
        match result {
            Ok(parties) => {
                info!(count = parties.len(), "directory ready");
                let previous = self.previous_party.take();
                let reselected = self.state.wizard.reselect_party(previous.as_ref(), &parties);
                if previous.is_some() && reselected.is_none() {
                    info!("selected party no longer in directory");
                }
                self.state.party_cursor = reselected.unwrap_or(0);
                self.state.directory = DirectoryState::Loaded(parties);
            }
            Err(e) => {
                warn!(error = %e, "directory fetch failed");
                self.push_error(format!(
                    "Não foi possível carregar os advogados: {e}\nPressione 'r' para tentar novamente."
                ));
                self.state.directory = DirectoryState::Failed(e.to_string());
            }
        }
    }

    fn finish_submission(&mut self, result: SubmitResult) {
        match result {
            Ok(path) => {
                self.state.status_message = Some(format!("Documento salvo em {}", path.display()));
                self.state.last_download = Some(path);
            }
            Err(e) => {
                warn!(error = %e, "document submission failed");
                self.push_error(format!("Falha ao gerar o documento: {e}"));
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.step() {
            Step::ChooseType => self.handle_choose_key(key),
            Step::FillFields => self.handle_fill_key(key),
        }
        Ok(())
    }

    /// Handle keys on the document type / party step
    fn handle_choose_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.state.choose_focus.toggle();
            }
            KeyCode::Char(' ') => self.state.select_highlighted(),
            KeyCode::Enter => {
                self.state.select_highlighted();
                self.try_advance();
            }
            KeyCode::Char('r') if !self.state.directory.is_loading() => self.load_directory(),
            _ => {}
        }
    }

    fn try_advance(&mut self) {
        let parties = self.state.directory.records();
        match self.state.wizard.advance(parties) {
            Ok(()) => {}
            Err(refused) => {
                // Document chosen: move on to the party list
                if self.state.wizard.document_type().is_some() {
                    self.state.choose_focus = ChooseFocus::Parties;
                }
                self.state.status_message = Some(refused.to_string());
            }
        }
    }

    /// Handle keys on the fill-in step
    fn handle_fill_key(&mut self, key: KeyEvent) {
        let submit_pressed = matches!(key.code, KeyCode::Char('s'))
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER));
        if submit_pressed {
            self.submit_form();
            return;
        }

        if key.code == KeyCode::Esc {
            self.state.wizard.back();
            return;
        }

        let Some(form) = self.state.wizard.form_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.clear();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
    }

    fn report_invalid(&mut self, errors: &ValidationErrors) {
        info!(count = errors.len(), "submit refused by validation");
        self.state.status_message = Some(format!("{} campo(s) inválido(s)", errors.len()));
    }

    /// Validate the active form and, when valid, start generating the document
    fn submit_form(&mut self) {
        if self.is_submitting() {
            return;
        }
        let Some(party) = self
            .state
            .wizard
            .selected_party(self.state.directory.records())
            .cloned()
        else {
            self.push_error("Nenhum advogado selecionado");
            return;
        };
        let Some(form) = self.state.wizard.form_mut() else {
            return;
        };
        let validated = match form.handle_submit(|validated| validated) {
            Ok(validated) => validated,
            Err(errors) => {
                self.report_invalid(&errors);
                return;
            }
        };

        let service = Arc::clone(&self.service);
        let config = self.config.clone();
        self.submission = Some(Pending::spawn(async move {
            dispatch::submit(service.as_ref(), &config, &validated, &party).await
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockDocumentService;
    use crate::state::DocumentType;
    use serde_json::Value as JsonValue;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn lawyer() -> PartyRecord {
        PartyRecord {
            beneficiary_name: "João Silva".to_string(),
            phone: "31988887777".to_string(),
            email: "joao@example.com".to_string(),
            tax_id: "12345678901".to_string(),
            license_id: "MG12345".to_string(),
            salutation: "Dr.".to_string(),
            address: "Av. Afonso Pena, 1".to_string(),
            nationality: "brasileiro".to_string(),
        }
    }

    fn service_with_parties(parties: Vec<PartyRecord>) -> MockDocumentService {
        let mut service = MockDocumentService::new();
        service
            .expect_list_parties()
            .times(1)
            .returning(move || Ok(parties.clone()));
        service
    }

    /// Await the spawned directory fetch
    async fn settle_directory(app: &mut App) {
        if let Some(mut pending) = app.directory.take() {
            let result = (&mut pending.rx).await.expect("directory task dropped sender");
            app.finish_directory_load(result);
        }
    }

    /// Await the spawned document request
    async fn settle_submission(app: &mut App) {
        if let Some(mut pending) = app.submission.take() {
            let result = (&mut pending.rx).await.expect("submission task dropped sender");
            app.finish_submission(result);
        }
    }

    async fn app_with(service: MockDocumentService, config: AppConfig) -> App {
        let mut app = App::new(config, Arc::new(service));
        settle_directory(&mut app).await;
        app
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Choose ReceiptOfFees and the first party from the keyboard
    async fn choose_receipt_and_first_party(app: &mut App) {
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
    }

    mod directory {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_loads_parties_on_mount() {
            let app = app_with(service_with_parties(vec![lawyer()]), AppConfig::default()).await;
            assert_eq!(app.state.parties(), &[lawyer()]);
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_failure_is_reported_and_retry_refetches() {
            let mut service = MockDocumentService::new();
            let mut seq = mockall::Sequence::new();
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| {
                    Err(ServiceError::Status {
                        url: "http://dir".to_string(),
                        status: 503,
                    })
                });
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| Ok(vec![lawyer()]));

            let mut app = app_with(service, AppConfig::default()).await;
            assert!(matches!(app.state.directory, DirectoryState::Failed(_)));
            assert!(app.state.has_errors());
            assert!(app.state.parties().is_empty());

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());

            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
            assert!(app.state.directory.is_loading());
            settle_directory(&mut app).await;
            assert_eq!(app.state.parties().len(), 1);
        }

        #[tokio::test]
        async fn test_reload_keeps_selected_party_by_identity() {
            let ana = PartyRecord {
                beneficiary_name: "Ana".to_string(),
                license_id: "MG1".to_string(),
                ..Default::default()
            };
            let bruno = PartyRecord {
                beneficiary_name: "Bruno".to_string(),
                license_id: "MG2".to_string(),
                ..Default::default()
            };
            let carla = PartyRecord {
                beneficiary_name: "Carla".to_string(),
                license_id: "MG3".to_string(),
                ..Default::default()
            };

            let mut service = MockDocumentService::new();
            let mut seq = mockall::Sequence::new();
            let first = vec![ana.clone(), bruno];
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(first.clone()));
            let second = vec![carla, ana];
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(second.clone()));

            let mut app = app_with(service, AppConfig::default()).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert_eq!(app.state.wizard.selected_party_index(), Some(0));

            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
            settle_directory(&mut app).await;

            let selected = app.state.wizard.selected_party(app.state.parties());
            assert_eq!(selected.map(|p| p.beneficiary_name.as_str()), Some("Ana"));
            assert_eq!(app.state.party_cursor, 1);
        }

        #[tokio::test]
        async fn test_reload_clears_selection_when_party_removed() {
            let mut service = MockDocumentService::new();
            let mut seq = mockall::Sequence::new();
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| Ok(vec![lawyer()]));
            service
                .expect_list_parties()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| {
                    Ok(vec![PartyRecord {
                        beneficiary_name: "Outro".to_string(),
                        license_id: "SP999".to_string(),
                        ..Default::default()
                    }])
                });

            let mut app = app_with(service, AppConfig::default()).await;
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();

            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
            settle_directory(&mut app).await;
            assert_eq!(app.state.wizard.selected_party_index(), None);

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.step(), Step::FillFields);
            let form = app.state.wizard.form().unwrap();
            assert_eq!(form.value("beneficiario"), Some("Outro"));
        }

        #[tokio::test]
        async fn test_poll_background_picks_up_result() {
            let mut app = App::new(
                AppConfig::default(),
                Arc::new(service_with_parties(vec![lawyer()])),
            );
            for _ in 0..100 {
                app.poll_background();
                if !app.state.directory.is_loading() {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert_eq!(app.state.parties().len(), 1);
        }
    }

    mod choose_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_enter_without_party_stays_and_hints() {
            let mut app = app_with(service_with_parties(vec![]), AppConfig::default()).await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.step(), Step::ChooseType);
            assert_eq!(
                app.state.wizard.document_type(),
                Some(DocumentType::ReceiptOfFees)
            );
            assert_eq!(app.state.choose_focus, ChooseFocus::Parties);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Selecione o advogado")
            );
        }

        #[tokio::test]
        async fn test_advances_when_both_selected() {
            let mut app =
                app_with(service_with_parties(vec![lawyer()]), AppConfig::default()).await;
            choose_receipt_and_first_party(&mut app).await;

            assert_eq!(app.state.step(), Step::FillFields);
            let form = app.state.wizard.form().unwrap();
            assert_eq!(form.value("email"), Some("joao@example.com"));
        }

        #[tokio::test]
        async fn test_quit_key() {
            let mut app = app_with(service_with_parties(vec![]), AppConfig::default()).await;
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod fill_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_and_backspace_edit_active_field() {
            let mut app =
                app_with(service_with_parties(vec![lawyer()]), AppConfig::default()).await;
            choose_receipt_and_first_party(&mut app).await;

            type_text(&mut app, "Maria").await;
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(
                app.state.wizard.form().unwrap().value("nomeCliente"),
                Some("Mari")
            );

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "123").await;
            assert_eq!(app.state.wizard.form().unwrap().value("cnpj"), Some("123"));

            app.handle_key(ctrl('u')).await.unwrap();
            assert_eq!(app.state.wizard.form().unwrap().value("cnpj"), Some(""));
        }

        #[tokio::test]
        async fn test_invalid_submit_sends_nothing() {
            let mut service = service_with_parties(vec![lawyer()]);
            service.expect_generate_document().times(0);
            let mut app = app_with(service, AppConfig::default()).await;
            choose_receipt_and_first_party(&mut app).await;

            app.handle_key(ctrl('s')).await.unwrap();

            let form = app.state.wizard.form().unwrap();
            // Party auto-fill covers telefone, email, cpf and oab
            assert_eq!(form.error_count(), 8);
            assert!(!app.state.has_errors());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("8 campo(s) inválido(s)")
            );
        }

        #[tokio::test]
        async fn test_back_keeps_values() {
            let mut app =
                app_with(service_with_parties(vec![lawyer()]), AppConfig::default()).await;
            choose_receipt_and_first_party(&mut app).await;
            type_text(&mut app, "Ana").await;

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.step(), Step::ChooseType);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.step(), Step::FillFields);
            assert_eq!(
                app.state.wizard.form().unwrap().value("nomeCliente"),
                Some("Ana")
            );
        }
    }

    mod end_to_end {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn fill_receipt(app: &mut App) {
            for value in [
                "Maria da Silva",
                "12345678000190",
                "Rua Guajajaras, 100",
                "30180100",
                "0",
                "12",
                "150.50",
                "2024-03-15",
            ] {
                type_text(app, value).await;
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
        }

        #[tokio::test]
        async fn test_receipt_submission_posts_once_and_saves_download() {
            let dir = tempfile::tempdir().unwrap();
            let config = AppConfig {
                download_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            };

            let mut service = service_with_parties(vec![lawyer()]);
            service
                .expect_generate_document()
                .withf(|endpoint: &str, payload: &JsonValue| {
                    let expected_keys = [
                        "nomeCliente",
                        "cnpj",
                        "endereco",
                        "cep",
                        "numeroContrato",
                        "parcelas",
                        "valor",
                        "data",
                        "telefone",
                        "email",
                        "cpf",
                        "oab",
                        "beneficiario",
                        "tratamento",
                        "enderecoAdvogado",
                        "nacionalidadeAdvogado",
                    ];
                    endpoint == "http://127.0.0.1:5000/api/gerar-recibo"
                        && expected_keys.iter().all(|k| payload.get(k).is_some())
                        && payload["parcelas"] == 12
                        && payload["valor"] == 150.5
                })
                .times(1)
                .returning(|_, _| Ok(b"docx-bytes".to_vec()));

            let mut app = app_with(service, config).await;
            choose_receipt_and_first_party(&mut app).await;
            fill_receipt(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            settle_submission(&mut app).await;

            let expected = dir.path().join("ReceiptOfFees - Maria da Silva.docx");
            assert!(!app.state.has_errors(), "{:?}", app.state.current_error());
            assert_eq!(app.state.last_download.as_deref(), Some(expected.as_path()));
            assert_eq!(std::fs::read(&expected).unwrap(), b"docx-bytes");
            assert_eq!(app.state.step(), Step::FillFields);
        }

        #[tokio::test]
        async fn test_repeat_submit_while_in_flight_sends_once() {
            let dir = tempfile::tempdir().unwrap();
            let config = AppConfig {
                download_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            };

            let mut service = service_with_parties(vec![lawyer()]);
            service
                .expect_generate_document()
                .times(1)
                .returning(|_, _| Ok(b"docx-bytes".to_vec()));

            let mut app = app_with(service, config).await;
            choose_receipt_and_first_party(&mut app).await;
            fill_receipt(&mut app).await;

            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.is_submitting());
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.is_submitting());

            // Typing stays responsive while the request runs
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();

            settle_submission(&mut app).await;
            assert!(!app.is_submitting());
            assert!(app.state.last_download.is_some());
            assert!(app
                .state
                .status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("Documento salvo em")));
        }

        #[tokio::test]
        async fn test_submission_failure_shows_error_and_keeps_form() {
            let dir = tempfile::tempdir().unwrap();
            let config = AppConfig {
                download_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            };

            let mut service = service_with_parties(vec![lawyer()]);
            service.expect_generate_document().times(1).returning(|url, _| {
                Err(ServiceError::Network {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            });

            let mut app = app_with(service, config).await;
            choose_receipt_and_first_party(&mut app).await;
            fill_receipt(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            settle_submission(&mut app).await;

            assert!(app.state.has_errors());
            assert!(app
                .state
                .current_error()
                .unwrap()
                .starts_with("Falha ao gerar o documento"));
            assert_eq!(
                app.state.wizard.form().unwrap().value("nomeCliente"),
                Some("Maria da Silva")
            );

            // Keys are swallowed by the dialog until dismissed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }
}
