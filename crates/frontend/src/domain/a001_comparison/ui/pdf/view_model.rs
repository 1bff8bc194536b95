use super::model;
use crate::shared::api_client::ApiClient;
use crate::shared::clipboard::{copy_to_clipboard_with_callback, share_or_copy};
use crate::shared::task::TaskSlot;
use contracts::domain::a001_comparison::dto::{PdfEmailRequest, PdfInfoResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::AbortController;

pub const FEEDBACK_MS: u32 = 2000;

/// Generation status of the PDF modal
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PdfStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl PdfStatus {
    pub fn headline(&self) -> &'static str {
        match self {
            PdfStatus::Idle => "Pronto para gerar o PDF",
            PdfStatus::Loading => "Gerando o PDF...",
            PdfStatus::Success => "PDF pronto para compartilhar",
            PdfStatus::Error(_) => "Falha ao gerar o PDF",
        }
    }

    pub fn css_modifier(&self) -> &'static str {
        match self {
            PdfStatus::Idle => "idle",
            PdfStatus::Loading => "loading",
            PdfStatus::Success => "success",
            PdfStatus::Error(_) => "error",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EmailStatus {
    #[default]
    Idle,
    Sending,
    Sent,
}

pub fn comparison_label(title: &str, id: &str) -> String {
    if title.trim().is_empty() {
        format!("#{}", id)
    } else {
        title.trim().to_string()
    }
}

pub fn default_email_message(label: &str, url: &str) -> String {
    format!("Olá!\nSegue o comparativo {}:\n{}", label, url)
}

/// Email request, or the message to show instead of sending
pub fn build_email_request(link: &str, to: &str, message: &str) -> Result<PdfEmailRequest, String> {
    if link.is_empty() {
        return Err("Aguarde até que o PDF esteja pronto.".to_string());
    }
    let to = to.trim();
    if to.is_empty() || !to.contains('@') {
        return Err("Informe um e-mail válido.".to_string());
    }
    Ok(PdfEmailRequest {
        to: to.to_string(),
        message: message.to_string(),
        url: link.to_string(),
    })
}

/// ViewModel of one PDF modal instance
#[derive(Clone)]
pub struct PdfViewModel {
    pub comparison_id: RwSignal<String>,
    pub label: RwSignal<String>,
    pub status: RwSignal<PdfStatus>,
    pub info: RwSignal<Option<PdfInfoResponse>>,
    pub email_to: RwSignal<String>,
    pub email_message: RwSignal<String>,
    pub email_status: RwSignal<EmailStatus>,
    pub email_error: RwSignal<Option<String>>,
    pub feedback: RwSignal<Option<String>>,
    client: ApiClient,
    abort: StoredValue<Option<AbortController>, LocalStorage>,
    requests: TaskSlot,
    feedback_slot: TaskSlot,
}

impl PdfViewModel {
    pub fn new(client: ApiClient) -> Self {
        Self {
            comparison_id: RwSignal::new(String::new()),
            label: RwSignal::new(String::new()),
            status: RwSignal::new(PdfStatus::Idle),
            info: RwSignal::new(None),
            email_to: RwSignal::new(String::new()),
            email_message: RwSignal::new(String::new()),
            email_status: RwSignal::new(EmailStatus::Idle),
            email_error: RwSignal::new(None),
            feedback: RwSignal::new(None),
            client,
            abort: StoredValue::new_local(None),
            requests: TaskSlot::new(),
            feedback_slot: TaskSlot::new(),
        }
    }

    pub fn link(&self) -> String {
        self.info
            .with(|i| i.as_ref().map(PdfInfoResponse::link))
            .unwrap_or_default()
    }

    fn abort_in_flight(&self) {
        self.requests.cancel_all();
        if let Some(controller) = self.abort.try_update_value(Option::take).flatten() {
            controller.abort();
        }
    }

    /// Open the modal for a comparison and start generating
    pub fn open(&self, comparison_id: String, label: String) {
        self.reset();
        self.comparison_id.set(comparison_id);
        self.label.set(label);
        self.generate(false);
    }

    /// Abort whatever is in flight and go back to idle
    pub fn reset(&self) {
        self.abort_in_flight();
        self.feedback_slot.cancel_all();
        self.status.set(PdfStatus::Idle);
        self.info.set(None);
        self.email_to.set(String::new());
        self.email_message.set(String::new());
        self.email_status.set(EmailStatus::Idle);
        self.email_error.set(None);
        self.feedback.set(None);
    }

    pub fn generate(&self, force: bool) {
        let id = self.comparison_id.get_untracked();
        if id.is_empty() {
            return;
        }
        self.abort_in_flight();
        let ticket = self.requests.arm();
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(AbortController::signal);
        self.abort.set_value(controller);
        self.status.set(PdfStatus::Loading);

        let vm = self.clone();
        spawn_local(async move {
            let result =
                model::generate_comparison_pdf(&vm.client, &id, force, signal.as_ref()).await;
            if !ticket.is_current() {
                return;
            }
            vm.abort.set_value(None);
            match result {
                Ok(info) => {
                    if vm.email_message.with_untracked(String::is_empty) {
                        let label = vm.label.get_untracked();
                        vm.email_message
                            .set(default_email_message(&label, &info.link()));
                    }
                    vm.info.set(Some(info));
                    vm.status.set(PdfStatus::Success);
                }
                Err(e) if e.is_aborted() => log::debug!("pdf generation for {} aborted", id),
                Err(e) => vm.status.set(PdfStatus::Error(e.to_string())),
            }
        });
    }

    fn flash(&self, message: &str) {
        self.feedback.set(Some(message.to_string()));
        let feedback = self.feedback;
        self.feedback_slot
            .schedule(FEEDBACK_MS, move || feedback.set(None));
    }

    pub fn copy_link(&self) {
        let link = self.link();
        if link.is_empty() {
            return;
        }
        let vm = self.clone();
        copy_to_clipboard_with_callback(&link, move |ok| {
            vm.flash(if ok { "Copiado" } else { "Não foi possível copiar" })
        });
    }

    pub fn share_link(&self) {
        let link = self.link();
        if link.is_empty() {
            return;
        }
        let title = format!("Comparativo {}", self.label.get_untracked());
        let vm = self.clone();
        share_or_copy(&title, &link, move |ok| {
            vm.flash(if ok { "Compartilhado" } else { "Não foi possível compartilhar" })
        });
    }

    pub fn download(&self) {
        let link = self.link();
        if link.is_empty() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.open_with_url_and_target(&link, "_blank") {
                log::warn!("could not open pdf link: {:?}", e);
            }
        }
    }

    pub fn send_email(&self) {
        let request = match build_email_request(
            &self.link(),
            &self.email_to.get_untracked(),
            &self.email_message.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                self.email_error.set(Some(message));
                return;
            }
        };
        let id = self.comparison_id.get_untracked();
        self.email_status.set(EmailStatus::Sending);
        self.email_error.set(None);

        let vm = self.clone();
        spawn_local(async move {
            match model::send_comparison_pdf_email(&vm.client, &id, &request).await {
                Ok(()) => vm.email_status.set(EmailStatus::Sent),
                Err(e) => {
                    vm.email_status.set(EmailStatus::Idle);
                    vm.email_error.set(Some(e.to_string()));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_request_requires_link_and_address() {
        assert_eq!(
            build_email_request("", "ana@empresa.com", "oi").unwrap_err(),
            "Aguarde até que o PDF esteja pronto."
        );
        assert_eq!(
            build_email_request("https://x/pdf", "  ", "oi").unwrap_err(),
            "Informe um e-mail válido."
        );
        let ok = build_email_request("https://x/pdf", " ana@empresa.com ", "oi").unwrap();
        assert_eq!(ok.to, "ana@empresa.com");
        assert_eq!(ok.url, "https://x/pdf");
    }

    #[test]
    fn test_default_email_message() {
        assert_eq!(comparison_label("  ", "9"), "#9");
        assert_eq!(
            default_email_message(&comparison_label("Empresa ABC", "9"), "https://x/pdf"),
            "Olá!\nSegue o comparativo Empresa ABC:\nhttps://x/pdf"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(PdfStatus::default(), PdfStatus::Idle);
        assert_eq!(PdfStatus::Loading.headline(), "Gerando o PDF...");
        assert_eq!(PdfStatus::Error("x".into()).css_modifier(), "error");
    }
}
