use contracts::domain::a001_comparison::dto::{PdfEmailRequest, PdfGenerateRequest, PdfInfoResponse};
use contracts::shared::envelope::ApiEnvelope;
use serde_json::Value;
use web_sys::AbortSignal;

use crate::shared::api_client::{ApiClient, ApiError};

pub async fn generate_comparison_pdf(
    client: &ApiClient,
    id: &str,
    force: bool,
    abort: Option<&AbortSignal>,
) -> Result<PdfInfoResponse, ApiError> {
    let response: ApiEnvelope<PdfInfoResponse> = client
        .post_with_abort(
            &format!("/comparisons/{}/pdf", id),
            &PdfGenerateRequest { force },
            abort,
        )
        .await?;
    Ok(response.data)
}

pub async fn send_comparison_pdf_email(
    client: &ApiClient,
    id: &str,
    request: &PdfEmailRequest,
) -> Result<(), ApiError> {
    let _: Value = client
        .post(&format!("/comparisons/{}/pdf/email", id), request)
        .await?;
    Ok(())
}
