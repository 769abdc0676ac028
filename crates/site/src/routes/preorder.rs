//! Pre-order page and submission handlers.
//!
//! The page renders the intake form with constraint attributes mirroring the
//! validation schema; the API handler re-validates every payload against the
//! same schema before any mail is sent, then delivers the operator
//! notification.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::preorder::{PreorderForm, Quantity, UsageType};
use crate::state::AppState;

/// A `<select>` option on the pre-order form.
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn quantity_options() -> Vec<SelectOption> {
    Quantity::ALL
        .iter()
        .map(|quantity| SelectOption {
            value: quantity.as_str(),
            label: match quantity {
                Quantity::One => "1 Unit",
                Quantity::Two => "2 Units",
                Quantity::Three => "3 Units",
                Quantity::Four => "4 Units",
                Quantity::FivePlus => "5+ Units",
            },
        })
        .collect()
}

fn usage_options() -> Vec<SelectOption> {
    vec![
        SelectOption {
            value: UsageType::Home.as_str(),
            label: "Home",
        },
        SelectOption {
            value: UsageType::Business.as_str(),
            label: "Business",
        },
    ]
}

/// Pre-order page template.
#[derive(Template, WebTemplate)]
#[template(path = "preorder.html")]
pub struct PreorderPageTemplate {
    pub usage_options: Vec<SelectOption>,
    pub quantity_options: Vec<SelectOption>,
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct PreorderResponse {
    pub success: bool,
}

/// Display the pre-order form page.
#[instrument]
pub async fn page() -> PreorderPageTemplate {
    PreorderPageTemplate {
        usage_options: usage_options(),
        quantity_options: quantity_options(),
    }
}

/// Submit a pre-order.
///
/// POST /api/preorder
///
/// Validates the payload against the submission schema, then emails the
/// operator. Exactly one delivery attempt is made; resubmission is the
/// caller's decision.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<PreorderForm>,
) -> Result<Json<PreorderResponse>> {
    let submission = form.validate()?;

    state
        .email()
        .send_preorder_notification(&submission)
        .await?;

    tracing::info!(
        email = %submission.email,
        usage = %submission.usage,
        quantity = %submission.quantity,
        "Pre-order received"
    );
    Ok(Json(PreorderResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use secrecy::SecretString;

    use super::*;
    use crate::config::{EmailConfig, SiteConfig};
    use crate::error::{AppError, GENERIC_DELIVERY_ERROR};
    use crate::services::EmailService;
    use crate::services::email::MailTransport;
    use crate::services::email::testing::FakeTransport;

    fn test_state(transport: Arc<dyn MailTransport>) -> AppState {
        let config = SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            email: EmailConfig {
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
                smtp_username: "alerts@acutemeter.com".to_string(),
                smtp_password: SecretString::from("pass"),
                from_address: "alerts@acutemeter.com".to_string(),
                notify_address: "nathan@acutemeter.com".to_string(),
                send_timeout_secs: 10,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        let email = EmailService::with_transport(transport, &config.email);
        AppState::new(config, email)
    }

    fn valid_form() -> PreorderForm {
        PreorderForm {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@x.com".to_string(),
            phone: "0551234567".to_string(),
            address: "12 Main Street, Accra".to_string(),
            usage: "home".to_string(),
            quantity: "1".to_string(),
            message: None,
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_sends_exactly_once() {
        let transport = Arc::new(FakeTransport::succeeding());
        let state = test_state(Arc::clone(&transport) as _);

        let response = submit(State(state), Json(valid_form())).await.unwrap();

        assert!(response.0.success);
        assert_eq!(transport.sent_count(), 1);

        let mime = transport.captured().pop().unwrap();
        assert!(mime.contains("Jo Doe"));
        assert!(mime.contains("jo@x.com"));
        assert!(mime.contains("0551234567"));
        assert!(mime.contains("12 Main Street, Accra"));
    }

    #[tokio::test]
    async fn test_transport_failure_yields_generic_error() {
        let transport = Arc::new(FakeTransport::failing());
        let state = test_state(Arc::clone(&transport) as _);

        let err = submit(State(state), Json(valid_form())).await.unwrap_err();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains(GENERIC_DELIVERY_ERROR));
        // One attempt, no retry
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_transport() {
        let transport = Arc::new(FakeTransport::succeeding());
        let state = test_state(Arc::clone(&transport) as _);

        let form = PreorderForm {
            first_name: "J".to_string(),
            ..valid_form()
        };
        let err = submit(State(state), Json(form)).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("firstName"));
        assert!(body.contains("at least 2 characters"));

        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_every_invalid_field_is_reported() {
        let transport = Arc::new(FakeTransport::succeeding());
        let state = test_state(Arc::clone(&transport) as _);

        let err = submit(State(state), Json(PreorderForm::default()))
            .await
            .unwrap_err();
        let body = body_string(err.into_response()).await;

        for field in [
            "firstName",
            "lastName",
            "email",
            "phone",
            "address",
            "usage",
            "quantity",
        ] {
            assert!(body.contains(field), "missing {field} in {body}");
        }
    }

    #[test]
    fn test_page_renders_schema_constraints() {
        let html = PreorderPageTemplate {
            usage_options: usage_options(),
            quantity_options: quantity_options(),
        }
        .render()
        .unwrap();

        // The form mirrors the validation schema as constraint attributes
        assert!(html.contains(r#"name="firstName""#));
        assert!(html.contains(r#"minlength="2""#));
        assert!(html.contains(r#"minlength="10""#));
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"value="5+""#));
        assert!(html.contains(r#"value="business""#));
    }
}
