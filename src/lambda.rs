#[cfg(feature = "lambda")]
use contact_relay::config::RelayConfig;
#[cfg(feature = "lambda")]
use contact_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use contact_relay::{ContactReply, InquiryRequest, ResendClient, SubmissionHandler};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

/// Function URL / API Gateway proxy event, only the parts the relay reads.
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl TryFrom<ContactReply> for Response {
    type Error = serde_json::Error;

    fn try_from(reply: ContactReply) -> Result<Self, Self::Error> {
        Ok(Self {
            status_code: reply.status,
            headers: HashMap::from([(
                "content-type".to_string(),
                "application/json".to_string(),
            )]),
            body: serde_json::to_string(&reply.body)?,
        })
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &SubmissionHandler<ResendClient>,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    let request = event.payload;

    // base64 只會出現在二進位內容，JSON 表單不會走到這裡
    let parsed = match request.body.as_deref() {
        Some(body) if !request.is_base64_encoded => serde_json::from_str::<InquiryRequest>(body).ok(),
        _ => None,
    };

    let reply = match parsed {
        Some(inquiry) => handler.handle(inquiry).await,
        None => {
            tracing::warn!("❌ Unreadable inquiry body in Lambda event");
            ContactReply::malformed()
        }
    };

    Ok(Response::try_from(reply)?)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    tracing::info!("Starting contact relay Lambda function");

    let config = RelayConfig::from_env();
    config.validate()?;

    let sender = ResendClient::new(&config.api_base_url, config.api_key()?)?;
    let handler = SubmissionHandler::new(sender, &config);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(handler, event).await
    }))
    .await
}

#[cfg(all(test, feature = "lambda"))]
mod tests {
    use super::*;

    #[test]
    fn test_reply_becomes_proxy_response() {
        let response = Response::try_from(ContactReply::malformed()).unwrap();

        assert_eq!(response.status_code, 400);
        assert_eq!(response.headers["content-type"], "application/json");
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["success"], serde_json::json!(false));
    }

    #[test]
    fn test_event_body_is_optional() {
        let request: Request = serde_json::from_str(r#"{"isBase64Encoded": false}"#).unwrap();
        assert!(request.body.is_none());
    }
}
