//! Payment gateway client
//!
//! Order creation against a Razorpay-compatible REST API.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::payment::model::{GatewayOrder, GatewayOrderRequest};

/// Remote order creation. Implementations must not retry.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, ApiError>;
}

pub struct RazorpayGateway {
    client: Client,
    api_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    /// Build a client bound to the configured timeout
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, ApiError> {
        let url = format!("{}/orders", self.api_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Gateway rejected order");
            return Err(ApiError::GatewayError(format!(
                "order creation failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let order = response.json::<GatewayOrder>().await.map_err(|e| {
            ApiError::GatewayError(format!("unreadable order response: {}", e))
        })?;

        tracing::debug!(order_id = %order.id, amount = order.amount, "Gateway order created");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(api_url: &str) -> GatewayConfig {
        GatewayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "secret".to_string(),
            api_url: api_url.to_string(),
            currency: "INR".to_string(),
            timeout: Duration::from_secs(3),
        }
    }

    #[test]
    fn test_new_builds_client_from_config() {
        let gateway = RazorpayGateway::new(&config("https://api.razorpay.com/v1/")).unwrap();
        assert_eq!(gateway.api_url, "https://api.razorpay.com/v1");
        assert_eq!(gateway.key_id, "rzp_test_key");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_gateway_error() {
        let gateway = RazorpayGateway::new(&config("http://127.0.0.1:1")).unwrap();
        let result = gateway
            .create_order(&GatewayOrderRequest {
                amount: 1_000,
                currency: "INR".to_string(),
                receipt: "receipt".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApiError::GatewayError(_))));
    }
}
