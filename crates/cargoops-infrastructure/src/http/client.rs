// ============================================================================
// CargoOps Infrastructure - HTTP Warehouse Repository
// File: crates/cargoops-infrastructure/src/http/client.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use cargoops_core::repositories::WarehouseRepository;
use cargoops_core::{
    BinMap, DiscrepancyUpdate, DomainError, FetchOutcome, InventoryBin, Package, PickOrder, PickSlip,
    QualityCheck, ReceiveOutcome, ReceivingReceipt, Session, StoringOrder,
};
use cargoops_shared::config::{ApiSettings, AuthHeader};
use cargoops_shared::utils::mask_credential;

use super::dto::{
    BinAllocationRequest, BinAllocationResponse, DiscrepancyRequest, InventoryRow, PackageRow, PickOrderRow,
    PickSlipRow, QualityCheckRequest, ReceiveFailure, ReceiveRequest, StoringOrderRow,
};
use super::envelope::decode_list;
use super::normalize::bin_map;

/// `WarehouseRepository` over the warehouse REST API, scoped to one session.
pub struct HttpWarehouseRepository {
    client: Client,
    base_url: String,
    auth_header: AuthHeader,
    session: Session,
}

fn transport_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        error!("Request timed out: {}", e);
        return DomainError::network(None, "request timed out");
    }
    error!("HTTP transport error: {}", e);
    DomainError::network(e.status().map(|s| s.as_u16()), e.to_string())
}

/// Response body as text; a body that cannot be read counts as empty.
async fn body_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(%status, error = %e, "Could not read response body");
            String::new()
        }
    }
}

async fn status_error(response: Response) -> DomainError {
    let status = response.status();
    let body = body_text(response).await;
    error!("API returned {}: {}", status, body);
    DomainError::network(Some(status.as_u16()), format!("API returned {}", status))
}

impl HttpWarehouseRepository {
    pub fn new(settings: &ApiSettings, session: Session) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| DomainError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            base_url = %settings.base_url,
            header = settings.auth_header.header_name(),
            credential = %mask_credential(session.credential()),
            "HTTP warehouse repository ready"
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auth_header: settings.auth_header,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| DomainError::InternalError(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// List endpoints are scoped by the acting employee and role.
    fn list_url(&self, path: &str, filters: &[(&str, Option<&str>)]) -> Result<Url, DomainError> {
        let mut url = self.endpoint(path)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("employee_id", &self.session.employee_id)
                .append_pair("role", &self.session.role);
            for (name, value) in filters {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(self.auth_header.header_name(), self.session.credential())
            .header(ACCEPT, "application/json")
    }

    async fn get_list<R, T>(
        &self,
        resource: &str,
        filters: &[(&str, Option<&str>)],
    ) -> Result<FetchOutcome<T>, DomainError>
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = DomainError>,
    {
        let url = self.list_url(resource, filters)?;
        debug!(%url, "GET list");

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::malformed(resource, e.to_string()))?;

        let outcome = decode_list::<R, T>(body, resource)?;
        if !outcome.skipped.is_empty() {
            warn!(resource, skipped = outcome.skipped.len(), "Some records could not be decoded");
        }
        Ok(outcome)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, DomainError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        self.authorized(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn put_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, DomainError> {
        let url = self.endpoint(path)?;
        debug!(%url, "PUT");
        self.authorized(self.client.put(url))
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl WarehouseRepository for HttpWarehouseRepository {
    async fn storing_orders(&self) -> Result<FetchOutcome<StoringOrder>, DomainError> {
        self.get_list::<StoringOrderRow, _>("storing-orders", &[]).await
    }

    async fn packages(&self, storing_order_id: Option<&str>) -> Result<FetchOutcome<Package>, DomainError> {
        self.get_list::<PackageRow, _>("packages", &[("storing_order_id", storing_order_id)])
            .await
    }

    async fn pick_slips(&self) -> Result<FetchOutcome<PickSlip>, DomainError> {
        self.get_list::<PickSlipRow, _>("pick-slips", &[]).await
    }

    async fn pick_orders(&self, pick_slip_id: Option<&str>) -> Result<FetchOutcome<PickOrder>, DomainError> {
        self.get_list::<PickOrderRow, _>("pick-orders", &[("pick_slip_id", pick_slip_id)])
            .await
    }

    async fn allocate_bins(&self, package_id: &str) -> Result<BinMap, DomainError> {
        info!(package_id, "Requesting bin allocation");
        let request = BinAllocationRequest {
            package_id,
            employee_id: &self.session.employee_id,
        };
        let response = self.post_json("bin-allocation", &request).await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::FORBIDDEN => {
                warn!(package_id, "Bin allocation not authorized");
                return Err(DomainError::Rejected("You are not authorized to allocate bins".into()));
            }
            StatusCode::BAD_REQUEST => {
                warn!(package_id, "Bin allocation rejected: no space");
                return Err(DomainError::Rejected("Not enough bin space".into()));
            }
            StatusCode::NOT_FOUND => {
                warn!(package_id, "Bin allocation rejected: unknown package");
                return Err(DomainError::NotFound("Package not found".into()));
            }
            _ => return Err(status_error(response).await),
        }

        let body: BinAllocationResponse = response
            .json()
            .await
            .map_err(|e| DomainError::malformed("bin-allocation", e.to_string()))?;

        let is_allocation = match &body.bin_allocation {
            Value::Object(_) => true,
            Value::String(raw) => serde_json::from_str::<Value>(raw).is_ok_and(|v| v.is_object()),
            _ => false,
        };
        if !is_allocation {
            return Err(DomainError::malformed("bin-allocation", "response has no allocation object"));
        }

        let allocation = bin_map(&body.bin_allocation, "bin_allocation", package_id);
        info!(package_id, bins = allocation.len(), "Bins allocated");
        Ok(allocation)
    }

    async fn receive_storing_order(&self, receipt: &ReceivingReceipt) -> Result<ReceiveOutcome, DomainError> {
        info!(storing_order_id = %receipt.storing_order_id, quantity = receipt.quantity, "Submitting receipt");
        let response = self
            .post_json("storing-orders/receive", &ReceiveRequest::from(receipt))
            .await?;
        let status = response.status();

        if status.is_success() {
            return Ok(ReceiveOutcome::Passed);
        }

        if status.is_client_error() {
            let body = body_text(response).await;
            if let Ok(failure) = serde_json::from_str::<ReceiveFailure>(&body) {
                warn!(
                    storing_order_id = %receipt.storing_order_id,
                    detail = %failure.discrepancy_detail,
                    "Receipt failed inspection"
                );
                return Ok(ReceiveOutcome::Failed {
                    discrepancy_detail: failure.discrepancy_detail,
                });
            }
            error!("Receive returned {} without a JSON body", status);
            return Err(DomainError::network(Some(status.as_u16()), format!("API returned {}", status)));
        }

        Err(status_error(response).await)
    }

    async fn save_discrepancy(&self, update: &DiscrepancyUpdate) -> Result<(), DomainError> {
        info!(storing_order_id = %update.storing_order_id, "Saving discrepancy detail");
        let response = self
            .put_json("storing-orders/discrepancy", &DiscrepancyRequest::from(update))
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn submit_quality_check(&self, check: &QualityCheck) -> Result<(), DomainError> {
        info!(package_id = %check.package_id, flag = %check.flag, "Submitting quality check");
        let response = self
            .post_json("tq-quality-check", &QualityCheckRequest::from(check))
            .await?;

        match response.status() {
            status if status.is_success() => {
                info!(package_id = %check.package_id, "Quality check recorded");
                Ok(())
            }
            StatusCode::FORBIDDEN => {
                warn!(package_id = %check.package_id, "Quality check not authorized");
                Err(DomainError::Rejected("You are not authorized to submit quality checks".into()))
            }
            StatusCode::BAD_REQUEST => {
                warn!(package_id = %check.package_id, "Quality check rejected: package not ready");
                Err(DomainError::Rejected("Package status is not READY-FOR-TQ".into()))
            }
            StatusCode::NOT_FOUND => {
                warn!(package_id = %check.package_id, "Quality check rejected: unknown package");
                Err(DomainError::NotFound("Package not found".into()))
            }
            _ => Err(status_error(response).await),
        }
    }

    async fn inventory(&self) -> Result<FetchOutcome<InventoryBin>, DomainError> {
        self.get_list::<InventoryRow, _>("inventory", &[]).await
    }
}
