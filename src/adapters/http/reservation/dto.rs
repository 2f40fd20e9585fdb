//! HTTP DTOs for reservation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::assignment::AssignmentStatus;
use crate::domain::foundation::Timestamp;
use crate::domain::reservation::{Reservation, ReservationDetails, ReservationStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub service_id: String,
    pub address: String,
    pub postal_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub urgent: bool,
    /// `YYYY-MM-DD`, not before today (UTC).
    pub requested_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
}

impl CreateReservationRequest {
    pub fn details(&self) -> ReservationDetails {
        ReservationDetails {
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            description: self.description.clone(),
            urgent: self.urgent,
            requested_date: self.requested_date,
            time_slot: self.time_slot.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignPartnerRequest {
    pub partner_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// Reservation as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub client_id: String,
    pub service: ServiceView,
    pub address: String,
    pub postal_code: String,
    pub description: String,
    pub urgent: bool,
    pub requested_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub status: ReservationStatus,
    pub assigned_partner: Option<PartnerView>,
    pub partner_status: Option<AssignmentStatus>,
    pub payment_id: Option<String>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        let service = ServiceView {
            id: r.service.id().to_string(),
            name: r.service.resolved().map(|s| s.name.clone()),
        };
        let (assigned_partner, partner_status) = match &r.assignment {
            Some(current) => {
                let partner = current.partner.resolved();
                (
                    Some(PartnerView {
                        id: current.partner.id().to_string(),
                        display_name: partner.map(|p| p.display_name.clone()),
                        service_type: partner.map(|p| p.service_type.clone()),
                    }),
                    Some(current.status),
                )
            }
            None => (None, None),
        };

        Self {
            id: r.id.to_string(),
            client_id: r.client_id.to_string(),
            service,
            address: r.details.address,
            postal_code: r.details.postal_code,
            description: r.details.description,
            urgent: r.details.urgent,
            requested_date: r.details.requested_date,
            time_slot: r.details.time_slot,
            status: r.status,
            assigned_partner,
            partner_status,
            payment_id: r.payment_id.map(|id| id.to_string()),
            version: r.version,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
