//! Reservation aggregate.
//!
//! The reservation is the root of the workflow. Partner assignments and
//! payments are separate records driven by other actors; the reservation
//! mirrors just enough of their state to decide its own transitions.
//!
//! # Invariants
//!
//! - once `Cancelled`, nothing changes status, assignment or payment link
//! - the assigned partner and its negotiation status are set together
//! - `assignment` always names the partner of the latest offer
//! - `version` increases by one on every mutation; storage rejects stale writes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::assignment::AssignmentStatus;
use crate::domain::catalog::ServiceSummary;
use crate::domain::foundation::{
    OwnedByUser, PartnerId, PaymentId, Reference, ReservationId, ServiceId, StateMachine,
    Timestamp, UserId, ValidationError,
};
use crate::domain::partner::Partner;
use crate::domain::WorkflowError;

use super::ReservationStatus;

/// Client-supplied details of a reservation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub address: String,
    pub postal_code: String,
    pub description: String,
    pub urgent: bool,
    pub requested_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
}

impl ReservationDetails {
    /// Checks the details against `today` (UTC calendar day).
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.address.trim().is_empty() {
            return Err(ValidationError::empty_field("address"));
        }
        if self.postal_code.trim().is_empty() {
            return Err(ValidationError::empty_field("postal_code"));
        }
        if let Some(date) = self.requested_date {
            if date < today {
                return Err(ValidationError::invalid_format(
                    "requested_date",
                    format!("{} is in the past", date),
                ));
            }
        }
        Ok(())
    }
}

/// The partner currently holding the reservation and where they stand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssignment {
    pub partner: Reference<PartnerId, Partner>,
    pub status: AssignmentStatus,
}

/// A client's request for a home-repair service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub client_id: UserId,
    pub service: Reference<ServiceId, ServiceSummary>,
    pub details: ReservationDetails,
    pub status: ReservationStatus,
    pub assignment: Option<CurrentAssignment>,
    pub payment_id: Option<PaymentId>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    /// Opens a new reservation in status `New`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank address/postal code or a
    /// requested date before `today`.
    pub fn create(
        client_id: UserId,
        service: ServiceSummary,
        details: ReservationDetails,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        details.validate(today)?;

        let now = Timestamp::now();
        Ok(Self {
            id: ReservationId::new(),
            client_id,
            service: Reference::Resolved(service),
            details,
            status: ReservationStatus::New,
            assignment: None,
            payment_id: None,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }

    pub fn assigned_partner_id(&self) -> Option<PartnerId> {
        self.assignment.as_ref().map(|a| a.partner.id())
    }

    pub fn partner_status(&self) -> Option<AssignmentStatus> {
        self.assignment.as_ref().map(|a| a.status)
    }

    /// Copy with every reference reduced to its identifier, as stored.
    pub fn detached(&self) -> Self {
        let mut copy = self.clone();
        copy.service = self.service.to_unresolved();
        if let Some(assignment) = copy.assignment.as_mut() {
            assignment.partner = assignment.partner.to_unresolved();
        }
        copy
    }

    /// Replaces the assigned-partner reference with the loaded record.
    pub fn attach_partner(&mut self, partner: Partner) {
        if let Some(assignment) = self.assignment.as_mut() {
            if assignment.partner.points_to(partner.id) {
                assignment.partner = Reference::Resolved(partner);
            }
        }
    }

    /// Fails with `Conflict` once the reservation is cancelled.
    pub fn ensure_live(&self) -> Result<(), WorkflowError> {
        if self.is_cancelled() {
            return Err(WorkflowError::conflict(format!(
                "Reservation {} is cancelled",
                self.id
            )));
        }
        Ok(())
    }

    /// Moves to `target`. Returns the previous status.
    pub fn change_status(
        &mut self,
        target: ReservationStatus,
    ) -> Result<ReservationStatus, WorkflowError> {
        self.ensure_live()?;
        let previous = self.status;
        self.status = self.status.transition_to(target).map_err(|e| {
            WorkflowError::conflict(format!("Reservation {}: {}", self.id, e))
        })?;
        self.touch();
        Ok(previous)
    }

    /// Points the reservation at `partner_id` with a fresh `Sent` offer.
    ///
    /// # Errors
    ///
    /// `Conflict` when cancelled or completed.
    pub fn assign_partner(&mut self, partner_id: PartnerId) -> Result<(), WorkflowError> {
        if !self.status.accepts_assignment() {
            return Err(WorkflowError::conflict(format!(
                "Cannot assign a partner to a {} reservation",
                self.status
            )));
        }
        self.assignment = Some(CurrentAssignment {
            partner: Reference::Unresolved(partner_id),
            status: AssignmentStatus::Sent,
        });
        self.touch();
        Ok(())
    }

    /// Mirrors a partner's answer onto the reservation.
    ///
    /// Acceptance confirms the reservation; a decline leaves the status alone
    /// but keeps the partner pointer so the operator sees who declined.
    ///
    /// # Errors
    ///
    /// `Conflict` when cancelled, or when `partner_id` is no longer the
    /// current partner because the reservation was reassigned.
    pub fn apply_partner_answer(
        &mut self,
        partner_id: PartnerId,
        answer: AssignmentStatus,
    ) -> Result<(), WorkflowError> {
        self.ensure_live()?;
        let assignment = match self.assignment.as_mut() {
            Some(current) if current.partner.points_to(partner_id) => current,
            _ => {
                return Err(WorkflowError::conflict(format!(
                    "Reservation {} has been reassigned to another partner",
                    self.id
                )))
            }
        };

        assignment.status = answer;
        if answer == AssignmentStatus::Accepted {
            self.status = ReservationStatus::Confirmed;
        }
        self.touch();
        Ok(())
    }

    /// Records the payment now responsible for this reservation.
    pub fn link_payment(&mut self, payment_id: PaymentId) -> Result<(), WorkflowError> {
        self.ensure_live()?;
        self.payment_id = Some(payment_id);
        self.touch();
        Ok(())
    }

    /// Confirms a `New` reservation after its payment succeeded.
    ///
    /// Returns `false` and changes nothing if the reservation already moved
    /// past `New` (or was cancelled).
    pub fn promote_after_payment(&mut self) -> bool {
        if self.status != ReservationStatus::New {
            return false;
        }
        self.status = ReservationStatus::Confirmed;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for Reservation {
    fn owner_id(&self) -> &UserId {
        &self.client_id
    }
}
