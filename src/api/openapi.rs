//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, events, health, loans, memberships, payments};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Room 19 API",
        version = "0.3.0",
        description = "Library reservation and loan REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "The Room 19 Library")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::check_availability,
        availability::event_remaining_slots,
        availability::session_remaining_slots,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::cancel_booking,
        // Events
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        // Loans
        loans::get_loan,
        loans::get_user_loans,
        loans::get_user_history,
        loans::create_loan,
        loans::return_loan,
        loans::request_extension,
        loans::loan_stats,
        // Payments
        payments::payment_callback,
        // Memberships
        memberships::list_memberships,
        memberships::get_membership,
        memberships::update_membership_status,
    ),
    components(
        schemas(
            // Availability
            availability::CheckAvailabilityRequest,
            availability::RemainingSlotsResponse,
            crate::models::booking::Availability,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            bookings::BookingResponse,
            bookings::BookingRejectedResponse,
            bookings::CancelBookingRequest,
            // Resources
            crate::models::resource::ResourceId,
            crate::models::resource::Event,
            crate::models::resource::CreateEvent,
            crate::models::resource::UpdateEvent,
            events::EventListResponse,
            // Enums
            crate::models::enums::Shift,
            crate::models::enums::ResourceStatus,
            crate::models::enums::UnitKind,
            crate::models::enums::BookingStatus,
            crate::models::enums::LoanStatus,
            crate::models::enums::MembershipStatus,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::ExtensionProposal,
            loans::ReturnResponse,
            crate::services::loans::LoanStats,
            // Payments
            crate::services::payments::PaymentCallback,
            crate::services::payments::PaymentPurpose,
            payments::CallbackResponse,
            // Memberships
            crate::models::membership::MembershipApplication,
            crate::models::membership::UpdateMembershipStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Capacity checks"),
        (name = "bookings", description = "Session and event bookings"),
        (name = "events", description = "Event management"),
        (name = "loans", description = "Loan lifecycle"),
        (name = "payments", description = "Payment callbacks"),
        (name = "memberships", description = "Membership applications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
