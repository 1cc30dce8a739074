//! Feature services: thin adapters over the API gateway. Each service owns
//! the per-endpoint decision of whether a payload arrives bare or wrapped in
//! a `{data, message, error}` envelope; the gateway never makes that call.

pub mod normalize;
pub mod auth;
pub mod users;
pub mod appointments;
pub mod records;
pub mod payments;
pub mod insurance;
pub mod emergency;

pub use auth::{AuthService, LoginOutcome, RegisterRequest};
pub use users::UserService;
pub use appointments::AppointmentService;
pub use records::RecordService;
pub use payments::PaymentService;
pub use insurance::InsuranceService;
pub use emergency::EmergencyService;
