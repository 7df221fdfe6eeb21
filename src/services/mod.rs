pub mod biodata_service;
pub mod payment_service;
pub mod premium_service;

pub use payment_service::{OfflineProcessor, PaymentError, PaymentIntent, PaymentProcessor, StripeProcessor};
pub use premium_service::{Decision, PremiumService, WorkflowError};
