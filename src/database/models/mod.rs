pub mod biodata;
pub mod favorite;
pub mod payment;
pub mod premium_request;
pub mod success_story;
pub mod user;

pub use biodata::{Biodata, BiodataCounts, BiodataFields, BiodataType};
pub use favorite::{Favorite, NewFavorite};
pub use payment::{NewPayment, Payment, PaymentStatus};
pub use premium_request::{PremiumRequest, RequestStatus, Verdict};
pub use success_story::SuccessStory;
pub use user::{NewUser, Role, UpsertOutcome, User};
