mod crop;
mod crop_catalog;
mod errors;
mod evidence;
mod profile;
mod scheme;
mod scheme_catalog;
mod session_store;

pub use crop::{find_step, step_position, CropStep, CropType};
pub use errors::DomainError;
pub use evidence::{is_image_media_type, sniff_image_type, CompletedStep, Evidence};
pub use profile::{FarmerProfile, ProfileField};
pub use scheme::{all_schemes, eligible_schemes, find_scheme, rank_eligible, SponsorType, SubsidyScheme};
pub use session_store::{InMemorySessionStore, SessionStore};
