//! DB row types and request/response DTOs
//!
//! Row structs derive `sqlx::FromRow`; relations (benefits, mentors,
//! techs, feedbacks, requirements) are loaded by the repositories and
//! assembled into the `*Response` types.

pub mod admin_user;
pub mod catalog;
pub mod member;
pub mod mentor;
pub mod opportunity;
pub mod project;
pub mod serde_helpers;
pub mod service;
pub mod training;

pub use admin_user::{AdminInfo, AdminUser, LoginRequest, LoginResponse};
pub use catalog::{CatalogCreate, ServiceOffering, ServiceTech};
pub use member::{Member, MemberCreate, MemberRole, MemberUpdate, SocialMedia};
pub use mentor::{Mentor, MentorCreate, MentorUpdate};
pub use opportunity::{
    InternshipDetails, JobDetails, Opportunity, OpportunityCreate, OpportunityDetails,
    OpportunityKind, OpportunityResponse, OpportunityUpdate,
};
pub use project::{
    Project, ProjectCreate, ProjectFeedback, ProjectFeedbackCreate, ProjectResponse, ProjectUpdate,
};
pub use service::{Service, ServiceCreate, ServiceResponse, ServiceUpdate};
pub use training::{Training, TrainingCreate, TrainingPage, TrainingResponse, TrainingUpdate};
