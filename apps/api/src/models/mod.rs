pub mod candidate;
pub mod company;
pub mod job;

pub use candidate::{Candidate, NewCandidate};
pub use company::{Company, CompanySummary, Contact, NewCompany, NewContact};
pub use job::{JobWithCompany, PipelineStats};
