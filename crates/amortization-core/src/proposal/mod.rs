//! Proposal contracts around a finished simulation: the applicant's personal
//! data, the document handed to an external renderer, the record shape kept
//! by an external document store, the lead kept per user, and a client-side
//! history of runs.

pub mod document;
pub mod history;
pub mod lead;
pub mod personal;
pub mod record;

pub use document::{build_proposal, ProposalDocument, ProposalInput};
pub use history::{
    all_records_newest_first, records_for_user, SimulationHistory, DEFAULT_USER_RECORD_LIMIT,
};
pub use lead::LeadRecord;
pub use personal::{PersonalData, UserIdentity};
pub use record::SimulationRecord;
