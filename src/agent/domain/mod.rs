//! Domain types exchanged with the credential-exchange agent.

mod definition;
mod ids;
mod invitation;

pub use definition::SubjectDefinition;
pub use ids::{ConnectionId, InvitationId, SubjectId};
pub use invitation::{ConnectionRecord, ConnectionState, ParsedInvitation};
