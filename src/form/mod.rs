//! Form state behind the entry surface: the measurement input, the tag and
//! field slot lists, the suggestion lists, and the submission status.

pub mod command;
pub mod session;
pub mod slots;
pub mod suggest;

pub use command::{
    apply, parse_command, render, Applied, Command, CommandError, SlotCommand, SlotGroup, SuggestTarget,
};
pub use session::{FormSession, SubmitStatus};
pub use slots::{PairList, PairSlot, SlotError, SlotId};
pub use suggest::Suggestions;
