pub mod dto;

pub use dto::{
    network_rows, Hospital, NetworkEntry, NetworkQuery, NetworkRow, ReferencePlan, ReferenceQuery,
    ReferenceRows, ReferenceTab,
};
