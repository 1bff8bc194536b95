pub mod coparticipation_type;
pub mod modality;

pub use coparticipation_type::CoparticipationType;
pub use modality::Modality;
