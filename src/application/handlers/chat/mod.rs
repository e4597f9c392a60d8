//! Chat handlers.

mod ask_doctor;

pub use ask_doctor::AskDoctorHandler;
