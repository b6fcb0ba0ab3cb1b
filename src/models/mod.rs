pub mod catalogue;
pub mod form_state;
pub mod qr_code;
