pub mod password;
pub mod photo;
pub mod staff;

pub use password::{MIN_PASSWORD_LEN, PasswordChangeRequest};
pub use photo::PhotoUpload;
pub use staff::{StaffRecord, StaffRole, StaffRow};
