use serde::Deserialize;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Form values for one password change. Never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeRequest {
    pub fn new(current: &str, new: &str, confirm: &str) -> Self {
        Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.current_password.is_empty()
            && self.new_password.is_empty()
            && self.confirm_password.is_empty()
    }

    pub fn clear(&mut self) {
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
    }
}
