//! Outbound message templates

use platform::notify::Notification;

use crate::domain::entity::User;

pub fn registration_confirmed(user: &User, site_url: &str) -> Notification {
    Notification::new(
        user.email.as_str(),
        "Registration confirmed",
        format!(
            "Hello {name},\n\n\
             Your account \"{name}\" has been created. You can sign in at {site_url}\n",
            name = user.user_name,
        ),
    )
}

pub fn password_changed(user: &User) -> Notification {
    Notification::new(
        user.email.as_str(),
        "Your password was changed",
        format!(
            "Hello {name},\n\n\
             The password for \"{name}\" was just changed. If this was not you, \
             reset it again and review your active sessions.\n",
            name = user.user_name,
        ),
    )
}
