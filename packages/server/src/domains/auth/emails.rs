//! Email copy for account flows.

/// Welcome mail sent right after registration.
pub fn welcome_email(full_name: &str) -> (String, String) {
    let subject = "Welcome to Lectern".to_string();
    let html = format!(
        "<h2>Welcome, {}!</h2>\
         <p>Your account is ready. Browse courses, share posts and join the discussion.</p>",
        full_name
    );
    (subject, html)
}

/// Reset mail carrying the short-lived code.
pub fn reset_email(full_name: &str, code: &str) -> (String, String) {
    let subject = "Your password reset code".to_string();
    let html = format!(
        "<p>Hi {},</p>\
         <p>Use this code to reset your password. It expires in one hour.</p>\
         <h2 style=\"letter-spacing: 4px\">{}</h2>\
         <p>If you did not request a reset, you can ignore this email.</p>",
        full_name, code
    );
    (subject, html)
}
