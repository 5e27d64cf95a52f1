/// Severity of a user-visible notification, used by the panel to pick the
/// visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral informational message.
    Info,
    /// A successful operation or positive outcome.
    Success,
    /// A non-critical issue the user should be aware of; normal operation
    /// continues.
    Warning,
    /// An error or failure that may affect functionality.
    Error,
}

/// A notification payload intended for the user interface.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity of the notification.
    pub severity: Severity,
    /// The text content to display to the user.
    pub text: String,
}
