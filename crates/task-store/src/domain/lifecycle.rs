/// Mount state of a task list view.
///
/// `Unsubscribed -> Subscribed` happens once at mount,
/// `Subscribed -> Unsubscribed` once at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unsubscribed,
    Subscribed,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Unsubscribed => "unsubscribed",
            Lifecycle::Subscribed => "subscribed",
        }
    }
}
