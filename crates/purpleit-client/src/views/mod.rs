//! View state machines, one per route.

pub mod create;
pub mod detail;
pub mod edit;
pub mod list;

pub use create::CreateForm;
pub use detail::{DeleteRequest, DetailView, PostState, UpvoteTicket};
pub use edit::EditForm;
pub use list::{EmptyState, ListView, PostCard};

/// Form text as an optional field: blank input means "not set". Anything
/// else is sent as typed.
pub(crate) fn optional(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_keeps_surrounding_whitespace() {
        assert_eq!(optional("   "), None);
        assert_eq!(optional(""), None);
        assert_eq!(
            optional("  indented\n").as_deref(),
            Some("  indented\n")
        );
    }
}
