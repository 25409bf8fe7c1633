//! Free-text search over a ticket snapshot.

use crate::ticket::Ticket;

/// A prepared, case-folded search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Prepare a term. Surrounding whitespace is ignored.
    pub fn new(term: &str) -> Self {
        SearchTerm {
            needle: term.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether the ticket's ID, display name, assignee or customer contains the term
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if self.is_empty() {
            return true;
        }
        [
            ticket.id.as_str(),
            ticket.display_name.as_str(),
            ticket.assigned_to.as_str(),
            ticket.registered_customer.as_str(),
        ]
        .iter()
        .any(|field| !field.is_empty() && field.to_lowercase().contains(&self.needle))
    }
}

/// Filter records by a case-insensitive substring match, preserving order.
///
/// An empty term returns every record.
pub fn filter<'a>(records: &'a [Ticket], term: &str) -> Vec<&'a Ticket> {
    let term = SearchTerm::new(term);
    records.iter().filter(|t| term.matches(t)).collect()
}
