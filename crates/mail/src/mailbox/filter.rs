//! Search query classification

/// The single filter dimension applied to a listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// Unfiltered mailbox
    All,
    /// Sender address contains the value
    From(String),
    /// Subject contains the value
    Subject(String),
}

impl SearchFilter {
    /// Classify a free-form search query
    ///
    /// Purely syntactic: anything containing `@` is a sender filter,
    /// anything else a subject filter, and the empty query is no filter.
    pub fn classify(query: &str) -> Self {
        if query.is_empty() {
            SearchFilter::All
        } else if query.contains('@') {
            SearchFilter::From(query.to_string())
        } else {
            SearchFilter::Subject(query.to_string())
        }
    }

    /// Query-string pair for the listing endpoint
    pub fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            SearchFilter::All => None,
            SearchFilter::From(addr) => Some(("from", addr)),
            SearchFilter::Subject(text) => Some(("subject", text)),
        }
    }
}
