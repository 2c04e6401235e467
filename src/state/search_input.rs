//! Search input state machine (pure state transitions).
//!
//! The query being typed lives here; it reaches the page views only when it is
//! submitted or cancelled.

use crate::model::SearchQuery;

// ===== SearchState =====

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No query.
    #[default]
    Inactive,
    /// User is typing. `cursor` counts characters, not bytes.
    Typing {
        /// Text typed so far.
        query: String,
        /// Cursor position in characters.
        cursor: usize,
    },
    /// A submitted query filters the pages.
    Active(SearchQuery),
}

impl SearchState {
    /// Whether keys go to the input line.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchState::Typing { .. })
    }

    /// The query the views should filter with.
    pub fn applied_query(&self) -> SearchQuery {
        match self {
            SearchState::Active(query) => query.clone(),
            _ => SearchQuery::empty(),
        }
    }
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map_or(text.len(), |(index, _)| index)
}

// ===== Transitions =====

/// Start typing, seeded with the active query if there is one.
pub fn start(state: SearchState) -> SearchState {
    match state {
        SearchState::Active(query) => {
            let query = query.as_str().to_string();
            let cursor = query.chars().count();
            SearchState::Typing { query, cursor }
        }
        SearchState::Inactive => SearchState::Typing {
            query: String::new(),
            cursor: 0,
        },
        typing => typing,
    }
}

/// Insert `ch` at the cursor. No-op unless typing.
pub fn handle_char_input(state: SearchState, ch: char) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } => {
            query.insert(byte_index(&query, cursor), ch);
            SearchState::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor. No-op unless typing.
pub fn handle_backspace(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } if cursor > 0 => {
            query.remove(byte_index(&query, cursor - 1));
            SearchState::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor one character left, saturating at 0.
pub fn handle_cursor_left(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => SearchState::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor one character right, saturating at the end.
pub fn handle_cursor_right(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => {
            let end = query.chars().count();
            SearchState::Typing {
                query,
                cursor: (cursor + 1).min(end),
            }
        }
        other => other,
    }
}

/// Apply the typed query. A blank query deactivates search.
pub fn submit(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, .. } => {
            let query = SearchQuery::new(query);
            if query.is_empty() {
                SearchState::Inactive
            } else {
                SearchState::Active(query)
            }
        }
        other => other,
    }
}

/// Drop the query, whatever the state.
pub fn cancel(_state: SearchState) -> SearchState {
    SearchState::Inactive
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing(query: &str, cursor: usize) -> SearchState {
        SearchState::Typing {
            query: query.to_string(),
            cursor,
        }
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let state = handle_char_input(typing("iron", 0), 'x');
        assert_eq!(state, typing("xiron", 1));
    }

    #[test]
    fn multibyte_text_is_edited_by_character() {
        let state = handle_char_input(typing("über", 1), 'b');
        assert_eq!(state, typing("übber", 2));

        let state = handle_backspace(typing("über", 1));
        assert_eq!(state, typing("ber", 0));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        assert_eq!(handle_backspace(typing("ore", 0)), typing("ore", 0));
    }

    #[test]
    fn cursor_moves_saturate() {
        assert_eq!(handle_cursor_left(typing("ab", 0)), typing("ab", 0));
        assert_eq!(handle_cursor_right(typing("ab", 2)), typing("ab", 2));
        assert_eq!(handle_cursor_right(typing("ab", 1)), typing("ab", 2));
    }

    #[test]
    fn input_is_ignored_when_not_typing() {
        assert_eq!(
            handle_char_input(SearchState::Inactive, 'a'),
            SearchState::Inactive
        );
    }

    #[test]
    fn submit_blank_query_deactivates() {
        assert_eq!(submit(typing("   ", 3)), SearchState::Inactive);
    }

    #[test]
    fn submit_then_restart_seeds_with_query() {
        let active = submit(typing("plate", 5));
        assert_eq!(active.applied_query().as_str(), "plate");
        assert!(!active.is_typing());

        assert_eq!(start(active), typing("plate", 5));
    }

    #[test]
    fn typing_state_applies_no_query() {
        assert!(typing("ir", 2).applied_query().is_empty());
    }

    #[test]
    fn cancel_always_deactivates() {
        assert_eq!(
            cancel(SearchState::Active(SearchQuery::new("iron"))),
            SearchState::Inactive
        );
    }
}
