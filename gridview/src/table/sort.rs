//! Single-column sort state.

/// The active sort: which column, and which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

/// At most one active [`SortKey`]; empty means natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<SortKey>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&SortKey> {
        self.key.as_ref()
    }

    pub fn is_unsorted(&self) -> bool {
        self.key.is_none()
    }

    /// Active column key, or the empty string when unsorted. This is
    /// the value handed to the pagination-change callback.
    pub fn column(&self) -> &str {
        self.key.as_ref().map(|k| k.column.as_str()).unwrap_or("")
    }

    /// `Some(true)` ascending, `Some(false)` descending, `None`
    /// unsorted.
    pub fn ascending(&self) -> Option<bool> {
        self.key.as_ref().map(|k| !k.descending)
    }

    /// Advance the toggle cycle for a column:
    /// unsorted -> descending -> ascending -> unsorted.
    ///
    /// Descending comes first. Unusual, but intentional; callers rely
    /// on the first click surfacing the newest/highest values.
    pub fn toggle(&mut self, column: &str) {
        self.key = match self.key.take() {
            Some(key) if key.column == column => {
                if key.descending {
                    Some(SortKey {
                        column: key.column,
                        descending: false,
                    })
                } else {
                    None
                }
            }
            _ => Some(SortKey {
                column: column.to_string(),
                descending: true,
            }),
        };
    }

    pub fn clear(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_descending_first() {
        let mut sort = SortState::new();
        sort.toggle("name");
        assert_eq!(sort.ascending(), Some(false));
        sort.toggle("name");
        assert_eq!(sort.ascending(), Some(true));
        sort.toggle("name");
        assert!(sort.is_unsorted());
    }

    #[test]
    fn toggling_another_column_restarts_the_cycle() {
        let mut sort = SortState::new();
        sort.toggle("name");
        sort.toggle("id");
        assert_eq!(sort.column(), "id");
        assert_eq!(sort.ascending(), Some(false));
    }
}
