//! Declarative column descriptors.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

/// A display value extracted from a row by a column accessor.
///
/// Carries enough type information for a meaningful ordering; cells
/// with no resolvable value are `Empty` and render as blank.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Date(d) => d.format("%d/%m/%Y").to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Total ordering used by the client-mode sort. Values of
    /// different kinds order by kind; numbers compare across
    /// `Int`/`Float`.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Empty)
    }
}

type Accessor<R> = Rc<dyn Fn(&R) -> CellValue>;
type Renderer<R> = Rc<dyn Fn(&CellValue, &R) -> String>;

/// Describes how one attribute of a row is displayed, sized and
/// sorted.
///
/// A column built with [`Column::new`] reads its value through a typed
/// accessor. A [`Column::synthetic`] column (e.g. an "actions" column)
/// has no accessor, is never sortable, and renders exclusively through
/// its cell renderer.
pub struct Column<R> {
    key: String,
    header: Option<String>,
    sortable: bool,
    pub(super) min_width: Option<u16>,
    pub(super) width: Option<u16>,
    pub(super) max_width: Option<u16>,
    accessor: Option<Accessor<R>>,
    renderer: Option<Renderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, accessor: impl Fn(&R) -> CellValue + 'static) -> Self {
        Self {
            key: key.into(),
            header: None,
            sortable: true,
            min_width: None,
            width: None,
            max_width: None,
            accessor: Some(Rc::new(accessor)),
            renderer: None,
        }
    }

    /// A column whose key does not address a row field; only its cell
    /// renderer gives it content.
    pub fn synthetic(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            sortable: false,
            min_width: None,
            width: None,
            max_width: None,
            accessor: None,
            renderer: None,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn render(mut self, renderer: impl Fn(&CellValue, &R) -> String + 'static) -> Self {
        self.renderer = Some(Rc::new(renderer));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header text, falling back to the key.
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }

    /// Synthetic columns never sort, regardless of the flag.
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }

    pub fn value(&self, row: &R) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => CellValue::Empty,
        }
    }

    pub fn display(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.renderer {
            Some(renderer) => renderer(&value, row),
            None => value.display(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            min_width: self.min_width,
            width: self.width,
            max_width: self.max_width,
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
